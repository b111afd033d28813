//! Compose command implementation
//!
//! Resolves the layer stack for the project directory, merges the
//! fragments and prints the effective configuration.

use std::path::PathBuf;

use crate::cli::{ComposeArgs, OutputFormat};
use crate::compose::compose;
use crate::error::Result;
use crate::store::GitStore;

/// Run compose command
pub fn run(dir: Option<PathBuf>, args: ComposeArgs) -> Result<()> {
    let project_dir = super::project_dir(dir)?;
    let store = GitStore::new()?;
    let config = compose(&project_dir, &store)?;

    if args.digest {
        println!("{}", config.digest()?);
        return Ok(());
    }

    let rendered = match args.format {
        OutputFormat::Yaml => config.to_yaml()?,
        OutputFormat::Json => config.to_json()?,
    };
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
