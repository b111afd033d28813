//! Env command implementation
//!
//! Composes the project, applies `LAMINA_PUBLIC_*` overrides from the
//! process environment and prints the resulting public runtime values.

use std::path::PathBuf;

use crate::compose::compose;
use crate::error::Result;
use crate::overlay::overlay_public;
use crate::store::GitStore;

/// Run env command
pub fn run(dir: Option<PathBuf>) -> Result<()> {
    let project_dir = super::project_dir(dir)?;
    let store = GitStore::new()?;
    let config = compose(&project_dir, &store)?;

    let view = overlay_public(&config, |name| std::env::var(name).ok());
    print!("{}", serde_yaml::to_string(&view)?);

    Ok(())
}
