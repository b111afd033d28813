//! Layers command implementation
//!
//! Prints the flattened layer order (base first, root last) with each
//! layer's source and resolved directory. Useful for debugging why a
//! value ended up in the effective configuration.

use std::path::PathBuf;

use console::Style;

use crate::compose::resolve_layers;
use crate::error::Result;
use crate::store::GitStore;

/// Run layers command
pub fn run(dir: Option<PathBuf>) -> Result<()> {
    let project_dir = super::project_dir(dir)?;
    let store = GitStore::new()?;
    let layers = resolve_layers(&project_dir, &store)?;

    println!("Resolved layers ({}):", layers.len());
    println!();

    for (index, layer) in layers.iter().enumerate() {
        println!(
            "  {}. {}",
            index + 1,
            Style::new().bold().yellow().apply_to(layer.layer_ref.short_name())
        );
        println!(
            "     {} {}",
            Style::new().bold().apply_to("Source:"),
            layer.layer_ref.display_location()
        );
        println!(
            "     {} {}",
            Style::new().bold().apply_to("Directory:"),
            layer.dir.display()
        );
    }

    Ok(())
}
