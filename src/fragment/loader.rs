//! Fragment loading from a resolved layer directory
//!
//! No retries happen here: a load failure is terminal for the whole
//! composition and surfaces to the caller with the fragment path.

use std::path::Path;

use crate::error::{LaminaError, Result, malformed_fragment};

use super::{ConfigFragment, FRAGMENT_FILE};

/// Load and validate the fragment of a resolved layer directory
pub fn load_fragment(layer_dir: &Path) -> Result<ConfigFragment> {
    let fragment_path = layer_dir.join(FRAGMENT_FILE);

    if !fragment_path.is_file() {
        return Err(malformed_fragment(
            fragment_path.display().to_string(),
            "fragment file not found in layer directory",
        ));
    }

    let content =
        std::fs::read_to_string(&fragment_path).map_err(|e| LaminaError::FileReadFailed {
            path: fragment_path.display().to_string(),
            reason: e.to_string(),
        })?;

    ConfigFragment::from_yaml(&content, &fragment_path.display().to_string())
}
