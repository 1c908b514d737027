//! Loader for RON tuning files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::MovementTuningDef;
use crate::controller::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub(crate) fn parse_movement_tuning(contents: &str) -> Result<MovementTuning, ron::error::SpannedError> {
    let def: MovementTuningDef = ron_options().from_str(contents)?;
    Ok(def.into())
}

/// Load movement tuning from `<base_path>/movement.ron`.
pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let path = base_path.join("movement.ron");
    let file_name = path.display().to_string();

    let contents = fs::read_to_string(&path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents).map_err(|e| ContentLoadError {
        file: file_name,
        message: format!("Parse error: {}", e),
    })
}
