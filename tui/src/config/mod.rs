pub mod builder;
pub mod json;
pub mod model;

pub use model::AppConfig;

/// Reads and validates the config file at `path`.
///
/// # Errors
/// Returns a human-readable string naming the first problem found.
pub fn load(path: &str) -> Result<AppConfig, String> {
    let draft = json::load(path)?;
    builder::build(&draft).map_err(|e| format!("{path}: {e}"))
}

impl Default for AppConfig {
    fn default() -> Self {
        // the default draft always passes validation
        match builder::build(&model::ConfigDraft::default()) {
            Ok(config) => config,
            Err(e) => unreachable!("default config is invalid: {e}"),
        }
    }
}
