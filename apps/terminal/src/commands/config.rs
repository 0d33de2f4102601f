//! # Config Commands
//!
//! Shows the active configuration, in the same TOML shape as `brew.toml`.

use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::PosState;

/// Renders the configuration after file, environment and flag overrides.
pub fn show(state: &PosState) -> ApiResult<String> {
    debug!("config command");
    let config = state.config();

    let body = toml::to_string_pretty(config).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(format!(
        "# database: {}\n{}",
        config.resolve_database_path().display(),
        body.trim_end()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use brew_store::Storage;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_show_config() {
        let config = ConfigState {
            store_name: "Corner Coffee".to_string(),
            database_path: Some(PathBuf::from("/tmp/corner.db")),
            ..Default::default()
        };
        let state = PosState::initialize(Storage::memory(), config).await.unwrap();

        let text = show(&state).unwrap();
        assert!(text.starts_with("# database: /tmp/corner.db"));
        assert!(text.contains("store_name = \"Corner Coffee\""));
        assert!(text.contains("stock_policy = \"enforce\""));
    }
}
