use anyhow::Context;

use tempo_config::TempoConfig;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<TempoConfig> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(error).context("failed to load .env file");
        }
    }
    TempoConfig::load().context("failed to load tempo configuration")
}
