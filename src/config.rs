use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub max_file_size: usize,
}

pub fn load_config() -> Result<Config> {
    // Load .env file first
    dotenv().ok();

    let max_file_size = match std::env::var("MAX_FILE_SIZE") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid MAX_FILE_SIZE: {}", e))?,
        Err(_) => default_max_file_size(),
    };

    Ok(Config { max_file_size })
}
