use log::info;
use std::env;

/// Runtime settings for the server binary, read from the environment.
pub struct Config {
    pub bind_addr: String,
    pub sheet_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            bind_addr: env_or("LEADSHEET_ADDR", "127.0.0.1:3000"),
            sheet_path: env_or("LEADSHEET_SHEET", "leads.bin.gz"),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
