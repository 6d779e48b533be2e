//! Process environment settings
//!
//! File locations come from the environment with the same variable
//! names and defaults the data files were originally written under.

pub const DEFAULT_ADOPTION_PATH: &str = "adoption_data.json";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Path of the adoption ledger file (`ADOPTION_PATH`)
pub fn adoption_path() -> String {
    env_or("ADOPTION_PATH", DEFAULT_ADOPTION_PATH)
}

/// Path of the bot configuration file (`CONFIG_PATH`)
pub fn config_path() -> String {
    env_or("CONFIG_PATH", DEFAULT_CONFIG_PATH)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
