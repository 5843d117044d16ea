use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Storage
    pub journal_file: String,

    // Logging
    pub log_level: String,

    // Trade defaults applied when a logged trade omits them
    pub default_leverage: f64,
    pub default_contract_size: f64,

    // Listing
    pub default_page_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_file: env("JOURNAL_FILE", "data/journal.json"),
            log_level: env("LOG_LEVEL", "info"),
            default_leverage: positive_or(env("DEFAULT_LEVERAGE", "1").parse().ok(), 1.0),
            default_contract_size: positive_or(
                env("DEFAULT_CONTRACT_SIZE", "1").parse().ok(),
                1.0,
            ),
            default_page_size: env("DEFAULT_PAGE_SIZE", "50").parse().unwrap_or(50),
        }
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}
