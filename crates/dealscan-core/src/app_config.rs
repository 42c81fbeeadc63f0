use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Tax multiplier applied to shelf prices, e.g. `1.15` for 15% GST.
    /// Report rows divide by it to show ex-tax prices.
    pub gst_rate: Decimal,
    /// Default location of the extracted listings JSON consumed by the CLI.
    pub input_path: PathBuf,
    /// Default location the CLI writes classified output to.
    pub output_path: PathBuf,
}
