use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
