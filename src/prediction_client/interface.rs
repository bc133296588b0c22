use crate::file_picker::interface::SelectedFile;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: f64,
}

/// Record ids come back as integers from the reference server, strings from others.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HistoryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryId::Number(n) => write!(f, "{}", n),
            HistoryId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryItem {
    pub id: HistoryId,
    pub prediction: String,
    pub confidence: f64,
    pub timestamp: String,
}

pub trait PredictionClient {
    fn predict(
        &self,
        file: &SelectedFile,
    ) -> Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>>;

    fn history(&self) -> Result<Vec<HistoryItem>, Box<dyn std::error::Error + Send + Sync>>;
}
