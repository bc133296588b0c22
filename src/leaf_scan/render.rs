use super::core::{Preview, State};
use crate::config::Config;
use crate::prediction_client::interface::{HistoryItem, PredictionResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

pub const PICK_FILE_PLACEHOLDER: &str = "Click to Upload Image";
pub const SUBMIT_LABEL_IDLE: &str = "Diagnose Disease";
pub const SUBMIT_LABEL_LOADING: &str = "Processing...";
pub const NO_HISTORY_PLACEHOLDER: &str = "No scan history yet.";
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub file_label: String,
    pub preview: Option<Preview>,
    pub submit: SubmitView,
    pub result: Option<ResultView>,
    pub history: HistoryView,
    pub notice: Option<String>,
}

impl View {
    /// Everything but the notice is inert while the notice is showing.
    pub fn interactive(&self) -> bool {
        self.notice.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub prediction: String,
    pub bar_fraction: f32,
    pub bar_width: String,
    pub confidence_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Empty { placeholder: &'static str },
    Rows(Vec<HistoryRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub key: String,
    pub prediction: String,
    pub confidence: String,
    pub date: String,
}

#[derive(Clone)]
pub struct Render {
    display_timezone: FixedOffset,
}

impl Render {
    pub fn new(config: &Config) -> Self {
        Self {
            display_timezone: config.display_timezone,
        }
    }

    pub fn view(&self, state: &State) -> View {
        View {
            file_label: match &state.selected_file {
                Some(file) => file.name.clone(),
                None => PICK_FILE_PLACEHOLDER.to_string(),
            },
            preview: state.preview.clone(),
            submit: SubmitView {
                label: if state.loading {
                    SUBMIT_LABEL_LOADING
                } else {
                    SUBMIT_LABEL_IDLE
                },
                enabled: state.selected_file.is_some() && !state.loading,
            },
            result: state.prediction.as_ref().map(result_view),
            history: if state.history.is_empty() {
                HistoryView::Empty {
                    placeholder: NO_HISTORY_PLACEHOLDER,
                }
            } else {
                HistoryView::Rows(
                    state
                        .history
                        .iter()
                        .map(|item| self.history_row(item))
                        .collect(),
                )
            },
            notice: state.notice.clone(),
        }
    }

    fn history_row(&self, item: &HistoryItem) -> HistoryRow {
        HistoryRow {
            key: item.id.to_string(),
            prediction: item.prediction.clone(),
            confidence: format!("{:.0}%", item.confidence * 100.0),
            date: self.local_date(&item.timestamp),
        }
    }

    /// Calendar date of `timestamp` as seen from the display timezone.
    pub fn local_date(&self, timestamp: &str) -> String {
        const DATE_FORMAT: &str = "%-m/%-d/%Y";

        if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
            return instant
                .with_timezone(&self.display_timezone)
                .format(DATE_FORMAT)
                .to_string();
        }

        // No offset: already wall-clock time for the viewer.
        if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return naive.format(DATE_FORMAT).to_string();
        }

        // Date-only forms are midnight UTC.
        if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return midnight
                    .and_utc()
                    .with_timezone(&self.display_timezone)
                    .format(DATE_FORMAT)
                    .to_string();
            }
        }

        INVALID_DATE.to_string()
    }
}

fn result_view(prediction: &PredictionResult) -> ResultView {
    let percent = prediction.confidence * 100.0;
    ResultView {
        prediction: prediction.prediction.clone(),
        bar_fraction: prediction.confidence.clamp(0.0, 1.0) as f32,
        bar_width: format!("{:.0}%", percent),
        confidence_text: format!("{:.1}% Confidence", percent),
    }
}
