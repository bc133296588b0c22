use crate::file_picker::interface::SelectedFile;
use crate::prediction_client::interface::{HistoryItem, PredictionResult};
use std::fmt;
use std::sync::Arc;

pub const PREDICT_FAILED_NOTICE: &str = "Error processing image";

/// Local rendering reference for the selected file. `id` is the selection it was made from.
#[derive(Clone, PartialEq)]
pub struct Preview {
    pub id: u64,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("id", &self.id)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub selected_file: Option<SelectedFile>,
    pub selection_id: u64,
    pub preview: Option<Preview>,
    pub prediction: Option<PredictionResult>,
    pub loading: bool,
    pub history: Vec<HistoryItem>,
    pub notice: Option<String>,
}

#[derive(Debug)]
pub enum Event {
    PickFileClicked,
    FileSelected(Option<SelectedFile>),
    SubmitClicked,
    PredictDone {
        selection_id: u64,
        result: Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>>,
    },
    HistoryFetchDone(Result<Vec<HistoryItem>, Box<dyn std::error::Error + Send + Sync>>),
    NoticeDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PickFile,
    Predict {
        selection_id: u64,
        file: SelectedFile,
    },
    RefreshHistory,
    LogError {
        message: String,
    },
}

impl Effect {
    /// Native dialogs must be opened from the UI thread on some platforms.
    pub fn needs_ui_thread(&self) -> bool {
        matches!(self, Effect::PickFile)
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::default(), vec![Effect::RefreshHistory])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        Event::PickFileClicked => (state, vec![Effect::PickFile]),

        Event::FileSelected(Some(file)) => {
            let selection_id = state.selection_id + 1;
            let preview = Preview {
                id: selection_id,
                bytes: file.bytes.clone(),
            };
            (
                State {
                    selected_file: Some(file),
                    selection_id,
                    preview: Some(preview),
                    prediction: None,
                    ..state
                },
                vec![],
            )
        }
        Event::FileSelected(None) => (
            State {
                selected_file: None,
                selection_id: state.selection_id + 1,
                preview: None,
                prediction: None,
                ..state
            },
            vec![],
        ),

        Event::SubmitClicked => {
            if state.loading {
                return (state, vec![]);
            }
            match state.selected_file.clone() {
                Some(file) => {
                    let effect = Effect::Predict {
                        selection_id: state.selection_id,
                        file,
                    };
                    (
                        State {
                            loading: true,
                            ..state
                        },
                        vec![effect],
                    )
                }
                None => (state, vec![]),
            }
        }

        Event::PredictDone {
            selection_id,
            result: Ok(prediction),
        } => {
            // A newer selection supersedes this response; the server still recorded it.
            let prediction = if selection_id == state.selection_id {
                Some(prediction)
            } else {
                state.prediction.clone()
            };
            (
                State {
                    prediction,
                    loading: false,
                    ..state
                },
                vec![Effect::RefreshHistory],
            )
        }
        Event::PredictDone {
            result: Err(error), ..
        } => (
            State {
                loading: false,
                notice: Some(PREDICT_FAILED_NOTICE.to_string()),
                ..state
            },
            vec![Effect::LogError {
                message: format!("Error uploading file: {}", error),
            }],
        ),

        Event::HistoryFetchDone(Ok(history)) => (State { history, ..state }, vec![]),
        Event::HistoryFetchDone(Err(error)) => (
            state,
            vec![Effect::LogError {
                message: format!("Failed to fetch history: {}", error),
            }],
        ),

        Event::NoticeDismissed => (
            State {
                notice: None,
                ..state
            },
            vec![],
        ),
    }
}
