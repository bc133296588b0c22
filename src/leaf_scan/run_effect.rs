use crate::file_picker::interface::FilePicker;
use crate::leaf_scan::core::{Effect, Event};
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::PredictionClient;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    file_picker: Arc<dyn FilePicker + Send + Sync>,
    event_sender: Sender<Event>,
    repaint: Option<egui::Context>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        event_sender: Sender<Event>,
        repaint: Option<egui::Context>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            prediction_client,
            file_picker,
            event_sender,
            repaint,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::PickFile => {
                let picked = match self.file_picker.pick() {
                    Ok(picked) => picked,
                    Err(e) => {
                        let _ = self.logger.error(&format!("Failed to read file: {}", e));
                        None
                    }
                };
                self.send(Event::FileSelected(picked));
            }
            Effect::Predict { selection_id, file } => {
                let result = self.prediction_client.predict(&file);
                self.send(Event::PredictDone {
                    selection_id,
                    result,
                });
            }
            Effect::RefreshHistory => {
                let history = self.prediction_client.history();
                self.send(Event::HistoryFetchDone(history));
            }
            Effect::LogError { message } => {
                let _ = self.logger.error(&message);
            }
        }
    }

    fn send(&self, event: Event) {
        if self.event_sender.send(event).is_err() {
            let _ = self.logger.info("Window closed, dropping event");
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}
