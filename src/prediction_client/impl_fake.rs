use crate::file_picker::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{
    HistoryId, HistoryItem, PredictionClient, PredictionResult,
};
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const LABELS: [&str; 10] = [
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Pepper__bell___Bacterial_spot",
    "Pepper__bell___healthy",
    "Apple___Apple_scab",
];

/// In-memory stand-in for the prediction server. Keeps its own history, newest first.
pub struct PredictionClientFake {
    logger: Arc<dyn Logger + Send + Sync>,
    history: Mutex<Vec<HistoryItem>>,
    failing: AtomicBool,
    predict_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

impl PredictionClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("prediction_client").with_namespace("fake"),
            history: Mutex::new(vec![]),
            failing: AtomicBool::new(false),
            predict_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    fn check_failing(
        &self,
        operation: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(format!("simulated network error during {}", operation).into());
        }
        Ok(())
    }
}

impl PredictionClient for PredictionClientFake {
    fn predict(
        &self,
        file: &SelectedFile,
    ) -> Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.logger.info(&format!("Predicting {}...", file.name))?;
        self.check_failing("predict")?;

        let mut rng = rand::rng();
        let label_dist = Uniform::new(0, LABELS.len())?;
        let confidence_dist = Uniform::new(0.5, 1.0)?;

        let result = PredictionResult {
            prediction: LABELS[label_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
        };

        let mut history = self
            .history
            .lock()
            .map_err(|e| format!("history poisoned: {}", e))?;
        let id = history.len() as i64 + 1;
        history.insert(
            0,
            HistoryItem {
                id: HistoryId::Number(id),
                prediction: result.prediction.clone(),
                confidence: result.confidence,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        );

        self.logger.info(&format!("Predicted {:?}", result))?;
        Ok(result)
    }

    fn history(&self) -> Result<Vec<HistoryItem>, Box<dyn std::error::Error + Send + Sync>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.logger.info("Fetching history...")?;
        self.check_failing("history")?;

        let history = self
            .history
            .lock()
            .map_err(|e| format!("history poisoned: {}", e))?;
        Ok(history.clone())
    }
}
