#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionClientKind {
    Http,
    #[allow(dead_code)]
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub client_kind: PredictionClientKind,
    pub logger_timezone: chrono::FixedOffset,
    pub display_timezone: chrono::FixedOffset,
    pub image_extensions: Vec<String>,
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            client_kind: PredictionClientKind::Http,
            logger_timezone: local_offset(),
            display_timezone: local_offset(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "bmp", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            window_size: [960.0, 720.0],
        }
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
