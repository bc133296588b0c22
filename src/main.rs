use config::{Config, PredictionClientKind};
use file_picker::impl_native::FilePickerNative;
use leaf_scan::main::LeafScan;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use prediction_client::impl_fake::PredictionClientFake;
use prediction_client::impl_http::PredictionClientHttp;
use prediction_client::interface::PredictionClient;
use std::sync::Arc;

mod config;
mod file_picker;
mod leaf_scan;
mod library;
mod prediction_client;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let prediction_client: Arc<dyn PredictionClient + Send + Sync> = match config.client_kind {
        PredictionClientKind::Http => Arc::new(PredictionClientHttp::new(
            &config.api_base_url,
            logger.clone(),
        )?),
        PredictionClientKind::Fake => Arc::new(PredictionClientFake::new(logger.clone())),
    };

    let file_picker = Arc::new(FilePickerNative::new(config.image_extensions.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 480.0])
            .with_title("Plant Disease AI"),
        ..Default::default()
    };

    logger.info(&format!(
        "Using {:?} prediction client at {}",
        config.client_kind, config.api_base_url
    ))?;

    eframe::run_native(
        "Plant Disease AI",
        options,
        Box::new(move |cc| {
            Box::new(LeafScan::new(
                config,
                logger,
                prediction_client,
                file_picker,
                Some(cc.egui_ctx.clone()),
            ))
        }),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
