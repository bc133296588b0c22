use crate::config::Config;
use crate::file_picker::interface::{FilePicker, SelectedFile};
use crate::leaf_scan::core::{init, transition, Effect, Event, State};
use crate::leaf_scan::paint::paint;
use crate::leaf_scan::preview_cache::PreviewCache;
use crate::leaf_scan::render::Render;
use crate::leaf_scan::run_effect::RunEffect;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::PredictionClient;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

pub struct LeafScan {
    state: State,
    event_receiver: Receiver<Event>,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
    render: Render,
    preview_cache: PreviewCache,
}

impl LeafScan {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        file_picker: Arc<dyn FilePicker + Send + Sync>,
        repaint: Option<egui::Context>,
    ) -> Self {
        let logger = logger.with_namespace("leaf_scan");
        let (event_sender, event_receiver) = channel();
        let run_effect = RunEffect::new(
            logger.clone(),
            prediction_client,
            file_picker,
            event_sender,
            repaint,
        );
        let (state, effects) = init();

        let app = Self {
            state,
            event_receiver,
            logger: logger.clone(),
            run_effect,
            render: Render::new(&config),
            preview_cache: PreviewCache::new(logger),
        };

        app.run_effects(effects);

        app
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn dispatch(&mut self, event: Event) {
        let _ = self.logger.info(&format!(
            "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
            self.state, event,
        ));

        let (new_state, effects) = transition(self.state.clone(), event);

        let _ = self.logger.info(&format!(
            "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
            new_state, effects
        ));

        self.state = new_state;

        self.run_effects(effects);
    }

    /// Applies every completion event that has arrived. Never blocks.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.dispatch(event);
        }
    }

    /// Waits up to `timeout` for one completion event and applies it.
    #[allow(dead_code)]
    pub fn wait_for_event(&mut self, timeout: std::time::Duration) -> bool {
        match self.event_receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(_) => false,
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.needs_ui_thread() {
                self.run_effect.run_effect(effect);
            } else {
                let run_effect = self.run_effect.clone();
                std::thread::spawn(move || run_effect.run_effect(effect));
            }
        }
    }

    fn dropped_files(&self, ctx: &egui::Context) -> Vec<Event> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());

        dropped
            .into_iter()
            .take(1)
            .filter_map(|file| {
                let loaded = match (file.path, file.bytes) {
                    (_, Some(bytes)) => Ok(SelectedFile::new(&file.name, bytes.to_vec())),
                    (Some(path), None) => SelectedFile::from_path(&path),
                    (None, None) => Err("dropped file has neither path nor bytes".into()),
                };
                match loaded {
                    Ok(selected) => Some(Event::FileSelected(Some(selected))),
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Failed to read dropped file: {}", e));
                        None
                    }
                }
            })
            .collect()
    }
}

impl eframe::App for LeafScan {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let view = self.render.view(&self.state);
        let texture = self.preview_cache.texture(ctx, view.preview.as_ref());
        let mut events = paint(ctx, &view, texture);

        if view.interactive() {
            events.extend(self.dropped_files(ctx));
        }

        for event in events {
            self.dispatch(event);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preview_cache.release();
    }
}
