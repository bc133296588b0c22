use super::core::Event;
use super::render::{HistoryView, View};
use egui::{Align2, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(46, 125, 50);

/// Draws `view` and returns the events the user raised this frame.
pub fn paint(
    ctx: &egui::Context,
    view: &View,
    preview: Option<&egui::TextureHandle>,
) -> Vec<Event> {
    let mut events = vec![];
    let interactive = view.interactive();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading(RichText::new("🌿 Plant Disease AI").color(ACCENT).strong());
            ui.label("Advanced Deep Learning Diagnostics");
            ui.add_space(8.0);
        });
    });

    egui::SidePanel::right("history")
        .resizable(false)
        .min_width(300.0)
        .show(ctx, |ui| {
            ui.set_enabled(interactive);
            ui.add_space(8.0);
            ui.heading("Recent Scans");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| match &view.history {
                HistoryView::Empty { placeholder } => {
                    ui.label(RichText::new(*placeholder).italics().weak());
                }
                HistoryView::Rows(rows) => {
                    for row in rows {
                        ui.push_id(&row.key, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&row.prediction).strong());
                                ui.label(&row.confidence);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| ui.label(RichText::new(&row.date).weak()),
                                );
                            });
                        });
                        ui.separator();
                    }
                }
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.set_enabled(interactive);
        ui.add_space(8.0);
        ui.heading("Analyze Leaf");
        ui.add_space(8.0);

        if ui.button(&view.file_label).clicked() {
            events.push(Event::PickFileClicked);
        }

        if view.preview.is_some() {
            ui.add_space(8.0);
            match preview {
                Some(texture) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                            .max_height(320.0)
                            .maintain_aspect_ratio(true),
                    );
                }
                None => {
                    ui.label(RichText::new("Preview unavailable").weak());
                }
            }
        }

        ui.add_space(8.0);
        let submit = egui::Button::new(RichText::new(view.submit.label).strong());
        if ui.add_enabled(view.submit.enabled, submit).clicked() {
            events.push(Event::SubmitClicked);
        }

        if let Some(result) = &view.result {
            ui.add_space(12.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(RichText::new("Diagnosis Result").strong().size(16.0));
                ui.horizontal(|ui| {
                    ui.label("Observed Condition:");
                    ui.label(RichText::new(&result.prediction).color(ACCENT).strong());
                });
                ui.add(
                    egui::ProgressBar::new(result.bar_fraction)
                        .fill(ACCENT)
                        .text(&result.confidence_text),
                )
                .on_hover_text(&result.bar_width);
            });
        }
    });

    if let Some(notice) = &view.notice {
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    events.push(Event::NoticeDismissed);
                }
            });
    }

    events
}
