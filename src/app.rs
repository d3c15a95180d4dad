use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::controller::{Controller, Phase};
use crate::error::Error;
use crate::settings::AppSettings;
use crate::ui::{self, InputEvent};

/// Render/input loop: polls input, ticks the controller and paints whatever
/// state the background task has left in the shared sequence.
pub struct SortApp {
    controller: Controller,
    settings: AppSettings,
    settings_path: PathBuf,
    frame_interval: Duration,
}

impl SortApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        controller: Controller,
        settings: AppSettings,
        settings_path: PathBuf,
    ) -> Self {
        let frame_interval = settings.frame_interval();
        Self { controller, settings, settings_path, frame_interval }
    }

    /// faults are fatal: stop the worker and close the window
    fn fail(&mut self, ctx: &egui::Context, err: Error) {
        log::error!("{err}");
        self.controller.quit();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        for event in ui::poll_input(ctx) {
            match event {
                InputEvent::Quit => {
                    // let the close go through once the live task is joined
                    self.controller.quit();
                    return;
                }
                InputEvent::Key => {
                    if let Err(e) = self.controller.on_key() {
                        self.fail(ctx, e);
                        return;
                    }
                }
                InputEvent::SaveSettings => match self.settings.save(&self.settings_path) {
                    Ok(()) => log::info!("settings saved to {}", self.settings_path.display()),
                    Err(e) => log::error!("failed to save settings: {e}"),
                },
            }
        }
    }
}

impl eframe::App for SortApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();
        profiling::scope!("update");

        self.handle_input(ctx);
        if self.controller.phase() == Phase::Stopped {
            return;
        }
        if let Err(e) = self.controller.tick(Instant::now()) {
            self.fail(ctx, e);
            return;
        }

        let seq = self.controller.sequence();
        let state = self.controller.state();
        let values = seq.values();
        let labels = ui::overlay_labels(
            self.controller.phase(),
            state.is_paused(),
            state.scan_done(),
            state.cycles(),
            self.controller.report(),
        );

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                ui::paint_sequence(
                    &painter,
                    response.rect,
                    &values,
                    seq.geometry(),
                    state.marked(),
                    self.controller.done_mode(),
                );
                ui::paint_overlays(&painter, response.rect, &labels);
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}
