use eframe::egui;

use crate::controller::Phase;
use crate::sequence::CANVAS_WIDTH;
use crate::tasks::BenchmarkReport;

const TEXT: egui::Color32 = egui::Color32::from_rgb(222, 222, 222);
const FONT_SIZE: f32 = 29.0;

/// one line of header text at a canvas x offset
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLabel {
    pub x: f32,
    pub text: String,
}

fn label(x: f32, text: impl Into<String>) -> OverlayLabel {
    OverlayLabel { x, text: text.into() }
}

/// header labels for the current frame; `scanned` switches the confirm phase
/// from the sweep to the benchmark replay that follows it
pub fn overlay_labels(
    phase: Phase,
    paused: bool,
    scanned: bool,
    cycles: u64,
    report: Option<&BenchmarkReport>,
) -> Vec<OverlayLabel> {
    let mut labels = Vec::new();
    match phase {
        Phase::AwaitStart | Phase::Shuffled => labels.push(label(150.0, "<Press Any Key to Start Simulation>")),
        Phase::Shuffling => labels.push(label(450.0, "<Shuffling>")),
        Phase::Confirming if scanned => labels.push(label(450.0, "<Benchmarking>")),
        Phase::Confirming => labels.push(label(450.0, "<Checking>")),
        Phase::Cooldown { .. } => {
            if let Some(report) = report {
                labels.push(label(300.0, format!("<done in {:.2} ms>", report.elapsed_ms())));
            }
        }
        Phase::Sorting | Phase::Stopped => {}
    }
    if paused && matches!(phase, Phase::Shuffling | Phase::Sorting | Phase::Confirming) {
        labels.push(label(20.0, "<Pause>"));
    }
    if cycles != 0 {
        labels.push(label(CANVAS_WIDTH - 600.0, format!("Cycle: {cycles}")));
    }
    labels
}

pub fn paint_overlays(painter: &egui::Painter, rect: egui::Rect, labels: &[OverlayLabel]) {
    let sx = rect.width() / CANVAS_WIDTH;
    for l in labels {
        painter.text(
            egui::pos2(rect.min.x + l.x * sx, rect.min.y + 10.0),
            egui::Align2::LEFT_TOP,
            &l.text,
            egui::FontId::proportional(FONT_SIZE),
            TEXT,
        );
    }
}
