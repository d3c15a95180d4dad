use eframe::egui;

use crate::sequence::{BarGeometry, CANVAS_HEIGHT, CANVAS_WIDTH};

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(52, 52, 52);
pub const NEUTRAL: egui::Color32 = egui::Color32::from_rgb(200, 200, 200);
pub const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(150, 10, 10);
pub const CONFIRMED: egui::Color32 = egui::Color32::from_rgb(10, 150, 10);
const AXIS: egui::Color32 = egui::Color32::from_rgb(25, 25, 25);

/// Color of bar `index`: while sorting only the marked bar is highlighted;
/// in done mode everything up to and including the mark is confirmed.
pub fn bar_color(index: usize, marked: Option<usize>, done_mode: bool) -> egui::Color32 {
    match (marked, done_mode) {
        (Some(m), false) if index == m => HIGHLIGHT,
        (Some(m), true) if index <= m => CONFIRMED,
        _ => NEUTRAL,
    }
}

/// Draw the sequence as bars standing on an axis, laid out on the nominal
/// canvas and scaled to `rect`.
pub fn paint_sequence(
    painter: &egui::Painter,
    rect: egui::Rect,
    values: &[u32],
    geometry: BarGeometry,
    marked: Option<usize>,
    done_mode: bool,
) {
    profiling::scope!("paint_sequence");
    let sx = rect.width() / CANVAS_WIDTH;
    let sy = rect.height() / CANVAS_HEIGHT;
    let to_screen = |x: f32, y: f32| egui::pos2(rect.min.x + x * sx, rect.min.y + y * sy);

    painter.rect_filled(rect, 0.0, BACKGROUND);

    let left = CANVAS_WIDTH / 16.0;
    let baseline = CANVAS_HEIGHT - 100.0;
    for (index, &value) in values.iter().enumerate() {
        let x = left + index as f32 * geometry.width;
        let height = value as f32 * geometry.height_scale;
        let bar = egui::Rect::from_min_max(to_screen(x, baseline - height), to_screen(x + geometry.width, baseline));
        painter.rect_filled(bar, 0.0, bar_color(index, marked, done_mode));
    }

    // x-axis
    let axis = egui::Rect::from_min_max(
        to_screen(left, baseline - 2.0),
        to_screen(left + CANVAS_WIDTH * 7.0 / 8.0, baseline + 5.0),
    );
    painter.rect_filled(axis, 0.0, AXIS);
}
