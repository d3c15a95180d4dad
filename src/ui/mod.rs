// egui side of the visualizer: bars, status labels and keypress translation

pub mod bars;
pub mod input;
pub mod overlays;

pub use bars::paint_sequence;
pub use input::{poll_input, InputEvent};
pub use overlays::{overlay_labels, paint_overlays};
