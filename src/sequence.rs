use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU32, Ordering};

/// nominal canvas the bar geometry is laid out on (scaled to the real panel at paint time)
pub const CANVAS_WIDTH: f32 = 1900.0;
pub const CANVAS_HEIGHT: f32 = 800.0;

/// default element amount when none is given: one bar per pixel of the drawing area
pub const DEFAULT_AMOUNT: usize = (CANVAS_WIDTH as usize) * 7 / 8;

/// display geometry shared by every bar of an N-element sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// bar width in canvas pixels (the drawing area is 7/8 of the canvas)
    pub width: f32,
    /// canvas pixels per unit of value (200px are reserved for axis and header)
    pub height_scale: f32,
}

impl BarGeometry {
    pub fn for_amount(amount: usize) -> Self {
        let n = amount.max(1) as f32;
        Self {
            width: (CANVAS_WIDTH * 7.0) / (8.0 * n),
            height_scale: (CANVAS_HEIGHT - 200.0) / n,
        }
    }
}

/// one sortable bar: a unique rank plus the geometry derived from N.
/// comparisons look at the rank only.
#[derive(Clone, Copy, Debug)]
pub struct Element {
    pub value: u32,
    pub geometry: BarGeometry,
}

impl Element {
    pub fn new(value: u32, amount: usize) -> Self {
        Self { value, geometry: BarGeometry::for_amount(amount) }
    }

    /// same geometry, different rank
    #[inline]
    pub fn with_value(self, value: u32) -> Self {
        Self { value, ..self }
    }

    /// bar height in canvas pixels
    #[inline]
    pub fn height(&self) -> f32 {
        self.value as f32 * self.geometry.height_scale
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Element {}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.value.cmp(&other.value)
    }
}

/// The working array every algorithm mutates in place.
///
/// Slots are relaxed atomics: exactly one task writes at a time (the controller
/// only ever launches one background task), and the render loop reads whatever
/// it observes. A read may be one frame stale; it is never torn.
pub struct Sequence {
    slots: Box<[AtomicU32]>,
    geometry: BarGeometry,
}

impl Sequence {
    /// values 1..=amount in ascending order
    pub fn ascending(amount: usize) -> Self {
        let values: Vec<u32> = (1..=amount as u32).collect();
        Self::from_values(&values)
    }

    pub fn from_values(values: &[u32]) -> Self {
        Self {
            slots: values.iter().map(|&v| AtomicU32::new(v)).collect(),
            geometry: BarGeometry::for_amount(values.len()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    #[inline]
    pub fn get(&self, index: usize) -> Element {
        Element { value: self.slots[index].load(Ordering::Relaxed), geometry: self.geometry }
    }

    #[inline]
    pub fn set(&self, index: usize, element: Element) {
        self.slots[index].store(element.value, Ordering::Relaxed);
    }

    /// exchange two slots; only the owning task may call this
    #[inline]
    pub fn swap(&self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let left = self.get(a);
        let right = self.get(b);
        self.set(a, right);
        self.set(b, left);
    }

    /// copy of the current values, in index order
    pub fn values(&self) -> Vec<u32> {
        self.slots.iter().map(|s| s.load(Ordering::Relaxed)).collect()
    }

    /// overwrite every slot from `values` (lengths must match)
    pub fn store_all(&self, values: &[u32]) {
        debug_assert_eq!(values.len(), self.len());
        for (slot, &v) in self.slots.iter().zip(values) {
            slot.store(v, Ordering::Relaxed);
        }
    }

    /// true when every adjacent pair is non-decreasing (all pairs, last one included)
    pub fn is_ascending(&self) -> bool {
        (1..self.len()).all(|i| self.get(i - 1) <= self.get(i))
    }
}
