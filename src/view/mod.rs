// src/view/mod.rs
//! Render-ready view-models. Everything here is plain data built from server
//! payloads; the egui code in `ui` only lays it out.

pub mod upload;
pub mod dashboard;

pub use upload::{PreviewRowView, PreviewView};
pub use dashboard::{ActivityRowView, DashboardView, ListView, StatusBadge, SubjectRowView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Purple,
    Yellow,
    Red,
    Gray,
}

impl Tone {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Tone::Blue => [0x3B, 0x82, 0xF6],
            Tone::Green => [0x10, 0xB9, 0x81],
            Tone::Purple => [0x8B, 0x5C, 0xF6],
            Tone::Yellow => [0xF5, 0x9E, 0x0B],
            Tone::Red => [0xEF, 0x44, 0x44],
            Tone::Gray => [0x6B, 0x72, 0x80],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            title,
            value: value.into(),
            tone,
        }
    }
}
