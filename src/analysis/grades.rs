// src/analysis/grades.rs
use std::collections::BTreeMap;

use crate::utils::format_one_decimal;

/// Letter grade bucket. Boundaries belong to the higher grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            Grade::A => "A (90-100)",
            Grade::B => "B (80-89)",
            Grade::C => "C (70-79)",
            Grade::D => "D (60-69)",
            Grade::F => "F (0-59)",
        }
    }

    pub fn color(self) -> GradeColor {
        match self {
            Grade::A => GradeColor::Green,
            Grade::B => GradeColor::Blue,
            Grade::C => GradeColor::Yellow,
            Grade::D => GradeColor::Orange,
            Grade::F => GradeColor::Red,
        }
    }
}

impl GradeColor {
    pub fn name(self) -> &'static str {
        match self {
            GradeColor::Green => "green",
            GradeColor::Blue => "blue",
            GradeColor::Yellow => "yellow",
            GradeColor::Orange => "orange",
            GradeColor::Red => "red",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            GradeColor::Green => [0x10, 0xB9, 0x81],
            GradeColor::Blue => [0x3B, 0x82, 0xF6],
            GradeColor::Yellow => [0xF5, 0x9E, 0x0B],
            GradeColor::Orange => [0xF9, 0x73, 0x16],
            GradeColor::Red => [0xEF, 0x44, 0x44],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeSlice {
    pub grade: Grade,
    pub count: u64,
}

/// Data behind the grade-distribution donut: always the five buckets A..F,
/// in order.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeChart {
    pub slices: Vec<GradeSlice>,
}

impl GradeChart {
    pub fn from_distribution(distribution: &BTreeMap<String, u64>) -> Self {
        let slices = Grade::ALL
            .iter()
            .map(|&grade| GradeSlice {
                grade,
                count: distribution.get(grade.letter()).copied().unwrap_or(0),
            })
            .collect();
        Self { slices }
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Share of slice `index` in percent, one decimal; "0" when nothing was
    /// counted at all.
    pub fn percentage_text(&self, index: usize) -> String {
        let total = self.total();
        let value = self.slices.get(index).map(|s| s.count).unwrap_or(0);
        if total == 0 {
            return "0".to_string();
        }
        format_one_decimal(value as f64 / total as f64 * 100.0)
    }

    pub fn tooltip(&self, index: usize) -> String {
        let Some(slice) = self.slices.get(index) else {
            return String::new();
        };
        format!(
            "{}: {} ({}%)",
            slice.grade.range_label(),
            slice.count,
            self.percentage_text(index)
        )
    }

    /// Start and sweep of each slice as fractions of a full turn. Empty
    /// slices are skipped.
    pub fn arcs(&self) -> Vec<(usize, f32, f32)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        let mut start = 0.0f32;
        let mut arcs = Vec::new();
        for (i, slice) in self.slices.iter().enumerate() {
            if slice.count == 0 {
                continue;
            }
            let sweep = slice.count as f32 / total as f32;
            arcs.push((i, start, sweep));
            start += sweep;
        }
        arcs
    }

    /// Slice under a point given as a fraction of a full turn.
    pub fn slice_at(&self, turn: f32) -> Option<usize> {
        self.arcs()
            .into_iter()
            .find(|(_, start, sweep)| turn >= *start && turn < start + sweep)
            .map(|(i, _, _)| i)
    }
}
