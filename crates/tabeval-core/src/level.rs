use serde::{Deserialize, Serialize};

/// Task difficulty, totally ordered from trivial single-step queries (L1)
/// up to expert multi-table challenges (L6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::L1,
        Level::L2,
        Level::L3,
        Level::L4,
        Level::L5,
        Level::L6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
            Level::L4 => "L4",
            Level::L5 => "L5",
            Level::L6 => "L6",
        }
    }

    /// Short description used in workload configuration UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Level::L1 => "Simple queries",
            Level::L2 => "Basic aggregations",
            Level::L3 => "Multi-step reasoning",
            Level::L4 => "Complex filters",
            Level::L5 => "Joins & analysis",
            Level::L6 => "Expert challenges",
        }
    }

    pub fn parse(s: &str) -> Option<Level> {
        match s {
            "L1" => Some(Level::L1),
            "L2" => Some(Level::L2),
            "L3" => Some(Level::L3),
            "L4" => Some(Level::L4),
            "L5" => Some(Level::L5),
            "L6" => Some(Level::L6),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
