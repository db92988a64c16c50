use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use inkpage_shared::{Color, Point};

pub const DEFAULT_STROKE_WIDTH: f32 = 0.003;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Draw,
    /// Click a stroke to erase it.
    Select,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Draw => f.write_str("draw"),
            Tool::Select => f.write_str("select"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool {0:?}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draw" => Ok(Tool::Draw),
            "select" | "erase" => Ok(Tool::Select),
            other => Err(UnknownTool(other.to_string())),
        }
    }
}

/// Color and width applied to strokes started from now on.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PenSettings {
    pub color: Color,
    /// Fraction of the rendered page width.
    pub stroke_width: f32,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            color: Color::PEN_RED,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

pub enum DrawMode {
    Idle,
    Drawing { points: Vec<Point> },
}

pub enum Mode {
    Draw(DrawMode),
    Select,
}

impl Mode {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Draw => Mode::Draw(DrawMode::Idle),
            Tool::Select => Mode::Select,
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            Mode::Draw(_) => Tool::Draw,
            Mode::Select => Tool::Select,
        }
    }

    pub fn in_progress(&self) -> &[Point] {
        match self {
            Mode::Draw(DrawMode::Drawing { points }) => points,
            _ => &[],
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Mode::Draw(DrawMode::Drawing { .. }))
    }
}
