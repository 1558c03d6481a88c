use super::TableError;
use std::fmt::Display;

/// One of the two axes of the table
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Travel of the axis in millimetres, inclusive on both ends
    pub fn limits(self) -> (f64, f64) {
        match self {
            Self::X => (0.0, 650.0),
            Self::Y => (0.0, 300.0),
        }
    }

    /// Returns [`TableError::OutOfRange`] if `value` lies outside of
    /// [`limits`][Axis::limits]. NaN is never in range.
    pub fn check(self, value: f64) -> Result<f64, TableError> {
        let (min, max) = self.limits();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(TableError::OutOfRange {
                axis: self,
                value,
                min,
                max,
            })
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

/// Position of the table in millimetres as reported by the controller
#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
