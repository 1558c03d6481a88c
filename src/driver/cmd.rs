//! Provides the lines sent to the controller.
//!
//! You usually don't have to build these yourself, every [`Command`] has a
//! matching method on [`TableController`][crate::TableController]. Range checks
//! aren't performed in this module, a [`Command::Move`] built here is sent as is.

#[cfg(test)]
mod tests;

use super::map;
use std::fmt::{Display, Formatter, Result};

/// Speed used by [`TableController::move_to`][crate::TableController::move_to]
pub const DEFAULT_SPEED: u32 = 2;

/// A single line understood by the motion controller
///
/// The [`Display`] implementation yields exactly the bytes that go over the
/// wire, including the terminator. The fixed commands end in `" \r"`, named
/// commands in `" \r\n"`, just like the controller's own tooling sends them.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command<'a> {
    ServoOn,
    ServoOff,
    /// Asks for the current position, answered with a single line
    Where,
    Manual,
    EmergencyReset,
    /// Absolute point-to-point move, coordinates in millimetres
    Move { x: f64, y: f64, speed: u32 },
    /// Any other command, sent with the `@` prefix
    Named(&'a str),
    /// Raw payload without the `@` prefix, used for program uploads
    Data(&'a str),
}

impl Display for Command<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::ServoOn => write!(f, "@{} \r", map::SERVO_ON),
            Self::ServoOff => write!(f, "@{} \r", map::SERVO_OFF),
            Self::Where => write!(f, "@{} \r", map::WHERE),
            Self::Manual => write!(f, "@{} \r", map::MANUAL),
            Self::EmergencyReset => write!(f, "@{} \r", map::EMERGENCY_RESET),
            Self::Move { x, y, speed } => {
                write!(f, "@{} {:.1} {:.1} 0 0 0 0, S={} \r", map::MOVE, x, y, speed)
            }
            Self::Named(name) => write!(f, "@{} \r\n", name),
            Self::Data(payload) => write!(f, "{} \r\n", payload),
        }
    }
}
