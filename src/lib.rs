//! Rust driver for the XY positioning table (a YAMAHA two-axis robot on an
//! RCX222 controller) over its RS-232 line.
//!
//! The controller speaks plain ASCII: every command is a single line starting
//! with `@`, position queries are answered with a single fixed layout line.
//!
//! # Usage
//! A [`TableController`] owns the [`ConnectionSettings`] of one table. Nothing
//! is opened until [`TableController::open`] is called, every other function
//! then sends a command and returns once it's written. Only
//! [`TableController::get_position`] waits for an answer. Programs are
//! uploaded from a directory containing `prog.txt` and `pars.txt` with
//! [`TableController::load_program`] and started with
//! [`TableController::run_program`].
//!
//! The crate logs through the [`log`] facade, every line sent or received is
//! logged at `trace` level.
//!
//! # Examples
//! ```no_run
//! # use xy_table_driver::{ConnectionSettings, TableController};
//! let mut table = TableController::new(ConnectionSettings::default());
//! table.open().unwrap();
//! table.servo_on().unwrap();
//!
//! table.move_to_with_speed(325.0, 150.0, 10).unwrap();
//! let position = table.get_position().unwrap();
//! println!("table at {}", position);
//!
//! table.load_program("/home/lab/programs/scan").unwrap();
//! table.run_program().unwrap();
//! table.close().unwrap();
//! ```

mod driver;
pub mod settings;
pub(crate) mod util;

pub use driver::{
    cmd::{self, Command, DEFAULT_SPEED},
    position::{Axis, Position},
    program::{self, ProgramBundle},
    transport::{Connector, SerialConnector},
    ParseError, TableController, TableError,
};
pub use settings::{ConnectionSettings, DataBits, Parity, StopBits};
