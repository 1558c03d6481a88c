
pub mod cmd;
mod map;
mod parse;
pub mod position;
pub mod program;
pub mod transport;

use self::{
    cmd::{Command, DEFAULT_SPEED},
    position::{Axis, Position},
    program::ProgramBundle,
    transport::{Connector, SerialConnector, Session},
};
use crate::{settings::ConnectionSettings, util::ensure};
use log::{debug, info};
use std::{
    fmt::{Debug, Display},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub use self::parse::ParseError;

// unfortunately, due to rustfmt not having the blank_lines_upper_bound feature
// stable yet, we gotta put comments in between the different sections. otherwise
// its just too much

//

/// Errors returned by any part of the driver
#[derive(Error, Debug)]
pub enum TableError {
    /// Thrown by the move functions if a coordinate lies outside of the
    /// travel of the table. Nothing is sent in that case.
    #[error("{axis} must be {min} <= {axis} <= {max}, was {value}")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Thrown by every function that talks to the controller while the
    /// connection is closed
    #[error("connection to the controller isn't open")]
    NotConnected,
    /// Thrown by [`TableController::open`] if the connection is already open
    #[error("connection to the controller is already open")]
    AlreadyConnected,
    /// Thrown by [`TableController::run_program`] if no program was loaded
    /// with this controller
    #[error("no program was loaded")]
    NoProgramLoaded,
    /// Thrown by [`TableController::load_program`] if the program or the point
    /// table couldn't be read
    #[error("failed to read {}: {source}", .path.display())]
    ProgramFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Thrown if a settings file couldn't be read
    #[error("failed to read settings from {}: {source}", .path.display())]
    SettingsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Thrown if settings contain values the serial line doesn't support
    #[error("invalid connection settings: {0}")]
    InvalidSettings(String),
    /// Thrown if a reply of the controller couldn't be parsed
    #[error("{0}")]
    ParsingError(#[from] ParseError),
    /// Wrapper around [`io::Error`]
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// Wrapper around [`serialport::Error`]
    #[error(transparent)]
    SerialPortError(#[from] serialport::Error),
}

//

/// Controls a single XY table over its serial line
///
/// `C` opens the line, usually a serial port (see [`SerialConnector`]).
/// Constructing the controller doesn't touch the port, [`open`][Self::open]
/// does. Every other function that talks to the controller returns
/// [`TableError::NotConnected`] while the connection is closed.
///
/// Dropping the controller closes the connection.
pub struct TableController<C: Connector = SerialConnector> {
    settings: ConnectionSettings,
    connector: C,
    session: Option<Session<C::Reader, C::Writer>>,
    program: Option<String>,
}

impl TableController {
    /// Returns a new controller for the serial port described by `settings`
    ///
    /// # Examples
    /// ```no_run
    /// # use xy_table_driver::{ConnectionSettings, TableController};
    /// let mut table = TableController::new(ConnectionSettings::with_port("/dev/ttyUSB1"));
    /// table.open().unwrap();
    /// table.servo_on().unwrap();
    /// table.move_to(100.0, 50.0).unwrap();
    /// ```
    pub fn new(settings: ConnectionSettings) -> Self {
        Self::with_connector(settings, SerialConnector)
    }
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(ConnectionSettings::default())
    }
}

impl<C: Connector> TableController<C> {
    /// Returns a new controller that opens its line with `connector`
    pub fn with_connector(settings: ConnectionSettings, connector: C) -> Self {
        TableController {
            settings,
            connector,
            session: None,
            program: None,
        }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Name of the program uploaded by the last successful
    /// [`load_program`][Self::load_program]
    pub fn loaded_program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Opens the connection with the stored settings
    ///
    /// # Errors
    /// [`TableError::AlreadyConnected`] if the connection is already open, any
    /// error of the connector otherwise.
    pub fn open(&mut self) -> Result<(), TableError> {
        ensure!(self.session.is_none(), TableError::AlreadyConnected);
        let (reader, writer) = self.connector.connect(&self.settings)?;
        self.session = Some(Session::new(reader, writer));
        info!("connected to table controller on {}", self.settings.port);
        Ok(())
    }

    /// Flushes and closes the connection
    pub fn close(&mut self) -> Result<(), TableError> {
        let session = self.session.take().ok_or(TableError::NotConnected)?;
        session.close()?;
        info!("disconnected from table controller on {}", self.settings.port);
        Ok(())
    }

    fn send(&mut self, line: impl Display) -> Result<(), TableError> {
        self.session
            .as_mut()
            .ok_or(TableError::NotConnected)?
            .send(line)
    }

    pub fn servo_on(&mut self) -> Result<(), TableError> {
        self.send(Command::ServoOn)
    }

    pub fn servo_off(&mut self) -> Result<(), TableError> {
        self.send(Command::ServoOff)
    }

    /// Sends the emergency reset, clearing an emergency stop
    pub fn reset(&mut self) -> Result<(), TableError> {
        self.send(Command::EmergencyReset)
    }

    /// Switches the controller to manual mode
    pub fn manual(&mut self) -> Result<(), TableError> {
        self.send(Command::Manual)
    }

    /// Asks for the current position without reading the reply. Use
    /// [`get_position`][Self::get_position] to get the position itself.
    pub fn query_where(&mut self) -> Result<(), TableError> {
        self.send(Command::Where)
    }

    /// Asks the controller for its position and parses the reply
    ///
    /// The reply carries X in bytes 7 to 12 and Y in bytes 15 to 20.
    ///
    /// # Errors
    /// Any error while sending or receiving, a [`TableError::ParsingError`]
    /// if the reply is too short or a field isn't a number.
    pub fn get_position(&mut self) -> Result<Position, TableError> {
        let session = self.session.as_mut().ok_or(TableError::NotConnected)?;
        session.send(Command::Where)?;
        let line = session.receive_line()?;
        let position = parse::parse_position(&line)?;
        debug!("table at {}", position);
        Ok(position)
    }

    /// Moves to (`x`, `y`) in millimetres with the default speed of 2
    ///
    /// See [`move_to_with_speed`][Self::move_to_with_speed].
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), TableError> {
        self.move_to_with_speed(x, y, DEFAULT_SPEED)
    }

    /// Moves to (`x`, `y`) in millimetres
    ///
    /// Coordinates are sent with a single decimal. The function returns once
    /// the command is written, not once the table arrived.
    ///
    /// # Errors
    /// [`TableError::OutOfRange`] if `x` isn't within 0 to 650 or `y` isn't
    /// within 0 to 300, in which case nothing is sent.
    pub fn move_to_with_speed(&mut self, x: f64, y: f64, speed: u32) -> Result<(), TableError> {
        let x = Axis::X.check(x)?;
        let y = Axis::Y.check(y)?;
        self.send(Command::Move { x, y, speed })
    }

    /// Sends `@<name> \r\n`
    pub fn send_command(&mut self, name: &str) -> Result<(), TableError> {
        self.send(Command::Named(name))
    }

    /// Sends `<payload> \r\n`, without the `@` prefix
    pub fn send_data(&mut self, payload: &str) -> Result<(), TableError> {
        self.send(Command::Data(payload))
    }

    /// Reads the program in directory `path` and uploads it
    ///
    /// See [`ProgramBundle::load`] for how the directory is read and named.
    /// The upload switches to system mode, writes the program and then the
    /// point table. Once everything is sent, the program is remembered for
    /// [`run_program`][Self::run_program].
    ///
    /// # Errors
    /// [`TableError::ProgramFile`] if a file can't be read, in which case
    /// nothing is sent. Any error while sending aborts the upload.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<(), TableError> {
        ensure!(self.is_open(), TableError::NotConnected);
        let bundle = ProgramBundle::load(path)?;
        self.upload_program(&bundle)
    }

    /// Uploads an already loaded program, see [`load_program`][Self::load_program]
    pub fn upload_program(&mut self, bundle: &ProgramBundle) -> Result<(), TableError> {
        info!("uploading program {}", bundle.name());
        self.send(Command::Named(map::SYSTEM))?;
        self.send(Command::Named(map::WRITE_PROGRAM))?;
        self.send(Command::Data(&bundle.program_payload()))?;
        self.send(Command::Named(map::WRITE_POINTS))?;
        self.send(Command::Data(bundle.parameter_payload()))?;
        self.program = Some(bundle.name().to_string());
        Ok(())
    }

    /// Starts the last loaded program in automatic mode
    ///
    /// # Errors
    /// [`TableError::NoProgramLoaded`] if no program was loaded, any error
    /// while sending otherwise.
    pub fn run_program(&mut self) -> Result<(), TableError> {
        ensure!(self.is_open(), TableError::NotConnected);
        let name = self.program.clone().ok_or(TableError::NoProgramLoaded)?;
        info!("running program {}", name);
        self.send(Command::Named(map::AUTO))?;
        self.send(Command::Named(&format!("{} <{}>", map::SWITCH_PROGRAM, name)))?;
        self.send(Command::Named(map::RUN))
    }
}

impl<C: Connector> Debug for TableController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TableController {{ settings: {:?}, connector: _, open: {:?}, program: {:?} }}",
            self.settings,
            self.is_open(),
            self.program,
        )
    }
}
