//! Serial line configuration of the table controller.
//!
//! The defaults match the factory configuration of the controller:
//! `/dev/ttyUSB0`, 9600 baud, odd parity, 8 data bits and 1 stop bit.
//! Settings can also be read from TOML, missing keys fall back to the defaults:
//!
//! ```toml
//! port = "COM3"
//! baud_rate = 19200
//! parity = "even"
//! data_bits = 7
//! stop_bits = 2
//! timeout_ms = 500
//! ```


use crate::driver::TableError;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for serialport::Parity {
    fn from(p: Parity) -> Self {
        match p {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataBits {
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
}

impl TryFrom<u8> for DataBits {
    type Error = TableError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        DataBits::from_u8(bits)
            .ok_or_else(|| TableError::InvalidSettings(format!("{} data bits", bits)))
    }
}

impl From<DataBits> for u8 {
    fn from(bits: DataBits) -> Self {
        bits as u8
    }
}

impl From<DataBits> for serialport::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => serialport::DataBits::Five,
            DataBits::Six => serialport::DataBits::Six,
            DataBits::Seven => serialport::DataBits::Seven,
            DataBits::Eight => serialport::DataBits::Eight,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StopBits {
    One = 1,
    Two = 2,
}

impl TryFrom<u8> for StopBits {
    type Error = TableError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        StopBits::from_u8(bits)
            .ok_or_else(|| TableError::InvalidSettings(format!("{} stop bits", bits)))
    }
}

impl From<StopBits> for u8 {
    fn from(bits: StopBits) -> Self {
        bits as u8
    }
}

impl From<StopBits> for serialport::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}

/// Everything needed to open the serial line to the controller
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Device path or COM name, e.g. `/dev/ttyUSB0` or `COM1`
    pub port: String,
    pub baud_rate: u32,
    pub parity: Parity,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    /// How long a read blocks before giving up. Only the serial transport
    /// uses this, the controller itself never times out.
    pub timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSettings {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            parity: Parity::Odd,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            timeout_ms: 1000,
        }
    }
}

impl ConnectionSettings {
    pub fn new(
        port: impl Into<String>,
        baud_rate: u32,
        parity: Parity,
        data_bits: DataBits,
        stop_bits: StopBits,
    ) -> Self {
        ConnectionSettings {
            port: port.into(),
            baud_rate,
            parity,
            data_bits,
            stop_bits,
            ..Default::default()
        }
    }

    /// Default settings on another port
    pub fn with_port(port: impl Into<String>) -> Self {
        ConnectionSettings {
            port: port.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses settings from TOML text
    ///
    /// # Errors
    /// [`TableError::InvalidSettings`] if the text isn't valid TOML or contains
    /// values the serial line doesn't support.
    pub fn from_toml(s: &str) -> Result<Self, TableError> {
        toml::from_str(s).map_err(|e| TableError::InvalidSettings(e.to_string()))
    }

    /// Reads settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TableError::SettingsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
