use super::{parse::REPLY_MAX_LEN, TableError};
use crate::settings::ConnectionSettings;
use log::{debug, info, trace};
use serialport::{FlowControl, SerialPort};
use std::{
    fmt::Display,
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
};

/// Opens the line to the controller
///
/// Returns a reading and a writing half of the same line. For a serial port
/// these are two handles obtained with [`SerialPort::try_clone`].
///
/// Any `FnMut(&ConnectionSettings) -> io::Result<(R, W)>` is a connector as
/// well, which is mostly useful to hand a scripted interface to the driver.
pub trait Connector {
    type Reader: Read;
    type Writer: Write;

    fn connect(
        &mut self,
        settings: &ConnectionSettings,
    ) -> Result<(Self::Reader, Self::Writer), TableError>;
}

/// Opens the serial port named in the [`ConnectionSettings`]
#[derive(Debug, Default, Copy, Clone)]
pub struct SerialConnector;

impl Connector for SerialConnector {
    type Reader = Box<dyn SerialPort>;
    type Writer = Box<dyn SerialPort>;

    fn connect(
        &mut self,
        settings: &ConnectionSettings,
    ) -> Result<(Self::Reader, Self::Writer), TableError> {
        let port = serialport::new(&settings.port, settings.baud_rate)
            .parity(settings.parity.into())
            .data_bits(settings.data_bits.into())
            .stop_bits(settings.stop_bits.into())
            .flow_control(FlowControl::None)
            .timeout(settings.timeout())
            .open()?;
        info!(
            "opened {} at {} baud, {:?} parity",
            settings.port, settings.baud_rate, settings.parity
        );
        Ok((port.try_clone()?, port))
    }
}

impl<F, R, W> Connector for F
where
    F: FnMut(&ConnectionSettings) -> io::Result<(R, W)>,
    R: Read,
    W: Write,
{
    type Reader = R;
    type Writer = W;

    fn connect(&mut self, settings: &ConnectionSettings) -> Result<(R, W), TableError> {
        Ok((*self)(settings)?)
    }
}

//

// an open line. dropping it flushes and closes both halves
pub(crate) struct Session<R: Read, W: Write> {
    // wrap into bufreader so receiving until '\n' is easier
    reader: BufReader<R>,
    writer: BufWriter<W>,
    // the rest of a line that was cut off is still waiting on the line
    resync: bool,
}

impl<R: Read, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Session {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            resync: false,
        }
    }

    // writes a whole command line and flushes it, so every command ends up
    // in a single write on the port
    pub fn send(&mut self, line: impl Display) -> Result<(), TableError> {
        let line = line.to_string();
        trace!("sending '{}'", line.escape_default());
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    // reads up to and including the next '\n', at most REPLY_MAX_LEN bytes.
    // whatever is left of an overlong line, or of a line interrupted by an
    // error, is thrown away at the start of the next call
    pub fn receive_line(&mut self) -> Result<Vec<u8>, TableError> {
        if self.resync {
            self.discard_line()?;
        }
        let mut buf = Vec::with_capacity(REPLY_MAX_LEN);
        if let Err(e) = self
            .reader
            .by_ref()
            .take(REPLY_MAX_LEN as u64)
            .read_until(b'\n', &mut buf)
        {
            self.resync = !buf.is_empty();
            return Err(e.into());
        }
        trace!(
            "received '{}'",
            String::from_utf8_lossy(&buf).escape_default()
        );
        if buf.len() == REPLY_MAX_LEN && buf.last() != Some(&b'\n') {
            debug!("reply longer than {} bytes, dropping the rest", REPLY_MAX_LEN);
            self.resync = true;
        }
        Ok(buf)
    }

    fn discard_line(&mut self) -> Result<(), TableError> {
        let mut rest = Vec::new();
        self.reader.read_until(b'\n', &mut rest)?;
        self.resync = false;
        trace!(
            "discarded '{}'",
            String::from_utf8_lossy(&rest).escape_default()
        );
        Ok(())
    }

    pub fn close(mut self) -> Result<(), TableError> {
        self.writer.flush()?;
        Ok(())
    }
}
