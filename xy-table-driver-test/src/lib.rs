#[cfg(test)]
mod tests;

use std::{
    cell::{Cell, RefCell},
    io::{self, Read, Write},
    rc::Rc,
};

// scripted stand-in for the serial line of the table controller.
// `read` holds the bytes the controller will reply with and `write` the bytes
// the driver is expected to send. both get drained as they are consumed. an
// empty buffer or a write that doesn't match what was expected panics, so a
// test that scripts nothing also asserts that nothing gets sent.
//
// clones share the same buffers, which is what lets a test keep one handle
// while the driver owns the others
//
// to get at the error paths the line can be broken after a number of writes
// and reads on an empty buffer can time out instead of panicking
pub struct Interface {
    read: Rc<RefCell<Vec<u8>>>,
    write: Rc<RefCell<Vec<u8>>>,
    writes_left: Rc<Cell<Option<usize>>>,
    read_timeout: Rc<Cell<bool>>,
}

impl Read for Interface {
    fn read(&mut self, mut buf: &mut [u8]) -> std::io::Result<usize> {
        let mut q = self.read.as_ref().borrow_mut();
        if q.is_empty() && self.read_timeout.get() {
            Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"))
        } else if q.is_empty() {
            panic!("read was empty")
        } else if buf.len() > q.len() {
            buf.write_all(&q)?;
            let res = q.len();
            q.drain(..);
            Ok(res)
        } else {
            buf.write_all(&q[..buf.len()])?;
            q.drain(..buf.len());
            Ok(buf.len())
        }
    }
}

impl Write for Interface {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.writes_left.get() {
            Some(0) => return Err(io::Error::new(io::ErrorKind::BrokenPipe, "line broken")),
            Some(n) => self.writes_left.set(Some(n - 1)),
            None => (),
        }
        let mut q = self.write.as_ref().borrow_mut();
        if q.is_empty() {
            panic!(
                "write was empty, tried to write {:?}",
                String::from_utf8_lossy(buf)
            )
        } else if q.starts_with(buf) {
            q.drain(..buf.len());
            Ok(buf.len())
        } else {
            panic!(
                "write didn't start with {:?}, write was {:?}",
                String::from_utf8_lossy(buf),
                String::from_utf8_lossy(&q)
            )
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Clone for Interface {
    fn clone(&self) -> Self {
        Interface {
            read: self.read.clone(),
            write: self.write.clone(),
            writes_left: self.writes_left.clone(),
            read_timeout: self.read_timeout.clone(),
        }
    }
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

impl Interface {
    pub fn new() -> Self {
        Interface {
            read: Rc::new(RefCell::new(Vec::new())),
            write: Rc::new(RefCell::new(Vec::new())),
            writes_left: Rc::new(Cell::new(None)),
            read_timeout: Rc::new(Cell::new(false)),
        }
    }

    pub fn add_read(&mut self, buf: &[u8]) {
        self.read.as_ref().borrow_mut().extend_from_slice(buf)
    }

    pub fn add_write(&mut self, buf: &[u8]) {
        self.write.as_ref().borrow_mut().extend_from_slice(buf)
    }

    /// Expects `cmd` to be written and queues `reply` as the answer to it
    pub fn add_exchange(&mut self, cmd: &[u8], reply: &[u8]) {
        self.add_write(cmd);
        self.add_read(reply);
    }

    /// Lets `writes` more writes through, every write after that fails
    /// with [`io::ErrorKind::BrokenPipe`]
    pub fn break_after(&mut self, writes: usize) {
        self.writes_left.set(Some(writes))
    }

    /// Reads on an empty buffer fail with [`io::ErrorKind::TimedOut`]
    /// instead of panicking
    pub fn time_out_reads(&mut self) {
        self.read_timeout.set(true)
    }

    /// True once everything that was scripted has been read and written
    pub fn is_empty(&self) -> bool {
        self.read.as_ref().borrow().is_empty() && self.write.as_ref().borrow().is_empty()
    }

    /// Bytes that were expected but not written yet
    pub fn pending_write(&self) -> Vec<u8> {
        self.write.as_ref().borrow().clone()
    }
}
