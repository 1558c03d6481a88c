use super::Interface;
use std::io::{ErrorKind, Read, Write};

#[test]
fn read_small_buffer() {
    let mut i = Interface::new();
    let mut buf = [0u8; 8];
    let expected = b"@WHRXY  123.4   56.7\r\n";
    i.add_read(expected);
    assert_eq!(i.read(&mut buf).unwrap(), 8);
    assert_eq!(buf, expected[..8]);
    let mut rest = [0u8; 32];
    assert_eq!(i.read(&mut rest).unwrap(), expected.len() - 8);
    assert_eq!(rest[..expected.len() - 8], expected[8..]);
    assert!(i.is_empty());
}

#[test]
fn read_big_buffer() {
    let mut i = Interface::new();
    let mut buf = [0u8; 64];
    let expected = b"OK\r\n";
    i.add_read(expected);
    assert_eq!(i.read(&mut buf).unwrap(), expected.len());
    assert_eq!(&buf[..expected.len()], expected);
}

#[test]
#[should_panic]
fn read_empty() {
    let mut i = Interface::new();
    let mut buf = [0u8; 32];
    let _ = i.read(&mut buf);
}

#[test]
fn write_split() {
    let mut i = Interface::new();
    let expected = b"@SERVO ON \r";
    i.add_write(expected);
    assert_eq!(i.write(&expected[..6]).unwrap(), 6);
    assert_eq!(i.pending_write(), expected[6..].to_vec());
    assert_eq!(i.write(&expected[6..]).unwrap(), expected.len() - 6);
    assert!(i.is_empty());
}

#[test]
fn exchange_shares_buffers_between_clones() {
    let mut i = Interface::new();
    let mut other = i.clone();
    i.add_exchange(b"@?WHRXY \r", b"reply\n");
    other.write_all(b"@?WHRXY \r").unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(other.read(&mut buf).unwrap(), 6);
    assert!(i.is_empty());
}

#[test]
#[should_panic]
fn write_wrong_buf() {
    let mut i = Interface::new();
    i.add_write(b"@SERVO ON \r");
    let _ = i.write(b"@SERVO OFF \r");
}

#[test]
#[should_panic]
fn write_empty() {
    let mut i = Interface::new();
    let _ = i.write(b"@EMGRST \r");
}

#[test]
fn broken_after_writes() {
    let mut i = Interface::new();
    i.add_write(b"@SERVO ON \r");
    i.break_after(1);
    assert_eq!(i.write(b"@SERVO ON \r").unwrap(), 11);
    let e = i.write(b"@SERVO OFF \r").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::BrokenPipe);
    assert!(i.is_empty());
}

#[test]
fn read_times_out() {
    let mut i = Interface::new();
    i.time_out_reads();
    i.add_read(b"@WH");
    let mut buf = [0u8; 8];
    assert_eq!(i.read(&mut buf).unwrap(), 3);
    assert_eq!(i.read(&mut buf).unwrap_err().kind(), ErrorKind::TimedOut);
}
