
use super::position::Position;
use crate::util::ensure;
use nom::{combinator::all_consuming, number::complete::double, Finish, IResult};
use thiserror::Error;

/// Gets thrown when a reply of the controller doesn't have the expected layout
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// The reply ended before a field started, or inside a field before
    /// any of its digits
    #[error("reply too short, needed {needed} bytes, reply was {reply:?}")]
    ShortReply { needed: usize, reply: Vec<u8> },
    /// A field didn't contain a finite decimal number
    #[error("no number at bytes {offset}..{end} of reply {reply:?}")]
    InvalidNumber {
        offset: usize,
        end: usize,
        reply: Vec<u8>,
    },
}

/// A fixed width field of a reply line
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) struct Field {
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    // bytes past the end of the line count as padding, so a field may be cut
    // short by the end of the line but has to start inside of it
    fn slice<'a>(&self, line: &'a [u8]) -> Option<&'a [u8]> {
        line.get(self.offset..self.end().min(line.len()))
            .filter(|raw| !raw.is_empty())
    }

    fn is_cut(&self, line: &[u8]) -> bool {
        line.len() < self.end()
    }
}

// layout of the answer to ?WHRXY, e.g. "@WHRXY  123.4   56.7\r\n". the
// terminator is optional, the last field may end with the line
pub(crate) const POSITION_X: Field = Field {
    offset: 7,
    width: 6,
};
pub(crate) const POSITION_Y: Field = Field {
    offset: 15,
    width: 6,
};

/// Upper bound for a single reply line, line terminator included
pub(crate) const REPLY_MAX_LEN: usize = 64;

fn parse_coordinate(s: &[u8]) -> IResult<&[u8], f64> {
    all_consuming(double)(s)
}

// padding inside a field is either spaces or, for the last field, the line
// terminator
fn is_padding(b: &u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\n')
}

fn parse_field(line: &[u8], field: Field) -> Result<f64, ParseError> {
    let short = || ParseError::ShortReply {
        needed: field.end(),
        reply: line.to_vec(),
    };
    let raw = field.slice(line).ok_or_else(short)?;
    let digits: Vec<u8> = raw.iter().filter(|b| !is_padding(b)).copied().collect();
    ensure!(!(digits.is_empty() && field.is_cut(line)), short());
    let invalid = || ParseError::InvalidNumber {
        offset: field.offset,
        end: field.end(),
        reply: line.to_vec(),
    };
    let (_, value) = parse_coordinate(&digits).finish().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Extracts the position from the reply to a [`Command::Where`][super::cmd::Command::Where]
pub(crate) fn parse_position(line: &[u8]) -> Result<Position, ParseError> {
    Ok(Position {
        x: parse_field(line, POSITION_X)?,
        y: parse_field(line, POSITION_Y)?,
    })
}
