use byteorder::ReadBytesExt;
use std::io::{ErrorKind, Read, Write};

use thiserror::Error;

use crate::picture::Error;

/// Identifier at the start of every MCI container, naming the codec and
/// the container version. Written as the first line of the file.
pub const MAGIC: &str = "my compressed image - v1.0";

/// An MCI container header. This must be included at the beginning of a
/// valid MCI file.
///
/// The header is two ASCII lines: the [`MAGIC`] identifier, then the
/// grid dimensions as `"<rows> <cols> <channels>"` in decimal. Together
/// with the code stream that follows it, the header fully determines the
/// reconstructed image.
pub struct Header {
    /// Height of the image in pixels.
    pub rows: u32,

    /// Width of the image in pixels.
    pub cols: u32,

    /// Samples per pixel; 1 for grayscale, 3 for RGB.
    pub channels: u32,
}

impl Header {
    /// Serialize the header into anything that implements [`Write`].
    pub fn write_into<W: Write>(&self, output: &mut W) -> Result<(), std::io::Error> {
        writeln!(output, "{MAGIC}")?;
        writeln!(output, "{} {} {}", self.rows, self.cols, self.channels)?;

        Ok(())
    }

    /// Parse a header from anything that implements [`Read`], validating
    /// the identifier line.
    pub fn read_from<R: Read + ReadBytesExt>(input: &mut R) -> Result<Self, Error> {
        let identifier = read_line(input)?;
        if identifier != MAGIC.as_bytes() {
            return Err(FormatError::InvalidIdentifier(lossy(&identifier)).into());
        }

        let line = read_line(input)?;
        let dimensions = lossy(&line);

        let fields: Vec<u32> = dimensions
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| FormatError::InvalidDimensions(dimensions.clone()))?;

        let [rows, cols, channels] = fields[..] else {
            return Err(FormatError::InvalidDimensions(dimensions).into());
        };

        Ok(Header {
            rows,
            cols,
            channels,
        })
    }
}

/// Read bytes up to (and consuming) the next newline.
fn read_line<R: Read + ReadBytesExt>(input: &mut R) -> Result<Vec<u8>, Error> {
    let mut line = Vec::new();

    loop {
        let byte = match input.read_u8() {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(FormatError::TruncatedHeader.into())
            }
            Err(e) => return Err(e.into()),
        };

        if byte == b'\n' {
            return Ok(line);
        }

        line.push(byte);
    }
}

fn lossy(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

/// Violations of the container framing itself.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The first line of the input did not match [`MAGIC`].
    #[error("incorrect identifier {0:?}")]
    InvalidIdentifier(String),

    /// The dimension line was not three whitespace-separated decimal
    /// integers.
    #[error("bad dimension line {0:?}")]
    InvalidDimensions(String),

    /// The input ended before both header lines were read.
    #[error("input truncated inside the header")]
    TruncatedHeader,

    /// The code stream ended with half a code.
    #[error("code stream length of {0} bytes is odd")]
    OddStreamLength(usize),
}
