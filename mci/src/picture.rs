use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use byteorder::{WriteBytesExt, BE};
use thiserror::Error;

use crate::{
    compression::lossless::{compress, decompress, CompressionError},
    header::{FormatError, Header},
    operations::{diff_scan, scan_diff, ShapeError},
};

/// An uncompressed 8-bit image: a grid of samples indexed by row, then
/// column, then channel.
///
/// The grid owns its samples in canonical scan order (row-major, then
/// column, then channel) and is the value the codec consumes and
/// produces. Reading and writing raster files in other formats is the
/// caller's business; the codec itself only ever touches memory and the
/// container byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: u32,
    cols: u32,
    channels: u32,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from raw samples in canonical scan order.
    ///
    /// Fails with [`ShapeError`] when the buffer does not hold exactly
    /// `rows * cols * channels` samples.
    pub fn from_raw(
        rows: u32,
        cols: u32,
        channels: u32,
        samples: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        let expected = rows as usize * cols as usize * channels as usize;
        if samples.len() != expected {
            return Err(ShapeError {
                rows,
                cols,
                channels,
                expected,
                got: samples.len(),
            });
        }

        Ok(Self {
            rows,
            cols,
            channels,
            samples,
        })
    }

    /// Height of the image in pixels.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Width of the image in pixels.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Samples per pixel; 1 for grayscale, 3 for RGB.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Borrow the sample buffer.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the grid, returning the raw sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// The sample at `(row, col, channel)`.
    pub fn sample(&self, row: u32, col: u32, channel: u32) -> u8 {
        let index = (row * self.cols + col) * self.channels + channel;
        self.samples[index as usize]
    }

    /// Encode the image into anything that implements [`Write`].
    ///
    /// Writes the two header lines, then the code stream produced by
    /// filtering and dictionary-coding the samples, each code as a
    /// 2-byte big-endian value. The input grid is not modified, and a
    /// failure writes nothing further to `output`.
    pub fn encode<W: Write>(&self, mut output: W) -> Result<(), Error> {
        Header {
            rows: self.rows,
            cols: self.cols,
            channels: self.channels,
        }
        .write_into(&mut output)?;

        let residuals = diff_scan(&self.samples);

        for code in compress(&residuals) {
            output.write_u16::<BE>(code)?;
        }

        Ok(())
    }

    /// Decode an image from anything that implements [`Read`].
    ///
    /// Reads the header, then consumes the rest of the input as the code
    /// stream. The mirror image of [`encode`](Self::encode): any grid
    /// that encodes cleanly decodes back to an identical grid.
    pub fn decode<R: Read>(mut input: R) -> Result<PixelGrid, Error> {
        let header = Header::read_from(&mut input)?;

        let mut stream = Vec::new();
        input.read_to_end(&mut stream)?;
        if stream.len() % 2 != 0 {
            return Err(FormatError::OddStreamLength(stream.len()).into());
        }

        let codes: Vec<u16> = stream
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        let residuals = decompress(&codes)?;
        let samples = scan_diff(&residuals, header.rows, header.cols, header.channels)?;

        Ok(PixelGrid {
            rows: header.rows,
            cols: header.cols,
            channels: header.channels,
            samples,
        })
    }

    /// Encode the image into a new file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut output = BufWriter::new(File::create(path)?);
        self.encode(&mut output)?;
        output.flush()?;

        Ok(())
    }
}

/// Decode an image from a file at `path`.
pub fn open<P: AsRef<Path>>(path: P) -> Result<PixelGrid, Error> {
    PixelGrid::decode(BufReader::new(File::open(path)?))
}

/// Any failure an encode or decode call can surface.
///
/// Every variant is terminal for the call that produced it: the codec
/// never guesses at partially decoded pixel data, so a failed decode
/// returns no grid at all.
#[derive(Debug, Error)]
pub enum Error {
    /// The container framing is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The code stream references dictionary entries that cannot exist.
    #[error(transparent)]
    Corrupt(#[from] CompressionError),

    /// The code stream decodes to the wrong number of samples for the
    /// declared dimensions.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
