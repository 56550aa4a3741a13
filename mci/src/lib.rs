//! MCI (**M**y **C**ompressed **I**mage) is a lossless image format. It
//! stores an 8-bit grayscale or RGB pixel grid as a predictively filtered,
//! dictionary-coded stream behind a two-line text header, and it always
//! round-trips bit for bit.
//!
//! The format is designed to be simple compared to other more standard
//! formats: a previous-sample filter turns the image into small residuals,
//! an adaptive LZW-family coder replaces recurring residual runs with
//! two-byte codes, and the header carries nothing but an identifier and
//! the grid dimensions.
//!
//! If you're looking for an image format to use, you might want to
//! consider a more standard one such as those supported by the
//! [image crate](https://docs.rs/image/latest/image/).
//!
//! # Example
//! ## Creating and writing an MCI
//! ```no_run
//! use mci::PixelGrid;
//!
//! let samples = vec![
//!     10, 12,
//!     200, 201,
//! ];
//!
//! // Build a 2×2 grayscale image in memory. Nothing is compressed or
//! // encoded at this point.
//! let image = PixelGrid::from_raw(2, 2, 1, samples)?;
//!
//! // Write it out to a file. This runs the filter, the coder, and the
//! // container framing.
//! image.save("scan.mci")?;
//! # Ok::<(), mci::Error>(())
//! ```
//!
//! ## Reading an MCI from a file
//! ```no_run
//! use std::fs::File;
//! use mci::PixelGrid;
//!
//! // Load it directly with the `open` function...
//! let image = mci::open("scan.mci")?;
//!
//! // ...or from anything implementing Read.
//! let input_file = File::open("scan.mci")?;
//! let image2 = PixelGrid::decode(input_file)?;
//! # Ok::<(), mci::Error>(())
//! ```

mod compression {
    pub mod lossless;
}
mod operations;

pub mod picture;
pub mod header;

// ----------------------- //
// INLINED USEFUL FEATURES //
// ----------------------- //
#[doc(inline)]
pub use picture::PixelGrid;

#[doc(inline)]
pub use picture::open;

#[doc(inline)]
pub use picture::Error;

pub use compression::lossless::CompressionError;
pub use operations::ShapeError;
