//! Single-file conversion: decode the source, encode the container
//!
//! Every failure is contained here. [`Converter::convert`] reports the
//! outcome as a boolean and a logged diagnostic so that one bad file never
//! stops a batch.

use crate::decoder::{Decoder, Fb2Decoder};
use crate::encoder::{EpubEncoder, Encoder};
use crate::error::Result;
use crate::types::Book;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Runs the decoder and encoder for one input file at a time
pub struct Converter {
    decoder: Box<dyn Decoder>,
    encoder: Box<dyn Encoder>,
}

impl Converter {
    /// FB2 in, EPUB 3 out
    pub fn new() -> Self {
        Self {
            decoder: Box::new(Fb2Decoder::new()),
            encoder: Box::new(EpubEncoder::new()),
        }
    }

    /// Replace the output encoder
    pub fn with_encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Convert `input` to `output`, returning the decoded book on success.
    ///
    /// A destination that was partially written before an error is left in
    /// place.
    pub fn try_convert(&self, input: &Path, output: &Path) -> Result<Book> {
        let file = File::open(input)?;
        let mut reader = BufReader::new(file);
        let book = self.decoder.decode(&mut reader)?;

        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        self.encoder.encode(&book, &mut writer)?;
        writer.flush()?;

        Ok(book)
    }

    /// Convert `input` to `output`. Returns `false` and logs the cause on
    /// any failure.
    pub fn convert(&self, input: &Path, output: &Path) -> bool {
        match self.try_convert(input, output) {
            Ok(book) => {
                tracing::info!(
                    "Converted {:?} -> {:?} ({} chapters, {} images)",
                    input,
                    output,
                    book.chapters.len(),
                    book.assets.len()
                );
                true
            }
            Err(e) => {
                tracing::error!("Error converting {:?}: {}", input, e);
                false
            }
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one FB2 file to EPUB with default settings
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> bool {
    Converter::new().convert(input.as_ref(), output.as_ref())
}
