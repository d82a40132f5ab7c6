use std::io::{self, Read, Write};

use log::debug;

use crate::error::Error;
use crate::header::Header;

/// Size in bytes of a FITS block. Headers and data units are padded to it
pub const BLOCK_SIZE: usize = 2880;

/// A FITS file of which only the primary header is parsed
///
/// The bytes following the primary header (its data unit and all the
/// extensions) are kept as they are and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Fits {
    pub header: Header,
    remainder: Vec<u8>,
}

impl Fits {
    pub fn new(header: Header, remainder: Vec<u8>) -> Self {
        Self { header, remainder }
    }

    /// Parse a FITS file
    /// # Params
    /// * `reader` - a reader created i.e. from the opening of a file
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut num_bytes_read = 0;
        /* 1. Parse the header first */
        let header = Header::parse(&mut reader, &mut num_bytes_read)?;

        /* 2. Skip the next bytes to a new 2880 multiple of bytes
        This is where the data block should start */
        let block = BLOCK_SIZE as u64;
        let off_data_block = (block - num_bytes_read % block) % block;
        let skipped = io::copy(&mut (&mut reader).take(off_data_block), &mut io::sink())?;
        if skipped < off_data_block {
            debug!("Header not padded to a {BLOCK_SIZE} bytes block");
        }

        /* 3. Everything else is passed through */
        let mut remainder = Vec::new();
        reader.read_to_end(&mut remainder)?;
        debug!(
            "{} header bytes, {} following bytes",
            num_bytes_read + skipped,
            remainder.len()
        );

        Ok(Self { header, remainder })
    }

    /// Returns the primary header
    pub fn get_header(&self) -> &Header {
        &self.header
    }

    /// Returns the bytes following the primary header
    pub fn get_remainder(&self) -> &[u8] {
        &self.remainder
    }

    /// Write the header followed by the untouched bytes
    ///
    /// Returns the number of bytes written
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64, Error> {
        let num_bytes_written = self.header.write(writer)?;
        writer.write_all(&self.remainder)?;

        Ok(num_bytes_written + self.remainder.len() as u64)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}
