use flate2::read::GzDecoder;
use std::io::{Read, Seek, SeekFrom};

use crate::error::Error;

/// A reader decompressing its input on the fly when it is gzipped
#[derive(Debug)]
pub enum GzReader<R> {
    GzReader(GzDecoder<R>),
    Reader(R),
}

impl<R> Read for GzReader<R>
where
    R: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            GzReader::GzReader(r) => r.read(buf),
            GzReader::Reader(r) => r.read(buf),
        }
    }
}

impl<R> GzReader<R>
where
    R: Read + Seek,
{
    /// Wrap a reader, decoding it if it starts with a gzip header
    pub fn new(reader: R) -> Result<Self, Error> {
        let gz = GzDecoder::new(reader);

        match gz.header() {
            // `reader` is gzip-compressed.
            Some(_) => Ok(GzReader::GzReader(gz)),
            // `reader` is not compressed.
            None => {
                let mut r = gz.into_inner();
                // The `GzDecoder` already moved some bytes out of the reader
                // by trying to decompress it, it must be rewinded
                r.seek(SeekFrom::Start(0))?;

                Ok(GzReader::Reader(r))
            }
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, GzReader::GzReader(_))
    }
}
