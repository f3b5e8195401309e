//! Streaming gzip compression and decompression.
//!
//! Both directions wrap flate2's write-side codecs around an in-memory sink
//! that is drained after every chunk, so the memory held between calls is
//! the codec's own window plus whatever output the last chunk produced.

use std::io::Write;
use std::mem;

use flate2::Compression;
use flate2::write::{GzDecoder, GzEncoder};

use crate::error::StageError;
use crate::transform::Transform;

/// Incremental gzip compressor.
pub struct GzCompress {
    encoder: GzEncoder<Vec<u8>>,
}

impl GzCompress {
    pub fn new() -> Self {
        Self { encoder: GzEncoder::new(Vec::new(), Compression::default()) }
    }
}

impl Default for GzCompress {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for GzCompress {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, StageError> {
        self.encoder.write_all(chunk).map_err(StageError::CodecFailed)?;
        Ok(mem::take(self.encoder.get_mut()))
    }

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, StageError> {
        // finish() flushes the deflate state and writes the gzip trailer;
        // the returned sink holds everything not yet drained by update().
        self.encoder.finish().map_err(StageError::CodecFailed)
    }
}

/// Incremental gzip decompressor.
pub struct GzDecompress {
    decoder: GzDecoder<Vec<u8>>,
}

impl GzDecompress {
    pub fn new() -> Self {
        Self { decoder: GzDecoder::new(Vec::new()) }
    }
}

impl Default for GzDecompress {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for GzDecompress {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, StageError> {
        // A write error here means the deflate stream itself is invalid.
        self.decoder.write_all(chunk).map_err(StageError::CodecFailed)?;
        Ok(mem::take(self.decoder.get_mut()))
    }

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, StageError> {
        // finish() rejects truncated streams and bad trailer checksums.
        self.decoder.finish().map_err(StageError::CodecFailed)
    }
}
