//! Incremental byte-stream transforms.
//!
//! A [`Transform`] consumes a stream chunk by chunk and emits output as it
//! becomes available, holding only a small internal carry between calls.
//! Chunks must be fed in source order; both CBC chaining and the deflate
//! codec are stateful and order-sensitive.

pub mod cipher;
pub mod codec;

use crate::error::StageError;
use crate::keys::KeyMaterial;
use crate::types::TransformKind;

/// A stateful, unidirectional streaming transform.
pub trait Transform: Send {
    /// Feeds one chunk of input and returns whatever output is ready.
    ///
    /// An empty return value is normal; ciphers and codecs buffer until they
    /// have a complete unit to emit.
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, StageError>;

    /// Signals end of input and returns the final output bytes.
    ///
    /// For encryption this writes the padding block; for decryption it
    /// validates and strips it, which is where a wrong key surfaces.
    fn finalize(self: Box<Self>) -> Result<Vec<u8>, StageError>;
}

/// Builds the transform for a stage.
///
/// The key material is only used by the cipher kinds; the codec kinds
/// ignore it.
pub fn build(kind: TransformKind, keys: &KeyMaterial) -> Box<dyn Transform> {
    match kind {
        TransformKind::Compress => Box::new(codec::GzCompress::new()),
        TransformKind::Decompress => Box::new(codec::GzDecompress::new()),
        TransformKind::Encrypt => Box::new(cipher::CbcEncrypt::new(keys)),
        TransformKind::Decrypt => Box::new(cipher::CbcDecrypt::new(keys)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Transform;
    use crate::error::StageError;

    /// Runs a transform over `data` split into `chunk_size` pieces and
    /// returns the concatenated output.
    pub fn run_chunked(mut transform: Box<dyn Transform>, data: &[u8], chunk_size: usize) -> Result<Vec<u8>, StageError> {
        let mut out = Vec::new();
        for chunk in data.chunks(chunk_size.max(1)) {
            out.extend_from_slice(&transform.update(chunk)?);
        }
        out.extend_from_slice(&transform.finalize()?);
        Ok(out)
    }
}
