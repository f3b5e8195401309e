//! Error taxonomy for the transform pipeline.
//!
//! Stage errors are typed so callers can distinguish an unreadable source
//! from a failed write or a cipher rejection. Nothing here retries: any
//! failure is terminal for the current run and the stream is abandoned.

use std::io;

use thiserror::Error;

use crate::types::{StageId, TransformKind};

/// Failure of a single stage transform.
#[derive(Debug, Error)]
pub enum StageError {
    /// The source file could not be opened or read.
    #[error("failed to read source: {0}")]
    ReadFailed(#[source] io::Error),

    /// The destination file could not be created, written, or flushed.
    #[error("failed to write destination: {0}")]
    WriteFailed(#[source] io::Error),

    /// Cipher finalization failed: ciphertext length is not a multiple of
    /// the block size, or PKCS#7 padding did not validate.
    ///
    /// On decrypt this is the practical wrong-passphrase signal. CBC carries
    /// no authentication tag, so a wrong key and corrupt input are
    /// indistinguishable here.
    #[error("invalid key or corrupt input")]
    CipherFailed,

    /// The compressed stream is corrupt or truncated.
    #[error("corrupt compressed stream: {0}")]
    CodecFailed(#[source] io::Error),
}

/// Failure of a pipeline run, tagged with the stage that failed.
///
/// By the time this error is returned, the orchestrator has already removed
/// the intermediate artifact and any partially written final output.
#[derive(Debug, Error)]
#[error("stage {} of {} ({kind}) failed", .stage.number(), StageId::TOTAL)]
pub struct PipelineError {
    /// Which stage of the run failed.
    pub stage: StageId,

    /// The transform that stage was applying.
    pub kind: TransformKind,

    /// The underlying stage failure.
    #[source]
    pub source: StageError,
}
