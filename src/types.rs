//! Common type definitions for packncrypt.
//!
//! Provides the core enums shared between the pipeline, the stage runner,
//! and the user interface: pipeline direction, per-stage transform kinds,
//! and the progress events forwarded to callers.

use std::fmt::{Display, Formatter, Result};

/// Direction of a pipeline run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PipelineMode {
    /// Compress then encrypt, producing a `.xaz` artifact.
    Pack,

    /// Decrypt then decompress, restoring the original file.
    Unpack,
}

impl PipelineMode {
    /// All pipeline modes, for selection menus.
    pub const ALL: &'static [Self] = &[Self::Pack, Self::Unpack];

    /// Returns a human-readable label for the mode.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pack => "Pack (original to .xaz)",
            Self::Unpack => "Unpack (.xaz to original)",
        }
    }

    /// Returns the ordered pair of transforms for this mode.
    ///
    /// Stage 2 consumes the fully flushed output of stage 1; the two stages
    /// never run concurrently.
    #[inline]
    pub fn stages(self) -> (TransformKind, TransformKind) {
        match self {
            Self::Pack => (TransformKind::Compress, TransformKind::Encrypt),
            Self::Unpack => (TransformKind::Decrypt, TransformKind::Decompress),
        }
    }
}

impl Display for PipelineMode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// One directional streaming transform applied by a single stage.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransformKind {
    Compress,
    Decompress,
    Encrypt,
    Decrypt,
}

impl TransformKind {
    /// Returns a progress label for the transform.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Compress => "Compressing",
            Self::Decompress => "Decompressing",
            Self::Encrypt => "Encrypting",
            Self::Decrypt => "Decrypting",
        }
    }

    /// Whether progress counts bytes consumed from the source.
    ///
    /// Compress and Encrypt report bytes read; Decompress and Decrypt report
    /// bytes produced, since their output size is the meaningful quantity.
    #[inline]
    pub fn reports_consumed(self) -> bool {
        matches!(self, Self::Compress | Self::Encrypt)
    }
}

impl Display for TransformKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Identifies which of the two stages of a run is active.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StageId {
    First,
    Second,
}

impl StageId {
    /// One-based stage number, for "stage N of 2" rendering.
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Total number of stages in a run.
    pub const TOTAL: u8 = 2;
}

/// Progress notification forwarded from the active stage to the caller.
///
/// `bytes` is cumulative since the stage began and non-decreasing within a
/// stage; the final event of a stage carries the terminal byte count.
#[derive(Clone, Copy, Debug)]
pub struct ProgressEvent {
    /// Which stage of the run is reporting.
    pub stage: StageId,

    /// The transform the stage is applying.
    pub kind: TransformKind,

    /// Cumulative bytes processed by the stage so far.
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_stage_order() {
        let (first, second) = PipelineMode::Pack.stages();
        assert_eq!(first, TransformKind::Compress);
        assert_eq!(second, TransformKind::Encrypt);
    }

    #[test]
    fn test_unpack_stage_order() {
        let (first, second) = PipelineMode::Unpack.stages();
        assert_eq!(first, TransformKind::Decrypt);
        assert_eq!(second, TransformKind::Decompress);
    }

    #[test]
    fn test_progress_direction() {
        assert!(TransformKind::Compress.reports_consumed());
        assert!(TransformKind::Encrypt.reports_consumed());
        assert!(!TransformKind::Decompress.reports_consumed());
        assert!(!TransformKind::Decrypt.reports_consumed());
    }
}
