//! Two-stage pipeline orchestrator.
//!
//! A run sequences two stage transforms through an intermediate temporary
//! artifact: Compress then Encrypt for packing, Decrypt then Decompress for
//! unpacking. Stage 2 only starts once stage 1 has fully flushed its output.
//!
//! Cleanup invariants, enforced on every terminal outcome:
//! - the intermediate file is always removed, on success and on failure;
//! - a partially written final file is removed when stage 2 fails;
//! - the source file is never modified or deleted.
//!
//! The invariants hold even if the returned future is dropped mid-run: both
//! artifacts are covered by drop guards until the run commits.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, StageError};
use crate::file::{intermediate_path, packed_path, unpacked_path};
use crate::keys::KeyMaterial;
use crate::stage;
use crate::types::{PipelineMode, ProgressEvent, StageId, TransformKind};

/// Orchestrates pack and unpack runs with a fixed set of key material.
///
/// Key material is derived once per `Pipeline` and dropped (and wiped) with
/// it. One `Pipeline` can serve several sequential runs; independent
/// pipelines for different files may run concurrently since their paths are
/// disjoint by construction.
pub struct Pipeline {
    keys: KeyMaterial,
}

/// The planned paths of one two-stage run.
struct PipelineRun {
    mode: PipelineMode,
    original: PathBuf,
    intermediate: PathBuf,
    final_path: PathBuf,
}

impl PipelineRun {
    fn plan(mode: PipelineMode, original: &Path) -> Self {
        let final_path = match mode {
            PipelineMode::Pack => packed_path(original),
            PipelineMode::Unpack => unpacked_path(original),
        };
        let intermediate = intermediate_path(&final_path);

        Self { mode, original: original.to_path_buf(), intermediate, final_path }
    }
}

impl Pipeline {
    /// Creates a pipeline with key material derived from `passphrase`.
    ///
    /// The empty string is a valid passphrase and selects the default key.
    pub fn new(passphrase: &str) -> Self {
        Self { keys: KeyMaterial::derive(passphrase) }
    }

    /// Packs `original` into a `.xaz` artifact next to it.
    ///
    /// Returns the final artifact path. `on_progress` receives every stage's
    /// progress tagged with the active stage, so the caller can render
    /// "stage N of 2" without knowing the pipeline internals.
    pub async fn pack<F>(&self, original: &Path, on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(ProgressEvent),
    {
        self.run(PipelineRun::plan(PipelineMode::Pack, original), on_progress).await
    }

    /// Unpacks a `.xaz` artifact, restoring the original contents under a
    /// timestamped name so prior results are never overwritten.
    pub async fn unpack<F>(&self, original: &Path, on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(ProgressEvent),
    {
        self.run(PipelineRun::plan(PipelineMode::Unpack, original), on_progress).await
    }

    async fn run<F>(&self, plan: PipelineRun, mut on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(ProgressEvent),
    {
        let (first, second) = plan.mode.stages();

        tracing::debug!(
            mode = ?plan.mode,
            original = %plan.original.display(),
            final_path = %plan.final_path.display(),
            "starting pipeline run"
        );

        // Covers the intermediate for the whole run: it is removed on stage
        // failure, on success, and if the future is dropped mid-run.
        let _intermediate = Artifact::guard(plan.intermediate.clone());

        stage::run(first, &plan.original, &plan.intermediate, &self.keys, |bytes| {
            on_progress(ProgressEvent { stage: StageId::First, kind: first, bytes });
        })
        .await
        .map_err(|source| stage_error(StageId::First, first, source))?;

        tracing::debug!(kind = %first, "stage 1 complete");

        let mut final_guard = Artifact::guard(plan.final_path.clone());

        stage::run(second, &plan.intermediate, &plan.final_path, &self.keys, |bytes| {
            on_progress(ProgressEvent { stage: StageId::Second, kind: second, bytes });
        })
        .await
        .map_err(|source| stage_error(StageId::Second, second, source))?;

        tracing::debug!(kind = %second, "stage 2 complete");

        // Commit: the final file is the sole retained artifact.
        final_guard.keep();
        Ok(plan.final_path)
    }
}

#[inline]
fn stage_error(stage: StageId, kind: TransformKind, source: StageError) -> PipelineError {
    PipelineError { stage, kind, source }
}

/// Drop guard over a pipeline artifact.
///
/// Removes the file on drop unless [`keep`](Self::keep) was called. Removal
/// is best-effort and tolerates the file never having been created.
struct Artifact {
    path: PathBuf,
    keep: bool,
}

impl Artifact {
    fn guard(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed artifact"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove artifact"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_guard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leftover");
        std::fs::write(&path, b"partial").unwrap();

        drop(Artifact::guard(path.clone()));
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_guard_keeps_committed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final");
        std::fs::write(&path, b"done").unwrap();

        let mut guard = Artifact::guard(path.clone());
        guard.keep();
        drop(guard);
        assert!(path.exists());
    }

    #[test]
    fn test_artifact_guard_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        drop(Artifact::guard(dir.path().join("never-written")));
    }

    #[test]
    fn test_plan_paths() {
        let plan = PipelineRun::plan(PipelineMode::Pack, Path::new("data.bin"));
        assert_eq!(plan.final_path, PathBuf::from("data.bin.xaz"));
        assert_eq!(plan.intermediate, PathBuf::from("data.bin.xaz.01"));
    }
}
