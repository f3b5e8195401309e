//! Single stage transform runner.
//!
//! A stage reads the source file chunk by chunk, feeds each chunk through an
//! incremental [`Transform`](crate::transform::Transform), and writes the
//! output in source order. Memory use is bounded by one in-flight chunk plus
//! the transform's internal carry, never by file size.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};

use crate::config::CHUNK_SIZE;
use crate::error::StageError;
use crate::keys::KeyMaterial;
use crate::transform;
use crate::types::TransformKind;

/// Runs one stage transform from `source` to `dest`.
///
/// The destination file is created (truncated) at stage start. `on_progress`
/// receives the cumulative byte count (consumed for Compress/Encrypt,
/// produced for Decompress/Decrypt) after every chunk and once more with the
/// terminal count after the destination has been flushed. Returns the
/// terminal count.
///
/// On failure the destination may hold a partial, unusable prefix; removing
/// it is the caller's responsibility.
pub async fn run<F>(
    kind: TransformKind,
    source: &Path,
    dest: &Path,
    keys: &KeyMaterial,
    mut on_progress: F,
) -> Result<u64, StageError>
where
    F: FnMut(u64),
{
    let input = File::open(source).await.map_err(StageError::ReadFailed)?;
    let mut reader = BufReader::new(input);

    let output = File::create(dest).await.map_err(StageError::WriteFailed)?;
    let mut writer = BufWriter::new(output);

    let mut transform = transform::build(kind, keys);
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut consumed = 0u64;
    let mut produced = 0u64;

    loop {
        let n = reader.read(&mut buffer).await.map_err(StageError::ReadFailed)?;
        if n == 0 {
            break;
        }
        consumed += n as u64;

        let ready = transform.update(&buffer[..n])?;
        if !ready.is_empty() {
            writer.write_all(&ready).await.map_err(StageError::WriteFailed)?;
            produced += ready.len() as u64;
        }

        on_progress(if kind.reports_consumed() { consumed } else { produced });
    }

    let tail = transform.finalize()?;
    if !tail.is_empty() {
        writer.write_all(&tail).await.map_err(StageError::WriteFailed)?;
        produced += tail.len() as u64;
    }

    writer.flush().await.map_err(StageError::WriteFailed)?;

    let total = if kind.reports_consumed() { consumed } else { produced };
    on_progress(total);

    Ok(total)
}
