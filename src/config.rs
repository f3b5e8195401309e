//! Global configuration constants.

/// Application name used in user-facing output.
pub const APP_NAME: &str = "Pack 'n Crypt";

/// File extension for packed artifacts.
pub const FILE_EXTENSION: &str = ".xaz";

/// Suffix appended to the final path to derive the intermediate artifact path.
///
/// The intermediate file holds the output of stage 1 (compression on pack,
/// decryption on unpack) and only exists between the two stages of a run.
pub const INTERMEDIATE_SUFFIX: &str = ".01";

/// Chunk size for streaming file processing.
///
/// 256KB keeps per-stage memory bounded by a small constant while staying
/// large enough for good I/O throughput.
pub const CHUNK_SIZE: usize = 256 * 1024;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// CBC initialization vector size in bytes.
pub const IV_SIZE: usize = 16;

/// AES block size in bytes. CBC ciphertext length is always a multiple of this.
pub const CIPHER_BLOCK: usize = 16;
