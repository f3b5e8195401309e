//! packncrypt - reversible file packing with gzip and AES-256-CBC.
//!
//! A packed `.xaz` artifact is exactly `encrypt(compress(original))`: a
//! CBC-mode ciphertext of a gzip stream, with no header or metadata. The
//! cipher key and IV are derived deterministically from a passphrase, so
//! reversing an artifact requires only the passphrase. Wrong passphrases are
//! detected at cipher finalization through PKCS#7 padding validation. That
//! is a coincidental signal rather than an authenticated check, kept as a
//! documented limitation of the format.

pub mod app;
pub mod config;
pub mod error;
pub mod file;
pub mod keys;
pub mod pipeline;
pub mod stage;
pub mod transform;
pub mod types;
pub mod ui;
