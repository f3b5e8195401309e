//! Streaming AES-256-CBC encryption and decryption.
//!
//! CBC operates on whole 16-byte blocks, so both directions keep a carry
//! buffer between chunks. The encryptor holds back the sub-block remainder
//! until finalization, where it writes a PKCS#7 padding block. The decryptor
//! additionally holds back one full block, because the last block of the
//! stream contains the padding and can only be validated once the source is
//! exhausted. That validation is also the practical wrong-passphrase check.

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::config::CIPHER_BLOCK;
use crate::error::StageError;
use crate::keys::KeyMaterial;
use crate::transform::Transform;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Incremental CBC encryptor with PKCS#7 padding on finalization.
pub struct CbcEncrypt {
    cipher: Aes256CbcEnc,
    carry: Vec<u8>,
}

impl CbcEncrypt {
    pub fn new(keys: &KeyMaterial) -> Self {
        Self {
            cipher: Aes256CbcEnc::new(&keys.key.into(), &keys.iv.into()),
            carry: Vec::with_capacity(CIPHER_BLOCK),
        }
    }
}

impl Transform for CbcEncrypt {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, StageError> {
        self.carry.extend_from_slice(chunk);

        // Emit only whole blocks; the remainder stays in the carry.
        let boundary = self.carry.len() - self.carry.len() % CIPHER_BLOCK;
        let mut out: Vec<u8> = self.carry.drain(..boundary).collect();

        for block in out.chunks_exact_mut(CIPHER_BLOCK) {
            self.cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }

        Ok(out)
    }

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, StageError> {
        // The carry is a sub-block remainder, so Pkcs7 always emits exactly
        // one block here. An exact block boundary gets a full block of 0x10.
        let Self { cipher, mut carry } = *self;
        let msg_len = carry.len();
        carry.resize(CIPHER_BLOCK, 0);

        let written = cipher
            .encrypt_padded_mut::<Pkcs7>(&mut carry, msg_len)
            .map_err(|_| StageError::CipherFailed)?
            .len();
        carry.truncate(written);

        Ok(carry)
    }
}

/// Incremental CBC decryptor with PKCS#7 validation on finalization.
pub struct CbcDecrypt {
    cipher: Aes256CbcDec,
    carry: Vec<u8>,
}

impl CbcDecrypt {
    pub fn new(keys: &KeyMaterial) -> Self {
        Self {
            cipher: Aes256CbcDec::new(&keys.key.into(), &keys.iv.into()),
            carry: Vec::with_capacity(2 * CIPHER_BLOCK),
        }
    }
}

impl Transform for CbcDecrypt {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, StageError> {
        self.carry.extend_from_slice(chunk);

        // Keep at least one full block back: the final block of the stream
        // carries the padding and must not be emitted before finalization.
        if self.carry.len() <= CIPHER_BLOCK {
            return Ok(Vec::new());
        }

        let emit = (self.carry.len() - CIPHER_BLOCK) / CIPHER_BLOCK * CIPHER_BLOCK;
        let mut out: Vec<u8> = self.carry.drain(..emit).collect();

        for block in out.chunks_exact_mut(CIPHER_BLOCK) {
            self.cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }

        Ok(out)
    }

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, StageError> {
        // Valid CBC ciphertext ends in exactly one held-back block; anything
        // else means the input was truncated or never ciphertext at all.
        let Self { cipher, mut carry } = *self;
        if carry.len() != CIPHER_BLOCK {
            return Err(StageError::CipherFailed);
        }

        let opened = cipher
            .decrypt_padded_mut::<Pkcs7>(&mut carry)
            .map_err(|_| StageError::CipherFailed)?
            .to_vec();

        Ok(opened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::run_chunked;

    fn keys() -> KeyMaterial {
        KeyMaterial::derive("cipher test")
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip_across_chunk_sizes() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();

        for chunk_size in [1, 15, 16, 17, 4096] {
            let sealed = run_chunked(Box::new(CbcEncrypt::new(&keys())), &data, chunk_size).unwrap();
            assert_eq!(sealed.len() % CIPHER_BLOCK, 0);
            assert!(sealed.len() > data.len());

            let opened = run_chunked(Box::new(CbcDecrypt::new(&keys())), &sealed, chunk_size).unwrap();
            assert_eq!(opened, data, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_empty_input_produces_one_padding_block() {
        let sealed = run_chunked(Box::new(CbcEncrypt::new(&keys())), &[], 4096).unwrap();
        assert_eq!(sealed.len(), CIPHER_BLOCK);

        let opened = run_chunked(Box::new(CbcDecrypt::new(&keys())), &sealed, 4096).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn test_exact_block_input_gains_full_padding_block() {
        let data = [0xABu8; CIPHER_BLOCK * 4];
        let sealed = run_chunked(Box::new(CbcEncrypt::new(&keys())), &data, 7).unwrap();
        assert_eq!(sealed.len(), data.len() + CIPHER_BLOCK);

        let opened = run_chunked(Box::new(CbcDecrypt::new(&keys())), &sealed, 13).unwrap();
        assert_eq!(opened, data);
    }

    #[test]
    fn test_length_not_block_multiple_fails() {
        let sealed = run_chunked(Box::new(CbcEncrypt::new(&keys())), b"some plaintext", 4096).unwrap();
        let truncated = &sealed[..sealed.len() - 1];

        let result = run_chunked(Box::new(CbcDecrypt::new(&keys())), truncated, 4096);
        assert!(matches!(result, Err(StageError::CipherFailed)));
    }

    #[test]
    fn test_empty_ciphertext_fails() {
        let result = run_chunked(Box::new(CbcDecrypt::new(&keys())), &[], 4096);
        assert!(matches!(result, Err(StageError::CipherFailed)));
    }

    #[test]
    fn test_invalid_padding_fails() {
        // Encrypt a raw block ending in 0x00 without PKCS#7 so the decryptor
        // sees structurally invalid padding, deterministically.
        let km = keys();
        let mut block = [0u8; CIPHER_BLOCK];
        let mut raw = Aes256CbcEnc::new(&km.key.into(), &km.iv.into());
        raw.encrypt_block_mut(GenericArray::from_mut_slice(&mut block));

        let result = run_chunked(Box::new(CbcDecrypt::new(&km)), &block, 4096);
        assert!(matches!(result, Err(StageError::CipherFailed)));
    }

    #[test]
    fn test_wrong_key_rejected_by_padding_check() {
        // Fixed payload and passphrases, so the mismatched key decrypts the
        // final block to invalid padding every run.
        let sealed = run_chunked(
            Box::new(CbcEncrypt::new(&KeyMaterial::derive("secret"))),
            b"payload that only the right passphrase recovers",
            4096,
        )
        .unwrap();

        let result = run_chunked(
            Box::new(CbcDecrypt::new(&KeyMaterial::derive("wrong"))),
            &sealed,
            4096,
        );
        assert!(matches!(result, Err(StageError::CipherFailed)));
    }
}
