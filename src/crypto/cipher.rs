/// AES-256-CBC encryption for document payloads.
///
/// Key and IV both come from one derived [`KeyMaterial`], so a given
/// KeyMaterial pins a single (key, iv) pair. Encrypting several distinct
/// plaintexts under one pair is a known weakening (IV reuse); callers
/// wanting independent messages derive fresh KeyMaterial or rotate IVs
/// themselves. The engine does not rotate automatically.
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::crypto::kdf::KeyMaterial;
use crate::encoding::{self, Encoding};
use crate::error::{Result, SeekvaultError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const BLOCK_LEN: usize = 16;

/// Encrypt a UTF-8 plaintext, returning hex-encoded ciphertext.
pub fn encrypt(plaintext: &str, key_material: &KeyMaterial) -> Result<String> {
    encrypt_with_encoding(plaintext, key_material, Encoding::Hex)
}

/// Encrypt a UTF-8 plaintext, returning ciphertext in the given encoding.
pub fn encrypt_with_encoding(
    plaintext: &str,
    key_material: &KeyMaterial,
    output: Encoding,
) -> Result<String> {
    let cipher = Aes256CbcEnc::new(
        key_material.cipher_key.as_bytes().into(),
        (&key_material.iv).into(),
    );
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    encoding::encode(&ciphertext, output)
}

/// Decrypt hex-encoded ciphertext back to a UTF-8 plaintext.
pub fn decrypt(ciphertext: &str, key_material: &KeyMaterial) -> Result<String> {
    decrypt_with_encoding(ciphertext, key_material, Encoding::Hex)
}

/// Decrypt ciphertext text in the given encoding back to a UTF-8 plaintext.
///
/// Malformed ciphertext is always detected: a length that is not a positive
/// multiple of the block size, invalid PKCS#7 padding after decryption, or
/// non-UTF-8 plaintext all fail with `DecryptionFailed`.
pub fn decrypt_with_encoding(
    ciphertext: &str,
    key_material: &KeyMaterial,
    input: Encoding,
) -> Result<String> {
    let bytes = encoding::decode(ciphertext, input)?;
    if bytes.is_empty() || bytes.len() % BLOCK_LEN != 0 {
        return Err(SeekvaultError::DecryptionFailed(format!(
            "Ciphertext length {} is not a positive multiple of the {BLOCK_LEN}-byte block size",
            bytes.len()
        )));
    }

    let cipher = Aes256CbcDec::new(
        key_material.cipher_key.as_bytes().into(),
        (&key_material.iv).into(),
    );
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
        .map_err(|_| SeekvaultError::DecryptionFailed("Invalid padding".to_string()))?;

    String::from_utf8(plaintext).map_err(|e| {
        SeekvaultError::DecryptionFailed(format!("Decrypted bytes are not valid UTF-8: {e}"))
    })
}
