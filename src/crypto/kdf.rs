/// PBKDF2 key derivation for the searchable-encryption core.
///
/// A single passphrase is imported once into a [`DerivationContext`] and
/// stretched twice: once to produce the cipher key and IV, and once more,
/// with an independent seed and half the iteration count, to produce the
/// secret salt that keys trapdoor hashing.
use std::num::NonZeroU32;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::sensitive::SecretBytes;
use crate::error::{Result, SeekvaultError};

/// Minimum stretched output: 32-byte cipher key plus 16-byte IV.
pub const MIN_KEY_LENGTH_BYTES: usize = 48;
/// Length of the random salts generated when the caller supplies none.
pub const DEFAULT_SALT_LEN: usize = 512;
/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(999) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

const CIPHER_KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const SECRET_SALT_LEN: usize = 32;

/// Hash function used for PBKDF2 stretching and digesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SeekvaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA-1" | "SHA1" => Ok(Self::Sha1),
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-384" | "SHA384" => Ok(Self::Sha384),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            _ => Err(SeekvaultError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Configuration for [`derive_key_material`].
///
/// `salt` seeds the cipher-key/IV stretch and `secret_salt_seed` seeds the
/// secret-salt stretch. Leaving either as `None` draws a fresh random
/// 512-byte value from the OS, making the output unreproducible; supply
/// both explicitly to get byte-identical key material across calls.
#[derive(Debug, Clone)]
pub struct DeriveOptions {
    pub algorithm: HashAlgorithm,
    pub salt: Option<Vec<u8>>,
    pub secret_salt_seed: Option<Vec<u8>>,
    pub iterations: NonZeroU32,
    pub key_length_bytes: usize,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            salt: None,
            secret_salt_seed: None,
            iterations: DEFAULT_ITERATIONS,
            key_length_bytes: MIN_KEY_LENGTH_BYTES,
        }
    }
}

/// Derived key material for one passphrase/session.
///
/// The cipher key and secret salt are zeroized on drop. Destruction timing
/// is otherwise the caller's responsibility; there is no built-in expiry.
pub struct KeyMaterial {
    /// 256-bit AES key, usable only through the cipher module.
    pub cipher_key: SecretBytes<CIPHER_KEY_LEN>,
    /// 128-bit CBC initialization vector.
    pub iv: [u8; IV_LEN],
    /// 256-bit salt used exclusively for trapdoor hashing.
    pub secret_salt: SecretBytes<SECRET_SALT_LEN>,
}

/// Phase-1 import of a passphrase.
///
/// Holds the passphrase bytes (zeroized on drop) and the hash algorithm so
/// that both phase-2 stretches run against the same imported secret without
/// re-supplying it.
pub struct DerivationContext {
    passphrase: Zeroizing<Vec<u8>>,
    algorithm: HashAlgorithm,
}

impl DerivationContext {
    pub fn new(passphrase: &str, algorithm: HashAlgorithm) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.as_bytes().to_vec()),
            algorithm,
        }
    }

    /// Stretch the imported passphrase into `out_len` pseudorandom bytes
    /// with PBKDF2-HMAC under the context's hash algorithm.
    pub fn stretch(&self, salt: &[u8], iterations: NonZeroU32, out_len: usize) -> Vec<u8> {
        let mut output = vec![0u8; out_len];
        let rounds = iterations.get();
        match self.algorithm {
            HashAlgorithm::Sha1 => pbkdf2_hmac::<Sha1>(&self.passphrase, salt, rounds, &mut output),
            HashAlgorithm::Sha256 => {
                pbkdf2_hmac::<Sha256>(&self.passphrase, salt, rounds, &mut output)
            }
            HashAlgorithm::Sha384 => {
                pbkdf2_hmac::<Sha384>(&self.passphrase, salt, rounds, &mut output)
            }
            HashAlgorithm::Sha512 => {
                pbkdf2_hmac::<Sha512>(&self.passphrase, salt, rounds, &mut output)
            }
        }
        output
    }
}

/// Generate a random default salt (512 bytes).
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; DEFAULT_SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive `{cipher_key, iv, secret_salt}` from a passphrase.
///
/// The stretched output is split so the first 32 bytes become the cipher
/// key and the last 16 bytes the IV. The secret salt comes from a second
/// stretch of the same imported passphrase under an independent seed and
/// half the iteration count.
pub fn derive_key_material(passphrase: &str, options: &DeriveOptions) -> Result<KeyMaterial> {
    if options.key_length_bytes < MIN_KEY_LENGTH_BYTES {
        return Err(SeekvaultError::InsufficientKeyLength {
            requested: options.key_length_bytes,
            minimum: MIN_KEY_LENGTH_BYTES,
        });
    }

    let context = DerivationContext::new(passphrase, options.algorithm);

    let salt = match &options.salt {
        Some(salt) => salt.clone(),
        None => generate_salt(),
    };
    let stretched = Zeroizing::new(context.stretch(
        &salt,
        options.iterations,
        options.key_length_bytes,
    ));

    let mut cipher_key = [0u8; CIPHER_KEY_LEN];
    cipher_key.copy_from_slice(&stretched[..CIPHER_KEY_LEN]);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&stretched[stretched.len() - IV_LEN..]);

    let seed = match &options.secret_salt_seed {
        Some(seed) => seed.clone(),
        None => generate_salt(),
    };
    let halved = NonZeroU32::new(options.iterations.get() / 2).unwrap_or(NonZeroU32::MIN);
    let stretched_salt = Zeroizing::new(context.stretch(&seed, halved, SECRET_SALT_LEN));
    let mut secret_salt = [0u8; SECRET_SALT_LEN];
    secret_salt.copy_from_slice(&stretched_salt);

    debug!(
        algorithm = options.algorithm.as_str(),
        iterations = options.iterations.get(),
        key_length_bytes = options.key_length_bytes,
        "derived key material"
    );

    Ok(KeyMaterial {
        cipher_key: SecretBytes::new(cipher_key),
        iv,
        secret_salt: SecretBytes::new(secret_salt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap iteration count so tests stay fast; the split logic is the same.
    fn test_options(salt: &[u8], seed: &[u8]) -> DeriveOptions {
        DeriveOptions {
            salt: Some(salt.to_vec()),
            secret_salt_seed: Some(seed.to_vec()),
            iterations: NonZeroU32::new(10).unwrap(),
            ..DeriveOptions::default()
        }
    }

    #[test]
    fn test_derivation_deterministic_with_fixed_salts() {
        let options = test_options(&[0x01; 64], &[0x02; 64]);
        let k1 = derive_key_material("correct horse battery staple", &options).unwrap();
        let k2 = derive_key_material("correct horse battery staple", &options).unwrap();
        assert_eq!(k1.cipher_key.as_bytes(), k2.cipher_key.as_bytes());
        assert_eq!(k1.iv, k2.iv);
        assert_eq!(k1.secret_salt.as_bytes(), k2.secret_salt.as_bytes());
    }

    #[test]
    fn test_derivation_randomized_without_salts() {
        let options = DeriveOptions {
            iterations: NonZeroU32::new(10).unwrap(),
            ..DeriveOptions::default()
        };
        let k1 = derive_key_material("passphrase", &options).unwrap();
        let k2 = derive_key_material("passphrase", &options).unwrap();
        assert_ne!(k1.cipher_key.as_bytes(), k2.cipher_key.as_bytes());
        assert_ne!(k1.iv, k2.iv);
        assert_ne!(k1.secret_salt.as_bytes(), k2.secret_salt.as_bytes());
    }

    #[test]
    fn test_different_passphrases_diverge() {
        let options = test_options(&[0x01; 64], &[0x02; 64]);
        let k1 = derive_key_material("passphrase one", &options).unwrap();
        let k2 = derive_key_material("passphrase two", &options).unwrap();
        assert_ne!(k1.cipher_key.as_bytes(), k2.cipher_key.as_bytes());
        assert_ne!(k1.secret_salt.as_bytes(), k2.secret_salt.as_bytes());
    }

    #[test]
    fn test_key_and_iv_come_from_opposite_ends() {
        // With key_length_bytes > 48 the middle bytes are discarded; the IV
        // must track the end of the stretched output, not byte 32.
        let mut options = test_options(&[0x03; 64], &[0x04; 64]);
        options.key_length_bytes = 64;
        let k64 = derive_key_material("passphrase", &options).unwrap();

        options.key_length_bytes = 48;
        let k48 = derive_key_material("passphrase", &options).unwrap();

        // Same prefix for the cipher key, different tail for the IV.
        assert_eq!(k64.cipher_key.as_bytes(), k48.cipher_key.as_bytes());
        assert_ne!(k64.iv, k48.iv);
    }

    #[test]
    fn test_secret_salt_independent_of_main_salt() {
        let o1 = test_options(&[0x01; 64], &[0x0A; 64]);
        let o2 = test_options(&[0x05; 64], &[0x0A; 64]);
        let k1 = derive_key_material("passphrase", &o1).unwrap();
        let k2 = derive_key_material("passphrase", &o2).unwrap();
        assert_ne!(k1.cipher_key.as_bytes(), k2.cipher_key.as_bytes());
        assert_eq!(k1.secret_salt.as_bytes(), k2.secret_salt.as_bytes());
    }

    #[test]
    fn test_short_key_length_rejected() {
        let options = DeriveOptions {
            key_length_bytes: 47,
            ..DeriveOptions::default()
        };
        let result = derive_key_material("passphrase", &options);
        assert!(matches!(
            result,
            Err(SeekvaultError::InsufficientKeyLength {
                requested: 47,
                minimum: MIN_KEY_LENGTH_BYTES,
            })
        ));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert_eq!("SHA1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert!(matches!(
            "MD5".parse::<HashAlgorithm>(),
            Err(SeekvaultError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_generate_salt_length_and_uniqueness() {
        let s1 = generate_salt();
        let s2 = generate_salt();
        assert_eq!(s1.len(), DEFAULT_SALT_LEN);
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_algorithm_changes_output() {
        let mut options = test_options(&[0x01; 64], &[0x02; 64]);
        let sha256 = derive_key_material("passphrase", &options).unwrap();
        options.algorithm = HashAlgorithm::Sha512;
        let sha512 = derive_key_material("passphrase", &options).unwrap();
        assert_ne!(sha256.cipher_key.as_bytes(), sha512.cipher_key.as_bytes());
    }
}
