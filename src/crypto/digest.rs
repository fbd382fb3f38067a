/// Salted hashing, the primitive behind trapdoor generation.
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::crypto::kdf::HashAlgorithm;
use crate::encoding::{self, Encoding};
use crate::error::Result;

/// Salt applied when the caller does not supply one.
pub const DEFAULT_SALT: &[u8] = b"DEFAULT-SALT";

/// Configuration for [`digest`].
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub algorithm: HashAlgorithm,
    pub salt: Vec<u8>,
    pub encoding: Encoding,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            salt: DEFAULT_SALT.to_vec(),
            encoding: Encoding::Hex,
        }
    }
}

/// Hash `data || salt`, returning text in the configured encoding.
///
/// The concatenation order is fixed: data first, salt second. Trapdoors in
/// any previously built index were computed in this order, so swapping it
/// silently breaks lookups.
pub fn digest(data: &[u8], options: &DigestOptions) -> Result<String> {
    let raw = digest_raw(data, options.algorithm, &options.salt);
    encoding::encode(&raw, options.encoding)
}

/// Hash `data || salt`, returning the raw digest bytes.
pub fn digest_raw(data: &[u8], algorithm: HashAlgorithm, salt: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(data);
            hasher.update(salt);
            hasher.finalize().to_vec()
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(data);
            hasher.update(salt);
            hasher.finalize().to_vec()
        }
        HashAlgorithm::Sha384 => {
            let mut hasher = Sha384::new();
            hasher.update(data);
            hasher.update(salt);
            hasher.finalize().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            hasher.update(data);
            hasher.update(salt);
            hasher.finalize().to_vec()
        }
    }
}
