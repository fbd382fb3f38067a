//! Index-based symmetric searchable encryption.
//!
//! Derives multi-purpose key material from a passphrase, encrypts document
//! payloads with AES-256-CBC, and builds an inverted index of salt-keyed
//! keyword digests (trapdoors) so documents can be searched by keyword
//! without revealing keyword plaintext to whoever holds the index.
//!
//! ```
//! use seekvault::crypto::cipher;
//! use seekvault::crypto::kdf::{derive_key_material, DeriveOptions};
//! use seekvault::index::{build_index, trapdoor, Document};
//!
//! # fn main() -> seekvault::error::Result<()> {
//! let options = DeriveOptions {
//!     salt: Some(vec![0x01; 64]),
//!     secret_salt_seed: Some(vec![0x02; 64]),
//!     ..DeriveOptions::default()
//! };
//! let key_material = derive_key_material("a strong passphrase", &options)?;
//!
//! let ciphertext = cipher::encrypt("quarterly budget report", &key_material)?;
//!
//! let documents = [Document::<()>::text("doc-1", "quarterly budget report")];
//! let index = build_index(&documents, &key_material, None)?;
//! let hits = index.get(&trapdoor("budget", &key_material));
//! assert_eq!(hits.unwrap(), ["doc-1"]);
//!
//! let plaintext = cipher::decrypt(&ciphertext, &key_material)?;
//! assert_eq!(plaintext, "quarterly budget report");
//! # Ok(())
//! # }
//! ```
//!
//! Persistence of the index and ciphertexts, transport, and keyword
//! extraction beyond whitespace tokenization are the caller's business.
//! Trapdoors are comparable; that equality is what makes the index
//! searchable and is also its leakage surface. Access-pattern and
//! search-pattern analysis are out of scope.

pub mod crypto;
pub mod encoding;
pub mod error;
pub mod index;

pub use crypto::cipher::{decrypt, encrypt};
pub use crypto::kdf::{derive_key_material, DeriveOptions, HashAlgorithm, KeyMaterial};
pub use encoding::Encoding;
pub use error::{Result, SeekvaultError};
pub use index::{build_index, trapdoor, Document, DocumentData, IndexTable, Trapdoor};
