/// Trapdoor generation and inverted-index construction.
///
/// Each document's keywords are hashed with the secret salt into trapdoors;
/// the index maps each trapdoor to the pointers of the documents containing
/// that keyword. Running the same hash over a query string reproduces the
/// trapdoor, so the index holder can match queries to documents without
/// ever seeing keyword plaintext.
use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::crypto::digest;
use crate::crypto::kdf::{HashAlgorithm, KeyMaterial};
use crate::error::{Result, SeekvaultError};

/// Payload of one document.
///
/// The variant decides keyword extraction: `Text` falls back to whitespace
/// tokenization when no extractor is supplied; `Binary` and `Custom`
/// require a caller-provided extractor.
pub enum DocumentData<T = ()> {
    Text(String),
    Binary(Vec<u8>),
    Custom(T),
}

/// A document handed to the index builder. The payload itself is never
/// stored in the index, only the pointer.
pub struct Document<T = ()> {
    /// Opaque unique identifier resolved by the caller after a query.
    pub pointer: String,
    pub data: DocumentData<T>,
}

impl<T> Document<T> {
    pub fn text(pointer: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            data: DocumentData::Text(body.into()),
        }
    }

    pub fn binary(pointer: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            pointer: pointer.into(),
            data: DocumentData::Binary(bytes),
        }
    }

    pub fn custom(pointer: impl Into<String>, value: T) -> Self {
        Self {
            pointer: pointer.into(),
            data: DocumentData::Custom(value),
        }
    }
}

/// Salt-keyed digest of a keyword, in hex. Comparable but irreversible
/// without the secret salt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trapdoor(String);

impl Trapdoor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Trapdoor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied keyword extraction. Must be pure and deterministic for
/// index rebuilds to be reproducible; duplicates it returns are dropped.
pub type KeywordExtractor<T> = dyn Fn(&DocumentData<T>) -> Vec<String>;

/// Inverted index from trapdoors to document pointers.
///
/// Entry order is the order trapdoors were first seen; pointer order within
/// an entry is document-processing order. Built fresh per collection; there
/// is no incremental update, rebuild when the collection changes.
#[derive(Default)]
pub struct IndexTable {
    entries: Vec<(Trapdoor, Vec<String>)>,
    positions: HashMap<Trapdoor, usize>,
}

impl IndexTable {
    fn insert(&mut self, trapdoor: Trapdoor, pointer: &str) {
        match self.positions.get(&trapdoor) {
            Some(&i) => self.entries[i].1.push(pointer.to_string()),
            None => {
                self.positions.insert(trapdoor.clone(), self.entries.len());
                self.entries.push((trapdoor, vec![pointer.to_string()]));
            }
        }
    }

    /// Pointers of all documents whose keyword set produced this trapdoor.
    pub fn get(&self, trapdoor: &Trapdoor) -> Option<&[String]> {
        self.positions
            .get(trapdoor)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains(&self, trapdoor: &Trapdoor) -> bool {
        self.positions.contains_key(trapdoor)
    }

    /// Number of distinct trapdoors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen trapdoor order.
    pub fn iter(&self) -> impl Iterator<Item = (&Trapdoor, &[String])> {
        self.entries
            .iter()
            .map(|(trapdoor, pointers)| (trapdoor, pointers.as_slice()))
    }
}

/// Compute the trapdoor for a query keyword under this key material.
///
/// Identical (query, secret salt) pairs always produce identical trapdoors;
/// that equality is what makes the index searchable.
pub fn trapdoor(query: &str, key_material: &KeyMaterial) -> Trapdoor {
    let raw = digest::digest_raw(
        query.as_bytes(),
        HashAlgorithm::default(),
        key_material.secret_salt.as_bytes(),
    );
    Trapdoor(hex::encode(raw))
}

/// Build an inverted index over a document collection.
///
/// With no extractor, `Text` documents are whitespace-tokenized and
/// de-duplicated; `Binary` and `Custom` documents fail with
/// `MissingKeywordExtractor`. Documents are processed sequentially so that
/// pointer lists preserve collection order.
pub fn build_index<T>(
    documents: &[Document<T>],
    key_material: &KeyMaterial,
    extractor: Option<&KeywordExtractor<T>>,
) -> Result<IndexTable> {
    let mut table = IndexTable::default();
    for document in documents {
        let keywords = match extractor {
            Some(extract) => dedup(extract(&document.data)),
            None => match &document.data {
                DocumentData::Text(body) => tokenize(body),
                _ => return Err(SeekvaultError::MissingKeywordExtractor),
            },
        };
        for keyword in &keywords {
            table.insert(trapdoor(keyword, key_material), &document.pointer);
        }
    }
    debug!(
        documents = documents.len(),
        trapdoors = table.len(),
        "built searchable index"
    );
    Ok(table)
}

/// Default extractor: whitespace tokens, first occurrence kept.
fn tokenize(text: &str) -> Vec<String> {
    dedup(text.split_whitespace().map(str::to_string).collect())
}

fn dedup(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}
