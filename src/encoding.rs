/// Textual encodings for byte sequences crossing the API boundary.
///
/// Ciphertexts, digests, and salts are handed to callers as text; these are
/// the only serialization surfaces the core defines.
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, SeekvaultError};

/// Supported textual encodings. Hex is the default everywhere a digest or
/// ciphertext becomes caller-visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
    Utf8,
    Ascii,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
        }
    }
}

impl FromStr for Encoding {
    type Err = SeekvaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            _ => Err(SeekvaultError::InvalidEncoding(format!(
                "Unknown encoding name: {s}"
            ))),
        }
    }
}

/// Encode raw bytes as text under the given encoding.
///
/// Hex and Base64 accept any byte sequence. Utf8 and Ascii fail with
/// `InvalidEncoding` when the bytes are not representable.
pub fn encode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Hex => Ok(hex::encode(bytes)),
        Encoding::Base64 => Ok(STANDARD.encode(bytes)),
        Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
            SeekvaultError::InvalidEncoding(format!("Bytes are not valid UTF-8: {e}"))
        }),
        Encoding::Ascii => {
            if bytes.is_ascii() {
                Ok(bytes.iter().map(|&b| b as char).collect())
            } else {
                Err(SeekvaultError::InvalidEncoding(
                    "Bytes are not valid ASCII".to_string(),
                ))
            }
        }
    }
}

/// Decode text back into raw bytes under the given encoding.
pub fn decode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Hex => hex::decode(text)
            .map_err(|e| SeekvaultError::InvalidEncoding(format!("Invalid hex: {e}"))),
        Encoding::Base64 => STANDARD
            .decode(text)
            .map_err(|e| SeekvaultError::InvalidEncoding(format!("Invalid base64: {e}"))),
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Ascii => {
            if text.is_ascii() {
                Ok(text.as_bytes().to_vec())
            } else {
                Err(SeekvaultError::InvalidEncoding(
                    "Text is not valid ASCII".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let bytes = [0x00, 0x01, 0xAB, 0xFF];
        let text = encode(&bytes, Encoding::Hex).unwrap();
        assert_eq!(text, "0001abff");
        assert_eq!(decode(&text, Encoding::Hex).unwrap(), bytes);
    }

    #[test]
    fn test_base64_roundtrip() {
        let bytes = b"any carnal pleasure";
        let text = encode(bytes, Encoding::Base64).unwrap();
        assert_eq!(decode(&text, Encoding::Base64).unwrap(), bytes);
    }

    #[test]
    fn test_utf8_roundtrip() {
        let text = encode("héllo".as_bytes(), Encoding::Utf8).unwrap();
        assert_eq!(text, "héllo");
        assert_eq!(decode(&text, Encoding::Utf8).unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_utf8_encode_rejects_invalid_bytes() {
        let result = encode(&[0xFF, 0xFE], Encoding::Utf8);
        assert!(matches!(result, Err(SeekvaultError::InvalidEncoding(_))));
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        assert!(encode(&[0x80], Encoding::Ascii).is_err());
        assert!(decode("héllo", Encoding::Ascii).is_err());
        assert_eq!(decode("hello", Encoding::Ascii).unwrap(), b"hello");
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(matches!(
            decode("zz", Encoding::Hex),
            Err(SeekvaultError::InvalidEncoding(_))
        ));
        assert!(decode("abc", Encoding::Hex).is_err()); // odd length
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            decode("not!!base64", Encoding::Base64),
            Err(SeekvaultError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("hex".parse::<Encoding>().unwrap(), Encoding::Hex);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("Base64".parse::<Encoding>().unwrap(), Encoding::Base64);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
