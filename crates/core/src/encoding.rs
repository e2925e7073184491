//! Text encodings for whole-content reads and writes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Encoding used to turn stored bytes into text and back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextEncoding {
    /// UTF-8 (the default)
    #[default]
    Utf8,
    /// 7-bit US-ASCII
    Ascii,
    /// ISO-8859-1, one byte per code point up to U+00FF
    Latin1,
}

impl TextEncoding {
    /// Canonical name of the encoding
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode raw bytes into a string
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| Error::Decode(format!("invalid utf-8: {e}"))),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(Error::Decode(format!(
                    "byte 0x{:02x} at position {pos} is not ascii",
                    bytes[pos]
                ))),
                // All bytes are ASCII, so every byte maps to one char.
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode a string into raw bytes
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => narrow(text, 0x7f, self),
            Self::Latin1 => narrow(text, 0xff, self),
        }
    }
}

fn narrow(text: &str, max: u32, encoding: TextEncoding) -> Result<Vec<u8>> {
    text.char_indices()
        .map(|(pos, c)| {
            let code = c as u32;
            if code <= max {
                Ok(code as u8)
            } else {
                Err(Error::Encode(format!(
                    "character {c:?} at position {pos} cannot be encoded as {}",
                    encoding.name()
                )))
            }
        })
        .collect()
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" | "u8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" | "646" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Ok(Self::Latin1),
            _ => Err(Error::Unsupported(format!("text encoding '{s}'"))),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TextEncoding> for String {
    fn from(value: TextEncoding) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("utf_8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("ascii".parse::<TextEncoding>().unwrap(), TextEncoding::Ascii);
        assert_eq!(
            "ISO-8859-1".parse::<TextEncoding>().unwrap(),
            TextEncoding::Latin1
        );
        assert_eq!(
            "latin_1".parse::<TextEncoding>().unwrap(),
            TextEncoding::Latin1
        );
    }

    #[test]
    fn test_parse_unknown_is_unsupported() {
        let err = "utf-32".parse::<TextEncoding>().unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_default_is_utf8() {
        assert_eq!(TextEncoding::default(), TextEncoding::Utf8);
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        let err = TextEncoding::Utf8.decode(&[0x68, 0xff, 0x69]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        let err = TextEncoding::Ascii.decode(b"caf\xe9").unwrap_err();
        assert!(err.to_string().contains("position 3"));
    }

    #[test]
    fn test_latin1_decodes_every_byte() {
        assert_eq!(TextEncoding::Latin1.decode(b"caf\xe9").unwrap(), "café");
        assert_eq!(TextEncoding::Latin1.encode("café").unwrap(), b"caf\xe9");
    }

    #[test]
    fn test_encode_unrepresentable() {
        assert!(matches!(
            TextEncoding::Ascii.encode("café"),
            Err(Error::Encode(_))
        ));
        assert!(matches!(
            TextEncoding::Latin1.encode("€"),
            Err(Error::Encode(_))
        ));
    }

    #[test]
    fn test_serde_uses_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            encoding: TextEncoding,
        }

        let parsed: Wrapper = toml::from_str(r#"encoding = "latin_1""#).unwrap();
        assert_eq!(parsed.encoding, TextEncoding::Latin1);
    }
}
