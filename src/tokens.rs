//! Token files exchanged with a generative model.
//!
//! `encode` writes a [`TokenFile`] with its resolution attached. A model
//! usually emits nothing but the integer sequence, so reading also accepts a
//! bare JSON array.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFile {
    pub ticks_per_beat: u32,
    pub subdivision: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Sentinel-coded tokens: pitches, with -1 for rests
    pub tokens: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenDocument {
    File(TokenFile),
    Bare(Vec<i32>),
}

/// A token sequence read from disk, with its resolution when the file had one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTokens {
    pub tokens: Vec<i32>,
    pub resolution: Option<(u32, u32)>,
}

impl TokenFile {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

pub fn load_tokens(path: impl AsRef<Path>) -> Result<LoadedTokens> {
    let data = fs::read_to_string(path.as_ref())?;
    parse_tokens(&data)
}

pub fn parse_tokens(data: &str) -> Result<LoadedTokens> {
    let loaded = match serde_json::from_str::<TokenDocument>(data)? {
        TokenDocument::File(file) => LoadedTokens {
            tokens: file.tokens,
            resolution: Some((file.ticks_per_beat, file.subdivision)),
        },
        TokenDocument::Bare(tokens) => LoadedTokens {
            tokens,
            resolution: None,
        },
    };
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let loaded = parse_tokens("[-1, -1, 57, 57, 62, 62]").unwrap();
        assert_eq!(loaded.tokens, vec![-1, -1, 57, 57, 62, 62]);
        assert_eq!(loaded.resolution, None);
    }

    #[test]
    fn test_parse_token_file() {
        let loaded =
            parse_tokens(r#"{"ticks_per_beat": 480, "subdivision": 6, "tokens": [60, -1]}"#).unwrap();
        assert_eq!(loaded.tokens, vec![60, -1]);
        assert_eq!(loaded.resolution, Some((480, 6)));
    }

    #[test]
    fn test_serialized_form_omits_missing_key() {
        let file = TokenFile {
            ticks_per_beat: 96,
            subdivision: 4,
            key: None,
            tokens: vec![-1, 60],
        };
        assert_eq!(
            serde_json::to_string(&file).unwrap(),
            r#"{"ticks_per_beat":96,"subdivision":4,"tokens":[-1,60]}"#
        );
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_tokens(r#"{"tokens": "sixty"}"#).is_err());
    }
}
