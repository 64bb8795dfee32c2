use crate::error::CodecError;
use std::fmt;

/// Numeric stand-in for a rest at the model boundary
pub const REST_SENTINEL: i32 = -1;

/// Highest pitch a token can carry
pub const MAX_PITCH: u8 = 127;

/// One grid step: either a sounding pitch or silence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Rest,
    Pitch(u8),
}

impl Token {
    pub fn is_rest(self) -> bool {
        self == Token::Rest
    }

    pub fn pitch(self) -> Option<u8> {
        match self {
            Token::Pitch(p) => Some(p),
            Token::Rest => None,
        }
    }

    pub fn to_sentinel(self) -> i32 {
        match self {
            Token::Pitch(p) => i32::from(p),
            Token::Rest => REST_SENTINEL,
        }
    }

    /// Inverse of [`Token::to_sentinel`]. Values outside `0..=127` other than
    /// the sentinel have no token.
    pub fn from_sentinel(value: i32) -> Option<Token> {
        match value {
            REST_SENTINEL => Some(Token::Rest),
            v => u8::try_from(v)
                .ok()
                .filter(|p| *p <= MAX_PITCH)
                .map(Token::Pitch),
        }
    }
}

impl From<Option<u8>> for Token {
    fn from(pitch: Option<u8>) -> Self {
        pitch.map_or(Token::Rest, Token::Pitch)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Pitch(p) => write!(f, "{}", p),
            Token::Rest => write!(f, "-"),
        }
    }
}

/// Maps every rest to [`REST_SENTINEL`]; pitches pass through
pub fn to_sentinel(tokens: &[Token]) -> Vec<i32> {
    tokens.iter().map(|t| t.to_sentinel()).collect()
}

/// Maps every sentinel back to a rest. Trimmed silence is not restored.
pub fn from_sentinel(values: &[i32]) -> Result<Vec<Token>, CodecError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            Token::from_sentinel(value).ok_or(CodecError::InvalidToken { index, value })
        })
        .collect()
}
