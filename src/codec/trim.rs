use crate::codec::{to_sentinel, Token};
use crate::error::CodecError;
use log::debug;

/// Strips leading and trailing rests in whole blocks of `subdivision` steps.
///
/// A run of rests shorter than one block is kept, so the trimmed sequence can
/// still start or end with up to `subdivision - 1` rests. A sequence with no
/// pitch at all trims to nothing.
pub fn trim_silence(tokens: &[Token], subdivision: u32) -> Result<&[Token], CodecError> {
    if subdivision == 0 {
        return Err(CodecError::InvalidResolution { subdivision });
    }
    let block = subdivision as usize;

    let (Some(first), Some(last)) = (
        tokens.iter().position(|t| !t.is_rest()),
        tokens.iter().rposition(|t| !t.is_rest()),
    ) else {
        return Ok(&[]);
    };

    let leading_remove = (first / block) * block;
    let trailing_remove = ((tokens.len() - last - 1) / block) * block;

    debug!(
        "Trimming {} leading and {} trailing rests from {} tokens",
        leading_remove,
        trailing_remove,
        tokens.len()
    );
    Ok(&tokens[leading_remove..tokens.len() - trailing_remove])
}

/// Trims block-aligned silence and maps the remaining rests to the sentinel
pub fn trim_and_encode(tokens: &[Token], subdivision: u32) -> Result<Vec<i32>, CodecError> {
    Ok(to_sentinel(trim_silence(tokens, subdivision)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::{Pitch, Rest};

    #[test]
    fn test_partial_blocks_are_kept() {
        let tokens = [
            Rest, Rest, Rest, Rest, Rest, Pitch(60), Rest, Pitch(62), Rest, Rest, Rest,
        ];
        assert_eq!(
            trim_silence(&tokens, 4).unwrap(),
            &[Rest, Pitch(60), Rest, Pitch(62), Rest, Rest, Rest]
        );
        assert_eq!(
            trim_and_encode(&tokens, 4).unwrap(),
            vec![-1, 60, -1, 62, -1, -1, -1]
        );
    }

    #[test]
    fn test_aligned_runs_are_removed_exactly() {
        let tokens = [Rest, Rest, Pitch(60), Rest, Pitch(60), Rest, Rest, Rest, Rest];
        assert_eq!(
            trim_silence(&tokens, 2).unwrap(),
            &[Pitch(60), Rest, Pitch(60)]
        );
    }

    #[test]
    fn test_subdivision_one_removes_all_edge_rests() {
        let tokens = [Rest, Pitch(60), Rest, Pitch(61), Rest];
        assert_eq!(
            trim_silence(&tokens, 1).unwrap(),
            &[Pitch(60), Rest, Pitch(61)]
        );
    }

    #[test]
    fn test_no_silence_is_untouched() {
        let tokens = [Pitch(60), Rest, Pitch(61)];
        assert_eq!(trim_silence(&tokens, 4).unwrap(), &tokens);
    }

    #[test]
    fn test_all_rest_trims_to_empty() {
        assert!(trim_silence(&[Rest; 9], 4).unwrap().is_empty());
        assert!(trim_and_encode(&[], 4).unwrap().is_empty());
    }

    #[test]
    fn test_zero_subdivision() {
        assert_eq!(
            trim_silence(&[Pitch(60)], 0),
            Err(CodecError::InvalidResolution { subdivision: 0 })
        );
    }
}
