//! Hex fragment decoding for `hex` lines

use hex::FromHexError;

/// Whitespace allowed between byte pairs
fn is_pair_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Decode the argument of a `hex` line into bytes.
///
/// Digits are case-insensitive. ASCII whitespace (vertical tab included)
/// may separate byte pairs, but each group between separators must hold
/// an even number of digits. Error positions are byte offsets into `arg`.
pub fn decode_hex_fragment(arg: &str) -> Result<Vec<u8>, FromHexError> {
    let mut bytes = Vec::with_capacity(arg.len() / 2);
    let mut rest = arg;
    let mut offset = 0;

    loop {
        let trimmed = rest.trim_start_matches(is_pair_separator);
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            break;
        }

        let end = trimmed.find(is_pair_separator).unwrap_or(trimmed.len());
        let decoded = hex::decode(&trimmed[..end]).map_err(|err| match err {
            FromHexError::InvalidHexCharacter { c, index } => FromHexError::InvalidHexCharacter {
                c,
                index: offset + index,
            },
            other => other,
        })?;
        bytes.extend(decoded);

        offset += end;
        rest = &trimmed[end..];
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode_hex_fragment("68656c6c6f").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(decode_hex_fragment("DeadBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_hex_fragment("").unwrap().is_empty());
        assert!(decode_hex_fragment("   ").unwrap().is_empty());
    }

    #[test]
    fn test_decode_whitespace_between_pairs() {
        assert_eq!(decode_hex_fragment("68 65\t6c").unwrap(), b"hel");
    }

    #[test]
    fn test_decode_vertical_tab_and_form_feed() {
        assert_eq!(decode_hex_fragment("68\x0b65").unwrap(), b"he");
        assert_eq!(decode_hex_fragment("\x0c68\r65\x0b").unwrap(), b"he");
    }

    #[test]
    fn test_invalid_character_position_spans_groups() {
        assert_eq!(
            decode_hex_fragment("00 0g"),
            Err(FromHexError::InvalidHexCharacter { c: 'g', index: 4 })
        );
        assert_eq!(
            decode_hex_fragment("  zz"),
            Err(FromHexError::InvalidHexCharacter { c: 'z', index: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert_eq!(decode_hex_fragment("abc"), Err(FromHexError::OddLength));
        // whitespace may not split a byte pair
        assert!(decode_hex_fragment("6 8").is_err());
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(matches!(
            decode_hex_fragment("zz"),
            Err(FromHexError::InvalidHexCharacter { c: 'z', index: 0 })
        ));
    }
}
