//! Character code constants used by the scanner.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const TAB: char = '\t';
pub const SPACE: char = ' ';
pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const INVERTED_EXCLAMATION: char = '¡';
pub const MAX_ASCII_CHARACTER: u32 = 0x7F;

/// Control codes that are skipped without producing a token.
#[inline]
pub fn is_ignored_control(ch: char) -> bool {
    matches!(ch, CARRIAGE_RETURN | LINE_FEED | TAB)
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_non_ascii(ch: char) -> bool {
    ch as u32 > MAX_ASCII_CHARACTER
}

/// Identifier characters are letters that have a case distinction, plus any
/// non-ASCII character other than the `¡` terminator. Digits, `_` and `$`
/// are not identifier characters.
#[inline]
pub fn is_identifier_char(ch: char) -> bool {
    if ch == INVERTED_EXCLAMATION {
        return false;
    }
    is_non_ascii(ch) || ch.is_lowercase() || ch.is_uppercase()
}

/// Whether a non-ASCII identifier character is outside the Unicode
/// identifier set and should be reported.
#[inline]
pub fn is_non_standard_identifier_char(ch: char) -> bool {
    is_non_ascii(ch) && !unicode_xid::UnicodeXID::is_xid_continue(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_chars() {
        assert!(is_identifier_char('a'));
        assert!(is_identifier_char('Z'));
        assert!(is_identifier_char('é'));
        assert!(is_identifier_char('→'));
        assert!(!is_identifier_char('_'));
        assert!(!is_identifier_char('7'));
        assert!(!is_identifier_char('$'));
        assert!(!is_identifier_char('¡'));
    }

    #[test]
    fn test_non_standard_chars() {
        assert!(!is_non_standard_identifier_char('é'));
        assert!(is_non_standard_identifier_char('→'));
        assert!(!is_non_standard_identifier_char('x'));
    }
}
