//! Scanner integration tests.
//!
//! Verifies token categories, longest-match operator handling and the
//! treatment of whitespace, line breaks and comments.

use berd_ast::{Token, TokenKind};
use berd_diagnostics::DiagnosticCategory;
use berd_scanner::{tokenize, ScanError, Scanner};

/// Helper: scan all tokens, failing the test on a fatal error.
fn scan_all(source: &str) -> Vec<Token> {
    tokenize(source).unwrap_or_else(|err| panic!("tokenize failed: {err}"))
}

/// Helper: scan all token kinds, including the trailing end-of-input.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|token| token.kind).collect()
}

/// Helper: (kind, value) pairs without the trailing end-of-input.
fn scan_pairs(source: &str) -> Vec<(TokenKind, String)> {
    let mut tokens = scan_all(source);
    assert_eq!(tokens.pop().map(|t| t.kind), Some(TokenKind::EndOfFile));
    tokens.into_iter().map(|t| (t.kind, t.value)).collect()
}

#[test]
fn test_empty_source() {
    let tokens = scan_all("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
    assert_eq!(tokens[0].value, "EOF");
}

#[test]
fn test_grouping_chars_one_token_each() {
    let source = "([{}])(}{";
    let kinds = scan_kinds(source);
    assert_eq!(kinds.len(), source.len() + 1);
    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenParen,
            TokenKind::OpenBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::CloseBracket,
            TokenKind::CloseParen,
            TokenKind::OpenParen,
            TokenKind::CloseCurly,
            TokenKind::OpenCurly,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_relational_longest_match() {
    let cases = [
        ("<", TokenKind::Smaller),
        ("<=", TokenKind::SmallerEq),
        ("<<", TokenKind::BitShiftLeft),
        ("<<<", TokenKind::BitShiftUnsignedLeft),
        (">", TokenKind::Greater),
        (">=", TokenKind::GreaterEq),
        (">>", TokenKind::BitShiftRight),
        (">>>", TokenKind::BitShiftUnsignedRight),
    ];
    for (source, kind) in cases {
        assert_eq!(scan_pairs(source), vec![(kind, source.to_string())], "{source}");
    }
}

#[test]
fn test_equality_tiers() {
    let cases = [
        ("=", TokenKind::EqualSign),
        ("==", TokenKind::Equals),
        ("===", TokenKind::StrongEq),
        ("====", TokenKind::StrongestEq),
        (";=", TokenKind::NotEq),
        (";==", TokenKind::StrongNotEq),
        (";===", TokenKind::StrongestNotEq),
    ];
    for (source, kind) in cases {
        assert_eq!(scan_pairs(source), vec![(kind, source.to_string())], "{source}");
    }
}

#[test]
fn test_double_asterisk_is_xor() {
    assert_eq!(
        scan_kinds("1**2"),
        vec![TokenKind::Number, TokenKind::BitwiseXor, TokenKind::Number, TokenKind::EndOfFile]
    );
    assert_eq!(scan_pairs("^"), vec![(TokenKind::Exponent, "^".to_string())]);
}

#[test]
fn test_arrow_before_equal_sign() {
    assert_eq!(scan_pairs("=>"), vec![(TokenKind::Arrow, "=>".to_string())]);
    assert_eq!(
        scan_kinds("==>"),
        vec![TokenKind::Equals, TokenKind::Greater, TokenKind::EndOfFile]
    );
}

#[test]
fn test_combined_assignment() {
    let cases = [
        ("+=", TokenKind::Add),
        ("-=", TokenKind::Subtract),
        ("*=", TokenKind::Multiply),
        ("/=", TokenKind::Divide),
        ("%=", TokenKind::Modulo),
        ("^=", TokenKind::Exponent),
        ("&&=", TokenKind::LogicalAnd),
        ("||=", TokenKind::LogicalOr),
        ("&=", TokenKind::BitwiseAnd),
        ("|=", TokenKind::BitwiseOr),
        ("**=", TokenKind::BitwiseXor),
        ("<<=", TokenKind::BitShiftLeft),
        (">>=", TokenKind::BitShiftRight),
        ("<<<=", TokenKind::BitShiftUnsignedLeft),
        (">>>=", TokenKind::BitShiftUnsignedRight),
    ];
    for (source, operation) in cases {
        let tokens = scan_all(source);
        assert_eq!(tokens.len(), 2, "{source}");
        assert_eq!(tokens[0].kind, TokenKind::CombinedAssignment, "{source}");
        assert_eq!(tokens[0].operation, Some(operation), "{source}");
        assert_eq!(tokens[0].value, source);
    }
}

#[test]
fn test_combined_assignment_needs_adjacent_equal_sign() {
    assert_eq!(
        scan_kinds("+ ="),
        vec![TokenKind::Add, TokenKind::WhiteSpace, TokenKind::EqualSign, TokenKind::EndOfFile]
    );
    // Comparisons never combine.
    assert_eq!(scan_kinds("<="), vec![TokenKind::SmallerEq, TokenKind::EndOfFile]);
}

#[test]
fn test_state_operators_share_a_category() {
    assert_eq!(
        scan_pairs("++x--"),
        vec![
            (TokenKind::PlusPlus, "++".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::PlusPlus, "--".to_string()),
        ]
    );
}

#[test]
fn test_prefix_operators() {
    assert_eq!(
        scan_kinds(";~-"),
        vec![TokenKind::LogicalNot, TokenKind::BitwiseNot, TokenKind::Subtract, TokenKind::EndOfFile]
    );
}

#[test]
fn test_terminators() {
    assert_eq!(
        scan_kinds("!?¡"),
        vec![
            TokenKind::Exclamation,
            TokenKind::Question,
            TokenKind::InvertedExclamation,
            TokenKind::EndOfFile
        ]
    );
}

#[test]
fn test_numbers_are_digit_runs() {
    assert_eq!(
        scan_pairs("123.45"),
        vec![
            (TokenKind::Number, "123".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Number, "45".to_string()),
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(scan_pairs(r#""hello""#), vec![(TokenKind::String, "hello".to_string())]);
    assert_eq!(scan_pairs("'it\"s'"), vec![(TokenKind::String, "it\"s".to_string())]);
    assert_eq!(scan_pairs(r#""a\n""#), vec![(TokenKind::String, r"a\n".to_string())]);
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let mut scanner = Scanner::new("'abc !");
    let tokens = scanner.tokenize().unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "abc !");
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].code, 1002);
}

#[test]
fn test_whitespace_run_is_one_token() {
    assert_eq!(
        scan_pairs("a    b"),
        vec![
            (TokenKind::Identifier, "a".to_string()),
            (TokenKind::WhiteSpace, "4".to_string()),
            (TokenKind::Identifier, "b".to_string()),
        ]
    );
}

#[test]
fn test_line_breaks() {
    // CR and CRLF produce one line break; LF and TAB alone are skipped.
    assert_eq!(
        scan_kinds("a\r\nb\rc\nd\te"),
        vec![
            TokenKind::Identifier,
            TokenKind::LineBreak,
            TokenKind::Identifier,
            TokenKind::LineBreak,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_lines_are_tracked() {
    let tokens = scan_all("a\r\nb\nc");
    let lines: Vec<u32> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.line)
        .collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_comments() {
    assert_eq!(
        scan_pairs("// note\nx /* a\r\nb */ y"),
        vec![
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::WhiteSpace, "1".to_string()),
            (TokenKind::WhiteSpace, "1".to_string()),
            (TokenKind::Identifier, "y".to_string()),
        ]
    );
    let tokens = scan_all("// c\r\n/* \n */x");
    assert_eq!(tokens[0].line, 3);
}

#[test]
fn test_unterminated_block_comment_warns() {
    let mut scanner = Scanner::new("x /* never closed");
    let tokens = scanner.tokenize().unwrap();
    assert_eq!(tokens.len(), 3);
    let diagnostics = scanner.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.diagnostics()[0].category, DiagnosticCategory::Warning);
}

#[test]
fn test_identifiers_are_letter_runs() {
    assert_eq!(
        scan_pairs("const x1"),
        vec![
            (TokenKind::Identifier, "const".to_string()),
            (TokenKind::WhiteSpace, "1".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::Number, "1".to_string()),
        ]
    );
}

#[test]
fn test_non_ascii_identifiers() {
    let mut scanner = Scanner::new("café→");
    let tokens = scanner.tokenize().unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "café→");
    // `é` is a standard identifier character, `→` is not.
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1129);
}

#[test]
fn test_keywords_are_plain_identifiers() {
    for word in ["const", "var", "function", "async", "if", "when", "previous"] {
        assert_eq!(scan_pairs(word), vec![(TokenKind::Identifier, word.to_string())]);
    }
}

#[test]
fn test_unrecognized_character_is_fatal() {
    let err = tokenize("x = 1 _").unwrap_err();
    assert_eq!(
        err,
        ScanError::UnrecognizedCharacter {
            character: '_',
            code: 95,
            offset: 6,
            line: 1,
        }
    );
    assert_eq!(err.span().start, 6);
    assert_eq!(err.to_diagnostic().code, 1127);
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = scan_all("¡ab");
    assert_eq!(tokens[0].span.start, 0);
    assert_eq!(tokens[0].span.length, 2);
    assert_eq!(tokens[1].span.start, 2);
    assert_eq!(tokens[1].span.length, 2);
}

#[test]
fn test_statement() {
    assert_eq!(
        scan_kinds("const const x = 5!"),
        vec![
            TokenKind::Identifier,
            TokenKind::WhiteSpace,
            TokenKind::Identifier,
            TokenKind::WhiteSpace,
            TokenKind::Identifier,
            TokenKind::WhiteSpace,
            TokenKind::EqualSign,
            TokenKind::WhiteSpace,
            TokenKind::Number,
            TokenKind::Exclamation,
            TokenKind::EndOfFile,
        ]
    );
}
