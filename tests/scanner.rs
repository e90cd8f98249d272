#[cfg(test)]
mod scanner_tests {
    use rox as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_token_sequence(
            "var orchid = nil; fun _f1() { return orchid or true; }",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "_f1"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::TRUE, "true"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_literals_carry_values() {
        let (tokens, errors) = Scanner::new("12.5 \"hi there\" 7").scan_all();

        assert!(errors.is_empty());
        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 12.5));
        assert!(matches!(&tokens[1].token_type, TokenType::STRING(s) if s == "hi there"));
        assert_eq!(tokens[1].lexeme, "\"hi there\"");
        assert!(matches!(tokens[2].token_type, TokenType::NUMBER(n) if n == 7.0));
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let (tokens, errors) =
            Scanner::new("a // ignored ( ) \"\nb\n\"multi\nline\"\nc").scan_all();

        assert!(errors.is_empty());
        let lines: Vec<(usize, &str)> = tokens.iter().map(|t| (t.line, t.lexeme)).collect();
        assert_eq!(
            lines,
            vec![
                (1, "a"),
                (2, "b"),
                (4, "\"multi\nline\""),
                (5, "c"),
                (5, ""),
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_unterminated_string_reports_and_keeps_scanning() {
        let mut scanner = Scanner::new("@ print \"open");
        let results: Vec<_> = (&mut scanner).collect();

        assert!(scanner.had_error());

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: @".to_string(),
                "[line 1] Error: Unterminated string.".to_string(),
            ]
        );

        let kinds: Vec<&str> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|t| t.token_type.name())
            .collect();
        assert_eq!(kinds, vec!["PRINT", "EOF"]);
    }

    #[test]
    fn test_lexemes_and_skipped_text_rebuild_source() {
        let source = "var x = 1.5; // note\n  print x+\"y\";\t\n";
        let (tokens, errors) = Scanner::new(source).scan_all();
        assert!(errors.is_empty());

        // Every lexeme is a slice of the source, in order, without overlap.
        let base = source.as_ptr() as usize;
        let mut cursor = 0;
        for token in tokens.iter().filter(|t| t.token_type != TokenType::EOF) {
            let offset = token.lexeme.as_ptr() as usize - base;
            assert!(offset >= cursor);
            assert!(source[cursor..offset]
                .chars()
                .all(|c| c.is_whitespace() || source[cursor..offset].contains("//")));
            cursor = offset + token.lexeme.len();
        }
        assert!(source[cursor..].trim().is_empty());
    }
}
