use php2js::lexer::Lexer;
use php2js::{Token, TokenKind};

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().expect("lexing failed")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

fn lex_err(source: &str) -> String {
    Lexer::new(source)
        .tokenize()
        .expect_err("lexing should fail")
        .to_string()
}

#[test]
fn test_every_character_lands_in_a_token() {
    let sources = [
        "<?php $a = 'x';\n// note\nforeach ($xs as $x) {}\n?>\nleft",
        "<?php $m->f(1.5, .5) ?? $n[0b10]; # t\n",
        "<?= $x ?>  <?php $y; ?>",
    ];
    for source in sources {
        let joined: String = lex(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, source, "lost characters in {:?}", source);
    }
}

#[test]
fn test_open_tag_owns_one_whitespace_character() {
    let tokens = lex("<?php  $a");
    assert_eq!(tokens[0].kind, TokenKind::OpenTag);
    assert_eq!(tokens[0].text, "<?php ");
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].text, " ");
}

#[test]
fn test_open_tag_owns_a_crlf_pair() {
    let tokens = lex("<?php\r\n$a");
    assert_eq!(tokens[0].text, "<?php\r\n");
    assert_eq!(tokens[1].kind, TokenKind::Variable);
}

#[test]
fn test_close_tag_owns_one_newline() {
    let tokens = lex("<?php $a; ?>\nx");
    let close = tokens
        .iter()
        .find(|t| t.kind == TokenKind::CloseTag)
        .expect("no close tag");
    assert_eq!(close.text, "?>\n");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_short_open_tag_owns_nothing() {
    let tokens = lex("<?= $x");
    assert_eq!(tokens[0].kind, TokenKind::OpenTagWithEcho);
    assert_eq!(tokens[0].text, "<?=");
    assert_eq!(tokens[1].text, " ");
}

#[test]
fn test_variables_and_bare_sigil() {
    assert_eq!(
        kinds("<?php $x $ y"),
        vec![
            TokenKind::OpenTag,
            TokenKind::Variable,
            TokenKind::Whitespace,
            TokenKind::Dollar,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        kinds("<?php FOREACH As ECHO Die"),
        vec![
            TokenKind::OpenTag,
            TokenKind::Foreach,
            TokenKind::Whitespace,
            TokenKind::As,
            TokenKind::Whitespace,
            TokenKind::Echo,
            TokenKind::Whitespace,
            TokenKind::Exit,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_untranslated_words_stay_identifiers() {
    assert_eq!(
        kinds("<?php function if return true null"),
        vec![
            TokenKind::OpenTag,
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_magic_constants() {
    let tokens = lex("<?php __LINE__ __dir__ __halt_compiler");
    assert_eq!(tokens[1].kind, TokenKind::MagicConstant);
    assert_eq!(tokens[3].kind, TokenKind::MagicConstant);
    assert_eq!(tokens[5].kind, TokenKind::HaltCompiler);
}

#[test]
fn test_casts_are_single_tokens() {
    let tokens = lex("<?php (int) ( BOOL )(unset)");
    assert_eq!(tokens[1].kind, TokenKind::IntCast);
    assert_eq!(tokens[1].text, "(int)");
    assert_eq!(tokens[3].kind, TokenKind::BoolCast);
    assert_eq!(tokens[3].text, "( BOOL )");
    assert_eq!(tokens[4].kind, TokenKind::UnsetCast);
    assert_eq!(tokens[4].text, "(unset)");
}

#[test]
fn test_non_cast_parenthesis_falls_back() {
    assert_eq!(
        kinds("<?php (foo)"),
        vec![
            TokenKind::OpenTag,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_line_comment_owns_its_newline() {
    let tokens = lex("<?php // a\n$x");
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].text, "// a\n");
    assert_eq!(tokens[2].kind, TokenKind::Variable);

    let tokens = lex("<?php # b\n");
    assert_eq!(tokens[1].text, "# b\n");
}

#[test]
fn test_line_comment_stops_before_close_tag() {
    let tokens = lex("<?php // a ?>");
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].text, "// a ");
    assert_eq!(tokens[2].kind, TokenKind::CloseTag);
}

#[test]
fn test_block_and_doc_comments() {
    let tokens = lex("<?php /* a */ /** d */ /**/");
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[3].kind, TokenKind::DocComment);
    assert_eq!(tokens[3].text, "/** d */");
    assert_eq!(tokens[5].kind, TokenKind::Comment);
    assert_eq!(tokens[5].text, "/**/");
}

#[test]
fn test_unterminated_block_comment_runs_to_eof() {
    let tokens = lex("<?php /* a");
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].text, "/* a");
}

#[test]
fn test_strings_are_atomic() {
    let tokens = lex("<?php 'a\\'b' \"c$d\"");
    assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[1].text, "'a\\'b'");
    // No interpolation split inside double quotes
    assert_eq!(tokens[3].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[3].text, "\"c$d\"");
}

#[test]
fn test_unterminated_string_is_an_error() {
    assert!(lex_err("<?php 'abc").contains("unterminated string"));
}

#[test]
fn test_number_formats() {
    let tokens = lex("<?php 0x1F 0b10 0o7 1_000 1.5 .5 2e10 1e+3");
    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        numbers,
        vec!["0x1F", "0b10", "0o7", "1_000", "1.5", ".5", "2e10", "1e+3"]
    );
}

#[test]
fn test_trailing_dot_is_not_part_of_the_number() {
    let tokens = lex("<?php 1.$x");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].text, "1");
    assert_eq!(tokens[2].kind, TokenKind::Concat);
    assert_eq!(tokens[3].kind, TokenKind::Variable);
}

#[test]
fn test_empty_radix_literal_is_an_error() {
    assert!(lex_err("<?php 0x").contains("malformed hexadecimal literal"));
    assert!(lex_err("<?php 0b;").contains("malformed binary literal"));
}

#[test]
fn test_heredoc_is_one_token() {
    let tokens = lex("<?php $x = <<<EOT\nline1\nline2\nEOT;\n");
    let heredoc = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Heredoc)
        .expect("no heredoc token");
    assert_eq!(heredoc.text, "<<<EOT\nline1\nline2\nEOT");
}

#[test]
fn test_nowdoc_marker() {
    let tokens = lex("<?php <<<'EOT'\nx\nEOT");
    let heredoc = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Heredoc)
        .expect("no heredoc token");
    assert_eq!(heredoc.text, "<<<'EOT'\nx\nEOT");
}

#[test]
fn test_unterminated_heredoc_is_an_error() {
    assert!(lex_err("<?php <<<EOT\nx").contains("unterminated heredoc"));
}

#[test]
fn test_compound_operators() {
    let source = "<?php <> <= >= <=> === !== ?? ... ?:";
    let ops: Vec<TokenKind> = lex(source)
        .iter()
        .map(|t| t.kind)
        .filter(|k| !matches!(k, TokenKind::OpenTag | TokenKind::Whitespace | TokenKind::Eof))
        .collect();
    assert_eq!(
        ops,
        vec![
            TokenKind::NotEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::Spaceship,
            TokenKind::Identical,
            TokenKind::NotIdentical,
            TokenKind::NullCoalesce,
            TokenKind::Ellipsis,
            TokenKind::QuestionMark,
            TokenKind::Colon,
        ]
    );
}

#[test]
fn test_whitespace_only_gap_between_tags() {
    let tokens = lex("<?php $a; ?>\n \n<?php $b;");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Html));
    // Close tag takes the first newline, the rest is a whitespace token
    let gap = tokens
        .iter()
        .position(|t| t.kind == TokenKind::CloseTag)
        .expect("no close tag");
    assert_eq!(tokens[gap].text, "?>\n");
    assert_eq!(tokens[gap + 1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[gap + 1].text, " \n");
}

#[test]
fn test_text_after_close_tag_is_html() {
    let tokens = lex("<?php ?>text");
    assert_eq!(tokens[1].kind, TokenKind::CloseTag);
    assert_eq!(tokens[2].kind, TokenKind::Html);
    assert_eq!(tokens[2].text, "text");
}

#[test]
fn test_unexpected_character_is_an_error() {
    assert!(lex_err("<?php `").contains("unexpected character '`'"));
}

#[test]
fn test_token_positions() {
    let tokens = lex("<?php\n$a = 1;");
    assert_eq!(tokens[1].kind, TokenKind::Variable);
    assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    assert_eq!(tokens[3].kind, TokenKind::Assign);
    assert_eq!((tokens[3].line, tokens[3].column), (2, 4));
}

#[test]
fn test_stream_ends_with_eof() {
    let tokens = lex("<?php $a;");
    let last = tokens.last().expect("empty stream");
    assert_eq!(last.kind, TokenKind::Eof);
    assert_eq!(last.text, "");
}
