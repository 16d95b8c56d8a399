mod operators;
mod strings;

use crate::error::TranslateError;
use crate::token::{Token, TokenKind};

/// Lexical analyzer for the PHP subset php2js translates
///
/// The lexer converts source text into a gapless token sequence: every
/// character of input lands in exactly one token's text, whitespace and
/// comments included. The translation driver decides what to drop; the
/// lexer only classifies. It handles:
/// - Switching between inline HTML and PHP regions
/// - Whitespace and comment capture
/// - String, number and heredoc literals, kept as raw text
/// - Keyword, magic constant and cast recognition
/// - Single and multi character operators
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    in_php: bool,
}

impl Lexer {
    /// Builds a lexer over the whole input, starting in HTML mode.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            in_php: false,
        }
    }

    /// Character under the cursor.
    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Character `offset` places past the cursor.
    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Consumes one character, keeping the line and column counts current.
    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    /// Whether the input at the cursor starts with `s`.
    fn matches_str(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, ch)| self.peek(i) == Some(ch))
    }

    /// Consumes `n` characters.
    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Source text covered since `start`.
    fn text_from(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    /// Consumes a run of whitespace characters.
    fn read_whitespace(&mut self) {
        while self.current().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    /// Consumes a `//` or `#` comment. The trailing newline belongs to the
    /// comment; a close tag does not and ends it.
    fn read_line_comment(&mut self) {
        while let Some(ch) = self.current() {
            if self.matches_str("?>") {
                return;
            }
            self.advance();
            if ch == '\n' {
                return;
            }
        }
    }

    /// Consumes a `/* */` comment. An unterminated comment runs to the end
    /// of input without error.
    fn read_block_comment(&mut self) {
        self.advance_by(2);
        while self.current().is_some() {
            if self.matches_str("*/") {
                self.advance_by(2);
                return;
            }
            self.advance();
        }
    }

    /// Consumes a numeric literal: decimal, hexadecimal, binary or octal,
    /// with optional fraction, exponent and underscore separators.
    fn read_number(&mut self) -> Result<(), TranslateError> {
        let line = self.line;
        let column = self.column;

        if self.current() == Some('0') {
            let radix = match self.peek(1) {
                Some('x') | Some('X') => Some((16, "hexadecimal")),
                Some('b') | Some('B') => Some((2, "binary")),
                Some('o') | Some('O') => Some((8, "octal")),
                _ => None,
            };
            if let Some((radix, base)) = radix {
                self.advance_by(2);
                if !self.read_digit_run(radix) {
                    return Err(TranslateError::Lex {
                        message: format!("malformed {} literal", base),
                        line,
                        column,
                    });
                }
                return Ok(());
            }
        }

        self.read_digit_run(10);

        // A dot joins the number only when digits follow; `1.$x` stays a
        // concatenation.
        if self.current() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.read_digit_run(10);
        }

        if matches!(self.current(), Some('e') | Some('E')) {
            let mut offset = 1;
            if matches!(self.peek(1), Some('+') | Some('-')) {
                offset = 2;
            }
            if self.peek(offset).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_by(offset);
                self.read_digit_run(10);
            }
        }

        Ok(())
    }

    /// Consumes digits of the given radix, allowing `_` between digits.
    /// Returns whether at least one digit was seen.
    fn read_digit_run(&mut self, radix: u32) -> bool {
        let mut seen = false;
        while let Some(ch) = self.current() {
            if ch.is_digit(radix) {
                seen = true;
                self.advance();
            } else if ch == '_' && seen && self.peek(1).is_some_and(|c| c.is_digit(radix)) {
                self.advance();
            } else {
                break;
            }
        }
        seen
    }

    /// Consumes a run of identifier characters.
    fn read_identifier(&mut self) -> String {
        let start = self.pos;
        while self.current().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        self.text_from(start)
    }

    /// Classifies identifier text.
    ///
    /// Only words the rule tables care about get a keyword kind; everything
    /// else, `function` and `if` included, stays an identifier and passes
    /// through untouched.
    fn keyword_or_identifier(&self, ident: &str) -> TokenKind {
        match ident.to_lowercase().as_str() {
            "array" => TokenKind::Array,
            "foreach" => TokenKind::Foreach,
            "as" => TokenKind::As,
            "echo" => TokenKind::Echo,
            "print" => TokenKind::Print,
            "unset" => TokenKind::Unset,
            "empty" => TokenKind::Empty,
            "global" => TokenKind::Global,
            "isset" => TokenKind::Isset,
            "list" => TokenKind::List,
            "and" => TokenKind::LogicalAnd,
            "or" => TokenKind::LogicalOr,
            "abstract" => TokenKind::Abstract,
            "class" => TokenKind::Class,
            "clone" => TokenKind::Clone,
            "const" => TokenKind::Const,
            "declare" => TokenKind::Declare,
            "enddeclare" => TokenKind::EndDeclare,
            "endfor" => TokenKind::EndFor,
            "endforeach" => TokenKind::EndForeach,
            "endif" => TokenKind::EndIf,
            "endswitch" => TokenKind::EndSwitch,
            "endwhile" => TokenKind::EndWhile,
            "exit" | "die" => TokenKind::Exit,
            "extends" => TokenKind::Extends,
            "final" => TokenKind::Final,
            "goto" => TokenKind::Goto,
            "__halt_compiler" => TokenKind::HaltCompiler,
            "implements" => TokenKind::Implements,
            "include" => TokenKind::Include,
            "include_once" => TokenKind::IncludeOnce,
            "interface" => TokenKind::Interface,
            "namespace" => TokenKind::Namespace,
            "private" => TokenKind::Private,
            "protected" => TokenKind::Protected,
            "public" => TokenKind::Public,
            "require" => TokenKind::Require,
            "require_once" => TokenKind::RequireOnce,
            "static" => TokenKind::Static,
            "use" => TokenKind::Use,
            "var" => TokenKind::Var,
            "__class__" | "__dir__" | "__file__" | "__function__" | "__line__"
            | "__method__" | "__namespace__" => TokenKind::MagicConstant,
            _ => TokenKind::Identifier,
        }
    }

    /// Scans the whole input into a token sequence ending in
    /// [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, TranslateError> {
        let mut tokens = Vec::new();

        while self.current().is_some() {
            if !self.in_php {
                // Outside PHP tags
                self.lex_outside_php(&mut tokens);
                continue;
            }

            let line = self.line;
            let column = self.column;
            let start = self.pos;

            // Check for close tag; it owns one trailing newline, the way
            // the open tag owns one trailing whitespace character.
            if self.matches_str("?>") {
                self.advance_by(2);
                if self.current() == Some('\r') && self.peek(1) == Some('\n') {
                    self.advance_by(2);
                } else if self.current() == Some('\n') {
                    self.advance();
                }
                self.in_php = false;
                tokens.push(Token::new(
                    TokenKind::CloseTag,
                    self.text_from(start),
                    line,
                    column,
                ));
                continue;
            }

            let ch = match self.current() {
                Some(ch) => ch,
                None => break,
            };

            if ch.is_whitespace() {
                self.read_whitespace();
                tokens.push(Token::new(
                    TokenKind::Whitespace,
                    self.text_from(start),
                    line,
                    column,
                ));
                continue;
            }

            // Check for comments
            if self.matches_str("//") || ch == '#' {
                self.read_line_comment();
                tokens.push(Token::new(
                    TokenKind::Comment,
                    self.text_from(start),
                    line,
                    column,
                ));
                continue;
            }

            if self.matches_str("/*") {
                let kind = if self.matches_str("/**") && self.peek(3) != Some('/') {
                    TokenKind::DocComment
                } else {
                    TokenKind::Comment
                };
                self.read_block_comment();
                tokens.push(Token::new(kind, self.text_from(start), line, column));
                continue;
            }

            let token = self.lex_php_token(ch, line, column)?;
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
        Ok(tokens)
    }

    /// One HTML-mode step: an open tag, or a run of inter-tag text.
    fn lex_outside_php(&mut self, tokens: &mut Vec<Token>) {
        let line = self.line;
        let column = self.column;
        let start = self.pos;

        if self.matches_str("<?php") {
            self.advance_by(5);
            if self.current() == Some('\r') && self.peek(1) == Some('\n') {
                self.advance_by(2);
            } else if self.current().is_some_and(|c| c.is_whitespace()) {
                self.advance();
            }
            self.in_php = true;
            tokens.push(Token::new(
                TokenKind::OpenTag,
                self.text_from(start),
                line,
                column,
            ));
        } else if self.matches_str("<?=") {
            self.advance_by(3);
            self.in_php = true;
            tokens.push(Token::new(TokenKind::OpenTagWithEcho, "<?=", line, column));
        } else {
            while self.current().is_some() && !self.matches_str("<?php") && !self.matches_str("<?=")
            {
                self.advance();
            }
            let text = self.text_from(start);
            // Whitespace-only text between tags is ordinary whitespace;
            // anything else is inline HTML.
            let kind = if text.chars().all(|c| c.is_whitespace()) {
                TokenKind::Whitespace
            } else {
                TokenKind::Html
            };
            tokens.push(Token::new(kind, text, line, column));
        }
    }

    /// Scans a single PHP-mode token starting at `ch`.
    fn lex_php_token(
        &mut self,
        ch: char,
        line: usize,
        column: usize,
    ) -> Result<Token, TranslateError> {
        let start = self.pos;

        let kind = match ch {
            // Variables; a bare sigil stands alone for variable variables
            '$' => {
                self.advance();
                let name = self.read_identifier();
                if name.is_empty() {
                    TokenKind::Dollar
                } else {
                    TokenKind::Variable
                }
            }

            // Punctuation
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            '(' => return Ok(self.read_cast_or_paren(line, column)),
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '{' => {
                self.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                TokenKind::RightBrace
            }
            '[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                TokenKind::RightBracket
            }
            '@' => {
                self.advance();
                TokenKind::At
            }
            '~' => {
                self.advance();
                TokenKind::Tilde
            }
            '\\' => {
                self.advance();
                TokenKind::Backslash
            }

            // Strings
            '"' | '\'' => {
                self.read_string(ch)?;
                TokenKind::StringLiteral
            }

            // Heredoc and nowdoc, consumed whole
            '<' if self.matches_str("<<<") => {
                self.read_heredoc()?;
                TokenKind::Heredoc
            }

            // Numbers, including leading-dot floats
            '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?;
                TokenKind::Number
            }
            _ if ch.is_ascii_digit() => {
                self.read_number()?;
                TokenKind::Number
            }

            // Identifiers and keywords
            _ if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();
                self.keyword_or_identifier(&ident)
            }

            // Operators
            '+' | '-' | '*' | '/' | '%' | '.' | '=' | '!' | '<' | '>' | '&' | '|' | '^' | '?'
            | ':' => self.read_operator(ch)?,

            _ => {
                return Err(TranslateError::Lex {
                    message: format!("unexpected character '{}'", ch),
                    line,
                    column,
                })
            }
        };

        Ok(Token::new(kind, self.text_from(start), line, column))
    }

    /// Recognizes a cast like `(int)` or `( string )` as one token, or
    /// falls back to a plain opening parenthesis.
    fn read_cast_or_paren(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        self.advance(); // consume '('

        while matches!(self.current(), Some(' ') | Some('\t')) {
            self.advance();
        }
        let word_start = self.pos;
        while self.current().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let word = self.text_from(word_start).to_lowercase();
        while matches!(self.current(), Some(' ') | Some('\t')) {
            self.advance();
        }

        let kind = if self.current() == Some(')') {
            match word.as_str() {
                "int" | "integer" => Some(TokenKind::IntCast),
                "bool" | "boolean" => Some(TokenKind::BoolCast),
                "float" | "double" | "real" => Some(TokenKind::DoubleCast),
                "string" | "binary" => Some(TokenKind::StringCast),
                "array" => Some(TokenKind::ArrayCast),
                "object" => Some(TokenKind::ObjectCast),
                "unset" => Some(TokenKind::UnsetCast),
                _ => None,
            }
        } else {
            None
        };

        match kind {
            Some(kind) => {
                self.advance(); // consume ')'
                Token::new(kind, self.text_from(start), line, column)
            }
            None => {
                // Not a cast; rewind and emit the parenthesis alone
                self.pos = start;
                self.line = line;
                self.column = column;
                self.advance();
                Token::new(TokenKind::LeftParen, "(", line, column)
            }
        }
    }
}
