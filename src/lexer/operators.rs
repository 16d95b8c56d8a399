/// Operator tokenization module for the php2js lexer
///
/// Handles recognition of all operators, including:
/// - Arithmetic operators (+, -, *, /, %, **)
/// - Comparison operators (<, >, <=, >=, <=>, ==, !=, <>, ===, !==)
/// - Assignment operators (=, +=, -=, *=, /=, %=, **=, .=, &=, |=, ^=)
/// - Logical and bitwise operators (&&, ||, &, |, ^, <<, >>)
/// - Special operators (=>, ::, ->, ??, ..., .)
///
/// Multi-character forms are resolved by lookahead; the driver later maps
/// some of them (`->`, `::`, `.=`, `<>`, `=>`, `.`) to their JavaScript
/// counterparts.
use crate::error::TranslateError;
use crate::lexer::Lexer;
use crate::token::TokenKind;

impl Lexer {
    /// Recognizes and tokenizes an operator starting with `ch`, which is
    /// still under the cursor when called.
    pub fn read_operator(&mut self, ch: char) -> Result<TokenKind, TranslateError> {
        let line = self.line;
        let column = self.column;
        self.advance();

        let kind = match ch {
            '+' => match self.current() {
                Some('+') => self.take(TokenKind::Increment),
                _ => self.assign_or(TokenKind::PlusAssign, TokenKind::Plus),
            },
            '-' => match self.current() {
                Some('-') => self.take(TokenKind::Decrement),
                Some('>') => self.take(TokenKind::Arrow),
                _ => self.assign_or(TokenKind::MinusAssign, TokenKind::Minus),
            },
            '*' => match self.current() {
                Some('*') => {
                    self.advance();
                    self.assign_or(TokenKind::PowAssign, TokenKind::Pow)
                }
                _ => self.assign_or(TokenKind::MulAssign, TokenKind::Mul),
            },
            '/' => self.assign_or(TokenKind::DivAssign, TokenKind::Div),
            '%' => self.assign_or(TokenKind::ModAssign, TokenKind::Mod),

            // Concatenation and ellipsis; leading-dot floats never reach
            // this point
            '.' => match (self.current(), self.peek(1)) {
                (Some('.'), Some('.')) => {
                    self.advance_by(2);
                    TokenKind::Ellipsis
                }
                _ => self.assign_or(TokenKind::ConcatAssign, TokenKind::Concat),
            },

            '=' => match self.current() {
                Some('=') => {
                    self.advance();
                    self.assign_or(TokenKind::Identical, TokenKind::Equal)
                }
                Some('>') => self.take(TokenKind::DoubleArrow),
                _ => TokenKind::Assign,
            },

            '!' => match self.current() {
                Some('=') => {
                    self.advance();
                    self.assign_or(TokenKind::NotIdentical, TokenKind::NotEqual)
                }
                _ => TokenKind::Not,
            },

            // Less-than family; `<<<` heredocs are intercepted earlier
            '<' => match self.current() {
                Some('=') => {
                    self.advance();
                    match self.current() {
                        Some('>') => self.take(TokenKind::Spaceship),
                        _ => TokenKind::LessEqual,
                    }
                }
                Some('<') => {
                    self.advance();
                    self.assign_or(TokenKind::ShiftLeftAssign, TokenKind::ShiftLeft)
                }
                Some('>') => self.take(TokenKind::NotEqual),
                _ => TokenKind::LessThan,
            },

            '>' => match self.current() {
                Some('=') => self.take(TokenKind::GreaterEqual),
                Some('>') => {
                    self.advance();
                    self.assign_or(TokenKind::ShiftRightAssign, TokenKind::ShiftRight)
                }
                _ => TokenKind::GreaterThan,
            },

            // Ampersand forms; the bare reference sigil is elided on output
            '&' => match self.current() {
                Some('&') => self.take(TokenKind::LogicalAnd),
                _ => self.assign_or(TokenKind::AndAssign, TokenKind::Ampersand),
            },

            '|' => match self.current() {
                Some('|') => self.take(TokenKind::LogicalOr),
                _ => self.assign_or(TokenKind::OrAssign, TokenKind::BitwiseOr),
            },

            '^' => self.assign_or(TokenKind::XorAssign, TokenKind::BitwiseXor),

            '?' => match self.current() {
                Some('?') => self.take(TokenKind::NullCoalesce),
                _ => TokenKind::QuestionMark,
            },

            ':' => match self.current() {
                Some(':') => self.take(TokenKind::DoubleColon),
                _ => TokenKind::Colon,
            },

            // lex_php_token routes only the characters above here
            _ => {
                return Err(TranslateError::Lex {
                    message: format!("unexpected operator character '{}'", ch),
                    line,
                    column,
                })
            }
        };

        Ok(kind)
    }

    /// Consumes the character under the cursor and returns `kind`.
    fn take(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Consumes a trailing `=` and returns the compound-assignment form of
    /// an operator, or leaves the plain form.
    fn assign_or(&mut self, assign: TokenKind, plain: TokenKind) -> TokenKind {
        if self.current() == Some('=') {
            self.advance();
            assign
        } else {
            plain
        }
    }
}
