/// String literal scanning for the php2js lexer
///
/// Literals are captured as raw text, quotes and escape sequences included,
/// so the translator can re-emit them byte for byte. Escapes are tracked
/// only far enough to find the real terminator; no unescaping happens.
/// Interpolation inside double-quoted strings is not expanded either: the
/// whole literal stays one atomic token.
use crate::error::TranslateError;
use crate::lexer::Lexer;

impl Lexer {
    /// Consumes a string literal starting at the opening quote.
    pub fn read_string(&mut self, quote: char) -> Result<(), TranslateError> {
        let line = self.line;
        let column = self.column;
        self.advance(); // opening quote

        while let Some(ch) = self.current() {
            if ch == quote {
                self.advance(); // closing quote
                return Ok(());
            }
            self.advance();
            if ch == '\\' {
                // A backslash never terminates; skip whatever it escapes
                self.advance();
            }
        }

        Err(TranslateError::Lex {
            message: "unterminated string".to_string(),
            line,
            column,
        })
    }

    /// Consumes a heredoc or nowdoc as a single token, from `<<<` through
    /// the closing marker. The body is never interpreted; the translator
    /// rejects the token as a whole.
    pub fn read_heredoc(&mut self) -> Result<(), TranslateError> {
        let line = self.line;
        let column = self.column;
        self.advance_by(3); // consume '<<<'

        while matches!(self.current(), Some(' ') | Some('\t')) {
            self.advance();
        }

        let quote = match self.current() {
            Some(q @ '\'') | Some(q @ '"') => {
                self.advance();
                Some(q)
            }
            _ => None,
        };

        let mut marker = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                marker.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        if marker.is_empty() {
            return Err(TranslateError::Lex {
                message: "expected heredoc marker".to_string(),
                line,
                column,
            });
        }
        if let Some(q) = quote {
            if self.current() != Some(q) {
                return Err(TranslateError::Lex {
                    message: format!("unterminated heredoc marker quote '{}'", q),
                    line,
                    column,
                });
            }
            self.advance();
        }

        // Skip the rest of the opening line
        while let Some(ch) = self.current() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }

        // The body runs until the marker opens a line
        let marker_len = marker.chars().count();
        while self.current().is_some() {
            if self.column == 1 && self.matches_str(&marker) {
                let boundary = self.peek(marker_len);
                if boundary.map_or(true, |c| !c.is_alphanumeric() && c != '_') {
                    self.advance_by(marker_len);
                    return Ok(());
                }
            }
            self.advance();
        }

        Err(TranslateError::Lex {
            message: format!("unterminated heredoc with marker '{}'", marker),
            line,
            column,
        })
    }
}
