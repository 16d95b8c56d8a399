//! Lowering of `foreach` loops into `for (key in iterable)` form.

use crate::error::{Result, TranslateError};
use crate::token::{TokenBuffer, TokenKind};

use super::Translator;

/// Key variable synthesized when the loop binds values only. The sigil is
/// stripped during the recursive translation of the rewritten fragments.
const SYNTHETIC_KEY: &str = "$key";

impl Translator<'_> {
    /// Rewrites the `foreach` at `k` into a `for .. in` loop.
    ///
    /// The header is carved up at token positions: the first `as` splits
    /// the iterable from the bindings, and a first `=>` after it splits
    /// key from value. Without an arrow the loop binds values only and a
    /// synthetic key is introduced. The rewritten header and the value
    /// binding are themselves translated recursively, then spliced back:
    /// the header replaces the tokens between the parentheses and the
    /// binding is prepended to the body, duplicating the indentation that
    /// follows the opening brace.
    pub(super) fn lower_foreach(&self, buffer: &mut TokenBuffer, k: usize) -> Result<()> {
        let mut depth = 0usize;
        let mut open: Option<usize> = None;
        let mut close: Option<usize> = None;
        let mut as_pos: Option<usize> = None;
        let mut arrow_pos: Option<usize> = None;

        let mut i = k + 1;
        while i < buffer.len() {
            match buffer[i].kind {
                TokenKind::LeftParen => {
                    if depth == 0 {
                        open = Some(i);
                    }
                    depth += 1;
                }
                TokenKind::RightParen => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                TokenKind::As => {
                    if depth > 0 && as_pos.is_none() {
                        as_pos = Some(i);
                    }
                }
                TokenKind::DoubleArrow => {
                    if depth > 0 && arrow_pos.is_none() {
                        arrow_pos = Some(i);
                    }
                }
                TokenKind::Eof => break,
                _ => {}
            }
            i += 1;
        }

        let (open, close) = match (open, close) {
            (Some(open), Some(close)) => (open, close),
            _ => {
                return Err(TranslateError::Malformed(format!(
                    "invalid foreach declaration: {}",
                    buffer.flatten(k + 1..i).trim()
                )));
            }
        };
        let as_pos = match as_pos {
            Some(as_pos) => as_pos,
            None => {
                return Err(TranslateError::Malformed(format!(
                    "invalid foreach declaration: {}",
                    buffer.flatten(open + 1..close).trim()
                )));
            }
        };

        let iterable = buffer.flatten(open + 1..as_pos).trim().to_string();

        // An arrow before `as` belongs to the iterable expression, not to
        // the bindings, and leaves the loop in value-only form.
        let (header, binding) = match arrow_pos {
            Some(arrow) if arrow > as_pos => {
                let key = buffer.flatten(as_pos + 1..arrow).trim().to_string();
                let value = buffer.flatten(arrow + 1..close).trim().to_string();
                (
                    format!("{} in {}", key, iterable),
                    format!("{} = {}[{}];", value, iterable, key),
                )
            }
            _ => {
                let value = buffer.flatten(as_pos + 1..close).trim().to_string();
                (
                    format!("{} in {}", SYNTHETIC_KEY, iterable),
                    format!("{} = {}[{}];", value, iterable, SYNTHETIC_KEY),
                )
            }
        };

        let brace = self.find_body_brace(buffer, close + 1)?;

        // Indentation between the brace and the first statement, kept in
        // place and copied in front of the binding.
        let mut ws_end = brace;
        while ws_end + 1 < buffer.len() && buffer[ws_end + 1].kind == TokenKind::Whitespace {
            ws_end += 1;
        }
        let indent = buffer.flatten(brace + 1..ws_end + 1);

        let header = self.translate_source(&header, false)?;
        let binding = self.translate_source(&binding, false)?;

        buffer.set_raw(k, "for");
        buffer.set_raw(open + 1, header.trim());
        for j in open + 2..close {
            buffer.set_raw(j, "");
        }
        buffer.set_raw(brace, format!("{{{}var {}", indent, binding));

        Ok(())
    }

    /// Finds the opening brace of the loop body, skipping trivia between
    /// the header and the block.
    fn find_body_brace(&self, buffer: &TokenBuffer, start: usize) -> Result<usize> {
        let mut i = start;
        while i < buffer.len() {
            match buffer[i].kind {
                TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment => i += 1,
                TokenKind::LeftBrace => return Ok(i),
                TokenKind::Eof => break,
                _ => {
                    return Err(TranslateError::Malformed(format!(
                        "unexpected token '{}' before foreach body",
                        buffer[i].text
                    )));
                }
            }
        }
        Err(TranslateError::Malformed(
            "missing foreach body brace".to_string(),
        ))
    }
}
