//! Lowering of `array(...)` literals.

use crate::error::{Result, TranslateError};
use crate::token::{TokenBuffer, TokenKind};

/// Rewrites the `array` keyword at `k` and its argument list into a
/// JavaScript literal.
///
/// The list becomes `[...]` unless a `=>` pair is found at nesting depth
/// zero or one, in which case it becomes `{...}`. Depth counts parenthesis
/// tokens only, so an arrow inside a nested short literal still promotes
/// the outer list to a map. Nested `array(...)` calls keep their own
/// parentheses and are lowered when the driver reaches them.
pub(super) fn lower_array_literal(buffer: &mut TokenBuffer, k: usize) -> Result<()> {
    let mut depth = 0usize;
    let mut open: Option<usize> = None;
    let mut use_map = false;

    let mut i = k + 1;
    while i < buffer.len() {
        match buffer[i].kind {
            TokenKind::LeftParen => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            TokenKind::RightParen => match open {
                None => {
                    return Err(TranslateError::Malformed(
                        "array keyword without argument list".to_string(),
                    ));
                }
                Some(open) => {
                    depth -= 1;
                    if depth == 0 {
                        buffer.set_raw(k, "");
                        buffer.set_raw(open, if use_map { "{" } else { "[" });
                        buffer.set_raw(i, if use_map { "}" } else { "]" });
                        return Ok(());
                    }
                }
            },
            TokenKind::DoubleArrow => {
                if depth < 2 {
                    use_map = true;
                }
            }
            TokenKind::Eof => break,
            _ => {}
        }
        i += 1;
    }

    Err(TranslateError::Malformed(
        "unterminated array literal".to_string(),
    ))
}
