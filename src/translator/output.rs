//! Lowering of `echo` and `print` statements.

use crate::error::{Result, TranslateError};
use crate::token::{TokenBuffer, TokenKind};

/// Rewrites the output keyword at `k` into a JavaScript call.
///
/// `echo` maps to `alert`, `print` to `console.log`. A keyword already
/// followed by a parenthesis only has its name swapped; otherwise the
/// keyword opens a call and the statement's terminating semicolon closes
/// it, wherever that semicolon sits.
pub(super) fn lower_output_call(buffer: &mut TokenBuffer, k: usize) -> Result<()> {
    let (name, function) = match buffer[k].kind {
        TokenKind::Print => ("print", "console.log"),
        _ => ("echo", "alert"),
    };

    if buffer.next_non_whitespace_is(k + 1, TokenKind::LeftParen) {
        buffer.set_raw(k, function);
        return Ok(());
    }

    match buffer.find_from(k + 1, TokenKind::Semicolon) {
        Some(semi) => {
            buffer.set_raw(k, format!("{}(", function));
            buffer.set_raw(semi, ");");
            Ok(())
        }
        None => Err(TranslateError::Malformed(format!(
            "unterminated {} statement",
            name
        ))),
    }
}
