//! Token-level PHP to JavaScript translation.
//!
//! The translator never builds a syntax tree. Source text is lexed into a
//! flat token buffer and a single driver pass maps each token to its
//! JavaScript spelling: some kinds are dropped, some are replaced from
//! fixed tables, and a handful of structural keywords (`array`, `foreach`,
//! `echo`, `print`) rewrite the tokens ahead of the cursor before the pass
//! continues over them.
//!
//! ```
//! use php2js::{translate, Unit};
//!
//! let js = translate(Unit::Source("<?php $total = $a . $b;"), false)?;
//! assert_eq!(js, "total = a + b;");
//! # Ok::<(), php2js::TranslateError>(())
//! ```

pub mod error;
pub mod lexer;
pub mod reflect;
pub mod rules;
pub mod test_runner;
pub mod token;
pub mod translator;

pub use error::{Result, TranslateError};
pub use reflect::{
    render_parameters, render_signature, CallableSource, ParameterDescriptor, SourceExtractor,
};
pub use rules::{RuleTables, DEFAULT_TABLES};
pub use token::{Token, TokenBuffer, TokenKind};
pub use translator::{translate, Translator, Unit};
