mod arrays;
mod loops;
mod output;

use std::fs;
use std::path::Path;

use crate::error::{Result, TranslateError};
use crate::lexer::Lexer;
use crate::reflect::{render_signature, SourceExtractor};
use crate::rules::{RuleTables, DEFAULT_TABLES};
use crate::token::{TokenBuffer, TokenKind};

/// A unit of PHP source to translate.
pub enum Unit<'a> {
    /// A raw fragment of PHP code, with or without surrounding tags.
    Source(&'a str),
    /// A file containing PHP source.
    File(&'a Path),
    /// A named callable, resolved through the configured
    /// [`SourceExtractor`].
    Callable(&'a str),
}

/// Translates a unit of PHP source to JavaScript with the default rule
/// tables.
pub fn translate(unit: Unit<'_>, pack: bool) -> Result<String> {
    Translator::new().translate(unit, pack)
}

/// The token-stream translation driver.
///
/// A single left-to-right pass over a [`TokenBuffer`]: forbidden kinds
/// abort, removed kinds are skipped, replaced kinds emit their fixed text,
/// and the structural keywords (`array`, `foreach`, `echo`, `print`)
/// rewrite the buffer ahead of the cursor before the pass re-processes the
/// same index. All other tokens emit their own text, subject to identifier
/// substitution, sigil stripping, `.` to `+` and `&` elision.
///
/// The driver carries no state besides the cursor and the buffer; a
/// translation call is a pure function of its input and the shared
/// immutable tables, recursing into itself only for the fragments foreach
/// lowering synthesizes.
pub struct Translator<'a> {
    tables: &'a RuleTables,
    extractor: Option<&'a dyn SourceExtractor>,
    full_parameters: bool,
}

impl<'a> Translator<'a> {
    /// Creates a translator over the default JavaScript rule tables, with
    /// no source extractor.
    pub fn new() -> Self {
        Self {
            tables: &DEFAULT_TABLES,
            extractor: None,
            full_parameters: false,
        }
    }

    /// Uses custom rule tables instead of the default set.
    pub fn with_tables(mut self, tables: &'a RuleTables) -> Self {
        self.tables = tables;
        self
    }

    /// Configures the extractor that resolves [`Unit::Callable`] references.
    pub fn with_extractor(mut self, extractor: &'a dyn SourceExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Renders parameter types, reference sigils and default values in
    /// synthesized signatures instead of bare names.
    pub fn with_full_parameters(mut self, full: bool) -> Self {
        self.full_parameters = full;
        self
    }

    /// Translates one unit. `pack` collapses every whitespace run in the
    /// output to a single space.
    pub fn translate(&self, unit: Unit<'_>, pack: bool) -> Result<String> {
        match unit {
            Unit::Source(source) => self.translate_source(source, pack),
            Unit::File(path) => self.translate_file(path, pack),
            Unit::Callable(reference) => self.translate_callable(reference, pack),
        }
    }

    /// Translates a source fragment. Untagged input is wrapped in
    /// `<?php ... ?>` first; input that already opens with a PHP tag is
    /// lexed as is.
    pub fn translate_source(&self, source: &str, pack: bool) -> Result<String> {
        let trimmed = source.trim_start();
        let wrapped;
        let input = if trimmed.starts_with("<?php") || trimmed.starts_with("<?=") {
            source
        } else {
            wrapped = format!("<?php {} ?>", source);
            &wrapped
        };

        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize()?;
        let mut buffer = TokenBuffer::new(tokens);
        self.translate_buffer(&mut buffer, pack)
    }

    /// Translates the contents of a file.
    pub fn translate_file(&self, path: &Path, pack: bool) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|e| {
            TranslateError::Lookup(format!("cannot read '{}': {}", path.display(), e))
        })?;
        self.translate_source(&source, pack)
    }

    /// Translates a named callable through the configured extractor. The
    /// extracted body is wrapped in a synthesized `function (...) { ... }`
    /// signature before translation.
    pub fn translate_callable(&self, reference: &str, pack: bool) -> Result<String> {
        let extractor = self.extractor.ok_or_else(|| {
            TranslateError::Lookup(format!(
                "cannot resolve '{}': no source extractor configured",
                reference
            ))
        })?;
        let callable = extractor.extract(reference)?;
        let source = render_signature(&callable.parameters, &callable.body, self.full_parameters);
        self.translate_source(&source, pack)
    }

    /// The driver pass. Rewriters mutate `buffer` ahead of the cursor;
    /// rewritten indices are honored when the cursor reaches them.
    fn translate_buffer(&self, buffer: &mut TokenBuffer, pack: bool) -> Result<String> {
        let mut out = String::new();
        let mut index = 0;

        while index < buffer.len() {
            let kind = buffer[index].kind;

            if self.tables.forbidden.contains(&kind) {
                let token = &buffer[index];
                return Err(TranslateError::Forbidden {
                    construct: kind.describe(),
                    line: token.line,
                    column: token.column,
                });
            }

            if self.tables.removed.contains(&kind) {
                index += 1;
                continue;
            }

            if let Some(replacement) = self.tables.replacements.get(&kind) {
                out.push_str(replacement);
                index += 1;
                continue;
            }

            match kind {
                TokenKind::Eof => break,

                // Structural rewrites; the rewritten index is re-processed
                TokenKind::Array => {
                    arrays::lower_array_literal(buffer, index)?;
                }
                TokenKind::Foreach => {
                    self.lower_foreach(buffer, index)?;
                }
                TokenKind::Echo | TokenKind::Print => {
                    output::lower_output_call(buffer, index)?;
                }

                TokenKind::Empty | TokenKind::Global | TokenKind::Isset | TokenKind::List => {
                    return Err(TranslateError::Malformed(format!(
                        "not implemented yet: {}",
                        kind.describe()
                    )));
                }

                TokenKind::Whitespace => {
                    if pack {
                        if !out.ends_with(' ') {
                            out.push(' ');
                        }
                    } else {
                        out.push_str(&buffer[index].text);
                    }
                    index += 1;
                }

                // Concatenation becomes addition; the reference sigil
                // disappears
                TokenKind::Concat => {
                    out.push('+');
                    index += 1;
                }
                TokenKind::Ampersand => {
                    index += 1;
                }

                // Variables lose their sigil and skip substitution
                TokenKind::Variable => {
                    out.push_str(&buffer[index].text[1..]);
                    index += 1;
                }

                // Rewriter output is already final
                TokenKind::Raw => {
                    out.push_str(&buffer[index].text);
                    index += 1;
                }

                _ => {
                    let token = &buffer[index];
                    match self.tables.substitutions.get(token.text.as_str()) {
                        Some(replacement) => out.push_str(replacement),
                        None => out.push_str(&token.text),
                    }
                    index += 1;
                }
            }
        }

        Ok(out)
    }
}

impl Default for Translator<'_> {
    fn default() -> Self {
        Self::new()
    }
}
