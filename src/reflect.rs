//! Callable source extraction.
//!
//! Translating a [`crate::Unit::Callable`] needs the referenced function's
//! parameter list and body text. Where those come from depends entirely on
//! the embedding application, so the translator only defines the
//! [`SourceExtractor`] seam and the shape of what it returns.

use crate::error::Result;

/// One parameter of an extracted callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub by_reference: bool,
    pub type_name: Option<String>,
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    /// A plain parameter with the given name, no type, no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            by_reference: false,
            type_name: None,
            default_value: None,
        }
    }
}

/// The parameter list and body text of a resolved callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSource {
    pub parameters: Vec<ParameterDescriptor>,
    pub body: String,
}

/// Resolves a callable reference to its source.
pub trait SourceExtractor {
    fn extract(&self, reference: &str) -> Result<CallableSource>;
}

/// Renders a parameter list for a synthesized function signature.
///
/// Bare rendering emits `$name` only. Full rendering keeps type hints,
/// reference sigils and default values, which then flow through the same
/// translation rules as any other source text.
pub fn render_parameters(parameters: &[ParameterDescriptor], full: bool) -> String {
    let rendered: Vec<String> = parameters
        .iter()
        .map(|parameter| {
            if !full {
                return format!("${}", parameter.name);
            }
            let mut out = String::new();
            if let Some(type_name) = &parameter.type_name {
                out.push_str(type_name);
                out.push(' ');
            }
            if parameter.by_reference {
                out.push('&');
            }
            out.push('$');
            out.push_str(&parameter.name);
            if let Some(default_value) = &parameter.default_value {
                out.push_str(" = ");
                out.push_str(default_value);
            }
            out
        })
        .collect();
    rendered.join(", ")
}

/// Wraps a callable body in a synthesized `function (...) { ... }`
/// signature, still in PHP form.
pub fn render_signature(parameters: &[ParameterDescriptor], body: &str, full: bool) -> String {
    format!(
        "function ({}) {{{}}}",
        render_parameters(parameters, full),
        body
    )
}
