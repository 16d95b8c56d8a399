use std::collections::{HashMap, HashSet};

use crate::token::TokenKind;

/// The immutable rule tables the translation driver consults.
///
/// Built once and shared read-only across every translation; a driver pass
/// never mutates them. [`struct@DEFAULT_TABLES`] holds the standard
/// JavaScript-targeting set, and a custom set can be injected through
/// [`Translator::with_tables`](crate::Translator::with_tables).
pub struct RuleTables {
    /// Bare identifier text mapped to a replacement expression, matched
    /// exactly. The match has no call-context awareness: a constant
    /// sharing a mapped name is rewritten too.
    pub substitutions: HashMap<&'static str, &'static str>,
    /// Token kinds dropped from output entirely.
    pub removed: HashSet<TokenKind>,
    /// Token kinds emitted as a fixed replacement text.
    pub replacements: HashMap<TokenKind, &'static str>,
    /// Token kinds that abort translation on sight.
    pub forbidden: HashSet<TokenKind>,
}

impl RuleTables {
    /// Builds the standard PHP-to-JavaScript rule set.
    pub fn javascript() -> Self {
        let substitutions = HashMap::from([
            ("urlencode", "encodeURIComponent"),
            ("rawurlencode", "encodeURIComponent"),
            ("abs", "Math.abs"),
            ("ceil", "Math.ceil"),
            ("floor", "Math.floor"),
            ("round", "Math.round"),
            ("max", "Math.max"),
            ("min", "Math.min"),
            ("pow", "Math.pow"),
            ("sqrt", "Math.sqrt"),
            (
                "is_array",
                "\"[object Array]\" == Object.prototype.toString.call",
            ),
            ("is_object", "\"object\" == typeof"),
            ("is_null", "null === "),
            ("is_bool", ""),
            ("gettype", "typeof"),
        ]);

        let removed = HashSet::from([
            TokenKind::OpenTag,
            TokenKind::OpenTagWithEcho,
            TokenKind::CloseTag,
            TokenKind::Comment,
            TokenKind::DocComment,
            TokenKind::IntCast,
            TokenKind::BoolCast,
            TokenKind::DoubleCast,
            TokenKind::StringCast,
            TokenKind::ArrayCast,
            TokenKind::ObjectCast,
        ]);

        let replacements = HashMap::from([
            (TokenKind::Arrow, "."),        // -> becomes member access
            (TokenKind::DoubleColon, "."),  // :: becomes member access
            (TokenKind::ConcatAssign, "+="),
            (TokenKind::NotEqual, "!="),    // covers <> as well
            (TokenKind::LogicalAnd, "&&"),  // covers the word form
            (TokenKind::LogicalOr, "||"),   // covers the word form
            (TokenKind::DoubleArrow, ":"),  // => inside lowered maps
            (TokenKind::Unset, "delete"),
        ]);

        let forbidden = HashSet::from([
            TokenKind::Html,
            TokenKind::Heredoc,
            TokenKind::MagicConstant,
            TokenKind::UnsetCast,
            TokenKind::Backslash,
            TokenKind::AndAssign,
            TokenKind::Abstract,
            TokenKind::Class,
            TokenKind::Clone,
            TokenKind::Const,
            TokenKind::Declare,
            TokenKind::EndDeclare,
            TokenKind::EndFor,
            TokenKind::EndForeach,
            TokenKind::EndIf,
            TokenKind::EndSwitch,
            TokenKind::EndWhile,
            TokenKind::Exit,
            TokenKind::Extends,
            TokenKind::Final,
            TokenKind::Goto,
            TokenKind::HaltCompiler,
            TokenKind::Implements,
            TokenKind::Include,
            TokenKind::IncludeOnce,
            TokenKind::Interface,
            TokenKind::Namespace,
            TokenKind::Private,
            TokenKind::Protected,
            TokenKind::Public,
            TokenKind::Require,
            TokenKind::RequireOnce,
            TokenKind::Static,
            TokenKind::Use,
            TokenKind::Var,
        ]);

        Self {
            substitutions,
            removed,
            replacements,
            forbidden,
        }
    }
}

lazy_static::lazy_static! {
    /// The default JavaScript-targeting rule tables, built on first use.
    pub static ref DEFAULT_TABLES: RuleTables = RuleTables::javascript();
}
