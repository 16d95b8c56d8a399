use std::ops::{Index, IndexMut, Range};

/// Token types for the php2js lexer
///
/// Kinds are fieldless so they can serve as rule-table keys; the source text
/// a token covers lives on [`Token`] itself, because translation re-emits
/// text rather than interpreting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // PHP Tags
    OpenTag,         // <?php
    OpenTagWithEcho, // <?=
    CloseTag,        // ?>

    // Trivia (kept in the stream, dropped or re-emitted on output)
    Whitespace, // any run of whitespace characters
    Comment,    // // comment, # comment, /* comment */
    DocComment, // /** comment */

    // Identifiers and Variables
    Variable,   // $name
    Identifier, // function names, untranslated keywords, etc.

    // Literals
    StringLiteral, // 'string' or "string", quotes included
    Number,        // 123, 1.5, .5, 1e3, 0x1F, 0b101
    Heredoc,       // <<<LABEL ... LABEL
    Html,          // raw text outside PHP tags
    MagicConstant, // __FILE__, __LINE__, __CLASS__, ...

    // Cast Operators
    IntCast,    // (int), (integer)
    BoolCast,   // (bool), (boolean)
    DoubleCast, // (float), (double), (real)
    StringCast, // (string), (binary)
    ArrayCast,  // (array)
    ObjectCast, // (object)
    UnsetCast,  // (unset)

    // Keywords with dedicated translation rules
    Array,   // array
    Foreach, // foreach
    As,      // as
    Echo,    // echo
    Print,   // print
    Unset,   // unset
    Empty,   // empty
    Global,  // global
    Isset,   // isset
    List,    // list

    // Keywords outside the translatable subset
    Abstract,     // abstract
    Class,        // class
    Clone,        // clone
    Const,        // const
    Declare,      // declare
    EndDeclare,   // enddeclare
    EndFor,       // endfor
    EndForeach,   // endforeach
    EndIf,        // endif
    EndSwitch,    // endswitch
    EndWhile,     // endwhile
    Exit,         // exit, die
    Extends,      // extends
    Final,        // final
    Goto,         // goto
    HaltCompiler, // __halt_compiler
    Implements,   // implements
    Include,      // include
    IncludeOnce,  // include_once
    Interface,    // interface
    Namespace,    // namespace
    Private,      // private
    Protected,    // protected
    Public,       // public
    Require,      // require
    RequireOnce,  // require_once
    Static,       // static
    Use,          // use
    Var,          // var

    // Operators with translation rules
    Arrow,        // ->
    DoubleColon,  // ::
    DoubleArrow,  // =>
    Concat,       // .
    ConcatAssign, // .=
    NotEqual,     // != or <>
    LogicalAnd,   // && or 'and'
    LogicalOr,    // || or 'or'
    Ampersand,    // & (reference sigil)
    AndAssign,    // &=

    // Assignment Operators
    Assign,           // =
    PlusAssign,       // +=
    MinusAssign,      // -=
    MulAssign,        // *=
    DivAssign,        // /=
    ModAssign,        // %=
    PowAssign,        // **=
    OrAssign,         // |=
    XorAssign,        // ^=
    ShiftLeftAssign,  // <<=
    ShiftRightAssign, // >>=

    // Arithmetic Operators
    Plus,  // +
    Minus, // -
    Mul,   // *
    Div,   // /
    Mod,   // %
    Pow,   // **

    // Comparison Operators
    Equal,        // ==
    Identical,    // ===
    NotIdentical, // !==
    LessThan,     // <
    GreaterThan,  // >
    LessEqual,    // <=
    GreaterEqual, // >=
    Spaceship,    // <=>

    // Logical Operators
    Not, // !

    // Bitwise Operators
    BitwiseOr,  // |
    BitwiseXor, // ^
    Tilde,      // ~
    ShiftLeft,  // <<
    ShiftRight, // >>

    // Increment/Decrement
    Increment, // ++
    Decrement, // --

    // Punctuation
    Semicolon,    // ;
    Comma,        // ,
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    QuestionMark, // ?
    Colon,        // :
    NullCoalesce, // ??
    Ellipsis,     // ... (variadic/spread operator)
    At,           // @ (error suppression)
    Dollar,       // bare $ (variable variables)
    Backslash,    // \ (namespace separator)

    // Text produced by a structural rewrite, emitted verbatim
    Raw,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in diagnostics for constructs the
    /// translator rejects.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Html => "inline HTML",
            TokenKind::Heredoc => "heredoc string",
            TokenKind::MagicConstant => "magic constant",
            TokenKind::UnsetCast => "(unset) cast",
            TokenKind::Backslash => "namespace separator",
            TokenKind::AndAssign => "&= operator",
            TokenKind::Abstract => "abstract",
            TokenKind::Class => "class",
            TokenKind::Clone => "clone",
            TokenKind::Const => "const",
            TokenKind::Declare => "declare",
            TokenKind::EndDeclare => "enddeclare",
            TokenKind::EndFor => "endfor",
            TokenKind::EndForeach => "endforeach",
            TokenKind::EndIf => "endif",
            TokenKind::EndSwitch => "endswitch",
            TokenKind::EndWhile => "endwhile",
            TokenKind::Exit => "exit",
            TokenKind::Extends => "extends",
            TokenKind::Final => "final",
            TokenKind::Goto => "goto",
            TokenKind::HaltCompiler => "__halt_compiler",
            TokenKind::Implements => "implements",
            TokenKind::Include => "include",
            TokenKind::IncludeOnce => "include_once",
            TokenKind::Interface => "interface",
            TokenKind::Namespace => "namespace",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Public => "public",
            TokenKind::Require => "require",
            TokenKind::RequireOnce => "require_once",
            TokenKind::Static => "static",
            TokenKind::Use => "use",
            TokenKind::Var => "var",
            TokenKind::Empty => "empty",
            TokenKind::Global => "global",
            TokenKind::Isset => "isset",
            TokenKind::List => "list",
            _ => "token",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// The mutable token sequence a translation pass works over.
///
/// Indices stay stable for the whole pass. Structural rewriters overwrite
/// the kind and text of positions ahead of the driver's cursor, and the
/// driver picks up the overwritten form when its scan reaches that index.
#[derive(Debug)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replaces a token with rewriter-produced text. `Raw` falls through
    /// every rule table, so the text reaches the output verbatim.
    pub fn set_raw(&mut self, index: usize, text: impl Into<String>) {
        let token = &mut self.tokens[index];
        token.kind = TokenKind::Raw;
        token.text = text.into();
    }

    /// Concatenates the source text covered by a token range.
    pub fn flatten(&self, range: Range<usize>) -> String {
        self.tokens[range].iter().map(|t| t.text.as_str()).collect()
    }

    /// Index of the next token of `kind` at or after `start`.
    pub fn find_from(&self, start: usize, kind: TokenKind) -> Option<usize> {
        (start..self.tokens.len()).find(|&i| self.tokens[i].kind == kind)
    }

    /// Whether the first non-whitespace token at or after `start` has the
    /// given kind. Comments are not skipped.
    pub fn next_non_whitespace_is(&self, start: usize, kind: TokenKind) -> bool {
        for token in &self.tokens[start.min(self.tokens.len())..] {
            if token.kind == TokenKind::Whitespace {
                continue;
            }
            return token.kind == kind;
        }
        false
    }
}

impl Index<usize> for TokenBuffer {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl IndexMut<usize> for TokenBuffer {
    fn index_mut(&mut self, index: usize) -> &mut Token {
        &mut self.tokens[index]
    }
}
