//! Lexical analysis for Bluespec source.
//!
//! This module exposes a lazy [`Lexer`] plus the `tokenize_with_trivia` and
//! `tokenize_without_trivia` helpers which convert raw source text into a
//! sequence of `(SyntaxKind, Span)` pairs. It uses the `logos` crate to
//! recognise tokens so that the CST can mirror the input exactly.
//!
//! Keywords and identifiers share one lexical pattern. A matched identifier is
//! first looked up in the keyword table; otherwise its case decides whether it
//! is a value identifier (`x`, `mkTop`) or a type identifier (`Bit`, `Reg`).

use logos::Logos;
use phf::phf_map;
use thiserror::Error;

use crate::SyntaxKind;

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum LexToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 3)]
    #[regex(r"//[^\n]*")]
    Comment,
    #[regex(r"/\*([^*]|\*+[^*/])*\**", priority = 1)]
    UnterminatedComment,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Ident,
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_$]*")]
    SystemIdent,
    #[token("'0")]
    #[token("'1")]
    Fill,
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"[0-9]*'[dDhHoObB][0-9a-zA-Z_]*")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9_]+([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    Real,
    #[regex(r#""[^"\\\n]*""#)]
    String,
    #[regex(r#""[^"\\\n]*\\[^\n]([^"\\\n]|\\[^\n])*""#)]
    EscapedString,
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedString,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(*")]
    AttrOpen,
    #[token("*)")]
    AttrClose,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("#")]
    Hash,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Lte,
    #[token(">")]
    Gt,
    #[token(">=")]
    Gte,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<-")]
    LArrow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("~&")]
    TildeAmp,
    #[token("|")]
    Pipe,
    #[token("~|")]
    TildePipe,
    #[token("^")]
    Caret,
    #[token("^~")]
    CaretTilde,
    #[token("~^")]
    TildeCaret,
    #[token("&&")]
    AmpAmp,
    #[token("&&&")]
    AmpAmpAmp,
    #[token("||")]
    PipePipe,
}

/// Maps identifier strings to their keyword `SyntaxKind`.
///
/// Both spellings of `valueOf` are accepted, as in the reference grammar.
static KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "action" => SyntaxKind::K_ACTION,
    "actionvalue" => SyntaxKind::K_ACTIONVALUE,
    "begin" => SyntaxKind::K_BEGIN,
    "bit" => SyntaxKind::K_BIT,
    "case" => SyntaxKind::K_CASE,
    "else" => SyntaxKind::K_ELSE,
    "end" => SyntaxKind::K_END,
    "endaction" => SyntaxKind::K_ENDACTION,
    "endactionvalue" => SyntaxKind::K_ENDACTIONVALUE,
    "endcase" => SyntaxKind::K_ENDCASE,
    "endfunction" => SyntaxKind::K_ENDFUNCTION,
    "endinstance" => SyntaxKind::K_ENDINSTANCE,
    "endinterface" => SyntaxKind::K_ENDINTERFACE,
    "endmethod" => SyntaxKind::K_ENDMETHOD,
    "endmodule" => SyntaxKind::K_ENDMODULE,
    "endpackage" => SyntaxKind::K_ENDPACKAGE,
    "endrule" => SyntaxKind::K_ENDRULE,
    "endtypeclass" => SyntaxKind::K_ENDTYPECLASS,
    "export" => SyntaxKind::K_EXPORT,
    "for" => SyntaxKind::K_FOR,
    "function" => SyntaxKind::K_FUNCTION,
    "if" => SyntaxKind::K_IF,
    "import" => SyntaxKind::K_IMPORT,
    "instance" => SyntaxKind::K_INSTANCE,
    "interface" => SyntaxKind::K_INTERFACE,
    "let" => SyntaxKind::K_LET,
    "matches" => SyntaxKind::K_MATCHES,
    "method" => SyntaxKind::K_METHOD,
    "module" => SyntaxKind::K_MODULE,
    "numeric" => SyntaxKind::K_NUMERIC,
    "package" => SyntaxKind::K_PACKAGE,
    "parameter" => SyntaxKind::K_PARAMETER,
    "provisos" => SyntaxKind::K_PROVISOS,
    "return" => SyntaxKind::K_RETURN,
    "rule" => SyntaxKind::K_RULE,
    "string" => SyntaxKind::K_STRING,
    "tagged" => SyntaxKind::K_TAGGED,
    "type" => SyntaxKind::K_TYPE,
    "typeclass" => SyntaxKind::K_TYPECLASS,
    "typedef" => SyntaxKind::K_TYPEDEF,
    "valueOf" => SyntaxKind::K_VALUEOF,
    "valueof" => SyntaxKind::K_VALUEOF,
    "while" => SyntaxKind::K_WHILE,
};

/// Classify text matched by the identifier pattern.
///
/// Keywords win. Otherwise the first character that is not `_` decides the
/// class: uppercase gives a type identifier, anything else (including a name
/// made only of underscores) gives a value identifier.
///
/// # Examples
///
/// ```rust
/// use bsvparse::{SyntaxKind, tokenizer::identifier_kind};
///
/// assert_eq!(identifier_kind("mkTop"), SyntaxKind::T_IDENT);
/// assert_eq!(identifier_kind("_Foo"), SyntaxKind::T_TYPE_IDENT);
/// assert_eq!(identifier_kind("rule"), SyntaxKind::K_RULE);
/// ```
#[must_use]
pub fn identifier_kind(text: &str) -> SyntaxKind {
    if let Some(kind) = KEYWORDS.get(text) {
        return *kind;
    }
    match text.chars().find(|c| *c != '_') {
        Some(c) if c.is_ascii_uppercase() => SyntaxKind::T_TYPE_IDENT,
        _ => SyntaxKind::T_IDENT,
    }
}

/// Line and column of a byte offset. Lines and columns start at 1; columns
/// count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Precomputed line starts for offset to position conversion.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    src: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { src, line_starts }
    }

    /// Convert a byte offset into a [`Position`]. Offsets past the end clamp
    /// to the end of the source.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.src.len());
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let line_start = line
            .checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx))
            .copied()
            .unwrap_or(0);
        let column = self
            .src
            .get(line_start..offset)
            .map_or(0, |text| text.chars().count());
        Position {
            line: line.max(1),
            column: column + 1,
            offset,
        }
    }
}

/// A classified token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
    pub position: Position,
}

/// Failure to recognise a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character `{ch}`")]
    InvalidCharacter { ch: char, span: Span },
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    /// `span` covers the backslash and the escaped character; `literal` the
    /// whole string.
    #[error("invalid escape `\\{escape}` in string literal")]
    InvalidEscape {
        escape: char,
        span: Span,
        literal: Span,
    },
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },
}

impl LexError {
    /// Source range of the offending text. Its start is the error position.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::UnterminatedComment { span }
            | Self::InvalidEscape { span, .. } => span.clone(),
        }
    }

    /// All of the text that failed to lex. Wider than [`LexError::span`]
    /// only for an invalid escape, where the whole literal is rejected.
    #[must_use]
    pub fn text_span(&self) -> Span {
        match self {
            Self::InvalidEscape { literal, .. } => literal.clone(),
            other => other.span(),
        }
    }
}

/// Check the escapes of a string literal starting at `start`.
///
/// Accepts `\n \t \v \f \a \\ \"`, octal `\ooo` and hex `\xhh`.
fn check_escapes(text: &str, start: usize) -> Result<(), LexError> {
    let mut chars = text.char_indices();
    while let Some((at, c)) = chars.next() {
        if c != '\\' {
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            break;
        };
        let valid = matches!(escape, 'n' | 't' | 'v' | 'f' | 'a' | '\\' | '"' | 'x' | '0'..='7');
        if !valid {
            let from = start + at;
            return Err(LexError::InvalidEscape {
                escape,
                span: from..from + 1 + escape.len_utf8(),
                literal: start..start + text.len(),
            });
        }
    }
    Ok(())
}

/// Lazy token iterator over a source string.
///
/// Trivia is skipped unless [`Lexer::with_trivia`] is requested. Lexical
/// errors are yielded in place and lexing continues after the offending text,
/// so a caller may stop at the first error or collect them all.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LexToken>,
    base: usize,
    lines: LineIndex<'a>,
    trivia: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self::resume_at(src, 0)
    }

    /// Start lexing at `offset`. Positions and spans stay relative to the
    /// whole source. An offset that is not a character boundary yields an
    /// empty stream.
    #[must_use]
    pub fn resume_at(src: &'a str, offset: usize) -> Self {
        let rest = src.get(offset..).unwrap_or("");
        Self {
            inner: LexToken::lexer(rest),
            base: offset,
            lines: LineIndex::new(src),
            trivia: false,
        }
    }

    /// Also yield whitespace and comment tokens.
    #[must_use]
    pub fn with_trivia(mut self) -> Self {
        self.trivia = true;
        self
    }

    fn classify(token: LexToken, text: &str, span: Span) -> Result<SyntaxKind, LexError> {
        let kind = match token {
            LexToken::Whitespace => SyntaxKind::T_WHITESPACE,
            LexToken::Comment => SyntaxKind::T_COMMENT,
            LexToken::UnterminatedComment => return Err(LexError::UnterminatedComment { span }),
            LexToken::Ident => identifier_kind(text),
            LexToken::SystemIdent => SyntaxKind::T_SYSTEM_IDENT,
            LexToken::Fill => SyntaxKind::T_FILL,
            LexToken::Int => SyntaxKind::T_INT,
            LexToken::Real => SyntaxKind::T_REAL,
            LexToken::String => SyntaxKind::T_STRING,
            LexToken::EscapedString => {
                check_escapes(text, span.start)?;
                SyntaxKind::T_STRING
            }
            LexToken::UnterminatedString => return Err(LexError::UnterminatedString { span }),
            LexToken::LParen => SyntaxKind::T_LPAREN,
            LexToken::RParen => SyntaxKind::T_RPAREN,
            LexToken::LBrace => SyntaxKind::T_LBRACE,
            LexToken::RBrace => SyntaxKind::T_RBRACE,
            LexToken::LBracket => SyntaxKind::T_LBRACKET,
            LexToken::RBracket => SyntaxKind::T_RBRACKET,
            LexToken::AttrOpen => SyntaxKind::T_ATTR_OPEN,
            LexToken::AttrClose => SyntaxKind::T_ATTR_CLOSE,
            LexToken::Semi => SyntaxKind::T_SEMI,
            LexToken::Comma => SyntaxKind::T_COMMA,
            LexToken::Dot => SyntaxKind::T_DOT,
            LexToken::DotDot => SyntaxKind::T_DOT_DOT,
            LexToken::Colon => SyntaxKind::T_COLON,
            LexToken::ColonColon => SyntaxKind::T_COLON_COLON,
            LexToken::Hash => SyntaxKind::T_HASH,
            LexToken::Question => SyntaxKind::T_QUESTION,
            LexToken::Eq => SyntaxKind::T_EQ,
            LexToken::EqEq => SyntaxKind::T_EQEQ,
            LexToken::Neq => SyntaxKind::T_NEQ,
            LexToken::Lt => SyntaxKind::T_LT,
            LexToken::Lte => SyntaxKind::T_LTE,
            LexToken::Gt => SyntaxKind::T_GT,
            LexToken::Gte => SyntaxKind::T_GTE,
            LexToken::Shl => SyntaxKind::T_SHL,
            LexToken::Shr => SyntaxKind::T_SHR,
            LexToken::LArrow => SyntaxKind::T_LARROW,
            LexToken::Plus => SyntaxKind::T_PLUS,
            LexToken::Minus => SyntaxKind::T_MINUS,
            LexToken::Star => SyntaxKind::T_STAR,
            LexToken::Slash => SyntaxKind::T_SLASH,
            LexToken::Percent => SyntaxKind::T_PERCENT,
            LexToken::Bang => SyntaxKind::T_BANG,
            LexToken::Tilde => SyntaxKind::T_TILDE,
            LexToken::Amp => SyntaxKind::T_AMP,
            LexToken::TildeAmp => SyntaxKind::T_TILDE_AMP,
            LexToken::Pipe => SyntaxKind::T_PIPE,
            LexToken::TildePipe => SyntaxKind::T_TILDE_PIPE,
            LexToken::Caret => SyntaxKind::T_CARET,
            LexToken::CaretTilde => SyntaxKind::T_CARET_TILDE,
            LexToken::TildeCaret => SyntaxKind::T_TILDE_CARET,
            LexToken::AmpAmp => SyntaxKind::T_AMP_AMP,
            LexToken::AmpAmpAmp => SyntaxKind::T_AMP_AMP_AMP,
            LexToken::PipePipe => SyntaxKind::T_PIPE_PIPE,
        };
        Ok(kind)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            let local = self.inner.span();
            let span = local.start + self.base..local.end + self.base;
            let text = self.inner.slice();
            let Ok(token) = result else {
                let ch = text.chars().next().unwrap_or('\u{fffd}');
                return Some(Err(LexError::InvalidCharacter { ch, span }));
            };
            let kind = match Self::classify(token, text, span.clone()) {
                Ok(kind) => kind,
                Err(err) => return Some(Err(err)),
            };
            if kind.is_trivia() && !self.trivia {
                continue;
            }
            let position = self.lines.position(span.start);
            return Some(Ok(Token {
                kind,
                span,
                position,
            }));
        }
    }
}

/// Result of lexing a whole source unit.
#[derive(Debug, Default)]
pub(crate) struct Lexed {
    /// Every token including trivia. Text that failed to lex is kept as
    /// `N_ERROR` so the CST stays lossless.
    pub(crate) tokens: Vec<(SyntaxKind, Span)>,
    pub(crate) errors: Vec<LexError>,
}

impl Lexed {
    /// Tokens the grammar consumes: no trivia, no error text.
    pub(crate) fn significant(&self) -> Vec<(SyntaxKind, Span)> {
        self.tokens
            .iter()
            .filter(|(kind, _)| !kind.is_trivia() && *kind != SyntaxKind::N_ERROR)
            .cloned()
            .collect()
    }
}

pub(crate) fn lex(src: &str) -> Lexed {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "rough capacity estimate"
    )]
    let estimated_tokens = src.len() / 4; // roughly four chars per token
    let mut out = Lexed {
        tokens: Vec::with_capacity(estimated_tokens),
        errors: Vec::new(),
    };
    for item in Lexer::new(src).with_trivia() {
        match item {
            Ok(token) => out.tokens.push((token.kind, token.span)),
            Err(err) => {
                out.tokens.push((SyntaxKind::N_ERROR, err.text_span()));
                out.errors.push(err);
            }
        }
    }
    out
}

/// Tokenise the source, excluding whitespace and comments.
///
/// Returns only significant tokens; text that failed to lex appears as
/// `N_ERROR`.
///
/// # Examples
///
/// ```rust
/// use bsvparse::{tokenize_without_trivia, SyntaxKind};
///
/// let tokens = tokenize_without_trivia("rule r; x <= 1; endrule // done");
/// assert!(!tokens.iter().any(|(k, _)| *k == SyntaxKind::T_COMMENT));
/// assert_eq!(tokens[0].0, SyntaxKind::K_RULE);
/// ```
#[must_use]
pub fn tokenize_without_trivia(src: &str) -> Vec<(SyntaxKind, Span)> {
    lex(src)
        .tokens
        .into_iter()
        .filter(|(k, _)| !k.is_trivia())
        .collect()
}

/// Tokenise the provided source.
///
/// # Examples
///
/// ```rust
/// use bsvparse::{tokenize_with_trivia, SyntaxKind};
///
/// let tokens = tokenize_with_trivia("import FIFO::*;");
/// assert_eq!(tokens.len(), 6);
/// assert_eq!(tokens[0].0, SyntaxKind::K_IMPORT);
/// ```
///
/// This variant retains whitespace and comment tokens.
#[must_use]
pub fn tokenize_with_trivia(src: &str) -> Vec<(SyntaxKind, Span)> {
    lex(src).tokens
}
