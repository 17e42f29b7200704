//! `rowan` integration and Bluespec syntax kinds.
//!
//! This module defines the `SyntaxKind` enum covering all tokens and
//! non-terminal nodes produced by the parser. The enumeration tags elements of
//! the lossless `rowan` tree and doubles as the token kind seen by the
//! expression, statement and declaration parsers. The `BsvLanguage` newtype
//! implements `rowan::Language` using conversions provided by `num_derive`.

use num_derive::{FromPrimitive as FromPrimitiveDerive, ToPrimitive as ToPrimitiveDerive};
use num_traits::{FromPrimitive, ToPrimitive};
use rowan::Language as RowanLanguage;
use rowan::SyntaxKind as RowanSyntaxKind;

/// Every possible token or node in the syntax tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitiveDerive, ToPrimitiveDerive,
)]
#[repr(u16)]
#[expect(non_camel_case_types, reason = "kind names mirror token classes")]
pub enum SyntaxKind {
    // Trivia
    T_COMMENT,
    T_WHITESPACE,
    // Identifiers and literals
    T_IDENT,
    T_TYPE_IDENT,
    T_SYSTEM_IDENT,
    T_INT,
    T_FILL,
    T_REAL,
    T_STRING,
    // Punctuation
    T_LPAREN,
    T_RPAREN,
    T_LBRACE,
    T_RBRACE,
    T_LBRACKET,
    T_RBRACKET,
    T_ATTR_OPEN,
    T_ATTR_CLOSE,
    T_SEMI,
    T_COMMA,
    T_DOT,
    T_DOT_DOT,
    T_COLON,
    T_COLON_COLON,
    T_HASH,
    T_QUESTION,
    T_EQ,
    T_EQEQ,
    T_NEQ,
    T_LT,
    T_LTE,
    T_GT,
    T_GTE,
    T_SHL,
    T_SHR,
    T_LARROW,
    T_PLUS,
    T_MINUS,
    T_STAR,
    T_SLASH,
    T_PERCENT,
    T_BANG,
    T_TILDE,
    T_AMP,
    T_TILDE_AMP,
    T_PIPE,
    T_TILDE_PIPE,
    T_CARET,
    T_CARET_TILDE,
    T_TILDE_CARET,
    T_AMP_AMP,
    T_AMP_AMP_AMP,
    T_PIPE_PIPE,
    // Keywords
    K_ACTION,
    K_ACTIONVALUE,
    K_BEGIN,
    K_BIT,
    K_CASE,
    K_ELSE,
    K_END,
    K_ENDACTION,
    K_ENDACTIONVALUE,
    K_ENDCASE,
    K_ENDFUNCTION,
    K_ENDINSTANCE,
    K_ENDINTERFACE,
    K_ENDMETHOD,
    K_ENDMODULE,
    K_ENDPACKAGE,
    K_ENDRULE,
    K_ENDTYPECLASS,
    K_EXPORT,
    K_FOR,
    K_FUNCTION,
    K_IF,
    K_IMPORT,
    K_INSTANCE,
    K_INTERFACE,
    K_LET,
    K_MATCHES,
    K_METHOD,
    K_MODULE,
    K_NUMERIC,
    K_PACKAGE,
    K_PARAMETER,
    K_PROVISOS,
    K_RETURN,
    K_RULE,
    K_STRING,
    K_TAGGED,
    K_TYPE,
    K_TYPECLASS,
    K_TYPEDEF,
    K_VALUEOF,
    K_WHILE,
    // Nodes
    N_SOURCE_FILE,
    N_PACKAGE,
    N_EXPORT_DECL,
    N_IMPORT_DECL,
    N_INTERFACE_DECL,
    N_MODULE_DEF,
    N_FUNCTION_DEF,
    N_VAR_DECL,
    N_VAR_ASSIGN,
    N_RULE,
    N_METHOD_DEF,
    N_SUBINTERFACE_DEF,
    // Special
    N_ERROR,
}

impl SyntaxKind {
    /// Whitespace and comments: kept in the CST, never seen by the parser.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::T_WHITESPACE | Self::T_COMMENT)
    }

    /// Reserved words resolved from the identifier pattern.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (Self::K_ACTION..=Self::K_WHILE).contains(&self)
    }

    /// Keywords that close a block or declaration body.
    ///
    /// Statement and declaration loops stop at any of these so a misplaced
    /// closer is reported once by the owning production instead of being
    /// swallowed by recovery.
    #[must_use]
    pub fn is_block_closer(self) -> bool {
        matches!(
            self,
            Self::K_END
                | Self::K_ENDACTION
                | Self::K_ENDACTIONVALUE
                | Self::K_ENDCASE
                | Self::K_ENDFUNCTION
                | Self::K_ENDINSTANCE
                | Self::K_ENDINTERFACE
                | Self::K_ENDMETHOD
                | Self::K_ENDMODULE
                | Self::K_ENDPACKAGE
                | Self::K_ENDRULE
                | Self::K_ENDTYPECLASS
        )
    }

    /// Human readable description used in diagnostics.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::T_COMMENT => "comment",
            Self::T_WHITESPACE => "whitespace",
            Self::T_IDENT => "identifier",
            Self::T_TYPE_IDENT => "type identifier",
            Self::T_SYSTEM_IDENT => "system identifier",
            Self::T_INT => "integer literal",
            Self::T_FILL => "fill literal",
            Self::T_REAL => "real literal",
            Self::T_STRING => "string literal",
            Self::T_LPAREN => "`(`",
            Self::T_RPAREN => "`)`",
            Self::T_LBRACE => "`{`",
            Self::T_RBRACE => "`}`",
            Self::T_LBRACKET => "`[`",
            Self::T_RBRACKET => "`]`",
            Self::T_ATTR_OPEN => "`(*`",
            Self::T_ATTR_CLOSE => "`*)`",
            Self::T_SEMI => "`;`",
            Self::T_COMMA => "`,`",
            Self::T_DOT => "`.`",
            Self::T_DOT_DOT => "`..`",
            Self::T_COLON => "`:`",
            Self::T_COLON_COLON => "`::`",
            Self::T_HASH => "`#`",
            Self::T_QUESTION => "`?`",
            Self::T_EQ => "`=`",
            Self::T_EQEQ => "`==`",
            Self::T_NEQ => "`!=`",
            Self::T_LT => "`<`",
            Self::T_LTE => "`<=`",
            Self::T_GT => "`>`",
            Self::T_GTE => "`>=`",
            Self::T_SHL => "`<<`",
            Self::T_SHR => "`>>`",
            Self::T_LARROW => "`<-`",
            Self::T_PLUS => "`+`",
            Self::T_MINUS => "`-`",
            Self::T_STAR => "`*`",
            Self::T_SLASH => "`/`",
            Self::T_PERCENT => "`%`",
            Self::T_BANG => "`!`",
            Self::T_TILDE => "`~`",
            Self::T_AMP => "`&`",
            Self::T_TILDE_AMP => "`~&`",
            Self::T_PIPE => "`|`",
            Self::T_TILDE_PIPE => "`~|`",
            Self::T_CARET => "`^`",
            Self::T_CARET_TILDE => "`^~`",
            Self::T_TILDE_CARET => "`~^`",
            Self::T_AMP_AMP => "`&&`",
            Self::T_AMP_AMP_AMP => "`&&&`",
            Self::T_PIPE_PIPE => "`||`",
            Self::K_ACTION => "`action`",
            Self::K_ACTIONVALUE => "`actionvalue`",
            Self::K_BEGIN => "`begin`",
            Self::K_BIT => "`bit`",
            Self::K_CASE => "`case`",
            Self::K_ELSE => "`else`",
            Self::K_END => "`end`",
            Self::K_ENDACTION => "`endaction`",
            Self::K_ENDACTIONVALUE => "`endactionvalue`",
            Self::K_ENDCASE => "`endcase`",
            Self::K_ENDFUNCTION => "`endfunction`",
            Self::K_ENDINSTANCE => "`endinstance`",
            Self::K_ENDINTERFACE => "`endinterface`",
            Self::K_ENDMETHOD => "`endmethod`",
            Self::K_ENDMODULE => "`endmodule`",
            Self::K_ENDPACKAGE => "`endpackage`",
            Self::K_ENDRULE => "`endrule`",
            Self::K_ENDTYPECLASS => "`endtypeclass`",
            Self::K_EXPORT => "`export`",
            Self::K_FOR => "`for`",
            Self::K_FUNCTION => "`function`",
            Self::K_IF => "`if`",
            Self::K_IMPORT => "`import`",
            Self::K_INSTANCE => "`instance`",
            Self::K_INTERFACE => "`interface`",
            Self::K_LET => "`let`",
            Self::K_MATCHES => "`matches`",
            Self::K_METHOD => "`method`",
            Self::K_MODULE => "`module`",
            Self::K_NUMERIC => "`numeric`",
            Self::K_PACKAGE => "`package`",
            Self::K_PARAMETER => "`parameter`",
            Self::K_PROVISOS => "`provisos`",
            Self::K_RETURN => "`return`",
            Self::K_RULE => "`rule`",
            Self::K_STRING => "`string`",
            Self::K_TAGGED => "`tagged`",
            Self::K_TYPE => "`type`",
            Self::K_TYPECLASS => "`typeclass`",
            Self::K_TYPEDEF => "`typedef`",
            Self::K_VALUEOF => "`valueOf`",
            Self::K_WHILE => "`while`",
            Self::N_SOURCE_FILE => "source file",
            Self::N_PACKAGE => "package",
            Self::N_EXPORT_DECL => "export declaration",
            Self::N_IMPORT_DECL => "import declaration",
            Self::N_INTERFACE_DECL => "interface declaration",
            Self::N_MODULE_DEF => "module definition",
            Self::N_FUNCTION_DEF => "function definition",
            Self::N_VAR_DECL => "variable declaration",
            Self::N_VAR_ASSIGN => "variable assignment",
            Self::N_RULE => "rule",
            Self::N_METHOD_DEF => "method definition",
            Self::N_SUBINTERFACE_DEF => "subinterface definition",
            Self::N_ERROR => "invalid text",
        }
    }
}

/// Newtype wrapper allowing `rowan` to store `SyntaxKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BsvLanguage;

impl RowanLanguage for BsvLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: RowanSyntaxKind) -> Self::Kind {
        SyntaxKind::from_u16(raw.0).unwrap_or(SyntaxKind::N_ERROR)
    }

    fn kind_to_raw(kind: Self::Kind) -> RowanSyntaxKind {
        RowanSyntaxKind(
            kind.to_u16()
                .unwrap_or_else(|| unreachable!("all SyntaxKind variants map to u16")),
        )
    }
}

/// Convenience alias for nodes of the lossless tree.
pub type SyntaxNode = rowan::SyntaxNode<BsvLanguage>;
