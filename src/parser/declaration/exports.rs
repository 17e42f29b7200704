//! Export and import lists.
//!
//! Both lists are flat, comma separated and end at the next `;`, so they are
//! parsed with `chumsky` combinators over that token slice rather than by the
//! recursive-descent cursor.

use chumsky::Parser as ChumskyParser;
use chumsky::Stream;
use chumsky::error::Error as _;
use chumsky::prelude::{Simple, end, filter_map, just};

use crate::diagnostic::Diagnostic;
use crate::parser::Parser;
use crate::parser::ast::{ExportDecl, ExportItem, ImportDecl};
use crate::{Span, SyntaxKind};

/// An identifier of one of `kinds`, returned as source text.
fn name<'a>(
    src: &'a str,
    kinds: &'static [SyntaxKind],
) -> impl ChumskyParser<SyntaxKind, String, Error = Simple<SyntaxKind>> + Clone + 'a {
    filter_map(move |span: Span, kind: SyntaxKind| {
        if kinds.contains(&kind) {
            Ok(src.get(span).unwrap_or_default().to_string())
        } else {
            Err(Simple::expected_input_found(
                span,
                kinds.iter().copied().map(Some),
                Some(kind),
            ))
        }
    })
}

/// `Pkg::*`
fn package_ref(
    src: &str,
) -> impl ChumskyParser<SyntaxKind, String, Error = Simple<SyntaxKind>> + Clone + '_ {
    name(src, &[SyntaxKind::T_TYPE_IDENT])
        .then_ignore(just(SyntaxKind::T_COLON_COLON))
        .then_ignore(just(SyntaxKind::T_STAR))
}

/// `ide`, `ide(..)`, `Ide`, `Ide(..)` or `Pkg::*`.
fn export_item(
    src: &str,
) -> impl ChumskyParser<SyntaxKind, ExportItem, Error = Simple<SyntaxKind>> + Clone + '_ {
    let members = just(SyntaxKind::T_LPAREN)
        .ignore_then(just(SyntaxKind::T_DOT_DOT))
        .then_ignore(just(SyntaxKind::T_RPAREN));
    let ident = name(src, &[SyntaxKind::T_IDENT, SyntaxKind::T_TYPE_IDENT])
        .then(members.or_not())
        .map(|(name, members)| ExportItem::Ident {
            name,
            with_members: members.is_some(),
        });
    package_ref(src).map(ExportItem::Package).or(ident)
}

pub(super) fn export_decl(
    src: &str,
) -> impl ChumskyParser<SyntaxKind, ExportDecl, Error = Simple<SyntaxKind>> + '_ {
    just(SyntaxKind::K_EXPORT)
        .ignore_then(
            export_item(src)
                .separated_by(just(SyntaxKind::T_COMMA))
                .at_least(1),
        )
        .then_ignore(just(SyntaxKind::T_SEMI))
        .map_with_span(|items, span: Span| ExportDecl { items, span })
        .then_ignore(end())
}

pub(super) fn import_decl(
    src: &str,
) -> impl ChumskyParser<SyntaxKind, ImportDecl, Error = Simple<SyntaxKind>> + '_ {
    just(SyntaxKind::K_IMPORT)
        .ignore_then(
            package_ref(src)
                .separated_by(just(SyntaxKind::T_COMMA))
                .at_least(1),
        )
        .then_ignore(just(SyntaxKind::T_SEMI))
        .map_with_span(|packages, span: Span| ImportDecl { packages, span })
        .then_ignore(end())
}

impl Parser<'_> {
    /// Run a list parser over the tokens up to the next `;` and move the
    /// cursor past them whether or not the list was well formed.
    pub(super) fn parse_list<T, P>(&mut self, list: P, node: SyntaxKind) -> Option<T>
    where
        P: ChumskyParser<SyntaxKind, T, Error = Simple<SyntaxKind>>,
    {
        let tokens = self.ts.list_tokens();
        let stop = tokens.last().map_or_else(|| self.ts.start(), |(_, sp)| sp.end);
        let start = self.ts.start();
        let stream = Stream::from_iter(stop..stop, tokens.into_iter());
        let result = list.parse(stream);
        self.ts.skip_until(stop);
        match result {
            Ok(value) => {
                self.node(node, start..stop);
                Some(value)
            }
            Err(errors) => {
                self.ts
                    .errors
                    .extend(errors.into_iter().map(Diagnostic::from));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tokenizer::lex;

    fn run_export(src: &str) -> Result<ExportDecl, Vec<Simple<SyntaxKind>>> {
        let tokens = lex(src).significant();
        let stream = Stream::from_iter(src.len()..src.len(), tokens.into_iter());
        export_decl(src).parse(stream)
    }

    #[rstest]
    #[case("export f;", vec![ExportItem::Ident { name: "f".into(), with_members: false }])]
    #[case("export Foo(..);", vec![ExportItem::Ident { name: "Foo".into(), with_members: true }])]
    #[case("export Pkg::*, g;", vec![
        ExportItem::Package("Pkg".into()),
        ExportItem::Ident { name: "g".into(), with_members: false },
    ])]
    fn export_items(#[case] src: &str, #[case] expected: Vec<ExportItem>) {
        let decl = run_export(src).ok().map(|d| d.items);
        assert_eq!(decl, Some(expected));
    }

    #[rstest]
    #[case("export ;")]
    #[case("export f g;")]
    #[case("export f")]
    fn malformed_exports(#[case] src: &str) {
        assert!(run_export(src).is_err());
    }

    #[test]
    fn import_list() {
        let src = "import FIFO::*, Vector::*;";
        let tokens = lex(src).significant();
        let stream = Stream::from_iter(src.len()..src.len(), tokens.into_iter());
        let decl = import_decl(src).parse(stream).ok().map(|d| d.packages);
        assert_eq!(decl, Some(vec!["FIFO".to_string(), "Vector".to_string()]));
    }
}
