//! Packages and package-level declarations.
//!
//! A source unit is either `package Name; ... endpackage` or a bare sequence
//! of the same items. Each completed declaration records its span so the CST
//! builder can wrap it in a node.

mod exports;
mod interface;
mod method;
mod module;
mod types;

use log::debug;

use crate::SyntaxKind;
use crate::diagnostic::UnsupportedConstruct;
use crate::parser::Parser;
use crate::parser::ast::{Package, PackageBody, PackageStmt, SourceFile};
use crate::parser::statement::Simple;

use exports::{export_decl, import_decl};

impl Parser<'_> {
    pub(crate) fn parse_source_file(&mut self) -> SourceFile {
        let root = if self.ts.at(SyntaxKind::K_PACKAGE) {
            let package = self.parse_package();
            if !self.ts.at_eof() && !self.ts.halted() {
                self.ts.error_expected("end of input");
            }
            SourceFile::Package(package)
        } else {
            SourceFile::Items(self.parse_package_body(false))
        };
        let body = root.body();
        debug!(
            "source file: {} exports, {} imports, {} package statements",
            body.exports.len(),
            body.imports.len(),
            body.stmts.len()
        );
        root
    }

    /// `package Name ; body endpackage [: Name]`
    ///
    /// A malformed header is reported and the body is still parsed.
    fn parse_package(&mut self) -> Package {
        let start = self.ts.start();
        self.ts.bump(); // 'package'
        let name = self
            .ts
            .expect_ident(SyntaxKind::T_TYPE_IDENT)
            .map(|(name, _)| name)
            .unwrap_or_default();
        if self.ts.expect(SyntaxKind::T_SEMI).is_none() {
            self.ts.recover();
        }
        let body = self.parse_package_body(true);
        let end_label = if self.ts.expect(SyntaxKind::K_ENDPACKAGE).is_some() {
            self.parse_label()
        } else {
            None
        };
        let span = self.ts.span_from(start);
        self.node(SyntaxKind::N_PACKAGE, span.clone());
        Package {
            name,
            body,
            end_label,
            span,
        }
    }

    /// Exports, imports and package statements, in any order.
    fn parse_package_body(&mut self, in_package: bool) -> PackageBody {
        let src = self.ts.src();
        let mut body = PackageBody::default();
        while !self.ts.halted() {
            match self.ts.peek() {
                None => break,
                Some(SyntaxKind::K_ENDPACKAGE) if in_package => break,
                Some(SyntaxKind::K_EXPORT) => {
                    if let Some(decl) = self.parse_list(export_decl(src), SyntaxKind::N_EXPORT_DECL)
                    {
                        body.exports.push(decl);
                    }
                }
                Some(SyntaxKind::K_IMPORT) => {
                    if let Some(decl) = self.parse_list(import_decl(src), SyntaxKind::N_IMPORT_DECL)
                    {
                        body.imports.push(decl);
                    }
                }
                Some(kind) if kind.is_block_closer() => {
                    let span = self.ts.peek_span();
                    self.ts
                        .error(span, format!("unexpected {}", kind.describe()));
                    self.ts.bump();
                }
                Some(_) => {
                    let before = self.ts.position();
                    match self.parse_package_stmt() {
                        Some(stmt) => body.stmts.push(stmt),
                        None => self.resync(before),
                    }
                }
            }
        }
        body
    }

    fn parse_package_stmt(&mut self) -> Option<PackageStmt> {
        self.skip_attributes();
        match self.ts.peek() {
            Some(SyntaxKind::K_INTERFACE) => {
                self.parse_interface_decl().map(PackageStmt::Interface)
            }
            Some(SyntaxKind::K_MODULE) => self.parse_module_def().map(PackageStmt::Module),
            Some(SyntaxKind::K_FUNCTION) => self.parse_function_def().map(PackageStmt::Function),
            Some(SyntaxKind::K_TYPEDEF | SyntaxKind::K_TYPECLASS | SyntaxKind::K_INSTANCE) => {
                self.skip_unsupported_decl();
                None
            }
            None => {
                self.ts.error_expected("package statement");
                None
            }
            Some(_) => match self.parse_simple()? {
                Simple::VarDecl(decl) => {
                    self.node(SyntaxKind::N_VAR_DECL, decl.span.clone());
                    Some(PackageStmt::VarDecl(decl))
                }
                Simple::Assign(assign) => {
                    self.node(SyntaxKind::N_VAR_ASSIGN, assign.span.clone());
                    Some(PackageStmt::Assign(assign))
                }
                simple => {
                    self.report_misplaced(&simple, "at package level");
                    None
                }
            },
        }
    }

    /// Report and skip `typedef`, `typeclass` and `instance` declarations.
    fn skip_unsupported_decl(&mut self) {
        let start = self.ts.start();
        let construct = match self.ts.peek() {
            Some(SyntaxKind::K_TYPECLASS) => {
                self.ts
                    .skip_through(SyntaxKind::K_TYPECLASS, SyntaxKind::K_ENDTYPECLASS);
                self.parse_label();
                UnsupportedConstruct::Typeclass
            }
            Some(SyntaxKind::K_INSTANCE) => {
                self.ts
                    .skip_through(SyntaxKind::K_INSTANCE, SyntaxKind::K_ENDINSTANCE);
                self.parse_label();
                UnsupportedConstruct::Instance
            }
            _ => {
                self.ts.skip_statement();
                UnsupportedConstruct::Typedef
            }
        };
        let span = self.ts.span_from(start);
        self.ts.unsupported(span, construct);
    }

    /// Skip the rest of a definition whose header failed to parse, through
    /// its closing keyword.
    ///
    /// Stops early before the closer of an enclosing module, interface or
    /// package, and before a definition that cannot appear inside the
    /// skipped body. Interface blocks nested in a skipped rule, method,
    /// function or module body are stepped over whole.
    pub(crate) fn abandon(&mut self, close: SyntaxKind) {
        let nests_interfaces = close != SyntaxKind::K_ENDINTERFACE;
        let mut nested = 0usize;
        while let Some(kind) = self.ts.peek() {
            if nested == 0 {
                if kind == close {
                    self.ts.bump();
                    self.parse_label();
                    return;
                }
                if matches!(
                    kind,
                    SyntaxKind::K_ENDMODULE | SyntaxKind::K_ENDINTERFACE | SyntaxKind::K_ENDPACKAGE
                ) || ends_abandoned_body(close, kind)
                {
                    return;
                }
            }
            match kind {
                SyntaxKind::K_INTERFACE if nests_interfaces => nested += 1,
                SyntaxKind::K_ENDINTERFACE => nested = nested.saturating_sub(1),
                _ => {}
            }
            self.ts.bump();
        }
    }
}

/// Whether `kind` starts a definition that cannot occur in the body closed
/// by `close`.
fn ends_abandoned_body(close: SyntaxKind, kind: SyntaxKind) -> bool {
    match close {
        SyntaxKind::K_ENDRULE | SyntaxKind::K_ENDMETHOD | SyntaxKind::K_ENDFUNCTION => {
            matches!(kind, SyntaxKind::K_RULE | SyntaxKind::K_METHOD)
        }
        SyntaxKind::K_ENDINTERFACE => kind == SyntaxKind::K_RULE,
        _ => false,
    }
}
