//! Module scanning: imports, constant bindings and stylex call sites.
//!
//! The scanner walks the token stream of a whole module once. It keeps a
//! flat, module-level [`Scope`] current as it goes (imports first, since
//! they are hoisted, then declarations in source order) and hands each
//! stylex call to a visitor together with the scope at that point.

use std::ops::ControlFlow;

use log::trace;

use crate::error::Result;
use crate::eval::{Scope, evaluate};
use crate::js::{self, Expr, ExprKind, Parser, Span, Token, TokenKind};
use crate::schema::SchemaRegistry;
use crate::util::LineIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Create,
    CreateVars,
    OverrideVars,
}

impl CallKind {
    fn from_member(name: &str) -> Option<Self> {
        match name {
            "create" => Some(CallKind::Create),
            "unstable_createVars" => Some(CallKind::CreateVars),
            "unstable_overrideVars" => Some(CallKind::OverrideVars),
            _ => None,
        }
    }

    pub fn member(self) -> &'static str {
        match self {
            CallKind::Create => "create",
            CallKind::CreateVars => "unstable_createVars",
            CallKind::OverrideVars => "unstable_overrideVars",
        }
    }
}

/// One `<runtime>.<method>(...)` call.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub kind: CallKind,
    /// Local name of the stylex import the call goes through.
    pub runtime: String,
    pub args: Vec<Expr>,
    /// The whole call expression.
    pub span: Span,
    /// Variable the call initializes, if it is a declaration's whole
    /// initializer.
    pub binding: Option<String>,
    /// Where a statement may be inserted ahead of the enclosing top-level
    /// statement: the start of its line, or the statement itself when it
    /// shares the line with earlier code.
    pub statement_start: usize,
}

impl CallSite {
    /// Callee as written, e.g. `stylex.create`.
    pub fn callee(&self) -> String {
        format!("{}.{}", self.runtime, self.kind.member())
    }
}

/// Whether `source` can contain stylex calls at all.
pub fn mentions_stylex(source: &str) -> bool {
    memchr::memmem::find(source.as_bytes(), b"stylex").is_some()
}

pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    statement_starts: Vec<usize>,
    lines: LineIndex<'a>,
    import_sources: &'a [String],
    registry: &'a SchemaRegistry,
}

impl<'a> Scanner<'a> {
    pub fn new(
        source: &'a str,
        import_sources: &'a [String],
        registry: &'a SchemaRegistry,
    ) -> Result<Self> {
        let tokens = js::tokenize(source)?;
        Ok(Self {
            source,
            statement_starts: statement_starts(&tokens),
            tokens,
            lines: LineIndex::new(source),
            import_sources,
            registry,
        })
    }

    fn kind(&self, index: usize) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)].kind
    }

    fn ident(&self, index: usize) -> Option<&str> {
        match self.kind(index) {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    fn statement_start(&self, index: usize) -> usize {
        let start = self.statement_starts[index.min(self.statement_starts.len() - 1)];
        let line_start = self.lines.line_start(start);
        if self.source[line_start..start].trim().is_empty() {
            line_start
        } else {
            start
        }
    }

    fn parse_error(&self, error: js::parser::ParseError) -> crate::Error {
        js::parse_error(self.source, error.offset, error.message)
    }

    /// Scope established by the module's imports.
    fn import_scope(&self) -> Scope {
        let mut scope = Scope::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if token.is_ident("import")
                && !matches!(self.kind(i + 1), TokenKind::LParen | TokenKind::Dot)
                && (i == 0 || self.kind(i - 1) != &TokenKind::Dot)
            {
                self.import(i + 1, &mut scope);
            }
        }
        if scope.stylex_names().is_empty() {
            scope.add_stylex_name("stylex");
        }
        scope
    }

    /// Parse an import clause starting after `import`.
    fn import(&self, mut i: usize, scope: &mut Scope) {
        let mut locals = Vec::new();
        let mut named = Vec::new();
        loop {
            match self.kind(i) {
                TokenKind::Ident(word) if word == "from" => break,
                TokenKind::Ident(word) if word == "type" || word == "typeof" => i += 1,
                TokenKind::Ident(local) => {
                    locals.push(local.clone());
                    i += 1;
                }
                TokenKind::Star => {
                    // * as name
                    if let Some(local) = self.ident(i + 2) {
                        locals.push(local.to_string());
                    }
                    i += 3;
                }
                TokenKind::LBrace => {
                    i += 1;
                    while let Some(imported) = self.ident(i) {
                        let local = if self.ident(i + 1) == Some("as") {
                            i += 2;
                            self.ident(i).unwrap_or(imported)
                        } else {
                            imported
                        };
                        named.push((imported.to_string(), local.to_string()));
                        i += 1;
                        if self.kind(i) == &TokenKind::Comma {
                            i += 1;
                        }
                    }
                    if self.kind(i) != &TokenKind::RBrace {
                        return;
                    }
                    i += 1;
                }
                TokenKind::Comma => i += 1,
                _ => return,
            }
        }
        let TokenKind::Str(source) = self.kind(i + 1) else {
            return;
        };
        if !self.import_sources.iter().any(|s| s == source) {
            return;
        }
        for local in locals {
            trace!("stylex imported as {local}");
            scope.add_stylex_name(local);
        }
        for (imported, local) in named {
            if self.registry.preset(&imported).is_some() {
                scope.add_preset_import(local, imported);
            }
        }
    }

    /// A stylex call whose runtime identifier is at `i`.
    fn call_at(&self, i: usize, scope: &Scope) -> Option<(String, CallKind)> {
        let runtime = self.ident(i)?;
        if !scope.is_stylex(runtime) || (i > 0 && self.kind(i - 1) == &TokenKind::Dot) {
            return None;
        }
        if self.kind(i + 1) != &TokenKind::Dot || self.kind(i + 3) != &TokenKind::LParen {
            return None;
        }
        let kind = CallKind::from_member(self.ident(i + 2)?)?;
        Some((runtime.to_string(), kind))
    }

    /// Walk the module, calling `visit` for every stylex call in document
    /// order. Returns the final scope.
    pub fn scan<F>(&self, mut visit: F) -> Result<Scope>
    where
        F: FnMut(&CallSite, &mut Scope) -> ControlFlow<()>,
    {
        let mut scope = self.import_scope();
        let mut i = 0;
        // Comma that continues the current declaration, and whether it is `const`.
        let mut next_declarator: Option<(usize, bool)> = None;
        while i < self.tokens.len() {
            let token = &self.tokens[i];
            let declaration = match &token.kind {
                TokenKind::Ident(word) if matches!(word.as_str(), "const" | "let" | "var") => {
                    Some(word == "const")
                }
                TokenKind::Comma => next_declarator
                    .filter(|&(at, _)| at == i)
                    .map(|(_, constant)| constant),
                _ => None,
            };
            if let Some(constant) = declaration {
                next_declarator = None;
                let Some(name) = self.ident(i + 1) else {
                    i += 1;
                    continue;
                };
                if self.kind(i + 2) != &TokenKind::Assign {
                    scope.shadow(name);
                    if self.kind(i + 2) == &TokenKind::Comma {
                        next_declarator = Some((i + 2, constant));
                    }
                    i += 2;
                    continue;
                }
                let init = i + 3;
                let mut parser = Parser::at_index(&self.tokens, init);
                let expr = parser.parse_expression();
                if expr.is_ok() && self.kind(parser.pos()) == &TokenKind::Comma {
                    next_declarator = Some((parser.pos(), constant));
                }
                if let Ok(expr) = &expr
                    && let Some((runtime, kind)) = self.call_at(init, &scope)
                    && let Some(args) = whole_call_args(expr, init, parser.pos(), &self.tokens)
                {
                    let site = CallSite {
                        kind,
                        runtime,
                        args: args.to_vec(),
                        span: expr.span,
                        binding: Some(name.to_string()),
                        statement_start: self.statement_start(i),
                    };
                    scope.shadow(name);
                    if visit(&site, &mut scope).is_break() {
                        return Ok(scope);
                    }
                    i = parser.pos();
                    continue;
                }
                match expr {
                    Ok(expr) if constant => match evaluate(&expr, &scope, self.registry) {
                        Ok(value) => scope.bind_const(name, value),
                        Err(_) => scope.shadow(name),
                    },
                    _ => scope.shadow(name),
                }
                i = init;
                continue;
            }
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Ident(word) if word == "function" || word == "class" => {
                    if let Some(name) = self.ident(i + 1) {
                        scope.shadow(name);
                    }
                    i += 1;
                }
                TokenKind::Ident(_) => {
                    let Some((runtime, kind)) = self.call_at(i, &scope) else {
                        i += 1;
                        continue;
                    };
                    let mut parser = Parser::at_index(&self.tokens, i + 3);
                    let args = parser.parse_arguments().map_err(|e| self.parse_error(e))?;
                    let end = self.tokens[parser.pos() - 1].span.end;
                    let site = CallSite {
                        kind,
                        runtime,
                        args,
                        span: Span::new(token.span.start, end),
                        binding: None,
                        statement_start: self.statement_start(i),
                    };
                    if visit(&site, &mut scope).is_break() {
                        return Ok(scope);
                    }
                    i = parser.pos();
                }
                _ => i += 1,
            }
        }
        Ok(scope)
    }
}

/// Byte offset of the top-level statement each token belongs to.
///
/// A `;` at depth zero ends a statement. A `}` closing depth zero ends one
/// only when an identifier or keyword follows, so `}, b = 1` and `}).x`
/// stay in the same statement.
fn statement_starts(tokens: &[Token]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(tokens.len());
    let mut depth = 0usize;
    let mut current = 0;
    let mut after_semicolon = true;
    let mut after_brace = false;
    for token in tokens {
        if after_semicolon || (after_brace && matches!(token.kind, TokenKind::Ident(_))) {
            current = token.span.start;
        }
        after_semicolon = false;
        after_brace = false;
        starts.push(current);
        match token.kind {
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
            TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                after_brace = depth == 0;
            }
            TokenKind::Semicolon => after_semicolon = depth == 0,
            _ => {}
        }
    }
    starts
}

/// Arguments of `expr` when it, parsed from tokens `start..end`, is exactly
/// one call `<runtime>.<method>(...)` with nothing chained after it.
fn whole_call_args<'e>(expr: &'e Expr, start: usize, end: usize, tokens: &[Token]) -> Option<&'e [Expr]> {
    let ExprKind::Call { callee, args } = &expr.kind else {
        return None;
    };
    let whole = callee.member_path().is_some()
        && end > start + 3
        && matches!(tokens[end - 1].kind, TokenKind::RParen);
    whole.then_some(args.as_slice())
}
