//! Precedence-climbing parser over a token slice.
//!
//! The parser never evaluates anything; it builds [`Expr`] trees for the
//! shapes the evaluator understands and collapses every other well-formed
//! construct into [`ExprKind::Opaque`]. Working on a pre-tokenized slice
//! lets callers start an expression at any token index and resume after it.

use super::ast::{BinaryOp, Expr, ExprKind, MemberKey, Prop, PropKey, Span, UnaryOp};
use super::lexer::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    /// The slice must end with an [`TokenKind::Eof`] token.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn at_index(tokens: &'t [Token], pos: usize) -> Self {
        Self { tokens, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    // ── token helpers ───────────────────────────────────────

    fn current(&self) -> &'t Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn kind(&self) -> &'t TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> &'t TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)].kind
    }

    fn bump(&mut self) -> &'t Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn previous_end(&self) -> usize {
        if self.pos == 0 {
            return 0;
        }
        self.tokens[self.pos - 1].span.end
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.current().span.start,
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<&'t Token, ParseError> {
        if self.kind() == kind {
            Ok(self.bump())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn opaque_from(&self, start: usize) -> Expr {
        Expr::new(ExprKind::Opaque, Span::new(start, self.previous_end()))
    }

    // ── skipping ────────────────────────────────────────────

    /// Consume a bracketed group starting at the current opening token.
    fn skip_group(&mut self) -> Result<(), ParseError> {
        let start = self.current().span.start;
        let mut depth = 0usize;
        loop {
            match self.bump().kind {
                TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::TemplateHead(_) => depth += 1,
                TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
                | TokenKind::TemplateTail(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError {
                        message: "unbalanced brackets".into(),
                        offset: start,
                    });
                }
                _ => {}
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Consume tokens up to (not including) the next top-level terminator.
    fn skip_to_terminator(&mut self) -> Result<(), ParseError> {
        loop {
            match self.kind() {
                TokenKind::Comma
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Semicolon
                | TokenKind::TemplateMiddle(_)
                | TokenKind::TemplateTail(_)
                | TokenKind::Eof => return Ok(()),
                TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::TemplateHead(_) => self.skip_group()?,
                _ => {
                    self.bump();
                }
            }
        }
    }

    // ── expressions ─────────────────────────────────────────

    /// Parse one assignment-level expression (a top-level comma ends it).
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let expr = self.parse_binary(0)?;

        match self.kind() {
            TokenKind::Question => {
                self.bump();
                self.parse_expression()?;
                self.expect(&TokenKind::Colon, "':' in conditional expression")?;
                self.parse_expression()?;
                Ok(self.opaque_from(start))
            }
            TokenKind::Assign => {
                self.bump();
                self.parse_expression()?;
                Ok(self.opaque_from(start))
            }
            TokenKind::Op(op) if op.ends_with('=') && !is_comparison(op) => {
                self.bump();
                self.parse_expression()?;
                Ok(self.opaque_from(start))
            }
            TokenKind::Arrow => {
                self.bump();
                if self.kind() == &TokenKind::LBrace {
                    self.skip_group()?;
                } else {
                    self.parse_expression()?;
                }
                Ok(self.opaque_from(start))
            }
            _ => Ok(expr),
        }
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let Some(prec) = binary_precedence(self.kind()) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            let op = match self.bump().kind {
                TokenKind::Plus => Some(BinaryOp::Add),
                TokenKind::Minus => Some(BinaryOp::Sub),
                TokenKind::Star => Some(BinaryOp::Mul),
                TokenKind::Slash => Some(BinaryOp::Div),
                TokenKind::Percent => Some(BinaryOp::Rem),
                _ => None,
            };
            let right = self.parse_binary(prec + 1)?;
            let span = left.span.to(right.span);
            left = match op {
                Some(op) => Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ),
                None => Expr::new(ExprKind::Opaque, span),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let op = match self.kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Op(op) if matches!(op.as_str(), "!" | "~" | "++" | "--") => None,
            TokenKind::Ident(word)
                if matches!(word.as_str(), "typeof" | "void" | "delete" | "await") =>
            {
                None
            }
            _ => return self.parse_postfix(),
        };
        self.bump();
        let arg = self.parse_unary()?;
        let span = Span::new(start, arg.span.end);
        Ok(match op {
            Some(op) => Expr::new(
                ExprKind::Unary {
                    op,
                    arg: Box::new(arg),
                },
                span,
            ),
            None => Expr::new(ExprKind::Opaque, span),
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let mut expr = self.parse_primary()?;
        loop {
            match self.kind() {
                TokenKind::Dot => {
                    self.bump();
                    let name = match &self.bump().kind {
                        TokenKind::Ident(name) => name.clone(),
                        _ => return Err(self.error("expected property name after '.'")),
                    };
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Named(name),
                        },
                        Span::new(start, self.previous_end()),
                    );
                }
                TokenKind::LBracket => {
                    self.bump();
                    let property = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Computed(Box::new(property)),
                        },
                        Span::new(start, self.previous_end()),
                    );
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        Span::new(start, self.previous_end()),
                    );
                }
                TokenKind::Op(op) if op == "?." => {
                    self.bump();
                    match self.kind() {
                        TokenKind::LParen | TokenKind::LBracket => self.skip_group()?,
                        _ => {
                            self.bump();
                        }
                    }
                    expr = self.opaque_from(start);
                }
                TokenKind::Op(op) if op == "++" || op == "--" => {
                    self.bump();
                    expr = self.opaque_from(start);
                }
                TokenKind::Template(_) | TokenKind::TemplateHead(_) => {
                    // tagged template
                    self.parse_primary()?;
                    expr = self.opaque_from(start);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Parse a parenthesized argument list starting at `(`.
    pub fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        loop {
            if self.kind() == &TokenKind::RParen {
                self.bump();
                return Ok(args);
            }
            if self.kind() == &TokenKind::Spread {
                let start = self.bump().span.start;
                self.parse_expression()?;
                args.push(self.opaque_from(start));
            } else {
                args.push(self.parse_expression()?);
            }
            match self.kind() {
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::RParen => {}
                _ => return Err(self.error("expected ',' or ')' in argument list")),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let start = token.span.start;
        match &token.kind {
            TokenKind::Num(n) => {
                self.bump();
                Ok(Expr::new(ExprKind::Num(*n), token.span))
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(Expr::new(ExprKind::Str(s.clone()), token.span))
            }
            TokenKind::Template(s) => {
                self.bump();
                Ok(Expr::new(
                    ExprKind::Template {
                        quasis: vec![s.clone()],
                        exprs: Vec::new(),
                    },
                    token.span,
                ))
            }
            TokenKind::TemplateHead(_) => self.parse_template(),
            TokenKind::Regex => {
                self.bump();
                Ok(Expr::new(ExprKind::Opaque, token.span))
            }
            TokenKind::LBrace => self.parse_object(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LParen => {
                self.bump();
                if self.kind() == &TokenKind::RParen {
                    // `()` of an arrow function
                    self.bump();
                    return Ok(self.opaque_from(start));
                }
                let inner = self.parse_expression()?;
                if self.kind() != &TokenKind::RParen {
                    self.skip_to_terminator_in_parens()?;
                    return Ok(self.opaque_from(start));
                }
                self.bump();
                Ok(inner)
            }
            TokenKind::Ident(word) => match word.as_str() {
                "function" => {
                    self.bump();
                    while !matches!(self.kind(), TokenKind::LParen | TokenKind::Eof) {
                        self.bump();
                    }
                    self.skip_group()?;
                    self.skip_group()?;
                    Ok(self.opaque_from(start))
                }
                "class" => {
                    self.bump();
                    while !matches!(self.kind(), TokenKind::LBrace | TokenKind::Eof) {
                        self.bump();
                    }
                    self.skip_group()?;
                    Ok(self.opaque_from(start))
                }
                "async" if matches!(self.peek_kind(1), TokenKind::Ident(w) if w == "function") => {
                    self.bump();
                    self.parse_primary()?;
                    Ok(self.opaque_from(start))
                }
                "new" => {
                    self.bump();
                    self.parse_postfix()?;
                    Ok(self.opaque_from(start))
                }
                "true" | "false" | "null" | "this" | "super" => {
                    self.bump();
                    Ok(Expr::new(ExprKind::Opaque, token.span))
                }
                _ => {
                    self.bump();
                    Ok(Expr::new(ExprKind::Ident(word.clone()), token.span))
                }
            },
            _ => Err(self.error("unexpected token")),
        }
    }

    /// Inside `( ... )` after a complete expression that is not followed by
    /// `)`: a sequence or arrow parameter list. Consume through the `)`.
    fn skip_to_terminator_in_parens(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_to_terminator()?;
            match self.kind() {
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::RParen => {
                    self.bump();
                    return Ok(());
                }
                _ => return Err(self.error("expected ')'")),
            }
        }
    }

    fn parse_template(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let TokenKind::TemplateHead(head) = &self.bump().kind else {
            return Err(self.error("expected template literal"));
        };
        let mut quasis = vec![head.clone()];
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expression()?);
            match &self.bump().kind {
                TokenKind::TemplateMiddle(text) => quasis.push(text.clone()),
                TokenKind::TemplateTail(text) => {
                    quasis.push(text.clone());
                    break;
                }
                _ => return Err(self.error("expected end of template substitution")),
            }
        }
        Ok(Expr::new(
            ExprKind::Template { quasis, exprs },
            Span::new(start, self.previous_end()),
        ))
    }

    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let start = self.bump().span.start;
        let mut items = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBracket => {
                    self.bump();
                    break;
                }
                TokenKind::Comma => {
                    // hole
                    self.bump();
                    continue;
                }
                TokenKind::Spread => {
                    let spread_start = self.bump().span.start;
                    self.parse_expression()?;
                    items.push(self.opaque_from(spread_start));
                }
                _ => items.push(self.parse_expression()?),
            }
            match self.kind() {
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::RBracket => {}
                _ => return Err(self.error("expected ',' or ']' in array literal")),
            }
        }
        Ok(Expr::new(
            ExprKind::Array(items),
            Span::new(start, self.previous_end()),
        ))
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBrace, "'{'")?.span.start;
        let mut props = Vec::new();
        loop {
            if self.kind() == &TokenKind::RBrace {
                self.bump();
                break;
            }
            props.push(self.parse_prop()?);
            match self.kind() {
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::RBrace => {}
                _ => return Err(self.error("expected ',' or '}' in object literal")),
            }
        }
        Ok(Expr::new(
            ExprKind::Object(props),
            Span::new(start, self.previous_end()),
        ))
    }

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        let start = self.current().span.start;
        if self.kind() == &TokenKind::Spread {
            self.bump();
            let arg = self.parse_expression()?;
            return Ok(Prop::Spread {
                span: Span::new(start, arg.span.end),
                arg,
            });
        }

        // accessor / async / generator methods
        let is_modifier = matches!(self.kind(), TokenKind::Ident(w) if matches!(w.as_str(), "get" | "set" | "async"))
            && !matches!(
                self.peek_kind(1),
                TokenKind::Colon | TokenKind::Comma | TokenKind::RBrace | TokenKind::LParen
            );
        if is_modifier || self.kind() == &TokenKind::Star {
            self.bump();
            if self.kind() == &TokenKind::Star {
                self.bump();
            }
        }

        let key = match &self.bump().kind {
            TokenKind::Ident(name) => PropKey::Ident(name.clone()),
            TokenKind::Str(s) => PropKey::Str(s.clone()),
            TokenKind::Num(n) => PropKey::Num(*n),
            TokenKind::LBracket => {
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RBracket, "']'")?;
                PropKey::Computed(Box::new(expr))
            }
            _ => return Err(self.error("expected property key")),
        };
        let key_span = Span::new(start, self.previous_end());

        let value = match self.kind() {
            TokenKind::Colon => {
                self.bump();
                self.parse_expression()?
            }
            TokenKind::LParen => {
                self.skip_group()?;
                if self.kind() != &TokenKind::LBrace {
                    return Err(self.error("expected method body"));
                }
                self.skip_group()?;
                self.opaque_from(start)
            }
            TokenKind::Assign => {
                self.bump();
                self.parse_expression()?;
                self.opaque_from(start)
            }
            TokenKind::Comma | TokenKind::RBrace => match &key {
                PropKey::Ident(name) => Expr::new(ExprKind::Ident(name.clone()), key_span),
                _ => return Err(self.error("expected ':' after property key")),
            },
            _ => return Err(self.error("expected ':' after property key")),
        };
        Ok(Prop::KeyValue {
            key,
            key_span,
            value,
        })
    }
}

fn is_comparison(op: &str) -> bool {
    matches!(op, "==" | "===" | "!=" | "!==" | "<=" | ">=")
}

fn binary_precedence(kind: &TokenKind) -> Option<u8> {
    Some(match kind {
        TokenKind::Plus | TokenKind::Minus => 10,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 11,
        TokenKind::Op(op) => match op.as_str() {
            "??" => 1,
            "||" => 2,
            "&&" => 3,
            "|" => 4,
            "^" => 5,
            "&" => 6,
            "==" | "!=" | "===" | "!==" => 7,
            "<" | ">" | "<=" | ">=" => 8,
            "<<" | ">>" | ">>>" => 9,
            "**" => 12,
            _ => return None,
        },
        TokenKind::Ident(word) if word == "instanceof" || word == "in" => 8,
        _ => return None,
    })
}
