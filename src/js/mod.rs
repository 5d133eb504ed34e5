//! Front end for the restricted style-definition grammar.
//!
//! - [`lexer`] turns source text into spanned tokens
//! - [`parser`] builds [`Expr`] trees from a token slice
//! - [`ast`] holds the tree types

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, ExprKind, MemberKey, Prop, PropKey, Span, UnaryOp};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::{Error, Result};
use crate::util::LineIndex;

/// Tokenize `source`, mapping lexer failures to [`Error::Parse`].
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source)
        .tokenize()
        .map_err(|e| parse_error(source, e.offset, e.message))
}

/// Parse a single expression from `source`.
pub fn parse_expression(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);
    let expr = parser
        .parse_expression()
        .map_err(|e| parse_error(source, e.offset, e.message))?;
    Ok(expr)
}

pub(crate) fn parse_error(source: &str, offset: usize, message: String) -> Error {
    let (line, column) = LineIndex::new(source).line_col(offset);
    Error::Parse {
        line,
        column,
        message,
    }
}
