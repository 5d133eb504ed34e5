//! Tokenizer for JavaScript-like source.
//!
//! Covers enough of the language to walk real modules: comments, strings,
//! numbers, template literals with nested substitutions, and regular
//! expression literals. Operators the parser has no use for are folded
//! into [`TokenKind::Op`].

use super::ast::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Num(f64),
    /// Template literal without substitutions.
    Template(String),
    TemplateHead(String),
    TemplateMiddle(String),
    TemplateTail(String),
    Regex,

    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Spread,
    Question,
    Assign,
    Arrow,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// Any other operator run (`===`, `&&`, `<`, `?.`, ...).
    Op(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// True for an identifier token spelling `name` (keywords included).
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(n) if n == name)
    }
}

/// Lexer error with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "...", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    /// One entry per open `{`: true when it opened a template substitution.
    braces: Vec<bool>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            braces: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input. The final token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_whitespace_and_comments()?;
            let start = self.pos;
            let Some(c) = self.peek() else {
                self.tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(start, start),
                });
                return Ok(self.tokens);
            };
            let kind = self.next_kind(c)?;
            self.tokens.push(Token {
                kind,
                span: Span::new(start, self.pos),
            });
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn err(&self, message: impl Into<String>, offset: usize) -> LexError {
        LexError {
            message: message.into(),
            offset,
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    match self.src[self.pos + 2..].find("*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => return Err(self.err("unterminated block comment", start)),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_kind(&mut self, c: char) -> Result<TokenKind, LexError> {
        let start = self.pos;
        if c == '"' || c == '\'' {
            self.advance();
            return self.read_string(c, start);
        }
        if c == '`' {
            self.advance();
            return self.read_template(true, start);
        }
        if c.is_ascii_digit() || (c == '.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())) {
            return self.read_number(start);
        }
        if is_id_start(c) {
            return Ok(self.read_identifier());
        }
        if c == '/' && self.regex_allowed() {
            self.advance();
            return self.read_regex(start);
        }
        if c == '{' {
            self.advance();
            self.braces.push(false);
            return Ok(TokenKind::LBrace);
        }
        if c == '}' {
            self.advance();
            if self.braces.pop() == Some(true) {
                return self.read_template(false, start);
            }
            return Ok(TokenKind::RBrace);
        }

        let rest = &self.src[self.pos..];
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            return Ok(match *op {
                "..." => TokenKind::Spread,
                "=>" => TokenKind::Arrow,
                other => TokenKind::Op(other.to_string()),
            });
        }

        self.advance();
        Ok(match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            '=' => TokenKind::Assign,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            other => TokenKind::Op(other.to_string()),
        })
    }

    /// A `/` starts a regular expression only where an operand is expected.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last().map(|t| &t.kind) {
            None => true,
            Some(TokenKind::Ident(word)) => {
                matches!(word.as_str(), "return" | "typeof" | "case" | "in" | "of" | "void")
            }
            Some(
                TokenKind::Num(_)
                | TokenKind::Str(_)
                | TokenKind::Template(_)
                | TokenKind::TemplateTail(_)
                | TokenKind::Regex
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace,
            ) => false,
            Some(TokenKind::Op(op)) => op != "++" && op != "--",
            Some(_) => true,
        }
    }

    fn read_string(&mut self, quote: char, start: usize) -> Result<TokenKind, LexError> {
        let mut out = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => return Err(self.err("unterminated string literal", start)),
                Some(c) if c == quote => return Ok(TokenKind::Str(out)),
                Some('\\') => self.read_escape(&mut out, start)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn read_escape(&mut self, out: &mut String, start: usize) -> Result<(), LexError> {
        let Some(c) = self.advance() else {
            return Err(self.err("unterminated escape sequence", start));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' => {}
            'x' => {
                let code = self.read_hex(2, start)?;
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            'u' => {
                let code = if self.peek() == Some('{') {
                    self.advance();
                    let digits_start = self.pos;
                    while self.peek().is_some_and(|d| d != '}') {
                        self.advance();
                    }
                    let digits = &self.src[digits_start..self.pos];
                    self.advance();
                    u32::from_str_radix(digits, 16)
                        .map_err(|_| self.err("invalid unicode escape", start))?
                } else {
                    self.read_hex(4, start)?
                };
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn read_hex(&mut self, count: usize, start: usize) -> Result<u32, LexError> {
        let digits_start = self.pos;
        for _ in 0..count {
            if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                return Err(self.err("invalid hex escape", start));
            }
            self.advance();
        }
        u32::from_str_radix(&self.src[digits_start..self.pos], 16)
            .map_err(|_| self.err("invalid hex escape", start))
    }

    /// Read template text up to the closing backtick or the next `${`.
    fn read_template(&mut self, head: bool, start: usize) -> Result<TokenKind, LexError> {
        let mut out = String::new();
        loop {
            match self.advance() {
                None => return Err(self.err("unterminated template literal", start)),
                Some('`') => {
                    return Ok(if head {
                        TokenKind::Template(out)
                    } else {
                        TokenKind::TemplateTail(out)
                    });
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    self.braces.push(true);
                    return Ok(if head {
                        TokenKind::TemplateHead(out)
                    } else {
                        TokenKind::TemplateMiddle(out)
                    });
                }
                Some('\\') => self.read_escape(&mut out, start)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn read_number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('b' | 'B')) => 2,
            (Some('0'), Some('o' | 'O')) => 8,
            _ => 10,
        };
        if radix != 10 {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
            let digits: String = self.src[digits_start..self.pos]
                .chars()
                .filter(|c| *c != '_' && *c != 'n')
                .collect();
            return u64::from_str_radix(&digits, radix)
                .map(|n| TokenKind::Num(n as f64))
                .map_err(|_| self.err("invalid numeric literal", start));
        }

        let mut text = String::new();
        let mut seen_dot = false;
        let mut seen_exp = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => text.push(c),
                '_' => {}
                '.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    text.push(c);
                }
                'e' | 'E' if !seen_exp => {
                    seen_exp = true;
                    text.push(c);
                    if let Some(sign @ ('+' | '-')) = self.peek_at(1) {
                        self.advance();
                        text.push(sign);
                    }
                }
                _ => break,
            }
            self.advance();
        }
        // BigInt suffix
        if self.peek() == Some('n') {
            self.advance();
        }
        text.parse::<f64>()
            .map(TokenKind::Num)
            .map_err(|_| self.err("invalid numeric literal", start))
    }

    fn read_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(is_id_continue) {
            self.advance();
        }
        TokenKind::Ident(self.src[start..self.pos].to_string())
    }

    fn read_regex(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut in_class = false;
        loop {
            match self.advance() {
                None | Some('\n') => return Err(self.err("unterminated regular expression", start)),
                Some('\\') => {
                    self.advance();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        Ok(TokenKind::Regex)
    }
}

fn is_id_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_id_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_object_literal_tokens() {
        assert_eq!(
            kinds("{a: 'b', ...c}"),
            vec![
                TokenKind::LBrace,
                TokenKind::Ident("a".into()),
                TokenKind::Colon,
                TokenKind::Str("b".into()),
                TokenKind::Comma,
                TokenKind::Spread,
                TokenKind::Ident("c".into()),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("5 2.5 .5 1e3 0x10 1_000")[..6], [
            TokenKind::Num(5.0),
            TokenKind::Num(2.5),
            TokenKind::Num(0.5),
            TokenKind::Num(1000.0),
            TokenKind::Num(16.0),
            TokenKind::Num(1000.0),
        ]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(kinds(r#""a\"b" 'c\n'"#)[..2], [
            TokenKind::Str("a\"b".into()),
            TokenKind::Str("c\n".into()),
        ]);
    }

    #[test]
    fn test_template_with_nested_braces() {
        assert_eq!(
            kinds("`a${ {b: 1}.b }c`"),
            vec![
                TokenKind::TemplateHead("a".into()),
                TokenKind::LBrace,
                TokenKind::Ident("b".into()),
                TokenKind::Colon,
                TokenKind::Num(1.0),
                TokenKind::RBrace,
                TokenKind::Dot,
                TokenKind::Ident("b".into()),
                TokenKind::TemplateTail("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("a // line\n/* block */ b"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_regex_versus_division() {
        assert_eq!(kinds("x = /a'b/g")[2], TokenKind::Regex);
        assert_eq!(kinds("5 / 2")[1], TokenKind::Slash);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a === b => c"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Op("===".into()),
                TokenKind::Ident("b".into()),
                TokenKind::Arrow,
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = Lexer::new("const a = 'oops").tokenize().unwrap_err();
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = Lexer::new("ab  'é'").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(4, 8));
    }
}
