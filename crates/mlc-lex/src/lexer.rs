//! Single-pass, cursor-based scanner (spec §4.1).
//!
//! Mirrors the source language's reference lexer: a mutable byte-offset
//! cursor over the whole input, one rule tried per position in a fixed
//! order, no backtracking. Maximal-munch identifier scanning happens
//! before keyword lookup, so `lettuce` lexes as one `Ident`, not `let`
//! followed by `tuce`.

use crate::error::{LexError, LexResult};
use crate::token::{Token, TokenKind};
use mlc_util::Span;

pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> char {
        self.chars.get(self.position).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.position + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.peek();
        if self.position < self.chars.len() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn span_from(&self, start: usize, start_line: u32, start_col: u32) -> Span {
        Span::new(start, self.position, start_line, start_col)
    }

    /// Produce every non-filtered token up to and including the single
    /// trailing `TokenKind::Eof`, or the first [`LexError`] encountered.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> LexResult<Token> {
        loop {
            if self.position >= self.chars.len() {
                let span = self.span_from(self.position, self.line, self.column);
                return Ok(Token::new("", TokenKind::Eof, span));
            }

            let start = self.position;
            let (start_line, start_col) = (self.line, self.column);
            let c = self.peek();

            // Rule 2: whitespace and newlines, filtered.
            if c == '\n' || c == ' ' || c == '\t' || c == '\r' {
                self.advance();
                continue;
            }

            // Rule 3: line comments.
            if c == '-' && self.peek_next() == '-' {
                self.advance();
                self.advance();
                while self.position < self.chars.len() && self.peek() != '\n' {
                    self.advance();
                }
                continue;
            }

            // Rule 4: block comments.
            if c == '(' && self.peek_next() == '*' {
                self.advance();
                self.advance();
                loop {
                    if self.position >= self.chars.len() {
                        let span = self.span_from(start, start_line, start_col);
                        return Err(LexError::UnterminatedComment(span));
                    }
                    if self.peek() == '*' && self.peek_next() == ')' {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            // Rule 5: decimal number.
            if c.is_ascii_digit() {
                while self.position < self.chars.len() && self.peek().is_ascii_digit() {
                    self.advance();
                }
                let text: String = self.chars[start..self.position].iter().collect();
                let span = self.span_from(start, start_line, start_col);
                return Ok(Token::new(text, TokenKind::Number, span));
            }

            // Rule 6: identifier / keyword, maximal munch then lookup.
            if c.is_alphabetic() {
                while self.position < self.chars.len()
                    && (self.peek().is_alphanumeric() || self.peek() == '_')
                {
                    self.advance();
                }
                let text: String = self.chars[start..self.position].iter().collect();
                let span = self.span_from(start, start_line, start_col);
                let kind = keyword_kind(&text).unwrap_or(TokenKind::Ident);
                return Ok(Token::new(text, kind, span));
            }

            self.advance();

            // Rules 7-8: operators, longest match first.
            let (text, kind): (&str, TokenKind) = match c {
                '+' => ("+", TokenKind::Plus),
                '-' => {
                    if self.peek() == '>' {
                        self.advance();
                        ("->", TokenKind::TypeArrow)
                    } else {
                        ("-", TokenKind::Minus)
                    }
                }
                '*' => ("*", TokenKind::Star),
                '/' => ("/", TokenKind::Slash),
                '<' => {
                    if self.peek() == '-' {
                        self.advance();
                        ("<-", TokenKind::Assign)
                    } else if self.peek() == '=' {
                        self.advance();
                        ("<=", TokenKind::Leq)
                    } else {
                        ("<", TokenKind::Lth)
                    }
                }
                '=' => {
                    if self.peek() == '>' {
                        self.advance();
                        ("=>", TokenKind::Arrow)
                    } else if self.peek() == '=' {
                        self.advance();
                        ("==", TokenKind::Eq)
                    } else {
                        ("=", TokenKind::Eq)
                    }
                }
                '~' => ("~", TokenKind::Tilde),
                ':' => (":", TokenKind::Colon),
                '(' => ("(", TokenKind::LParen),
                ')' => (")", TokenKind::RParen),
                other => {
                    let span = self.span_from(start, start_line, start_col);
                    return Err(LexError::Unexpected(other, span));
                }
            };
            let span = self.span_from(start, start_line, start_col);
            return Ok(Token::new(text, kind, span));
        }
    }
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "let" => TokenKind::Let,
        "rec" => TokenKind::Rec,
        "in" => TokenKind::In,
        "end" => TokenKind::End,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "or" => TokenKind::Or,
        "and" => TokenKind::And,
        "not" => TokenKind::Not,
        "mod" => TokenKind::Mod,
        "fn" => TokenKind::Fn,
        "int" => TokenKind::IntTy,
        "bool" => TokenKind::BoolTy,
        _ => return None,
    })
}
