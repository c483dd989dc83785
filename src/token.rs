//! Token kinds, the tokenizer interface, and the default lexer.
//!
//! The rest of the crate consumes tokens through the [`Tokenize`] trait, so
//! any lexer honoring the same token grammar and cursor contract can be
//! substituted. [`Lexer`] is the default implementation: a single-pass,
//! zero-copy scanner over a borrowed `&str`.
//!
//! ## Token grammar
//!
//! - `{`, `[`, `(` open containers; `}`, `]`, `)` all produce [`TokenKind::Pop`]
//!   (closers are not matched against their openers — the grammar is lenient)
//! - `,` produces [`TokenKind::Comma`]
//! - a bare word is a [`TokenKind::Sym`]; a word or quoted string followed by
//!   `:` is a [`TokenKind::Let`] (a key)
//! - `"..."` with the usual backslash escapes is a [`TokenKind::Str`]
//! - digits, optionally signed, with at most one `.`, are [`TokenKind::Int`]
//!   or [`TokenKind::Float`] (no exponent notation)
//! - end of input is [`TokenKind::Stop`]
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::{Lexer, Tokenize, TokenKind};
//!
//! let mut lexer = Lexer::new("answer: 42");
//! let key = lexer.next_token();
//! assert_eq!(key.kind(), TokenKind::Let);
//! assert_eq!(key.to_text(), "answer");
//!
//! let value = lexer.next_token();
//! assert_eq!(value.kind(), TokenKind::Int);
//! assert_eq!(value.to_i64(), Ok(42));
//!
//! assert_eq!(lexer.next_token().kind(), TokenKind::Stop);
//! ```

use crate::value::TaggedValue;
use serde::Serialize;
use std::borrow::Cow;

/// The lexical category of one scanned token.
///
/// `Stop` and `Pop` never carry a value; every other kind may. `Any` is a
/// wildcard accepted by the skip operations and is never produced by a lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TokenKind {
    /// End of input.
    Stop,
    /// A container terminator (`}`, `]`, or `)`).
    Pop,
    /// `{`
    Brace,
    /// `[`
    Bracket,
    /// `(`
    Paren,
    /// `,`
    Comma,
    /// A key: a symbol or quoted string immediately followed by `:`.
    Let,
    /// A bare symbol.
    Sym,
    /// A quoted string.
    Str,
    /// An integer literal.
    Int,
    /// A floating-point literal.
    Float,
    /// Wildcard, used only by skip operations.
    Any,
}

impl TokenKind {
    /// Returns `true` for the kinds that open a container.
    #[inline]
    #[must_use]
    pub const fn opens_container(self) -> bool {
        matches!(self, TokenKind::Brace | TokenKind::Bracket | TokenKind::Paren)
    }

    /// Returns `true` for the kinds that terminate a list under construction
    /// (`Stop` and `Pop`).
    #[inline]
    #[must_use]
    pub const fn ends_list(self) -> bool {
        matches!(self, TokenKind::Stop | TokenKind::Pop)
    }

    /// Returns `true` for the kinds whose value is text (`Let`, `Sym`, `Str`).
    #[inline]
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, TokenKind::Let | TokenKind::Sym | TokenKind::Str)
    }
}

/// The tokenizer interface the tree builder and CSV reader depend on.
///
/// `pos`/`seek` expose the byte cursor so a caller can re-lex a region it has
/// already located by other means (the CSV reader does exactly this for
/// quoted and numeric fields).
pub trait Tokenize<'a> {
    /// Lexes the next token, advancing the cursor past it.
    fn next_token(&mut self) -> TaggedValue<'a>;

    /// Current byte position of the cursor.
    fn pos(&self) -> usize;

    /// Moves the cursor to an absolute byte position.
    fn seek(&mut self, pos: usize);

    /// Skips one token of the given kind without producing a value.
    ///
    /// For a container opener this consumes tokens, tracking depth, until the
    /// matching `Pop` (or `Stop`). For every other kind it is a no-op: the
    /// token was already consumed when its kind was observed.
    fn skip_token(&mut self, kind: TokenKind) {
        if !kind.opens_container() {
            return;
        }
        let mut depth = 0usize;
        loop {
            let kind = self.next_token().kind();
            if kind.opens_container() {
                depth += 1;
            } else if kind == TokenKind::Pop {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            } else if kind == TokenKind::Stop {
                return;
            }
        }
    }

    /// Skips whole terms until the enclosing list terminates, returning how
    /// many were skipped. Used for bracket matching and error recovery.
    fn skip_to_end(&mut self, kind: TokenKind) -> usize {
        let mut count = 0;
        if kind.ends_list() {
            return count;
        }
        loop {
            let kind = self.next_token().kind();
            if kind.ends_list() {
                return count;
            }
            self.skip_token(kind);
            count += 1;
        }
    }
}

/// The default tokenizer: a zero-copy scanner over a borrowed string.
///
/// The input is never mutated; text values borrow from it except where
/// string escapes force an owned, unescaped copy.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// The input this lexer scans.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    fn lex_symbol(&mut self) -> TaggedValue<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut it = start;
        loop {
            match bytes.get(it).copied() {
                Some(b':') => {
                    self.pos = it + 1;
                    return TaggedValue::text(TokenKind::Let, &self.input[start..it]);
                }
                Some(b' ' | b'\t' | b'\x0c' | b'\r' | b'\n') => {
                    self.pos = it + 1;
                    return TaggedValue::text(TokenKind::Sym, &self.input[start..it]);
                }
                Some(b'}' | b']' | b')' | b',') | None => {
                    self.pos = it;
                    return TaggedValue::text(TokenKind::Sym, &self.input[start..it]);
                }
                Some(_) => it += 1,
            }
        }
    }

    /// Lexes a quoted string starting at the cursor. On a malformed string
    /// (unterminated, or an unknown escape) the token is `Stop` and the
    /// cursor is left at the opening quote.
    fn lex_string(&mut self) -> TaggedValue<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos + 1;
        let mut it = start;

        // Fast path: no escapes, the value borrows straight from the input.
        loop {
            match bytes.get(it).copied() {
                Some(b'"') => {
                    return self.finish_string(it, Cow::Borrowed(&self.input[start..it]))
                }
                Some(b'\\') => break,
                None => return TaggedValue::none(TokenKind::Stop),
                Some(_) => it += 1,
            }
        }

        // Slow path: decode escapes into an owned buffer.
        let mut buf = self.input[start..it].to_string();
        loop {
            match bytes.get(it).copied() {
                Some(b'"') => return self.finish_string(it, Cow::Owned(buf)),
                Some(b'\\') => {
                    match bytes.get(it + 1).copied() {
                        Some(b'"') => buf.push('"'),
                        Some(b'\\') => buf.push('\\'),
                        Some(b'b') => buf.push('\u{0008}'),
                        Some(b'f') => buf.push('\u{000c}'),
                        Some(b'r') => buf.push('\r'),
                        Some(b'n') => buf.push('\n'),
                        Some(b't') => buf.push('\t'),
                        Some(b'u') => {
                            // from_str_radix tolerates a leading sign, so
                            // require four hex digits up front
                            let Some(ch) = self
                                .input
                                .get(it + 2..it + 6)
                                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                                .and_then(char::from_u32)
                            else {
                                return TaggedValue::none(TokenKind::Stop);
                            };
                            buf.push(ch);
                            it += 6;
                            continue;
                        }
                        _ => return TaggedValue::none(TokenKind::Stop),
                    }
                    it += 2;
                }
                None => return TaggedValue::none(TokenKind::Stop),
                Some(_) => match self.input[it..].chars().next() {
                    Some(ch) => {
                        buf.push(ch);
                        it += ch.len_utf8();
                    }
                    None => return TaggedValue::none(TokenKind::Stop),
                },
            }
        }
    }

    /// A closing quote immediately followed by `:` makes the string a key.
    fn finish_string(&mut self, close: usize, text: Cow<'a, str>) -> TaggedValue<'a> {
        if self.input.as_bytes().get(close + 1) == Some(&b':') {
            self.pos = close + 2;
            TaggedValue::text(TokenKind::Let, text)
        } else {
            self.pos = close + 1;
            TaggedValue::text(TokenKind::Str, text)
        }
    }

    fn lex_number(&mut self) -> TaggedValue<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut it = start;
        if matches!(bytes.get(it).copied(), Some(b'+' | b'-')) {
            it += 1;
        }
        let mut is_float = false;
        loop {
            match bytes.get(it).copied() {
                Some(b'0'..=b'9') => it += 1,
                Some(b'.') if !is_float => {
                    is_float = true;
                    it += 1;
                }
                _ => break,
            }
        }
        self.pos = it;
        let text = &self.input[start..it];
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return TaggedValue::int(i);
            }
            // literal wider than i64: degrade to a float token
        }
        TaggedValue::float(text.parse::<f64>().unwrap_or(0.0))
    }
}

impl<'a> Tokenize<'a> for Lexer<'a> {
    fn next_token(&mut self) -> TaggedValue<'a> {
        let bytes = self.input.as_bytes();
        loop {
            match bytes.get(self.pos).copied() {
                Some(b'{') => {
                    self.pos += 1;
                    return TaggedValue::none(TokenKind::Brace);
                }
                Some(b'[') => {
                    self.pos += 1;
                    return TaggedValue::none(TokenKind::Bracket);
                }
                Some(b'(') => {
                    self.pos += 1;
                    return TaggedValue::none(TokenKind::Paren);
                }
                Some(b'}' | b']' | b')') => {
                    self.pos += 1;
                    return TaggedValue::none(TokenKind::Pop);
                }
                Some(b',') => {
                    self.pos += 1;
                    return TaggedValue::none(TokenKind::Comma);
                }
                Some(b'"') => return self.lex_string(),
                Some(b'0'..=b'9') => return self.lex_number(),
                Some(b' ' | b'\t' | b'\x0c' | b'\r' | b'\n') => self.pos += 1,
                None => return TaggedValue::none(TokenKind::Stop),
                Some(b'+' | b'-')
                    if matches!(bytes.get(self.pos + 1).copied(), Some(b'0'..=b'9')) =>
                {
                    return self.lex_number()
                }
                Some(_) => return self.lex_symbol(),
            }
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }
}
