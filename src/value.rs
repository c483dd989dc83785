//! The tagged scalar produced by tokenizers.
//!
//! A [`TaggedValue`] pairs a [`TokenKind`] with the raw datum the lexer
//! scanned: a text slice (borrowed from the input where possible), a 64-bit
//! integer, or a 64-bit float. Which alternative is meaningful is decided by
//! the kind, and the `to_*` accessors reinterpret the datum under a fixed
//! coercion table:
//!
//! | kind                | numeric target        | text target | bool target |
//! |---------------------|-----------------------|-------------|-------------|
//! | `Int`               | cast from the integer | decimal     | `!= 0`      |
//! | `Float`             | cast from the float   | decimal     | `!= 0.0`    |
//! | `Let`/`Sym`/`Str`   | parse the text        | the text    | parse       |
//! | anything else       | `0` / `0.0`           | `""`        | `false`     |
//!
//! Empty text coerces to the target type's zero value; non-empty text that
//! fails to parse is reported as [`Error::Coercion`] rather than silently
//! zeroed, so a malformed field is distinguishable from an absent one.
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::{TaggedValue, TokenKind};
//!
//! let n = TaggedValue::int(42);
//! assert_eq!(n.to_i64(), Ok(42));
//! assert_eq!(n.to_f64(), Ok(42.0));
//! assert_eq!(n.to_text(), "42");
//!
//! let s = TaggedValue::text(TokenKind::Str, "42");
//! assert_eq!(s.to_i64(), Ok(42));
//!
//! let empty = TaggedValue::text(TokenKind::Str, "");
//! assert_eq!(empty.to_i64(), Ok(0));
//! assert_eq!(empty.to_bool(), Ok(false));
//! ```

use crate::error::{Error, Result};
use crate::token::TokenKind;
use std::borrow::Cow;
use std::fmt;

/// A discriminated scalar: text, integer, or float, tagged with the token
/// kind that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedValue<'a> {
    kind: TokenKind,
    raw: Raw<'a>,
}

#[derive(Clone, Debug, PartialEq)]
enum Raw<'a> {
    None,
    Text(Cow<'a, str>),
    Int(i64),
    Float(f64),
}

impl<'a> TaggedValue<'a> {
    /// A valueless token (`Stop`, `Pop`, `Comma`, container openers).
    #[must_use]
    pub const fn none(kind: TokenKind) -> Self {
        TaggedValue {
            kind,
            raw: Raw::None,
        }
    }

    /// A text token. `kind` should be one of `Let`, `Sym`, `Str`.
    #[must_use]
    pub fn text(kind: TokenKind, text: impl Into<Cow<'a, str>>) -> Self {
        TaggedValue {
            kind,
            raw: Raw::Text(text.into()),
        }
    }

    /// An integer token.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        TaggedValue {
            kind: TokenKind::Int,
            raw: Raw::Int(value),
        }
    }

    /// A float token.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        TaggedValue {
            kind: TokenKind::Float,
            raw: Raw::Float(value),
        }
    }

    /// The token kind that discriminates this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw text alternative, if this is a text token.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.raw {
            Raw::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// The raw integer alternative, if this is an `Int` token.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self.raw {
            Raw::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The raw float alternative, if this is a `Float` token.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self.raw {
            Raw::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Coerces to `i64`.
    ///
    /// # Errors
    ///
    /// [`Error::Coercion`] if this is a non-empty text token that does not
    /// parse as a decimal integer.
    pub fn to_i64(&self) -> Result<i64> {
        match (self.kind, &self.raw) {
            (TokenKind::Int, Raw::Int(i)) => Ok(*i),
            (TokenKind::Float, Raw::Float(f)) => Ok(*f as i64),
            (k, Raw::Text(s)) if k.is_text() => parse_text::<i64>(s, "i64"),
            _ => Ok(0),
        }
    }

    /// Coerces to `i32` (numeric values are truncated).
    pub fn to_i32(&self) -> Result<i32> {
        Ok(self.to_i64()? as i32)
    }

    /// Coerces to `i16` (numeric values are truncated).
    pub fn to_i16(&self) -> Result<i16> {
        Ok(self.to_i64()? as i16)
    }

    /// Coerces to `u8` (numeric values are truncated).
    pub fn to_u8(&self) -> Result<u8> {
        Ok(self.to_i64()? as u8)
    }

    /// Coerces to `f64`.
    ///
    /// # Errors
    ///
    /// [`Error::Coercion`] if this is a non-empty text token that does not
    /// parse as a decimal number.
    pub fn to_f64(&self) -> Result<f64> {
        match (self.kind, &self.raw) {
            (TokenKind::Int, Raw::Int(i)) => Ok(*i as f64),
            (TokenKind::Float, Raw::Float(f)) => Ok(*f),
            (k, Raw::Text(s)) if k.is_text() => parse_text::<f64>(s, "f64"),
            _ => Ok(0.0),
        }
    }

    /// Coerces to `f32`.
    pub fn to_f32(&self) -> Result<f32> {
        Ok(self.to_f64()? as f32)
    }

    /// Coerces to `bool`. Numbers compare against zero; text must read
    /// `true` or `false` (case-insensitive); empty text is `false`.
    pub fn to_bool(&self) -> Result<bool> {
        match (self.kind, &self.raw) {
            (TokenKind::Int, Raw::Int(i)) => Ok(*i != 0),
            (TokenKind::Float, Raw::Float(f)) => Ok(*f != 0.0),
            (k, Raw::Text(s)) if k.is_text() => {
                let t = s.trim();
                if t.is_empty() {
                    Ok(false)
                } else if t.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if t.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(Error::coercion(t, "bool"))
                }
            }
            _ => Ok(false),
        }
    }

    /// Coerces to text. Never fails: numbers render as decimal text,
    /// valueless tokens as `""`.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match (self.kind, &self.raw) {
            (TokenKind::Int, Raw::Int(i)) => Cow::Owned(i.to_string()),
            (TokenKind::Float, Raw::Float(f)) => Cow::Owned(f.to_string()),
            (k, Raw::Text(s)) if k.is_text() => Cow::Borrowed(s.as_ref()),
            _ => Cow::Borrowed(""),
        }
    }

    /// Consumes the value, coercing to text without copying a borrowed
    /// alternative.
    #[must_use]
    pub fn into_text(self) -> Cow<'a, str> {
        match (self.kind, self.raw) {
            (TokenKind::Int, Raw::Int(i)) => Cow::Owned(i.to_string()),
            (TokenKind::Float, Raw::Float(f)) => Cow::Owned(f.to_string()),
            (k, Raw::Text(s)) if k.is_text() => s,
            _ => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for TaggedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn parse_text<T>(s: &str, target: &'static str) -> Result<T>
where
    T: std::str::FromStr + Default,
{
    let t = s.trim();
    if t.is_empty() {
        return Ok(T::default());
    }
    t.parse().map_err(|_| Error::coercion(t, target))
}
