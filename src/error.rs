//! Error types for the toolkit.
//!
//! The parsing side of the crate is deliberately permissive: a malformed or
//! truncated token stream never raises an error, it simply terminates the
//! list being built (see [`crate::tree`]). The failures that *are* reported
//! fall into three classes:
//!
//! - **Coercion failures**: asking for a numeric or boolean reading of text
//!   that does not parse as one (e.g. `to_i64` on `"abc"`). Empty text is not
//!   a failure — it coerces to the type's zero value.
//! - **Nesting overflow**: a [`JsonWriter`](crate::JsonWriter) tracks
//!   separator state in a 64-bit mask, so opening a 65th container level is
//!   rejected rather than silently corrupting output.
//! - **Unbalanced close**: ending a container that was never begun.
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::{Error, TaggedValue, TokenKind};
//!
//! let v = TaggedValue::text(TokenKind::Str, "not a number");
//! assert!(matches!(v.to_i64(), Err(Error::Coercion { .. })));
//! ```

use thiserror::Error;

/// All errors this crate reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text did not parse as the requested scalar type.
    #[error("cannot coerce {text:?} to {target}")]
    Coercion {
        /// The offending text, trimmed.
        text: String,
        /// Name of the requested target type.
        target: &'static str,
    },

    /// A writer was asked to open more container levels than its separator
    /// mask can track.
    #[error("nesting depth exceeds the maximum of {max} levels")]
    TooDeep { max: u32 },

    /// A writer was asked to close a container with none open.
    #[error("container close without a matching open")]
    UnbalancedClose,
}

impl Error {
    /// Creates a coercion error for text that failed to parse as `target`.
    pub fn coercion(text: &str, target: &'static str) -> Self {
        Error::Coercion {
            text: text.to_string(),
            target,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
