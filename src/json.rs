//! Incremental JSON-style text building.
//!
//! [`JsonWriter`] assembles compact nested object/array text without a node
//! tree: separator placement is tracked with a single `u64` mask whose low
//! bit says whether the current nesting level has already emitted an
//! element. The mask bounds nesting to [`MAX_DEPTH`] levels; opening one
//! more is reported as [`Error::TooDeep`](crate::Error::TooDeep) instead of
//! silently corrupting the separators.
//!
//! String values are appended verbatim between quotes: callers pass content
//! that may contain quotes or control characters through [`escape`] first
//! (or use [`JsonWriter::escaped_value`]).
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::JsonWriter;
//!
//! let mut json = JsonWriter::new();
//! json.begin_object()?;
//! json.name("a").value(1i64);
//! json.name("b").begin_array()?;
//! json.value(2i64).value(3i64);
//! json.end_array()?;
//! json.end_object()?;
//! assert_eq!(json.as_str(), r#"{"a":1,"b":[2,3]}"#);
//! # Ok::<(), parsekit::Error>(())
//! ```

use crate::error::{Error, Result};

/// The deepest nesting a [`JsonWriter`] can track: one bit of separator
/// state per open container level.
pub const MAX_DEPTH: u32 = u64::BITS;

/// Escapes text for use as a JSON string value.
///
/// `"`, `\`, backspace, form feed, carriage return, line feed, and tab are
/// each replaced by their two-character escape sequence; everything else
/// passes through unchanged. This is a pure function — [`JsonWriter::value`]
/// does not apply it.
///
/// # Examples
///
/// ```rust
/// use parsekit::json::escape;
///
/// assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
/// assert_eq!(escape("line\nbreak"), "line\\nbreak");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// A scalar that can be written as one JSON value.
///
/// Booleans render as `true`/`false`, integers as decimal, floats as the
/// shortest decimal text that reparses to the same value (non-finite floats
/// become `null`), and strings verbatim between quotes.
pub trait JsonScalar {
    /// Appends this value's JSON encoding, without any separator.
    fn write_json(&self, out: &mut String);
}

impl JsonScalar for bool {
    fn write_json(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

macro_rules! json_scalar_integer {
    ($($t:ty),*) => {
        $(impl JsonScalar for $t {
            fn write_json(&self, out: &mut String) {
                out.push_str(&self.to_string());
            }
        })*
    };
}

json_scalar_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl JsonScalar for f64 {
    fn write_json(&self, out: &mut String) {
        if self.is_finite() {
            out.push_str(&self.to_string());
        } else {
            out.push_str("null");
        }
    }
}

impl JsonScalar for f32 {
    fn write_json(&self, out: &mut String) {
        if self.is_finite() {
            out.push_str(&self.to_string());
        } else {
            out.push_str("null");
        }
    }
}

impl JsonScalar for str {
    fn write_json(&self, out: &mut String) {
        out.push('"');
        out.push_str(self);
        out.push('"');
    }
}

impl JsonScalar for String {
    fn write_json(&self, out: &mut String) {
        self.as_str().write_json(out);
    }
}

impl<V: JsonScalar + ?Sized> JsonScalar for &V {
    fn write_json(&self, out: &mut String) {
        (*self).write_json(out);
    }
}

/// An incremental writer for compact nested object/array text.
///
/// Reusable: [`clear`](Self::clear) resets the accumulated text and nesting
/// state without releasing the allocation.
#[derive(Clone, Debug)]
pub struct JsonWriter {
    buf: String,
    /// Per-level "has emitted an element" bits; bit 0 is the current level.
    mask: u64,
    depth: u32,
}

impl JsonWriter {
    /// Creates a writer with a reasonable initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    /// Creates a writer with an explicit initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        JsonWriter {
            buf: String::with_capacity(capacity),
            mask: 0,
            depth: 0,
        }
    }

    /// Resets the writer for reuse, keeping the allocation.
    pub fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self.mask = 0;
        self.depth = 0;
        self
    }

    /// Comma if the current level already holds an element.
    fn prefix(&mut self) {
        if self.mask & 1 != 0 {
            self.buf.push(',');
        }
    }

    fn begin(&mut self, open: char) -> Result<&mut Self> {
        if self.depth == MAX_DEPTH {
            return Err(Error::TooDeep { max: MAX_DEPTH });
        }
        self.prefix();
        self.buf.push(open);
        self.mask <<= 1;
        self.depth += 1;
        Ok(self)
    }

    fn end(&mut self, close: char) -> Result<&mut Self> {
        if self.depth == 0 {
            return Err(Error::UnbalancedClose);
        }
        self.buf.push(close);
        // the closed container counts as an element of its parent
        self.mask = (self.mask >> 1) | 1;
        self.depth -= 1;
        Ok(self)
    }

    /// Opens an object.
    ///
    /// # Errors
    ///
    /// [`Error::TooDeep`](crate::Error::TooDeep) past [`MAX_DEPTH`] open
    /// levels.
    pub fn begin_object(&mut self) -> Result<&mut Self> {
        self.begin('{')
    }

    /// Closes an object.
    ///
    /// # Errors
    ///
    /// [`Error::UnbalancedClose`](crate::Error::UnbalancedClose) with no
    /// container open.
    pub fn end_object(&mut self) -> Result<&mut Self> {
        self.end('}')
    }

    /// Opens an array.
    ///
    /// # Errors
    ///
    /// [`Error::TooDeep`](crate::Error::TooDeep) past [`MAX_DEPTH`] open
    /// levels.
    pub fn begin_array(&mut self) -> Result<&mut Self> {
        self.begin('[')
    }

    /// Closes an array.
    ///
    /// # Errors
    ///
    /// [`Error::UnbalancedClose`](crate::Error::UnbalancedClose) with no
    /// container open.
    pub fn end_array(&mut self) -> Result<&mut Self> {
        self.end(']')
    }

    /// Appends a member key, `"name":`. The value that follows marks the
    /// level as populated, not the key itself.
    pub fn name(&mut self, name: &str) -> &mut Self {
        self.prefix();
        self.buf.push('"');
        self.buf.push_str(name);
        self.buf.push_str("\":");
        self.mask &= !1;
        self
    }

    /// Appends a scalar value. String content is written verbatim between
    /// quotes — pre-escape with [`escape`] if it may contain quotes or
    /// control characters.
    pub fn value<V: JsonScalar>(&mut self, value: V) -> &mut Self {
        self.prefix();
        value.write_json(&mut self.buf);
        self.mask |= 1;
        self
    }

    /// Appends a string value, escaping it first.
    pub fn escaped_value(&mut self, value: &str) -> &mut Self {
        self.value(escape(value))
    }

    /// Appends the literal `null`.
    pub fn null(&mut self) -> &mut Self {
        self.prefix();
        self.buf.push_str("null");
        self.mask |= 1;
        self
    }

    /// Splices pre-rendered text in value position, e.g. the output of
    /// another writer.
    pub fn verbatim(&mut self, text: &str) -> &mut Self {
        self.prefix();
        self.buf.push_str(text);
        self.mask |= 1;
        self
    }

    /// Number of container levels currently open.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// The text accumulated so far.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer, returning the accumulated text.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JsonWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_with_nested_array() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_object()?;
        json.name("a").value(1i64);
        json.name("b").begin_array()?;
        json.value(2i64).value(3i64);
        json.end_array()?;
        json.end_object()?;
        assert_eq!(json.as_str(), "{\"a\":1,\"b\":[2,3]}");
        Ok(())
    }

    #[test]
    fn scalars() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_array()?;
        json.value(true)
            .value(false)
            .value(-7i64)
            .value(2.5f64)
            .value("text")
            .null();
        json.end_array()?;
        assert_eq!(json.as_str(), "[true,false,-7,2.5,\"text\",null]");
        Ok(())
    }

    #[test]
    fn non_finite_floats_become_null() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_array()?;
        json.value(f64::NAN).value(f64::INFINITY);
        json.end_array()?;
        assert_eq!(json.as_str(), "[null,null]");
        Ok(())
    }

    #[test]
    fn sibling_containers_are_separated() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_array()?;
        json.begin_object()?.end_object()?;
        json.begin_object()?.end_object()?;
        json.end_array()?;
        assert_eq!(json.as_str(), "[{},{}]");
        Ok(())
    }

    #[test]
    fn output_reparses_with_serde_json() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_object()?;
        json.name("id").value(7u32);
        json.name("name").escaped_value("a \"quoted\" name");
        json.name("tags").begin_array()?;
        json.value("x").value("y");
        json.end_array()?;
        json.end_object()?;

        let parsed: serde_json::Value = serde_json::from_str(json.as_str()).unwrap();
        assert_eq!(parsed["id"], 7);
        assert_eq!(parsed["name"], "a \"quoted\" name");
        assert_eq!(parsed["tags"][1], "y");
        Ok(())
    }

    #[test]
    fn too_deep_is_reported() {
        let mut json = JsonWriter::new();
        for _ in 0..MAX_DEPTH {
            json.begin_array().unwrap();
        }
        assert_eq!(
            json.begin_array().unwrap_err(),
            Error::TooDeep { max: MAX_DEPTH }
        );
    }

    #[test]
    fn unbalanced_close_is_reported() {
        let mut json = JsonWriter::new();
        assert_eq!(json.end_array().unwrap_err(), Error::UnbalancedClose);
    }

    #[test]
    fn clear_resets_nesting_state() -> Result<()> {
        let mut json = JsonWriter::new();
        json.begin_object()?;
        json.name("a").value(1i64);
        json.clear();
        json.begin_array()?;
        json.value(2i64);
        json.end_array()?;
        assert_eq!(json.as_str(), "[2]");
        Ok(())
    }

    #[test]
    fn escape_function() {
        assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(
            escape("\u{0008}\u{000c}\r\n\t"),
            "\\b\\f\\r\\n\\t"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
