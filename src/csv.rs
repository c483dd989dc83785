//! Streaming CSV reading and incremental CSV writing.
//!
//! [`CsvReader`] scans one delimiter-terminated field at a time from a
//! borrowed buffer. Quoted and numeric fields are re-lexed through the
//! tokenizer (quote unescaping, numeric parsing); everything else is a
//! zero-copy text slice. The input is never mutated and the cursor only
//! moves forward, so a buffer is scanned in a single pass.
//!
//! [`CsvWriter`] is the reverse direction: a flat record builder that tracks
//! only a field count per record.
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::{CsvReader, FieldOutcome};
//!
//! let mut csv = CsvReader::with_header("a,b,c\n1,2,3\n");
//! assert_eq!(csv.column("b"), Some(1));
//!
//! assert_eq!(csv.read_i64(), Ok(1));
//! assert_eq!(csv.read_i64(), Ok(2));
//! assert_eq!(csv.read_i64(), Ok(3));
//! assert_eq!(csv.outcome(), FieldOutcome::EndOfFile);
//! ```

use crate::error::Result;
use crate::token::{Lexer, TokenKind, Tokenize};
use crate::value::TaggedValue;
use indexmap::IndexMap;

/// Classification of the terminator that ended a scanned field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOutcome {
    /// More fields follow in this record.
    Record,
    /// The record is complete; more records follow.
    EndOfRecord,
    /// The input is exhausted.
    EndOfFile,
}

/// A streaming reader for comma-separated records.
///
/// Constructed over a borrowed buffer; reading is single-pass and forward
/// only. The tokenizer is pluggable through [`Tokenize`] and defaults to
/// [`Lexer`].
pub struct CsvReader<'a, T = Lexer<'a>>
where
    T: Tokenize<'a>,
{
    input: &'a str,
    tokens: T,
    pos: usize,
    header: Vec<String>,
    columns: IndexMap<String, usize>,
    outcome: FieldOutcome,
    value: TaggedValue<'a>,
}

impl<'a> CsvReader<'a> {
    /// Creates a reader at the start of `input` with the default lexer.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_tokens(input, Lexer::new(input))
    }

    /// Creates a reader and immediately consumes the first row as the
    /// header.
    #[must_use]
    pub fn with_header(input: &'a str) -> Self {
        let mut csv = Self::new(input);
        csv.read_header();
        csv
    }
}

impl<'a, T: Tokenize<'a>> CsvReader<'a, T> {
    /// Creates a reader over `input` re-lexing fields through `tokens`,
    /// which must scan the same buffer.
    pub fn from_tokens(input: &'a str, tokens: T) -> Self {
        CsvReader {
            input,
            tokens,
            pos: 0,
            header: Vec::new(),
            columns: IndexMap::new(),
            outcome: FieldOutcome::EndOfFile,
            value: TaggedValue::none(TokenKind::Stop),
        }
    }

    /// Scans the next field, classifying its terminator.
    ///
    /// The scan runs to the first comma, CR, LF, or end of input; a CR
    /// immediately followed by LF counts as a single record terminator. A
    /// field starting with a quote or a digit is re-lexed through the
    /// tokenizer (a quoted field may legitimately run past the delimiter the
    /// scan found, in which case the tokenizer's advance wins). Anything
    /// else is a raw text slice ending at the delimiter.
    pub fn read_field(&mut self) -> &TaggedValue<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut it = start;
        loop {
            match bytes.get(it).copied() {
                Some(b',' | b'\r' | b'\n') | None => break,
                Some(_) => it += 1,
            }
        }

        let field_end = it;
        let mut delim = it;
        if bytes.get(delim) == Some(&b'\r') && bytes.get(delim + 1) == Some(&b'\n') {
            delim += 1;
        }
        self.outcome = match bytes.get(delim).copied() {
            Some(b',') => FieldOutcome::Record,
            Some(b'\r' | b'\n') => FieldOutcome::EndOfRecord,
            _ => FieldOutcome::EndOfFile,
        };

        if matches!(bytes.get(start).copied(), Some(b'"' | b'0'..=b'9')) {
            self.tokens.seek(start);
            self.value = self.tokens.next_token();
            if self.tokens.pos() > delim {
                delim = self.tokens.pos();
            }
        } else {
            self.value = TaggedValue::text(TokenKind::Str, &self.input[start..field_end]);
        }

        if self.outcome == FieldOutcome::EndOfFile {
            self.pos = delim;
        } else {
            self.pos = delim + 1;
            if self.pos >= self.input.len() {
                self.outcome = FieldOutcome::EndOfFile;
            }
        }
        &self.value
    }

    /// Reads fields as text until the first record ends, recording the
    /// column names in order. Duplicate names keep their own columns; the
    /// name lookup resolves to the first occurrence.
    pub fn read_header(&mut self) {
        self.header.clear();
        self.columns.clear();
        loop {
            let name = self.read_str();
            let index = self.header.len();
            self.columns.entry(name.clone()).or_insert(index);
            self.header.push(name);
            if self.outcome != FieldOutcome::Record {
                break;
            }
        }
    }

    /// The header captured by [`read_header`](Self::read_header), names in
    /// column order. One entry per column, duplicates included.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Index of a named column, if the header contains it. A name appearing
    /// in more than one column resolves to the leftmost.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// The terminator classification of the last field read.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> FieldOutcome {
        self.outcome
    }

    /// The token kind of the last field read.
    #[inline]
    #[must_use]
    pub fn token(&self) -> TokenKind {
        self.value.kind()
    }

    /// The last field read.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &TaggedValue<'a> {
        &self.value
    }

    /// `true` once the input is exhausted.
    #[inline]
    #[must_use]
    pub fn done(&self) -> bool {
        self.outcome == FieldOutcome::EndOfFile
    }

    /// Reads the next field as text.
    pub fn read_str(&mut self) -> String {
        self.read_field();
        self.value.to_text().into_owned()
    }

    /// Reads the next field as `i64`.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_field();
        self.value.to_i64()
    }

    /// Reads the next field as `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_field();
        self.value.to_i32()
    }

    /// Reads the next field as `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_field();
        self.value.to_i16()
    }

    /// Reads the next field as `u8`.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_field();
        self.value.to_u8()
    }

    /// Reads the next field as `f64`.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_field();
        self.value.to_f64()
    }

    /// Reads the next field as `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_field();
        self.value.to_f32()
    }

    /// Reads the next field as `bool`.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_field();
        self.value.to_bool()
    }
}

/// A scalar that can be written as one CSV field.
///
/// Numbers and booleans render as plain decimal text. A non-empty string is
/// wrapped in quotes with no internal escaping; an empty string (or `None`)
/// is a bare zero-length field.
pub trait CsvScalar {
    /// Appends this value's field encoding, without any separator.
    fn write_field(&self, out: &mut String);
}

impl CsvScalar for bool {
    fn write_field(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

macro_rules! csv_scalar_display {
    ($($t:ty),*) => {
        $(impl CsvScalar for $t {
            fn write_field(&self, out: &mut String) {
                out.push_str(&self.to_string());
            }
        })*
    };
}

csv_scalar_display!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl CsvScalar for str {
    fn write_field(&self, out: &mut String) {
        if !self.is_empty() {
            out.push('"');
            out.push_str(self);
            out.push('"');
        }
    }
}

impl CsvScalar for String {
    fn write_field(&self, out: &mut String) {
        self.as_str().write_field(out);
    }
}

impl<V: CsvScalar> CsvScalar for Option<V> {
    fn write_field(&self, out: &mut String) {
        if let Some(v) = self {
            v.write_field(out);
        }
    }
}

impl<V: CsvScalar + ?Sized> CsvScalar for &V {
    fn write_field(&self, out: &mut String) {
        (*self).write_field(out);
    }
}

/// An incremental writer for flat comma-separated records.
///
/// Reusable: [`clear`](Self::clear) resets the accumulated text and field
/// count without releasing the allocation.
///
/// # Examples
///
/// ```rust
/// use parsekit::CsvWriter;
///
/// let mut csv = CsvWriter::new();
/// csv.begin_record().value("x").value(1i64);
/// csv.begin_record().value("y").value(2i64);
/// assert_eq!(csv.as_str(), "\"x\",1\n\"y\",2");
/// ```
#[derive(Clone, Debug)]
pub struct CsvWriter {
    buf: String,
    fields: usize,
}

impl CsvWriter {
    /// Creates a writer with a reasonable initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    /// Creates a writer with an explicit initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CsvWriter {
            buf: String::with_capacity(capacity),
            fields: 0,
        }
    }

    /// Resets the writer for reuse, keeping the allocation.
    pub fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self.fields = 0;
        self
    }

    /// Starts a new record, terminating the previous one with `\n` if it
    /// emitted any field.
    pub fn begin_record(&mut self) -> &mut Self {
        if self.fields > 0 {
            self.buf.push('\n');
        }
        self.fields = 0;
        self
    }

    /// Appends one field, preceded by a comma unless it is the record's
    /// first.
    pub fn value<V: CsvScalar>(&mut self, value: V) -> &mut Self {
        if self.fields > 0 {
            self.buf.push(',');
        }
        value.write_field(&mut self.buf);
        self.fields += 1;
        self
    }

    /// Starts a record and writes every item of `values` as a field.
    pub fn write_record<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: CsvScalar,
    {
        self.begin_record();
        for value in values {
            self.value(value);
        }
        self
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

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CsvWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}
