//! # parsekit
//!
//! A small, lenient structured-text toolkit:
//!
//! - **Token trees**: [`parse_tree`] turns a flat token stream into a nested
//!   tree of scalar and container [`Node`]s, using a permissive grammar that
//!   never reports a parse error — malformed input just terminates the list
//!   being built.
//! - **Tagged values**: [`TaggedValue`] wraps one scanned scalar (text,
//!   integer, or float) and reinterprets it under explicit coercion rules.
//! - **Streaming CSV**: [`CsvReader`] scans one field at a time from a
//!   borrowed buffer, zero-copy for raw fields, with typed accessors.
//! - **Incremental writers**: [`JsonWriter`] and [`CsvWriter`] build nested
//!   and flat text output, tracking nesting/field state with a single
//!   integer instead of a stack.
//!
//! ## Reading a token tree
//!
//! ```rust
//! use parsekit::{parse_tree, TokenKind};
//!
//! let tree = parse_tree("{name: \"Suzie Cobol\" age: 73}");
//! let fields = tree[0].as_list().unwrap();
//! assert_eq!(fields[0].as_str(), Some("name"));
//! assert_eq!(fields[1].as_str(), Some("Suzie Cobol"));
//! assert_eq!(fields[2].as_str(), Some("age"));
//! assert_eq!(fields[3].as_i64(), Some(73));
//! ```
//!
//! ## Reading CSV records
//!
//! ```rust
//! use parsekit::CsvReader;
//!
//! let mut csv = CsvReader::with_header("name,age\nalice,31\nbob,27\n");
//! while !csv.done() {
//!     let name = csv.read_str();
//!     let age = csv.read_i64()?;
//!     assert!(age > 0 && !name.is_empty());
//! }
//! # Ok::<(), parsekit::Error>(())
//! ```
//!
//! ## Writing
//!
//! ```rust
//! use parsekit::{json, JsonWriter};
//!
//! let mut out = JsonWriter::new();
//! out.begin_object()?;
//! out.name("title").value(json::escape("a \"tricky\" title").as_str());
//! out.name("stars").value(5u32);
//! out.end_object()?;
//! assert_eq!(out.as_str(), r#"{"title":"a \"tricky\" title","stars":5}"#);
//! # Ok::<(), parsekit::Error>(())
//! ```
//!
//! ## Leniency and failure
//!
//! Parsing never fails; only three things do, all reported through
//! [`Error`]: coercing non-empty malformed text to a number or boolean,
//! opening more than [`json::MAX_DEPTH`] container levels in a writer, and
//! closing a container that was never opened. See the [`error`] module.
//!
//! ## Ownership
//!
//! Readers borrow their input and never mutate it; parsed trees copy any
//! text they keep, so a [`Node`] tree outlives the buffer it was parsed
//! from. Both writers are reusable through `clear()` without reallocating.

pub mod csv;
pub mod error;
pub mod json;
pub mod token;
pub mod tree;
pub mod value;

pub use csv::{CsvReader, CsvScalar, CsvWriter, FieldOutcome};
pub use error::{Error, Result};
pub use json::{JsonScalar, JsonWriter};
pub use token::{Lexer, TokenKind, Tokenize};
pub use tree::{parse_tree, tree_from_tokens, Node, NodeValue};
pub use value::TaggedValue;
