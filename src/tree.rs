//! Recursive tree construction from a token stream.
//!
//! [`parse_tree`] turns flat lexical tokens into a nested tree of [`Node`]s:
//! a container token (`{`, `[`, `(`) owns the ordered list of nodes built
//! until its matching closer, scalars become leaves, and commas materialize
//! as placeholder siblings (a downstream consumer may care about separator
//! positions, so they are not filtered out).
//!
//! The grammar is deliberately lenient: there is no parse error. A stray
//! closer or a truncated input simply terminates the list being built, and
//! unmatched closers at the top level end the whole tree.
//!
//! ## Examples
//!
//! ```rust
//! use parsekit::{parse_tree, TokenKind};
//!
//! let tree = parse_tree("{name: \"Suzie\" age: 73}");
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree[0].kind, TokenKind::Brace);
//!
//! let fields = tree[0].as_list().unwrap();
//! assert_eq!(fields[0].kind, TokenKind::Let);
//! assert_eq!(fields[0].as_str(), Some("name"));
//! assert_eq!(fields[1].as_str(), Some("Suzie"));
//! assert_eq!(fields[3].as_i64(), Some(73));
//! ```

use crate::token::{Lexer, TokenKind, Tokenize};
use serde::Serialize;

/// One tree element: a scalar leaf, a container owning children, or a
/// valueless placeholder (commas).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    /// The token that produced this node.
    pub kind: TokenKind,
    /// The node's payload.
    pub value: NodeValue,
}

/// The payload of a [`Node`].
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub enum NodeValue {
    /// No payload (comma placeholders).
    #[default]
    None,
    /// Ordered children of a container node.
    List(Vec<Node>),
    /// Text of a `Let`/`Sym`/`Str` node, copied out of the source buffer.
    Text(String),
    /// An integer leaf.
    Int(i64),
    /// A float leaf.
    Float(f64),
}

impl Node {
    /// The children of a container node.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// The text of a `Let`/`Sym`/`Str` node.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an integer leaf.
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self.value {
            NodeValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The value of a float leaf.
    #[inline]
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self.value {
            NodeValue::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns `true` for the comma placeholders that separate siblings.
    #[inline]
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.kind == TokenKind::Comma
    }
}

/// Builds the tree for one term: a scalar leaf, or a container together with
/// everything it encloses. Returns the token kind so the caller can tell a
/// produced node from a list terminator.
fn term<'a, T: Tokenize<'a>>(tokens: &mut T) -> (TokenKind, Option<Node>) {
    let tok = tokens.next_token();
    let kind = tok.kind();
    let node = match kind {
        TokenKind::Brace | TokenKind::Bracket | TokenKind::Paren => Some(Node {
            kind,
            value: NodeValue::List(list(tokens)),
        }),
        TokenKind::Comma => Some(Node {
            kind,
            value: NodeValue::None,
        }),
        TokenKind::Let | TokenKind::Sym | TokenKind::Str => Some(Node {
            kind,
            value: NodeValue::Text(tok.into_text().into_owned()),
        }),
        TokenKind::Int => Some(Node {
            kind,
            value: NodeValue::Int(tok.as_int().unwrap_or(0)),
        }),
        TokenKind::Float => Some(Node {
            kind,
            value: NodeValue::Float(tok.as_float().unwrap_or(0.0)),
        }),
        _ => None,
    };
    (kind, node)
}

/// Appends terms to a list until `Stop` or `Pop` unwinds it.
fn list<'a, T: Tokenize<'a>>(tokens: &mut T) -> Vec<Node> {
    let mut out = Vec::new();
    loop {
        let (kind, node) = term(tokens);
        if kind.ends_list() {
            return out;
        }
        if let Some(node) = node {
            out.push(node);
        }
    }
}

/// Builds the top-level node sequence from an already-positioned tokenizer.
pub fn tree_from_tokens<'a, T: Tokenize<'a>>(tokens: &mut T) -> Vec<Node> {
    list(tokens)
}

/// Parses `input` into its top-level node sequence using the default
/// [`Lexer`].
///
/// # Examples
///
/// ```rust
/// use parsekit::parse_tree;
///
/// let tree = parse_tree("[1, 2, 3]");
/// let items = tree[0].as_list().unwrap();
/// // commas materialize as placeholder siblings
/// assert_eq!(items.len(), 5);
/// assert_eq!(items[0].as_i64(), Some(1));
/// assert!(items[1].is_separator());
/// ```
#[must_use]
pub fn parse_tree(input: &str) -> Vec<Node> {
    tree_from_tokens(&mut Lexer::new(input))
}
