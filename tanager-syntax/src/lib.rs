//! # Tanager's tag-query syntax parser
//!
//! `tanager-syntax` turns raw tag-search queries into a structured AST so the
//! rest of tanager can reason about tag presence, negation, alternation
//! groups, and metadata comparisons without duplicating the parsing rules in
//! every consumer. The grammar is the one users type into the catalog search
//! box: whitespace-separated tags, `-tag` negation, `{a ~ b}` alternation,
//! and `field:>value` comparisons.
//!
//! ## Example
//! ```
//! use tanager_syntax::{parse_query, NodeKind};
//!
//! let ast = parse_query("hi -howdy {tag_a ~ tag_b} width:>1920").unwrap();
//! assert_eq!(
//!     ast.to_compact_string(),
//!     "and(tag:hi not:howdy or(tag:tag_a tag:tag_b) meta(field:width op:> value:1920))"
//! );
//!
//! // the parser preserves the original term order
//! let kinds: Vec<NodeKind> = ast
//!     .children(ast.root())
//!     .iter()
//!     .map(|&id| ast.kind(id))
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [NodeKind::Tag, NodeKind::NotTag, NodeKind::Or, NodeKind::Meta]
//! );
//! ```
//!
//! Canonicalization and cache-key derivation live in `tanager-signature`,
//! which consumes the [`Ast`] produced here.

mod ast;
mod lexer;
mod parser;
mod stream;
mod token;

pub use ast::{Ast, Node, NodeId, NodeKind, Preorder};
pub use lexer::tokenize;
pub use parser::{parse_query, AstBuilder, ParseError, ParseErrorKind};
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
