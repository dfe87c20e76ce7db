//! # Tanager query signatures
//!
//! `tanager-signature` wraps a parsed query AST together with its pagination
//! window and derives the content-addressable `HashKey` the result cache is
//! keyed by. Two queries that mean the same filter share one key even when
//! the user typed their terms in a different order, and paging through the
//! results never changes the key.
//!
//! ## Example
//! ```
//! use tanager_signature::QuerySignature;
//!
//! let a = QuerySignature::compile("hi hello {tag_a ~ tag_b}", 0, 25).unwrap();
//! let b = QuerySignature::compile("{tag_b ~ tag_a} hello hi", 50, 100).unwrap();
//! assert_eq!(a.hash_key(), b.hash_key());
//!
//! // but the full cache key still separates pagination windows
//! assert_ne!(a.cache_key("user-7"), b.cache_key("user-7"));
//! ```

mod canonical;

pub use canonical::canonical_form;

use std::fmt;
use std::time::Instant;

use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use tanager_syntax::{parse_query, Ast, ParseError};
use tracing::debug;

/// Upper bound on the raw query accepted by [`QuerySignature::compile`].
///
/// The pipeline is linear time, but this is a user-facing entry point and an
/// unbounded input is never a legitimate query.
pub const MAX_QUERY_BYTES: usize = 64 * 1024;

/// Failure to turn a raw string into a [`QuerySignature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    QueryTooLong { len: usize, max: usize },
    Parse(ParseError),
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryTooLong { len, max } => {
                write!(f, "query is {len} bytes, the limit is {max}")
            }
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::QueryTooLong { .. } => None,
        }
    }
}

impl From<ParseError> for SignatureError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

/// A compiled query: raw input, its AST, and the requested page window.
///
/// The `HashKey` is a pure function of the AST; `raw_input`, `offset` and
/// `limit` never contribute to it. It is computed on first use and memoized,
/// so a cached signature can serve concurrent readers without re-hashing.
#[derive(Debug, Clone)]
pub struct QuerySignature {
    raw_input: String,
    ast: Ast,
    offset: u64,
    limit: u64,
    hash_key: OnceCell<String>,
}

impl QuerySignature {
    /// Lexes, parses, and wraps a raw query string.
    pub fn compile(raw: &str, offset: u64, limit: u64) -> Result<Self, SignatureError> {
        if raw.len() > MAX_QUERY_BYTES {
            return Err(SignatureError::QueryTooLong {
                len: raw.len(),
                max: MAX_QUERY_BYTES,
            });
        }
        let ast = parse_query(raw)?;
        debug!("compiled query into {} nodes", ast.node_count());
        Ok(Self {
            raw_input: raw.to_string(),
            ast,
            offset,
            limit,
            hash_key: OnceCell::new(),
        })
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The canonical digest of the AST alone.
    pub fn hash_key(&self) -> &str {
        self.hash_key.get_or_init(|| hash_ast(&self.ast))
    }

    /// The full key the result cache stores entries under.
    pub fn cache_key(&self, scope: impl Into<String>) -> CacheKey {
        CacheKey {
            scope: scope.into(),
            hash_key: self.hash_key().to_string(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Digests an AST into its hex-encoded canonical hash.
///
/// Exposed separately so collaborators holding a bare [`Ast`] can derive the
/// same key a [`QuerySignature`] would.
pub fn hash_ast(ast: &Ast) -> String {
    let started = Instant::now();
    let canonical = canonical_form(ast);
    let digest = Sha256::digest(canonical.as_bytes());
    let key = to_lower_hex(&digest);
    debug!(
        "hash key derived in {:?} ({} canonical bytes)",
        started.elapsed(),
        canonical.len()
    );
    key
}

fn to_lower_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

/// What the result cache is keyed by: user scope, canonical hash, and the
/// page window. The cache itself lives elsewhere; this crate only defines
/// the key it is fed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub scope: String,
    pub hash_key: String,
    pub offset: u64,
    pub limit: u64,
}
