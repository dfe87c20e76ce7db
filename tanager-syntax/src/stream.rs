//! Bidirectional read cursor over a token list.

use crate::token::Token;

/// A cursor over an immutable token list with one sentinel position on each
/// side.
///
/// The cursor starts before the first token; [`move_next`](Self::move_next)
/// and [`move_back`](Self::move_back) step it one token at a time, and
/// stepping past either end parks it on the boundary with a
/// [`Token::default`] sentinel as the current token. Iterating the stream
/// itself always yields the backing tokens in their original order, no matter
/// where the read head sits.
///
/// ```
/// use tanager_syntax::{tokenize, TokenStream, TokenKind};
///
/// let mut stream = TokenStream::new(tokenize("hi"));
/// assert_eq!(stream.current().kind, TokenKind::Default);
/// assert!(stream.move_next());
/// assert_eq!(stream.current().value, "hi");
/// assert!(stream.move_next()); // End sentinel token
/// assert!(!stream.move_next());
/// assert_eq!(stream.current().kind, TokenKind::Default);
/// ```
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: isize,
    current: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: -1,
            current: Token::default(),
        }
    }

    /// The token under the read head, or the sentinel when the cursor is
    /// parked outside the list.
    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Advances the read head. Returns `false` once the cursor has stepped
    /// past the last token; further calls keep returning `false` and leave
    /// the sentinel as the current token.
    pub fn move_next(&mut self) -> bool {
        let next = self.index + 1;
        if (next as usize) < self.tokens.len() {
            self.index = next;
            self.current = self.tokens[next as usize].clone();
            true
        } else {
            self.index = self.tokens.len() as isize;
            self.current = Token::default();
            false
        }
    }

    /// Steps the read head backwards. Returns `false` once the cursor has
    /// stepped before the first token, parking it on the leading sentinel
    /// position.
    pub fn move_back(&mut self) -> bool {
        let prev = self.index - 1;
        if prev >= 0 && (prev as usize) < self.tokens.len() {
            self.index = prev;
            self.current = self.tokens[prev as usize].clone();
            true
        } else {
            self.index = -1;
            self.current = Token::default();
            false
        }
    }

    /// Advances and returns the new current token, or `None` at the end.
    pub fn get_next(&mut self) -> Option<&Token> {
        if self.move_next() {
            Some(&self.current)
        } else {
            None
        }
    }

    /// Steps back and returns the new current token, or `None` at the start.
    pub fn get_previous(&mut self) -> Option<&Token> {
        if self.move_back() {
            Some(&self.current)
        } else {
            None
        }
    }

    /// The token one step ahead of the read head, without moving it.
    pub fn peek_next(&self) -> Option<&Token> {
        let next = self.index + 1;
        if next < 0 {
            return None;
        }
        self.tokens.get(next as usize)
    }

    /// All backing tokens in original order, independent of the read head.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
