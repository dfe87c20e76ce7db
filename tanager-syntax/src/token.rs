//! Lexical tokens of the tag-query language.

use std::fmt;

/// The token vocabulary produced by [`tokenize`](crate::tokenize).
///
/// One kind per special character of the query syntax, plus [`Word`] for
/// everything in between, [`End`] as the trailing sentinel every token list
/// carries, and [`Default`] for the cursor's out-of-range position.
///
/// [`Word`]: TokenKind::Word
/// [`End`]: TokenKind::End
/// [`Default`]: TokenKind::Default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Sentinel kind of the cursor's before-start/after-end position. The
    /// lexer never emits it.
    Default,
    /// A tag name, metadata field, or metadata value.
    ///
    /// ```
    /// use tanager_syntax::{tokenize, TokenKind};
    /// let tokens = tokenize("hi");
    /// assert_eq!(tokens[0].kind, TokenKind::Word);
    /// assert_eq!(tokens[0].value, "hi");
    /// ```
    Word,
    /// `-` at the start of a term: negate the following tag.
    ///
    /// A `-` inside a word stays part of the word, so `pop-art` is a single
    /// tag while `-temp` is a negation.
    ///
    /// ```
    /// use tanager_syntax::{tokenize, TokenKind};
    /// assert_eq!(tokenize("-howdy")[0].kind, TokenKind::Not);
    /// assert_eq!(tokenize("pop-art")[0].value, "pop-art");
    /// ```
    Not,
    /// `{` — opens an alternation group.
    OrStart,
    /// `~` — separates options inside an alternation group.
    OrContinue,
    /// `}` — closes an alternation group.
    OrEnd,
    /// `:` — introduces a metadata comparison after a field name.
    ///
    /// ```
    /// use tanager_syntax::{tokenize, TokenKind};
    /// let kinds: Vec<_> = tokenize("width:1920").iter().map(|t| t.kind).collect();
    /// assert_eq!(
    ///     kinds,
    ///     [TokenKind::Word, TokenKind::Meta, TokenKind::Word, TokenKind::End]
    /// );
    /// ```
    Meta,
    /// One of `<`, `>`, `=`, `!`; the token value holds the character.
    Operator,
    /// Trailing sentinel; always the last token of a lexed input.
    End,
}

/// An immutable lexical unit: a kind plus its text value.
///
/// Equality is structural, so two independently lexed token lists compare
/// equal token by token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, value)
    }

    pub fn not() -> Self {
        Self::new(TokenKind::Not, "-")
    }

    pub fn or_start() -> Self {
        Self::new(TokenKind::OrStart, "{")
    }

    pub fn or_continue() -> Self {
        Self::new(TokenKind::OrContinue, "~")
    }

    pub fn or_end() -> Self {
        Self::new(TokenKind::OrEnd, "}")
    }

    pub fn meta() -> Self {
        Self::new(TokenKind::Meta, ":")
    }

    pub fn operator(symbol: char) -> Self {
        Self::new(TokenKind::Operator, symbol.to_string())
    }

    pub fn end() -> Self {
        Self::new(TokenKind::End, "")
    }
}

/// The sentinel token reported by a cursor parked outside its token list.
impl Default for Token {
    fn default() -> Self {
        Self::new(TokenKind::Default, "")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
