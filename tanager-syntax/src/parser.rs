//! Stack-based query parser: tokens in, validated AST out.

use std::fmt;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::lexer::tokenize;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Lexes and parses a raw query string in one step.
///
/// ```
/// use tanager_syntax::{parse_query, ParseErrorKind};
///
/// let ast = parse_query("cat {sketch ~ photo} -wip").unwrap();
/// assert_eq!(ast.children(ast.root()).len(), 3);
///
/// let err = parse_query("{sketch").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::UnbalancedGroup);
/// ```
pub fn parse_query(input: &str) -> Result<Ast, ParseError> {
    AstBuilder::new(TokenStream::new(tokenize(input))).build()
}

/// Stable parser error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A token appears where the grammar forbids it.
    UnexpectedToken,
    /// Input ended where a word or operator value was required.
    MissingOperand,
    /// A `}` without an open group, or a group still open at end of input.
    UnbalancedGroup,
    /// A non-empty token list produced a root with no terms.
    EmptyGroup,
    /// Tokens remain after the trailing `End` sentinel.
    TrailingTokens,
}

/// First-error parse failure. The parse aborts immediately; no partial AST
/// is produced and no recovery is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The offending token, or `None` for end-of-stream and structural
    /// failures.
    pub token: Option<Token>,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Option<Token>, message: impl Into<String>) -> Self {
        Self {
            kind,
            token,
            message: message.into(),
        }
    }

    fn unexpected(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken, Some(token.clone()), message)
    }

    fn missing_operand(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MissingOperand, None, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{} (near `{token}`)", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Hand-rolled stack parser for the tag-query grammar.
///
/// A root `And` node sits at the bottom of an explicit scope stack; `{`
/// pushes an `Or` scope, `}` pops it, and every other token attaches leaves
/// to the scope on top. The grammar is small enough that keeping the token
/// rules spelled out one by one is clearer than any table.
pub struct AstBuilder {
    stream: TokenStream,
}

impl AstBuilder {
    pub fn new(stream: TokenStream) -> Self {
        Self { stream }
    }

    pub fn build(mut self) -> Result<Ast, ParseError> {
        let token_count = self.stream.len();
        let mut ast = Ast::with_root(NodeKind::And, Token::default());
        let mut scopes: Vec<NodeId> = vec![ast.root()];

        loop {
            let Some(token) = self.stream.get_next().cloned() else {
                break;
            };
            let scope = *scopes.last().expect("scope stack holds at least the root");

            match token.kind {
                TokenKind::End => break,
                TokenKind::Word => {
                    self.leaf(&mut ast, scope, token)?;
                    // A bare tag inside a group must be followed by `~` or `}`.
                    if ast.kind(scope) == NodeKind::Or {
                        self.expect_group_continuation()?;
                    }
                }
                TokenKind::OrStart => {
                    let group = ast.push_child(scope, NodeKind::Or, token);
                    scopes.push(group);
                    self.consume_option(&mut ast, group, "'{' must be followed by a tag")?;
                }
                TokenKind::OrContinue => {
                    self.consume_option(&mut ast, scope, "'~' must be followed by a tag")?;
                }
                TokenKind::OrEnd => {
                    let popped = scopes.pop().expect("scope stack holds at least the root");
                    if ast.kind(popped) != NodeKind::Or {
                        return Err(ParseError::new(
                            ParseErrorKind::UnbalancedGroup,
                            Some(token),
                            "'}' without a matching '{'",
                        ));
                    }
                }
                TokenKind::Not => match self.stream.get_next().cloned() {
                    Some(t) if t.kind == TokenKind::Word => {
                        ast.push_child(scope, NodeKind::NotTag, t);
                    }
                    Some(t) if t.kind != TokenKind::End => {
                        return Err(ParseError::unexpected(&t, "expected a tag after '-'"));
                    }
                    _ => return Err(ParseError::missing_operand("missing tag after '-'")),
                },
                TokenKind::Meta => {
                    return Err(ParseError::unexpected(
                        &token,
                        "a field name must precede ':'",
                    ));
                }
                TokenKind::Default | TokenKind::Operator => {
                    return Err(ParseError::unexpected(&token, "unhandled token kind"));
                }
            }
        }

        // The End sentinel must have been the last token of the stream.
        if self.stream.move_next() {
            let token = self.stream.current().clone();
            return Err(ParseError::new(
                ParseErrorKind::TrailingTokens,
                Some(token),
                "tokens remain after end of query",
            ));
        }

        if scopes.len() != 1 {
            return Err(ParseError::new(
                ParseErrorKind::UnbalancedGroup,
                None,
                "alternation group is never closed",
            ));
        }

        if token_count > 1 && ast.children(ast.root()).is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyGroup,
                None,
                "query produced no terms",
            ));
        }

        Ok(ast)
    }

    /// Attaches a tag or, when the word is directly followed by `:`, a
    /// three-child metadata comparison.
    fn leaf(&mut self, ast: &mut Ast, scope: NodeId, word: Token) -> Result<NodeId, ParseError> {
        if self.stream.peek_next().map(|t| t.kind) != Some(TokenKind::Meta) {
            return Ok(ast.push_child(scope, NodeKind::Tag, word));
        }

        self.stream.move_next(); // the ':'
        let (operator, value) = match self.stream.get_next().cloned() {
            Some(t) if t.kind == TokenKind::Operator => match self.stream.get_next().cloned() {
                Some(v) if v.kind == TokenKind::Word => (t, v),
                _ => return Err(ParseError::missing_operand("missing value after operator")),
            },
            // A bare value implies equality: `width:1920` is `width:=1920`.
            Some(t) if t.kind == TokenKind::Word => (Token::operator('='), t),
            Some(t) if t.kind != TokenKind::End => {
                return Err(ParseError::unexpected(
                    &t,
                    "expected an operator or value after ':'",
                ));
            }
            _ => return Err(ParseError::missing_operand("missing comparison after ':'")),
        };

        let meta = ast.push_child(scope, NodeKind::Meta, word.clone());
        ast.push_child(meta, NodeKind::MetaField, word);
        ast.push_child(meta, NodeKind::MetaOperator, operator);
        ast.push_child(meta, NodeKind::MetaValue, value);
        Ok(meta)
    }

    /// Consumes the word (or comparison) that must follow `{` or `~`.
    fn consume_option(
        &mut self,
        ast: &mut Ast,
        scope: NodeId,
        expected: &str,
    ) -> Result<(), ParseError> {
        match self.stream.get_next().cloned() {
            Some(t) if t.kind == TokenKind::Word => {
                self.leaf(ast, scope, t)?;
                if ast.kind(scope) == NodeKind::Or {
                    self.expect_group_continuation()?;
                }
                Ok(())
            }
            Some(t) if t.kind != TokenKind::End => Err(ParseError::unexpected(&t, expected)),
            _ => Err(ParseError::missing_operand(expected)),
        }
    }

    /// After an option the group must continue or close. End of input is let
    /// through here; the scope stack check reports the unbalanced group.
    fn expect_group_continuation(&self) -> Result<(), ParseError> {
        match self.stream.peek_next() {
            Some(t)
                if matches!(
                    t.kind,
                    TokenKind::OrContinue | TokenKind::OrEnd | TokenKind::End
                ) =>
            {
                Ok(())
            }
            None => Ok(()),
            Some(t) => Err(ParseError::unexpected(
                t,
                "options must be separated by '~' or the group closed with '}'",
            )),
        }
    }
}
