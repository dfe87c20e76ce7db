//! Total lexer for raw query strings.

use crate::token::{Token, TokenKind};

/// Splits a raw query string into tokens.
///
/// The lexer is total: any input produces a token list, and the list always
/// ends with a single [`TokenKind::End`] sentinel. Validity is the parser's
/// job.
///
/// ```
/// use tanager_syntax::{tokenize, TokenKind};
///
/// let kinds: Vec<_> = tokenize("{tag_a ~ tag_b}").iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::OrStart,
///         TokenKind::Word,
///         TokenKind::OrContinue,
///         TokenKind::Word,
///         TokenKind::OrEnd,
///         TokenKind::End,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for ch in input.chars() {
        match ch {
            ' ' => flush_word(&mut word, &mut tokens),
            '{' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::or_start());
            }
            '}' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::or_end());
            }
            '~' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::or_continue());
            }
            ':' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::meta());
            }
            // A hyphen only negates at the start of a term; mid-word it is a
            // literal character so tags like `pop-art` survive.
            '-' => {
                if word.is_empty() {
                    tokens.push(Token::not());
                } else {
                    word.push('-');
                }
            }
            '<' | '>' | '=' | '!' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::operator(ch));
            }
            _ => word.push(ch),
        }
    }

    flush_word(&mut word, &mut tokens);
    tokens.push(Token::end());
    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::word(std::mem::take(word)));
    }
}
