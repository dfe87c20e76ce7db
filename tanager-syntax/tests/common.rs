#![allow(dead_code)]
//! Shared helpers for `tanager-syntax` integration tests.

use tanager_syntax::*;

pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

pub fn parse_ok(input: &str) -> Ast {
    match parse_query(input) {
        Ok(ast) => ast,
        Err(err) => panic!("failed to parse {input:?}: {err}"),
    }
}

pub fn parse_err(input: &str) -> ParseError {
    match parse_query(input) {
        Ok(ast) => panic!(
            "expected {input:?} to be rejected, got {}",
            ast.to_compact_string()
        ),
        Err(err) => err,
    }
}

pub fn err_kind(input: &str) -> ParseErrorKind {
    parse_err(input).kind
}

pub fn root_children(ast: &Ast) -> Vec<NodeId> {
    ast.children(ast.root()).to_vec()
}

pub fn tag_is(ast: &Ast, id: NodeId, expected: &str) {
    assert_eq!(ast.kind(id), NodeKind::Tag, "not a tag node");
    assert_eq!(ast.token(id).value, expected);
}

pub fn not_tag_is(ast: &Ast, id: NodeId, expected: &str) {
    assert_eq!(ast.kind(id), NodeKind::NotTag, "not a negated tag node");
    assert_eq!(ast.token(id).value, expected);
}

pub fn or_options(ast: &Ast, id: NodeId) -> Vec<NodeId> {
    assert_eq!(ast.kind(id), NodeKind::Or, "not an alternation node");
    ast.children(id).to_vec()
}

pub fn meta_parts(ast: &Ast, id: NodeId) -> (String, String, String) {
    assert_eq!(ast.kind(id), NodeKind::Meta, "not a meta node");
    let children = ast.children(id);
    assert_eq!(children.len(), 3, "meta node must have three children");
    assert_eq!(ast.kind(children[0]), NodeKind::MetaField);
    assert_eq!(ast.kind(children[1]), NodeKind::MetaOperator);
    assert_eq!(ast.kind(children[2]), NodeKind::MetaValue);
    (
        ast.token(children[0]).value.clone(),
        ast.token(children[1]).value.clone(),
        ast.token(children[2]).value.clone(),
    )
}
