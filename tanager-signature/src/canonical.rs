//! Canonical rendering of query ASTs.
//!
//! Two queries that mean the same filter must render to the same string no
//! matter how the user ordered their terms, so `and`/`or` children are
//! canonicalized independently and then sorted before joining. Metadata
//! comparisons keep their field/operator/value order; `width:>10` and
//! `10:>width` are different filters.

use tanager_syntax::{Ast, NodeId, NodeKind};

/// Renders the whole tree into its canonical form.
///
/// ```
/// use tanager_syntax::parse_query;
/// use tanager_signature::canonical_form;
///
/// let a = parse_query("b a").unwrap();
/// let b = parse_query("a  b").unwrap();
/// assert_eq!(canonical_form(&a), "and[tag(1:a),tag(1:b)]");
/// assert_eq!(canonical_form(&a), canonical_form(&b));
/// ```
pub fn canonical_form(ast: &Ast) -> String {
    render(ast, ast.root())
}

fn render(ast: &Ast, id: NodeId) -> String {
    let node = ast.node(id);
    match node.kind() {
        NodeKind::And | NodeKind::Or => {
            let mut parts: Vec<String> = node
                .children()
                .iter()
                .map(|&child| render(ast, child))
                .collect();
            // Sorting the rendered children makes sibling order irrelevant.
            parts.sort_unstable();
            format!("{}[{}]", node.kind().label(), parts.join(","))
        }
        NodeKind::NotTag => format!("not({})", payload(ast, id)),
        NodeKind::Tag => format!("tag({})", payload(ast, id)),
        NodeKind::Meta => {
            // Field, operator, value in fixed structural order.
            let parts: Vec<String> = node
                .children()
                .iter()
                .map(|&child| payload(ast, child))
                .collect();
            format!("meta({})", parts.join(","))
        }
        NodeKind::MetaField | NodeKind::MetaOperator | NodeKind::MetaValue => payload(ast, id),
    }
}

// Length-prefixed token value. The prefix keeps tag names containing the
// rendering's own punctuation from colliding with structural boundaries.
fn payload(ast: &Ast, id: NodeId) -> String {
    let value = &ast.token(id).value;
    format!("{}:{}", value.chars().count(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanager_syntax::parse_query;

    fn canon(input: &str) -> String {
        canonical_form(&parse_query(input).unwrap())
    }

    #[test]
    fn renders_every_node_kind() {
        assert_eq!(
            canon("hi -howdy {tag_a ~ tag_b} width:>1920"),
            "and[meta(5:width,1:>,4:1920),not(5:howdy),or[tag(5:tag_a),tag(5:tag_b)],tag(2:hi)]"
        );
    }

    #[test]
    fn empty_query_renders_an_empty_root() {
        assert_eq!(canon(""), "and[]");
    }

    #[test]
    fn sibling_order_is_irrelevant() {
        assert_eq!(canon("a b c"), canon("c a b"));
        assert_eq!(canon("{a ~ b ~ c}"), canon("{c ~ b ~ a}"));
    }

    #[test]
    fn meta_order_is_significant() {
        assert_ne!(canon("width:>10"), canon("width:<10"));
        assert_ne!(canon("width:>10"), canon("height:>10"));
        assert_ne!(canon("width:10"), canon("10:width"));
    }

    #[test]
    fn implied_equality_matches_the_explicit_operator() {
        assert_eq!(canon("width:1920"), canon("width:=1920"));
    }

    #[test]
    fn negation_differs_from_presence() {
        assert_ne!(canon("wip"), canon("-wip"));
    }
}
