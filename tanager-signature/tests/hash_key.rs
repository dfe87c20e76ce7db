use tanager_signature::{canonical_form, hash_ast, CacheKey, QuerySignature, SignatureError};
use tanager_syntax::parse_query;

fn key_of(input: &str) -> String {
    // RUST_LOG=debug surfaces the compile/digest diagnostics when debugging
    // a failing equivalence.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    QuerySignature::compile(input, 0, 25)
        .expect("query must compile")
        .hash_key()
        .to_string()
}

#[test]
fn identical_queries_share_a_key() {
    assert_eq!(key_of("hi hello -howdy"), key_of("hi hello -howdy"));
}

#[test]
fn sibling_order_does_not_change_the_key() {
    assert_eq!(
        key_of("hi hello -howdy {tag_a ~ tag_b}"),
        key_of("{tag_b ~ tag_a} hello -howdy hi")
    );
}

#[test]
fn option_order_inside_a_group_does_not_change_the_key() {
    // extra whitespace inside the group is discarded by the lexer
    assert_eq!(
        key_of("hi -howdy hello {tag_a ~ tag_b ~ tag_c}"),
        key_of("-howdy hello hi {tag_c ~ tag_b ~tag_a}")
    );
}

#[test]
fn different_tag_sets_get_different_keys() {
    assert_ne!(
        key_of("hi hello -howdy {tag_a ~ tag_b}"),
        key_of("hello2 -howdy hi {tag_b ~ tag_a}")
    );
}

#[test]
fn negation_and_grouping_are_semantically_significant() {
    assert_ne!(key_of("hi"), key_of("-hi"));
    assert_ne!(key_of("tag_a tag_b"), key_of("{tag_a ~ tag_b}"));
}

#[test]
fn comparison_structure_is_order_sensitive() {
    assert_ne!(key_of("width:>10"), key_of("width:<10"));
    assert_ne!(key_of("width:>10"), key_of("height:>10"));
    assert_eq!(key_of("width:1920"), key_of("width:=1920"));
}

#[test]
fn pagination_never_reaches_the_key() {
    let query = "hi hello -howdy {tag_a ~ tag_b}";
    let mut keys = Vec::new();
    for offset in [0u64, 40] {
        for limit in [25u64, 100] {
            let sig = QuerySignature::compile(query, offset, limit).unwrap();
            keys.push(sig.hash_key().to_string());
        }
    }
    keys.dedup();
    assert_eq!(keys.len(), 1, "all four windows must collapse to one key");
}

#[test]
fn cache_keys_separate_scopes_and_windows() {
    let query = "hi {tag_a ~ tag_b}";
    let a = QuerySignature::compile(query, 0, 25).unwrap();
    let b = QuerySignature::compile(query, 25, 25).unwrap();

    assert_eq!(a.hash_key(), b.hash_key());
    assert_ne!(a.cache_key("user-1"), b.cache_key("user-1"));
    assert_ne!(a.cache_key("user-1"), a.cache_key("user-2"));
    assert_eq!(
        a.cache_key("user-1"),
        CacheKey {
            scope: "user-1".to_string(),
            hash_key: a.hash_key().to_string(),
            offset: 0,
            limit: 25,
        }
    );
}

#[test]
fn hash_ast_matches_the_signature_key() {
    let query = "hi {tag_a ~ tag_b} width:>10";
    let sig = QuerySignature::compile(query, 10, 50).unwrap();
    let ast = parse_query(query).unwrap();
    assert_eq!(sig.hash_key(), hash_ast(&ast));
}

#[test]
fn the_key_is_a_digest_of_the_canonical_form() {
    // 64 lowercase hex characters, stable across processes.
    let key = key_of("hi");
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let ast = parse_query("hi").unwrap();
    assert_eq!(canonical_form(&ast), "and[tag(2:hi)]");
}

#[test]
fn signature_exposes_its_inputs() {
    let sig = QuerySignature::compile("hi hello", 40, 25).unwrap();
    assert_eq!(sig.raw_input(), "hi hello");
    assert_eq!(sig.offset(), 40);
    assert_eq!(sig.limit(), 25);
    assert_eq!(sig.ast().children(sig.ast().root()).len(), 2);
}

#[test]
fn bad_queries_fail_to_compile() {
    let err = QuerySignature::compile("{tag_a", 0, 25).unwrap_err();
    match err {
        SignatureError::Parse(parse) => {
            assert_eq!(
                parse.kind,
                tanager_syntax::ParseErrorKind::UnbalancedGroup
            );
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
