use editor_tokens::{Token, TokenChangeKind};
use editor_tokens_simple::{SimpleLexer, SimpleTokenId, TEMPLATE_LANGUAGE};
use std::sync::{Arc, Mutex};

#[test]
fn test_hierarchy_embeds_template_strings() {
    let lexer = SimpleLexer::c_like().unwrap();
    let hierarchy = lexer
        .hierarchy(r#"let s = "v=${value}"; let t = "plain";"#)
        .unwrap();
    assert_eq!(hierarchy.sequence_count(), 2);

    // Inside `${value}` the innermost sequence is the template one.
    let ts = hierarchy.sequence_at(14);
    assert_eq!(ts.language().name(), TEMPLATE_LANGUAGE);
    assert_eq!(ts.token().map(Token::text), Some("value"));
    assert_eq!(ts.token().map(|t| *t.id()), Some(SimpleTokenId::Identifier));
}

#[test]
fn test_hierarchy_text_roundtrips() {
    let lexer = SimpleLexer::c_like().unwrap();
    let source = "fn main() {\n    // größe\n    print(\"${a}${b}\");\n}\n";
    let hierarchy = lexer.hierarchy(source).unwrap();
    assert_eq!(hierarchy.text(), source);
    assert_eq!(hierarchy.len(), source.chars().count());
}

#[test]
fn test_replacing_tokens_emits_modification() {
    let lexer = SimpleLexer::c_like().unwrap();
    let mut hierarchy = lexer.hierarchy("a { b }").unwrap();
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&kinds);
    hierarchy.subscribe(move |event| sink.lock().unwrap().push(event.kind()));

    let root = hierarchy.root_id();
    hierarchy
        .replace_tokens(root, 2..5, lexer.tokenize("{}"))
        .unwrap();
    hierarchy.notify_activity();

    assert_eq!(hierarchy.text(), "a {} }");
    assert_eq!(
        *kinds.lock().unwrap(),
        vec![TokenChangeKind::Modification, TokenChangeKind::Activity]
    );
}
