//! Brace balance example
//!
//! Registers bracket pairs from a YAML language config and follows the balance while the
//! document is edited.

use editor_tokens::{DocumentRegistry, LanguageConfig};
use editor_tokens_simple::{SimpleLexer, SimpleTokenId};

const CONFIG: &str = r#"
name: simple
brackets:
  - left: LBRACE
    right: RBRACE
  - left: LPAREN
    right: RPAREN
"#;

fn main() {
    let config = LanguageConfig::from_yaml_str(CONFIG).unwrap();
    let lexer = SimpleLexer::c_like().unwrap();
    let language = SimpleLexer::language();

    let mut registry = DocumentRegistry::new();
    let doc = registry.open_document(lexer.hierarchy("fn main() { if (ready) {").unwrap());
    let balance = registry.token_balance(doc).unwrap();
    let registered = balance.register_config(&config, SimpleTokenId::from_name);
    println!("registered {registered} pairs");
    println!(
        "braces: {}  parens: {}",
        balance.balance(&language, &SimpleTokenId::LBrace),
        balance.balance(&language, &SimpleTokenId::LParen)
    );

    // Type the two missing closing braces.
    let hierarchy = registry.hierarchy(doc).unwrap();
    for _ in 0..2 {
        {
            let mut h = hierarchy.write().unwrap();
            let root = h.root_id();
            let end = h.root().token_count();
            h.insert_tokens(root, end, lexer.tokenize(" }")).unwrap();
        }
        println!(
            "{:?} -> braces: {}",
            hierarchy.read().unwrap().text(),
            balance.balance(&language, &SimpleTokenId::LBrace)
        );
    }
    println!("full rescans: {}", balance.scan_count());

    registry.close_document(doc).unwrap();
}
