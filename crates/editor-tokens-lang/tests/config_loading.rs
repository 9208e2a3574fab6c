use editor_tokens_lang::{BracketPair, LangConfigError, LanguageConfigSet, NavigationConfig};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
languages:
  - name: java
    brackets:
      - { left: LBRACE, right: RBRACE }
      - { left: LPAREN, right: RPAREN }
  - name: template
    brackets:
      - left: TPL_OPEN
        right: TPL_CLOSE
    navigation:
      camel_case: false
"#;

#[test]
fn test_load_config_set_from_str() {
    let set = LanguageConfigSet::from_yaml_str(CONFIG).unwrap();
    assert_eq!(set.languages.len(), 2);

    let java = set.get("java").unwrap();
    assert_eq!(
        java.brackets,
        vec![
            BracketPair::new("LBRACE", "RBRACE"),
            BracketPair::new("LPAREN", "RPAREN"),
        ]
    );
    assert_eq!(java.navigation, NavigationConfig::default());

    let template = set.get("template").unwrap();
    assert_eq!(template.navigation, NavigationConfig::words_only());
    assert!(set.get("python").is_none());
}

#[test]
fn test_duplicate_language_is_rejected() {
    let yaml = "languages:\n  - name: java\n  - name: java\n";
    let err = LanguageConfigSet::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, LangConfigError::DuplicateLanguage(name) if name == "java"));
}

#[test]
fn test_malformed_yaml_is_a_yaml_error() {
    let err = LanguageConfigSet::from_yaml_str("languages: [name: ").unwrap_err();
    assert!(matches!(err, LangConfigError::Yaml(_)));
    assert!(err.to_string().starts_with("YAML parse error"));
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!(
        "editor-tokens-lang-{}-languages.yaml",
        std::process::id()
    ));
    std::fs::write(&path, CONFIG).unwrap();
    let set = LanguageConfigSet::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(set.languages.len(), 2);

    let missing = LanguageConfigSet::load_from_path(path.with_extension("missing"));
    assert!(matches!(missing, Err(LangConfigError::Io(_))));
}
