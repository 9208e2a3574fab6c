#![warn(missing_docs)]
//! `editor-tokens-lang` - data-driven language configuration for `editor-tokens`.
//!
//! This crate stays lightweight and does **not** depend on any lexer. It describes, per
//! language, which token pairs the balance tracker should count (by token *name*; hosts resolve
//! names to their own token ids) and how caret navigation behaves.
//!
//! Configurations are usually written in YAML:
//!
//! ```yaml
//! languages:
//!   - name: java
//!     brackets:
//!       - { left: LBRACE, right: RBRACE }
//!       - { left: LPAREN, right: RPAREN }
//!     navigation:
//!       camel_case: true
//! ```

mod error;

pub use error::LangConfigError;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A left/right token pair, by token name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct BracketPair {
    /// Opening token name (e.g. `LBRACE`).
    pub left: String,
    /// Closing token name (e.g. `RBRACE`).
    pub right: String,
}

impl BracketPair {
    /// Create a pair.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Caret navigation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_camel_case")]
    /// Stop at camel-case humps inside identifiers (`true` by default). When `false`, word
    /// movement uses the generic word rule only.
    pub camel_case: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { camel_case: true }
    }
}

impl NavigationConfig {
    /// Navigation that ignores camel-case humps.
    pub fn words_only() -> Self {
        Self { camel_case: false }
    }
}

fn default_camel_case() -> bool {
    true
}

/// Configuration for one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    /// Language name, matching the name the token hierarchy uses.
    pub name: String,

    #[serde(default)]
    /// Token pairs whose balance is tracked.
    pub brackets: Vec<BracketPair>,

    #[serde(default)]
    /// Caret navigation settings.
    pub navigation: NavigationConfig,
}

impl LanguageConfig {
    /// A config with no bracket pairs and default navigation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brackets: Vec::new(),
            navigation: NavigationConfig::default(),
        }
    }

    /// Add a tracked pair.
    pub fn with_bracket(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.brackets.push(BracketPair::new(left, right));
        self
    }

    /// Replace the navigation settings.
    pub fn with_navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = navigation;
        self
    }

    /// Parse and validate a single language config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LangConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every bracket pair is usable.
    ///
    /// Token names must be non-empty, a pair must use two different names, and a name may
    /// appear in at most one pair.
    pub fn validate(&self) -> Result<(), LangConfigError> {
        let mut seen = HashSet::new();
        for pair in &self.brackets {
            if pair.left.is_empty() || pair.right.is_empty() {
                return Err(LangConfigError::EmptyTokenName {
                    language: self.name.clone(),
                });
            }
            if pair.left == pair.right {
                return Err(LangConfigError::SelfPaired {
                    language: self.name.clone(),
                    token: pair.left.clone(),
                });
            }
            for name in [&pair.left, &pair.right] {
                if !seen.insert(name.as_str()) {
                    return Err(LangConfigError::DuplicateToken {
                        language: self.name.clone(),
                        token: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A set of language configs, typically loaded from one YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguageConfigSet {
    #[serde(default)]
    /// Languages in declaration order.
    pub languages: Vec<LanguageConfig>,
}

impl LanguageConfigSet {
    /// Parse and validate a config set from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LangConfigError> {
        let set: Self = serde_yaml::from_str(yaml)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a config set from a YAML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LangConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Validate every language and reject duplicate language names.
    pub fn validate(&self) -> Result<(), LangConfigError> {
        let mut names = HashSet::new();
        for language in &self.languages {
            if !names.insert(language.name.as_str()) {
                return Err(LangConfigError::DuplicateLanguage(language.name.clone()));
            }
            language.validate()?;
        }
        Ok(())
    }

    /// Config for `name`.
    pub fn get(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|language| language.name == name)
    }

    /// Add or replace the config for a language.
    pub fn insert(&mut self, config: LanguageConfig) {
        match self.languages.iter_mut().find(|l| l.name == config.name) {
            Some(existing) => *existing = config,
            None => self.languages.push(config),
        }
    }
}
