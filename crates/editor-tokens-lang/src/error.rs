use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating language configs.
pub enum LangConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("language '{0}' is configured more than once")]
    /// Two configs share a language name.
    DuplicateLanguage(String),

    #[error("empty token name in a bracket pair of '{language}'")]
    /// A bracket pair names an empty token.
    EmptyTokenName {
        /// Language name.
        language: String,
    },

    #[error("token '{token}' is paired with itself in '{language}'")]
    /// A bracket pair uses the same token on both sides.
    SelfPaired {
        /// Language name.
        language: String,
        /// The token name.
        token: String,
    },

    #[error("token '{token}' belongs to more than one bracket pair in '{language}'")]
    /// A token name appears in two pairs of one language.
    DuplicateToken {
        /// Language name.
        language: String,
        /// The token name.
        token: String,
    },
}
