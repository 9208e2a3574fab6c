//! `editor-tokens-simple` - a small regex-based lexer that feeds `editor-tokens`.
//!
//! This crate is intended for demos, tests and benchmarks of the navigation and balance
//! engines. It lexes a C-like language (identifiers, keywords, numbers, strings, `//` comments,
//! brackets, operators) and embeds the `${...}` regions of string literals as a nested
//! [`TEMPLATE_LANGUAGE`] sequence. It is *not* intended to be a full lexer.

use editor_tokens::{
    HierarchyError, Language, Token, TokenCategory, TokenHierarchy, TokenId, layout_tokens,
};
use regex::Regex;

/// Name of the top-level language.
pub const SIMPLE_LANGUAGE: &str = "simple";

/// Name of the language embedded in string templates.
pub const TEMPLATE_LANGUAGE: &str = "simple-template";

const KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "return", "fn", "let", "class", "true", "false", "null",
];

/// Token kinds produced by [`SimpleLexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleTokenId {
    /// Identifier.
    Identifier,
    /// Reserved word.
    Keyword,
    /// Spaces, tabs and newlines.
    Whitespace,
    /// `// ...` up to the end of the line.
    LineComment,
    /// Integer or decimal literal.
    Number,
    /// Double-quoted string literal.
    StringLiteral,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// Operators and other punctuation.
    Operator,
    /// Literal text of a template string (quotes included).
    TemplateText,
    /// `${` inside a template string.
    TemplateOpen,
    /// `}` closing a template expression.
    TemplateClose,
    /// A character no rule matched.
    Unknown,
}

impl TokenId for SimpleTokenId {
    fn category(&self) -> TokenCategory {
        match self {
            Self::Identifier => TokenCategory::Identifier,
            Self::Whitespace => TokenCategory::Whitespace,
            _ => TokenCategory::Other,
        }
    }
}

impl SimpleTokenId {
    /// Resolve the configuration name of a token kind (e.g. `LBRACE`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "IDENTIFIER" => Self::Identifier,
            "KEYWORD" => Self::Keyword,
            "WHITESPACE" => Self::Whitespace,
            "LINE_COMMENT" => Self::LineComment,
            "NUMBER" => Self::Number,
            "STRING_LITERAL" => Self::StringLiteral,
            "LBRACE" => Self::LBrace,
            "RBRACE" => Self::RBrace,
            "LPAREN" => Self::LParen,
            "RPAREN" => Self::RParen,
            "LBRACKET" => Self::LBracket,
            "RBRACKET" => Self::RBracket,
            "OPERATOR" => Self::Operator,
            "TEMPLATE_TEXT" => Self::TemplateText,
            "TEMPLATE_OPEN" => Self::TemplateOpen,
            "TEMPLATE_CLOSE" => Self::TemplateClose,
            _ => return None,
        })
    }
}

/// A single anchored lexing rule.
#[derive(Debug, Clone)]
pub struct LexRule {
    regex: Regex,
    id: SimpleTokenId,
}

impl LexRule {
    /// Compile `pattern`; it is anchored at the current lexing position.
    pub fn new(pattern: &str, id: SimpleTokenId) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!(r"\A(?:{pattern})"))?,
            id,
        })
    }

    /// Token kind produced by this rule.
    pub fn id(&self) -> SimpleTokenId {
        self.id
    }
}

/// Ordered-rule lexer: at every position the first matching rule wins.
#[derive(Debug, Clone)]
pub struct SimpleLexer {
    rules: Vec<LexRule>,
}

impl SimpleLexer {
    /// Lexer with explicit rules.
    pub fn new(rules: Vec<LexRule>) -> Self {
        Self { rules }
    }

    /// The default C-like grammar.
    pub fn c_like() -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            LexRule::new(r"\s+", SimpleTokenId::Whitespace)?,
            LexRule::new(r"//[^\n]*", SimpleTokenId::LineComment)?,
            LexRule::new(r#""(?:\\.|[^"\\])*""#, SimpleTokenId::StringLiteral)?,
            LexRule::new(r"\d+(?:\.\d+)?", SimpleTokenId::Number)?,
            LexRule::new(r"[\p{Alphabetic}_$][\p{Alphabetic}\d_$]*", SimpleTokenId::Identifier)?,
            LexRule::new(r"\{", SimpleTokenId::LBrace)?,
            LexRule::new(r"\}", SimpleTokenId::RBrace)?,
            LexRule::new(r"\(", SimpleTokenId::LParen)?,
            LexRule::new(r"\)", SimpleTokenId::RParen)?,
            LexRule::new(r"\[", SimpleTokenId::LBracket)?,
            LexRule::new(r"\]", SimpleTokenId::RBracket)?,
            LexRule::new(r"[-+*/%=<>!&|^~?:;,.]+", SimpleTokenId::Operator)?,
        ]))
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[LexRule] {
        &self.rules
    }

    /// The top-level language.
    pub fn language() -> Language {
        Language::new(SIMPLE_LANGUAGE)
    }

    /// The template language embedded in string literals.
    pub fn template_language() -> Language {
        Language::new(TEMPLATE_LANGUAGE)
    }

    /// Lex `text` into tokens laid out from offset 0.
    pub fn tokenize(&self, text: &str) -> Vec<Token<SimpleTokenId>> {
        layout_tokens(0, self.lex(text))
    }

    /// Lex the template regions of a string literal.
    ///
    /// Returns `None` for non-literals and literals without a `${`. The returned tokens re-spell
    /// `literal` exactly: template text runs, `${`, the lexed expression, and the closing `}`.
    pub fn tokenize_template(&self, literal: &str) -> Option<Vec<Token<SimpleTokenId>>> {
        if !literal.starts_with('"') || !literal.contains("${") {
            return None;
        }
        let mut parts: Vec<(SimpleTokenId, &str)> = Vec::new();
        let mut rest = literal;
        while let Some(open) = rest.find("${") {
            if open > 0 {
                parts.push((SimpleTokenId::TemplateText, &rest[..open]));
            }
            parts.push((SimpleTokenId::TemplateOpen, &rest[open..open + 2]));
            rest = &rest[open + 2..];
            let Some(close) = rest.find('}') else {
                parts.extend(self.lex(rest));
                rest = "";
                break;
            };
            parts.extend(self.lex(&rest[..close]));
            parts.push((SimpleTokenId::TemplateClose, &rest[close..close + 1]));
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            parts.push((SimpleTokenId::TemplateText, rest));
        }
        Some(layout_tokens(0, parts))
    }

    /// Build a hierarchy for `text`, embedding every template string.
    pub fn hierarchy(&self, text: &str) -> Result<TokenHierarchy<SimpleTokenId>, HierarchyError> {
        let tokens = self.tokenize(text);
        let mut hierarchy = TokenHierarchy::new(Self::language(), tokens);
        let root = hierarchy.root_id();
        let templates: Vec<(usize, Vec<Token<SimpleTokenId>>)> = hierarchy
            .root()
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, token)| *token.id() == SimpleTokenId::StringLiteral)
            .filter_map(|(index, token)| Some((index, self.tokenize_template(token.text())?)))
            .collect();
        for (index, tokens) in templates {
            hierarchy.embed(root, index, Self::template_language(), tokens)?;
        }
        Ok(hierarchy)
    }

    fn lex<'t>(&self, text: &'t str) -> Vec<(SimpleTokenId, &'t str)> {
        let mut parts = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            let matched = self.rules.iter().find_map(|rule| {
                rule.regex
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (rule.id, m.end()))
            });
            let (id, len) = match matched {
                Some((SimpleTokenId::Identifier, len)) if KEYWORDS.contains(&&rest[..len]) => {
                    (SimpleTokenId::Keyword, len)
                }
                Some(found) => found,
                None => {
                    let len = rest.chars().next().map_or(1, char::len_utf8);
                    (SimpleTokenId::Unknown, len)
                }
            };
            parts.push((id, &rest[..len]));
            pos += len;
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token<SimpleTokenId>]) -> Vec<SimpleTokenId> {
        tokens.iter().map(|t| *t.id()).collect()
    }

    #[test]
    fn test_tokenize_basic_statement() {
        let lexer = SimpleLexer::c_like().unwrap();
        let tokens = lexer.tokenize("if (fooBar) { x = 1; }");
        use SimpleTokenId::*;
        assert_eq!(
            kinds(&tokens),
            vec![
                Keyword, Whitespace, LParen, Identifier, RParen, Whitespace, LBrace, Whitespace,
                Identifier, Whitespace, Operator, Whitespace, Number, Operator, Whitespace, RBrace,
            ]
        );
        assert_eq!(tokens[3].text(), "fooBar");
        assert_eq!(tokens[3].offset(), 4);
    }

    #[test]
    fn test_unknown_char_is_single_token() {
        let lexer = SimpleLexer::c_like().unwrap();
        let tokens = lexer.tokenize("a#b");
        assert_eq!(
            kinds(&tokens),
            vec![
                SimpleTokenId::Identifier,
                SimpleTokenId::Unknown,
                SimpleTokenId::Identifier
            ]
        );
    }

    #[test]
    fn test_template_tokens_respell_literal() {
        let lexer = SimpleLexer::c_like().unwrap();
        let literal = r#""sum=${a + b}!""#;
        let tokens = lexer.tokenize_template(literal).unwrap();
        let text: String = tokens.iter().map(Token::text).collect();
        assert_eq!(text, literal);
        assert_eq!(*tokens[1].id(), SimpleTokenId::TemplateOpen);
        assert!(lexer.tokenize_template("\"plain\"").is_none());
    }

    #[test]
    fn test_rule_order_puts_comments_before_operators() {
        let lexer = SimpleLexer::c_like().unwrap();
        let ids: Vec<_> = lexer.rules().iter().map(LexRule::id).collect();
        let comment = ids.iter().position(|id| *id == SimpleTokenId::LineComment);
        let operator = ids.iter().position(|id| *id == SimpleTokenId::Operator);
        assert!(comment < operator);
        assert_eq!(ids.first(), Some(&SimpleTokenId::Whitespace));

        // A single custom rule: everything else is unknown.
        let digits = SimpleLexer::new(vec![
            LexRule::new(r"\d+", SimpleTokenId::Number).unwrap(),
        ]);
        assert_eq!(
            kinds(&digits.tokenize("12x")),
            vec![SimpleTokenId::Number, SimpleTokenId::Unknown]
        );
    }

    #[test]
    fn test_names_resolve() {
        assert_eq!(SimpleTokenId::from_name("LBRACE"), Some(SimpleTokenId::LBrace));
        assert_eq!(SimpleTokenId::from_name("lbrace"), None);
    }
}
