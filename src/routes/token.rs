//! Token types produced by the routes lexer.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Classification attached to a span of routes source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Whitespace,
    Comment,
    /// HTTP method or the `->` include arrow
    Keyword,
    /// A character of the URL path pattern
    StringLiteral,
    /// `:id` placeholders and the handler parameter list
    Variable,
    /// A `name.` segment of the handler reference
    Class,
    /// The handler method name
    Function,
    /// Punctuation and anything no rule recognized
    Text,
}

impl TokenKind {
    /// All kinds, in declaration order
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Whitespace,
        TokenKind::Comment,
        TokenKind::Keyword,
        TokenKind::StringLiteral,
        TokenKind::Variable,
        TokenKind::Class,
        TokenKind::Function,
        TokenKind::Text,
    ];

    /// Dotted name in the conventional highlighter token hierarchy
    pub fn dotted_name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "Text.Whitespace",
            TokenKind::Comment => "Comment",
            TokenKind::Keyword => "Keyword",
            TokenKind::StringLiteral => "Literal.String",
            TokenKind::Variable => "Name.Variable",
            TokenKind::Class => "Name.Class",
            TokenKind::Function => "Name.Function",
            TokenKind::Text => "Text",
        }
    }

    /// Short CSS class used by highlighter stylesheets; empty for plain text
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "w",
            TokenKind::Comment => "c",
            TokenKind::Keyword => "k",
            TokenKind::StringLiteral => "s",
            TokenKind::Variable => "nv",
            TokenKind::Class => "nc",
            TokenKind::Function => "nf",
            TokenKind::Text => "",
        }
    }

    /// Lowercase tag name, as used by the tag format
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Keyword => "keyword",
            TokenKind::StringLiteral => "string-literal",
            TokenKind::Variable => "variable",
            TokenKind::Class => "class",
            TokenKind::Function => "function",
            TokenKind::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dotted_name())
    }
}

/// A classified slice of the input
///
/// `span` is the byte range of `text` within the tokenized source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Range<usize>) -> Self {
        Token { kind, text, span }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Check if the token text spans a line break
    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_names_are_unique() {
        let mut names: Vec<_> = TokenKind::ALL.iter().map(|k| k.dotted_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TokenKind::ALL.len());
    }

    #[test]
    fn test_display_uses_dotted_name() {
        assert_eq!(TokenKind::StringLiteral.to_string(), "Literal.String");
        assert_eq!(TokenKind::Variable.to_string(), "Name.Variable");
    }

    #[test]
    fn test_plain_text_has_no_css_class() {
        assert_eq!(TokenKind::Text.css_class(), "");
        assert_eq!(TokenKind::Keyword.css_class(), "k");
    }

    #[test]
    fn test_token_newline_check() {
        let token = Token::new(TokenKind::Whitespace, " \n", 3..5);
        assert!(token.is_whitespace());
        assert!(token.contains_newline());
    }
}
