//! Output helpers for token streams
//!
//! The host renderer owns styling; these helpers cover what it typically needs on the way
//! there: getting the source back, merging runs of equal kind and serializing tokens.

use super::token::Token;

/// Concatenate token texts, giving back the tokenized source
pub fn detokenize<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = Token<'a>>,
{
    tokens.into_iter().map(|t| t.text).collect()
}

/// Merge adjacent tokens of the same kind into one
///
/// Tokens are slices of `source`; two tokens are merged only when their spans touch.
pub fn coalesce<'a, I>(source: &'a str, tokens: I) -> Vec<Token<'a>>
where
    I: IntoIterator<Item = Token<'a>>,
{
    let mut merged: Vec<Token<'a>> = Vec::new();

    for token in tokens {
        match merged.last_mut() {
            Some(last) if last.kind == token.kind && last.span.end == token.span.start => {
                last.span.end = token.span.end;
                last.text = &source[last.span.clone()];
            }
            _ => merged.push(token),
        }
    }

    merged
}

/// Serialize tokens as a JSON array of `{kind, text, span}` objects
pub fn to_json(tokens: &[Token<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}

/// Render one `<kind>text</kind>` line per token
///
/// Newlines, tabs and carriage returns in the text are escaped so each token stays on its
/// own line.
pub fn to_tag_string(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        let tag = token.kind.tag();
        out.push('<');
        out.push_str(tag);
        out.push('>');
        for ch in token.text.chars() {
            match ch {
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                '\r' => out.push_str("\\r"),
                other => out.push(other),
            }
        }
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::lexer::tokenize;
    use crate::routes::token::TokenKind;

    #[test]
    fn test_detokenize_round_trip() {
        let source = "# routes\nGET /a/:b c.D.e(b: Int)\n";
        assert_eq!(detokenize(tokenize(source)), source);
    }

    #[test]
    fn test_coalesce_joins_path_characters() {
        let source = "GET /users/:id";
        let merged = coalesce(source, tokenize(source));
        let pairs: Vec<_> = merged.iter().map(|t| (t.kind, t.text)).collect();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::Keyword, "GET"),
                (TokenKind::Whitespace, " "),
                (TokenKind::StringLiteral, "/users/"),
                (TokenKind::Variable, ":id"),
            ]
        );
        assert_eq!(merged[2].span, 4..11);
    }

    #[test]
    fn test_coalesce_keeps_distinct_kinds_apart() {
        let source = "GET / a.b.c";
        let merged = coalesce(source, tokenize(source));
        let classes: Vec<_> = merged
            .iter()
            .filter(|t| t.kind == TokenKind::Class)
            .map(|t| t.text)
            .collect();
        assert_eq!(classes, vec!["a.b."]);
    }

    #[test]
    fn test_tag_string_escapes_newlines() {
        let tokens: Vec<_> = tokenize("# hi\n").collect();
        assert_eq!(
            to_tag_string(&tokens),
            "<comment># hi</comment>\n<whitespace>\\n</whitespace>\n"
        );
    }

    #[test]
    fn test_json_output() {
        let tokens: Vec<_> = tokenize("PUT ").collect();
        let json = to_json(&tokens).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "keyword");
        assert_eq!(value[0]["text"], "PUT");
        assert_eq!(value[0]["span"]["start"], 0);
        assert_eq!(value[1]["kind"], "whitespace");
    }
}
