//! Tokenizer and regex generation for path specs.

use super::{Key, KeyName, PatternOptions};
use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_DELIMITER: &str = "/";

// 1: escaped char, 2: prefix, 3: name, 4: custom pattern, 5: unnamed group,
// 6: modifier, 7: bare asterisk
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\\.)|([/.])?(?:(?::(\w+)(?:\(((?:\\.|[^\\()])+)\))?|\(((?:\\.|[^\\()])+)\))([+*?])?|(\*))",
    )
    .expect("path token regex is valid")
});

#[derive(Debug)]
enum Token {
    Literal(String),
    Param(Key),
}

fn tokenize(spec: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut index = 0;
    let mut unnamed = 0;

    for caps in TOKEN.captures_iter(spec) {
        let Some(whole) = caps.get(0) else { continue };
        literal.push_str(&spec[index..whole.start()]);
        index = whole.end();

        if let Some(escaped) = caps.get(1) {
            literal.push_str(&escaped.as_str()[1..]);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }

        let prefix = caps.get(2).map(|m| m.as_str());
        let modifier = caps.get(6).map(|m| m.as_str());
        let asterisk = caps.get(7).is_some();
        let next = spec[index..].chars().next();

        let name = match caps.get(3) {
            Some(name) => KeyName::Named(name.as_str().to_string()),
            None => {
                unnamed += 1;
                KeyName::Index(unnamed - 1)
            }
        };
        let delimiter = prefix.unwrap_or(DEFAULT_DELIMITER);
        let pattern = match caps.get(4).or_else(|| caps.get(5)) {
            Some(custom) => escape_group(custom.as_str()),
            None if asterisk => ".*".to_string(),
            None => format!("[^{}]+?", regex::escape(delimiter)),
        };

        tokens.push(Token::Param(Key {
            name,
            prefix: prefix.unwrap_or_default().to_string(),
            delimiter: delimiter.to_string(),
            optional: matches!(modifier, Some("?" | "*")),
            repeat: matches!(modifier, Some("+" | "*")),
            partial: match (prefix, next) {
                (Some(prefix), Some(next)) => !prefix.starts_with(next),
                _ => false,
            },
            asterisk,
            pattern,
        }));
    }

    literal.push_str(&spec[index..]);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Escape characters that would open groups or assertions inside a custom
/// parameter pattern. Already-escaped characters are kept as they are.
fn escape_group(group: &str) -> String {
    let mut out = String::with_capacity(group.len());
    let mut escaped = false;
    for c in group.chars() {
        if !escaped && matches!(c, '=' | '!' | ':' | '$' | '/' | '(' | ')') {
            out.push('\\');
        }
        escaped = !escaped && c == '\\';
        out.push(c);
    }
    out
}

/// Build the anchored regex source and key list for `spec`.
pub(super) fn to_regex_source(spec: &str, options: &PatternOptions) -> (String, Vec<Key>) {
    let mut route = String::new();
    let mut keys = Vec::new();

    for token in tokenize(spec) {
        match token {
            Token::Literal(text) => route.push_str(&regex::escape(&text)),
            Token::Param(key) => {
                let prefix = regex::escape(&key.prefix);
                let mut capture = format!("(?:{})", key.pattern);
                if key.repeat {
                    capture = format!("{capture}(?:{prefix}{capture})*");
                }
                let capture = if !key.optional {
                    format!("{prefix}({capture})")
                } else if key.partial {
                    format!("{prefix}({capture})?")
                } else {
                    format!("(?:{prefix}({capture}))?")
                };
                route.push_str(&capture);
                keys.push(key);
            }
        }
    }

    let delimiter = regex::escape(DEFAULT_DELIMITER);
    if !options.strict {
        if route.ends_with(&delimiter) {
            route.truncate(route.len() - delimiter.len());
        }
        route.push_str(&format!("(?:{delimiter})?"));
    }
    route.push('$');

    let flags = if options.sensitive { "" } else { "(?i)" };
    (format!("{flags}^{route}"), keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed() {
        let tokens = tokenize("/users/:id/posts");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], Token::Literal(s) if s == "/users"));
        match &tokens[1] {
            Token::Param(key) => {
                assert_eq!(key.name, KeyName::Named("id".into()));
                assert_eq!(key.prefix, "/");
                assert_eq!(key.pattern, "[^/]+?");
                assert!(!key.optional && !key.repeat && !key.partial);
            }
            Token::Literal(_) => panic!("expected a parameter"),
        }
        assert!(matches!(&tokens[2], Token::Literal(s) if s == "/posts"));
    }

    #[test]
    fn test_regex_source() {
        let (source, keys) = to_regex_source("/host/:id", &PatternOptions::default());
        assert_eq!(source, "(?i)^/host/((?:[^/]+?))(?:/)?$");
        assert_eq!(keys.len(), 1);

        let strict = PatternOptions::new().strict(true).sensitive(true);
        let (source, _) = to_regex_source("/foo/", &strict);
        assert_eq!(source, "^/foo/$");
    }

    #[test]
    fn test_escape_group() {
        assert_eq!(escape_group("\\d+"), "\\d+");
        assert_eq!(escape_group("a$"), "a\\$");
        assert_eq!(escape_group("\\$"), "\\$");
    }
}
