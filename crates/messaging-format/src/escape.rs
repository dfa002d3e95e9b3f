//! Escaping rules for the hypertext-family targets.

use crate::target::Dialect;

/// Escape `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// HTML escaping plus the MessageML templating sequences `${` and `#{`.
pub fn escape_messageml(text: &str) -> String {
    escape_reserved(&escape_html(text))
}

/// Neutralize `${` and `#{` only.
pub fn escape_reserved(text: &str) -> String {
    text.replace("${", "&#36;{").replace("#{", "&#35;{")
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

/// Escape element content for `dialect`; non-markup dialects pass through.
pub(crate) fn escape_text(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Html => escape_html(text),
        Dialect::MessageMl => escape_messageml(text),
        _ => text.to_string(),
    }
}

/// Escape an attribute value for `dialect`.
pub(crate) fn escape_attr_for(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::MessageMl => escape_reserved(&escape_attr(text)),
        Dialect::Html => escape_attr(text),
        _ => text.to_string(),
    }
}
