//! Contact deep-link construction
//!
//! Builds links of the form `https://<host>/<identifier>?text=<message>` that
//! open a chat with the market's advisor and pre-fill the outreach message.

use serde::Serialize;

/// Default outreach message; `{structure}` and `{category}` are substituted verbatim
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "Hello! I need help setting up {structure} for {category}. Please contact me.";

/// Default link host
pub const DEFAULT_LINK_HOST: &str = "wa.me";

/// Resolved contact payload shown on the details screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    /// Raw identifier from the catalog (may carry a leading `+`)
    pub identifier: String,
    /// Display label, e.g. "UK"
    pub label: String,
    /// Formatted outreach message
    pub message: String,
    /// Ready-to-open deep-link
    pub link: String,
}

/// Strip exactly one leading `+`
pub fn normalize_identifier(raw: &str) -> &str {
    raw.strip_prefix('+').unwrap_or(raw)
}

/// Fill in the message template
pub fn format_message(template: &str, category: &str, structure: &str) -> String {
    template
        .replace("{structure}", structure)
        .replace("{category}", category)
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub fn encode_query_component(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Build the deep-link for an identifier and free-text message
pub fn deep_link(host: &str, identifier: &str, message: &str) -> String {
    format!(
        "https://{}/{}?text={}",
        host,
        normalize_identifier(identifier),
        encode_query_component(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_single_plus() {
        assert_eq!(normalize_identifier("+447712463573"), "447712463573");
        assert_eq!(normalize_identifier("447712463573"), "447712463573");
        assert_eq!(normalize_identifier("++44"), "+44");
    }

    #[test]
    fn test_format_message() {
        let msg = format_message(
            DEFAULT_MESSAGE_TEMPLATE,
            "Setup in UK",
            "Limited Company",
        );
        assert_eq!(
            msg,
            "Hello! I need help setting up Limited Company for Setup in UK. Please contact me."
        );
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_query_component("a b&c=d?e#f%g"), "a%20b%26c%3Dd%3Fe%23f%25g");
        assert_eq!(encode_query_component("£"), "%C2%A3");
        assert_eq!(encode_query_component("A-z_0.9~"), "A-z_0.9~");
    }

    #[test]
    fn test_deep_link_format() {
        let link = deep_link("wa.me", "+917975931377", "Hi there");
        assert_eq!(link, "https://wa.me/917975931377?text=Hi%20there");
    }

    #[test]
    fn test_deep_link_is_deterministic() {
        let a = deep_link("wa.me", "+44", "LLP (Limited Liability Partnership)");
        let b = deep_link("wa.me", "+44", "LLP (Limited Liability Partnership)");
        assert_eq!(a, b);
        assert_ne!(a, deep_link("wa.me", "+44", "LLP"));
        assert_ne!(a, deep_link("wa.me", "+91", "LLP (Limited Liability Partnership)"));
    }
}
