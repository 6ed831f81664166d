//! Span queries for tree-building consumers
//!
//! A consumer pairing opening and closing tags needs a few questions
//! answered about raw spans without re-tokenizing them. All answers come
//! from the dialect's punctuation.

use super::MarkupSyntax;
use crate::core::attributes::trim_quotes;
use crate::core::scanner::trim_separators;
use memchr::memmem;

impl MarkupSyntax {
    /// Check if `span` closes a tag named `name`
    ///
    /// The name must sit at position 0, or at position 2 after the closing
    /// marker (`</`), and must not be followed by more name characters.
    pub fn closes_tag(&self, span: &str, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let bytes = span.as_bytes();
        let rest = if bytes.len() >= 2 && bytes[0] == self.opener && bytes[1] == self.terminator {
            &span[2..]
        } else {
            span
        };

        match rest.strip_prefix(name) {
            Some(after) => after.bytes().next().is_none_or(|b| self.ends_name(b)),
            None => false,
        }
    }

    /// Check if a tag span needs no separate closing tag
    ///
    /// True when the terminator sits right before the closer (`<a/>`), or
    /// when the span ends with an end-tag segment for `name` (`<a>..</a>`).
    pub fn is_self_terminated(&self, span: &str, name: &str) -> bool {
        let bytes = span.as_bytes();
        if bytes.len() < 3 || bytes[0] != self.opener || !bytes.ends_with(&[self.closer]) {
            return false;
        }
        let body = &bytes[..bytes.len() - 1];
        if body.ends_with(&[self.terminator]) && body[body.len() - 2] != self.opener {
            return true;
        }

        let marker = [self.opener, self.terminator];
        match memmem::rfind(body, &marker) {
            Some(pos) if pos > 0 && !name.is_empty() => {
                let (segment, _) = trim_separators(&span[pos + 2..span.len() - 1], &self.separators);
                segment == name
            }
            _ => false,
        }
    }

    /// Name part of a full tag span: `</ns:a x="1">` gives `ns:a`
    pub fn trim_name<'a>(&self, span: &'a str) -> &'a str {
        let bytes = span.as_bytes();
        let mut start = 0;
        if bytes.first() == Some(&self.opener) {
            start += 1;
        }
        if bytes.get(start) == Some(&self.terminator) {
            start += 1;
        }

        let len = bytes[start..]
            .iter()
            .position(|&b| self.ends_name(b))
            .unwrap_or(bytes.len() - start);
        &span[start..start + len]
    }

    /// Attribute value with this dialect's quotation marks stripped
    #[inline]
    pub fn trim_value<'a>(&self, value: &'a str) -> &'a str {
        trim_quotes(value, &self.quotes)
    }

    /// Inner data of a comment or section span
    ///
    /// Returns `None` when `span` is neither, or when a section lacks its
    /// data opener.
    pub fn trim_data<'a>(&self, span: &'a str) -> Option<&'a str> {
        if let Some(inner) = strip_delimiters(span, &self.comment_opener, &self.comment_closer) {
            return Some(inner);
        }
        let inner = strip_delimiters(span, &self.section_opener, &self.section_closer)?;
        let data_start = inner.bytes().position(|b| b == self.section_data_opener)?;
        Some(&inner[data_start + 1..])
    }

    #[inline]
    fn ends_name(&self, b: u8) -> bool {
        b == self.closer || b == self.terminator || self.separators.contains(&b)
    }
}

fn strip_delimiters<'a>(span: &'a str, opener: &str, closer: &str) -> Option<&'a str> {
    if span.len() < opener.len() + closer.len() {
        return None;
    }
    span.strip_prefix(opener)?.strip_suffix(closer)
}

#[cfg(test)]
mod tests {
    use crate::syntax::XML;

    #[test]
    fn test_closes_tag() {
        assert!(XML.closes_tag("</a>", "a"));
        assert!(!XML.closes_tag("</ab>", "a"));
        assert!(XML.closes_tag("a", "a"));
        assert!(XML.closes_tag("</a >", "a"));
        assert!(!XML.closes_tag("</b>", "a"));
        assert!(!XML.closes_tag("</a>", ""));
    }

    #[test]
    fn test_is_self_terminated() {
        assert!(XML.is_self_terminated("<br/>", "br"));
        assert!(XML.is_self_terminated("<a x='1' />", "a"));
        assert!(XML.is_self_terminated("<a>text</a>", "a"));
        assert!(!XML.is_self_terminated("<a>text</b>", "a"));
        assert!(!XML.is_self_terminated("<a>", "a"));
        assert!(!XML.is_self_terminated("</>", ""));
        assert!(!XML.is_self_terminated("</a>", "a"));
    }

    #[test]
    fn test_trim_name() {
        assert_eq!(XML.trim_name("<a x=\"1\">"), "a");
        assert_eq!(XML.trim_name("</ns:a>"), "ns:a");
        assert_eq!(XML.trim_name("<br/>"), "br");
        assert_eq!(XML.trim_name("<!DOCTYPE html>"), "!DOCTYPE");
        assert_eq!(XML.trim_name("plain"), "plain");
    }

    #[test]
    fn test_trim_value() {
        assert_eq!(XML.trim_value("'1'"), "1");
        assert_eq!(XML.trim_value(XML.trim_value("\"1\"")), "1");
        assert_eq!(XML.trim_value("bare"), "bare");
    }

    #[test]
    fn test_trim_data() {
        assert_eq!(XML.trim_data("<!-- a -->"), Some(" a "));
        assert_eq!(XML.trim_data("<![CDATA[x<y]]>"), Some("x<y"));
        assert_eq!(XML.trim_data("<!-->"), None);
        assert_eq!(XML.trim_data("<![CDATA]]>"), None);
        assert_eq!(XML.trim_data("<a>"), None);
    }
}
