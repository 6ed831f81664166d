//! Generic syntax-driven tag scanner
//!
//! Same classify / recover / emit steps as the XML tokenizer, with every
//! delimiter taken from a [`MarkupSyntax`]. Tag names are checked with the
//! ASCII identifier rule instead of the full Unicode name grammar, so
//! `<my.tag>` or `<élément>` are discarded here while the XML tokenizer
//! accepts them.

use super::span::{TagKind, TagSpan};
use super::MarkupSyntax;
use crate::core::scanner::{find_byte, find_literal, index_of_outside_quotes, trim_separators};
use crate::core::unicode::is_ascii_identifier;

/// Extract the next tag span from `input`
///
/// `origin` is added to every start offset. Returns `None` once `input`
/// is exhausted.
pub fn scan_tag<'a>(syntax: &MarkupSyntax, input: &'a str, origin: usize) -> Option<TagSpan<'a>> {
    if input.is_empty() {
        return None;
    }

    let bytes = input.as_bytes();
    match find_byte(bytes, syntax.opener()) {
        None => return Some(TagSpan::new(TagKind::CONTENT, input, origin)),
        Some(0) => {}
        Some(pos) => return Some(TagSpan::new(TagKind::CONTENT, &input[..pos], origin)),
    }

    if input.starts_with(syntax.comment_opener()) {
        return Some(scan_comment(syntax, input, origin));
    }
    if input.starts_with(syntax.section_opener()) {
        return Some(scan_section(syntax, input, origin));
    }

    let close = match index_of_outside_quotes(&bytes[1..], syntax.closer(), syntax.quotes()) {
        Some(i) => i + 1,
        None => {
            tracing::trace!(origin, "unterminated tag, discarding remainder");
            return Some(TagSpan::new(TagKind::DISCARDED | TagKind::CONTENT, input, origin));
        }
    };

    Some(scan_body(syntax, input, origin, close))
}

fn scan_comment<'a>(syntax: &MarkupSyntax, input: &'a str, origin: usize) -> TagSpan<'a> {
    let inner_start = syntax.comment_opener().len();
    let closer = syntax.comment_closer();

    match find_literal(&input.as_bytes()[inner_start..], closer.as_bytes()) {
        Some(i) => TagSpan::new(TagKind::COMMENT, &input[..inner_start + i + closer.len()], origin)
            .with_data(&input[inner_start..inner_start + i], origin + inner_start),
        None => {
            tracing::trace!(origin, "unterminated comment, discarding to end of input");
            TagSpan::new(TagKind::DISCARDED | TagKind::COMMENT, input, origin)
        }
    }
}

fn scan_section<'a>(syntax: &MarkupSyntax, input: &'a str, origin: usize) -> TagSpan<'a> {
    let bytes = input.as_bytes();
    let inner_start = syntax.section_opener().len();
    let closer = syntax.section_closer();

    let close = match find_literal(&bytes[inner_start..], closer.as_bytes()) {
        Some(i) => inner_start + i,
        None => {
            tracing::trace!(origin, "unterminated section");
            return recover(syntax, input, origin, TagKind::SECTION);
        }
    };
    let span = &input[..close + closer.len()];

    match find_byte(&bytes[inner_start..close], syntax.section_data_opener()) {
        Some(i) => {
            let name_end = inner_start + i;
            TagSpan::new(TagKind::SECTION, span, origin)
                .with_name(&input[inner_start..name_end], origin + inner_start)
                .with_data(&input[name_end + 1..close], origin + name_end + 1)
        }
        None => TagSpan::new(TagKind::DISCARDED | TagKind::SECTION, span, origin),
    }
}

fn scan_body<'a>(syntax: &MarkupSyntax, input: &'a str, origin: usize, close: usize) -> TagSpan<'a> {
    let body = &input[1..close];
    let body_bytes = body.as_bytes();
    let terminator = syntax.terminator();

    // Alt-opener tags keep their marker in the name; a matching trailing
    // marker (`<?pi?>`) is excluded from the data.
    let (kind, prefix, suffix) = match body_bytes.first() {
        Some(&b) if syntax.alt_openers().contains(&b) => {
            let trailing = body_bytes.len() >= 2 && body_bytes.ends_with(&[b]);
            (TagKind::OPENING, 0, usize::from(trailing))
        }
        Some(&b) if b == terminator => (TagKind::CLOSING, 1, 0),
        _ if body_bytes.ends_with(&[terminator]) => (TagKind::UNPAIRED, 0, 1),
        _ => (TagKind::OPENING, 0, 0),
    };

    let inner = &body[prefix..body.len() - suffix];
    let name_len = inner
        .bytes()
        .position(|b| syntax.separators().contains(&b))
        .unwrap_or(inner.len());
    let name = &inner[..name_len];

    if !is_ascii_identifier(name, syntax.alt_openers()) {
        tracing::trace!(origin, name, "invalid tag name");
        return recover(syntax, input, origin, kind);
    }

    let name_start = 1 + prefix;
    let tag = TagSpan::new(kind, &input[..close + 1], origin).with_name(name, origin + name_start);
    if kind == TagKind::CLOSING {
        return tag;
    }

    let (data, leading) = trim_separators(&inner[name_len..], syntax.separators());
    if data.is_empty() {
        tag
    } else {
        tag.with_data(data, origin + name_start + name_len + leading)
    }
}

fn recover<'a>(syntax: &MarkupSyntax, input: &'a str, origin: usize, tentative: TagKind) -> TagSpan<'a> {
    let end = find_byte(&input.as_bytes()[1..], syntax.opener()).map_or(input.len(), |i| i + 1);
    TagSpan::new(TagKind::DISCARDED | tentative, &input[..end], origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::TokenCategory;
    use crate::core::tokenizer::next_token;
    use crate::syntax::{HTML, XML};

    fn spans<'a>(syntax: &MarkupSyntax, input: &'a str) -> Vec<TagSpan<'a>> {
        let mut out = Vec::new();
        let mut pos = 0;
        while let Some(tag) = scan_tag(syntax, &input[pos..], pos) {
            pos = tag.end();
            out.push(tag);
        }
        out
    }

    #[test]
    fn test_well_formed() {
        let tags = spans(&XML, "<a x=\"1\">t<b/></a>");
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[0].kind, TagKind::OPENING);
        assert_eq!(tags[0].name, "a");
        assert_eq!(tags[0].data, "x=\"1\"");
        assert_eq!(tags[0].data_start, Some(3));
        assert_eq!(tags[1].kind, TagKind::CONTENT);
        assert_eq!(tags[1].span, "t");
        assert_eq!(tags[2].kind, TagKind::UNPAIRED);
        assert_eq!(tags[2].name, "b");
        assert_eq!(tags[3].kind, TagKind::CLOSING);
        assert_eq!(tags[3].name_start, Some(16));
    }

    #[test]
    fn test_agrees_with_xml_tokenizer() {
        let input = "<r><!-- c --><![CDATA[x]]><p a='1'/>text</r><1bad><q>";
        let generic = spans(&XML, input);

        let mut pos = 0;
        let mut xml = Vec::new();
        while let Some(token) = next_token(&input[pos..], pos) {
            pos = token.end();
            xml.push(token);
        }

        assert_eq!(generic.len(), xml.len());
        for (tag, token) in generic.iter().zip(&xml) {
            assert_eq!(tag.category(), token.category, "{:?}", tag.span);
            assert_eq!(tag.span, token.span);
            assert_eq!(tag.start, token.offset);
            assert_eq!(tag.name, token.name);
            assert_eq!(tag.data, token.data);
        }
    }

    #[test]
    fn test_comment_and_section() {
        let tags = spans(&XML, "<!-- a --><![CDATA[<b>]]>");
        assert_eq!(tags[0].kind, TagKind::COMMENT);
        assert_eq!(tags[0].data, " a ");
        assert_eq!(tags[1].kind, TagKind::SECTION);
        assert_eq!(tags[1].name, "CDATA");
        assert_eq!(tags[1].data, "<b>");
        assert_eq!(tags[1].data_start, Some(19));
    }

    #[test]
    fn test_unterminated_comment() {
        let tags = spans(&XML, "<!-- a");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::DISCARDED | TagKind::COMMENT);
    }

    #[test]
    fn test_alt_opener_tags() {
        let tags = spans(&XML, "<?xml version=\"1.0\"?><!DOCTYPE html>");
        assert_eq!(tags[0].kind, TagKind::OPENING);
        assert_eq!(tags[0].name, "?xml");
        assert_eq!(tags[0].data, "version=\"1.0\"");
        assert_eq!(tags[1].name, "!DOCTYPE");
        assert_eq!(tags[1].data, "html");

        // HTML has no processing instructions
        let tags = spans(&HTML, "<?php x?><p>");
        assert_eq!(tags[0].kind, TagKind::DISCARDED | TagKind::OPENING);
        assert_eq!(tags[1].name, "p");
    }

    #[test]
    fn test_ascii_identifier_is_stricter() {
        let tags = spans(&XML, "<my.tag><ok>");
        assert!(tags[0].is_discarded());
        assert_eq!(tags[0].span, "<my.tag>");
        assert_eq!(tags[1].kind, TagKind::OPENING);

        let token = next_token("<my.tag>", 0).unwrap();
        assert_eq!(token.category, TokenCategory::OPENING_TAG);
    }

    #[test]
    fn test_custom_dialect() {
        let syntax = MarkupSyntax::builder()
            .opener('[')
            .closer(']')
            .comment("[*", "*]")
            .section("[[", ':', "]]")
            .build()
            .unwrap();
        let tags = spans(&syntax, "[b bold]text[/b][* note *][[raw:x]]");
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0].kind, TagKind::OPENING);
        assert_eq!(tags[0].name, "b");
        assert_eq!(tags[0].data, "bold");
        assert_eq!(tags[1].span, "text");
        assert_eq!(tags[2].kind, TagKind::CLOSING);
        assert_eq!(tags[3].kind, TagKind::COMMENT);
        assert_eq!(tags[3].data, " note ");
        assert_eq!(tags[4].kind, TagKind::SECTION);
        assert_eq!(tags[4].name, "raw");
        assert_eq!(tags[4].data, "x");
    }

    #[test]
    fn test_unterminated_section_recovers() {
        let tags = spans(&XML, "<![CDATA[abc <p>x");
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].kind, TagKind::DISCARDED | TagKind::SECTION);
        assert_eq!(tags[0].span, "<![CDATA[abc ");
        assert_eq!(tags[1].kind, TagKind::OPENING);
        assert_eq!(tags[1].start, 13);
        assert_eq!(tags[2].span, "x");

        let tags = spans(&XML, "<![CDATA[abc");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::DISCARDED | TagKind::SECTION);
    }

    #[test]
    fn test_section_without_data_opener() {
        let tags = spans(&XML, "<![CDATA]]><a>");
        assert_eq!(tags[0].kind, TagKind::DISCARDED | TagKind::SECTION);
        assert_eq!(tags[0].span, "<![CDATA]]>");
        assert_eq!(tags[0].name_start, None);
        assert_eq!(tags[1].kind, TagKind::OPENING);
    }

    #[test]
    fn test_unterminated_tag() {
        let tags = spans(&XML, "x <a y=1 <b");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].span, "x ");
        assert_eq!(tags[1].kind, TagKind::DISCARDED | TagKind::CONTENT);
        assert_eq!(tags[1].span, "<a y=1 <b");
    }

    #[test]
    fn test_quoted_closer_in_tag() {
        let tags = spans(&XML, "<a title=\"x > y\">z");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind, TagKind::OPENING);
        assert_eq!(tags[0].span, "<a title=\"x > y\">");
        assert_eq!(tags[0].data, "title=\"x > y\"");
        assert_eq!(tags[1].span, "z");
    }

    #[test]
    fn test_origin_offset() {
        let tag = scan_tag(&XML, "<a>", 50).unwrap();
        assert_eq!(tag.start, 50);
        assert_eq!(tag.name_start, Some(51));
        assert!(scan_tag(&XML, "", 0).is_none());
    }
}
