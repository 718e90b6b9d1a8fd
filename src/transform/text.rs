// src/transform/text.rs
//! Plain-text cleanup for titles and names.

use std::borrow::Cow;

/// Decodes HTML entities and folds typographic punctuation to ASCII.
///
/// Decoding repeats until nothing changes, so double-encoded input such
/// as `&amp;#8217;` comes out clean and a second call is always a no-op.
/// Curly quotes, en dashes and ellipses become `'`, `"`, `-` and `...`;
/// em dashes are kept.
pub fn decode_html_entities(input: &str) -> String {
    let mut current = fold_typography(input).into_owned();

    // Each pass that changes anything shortens the text, so this ends.
    while current.contains('&') {
        let next = {
            let decoded = html_escape::decode_html_entities(&current);
            fold_typography(&decoded).into_owned()
        };
        if next == current {
            break;
        }
        current = next;
    }

    current
}

fn fold_typography(input: &str) -> Cow<'_, str> {
    if !input
        .chars()
        .any(|c| matches!(c, '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2026}'))
    {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_wordpress_entities() {
        assert_eq!(decode_html_entities("Health &amp; Care"), "Health & Care");
        assert_eq!(
            decode_html_entities("Understanding Your Child&#8217;s Autism Diagnosis"),
            "Understanding Your Child's Autism Diagnosis"
        );
        assert_eq!(decode_html_entities("ABA Self Care &#038; Independence"), "ABA Self Care & Independence");
        assert_eq!(decode_html_entities("&#8220;Quoted&#8221;"), "\"Quoted\"");
        assert_eq!(decode_html_entities("2019&#8211;2024"), "2019-2024");
        assert_eq!(decode_html_entities("Wait&hellip;"), "Wait...");
        assert_eq!(decode_html_entities("a &#8212; b"), "a \u{2014} b");
        assert_eq!(decode_html_entities("It&#039;s"), "It's");
        assert_eq!(decode_html_entities("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn decoding_is_idempotent() {
        let samples = [
            "Health &amp; Care",
            "Parent&#8217;s Guide &hellip;",
            "AT&T and R&D",
            "Costs &amp;amp; Insurance",
            "plain text",
            "&lt;script&gt;",
            "Q&amp;amp;amp;amp;amp;amp;A",
        ];
        for sample in samples {
            let once = decode_html_entities(sample);
            let twice = decode_html_entities(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn unwraps_deeply_nested_encoding_in_one_call() {
        assert_eq!(decode_html_entities("Q&amp;amp;amp;amp;amp;amp;A"), "Q&A");
        assert_eq!(
            decode_html_entities("Child&amp;amp;amp;amp;#8217;s"),
            "Child's"
        );
    }

    #[test]
    fn leaves_bare_ampersands_alone() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("Q&A"), "Q&A");
    }
}
