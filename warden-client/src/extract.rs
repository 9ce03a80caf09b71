//! Payload extraction from HTML pages
//!
//! The log host sometimes wraps the log in an HTML page with the text inside
//! a `<pre>` element. Extraction returns that element's text with nested
//! markup removed and entities decoded.

/// Returns the text of the first `<pre>` element, if any
///
/// Tag matching is ASCII case-insensitive and allows attributes. An
/// unclosed element runs to the end of the document.
pub fn extract_pre(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();

    let mut from = 0;
    let open_start = loop {
        let idx = from + lower[from..].find("<pre")?;
        match lower.as_bytes().get(idx + 4).copied() {
            Some(b'>' | b' ' | b'\t' | b'\r' | b'\n') => break idx,
            _ => from = idx + 4,
        }
    };

    let open_end = open_start + lower[open_start..].find('>')? + 1;
    let close = lower[open_end..]
        .find("</pre")
        .map_or(html.len(), |idx| open_end + idx);

    Some(inner_text(&html[open_end..close]))
}

/// Strips tags and decodes entities
fn inner_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    text.push_str(rest);

    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    const MAX_ENTITY_LEN: usize = 10;

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_pre_text() {
        let html = "<html><body><h1>Log</h1><pre>line 1\nline 2</pre></body></html>";
        assert_eq!(extract_pre(html).as_deref(), Some("line 1\nline 2"));
    }

    #[test]
    fn test_missing_pre_returns_none() {
        assert_eq!(extract_pre("plain text log"), None);
        assert_eq!(extract_pre("<preface>not a pre</preface>"), None);
    }

    #[test]
    fn test_tag_case_and_attributes() {
        let html = "<PRE class=\"log\">content</Pre>";
        assert_eq!(extract_pre(html).as_deref(), Some("content"));
    }

    #[test]
    fn test_nested_markup_and_entities() {
        let html = "<pre><b>CPU</b> &lt;10%&gt; &amp; done&#33; &#x41; &bogus; a & b</pre>";
        assert_eq!(
            extract_pre(html).as_deref(),
            Some("CPU <10%> & done! A &bogus; a & b")
        );
    }

    #[test]
    fn test_unclosed_pre_runs_to_end() {
        assert_eq!(extract_pre("<pre>tail text").as_deref(), Some("tail text"));
    }

    #[test]
    fn test_empty_pre() {
        assert_eq!(extract_pre("<pre></pre>").as_deref(), Some(""));
    }

    #[test]
    fn test_first_pre_wins() {
        let html = "<pre>first</pre><pre>second</pre>";
        assert_eq!(extract_pre(html).as_deref(), Some("first"));
    }
}
