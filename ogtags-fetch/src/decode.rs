use encoding_rs::{Encoding, UTF_8};

/// How far into the body to look for a `<meta charset>` declaration.
const META_SNIFF_BYTES: usize = 1024;

/// Decodes an HTML body to text.
///
/// The encoding comes from, in order: a byte-order mark, the `charset`
/// parameter of `Content-Type`, a `charset=` declaration near the start of
/// the document, and finally UTF-8. Unknown labels fall through to the next
/// source. Malformed sequences become U+FFFD.
pub fn decode_html(content_type: Option<&str>, body: &[u8]) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(body))
        .unwrap_or(UTF_8);
    // `decode` lets a BOM override the chosen encoding.
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        Encoding::for_label(value.as_bytes())
    })
}

fn meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let prefix = &body[..body.len().min(META_SNIFF_BYTES)];
    let lower = prefix.to_ascii_lowercase();
    let idx = lower.windows(8).position(|w| w == b"charset=")?;
    let label: Vec<u8> = lower[idx + 8..]
        .iter()
        .copied()
        .skip_while(|b| *b == b'"' || *b == b'\'')
        .take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'"' | b'\'' | b';' | b'>' | b'/'))
        .collect();
    Encoding::for_label(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_is_honoured() {
        let body = b"<meta property=\"og:title\" content=\"Caf\xe9\">";
        let text = decode_html(Some("text/html; charset=ISO-8859-1"), body);
        assert!(text.contains("Café"), "{text}");
    }

    #[test]
    fn quoted_header_charset() {
        let text = decode_html(Some("text/html;charset=\"windows-1252\""), b"\x93hi\x94");
        assert_eq!(text, "\u{201c}hi\u{201d}");
    }

    #[test]
    fn meta_charset_is_used_without_header() {
        let body = b"<html><head><meta charset=\"shift_jis\"><title>\x93\xfa\x96\x7b</title>";
        let text = decode_html(Some("text/html"), body);
        assert!(text.contains("日本"), "{text}");
    }

    #[test]
    fn http_equiv_meta_charset() {
        let body = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=iso-8859-1\">\xe9";
        assert!(decode_html(None, body).ends_with('é'));
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let text = decode_html(Some("text/html; charset=bogus"), "naïve".as_bytes());
        assert_eq!(text, "naïve");
    }

    #[test]
    fn bom_wins_over_header() {
        let mut body = vec![0xEF, 0xBB, 0xBF];
        body.extend_from_slice("é".as_bytes());
        assert_eq!(decode_html(Some("text/html; charset=iso-8859-1"), &body), "é");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(decode_html(None, b"Caf\xe9"), "Caf\u{fffd}");
    }
}
