use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::fmt::Write as FmtWrite;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so that "&amp;" wins over any shorter overlapping entity
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use deckfill::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hi\"</tag>"), "&lt;tag&gt;&quot;hi&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Escape text destined for a DrawingML `<a:t>` element.
///
/// XML 1.0 cannot carry most C0 control characters, so everything below
/// U+0020 except tab, newline and carriage return is written in the OOXML
/// `_xHHHH_` form. This is how PowerPoint stores a vertical tab (soft line
/// break) that ends up inside run text. An underscore that would otherwise
/// start such an escape is itself written as `_x005F_`.
///
/// # Examples
///
/// ```
/// use deckfill::common::xml::escape_run_text;
/// assert_eq!(escape_run_text("a\u{b}b & c"), "a_x000B_b &amp; c");
/// assert_eq!(escape_run_text("_x0041_"), "_x005F_x0041_");
/// ```
pub fn escape_run_text(s: &str) -> String {
    let escaped = escape_xml(s);
    let has_marker = memchr::memmem::find(escaped.as_bytes(), b"_x").is_some();
    if !has_marker && !escaped.bytes().any(is_forbidden_control) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for (i, ch) in escaped.char_indices() {
        if ch.is_ascii() && is_forbidden_control(ch as u8) {
            let _ = write!(out, "_x{:04X}_", ch as u32);
        } else if ch == '_' && decode_hex_escape(&escaped[i..]).is_some() {
            out.push_str("_x005F_");
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decode the OOXML `_xHHHH_` escapes in run text.
///
/// The inverse of [`escape_run_text`] for text that has already been
/// XML-unescaped. Sequences that are not a valid escape are kept as written.
///
/// # Examples
///
/// ```
/// use deckfill::common::xml::unescape_run_text;
/// assert_eq!(unescape_run_text("A_x000B_C"), "A\u{b}C");
/// assert_eq!(unescape_run_text("_x005F_x0041_"), "_x0041_");
/// assert_eq!(unescape_run_text("snake_case_x12_"), "snake_case_x12_");
/// ```
pub fn unescape_run_text(s: &str) -> String {
    if memchr::memmem::find(s.as_bytes(), b"_x").is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = memchr::memchr(b'_', rest.as_bytes()) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match decode_hex_escape(rest) {
            Some(ch) => {
                out.push(ch);
                rest = &rest[HEX_ESCAPE_LEN..];
            },
            None => {
                out.push('_');
                rest = &rest[1..];
            },
        }
    }
    out.push_str(rest);
    out
}

const HEX_ESCAPE_LEN: usize = "_x0000_".len();

/// Decode one `_xHHHH_` escape at the start of `s`.
fn decode_hex_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes().get(..HEX_ESCAPE_LEN)?;
    if bytes[0] != b'_' || bytes[1] != b'x' || bytes[6] != b'_' {
        return None;
    }
    let hex = &bytes[2..6];
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let code = u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?;
    char::from_u32(code)
}

#[inline]
fn is_forbidden_control(b: u8) -> bool {
    b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r'
}

/// Unescape XML special characters.
///
/// Handles the five predefined entities plus decimal (`&#65;`) and
/// hexadecimal (`&#x41;`) character references. Unknown or malformed
/// references are left unchanged.
///
/// # Examples
///
/// ```
/// use deckfill::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;"); // &amp; is matched first
/// assert_eq!(unescape_xml("&#x41;&#66;"), "AB");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> String {
    if !s.contains("&#") {
        return XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"]);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = memchr::memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match decode_reference(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            },
            None => {
                out.push('&');
                rest = &rest[1..];
            },
        }
    }
    out.push_str(rest);
    out
}

/// Decode one reference at the start of `s`, returning the character and
/// the number of bytes it occupied.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let end = memchr::memchr(b';', s.as_bytes())?;
    let body = &s[1..end];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                body.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        },
    };
    Some((ch, end + 1))
}
