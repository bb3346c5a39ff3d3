use once_cell::sync::Lazy;
use regex::Regex;

static CID_PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(cid:[0-9]+\)").unwrap());
static CID_BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"cid:[0-9]+").unwrap());

/// Bullet glyphs normalized to a plain dash.
const BULLETS: &[char] = &[
    '•', '●', '○', '▪', '▫', '►', '▸', '◆', '◇', '■', '□', '★', '☆', '➤', '➢', '→', '»',
];

/// Clean raw extracted text into a stable, line-oriented form.
///
/// One forward pass, linear in the input. Each step only removes or joins
/// characters in ways the steps before it cannot match again, so
/// `sanitize(&sanitize(x)) == sanitize(x)` holds for every input.
pub fn sanitize(text: &str) -> String {
    static EMAIL_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\w+)\s*@\s*(\w+)\s*\.\s*(\w+)").unwrap());
    static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(https?)\s*:\s*/\s*/\s*").unwrap());
    static MANY_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
    static HSPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

    // Invisible characters go first so they cannot split a token the later
    // steps would otherwise join. Private use (including the U+F000..U+F0FF
    // symbol-font range) is not printable.
    let text: String = text
        .chars()
        .filter(|&c| matches!(c, '\n' | '\t' | '\r') || is_printable(c))
        .map(|c| if BULLETS.contains(&c) { '-' } else { c })
        .collect();
    let text = strip_decode_markers(&text);
    let text = regroup_digits(&text);
    let text = EMAIL_RE.replace_all(&text, "${1}@${2}.${3}");
    let text = SCHEME_RE.replace_all(&text, "${1}://");
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = MANY_NEWLINES_RE.replace_all(&text, "\n\n");
    let text = HSPACE_RE.replace_all(&text, " ");

    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Remove `(cid:N)` and bare `cid:N` markers, including markers that only
/// form once an inner one is removed (`ci(cid:1)d:2`).
///
/// A marker is cut as soon as the character after its digits arrives, so the
/// output buffer never ends in a finished marker and nothing is rescanned.
fn strip_decode_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !c.is_ascii_digit() {
            if let Some(start) = trailing_marker(&out) {
                if c == ')' && out[..start].ends_with('(') {
                    out.truncate(start - 1);
                    continue;
                }
                out.truncate(start);
            }
        }
        out.push(c);
    }
    if let Some(start) = trailing_marker(&out) {
        out.truncate(start);
    }
    out
}

/// Byte offset of a `cid:N` marker that ends `s`.
fn trailing_marker(s: &str) -> Option<usize> {
    let head = s.trim_end_matches(|c: char| c.is_ascii_digit());
    if head.len() == s.len() {
        return None;
    }
    head.strip_suffix("cid:").map(str::len)
}

/// Join four whitespace-separated single digits: `1 2 3 4` becomes `1234`.
///
/// Lossy for unrelated numbers. The last digit of a joined group may open the
/// next group, so `1 2 3 4 5 6 7` collapses to `1234567` in one scan.
fn regroup_digits(text: &str) -> String {
    static DIGITS_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\+?\d)\s+(\d)\s+(\d)\s+(\d)").unwrap());

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(caps) = DIGITS_RE.captures_at(text, pos) {
        let (Some(whole), Some(last)) = (caps.get(0), caps.get(4)) else {
            break;
        };
        out.push_str(&text[copied..whole.start()]);
        for group in 1..=3 {
            out.push_str(&caps[group]);
        }
        copied = last.start();
        pos = last.start();
    }
    out.push_str(&text[copied..]);
    out
}

/// Whether a character renders as visible text (or is a plain space).
///
/// Control characters, line/paragraph separators, non-ASCII spaces, format
/// characters and private-use code points are not printable.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
            | '\u{F0000}'..='\u{10FFFF}'
    )
}

/// Count glyph-substitution markers left behind by failed font decoding.
///
/// Parenthesized markers are counted by both patterns, so `(cid:12)` scores 2.
pub fn count_decode_artifacts(text: &str) -> usize {
    CID_PAREN_RE.find_iter(text).count() + CID_BARE_RE.find_iter(text).count()
}

/// Decode UTF-8, silently dropping invalid byte sequences.
pub fn decode_utf8_lossy_drop(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Decode bytes as Latin-1: every byte maps to the code point of equal value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
///
/// `"node.js"` becomes `"Node.Js"`, `"full stack"` becomes `"Full Stack"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Return at most `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
