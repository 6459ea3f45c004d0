//! Chat color codes.
//!
//! Config templates use an alternate prefix (usually `&`) which is turned
//! into the section sign the game client renders.

/// Section sign used by the client for formatting codes.
pub const SECTION_SIGN: char = '\u{00A7}';

/// Characters that form a valid formatting code after the prefix.
const FORMAT_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Red, as used for error replies.
pub const RED: &str = "\u{00A7}c";

/// Replace `prefix` + code pairs with section-sign codes.
///
/// A prefix that is not followed by a valid code is left untouched.
#[must_use]
pub fn translate_color_codes(prefix: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == prefix {
            if let Some(&code) = chars.peek() {
                if FORMAT_CODES.contains(code) {
                    out.push(SECTION_SIGN);
                    out.push(code.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Remove section-sign formatting codes, for plain-text sinks.
#[must_use]
pub fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == SECTION_SIGN && chars.peek().is_some_and(|code| FORMAT_CODES.contains(*code)) {
            chars.next();
            continue;
        }
        out.push(c);
    }

    out
}
