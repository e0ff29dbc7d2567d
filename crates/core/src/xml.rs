//! XML escaping helpers
//!
//! Each function borrows its input when nothing has to change, so callers can
//! escape every value unconditionally.

use std::borrow::Cow;

/// Escape character data for use between XML tags (`&`, `<`, `>`)
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(input, |c, _| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape a value for use inside a double-quoted XML attribute
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    escape_with(input, |c, _| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '"' => Some("&quot;"),
        _ => None,
    })
}

/// Escape a value for an Android `<string>` resource.
///
/// `&` and `'` are always rewritten: aapt rejects a bare apostrophe and a
/// bare ampersand breaks the XML. A `<` is kept only when it opens markup
/// (`<b>`, `</i>`, `<!--`, `<?`), otherwise it becomes `&lt;`. `%s` format
/// specifiers and styling tags pass through untouched.
pub fn escape_android_string(input: &str) -> Cow<'_, str> {
    escape_with(input, |c, rest| match c {
        '&' => Some("&amp;"),
        '\'' => Some("\\'"),
        '<' if !opens_markup(rest) => Some("&lt;"),
        _ => None,
    })
}

fn opens_markup(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// `replacement` sees each char and the text following it
fn escape_with(
    input: &str,
    replacement: impl Fn(char, &str) -> Option<&'static str>,
) -> Cow<'_, str> {
    let lookup = |(i, c): (usize, char)| replacement(c, &input[i + c.len_utf8()..]);

    let Some((first, _)) = input.char_indices().find(|&ic| lookup(ic).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 8);
    escaped.push_str(&input[..first]);
    for (i, c) in input[first..].char_indices() {
        match lookup((first + i, c)) {
            Some(rep) => escaped.push_str(rep),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
