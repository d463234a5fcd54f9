use std::borrow::Cow;

// Longest entity we look for, including `&` and `;`.
const MAX_ENTITY_LEN: usize = 12;

/// Decode HTML character references (`&quot;`, `&#039;`, `&#x27;`, ...) into
/// plain text. Unknown or malformed references are left as written.
#[must_use]
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_reference(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode the reference at the start of `tail` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let semi = tail[1..].find(';')? + 1;
    if semi + 1 > MAX_ENTITY_LEN {
        return None;
    }
    let name = &tail[1..semi];
    let ch = match name.strip_prefix('#') {
        Some(num) => {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
        None => named_entity(name)?,
    };
    Some((ch, semi + 1))
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "quot" => '"',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "deg" => '\u{b0}',
        "micro" => '\u{b5}',
        "middot" => '\u{b7}',
        "times" => '\u{d7}',
        "divide" => '\u{f7}',
        "pi" => '\u{3c0}',
        "sup2" => '\u{b2}',
        "sup3" => '\u{b3}',
        "frac12" => '\u{bd}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "pound" => '\u{a3}',
        "euro" => '\u{20ac}',
        "yen" => '\u{a5}',
        "cent" => '\u{a2}',
        "sect" => '\u{a7}',
        "szlig" => '\u{df}',
        "aacute" => '\u{e1}',
        "Aacute" => '\u{c1}',
        "agrave" => '\u{e0}',
        "acirc" => '\u{e2}',
        "atilde" => '\u{e3}',
        "auml" => '\u{e4}',
        "Auml" => '\u{c4}',
        "aring" => '\u{e5}',
        "Aring" => '\u{c5}',
        "aelig" => '\u{e6}',
        "ccedil" => '\u{e7}',
        "Ccedil" => '\u{c7}',
        "eacute" => '\u{e9}',
        "Eacute" => '\u{c9}',
        "egrave" => '\u{e8}',
        "ecirc" => '\u{ea}',
        "euml" => '\u{eb}',
        "iacute" => '\u{ed}',
        "igrave" => '\u{ec}',
        "icirc" => '\u{ee}',
        "iuml" => '\u{ef}',
        "ntilde" => '\u{f1}',
        "Ntilde" => '\u{d1}',
        "oacute" => '\u{f3}',
        "Oacute" => '\u{d3}',
        "ograve" => '\u{f2}',
        "ocirc" => '\u{f4}',
        "otilde" => '\u{f5}',
        "ouml" => '\u{f6}',
        "Ouml" => '\u{d6}',
        "oslash" => '\u{f8}',
        "Oslash" => '\u{d8}',
        "uacute" => '\u{fa}',
        "ugrave" => '\u{f9}',
        "ucirc" => '\u{fb}',
        "uuml" => '\u{fc}',
        "Uuml" => '\u{dc}',
        "yacute" => '\u{fd}',
        _ => return None,
    };
    Some(ch)
}
