//! Escaping for TEXT values and parameter values.

/// Escapes a TEXT value (RFC 5545 §3.3.11).
///
/// Backslash, comma and semicolon gain a leading backslash and newlines are
/// written as `\n`. Other characters, including a bare CR, pass through.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a parameter value.
///
/// Values containing `:`, `;`, `,`, a backslash, a double quote, a newline
/// or a caret are quoted, and the characters that cannot appear inside
/// quotes are caret-encoded (RFC 6868).
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !s.contains([':', ';', ',', '\\', '"', '\n', '^']) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '^' => out.push_str("^^"),
            '\n' => out.push_str("^n"),
            '"' => out.push_str("^'"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::parse::unescape_text;

    #[test]
    fn text_specials() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("keep\rcr"), "keep\rcr");
    }

    #[test]
    fn text_escaping_is_reversible() {
        for s in [
            "",
            "Team sync",
            "Agenda: 1, 2; 3",
            "C:\\path\\to\\file",
            "line one\nline two",
            "trailing backslash \\",
            "\\n is not a newline",
        ] {
            assert_eq!(unescape_text(&escape_text(s)), s, "{s:?}");
        }
    }

    #[test]
    fn text_escaping_is_reversible_for_every_short_string() {
        const ALPHABET: [char; 6] = ['\\', '\n', ';', ',', 'n', 'a'];

        let mut layer = vec![String::new()];
        let mut checked = 0;
        for _ in 0..=5 {
            for s in &layer {
                assert_eq!(unescape_text(&escape_text(s)), *s, "{s:?}");
                checked += 1;
            }
            layer = layer
                .iter()
                .flat_map(|s| ALPHABET.iter().map(move |c| format!("{s}{c}")))
                .collect();
        }
        assert_eq!(checked, 9331);
    }

    #[test]
    fn param_plain_values_untouched() {
        assert_eq!(escape_param_value("Europe/Paris"), "Europe/Paris");
        assert_eq!(escape_param_value("ACCEPTED"), "ACCEPTED");
    }

    #[test]
    fn param_values_quoted_and_caret_encoded() {
        assert_eq!(escape_param_value("mailto:a@x"), "\"mailto:a@x\"");
        assert_eq!(escape_param_value("Doe; Jane"), "\"Doe; Jane\"");
        assert_eq!(escape_param_value("Say \"hi\""), "\"Say ^'hi^'\"");
        assert_eq!(escape_param_value("a^b\nc"), "\"a^^b^nc\"");
        assert_eq!(escape_param_value("a\\"), "\"a\\\"");
        assert_eq!(escape_param_value("C:\\dir"), "\"C:\\dir\"");
    }
}
