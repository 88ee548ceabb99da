//! Component tree serialization.
//!
//! Output is one `NAME[;PARAM]*:VALUE` line per property, CRLF-terminated,
//! with properties and children in stored order. Lines are not folded.

use std::io;

use crate::rfc::ical::core::{ComponentLike, Property};

const CRLF: &str = "\r\n";

/// Serializes a calendar or component, including its children.
#[must_use]
pub fn serialize<C: ComponentLike + ?Sized>(component: &C) -> String {
    let mut out = String::new();
    serialize_component(component, &mut out);
    out
}

/// Writes the serialized form of `component` to `writer`.
///
/// ## Errors
/// Propagates write failures.
pub fn serialize_to<C, W>(component: &C, writer: &mut W) -> io::Result<()>
where
    C: ComponentLike + ?Sized,
    W: io::Write,
{
    writer.write_all(serialize(component).as_bytes())?;
    writer.flush()
}

/// Appends `BEGIN`, properties, children and `END` for one component.
pub fn serialize_component<C: ComponentLike + ?Sized>(component: &C, out: &mut String) {
    let token = component.token();
    out.push_str("BEGIN:");
    out.push_str(token);
    out.push_str(CRLF);

    for property in component.properties() {
        out.push_str(&serialize_property(property));
        out.push_str(CRLF);
    }

    for child in component.components() {
        serialize_component(child, out);
    }

    out.push_str("END:");
    out.push_str(token);
    out.push_str(CRLF);
}

/// Renders one property as a content line, without the terminator.
#[must_use]
pub fn serialize_property(property: &Property) -> String {
    let mut line = property.name.clone();
    for param in &property.params {
        line.push(';');
        line.push_str(&param.to_string());
    }
    line.push(':');
    line.push_str(&property.raw_value());
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Calendar, Parameter, VEvent};
    use crate::rfc::ical::parse::parse_content_line;

    #[test]
    fn property_with_params() {
        let prop = Property::with_params(
            "ATTENDEE",
            vec![Parameter::cn("Doe, Jane"), Parameter::partstat("ACCEPTED")],
            "mailto:jane@example.com",
        );
        assert_eq!(
            serialize_property(&prop),
            "ATTENDEE;CN=\"Doe, Jane\";PARTSTAT=ACCEPTED:mailto:jane@example.com"
        );
    }

    #[test]
    fn param_value_list_with_backslash_survives_parse() {
        let prop = Property::with_params(
            "X-A",
            vec![Parameter::with_values("X-P", vec!["a\\".into(), "b".into()])],
            "v",
        );
        let line = serialize_property(&prop);
        assert_eq!(line, "X-A;X-P=\"a\\\",b:v");

        let parsed = parse_content_line(&line, 1).unwrap();
        assert_eq!(parsed.params[0].values, vec!["a\\", "b"]);
    }

    #[test]
    fn text_values_escaped_others_verbatim() {
        let summary = Property::new("SUMMARY", "a,b;c");
        assert_eq!(serialize_property(&summary), "SUMMARY:a\\,b\\;c");

        let rule = Property::new("RRULE", "FREQ=WEEKLY;BYDAY=MO,WE");
        assert_eq!(serialize_property(&rule), "RRULE:FREQ=WEEKLY;BYDAY=MO,WE");
    }

    #[test]
    fn nested_components_in_order() {
        let mut event = VEvent::new("1");
        event.add_alarm().unwrap().add_property(Property::new("ACTION", "DISPLAY"));

        let mut calendar = Calendar::new_for("-//Test//EN");
        calendar.add_vevent(event);

        assert_eq!(
            serialize(&calendar),
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//Test//EN\r\n\
             BEGIN:VEVENT\r\n\
             UID:1\r\n\
             BEGIN:VALARM\r\n\
             ACTION:DISPLAY\r\n\
             END:VALARM\r\n\
             END:VEVENT\r\n\
             END:VCALENDAR\r\n"
        );
    }

    #[test]
    fn long_lines_are_not_folded() {
        let prop = Property::new("DESCRIPTION", "A".repeat(200));
        let line = serialize_property(&prop);
        assert_eq!(line.len(), "DESCRIPTION:".len() + 200);
        assert!(!line.contains("\r\n"));
    }

    #[test]
    fn serialize_to_writer_matches_string() {
        let calendar = Calendar::new();
        let mut buf = Vec::new();
        serialize_to(&calendar, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serialize(&calendar));
    }
}
