//! VTIMEZONE (RFC 5545 §3.6.5).
//!
//! Timezones are stored for round-trip only; no offset arithmetic is done.

use super::component::{Daylight, Standard, impl_component_like};
use super::{Component, ComponentBase, ComponentKind, ComponentLike, Property, names};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VTimezone {
    base: ComponentBase,
}

impl_component_like!(VTimezone, ComponentKind::Timezone);

impl VTimezone {
    /// Creates a timezone with its TZID set.
    #[must_use]
    pub fn new(tzid: impl Into<String>) -> Self {
        let mut tz = Self::default();
        tz.set_property(Property::new(names::TZID, tzid));
        tz
    }

    /// Returns the TZID.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.get_property_string(names::TZID)
    }

    /// STANDARD observances in order.
    #[must_use]
    pub fn standard(&self) -> Vec<&Standard> {
        self.components()
            .iter()
            .filter_map(|c| match c {
                Component::Standard(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// DAYLIGHT observances in order.
    #[must_use]
    pub fn daylight(&self) -> Vec<&Daylight> {
        self.components()
            .iter()
            .filter_map(|c| match c {
                Component::Daylight(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Appends a STANDARD observance and returns it for configuration.
    pub fn add_standard(&mut self) -> Option<&mut Standard> {
        self.add_component(Component::Standard(Standard::new()));
        match self.base_mut().components.last_mut() {
            Some(Component::Standard(s)) => Some(s),
            _ => None,
        }
    }

    /// Appends a DAYLIGHT observance and returns it for configuration.
    pub fn add_daylight(&mut self) -> Option<&mut Daylight> {
        self.add_component(Component::Daylight(Daylight::new()));
        match self.base_mut().components.last_mut() {
            Some(Component::Daylight(d)) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tzid_and_observances() {
        let mut tz = VTimezone::new("Europe/Paris");
        tz.add_standard()
            .unwrap()
            .add_property(Property::new("TZOFFSETTO", "+0100"));
        tz.add_daylight()
            .unwrap()
            .add_property(Property::new("TZOFFSETTO", "+0200"));
        tz.add_standard();

        assert_eq!(tz.value().as_deref(), Some("Europe/Paris"));
        assert_eq!(tz.standard().len(), 2);
        assert_eq!(tz.daylight().len(), 1);
        assert_eq!(
            tz.daylight()[0].get_property_string("TZOFFSETTO").as_deref(),
            Some("+0200")
        );
        let kinds: Vec<_> = tz.components().iter().map(Component::kind).collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Standard, ComponentKind::Daylight, ComponentKind::Standard]
        );
    }
}
