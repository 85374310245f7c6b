//! Canonical form for declared resource locations
//!
//! Declared locations are strings relative to the declaring unit unless
//! marked otherwise:
//!
//! - a location containing a URL scheme (`"file://..."`) passes through
//!   verbatim;
//! - a location starting with `/` is relative to the resource root (the
//!   leading slash is stripped);
//! - anything else resolves against the declaring unit's resource
//!   directory.

use crate::declaration::UnitName;

/// Convert declared locations to canonical, root-relative form.
pub fn canonicalize_locations(unit: &UnitName, locations: &[String]) -> Vec<String> {
    locations
        .iter()
        .map(|location| canonicalize(unit, location))
        .collect()
}

fn canonicalize(unit: &UnitName, location: &str) -> String {
    if location.contains("://") {
        return location.to_string();
    }
    if let Some(rooted) = location.strip_prefix('/') {
        return rooted.to_string();
    }
    let dir = unit.resource_dir();
    if dir.is_empty() {
        location.to_string()
    } else {
        format!("{dir}/{location}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_location_resolves_against_unit_dir() {
        let unit = UnitName::new("suite::http::ClientTests");
        assert_eq!(canonicalize(&unit, "client.properties"), "suite/http/client.properties");
    }

    #[test]
    fn test_rooted_location_strips_slash() {
        let unit = UnitName::new("suite::http::ClientTests");
        assert_eq!(canonicalize(&unit, "/override.properties"), "override.properties");
    }

    #[test]
    fn test_scheme_location_passes_through() {
        let unit = UnitName::new("suite::http::ClientTests");
        assert_eq!(
            canonicalize(&unit, "file:///etc/app.properties"),
            "file:///etc/app.properties"
        );
    }

    #[test]
    fn test_top_level_unit_has_no_prefix() {
        let unit = UnitName::new("Solo");
        assert_eq!(canonicalize(&unit, "solo.properties"), "solo.properties");
    }
}
