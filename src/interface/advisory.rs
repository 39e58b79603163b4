//! Advisory checks.
//!
//! These never produce errors. They flag documentation gaps and elements
//! whose names differ only in naming convention (`is_enabled` vs `isEnabled`),
//! which usually means a rename rather than a genuinely missing element.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::types::{InterfaceDefinition, ValidationWarning, WarningKind};
use crate::platform::Platform;

/// Normalize a name for convention-insensitive matching.
pub fn normalize_name(name: &str) -> String {
    static SEPARATORS: OnceLock<Option<Regex>> = OnceLock::new();
    let stripped = match SEPARATORS.get_or_init(|| Regex::new(r"[_\-\s]+").ok()) {
        Some(re) => re.replace_all(name, "").into_owned(),
        None => name.chars().filter(|c| !matches!(c, '_' | '-')).collect(),
    };
    stripped.to_lowercase()
}

/// A named, optionally documented element, viewed uniformly across kinds.
struct Element<'a> {
    kind: &'static str,
    name: &'a str,
    description: Option<&'a str>,
}

fn elements(def: &InterfaceDefinition) -> Vec<Element<'_>> {
    let properties = def.properties.iter().map(|p| Element {
        kind: "Property",
        name: &p.name,
        description: p.description.as_deref(),
    });
    let methods = def.methods.iter().map(|m| Element {
        kind: "Method",
        name: &m.name,
        description: m.description.as_deref(),
    });
    let events = def.events.iter().map(|e| Element {
        kind: "Event",
        name: &e.name,
        description: e.description.as_deref(),
    });
    let states = def.states.iter().map(|s| Element {
        kind: "State",
        name: &s.name,
        description: s.description.as_deref(),
    });
    properties.chain(methods).chain(events).chain(states).collect()
}

fn is_documented(description: Option<&str>) -> bool {
    description.map(|d| !d.trim().is_empty()).unwrap_or(false)
}

/// Run every advisory check of `other` against `reference`.
pub fn check_advisories(
    reference: &InterfaceDefinition,
    other: &InterfaceDefinition,
) -> Vec<ValidationWarning> {
    let mut warnings = check_descriptions(reference, other);
    warnings.extend(check_naming(reference, other));
    warnings
}

/// Elements documented on the reference but not on the other platform.
pub fn check_descriptions(
    reference: &InterfaceDefinition,
    other: &InterfaceDefinition,
) -> Vec<ValidationWarning> {
    let platforms = vec![reference.platform, other.platform];
    let theirs = elements(other);

    elements(reference)
        .into_iter()
        .filter(|ours| is_documented(ours.description))
        .filter_map(|ours| {
            let counterpart = theirs
                .iter()
                .find(|t| t.kind == ours.kind && t.name == ours.name)?;
            if is_documented(counterpart.description) {
                return None;
            }
            Some(
                ValidationWarning::new(
                    WarningKind::DescriptionMissing,
                    format!(
                        "{} \"{}\" is documented in {} but not in {}",
                        ours.kind, ours.name, reference.platform, other.platform
                    ),
                    platforms.clone(),
                    ours.name,
                )
                .with_suggestion(format!(
                    "Add a description to \"{}\" in the {} implementation",
                    ours.name, other.platform
                )),
            )
        })
        .collect()
}

/// Elements present on one side only whose normalized names match.
pub fn check_naming(
    reference: &InterfaceDefinition,
    other: &InterfaceDefinition,
) -> Vec<ValidationWarning> {
    let ours = elements(reference);
    let theirs = elements(other);
    let our_names: HashSet<(&str, &str)> = ours.iter().map(|e| (e.kind, e.name)).collect();
    let their_names: HashSet<(&str, &str)> = theirs.iter().map(|e| (e.kind, e.name)).collect();

    let mut warnings = Vec::new();
    for element in ours
        .iter()
        .filter(|e| !their_names.contains(&(e.kind, e.name)))
    {
        let normalized = normalize_name(element.name);
        let candidate = theirs.iter().find(|t| {
            t.kind == element.kind
                && !our_names.contains(&(t.kind, t.name))
                && normalize_name(t.name) == normalized
        });
        if let Some(candidate) = candidate {
            warnings.push(naming_warning(
                element.kind,
                element.name,
                candidate.name,
                reference.platform,
                other.platform,
            ));
        }
    }
    warnings
}

fn naming_warning(
    kind: &str,
    reference_name: &str,
    other_name: &str,
    ref_p: Platform,
    other_p: Platform,
) -> ValidationWarning {
    ValidationWarning::new(
        WarningKind::NamingConventionDifference,
        format!(
            "{} \"{}\" in {} appears as \"{}\" in {}",
            kind, reference_name, ref_p, other_name, other_p
        ),
        vec![ref_p, other_p],
        reference_name,
    )
    .with_suggestion(format!(
        "Rename \"{}\" to \"{}\" in the {} implementation",
        other_name, reference_name, other_p
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::types::{MethodSignature, PropertyDefinition};

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("is_enabled"), "isenabled");
        assert_eq!(normalize_name("isEnabled"), "isenabled");
        assert_eq!(normalize_name("is-enabled"), "isenabled");
    }

    #[test]
    fn test_description_missing() {
        let reference = InterfaceDefinition::new("Button", Platform::Ios).with_property(
            PropertyDefinition::new("title", "String", true).with_description("Button label"),
        );
        let other = InterfaceDefinition::new("Button", Platform::Web)
            .with_property(PropertyDefinition::new("title", "String", true));

        let warnings = check_advisories(&reference, &other);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].warning_type, WarningKind::DescriptionMissing);
        assert_eq!(warnings[0].location, "title");
        assert!(warnings[0].suggestion.is_some());

        // Documented on both sides: nothing to report
        let documented = InterfaceDefinition::new("Button", Platform::Web).with_property(
            PropertyDefinition::new("title", "String", true).with_description("Label"),
        );
        assert!(check_descriptions(&reference, &documented).is_empty());
    }

    #[test]
    fn test_naming_convention_difference() {
        let reference = InterfaceDefinition::new("Button", Platform::Ios)
            .with_property(PropertyDefinition::new("isEnabled", "Bool", true))
            .with_method(MethodSignature::new("onClick", "void"));
        let other = InterfaceDefinition::new("Button", Platform::Android)
            .with_property(PropertyDefinition::new("is_enabled", "Bool", true))
            .with_method(MethodSignature::new("onClick", "void"));

        let warnings = check_naming(&reference, &other);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].warning_type,
            WarningKind::NamingConventionDifference
        );
        assert_eq!(warnings[0].location, "isEnabled");
        assert!(warnings[0].message.contains("is_enabled"));
    }

    #[test]
    fn test_kinds_do_not_cross_match() {
        let reference = InterfaceDefinition::new("Button", Platform::Ios)
            .with_property(PropertyDefinition::new("focus", "Bool", true));
        let other = InterfaceDefinition::new("Button", Platform::Android)
            .with_method(MethodSignature::new("focus", "void"));

        assert!(check_naming(&reference, &other).is_empty());
    }
}
