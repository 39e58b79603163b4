//! Element comparators.
//!
//! Each comparator diffs the elements of one kind (properties, methods,
//! events, states) of a reference platform against another platform. The
//! forward pass walks the reference in order and reports absent or divergent
//! elements; the reverse pass reports elements the other platform has that the
//! reference lacks. Comparators are pure and never fail on data mismatches.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::types::{
    EventDefinition, MethodSignature, MismatchKind, ParameterDefinition, PropertyDefinition,
    StateDefinition, ValidationError, WarningKind,
};
use super::value::render_optional;
use crate::platform::Platform;

/// Marker used as the absent side of a missing-element error.
pub const NOT_FOUND: &str = "not found";

/// Errors from one comparison, split by pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Missing or divergent elements, relative to the reference.
    pub divergent: Vec<ValidationError>,
    /// Elements present on the other platform but absent from the reference.
    pub missing_from_reference: Vec<ValidationError>,
}

impl Comparison {
    /// Merge another comparison into this one.
    pub fn extend(&mut self, other: Comparison) {
        self.divergent.extend(other.divergent);
        self.missing_from_reference
            .extend(other.missing_from_reference);
    }

    /// Total number of errors.
    pub fn len(&self) -> usize {
        self.divergent.len() + self.missing_from_reference.len()
    }

    /// Whether no error was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All errors, forward pass first.
    pub fn into_errors(self) -> Vec<ValidationError> {
        let mut errors = self.divergent;
        errors.extend(self.missing_from_reference);
        errors
    }
}

/// Render a property declaration: `subtitle?: String = "x"`.
pub fn property_signature(property: &PropertyDefinition) -> String {
    declaration(
        &property.name,
        &property.type_name,
        property.required,
        property.default_value.as_ref().map(|v| v.to_string()),
    )
}

/// Render a parameter declaration.
pub fn parameter_signature(parameter: &ParameterDefinition) -> String {
    declaration(
        &parameter.name,
        &parameter.type_name,
        parameter.required,
        parameter.default_value.as_ref().map(|v| v.to_string()),
    )
}

/// Render a method declaration: `setValue(value?: string = "default"): void`.
pub fn method_signature(method: &MethodSignature) -> String {
    let params: Vec<String> = method.parameters.iter().map(parameter_signature).collect();
    format!("{}({}): {}", method.name, params.join(", "), method.return_type)
}

/// Render an event declaration: `onPress(PressEvent)`.
pub fn event_signature(event: &EventDefinition) -> String {
    match &event.payload_type {
        Some(payload) => format!("{}({})", event.name, payload),
        None => format!("{}()", event.name),
    }
}

/// Render a state declaration: `pressed: Bool = false`.
pub fn state_signature(state: &StateDefinition) -> String {
    match &state.initial_value {
        Some(value) => format!("{}: {} = {}", state.name, state.type_name, value),
        None => format!("{}: {}", state.name, state.type_name),
    }
}

fn declaration(name: &str, type_name: &str, required: bool, default: Option<String>) -> String {
    let marker = if required { "" } else { "?" };
    match default {
        Some(value) => format!("{}{}: {} = {}", name, marker, type_name, value),
        None => format!("{}{}: {}", name, marker, type_name),
    }
}

/// Compare properties of `reference` against `other`.
pub fn compare_properties(
    reference: &[PropertyDefinition],
    other: &[PropertyDefinition],
    reference_platform: Platform,
    other_platform: Platform,
) -> Vec<ValidationError> {
    diff_properties(reference, other, reference_platform, other_platform).into_errors()
}

/// Compare methods of `reference` against `other`.
pub fn compare_methods(
    reference: &[MethodSignature],
    other: &[MethodSignature],
    reference_platform: Platform,
    other_platform: Platform,
) -> Vec<ValidationError> {
    diff_methods(reference, other, reference_platform, other_platform).into_errors()
}

/// Compare events of `reference` against `other`.
pub fn compare_events(
    reference: &[EventDefinition],
    other: &[EventDefinition],
    reference_platform: Platform,
    other_platform: Platform,
) -> Vec<ValidationError> {
    diff_events(reference, other, reference_platform, other_platform).into_errors()
}

/// Compare states of `reference` against `other`.
pub fn compare_states(
    reference: &[StateDefinition],
    other: &[StateDefinition],
    reference_platform: Platform,
    other_platform: Platform,
) -> Vec<ValidationError> {
    diff_states(reference, other, reference_platform, other_platform).into_errors()
}

pub(crate) fn diff_properties(
    reference: &[PropertyDefinition],
    other: &[PropertyDefinition],
    ref_p: Platform,
    other_p: Platform,
) -> Comparison {
    let mut out = Comparison::default();
    let platforms = vec![ref_p, other_p];
    let other_by_name: HashMap<&str, &PropertyDefinition> =
        other.iter().map(|p| (p.name.as_str(), p)).collect();

    for prop in reference {
        let Some(theirs) = other_by_name.get(prop.name.as_str()) else {
            let mut err = ValidationError::new(
                MismatchKind::PropertyMismatch,
                format!(
                    "Property \"{}\" exists in {} but not in {}",
                    prop.name, ref_p, other_p
                ),
                property_signature(prop),
                NOT_FOUND,
                platforms.clone(),
                &prop.name,
            );
            if !prop.required {
                err = err.with_advisory(WarningKind::OptionalPropertyDifference);
            }
            out.divergent.push(err);
            continue;
        };

        if prop.type_name != theirs.type_name {
            out.divergent.push(ValidationError::new(
                MismatchKind::TypeMismatch,
                format!(
                    "Property \"{}\" has different types: {}={}, {}={}",
                    prop.name, ref_p, prop.type_name, other_p, theirs.type_name
                ),
                &prop.type_name,
                &theirs.type_name,
                platforms.clone(),
                &prop.name,
            ));
        }

        if prop.required != theirs.required {
            out.divergent.push(ValidationError::new(
                MismatchKind::PropertyMismatch,
                format!(
                    "Property \"{}\" required mismatch: {}={}, {}={}",
                    prop.name, ref_p, prop.required, other_p, theirs.required
                ),
                prop.required.to_string(),
                theirs.required.to_string(),
                platforms.clone(),
                &prop.name,
            ));
        }

        match (&prop.default_value, &theirs.default_value) {
            (Some(a), Some(b)) if a != b => {
                out.divergent.push(
                    ValidationError::new(
                        MismatchKind::PropertyMismatch,
                        format!(
                            "Property \"{}\" has different default values: {}={}, {}={}",
                            prop.name, ref_p, a, other_p, b
                        ),
                        a.to_string(),
                        b.to_string(),
                        platforms.clone(),
                        &prop.name,
                    )
                    .with_advisory(WarningKind::DefaultValueDifference),
                );
            }
            (a, b) if a.is_some() != b.is_some() => {
                let expected = render_optional(a.as_ref());
                let actual = render_optional(b.as_ref());
                out.divergent.push(
                    ValidationError::new(
                        MismatchKind::PropertyMismatch,
                        format!(
                            "Property \"{}\" default value mismatch: {}={}, {}={}",
                            prop.name, ref_p, expected, other_p, actual
                        ),
                        expected,
                        actual,
                        platforms.clone(),
                        &prop.name,
                    )
                    .with_advisory(WarningKind::DefaultValueDifference),
                );
            }
            _ => {}
        }
    }

    let reference_names: HashSet<&str> = reference.iter().map(|p| p.name.as_str()).collect();
    for prop in other {
        if reference_names.contains(prop.name.as_str()) {
            continue;
        }
        let mut err = ValidationError::new(
            MismatchKind::PropertyMismatch,
            format!(
                "Property \"{}\" exists in {} but not in {}",
                prop.name, other_p, ref_p
            ),
            NOT_FOUND,
            property_signature(prop),
            platforms.clone(),
            &prop.name,
        );
        if !prop.required {
            err = err.with_advisory(WarningKind::OptionalPropertyDifference);
        }
        out.missing_from_reference.push(err);
    }

    out
}

pub(crate) fn diff_methods(
    reference: &[MethodSignature],
    other: &[MethodSignature],
    ref_p: Platform,
    other_p: Platform,
) -> Comparison {
    let mut out = Comparison::default();
    let platforms = vec![ref_p, other_p];
    let other_by_name: HashMap<&str, &MethodSignature> =
        other.iter().map(|m| (m.name.as_str(), m)).collect();

    for method in reference {
        let Some(theirs) = other_by_name.get(method.name.as_str()) else {
            out.divergent.push(ValidationError::new(
                MismatchKind::MethodMismatch,
                format!(
                    "Method \"{}\" exists in {} but not in {}",
                    method.name, ref_p, other_p
                ),
                method_signature(method),
                NOT_FOUND,
                platforms.clone(),
                &method.name,
            ));
            continue;
        };

        if method.return_type != theirs.return_type {
            out.divergent.push(ValidationError::new(
                MismatchKind::ReturnTypeMismatch,
                format!(
                    "Method \"{}\" has different return types: {}={}, {}={}",
                    method.name, ref_p, method.return_type, other_p, theirs.return_type
                ),
                &method.return_type,
                &theirs.return_type,
                platforms.clone(),
                &method.name,
            ));
        }

        if method.parameters.len() != theirs.parameters.len() {
            out.divergent.push(ValidationError::new(
                MismatchKind::MethodMismatch,
                format!(
                    "Method \"{}\" has different parameter counts: {}={}, {}={}",
                    method.name,
                    ref_p,
                    method.parameters.len(),
                    other_p,
                    theirs.parameters.len()
                ),
                format!("{} parameters", method.parameters.len()),
                format!("{} parameters", theirs.parameters.len()),
                platforms.clone(),
                &method.name,
            ));
            continue;
        }

        for (index, (ours, other_param)) in method
            .parameters
            .iter()
            .zip(theirs.parameters.iter())
            .enumerate()
        {
            out.divergent.extend(diff_parameter(
                &method.name,
                index,
                ours,
                other_param,
                &platforms,
            ));
        }
    }

    let reference_names: HashSet<&str> = reference.iter().map(|m| m.name.as_str()).collect();
    for method in other {
        if reference_names.contains(method.name.as_str()) {
            continue;
        }
        out.missing_from_reference.push(ValidationError::new(
            MismatchKind::MethodMismatch,
            format!(
                "Method \"{}\" exists in {} but not in {}",
                method.name, other_p, ref_p
            ),
            NOT_FOUND,
            method_signature(method),
            platforms.clone(),
            &method.name,
        ));
    }

    out
}

fn diff_parameter(
    method: &str,
    index: usize,
    ours: &ParameterDefinition,
    theirs: &ParameterDefinition,
    platforms: &[Platform],
) -> Vec<ValidationError> {
    let (ref_p, other_p) = (platforms[0], platforms[1]);
    let mut errors = Vec::new();
    let position = index + 1;

    if ours.name != theirs.name {
        errors.push(ValidationError::new(
            MismatchKind::ParameterMismatch,
            format!(
                "Method \"{}\" parameter {} has different names: {}={}, {}={}",
                method, position, ref_p, ours.name, other_p, theirs.name
            ),
            &ours.name,
            &theirs.name,
            platforms.to_vec(),
            method,
        ));
    }

    if ours.type_name != theirs.type_name {
        errors.push(ValidationError::new(
            MismatchKind::ParameterMismatch,
            format!(
                "Method \"{}\" parameter \"{}\" has different types: {}={}, {}={}",
                method, ours.name, ref_p, ours.type_name, other_p, theirs.type_name
            ),
            &ours.type_name,
            &theirs.type_name,
            platforms.to_vec(),
            method,
        ));
    }

    if ours.required != theirs.required {
        errors.push(ValidationError::new(
            MismatchKind::ParameterMismatch,
            format!(
                "Method \"{}\" parameter \"{}\" required mismatch: {}={}, {}={}",
                method, ours.name, ref_p, ours.required, other_p, theirs.required
            ),
            ours.required.to_string(),
            theirs.required.to_string(),
            platforms.to_vec(),
            method,
        ));
    }

    if ours.default_value != theirs.default_value {
        let expected = render_optional(ours.default_value.as_ref());
        let actual = render_optional(theirs.default_value.as_ref());
        errors.push(
            ValidationError::new(
                MismatchKind::ParameterMismatch,
                format!(
                    "Method \"{}\" parameter \"{}\" has different default values: {}={}, {}={}",
                    method, ours.name, ref_p, expected, other_p, actual
                ),
                expected,
                actual,
                platforms.to_vec(),
                method,
            )
            .with_advisory(WarningKind::DefaultValueDifference),
        );
    }

    errors
}

pub(crate) fn diff_events(
    reference: &[EventDefinition],
    other: &[EventDefinition],
    ref_p: Platform,
    other_p: Platform,
) -> Comparison {
    let mut out = Comparison::default();
    let platforms = vec![ref_p, other_p];
    let other_by_name: HashMap<&str, &EventDefinition> =
        other.iter().map(|e| (e.name.as_str(), e)).collect();

    for event in reference {
        let Some(theirs) = other_by_name.get(event.name.as_str()) else {
            out.divergent.push(ValidationError::new(
                MismatchKind::EventMismatch,
                format!(
                    "Event \"{}\" exists in {} but not in {}",
                    event.name, ref_p, other_p
                ),
                event_signature(event),
                NOT_FOUND,
                platforms.clone(),
                &event.name,
            ));
            continue;
        };

        if event.payload_type != theirs.payload_type {
            let expected = event.payload_type.as_deref().unwrap_or("none");
            let actual = theirs.payload_type.as_deref().unwrap_or("none");
            out.divergent.push(ValidationError::new(
                MismatchKind::EventMismatch,
                format!(
                    "Event \"{}\" has different payload types: {}={}, {}={}",
                    event.name, ref_p, expected, other_p, actual
                ),
                expected,
                actual,
                platforms.clone(),
                &event.name,
            ));
        }
    }

    let reference_names: HashSet<&str> = reference.iter().map(|e| e.name.as_str()).collect();
    for event in other {
        if reference_names.contains(event.name.as_str()) {
            continue;
        }
        out.missing_from_reference.push(ValidationError::new(
            MismatchKind::EventMismatch,
            format!(
                "Event \"{}\" exists in {} but not in {}",
                event.name, other_p, ref_p
            ),
            NOT_FOUND,
            event_signature(event),
            platforms.clone(),
            &event.name,
        ));
    }

    out
}

pub(crate) fn diff_states(
    reference: &[StateDefinition],
    other: &[StateDefinition],
    ref_p: Platform,
    other_p: Platform,
) -> Comparison {
    let mut out = Comparison::default();
    let platforms = vec![ref_p, other_p];
    let other_by_name: HashMap<&str, &StateDefinition> =
        other.iter().map(|s| (s.name.as_str(), s)).collect();

    for state in reference {
        let Some(theirs) = other_by_name.get(state.name.as_str()) else {
            out.divergent.push(ValidationError::new(
                MismatchKind::StateMismatch,
                format!(
                    "State \"{}\" exists in {} but not in {}",
                    state.name, ref_p, other_p
                ),
                state_signature(state),
                NOT_FOUND,
                platforms.clone(),
                &state.name,
            ));
            continue;
        };

        if state.type_name != theirs.type_name {
            out.divergent.push(ValidationError::new(
                MismatchKind::StateMismatch,
                format!(
                    "State \"{}\" has different types: {}={}, {}={}",
                    state.name, ref_p, state.type_name, other_p, theirs.type_name
                ),
                &state.type_name,
                &theirs.type_name,
                platforms.clone(),
                &state.name,
            ));
        }

        if state.initial_value != theirs.initial_value {
            let expected = render_optional(state.initial_value.as_ref());
            let actual = render_optional(theirs.initial_value.as_ref());
            out.divergent.push(ValidationError::new(
                MismatchKind::StateMismatch,
                format!(
                    "State \"{}\" has different initial values: {}={}, {}={}",
                    state.name, ref_p, expected, other_p, actual
                ),
                expected,
                actual,
                platforms.clone(),
                &state.name,
            ));
        }
    }

    let reference_names: HashSet<&str> = reference.iter().map(|s| s.name.as_str()).collect();
    for state in other {
        if reference_names.contains(state.name.as_str()) {
            continue;
        }
        out.missing_from_reference.push(ValidationError::new(
            MismatchKind::StateMismatch,
            format!(
                "State \"{}\" exists in {} but not in {}",
                state.name, other_p, ref_p
            ),
            NOT_FOUND,
            state_signature(state),
            platforms.clone(),
            &state.name,
        ));
    }

    out
}

/// Method names shared between, or unique to, two method lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNameComparison {
    pub matching: Vec<String>,
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
}

/// Split method names into matching and one-sided sets, preserving input order.
pub fn compare_method_names(
    first: &[MethodSignature],
    second: &[MethodSignature],
) -> MethodNameComparison {
    let first_names: HashSet<&str> = first.iter().map(|m| m.name.as_str()).collect();
    let second_names: HashSet<&str> = second.iter().map(|m| m.name.as_str()).collect();

    let mut result = MethodNameComparison::default();
    for method in first {
        if second_names.contains(method.name.as_str()) {
            result.matching.push(method.name.clone());
        } else {
            result.only_in_first.push(method.name.clone());
        }
    }
    result.only_in_second = second
        .iter()
        .filter(|m| !first_names.contains(m.name.as_str()))
        .map(|m| m.name.clone())
        .collect();
    result
}

/// Shape statistics over a method list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodStatistics {
    pub total_methods: usize,
    pub average_parameter_count: f64,
    pub return_type_distribution: BTreeMap<String, usize>,
    pub parameter_type_distribution: BTreeMap<String, usize>,
}

/// Compute statistics over `methods`.
pub fn method_statistics(methods: &[MethodSignature]) -> MethodStatistics {
    let mut stats = MethodStatistics {
        total_methods: methods.len(),
        ..Default::default()
    };
    if methods.is_empty() {
        return stats;
    }

    let mut parameter_total = 0usize;
    for method in methods {
        *stats
            .return_type_distribution
            .entry(method.return_type.clone())
            .or_insert(0) += 1;
        for param in &method.parameters {
            parameter_total += 1;
            *stats
                .parameter_type_distribution
                .entry(param.type_name.clone())
                .or_insert(0) += 1;
        }
    }
    stats.average_parameter_count = parameter_total as f64 / methods.len() as f64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::value::DefaultValue;
    use pretty_assertions::assert_eq;

    const IOS: Platform = Platform::Ios;
    const ANDROID: Platform = Platform::Android;

    fn on_click(return_type: &str) -> MethodSignature {
        MethodSignature::new("onClick", return_type)
    }

    #[test]
    fn test_signature_rendering() {
        assert_eq!(
            property_signature(&PropertyDefinition::new("title", "String", true)),
            "title: String"
        );
        assert_eq!(
            property_signature(&PropertyDefinition::new("subtitle", "String", false)),
            "subtitle?: String"
        );
        assert_eq!(
            property_signature(
                &PropertyDefinition::new("isEnabled", "Bool", false).with_default(true)
            ),
            "isEnabled?: Bool = true"
        );
        assert_eq!(method_signature(&on_click("void")), "onClick(): void");

        let set_value = MethodSignature::new("setValue", "void").with_parameter(
            ParameterDefinition::new("value", "string", false).with_default("default"),
        );
        assert_eq!(
            method_signature(&set_value),
            "setValue(value?: string = \"default\"): void"
        );

        let update_user = MethodSignature::new("updateUser", "Promise<User>")
            .with_parameter(ParameterDefinition::new("id", "string", true))
            .with_parameter(ParameterDefinition::new("name", "string", true))
            .with_parameter(
                ParameterDefinition::new("email", "string", false).with_default(DefaultValue::Null),
            );
        assert_eq!(
            method_signature(&update_user),
            "updateUser(id: string, name: string, email?: string = null): Promise<User>"
        );
    }

    #[test]
    fn test_identical_properties_produce_nothing() {
        let props = vec![
            PropertyDefinition::new("title", "String", true),
            PropertyDefinition::new("count", "Int", false).with_default(10i64),
        ];
        assert!(compare_properties(&props, &props, IOS, ANDROID).is_empty());
    }

    #[test]
    fn test_missing_property() {
        let reference = vec![
            PropertyDefinition::new("title", "String", true),
            PropertyDefinition::new("disabled", "Bool", false),
        ];
        let other = vec![PropertyDefinition::new("title", "String", true)];

        let errors = compare_properties(&reference, &other, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        let err = &errors[0];
        assert_eq!(err.error_type, MismatchKind::PropertyMismatch);
        assert!(err.message.contains("exists in ios but not in android"));
        assert_eq!(err.expected, "disabled?: Bool");
        assert_eq!(err.actual, NOT_FOUND);
        assert_eq!(err.platforms, vec![IOS, ANDROID]);
        assert_eq!(err.location, "disabled");
        assert_eq!(err.advisory, Some(WarningKind::OptionalPropertyDifference));
    }

    #[test]
    fn test_extra_property_reverse_pass() {
        let reference = vec![PropertyDefinition::new("title", "String", true)];
        let other = vec![
            PropertyDefinition::new("title", "String", true),
            PropertyDefinition::new("elevation", "Float", true),
        ];

        let cmp = diff_properties(&reference, &other, IOS, ANDROID);
        assert!(cmp.divergent.is_empty());
        assert_eq!(cmp.missing_from_reference.len(), 1);
        let err = &cmp.missing_from_reference[0];
        assert!(err.message.contains("exists in android but not in ios"));
        assert_eq!(err.expected, NOT_FOUND);
        assert_eq!(err.actual, "elevation: Float");
        assert_eq!(err.advisory, None);
    }

    #[test]
    fn test_property_type_direction() {
        let reference = vec![PropertyDefinition::new("count", "Int", true)];
        let other = vec![PropertyDefinition::new("count", "String", true)];

        let errors = compare_properties(&reference, &other, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, MismatchKind::TypeMismatch);
        assert!(errors[0].message.contains("different types"));
        assert_eq!(errors[0].expected, "Int");
        assert_eq!(errors[0].actual, "String");

        let swapped = compare_properties(&other, &reference, ANDROID, IOS);
        assert_eq!(swapped[0].expected, "String");
        assert_eq!(swapped[0].actual, "Int");
    }

    #[test]
    fn test_property_required_mismatch() {
        let reference = vec![PropertyDefinition::new("title", "String", true)];
        let other = vec![PropertyDefinition::new("title", "String", false)];

        let errors = compare_properties(&reference, &other, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("required mismatch"));
        assert!(errors[0].message.contains("ios=true"));
        assert!(errors[0].message.contains("android=false"));
    }

    #[test]
    fn test_property_default_values() {
        let reference = vec![PropertyDefinition::new("size", "Int", false).with_default(10i64)];
        let absent = vec![PropertyDefinition::new("size", "Int", false)];
        let different = vec![PropertyDefinition::new("size", "Int", false).with_default(12i64)];

        let errors = compare_properties(&reference, &absent, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("default value mismatch"));
        assert_eq!(errors[0].expected, "10");
        assert_eq!(errors[0].actual, "none");

        let errors = compare_properties(&reference, &different, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("different default values"));
        assert!(errors[0].message.contains("10"));
        assert!(errors[0].message.contains("12"));
        assert_eq!(errors[0].advisory, Some(WarningKind::DefaultValueDifference));
    }

    #[test]
    fn test_return_type_mismatch() {
        let errors = compare_methods(&[on_click("void")], &[on_click("boolean")], IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, MismatchKind::ReturnTypeMismatch);
        assert!(errors[0].message.contains("different return types"));
        assert_eq!(errors[0].expected, "void");
        assert_eq!(errors[0].actual, "boolean");
        assert_eq!(errors[0].location, "onClick");
    }

    #[test]
    fn test_parameter_count_mismatch_stops_positional_checks() {
        let reference = vec![MethodSignature::new("setValue", "void")
            .with_parameter(ParameterDefinition::new("value", "string", true))];
        let other = vec![MethodSignature::new("setValue", "void")
            .with_parameter(ParameterDefinition::new("newValue", "number", true))
            .with_parameter(ParameterDefinition::new("animated", "boolean", false))];

        let errors = compare_methods(&reference, &other, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, MismatchKind::MethodMismatch);
        assert!(errors[0].message.contains("different parameter counts"));
        assert_eq!(errors[0].expected, "1 parameters");
        assert_eq!(errors[0].actual, "2 parameters");
    }

    #[test]
    fn test_parameter_positional_checks() {
        let reference = vec![MethodSignature::new("setValue", "void").with_parameter(
            ParameterDefinition::new("value", "string", false).with_default("default"),
        )];
        let other = vec![MethodSignature::new("setValue", "void").with_parameter(
            ParameterDefinition::new("newValue", "number", true).with_default("other"),
        )];

        let errors = compare_methods(&reference, &other, IOS, ANDROID);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| e.error_type == MismatchKind::ParameterMismatch && e.location == "setValue"));
        assert!(messages[0].contains("different names"));
        assert!(messages[1].contains("different types"));
        assert!(messages[2].contains("required mismatch"));
        assert!(messages[3].contains("different default values"));
        assert_eq!(errors[3].expected, "\"default\"");
        assert_eq!(errors[3].actual, "\"other\"");
    }

    #[test]
    fn test_missing_method_both_directions() {
        let reference = vec![on_click("void"), MethodSignature::new("focus", "void")];
        let other = vec![on_click("void"), MethodSignature::new("blur", "void")];

        let cmp = diff_methods(&reference, &other, IOS, Platform::Web);
        assert_eq!(cmp.len(), 2);
        assert!(cmp.divergent[0]
            .message
            .contains("exists in ios but not in web"));
        assert_eq!(cmp.divergent[0].expected, "focus(): void");
        assert!(cmp.missing_from_reference[0]
            .message
            .contains("exists in web but not in ios"));
        assert_eq!(cmp.missing_from_reference[0].actual, "blur(): void");
    }

    #[test]
    fn test_events_and_states() {
        let ref_events = vec![EventDefinition::new("onPress").with_payload("PressEvent")];
        let other_events = vec![EventDefinition::new("onPress")];
        let errors = compare_events(&ref_events, &other_events, IOS, ANDROID);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, MismatchKind::EventMismatch);
        assert_eq!(errors[0].expected, "PressEvent");
        assert_eq!(errors[0].actual, "none");

        let ref_states = vec![StateDefinition::new("pressed", "Bool").with_initial(false)];
        let other_states = vec![StateDefinition::new("pressed", "Int").with_initial(0i64)];
        let errors = compare_states(&ref_states, &other_states, IOS, ANDROID);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.error_type == MismatchKind::StateMismatch));
        assert!(errors[1].message.contains("different initial values"));
    }

    #[test]
    fn test_compare_method_names() {
        let first = vec![on_click("void"), MethodSignature::new("focus", "void")];
        let second = vec![MethodSignature::new("blur", "void"), on_click("void")];

        let names = compare_method_names(&first, &second);
        assert_eq!(names.matching, vec!["onClick".to_string()]);
        assert_eq!(names.only_in_first, vec!["focus".to_string()]);
        assert_eq!(names.only_in_second, vec!["blur".to_string()]);
    }

    #[test]
    fn test_method_statistics() {
        let methods = vec![
            on_click("void"),
            MethodSignature::new("setValue", "void")
                .with_parameter(ParameterDefinition::new("value", "string", true))
                .with_parameter(ParameterDefinition::new("animated", "boolean", false)),
        ];

        let stats = method_statistics(&methods);
        assert_eq!(stats.total_methods, 2);
        assert!((stats.average_parameter_count - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.return_type_distribution.get("void"), Some(&2));
        assert_eq!(stats.parameter_type_distribution.get("string"), Some(&1));

        let empty = method_statistics(&[]);
        assert_eq!(empty.total_methods, 0);
        assert_eq!(empty.average_parameter_count, 0.0);
    }
}
