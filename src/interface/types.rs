//! Type definitions for interface contract validation.
//!
//! An [`InterfaceDefinition`] describes the public surface of one component on
//! one platform. Validation compares definitions of the same component and
//! produces per-platform [`ValidationResult`]s gathered into a
//! [`ValidationReport`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value::{deserialize_present, DefaultValue};
use crate::platform::Platform;

/// A property exposed by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyDefinition {
    /// Create a property.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            required,
            default_value: None,
            description: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A positional method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
}

impl ParameterDefinition {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            required,
            default_value: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A method exposed by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    pub return_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MethodSignature {
    /// Create a method with no parameters.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
            description: None,
        }
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An event emitted by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventDefinition {
    /// Create an event without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_type: None,
            description: None,
        }
    }

    /// Set the payload type.
    pub fn with_payload(mut self, payload_type: impl Into<String>) -> Self {
        self.payload_type = Some(payload_type.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A piece of observable component state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StateDefinition {
    /// Create a state entry.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            initial_value: None,
            description: None,
        }
    }

    /// Set the initial value.
    pub fn with_initial(mut self, value: impl Into<DefaultValue>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The public surface of one component on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDefinition {
    /// Component name, shared by all definitions of one run.
    pub name: String,
    pub platform: Platform,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    #[serde(default)]
    pub events: Vec<EventDefinition>,
    #[serde(default)]
    pub states: Vec<StateDefinition>,
}

impl InterfaceDefinition {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Append a property.
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// Append a method.
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    /// Append an event.
    pub fn with_event(mut self, event: EventDefinition) -> Self {
        self.events.push(event);
        self
    }

    /// Append a state entry.
    pub fn with_state(mut self, state: StateDefinition) -> Self {
        self.states.push(state);
        self
    }

    /// Copy of this definition retargeted at another platform.
    pub fn for_platform(&self, platform: Platform) -> Self {
        Self {
            platform,
            ..self.clone()
        }
    }
}

/// Closed taxonomy of contract mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    PropertyMismatch,
    MethodMismatch,
    TypeMismatch,
    ParameterMismatch,
    ReturnTypeMismatch,
    EventMismatch,
    StateMismatch,
    MissingImplementation,
    SignatureMismatch,
}

impl MismatchKind {
    /// Every kind, in declaration order.
    pub const ALL: [MismatchKind; 9] = [
        Self::PropertyMismatch,
        Self::MethodMismatch,
        Self::TypeMismatch,
        Self::ParameterMismatch,
        Self::ReturnTypeMismatch,
        Self::EventMismatch,
        Self::StateMismatch,
        Self::MissingImplementation,
        Self::SignatureMismatch,
    ];

    /// Serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PropertyMismatch => "property_mismatch",
            Self::MethodMismatch => "method_mismatch",
            Self::TypeMismatch => "type_mismatch",
            Self::ParameterMismatch => "parameter_mismatch",
            Self::ReturnTypeMismatch => "return_type_mismatch",
            Self::EventMismatch => "event_mismatch",
            Self::StateMismatch => "state_mismatch",
            Self::MissingImplementation => "missing_implementation",
            Self::SignatureMismatch => "signature_mismatch",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PropertyMismatch => "property mismatch",
            Self::MethodMismatch => "method mismatch",
            Self::TypeMismatch => "type mismatch",
            Self::ParameterMismatch => "parameter mismatch",
            Self::ReturnTypeMismatch => "return type mismatch",
            Self::EventMismatch => "event mismatch",
            Self::StateMismatch => "state mismatch",
            Self::MissingImplementation => "missing implementation",
            Self::SignatureMismatch => "signature mismatch",
        }
    }
}

impl std::fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed taxonomy of advisory findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    OptionalPropertyDifference,
    DescriptionMissing,
    NamingConventionDifference,
    DefaultValueDifference,
}

impl WarningKind {
    /// Serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OptionalPropertyDifference => "optional_property_difference",
            Self::DescriptionMissing => "description_missing",
            Self::NamingConventionDifference => "naming_convention_difference",
            Self::DefaultValueDifference => "default_value_difference",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A contract mismatch between a reference platform and another platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub error_type: MismatchKind,
    pub message: String,
    /// Value on the reference platform.
    pub expected: String,
    /// Value on the compared platform.
    pub actual: String,
    /// `[reference, other]`.
    pub platforms: Vec<Platform>,
    pub location: String,
    pub severity: Severity,
    /// Advisory kind this error falls back to under a relaxed severity policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<WarningKind>,
}

impl ValidationError {
    /// Create an error-severity finding.
    pub fn new(
        error_type: MismatchKind,
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        platforms: Vec<Platform>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            platforms,
            location: location.into(),
            severity: Severity::Error,
            advisory: None,
        }
    }

    /// Tag the advisory kind this error maps to.
    pub fn with_advisory(mut self, kind: WarningKind) -> Self {
        self.advisory = Some(kind);
        self
    }

    /// Demote to an advisory warning of the given kind.
    pub fn into_warning(self, kind: WarningKind) -> ValidationWarning {
        ValidationWarning {
            warning_type: kind,
            message: self.message,
            platforms: self.platforms,
            location: self.location,
            suggestion: Some(format!(
                "Align to expected {} (found {})",
                self.expected, self.actual
            )),
        }
    }
}

/// An advisory finding. Never affects validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    #[serde(rename = "type")]
    pub warning_type: WarningKind,
    pub message: String,
    pub platforms: Vec<Platform>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationWarning {
    /// Create a warning.
    pub fn new(
        warning_type: WarningKind,
        message: impl Into<String>,
        platforms: Vec<Platform>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            warning_type,
            message: message.into(),
            platforms,
            location: location.into(),
            suggestion: None,
        }
    }

    /// Set the suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Outcome of validating one platform's definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub platform: Platform,
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationResult {
    /// Create an empty, valid result.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Record an error; the result becomes invalid.
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Record a warning.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error of `error_type` at `location`.
    pub fn find_error(&self, error_type: MismatchKind, location: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| e.error_type == error_type && e.location == location)
    }
}

/// Error counts across a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSummary {
    pub total: usize,
    pub by_type: BTreeMap<MismatchKind, usize>,
}

impl ErrorSummary {
    /// Tally `errors` into the summary.
    pub fn record<'a>(&mut self, errors: impl IntoIterator<Item = &'a ValidationError>) {
        for error in errors {
            self.total += 1;
            *self.by_type.entry(error.error_type).or_insert(0) += 1;
        }
    }
}

/// Warning counts across a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningSummary {
    pub total: usize,
    pub by_type: BTreeMap<WarningKind, usize>,
}

impl WarningSummary {
    /// Tally `warnings` into the summary.
    pub fn record<'a>(&mut self, warnings: impl IntoIterator<Item = &'a ValidationWarning>) {
        for warning in warnings {
            self.total += 1;
            *self.by_type.entry(warning.warning_type).or_insert(0) += 1;
        }
    }
}

/// Aggregated outcome of validating one component across platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub component: String,
    pub valid: bool,
    /// One result per input definition, in input order.
    pub results: Vec<ValidationResult>,
    pub error_summary: ErrorSummary,
    pub warning_summary: WarningSummary,
    pub timestamp: DateTime<Utc>,
}

impl ValidationReport {
    /// Build a report from per-platform results, computing the summaries.
    pub fn from_results(component: impl Into<String>, results: Vec<ValidationResult>) -> Self {
        let mut error_summary = ErrorSummary::default();
        let mut warning_summary = WarningSummary::default();
        for result in &results {
            error_summary.record(&result.errors);
            warning_summary.record(&result.warnings);
        }

        Self {
            component: component.into(),
            valid: error_summary.total == 0,
            results,
            error_summary,
            warning_summary,
            timestamp: Utc::now(),
        }
    }

    /// Platforms covered by the report, in input order.
    pub fn platforms(&self) -> Vec<Platform> {
        self.results.iter().map(|r| r.platform).collect()
    }

    /// Result for `platform`, if present.
    pub fn result_for(&self, platform: Platform) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.platform == platform)
    }

    /// Every error across all results.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.results.iter().flat_map(|r| r.errors.iter())
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_from_json() {
        let json = r#"{
            "name": "Button",
            "platform": "ios",
            "properties": [
                {"name": "title", "type": "String", "required": true},
                {"name": "isEnabled", "type": "Bool", "required": false, "defaultValue": true}
            ],
            "methods": [
                {"name": "updateUser", "parameters": [
                    {"name": "email", "type": "string", "required": false, "defaultValue": null}
                ], "returnType": "Promise<User>"}
            ]
        }"#;

        let def: InterfaceDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.platform, Platform::Ios);
        assert_eq!(def.properties.len(), 2);
        assert_eq!(def.properties[0].default_value, None);
        assert_eq!(
            def.properties[1].default_value,
            Some(DefaultValue::Bool(true))
        );
        // An explicit null default is present, not absent
        assert_eq!(
            def.methods[0].parameters[0].default_value,
            Some(DefaultValue::Null)
        );
        assert!(def.events.is_empty());
        assert!(def.states.is_empty());
    }

    #[test]
    fn test_result_add_error() {
        let mut result = ValidationResult::new(Platform::Android);
        assert!(result.valid);

        result.add_warning(ValidationWarning::new(
            WarningKind::DescriptionMissing,
            "missing docs",
            vec![Platform::Ios, Platform::Android],
            "title",
        ));
        assert!(result.valid);

        result.add_error(ValidationError::new(
            MismatchKind::TypeMismatch,
            "different types",
            "String",
            "Int",
            vec![Platform::Ios, Platform::Android],
            "title",
        ));
        assert!(!result.valid);
        assert!(result.find_error(MismatchKind::TypeMismatch, "title").is_some());
        assert!(result.find_error(MismatchKind::TypeMismatch, "other").is_none());
    }

    #[test]
    fn test_report_summaries() {
        let mut ios = ValidationResult::new(Platform::Ios);
        let mut android = ValidationResult::new(Platform::Android);
        let err = ValidationError::new(
            MismatchKind::PropertyMismatch,
            "m",
            "a",
            "b",
            vec![Platform::Ios, Platform::Android],
            "x",
        );
        ios.add_error(err.clone());
        android.add_error(err);

        let report = ValidationReport::from_results("Button", vec![ios, android]);
        assert!(!report.valid);
        assert_eq!(report.error_summary.total, 2);
        assert_eq!(
            report.error_summary.by_type.get(&MismatchKind::PropertyMismatch),
            Some(&2)
        );
        assert_eq!(report.platforms(), vec![Platform::Ios, Platform::Android]);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_error_json_uses_type_key() {
        let err = ValidationError::new(
            MismatchKind::ReturnTypeMismatch,
            "m",
            "void",
            "boolean",
            vec![Platform::Ios, Platform::Web],
            "onClick",
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "return_type_mismatch");
        assert_eq!(value["severity"], "error");
        assert!(value.get("advisory").is_none());
    }
}
