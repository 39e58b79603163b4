//! Interface contract validation.
//!
//! A facade over [`InterfaceValidator`] that reshapes its report into API
//! differences (one per mismatch kind and element, regardless of how many
//! platforms reported it) and the list of platform source files that need
//! changes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

use super::types::{
    InterfaceDefinition, MethodSignature, MismatchKind, PropertyDefinition, ValidationReport,
};
use super::validator::{InterfaceValidator, ValidatorConfig};
use crate::error::Result;
use crate::platform::{join_platforms, Platform, PlatformRegistry};

/// Kind of API element a difference concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Property,
    Method,
    Event,
    State,
}

impl ElementKind {
    /// Heading used in the difference report.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Property => "PROPERTY DIFFERENCES",
            Self::Method => "METHOD DIFFERENCES",
            Self::Event => "EVENT DIFFERENCES",
            Self::State => "STATE DIFFERENCES",
        }
    }
}

impl From<MismatchKind> for ElementKind {
    fn from(kind: MismatchKind) -> Self {
        match kind {
            MismatchKind::PropertyMismatch | MismatchKind::TypeMismatch => Self::Property,
            MismatchKind::MethodMismatch
            | MismatchKind::ParameterMismatch
            | MismatchKind::ReturnTypeMismatch
            | MismatchKind::SignatureMismatch
            | MismatchKind::MissingImplementation => Self::Method,
            MismatchKind::EventMismatch => Self::Event,
            MismatchKind::StateMismatch => Self::State,
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Method => write!(f, "method"),
            Self::Event => write!(f, "event"),
            Self::State => write!(f, "state"),
        }
    }
}

/// One API divergence, deduplicated across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDifference {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    /// Every platform involved in any occurrence, first-seen order.
    pub platforms: Vec<Platform>,
    pub description: String,
    pub expected: String,
    pub actual: String,
}

/// A platform source file touched by at least one error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedFile {
    pub platform: Platform,
    pub path: String,
}

/// Outcome of a contract validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceContractResult {
    pub valid: bool,
    pub component: String,
    pub report: ValidationReport,
    pub api_differences: Vec<ApiDifference>,
    pub affected_files: Vec<AffectedFile>,
}

impl InterfaceContractResult {
    /// Number of differences of `kind`.
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.api_differences
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    }

    /// Serialize the result to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Contract validator facade.
#[derive(Debug, Default)]
pub struct InterfaceContractValidator {
    validator: InterfaceValidator,
    registry: PlatformRegistry,
}

impl InterfaceContractValidator {
    /// Create a contract validator with default configuration and conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom validator configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.validator = InterfaceValidator::with_config(config);
        self
    }

    /// Use custom platform conventions for file paths.
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the underlying interface validator.
    pub fn validator(&self) -> &InterfaceValidator {
        &self.validator
    }

    /// Get the platform registry.
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Validate definitions, first entry as reference.
    #[instrument(skip(self, definitions), fields(count = definitions.len()))]
    pub fn validate_interface_contracts(
        &self,
        definitions: &[InterfaceDefinition],
    ) -> Result<InterfaceContractResult> {
        let report = self.validator.validate_interfaces(definitions)?;
        Ok(self.contract_result(report))
    }

    /// Validate definitions against the definition for `reference`.
    pub fn validate_with_reference(
        &self,
        definitions: &[InterfaceDefinition],
        reference: Platform,
    ) -> Result<InterfaceContractResult> {
        let report = self
            .validator
            .validate_with_reference(definitions, reference)?;
        Ok(self.contract_result(report))
    }

    /// Compare method lists only. The first entry is the reference.
    pub fn validate_method_signatures(
        &self,
        methods: &[(Platform, Vec<MethodSignature>)],
    ) -> Result<Vec<ApiDifference>> {
        let definitions: Vec<InterfaceDefinition> = methods
            .iter()
            .map(|(platform, methods)| InterfaceDefinition {
                methods: methods.clone(),
                ..InterfaceDefinition::new("", *platform)
            })
            .collect();
        let report = self.validator.validate_interfaces(&definitions)?;
        Ok(api_differences(&report))
    }

    /// Compare property lists only. The first entry is the reference.
    pub fn validate_property_types(
        &self,
        properties: &[(Platform, Vec<PropertyDefinition>)],
    ) -> Result<Vec<ApiDifference>> {
        let definitions: Vec<InterfaceDefinition> = properties
            .iter()
            .map(|(platform, properties)| InterfaceDefinition {
                properties: properties.clone(),
                ..InterfaceDefinition::new("", *platform)
            })
            .collect();
        let report = self.validator.validate_interfaces(&definitions)?;
        Ok(api_differences(&report))
    }

    fn contract_result(&self, report: ValidationReport) -> InterfaceContractResult {
        let api_differences = api_differences(&report);
        let affected_files = affected_files(&report, &self.registry);
        debug!(
            "{} API differences, {} affected files",
            api_differences.len(),
            affected_files.len()
        );

        InterfaceContractResult {
            valid: report.valid,
            component: report.component.clone(),
            report,
            api_differences,
            affected_files,
        }
    }
}

/// One difference per unique `(error type, location)` across the report.
pub fn api_differences(report: &ValidationReport) -> Vec<ApiDifference> {
    let mut keys: Vec<(MismatchKind, &str)> = Vec::new();
    let mut differences: Vec<ApiDifference> = Vec::new();

    for error in report.errors() {
        let key = (error.error_type, error.location.as_str());
        match keys.iter().position(|k| *k == key) {
            Some(index) => {
                let diff = &mut differences[index];
                for platform in &error.platforms {
                    if !diff.platforms.contains(platform) {
                        diff.platforms.push(*platform);
                    }
                }
            }
            None => {
                keys.push(key);
                differences.push(ApiDifference {
                    kind: error.error_type.into(),
                    name: error.location.clone(),
                    platforms: error.platforms.clone(),
                    description: error.message.clone(),
                    expected: error.expected.clone(),
                    actual: error.actual.clone(),
                });
            }
        }
    }

    differences
}

/// Source files of every platform named by any error, first-seen order.
pub fn affected_files(report: &ValidationReport, registry: &PlatformRegistry) -> Vec<AffectedFile> {
    let mut seen: HashSet<(Platform, String)> = HashSet::new();
    let mut files = Vec::new();

    for error in report.errors() {
        for platform in &error.platforms {
            let path = registry.file_path(*platform, &report.component);
            if seen.insert((*platform, path.clone())) {
                files.push(AffectedFile {
                    platform: *platform,
                    path,
                });
            }
        }
    }

    files
}

/// Render a plain-text summary of a contract result.
pub fn generate_difference_report(result: &InterfaceContractResult) -> String {
    let mut output = String::new();

    output.push_str("Interface Contract Validation Report\n");
    output.push_str(&format!("{}\n", "=".repeat(36)));
    output.push_str(&format!("Component: {}\n", result.component));
    output.push_str(&format!(
        "Status: {}\n\n",
        if result.valid { "VALID" } else { "INVALID" }
    ));

    if result.api_differences.is_empty() {
        output.push_str("All platforms implement the same API\n");
        return output;
    }

    output.push_str(&format!(
        "{} API difference(s) found\n",
        result.api_differences.len()
    ));

    for kind in [
        ElementKind::Property,
        ElementKind::Method,
        ElementKind::Event,
        ElementKind::State,
    ] {
        let group: Vec<&ApiDifference> = result
            .api_differences
            .iter()
            .filter(|d| d.kind == kind)
            .collect();
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("\n{}\n", kind.heading()));
        for diff in group {
            output.push_str(&format!(
                "  - {} [{}]: {}\n",
                diff.name,
                join_platforms(&diff.platforms, ", "),
                diff.description
            ));
            output.push_str(&format!("      expected: {}\n", diff.expected));
            output.push_str(&format!("      actual:   {}\n", diff.actual));
        }
    }

    if !result.affected_files.is_empty() {
        output.push_str("\nAffected files:\n");
        for file in &result.affected_files {
            output.push_str(&format!("  - {}\n", file.path));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::types::{ParameterDefinition, StateDefinition};
    use pretty_assertions::assert_eq;

    fn button(platform: Platform) -> InterfaceDefinition {
        InterfaceDefinition::new("Button", platform)
            .with_property(PropertyDefinition::new("title", "String", true))
            .with_method(MethodSignature::new("onClick", "void"))
    }

    #[test]
    fn test_clean_contract() {
        let defs: Vec<_> = Platform::ALL.iter().map(|p| button(*p)).collect();
        let result = InterfaceContractValidator::new()
            .validate_interface_contracts(&defs)
            .unwrap();

        assert!(result.valid);
        assert_eq!(result.component, "Button");
        assert!(result.api_differences.is_empty());
        assert!(result.affected_files.is_empty());

        let text = generate_difference_report(&result);
        assert!(text.contains("Status: VALID"));
        assert!(text.contains("All platforms implement the same API"));
    }

    #[test]
    fn test_differences_are_deduplicated_across_platforms() {
        let ios = button(Platform::Ios);
        let mut android = button(Platform::Android);
        android.methods[0].return_type = "Unit".to_string();
        let mut web = button(Platform::Web);
        web.methods[0].return_type = "boolean".to_string();

        let result = InterfaceContractValidator::new()
            .validate_interface_contracts(&[ios, android, web])
            .unwrap();

        assert!(!result.valid);
        assert_eq!(result.api_differences.len(), 1);
        let diff = &result.api_differences[0];
        assert_eq!(diff.kind, ElementKind::Method);
        assert_eq!(diff.name, "onClick");
        assert_eq!(
            diff.platforms,
            vec![Platform::Ios, Platform::Android, Platform::Web]
        );
        assert_eq!(diff.actual, "Unit");
    }

    #[test]
    fn test_affected_files() {
        let ios = button(Platform::Ios);
        let android = button(Platform::Android)
            .with_property(PropertyDefinition::new("elevation", "Float", true))
            .with_state(StateDefinition::new("pressed", "Boolean"));

        let result = InterfaceContractValidator::new()
            .validate_interface_contracts(&[ios, android])
            .unwrap();

        assert_eq!(
            result.affected_files,
            vec![
                AffectedFile {
                    platform: Platform::Ios,
                    path: "platforms/ios/Button.swift".to_string(),
                },
                AffectedFile {
                    platform: Platform::Android,
                    path: "platforms/android/Button.kt".to_string(),
                },
            ]
        );
        assert_eq!(result.count_of(ElementKind::Property), 1);
        assert_eq!(result.count_of(ElementKind::State), 1);
    }

    #[test]
    fn test_validate_method_signatures() {
        let contract = InterfaceContractValidator::new();
        let reference = vec![MethodSignature::new("setValue", "void")
            .with_parameter(ParameterDefinition::new("value", "string", true))];
        let other = vec![MethodSignature::new("setValue", "void")
            .with_parameter(ParameterDefinition::new("value", "number", true))];

        let diffs = contract
            .validate_method_signatures(&[(Platform::Ios, reference), (Platform::Web, other)])
            .unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, ElementKind::Method);
        assert_eq!(diffs[0].expected, "string");
        assert_eq!(diffs[0].actual, "number");

        assert!(contract.validate_method_signatures(&[]).is_err());
    }

    #[test]
    fn test_validate_property_types() {
        let contract = InterfaceContractValidator::new();
        let diffs = contract
            .validate_property_types(&[
                (
                    Platform::Ios,
                    vec![PropertyDefinition::new("count", "Int", true)],
                ),
                (
                    Platform::Android,
                    vec![PropertyDefinition::new("count", "Long", true)],
                ),
            ])
            .unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, ElementKind::Property);
        assert!(diffs[0].description.contains("different types"));
    }

    #[test]
    fn test_difference_report_groups() {
        let ios = button(Platform::Ios);
        let mut android = button(Platform::Android).with_state(StateDefinition::new("pressed", "Boolean"));
        android.properties[0].type_name = "CharSequence".to_string();

        let result = InterfaceContractValidator::new()
            .validate_interface_contracts(&[ios, android])
            .unwrap();
        let text = generate_difference_report(&result);

        assert!(text.contains("Status: INVALID"));
        assert!(text.contains("2 API difference(s) found"));
        assert!(text.contains("PROPERTY DIFFERENCES"));
        assert!(text.contains("STATE DIFFERENCES"));
        assert!(!text.contains("METHOD DIFFERENCES"));
        assert!(text.contains("platforms/android/Button.kt"));
        let property_at = text.find("PROPERTY DIFFERENCES").unwrap();
        let state_at = text.find("STATE DIFFERENCES").unwrap();
        assert!(property_at < state_at);
    }
}
