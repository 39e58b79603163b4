//! Interface validator.
//!
//! Orchestrates the element comparators: one definition is the reference and
//! every other definition is diffed against it. Findings are attached to the
//! per-platform results and summarized into a [`ValidationReport`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::advisory::check_advisories;
use super::compare::{diff_events, diff_methods, diff_properties, diff_states, Comparison};
use super::source::InterfaceSource;
use super::types::{
    InterfaceDefinition, Severity, ValidationError, ValidationReport, ValidationResult,
    WarningKind,
};
use crate::error::{Error, Result};
use crate::platform::Platform;

/// How strictly advisory-tagged mismatches are reported.
///
/// Each field applies to errors carrying the matching advisory kind. At
/// `Error` (the default) they count against validity; at `Warning` they are
/// reported as warnings instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeverityPolicy {
    /// An optional property present on only one platform.
    pub optional_property_absence: Severity,
    /// Default values that differ or are present on only one side.
    pub default_value_difference: Severity,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            optional_property_absence: Severity::Error,
            default_value_difference: Severity::Error,
        }
    }
}

impl SeverityPolicy {
    /// Severity to apply to errors tagged with `kind`.
    pub fn severity_for(&self, kind: WarningKind) -> Severity {
        match kind {
            WarningKind::OptionalPropertyDifference => self.optional_property_absence,
            WarningKind::DefaultValueDifference => self.default_value_difference,
            WarningKind::DescriptionMissing | WarningKind::NamingConventionDifference => {
                Severity::Warning
            }
        }
    }

    /// Policy that demotes every advisory-tagged mismatch to a warning.
    pub fn lenient() -> Self {
        Self {
            optional_property_absence: Severity::Warning,
            default_value_difference: Severity::Warning,
        }
    }
}

/// Configuration for [`InterfaceValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    pub severity: SeverityPolicy,
    /// Run the advisory checks (documentation, naming conventions).
    pub advisories: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            severity: SeverityPolicy::default(),
            advisories: true,
        }
    }
}

impl ValidatorConfig {
    /// Set the severity policy.
    pub fn with_severity(mut self, severity: SeverityPolicy) -> Self {
        self.severity = severity;
        self
    }

    /// Enable or disable advisory checks.
    pub fn with_advisories(mut self, enabled: bool) -> Self {
        self.advisories = enabled;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Run all four comparators of `other` against `reference`.
pub fn compare_definitions(
    reference: &InterfaceDefinition,
    other: &InterfaceDefinition,
) -> Comparison {
    let (ref_p, other_p) = (reference.platform, other.platform);
    let mut comparison = diff_properties(&reference.properties, &other.properties, ref_p, other_p);
    comparison.extend(diff_methods(&reference.methods, &other.methods, ref_p, other_p));
    comparison.extend(diff_events(&reference.events, &other.events, ref_p, other_p));
    comparison.extend(diff_states(&reference.states, &other.states, ref_p, other_p));
    comparison
}

/// Validates a set of interface definitions of one component.
#[derive(Debug, Clone, Default)]
pub struct InterfaceValidator {
    config: ValidatorConfig,
}

impl InterfaceValidator {
    /// Create a validator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate definitions using the first one as the reference.
    pub fn validate_interfaces(
        &self,
        definitions: &[InterfaceDefinition],
    ) -> Result<ValidationReport> {
        if definitions.is_empty() {
            return Err(Error::EmptyDefinitions);
        }
        Ok(self.validate_against(definitions, 0))
    }

    /// Validate definitions using the definition for `reference` as the reference.
    ///
    /// Results keep the input order regardless of which entry is the reference.
    pub fn validate_with_reference(
        &self,
        definitions: &[InterfaceDefinition],
        reference: Platform,
    ) -> Result<ValidationReport> {
        if definitions.is_empty() {
            return Err(Error::EmptyDefinitions);
        }
        let index = definitions
            .iter()
            .position(|d| d.platform == reference)
            .ok_or_else(|| Error::unknown_reference(reference))?;
        Ok(self.validate_against(definitions, index))
    }

    /// Load `component` for each platform from `source` and validate.
    ///
    /// The first platform is the reference.
    pub fn validate_from_source(
        &self,
        source: &dyn InterfaceSource,
        component: &str,
        platforms: &[Platform],
    ) -> Result<ValidationReport> {
        let definitions = platforms
            .iter()
            .map(|p| source.load(*p, component))
            .collect::<Result<Vec<_>>>()?;
        self.validate_interfaces(&definitions)
    }

    #[instrument(skip(self, definitions), fields(count = definitions.len(), reference = %definitions[reference].platform))]
    fn validate_against(
        &self,
        definitions: &[InterfaceDefinition],
        reference: usize,
    ) -> ValidationReport {
        let reference_def = &definitions[reference];
        info!("Validating interface '{}'", reference_def.name);

        if let Some(odd) = definitions.iter().find(|d| d.name != reference_def.name) {
            warn!(
                "Definition for {} names component '{}', expected '{}'",
                odd.platform, odd.name, reference_def.name
            );
        }

        let mut results: Vec<ValidationResult> = definitions
            .iter()
            .map(|d| ValidationResult::new(d.platform))
            .collect();

        for (index, other) in definitions.iter().enumerate() {
            if index == reference {
                continue;
            }

            let comparison = compare_definitions(reference_def, other);
            debug!(
                "{} vs {}: {} divergent, {} missing from reference",
                reference_def.platform,
                other.platform,
                comparison.divergent.len(),
                comparison.missing_from_reference.len()
            );

            for error in comparison.divergent {
                self.record(&mut results[index], error);
            }
            for error in comparison.missing_from_reference {
                self.record(&mut results[index], error.clone());
                self.record(&mut results[reference], error);
            }

            if self.config.advisories {
                for warning in check_advisories(reference_def, other) {
                    results[index].add_warning(warning);
                }
            }
        }

        let report = ValidationReport::from_results(&reference_def.name, results);
        info!(
            "Interface '{}' {}: {} errors, {} warnings",
            report.component,
            if report.valid { "valid" } else { "invalid" },
            report.error_summary.total,
            report.warning_summary.total
        );
        report
    }

    fn record(&self, result: &mut ValidationResult, error: ValidationError) {
        match error.advisory {
            Some(kind) if self.config.severity.severity_for(kind) == Severity::Warning => {
                result.add_warning(error.into_warning(kind));
            }
            _ => result.add_error(error),
        }
    }
}
