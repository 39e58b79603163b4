//! Detailed report generation.

use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::suggestions::{error_suggestion, group_suggestion, redesign_suggestion, REDESIGN_THRESHOLD};
use super::types::{
    ActionableSuggestion, DetailedError, DetailedValidationReport, DetailedWarning,
    PlatformDifference, PlatformValidationDetail, Status, ValidationSummary,
};
use crate::interface::{MismatchKind, ValidationError, ValidationReport};
use crate::platform::PlatformRegistry;

/// Turns a [`ValidationReport`] into a [`DetailedValidationReport`].
#[derive(Debug, Default)]
pub struct ValidationReporter {
    registry: PlatformRegistry,
}

impl ValidationReporter {
    /// Create a reporter using the standard platform conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom platform conventions for file paths.
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the detailed report.
    #[instrument(skip(self, report), fields(component = %report.component))]
    pub fn generate_report(&self, report: &ValidationReport) -> DetailedValidationReport {
        let summary = summarize(report);
        let platform_results = self.platform_results(report);
        let differences = differences(report);
        let suggestions = suggestions(report);
        debug!(
            "{} differences, {} suggestions",
            differences.len(),
            suggestions.len()
        );

        DetailedValidationReport {
            valid: report.valid,
            component: report.component.clone(),
            summary,
            platform_results,
            differences,
            suggestions,
            timestamp: report.timestamp,
        }
    }

    fn platform_results(&self, report: &ValidationReport) -> Vec<PlatformValidationDetail> {
        report
            .results
            .iter()
            .map(|result| {
                let file_path = self.registry.file_path(result.platform, &report.component);
                let errors = result
                    .errors
                    .iter()
                    .map(|error| DetailedError {
                        error_type: error.error_type,
                        message: error.message.clone(),
                        expected: error.expected.clone(),
                        actual: error.actual.clone(),
                        location: error.location.clone(),
                        file_path: file_path.clone(),
                        platforms: error.platforms.clone(),
                        suggestion: error_suggestion(error),
                    })
                    .collect();
                let warnings = result
                    .warnings
                    .iter()
                    .map(|warning| DetailedWarning {
                        warning_type: warning.warning_type,
                        message: warning.message.clone(),
                        location: warning.location.clone(),
                        file_path: file_path.clone(),
                        suggestion: warning.suggestion.clone(),
                    })
                    .collect();

                PlatformValidationDetail {
                    platform: result.platform,
                    status: Status::from_valid(result.valid),
                    error_count: result.errors.len(),
                    warning_count: result.warnings.len(),
                    errors,
                    warnings,
                }
            })
            .collect()
    }
}

fn summarize(report: &ValidationReport) -> ValidationSummary {
    ValidationSummary {
        total_errors: report.error_summary.total,
        total_warnings: report.warning_summary.total,
        platforms: report.platforms(),
        platform_status: report
            .results
            .iter()
            .map(|r| (r.platform, Status::from_valid(r.valid)))
            .collect(),
        errors_by_type: report.error_summary.by_type.clone(),
    }
}

/// One difference per unique `(error type, location)`, first occurrence wins.
fn differences(report: &ValidationReport) -> Vec<PlatformDifference> {
    let mut seen: Vec<(MismatchKind, &str)> = Vec::new();
    let mut differences = Vec::new();

    for error in report.errors() {
        let key = (error.error_type, error.location.as_str());
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let mut values = BTreeMap::new();
        for platform in &error.platforms {
            let matching = report
                .result_for(*platform)
                .and_then(|r| r.find_error(error.error_type, &error.location));
            if let Some(matching) = matching {
                values.insert(*platform, matching.actual.clone());
            }
        }

        differences.push(PlatformDifference {
            kind: error.error_type.into(),
            name: error.location.clone(),
            platforms: error.platforms.clone(),
            description: error.message.clone(),
            values,
            suggestion: error_suggestion(error),
        });
    }

    differences
}

/// Grouped suggestions in first-occurrence order, stable-sorted by priority.
fn suggestions(report: &ValidationReport) -> Vec<ActionableSuggestion> {
    let mut groups: Vec<(MismatchKind, Vec<&ValidationError>)> = Vec::new();
    for error in report.errors() {
        match groups.iter_mut().find(|(kind, _)| *kind == error.error_type) {
            Some((_, errors)) => errors.push(error),
            None => groups.push((error.error_type, vec![error])),
        }
    }

    let mut suggestions: Vec<ActionableSuggestion> = groups
        .iter()
        .map(|(kind, errors)| group_suggestion(*kind, errors))
        .collect();

    if report.error_summary.total > REDESIGN_THRESHOLD {
        suggestions.push(redesign_suggestion(
            report.error_summary.total,
            report.platforms(),
        ));
    }

    suggestions.sort_by_key(|s| s.priority);
    suggestions
}
