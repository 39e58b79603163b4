//! Type definitions for detailed validation reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::interface::{ElementKind, MismatchKind, WarningKind};
use crate::platform::Platform;

/// Pass/fail status of a platform or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Status for a validity flag.
    pub fn from_valid(valid: bool) -> Self {
        if valid {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Banner text with check mark.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Pass => "✓ PASS",
            Self::Fail => "✗ FAIL",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Priority of an actionable suggestion. Orders `High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Totals across all platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Platforms validated, in input order.
    pub platforms: Vec<Platform>,
    pub platform_status: BTreeMap<Platform, Status>,
    pub errors_by_type: BTreeMap<MismatchKind, usize>,
}

/// An error enriched with its source file and a fix suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedError {
    #[serde(rename = "type")]
    pub error_type: MismatchKind,
    pub message: String,
    pub expected: String,
    pub actual: String,
    pub location: String,
    pub file_path: String,
    pub platforms: Vec<Platform>,
    pub suggestion: String,
}

/// A warning enriched with its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedWarning {
    #[serde(rename = "type")]
    pub warning_type: WarningKind,
    pub message: String,
    pub location: String,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Findings for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformValidationDetail {
    pub platform: Platform,
    pub status: Status,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<DetailedError>,
    pub warnings: Vec<DetailedWarning>,
}

/// One divergence with the value each affected platform reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDifference {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    pub platforms: Vec<Platform>,
    pub description: String,
    /// Only platforms whose result carries the same error type and location.
    pub values: BTreeMap<Platform, String>,
    pub suggestion: String,
}

/// A grouped fix recommendation with concrete steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableSuggestion {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub platforms: Vec<Platform>,
    pub steps: Vec<String>,
    pub related_errors: Vec<String>,
}

/// Developer-facing report built from a [`crate::interface::ValidationReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedValidationReport {
    pub valid: bool,
    pub component: String,
    pub summary: ValidationSummary,
    pub platform_results: Vec<PlatformValidationDetail>,
    pub differences: Vec<PlatformDifference>,
    pub suggestions: Vec<ActionableSuggestion>,
    pub timestamp: DateTime<Utc>,
}

impl DetailedValidationReport {
    /// Overall status.
    pub fn status(&self) -> Status {
        Status::from_valid(self.valid)
    }

    /// Suggestions at `priority`.
    pub fn suggestions_at(&self, priority: Priority) -> impl Iterator<Item = &ActionableSuggestion> {
        self.suggestions
            .iter()
            .filter(move |s| s.priority == priority)
    }
}
