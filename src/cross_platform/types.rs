//! Types for the merged cross-platform report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::reporter::Status;

/// Overall outcome of a cross-platform run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warning => write!(f, "warning"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Urgency of a recommendation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// All urgencies, most urgent first.
    pub const ALL: [Urgency; 4] = [Urgency::Critical, Urgency::High, Urgency::Medium, Urgency::Low];

    /// Section title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Critical => "Critical Issues",
            Self::High => "High Priority Issues",
            Self::Medium => "Medium Priority Issues",
            Self::Low => "Optimization Opportunities",
        }
    }

    /// Whether findings at this urgency count against the overall status.
    pub fn is_issue(&self) -> bool {
        !matches!(self, Self::Low)
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// A single recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub description: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Recommendation {
    /// Create a recommendation.
    pub fn new(description: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            action: action.into(),
            impact: None,
            components: Vec::new(),
            documentation: None,
        }
    }

    /// Describe the consequence of ignoring this recommendation.
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    /// Name an affected component.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Link supporting documentation.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Recommendations sharing one urgency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSection {
    pub priority: Urgency,
    pub title: String,
    pub recommendations: Vec<Recommendation>,
}

/// A validity flag with its one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub valid: bool,
    pub summary: String,
}

/// Condensed mathematical consistency outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathSummary {
    pub status: Status,
    pub cross_platform_consistency: SectionSummary,
    pub mathematical_relationships: SectionSummary,
    pub strategic_flexibility: SectionSummary,
    pub contrast_issues: usize,
    pub touch_target_issues: usize,
    pub key_findings: Vec<String>,
}

/// Consistency counts of one token tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPercentage {
    pub total: usize,
    pub consistent: usize,
    pub percentage: f64,
}

/// Per-tier consistency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPercentages {
    pub primitive: TierPercentage,
    pub semantic: TierPercentage,
    pub component: TierPercentage,
}

/// Condensed token comparison outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub status: Status,
    pub total_tokens: usize,
    pub consistent_tokens: usize,
    pub inconsistent_tokens: usize,
    pub average_consistency_score: f64,
    pub by_token_type: TierPercentages,
    pub key_findings: Vec<String>,
}

/// API differences per element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceCounts {
    pub method: usize,
    pub property: usize,
    pub event: usize,
    pub state: usize,
}

/// Condensed interface validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSummary {
    pub status: Status,
    pub components_validated: usize,
    pub api_differences: usize,
    pub by_difference_type: DifferenceCounts,
    pub affected_files: usize,
    pub key_findings: Vec<String>,
}

/// Headline numbers and next steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub overall_status: OverallStatus,
    /// Percentage of consistent tokens.
    pub success_rate: f64,
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warnings: usize,
    pub top_issues: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub platforms: Vec<Platform>,
    pub version: String,
}

/// Merged report over token, math and interface validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPlatformReport {
    pub valid: bool,
    pub metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    pub mathematical_consistency: MathSummary,
    pub token_comparison: TokenSummary,
    pub interface_validation: InterfaceSummary,
    pub recommendations: Vec<RecommendationSection>,
}

impl CrossPlatformReport {
    /// Recommendations at `priority`.
    pub fn section(&self, priority: Urgency) -> &[Recommendation] {
        self.recommendations
            .iter()
            .find(|s| s.priority == priority)
            .map(|s| s.recommendations.as_slice())
            .unwrap_or(&[])
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
