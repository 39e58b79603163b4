//! Type definitions for design-token consistency checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::interface::Severity;
use crate::platform::Platform;

/// Tier of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTier {
    Primitive,
    Semantic,
    Component,
}

impl std::fmt::Display for TokenTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive => write!(f, "primitive"),
            Self::Semantic => write!(f, "semantic"),
            Self::Component => write!(f, "component"),
        }
    }
}

/// Resolved numeric values of one token on each platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValues {
    pub name: String,
    pub tier: TokenTier,
    pub category: String,
    /// Platform-independent value the platform values derive from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,
    pub values: BTreeMap<Platform, f64>,
    /// Tokens this one is built from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    /// Share of usages judged appropriate, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_rate: Option<f64>,
}

impl TokenValues {
    /// Create a token with no platform values.
    pub fn new(name: impl Into<String>, tier: TokenTier, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier,
            category: category.into(),
            base_value: None,
            values: BTreeMap::new(),
            references: Vec::new(),
            usage_rate: None,
        }
    }

    /// Set the base value.
    pub fn with_base(mut self, base_value: f64) -> Self {
        self.base_value = Some(base_value);
        self
    }

    /// Set the value on `platform`.
    pub fn with_value(mut self, platform: Platform, value: f64) -> Self {
        self.values.insert(platform, value);
        self
    }

    /// Set the same value on every platform.
    pub fn uniform(mut self, value: f64) -> Self {
        for platform in Platform::ALL {
            self.values.insert(platform, value);
        }
        self
    }

    /// Add a referenced token.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    /// Set the appropriate-usage rate.
    pub fn with_usage_rate(mut self, rate: f64) -> Self {
        self.usage_rate = Some(rate);
        self
    }
}

/// Options for token comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenComparisonOptions {
    /// Maximum accepted deviation (0.01 = 1% in relative mode).
    pub tolerance: f64,
    /// Measure deviation relative to the larger magnitude instead of absolutely.
    pub relative: bool,
}

impl Default for TokenComparisonOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            relative: true,
        }
    }
}

impl TokenComparisonOptions {
    /// Set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Switch to absolute deviation.
    pub fn absolute(mut self) -> Self {
        self.relative = false;
        self
    }
}

/// A value difference between two platforms, or one platform and the base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValueDifference {
    pub platforms: Vec<Platform>,
    pub values: Vec<f64>,
    pub deviation: f64,
    /// Value-free description, shared by equivalent issues across tokens.
    pub description: String,
    pub severity: Severity,
}

/// Comparison outcome for a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenComparisonResult {
    pub token_name: String,
    pub tier: TokenTier,
    pub category: String,
    pub platforms: Vec<Platform>,
    pub is_consistent: bool,
    pub differences: Vec<TokenValueDifference>,
    /// Ratio of first to second value for each `a-b` platform pair.
    pub proportional_relationships: BTreeMap<String, f64>,
    pub max_deviation: f64,
    pub failed_pairs: Vec<String>,
    /// Passing pairs over compared pairs.
    pub consistency_score: f64,
    pub tolerance: f64,
    pub recommendations: Vec<String>,
}

/// Total and consistent counts for one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub total: usize,
    pub consistent: usize,
}

impl TierCount {
    /// Consistent share in percent, 100 when empty.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.consistent as f64 / self.total as f64 * 100.0
        }
    }
}

/// Per-tier counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub primitive: TierCount,
    pub semantic: TierCount,
    pub component: TierCount,
}

impl TierBreakdown {
    /// Counts for `tier`.
    pub fn get(&self, tier: TokenTier) -> &TierCount {
        match tier {
            TokenTier::Primitive => &self.primitive,
            TokenTier::Semantic => &self.semantic,
            TokenTier::Component => &self.component,
        }
    }

    fn get_mut(&mut self, tier: TokenTier) -> &mut TierCount {
        match tier {
            TokenTier::Primitive => &mut self.primitive,
            TokenTier::Semantic => &mut self.semantic,
            TokenTier::Component => &mut self.component,
        }
    }

    /// Count one token of `tier`.
    pub fn record(&mut self, tier: TokenTier, consistent: bool) {
        let count = self.get_mut(tier);
        count.total += 1;
        if consistent {
            count.consistent += 1;
        }
    }
}

/// Comparison outcome for a batch of tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchComparisonResult {
    pub total_tokens: usize,
    pub consistent_tokens: usize,
    pub inconsistent_tokens: usize,
    /// 1.0 for an empty batch.
    pub average_consistency_score: f64,
    pub token_results: Vec<TokenComparisonResult>,
    /// Up to five most frequent difference descriptions.
    pub common_issues: Vec<String>,
    pub platform_issues: BTreeMap<Platform, usize>,
    pub by_tier: TierBreakdown,
}

impl BatchComparisonResult {
    /// Whether every token is consistent.
    pub fn valid(&self) -> bool {
        self.inconsistent_tokens == 0
    }

    /// Consistent share in percent, 100 when empty.
    pub fn consistency_percentage(&self) -> f64 {
        if self.total_tokens == 0 {
            100.0
        } else {
            self.consistent_tokens as f64 / self.total_tokens as f64 * 100.0
        }
    }
}

/// Outcome level of a grid or relationship check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckLevel {
    Pass,
    Warning,
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Baseline grid check of one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCheck {
    pub token_name: String,
    pub value: f64,
    pub level: CheckLevel,
    pub message: String,
}

/// Where a colour pair is used, which sets its required contrast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastContext {
    #[default]
    NormalText,
    LargeText,
    UiComponent,
}

impl ContrastContext {
    /// Tag used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NormalText => "normal-text",
            Self::LargeText => "large-text",
            Self::UiComponent => "ui-component",
        }
    }

    /// Minimum WCAG 2.1 AA contrast ratio.
    pub fn required_ratio(&self) -> f64 {
        match self {
            Self::NormalText => 4.5,
            Self::LargeText | Self::UiComponent => 3.0,
        }
    }
}

/// A foreground/background colour combination to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: String,
    pub background: String,
    #[serde(default)]
    pub context: ContrastContext,
}

impl ColorPair {
    /// Create a pair used for normal text.
    pub fn new(foreground: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
            context: ContrastContext::NormalText,
        }
    }

    /// Set the usage context.
    pub fn with_context(mut self, context: ContrastContext) -> Self {
        self.context = context;
        self
    }
}

/// Width and height of a touch target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Interactive area of a component on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTarget {
    pub component: String,
    pub platform: Platform,
    pub width: f64,
    pub height: f64,
}

/// Input for the mathematical consistency validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenSet {
    pub tokens: Vec<TokenValues>,
    pub color_pairs: Vec<ColorPair>,
    pub touch_targets: Vec<TouchTarget>,
}

/// A colour pair below its required contrast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastRatioIssue {
    pub foreground_color: String,
    pub background_color: String,
    pub contrast_ratio: f64,
    pub required_ratio: f64,
    pub level: String,
    pub context: ContrastContext,
}

/// A touch target below its platform minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTargetIssue {
    pub component: String,
    pub platform: Platform,
    pub actual_size: Size,
    pub required_size: Size,
    pub recommendation: String,
}

/// Accessibility section of the mathematical consistency result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResult {
    pub valid: bool,
    pub contrast_ratio_issues: Vec<ContrastRatioIssue>,
    pub touch_target_issues: Vec<TouchTargetIssue>,
    pub recommendations: Vec<String>,
}

/// Cross-platform consistency section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySection {
    pub valid: bool,
    pub results: Vec<TokenComparisonResult>,
    pub summary: String,
}

/// A section built from grid checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    pub valid: bool,
    pub results: Vec<GridCheck>,
    pub summary: String,
}

impl GridSection {
    /// Number of checks at `level`.
    pub fn count(&self, level: CheckLevel) -> usize {
        self.results.iter().filter(|r| r.level == level).count()
    }
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    pub timestamp: DateTime<Utc>,
    pub platforms_validated: Vec<Platform>,
    pub tokens_validated: usize,
}

/// Outcome of the mathematical consistency validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathematicalConsistencyResult {
    pub valid: bool,
    pub cross_platform_consistency: ConsistencySection,
    pub mathematical_relationships: GridSection,
    pub strategic_flexibility: GridSection,
    pub accessibility: AccessibilityResult,
    pub recommendations: Vec<String>,
    pub metadata: ValidationMetadata,
}
