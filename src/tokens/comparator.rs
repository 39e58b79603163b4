//! Tolerance-based comparison of token values across platforms.

use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::types::{
    BatchComparisonResult, TierBreakdown, TokenComparisonOptions, TokenComparisonResult,
    TokenTier, TokenValueDifference, TokenValues,
};
use crate::interface::Severity;
use crate::platform::Platform;

/// Consistency score below which a token is flagged for review.
const LOW_SCORE: f64 = 0.95;

/// Usage rate below which a component token is flagged.
const LOW_USAGE_RATE: f64 = 0.8;

/// Number of common issues kept in a batch result.
const COMMON_ISSUE_LIMIT: usize = 5;

/// Slack for floating point noise at the tolerance boundary.
const EPSILON: f64 = 1e-9;

/// Compares resolved token values across platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenComparator {
    options: TokenComparisonOptions,
}

impl TokenComparator {
    /// Create a comparator with 1% relative tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom comparison options.
    pub fn with_options(mut self, options: TokenComparisonOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &TokenComparisonOptions {
        &self.options
    }

    /// Deviation between two values under the configured mode.
    pub fn deviation(&self, a: f64, b: f64) -> f64 {
        let diff = (a - b).abs();
        if !self.options.relative {
            return diff;
        }
        let scale = a.abs().max(b.abs());
        if scale == 0.0 {
            0.0
        } else {
            diff / scale
        }
    }

    fn within_tolerance(&self, deviation: f64) -> bool {
        deviation <= self.options.tolerance + EPSILON
    }

    fn severity(&self, deviation: f64) -> Severity {
        if deviation > self.options.tolerance * 10.0 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Compare one token across its platforms and against its base value.
    pub fn compare_token(&self, token: &TokenValues) -> TokenComparisonResult {
        let entries: Vec<(Platform, f64)> = token.values.iter().map(|(p, v)| (*p, *v)).collect();
        let mut differences = Vec::new();
        let mut proportional_relationships = BTreeMap::new();
        let mut failed_pairs = Vec::new();
        let mut max_deviation: f64 = 0.0;
        let mut pairs = 0usize;
        let mut passing = 0usize;

        for (i, (p1, v1)) in entries.iter().enumerate() {
            for (p2, v2) in &entries[i + 1..] {
                let pair = format!("{}-{}", p1, p2);
                pairs += 1;
                if *v2 != 0.0 {
                    proportional_relationships.insert(pair.clone(), v1 / v2);
                }

                let deviation = self.deviation(*v1, *v2);
                max_deviation = max_deviation.max(deviation);
                if self.within_tolerance(deviation) {
                    passing += 1;
                    continue;
                }

                failed_pairs.push(format!("{} (deviation: {:.4}, expected: 0)", pair, deviation));
                differences.push(TokenValueDifference {
                    platforms: vec![*p1, *p2],
                    values: vec![*v1, *v2],
                    deviation,
                    description: format!("{} values differ beyond tolerance", pair),
                    severity: self.severity(deviation),
                });
            }
        }

        if let Some(base) = token.base_value {
            for (platform, value) in &entries {
                let deviation = self.deviation(*value, base);
                max_deviation = max_deviation.max(deviation);
                if self.within_tolerance(deviation) {
                    continue;
                }
                failed_pairs.push(format!(
                    "{} value ({}) deviates from base value ({}) by {:.4}",
                    platform, value, base, deviation
                ));
                differences.push(TokenValueDifference {
                    platforms: vec![*platform],
                    values: vec![*value, base],
                    deviation,
                    description: format!("{} value deviates from base value", platform),
                    severity: self.severity(deviation),
                });
            }
        }

        let consistency_score = if pairs == 0 {
            1.0
        } else {
            passing as f64 / pairs as f64
        };

        let mut result = TokenComparisonResult {
            token_name: token.name.clone(),
            tier: token.tier,
            category: token.category.clone(),
            platforms: entries.iter().map(|(p, _)| *p).collect(),
            is_consistent: differences.is_empty(),
            differences,
            proportional_relationships,
            max_deviation,
            failed_pairs,
            consistency_score,
            tolerance: self.options.tolerance,
            recommendations: Vec::new(),
        };
        result.recommendations = recommendations(token, &result);
        result
    }

    /// Compare every token and aggregate the results.
    #[instrument(skip(self, tokens), fields(tokens = tokens.len()))]
    pub fn compare_batch(&self, tokens: &[TokenValues]) -> BatchComparisonResult {
        let token_results: Vec<TokenComparisonResult> =
            tokens.iter().map(|t| self.compare_token(t)).collect();

        let consistent_tokens = token_results.iter().filter(|r| r.is_consistent).count();
        let average_consistency_score = if token_results.is_empty() {
            1.0
        } else {
            token_results.iter().map(|r| r.consistency_score).sum::<f64>()
                / token_results.len() as f64
        };

        let mut by_tier = TierBreakdown::default();
        let mut platform_issues: BTreeMap<Platform, usize> =
            Platform::ALL.iter().map(|p| (*p, 0)).collect();
        for result in &token_results {
            by_tier.record(result.tier, result.is_consistent);
            for difference in &result.differences {
                for platform in &difference.platforms {
                    *platform_issues.entry(*platform).or_insert(0) += 1;
                }
            }
        }

        debug!(
            "{} of {} tokens consistent",
            consistent_tokens,
            token_results.len()
        );

        BatchComparisonResult {
            total_tokens: token_results.len(),
            consistent_tokens,
            inconsistent_tokens: token_results.len() - consistent_tokens,
            average_consistency_score,
            common_issues: common_issues(&token_results),
            token_results,
            platform_issues,
            by_tier,
        }
    }
}

/// Most frequent difference descriptions, ties broken by first appearance.
fn common_issues(results: &[TokenComparisonResult]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for difference in results.iter().flat_map(|r| &r.differences) {
        match counts
            .iter_mut()
            .find(|(d, _)| *d == difference.description)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((difference.description.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(COMMON_ISSUE_LIMIT)
        .map(|(d, _)| d.to_string())
        .collect()
}

fn recommendations(token: &TokenValues, result: &TokenComparisonResult) -> Vec<String> {
    let mut recs = Vec::new();

    if result.consistency_score < LOW_SCORE {
        recs.push(format!(
            "Token '{}' has low consistency score ({:.1}%)",
            token.name,
            result.consistency_score * 100.0
        ));
        recs.push(
            "Review platform-specific value generation to ensure mathematical consistency"
                .to_string(),
        );
    }

    if !result.differences.is_empty() {
        recs.push(format!(
            "Found {} platform value differences - ensure all platforms use same base value",
            result.differences.len()
        ));
    }

    if token.tier == TokenTier::Component {
        if !token.references.is_empty() {
            recs.push(format!(
                "Component token '{}' references primitives: {}",
                token.name,
                token.references.join(", ")
            ));
            recs.push(
                "Consider if primitive tokens could be used directly instead of component token"
                    .to_string(),
            );
        }
        if let Some(rate) = token.usage_rate.filter(|r| *r < LOW_USAGE_RATE) {
            recs.push(format!(
                "Component token usage rate ({:.1}%) is below 80% threshold",
                rate * 100.0
            ));
            recs.push(
                "Review usage patterns to determine if component token is necessary".to_string(),
            );
        }
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spacing(name: &str) -> TokenValues {
        TokenValues::new(name, TokenTier::Primitive, "spacing")
    }

    #[test]
    fn test_identical_values_are_consistent() {
        let token = spacing("space100").with_base(8.0).uniform(8.0);
        let result = TokenComparator::new().compare_token(&token);

        assert!(result.is_consistent);
        assert_eq!(result.consistency_score, 1.0);
        assert_eq!(result.max_deviation, 0.0);
        assert!(result.differences.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.proportional_relationships.len(), 3);
        assert_eq!(result.proportional_relationships.get("ios-android"), Some(&1.0));
    }

    #[test]
    fn test_tolerance_boundary() {
        let comparator = TokenComparator::new();

        let exact = spacing("edge")
            .with_value(Platform::Ios, 100.0)
            .with_value(Platform::Android, 99.0);
        assert!(comparator.compare_token(&exact).is_consistent);

        let over = spacing("over")
            .with_value(Platform::Ios, 100.0)
            .with_value(Platform::Android, 98.9);
        let result = comparator.compare_token(&over);
        assert!(!result.is_consistent);
        assert_eq!(result.consistency_score, 0.0);
        assert_eq!(result.failed_pairs.len(), 1);
        assert!(result.failed_pairs[0].starts_with("ios-android (deviation: 0.0110"));
    }

    #[test]
    fn test_relative_deviation_zero_values() {
        let comparator = TokenComparator::new();
        assert_eq!(comparator.deviation(0.0, 0.0), 0.0);
        assert_eq!(comparator.deviation(0.0, 4.0), 1.0);
    }

    #[test]
    fn test_absolute_mode() {
        let comparator = TokenComparator::new()
            .with_options(TokenComparisonOptions::default().with_tolerance(0.5).absolute());
        let token = spacing("space")
            .with_value(Platform::Ios, 16.0)
            .with_value(Platform::Web, 16.4);
        assert!(comparator.compare_token(&token).is_consistent);

        let token = token.with_value(Platform::Web, 17.0);
        assert!(!comparator.compare_token(&token).is_consistent);
    }

    #[test]
    fn test_severity_scales_with_deviation() {
        let comparator = TokenComparator::new();
        let small = spacing("small")
            .with_value(Platform::Ios, 100.0)
            .with_value(Platform::Android, 95.0);
        assert_eq!(
            comparator.compare_token(&small).differences[0].severity,
            Severity::Warning
        );

        let large = spacing("large")
            .with_value(Platform::Ios, 16.0)
            .with_value(Platform::Android, 12.0);
        assert_eq!(
            comparator.compare_token(&large).differences[0].severity,
            Severity::Error
        );
    }

    #[test]
    fn test_base_value_deviation() {
        let token = spacing("space200").with_base(16.0).uniform(18.0);
        let result = TokenComparator::new().compare_token(&token);

        // Platforms agree with each other but not with the base
        assert_eq!(result.consistency_score, 1.0);
        assert!(!result.is_consistent);
        assert_eq!(result.differences.len(), 3);
        assert_eq!(result.differences[0].platforms, vec![Platform::Ios]);
        assert_eq!(result.differences[0].description, "ios value deviates from base value");
        assert!(result.failed_pairs[0].starts_with("ios value (18) deviates from base value (16)"));
    }

    #[test]
    fn test_single_platform_scores_one() {
        let token = spacing("solo").with_value(Platform::Web, 4.0);
        let result = TokenComparator::new().compare_token(&token);
        assert_eq!(result.consistency_score, 1.0);
        assert!(result.is_consistent);
    }

    #[test]
    fn test_component_token_recommendations() {
        let token = TokenValues::new("buttonPadding", TokenTier::Component, "spacing")
            .uniform(12.0)
            .with_reference("space150")
            .with_usage_rate(0.5);
        let result = TokenComparator::new().compare_token(&token);

        assert_eq!(
            result.recommendations,
            vec![
                "Component token 'buttonPadding' references primitives: space150",
                "Consider if primitive tokens could be used directly instead of component token",
                "Component token usage rate (50.0%) is below 80% threshold",
                "Review usage patterns to determine if component token is necessary",
            ]
        );
    }

    #[test]
    fn test_low_score_recommendations() {
        let token = spacing("drift")
            .with_value(Platform::Ios, 8.0)
            .with_value(Platform::Android, 10.0);
        let result = TokenComparator::new().compare_token(&token);
        assert_eq!(result.recommendations[0], "Token 'drift' has low consistency score (0.0%)");
        assert_eq!(
            result.recommendations[2],
            "Found 1 platform value differences - ensure all platforms use same base value"
        );
    }

    #[test]
    fn test_empty_batch() {
        let batch = TokenComparator::new().compare_batch(&[]);
        assert_eq!(batch.total_tokens, 0);
        assert_eq!(batch.average_consistency_score, 1.0);
        assert!(batch.valid());
        assert_eq!(batch.consistency_percentage(), 100.0);
        assert_eq!(batch.platform_issues.get(&Platform::Web), Some(&0));
    }

    #[test]
    fn test_batch_aggregation() {
        let tokens = vec![
            spacing("a").uniform(8.0),
            spacing("b")
                .with_value(Platform::Ios, 8.0)
                .with_value(Platform::Android, 10.0),
            spacing("c")
                .with_value(Platform::Ios, 4.0)
                .with_value(Platform::Android, 6.0),
            TokenValues::new("d", TokenTier::Semantic, "color")
                .with_value(Platform::Ios, 1.0)
                .with_value(Platform::Web, 2.0),
        ];
        let batch = TokenComparator::new().compare_batch(&tokens);

        assert_eq!(batch.total_tokens, 4);
        assert_eq!(batch.consistent_tokens, 1);
        assert_eq!(batch.inconsistent_tokens, 3);
        assert!(!batch.valid());
        assert_eq!(batch.average_consistency_score, 0.25);
        assert_eq!(
            batch.common_issues,
            vec![
                "ios-android values differ beyond tolerance",
                "ios-web values differ beyond tolerance"
            ]
        );
        assert_eq!(batch.platform_issues.get(&Platform::Ios), Some(&3));
        assert_eq!(batch.platform_issues.get(&Platform::Android), Some(&2));
        assert_eq!(batch.platform_issues.get(&Platform::Web), Some(&1));
        assert_eq!(batch.by_tier.primitive.total, 3);
        assert_eq!(batch.by_tier.primitive.consistent, 1);
        assert_eq!(batch.by_tier.get(TokenTier::Semantic).total, 1);
        assert_eq!(batch.by_tier.component.percentage(), 100.0);
    }
}
