//! Mathematical consistency of a token set.
//!
//! Four independent checks feed one [`MathematicalConsistencyResult`]:
//! cross-platform agreement of primitive tokens, alignment with the baseline
//! grid, appropriate use of strategic flexibility values, and accessibility
//! (WCAG 2.1 AA contrast and platform touch target minimums).

use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};

use super::comparator::TokenComparator;
use super::types::{
    AccessibilityResult, CheckLevel, ColorPair, ConsistencySection, ContrastRatioIssue,
    GridCheck, GridSection, MathematicalConsistencyResult, Size, TokenComparisonOptions,
    TokenSet, TokenTier, TokenValues, TouchTarget, TouchTargetIssue, ValidationMetadata,
};
use crate::error::{Error, Result};
use crate::platform::{Platform, PlatformRegistry};

/// Default baseline grid unit.
pub const DEFAULT_GRID_UNIT: f64 = 8.0;

/// Off-grid values accepted as deliberate exceptions.
pub const DEFAULT_STRATEGIC_VALUES: [f64; 3] = [2.0, 6.0, 10.0];

/// Token categories expected to sit on the baseline grid.
pub const DEFAULT_GRID_CATEGORIES: [&str; 3] = ["spacing", "radius", "sizing"];

/// Minimum share of appropriate usages for a flexibility token.
const MIN_FLEXIBILITY_USAGE: f64 = 0.8;

const GRID_EPSILON: f64 = 1e-6;

/// Parse `#rgb` or `#rrggbb` into channel values.
pub fn parse_hex(color: &str) -> Result<[u8; 3]> {
    static HEX: OnceLock<Option<Regex>> = OnceLock::new();
    let re = HEX
        .get_or_init(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok())
        .as_ref()
        .ok_or_else(|| Error::invalid_color(color))?;
    let digits = re
        .captures(color.trim())
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::invalid_color(color))?
        .as_str();

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| Error::invalid_color(color))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// WCAG relative luminance of a hex colour.
pub fn relative_luminance(color: &str) -> Result<f64> {
    let [r, g, b] = parse_hex(color)?;
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Ok(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
}

/// WCAG contrast ratio between two hex colours, from 1 to 21.
pub fn contrast_ratio(foreground: &str, background: &str) -> Result<f64> {
    let a = relative_luminance(foreground)?;
    let b = relative_luminance(background)?;
    let (light, dark) = if a >= b { (a, b) } else { (b, a) };
    Ok((light + 0.05) / (dark + 0.05))
}

/// Validates the mathematical foundations of a token set.
#[derive(Debug)]
pub struct MathematicalConsistencyValidator {
    comparator: TokenComparator,
    grid_unit: f64,
    strategic_values: Vec<f64>,
    grid_categories: Vec<String>,
    registry: PlatformRegistry,
}

impl Default for MathematicalConsistencyValidator {
    fn default() -> Self {
        Self {
            comparator: TokenComparator::new(),
            grid_unit: DEFAULT_GRID_UNIT,
            strategic_values: DEFAULT_STRATEGIC_VALUES.to_vec(),
            grid_categories: DEFAULT_GRID_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            registry: PlatformRegistry::default(),
        }
    }
}

impl MathematicalConsistencyValidator {
    /// Create a validator with an 8 unit grid and standard platform conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison options for cross-platform checks.
    pub fn with_options(mut self, options: TokenComparisonOptions) -> Self {
        self.comparator = self.comparator.with_options(options);
        self
    }

    /// Set the baseline grid unit.
    pub fn with_grid_unit(mut self, unit: f64) -> Self {
        self.grid_unit = unit;
        self
    }

    /// Set the accepted off-grid values.
    pub fn with_strategic_values(mut self, values: Vec<f64>) -> Self {
        self.strategic_values = values;
        self
    }

    /// Set the categories checked against the grid.
    pub fn with_grid_categories(mut self, categories: Vec<String>) -> Self {
        self.grid_categories = categories;
        self
    }

    /// Use custom platform conventions for touch target minimums.
    pub fn with_registry(mut self, registry: PlatformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run every check over `set`.
    ///
    /// Fails only on malformed input such as an unparseable colour.
    #[instrument(skip(self, set), fields(tokens = set.tokens.len()))]
    pub fn validate(&self, set: &TokenSet) -> Result<MathematicalConsistencyResult> {
        let cross_platform_consistency = self.cross_platform(&set.tokens);
        let grid = self.grid_checks(&set.tokens);
        let mathematical_relationships = relationship_section(grid.clone());
        let strategic_flexibility = self.flexibility_section(&set.tokens, grid);
        let accessibility = self.accessibility(&set.color_pairs, &set.touch_targets)?;

        let valid = cross_platform_consistency.valid
            && mathematical_relationships.valid
            && strategic_flexibility.valid
            && accessibility.valid;

        let mut recommendations = Vec::new();
        if !cross_platform_consistency.valid {
            recommendations.push(
                "Review cross-platform token consistency - some tokens have inconsistent values"
                    .to_string(),
            );
        }
        if !mathematical_relationships.valid {
            recommendations.push(
                "Review mathematical relationships - some tokens violate expected progressions"
                    .to_string(),
            );
        }
        if !strategic_flexibility.valid {
            recommendations.push(
                "Review strategic flexibility usage - ensure appropriate usage patterns"
                    .to_string(),
            );
        }
        recommendations.extend(accessibility.recommendations.iter().cloned());
        if recommendations.is_empty() {
            recommendations.push(
                "All mathematical consistency checks passed - tokens maintain cross-platform consistency"
                    .to_string(),
            );
        }

        info!(valid, "mathematical consistency validated");

        Ok(MathematicalConsistencyResult {
            valid,
            cross_platform_consistency,
            mathematical_relationships,
            strategic_flexibility,
            accessibility,
            recommendations,
            metadata: ValidationMetadata {
                timestamp: Utc::now(),
                platforms_validated: platforms_in(set),
                tokens_validated: set.tokens.len(),
            },
        })
    }

    fn cross_platform(&self, tokens: &[TokenValues]) -> ConsistencySection {
        let results: Vec<_> = tokens
            .iter()
            .filter(|t| t.tier == TokenTier::Primitive)
            .map(|t| self.comparator.compare_token(t))
            .collect();
        let consistent = results.iter().filter(|r| r.is_consistent).count();
        ConsistencySection {
            valid: consistent == results.len(),
            summary: format!(
                "{}/{} tokens maintain cross-platform consistency",
                consistent,
                results.len()
            ),
            results,
        }
    }

    fn is_strategic(&self, value: f64) -> bool {
        self.strategic_values
            .iter()
            .any(|v| (v - value).abs() < GRID_EPSILON)
    }

    fn on_grid(&self, value: f64) -> bool {
        if self.grid_unit <= 0.0 {
            return true;
        }
        let remainder = value.rem_euclid(self.grid_unit);
        remainder < GRID_EPSILON || (self.grid_unit - remainder) < GRID_EPSILON
    }

    /// Grid check of `token`, when it has a base value in a grid category.
    pub fn grid_check(&self, token: &TokenValues) -> Option<GridCheck> {
        let value = token.base_value?;
        if !self.grid_categories.iter().any(|c| *c == token.category) {
            return None;
        }

        let (level, message) = if self.on_grid(value) {
            (
                CheckLevel::Pass,
                format!(
                    "{} ({}) aligns with the {} baseline grid",
                    token.name, value, self.grid_unit
                ),
            )
        } else if self.is_strategic(value) {
            (
                CheckLevel::Warning,
                format!(
                    "{} ({}) is a strategic flexibility value off the {} baseline grid",
                    token.name, value, self.grid_unit
                ),
            )
        } else {
            (
                CheckLevel::Error,
                format!(
                    "{} ({}) is not a multiple of the {} baseline grid",
                    token.name, value, self.grid_unit
                ),
            )
        };

        Some(GridCheck {
            token_name: token.name.clone(),
            value,
            level,
            message,
        })
    }

    fn grid_checks(&self, tokens: &[TokenValues]) -> Vec<GridCheck> {
        let checks: Vec<GridCheck> = tokens.iter().filter_map(|t| self.grid_check(t)).collect();
        debug!("{} grid checks", checks.len());
        checks
    }

    /// Aligned and flexibility tokens; flexibility tokens below the usage minimum fail.
    fn flexibility_section(&self, tokens: &[TokenValues], grid: Vec<GridCheck>) -> GridSection {
        let results: Vec<GridCheck> = grid
            .into_iter()
            .filter(|c| c.level != CheckLevel::Error)
            .map(|check| {
                if check.level != CheckLevel::Warning {
                    return check;
                }
                let rate = tokens
                    .iter()
                    .find(|t| t.name == check.token_name)
                    .and_then(|t| t.usage_rate);
                match rate {
                    Some(rate) if rate < MIN_FLEXIBILITY_USAGE => GridCheck {
                        level: CheckLevel::Error,
                        message: format!(
                            "{} is used appropriately in only {:.1}% of cases (minimum 80%)",
                            check.token_name,
                            rate * 100.0
                        ),
                        ..check
                    },
                    _ => check,
                }
            })
            .collect();

        let aligned = results.iter().filter(|c| c.level == CheckLevel::Pass).count();
        let flexible = results.len() - aligned;
        GridSection {
            valid: results.iter().all(|c| c.level != CheckLevel::Error),
            summary: format!(
                "{} aligned, {} strategic flexibility tokens",
                aligned, flexible
            ),
            results,
        }
    }

    fn accessibility(
        &self,
        color_pairs: &[ColorPair],
        touch_targets: &[TouchTarget],
    ) -> Result<AccessibilityResult> {
        let mut contrast_ratio_issues = Vec::new();
        for pair in color_pairs {
            let ratio = contrast_ratio(&pair.foreground, &pair.background)?;
            let required = pair.context.required_ratio();
            if ratio < required {
                contrast_ratio_issues.push(ContrastRatioIssue {
                    foreground_color: pair.foreground.clone(),
                    background_color: pair.background.clone(),
                    contrast_ratio: ratio,
                    required_ratio: required,
                    level: "AA".to_string(),
                    context: pair.context,
                });
            }
        }

        let mut touch_target_issues = Vec::new();
        for target in touch_targets {
            let conventions = self.registry.get(target.platform);
            let minimum = conventions.min_touch_target();
            if target.width < minimum || target.height < minimum {
                touch_target_issues.push(TouchTargetIssue {
                    component: target.component.clone(),
                    platform: target.platform,
                    actual_size: Size {
                        width: target.width,
                        height: target.height,
                    },
                    required_size: Size {
                        width: minimum,
                        height: minimum,
                    },
                    recommendation: format!(
                        "Increase size to meet {} minimum touch target of {}x{}{}",
                        target.platform,
                        minimum,
                        minimum,
                        conventions.size_unit()
                    ),
                });
            }
        }

        let mut recommendations = Vec::new();
        if !contrast_ratio_issues.is_empty() {
            recommendations.push(format!(
                "{} color combinations fail WCAG 2.1 AA contrast requirements",
                contrast_ratio_issues.len()
            ));
        }
        if !touch_target_issues.is_empty() {
            recommendations.push(format!(
                "{} components have touch targets below platform minimums",
                touch_target_issues.len()
            ));
        }

        Ok(AccessibilityResult {
            valid: contrast_ratio_issues.is_empty() && touch_target_issues.is_empty(),
            contrast_ratio_issues,
            touch_target_issues,
            recommendations,
        })
    }
}

fn relationship_section(results: Vec<GridCheck>) -> GridSection {
    let count = |level: CheckLevel| results.iter().filter(|c| c.level == level).count();
    let (pass, warning, error) = (
        count(CheckLevel::Pass),
        count(CheckLevel::Warning),
        count(CheckLevel::Error),
    );
    GridSection {
        valid: error == 0,
        summary: format!("Pass: {}, Warning: {}, Error: {}", pass, warning, error),
        results,
    }
}

/// Platforms mentioned anywhere in the set, in canonical order.
fn platforms_in(set: &TokenSet) -> Vec<Platform> {
    Platform::ALL
        .into_iter()
        .filter(|p| {
            set.tokens.iter().any(|t| t.values.contains_key(p))
                || set.touch_targets.iter().any(|t| t.platform == *p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::types::ContrastContext;
    use pretty_assertions::assert_eq;

    fn spacing(name: &str, value: f64) -> TokenValues {
        TokenValues::new(name, TokenTier::Primitive, "spacing")
            .with_base(value)
            .uniform(value)
    }

    #[test]
    fn test_contrast_black_on_white() {
        let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9);
        let swapped = contrast_ratio("#fff", "#000").unwrap();
        assert!((swapped - 21.0).abs() < 1e-9);
        assert!((contrast_ratio("#777777", "#777777").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#0a0B0c").unwrap(), [10, 11, 12]);
        assert_eq!(parse_hex("abc").unwrap(), [0xaa, 0xbb, 0xcc]);
        assert!(matches!(parse_hex("#12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_hex("blue"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_grid_levels() {
        let validator = MathematicalConsistencyValidator::new();
        let level = |v: f64| validator.grid_check(&spacing("t", v)).unwrap().level;

        assert_eq!(level(0.0), CheckLevel::Pass);
        assert_eq!(level(16.0), CheckLevel::Pass);
        assert_eq!(level(6.0), CheckLevel::Warning);
        assert_eq!(level(10.0), CheckLevel::Warning);
        assert_eq!(level(12.0), CheckLevel::Error);
    }

    #[test]
    fn test_grid_skips_other_categories() {
        let validator = MathematicalConsistencyValidator::new();
        let color = TokenValues::new("gray100", TokenTier::Primitive, "color").with_base(13.0);
        assert!(validator.grid_check(&color).is_none());
        let no_base = TokenValues::new("space", TokenTier::Primitive, "spacing");
        assert!(validator.grid_check(&no_base).is_none());
    }

    #[test]
    fn test_clean_set_is_valid() {
        let set = TokenSet {
            tokens: vec![spacing("space100", 8.0), spacing("space050", 6.0)],
            color_pairs: vec![ColorPair::new("#000000", "#ffffff")],
            touch_targets: vec![TouchTarget {
                component: "Button".to_string(),
                platform: Platform::Android,
                width: 48.0,
                height: 48.0,
            }],
        };
        let result = MathematicalConsistencyValidator::new().validate(&set).unwrap();

        assert!(result.valid);
        assert_eq!(
            result.cross_platform_consistency.summary,
            "2/2 tokens maintain cross-platform consistency"
        );
        assert_eq!(
            result.mathematical_relationships.summary,
            "Pass: 1, Warning: 1, Error: 0"
        );
        assert_eq!(
            result.strategic_flexibility.summary,
            "1 aligned, 1 strategic flexibility tokens"
        );
        assert_eq!(
            result.recommendations,
            vec!["All mathematical consistency checks passed - tokens maintain cross-platform consistency"]
        );
        assert_eq!(result.metadata.tokens_validated, 2);
        assert_eq!(result.metadata.platforms_validated, Platform::ALL.to_vec());
    }

    #[test]
    fn test_off_grid_token_fails_relationships() {
        let set = TokenSet {
            tokens: vec![spacing("space", 12.0)],
            ..TokenSet::default()
        };
        let result = MathematicalConsistencyValidator::new().validate(&set).unwrap();

        assert!(!result.valid);
        assert!(!result.mathematical_relationships.valid);
        assert_eq!(result.mathematical_relationships.count(CheckLevel::Error), 1);
        // Off-grid errors are not flexibility tokens
        assert!(result.strategic_flexibility.results.is_empty());
        assert!(result.strategic_flexibility.valid);
        assert_eq!(
            result.recommendations,
            vec!["Review mathematical relationships - some tokens violate expected progressions"]
        );
    }

    #[test]
    fn test_flexibility_usage_minimum() {
        let set = TokenSet {
            tokens: vec![spacing("space075", 6.0).with_usage_rate(0.5)],
            ..TokenSet::default()
        };
        let result = MathematicalConsistencyValidator::new().validate(&set).unwrap();

        assert!(result.mathematical_relationships.valid);
        assert!(!result.strategic_flexibility.valid);
        assert_eq!(
            result.strategic_flexibility.results[0].message,
            "space075 is used appropriately in only 50.0% of cases (minimum 80%)"
        );
    }

    #[test]
    fn test_accessibility_issues() {
        let set = TokenSet {
            tokens: Vec::new(),
            color_pairs: vec![
                ColorPair::new("#777777", "#ffffff"),
                ColorPair::new("#777777", "#ffffff").with_context(ContrastContext::LargeText),
            ],
            touch_targets: vec![
                TouchTarget {
                    component: "Chip".to_string(),
                    platform: Platform::Android,
                    width: 44.0,
                    height: 48.0,
                },
                TouchTarget {
                    component: "Chip".to_string(),
                    platform: Platform::Ios,
                    width: 44.0,
                    height: 44.0,
                },
            ],
        };
        let result = MathematicalConsistencyValidator::new().validate(&set).unwrap();
        let a11y = &result.accessibility;

        assert!(!a11y.valid);
        // #777 on white is about 4.48:1, enough only for large text
        assert_eq!(a11y.contrast_ratio_issues.len(), 1);
        assert_eq!(a11y.contrast_ratio_issues[0].required_ratio, 4.5);
        assert_eq!(a11y.touch_target_issues.len(), 1);
        assert_eq!(
            a11y.touch_target_issues[0].recommendation,
            "Increase size to meet android minimum touch target of 48x48dp"
        );
        assert_eq!(
            a11y.recommendations,
            vec![
                "1 color combinations fail WCAG 2.1 AA contrast requirements",
                "1 components have touch targets below platform minimums",
            ]
        );
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let set = TokenSet {
            color_pairs: vec![ColorPair::new("red", "#fff")],
            ..TokenSet::default()
        };
        let err = MathematicalConsistencyValidator::new().validate(&set).unwrap_err();
        assert!(matches!(err, Error::InvalidColor(c) if c == "red"));
    }

    #[test]
    fn test_custom_grid() {
        let validator = MathematicalConsistencyValidator::new()
            .with_grid_unit(4.0)
            .with_strategic_values(vec![]);
        assert_eq!(
            validator.grid_check(&spacing("t", 12.0)).unwrap().level,
            CheckLevel::Pass
        );
        assert_eq!(
            validator.grid_check(&spacing("t", 6.0)).unwrap().level,
            CheckLevel::Error
        );
    }
}
