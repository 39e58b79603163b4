//! Merging sub-reports into a [`CrossPlatformReport`].

use chrono::Utc;
use tracing::{info, instrument};

use super::types::{
    CrossPlatformReport, DifferenceCounts, ExecutiveSummary, InterfaceSummary, MathSummary,
    OverallStatus, Recommendation, RecommendationSection, ReportMetadata, SectionSummary,
    TierPercentage, TierPercentages, TokenSummary, Urgency,
};
use crate::interface::{ElementKind, InterfaceContractResult};
use crate::platform::{join_platforms, Platform};
use crate::reporter::Status;
use crate::tokens::{
    BatchComparisonResult, CheckLevel, GridSection, MathematicalConsistencyResult, TierCount,
    TokenTier,
};

const INTERFACE_DOCS: &str = "docs/interface-contracts.md";
const CONTRAST_DOCS: &str = "https://www.w3.org/WAI/WCAG21/quickref/#contrast-minimum";

/// Average consistency at or above which tolerance tightening is suggested.
const TIGHTEN_TOLERANCE_SCORE: f64 = 0.95;

/// Component token share above which promotion to primitives is suggested.
const COMPONENT_SHARE_LIMIT: f64 = 0.2;

const TOP_ISSUE_LIMIT: usize = 3;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn section_summary(valid: bool, summary: &str) -> SectionSummary {
    SectionSummary {
        valid,
        summary: summary.to_string(),
    }
}

fn grid_summary(section: &GridSection) -> SectionSummary {
    section_summary(section.valid, &section.summary)
}

fn summarize_math(math: &MathematicalConsistencyResult) -> MathSummary {
    let cross = &math.cross_platform_consistency;
    let relationships = &math.mathematical_relationships;
    let flexibility = &math.strategic_flexibility;
    let contrast_issues = math.accessibility.contrast_ratio_issues.len();
    let touch_target_issues = math.accessibility.touch_target_issues.len();

    let mut key_findings = Vec::new();
    if !cross.valid {
        key_findings.push(format!(
            "Cross-platform consistency issues detected: {}",
            cross.summary
        ));
    }
    if !relationships.valid {
        key_findings.push(format!(
            "Mathematical relationship violations: {}",
            relationships.summary
        ));
    }
    let flexible = flexibility.results.len() - flexibility.count(CheckLevel::Pass);
    if flexible > 0 {
        key_findings.push(format!("{} strategic flexibility tokens in use", flexible));
    }
    if contrast_issues > 0 {
        key_findings.push(format!(
            "{} WCAG 2.1 AA contrast ratio violations",
            contrast_issues
        ));
    }
    if touch_target_issues > 0 {
        key_findings.push(format!(
            "{} touch target size violations",
            touch_target_issues
        ));
    }

    MathSummary {
        status: Status::from_valid(math.valid),
        cross_platform_consistency: section_summary(cross.valid, &cross.summary),
        mathematical_relationships: grid_summary(relationships),
        strategic_flexibility: grid_summary(flexibility),
        contrast_issues,
        touch_target_issues,
        key_findings,
    }
}

fn tier_percentage(count: &TierCount) -> TierPercentage {
    TierPercentage {
        total: count.total,
        consistent: count.consistent,
        percentage: count.percentage(),
    }
}

fn summarize_tokens(tokens: &BatchComparisonResult) -> TokenSummary {
    let by_token_type = TierPercentages {
        primitive: tier_percentage(&tokens.by_tier.primitive),
        semantic: tier_percentage(&tokens.by_tier.semantic),
        component: tier_percentage(&tokens.by_tier.component),
    };

    let mut key_findings = vec![format!(
        "{:.1}% of tokens maintain cross-platform consistency",
        tokens.consistency_percentage()
    )];
    for (label, tier) in [
        ("Primitive", &by_token_type.primitive),
        ("Semantic", &by_token_type.semantic),
        ("Component", &by_token_type.component),
    ] {
        if tier.total > 0 {
            key_findings.push(format!(
                "{} tokens: {:.1}% consistent",
                label, tier.percentage
            ));
        }
    }
    let with_issues: Vec<Platform> = tokens
        .platform_issues
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(platform, _)| *platform)
        .collect();
    if !with_issues.is_empty() {
        key_findings.push(format!(
            "Platforms with issues: {}",
            join_platforms(&with_issues, ", ")
        ));
    }

    TokenSummary {
        status: Status::from_valid(tokens.valid()),
        total_tokens: tokens.total_tokens,
        consistent_tokens: tokens.consistent_tokens,
        inconsistent_tokens: tokens.inconsistent_tokens,
        average_consistency_score: tokens.average_consistency_score,
        by_token_type,
        key_findings,
    }
}

fn summarize_interfaces(interfaces: &[InterfaceContractResult]) -> InterfaceSummary {
    let mut counts = DifferenceCounts::default();
    for result in interfaces {
        counts.method += result.count_of(ElementKind::Method);
        counts.property += result.count_of(ElementKind::Property);
        counts.event += result.count_of(ElementKind::Event);
        counts.state += result.count_of(ElementKind::State);
    }
    let total: usize = interfaces.iter().map(|r| r.api_differences.len()).sum();
    let affected_files: usize = interfaces.iter().map(|r| r.affected_files.len()).sum();

    let mut key_findings = Vec::new();
    if total == 0 {
        key_findings.push("All platforms implement consistent API contracts".to_string());
    } else {
        key_findings.push(format!(
            "{} API differences found across {} component(s)",
            total,
            interfaces.len()
        ));
        for (count, label) in [
            (counts.method, "method signature mismatches"),
            (counts.property, "property type mismatches"),
            (counts.event, "event definition mismatches"),
            (counts.state, "state definition mismatches"),
        ] {
            if count > 0 {
                key_findings.push(format!("{} {}", count, label));
            }
        }
    }

    InterfaceSummary {
        status: Status::from_valid(total == 0 && interfaces.iter().all(|r| r.valid)),
        components_validated: interfaces.len(),
        api_differences: total,
        by_difference_type: counts,
        affected_files,
        key_findings,
    }
}

fn critical(
    math: &MathematicalConsistencyResult,
    interfaces: &[InterfaceContractResult],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for result in interfaces.iter().filter(|r| !r.valid) {
        let methods = result.count_of(ElementKind::Method);
        let description = if methods > 0 {
            format!(
                "Component \"{}\" has {} method signature mismatch{}",
                result.component,
                methods,
                if methods == 1 { "" } else { "es" }
            )
        } else {
            let total = result.api_differences.len();
            format!(
                "Component \"{}\" has {} API difference{}",
                result.component,
                total,
                plural(total)
            )
        };
        recs.push(
            Recommendation::new(
                description,
                "Update platform implementations to match unified interface contract",
            )
            .with_impact("API inconsistency will cause runtime errors and developer confusion")
            .with_component(result.component.clone())
            .with_documentation(INTERFACE_DOCS),
        );
    }

    let contrast = math.accessibility.contrast_ratio_issues.len();
    if contrast > 0 {
        recs.push(
            Recommendation::new(
                format!("{} WCAG 2.1 AA contrast violation{}", contrast, plural(contrast)),
                "Adjust color combinations to meet WCAG 2.1 AA contrast requirements (4.5:1 for normal text, 3:1 for large text)",
            )
            .with_impact("Accessibility violations prevent users with visual impairments from using the application")
            .with_documentation(CONTRAST_DOCS),
        );
    }

    recs
}

fn high(
    math: &MathematicalConsistencyResult,
    tokens: &BatchComparisonResult,
    interfaces: &[InterfaceContractResult],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if tokens.inconsistent_tokens > 0 {
        let share = tokens.inconsistent_tokens as f64 / tokens.total_tokens as f64 * 100.0;
        recs.push(
            Recommendation::new(
                format!(
                    "{} token{} inconsistent values across platforms ({:.1}%)",
                    tokens.inconsistent_tokens,
                    if tokens.inconsistent_tokens == 1 { " has" } else { "s have" },
                    share
                ),
                "Review token generation logic to ensure consistent cross-platform conversion",
            )
            .with_impact("Inconsistent token values create visual differences across platforms"),
        );
    }

    for result in interfaces {
        let properties = result.count_of(ElementKind::Property);
        if properties > 0 {
            recs.push(
                Recommendation::new(
                    format!(
                        "Component \"{}\" has {} property type mismatch{}",
                        result.component,
                        properties,
                        if properties == 1 { "" } else { "es" }
                    ),
                    "Ensure property types are equivalent across platforms (String/string, Int/number, etc.)",
                )
                .with_component(result.component.clone()),
            );
        }
    }

    let violations = math.mathematical_relationships.count(CheckLevel::Error);
    if violations > 0 {
        recs.push(
            Recommendation::new(
                format!(
                    "{} token{} mathematical foundations",
                    violations,
                    if violations == 1 { " violates" } else { "s violate" }
                ),
                "Review and correct token values to maintain mathematical relationships",
            )
            .with_impact("Mathematical inconsistency breaks design system integrity"),
        );
    }

    if !math.cross_platform_consistency.valid {
        recs.push(Recommendation::new(
            math.cross_platform_consistency.summary.clone(),
            "Review unit conversion logic and platform-specific constraints",
        ));
    }

    let touch = math.accessibility.touch_target_issues.len();
    if touch > 0 {
        recs.push(
            Recommendation::new(
                format!("{} touch target size violation{}", touch, plural(touch)),
                "Increase touch target sizes to meet platform minimums (iOS: 44pt, Android: 48dp, Web: 44px)",
            )
            .with_impact("Small touch targets create usability issues, especially for users with motor impairments"),
        );
    }

    recs
}

fn medium(
    math: &MathematicalConsistencyResult,
    tokens: &BatchComparisonResult,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let warnings = math.mathematical_relationships.count(CheckLevel::Warning);
    if warnings > 0 {
        recs.push(Recommendation::new(
            format!(
                "{} token{} mathematical relationship warnings",
                warnings,
                if warnings == 1 { " has" } else { "s have" }
            ),
            "Review token progressions and consider adjusting to follow mathematical patterns",
        ));
    }

    let flexible = math.strategic_flexibility.results.len()
        - math.strategic_flexibility.count(CheckLevel::Pass);
    if flexible > 0 {
        recs.push(Recommendation::new(
            format!(
                "{} strategic flexibility token{} in use",
                flexible,
                plural(flexible)
            ),
            "Monitor usage patterns to ensure ≥80% appropriate usage rate",
        ));
    }

    if !tokens.common_issues.is_empty() {
        let top: Vec<&str> = tokens
            .common_issues
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        recs.push(Recommendation::new(
            format!("Common token issues detected: {}", top.join(", ")),
            "Address recurring patterns in token generation or validation",
        ));
    }

    recs
}

fn low(tokens: &BatchComparisonResult) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let average = tokens.average_consistency_score;
    if (TIGHTEN_TOLERANCE_SCORE..1.0).contains(&average) {
        recs.push(Recommendation::new(
            format!("Average consistency score is {:.1}%", average * 100.0),
            "Consider tightening tolerance levels for even more precise cross-platform consistency",
        ));
    }

    if tokens.total_tokens > 0 {
        let share = tokens.by_tier.get(TokenTier::Component).total as f64 / tokens.total_tokens as f64;
        if share > COMPONENT_SHARE_LIMIT {
            recs.push(Recommendation::new(
                format!("{:.1}% of tokens are component-specific", share * 100.0),
                "Review if some component tokens could be promoted to primitive tokens for broader reuse",
            ));
        }
    }

    recs.push(Recommendation::new(
        "Validation complete - consider documenting validation results",
        "Generate validation report documentation for team reference",
    ));

    recs
}

fn next_steps(status: OverallStatus, critical: usize, warnings: usize, valid: bool) -> Vec<String> {
    let mut steps = Vec::new();
    if critical > 0 {
        steps.push(format!(
            "Address {} critical issue{} immediately",
            critical,
            plural(critical)
        ));
    }
    if warnings > 0 {
        steps.push(format!(
            "Review and resolve {} warning{}",
            warnings,
            plural(warnings)
        ));
    }
    if status == OverallStatus::Pass {
        steps.push("All validations passed - proceed with build deployment".to_string());
        steps.push("Consider addressing optimization opportunities".to_string());
    }
    if !valid {
        steps.push("Re-run validation after fixes to confirm resolution".to_string());
    }
    steps
}

/// Platforms seen in any sub-report, in canonical order.
fn platforms(
    math: &MathematicalConsistencyResult,
    tokens: &BatchComparisonResult,
    interfaces: &[InterfaceContractResult],
) -> Vec<Platform> {
    Platform::ALL
        .into_iter()
        .filter(|p| {
            math.metadata.platforms_validated.contains(p)
                || tokens.token_results.iter().any(|r| r.platforms.contains(p))
                || interfaces
                    .iter()
                    .any(|r| r.report.results.iter().any(|res| res.platform == *p))
        })
        .collect()
}

fn count_at(sections: &[RecommendationSection], wanted: &[Urgency]) -> usize {
    sections
        .iter()
        .filter(|s| wanted.contains(&s.priority))
        .map(|s| s.recommendations.len())
        .sum()
}

/// Merge math, token and interface outcomes into one report.
#[instrument(skip_all, fields(components = interfaces.len(), tokens = tokens.total_tokens))]
pub fn generate_report(
    math: &MathematicalConsistencyResult,
    tokens: &BatchComparisonResult,
    interfaces: &[InterfaceContractResult],
) -> CrossPlatformReport {
    let valid = math.valid && tokens.valid() && interfaces.iter().all(|r| r.valid);

    let recommendations: Vec<RecommendationSection> = Urgency::ALL
        .iter()
        .map(|priority| {
            let recommendations = match priority {
                Urgency::Critical => critical(math, interfaces),
                Urgency::High => high(math, tokens, interfaces),
                Urgency::Medium => medium(math, tokens),
                Urgency::Low => low(tokens),
            };
            RecommendationSection {
                priority: *priority,
                title: priority.title().to_string(),
                recommendations,
            }
        })
        .filter(|s| !s.recommendations.is_empty())
        .collect();

    let critical_issues = count_at(&recommendations, &[Urgency::Critical]);
    let warnings = count_at(&recommendations, &[Urgency::High, Urgency::Medium]);

    let overall_status = if critical_issues > 0 {
        OverallStatus::Fail
    } else if warnings > 0 {
        OverallStatus::Warning
    } else {
        OverallStatus::Pass
    };

    let top_issues: Vec<String> = recommendations
        .iter()
        .filter(|s| s.priority.is_issue())
        .flat_map(|s| &s.recommendations)
        .take(TOP_ISSUE_LIMIT)
        .map(|r| r.description.clone())
        .collect();

    info!(%overall_status, valid, critical_issues, warnings, "cross-platform report generated");

    CrossPlatformReport {
        valid,
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            platforms: platforms(math, tokens, interfaces),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        executive_summary: ExecutiveSummary {
            overall_status,
            success_rate: tokens.consistency_percentage(),
            total_issues: critical_issues + warnings,
            critical_issues,
            warnings,
            top_issues,
            next_steps: next_steps(overall_status, critical_issues, warnings, valid),
        },
        mathematical_consistency: summarize_math(math),
        token_comparison: summarize_tokens(tokens),
        interface_validation: summarize_interfaces(interfaces),
        recommendations,
    }
}
