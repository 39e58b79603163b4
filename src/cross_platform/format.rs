//! Text, JSON and Markdown renderings of a cross-platform report.

use chrono::SecondsFormat;

use super::types::{CrossPlatformReport, RecommendationSection, SectionSummary, TierPercentage};
use crate::platform::join_platforms;
use crate::reporter::Status;

const RULE_WIDTH: usize = 80;

fn mark(valid: bool) -> &'static str {
    if valid {
        "✓"
    } else {
        "✗"
    }
}

fn status_upper(status: Status) -> String {
    status.to_string().to_uppercase()
}

fn section_line(label: &str, section: &SectionSummary) -> String {
    format!("{}: {} {}\n", label, mark(section.valid), section.summary)
}

fn tier_line(label: &str, tier: &TierPercentage) -> String {
    format!(
        "  {}: {}/{} ({:.1}%)\n",
        label, tier.consistent, tier.total, tier.percentage
    )
}

fn text_recommendations(output: &mut String, sections: &[RecommendationSection]) {
    for section in sections {
        output.push_str(&format!(
            "\n{} [{}]\n",
            section.title.to_uppercase(),
            section.priority
        ));
        for (i, rec) in section.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec.description));
            output.push_str(&format!("     Action: {}\n", rec.action));
            if let Some(impact) = &rec.impact {
                output.push_str(&format!("     Impact: {}\n", impact));
            }
            if !rec.components.is_empty() {
                output.push_str(&format!("     Components: {}\n", rec.components.join(", ")));
            }
            if let Some(docs) = &rec.documentation {
                output.push_str(&format!("     Documentation: {}\n", docs));
            }
        }
    }
}

/// Render as plain text.
pub fn format_as_text(report: &CrossPlatformReport) -> String {
    let heavy = "═".repeat(RULE_WIDTH);
    let light = "─".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("{}\n", heavy));
    output.push_str("CROSS-PLATFORM VALIDATION REPORT\n");
    output.push_str(&format!("{}\n", heavy));
    output.push_str(&format!(
        "Generated: {}\n",
        report
            .metadata
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    output.push_str(&format!(
        "Platforms: {}\n",
        join_platforms(&report.metadata.platforms, ", ")
    ));
    output.push_str(&format!("Version: {}\n\n", report.metadata.version));

    let summary = &report.executive_summary;
    output.push_str("EXECUTIVE SUMMARY\n");
    output.push_str(&format!("{}\n", light));
    output.push_str(&format!(
        "Status: {}\n",
        summary.overall_status.to_string().to_uppercase()
    ));
    output.push_str(&format!("Success Rate: {:.1}%\n", summary.success_rate));
    output.push_str(&format!("Total Issues: {}\n", summary.total_issues));
    output.push_str(&format!("  Critical: {}\n", summary.critical_issues));
    output.push_str(&format!("  Warnings: {}\n", summary.warnings));
    if !summary.top_issues.is_empty() {
        output.push_str("\nTop Issues:\n");
        for (i, issue) in summary.top_issues.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, issue));
        }
    }

    let math = &report.mathematical_consistency;
    output.push_str("\nMATHEMATICAL CONSISTENCY\n");
    output.push_str(&format!("{}\n", light));
    output.push_str(&format!("Status: {}\n", status_upper(math.status)));
    output.push_str(&section_line("Cross-Platform", &math.cross_platform_consistency));
    output.push_str(&section_line(
        "Mathematical Relationships",
        &math.mathematical_relationships,
    ));
    output.push_str(&section_line("Strategic Flexibility", &math.strategic_flexibility));
    output.push_str("Accessibility:\n");
    output.push_str(&format!("  Contrast Issues: {}\n", math.contrast_issues));
    output.push_str(&format!("  Touch Target Issues: {}\n", math.touch_target_issues));
    if !math.key_findings.is_empty() {
        output.push_str("Key Findings:\n");
        for finding in &math.key_findings {
            output.push_str(&format!("  • {}\n", finding));
        }
    }

    let tokens = &report.token_comparison;
    output.push_str("\nTOKEN COMPARISON\n");
    output.push_str(&format!("{}\n", light));
    output.push_str(&format!("Status: {}\n", status_upper(tokens.status)));
    output.push_str(&format!("Total Tokens: {}\n", tokens.total_tokens));
    output.push_str(&format!("Consistent: {}\n", tokens.consistent_tokens));
    output.push_str(&format!("Inconsistent: {}\n", tokens.inconsistent_tokens));
    output.push_str(&format!(
        "Average Consistency: {:.1}%\n",
        tokens.average_consistency_score * 100.0
    ));
    output.push_str("By Token Type:\n");
    output.push_str(&tier_line("Primitive", &tokens.by_token_type.primitive));
    output.push_str(&tier_line("Semantic", &tokens.by_token_type.semantic));
    output.push_str(&tier_line("Component", &tokens.by_token_type.component));
    output.push_str("Key Findings:\n");
    for finding in &tokens.key_findings {
        output.push_str(&format!("  • {}\n", finding));
    }

    let interfaces = &report.interface_validation;
    output.push_str("\nINTERFACE VALIDATION\n");
    output.push_str(&format!("{}\n", light));
    output.push_str(&format!("Status: {}\n", status_upper(interfaces.status)));
    output.push_str(&format!(
        "Components Validated: {}\n",
        interfaces.components_validated
    ));
    output.push_str(&format!("API Differences: {}\n", interfaces.api_differences));
    let counts = &interfaces.by_difference_type;
    output.push_str("By Difference Type:\n");
    output.push_str(&format!("  Method: {}\n", counts.method));
    output.push_str(&format!("  Property: {}\n", counts.property));
    output.push_str(&format!("  Event: {}\n", counts.event));
    output.push_str(&format!("  State: {}\n", counts.state));
    output.push_str(&format!("Affected Files: {}\n", interfaces.affected_files));
    output.push_str("Key Findings:\n");
    for finding in &interfaces.key_findings {
        output.push_str(&format!("  • {}\n", finding));
    }

    output.push_str("\nRECOMMENDATIONS\n");
    output.push_str(&format!("{}\n", light));
    text_recommendations(&mut output, &report.recommendations);

    output.push_str("\nNEXT STEPS\n");
    output.push_str(&format!("{}\n", light));
    for (i, step) in summary.next_steps.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, step));
    }
    output.push_str(&format!("{}\n", heavy));

    output
}

/// Render as pretty-printed JSON.
pub fn format_as_json(report: &CrossPlatformReport) -> Result<String, serde_json::Error> {
    report.to_json()
}

/// Render as Markdown.
pub fn format_as_markdown(report: &CrossPlatformReport) -> String {
    let mut md = String::new();
    let summary = &report.executive_summary;

    md.push_str("# Cross-Platform Validation Report\n\n");
    md.push_str(&format!(
        "**Generated:** {}  \n",
        report
            .metadata
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    md.push_str(&format!(
        "**Platforms:** {}  \n",
        join_platforms(&report.metadata.platforms, ", ")
    ));
    md.push_str(&format!("**Version:** {}\n\n", report.metadata.version));

    md.push_str("## Executive Summary\n\n");
    md.push_str(&format!(
        "**Status:** {}  \n",
        summary.overall_status.to_string().to_uppercase()
    ));
    md.push_str(&format!("**Success Rate:** {:.1}%  \n", summary.success_rate));
    md.push_str(&format!(
        "**Total Issues:** {} ({} critical, {} warnings)\n\n",
        summary.total_issues, summary.critical_issues, summary.warnings
    ));
    if !summary.top_issues.is_empty() {
        md.push_str("### Top Issues\n\n");
        for (i, issue) in summary.top_issues.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, issue));
        }
        md.push('\n');
    }

    let math = &report.mathematical_consistency;
    md.push_str("## Mathematical Consistency\n\n");
    md.push_str(&format!("**Status:** {}\n\n", status_upper(math.status)));
    md.push_str("| Check | Result | Summary |\n");
    md.push_str("|-------|--------|---------|\n");
    for (label, section) in [
        ("Cross-Platform", &math.cross_platform_consistency),
        ("Mathematical Relationships", &math.mathematical_relationships),
        ("Strategic Flexibility", &math.strategic_flexibility),
    ] {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            label,
            mark(section.valid),
            section.summary
        ));
    }
    md.push_str(&format!(
        "\n**Accessibility:** {} contrast issue(s), {} touch target issue(s)\n\n",
        math.contrast_issues, math.touch_target_issues
    ));
    for finding in &math.key_findings {
        md.push_str(&format!("- {}\n", finding));
    }
    if !math.key_findings.is_empty() {
        md.push('\n');
    }

    let tokens = &report.token_comparison;
    md.push_str("## Token Comparison\n\n");
    md.push_str(&format!(
        "**Status:** {} ({}/{} consistent, average score {:.1}%)\n\n",
        status_upper(tokens.status),
        tokens.consistent_tokens,
        tokens.total_tokens,
        tokens.average_consistency_score * 100.0
    ));
    md.push_str("| Tier | Consistent | Total | % |\n");
    md.push_str("|------|------------|-------|---|\n");
    for (label, tier) in [
        ("Primitive", &tokens.by_token_type.primitive),
        ("Semantic", &tokens.by_token_type.semantic),
        ("Component", &tokens.by_token_type.component),
    ] {
        md.push_str(&format!(
            "| {} | {} | {} | {:.1} |\n",
            label, tier.consistent, tier.total, tier.percentage
        ));
    }
    md.push('\n');
    for finding in &tokens.key_findings {
        md.push_str(&format!("- {}\n", finding));
    }
    md.push('\n');

    let interfaces = &report.interface_validation;
    md.push_str("## Interface Validation\n\n");
    md.push_str(&format!(
        "**Status:** {} ({} component(s), {} API difference(s), {} affected file(s))\n\n",
        status_upper(interfaces.status),
        interfaces.components_validated,
        interfaces.api_differences,
        interfaces.affected_files
    ));
    for finding in &interfaces.key_findings {
        md.push_str(&format!("- {}\n", finding));
    }
    md.push('\n');

    md.push_str("## Recommendations\n\n");
    for section in &report.recommendations {
        md.push_str(&format!("### {} [{}]\n\n", section.title, section.priority));
        for (i, rec) in section.recommendations.iter().enumerate() {
            md.push_str(&format!("{}. **{}**\n", i + 1, rec.description));
            md.push_str(&format!("   - **Action:** {}\n", rec.action));
            if let Some(impact) = &rec.impact {
                md.push_str(&format!("   - **Impact:** {}\n", impact));
            }
            if !rec.components.is_empty() {
                md.push_str(&format!(
                    "   - **Components:** {}\n",
                    rec.components.join(", ")
                ));
            }
            if let Some(docs) = &rec.documentation {
                md.push_str(&format!("   - **Documentation:** {}\n", docs));
            }
        }
        md.push('\n');
    }

    md.push_str("## Next Steps\n\n");
    for (i, step) in summary.next_steps.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, step));
    }

    md
}
