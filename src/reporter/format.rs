//! Text, JSON and Markdown renderings of a detailed report.
//!
//! Renderings are deterministic for a given report; the only time-dependent
//! content is the timestamp line, which comes from the report itself.

use chrono::SecondsFormat;

use super::types::{DetailedValidationReport, Status};
use crate::platform::join_platforms;

const RULE_WIDTH: usize = 80;

/// Render as plain text.
pub fn format_as_text(report: &DetailedValidationReport) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("{}\n", heavy));
    output.push_str(&format!("VALIDATION REPORT: {}\n", report.component));
    output.push_str(&format!(
        "Status: {}\n",
        if report.valid { "PASS ✓" } else { "FAIL ✗" }
    ));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    output.push_str(&format!("{}\n\n", heavy));

    output.push_str("SUMMARY\n");
    output.push_str(&format!("{}\n", light));
    output.push_str(&format!("Total Errors: {}\n", report.summary.total_errors));
    output.push_str(&format!("Total Warnings: {}\n", report.summary.total_warnings));
    output.push_str(&format!(
        "Platforms: {}\n\n",
        join_platforms(&report.summary.platforms, ", ")
    ));
    output.push_str("Platform Status:\n");
    for platform in &report.summary.platforms {
        if let Some(status) = report.summary.platform_status.get(platform) {
            output.push_str(&format!("  {}: {}\n", platform, status.banner()));
        }
    }

    if !report.platform_results.is_empty() {
        output.push_str("\nPLATFORM RESULTS\n");
        output.push_str(&format!("{}\n", light));
        for result in &report.platform_results {
            output.push_str(&format!(
                "\n{}\n",
                result.platform.as_str().to_uppercase()
            ));
            output.push_str(&format!("  Status: {}\n", result.status.banner()));
            output.push_str(&format!("  Errors: {}\n", result.error_count));
            output.push_str(&format!("  Warnings: {}\n", result.warning_count));

            if !result.errors.is_empty() {
                output.push_str("\n  Errors:\n");
                for error in &result.errors {
                    output.push_str(&format!("    • [{}] {}\n", error.error_type, error.message));
                    output.push_str(&format!("      Location: {}\n", error.location));
                    output.push_str(&format!("      File: {}\n", error.file_path));
                    output.push_str(&format!("      Expected: {}\n", error.expected));
                    output.push_str(&format!("      Actual: {}\n", error.actual));
                    output.push_str(&format!("      Suggestion: {}\n\n", error.suggestion));
                }
            }

            if !result.warnings.is_empty() {
                output.push_str("\n  Warnings:\n");
                for warning in &result.warnings {
                    output.push_str(&format!(
                        "    • [{}] {}\n",
                        warning.warning_type, warning.message
                    ));
                    if let Some(suggestion) = &warning.suggestion {
                        output.push_str(&format!("      Suggestion: {}\n", suggestion));
                    }
                }
            }
        }
    }

    if !report.differences.is_empty() {
        output.push_str("\nPLATFORM DIFFERENCES\n");
        output.push_str(&format!("{}\n", light));
        for diff in &report.differences {
            output.push_str(&format!(
                "\n{}: {}\n",
                diff.kind.to_string().to_uppercase(),
                diff.name
            ));
            output.push_str(&format!(
                "  Platforms: {}\n",
                join_platforms(&diff.platforms, ", ")
            ));
            output.push_str(&format!("  Description: {}\n", diff.description));
            output.push_str("  Values:\n");
            for (platform, value) in &diff.values {
                output.push_str(&format!("    {}: {}\n", platform, value));
            }
            output.push_str(&format!("  Suggestion: {}\n", diff.suggestion));
        }
    }

    if !report.suggestions.is_empty() {
        output.push_str("\nACTIONABLE SUGGESTIONS\n");
        output.push_str(&format!("{}\n", light));
        for suggestion in &report.suggestions {
            output.push_str(&format!(
                "\n[{}] {}\n",
                suggestion.priority.to_string().to_uppercase(),
                suggestion.title
            ));
            output.push_str(&format!("  {}\n", suggestion.description));
            output.push_str(&format!(
                "  Platforms: {}\n",
                join_platforms(&suggestion.platforms, ", ")
            ));
            output.push_str("  Steps:\n");
            for (i, step) in suggestion.steps.iter().enumerate() {
                output.push_str(&format!("    {}. {}\n", i + 1, step));
            }
        }
    }

    output.push_str(&format!("\n{}\n", heavy));
    output.push_str("END OF REPORT\n");
    output.push_str(&heavy);
    output
}

/// Render as pretty-printed JSON.
pub fn format_as_json(report: &DetailedValidationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Render as Markdown.
pub fn format_as_markdown(report: &DetailedValidationReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Validation Report: {}\n\n", report.component));
    md.push_str(&format!("**Status:** {}  \n", report.status().banner()));
    md.push_str(&format!(
        "**Timestamp:** {}  \n\n",
        report.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Errors:** {}\n", report.summary.total_errors));
    md.push_str(&format!(
        "- **Total Warnings:** {}\n",
        report.summary.total_warnings
    ));
    md.push_str(&format!(
        "- **Platforms:** {}\n\n",
        join_platforms(&report.summary.platforms, ", ")
    ));
    md.push_str("### Platform Status\n\n");
    for platform in &report.summary.platforms {
        let status = report
            .summary
            .platform_status
            .get(platform)
            .copied()
            .unwrap_or(Status::Pass);
        md.push_str(&format!("- **{}:** {}\n", platform, status.banner()));
    }
    md.push('\n');

    if !report.platform_results.is_empty() {
        md.push_str("## Platform Results\n\n");
        for result in &report.platform_results {
            md.push_str(&format!("### {}\n\n", result.platform.as_str().to_uppercase()));
            md.push_str(&format!("- **Status:** {}\n", result.status.banner()));
            md.push_str(&format!("- **Errors:** {}\n", result.error_count));
            md.push_str(&format!("- **Warnings:** {}\n\n", result.warning_count));

            if !result.errors.is_empty() {
                md.push_str("#### Errors\n\n");
                for error in &result.errors {
                    md.push_str(&format!("**[{}]** {}\n\n", error.error_type, error.message));
                    md.push_str(&format!("- **Location:** `{}`\n", error.location));
                    md.push_str(&format!("- **File:** `{}`\n", error.file_path));
                    md.push_str(&format!("- **Expected:** `{}`\n", error.expected));
                    md.push_str(&format!("- **Actual:** `{}`\n", error.actual));
                    md.push_str(&format!("- **Suggestion:** {}\n\n", error.suggestion));
                }
            }

            if !result.warnings.is_empty() {
                md.push_str("#### Warnings\n\n");
                for warning in &result.warnings {
                    md.push_str(&format!(
                        "- **[{}]** {}\n",
                        warning.warning_type, warning.message
                    ));
                }
                md.push('\n');
            }
        }
    }

    if !report.differences.is_empty() {
        md.push_str("## Platform Differences\n\n");
        for diff in &report.differences {
            md.push_str(&format!("### {}: {}\n\n", diff.kind, diff.name));
            md.push_str(&format!(
                "**Platforms:** {}  \n",
                join_platforms(&diff.platforms, ", ")
            ));
            md.push_str(&format!("**Description:** {}  \n\n", diff.description));
            md.push_str("**Values:**\n\n");
            for (platform, value) in &diff.values {
                md.push_str(&format!("- **{}:** `{}`\n", platform, value));
            }
            md.push_str(&format!("\n**Suggestion:** {}\n\n", diff.suggestion));
        }
    }

    if !report.suggestions.is_empty() {
        md.push_str("## Actionable Suggestions\n\n");
        for suggestion in &report.suggestions {
            md.push_str(&format!(
                "### [{}] {}\n\n",
                suggestion.priority.to_string().to_uppercase(),
                suggestion.title
            ));
            md.push_str(&format!("{}\n\n", suggestion.description));
            md.push_str(&format!(
                "**Platforms:** {}\n\n",
                join_platforms(&suggestion.platforms, ", ")
            ));
            md.push_str("**Steps:**\n\n");
            for (i, step) in suggestion.steps.iter().enumerate() {
                md.push_str(&format!("{}. {}\n", i + 1, step));
            }
            md.push('\n');
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{
        InterfaceDefinition, InterfaceValidator, MethodSignature, PropertyDefinition,
    };
    use crate::platform::Platform;
    use crate::reporter::ValidationReporter;

    fn failing_report() -> DetailedValidationReport {
        let ios = InterfaceDefinition::new("Button", Platform::Ios)
            .with_property(PropertyDefinition::new("disabled", "Bool", false))
            .with_method(MethodSignature::new("onClick", "void"));
        let android = InterfaceDefinition::new("Button", Platform::Android)
            .with_method(MethodSignature::new("onClick", "boolean"));
        let report = InterfaceValidator::new()
            .validate_interfaces(&[ios, android])
            .unwrap();
        ValidationReporter::new().generate_report(&report)
    }

    #[test]
    fn test_text_section_order() {
        let text = format_as_text(&failing_report());

        assert!(text.contains("VALIDATION REPORT: Button"));
        assert!(text.contains("Status: FAIL ✗"));
        assert!(text.contains("File: platforms/android/Button.kt"));
        assert!(text.contains("[HIGH] Fix Property Mismatches"));

        let positions: Vec<usize> = [
            "Status:",
            "SUMMARY",
            "PLATFORM RESULTS",
            "PLATFORM DIFFERENCES",
            "ACTIONABLE SUGGESTIONS",
            "END OF REPORT",
        ]
        .iter()
        .map(|section| text.find(section).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_text_is_deterministic() {
        let report = failing_report();
        assert_eq!(format_as_text(&report), format_as_text(&report));
        assert_eq!(format_as_markdown(&report), format_as_markdown(&report));
    }

    #[test]
    fn test_passing_text_omits_empty_sections() {
        let ios = InterfaceDefinition::new("Card", Platform::Ios);
        let report = InterfaceValidator::new()
            .validate_interfaces(&[ios.clone(), ios.for_platform(Platform::Web)])
            .unwrap();
        let text = format_as_text(&ValidationReporter::new().generate_report(&report));

        assert!(text.contains("Status: PASS ✓"));
        assert!(text.contains("web: ✓ PASS"));
        assert!(!text.contains("PLATFORM DIFFERENCES"));
        assert!(!text.contains("ACTIONABLE SUGGESTIONS"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = failing_report();
        let json = format_as_json(&report).unwrap();
        let parsed: DetailedValidationReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.component, report.component);
        assert_eq!(parsed.valid, report.valid);
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.suggestions, report.suggestions);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["totalErrors"], 2);
        assert_eq!(value["summary"]["platformStatus"]["android"], "fail");
    }

    #[test]
    fn test_markdown_sections() {
        let md = format_as_markdown(&failing_report());

        assert!(md.starts_with("# Validation Report: Button"));
        assert!(md.contains("## Summary"));
        assert!(md.contains("### Platform Status"));
        assert!(md.contains("## Platform Results"));
        assert!(md.contains("## Platform Differences"));
        assert!(md.contains("## Actionable Suggestions"));
        assert!(md.contains("- **Expected:** `void`"));
    }
}
