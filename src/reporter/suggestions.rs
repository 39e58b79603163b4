//! Fix suggestions per mismatch kind.

use super::types::{ActionableSuggestion, Priority};
use crate::interface::{MismatchKind, ValidationError, NOT_FOUND};
use crate::platform::{join_platforms, Platform};

/// Number of errors above which an interface redesign is suggested.
pub const REDESIGN_THRESHOLD: usize = 10;

/// Platforms that lack the element named by a missing-element error.
fn lacking(error: &ValidationError) -> String {
    let side = if error.actual == NOT_FOUND {
        error.platforms.get(1)
    } else {
        error.platforms.first()
    };
    side.map(|p| p.to_string())
        .unwrap_or_else(|| join_platforms(&error.platforms, " and "))
}

fn is_missing(error: &ValidationError) -> bool {
    error.actual == NOT_FOUND || error.expected == NOT_FOUND
}

/// One-line fix suggestion for a single error.
pub fn error_suggestion(error: &ValidationError) -> String {
    let loc = &error.location;
    match error.error_type {
        MismatchKind::PropertyMismatch if is_missing(error) => format!(
            "Add the missing property \"{}\" to {} implementations to match the interface contract.",
            loc,
            lacking(error)
        ),
        MismatchKind::PropertyMismatch => format!(
            "Align the declaration of property \"{}\": expected {}, but found {}.",
            loc, error.expected, error.actual
        ),
        MismatchKind::MethodMismatch if is_missing(error) => format!(
            "Implement the missing method \"{}\" in {} to maintain API consistency.",
            loc,
            lacking(error)
        ),
        MismatchKind::MethodMismatch => format!(
            "Update \"{}\" to take {} instead of {} across {}.",
            loc,
            error.expected,
            error.actual,
            join_platforms(&error.platforms, " and ")
        ),
        MismatchKind::TypeMismatch => format!(
            "Update the type of \"{}\" from \"{}\" to \"{}\" to match across platforms.",
            loc, error.actual, error.expected
        ),
        MismatchKind::ParameterMismatch => format!(
            "Align the parameters of \"{}\" to match: expected {}, but found {}.",
            loc, error.expected, error.actual
        ),
        MismatchKind::ReturnTypeMismatch => format!(
            "Change the return type of \"{}\" from \"{}\" to \"{}\" for cross-platform consistency.",
            loc, error.actual, error.expected
        ),
        MismatchKind::EventMismatch if is_missing(error) => format!(
            "Add the missing event \"{}\" to {} implementations.",
            loc,
            lacking(error)
        ),
        MismatchKind::EventMismatch => format!(
            "Emit \"{}\" with payload {} instead of {}.",
            loc, error.expected, error.actual
        ),
        MismatchKind::StateMismatch if is_missing(error) => format!(
            "Add the missing state \"{}\" to {} implementations.",
            loc,
            lacking(error)
        ),
        MismatchKind::StateMismatch => format!(
            "Align state \"{}\": expected {}, but found {}.",
            loc, error.expected, error.actual
        ),
        MismatchKind::MissingImplementation => format!(
            "Provide an implementation of \"{}\" on {}.",
            loc,
            join_platforms(&error.platforms, " and ")
        ),
        MismatchKind::SignatureMismatch => format!(
            "Update the signature of \"{}\" to match: expected {}, but found {}.",
            loc, error.expected, error.actual
        ),
    }
}

/// Priority of the grouped suggestion for `kind`.
pub fn priority_for(kind: MismatchKind) -> Priority {
    match kind {
        MismatchKind::PropertyMismatch
        | MismatchKind::MethodMismatch
        | MismatchKind::TypeMismatch
        | MismatchKind::MissingImplementation => Priority::High,
        MismatchKind::ParameterMismatch
        | MismatchKind::ReturnTypeMismatch
        | MismatchKind::SignatureMismatch
        | MismatchKind::EventMismatch
        | MismatchKind::StateMismatch => Priority::Medium,
    }
}

/// Title, description and fix steps for a group of `count` errors of `kind`.
fn group_template(kind: MismatchKind, count: usize) -> (&'static str, String, [&'static str; 4]) {
    match kind {
        MismatchKind::PropertyMismatch => (
            "Fix Property Mismatches",
            format!("Found {} property mismatches across platforms. Properties must be consistent for unified API contracts.", count),
            [
                "Review the interface definition for missing properties",
                "Add missing properties to platform implementations",
                "Ensure property names match exactly across platforms",
                "Verify property types are equivalent across platforms",
            ],
        ),
        MismatchKind::MethodMismatch => (
            "Fix Method Mismatches",
            format!("Found {} method mismatches. All platforms must implement the same methods.", count),
            [
                "Review the interface definition for missing methods",
                "Implement missing methods in platform code",
                "Ensure method names match exactly",
                "Verify method signatures are equivalent",
            ],
        ),
        MismatchKind::TypeMismatch => (
            "Fix Type Mismatches",
            format!("Found {} type mismatches. Types must be consistent across platforms.", count),
            [
                "Review type definitions across platforms",
                "Update types to match the interface contract",
                "Consider platform-specific type adapters if needed",
                "Document any necessary type conversions",
            ],
        ),
        MismatchKind::ParameterMismatch => (
            "Fix Parameter Mismatches",
            format!("Found {} parameter mismatches in method signatures.", count),
            [
                "Review method parameter lists",
                "Ensure parameter order matches across platforms",
                "Verify parameter types are equivalent",
                "Update method signatures to match",
            ],
        ),
        MismatchKind::ReturnTypeMismatch => (
            "Fix Return Type Mismatches",
            format!("Found {} return type mismatches in methods.", count),
            [
                "Review method return types",
                "Update return types to match interface contract",
                "Consider using type adapters if needed",
                "Ensure async/promise handling is consistent",
            ],
        ),
        MismatchKind::EventMismatch => (
            "Fix Event Mismatches",
            format!("Found {} event mismatches. Components must emit the same events everywhere.", count),
            [
                "Review the events each platform emits",
                "Add missing events to platform implementations",
                "Ensure event names match exactly",
                "Verify event payload types are equivalent",
            ],
        ),
        MismatchKind::StateMismatch => (
            "Fix State Mismatches",
            format!("Found {} state mismatches. Observable state must be modelled identically.", count),
            [
                "Review component state definitions",
                "Add missing state to platform implementations",
                "Align state types across platforms",
                "Use the same initial values everywhere",
            ],
        ),
        MismatchKind::MissingImplementation => (
            "Complete Missing Implementations",
            format!("Found {} missing implementations.", count),
            [
                "Identify platforms without an implementation",
                "Implement the component on those platforms",
                "Follow the interface contract when implementing",
                "Re-run validation once implementations exist",
            ],
        ),
        MismatchKind::SignatureMismatch => (
            "Fix Signature Mismatches",
            format!("Found {} signature mismatches.", count),
            [
                "Compare full signatures across platforms",
                "Align parameter lists and return types",
                "Keep parameter order identical",
                "Update call sites after changing signatures",
            ],
        ),
    }
}

/// Grouped suggestion for all `errors` of one `kind`.
pub fn group_suggestion(kind: MismatchKind, errors: &[&ValidationError]) -> ActionableSuggestion {
    let mut platforms: Vec<Platform> = Vec::new();
    for error in errors {
        for platform in &error.platforms {
            if !platforms.contains(platform) {
                platforms.push(*platform);
            }
        }
    }
    let (title, description, steps) = group_template(kind, errors.len());

    ActionableSuggestion {
        priority: priority_for(kind),
        title: title.to_string(),
        description,
        platforms,
        steps: steps.iter().map(|s| s.to_string()).collect(),
        related_errors: errors.iter().map(|e| e.location.clone()).collect(),
    }
}

/// Suggestion raised when a report has too many errors to fix one by one.
pub fn redesign_suggestion(total_errors: usize, platforms: Vec<Platform>) -> ActionableSuggestion {
    ActionableSuggestion {
        priority: Priority::High,
        title: "Consider Interface Redesign".to_string(),
        description: format!(
            "Found {} validation errors. Consider reviewing the interface design to ensure it's appropriate for all platforms.",
            total_errors
        ),
        platforms,
        steps: vec![
            "Review the interface contract definition".to_string(),
            "Ensure platform-specific constraints are considered".to_string(),
            "Consider using platform adapters for incompatible APIs".to_string(),
            "Document platform-specific behavior differences".to_string(),
        ],
        related_errors: vec!["Multiple validation errors".to_string()],
    }
}
