//! Developer-facing validation reports.
//!
//! [`ValidationReporter`] enriches an interface [`crate::interface::ValidationReport`]
//! with source file paths, per-error fix suggestions, cross-platform
//! differences and grouped, prioritized action items. The result renders to
//! text, JSON or Markdown.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contract_parity::reporter::{format_as_markdown, ValidationReporter};
//!
//! let detailed = ValidationReporter::new().generate_report(&report);
//! std::fs::write("report.md", format_as_markdown(&detailed))?;
//! ```

pub mod detail;
pub mod format;
pub mod suggestions;
pub mod types;

pub use detail::ValidationReporter;
pub use format::{format_as_json, format_as_markdown, format_as_text};
pub use suggestions::{error_suggestion, priority_for, REDESIGN_THRESHOLD};
pub use types::{
    ActionableSuggestion, DetailedError, DetailedValidationReport, DetailedWarning,
    PlatformDifference, PlatformValidationDetail, Priority, Status, ValidationSummary,
};
