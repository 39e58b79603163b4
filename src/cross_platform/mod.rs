//! Cross-platform executive report.
//!
//! Merges the mathematical consistency result, the token batch comparison and
//! any number of interface contract results into one [`CrossPlatformReport`]
//! with an executive summary, per-area summaries and recommendations grouped
//! by urgency.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contract_parity::cross_platform::{format_as_text, generate_report};
//!
//! let report = generate_report(&math, &batch, &contracts);
//! println!("{}", format_as_text(&report));
//! ```

pub mod format;
pub mod generate;
pub mod types;

pub use format::{format_as_json, format_as_markdown, format_as_text};
pub use generate::generate_report;
pub use types::{
    CrossPlatformReport, DifferenceCounts, ExecutiveSummary, InterfaceSummary, MathSummary,
    OverallStatus, Recommendation, RecommendationSection, ReportMetadata, SectionSummary,
    TierPercentage, TierPercentages, TokenSummary, Urgency,
};
