//! # contract-parity
//!
//! Cross-platform consistency checks for design systems that ship the same
//! components on iOS, Android and the web.
//!
//! ## Core Components
//!
//! - **Interface**: Structural comparison of component interface definitions
//! - **Platform**: Per-platform conventions (file layout, units, touch targets)
//! - **Reporter**: Developer-facing reports with file paths and fix suggestions
//! - **Tokens**: Tolerance-based token comparison and mathematical checks
//! - **Cross-platform**: One executive report merging all of the above
//!
//! Mismatches are findings, not errors: validation only fails with
//! [`Error`] on malformed input.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contract_parity::{InterfaceDefinition, InterfaceValidator, MethodSignature, Platform};
//! use contract_parity::reporter::{format_as_text, ValidationReporter};
//!
//! let ios = InterfaceDefinition::new("Button", Platform::Ios)
//!     .with_method(MethodSignature::new("onClick", "void"));
//! let android = InterfaceDefinition::new("Button", Platform::Android)
//!     .with_method(MethodSignature::new("onClick", "boolean"));
//!
//! let report = InterfaceValidator::new().validate_interfaces(&[ios, android])?;
//! let detailed = ValidationReporter::new().generate_report(&report);
//! println!("{}", format_as_text(&detailed));
//! ```

pub mod cli;
pub mod cross_platform;
pub mod error;
pub mod interface;
pub mod platform;
pub mod reporter;
pub mod tokens;

// Re-exports for convenience
pub use cross_platform::{generate_report, CrossPlatformReport, OverallStatus};
pub use error::{Error, Result};
pub use interface::{
    generate_difference_report, InterfaceContractResult, InterfaceContractValidator,
    InterfaceDefinition, InterfaceSource, InterfaceValidator, MethodSignature, MismatchKind,
    PropertyDefinition, ValidationReport, ValidatorConfig, WarningKind,
};
pub use platform::{Platform, PlatformConventions, PlatformRegistry};
pub use reporter::{DetailedValidationReport, ValidationReporter};
pub use tokens::{
    BatchComparisonResult, MathematicalConsistencyResult, MathematicalConsistencyValidator,
    TokenComparator, TokenComparisonOptions, TokenSet, TokenValues,
};
