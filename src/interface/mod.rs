//! Cross-platform interface contract validation.
//!
//! Compares the public surface of one component (properties, methods,
//! events, state) as declared on several platforms and reports every
//! divergence using a closed mismatch taxonomy.
//!
//! ## Components
//!
//! - [`types`]: Interface definitions, findings and reports
//! - [`value`]: Tagged default values with structural equality
//! - [`compare`]: Per-element comparators and declaration rendering
//! - [`advisory`]: Documentation and naming-convention warnings
//! - [`validator`]: The reference-based `InterfaceValidator`
//! - [`contract`]: API differences and affected files on top of the validator
//! - [`source`]: The `InterfaceSource` extension point
//!
//! ## Reference Platform
//!
//! Comparisons are not all-pairs. The first definition (or the one selected
//! with [`InterfaceValidator::validate_with_reference`]) is the reference and
//! every other definition is diffed against it. Elements present only on a
//! non-reference platform are reported on both that platform's result and the
//! reference's result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contract_parity::interface::{InterfaceContractValidator, generate_difference_report};
//!
//! let contract = InterfaceContractValidator::new();
//! let result = contract.validate_interface_contracts(&definitions)?;
//! if !result.valid {
//!     println!("{}", generate_difference_report(&result));
//! }
//! ```

pub mod advisory;
pub mod compare;
pub mod contract;
mod proptest;
pub mod source;
pub mod types;
pub mod validator;
pub mod value;

pub use advisory::{check_advisories, normalize_name};
pub use compare::{
    compare_events, compare_method_names, compare_methods, compare_properties, compare_states,
    method_signature, method_statistics, property_signature, Comparison, MethodNameComparison,
    MethodStatistics, NOT_FOUND,
};
pub use contract::{
    affected_files, api_differences, generate_difference_report, AffectedFile, ApiDifference,
    ElementKind, InterfaceContractResult, InterfaceContractValidator,
};
pub use source::{InMemorySource, InterfaceSource};
pub use types::{
    ErrorSummary, EventDefinition, InterfaceDefinition, MethodSignature, MismatchKind,
    ParameterDefinition, PropertyDefinition, Severity, StateDefinition, ValidationError,
    ValidationReport, ValidationResult, ValidationWarning, WarningKind, WarningSummary,
};
pub use validator::{compare_definitions, InterfaceValidator, SeverityPolicy, ValidatorConfig};
pub use value::DefaultValue;
