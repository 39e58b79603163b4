//! Design-token consistency.
//!
//! Platform generators turn one token definition into platform values (points
//! on iOS, dp on Android, px on the web). [`TokenComparator`] checks that those
//! values still agree within a tolerance, and
//! [`MathematicalConsistencyValidator`] checks the set against the baseline
//! grid and accessibility minimums.
//!
//! ## Example
//!
//! ```rust,ignore
//! use contract_parity::tokens::{TokenComparator, TokenTier, TokenValues};
//! use contract_parity::platform::Platform;
//!
//! let token = TokenValues::new("space100", TokenTier::Primitive, "spacing")
//!     .with_base(8.0)
//!     .uniform(8.0);
//! assert!(TokenComparator::new().compare_token(&token).is_consistent);
//! ```

pub mod comparator;
pub mod math;
pub mod types;

pub use comparator::TokenComparator;
pub use math::{
    contrast_ratio, parse_hex, relative_luminance, MathematicalConsistencyValidator,
    DEFAULT_GRID_CATEGORIES, DEFAULT_GRID_UNIT, DEFAULT_STRATEGIC_VALUES,
};
pub use types::{
    AccessibilityResult, BatchComparisonResult, CheckLevel, ColorPair, ConsistencySection,
    ContrastContext, ContrastRatioIssue, GridCheck, GridSection, MathematicalConsistencyResult,
    Size, TierBreakdown, TierCount, TokenComparisonOptions, TokenComparisonResult, TokenSet,
    TokenTier, TokenValueDifference, TokenValues, TouchTarget, TouchTargetIssue,
    ValidationMetadata,
};
