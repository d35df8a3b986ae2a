//! Display formatting for numeric values.
//!
//! Applied at the render boundary, after aggregation.

pub mod locale;
pub mod number;
pub mod rounding;

pub use locale::Locale;
pub use number::{format_number, parse_decimal, NumericFormatter, NumericValue};
pub use rounding::{round_shortest, to_fixed};
