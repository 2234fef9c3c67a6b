//! 64-bit decimal floating point numbers.
//!
//! A value is a single immutable word:
//!
//! `s eeeeeeeeee mmmmm...m` - 1 sign bit, a 10-bit exponent offset by 512,
//! and a 53-bit significand field.
//!
//! The significand is normalised to sixteen decimal digits, from
//! 1,000,000,000,000,000 to 9,999,999,999,999,999; the fixed leading digit's
//! 10^15 is subtracted before storage and restored on decode. The all-zero
//! exponent block holds subnormal numbers and the all-one block holds the
//! infinities and NaN. The `layout` module selects between the subnormal,
//! special-pattern and field-split conventions.

extern crate num;

pub mod bit_ops;
pub mod digit_ops;
pub mod layout;
pub mod zero_pad;

pub mod decimal;

pub use decimal::d64::d64;
pub use layout::{ExtendedRange, Layout, NoSubnormals, SharedBoundary, Standard};
