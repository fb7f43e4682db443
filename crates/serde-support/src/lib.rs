//! Primitive leaf values shared by the eCH codec crates.
//!
//! Every leaf element of an eCH document carries one XSD simple type. The
//! codec engine parses the lexical form into a [`Scalar`], and typed records
//! convert between [`Scalar`] and their Rust field types through
//! [`ScalarValue`]. Closed code lists are declared with [`coded_enum!`].

mod code;
mod scalar;

pub use code::CodeError;
pub use scalar::{GYear, GYearMonth, Scalar, ScalarError, ScalarValue, XsDateTime};

// Used by `coded_enum!` so downstream crates do not need their own serde import.
#[doc(hidden)]
pub use serde as __serde;
