//! Declarative field validation for Rust structs.
//!
//! Fields carry a compact rule string, and [`validate`] checks every rule on
//! every field and reports all violations at once.
//!
//! # Examples
//!
//! ## Deriving the field table
//!
//! ```
//! use tagcheck::{Cause, Inspect, Validate};
//!
//! #[derive(Inspect)]
//! pub struct User {
//!     #[validate("len:36")]
//!     pub id: String,
//!     #[validate("min:18;max:50")]
//!     pub age: i32,
//!     #[validate("in:admin,staff")]
//!     pub role: String,
//!     pub notes: Vec<String>,
//! }
//!
//! let user = User {
//!     id: "too-short".to_string(),
//!     age: 17,
//!     role: "admin".to_string(),
//!     notes: Vec::new(),
//! };
//!
//! let err = user.validate().unwrap_err();
//! assert!(err.contains(&Cause::LenFailed));
//! assert!(err.contains(&Cause::MinFailed));
//! assert_eq!(
//!     err.to_string(),
//!     "id: len validation failed\nage: min validation failed"
//! );
//! ```
//!
//! ## Rule grammar
//!
//! `clause (";" clause)*` where a clause is `kind:param`:
//!
//! | rule | applies to | passes when |
//! |---|---|---|
//! | `len:N` | strings | byte length is exactly `N` |
//! | `in:a,b,c` | strings, integers | value equals one of the options |
//! | `min:M` | strings, integers | value (or byte length) `>= M` |
//! | `max:M` | strings, integers | value (or byte length) `<= M` |
//!
//! Rules on a field that is not `pub` are always a violation.

// Lets `#[derive(Inspect)]` expand to `::tagcheck::...` paths inside this crate.
extern crate self as tagcheck;

mod driver;
mod errors;
mod rules;
mod traits;
mod validators;
mod value;

pub use driver::*;
pub use errors::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
pub use value::*;

#[cfg(feature = "derive")]
pub use tagcheck_macro::Inspect;
