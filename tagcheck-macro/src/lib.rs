// Procedural macros for the tagcheck validation engine

use proc_macro::TokenStream;

mod inspect;

/// Implements `tagcheck::Inspect` for a struct.
///
/// Each field is described by its name, whether it is `pub`, and the rule
/// string from its `#[validate("...")]` (or `#[validate = "..."]`)
/// attributes. Several attributes on one field are joined with `;`.
///
/// ```ignore
/// #[derive(Inspect)]
/// pub struct Account {
///     #[validate("min:3;max:20")]
///     pub login: String,
///     #[validate("in:free,pro")]
///     pub plan: String,
/// }
/// ```
///
/// On an enum or union the generated impl reports a non-struct shape.
#[proc_macro_derive(Inspect, attributes(validate))]
pub fn inspect_derive(input: TokenStream) -> TokenStream {
    inspect::derive_inspect_impl(input)
}
