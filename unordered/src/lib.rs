#![warn(clippy::nursery, clippy::pedantic, clippy::all)]

//! An array-backed container that trades element order for O(1) removal.
//!
//! [`UnorderedArray`] appends in amortized O(1) and removes by index in O(1)
//! by moving the last element into the vacated slot. It is a bag, not a list:
//! storage order changes whenever an element is removed or inserted.
//!
//! Searches come in two flavours. The plain ones (`index_of`, `contains`,
//! `count`, `remove_value`, `==`) compare values with [`PartialEq`]; the
//! `*_identity` ones compare instances through [`Identity`].

pub mod collections;
pub mod errors;

pub use collections::identity::Identity;
pub use collections::unordered_array::UnorderedArray;
pub use errors::{Error, Result};
