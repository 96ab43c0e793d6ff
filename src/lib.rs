//! # Collection Kit
//!
//! A small collections-utility library with three independent components.
//!
//! ## Quick Example
//!
//! ```
//! use collection_kit::comparators::{Comparator, TransformingComparator};
//! use collection_kit::enumeration::{Enumeration, IteratorEnumeration};
//! use collection_kit::properties::ExtendedProperties;
//! use std::cmp::Ordering;
//!
//! // Present an iterator as an enumeration
//! let mut e = IteratorEnumeration::with_iterator(1..=2);
//! while e.has_more_elements() {
//!     let _ = e.next_element().unwrap();
//! }
//!
//! // Compare strings case-insensitively
//! let cmp = TransformingComparator::new(|s: &String| s.to_lowercase());
//! assert_eq!(cmp.compare(&"A".to_string(), &"a".to_string()), Ordering::Equal);
//!
//! // Parse multi-valued properties
//! let mut props = ExtendedProperties::new();
//! props.load_str("one=a\none=b,c\n").unwrap();
//! assert_eq!(props.get_string_array("one"), vec!["a", "b", "c"]);
//! ```
//!
//! ## Components
//!
//! - **Enumeration (`enumeration`)**: [`IteratorEnumeration`](enumeration::IteratorEnumeration)
//!   wraps an iterator behind a has-more/next-element cursor.
//! - **Comparators (`comparators`)**: [`TransformingComparator`](comparators::TransformingComparator)
//!   orders values by a projection of them, with natural ordering as the default base.
//! - **Properties (`properties`)**: [`ExtendedProperties`](properties::ExtendedProperties)
//!   is an ordered multi-valued key/value store with a text format, variable
//!   interpolation, file includes and prefix subsets.
//!
//! None of the components depends on another. All errors are reported
//! through [`error::Error`].

pub mod comparators;
pub mod enumeration;
pub mod error;
pub mod properties;

#[cfg(test)]
mod properties_proptest;
