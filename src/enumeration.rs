//! Iterator to enumeration bridge
//!
//! Some consumers expect an enumeration-style cursor: ask whether more
//! elements exist, then fetch the next one. Rust iterators fold both steps
//! into `next()`. [`IteratorEnumeration`] wraps any iterator so it can be
//! handed to such a consumer through the [`Enumeration`] trait.
//!
//! ## Example
//!
//! ```
//! use collection_kit::enumeration::{Enumeration, IteratorEnumeration};
//!
//! let mut e = IteratorEnumeration::with_iterator(vec!["a", "b"].into_iter());
//! assert!(e.has_more_elements());
//! assert_eq!(e.next_element().unwrap(), "a");
//! assert_eq!(e.next_element().unwrap(), "b");
//! assert!(!e.has_more_elements());
//! assert!(e.next_element().is_err());
//! ```

use std::fmt;
use std::iter::Peekable;

use crate::error::{Error, Result};

/// An enumeration-style cursor over a sequence.
pub trait Enumeration {
    /// The element type produced by the cursor.
    type Item;

    /// Returns `true` if another element can be fetched.
    fn has_more_elements(&mut self) -> bool;

    /// Advances the cursor and returns the element it passed over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] when the cursor is exhausted or was
    /// never set.
    fn next_element(&mut self) -> Result<Self::Item>;
}

/// Adapter presenting an [`Iterator`] as an [`Enumeration`].
///
/// The adapter may start empty and have its iterator supplied later with
/// [`set_iterator`](Self::set_iterator). An empty adapter reports no more
/// elements.
pub struct IteratorEnumeration<I: Iterator> {
    iterator: Option<Peekable<I>>,
}

impl<I: Iterator> IteratorEnumeration<I> {
    /// Creates an adapter that yields nothing until an iterator is set.
    pub fn new() -> Self {
        Self { iterator: None }
    }

    /// Creates an adapter over the given iterator.
    pub fn with_iterator(iterator: I) -> Self {
        Self {
            iterator: Some(iterator.peekable()),
        }
    }

    /// Replaces the wrapped iterator, discarding any unconsumed elements of
    /// the previous one.
    pub fn set_iterator(&mut self, iterator: I) {
        self.iterator = Some(iterator.peekable());
    }

    /// Returns the wrapped iterator, if one is set.
    pub fn iterator_mut(&mut self) -> Option<&mut Peekable<I>> {
        self.iterator.as_mut()
    }

    /// Removes and returns the wrapped iterator, leaving the adapter empty.
    pub fn take_iterator(&mut self) -> Option<Peekable<I>> {
        self.iterator.take()
    }
}

impl<I: Iterator> fmt::Debug for IteratorEnumeration<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IteratorEnumeration")
            .field("has_iterator", &self.iterator.is_some())
            .finish()
    }
}

impl<I: Iterator> Default for IteratorEnumeration<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Iterator> Enumeration for IteratorEnumeration<I> {
    type Item = I::Item;

    fn has_more_elements(&mut self) -> bool {
        match self.iterator.as_mut() {
            Some(iterator) => iterator.peek().is_some(),
            None => false,
        }
    }

    fn next_element(&mut self) -> Result<I::Item> {
        let iterator = self.iterator.as_mut().ok_or_else(|| Error::NoSuchElement {
            message: "no iterator has been set".to_string(),
        })?;
        iterator.next().ok_or_else(|| Error::NoSuchElement {
            message: "iterator is exhausted".to_string(),
        })
    }
}

impl<I: Iterator> Iterator for IteratorEnumeration<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.iterator.as_mut().and_then(Iterator::next)
    }
}

impl<I: Iterator> From<I> for IteratorEnumeration<I> {
    fn from(iterator: I) -> Self {
        Self::with_iterator(iterator)
    }
}
