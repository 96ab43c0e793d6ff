//! Comparator decorators
//!
//! A [`Comparator`] is an ordering function over some element type. This
//! module provides the natural orderings and [`TransformingComparator`], which
//! projects both operands through a [`Transformer`] before handing them to a
//! base comparator.
//!
//! ```
//! use std::cmp::Ordering;
//! use collection_kit::comparators::{Comparator, TransformingComparator};
//!
//! let by_abs = TransformingComparator::new(|n: &i32| n.abs());
//! assert_eq!(by_abs.compare(&-5, &3), Ordering::Greater);
//!
//! let mut values = vec![-4, 2, -1, 3];
//! values.sort_by(|a, b| by_abs.compare(a, b));
//! assert_eq!(values, vec![-1, 2, 3, -4]);
//! ```
//!
//! Transformers and base comparators are expected to be pure. Equality and
//! hashing of a [`TransformingComparator`] are structural over both
//! collaborators, so two decorators are equal only when their transformers
//! are equal *and* their base comparators are equal. Closures have no
//! equality; use named types when equality matters.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{Error, Result};

/// An ordering function over `T`.
pub trait Comparator<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// A function mapping a value to another value of the same type.
pub trait Transformer<T> {
    /// Produces the projected value used for comparison.
    fn transform(&self, input: &T) -> T;
}

impl<T, F> Transformer<T> for F
where
    F: Fn(&T) -> T,
{
    fn transform(&self, input: &T) -> T {
        self(input)
    }
}

/// The natural (`Ord`) ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The natural ordering of a type that is only partially ordered.
///
/// Comparing two values with no defined order (for example a NaN float)
/// fails with [`Error::Incomparable`] instead of guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartialNaturalOrder;

impl PartialNaturalOrder {
    /// Compares two values, failing if they have no relative order.
    pub fn try_compare<T: PartialOrd + Debug + ?Sized>(&self, a: &T, b: &T) -> Result<Ordering> {
        a.partial_cmp(b).ok_or_else(|| Error::Incomparable {
            message: format!("{:?} and {:?}", a, b),
        })
    }
}

/// Decorates a comparator by transforming both operands first.
///
/// `compare(a, b)` is `base.compare(&transform(a), &transform(b))`; the
/// transformer is applied to `a` before `b`. The decorator inherits
/// antisymmetry and transitivity from the base comparator over the
/// transformed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformingComparator<F, C = NaturalOrder> {
    transformer: F,
    comparator: C,
}

impl<F> TransformingComparator<F, NaturalOrder> {
    /// Creates a decorator comparing transformed values by their natural order.
    pub fn new(transformer: F) -> Self {
        Self {
            transformer,
            comparator: NaturalOrder,
        }
    }
}

impl<F, C> TransformingComparator<F, C> {
    /// Creates a decorator around an explicit base comparator.
    pub fn with_comparator(transformer: F, comparator: C) -> Self {
        Self {
            transformer,
            comparator,
        }
    }

    /// The transformer applied to both operands.
    pub fn transformer(&self) -> &F {
        &self.transformer
    }

    /// The base comparator applied to the transformed operands.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, F, C> Comparator<T> for TransformingComparator<F, C>
where
    F: Transformer<T>,
    C: Comparator<T>,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let value1 = self.transformer.transform(a);
        let value2 = self.transformer.transform(b);
        self.comparator.compare(&value1, &value2)
    }
}

impl<F> TransformingComparator<F, PartialNaturalOrder> {
    /// Compares transformed values that may have no relative order.
    pub fn try_compare<T>(&self, a: &T, b: &T) -> Result<Ordering>
    where
        F: Transformer<T>,
        T: PartialOrd + Debug,
    {
        let value1 = self.transformer.transform(a);
        let value2 = self.transformer.transform(b);
        self.comparator.try_compare(&value1, &value2)
    }
}
