//! Abstract operations performed by [`Handler`]s.

use std::marker::PhantomData;

#[cfg(doc)]
use crate::Handler;

/// Storing of a new `T` value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Overwriting of a stored `T` value, creating it if absent.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Removal of a stored value identified by `T`.
#[derive(Clone, Copy, Debug)]
pub struct Delete<T>(pub T);

/// Lookup of stored values described by `T`.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Criterion `B` to look up a `W`hat by.
///
/// `W` is never stored: it only lets the same `B` resolve into different
/// results (one value, an optional one, or a list) through different
/// [`Handler`] impls.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Result type of the lookup.
    _what: PhantomData<W>,

    /// Criterion of the lookup.
    by: B,
}

impl<W, B> By<W, B> {
    /// Wraps the provided criterion.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Unwraps the criterion.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
