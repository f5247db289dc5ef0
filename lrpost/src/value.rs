//! Semantic value layer.
//!
//! Every stack entry carries an optional value of one carrier type chosen by
//! the driver. A grammar usually has several categories of values (say
//! expressions, terms and literals) multiplexed onto that carrier, so values
//! cross the engine boundary through explicit conversions:
//!
//! - [`IntoCarrier`]: concrete category → carrier. Cannot fail.
//! - [`FromCarrier`]: carrier → concrete category. Returns a
//!   [`ConversionError`] when the carrier holds another category.
//!
//! A reduction receives its popped values as [`Args`], in left-to-right
//! order. Terminals without a payload occupy their slot as `None`, so a
//! semantic action can take just the positions it needs.
//!
//! # Examples
//!
//! ```rust
//! # use lrpost::{Args, ConversionError};
//! // Factor -> ( Expr ): only position 1 carries a value.
//! let mut args = Args::new("group", vec![None, Some(42_i64), None]);
//! assert_eq!(args.len(), 3);
//! assert_eq!(args.take(1), Ok(42));
//! assert_eq!(
//!     args.take(1),
//!     Err(ConversionError::MissingArgument { production: "group", index: 1 })
//! );
//! ```

use crate::ConversionError;

/// Conversion from a concrete category into the carrier type `V`.
pub trait IntoCarrier<V> {
    fn into_carrier(self) -> V;
}

/// Conversion from the carrier type `V` back to a concrete category.
pub trait FromCarrier<V>: Sized {
    fn from_carrier(value: V) -> Result<Self, ConversionError>;
}

impl<V> IntoCarrier<V> for V {
    #[inline]
    fn into_carrier(self) -> V {
        self
    }
}

/// Values popped for one reduction, in right-hand-side order.
#[derive(Debug)]
pub struct Args<V> {
    production: &'static str,
    values: Vec<Option<V>>,
}

impl<V> Args<V> {
    pub fn new(production: &'static str, values: Vec<Option<V>>) -> Self {
        Self { production, values }
    }

    /// Label of the production being reduced.
    pub fn production(&self) -> &'static str {
        self.production
    }

    /// Arity of the production.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Moves out the value at right-hand-side position `index`.
    ///
    /// Fails if the position is out of range, belongs to a payload-less
    /// terminal, or was already taken.
    pub fn take(&mut self, index: usize) -> Result<V, ConversionError> {
        self.values
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(ConversionError::MissingArgument {
                production: self.production,
                index,
            })
    }

    /// Takes position `index` and converts it with `convert`.
    pub fn take_with<T, F>(&mut self, index: usize, convert: F) -> Result<T, ConversionError>
    where
        F: FnOnce(V) -> Result<T, ConversionError>,
    {
        self.take(index).and_then(convert)
    }

    /// Takes position `index` and converts it through [`FromCarrier`].
    pub fn take_as<T>(&mut self, index: usize) -> Result<T, ConversionError>
    where
        T: FromCarrier<V>,
    {
        self.take_with(index, T::from_carrier)
    }

    /// Borrows the value at position `index` without taking it.
    pub fn peek(&self, index: usize) -> Option<&V> {
        self.values.get(index).and_then(Option::as_ref)
    }
}
