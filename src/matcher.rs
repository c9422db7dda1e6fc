//! The matcher protocol and the assertion entry points built on it

use std::{error::Error, fmt};

use crate::description::{Description, StringDescription};

/// A predicate over `T` that can explain itself.
///
/// `describe_to` renders the expected condition. `describe_mismatch` is only
/// called after `matches` returned false for the same value.
pub trait Matcher<T: ?Sized> {
    /// Returns true if `actual` satisfies the matcher
    fn matches(&self, actual: &T) -> bool;

    /// Describes what a matching value looks like
    fn describe_to(&self, description: &mut dyn Description);

    /// Explains why `actual` did not match
    fn describe_mismatch(&self, actual: &T, description: &mut dyn Description);
}

/// A failed assertion: what was expected and what was found instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Rendered by the matcher's `describe_to`
    pub expected: String,
    /// Rendered by the matcher's `describe_mismatch`
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\nExpected: {}\n     but: {}", self.expected, self.actual)
    }
}

impl Error for Mismatch {}

/// Evaluates `matcher` against `actual`.
///
/// # Errors
///
/// Returns a [`Mismatch`] carrying both descriptions if `actual` does not match.
pub fn check<T, M>(actual: &T, matcher: &M) -> Result<(), Mismatch>
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if matcher.matches(actual) {
        return Ok(());
    }

    let mut expected = StringDescription::new();
    matcher.describe_to(&mut expected);
    let mut mismatch = StringDescription::new();
    matcher.describe_mismatch(actual, &mut mismatch);

    Err(Mismatch { expected: expected.into_string(), actual: mismatch.into_string() })
}

/// Asserts that `actual` satisfies `matcher`.
///
/// # Panics
///
/// Panics with the rendered [`Mismatch`] if `actual` does not match.
#[track_caller]
#[allow(clippy::panic)]
pub fn assert_that<T, M>(actual: &T, matcher: &M)
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if let Err(mismatch) = check(actual, matcher) {
        panic!("{mismatch}");
    }
}
