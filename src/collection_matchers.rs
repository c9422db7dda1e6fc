//! Matchers for the crate's own collections

use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use crate::{description::Description, matcher::Matcher, ImmutableOpenMap};

/// Matches an [`ImmutableOpenMap`] that has an entry for a given key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasKeyMatcher {
    /// The key the map must contain
    key: String,
}

impl HasKeyMatcher {
    /// Creates a matcher looking for `key`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key this matcher looks for
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Shorthand for [`HasKeyMatcher::new`]
#[must_use]
pub fn has_key(key: impl Into<String>) -> HasKeyMatcher {
    HasKeyMatcher::new(key)
}

impl<K, V> Matcher<ImmutableOpenMap<K, V>> for HasKeyMatcher
where
    K: Borrow<str> + Eq + Hash + Debug,
    V: Debug,
{
    fn matches(&self, actual: &ImmutableOpenMap<K, V>) -> bool {
        actual.contains_key(self.key.as_str())
    }

    fn describe_to(&self, description: &mut dyn Description) {
        description.append_text(&format!("ImmutableOpenMap should contain key {}", self.key));
    }

    fn describe_mismatch(
        &self,
        actual: &ImmutableOpenMap<K, V>,
        description: &mut dyn Description,
    ) {
        if actual.is_empty() {
            description.append_text("was empty");
        } else {
            description.append_text(" was ");
            description.append_value(actual);
        }
    }
}

/// A missing map never matches and is reported as `was null`
impl<'a, K, V> Matcher<Option<&'a ImmutableOpenMap<K, V>>> for HasKeyMatcher
where
    K: Borrow<str> + Eq + Hash + Debug,
    V: Debug,
{
    fn matches(&self, actual: &Option<&'a ImmutableOpenMap<K, V>>) -> bool {
        actual.is_some_and(|map| Matcher::<ImmutableOpenMap<K, V>>::matches(self, map))
    }

    fn describe_to(&self, description: &mut dyn Description) {
        Matcher::<ImmutableOpenMap<K, V>>::describe_to(self, description);
    }

    fn describe_mismatch(
        &self,
        actual: &Option<&'a ImmutableOpenMap<K, V>>,
        description: &mut dyn Description,
    ) {
        match actual {
            Some(map) => {
                Matcher::<ImmutableOpenMap<K, V>>::describe_mismatch(self, map, description);
            }
            None => description.append_text("was null"),
        }
    }
}
