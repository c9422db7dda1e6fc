//! Text sinks that matchers describe themselves into

use std::fmt::{self, Debug, Display, Write};

/// Append-only builder for human-readable assertion messages.
///
/// Matchers only ever write to a description, they never read it back.
pub trait Description {
    /// Appends `text` verbatim
    fn append_text(&mut self, text: &str);

    /// Appends the `Debug` rendering of `value` wrapped in angle brackets
    fn append_value(&mut self, value: &dyn Debug);
}

/// A [`Description`] that accumulates into a `String`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDescription {
    /// Text appended so far
    buffer: String,
}

impl StringDescription {
    /// Creates an empty description
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text appended so far
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns true if nothing was appended
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consumes the description, returning its text
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Description for StringDescription {
    fn append_text(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn append_value(&mut self, value: &dyn Debug) {
        // Writing into a String cannot fail
        let _ = write!(self.buffer, "<{value:?}>");
    }
}

impl Display for StringDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_text_is_verbatim() {
        let mut description = StringDescription::new();
        assert!(description.is_empty());

        description.append_text("was ");
        description.append_text("empty");

        assert_eq!(description.as_str(), "was empty");
        assert_eq!(description.to_string(), "was empty");
    }

    #[test]
    fn test_append_value_wraps_debug_output() {
        let mut description = StringDescription::new();
        description.append_text(" was ");
        description.append_value(&vec![1, 2]);
        description.append_value(&"text");

        assert_eq!(description.into_string(), " was <[1, 2]><\"text\">");
    }
}
