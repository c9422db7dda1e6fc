//! # Open Map Matchers
//!
//! Assertion matchers for `ImmutableOpenMap`, an immutable hash map backed by an
//! open-addressed table with an adaptive probing step.
//!
//! The crate provides:
//!
//! - `ImmutableOpenMap` and its `ImmutableOpenMapBuilder`
//! - A small matcher protocol: the `Matcher` trait, the `Description` text sink,
//!   and the `check` / `assert_that` entry points
//! - `HasKeyMatcher`, which asserts that a map contains a key and explains the
//!   failure when it does not
//!
//! ## Basic Usage
//!
//! ```rust
//! use open_map_matchers::{assert_that, has_key, ImmutableOpenMap};
//!
//! let map = ImmutableOpenMap::builder()
//!     .put("region".to_string(), "eu-west-1")
//!     .put("zone".to_string(), "b")
//!     .build();
//!
//! assert_that(&map, &has_key("region"));
//! ```
//!
//! ## Reading a Failure
//!
//! ```rust
//! use open_map_matchers::{check, has_key, ImmutableOpenMap};
//!
//! let empty = ImmutableOpenMap::<String, u32>::empty();
//! let mismatch = check(&empty, &has_key("region")).unwrap_err();
//!
//! assert_eq!(mismatch.expected, "ImmutableOpenMap should contain key region");
//! assert_eq!(mismatch.actual, "was empty");
//!
//! let map = ImmutableOpenMap::builder().put("zone", 1).build();
//! let mismatch = check(&map, &has_key("region")).unwrap_err();
//!
//! assert_eq!(mismatch.actual, " was <{\"zone\": 1}>");
//! ```

/// Module implementing matchers for the crate's collections
mod collection_matchers;
/// Module implementing the description sinks matchers write into
mod description;
/// Module implementing the immutable map and its builder
mod immutable_open_map;
/// Module defining the matcher protocol and assertion entry points
mod matcher;
/// Module implementing the open-addressed table behind the map
mod open_table;

pub use collection_matchers::{has_key, HasKeyMatcher};
pub use description::{Description, StringDescription};
pub use immutable_open_map::{ImmutableOpenMap, ImmutableOpenMapBuilder};
pub use matcher::{assert_that, check, Matcher, Mismatch};
pub use open_table::Iter;
