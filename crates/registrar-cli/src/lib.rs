//! Interactive front end for the course-enrollment registry.
//!
//! The menu is deliberately thin: it parses input, resolves names through
//! the registry's lookups, and prints outcomes. All domain behavior lives
//! in `registrar-core`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod menu;

pub use menu::run;
