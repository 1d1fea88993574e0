//! Fixtures for unit tests and doc tests
//!
//! There is no need to use this module, it only provides convenient
//! scaffolding for examples and tests.
