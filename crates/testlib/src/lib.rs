//! Fixtures shared by the test suites of the workspace.

pub mod tokens;
