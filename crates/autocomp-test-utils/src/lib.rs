//! Shared test utilities for the autocomp workspace.
//!
//! This crate provides standardised project fixtures so crate test suites do
//! not each rebuild temporary component trees by hand. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for component trees

pub mod project;

pub use project::TestProject;
