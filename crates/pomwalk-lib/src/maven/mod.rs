//! # Maven Module
//!
//! Maven domain types: coordinates, the POM document model with its
//! inheritance rules, and the XML parser.
//!
//! ## Modules
//!
//! - [`coordinate`] - `group:artifact:version` identity and repository layout
//! - [`model`] - Parsed documents, parent-chain merge, property substitution
//! - [`parser`] - POM XML to [`PomDocument`]

pub mod coordinate;
pub mod model;
pub mod parser;

pub use coordinate::{ArtifactKind, Coordinate, MAVEN_CENTRAL_URL};
pub use model::{DependencyRef, PomDocument};
pub use parser::PomParser;
