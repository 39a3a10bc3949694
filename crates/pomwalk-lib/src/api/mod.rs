//! # API Module
//!
//! Repository access and the resolution engine.
//!
//! ## Modules
//!
//! - [`repository`] - `PomFetcher` seam with live (HTTP) and mock clients
//! - [`source`] - Cache-or-fetch access to parsed documents
//! - [`resolver`] - Depth-first transitive resolution with cycle detection

pub mod repository;
pub mod resolver;
pub mod source;

pub use repository::{MavenRepositoryClient, PomFetcher};
#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockRepositoryClient;
pub use resolver::{DependencyResolver, ResolutionItem, ResolutionOutcome, ResolutionStream};
pub use source::MetadataSource;
