//! Synthetic test fixtures: random credential and image-post records written
//! to flat text files, and parsers that read them back as aligned columns.

pub mod config;
pub mod error;
pub mod fixture_file;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{CredentialConfig, FixtureConfig, PostConfig, SizeRange};
pub use error::{FixtureError, Result};
pub use models::{CredentialColumns, CredentialRecord, PostColumns, PostRecord};
pub use services::{CredentialService, PostService};
