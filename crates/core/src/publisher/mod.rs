//! Publisher module for uploading artifacts to durable storage.
//!
//! The `Publisher` trait uploads one finished local artifact under a
//! deterministic key. Uploads overwrite any existing object at the
//! key, which keeps retried attempts idempotent.

mod error;
mod s3;
mod traits;

pub use error::PublishError;
pub use s3::S3Publisher;
pub use traits::{PublishedArtifact, Publisher};
