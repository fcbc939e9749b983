#![deny(missing_docs)]
#![doc = "Shared error and provenance types for the contraction-mapping verifier."]

pub mod errors;
pub mod provenance;

pub use errors::{CmvError, ErrorInfo};
pub use provenance::{SchemaVersion, VerifyProvenance};
