//! VIGIL Core — domain models, error taxonomy, result envelope, and the
//! trait interfaces of the external collaborators (session store,
//! configuration/directory store, time-series readings store).

pub mod envelope;
pub mod error;
pub mod models;
pub mod repository;

pub use envelope::OperationResult;
pub use error::{ErrorCode, FieldViolation, VigilError, VigilResult};
