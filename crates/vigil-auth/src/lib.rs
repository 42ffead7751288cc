//! VIGIL Auth — session verification with a concurrency-safe cache,
//! request-scoped context, and declarative per-operation authorization.

pub mod authority;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;

pub use authority::SessionAuthority;
pub use config::AuthConfig;
pub use context::{RequestScope, VerifiedContext};
pub use error::AuthError;
pub use gate::{OperationRegistry, OperationRequirement, RequestGate};
