//! VIGIL Store — in-memory implementations of the collaborator store
//! interfaces defined in `vigil-core`.
//!
//! The durable session, configuration, and time-series stores are
//! external systems; these adapters stand in for them in the server
//! binary and in integration tests.

mod directory;
mod readings;
mod session;

pub use directory::MemDirectoryStore;
pub use readings::MemReadingsStore;
pub use session::MemSessionStore;
