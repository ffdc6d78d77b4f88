//! Process lifecycle.
//!
//! The server owns its accept loop; this module only coordinates shutdown
//! across it and any spawned tasks (the integration tests use the same seam).

pub mod shutdown;

pub use shutdown::Shutdown;
