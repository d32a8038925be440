//! Session store adapters.
//!
//! Implementations of the [`SessionStore`](lumin_application::SessionStore)
//! port:
//!
//! - [`JsonFileSessionStore`]: one pretty-printed JSON file per session
//! - [`InMemorySessionStore`]: process-local map, for tests and `--ephemeral`

mod json_file;
mod memory;

pub use json_file::JsonFileSessionStore;
pub use memory::InMemorySessionStore;
