// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export the helpers exercised by the integration tests
pub use handlers::{local_timestamp, persist_report, resolve_output_basename, write_lines};
