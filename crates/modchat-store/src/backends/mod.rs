//! Gateway implementations
//!
//! Each backend implements the same `Gateway` port; the application picks one
//! at startup and every component receives it by constructor injection.

mod fallback;
mod file;
mod memory;

pub use fallback::FallbackGateway;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Broadcast channel capacity shared by all backends.
///
/// Subscribers that fall further behind than this skip events instead of
/// stalling writers.
pub(crate) const EVENT_CAPACITY: usize = 256;
