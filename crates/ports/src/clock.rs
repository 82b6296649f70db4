// crates/ports/src/clock.rs
use std::time::Instant;

/// Monotonic time source; injected so debounce deadlines are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
