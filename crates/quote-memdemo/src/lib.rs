//! quote-memdemo — bounded resource-holding demonstration.
//!
//! The core of the `/api/mock-memory` endpoint: a request allocates a
//! bounded amount of memory, registers it in a process-shared registry,
//! burns a fixed amount of CPU over it, holds it for a bounded duration
//! while a per-request task keeps the pages warm, then releases it.
//!
//! # Lifecycle
//!
//! ```text
//! validate params → allocate + commit pages → register (count snapshot)
//!   → checksum pass → spawn touch task → hold → stop task → unregister
//! ```
//!
//! The registry is injectable shared state rather than a process global,
//! so tests run against isolated instances.

pub mod demo;
pub mod params;
pub mod registry;

pub use demo::{DemoError, DemoReport, run_demo};
pub use params::{DemoParamError, DemoParams};
pub use registry::{AllocationRegistry, SharedBuffer};
