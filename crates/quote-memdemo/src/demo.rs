//! Demo orchestration: allocate → register → hold → unregister.

use std::collections::TryReserveError;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::params::DemoParams;
use crate::registry::{AllocationRegistry, SharedBuffer};

const MB: usize = 1024 * 1024;
/// Pattern writes land in page-sized chunks.
const FILL_CHUNK: usize = 4096;
/// Byte reads performed for the CPU-work checksum.
const CHECKSUM_READS: usize = 1_000_000;
/// Interval between buffer touches while holding.
const TOUCH_INTERVAL: Duration = Duration::from_secs(1);

/// Report returned by a completed demo run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub message: String,
    pub memory_mb: u64,
    pub duration_seconds: u64,
    /// Start of the run, RFC3339.
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    /// Active-entry count observed when this run registered its buffer.
    pub active_allocations: usize,
}

/// Failures inside a demo run. Validation errors never reach here.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to allocate {mb} MB: {source}")]
    Allocation {
        mb: u64,
        source: TryReserveError,
    },
}

/// Owns the periodic touch task for one request.
///
/// The task must never outlive its request: dropping the guard signals
/// shutdown and aborts the task, covering every exit path.
struct TouchGuard {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl TouchGuard {
    fn spawn(request_id: String, buffer: SharedBuffer) -> Self {
        let (shutdown, mut rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TOUCH_INTERVAL);
            // The first tick completes immediately; consume it so touches
            // start one interval after the hold begins.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let mut buf = buffer.lock().await;
                        if let Some(last) = buf.len().checked_sub(1) {
                            buf[0] = buf[0].wrapping_add(1);
                            buf[last] = buf[last].wrapping_add(1);
                        }
                    }
                    _ = rx.changed() => {
                        debug!(%request_id, "touch task shutting down");
                        break;
                    }
                }
            }
        });

        Self { handle, shutdown }
    }
}

impl Drop for TouchGuard {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        self.handle.abort();
    }
}

/// Run one demonstration: allocate and commit the requested buffer,
/// register it, perform the fixed CPU pass, hold for the requested
/// duration with a periodic touch task, then release everything.
///
/// The hold suspends only this task; concurrent runs share nothing but
/// the registry map, which is locked only for insert/remove/count.
pub async fn run_demo(
    registry: &AllocationRegistry,
    params: DemoParams,
) -> Result<DemoReport, DemoError> {
    let started_at = Utc::now();
    let request_id = request_id_now();

    info!(
        %request_id,
        memory_mb = params.memory_mb,
        duration_seconds = params.duration_secs,
        "mock-memory demo started"
    );

    let bytes = params.memory_mb as usize * MB;
    let buffer = materialize_buffer(bytes).map_err(|source| DemoError::Allocation {
        mb: params.memory_mb,
        source,
    })?;
    info!(%request_id, bytes, "demo buffer allocated");

    let buffer: SharedBuffer = Arc::new(Mutex::new(buffer));
    let active_allocations = registry.insert(&request_id, Arc::clone(&buffer)).await;

    {
        let buf = buffer.lock().await;
        let sum = checksum(&buf);
        debug!(%request_id, checksum = sum, "demo checksum computed");
    }

    let touch = TouchGuard::spawn(request_id.clone(), Arc::clone(&buffer));

    info!(
        %request_id,
        active_allocations,
        duration_seconds = params.duration_secs,
        "holding demo buffer"
    );
    tokio::time::sleep(Duration::from_secs(params.duration_secs)).await;

    drop(touch);
    registry.remove(&request_id).await;

    let remaining_allocations = registry.active().await;
    info!(
        %request_id,
        active_allocations = remaining_allocations,
        "mock-memory demo completed"
    );

    Ok(DemoReport {
        message: "Mock-memory demo completed successfully".to_string(),
        memory_mb: params.memory_mb,
        duration_seconds: params.duration_secs,
        timestamp: started_at,
        request_id,
        active_allocations,
    })
}

/// Allocate a buffer of exactly `bytes` bytes and commit its pages.
///
/// Reservation is fallible so allocator exhaustion stays a per-request
/// error. The pattern write (byte at offset `i` is `i % 256`, in
/// page-sized chunks) forces physical commitment — the allocation must be
/// observable to the platform, not a lazily-backed mapping.
fn materialize_buffer(bytes: usize) -> Result<Vec<u8>, TryReserveError> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer.try_reserve_exact(bytes)?;
    buffer.resize(bytes, 0);

    for (chunk_idx, chunk) in buffer.chunks_mut(FILL_CHUNK).enumerate() {
        let base = chunk_idx * FILL_CHUNK;
        for (offset, byte) in chunk.iter_mut().enumerate() {
            *byte = ((base + offset) % 256) as u8;
        }
    }

    Ok(buffer)
}

/// Fixed CPU work: `CHECKSUM_READS` byte reads, wrapping over the buffer.
fn checksum(buffer: &[u8]) -> u64 {
    if buffer.is_empty() {
        return 0;
    }

    let mut sum: u64 = 0;
    for i in 0..CHECKSUM_READS {
        sum = sum.wrapping_add(u64::from(buffer[i % buffer.len()]));
    }
    sum
}

/// Request id from the nanosecond UNIX timestamp — unique within the
/// process under normal clock resolution.
fn request_id_now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}
