//! Demo request parameter validation.
//!
//! Raw query values are validated here, before any side effect. Values
//! outside the bounds are rejected, never clamped.

use thiserror::Error;

/// Allocation size used when `memory_mb` is absent.
pub const DEFAULT_MEMORY_MB: u64 = 10;
/// Upper bound on a single allocation.
pub const MAX_MEMORY_MB: u64 = 1000;
/// Hold duration used when `duration_seconds` is absent.
pub const DEFAULT_DURATION_SECS: u64 = 10;
/// Upper bound on the hold duration.
pub const MAX_DURATION_SECS: u64 = 300;

/// A rejected demo parameter. Display gives the detail message; [`summary`]
/// gives the short label for the error body.
///
/// [`summary`]: DemoParamError::summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DemoParamError {
    #[error("memory_mb must be a positive integer")]
    InvalidMemory,

    #[error("memory_mb cannot exceed 1000MB (1GB)")]
    MemoryLimit,

    #[error("duration_seconds must be a positive integer")]
    InvalidDuration,

    #[error("duration_seconds cannot exceed 300 (5 minutes)")]
    DurationLimit,
}

impl DemoParamError {
    /// Short error label for the response body.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::InvalidMemory => "Invalid memory_mb parameter",
            Self::MemoryLimit => "Memory limit exceeded",
            Self::InvalidDuration => "Invalid duration_seconds parameter",
            Self::DurationLimit => "Duration limit exceeded",
        }
    }
}

/// Validated demo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoParams {
    pub memory_mb: u64,
    pub duration_secs: u64,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            memory_mb: DEFAULT_MEMORY_MB,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl DemoParams {
    /// Validate raw query values. Checked in order — `memory_mb` first —
    /// and the first failure wins.
    pub fn from_query(
        memory_mb: Option<&str>,
        duration_seconds: Option<&str>,
    ) -> Result<Self, DemoParamError> {
        let memory_mb = match memory_mb {
            None => DEFAULT_MEMORY_MB,
            Some(raw) => {
                let value: i64 = raw.trim().parse().map_err(|_| DemoParamError::InvalidMemory)?;
                if value <= 0 {
                    return Err(DemoParamError::InvalidMemory);
                }
                let value = value as u64;
                if value > MAX_MEMORY_MB {
                    return Err(DemoParamError::MemoryLimit);
                }
                value
            }
        };

        let duration_secs = match duration_seconds {
            None => DEFAULT_DURATION_SECS,
            Some(raw) => {
                let value: i64 = raw.trim().parse().map_err(|_| DemoParamError::InvalidDuration)?;
                if value <= 0 {
                    return Err(DemoParamError::InvalidDuration);
                }
                let value = value as u64;
                if value > MAX_DURATION_SECS {
                    return Err(DemoParamError::DurationLimit);
                }
                value
            }
        };

        Ok(Self {
            memory_mb,
            duration_secs,
        })
    }
}
