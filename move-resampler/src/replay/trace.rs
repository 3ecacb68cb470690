//! Move Trace Format
//!
//! JSON serialization of a captured drag gesture: the raw move samples in
//! arrival order plus some metadata.

use crate::resample::MoveEvent;
use crate::routing::PointerSourceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current trace format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Trace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceMetadata {
    /// Trace name
    pub name: String,
    /// Device class the samples came from
    pub source: PointerSourceType,
    /// Capture time, if known
    pub recorded_at: Option<DateTime<Utc>>,
    /// Version of the trace format
    pub format_version: String,
}

impl TraceMetadata {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            source: PointerSourceType::Touchscreen,
            recorded_at: None,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A recorded drag gesture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveTrace {
    #[serde(default)]
    pub metadata: TraceMetadata,
    pub samples: Vec<MoveEvent>,
}

impl MoveTrace {
    pub fn new(name: String) -> Self {
        Self {
            metadata: TraceMetadata::new(name),
            samples: Vec::new(),
        }
    }

    /// Build a trace from `(time_us, x, y)` tuples
    pub fn from_points(name: &str, points: &[(i64, i32, i32)]) -> Self {
        let mut trace = Self::new(name.to_string());
        trace.samples = points
            .iter()
            .map(|&(t, x, y)| MoveEvent::new(t, x, y))
            .collect();
        trace
    }

    pub fn push(&mut self, event: MoveEvent) {
        self.samples.push(event);
    }

    /// Stamp the capture time
    pub fn mark_recorded(&mut self) {
        self.metadata.recorded_at = Some(Utc::now());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether sample times are non-decreasing
    pub fn is_sorted(&self) -> bool {
        self.samples.windows(2).all(|w| w[0].time_us <= w[1].time_us)
    }

    /// Time from first to last sample (µs)
    pub fn duration_us(&self) -> i64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.time_us.saturating_sub(first.time_us),
            _ => 0,
        }
    }

    /// Save trace to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load trace from a file.
    ///
    /// Logs a warning if the trace was saved with an unknown format version,
    /// but still attempts to use it.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: MoveTrace = serde_json::from_str(&content)?;
        if trace.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %trace.metadata.name,
                found = %trace.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Trace has different format version; some fields may use default values"
            );
        }
        Ok(trace)
    }
}
