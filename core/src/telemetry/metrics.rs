use std::sync::Mutex;

/// Running counters for a detection report run.
pub struct ReportMetrics {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames: usize,
    pub lines_written: usize,
    pub rows_skipped: usize,
    pub frame_errors: usize,
}

impl ReportMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_frame(&self, written: usize, skipped: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames += 1;
            metrics.lines_written += written;
            metrics.rows_skipped += skipped;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frame_errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for ReportMetrics {
    fn default() -> Self {
        Self::new()
    }
}
