use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::StoreSource;

#[derive(Debug, Default)]
pub struct Metrics {
    events_recorded: AtomicU64,
    events_rejected: AtomicU64,
    fallback_writes: AtomicU64,
    fallback_reads: AtomicU64,
    summary_requests: AtomicU64,
}

impl Metrics {
    pub fn record_event(&self, source: StoreSource) {
        self.events_recorded.fetch_add(1, Ordering::Relaxed);
        if source == StoreSource::Fallback {
            self.fallback_writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_rejected(&self) {
        self.events_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_read(&self, source: StoreSource) {
        self.summary_requests.fetch_add(1, Ordering::Relaxed);
        if source == StoreSource::Fallback {
            self.fallback_reads.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[cfg(test)]
    pub fn events_recorded(&self) -> u64 {
        self.events_recorded.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn fallback_writes(&self) -> u64 {
        self.fallback_writes.load(Ordering::Relaxed)
    }

    /// `fallback_events` is the current size of the process-local collection.
    pub fn render_prometheus(&self, fallback_events: usize) -> String {
        let recorded = self.events_recorded.load(Ordering::Relaxed);
        let rejected = self.events_rejected.load(Ordering::Relaxed);
        let fallback_writes = self.fallback_writes.load(Ordering::Relaxed);
        let fallback_reads = self.fallback_reads.load(Ordering::Relaxed);
        let reads = self.summary_requests.load(Ordering::Relaxed);

        format!(
            "# TYPE tryon_events_recorded_total counter\n\
tryon_events_recorded_total {}\n\
# TYPE tryon_events_rejected_total counter\n\
tryon_events_rejected_total {}\n\
# TYPE tryon_fallback_writes_total counter\n\
tryon_fallback_writes_total {}\n\
# TYPE tryon_reads_total counter\n\
tryon_reads_total {}\n\
# TYPE tryon_fallback_reads_total counter\n\
tryon_fallback_reads_total {}\n\
# TYPE tryon_fallback_events gauge\n\
tryon_fallback_events {}\n",
            recorded, rejected, fallback_writes, reads, fallback_reads, fallback_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_counters_only_move_for_fallback_source() {
        let metrics = Metrics::default();
        metrics.record_event(StoreSource::Durable);
        metrics.record_event(StoreSource::Fallback);
        metrics.record_read(StoreSource::Durable);
        metrics.record_rejected();

        assert_eq!(metrics.events_recorded(), 2);
        assert_eq!(metrics.fallback_writes(), 1);
        let text = metrics.render_prometheus(1);
        assert!(text.contains("tryon_events_recorded_total 2\n"));
        assert!(text.contains("tryon_events_rejected_total 1\n"));
        assert!(text.contains("tryon_fallback_reads_total 0\n"));
        assert!(text.contains("tryon_reads_total 1\n"));
        assert!(text.contains("tryon_fallback_events 1\n"));
    }
}
