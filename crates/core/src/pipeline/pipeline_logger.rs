use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for transcription pipeline events.
///
/// Keeps the use case independent of where progress ends up (stderr via the
/// log crate, or nowhere in tests).
pub trait PipelineLogger: Send {
    /// Report window-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. segment count).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: progress and status lines through `log::info!`,
/// plus a per-stage timing summary at the end of the run.
pub struct ConsolePipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_windows: usize,
}

impl ConsolePipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_windows: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let windows = self.total_windows;
        let mut lines = Vec::new();

        lines.push(format!(
            "Transcription summary ({windows} windows, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:8.1}ms  total {total_ms:8.0}ms"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let last = values.last().copied().unwrap_or(0.0);
            lines.push(format!("  {name}: {last}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for ConsolePipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for ConsolePipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_windows = total;
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Transcribing window {current}/{total} ({pct:.0}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("inference", 5.0);
        logger.metric("segments", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = ConsolePipelineLogger::new();
        logger.timing("inference", 20.0);
        logger.timing("inference", 30.0);
        logger.timing("decode_audio", 5.0);

        let inference = logger.timings_for("inference").unwrap();
        assert_eq!(inference.len(), 2);
        assert!((inference[0] - 20.0).abs() < f64::EPSILON);
        assert!((inference[1] - 30.0).abs() < f64::EPSILON);

        let decode = logger.timings_for("decode_audio").unwrap();
        assert_eq!(decode.len(), 1);
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = ConsolePipelineLogger::new();
        logger.metric("segments", 3.0);
        logger.metric("segments", 4.0);
        assert_eq!(logger.metrics_for("segments").unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_summary_includes_stages_and_metrics() {
        let mut logger = ConsolePipelineLogger::new();
        logger.progress(3, 3);
        logger.timing("inference", 20.0);
        logger.timing("load_model", 300.0);
        logger.metric("segments", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Transcription summary (3 windows"));
        assert!(summary.contains("inference"));
        assert!(summary.contains("load_model"));
        assert!(summary.contains("segments: 2"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = ConsolePipelineLogger::new();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_total() {
        let mut logger = ConsolePipelineLogger::new();
        for i in 1..=4 {
            logger.progress(i, 4);
        }
        assert_eq!(logger.total_windows, 4);
    }
}
