use crate::TimeSource;

/// Finishes once the scene spent `duration` milliseconds polling it.
///
/// Progress is counted in scene time (frame deltas), not wall-clock time, so
/// a paused scene pauses its waits and a restored wait resumes where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitTask {
    duration: f64,
    elapsed: f64,
}

impl WaitTask {
    pub fn new(duration_ms: f64) -> Self {
        Self::resumed(duration_ms, 0.0)
    }

    /// A wait that already accumulated `elapsed_ms`.
    ///
    /// Negative, NaN or infinite values are the ones a sync record rejects;
    /// here they are replaced by zero.
    pub fn resumed(duration_ms: f64, elapsed_ms: f64) -> Self {
        Self {
            duration: sanitize("duration", duration_ms),
            elapsed: sanitize("elapsed", elapsed_ms),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn poll<T: TimeSource + ?Sized>(&mut self, time: &T) -> bool {
        self.elapsed += time.elapsed_time_ms().max(0.0);
        self.is_finished()
    }

    pub(crate) fn set_progress(&mut self, duration: f64, elapsed: f64) {
        self.duration = duration;
        self.elapsed = elapsed;
    }
}

fn sanitize(field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("Invalid wait {} {}, using 0", field, value);
        0.0
    }
}
