use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Per-step durations of one inference run, in the order the steps ran.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `step` and records how long it took under `name`.
    pub fn time<T>(&mut self, name: &'static str, step: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let output = step();
        self.steps.push(StepTiming {
            name,
            duration: start.elapsed(),
        });
        output
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for step in &self.steps {
            let share = if total.is_zero() {
                0.0
            } else {
                step.duration.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            info!(
                step = step.name,
                ms = step.duration.as_secs_f64() * 1000.0,
                share = format_args!("{:.1}%", share),
                "Step timing"
            );
        }
        info!(ms = total.as_secs_f64() * 1000.0, "Round total");
    }
}
