use std::time::Duration;

/// Converts variable frame time into a whole number of fixed updates.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_steps: u32,
}

impl FixedTimestep {
    /// `step` is the fixed update length in seconds.
    pub fn new(step: f64, max_steps: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Leftover time not yet consumed by a fixed update.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Add `elapsed` seconds and return how many fixed updates are due.
    ///
    /// At most `max_steps` are returned; time beyond that is dropped so a
    /// long stall cannot snowball into ever longer frames.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }
        let mut steps = 0;
        while self.accumulator >= self.step {
            if steps == self.max_steps {
                let dropped = self.accumulator;
                self.accumulator %= self.step;
                tracing::debug!(dropped = dropped - self.accumulator, "fixed updates behind, dropping time");
                break;
            }
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}

/// Frame time tracker for instrumentation.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    /// `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        let count = if self.filled { self.capacity } else { self.index };
        &self.history[..count]
    }

    pub fn average(&self) -> Duration {
        let recorded = self.recorded();
        if recorded.is_empty() {
            return Duration::ZERO;
        }
        recorded.iter().sum::<Duration>() / recorded.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        self.recorded().len()
    }

    /// Frames per second over the recorded window, 0 if nothing measurable.
    pub fn fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}
