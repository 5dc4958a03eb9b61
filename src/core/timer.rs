//! Self-contained timers for the streaming loop
//! Each timer accumulates delta time and decides when to act

use std::time::Duration;

/// Frame pacer - how long to sleep so a frame takes at least one interval
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    /// Pacer for a target rate; zero or negative disables pacing
    pub fn new(target_fps: f32) -> Self {
        let interval = if target_fps > 0.0 {
            Duration::from_secs_f32(1.0 / target_fps)
        } else {
            Duration::ZERO
        };
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Remaining sleep after spending `spent` on the current frame
    pub fn remaining(&self, spent: Duration) -> Option<Duration> {
        self.interval.checked_sub(spent).filter(|d| !d.is_zero())
    }
}

/// FPS meter - counts frames and reports the rate every interval
#[derive(Debug, Clone, Copy)]
pub struct FpsMeter {
    report_every: f32,
    elapsed: f32,
    frames: u32,
}

impl FpsMeter {
    /// Create meter reporting every `report_every` seconds
    pub fn new(report_every: f32) -> Self {
        Self {
            report_every,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Record time passing; returns the rate when a report is due
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.elapsed += delta;
        if self.elapsed >= self.report_every && self.elapsed > 0.0 {
            let fps = self.frames as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.frames = 0;
            Some(fps)
        } else {
            None
        }
    }

    /// Count one rendered frame
    pub fn frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacer_sleeps_the_rest_of_the_interval() {
        let pacer = FramePacer::new(10.0); // 100ms

        let rest = pacer.remaining(Duration::from_millis(30)).unwrap();
        assert!(rest >= Duration::from_millis(69) && rest <= Duration::from_millis(71));

        // Slow frame - no sleep
        assert_eq!(pacer.remaining(Duration::from_millis(150)), None);
    }

    #[test]
    fn pacer_disabled_for_zero_fps() {
        let pacer = FramePacer::new(0.0);
        assert_eq!(pacer.interval(), Duration::ZERO);
        assert_eq!(pacer.remaining(Duration::ZERO), None);
    }

    #[test]
    fn fps_meter_reports_after_interval() {
        let mut meter = FpsMeter::new(1.0);

        for _ in 0..3 {
            meter.frame();
            assert_eq!(meter.tick(0.25), None);
        }

        meter.frame();
        assert_eq!(meter.tick(0.25), Some(4.0));

        // Counters restart after a report
        assert_eq!(meter.tick(0.25), None);
    }
}
