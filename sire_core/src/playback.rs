use std::time::Duration;

/// Walkthrough video transport: play/pause and progress.
#[derive(Debug, Clone)]
pub struct Playback {
    duration: Duration,
    position: Duration,
    playing: bool,
    ended: bool,
}

impl Playback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
            playing: false,
            ended: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Progress in percent. Unknown (zero) duration reads as not started.
    pub fn progress(&self) -> f64 {
        if self.ended {
            return 100.0;
        }
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64() * 100.0).min(100.0)
    }

    /// Play if paused (restarting when at the end), pause if playing
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.playing = false;
            tracing::debug!(position_ms = self.position.as_millis() as u64, "walkthrough paused");
        } else {
            if self.ended {
                self.position = Duration::ZERO;
                self.ended = false;
            }
            self.playing = true;
            tracing::debug!(position_ms = self.position.as_millis() as u64, "walkthrough playing");
        }
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.playing {
            return;
        }
        self.position = (self.position + dt).min(self.duration);
        if self.position >= self.duration {
            self.playing = false;
            self.ended = true;
        }
    }
}
