use std::time::{Duration, Instant};

/// Per-process record of the rounds played. Kept in memory only.
pub struct SessionStats {
    round_started: Instant,
    pub round_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    pub last_score: Option<u32>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            round_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            last_score: None,
        }
    }

    /// Refresh the round clock; call while a round is running
    pub fn update(&mut self) {
        self.round_time = self.round_started.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_started = Instant::now();
        self.round_time = Duration::ZERO;
    }

    /// Count a finished round. Returns true when it set a new best.
    pub fn record_round(&mut self, final_score: u32) -> bool {
        self.rounds_played += 1;
        self.last_score = Some(final_score);
        if final_score > self.best_score {
            self.best_score = final_score;
            true
        } else {
            false
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
