//! Fixed-step frame driver
//!
//! Stands in for the host scene: accumulates frame time into fixed
//! simulation steps, fires the looped spawn timers, and optionally plays the
//! game itself (demo mode).

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{EntityClass, GameEvent, GameSession, IntervalTimer};

/// Minimum ticks between autoplay bombs
const AUTOPLAY_COOLDOWN_TICKS: u32 = 20;

pub struct Runner {
    session: GameSession,
    cloud_timer: IntervalTimer,
    croc_timer: IntervalTimer,
    accumulator: f32,
    /// Demo mode - drop bombs automatically
    pub autoplay: bool,
    bomb_cooldown: u32,
    high_scores: HighScores,
}

impl Runner {
    /// Runner with timers taken from the settings' tuning
    pub fn new(settings: Settings) -> Self {
        Self {
            cloud_timer: IntervalTimer::new(settings.tuning.cloud_interval_ms),
            croc_timer: IntervalTimer::new(settings.tuning.croc_interval_ms),
            session: GameSession::new(settings),
            accumulator: 0.0,
            autoplay: false,
            bomb_cooldown: 0,
            high_scores: HighScores::new(),
        }
    }

    /// Start from a previously saved leaderboard
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    /// Run as many fixed steps as `dt` seconds of wall time allow and return
    /// the events they produced
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        // max/min rather than clamp: a NaN frame time must not poison the
        // accumulator
        let dt = dt.max(0.0).min(0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            events.extend(self.session.drain_events());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in &events {
            if let GameEvent::GameOver { final_score } = *event {
                let ticks = self.session.state().time_ticks;
                self.high_scores.add_score(final_score, ticks);
            }
        }
        events
    }

    /// One fixed step: timers, autoplay, then the simulation tick
    fn step(&mut self) {
        let dt_ms = f64::from(SIM_DT) * 1000.0;
        for _ in 0..self.cloud_timer.advance(dt_ms) {
            self.session.on_cloud_spawn_timer();
        }
        for _ in 0..self.croc_timer.advance(dt_ms) {
            self.session.on_croc_spawn_timer();
        }

        if self.autoplay {
            self.bomb_cooldown = self.bomb_cooldown.saturating_sub(1);
            if self.bomb_cooldown == 0 && self.should_drop() {
                self.session.drop_bomb_from_goose();
                self.bomb_cooldown = AUTOPLAY_COOLDOWN_TICKS;
            }
        }

        self.session.on_tick(SIM_DT);
    }

    /// Will some crocodile be under the goose when a bomb dropped now
    /// reaches the river?
    fn should_drop(&self) -> bool {
        let session = &self.session;
        if session.snapshot().game_over {
            return false;
        }
        let origin = session.bomb_origin();
        let bomb_speed = session.settings().tuning.bomb_speed.max(1.0);

        session
            .pool()
            .iter_active(EntityClass::Crocodile)
            .any(|croc| {
                let fall_time = (croc.pos.y - origin.y).max(0.0) / bomb_speed;
                let future_x = croc.pos.x + croc.vel.x * fall_time;
                (future_x - origin.x).abs() < croc.size.x * 0.3
            })
    }

    /// Restart the session and its timers
    pub fn restart(&mut self) {
        self.session.restart();
        self.cloud_timer.reset();
        self.croc_timer.reset();
        self.accumulator = 0.0;
        self.bomb_cooldown = 0;
    }

    /// The driven session (read-only)
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Leaderboard including sessions finished by this runner
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Screen;

    fn runner(seed: u64) -> Runner {
        let mut settings = Settings::default().with_seed(seed);
        settings.screen = Screen {
            width: 800.0,
            height: 600.0,
        };
        Runner::new(settings)
    }

    #[test]
    fn test_timers_spawn_on_schedule() {
        let mut r = runner(1);
        // Just under one second: nothing yet
        for _ in 0..59 {
            r.frame(SIM_DT);
        }
        assert_eq!(r.session().pool().count_active(EntityClass::Crocodile), 0);

        let events = r.frame(SIM_DT * 1.01);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Spawned {
                class: EntityClass::Crocodile,
                ..
            }
        )));
        assert_eq!(r.session().pool().count_active(EntityClass::Cloud), 0);

        for _ in 0..31 {
            r.frame(SIM_DT);
        }
        assert_eq!(r.session().pool().count_active(EntityClass::Cloud), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut r = runner(2);
        // A stalled frame only catches up 100 ms
        r.frame(10.0);
        let ticks = r.session().state().time_ticks;
        assert!((5..=6).contains(&ticks), "ran {} ticks", ticks);
    }

    #[test]
    fn test_bad_frame_times_do_not_stall() {
        let mut r = runner(6);
        r.frame(f32::NAN);
        r.frame(f32::NEG_INFINITY);
        r.frame(-1.0);
        for _ in 0..120 {
            r.frame(SIM_DT);
        }
        assert_eq!(r.session().state().time_ticks, 120);
        assert!(r.session().pool().count_active(EntityClass::Crocodile) > 0);
    }

    #[test]
    fn test_unattended_game_ends_and_records() {
        let mut r = runner(3);
        let mut over = false;
        for _ in 0..(60 * 60) {
            let events = r.frame(SIM_DT);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                over = true;
                break;
            }
        }
        assert!(over, "crocodiles should escape without a player");
        assert_eq!(r.session().snapshot().score, 0);
        // A zero score never makes the board
        assert!(r.high_scores().is_empty());
    }

    #[test]
    fn test_autoplay_scores() {
        let mut r = runner(4);
        r.autoplay = true;
        for _ in 0..(60 * 30) {
            r.frame(SIM_DT);
        }
        assert!(r.session().snapshot().score > 0);
    }

    #[test]
    fn test_restart_resets_timers() {
        let mut r = runner(5);
        for _ in 0..50 {
            r.frame(SIM_DT);
        }
        r.restart();
        for _ in 0..50 {
            r.frame(SIM_DT);
        }
        assert_eq!(r.session().pool().count_active(EntityClass::Crocodile), 0);
    }
}
