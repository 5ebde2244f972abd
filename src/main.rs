//! Bombombini headless demo
//!
//! Runs a session in autoplay mode until game over or the frame limit, then
//! logs the result.

use std::path::PathBuf;

use clap::Parser;

use bombombini::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, SIM_DT};
use bombombini::sim::GameEvent;
use bombombini::{HighScores, Profile, Runner, Settings};

#[derive(Parser, Debug)]
#[command(name = "bombombini")]
#[command(about = "Watch the goose bomb crocodiles (autoplay demo)")]
struct Args {
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames if the game is still running
    #[arg(long, default_value_t = 60 * 120)]
    frames: u32,

    /// Device profile: desktop or mobile
    #[arg(long, default_value = "desktop", value_parser = parse_profile)]
    profile: Profile,

    /// Settings JSON (replaces the profile defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// High score JSON, loaded at start and saved at exit
    #[arg(long)]
    scores: Option<PathBuf>,
}

fn parse_profile(s: &str) -> Result<Profile, String> {
    Profile::from_str(s)
        .ok_or_else(|| format!("unknown profile '{s}' (expected desktop or mobile)"))
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Bombombini (native) starting...");

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::for_profile(args.profile, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let high_scores = args
        .scores
        .as_deref()
        .map(HighScores::load)
        .unwrap_or_default();

    let mut runner = Runner::new(settings).with_high_scores(high_scores);
    runner.autoplay = true;

    for frame in 0..args.frames {
        let events = runner.frame(SIM_DT);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            log::info!("Game over after {} frames", frame + 1);
            break;
        }
    }

    let snapshot = runner.session().snapshot();
    println!(
        "Score: {}  Misses: {}  Game over: {}",
        snapshot.score, snapshot.misses, snapshot.game_over
    );
    if let Some(top) = runner.high_scores().top_score() {
        println!("Best: {}", top);
    }

    if let Some(path) = &args.scores {
        if let Err(e) = runner.high_scores().save(path) {
            log::error!("Failed to save high scores to {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bombombini"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.frames, 60 * 120);
        assert_eq!(args.profile, Profile::Desktop);
    }

    #[test]
    fn test_parses_flags() {
        let args = Args::try_parse_from([
            "bombombini",
            "--seed",
            "42",
            "--frames",
            "600",
            "--profile",
            "Mobile",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.frames, 600);
        assert_eq!(args.profile, Profile::Mobile);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["bombombini", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["bombombini", "--frames", "x"]).is_err());
        assert!(Args::try_parse_from(["bombombini", "--profile", "console"]).is_err());
    }
}
