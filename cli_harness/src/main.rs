//! Headless harness for pong_core: plays matches with scripted players and
//! prints JSON snapshots of the game view.

use clap::Parser;
use color_eyre::eyre::WrapErr;
use pong_core::{
    menu, Config, Event, Frame, Game, HeldKeys, InputEvent, Key, Mode, Side, Vec2, View,
};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cli_harness", about = "Run pong_core without a screen")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Simulated frame rate (overrides the config file's tick_hz)
    #[arg(long)]
    fps: Option<u16>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Page to open: 0 menu, 1 vs computer, 2 vs player, 3 instructions
    #[arg(long, default_value_t = 1)]
    mode: u8,

    /// Print a snapshot every N frames (0 prints none)
    #[arg(long, default_value_t = 60)]
    every: u32,

    /// Start with tall paddles
    #[arg(long)]
    tall: bool,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Scripted player that keeps its paddle under the ball
struct Bot {
    side: Side,
    /// Tolerated distance from the paddle midpoint
    deadzone: f32,
}

impl Bot {
    fn new(side: Side) -> Self {
        Self {
            side,
            deadzone: 24.0,
        }
    }

    /// (up, down) keys for the current view
    fn keys(&self, view: &View) -> (bool, bool) {
        let paddle = match self.side {
            Side::Left => view.left_paddle,
            Side::Right => view.right_paddle,
        };
        let offset = view.ball_pos.y - paddle.center_y();

        if offset < -self.deadzone {
            (true, false)
        } else if offset > self.deadzone {
            (false, true)
        } else {
            (false, false)
        }
    }
}

#[derive(Debug, Default)]
struct Stats {
    points: [u32; 2],
    ramps: u32,
    top_ball_speed: f32,
}

/// Harness application state
struct Harness {
    game: Game,
    left: Bot,
    right: Option<Bot>,
    frame_dt: Duration,
    stats: Stats,
    running: Arc<AtomicBool>,
}

impl Harness {
    fn new(config: Config, args: &Args, running: Arc<AtomicBool>) -> color_eyre::Result<Self> {
        let mode = Mode::from_index(args.mode);
        let frame_dt = Frame::at_hz(config.tick_hz).dt;
        let mut game = Game::new(config).wrap_err("invalid configuration")?;
        open_page(&mut game, mode, args.tall);

        Ok(Self {
            game,
            left: Bot::new(Side::Left),
            // The computer owns the right paddle in single player
            right: (mode == Mode::TwoPlayer).then(|| Bot::new(Side::Right)),
            frame_dt,
            stats: Stats::default(),
            running,
        })
    }

    fn run(&mut self, frames: u32, every: u32) -> color_eyre::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        for _ in 0..frames {
            if !self.running.load(Ordering::SeqCst) {
                log::warn!("interrupted at tick {}", self.game.tick);
                break;
            }

            let view = self.game.view();
            let held = self.held_keys(&view);
            for event in self.game.step(&Frame::new(self.frame_dt, held)) {
                self.record(event);
            }

            if every > 0 && self.game.tick % every == 0 {
                let line = serde_json::to_string(&self.game.view())
                    .wrap_err("failed to encode snapshot")?;
                writeln!(out, "{line}").wrap_err("failed to write snapshot")?;
            }
        }

        let summary = json!({
            "ticks": self.game.tick,
            "mode": self.game.mode,
            "title": self.game.title(),
            "score": self.game.score,
            "points": self.stats.points,
            "ramps": self.stats.ramps,
            "top_ball_speed": self.stats.top_ball_speed,
        });
        writeln!(out, "{summary}").wrap_err("failed to write summary")?;
        Ok(())
    }

    fn held_keys(&self, view: &View) -> HeldKeys {
        let (left_up, left_down) = self.left.keys(view);
        let (right_up, right_down) = self
            .right
            .as_ref()
            .map_or((false, false), |bot| bot.keys(view));

        HeldKeys {
            left_up,
            left_down,
            right_up,
            right_down,
        }
    }

    fn record(&mut self, event: Event) {
        match event {
            Event::PointScored { scorer, score } => {
                self.stats.points[scorer.index()] += 1;
                log::info!(
                    "tick {}: {:?} scored ({} - {})",
                    self.game.tick,
                    scorer,
                    score[0],
                    score[1]
                );
            }
            Event::SpeedRamped(speeds) => {
                self.stats.ramps += 1;
                self.stats.top_ball_speed = self.stats.top_ball_speed.max(speeds.ball);
            }
            Event::ModeChanged { from, to } => log::debug!("mode {from:?} -> {to:?}"),
            Event::ActiveChanged(active) => log::debug!("active: {active}"),
        }
    }
}

/// Navigate from the start menu the way a player would: hover, click, start
fn open_page(game: &mut Game, mode: Mode, tall: bool) {
    let Some(index) = menu::MENU_ITEMS.iter().position(|item| item.target == mode) else {
        return;
    };

    let rect = menu::item_rect(&game.court, &game.config, index);
    game.push_event(InputEvent::PointerMoved(Vec2::new(
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    )));
    game.push_event(InputEvent::Click);
    if mode.is_match() {
        game.push_event(InputEvent::Key(Key::TogglePlay));
        if tall {
            game.push_event(InputEvent::Key(Key::ToggleTall));
        }
    }
}

fn load_config(args: &Args) -> color_eyre::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(fps) = args.fps {
        config.tick_hz = fps;
    }
    Ok(config)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .wrap_err("error setting Ctrl-C handler")?;

    log::info!(
        "simulating {} frames at {} Hz in {:?}",
        args.frames,
        config.tick_hz,
        Mode::from_index(args.mode)
    );

    let mut harness = Harness::new(config, &args, running)?;
    harness.run(args.frames, args.every)
}
