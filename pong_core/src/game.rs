//! Main game logic and state management.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, ConfigError};
use crate::input::{Frame, HeldKeys, InputEvent, InputQueue, Key};
use crate::menu::{self, MENU_ITEMS};
use crate::physics::Physics;
use crate::ramp::DifficultyRamp;
use crate::types::*;

/// Main game state and logic
pub struct Game {
    pub config: Config,
    pub tick: Tick,
    pub mode: Mode,
    /// Match is running (not paused)
    pub active: bool,
    pub court: Court,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub score: [u32; 2],
    pub speeds: Speeds,
    /// Active frames left before the ball moves again
    pub serve_delay: u16,
    pub pointer: Vec2,
    pub hovered: Option<usize>,
    ramp: DifficultyRamp,
    rng: StdRng,
    queue: InputQueue,
}

impl Game {
    /// Create a new game at the start menu.
    ///
    /// The config is validated first, so every random draw range is non-empty.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let court = config.court(config.court_width, config.court_height);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dir = Physics::serve_direction(&mut rng, &config);

        Ok(Game {
            config,
            tick: 0,
            mode: Mode::Menu,
            active: false,
            court,
            paddles: [
                Physics::default_paddle(Side::Left, &court, &config),
                Physics::default_paddle(Side::Right, &court, &config),
            ],
            ball: Ball::new(court.center(), dir, config.ball_radius),
            score: [0, 0],
            speeds: config.initial_speeds(),
            serve_delay: 0,
            pointer: Vec2::zero(),
            hovered: None,
            ramp: DifficultyRamp::new(config.ramp_interval()),
            rng,
            queue: InputQueue::new(),
        })
    }

    /// Queue an input event for the next step
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Step the game forward by one frame.
    ///
    /// Queued input is applied first, then the difficulty ramp advances by
    /// `frame.dt`, then the ball, AI and human paddles move if a match is running.
    pub fn step(&mut self, frame: &Frame) -> Vec<Event> {
        let mut events = Vec::new();

        while let Some(input) = self.queue.pop() {
            self.apply_input(input, &mut events);
        }

        for _ in 0..self.ramp.advance(frame.dt) {
            self.speeds.ramp(self.mode, &self.config);
            log::debug!(
                "speed ramp: ball {:.1}, paddles {:.2}/{:.2}",
                self.speeds.ball,
                self.speeds.left_paddle,
                self.speeds.right_paddle
            );
            events.push(Event::SpeedRamped(self.speeds));
        }

        if self.mode.is_match() && self.active {
            self.update_ball(&mut events);
            self.update_players(&frame.held);
        }

        self.tick = self.tick.wrapping_add(1);
        events
    }

    fn apply_input(&mut self, input: InputEvent, events: &mut Vec<Event>) {
        match input {
            InputEvent::Key(Key::Escape) => {
                self.set_mode(Mode::Menu, events);
                self.reset_match();
            }
            InputEvent::Key(Key::TogglePlay) => {
                if self.mode.is_match() {
                    self.active = !self.active;
                    events.push(Event::ActiveChanged(self.active));
                }
            }
            InputEvent::Key(Key::ToggleTall) => {
                if self.mode.is_match() {
                    self.toggle_tall(Side::Left);
                    if self.mode == Mode::TwoPlayer {
                        self.toggle_tall(Side::Right);
                    }
                }
            }
            InputEvent::PointerMoved(pointer) => {
                self.pointer = pointer;
                self.hovered = match self.mode {
                    Mode::Menu => menu::hit_test(&self.court, &self.config, pointer),
                    _ => None,
                };
            }
            InputEvent::Click => {
                if self.mode == Mode::Menu {
                    if let Some(index) = menu::hit_test(&self.court, &self.config, self.pointer) {
                        self.set_mode(MENU_ITEMS[index].target, events);
                    }
                }
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    fn set_mode(&mut self, mode: Mode, events: &mut Vec<Event>) {
        if self.mode == mode {
            return;
        }

        log::info!("mode {:?} -> {:?}", self.mode, mode);
        events.push(Event::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
        self.hovered = None;
    }

    /// Advance the ball one frame and let the computer chase it
    fn update_ball(&mut self, events: &mut Vec<Event>) {
        if self.serve_delay > 0 {
            self.serve_delay -= 1;
            return;
        }
        self.ramp.start();

        let edge = Physics::leading_edge(&self.ball);

        if self
            .paddles
            .iter()
            .any(|paddle| Physics::hits_paddle(edge, paddle))
        {
            self.ball.dir.x = Physics::bounce(self.ball.dir.x, &mut self.rng, &self.config);
        }

        if let Some(scorer) = Physics::wall_scorer(edge, &self.court) {
            self.handle_score(scorer);
            events.push(Event::PointScored {
                scorer,
                score: self.score,
            });
        } else {
            // Not on a scoring tick: the fresh serve direction must stay ±1
            if Physics::hits_top_or_bottom(edge, &self.court) {
                self.ball.dir.y = Physics::bounce(self.ball.dir.y, &mut self.rng, &self.config);
            }
            self.ball.pos = self.ball.pos + self.ball.dir * self.speeds.ball;
        }

        if self.mode == Mode::SinglePlayer {
            Physics::track_ball(
                &mut self.paddles[1],
                edge.y,
                self.speeds.right_paddle,
                &self.court,
            );
        }
    }

    /// Move the human-controlled paddles
    fn update_players(&mut self, held: &HeldKeys) {
        for direction in held.left_moves() {
            Physics::move_paddle(
                &mut self.paddles[0],
                direction,
                self.speeds.left_paddle,
                &self.court,
            );
        }

        if self.mode == Mode::TwoPlayer {
            // Both players share the left paddle's speed
            self.speeds.right_paddle = self.speeds.left_paddle;
            for direction in held.right_moves() {
                Physics::move_paddle(
                    &mut self.paddles[1],
                    direction,
                    self.speeds.right_paddle,
                    &self.court,
                );
            }
        }
    }

    fn toggle_tall(&mut self, side: Side) {
        let paddle = &mut self.paddles[side.index()];
        *paddle = if Physics::is_tall(paddle, &self.config) {
            Physics::default_paddle(side, &self.court, &self.config)
        } else {
            Physics::tall_paddle(side, &self.court, &self.config)
        };
    }

    /// Handle a scoring event
    fn handle_score(&mut self, scorer: Side) {
        self.score[scorer.index()] += 1;
        log::info!(
            "{:?} scores, {} - {}",
            scorer,
            self.score[0],
            self.score[1]
        );

        self.reset_for_serve();
        self.serve_delay = self.config.serve_delay_ticks;
    }

    /// Recompute court and paddle geometry for a new window size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.court = self.config.court(width, height);
        self.paddles = [
            Physics::default_paddle(Side::Left, &self.court, &self.config),
            Physics::default_paddle(Side::Right, &self.court, &self.config),
        ];
        if !self.mode.is_match() {
            self.ball.pos = self.court.center();
        }
        log::debug!("court resized to {}x{}", self.court.width, self.court.height);
    }

    /// Full reset back to a fresh match: scores, paddles, ball and speeds
    pub fn reset_match(&mut self) {
        self.active = false;
        self.score = [0, 0];
        self.serve_delay = 0;
        self.paddles = [
            Physics::default_paddle(Side::Left, &self.court, &self.config),
            Physics::default_paddle(Side::Right, &self.court, &self.config),
        ];
        self.reset_for_serve();
    }

    /// Re-centre the ball with a new direction and initial speeds, stopping the ramp
    fn reset_for_serve(&mut self) {
        self.ball.pos = self.court.center();
        self.ball.dir = Physics::serve_direction(&mut self.rng, &self.config);
        self.speeds = self.config.initial_speeds();
        self.ramp.stop();
    }

    /// Whether the difficulty ramp is currently timing
    pub fn ramp_running(&self) -> bool {
        self.ramp.is_running()
    }

    /// Pending input events
    pub fn queued_inputs(&self) -> usize {
        self.queue.len()
    }

    /// Generate a view of the current game state for rendering
    pub fn view(&self) -> View {
        View {
            tick: self.tick,
            mode: self.mode,
            active: self.active,
            serving: self.serve_delay > 0,
            court: self.court,
            border: self.court.border(),
            left_paddle: self.paddles[0].rect,
            right_paddle: self.paddles[1].rect,
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            ball_dir: self.ball.dir,
            speeds: self.speeds,
            score: self.score,
            hovered: self.hovered,
        }
    }

    /// Window title for the current page
    pub fn title(&self) -> String {
        let score = if self.active {
            format!(" : {} - {}", self.score[0], self.score[1])
        } else {
            String::new()
        };

        match self.mode {
            Mode::Menu => "Pong | Start Menu".to_string(),
            Mode::SinglePlayer => format!("Pong | Singleplayer{score}"),
            Mode::TwoPlayer => format!("Pong | Multiplayer{score}"),
            Mode::Instructions => "Pong | Instructions".to_string(),
        }
    }

    /// Check if the match is advancing
    pub fn is_active(&self) -> bool {
        self.mode.is_match() && self.active
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> &'static str {
        match self.mode {
            Mode::Menu => "Start menu",
            Mode::Instructions => "Instructions",
            _ if !self.active => "Paused",
            _ if self.serve_delay > 0 => "Point scored!",
            _ => "Playing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn seeded() -> Config {
        Config {
            seed: Some(0xC0FFEE),
            ..Config::default()
        }
    }

    fn playing(mode: Mode) -> Game {
        let mut game = Game::new(seeded()).unwrap();
        game.mode = mode;
        game.active = true;
        game
    }

    fn frame() -> Frame {
        Frame::at_hz(60)
    }

    #[test]
    fn test_rejects_empty_draw_ranges() {
        let serve = Config {
            serve_draw_min: 1,
            serve_draw_max: 0,
            ..seeded()
        };
        assert!(matches!(
            Game::new(serve),
            Err(ConfigError::EmptyRange("serve_draw"))
        ));

        let bounce = Config {
            bounce_tenths_min: 12,
            bounce_tenths_max: 12,
            ..seeded()
        };
        assert!(matches!(
            Game::new(bounce),
            Err(ConfigError::EmptyRange("bounce_tenths"))
        ));
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new(seeded()).unwrap();

        assert_eq!(game.tick, 0);
        assert_eq!(game.mode, Mode::Menu);
        assert!(!game.active);
        assert_eq!(game.score, [0, 0]);
        assert_eq!(game.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.ball.dir.x.abs(), 1.0);
        assert_eq!(game.paddles[0].rect, Rect::new(40.0, 220.0, 20.0, 160.0));
        assert_eq!(game.paddles[1].rect, Rect::new(740.0, 220.0, 20.0, 160.0));
        assert_eq!(game.speeds, game.config.initial_speeds());
    }

    #[test]
    fn test_paddle_collision_scenario() {
        let mut game = playing(Mode::TwoPlayer);
        game.paddles[0].rect = Rect::new(40.0, 160.0, 20.0, 160.0);
        game.ball.pos = Vec2::new(79.0, 200.0);
        game.ball.dir = Vec2::new(-1.0, 1.0);

        assert_eq!(Physics::leading_edge(&game.ball).x, 59.0);
        let events = game.step(&frame());

        assert!(events.is_empty());
        assert!(game.ball.dir.x > 0.0);
        assert!((0.8..1.2).contains(&game.ball.dir.x), "{}", game.ball.dir.x);
        assert_eq!(game.ball.dir.y, 1.0);
        assert_eq!(game.score, [0, 0]);
    }

    #[test]
    fn test_left_wall_scores_for_right() {
        let mut game = playing(Mode::TwoPlayer);
        game.score = [2, 5];
        game.ball.pos = Vec2::new(30.0, 300.0);
        game.ball.dir = Vec2::new(-1.0, 1.0);
        game.speeds.ball = 13.0;

        let events = game.step(&frame());

        assert_eq!(game.score, [2, 6]);
        assert_eq!(
            events,
            vec![Event::PointScored {
                scorer: Side::Right,
                score: [2, 6]
            }]
        );
        assert_eq!(game.ball.pos, game.court.center());
        assert_eq!(game.speeds.ball, game.config.ball_speed);
        assert_eq!(game.serve_delay, game.config.serve_delay_ticks);
        assert!(!game.ramp_running());
    }

    #[test]
    fn test_right_wall_scores_for_left() {
        let mut game = playing(Mode::SinglePlayer);
        game.ball.pos = Vec2::new(770.0, 300.0);
        game.ball.dir = Vec2::new(1.0, -1.0);

        game.step(&frame());

        assert_eq!(game.score, [1, 0]);
        assert_eq!(game.ball.pos, game.court.center());
    }

    #[test]
    fn test_corner_score_keeps_unit_serve() {
        let mut game = playing(Mode::TwoPlayer);
        // Leading edge reaches the left wall and the top border together
        game.ball.pos = Vec2::new(30.0, 35.0);
        game.ball.dir = Vec2::new(-1.0, -1.0);

        game.step(&frame());

        assert_eq!(game.score, [0, 1]);
        assert_eq!(game.ball.dir.x.abs(), 1.0);
        assert_eq!(game.ball.dir.y.abs(), 1.0);
    }

    #[test]
    fn test_serve_after_score() {
        let mut game = playing(Mode::TwoPlayer);
        game.ball.pos = Vec2::new(30.0, 300.0);
        game.ball.dir = Vec2::new(-1.0, 1.0);
        game.step(&frame());

        let center = game.court.center();
        for _ in 0..game.config.serve_delay_ticks {
            assert_eq!(game.status_string(), "Point scored!");
            game.step(&frame());
            assert_eq!(game.ball.pos, center);
        }
        assert!(!game.ramp_running());

        game.step(&frame());
        assert_ne!(game.ball.pos, center);
        assert!(game.ramp_running());
        assert_eq!(game.status_string(), "Playing");
    }

    #[test]
    fn test_paused_serve_delay_does_not_count() {
        let mut game = playing(Mode::TwoPlayer);
        game.serve_delay = 3;
        game.active = false;

        for _ in 0..10 {
            game.step(&frame());
        }

        assert_eq!(game.serve_delay, 3);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut game = playing(Mode::TwoPlayer);
        game.ball.pos = Vec2::new(400.0, 35.0);
        game.ball.dir = Vec2::new(1.0, -1.0);

        game.step(&frame());

        assert!(game.ball.dir.y > 0.0);
        assert!((0.8..1.2).contains(&game.ball.dir.y));
        assert_eq!(game.ball.dir.x, 1.0);
    }

    #[test]
    fn test_ramp_is_exact_at_any_frame_rate() {
        for hz in [60, 30] {
            let mut game = playing(Mode::TwoPlayer);
            let frame = Frame::at_hz(hz);
            let frames = 3 * 4 * u32::from(hz) + 10; // a little over 12 s

            let mut ramps = 0;
            for _ in 0..frames {
                let events = game.step(&frame);
                ramps += events
                    .iter()
                    .filter(|e| matches!(e, Event::SpeedRamped(_)))
                    .count();
                // Keep the rally alive
                game.ball.pos = game.court.center();
            }

            assert_eq!(ramps, 3, "at {hz} Hz");
            assert_eq!(game.speeds.ball, game.config.ball_speed + 3.0);
            assert_eq!(game.speeds.left_paddle, game.config.left_paddle_speed + 1.5);
        }
    }

    #[test]
    fn test_ramp_boosts_computer_paddle() {
        let mut game = playing(Mode::SinglePlayer);
        game.step(&frame());
        assert!(game.ramp_running());

        game.step(&Frame::new(Duration::from_millis(4000), HeldKeys::none()));

        assert!((game.speeds.right_paddle - 8.85).abs() < 1e-5);
    }

    #[test]
    fn test_inactive_match_is_frozen() {
        let held = HeldKeys {
            left_up: true,
            left_down: false,
            right_up: false,
            right_down: true,
        };

        for mode in [Mode::SinglePlayer, Mode::TwoPlayer, Mode::Menu] {
            let mut game = Game::new(seeded()).unwrap();
            game.mode = mode;
            let before = game.view();

            for _ in 0..100 {
                game.step(&Frame::new(Duration::from_millis(16), held));
            }

            let after = game.view();
            assert_eq!(after.ball_pos, before.ball_pos);
            assert_eq!(after.left_paddle, before.left_paddle);
            assert_eq!(after.right_paddle, before.right_paddle);
        }
    }

    #[test]
    fn test_player_paddles_two_player() {
        let mut game = playing(Mode::TwoPlayer);
        let held = HeldKeys {
            left_up: true,
            right_down: true,
            ..HeldKeys::none()
        };

        game.step(&Frame::new(Duration::from_millis(16), held));

        assert_eq!(game.paddles[0].rect.y, 220.0 - 12.0);
        // Right paddle moves at the left paddle's speed
        assert_eq!(game.paddles[1].rect.y, 220.0 + 12.0);
    }

    #[test]
    fn test_arrow_keys_ignored_against_computer() {
        let mut game = playing(Mode::SinglePlayer);
        // Ball level with the paddle midpoint keeps the AI still
        game.ball.pos = Vec2::new(400.0, 280.0);
        game.ball.dir = Vec2::new(1.0, 1.0);
        let held = HeldKeys {
            right_up: true,
            ..HeldKeys::none()
        };

        game.step(&Frame::new(Duration::from_millis(16), held));

        assert_eq!(game.paddles[1].rect.y, 220.0);
    }

    #[test]
    fn test_computer_chases_ball() {
        let mut game = playing(Mode::SinglePlayer);
        game.ball.pos = Vec2::new(400.0, 100.0);
        game.ball.dir = Vec2::new(1.0, -1.0);

        game.step(&frame());

        assert_eq!(game.paddles[1].rect.y, 220.0 - game.config.right_paddle_speed);
        assert_eq!(game.paddles[0].rect.y, 220.0);
    }

    #[test]
    fn test_escape_resets_match() {
        let mut game = playing(Mode::SinglePlayer);
        game.score = [3, 4];
        game.paddles[0].rect.y = 40.0;
        game.paddles[1].rect.y = 400.0;
        game.step(&frame());
        assert!(game.ramp_running());

        game.push_event(InputEvent::Key(Key::Escape));
        let events = game.step(&frame());

        assert_eq!(game.mode, Mode::Menu);
        assert_eq!(game.score, [0, 0]);
        assert!(!game.active);
        assert!(!game.ramp_running());
        assert_eq!(game.paddles[0].rect, Rect::new(40.0, 220.0, 20.0, 160.0));
        assert_eq!(game.paddles[1].rect, Rect::new(740.0, 220.0, 20.0, 160.0));
        assert_eq!(game.speeds, game.config.initial_speeds());
        assert_eq!(
            events,
            vec![Event::ModeChanged {
                from: Mode::SinglePlayer,
                to: Mode::Menu
            }]
        );
    }

    #[test]
    fn test_menu_click_selects_item() {
        let mut game = Game::new(seeded()).unwrap();

        game.push_event(InputEvent::PointerMoved(Vec2::new(400.0, 360.0)));
        game.step(&frame());
        assert_eq!(game.hovered, Some(1));

        game.push_event(InputEvent::Click);
        let events = game.step(&frame());

        assert_eq!(game.mode, Mode::TwoPlayer);
        assert_eq!(game.hovered, None);
        assert_eq!(
            events,
            vec![Event::ModeChanged {
                from: Mode::Menu,
                to: Mode::TwoPlayer
            }]
        );
    }

    #[test]
    fn test_click_outside_menu_items() {
        let mut game = Game::new(seeded()).unwrap();
        game.push_event(InputEvent::PointerMoved(Vec2::new(10.0, 10.0)));
        game.push_event(InputEvent::Click);
        let events = game.step(&frame());

        assert_eq!(game.mode, Mode::Menu);
        assert!(events.is_empty());

        // Clicks only navigate from the menu
        let mut game = playing(Mode::Instructions);
        game.push_event(InputEvent::PointerMoved(Vec2::new(400.0, 320.0)));
        game.push_event(InputEvent::Click);
        game.step(&frame());
        assert_eq!(game.mode, Mode::Instructions);
        assert_eq!(game.hovered, None);
    }

    #[test]
    fn test_inputs_apply_in_order() {
        let mut game = Game::new(seeded()).unwrap();
        game.push_event(InputEvent::PointerMoved(Vec2::new(400.0, 320.0)));
        game.push_event(InputEvent::Click);
        game.push_event(InputEvent::Key(Key::TogglePlay));
        assert_eq!(game.queued_inputs(), 3);

        let events = game.step(&frame());

        assert_eq!(game.queued_inputs(), 0);
        assert_eq!(game.mode, Mode::SinglePlayer);
        assert!(game.active);
        assert_eq!(events.last(), Some(&Event::ActiveChanged(true)));
    }

    #[test]
    fn test_toggle_play_only_in_match() {
        let mut game = Game::new(seeded()).unwrap();
        game.push_event(InputEvent::Key(Key::TogglePlay));
        game.step(&frame());
        assert!(!game.active);

        game.mode = Mode::TwoPlayer;
        game.push_event(InputEvent::Key(Key::TogglePlay));
        game.step(&frame());
        assert!(game.is_active());

        game.push_event(InputEvent::Key(Key::TogglePlay));
        game.step(&frame());
        assert!(!game.is_active());
    }

    #[test]
    fn test_toggle_tall() {
        let mut game = playing(Mode::SinglePlayer);
        game.push_event(InputEvent::Key(Key::ToggleTall));
        game.step(&frame());

        assert_eq!(game.paddles[0].rect, Rect::new(40.0, 20.0, 20.0, 560.0));
        assert_eq!(game.paddles[1].rect.height, 160.0);

        let mut game = playing(Mode::TwoPlayer);
        game.push_event(InputEvent::Key(Key::ToggleTall));
        game.step(&frame());
        assert_eq!(game.paddles[1].rect, Rect::new(740.0, 20.0, 20.0, 560.0));

        game.push_event(InputEvent::Key(Key::ToggleTall));
        game.step(&frame());
        assert_eq!(game.paddles[0].rect, Rect::new(40.0, 220.0, 20.0, 160.0));
        assert_eq!(game.paddles[1].rect, Rect::new(740.0, 220.0, 20.0, 160.0));
    }

    #[test]
    fn test_resize_recomputes_geometry() {
        let mut game = Game::new(seeded()).unwrap();
        game.push_event(InputEvent::Resize {
            width: 1000.0,
            height: 400.0,
        });
        game.step(&frame());

        assert_eq!(game.view().border[2], Vec2::new(980.0, 380.0));
        assert_eq!(game.paddles[0].rect, Rect::new(40.0, 120.0, 20.0, 160.0));
        assert_eq!(game.paddles[1].rect, Rect::new(940.0, 120.0, 20.0, 160.0));
        assert_eq!(game.ball.pos, Vec2::new(500.0, 200.0));

        game.resize(1.0, 1.0);
        let (min_width, min_height) = game.config.min_court_size();
        assert_eq!(game.court.width, min_width);
        assert_eq!(game.court.height, min_height);
    }

    #[test]
    fn test_title() {
        let mut game = Game::new(seeded()).unwrap();
        assert_eq!(game.title(), "Pong | Start Menu");

        game.mode = Mode::SinglePlayer;
        assert_eq!(game.title(), "Pong | Singleplayer");
        game.active = true;
        game.score = [3, 1];
        assert_eq!(game.title(), "Pong | Singleplayer : 3 - 1");

        game.mode = Mode::TwoPlayer;
        assert_eq!(game.title(), "Pong | Multiplayer : 3 - 1");

        game.mode = Mode::Instructions;
        assert_eq!(game.title(), "Pong | Instructions");
    }

    #[test]
    fn test_view_generation() {
        let game = Game::new(seeded()).unwrap();
        let view = game.view();

        assert_eq!(view.tick, game.tick);
        assert_eq!(view.mode, game.mode);
        assert_eq!(view.left_paddle, game.paddles[0].rect);
        assert_eq!(view.right_paddle, game.paddles[1].rect);
        assert_eq!(view.ball_pos, game.ball.pos);
        assert_eq!(view.ball_radius, 20.0);
        assert_eq!(view.score, game.score);
        assert!(!view.serving);
    }

    #[test]
    fn test_deterministic_simulation() {
        let mut game1 = playing(Mode::SinglePlayer);
        let mut game2 = playing(Mode::SinglePlayer);
        let held = HeldKeys {
            left_down: true,
            ..HeldKeys::none()
        };

        for _ in 0..600 {
            game1.step(&Frame::new(Duration::from_millis(16), held));
            game2.step(&Frame::new(Duration::from_millis(16), held));
        }

        assert_eq!(game1.view(), game2.view());
    }
}
