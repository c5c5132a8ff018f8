use std::time::Duration;

use pong_core::*;
use proptest::prelude::*;

fn seeded(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        ..Config::default()
    }
}

/// Drive a fresh game from the menu into a running match through the input queue
fn start_match(game: &mut Game, item: usize) {
    let court = game.court;
    let rect = menu::item_rect(&court, &game.config, item);
    let inside = Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);

    game.push_event(InputEvent::PointerMoved(inside));
    game.push_event(InputEvent::Click);
    game.push_event(InputEvent::Key(Key::TogglePlay));
    game.step(&Frame::at_hz(60));
}

fn held_keys() -> impl Strategy<Value = HeldKeys> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left_up, left_down, right_up, right_down)| HeldKeys {
            left_up,
            left_down,
            right_up,
            right_down,
        },
    )
}

fn assert_inside_border(game: &Game) {
    for paddle in &game.paddles {
        assert!(
            paddle.rect.top() >= game.court.border_top(),
            "{:?} above border",
            paddle
        );
        assert!(
            paddle.rect.bottom() <= game.court.border_bottom(),
            "{:?} below border",
            paddle
        );
    }
}

#[test]
fn test_full_match_flow() {
    let mut game = Game::new(seeded(7)).unwrap();
    start_match(&mut game, 0);

    assert_eq!(game.mode, Mode::SinglePlayer);
    assert!(game.is_active());

    // Let the computer play alone until someone scores
    let mut scored = None;
    for _ in 0..10_000 {
        let events = game.step(&Frame::at_hz(60));
        if let Some(Event::PointScored { scorer, score }) = events
            .into_iter()
            .find(|e| matches!(e, Event::PointScored { .. }))
        {
            scored = Some((scorer, score));
            break;
        }
    }

    let (scorer, score) = scored.expect("a point is scored eventually");
    assert_eq!(score[scorer.index()], 1);
    assert_eq!(score[scorer.opposite().index()], 0);
    assert_eq!(game.ball.pos, game.court.center());
    assert_eq!(game.speeds.ball, game.config.ball_speed);
    assert!(game.title().starts_with("Pong | Singleplayer : "));

    game.push_event(InputEvent::Key(Key::Escape));
    game.step(&Frame::at_hz(60));

    assert_eq!(game.mode, Mode::Menu);
    assert_eq!(game.score, [0, 0]);
    assert_eq!(game.title(), "Pong | Start Menu");
}

#[test]
fn test_instructions_page_round_trip() {
    let mut game = Game::new(seeded(1)).unwrap();
    start_match(&mut game, 2);

    assert_eq!(game.mode, Mode::Instructions);
    // Space does nothing outside a match
    assert!(!game.active);

    game.push_event(InputEvent::Key(Key::Escape));
    let events = game.step(&Frame::at_hz(60));

    assert_eq!(
        events,
        vec![Event::ModeChanged {
            from: Mode::Instructions,
            to: Mode::Menu
        }]
    );
}

#[test]
fn test_two_player_rally_on_tall_paddles() {
    let mut game = Game::new(seeded(3)).unwrap();
    start_match(&mut game, 1);
    game.push_event(InputEvent::Key(Key::ToggleTall));

    let mut bounces = 0;
    let mut last_dir = game.ball.dir.x;
    for _ in 0..600 {
        game.step(&Frame::at_hz(60));
        if game.ball.dir.x.signum() != last_dir.signum() {
            bounces += 1;
            assert!((0.8..1.2).contains(&game.ball.dir.x.abs()));
        }
        last_dir = game.ball.dir.x;
        assert_inside_border(&game);
    }

    assert!(bounces > 0);
}

proptest! {
    #[test]
    fn prop_paddles_stay_inside_border(
        seed in any::<u64>(),
        item in 0usize..2,
        frames in prop::collection::vec((held_keys(), 0u8..30), 1..300),
    ) {
        let mut game = Game::new(seeded(seed)).unwrap();
        start_match(&mut game, item);

        for (held, action) in frames {
            match action {
                0 => game.push_event(InputEvent::Key(Key::ToggleTall)),
                1 => game.push_event(InputEvent::Resize { width: 640.0, height: 360.0 }),
                2 => game.push_event(InputEvent::Resize { width: 800.0, height: 600.0 }),
                _ => {}
            }
            game.step(&Frame::new(Duration::from_millis(16), held));
            assert_inside_border(&game);
        }
    }

    #[test]
    fn prop_paused_match_is_frozen(
        seed in any::<u64>(),
        item in 0usize..2,
        frames in prop::collection::vec(held_keys(), 1..200),
    ) {
        let mut game = Game::new(seeded(seed)).unwrap();
        start_match(&mut game, item);
        game.push_event(InputEvent::Key(Key::TogglePlay));
        game.step(&Frame::at_hz(60));
        prop_assert!(!game.is_active());

        let before = game.view();
        for held in frames {
            game.step(&Frame::new(Duration::from_millis(16), held));
        }
        let after = game.view();

        prop_assert_eq!(after.ball_pos, before.ball_pos);
        prop_assert_eq!(after.left_paddle, before.left_paddle);
        prop_assert_eq!(after.right_paddle, before.right_paddle);
    }

    #[test]
    fn prop_ramp_is_frame_rate_independent(hz in 20u16..=144, intervals in 0u32..5) {
        let mut game = Game::new(seeded(11)).unwrap();
        start_match(&mut game, 1);
        let frame = Frame::at_hz(hz);

        // The first step starts the ramp; then 4n + 1 seconds of frames
        let frames = (4 * intervals + 1) * u32::from(hz);
        for _ in 0..frames {
            game.step(&frame);
            game.ball.pos = game.court.center();
        }

        let expected = game.config.ball_speed + intervals as f32 * game.config.ball_speed_increment;
        prop_assert_eq!(game.speeds.ball, expected);
    }
}
