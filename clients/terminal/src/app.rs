use crate::event::{AppEvent, Event, EventHandler};
use crate::viewport::Viewport;
use color_eyre::eyre::WrapErr;
use pong_core::{Config, Event as GameEvent, Frame, Game, HeldKeys, InputEvent, Key};
use ratatui::{
    crossterm::{
        event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
        execute,
        terminal::SetTitle,
    },
    layout::{Constraint, Direction, Layout, Rect},
    DefaultTerminal,
};
use std::io::stdout;
use std::time::Instant;

/// Frames a key stays held after a press when release events are unavailable
const LATCH_TICKS: u8 = 8;

/// Movement key mapping for cleaner input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameKey {
    Player1Up,
    Player1Down,
    Player2Up,
    Player2Down,
}

fn map_keycode_to_game_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameKey::Player1Up),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameKey::Player1Down),
        KeyCode::Up => Some(GameKey::Player2Up),
        KeyCode::Down => Some(GameKey::Player2Down),
        _ => None,
    }
}

/// Common trait for one player's held movement keys
trait PlayerInput {
    fn handle_up(&mut self, pressed: bool);
    fn handle_down(&mut self, pressed: bool);
    /// (up, down) currently held
    fn held(&self) -> (bool, bool);
    fn reset(&mut self);
    fn update(&mut self) {} // Default no-op, overridden by latched input
}

/// Press/release tracking for terminals that report key releases
#[derive(Default)]
struct EnhancedPlayerInput {
    up_held: bool,
    down_held: bool,
}

impl PlayerInput for EnhancedPlayerInput {
    fn handle_up(&mut self, pressed: bool) {
        self.up_held = pressed;
    }

    fn handle_down(&mut self, pressed: bool) {
        self.down_held = pressed;
    }

    fn held(&self) -> (bool, bool) {
        (self.up_held, self.down_held)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Press-only terminals: each press or auto-repeat holds the key for a few frames
#[derive(Default)]
struct LatchedPlayerInput {
    up_ticks: u8,
    down_ticks: u8,
}

impl PlayerInput for LatchedPlayerInput {
    fn handle_up(&mut self, pressed: bool) {
        if pressed {
            self.up_ticks = LATCH_TICKS;
            self.down_ticks = 0;
        }
    }

    fn handle_down(&mut self, pressed: bool) {
        if pressed {
            self.down_ticks = LATCH_TICKS;
            self.up_ticks = 0;
        }
    }

    fn held(&self) -> (bool, bool) {
        (self.up_ticks > 0, self.down_ticks > 0)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn update(&mut self) {
        self.up_ticks = self.up_ticks.saturating_sub(1);
        self.down_ticks = self.down_ticks.saturating_sub(1);
    }
}

/// Held-key state for both players, adapted to terminal capabilities
pub struct InputSystem {
    p1: Box<dyn PlayerInput>,
    p2: Box<dyn PlayerInput>,
    is_enhanced: bool,
}

impl InputSystem {
    fn new(is_enhanced: bool) -> Self {
        if is_enhanced {
            Self {
                p1: Box::new(EnhancedPlayerInput::default()),
                p2: Box::new(EnhancedPlayerInput::default()),
                is_enhanced: true,
            }
        } else {
            Self {
                p1: Box::new(LatchedPlayerInput::default()),
                p2: Box::new(LatchedPlayerInput::default()),
                is_enhanced: false,
            }
        }
    }

    pub fn get_mode_description(&self) -> &'static str {
        if self.is_enhanced {
            "Enhanced (Hold keys)"
        } else {
            "Latched (Tap or hold keys)"
        }
    }

    fn held_keys(&self) -> HeldKeys {
        let (left_up, left_down) = self.p1.held();
        let (right_up, right_down) = self.p2.held();
        HeldKeys {
            left_up,
            left_down,
            right_up,
            right_down,
        }
    }

    fn reset(&mut self) {
        self.p1.reset();
        self.p2.reset();
    }

    /// Returns false when the key is not a movement key
    fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        let Some(game_key) = map_keycode_to_game_key(event.code) else {
            return false;
        };
        let pressed = matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        match game_key {
            GameKey::Player1Up => self.p1.handle_up(pressed),
            GameKey::Player1Down => self.p1.handle_down(pressed),
            GameKey::Player2Up => self.p2.handle_up(pressed),
            GameKey::Player2Down => self.p2.handle_down(pressed),
        }
        true
    }

    fn update(&mut self) {
        self.p1.update();
        self.p2.update();
    }
}

/// Terminal size below which the court is not drawn
pub const MIN_GAME_WIDTH: u16 = 40;
pub const MIN_GAME_HEIGHT: u16 = 21;

/// Split the screen into header, court and controls
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and status
            Constraint::Min(10),   // Court
            Constraint::Length(1), // Controls
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Main application
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Game instance
    pub game: Game,
    /// Held movement keys
    pub input_system: InputSystem,
    /// Last game tick
    pub last_tick: Instant,
    /// Event handler
    pub events: EventHandler,
    /// Current terminal size
    pub terminal_size: (u16, u16),
    /// Whether the game is paused due to a small terminal
    pub ui_paused: bool,
    /// Terminal cells the court is drawn into
    pub viewport: Viewport,
    /// Title last written to the terminal window
    window_title: String,
}

impl App {
    /// Constructs a new instance of App
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let game = Game::new(config).wrap_err("invalid configuration")?;
        let events = EventHandler::new(game.config.tick_hz)?;
        let input_system = InputSystem::new(events.keyboard_enhanced());
        log::info!("input mode: {}", input_system.get_mode_description());

        let mut app = Self {
            running: true,
            game,
            input_system,
            last_tick: Instant::now(),
            events,
            terminal_size: (80, 24), // Default size
            ui_paused: false,
            viewport: Viewport::default(),
            window_title: String::new(),
        };

        let (width, height) = ratatui::crossterm::terminal::size()?;
        app.handle_resize(width, height);
        Ok(app)
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick(),
            Event::Crossterm(event) => match event {
                ratatui::crossterm::event::Event::Key(key_event) => {
                    self.handle_key_event(key_event)
                }
                ratatui::crossterm::event::Event::Mouse(mouse_event) => {
                    self.handle_mouse_event(mouse_event)
                }
                _ => {}
            },
            Event::App(app_event) => self.handle_app_event(app_event),
        }
        Ok(())
    }

    /// Handle key events: movement keys update held state, the rest become game input
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.input_system.handle_key_event(key_event) {
            return;
        }
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c') | KeyCode::Char('C')
                if key_event.modifiers == KeyModifiers::CONTROL =>
            {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Esc => {
                self.input_system.reset();
                self.game.push_event(InputEvent::Key(Key::Escape));
            }
            KeyCode::Char(' ') => self.game.push_event(InputEvent::Key(Key::TogglePlay)),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.game.push_event(InputEvent::Key(Key::ToggleTall))
            }
            _ => {}
        }
    }

    /// Pointer moves and left clicks inside the court
    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let Some(pointer) = self.viewport.to_court(mouse_event.column, mouse_event.row) else {
            return;
        };

        match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.game.push_event(InputEvent::PointerMoved(pointer));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.game.push_event(InputEvent::PointerMoved(pointer));
                self.game.push_event(InputEvent::Click);
            }
            _ => {}
        }
    }

    /// Handle application events
    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::TerminalResize(width, height) => self.handle_resize(width, height),
        }
    }

    /// Handle tick event for game updates
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.ui_paused {
            return;
        }

        let frame = Frame::new(dt, self.input_system.held_keys());
        for event in self.game.step(&frame) {
            match event {
                GameEvent::PointScored { scorer, score } => {
                    log::info!("{:?} scored: {} - {}", scorer, score[0], score[1])
                }
                GameEvent::ModeChanged { to, .. } => {
                    log::info!("page: {:?}", to);
                    self.input_system.reset();
                }
                GameEvent::SpeedRamped(speeds) => log::debug!("speeds now {:?}", speeds),
                GameEvent::ActiveChanged(active) => log::debug!("active: {}", active),
            }
        }
        self.input_system.update();
        self.sync_window_title();
    }

    /// Mirror the game title onto the terminal window
    fn sync_window_title(&mut self) {
        let title = self.game.title();
        if title != self.window_title {
            if let Err(e) = execute!(stdout(), SetTitle(&title)) {
                log::debug!("could not set window title: {e}");
            }
            self.window_title = title;
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }

    // Terminal size management
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);

        // Check if terminal is large enough for game
        self.ui_paused = width < MIN_GAME_WIDTH || height < MIN_GAME_HEIGHT;

        let [_, court, _] = screen_layout(Rect::new(0, 0, width, height));
        self.viewport = Viewport::new(court);
        let (court_width, court_height) = self.viewport.court_size();
        self.game.push_event(InputEvent::Resize {
            width: court_width,
            height: court_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_enhanced_input_tracks_release() {
        let mut input = InputSystem::new(true);
        input.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Press));
        input.handle_key_event(key(KeyCode::Down, KeyEventKind::Press));

        let held = input.held_keys();
        assert!(held.left_up && held.right_down);
        assert!(!held.left_down && !held.right_up);

        input.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Release));
        assert!(!input.held_keys().left_up);
    }

    #[test]
    fn test_latched_input_expires() {
        let mut input = InputSystem::new(false);
        input.handle_key_event(key(KeyCode::Char('s'), KeyEventKind::Press));

        for _ in 0..LATCH_TICKS {
            assert!(input.held_keys().left_down);
            input.update();
        }
        assert!(!input.held_keys().left_down);
    }

    #[test]
    fn test_latched_opposite_key_cancels() {
        let mut input = InputSystem::new(false);
        input.handle_key_event(key(KeyCode::Up, KeyEventKind::Press));
        input.handle_key_event(key(KeyCode::Down, KeyEventKind::Press));

        let held = input.held_keys();
        assert!(!held.right_up);
        assert!(held.right_down);
    }

    #[test]
    fn test_non_movement_keys_pass_through() {
        let mut input = InputSystem::new(true);
        assert!(!input.handle_key_event(key(KeyCode::Esc, KeyEventKind::Press)));
        assert!(!input.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Press)));
        assert_eq!(input.held_keys(), HeldKeys::none());
    }

    #[test]
    fn test_screen_layout() {
        let [header, court, controls] = screen_layout(Rect::new(0, 0, 80, 34));

        assert_eq!(header.height, 3);
        assert_eq!(court, Rect::new(0, 3, 80, 30));
        assert_eq!(controls.y, 33);
    }
}
