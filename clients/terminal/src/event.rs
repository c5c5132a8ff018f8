use color_eyre::eyre::WrapErr;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    terminal::supports_keyboard_enhancement,
};
use std::{
    io::stdout,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Everything the main loop reacts to.
#[derive(Clone, Debug)]
pub enum Event {
    /// Time to step the game
    Tick,
    /// Raw key and mouse input
    Crossterm(CrosstermEvent),
    App(AppEvent),
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Quit,
    /// New terminal size in cells (columns, rows)
    TerminalResize(u16, u16),
}

/// Owns the terminal input modes and the channel fed by the reader thread.
///
/// Dropping it restores the keyboard and mouse modes; the reader thread
/// exits on its next send.
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    /// Terminal reports key releases
    keyboard_enhanced: bool,
}

impl EventHandler {
    /// Starts reading input and ticking at `tick_hz`. Raw mode must already be on.
    pub fn new(tick_hz: u16) -> color_eyre::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            queue!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        } else {
            log::warn!("keyboard enhancement unsupported, falling back to latched key presses");
        }
        execute!(stdout(), EnableMouseCapture).wrap_err("failed to enable mouse capture")?;

        let reader = InputReader {
            sender: sender.clone(),
            tick_interval: Duration::from_secs(1) / u32::from(tick_hz.max(1)),
        };
        thread::spawn(move || {
            if let Err(e) = reader.run() {
                log::error!("input reader stopped: {e}");
            }
        });

        Ok(Self {
            sender,
            receiver,
            keyboard_enhanced,
        })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Blocks until the next event
    pub fn next(&self) -> color_eyre::Result<Event> {
        Ok(self.receiver.recv()?)
    }

    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = queue!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Background loop: polls crossterm between ticks and forwards everything.
struct InputReader {
    sender: mpsc::Sender<Event>,
    tick_interval: Duration,
}

impl InputReader {
    fn run(self) -> color_eyre::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            if timeout == Duration::ZERO {
                last_tick = Instant::now();
                if !self.forward(Event::Tick) {
                    return Ok(());
                }
            }

            if event::poll(timeout).wrap_err("failed to poll for crossterm events")? {
                let event = match event::read().wrap_err("failed to read crossterm event")? {
                    CrosstermEvent::Resize(width, height) => {
                        Event::App(AppEvent::TerminalResize(width, height))
                    }
                    other => Event::Crossterm(other),
                };
                if !self.forward(event) {
                    return Ok(());
                }
            }
        }
    }

    /// False once the app has gone away
    fn forward(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}
