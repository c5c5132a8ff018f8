use crate::app::{screen_layout, App, MIN_GAME_HEIGHT, MIN_GAME_WIDTH};
use pong_core::{menu, Mode, Rect as CourtRect, View};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Block, BorderType, Paragraph, Widget, Wrap,
    },
};

const INSTRUCTIONS: [&str; 5] = [
    "Welcome to Pong!",
    "Player 1 (left side) moves the paddle up and down with the W and S keys.",
    "In Player vs Player mode, Player 2 (right side) uses the UP and DOWN arrow keys.",
    "Use your mouse to navigate the menus and pages. H toggles full-height paddles.",
    "Press ESCAPE to return to the start menu at any time.",
];

/// Horizontal distance of each score from its edge, in court units
const SCORE_INSET: f32 = 200.0;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, court, controls] = screen_layout(area);

        self.render_header(header, buf);

        if self.ui_paused {
            self.render_too_small(area, buf);
            return;
        }

        let view = self.game.view();
        match view.mode {
            Mode::Menu => render_menu(self, &view, court, buf),
            Mode::Instructions => render_instructions(court, buf),
            Mode::SinglePlayer | Mode::TwoPlayer => render_court(&view, court, buf),
        }

        let controls_text = match view.mode {
            Mode::Menu => "Mouse: Select  Q: Quit",
            Mode::Instructions => "ESC: Menu  Q: Quit",
            Mode::SinglePlayer => "W/S: Move  H: Tall paddle  SPACE: Play/Pause  ESC: Menu  Q: Quit",
            Mode::TwoPlayer => {
                "P1: W/S  P2: ↑/↓  H: Tall paddles  SPACE: Play/Pause  ESC: Menu  Q: Quit"
            }
        };
        Paragraph::new(controls_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(controls, buf);
    }
}

impl App {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let status = format!(
            "{}    Input: {}",
            self.game.status_string(),
            self.input_system.get_mode_description()
        );

        Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(self.game.title())
                    .title_alignment(Alignment::Center),
            )
            .render(area, buf);
    }

    fn render_too_small(&self, area: Rect, buf: &mut Buffer) {
        let message = format!(
            "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}\n\nPlease resize your terminal to continue playing.",
            MIN_GAME_WIDTH, MIN_GAME_HEIGHT, self.terminal_size.0, self.terminal_size.1
        );

        Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Resize Required")
                    .title_alignment(Alignment::Center),
            )
            .render(area, buf);
    }
}

fn render_menu(app: &App, view: &View, area: Rect, buf: &mut Buffer) {
    let heading = Rect {
        y: area.y + area.height / 4,
        height: 1,
        ..area
    };
    Paragraph::new("P O N G")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .render(heading, buf);

    // Items sit where the pointer hit test expects them
    for (i, item) in menu::MENU_ITEMS.iter().enumerate() {
        let rect = menu::item_rect(&view.court, &app.game.config, i);
        let cells = app.viewport.to_cells(&rect);
        let style = if view.hovered == Some(i) {
            Style::default().fg(Color::Yellow).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        Paragraph::new(item.label)
            .style(style)
            .alignment(Alignment::Center)
            .render(cells, buf);
    }
}

fn render_instructions(area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::styled("Instructions", Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
    ];
    for text in INSTRUCTIONS {
        lines.push(Line::styled(text, Style::default().fg(Color::Magenta)));
        lines.push(Line::default());
    }

    let text_height = lines.len() as u16;
    let body = Rect {
        y: area.y + area.height.saturating_sub(text_height) / 2,
        height: text_height.min(area.height),
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(body, buf);
}

/// Court drawing in court units; the canvas y axis points up so every y is flipped
fn render_court(view: &View, area: Rect, buf: &mut Buffer) {
    let width = f64::from(view.court.width);
    let height = f64::from(view.court.height);
    let flip = |y: f32| height - f64::from(y);

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for (i, from) in view.border.iter().enumerate() {
                let to = view.border[(i + 1) % view.border.len()];
                ctx.draw(&CanvasLine {
                    x1: f64::from(from.x),
                    y1: flip(from.y),
                    x2: f64::from(to.x),
                    y2: flip(to.y),
                    color: Color::Gray,
                });
            }

            draw_paddle(ctx, &view.left_paddle, height);
            draw_paddle(ctx, &view.right_paddle, height);

            ctx.draw(&Circle {
                x: f64::from(view.ball_pos.x),
                y: flip(view.ball_pos.y),
                radius: f64::from(view.ball_radius),
                color: Color::LightCyan,
            });

            ctx.layer();
            let score_y = flip(view.court.center().y);
            ctx.print(
                f64::from(SCORE_INSET),
                score_y,
                Line::styled(view.score[0].to_string(), Style::default().fg(Color::DarkGray)),
            );
            ctx.print(
                width - f64::from(SCORE_INSET + view.right_paddle.width),
                score_y,
                Line::styled(view.score[1].to_string(), Style::default().fg(Color::DarkGray)),
            );

            if !view.active {
                let prompt_x = f64::from(view.court.center().x) - 200.0;
                ctx.print(
                    prompt_x,
                    flip(view.court.center().y - 180.0),
                    Line::styled("Hit SPACE to start, SPACE again to pause.", Color::Magenta),
                );
                ctx.print(
                    prompt_x,
                    flip(view.court.center().y - 130.0),
                    Line::styled("Press ESCAPE to return to the main menu.", Color::Magenta),
                );
            }
        })
        .render(area, buf);
}

fn draw_paddle(ctx: &mut Context, rect: &CourtRect, height: f64) {
    ctx.draw(&Rectangle {
        x: f64::from(rect.left()),
        y: height - f64::from(rect.bottom()),
        width: f64::from(rect.width),
        height: f64::from(rect.height),
        color: Color::Blue,
    });
}
