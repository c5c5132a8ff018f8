//! Collision tests, bounces and paddle movement for the Pong court.

use rand::Rng;

use crate::config::Config;
use crate::types::*;

/// Physics calculations for game simulation
pub struct Physics;

impl Physics {
    /// Ball centre pushed out by the radius in the direction of travel
    pub fn leading_edge(ball: &Ball) -> Vec2 {
        let offset = |dir: f32| if dir >= 0.0 { ball.radius } else { -ball.radius };
        Vec2::new(ball.pos.x + offset(ball.dir.x), ball.pos.y + offset(ball.dir.y))
    }

    /// Leading edge inside the paddle's horizontal span and strictly between its top and bottom
    pub fn hits_paddle(edge: Vec2, paddle: &Paddle) -> bool {
        let rect = &paddle.rect;
        edge.x >= rect.left()
            && edge.x <= rect.right()
            && edge.y > rect.top()
            && edge.y < rect.bottom()
    }

    /// Side that wins the point when the leading edge reaches a side wall
    pub fn wall_scorer(edge: Vec2, court: &Court) -> Option<Side> {
        if edge.x <= court.border_left() {
            Some(Side::Right)
        } else if edge.x >= court.border_right() {
            Some(Side::Left)
        } else {
            None
        }
    }

    pub fn hits_top_or_bottom(edge: Vec2, court: &Court) -> bool {
        edge.y <= court.border_top() || edge.y >= court.border_bottom()
    }

    /// Reverse a direction component, snapping it to ±1 first and then
    /// scaling by a factor drawn in tenths from the configured range.
    pub fn bounce<R: Rng + ?Sized>(component: f32, rng: &mut R, config: &Config) -> f32 {
        let tenths = rng.gen_range(config.bounce_tenths());
        component.round() * (tenths as f32 * -0.1)
    }

    /// Fresh serve direction, each component ±1
    pub fn serve_direction<R: Rng + ?Sized>(rng: &mut R, config: &Config) -> Vec2 {
        let x = Self::serve_sign(rng.gen_range(config.serve_draw()));
        let y = Self::serve_sign(rng.gen_range(config.serve_draw()));
        Vec2::new(x, y)
    }

    /// Only a positive draw serves positive; zero goes negative
    pub fn serve_sign(draw: i32) -> f32 {
        if draw > 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Move a paddle one step (`direction < 0` is up), keeping it inside the border.
    ///
    /// A paddle already touching the border in the requested direction stays put.
    pub fn move_paddle(paddle: &mut Paddle, direction: i8, speed: f32, court: &Court) {
        let rect = &mut paddle.rect;
        let top = court.border_top();
        let bottom = court.border_bottom();

        let can_move = if direction < 0 {
            rect.top() > top
        } else {
            rect.bottom() < bottom
        };
        if !can_move {
            return;
        }

        let step = if direction < 0 { -speed } else { speed };
        let max_y = (bottom - rect.height).max(top);
        rect.y = (rect.y + step).clamp(top, max_y);
    }

    /// Computer-controlled paddle: chase the ball's leading edge.
    ///
    /// The up and down checks run one after the other against the moved paddle,
    /// so a ball close to the midpoint nudges the paddle back and forth to a standstill.
    pub fn track_ball(paddle: &mut Paddle, edge_y: f32, speed: f32, court: &Court) {
        if edge_y < paddle.rect.center_y() {
            Self::move_paddle(paddle, -1, speed, court);
        }
        if edge_y > paddle.rect.center_y() {
            Self::move_paddle(paddle, 1, speed, court);
        }
    }

    /// Default centred paddle geometry for a side
    pub fn default_paddle(side: Side, court: &Court, config: &Config) -> Paddle {
        let x = config.paddle_x(court, side);
        let y = court.center().y - config.paddle_height / 2.0;
        Paddle::new(side, Rect::new(x, y, config.paddle_width, config.paddle_height))
    }

    /// Full-height paddle geometry for a side
    pub fn tall_paddle(side: Side, court: &Court, config: &Config) -> Paddle {
        let x = config.paddle_x(court, side);
        let height = court.border_bottom() - court.border_top();
        Paddle::new(side, Rect::new(x, court.border_top(), config.paddle_width, height))
    }

    pub fn is_tall(paddle: &Paddle, config: &Config) -> bool {
        paddle.rect.height > config.paddle_height
    }
}
