/// Two-paddle ball game
use crate::driver::Scene;
use crate::error::SurfaceError;
use crate::geometry::Rect;
use crate::projection::Viewport;
use crate::surface::{Color, DrawSurface, Key, SurfaceEvent};

pub const FIELD_WIDTH: i32 = 1280;
pub const FIELD_HEIGHT: i32 = 720;
pub const BALL_SIZE: i32 = 32;
pub const PADDLE_WIDTH: i32 = 32;
pub const PADDLE_HEIGHT: i32 = 128;
/// Gap between a paddle and its side of the field
pub const PADDLE_OFFSET: i32 = 64;
/// Pixels a paddle moves per tick
pub const PADDLE_SPEED: i32 = 2;
/// Horizontal distance at which the ball counts as touching a paddle
const HIT_TOLERANCE: i32 = 2;

/// Which side scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    w: bool,
    s: bool,
    up: bool,
    down: bool,
}

impl HeldKeys {
    fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::W => self.w = pressed,
            Key::S => self.s = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Other => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct PongScene {
    ball: Rect,
    left: Rect,
    right: Rect,
    dx: i32,
    dy: i32,
    held: HeldKeys,
    score: (u32, u32),
    last_scorer: Option<Player>,
}

impl PongScene {
    pub fn new() -> Self {
        Self {
            ball: centered_ball(),
            left: Rect::new(
                PADDLE_OFFSET,
                (FIELD_HEIGHT - PADDLE_HEIGHT) / 2,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            right: Rect::new(
                FIELD_WIDTH - PADDLE_WIDTH - PADDLE_OFFSET,
                (FIELD_HEIGHT - PADDLE_HEIGHT) / 2,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            dx: 1,
            dy: 1,
            held: HeldKeys::default(),
            score: (0, 0),
            last_scorer: None,
        }
    }

    pub fn viewport() -> Viewport {
        Viewport::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    pub fn ball(&self) -> Rect {
        self.ball
    }

    pub fn paddles(&self) -> (Rect, Rect) {
        (self.left, self.right)
    }

    pub fn velocity(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// (player one, player two)
    pub fn score(&self) -> (u32, u32) {
        self.score
    }

    /// Side that scored most recently, if anyone has
    pub fn last_scorer(&self) -> Option<Player> {
        self.last_scorer
    }

    /// Move the ball, keeping its velocity
    pub fn place_ball(&mut self, x: i32, y: i32) {
        self.ball.x = x;
        self.ball.y = y;
    }

    pub fn set_velocity(&mut self, dx: i32, dy: i32) {
        self.dx = dx;
        self.dy = dy;
    }

    fn move_paddles(&mut self) {
        let held = self.held;
        move_paddle(&mut self.left, held.w, held.s);
        move_paddle(&mut self.right, held.up, held.down);
    }

    fn bounce(&mut self) {
        if self.ball.y < 0 || self.ball.y > FIELD_HEIGHT - BALL_SIZE {
            self.dy = -self.dy;
        }

        if (self.ball.x - self.left.right()).abs() < HIT_TOLERANCE
            && overlaps_vertically(&self.ball, &self.left)
        {
            self.dx = 1;
        }

        if (self.ball.right() - self.right.x).abs() < HIT_TOLERANCE
            && overlaps_vertically(&self.ball, &self.right)
        {
            self.dx = -1;
        }
    }

    fn check_goal(&mut self) {
        let scorer = if self.ball.x < 0 {
            self.score.1 += 1;
            Player::Two
        } else if self.ball.right() > FIELD_WIDTH {
            self.score.0 += 1;
            Player::One
        } else {
            return;
        };

        log::info!(
            "player {} goal! score {}:{}",
            if scorer == Player::One { 1 } else { 2 },
            self.score.0,
            self.score.1
        );
        self.ball = centered_ball();
        self.last_scorer = Some(scorer);
    }
}

impl Default for PongScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PongScene {
    fn handle_event(&mut self, event: &SurfaceEvent) {
        match *event {
            SurfaceEvent::KeyDown(key) => self.held.set(key, true),
            SurfaceEvent::KeyUp(key) => self.held.set(key, false),
            SurfaceEvent::Quit => {}
        }
    }

    fn update(&mut self) {
        self.move_paddles();

        self.ball.x += self.dx;
        self.ball.y += self.dy;

        self.bounce();
        self.check_goal();
    }

    fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_draw_color(Color::BLACK)?;
        surface.clear()?;

        surface.set_draw_color(Color::WHITE)?;
        surface.fill_rect(self.ball)?;
        surface.fill_rect(self.left)?;
        surface.fill_rect(self.right)?;

        surface.present()
    }
}

fn centered_ball() -> Rect {
    Rect::new(
        (FIELD_WIDTH - BALL_SIZE) / 2,
        (FIELD_HEIGHT - BALL_SIZE) / 2,
        BALL_SIZE,
        BALL_SIZE,
    )
}

/// Opposing keys cancel each other out
fn move_paddle(paddle: &mut Rect, up: bool, down: bool) {
    if up && !down && paddle.y > 0 {
        paddle.y -= PADDLE_SPEED;
    }
    if down && !up && paddle.bottom() < FIELD_HEIGHT {
        paddle.y += PADDLE_SPEED;
    }
}

fn overlaps_vertically(a: &Rect, b: &Rect) -> bool {
    a.y < b.bottom() && b.y < a.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let game = PongScene::new();
        assert_eq!(game.ball(), Rect::new(624, 344, 32, 32));
        let (left, right) = game.paddles();
        assert_eq!(left, Rect::new(64, 296, 32, 128));
        assert_eq!(right, Rect::new(1184, 296, 32, 128));
        assert_eq!(game.score(), (0, 0));
        assert_eq!(game.last_scorer(), None);
        assert_eq!(game.velocity(), (1, 1));
    }

    #[test]
    fn test_ball_moves_diagonally() {
        let mut game = PongScene::new();
        game.update();
        assert_eq!(game.ball().x, 625);
        assert_eq!(game.ball().y, 345);
    }

    #[test]
    fn test_held_key_moves_paddle_until_released() {
        let mut game = PongScene::new();
        game.handle_event(&SurfaceEvent::KeyDown(Key::W));
        game.update();
        game.update();
        assert_eq!(game.paddles().0.y, 296 - 2 * PADDLE_SPEED);

        game.handle_event(&SurfaceEvent::KeyUp(Key::W));
        game.update();
        assert_eq!(game.paddles().0.y, 296 - 2 * PADDLE_SPEED);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut game = PongScene::new();
        game.handle_event(&SurfaceEvent::KeyDown(Key::Up));
        game.handle_event(&SurfaceEvent::KeyDown(Key::Down));
        game.update();
        assert_eq!(game.paddles().1.y, 296);
    }

    #[test]
    fn test_paddle_stays_in_field() {
        let mut game = PongScene::new();
        game.handle_event(&SurfaceEvent::KeyDown(Key::S));
        for _ in 0..1000 {
            game.update();
        }
        let left = game.paddles().0;
        assert!(left.bottom() <= FIELD_HEIGHT);
        assert!(left.bottom() >= FIELD_HEIGHT - PADDLE_SPEED);

        game.handle_event(&SurfaceEvent::KeyUp(Key::S));
        game.handle_event(&SurfaceEvent::KeyDown(Key::W));
        for _ in 0..1000 {
            game.update();
        }
        assert!(game.paddles().0.y >= 0);
        assert!(game.paddles().0.y <= PADDLE_SPEED);
    }

    #[test]
    fn test_bounces_off_bottom_wall() {
        let mut game = PongScene::new();
        game.place_ball(600, FIELD_HEIGHT - BALL_SIZE);
        game.update();
        assert_eq!(game.velocity(), (1, -1));
    }

    #[test]
    fn test_bounces_off_left_paddle() {
        let mut game = PongScene::new();
        let left = game.paddles().0;
        game.place_ball(left.right() + 1, left.y + 10);
        game.set_velocity(-1, 1);
        game.update();
        assert_eq!(game.velocity().0, 1);
    }

    #[test]
    fn test_bounces_off_right_paddle() {
        let mut game = PongScene::new();
        let right = game.paddles().1;
        game.place_ball(right.x - BALL_SIZE - 1, right.y + 10);
        game.update();
        assert_eq!(game.velocity().0, -1);
    }

    #[test]
    fn test_missed_ball_scores_and_recenters() {
        let mut game = PongScene::new();
        game.place_ball(0, 10);
        game.set_velocity(-1, 1);
        game.update();
        assert_eq!(game.score(), (0, 1));
        assert_eq!(game.last_scorer(), Some(Player::Two));
        assert_eq!(game.ball(), centered_ball());

        game.place_ball(FIELD_WIDTH - BALL_SIZE, 10);
        game.set_velocity(1, 1);
        game.update();
        assert_eq!(game.score(), (1, 1));
        assert_eq!(game.last_scorer(), Some(Player::One));
        assert_eq!(game.ball(), centered_ball());
    }
}
