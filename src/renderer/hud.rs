//! Score text and the game-over overlay

use glam::Vec2;

use super::{Surface, TextAlign, TextStyle, colors};
use crate::sim::{GameContext, Rect, Viewport};

const SCORE_STYLE: TextStyle = TextStyle {
    size_px: 24.0,
    color: colors::SCORE_TEXT,
    align: TextAlign::Center,
};

const HIGH_SCORE_STYLE: TextStyle = TextStyle {
    size_px: 18.0,
    color: colors::HIGH_SCORE_TEXT,
    align: TextAlign::Left,
};

const TITLE_STYLE: TextStyle = TextStyle {
    size_px: 48.0,
    color: colors::OVERLAY_TEXT,
    align: TextAlign::Center,
};

const LINE_STYLE: TextStyle = TextStyle {
    size_px: 24.0,
    color: colors::OVERLAY_TEXT,
    align: TextAlign::Center,
};

/// Current score (top center) and best score (top left)
pub fn draw_scores(game: &GameContext, viewport: Viewport, surface: &mut dyn Surface) {
    surface.fill_text(
        &format!("Score: {}", game.score),
        Vec2::new(viewport.width / 2.0, 30.0),
        SCORE_STYLE,
    );
    surface.fill_text(
        &format!("High Score: {}", game.high_score.best),
        Vec2::new(10.0, 20.0),
        HIGH_SCORE_STYLE,
    );
}

/// Dim the screen and show the restart prompt
pub fn draw_game_over(game: &GameContext, viewport: Viewport, surface: &mut dyn Surface) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        colors::OVERLAY,
    );

    let cx = viewport.width / 2.0;
    let cy = viewport.height / 2.0;
    surface.fill_text("Game Over", Vec2::new(cx, cy - 50.0), TITLE_STYLE);
    surface.fill_text("Click to Restart", Vec2::new(cx, cy), LINE_STYLE);
    surface.fill_text(
        &format!("High Score: {}", game.high_score.best),
        Vec2::new(cx, cy + 50.0),
        LINE_STYLE,
    );
}

/// Dim the frozen frame and show the resume prompt
pub fn draw_paused(viewport: Viewport, surface: &mut dyn Surface) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        colors::OVERLAY,
    );

    let cx = viewport.width / 2.0;
    let cy = viewport.height / 2.0;
    surface.fill_text("Paused", Vec2::new(cx, cy - 25.0), TITLE_STYLE);
    surface.fill_text("Click to Resume", Vec2::new(cx, cy + 25.0), LINE_STYLE);
}
