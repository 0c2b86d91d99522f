//! Frame painting: playfield, HUD and overlays

use glam::Vec2;

use super::assets::{AssetId, Assets};
use super::canvas::{Canvas, Rgb, draw_number};
use super::{FrameView, Overlay};
use crate::settings::Settings;
use crate::sim::{Pipe, Rect};

// ── Colors ──────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_BODY: Rgb = Rgb(100, 170, 40);
const PIPE_CAP: Rgb = Rgb(74, 122, 26);
const BIRD: Rgb = Rgb(245, 200, 66);
const PANEL: Rgb = Rgb(220, 195, 120);
const PANEL_EDGE: Rgb = Rgb(30, 30, 30);
const WHITE: Rgb = Rgb(255, 255, 255);
const GOLD: Rgb = Rgb(245, 200, 66);

/// Pipe cap overhang and height (logical units)
const CAP_OVERHANG: f32 = 3.0;
const CAP_HEIGHT: f32 = 20.0;

/// Paint a complete frame
pub fn paint_frame(canvas: &mut Canvas, view: &FrameView<'_>, assets: &Assets) {
    let state = view.state;
    let settings = &state.settings;

    paint_sky(canvas, settings, state.scenery.background_offset, assets);
    for pipe in &state.pipes {
        paint_pipe(canvas, settings, pipe, assets);
    }
    paint_ground(canvas, settings, state.scenery.foreground_offset);

    let bird = Rect::from(&state.bird);
    assets.draw_or_fill(canvas, AssetId::BirdFrame(state.bird.frame), &bird, BIRD);

    let overlay = view.overlay();
    if !matches!(overlay, Some(Overlay::Ready) | Some(Overlay::GameOver { .. })) {
        draw_number(
            canvas,
            settings.canvas_width / 2.0,
            20.0,
            state.score.current,
            6.0,
            WHITE,
        );
    }

    if let Some(overlay) = overlay {
        paint_overlay(canvas, settings, overlay);
    }
    if view.show_leaderboard {
        paint_leaderboard(canvas, settings, view);
    }
}

fn paint_sky(canvas: &mut Canvas, settings: &Settings, offset: f32, assets: &Assets) {
    let floor_px = (settings.floor_y() * canvas.scale().y) as usize;
    let floor_px = floor_px.min(canvas.height());
    for y in 0..floor_px {
        let t = (y * 256 / floor_px.max(1)) as u16;
        canvas.fill_pixels(0, y as i32, canvas.width() as i32, 1, Rgb::lerp(SKY_TOP, SKY_BOT, t));
    }

    // Two copies side by side so the wrap at one canvas width is seamless
    let size = Vec2::new(settings.canvas_width, settings.floor_y());
    match assets.get(AssetId::Background) {
        Some(sprite) => {
            for copy in 0..2 {
                let min = Vec2::new(offset + copy as f32 * settings.canvas_width, 0.0);
                sprite.draw(canvas, &Rect::new(min, size));
            }
        }
        None => {
            // (x, width, height) per hill
            const HILLS: [(f32, f32, f32); 3] =
                [(0.0, 90.0, 50.0), (120.0, 70.0, 30.0), (210.0, 110.0, 60.0)];
            for copy in 0..2 {
                let base = offset + copy as f32 * settings.canvas_width;
                for (x, w, h) in HILLS {
                    let min = Vec2::new(base + x, settings.floor_y() - h);
                    canvas.fill_rect(&Rect::new(min, Vec2::new(w, h)), HILL_FAR);
                }
            }
        }
    }
}

fn paint_pipe(canvas: &mut Canvas, settings: &Settings, pipe: &Pipe, assets: &Assets) {
    let width = settings.pipe_width;
    let floor_y = settings.floor_y();

    // Top column and cap
    let top_body = Rect::new(
        Vec2::new(pipe.x, 0.0),
        Vec2::new(width, (pipe.gap_top - CAP_HEIGHT).max(0.0)),
    );
    let top_cap = Rect::new(
        Vec2::new(pipe.x - CAP_OVERHANG, pipe.gap_top - CAP_HEIGHT),
        Vec2::new(width + 2.0 * CAP_OVERHANG, CAP_HEIGHT),
    );
    // Bottom cap and column
    let bottom_cap = Rect::new(
        Vec2::new(pipe.x - CAP_OVERHANG, pipe.gap_bottom),
        Vec2::new(width + 2.0 * CAP_OVERHANG, CAP_HEIGHT),
    );
    let bottom_body = Rect::new(
        Vec2::new(pipe.x, pipe.gap_bottom + CAP_HEIGHT),
        Vec2::new(width, (floor_y - pipe.gap_bottom - CAP_HEIGHT).max(0.0)),
    );

    assets.draw_or_fill(canvas, AssetId::PipeBody, &top_body, PIPE_BODY);
    assets.draw_or_fill(canvas, AssetId::PipeBody, &bottom_body, PIPE_BODY);
    assets.draw_or_fill(canvas, AssetId::PipeCap, &top_cap, PIPE_CAP);
    assets.draw_or_fill(canvas, AssetId::PipeCap, &bottom_cap, PIPE_CAP);
}

fn paint_ground(canvas: &mut Canvas, settings: &Settings, offset: f32) {
    let floor_y = settings.floor_y();
    let strip = Vec2::new(settings.canvas_width, settings.floor_height);
    canvas.fill_rect(&Rect::new(Vec2::new(0.0, floor_y), strip), DIRT);

    // Scrolling stripes, 24 units apart
    let mut x = offset;
    while x < settings.canvas_width {
        canvas.fill_rect(
            &Rect::new(Vec2::new(x, floor_y + 6.0), Vec2::new(12.0, settings.floor_height)),
            DIRT_DARK,
        );
        canvas.fill_rect(&Rect::new(Vec2::new(x, floor_y), Vec2::new(12.0, 6.0)), GRASS_LIGHT);
        canvas.fill_rect(
            &Rect::new(Vec2::new(x + 12.0, floor_y), Vec2::new(12.0, 6.0)),
            GRASS,
        );
        x += 24.0;
    }
}

fn panel(canvas: &mut Canvas, center: Vec2, size: Vec2) {
    let min = center - size / 2.0;
    canvas.fill_rect(&Rect::new(min - Vec2::splat(2.0), size + Vec2::splat(4.0)), PANEL_EDGE);
    canvas.fill_rect(&Rect::new(min, size), PANEL);
}

fn paint_overlay(canvas: &mut Canvas, settings: &Settings, overlay: Overlay) {
    let center = Vec2::new(settings.canvas_width, settings.canvas_height) / 2.0;
    match overlay {
        Overlay::Ready => {
            panel(canvas, center, Vec2::new(200.0, 80.0));
            // Play triangle, stepped
            for row in 0..8 {
                let h = 40.0 - row as f32 * 5.0;
                let min = Vec2::new(center.x - 20.0 + row as f32 * 5.0, center.y - h / 2.0);
                canvas.fill_rect(&Rect::new(min, Vec2::new(5.0, h)), BIRD);
            }
        }
        Overlay::Countdown(n) => {
            draw_number(canvas, center.x, center.y - 50.0, n, 20.0, WHITE);
        }
        Overlay::Paused => {
            canvas.dim_all();
            let bar = Vec2::new(16.0, 60.0);
            canvas.fill_rect(&Rect::new(center - Vec2::new(24.0, 30.0), bar), WHITE);
            canvas.fill_rect(&Rect::new(center + Vec2::new(8.0, -30.0), bar), WHITE);
        }
        Overlay::GameOver { score, best } => {
            canvas.dim_all();
            panel(canvas, center, Vec2::new(200.0, 140.0));
            draw_number(canvas, center.x, center.y - 55.0, score, 10.0, WHITE);
            draw_number(canvas, center.x, center.y + 10.0, best, 8.0, GOLD);
        }
    }
}

fn paint_leaderboard(canvas: &mut Canvas, settings: &Settings, view: &FrameView<'_>) {
    canvas.dim_all();
    let center = Vec2::new(settings.canvas_width, settings.canvas_height) / 2.0;
    let row_h = 32.0;
    let rows = view.leaderboard.len().max(1) as f32;
    let size = Vec2::new(220.0, rows * row_h + 20.0);
    panel(canvas, center, size);

    let top = center.y - size.y / 2.0 + 10.0;
    for (i, entry) in view.leaderboard.iter().enumerate() {
        let y = top + i as f32 * row_h;
        draw_number(canvas, center.x - 60.0, y, i as u32 + 1, 4.0, PANEL_EDGE);
        draw_number(canvas, center.x + 40.0, y, entry.score, 4.0, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState};

    fn canvas() -> Canvas {
        Canvas::new(320, 480, Vec2::new(320.0, 480.0))
    }

    #[test]
    fn test_missing_assets_still_paint_the_bird() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        state.phase = GamePhase::Running;
        let view = FrameView {
            state: &state,
            leaderboard: &[],
            show_leaderboard: false,
        };
        let mut canvas = canvas();
        paint_frame(&mut canvas, &view, &Assets::new());
        // Bird spans (80..114, 240..264)
        assert_eq!(canvas.get(82, 262), BIRD);
        assert_eq!(canvas.get(113, 240), BIRD);
    }

    #[test]
    fn test_pipes_drawn_outside_gap_only() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        state.phase = GamePhase::Running;
        state.pipes.push(Pipe::new(200.0, 150.0, 120.0));
        let view = FrameView {
            state: &state,
            leaderboard: &[],
            show_leaderboard: false,
        };
        let mut canvas = canvas();
        paint_frame(&mut canvas, &view, &Assets::builtin());
        assert_eq!(canvas.get(225, 100), PIPE_BODY);
        assert_eq!(canvas.get(225, 140), PIPE_CAP);
        assert_eq!(canvas.get(225, 280), PIPE_CAP);
        assert_eq!(canvas.get(225, 350), PIPE_BODY);
        let gap_px = canvas.get(225, 210);
        assert_ne!(gap_px, PIPE_BODY);
        assert_ne!(gap_px, PIPE_CAP);
    }

    #[test]
    fn test_render_is_read_only() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        state.phase = GamePhase::Ended;
        let before = (state.bird.clone(), state.pipes.clone(), state.score, state.phase);
        let view = FrameView {
            state: &state,
            leaderboard: &[],
            show_leaderboard: true,
        };
        paint_frame(&mut canvas(), &view, &Assets::builtin());
        assert_eq!(
            before,
            (state.bird.clone(), state.pipes.clone(), state.score, state.phase)
        );
    }
}
