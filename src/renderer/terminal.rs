//! Terminal presenter
//!
//! Paints the frame onto a canvas sized to the terminal (two pixels per cell,
//! using the upper half-block glyph) and streams it with crossterm.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    cursor, execute, queue,
    style::{self, Color},
    terminal,
};
use glam::Vec2;

use super::assets::Assets;
use super::canvas::{Canvas, Rgb};
use super::scene::paint_frame;
use super::{FrameView, Renderer};

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Chain a panic hook that restores the terminal before the message prints
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(
            stdout(),
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
        log::error!("Panic: {info}");
        default_hook(info);
    }));
}

/// Renders frames into the alternate screen
///
/// The terminal is restored when this is dropped, including while unwinding
/// from a panic or after a failed `enter`.
pub struct TerminalRenderer {
    out: Stdout,
    canvas: Canvas,
    assets: Assets,
    logical: Vec2,
    active: bool,
}

impl TerminalRenderer {
    /// Enter raw mode and the alternate screen, sized to the current terminal
    pub fn enter(logical: Vec2, assets: Assets) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut renderer = Self {
            out: stdout(),
            canvas: Canvas::new(0, 0, logical),
            assets,
            logical,
            active: true,
        };
        execute!(
            renderer.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            crossterm::event::EnableMouseCapture,
        )?;

        let (cols, rows) = terminal::size()?;
        renderer.resize(cols, rows);
        Ok(renderer)
    }

    /// Restore the terminal (no-op once restored)
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(
            self.out,
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let raw = terminal::disable_raw_mode();
        screen.and(raw)
    }

    /// Terminal was resized to `cols`x`rows` cells
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas
            .resize(cols as usize, rows as usize * 2, self.logical);
    }

    fn present(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        queue!(out, cursor::MoveTo(0, 0))?;

        let width = self.canvas.width();
        let rows = self.canvas.height() / 2;
        let mut prev: Option<(Rgb, Rgb)> = None;
        for row in 0..rows {
            for col in 0..width {
                let top = self.canvas.get(col, row * 2);
                let bot = self.canvas.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(color(top)),
                        style::SetBackgroundColor(color(bot))
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            log::warn!("Could not restore terminal: {e}");
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        paint_frame(&mut self.canvas, view, &self.assets);
        if let Err(e) = self.present() {
            log::warn!("Frame dropped: {e}");
        }
    }
}
