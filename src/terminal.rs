// Copyright (c) 2026 glyphfall contributors

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::palette::to_terminal_color;
use crate::runtime::ColorMode;
use crate::surface::Frame;

/// Raw-mode terminal session. Entering takes over the alternate screen and
/// hides the cursor; everything is undone on drop, and
/// `restore_terminal_best_effort` covers the paths drop cannot reach
/// (panics, signals).
pub struct Terminal {
    stdout: Stdout,
    mode: ColorMode,
}

impl Terminal {
    pub fn new(mode: ColorMode) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out, mode })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Flushes the whole frame. The fade pass recolors nearly every lit
    /// cell each logical step, so a full repaint with batched color changes
    /// beats per-cell diffing here.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let width = frame.width() as usize;
        if width == 0 {
            return Ok(());
        }

        let mut cur_fg: Option<Color> = None;
        if self.mode != ColorMode::Mono {
            self.stdout
                .queue(SetBackgroundColor(to_terminal_color(frame.bg(), self.mode)))?;
        }

        for (y, row) in frame.cells().chunks(width).enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for cell in row {
                if self.mode != ColorMode::Mono && cell.ch != ' ' {
                    let fg = to_terminal_color(cell.fg, self.mode);
                    if Some(fg) != cur_fg {
                        self.stdout.queue(SetForegroundColor(fg))?;
                        cur_fg = Some(fg);
                    }
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
