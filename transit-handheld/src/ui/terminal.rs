//! Text rendering of frames for the desk simulator.

use std::io::Write;

use tracing::warn;

use crate::nav::View;

use super::Presenter;
use super::layout::{Color, Frame, compose};

/// Inner width of the drawn panel, in columns.
const PANEL_WIDTH: usize = 52;

/// Draws each frame as a bordered text panel.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    /// Use ANSI colours.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame) -> std::io::Result<()> {
        let rule = "-".repeat(PANEL_WIDTH);
        let (open, close) = if frame.overlay { ("[", "]") } else { ("+", "+") };

        writeln!(self.out, "{open}{rule}{close}")?;
        for line in &frame.lines {
            let text: String = line.text.chars().take(PANEL_WIDTH - 2).collect();
            let pad = PANEL_WIDTH - 2 - text.chars().count();
            if self.color {
                writeln!(
                    self.out,
                    "| {}{text}\x1b[0m{} |",
                    ansi(line.color),
                    " ".repeat(pad)
                )?;
            } else {
                writeln!(self.out, "| {text}{} |", " ".repeat(pad))?;
            }
        }
        writeln!(self.out, "{open}{rule}{close}")?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &View) {
        let frame = compose(view);
        if let Err(e) = self.draw(&frame) {
            warn!(error = %e, "could not draw frame");
        }
    }
}

fn ansi(color: Color) -> &'static str {
    match color {
        Color::White => "\x1b[37m",
        Color::Cyan => "\x1b[36m",
        Color::Yellow => "\x1b[33m",
        Color::Green => "\x1b[32m",
        Color::Red => "\x1b[31m",
    }
}
