//! Screen layout.
//!
//! Turns a [`View`] into a [`Frame`] of styled text lines, the same
//! arrangement the 320x170 panel used: counter, title, wrapped body,
//! footer hints.

use crate::nav::{Tone, View};

/// Columns of wrapped body text.
pub const WRAP_COLUMNS: usize = 50;

/// Wrapped body lines that fit above the footer.
pub const MAX_BODY_LINES: usize = 8;

/// Columns of a station name before it is split over two lines.
pub const STATION_NAME_COLUMNS: usize = 18;

pub const FOOTER_NAVIGATE: &str = "BTN1: Next  BTN2: Select";
pub const FOOTER_ROUTES: &str = "Hold BTN2: Routes";
pub const FOOTER_STATUS: &str = "BTN1: Back  BTN2: Refresh";
pub const STATUS_TITLE: &str = "Tram Status:";

/// Text colours of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Cyan,
    Yellow,
    Green,
    Red,
}

/// Relative glyph size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSize {
    Small,
    Large,
    Huge,
}

/// One line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: Color,
    pub size: TextSize,
}

impl Line {
    fn new(text: impl Into<String>, color: Color, size: TextSize) -> Self {
        Self {
            text: text.into(),
            color,
            size,
        }
    }
}

/// A laid-out screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// Drawn on top of the previous frame instead of replacing it.
    pub overlay: bool,
}

impl Frame {
    /// The plain text of every line.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

/// Lay out `view`.
pub fn compose(view: &View) -> Frame {
    let mut lines = Vec::new();

    match view {
        View::Route {
            position,
            total,
            route,
        } => {
            lines.push(Line::new(counter(*position, *total), Color::Cyan, TextSize::Large));
            lines.push(Line::new(
                format!("{} -", route.short_name),
                Color::White,
                TextSize::Large,
            ));
            lines.extend(body(&route.long_name));
            lines.push(Line::new(FOOTER_NAVIGATE, Color::Yellow, TextSize::Small));
        }
        View::Trip {
            position,
            total,
            trip,
        } => {
            lines.push(Line::new(counter(*position, *total), Color::Cyan, TextSize::Large));
            lines.push(Line::new("Trip", Color::White, TextSize::Large));
            lines.extend(body(&trip.headsign));
            lines.push(Line::new(
                format!("Dir: {}", trip.direction),
                Color::Yellow,
                TextSize::Small,
            ));
            lines.push(Line::new(FOOTER_NAVIGATE, Color::Yellow, TextSize::Small));
            lines.push(Line::new(FOOTER_ROUTES, Color::Yellow, TextSize::Small));
        }
        View::Station { total, station } => {
            lines.push(Line::new(
                format!("{}/{}", station.sequence, total),
                Color::Cyan,
                TextSize::Large,
            ));
            let (first, second) = split_station_name(&station.name);
            lines.push(Line::new(first, Color::White, TextSize::Large));
            if let Some(second) = second {
                lines.push(Line::new(second, Color::White, TextSize::Large));
            }
            lines.push(Line::new(FOOTER_NAVIGATE, Color::Yellow, TextSize::Small));
            lines.push(Line::new(FOOTER_ROUTES, Color::Yellow, TextSize::Small));
        }
        View::Status { text } => {
            lines.push(Line::new(STATUS_TITLE, Color::Green, TextSize::Large));
            lines.push(Line::new(text.clone(), Color::Yellow, TextSize::Huge));
            lines.push(Line::new(FOOTER_STATUS, Color::White, TextSize::Small));
        }
        View::Notice { text, tone } => {
            let color = tone_color(*tone);
            lines.extend(
                text.split('\n')
                    .map(|part| Line::new(part, color, TextSize::Large)),
            );
        }
        View::ClearCountdown { remaining_ms } => {
            lines.push(Line::new(
                countdown_label(*remaining_ms),
                Color::White,
                TextSize::Large,
            ));
        }
    }

    Frame {
        lines,
        overlay: view.is_overlay(),
    }
}

/// Colour of a notice.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Progress => Color::Yellow,
        Tone::Success => Color::Green,
        Tone::Error => Color::Red,
    }
}

/// `"i/n"` position counter.
pub fn counter(position: usize, total: usize) -> String {
    format!("{position}/{total}")
}

/// Countdown popup text; the remaining time is rounded up to whole seconds.
///
/// ```
/// use transit_handheld::ui::countdown_label;
///
/// assert_eq!(countdown_label(9_100), "Hold 10s more");
/// assert_eq!(countdown_label(3_000), "Hold 3s more");
/// ```
pub fn countdown_label(remaining_ms: u64) -> String {
    format!("Hold {}s more", remaining_ms.div_ceil(1_000))
}

/// Hard-wrap `text` at `columns`, honouring embedded newlines.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut line));
            len = 0;
            continue;
        }
        if len >= columns {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        line.push(c);
        len += 1;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Split a long station name at the last space within the first
/// [`STATION_NAME_COLUMNS`] characters, or hard-split if there is none.
pub fn split_station_name(name: &str) -> (String, Option<String>) {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= STATION_NAME_COLUMNS {
        return (name.to_string(), None);
    }

    let window = &chars[..=STATION_NAME_COLUMNS];
    match window.iter().rposition(|&c| c == ' ') {
        Some(space) if space > 0 => (
            chars[..space].iter().collect(),
            Some(chars[space + 1..].iter().collect()),
        ),
        _ => (
            chars[..STATION_NAME_COLUMNS].iter().collect(),
            Some(chars[STATION_NAME_COLUMNS..].iter().collect()),
        ),
    }
}

fn body(text: &str) -> impl Iterator<Item = Line> {
    wrap_text(text, WRAP_COLUMNS)
        .into_iter()
        .take(MAX_BODY_LINES)
        .map(|t| Line::new(t, Color::White, TextSize::Small))
}
