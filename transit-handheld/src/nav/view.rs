//! What the controller asks the presenter to show.

use crate::domain::{Route, Station, Trip};

/// Emphasis of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Progress ("Loading routes...").
    Progress,
    /// Confirmation ("Selected!").
    Success,
    /// Failure.
    Error,
}

/// One screenful of plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// A route, 1-based `position` of `total`.
    Route {
        position: usize,
        total: usize,
        route: Route,
    },
    Trip {
        position: usize,
        total: usize,
        trip: Trip,
    },
    /// A station; its own sequence number is the counter numerator.
    Station { total: usize, station: Station },
    /// The live status text.
    Status { text: String },
    /// A full-screen message.
    Notice { text: String, tone: Tone },
    /// Countdown box drawn over the current screen during a long SELECT hold.
    ClearCountdown { remaining_ms: u64 },
}

impl View {
    pub fn notice(text: impl Into<String>, tone: Tone) -> Self {
        View::Notice {
            text: text.into(),
            tone,
        }
    }

    /// Whether this view is drawn on top of the previous one.
    pub fn is_overlay(&self) -> bool {
        matches!(self, View::ClearCountdown { .. })
    }
}
