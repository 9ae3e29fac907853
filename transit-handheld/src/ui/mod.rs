//! The display seam.
//!
//! The controller hands plain [`View`](crate::nav::View) data to a
//! [`Presenter`]; how it reaches glass is the presenter's business.

mod layout;
mod recording;
mod terminal;

pub use layout::{
    Color, Frame, Line, TextSize, compose, countdown_label, split_station_name, wrap_text,
};
pub use recording::RecordingPresenter;
pub use terminal::TerminalPresenter;

use crate::nav::View;

/// Draws views. Drawing cannot fail from the controller's point of view.
pub trait Presenter {
    fn present(&mut self, view: &View);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, view: &View) {
        (**self).present(view);
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, view: &View) {
        (**self).present(view);
    }
}
