//! Presenter that remembers what it was asked to show.

use crate::nav::View;

use super::Presenter;

#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    views: Vec<View>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every view presented, oldest first.
    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn last(&self) -> Option<&View> {
        self.views.last()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Texts of every notice presented, oldest first.
    pub fn notices(&self) -> Vec<&str> {
        self.views
            .iter()
            .filter_map(|v| match v {
                View::Notice { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, view: &View) {
        self.views.push(view.clone());
    }
}
