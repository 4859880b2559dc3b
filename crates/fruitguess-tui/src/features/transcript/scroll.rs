//! Scroll position of the transcript pane.

/// Scroll mode for the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Keep the newest exchange in view.
    FollowLatest,
    /// User scrolled manually; offset is the line index shown at the top.
    Anchored { offset: usize },
}

/// Scroll state for the transcript pane.
///
/// The line count is refreshed by the reducer on every frame, so scroll math
/// here always works against what was last laid out.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub mode: ScrollMode,
    pub cached_line_count: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            mode: ScrollMode::FollowLatest,
            cached_line_count: 0,
        }
    }
}

impl ScrollState {
    pub fn is_following(&self) -> bool {
        matches!(self.mode, ScrollMode::FollowLatest)
    }

    /// Returns the first visible line for a viewport of `viewport_height`.
    pub fn get_offset(&self, viewport_height: usize) -> usize {
        let max_offset = self.cached_line_count.saturating_sub(viewport_height);
        match self.mode {
            ScrollMode::FollowLatest => max_offset,
            ScrollMode::Anchored { offset } => offset.min(max_offset),
        }
    }

    pub fn scroll_up(&mut self, lines: usize, viewport_height: usize) {
        let new_offset = self.get_offset(viewport_height).saturating_sub(lines);
        self.mode = ScrollMode::Anchored { offset: new_offset };
    }

    /// Scrolls down; reaching the bottom switches back to follow mode.
    pub fn scroll_down(&mut self, lines: usize, viewport_height: usize) {
        if self.is_following() {
            return;
        }
        let max_offset = self.cached_line_count.saturating_sub(viewport_height);
        let new_offset = (self.get_offset(viewport_height) + lines).min(max_offset);
        self.mode = if new_offset >= max_offset {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset: new_offset }
        };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.mode = ScrollMode::FollowLatest;
    }

    pub fn page_up(&mut self, viewport_height: usize) {
        self.scroll_up(viewport_height.max(1), viewport_height);
    }

    pub fn page_down(&mut self, viewport_height: usize) {
        self.scroll_down(viewport_height.max(1), viewport_height);
    }

    pub fn update_line_count(&mut self, line_count: usize) {
        self.cached_line_count = line_count;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
