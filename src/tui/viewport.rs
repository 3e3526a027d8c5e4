//! Scroll state for the transcript pane

/// Vertical scroll position over a block of wrapped lines
///
/// While `follow` is set the view stays pinned to the newest line as the
/// content grows; scrolling up releases it, reaching the bottom restores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: u16,
    content_height: u16,
    view_height: u16,
    follow: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: 0,
            content_height: 0,
            view_height: 0,
            follow: true,
        }
    }
}

impl Viewport {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.view_height)
    }

    /// Record the size of the latest render
    pub fn set_dimensions(&mut self, content_height: u16, view_height: u16) {
        self.content_height = content_height;
        self.view_height = view_height;
        if self.follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
        self.offset = self.max_offset();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.follow = self.offset >= self.max_offset();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
        self.follow = self.offset >= self.max_offset();
    }

    /// Lines to move for a page scroll
    pub fn page(&self) -> u16 {
        self.view_height.saturating_sub(1).max(1)
    }

    /// Whether earlier lines are hidden above the view
    pub fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }
}
