//! Scroll buffer backing the list viewport.
//!
//! This module holds a block of pre-rendered text lines and a vertical scroll
//! offset into it. It knows nothing about items or selection: callers move it
//! line by line (`scroll_down`, `scroll_up`), jump it (`goto_top`,
//! `goto_bottom`, `set_y_offset`) and read back the visible slice.
//!
//! ```rust
//! use bubbletea_listviewport::viewport::Model;
//!
//! let mut viewport = Model::new(20, 3);
//! viewport.set_content("a\nb\nc\nd\ne");
//! viewport.scroll_down(1);
//! assert_eq!(viewport.visible_lines(), vec!["b", "c", "d"]);
//! viewport.goto_bottom();
//! assert!(viewport.at_bottom());
//! ```

use lipgloss_extras::lipgloss::width as lg_width;
use unicode_width::UnicodeWidthChar;

/// A vertically scrollable block of text.
///
/// The offset is always kept within `[0, max_y_offset]` by the scrolling
/// methods; only content replacement can leave it past the end, and
/// `set_content` corrects that immediately.
///
/// The whole `width` x `height` area shows content. Callers that size items
/// against `height` (the list viewport divides it by the item height) can
/// rely on exactly `height` lines being visible.
#[derive(Debug, Clone)]
pub struct Model {
    /// Display width in cells. Lines wider than this are cut.
    pub width: usize,
    /// Display height in lines, all of them usable for content.
    pub height: usize,
    /// Index of the first visible line.
    pub y_offset: usize,

    lines: Vec<String>,
    longest_line_width: usize,
}

impl Model {
    /// Creates an empty viewport of the given size.
    ///
    /// # Arguments
    ///
    /// * `width` - Display width in cells; wider lines are cut when rendered
    /// * `height` - Number of visible lines
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::viewport::Model;
    ///
    /// let viewport = Model::new(40, 10);
    /// assert_eq!(viewport.line_count(), 0);
    /// assert!(viewport.at_top() && viewport.at_bottom());
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            y_offset: 0,
            lines: Vec::new(),
            longest_line_width: 0,
        }
    }

    /// Whether the first line is visible.
    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    /// Whether the offset has reached the furthest valid position.
    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_y_offset()
    }

    /// Whether the offset points beyond the furthest valid position, which
    /// only happens transiently after the height grows or content shrinks.
    pub fn past_bottom(&self) -> bool {
        self.y_offset > self.max_y_offset()
    }

    /// Replaces the content. Line endings are normalized to `\n`.
    ///
    /// The current offset is kept unless it now points past the last line,
    /// in which case the viewport jumps to the bottom.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::viewport::Model;
    ///
    /// let mut viewport = Model::new(10, 2);
    /// viewport.set_content("a\nb\nc\nd");
    /// viewport.set_y_offset(3);
    /// assert_eq!(viewport.y_offset, 2);
    ///
    /// // Shrinking the content below the offset jumps to the bottom.
    /// viewport.set_content("a\nb");
    /// assert_eq!(viewport.y_offset, 0);
    /// ```
    pub fn set_content(&mut self, content: &str) {
        let content = content.replace("\r\n", "\n");
        self.set_content_lines(content.split('\n').map(str::to_string).collect());
    }

    /// Replaces the content with already split lines.
    pub fn set_content_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.longest_line_width = find_longest_line_width(&self.lines);

        if self.y_offset > self.lines.len().saturating_sub(1) {
            self.goto_bottom();
        }
    }

    /// The lines currently inside the window, cut to the viewport width.
    ///
    /// At most `height` lines are returned; fewer when the content ends
    /// before the window does.
    pub fn visible_lines(&self) -> Vec<String> {
        let h = self.height;
        let w = self.width;

        let mut lines = Vec::new();
        if !self.lines.is_empty() {
            let top = self.y_offset.min(self.lines.len());
            let bottom = (self.y_offset + h).min(self.lines.len());
            lines = self.lines[top..bottom].to_vec();
        }

        if self.longest_line_width <= w || w == 0 {
            return lines;
        }
        lines.into_iter().map(|line| cut_string(&line, w)).collect()
    }

    /// Moves the offset to `n`, clamped to the valid range.
    ///
    /// The furthest valid offset puts the last line at the bottom of the
    /// window, so a full window of content stays visible.
    pub fn set_y_offset(&mut self, n: usize) {
        self.y_offset = n.min(self.max_y_offset());
    }

    /// Scrolls down by `n` lines and returns the lines that came into view.
    ///
    /// Nothing happens, and nothing is returned, at the bottom or with no
    /// content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::viewport::Model;
    ///
    /// let mut viewport = Model::new(10, 2);
    /// viewport.set_content("a\nb\nc\nd");
    /// assert_eq!(viewport.scroll_down(1), vec!["c"]);
    /// // Clamped at the bottom: only the one new line is revealed.
    /// assert_eq!(viewport.scroll_down(5), vec!["d"]);
    /// assert!(viewport.scroll_down(1).is_empty());
    /// ```
    pub fn scroll_down(&mut self, n: usize) -> Vec<String> {
        if self.at_bottom() || n == 0 || self.lines.is_empty() {
            return Vec::new();
        }

        let old_bottom = (self.y_offset + self.height).min(self.lines.len());
        self.set_y_offset(self.y_offset + n);

        let bottom = (self.y_offset + self.height).min(self.lines.len());
        let top = old_bottom.max(self.y_offset).min(bottom);
        self.lines[top..bottom].to_vec()
    }

    /// Scrolls up by `n` lines and returns the lines that came into view.
    pub fn scroll_up(&mut self, n: usize) -> Vec<String> {
        if self.at_top() || n == 0 || self.lines.is_empty() {
            return Vec::new();
        }

        let old_top = self.y_offset;
        self.set_y_offset(self.y_offset.saturating_sub(n));

        let top = self.y_offset;
        let bottom = old_top.min(self.y_offset + self.height).min(self.lines.len());
        self.lines[top..bottom].to_vec()
    }

    /// Jumps to the first line.
    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    /// Jumps so the last line sits at the bottom of the window.
    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_y_offset();
    }

    /// All content lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of content lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Renders the visible slice, padded with blank lines to the full
    /// height so anything stacked below stays anchored.
    pub fn view(&self) -> String {
        let mut visible = self.visible_lines();
        if visible.len() < self.height {
            visible.resize(self.height, String::new());
        }
        visible.join("\n")
    }

    fn max_y_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

fn find_longest_line_width(lines: &[String]) -> usize {
    lines.iter().map(|line| lg_width(line)).max().unwrap_or(0)
}

// Cuts `s` to at most `max` display cells. Wide characters that would
// straddle the edge are dropped.
fn cut_string(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if current_width + w > max {
            break;
        }
        current_width += w;
        out.push(ch);
    }
    out
}

/// Shorthand for [`Model::new`].
pub fn new(width: usize, height: usize) -> Model {
    Model::new(width, height)
}
