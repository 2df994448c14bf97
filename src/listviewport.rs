//! Paginated list viewport.
//!
//! A list viewport shows a window of a longer list of items, each item taking
//! a fixed number of rendered lines. It tracks three pieces of coupled state:
//!
//! - the selected item (`curr_item`),
//! - the window bounds (`top_bound..=bottom_bound`), the items considered
//!   visible,
//! - the scroll offset of the underlying [`viewport`](crate::viewport).
//!
//! Moving the selection one item at a time keeps them consistent: when the
//! selection leaves the window, the window shifts by one item and the
//! viewport scrolls by exactly `item_height` lines, so the scroll offset
//! stays at `top_bound * item_height`.
//!
//! The jump operations (`first_item`, `last_item`, `reset_curr_item`) and the
//! state setters (`set_num_items`, `set_dimensions`) move the viewport
//! directly and leave the window bounds as they are. Hosts that jump and then
//! care about the bounds resync dimensions and content afterwards.
//!
//! The number of items that fit on a page is the viewport height divided by
//! the item height, *rounded to the nearest integer*. A window 1.5 items tall
//! therefore holds 2 items, the second one only partially visible.
//!
//! ```rust
//! use bubbletea_listviewport::listviewport::Model;
//! use bubbletea_listviewport::style::{Dimensions, Styles, HEADER_HEIGHT, LIST_PAGER_HEIGHT};
//! use chrono::Local;
//!
//! // 30 lines of list area, 10 lines per item: 3 items per page.
//! let outer = Dimensions::new(80, 30 + HEADER_HEIGHT + LIST_PAGER_HEIGHT);
//! let mut list = Model::new(Styles::default(), outer, Local::now(), "Item", 10, 10);
//! list.sync_viewport(&vec!["row"; 100].join("\n"));
//!
//! assert_eq!(list.bottom_bound(), 2);
//! for _ in 0..3 {
//!     list.next_item();
//! }
//! assert_eq!(list.curr_item(), 3);
//! assert_eq!(list.top_bound(), 1);
//! assert_eq!(list.y_offset(), 10);
//! ```

use crate::style::{Dimensions, Styles, BULLET, HEADER_HEIGHT, LIST_PAGER_HEIGHT, WAITING_ICON};
use crate::viewport;
use chrono::{DateTime, Local};
use lipgloss_extras::lipgloss;
use tracing::trace;

/// Format of the last-updated timestamp in the pager, e.g. `01/02 15:04:05`.
pub const LAST_UPDATED_FORMAT: &str = "%m/%d %H:%M:%S";

/// A scrollable window over a list of fixed-height items.
#[derive(Debug, Clone)]
pub struct Model {
    styles: Styles,
    viewport: viewport::Model,
    top_bound: usize,
    bottom_bound: isize,
    curr: usize,
    item_height: usize,
    num_current_items: usize,
    num_total_items: usize,
    last_updated: DateTime<Local>,
    item_type_label: String,
}

impl Model {
    /// Creates a list viewport for `num_items` items of `item_height` lines.
    ///
    /// `dimensions` is the outer size of the list area; the header and pager
    /// rows are subtracted from its height.
    ///
    /// # Arguments
    ///
    /// * `styles` - Styles for the pager line
    /// * `dimensions` - Outer size, chrome included
    /// * `last_updated` - Timestamp shown in the pager
    /// * `item_type_label` - Name of the items in the pager, e.g. `"Addon"`
    /// * `num_items` - Number of loaded items
    /// * `item_height` - Rendered lines per item
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::listviewport::Model;
    /// use bubbletea_listviewport::style::{Dimensions, Styles};
    /// use chrono::Local;
    ///
    /// // 24 lines outer, 20 after chrome, 2 lines per item.
    /// let list = Model::new(Styles::default(), Dimensions::new(80, 24), Local::now(), "Pod", 50, 2);
    /// assert_eq!(list.height(), 20);
    /// assert_eq!(list.page_capacity(), 10);
    /// assert_eq!(list.bottom_bound(), 9);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `item_height` is zero.
    pub fn new(
        styles: Styles,
        dimensions: Dimensions,
        last_updated: DateTime<Local>,
        item_type_label: impl Into<String>,
        num_items: usize,
        item_height: usize,
    ) -> Self {
        assert!(item_height > 0, "list item height must be positive");

        let mut model = Self {
            styles,
            viewport: viewport::Model::new(dimensions.width, list_height(dimensions)),
            top_bound: 0,
            bottom_bound: 0,
            curr: 0,
            item_height,
            num_current_items: num_items,
            num_total_items: 0,
            last_updated,
            item_type_label: item_type_label.into(),
        };
        model.bottom_bound = model.initial_bottom_bound();
        model
    }

    /// Builder variant of [`Model::set_total_items`].
    pub fn with_total_items(mut self, total: usize) -> Self {
        self.num_total_items = total;
        self
    }

    /// Sets the number of loaded items and recomputes the bottom bound.
    ///
    /// The selection and the top bound are left alone: shrinking the list
    /// below the selection leaves it pointing past the end until the next
    /// navigation call clamps it.
    pub fn set_num_items(&mut self, num_items: usize) {
        self.num_current_items = num_items;
        self.bottom_bound = self.initial_bottom_bound();
    }

    /// Sets the total number of items, which may be larger than the number
    /// loaded. Only shown in the pager.
    pub fn set_total_items(&mut self, total: usize) {
        self.num_total_items = total;
    }

    /// Sets the timestamp shown in the pager.
    pub fn set_last_updated(&mut self, last_updated: DateTime<Local>) {
        self.last_updated = last_updated;
    }

    /// Replaces the rendered content without touching scroll position or
    /// bounds.
    pub fn sync_viewport(&mut self, content: &str) {
        self.viewport.set_content(content);
    }

    /// Number of items per page: the list height divided by the item
    /// height, rounded to the nearest integer.
    ///
    /// The list height is the full height of the scroll buffer, so every
    /// line counted here is also rendered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::listviewport::Model;
    /// use bubbletea_listviewport::style::{Dimensions, Styles, HEADER_HEIGHT, LIST_PAGER_HEIGHT};
    /// use chrono::Local;
    ///
    /// let chrome = HEADER_HEIGHT + LIST_PAGER_HEIGHT;
    /// let list = Model::new(Styles::default(), Dimensions::new(80, 15 + chrome), Local::now(), "Item", 9, 10);
    /// assert_eq!(list.page_capacity(), 2);
    /// ```
    pub fn page_capacity(&self) -> usize {
        (self.viewport.height as f32 / self.item_height as f32).round() as usize
    }

    /// Selects the first item and scrolls to the top.
    pub fn reset_curr_item(&mut self) {
        self.curr = 0;
        self.viewport.goto_top();
    }

    /// Index of the selected item.
    pub fn curr_item(&self) -> usize {
        self.curr
    }

    /// Selects the next item, shifting the window down by one item when the
    /// selection leaves it. Returns the new selection.
    ///
    /// The selection stops at the last item; on an empty list it stays at 0.
    /// A window shift scrolls the viewport by exactly `item_height` lines,
    /// so the selected item is always rendered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::listviewport::Model;
    /// use bubbletea_listviewport::style::{Dimensions, Styles, HEADER_HEIGHT, LIST_PAGER_HEIGHT};
    /// use chrono::Local;
    ///
    /// let outer = Dimensions::new(40, 2 + HEADER_HEIGHT + LIST_PAGER_HEIGHT);
    /// let mut list = Model::new(Styles::default(), outer, Local::now(), "Item", 3, 1);
    /// list.sync_viewport("a\nb\nc");
    ///
    /// assert_eq!(list.next_item(), 1);
    /// assert_eq!(list.top_bound(), 0);
    /// assert_eq!(list.next_item(), 2);
    /// assert_eq!(list.top_bound(), 1);
    /// assert_eq!(list.next_item(), 2);
    /// ```
    pub fn next_item(&mut self) -> usize {
        self.curr = (self.curr + 1).min(self.num_current_items.saturating_sub(1));

        if self.curr >= self.top_bound + self.page_capacity() {
            self.top_bound += 1;
            self.viewport.scroll_down(self.item_height);
            trace!(
                curr = self.curr,
                top_bound = self.top_bound,
                y_offset = self.viewport.y_offset,
                "list window shifted down"
            );
        }
        self.curr
    }

    /// Selects the previous item, shifting the window up by one item when
    /// the selection leaves it. Returns the new selection.
    pub fn prev_item(&mut self) -> usize {
        self.curr = self.curr.saturating_sub(1);

        if self.curr < self.top_bound {
            self.top_bound -= 1;
            self.bottom_bound -= 1;
            self.viewport.scroll_up(self.item_height);
            trace!(
                curr = self.curr,
                top_bound = self.top_bound,
                y_offset = self.viewport.y_offset,
                "list window shifted up"
            );
        }
        self.curr
    }

    /// Selects the first item and jumps to the top. Bounds are untouched.
    pub fn first_item(&mut self) -> usize {
        self.curr = 0;
        self.viewport.goto_top();
        self.curr
    }

    /// Selects the last item and jumps to the bottom. Bounds are untouched.
    pub fn last_item(&mut self) -> usize {
        self.curr = self.num_current_items.saturating_sub(1);
        self.viewport.goto_bottom();
        self.curr
    }

    /// Resizes to new outer dimensions and moves the scroll offset to
    /// `curr * item_height - page_capacity` lines, clamped to the content.
    ///
    /// This repositions the viewport only; the bounds are not recomputed and
    /// the host is expected to resync content after a resize.
    ///
    /// # Arguments
    ///
    /// * `dimensions` - New outer size; header and pager rows are subtracted
    ///   from the height as in [`Model::new`]
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.viewport.height = list_height(dimensions);
        self.viewport.width = dimensions.width;
        let offset = (self.curr * self.item_height).saturating_sub(self.page_capacity());
        self.viewport.set_y_offset(offset);
        trace!(
            width = self.viewport.width,
            height = self.viewport.height,
            y_offset = self.viewport.y_offset,
            "list viewport resized"
        );
    }

    /// Replaces the styles.
    pub fn update_styles(&mut self, styles: Styles) {
        self.styles = styles;
    }

    /// First item of the window.
    pub fn top_bound(&self) -> usize {
        self.top_bound
    }

    /// Last item of the window. Negative for an empty list.
    pub fn bottom_bound(&self) -> isize {
        self.bottom_bound
    }

    /// Scroll offset of the underlying viewport, in lines.
    pub fn y_offset(&self) -> usize {
        self.viewport.y_offset
    }

    /// Lines per item.
    pub fn item_height(&self) -> usize {
        self.item_height
    }

    /// Number of loaded items.
    pub fn num_items(&self) -> usize {
        self.num_current_items
    }

    /// Total number of items shown in the pager.
    pub fn total_items(&self) -> usize {
        self.num_total_items
    }

    /// Width of the list area.
    pub fn width(&self) -> usize {
        self.viewport.width
    }

    /// Height of the list area, chrome excluded.
    pub fn height(&self) -> usize {
        self.viewport.height
    }

    /// The pager line, empty while the total is unknown.
    ///
    /// Reads `⟳ <last updated> • <label> <selection>/<total> • Fetched
    /// <loaded>`, with the selection counted from 1 and the timestamp in
    /// [`LAST_UPDATED_FORMAT`].
    pub fn pager_content(&self) -> String {
        if self.num_total_items == 0 {
            return String::new();
        }
        format!(
            "{} {} {} {} {}/{} {} Fetched {}",
            WAITING_ICON,
            self.last_updated.format(LAST_UPDATED_FORMAT),
            BULLET,
            self.item_type_label,
            self.curr + 1,
            self.num_total_items,
            BULLET,
            self.num_current_items,
        )
    }

    /// Renders the visible slice of the list over the pager, fixed to the
    /// list width.
    pub fn view(&self) -> String {
        let list = self.viewport.view();
        let pager = self.styles.list_viewport.pager.render(&self.pager_content());
        let width = self.viewport.width as i32;
        lipgloss::Style::new()
            .width(width)
            .max_width(width)
            .render(&lipgloss::join_vertical(
                lipgloss::LEFT,
                &[list.as_str(), pager.as_str()],
            ))
    }

    fn initial_bottom_bound(&self) -> isize {
        (self.num_current_items as isize - 1).min(self.page_capacity() as isize - 1)
    }
}

fn list_height(dimensions: Dimensions) -> usize {
    dimensions
        .height
        .saturating_sub(LIST_PAGER_HEIGHT + HEADER_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn outer(list_height: usize) -> Dimensions {
        Dimensions::new(40, list_height + HEADER_HEIGHT + LIST_PAGER_HEIGHT)
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap()
    }

    // Content with `items` items of `item_height` lines each.
    fn content(items: usize, item_height: usize) -> String {
        (0..items * item_height)
            .map(|line| format!("item {} line {}", line / item_height, line % item_height))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list(list_height: usize, items: usize, item_height: usize) -> Model {
        let mut m = Model::new(
            Styles::default(),
            outer(list_height),
            fixed_time(),
            "Addon",
            items,
            item_height,
        );
        m.sync_viewport(&content(items, item_height));
        m
    }

    #[test]
    fn test_new_computes_dimensions_and_bounds() {
        let m = list(30, 10, 10);
        assert_eq!(m.height(), 30);
        assert_eq!(m.width(), 40);
        assert_eq!(m.page_capacity(), 3);
        assert_eq!(m.curr_item(), 0);
        assert_eq!(m.top_bound(), 0);
        assert_eq!(m.bottom_bound(), 2);
    }

    #[test]
    fn test_bottom_bound_limited_by_item_count() {
        let m = list(30, 2, 10);
        assert_eq!(m.bottom_bound(), 1);
    }

    #[test]
    #[should_panic(expected = "list item height must be positive")]
    fn test_zero_item_height_panics() {
        Model::new(Styles::default(), outer(10), fixed_time(), "Addon", 3, 0);
    }

    #[test]
    fn test_page_capacity_rounds_to_nearest() {
        assert_eq!(list(15, 10, 10).page_capacity(), 2);
        assert_eq!(list(14, 10, 10).page_capacity(), 1);
        assert_eq!(list(4, 10, 10).page_capacity(), 0);
    }

    #[test]
    fn test_next_item_shifts_window_past_bottom() {
        let mut m = list(30, 10, 10);
        assert_eq!(m.next_item(), 1);
        assert_eq!(m.next_item(), 2);
        assert_eq!(m.top_bound(), 0);
        assert_eq!(m.y_offset(), 0);

        assert_eq!(m.next_item(), 3);
        assert_eq!(m.top_bound(), 1);
        assert_eq!(m.y_offset(), 10);
    }

    #[test]
    fn test_next_item_clamps_at_last() {
        let mut m = list(30, 4, 10);
        for _ in 0..10 {
            m.next_item();
        }
        assert_eq!(m.curr_item(), 3);
        assert_eq!(m.top_bound(), 1);
        assert_eq!(m.y_offset(), 10);
    }

    #[test]
    fn test_prev_item_shifts_window_above_top() {
        let mut m = list(30, 10, 10);
        for _ in 0..5 {
            m.next_item();
        }
        assert_eq!(m.top_bound(), 3);
        assert_eq!(m.y_offset(), 30);

        m.prev_item();
        m.prev_item();
        assert_eq!(m.curr_item(), 3);
        assert_eq!(m.top_bound(), 3);

        assert_eq!(m.prev_item(), 2);
        assert_eq!(m.top_bound(), 2);
        assert_eq!(m.bottom_bound(), 1);
        assert_eq!(m.y_offset(), 20);
    }

    #[test]
    fn test_prev_item_clamps_at_zero() {
        let mut m = list(30, 10, 10);
        assert_eq!(m.prev_item(), 0);
        assert_eq!(m.top_bound(), 0);
        assert_eq!(m.y_offset(), 0);
    }

    #[test]
    fn test_first_and_last_jump_viewport() {
        let mut m = list(30, 10, 10);
        assert_eq!(m.last_item(), 9);
        assert_eq!(m.y_offset(), 70);
        assert_eq!(m.top_bound(), 0);

        assert_eq!(m.first_item(), 0);
        assert_eq!(m.y_offset(), 0);
    }

    #[test]
    fn test_reset_curr_item_leaves_bounds() {
        let mut m = list(30, 10, 10);
        for _ in 0..4 {
            m.next_item();
        }
        m.reset_curr_item();
        assert_eq!(m.curr_item(), 0);
        assert_eq!(m.y_offset(), 0);
        assert_eq!(m.top_bound(), 2);
    }

    #[test]
    fn test_set_num_items_keeps_selection() {
        let mut m = list(30, 10, 10);
        for _ in 0..6 {
            m.next_item();
        }
        m.set_num_items(2);
        assert_eq!(m.curr_item(), 6);
        assert_eq!(m.bottom_bound(), 1);

        m.set_num_items(2);
        assert_eq!(m.bottom_bound(), 1);

        assert_eq!(m.next_item(), 1);
    }

    #[test]
    fn test_empty_list() {
        let mut m = list(30, 0, 10);
        assert_eq!(m.bottom_bound(), -1);
        assert_eq!(m.next_item(), 0);
        assert_eq!(m.prev_item(), 0);
        assert_eq!(m.last_item(), 0);
        assert_eq!(m.first_item(), 0);
    }

    #[test]
    fn test_set_dimensions_repositions_offset() {
        let mut m = list(30, 10, 10);
        for _ in 0..5 {
            m.next_item();
        }
        m.set_dimensions(outer(20));
        assert_eq!(m.height(), 20);
        assert_eq!(m.page_capacity(), 2);
        assert_eq!(m.y_offset(), 48);
        assert_eq!(m.top_bound(), 3);
    }

    #[test]
    fn test_set_dimensions_offset_clamps_at_zero() {
        let mut m = list(30, 10, 10);
        m.set_dimensions(outer(50));
        assert_eq!(m.y_offset(), 0);
    }

    #[test]
    fn test_sync_viewport_keeps_position() {
        let mut m = list(30, 10, 10);
        for _ in 0..4 {
            m.next_item();
        }
        m.sync_viewport(&content(10, 10));
        assert_eq!(m.y_offset(), 20);
        assert_eq!(m.top_bound(), 2);
    }

    fn rendered_lines(m: &Model) -> Vec<String> {
        let out = String::from_utf8(strip_ansi_escapes::strip(m.view())).unwrap();
        out.split('\n').map(|l| l.trim_end().to_string()).collect()
    }

    fn selection_rendered(m: &Model) -> bool {
        let first_line = format!("item {} line 0", m.curr_item());
        rendered_lines(m).iter().any(|l| *l == first_line)
    }

    #[test]
    fn test_selected_item_rendered_after_every_step() {
        let mut m = list(15, 30, 1);
        assert!(selection_rendered(&m));
        for _ in 0..29 {
            m.next_item();
            assert!(selection_rendered(&m), "item {} off screen", m.curr_item());
        }
        assert_eq!(m.curr_item(), 29);
        assert_eq!(m.y_offset(), 15);
        for _ in 0..29 {
            m.prev_item();
            assert!(selection_rendered(&m), "item {} off screen", m.curr_item());
        }
        assert_eq!(m.y_offset(), 0);
    }

    #[test]
    fn test_window_renders_page_capacity_items() {
        let mut m = list(9, 10, 3);
        assert_eq!(m.page_capacity(), 3);
        for _ in 0..4 {
            m.next_item();
        }
        assert_eq!(m.top_bound(), 2);
        let lines = rendered_lines(&m);
        for item in 2..5 {
            for line in 0..3 {
                let text = format!("item {item} line {line}");
                assert!(lines.contains(&text), "missing {text:?}");
            }
        }
        assert!(!lines.contains(&"item 5 line 0".to_string()));
    }

    #[test]
    fn test_pager_empty_without_total() {
        let m = list(30, 10, 10);
        assert_eq!(m.pager_content(), "");
    }

    #[test]
    fn test_pager_content() {
        let mut m = list(30, 10, 10);
        m.set_total_items(25);
        m.next_item();
        assert_eq!(
            m.pager_content(),
            "⟳ 01/02 15:04:05 • Addon 2/25 • Fetched 10"
        );
    }

    #[test]
    fn test_view_shows_content_and_pager() {
        let mut m = list(3, 3, 1).with_total_items(3);
        m.sync_viewport("alpha\nbeta\ngamma");
        let out = String::from_utf8(strip_ansi_escapes::strip(m.view())).unwrap();
        assert!(out.contains("alpha"));
        assert!(out.contains("gamma"));
        assert!(out.contains("Addon 1/3"));
    }
}
