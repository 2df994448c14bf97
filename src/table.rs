//! Table rendered through a [`listviewport`](crate::listviewport).
//!
//! Rows are one line each. Every change that affects the rendered rows (row
//! count, cell content, selection, width) re-renders all rows into one
//! content string and hands it to the list viewport, which decides which
//! slice is visible.
//!
//! Column widths come from [`layout_columns`]: every column gets its minimum
//! width and the remaining width is split in proportion to the flex weights.
//!
//! ```rust
//! use bubbletea_listviewport::style::{Dimensions, Styles};
//! use bubbletea_listviewport::table::{Column, Model, Row};
//!
//! let columns = vec![Column::new("Name", 8, 1), Column::new("Version", 8, 1)];
//! let rows = vec![
//!     Row::new(vec!["dns".into(), "1.0".into()]),
//!     Row::new(vec!["ingress".into(), "2.3".into()]),
//! ];
//! let mut table = Model::new(Styles::default(), Dimensions::new(40, 10), columns, rows, "Row", None);
//! table.next_item();
//! assert_eq!(table.selected_row().map(|r| r.cells[0].as_str()), Some("ingress"));
//! ```

use crate::listviewport;
use crate::style::{Dimensions, Styles, ELLIPSIS};
use chrono::Local;
use lipgloss_extras::lipgloss;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lines per table row.
pub const ROW_HEIGHT: usize = 1;

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Width never given up when space is short.
    pub min_width: usize,
    /// Share of the spare width relative to the other columns.
    pub flex: usize,
    /// Width assigned by the last layout pass.
    pub width: usize,
}

impl Column {
    /// Creates a column; its width starts at `min_width`.
    pub fn new(title: impl Into<String>, min_width: usize, flex: usize) -> Self {
        Self {
            title: title.into(),
            min_width,
            flex,
            width: min_width,
        }
    }
}

/// A table row, one display string per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell contents.
    pub cells: Vec<String>,
}

impl Row {
    /// Creates a row from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Assigns each column its minimum width plus a flex-weighted share of
/// whatever is left of `total_width`.
///
/// Shares are rounded down; the cells lost to rounding go one each to the
/// flex columns from left to right. When the minimum widths alone exceed
/// `total_width`, columns keep their minimum widths.
///
/// # Examples
///
/// ```rust
/// use bubbletea_listviewport::table::{layout_columns, Column};
///
/// let mut columns = vec![Column::new("Name", 10, 2), Column::new("Size", 6, 1)];
/// layout_columns(&mut columns, 31);
/// assert_eq!(columns[0].width, 20);
/// assert_eq!(columns[1].width, 11);
/// ```
pub fn layout_columns(columns: &mut [Column], total_width: usize) {
    let min_total: usize = columns.iter().map(|c| c.min_width).sum();
    let flex_total: usize = columns.iter().map(|c| c.flex).sum();
    for column in columns.iter_mut() {
        column.width = column.min_width;
    }
    if total_width <= min_total || flex_total == 0 {
        return;
    }

    let spare = total_width - min_total;
    let mut given = 0;
    for column in columns.iter_mut() {
        let share = spare * column.flex / flex_total;
        column.width += share;
        given += share;
    }

    let mut leftover = spare - given;
    for column in columns.iter_mut().filter(|c| c.flex > 0) {
        if leftover == 0 {
            break;
        }
        column.width += 1;
        leftover -= 1;
    }
}

/// A table with a scrolling, selectable body.
#[derive(Debug, Clone)]
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
    empty_state: Option<String>,
    styles: Styles,
    dimensions: Dimensions,
    rows_viewport: listviewport::Model,
}

impl Model {
    /// Creates a table and renders its rows.
    ///
    /// # Arguments
    ///
    /// * `styles` - Styles of the table and its list viewport
    /// * `dimensions` - Outer size; the header and pager rows come out of
    ///   the height
    /// * `columns` - Column definitions, laid out for `dimensions.width`
    /// * `rows` - Initial rows; the pager total starts at their count
    /// * `item_type_label` - Name of the rows in the pager
    /// * `empty_state` - Shown instead of the body when there are no rows
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_listviewport::style::{Dimensions, Styles};
    /// use bubbletea_listviewport::table::{Column, Model};
    ///
    /// let table = Model::new(
    ///     Styles::default(),
    ///     Dimensions::new(40, 10),
    ///     vec![Column::new("Name", 10, 1)],
    ///     Vec::new(),
    ///     "Row",
    ///     Some("nothing here".into()),
    /// );
    /// assert!(table.selected_row().is_none());
    /// assert!(table.view().contains("nothing here"));
    /// ```
    pub fn new(
        styles: Styles,
        dimensions: Dimensions,
        columns: Vec<Column>,
        rows: Vec<Row>,
        item_type_label: impl Into<String>,
        empty_state: Option<String>,
    ) -> Self {
        let rows_viewport = listviewport::Model::new(
            styles.clone(),
            dimensions,
            Local::now(),
            item_type_label,
            rows.len(),
            ROW_HEIGHT,
        )
        .with_total_items(rows.len());

        let mut model = Self {
            columns,
            rows,
            empty_state,
            styles,
            dimensions,
            rows_viewport,
        };
        layout_columns(&mut model.columns, dimensions.width);
        model.sync_viewport_content();
        model
    }

    /// Resizes the table, lays out the columns for the new width and
    /// re-renders the rows.
    ///
    /// The list viewport repositions its scroll offset for the new height
    /// (see [`listviewport::Model::set_dimensions`]).
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        layout_columns(&mut self.columns, dimensions.width);
        self.rows_viewport.set_dimensions(dimensions);
        self.sync_viewport_content();
    }

    /// Replaces all rows.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.rows_viewport.set_num_items(self.rows.len());
        self.rows_viewport.set_total_items(self.rows.len());
        self.rows_viewport.set_last_updated(Local::now());
        self.sync_viewport_content();
    }

    /// Sets one cell and re-renders. Returns `false`, changing nothing, when
    /// the cell does not exist.
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) -> bool {
        let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column)) else {
            return false;
        };
        *cell = value.into();
        self.sync_viewport_content();
        true
    }

    /// Re-renders every row into the list viewport.
    ///
    /// Each row renders to exactly one line, so line `i` of the content is
    /// row `i` and the list viewport's item arithmetic holds. Called by every
    /// method that changes rows, selection or width; hosts only need it after
    /// changing rows through a path the table does not see.
    pub fn sync_viewport_content(&mut self) {
        let content = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.render_row(i, row))
            .collect::<Vec<_>>()
            .join("\n");
        self.rows_viewport.sync_viewport(&content);
        debug!(rows = self.rows.len(), "table content synced");
    }

    /// Selects the next row and moves the highlight with it.
    ///
    /// Returns the new selection. The window scrolls one row when the
    /// selection leaves it.
    pub fn next_item(&mut self) -> usize {
        let curr = self.rows_viewport.next_item();
        self.sync_viewport_content();
        curr
    }

    /// Selects the previous row.
    pub fn prev_item(&mut self) -> usize {
        let curr = self.rows_viewport.prev_item();
        self.sync_viewport_content();
        curr
    }

    /// Selects the first row.
    pub fn first_item(&mut self) -> usize {
        let curr = self.rows_viewport.first_item();
        self.sync_viewport_content();
        curr
    }

    /// Selects the last row.
    pub fn last_item(&mut self) -> usize {
        let curr = self.rows_viewport.last_item();
        self.sync_viewport_content();
        curr
    }

    /// Selects the first row and scrolls to the top.
    pub fn reset_curr_item(&mut self) {
        self.rows_viewport.reset_curr_item();
        self.sync_viewport_content();
    }

    /// Index of the selected row.
    pub fn curr_item(&self) -> usize {
        self.rows_viewport.curr_item()
    }

    /// The selected row, if the table has any rows.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.curr_item())
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The columns with their current widths.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The list viewport showing the rows.
    pub fn rows_viewport(&self) -> &listviewport::Model {
        &self.rows_viewport
    }

    /// Current outer size.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Replaces the styles of the table and its list viewport.
    pub fn update_styles(&mut self, styles: Styles) {
        self.rows_viewport.update_styles(styles.clone());
        self.styles = styles;
        self.sync_viewport_content();
    }

    /// Renders the header over the rows, or over the empty-state message
    /// when there are no rows.
    pub fn view(&self) -> String {
        let header = self.render_header();
        let body = match &self.empty_state {
            Some(empty) if self.rows.is_empty() => self.styles.table.empty_state.render(empty),
            _ => self.rows_viewport.view(),
        };
        lipgloss::join_vertical(lipgloss::LEFT, &[header.as_str(), body.as_str()])
    }

    fn render_header(&self) -> String {
        let titles: String = self
            .columns
            .iter()
            .map(|c| fit_cell(&c.title, c.width))
            .collect();
        let rule = "─".repeat(self.columns.iter().map(|c| c.width).sum());
        format!("{}\n{}", self.styles.table.header.render(&titles), rule)
    }

    fn render_row(&self, index: usize, row: &Row) -> String {
        let line: String = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = row.cells.get(i).map(String::as_str).unwrap_or_default();
                fit_cell(cell, column.width)
            })
            .collect();
        if index == self.curr_item() {
            self.styles.table.selected_row.render(&line)
        } else {
            self.styles.table.row.render(&line)
        }
    }
}

// Pads or truncates `text` to exactly `width` cells, keeping the last cell
// blank as a column gap. Control characters become spaces so a cell never
// spans more than one line.
fn fit_cell(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let text: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    let text = text.as_str();
    let avail = width - 1;
    let text_width = text.width();
    if text_width <= avail {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let ellipsis_width = ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    if avail >= ellipsis_width {
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w + ellipsis_width > avail {
                break;
            }
            used += w;
            out.push(ch);
        }
        out.push_str(ELLIPSIS);
        used += ellipsis_width;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HEADER_HEIGHT, LIST_PAGER_HEIGHT};

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Title", 8, 3),
            Column::new("Status", 8, 1),
            Column::new("Version", 8, 1),
            Column::new("Description", 10, 5),
        ]
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Row::new(vec![
                    format!("addon-{i}"),
                    "✗".to_string(),
                    "1.0".to_string(),
                    format!("description {i}"),
                ])
            })
            .collect()
    }

    fn table(list_height: usize, n: usize) -> Model {
        Model::new(
            Styles::default(),
            Dimensions::new(60, list_height + HEADER_HEIGHT + LIST_PAGER_HEIGHT),
            columns(),
            rows(n),
            "Addon",
            Some("not found".to_string()),
        )
    }

    #[test]
    fn test_layout_distributes_by_flex() {
        let mut cols = columns();
        layout_columns(&mut cols, 50);
        let widths: Vec<usize> = cols.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![13, 10, 9, 18]);
        assert_eq!(widths.iter().sum::<usize>(), 50);
    }

    #[test]
    fn test_layout_keeps_minimums_when_narrow() {
        let mut cols = columns();
        layout_columns(&mut cols, 20);
        let widths: Vec<usize> = cols.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![8, 8, 8, 10]);
    }

    #[test]
    fn test_layout_without_flex_keeps_minimums() {
        let mut cols = vec![Column::new("A", 4, 0), Column::new("B", 6, 0)];
        layout_columns(&mut cols, 100);
        assert_eq!(cols[0].width, 4);
        assert_eq!(cols[1].width, 6);
    }

    #[test]
    fn test_fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("abc", 6), "abc   ");
        assert_eq!(fit_cell("abcdefgh", 6), "abcd… ");
        assert_eq!(fit_cell("abcdef", 6), "abcd… ");
        assert_eq!(fit_cell("abcde", 6), "abcde ");
        assert_eq!(fit_cell("abc", 1), " ");
        assert_eq!(fit_cell("abc", 0), "");
    }

    #[test]
    fn test_fit_cell_flattens_control_characters() {
        assert_eq!(fit_cell("two\nlines", 12), "two lines   ");
        assert_eq!(fit_cell("a\tb", 5), "a b  ");
        assert!(!fit_cell("x\r\ny", 8).contains(['\n', '\r']));
    }

    #[test]
    fn test_multiline_cell_keeps_one_line_per_row() {
        let mut data = rows(6);
        data[0].cells[3] = "two\nlines".to_string();
        let mut t = Model::new(
            Styles::default(),
            Dimensions::new(60, 3 + HEADER_HEIGHT + LIST_PAGER_HEIGHT),
            columns(),
            data,
            "Addon",
            None,
        );
        assert!(plain(&t.view()).contains("two lines"));

        for _ in 0..4 {
            t.next_item();
        }
        assert_eq!(t.rows_viewport().y_offset(), 2);
        let out = plain(&t.view());
        assert!(out.contains("addon-2"));
        assert!(out.contains("addon-4"));
        assert!(!out.contains("lines"));
    }

    #[test]
    fn test_new_syncs_rows_into_viewport() {
        let t = table(5, 3);
        assert_eq!(t.rows_viewport().num_items(), 3);
        let out = plain(&t.view());
        assert!(out.contains("Title"));
        assert!(out.contains("addon-0"));
        assert!(out.contains("addon-2"));
    }

    #[test]
    fn test_navigation_scrolls_rows() {
        let mut t = table(3, 6);
        assert_eq!(t.next_item(), 1);
        assert_eq!(t.next_item(), 2);
        assert_eq!(t.next_item(), 3);
        assert_eq!(t.rows_viewport().top_bound(), 1);
        assert_eq!(t.rows_viewport().y_offset(), 1);

        let out = plain(&t.view());
        assert!(!out.contains("addon-0"));
        assert!(out.contains("addon-3"));

        assert_eq!(t.prev_item(), 2);
        assert_eq!(t.first_item(), 0);
        assert_eq!(t.last_item(), 5);
        assert_eq!(t.selected_row().map(|r| r.cells[0].as_str()), Some("addon-5"));
        t.reset_curr_item();
        assert_eq!(t.curr_item(), 0);
    }

    #[test]
    fn test_set_cell_updates_rendered_content() {
        let mut t = table(5, 3);
        assert!(t.set_cell(1, 1, "✓"));
        assert_eq!(t.rows()[1].cells[1], "✓");
        assert!(!t.set_cell(7, 1, "✓"));
        assert!(!t.set_cell(1, 9, "✓"));
    }

    #[test]
    fn test_set_rows_updates_counts() {
        let mut t = table(5, 3);
        t.set_rows(rows(8));
        assert_eq!(t.rows_viewport().num_items(), 8);
        assert_eq!(t.rows_viewport().total_items(), 8);
        assert!(plain(&t.view()).contains("Fetched 8"));
    }

    #[test]
    fn test_empty_state_shown_without_rows() {
        let mut t = table(5, 0);
        assert!(t.selected_row().is_none());
        assert_eq!(t.next_item(), 0);
        assert!(plain(&t.view()).contains("not found"));

        t.set_rows(rows(1));
        assert!(!plain(&t.view()).contains("not found"));
    }

    #[test]
    fn test_set_dimensions_relays_out_columns() {
        let mut t = table(5, 3);
        t.set_dimensions(Dimensions::new(50, 20));
        assert_eq!(t.columns().iter().map(|c| c.width).sum::<usize>(), 50);
        assert_eq!(t.rows_viewport().height(), 16);
        assert_eq!(t.dimensions(), Dimensions::new(50, 20));
    }
}
