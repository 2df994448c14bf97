//! Styles, layout constants and icons shared by the list viewport, the table
//! and the addons screen.
//!
//! Every style set implements `Default` with adaptive colors so it reads on
//! both light and dark terminals. Override individual fields to theme a
//! screen:
//!
//! ```rust
//! use bubbletea_listviewport::style::Styles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = Styles::default();
//! styles.table.selected_row = Style::new().bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Lines reserved above the list for the column header.
pub const HEADER_HEIGHT: usize = 2;

/// Lines reserved below the list for the pager.
pub const LIST_PAGER_HEIGHT: usize = 2;

/// Lines reserved for the short help footer of a full screen.
pub const FOOTER_HEIGHT: usize = 1;

/// Icon shown at the start of the pager line.
pub const WAITING_ICON: &str = "⟳";

/// Separator between pager segments.
pub const BULLET: &str = "•";

/// Appended to truncated table cells.
pub const ELLIPSIS: &str = "…";

/// Outer size handed to a component by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    /// Width in cells.
    pub width: usize,
    /// Height in lines.
    pub height: usize,
}

impl Dimensions {
    /// Creates a new size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Styles of the list viewport.
#[derive(Debug, Clone)]
pub struct ListViewportStyles {
    /// Applied to the pager line under the list.
    pub pager: Style,
}

impl Default for ListViewportStyles {
    fn default() -> Self {
        Self {
            pager: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(1, 0, 0, 0),
        }
    }
}

/// Styles of the table.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Column titles.
    pub header: Style,
    /// Unselected rows.
    pub row: Style,
    /// The selected row.
    pub selected_row: Style,
    /// Message shown when the table has no rows.
    pub empty_state: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            row: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            selected_row: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230")),
            empty_state: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// Styles that do not belong to a single component.
#[derive(Debug, Clone)]
pub struct CommonStyles {
    /// The help footer line.
    pub footer: Style,
    /// Error line shown above the footer.
    pub error: Style,
}

impl Default for CommonStyles {
    fn default() -> Self {
        Self {
            footer: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            }),
        }
    }
}

/// All styles of a screen.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    /// List viewport styles.
    pub list_viewport: ListViewportStyles,
    /// Table styles.
    pub table: TableStyles,
    /// Shared styles.
    pub common: CommonStyles,
}
