//! Help footer listing the key bindings of a screen.
//!
//! The short view renders bindings on one line separated by bullets and cuts
//! off with an ellipsis when the width runs out. The full view renders the
//! binding groups of [`KeyMap::full_help`] as side-by-side columns.
//!
//! ```rust
//! use bubbletea_listviewport::help::Model;
//! use bubbletea_listviewport::key::{Binding, KeyMap};
//! use crossterm::event::KeyCode;
//!
//! struct Keys {
//!     quit: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.quit]
//!     }
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.quit]]
//!     }
//! }
//!
//! let keys = Keys { quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit") };
//! let footer = Model::new().with_width(40).view(&keys);
//! assert!(footer.contains("quit"));
//! ```

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles of the help footer.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The ellipsis shown when bindings are cut off.
    pub ellipsis: Style,
    /// Keys in the short view.
    pub short_key: Style,
    /// Descriptions in the short view.
    pub short_desc: Style,
    /// Separator in the short view.
    pub short_separator: Style,
    /// Keys in the full view.
    pub full_key: Style,
    /// Descriptions in the full view.
    pub full_desc: Style,
    /// Column separator in the full view.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help footer.
#[derive(Debug, Clone)]
pub struct Model {
    /// Render the grouped full view instead of the single line.
    pub show_all: bool,
    /// Maximum width; `0` means unbounded.
    pub width: usize,
    /// Separator between bindings in the short view.
    pub short_separator: String,
    /// Separator between columns in the full view.
    pub full_separator: String,
    /// Marker for cut-off bindings.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a footer with default styles and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder variant of assigning [`Model::width`].
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short or the full view depending on [`Model::show_all`].
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders enabled bindings on a single line.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut builder = String::new();
        let mut total_width = 0;
        for binding in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = binding.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.short_key.clone().inline(true).render(&help.key),
                self.styles.short_desc.clone().inline(true).render(&help.desc),
            );
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.overflow_tail(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }
            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    /// Renders each binding group as a column.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns = Vec::new();
        let mut total_width = 0;
        for group in groups {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    format!(
                        "{} {}",
                        self.styles.full_key.clone().inline(true).render(&help.key),
                        self.styles.full_desc.clone().inline(true).render(&help.desc),
                    )
                })
                .collect();
            if rows.is_empty() {
                continue;
            }

            let column = rows.join("\n");
            let sep_width = if columns.is_empty() {
                0
            } else {
                lipgloss::width_visible(&separator)
            };
            let column_width = lipgloss::width_visible(&column) + sep_width;

            if let Some(tail) = self.overflow_tail(total_width, column_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += column_width;
            columns.push(column);
        }

        let mut parts = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    // Returns the ellipsis tail (possibly empty when even that does not
    // fit) once `item_width` more cells would overflow the width.
    fn overflow_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}
