#![warn(missing_docs)]

//! # bubbletea-listviewport
//!
//! A paginated list viewport for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, plus the table and screen built on top of it.
//!
//! ## Overview
//!
//! Terminal lists usually hold more items than fit on screen. The
//! [`listviewport`] keeps the selected item, the window of visible items and
//! the scroll offset of the rendered text in step while the user moves item
//! by item, while the item count changes and while the terminal is resized.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`viewport`] | Scroll buffer: content lines and a vertical offset |
//! | [`listviewport`] | Selection and window bounds over fixed-height items, with a pager line |
//! | [`table`] | Flex-width columns rendered one row per item through a list viewport |
//! | [`addons`] | Addon manager screen: install and remove through an injected client |
//! | [`help`] | Key binding footer |
//! | [`key`] | Key bindings matched against `KeyMsg` |
//! | [`style`] | Styles, layout constants and icons |
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_listviewport::prelude::*;
//!
//! let columns = vec![Column::new("Name", 8, 1), Column::new("Status", 8, 1)];
//! let rows: Vec<Row> = (0..100)
//!     .map(|i| Row::new(vec![format!("item-{i}"), "ok".into()]))
//!     .collect();
//! let mut table = Table::new(Styles::default(), Dimensions::new(60, 14), columns, rows, "Item", None);
//!
//! // 10 rows fit: the window starts moving on the 11th.
//! for _ in 0..10 {
//!     table.next_item();
//! }
//! assert_eq!(table.rows_viewport().top_bound(), 1);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! Screens expose `update(msg) -> Option<Cmd>` and `view() -> String` so
//! they can be embedded in an application model and fed its messages; see
//! [`addons::Model`].
//!
//! ## Logging
//!
//! Components emit `tracing` events (window shifts at `trace`, content syncs
//! and dispatched operations at `debug`, failed operations at `warn`). No
//! subscriber is installed by this crate.

pub mod addons;
pub mod help;
pub mod key;
pub mod listviewport;
pub mod style;
pub mod table;
pub mod viewport;

pub use addons::{
    AddonClient, AddonError, AddonInfo, AddonKeyMap, InstalledMsg, Model as AddonsScreen,
    RemovedMsg,
};
pub use help::Model as HelpModel;
pub use key::{Binding, KeyMap, KeyPress};
pub use listviewport::Model as ListViewport;
pub use style::{Dimensions, Styles};
pub use table::{Column, Model as Table, Row};
pub use viewport::Model as Viewport;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_listviewport::prelude::*;
///
/// let list = ListViewport::new(Styles::default(), Dimensions::new(40, 14), chrono::Local::now(), "Item", 3, 1);
/// assert_eq!(list.page_capacity(), 10);
/// ```
pub mod prelude {
    pub use crate::addons::{
        AddonClient, AddonError, AddonInfo, AddonKeyMap, InstalledMsg, Model as AddonsScreen,
        RemovedMsg,
    };
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::listviewport::Model as ListViewport;
    pub use crate::style::{Dimensions, Styles};
    pub use crate::table::{Column, Model as Table, Row};
    pub use crate::viewport::Model as Viewport;
}
