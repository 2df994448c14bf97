//! Addon manager screen.
//!
//! Lists the addons of a catalog in a four-column table (title, status,
//! version, description) and lets the user install or remove the selected
//! one. The backend is an [`AddonClient`] handed to [`Model::new`]; install
//! and remove run as commands that report back with [`InstalledMsg`] and
//! [`RemovedMsg`], whose results update the status column or show an error
//! line above the footer.
//!
//! ```rust
//! use std::sync::Arc;
//! use bubbletea_listviewport::addons::{AddonClient, AddonError, AddonInfo, Model};
//!
//! struct Offline;
//!
//! impl AddonClient for Offline {
//!     fn is_enabled(&self, _name: &str) -> Result<bool, AddonError> {
//!         Ok(false)
//!     }
//!     fn install(&self, name: &str) -> Result<(), AddonError> {
//!         Err(AddonError::Unavailable(format!("cannot install {name} offline")))
//!     }
//!     fn remove(&self, name: &str) -> Result<(), AddonError> {
//!         Err(AddonError::Unavailable(format!("cannot remove {name} offline")))
//!     }
//! }
//!
//! let catalog = vec![AddonInfo::new("dns", "1.0", "CoreDNS")];
//! let screen = Model::new(Arc::new(Offline), &catalog).unwrap();
//! assert_eq!(screen.table().rows().len(), 1);
//! ```

use crate::help;
use crate::key::{self, KeyMap};
use crate::style::{Dimensions, Styles, FOOTER_HEIGHT};
use crate::table::{self, Column, Row};
use bubbletea_rs::{Cmd, KeyMsg, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Status cell of an installed addon.
pub const INSTALLED: &str = "✓";
/// Status cell of an addon that is not installed.
pub const NOT_INSTALLED: &str = "✗";

/// Initial width, used until the first window size arrives.
pub const MIN_WIDTH: usize = 50;
/// Initial height, used until the first window size arrives.
pub const MIN_HEIGHT: usize = 10;

/// Index of the title column.
pub const TITLE_COLUMN: usize = 0;
/// Index of the status column.
pub const STATUS_COLUMN: usize = 1;

const EMPTY_STATE: &str = "not found";

/// Errors reported by an [`AddonClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddonError {
    /// The backend does not know the addon.
    #[error("addon `{0}` not found")]
    NotFound(String),
    /// The backend ran the operation and it failed.
    #[error("addon `{addon}`: {reason}")]
    Command {
        /// Addon the operation was run on.
        addon: String,
        /// Backend-provided failure description.
        reason: String,
    },
    /// The backend could not be reached.
    #[error("addon backend unavailable: {0}")]
    Unavailable(String),
}

/// Backend that knows which addons are enabled and can change that.
///
/// Calls may block. `install` and `remove` run on tokio's blocking pool from
/// the commands returned by [`Model::update`], never inside `update` itself;
/// `is_enabled` is only called while the screen is built.
pub trait AddonClient: Send + Sync {
    /// Whether the addon is currently enabled.
    fn is_enabled(&self, name: &str) -> Result<bool, AddonError>;
    /// Enables the addon.
    fn install(&self, name: &str) -> Result<(), AddonError>;
    /// Disables the addon.
    fn remove(&self, name: &str) -> Result<(), AddonError>;
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
    /// Addon name, passed to the client.
    pub name: String,
    /// Version shown in the table.
    pub version: String,
    /// Description shown in the table.
    pub description: String,
}

impl AddonInfo {
    /// Creates a catalog entry.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }
}

/// One table row of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    /// Addon name.
    pub title: String,
    /// [`INSTALLED`] or [`NOT_INSTALLED`].
    pub status: String,
    /// Version.
    pub version: String,
    /// Description.
    pub description: String,
}

impl From<Addon> for Row {
    fn from(addon: Addon) -> Self {
        Row::new(vec![
            addon.title,
            addon.status,
            addon.version,
            addon.description,
        ])
    }
}

/// Sent when an install command finishes.
#[derive(Debug, Clone)]
pub struct InstalledMsg {
    /// Row the command was started from.
    pub index: usize,
    /// Outcome reported by the client.
    pub result: Result<(), AddonError>,
}

/// Sent when a remove command finishes.
#[derive(Debug, Clone)]
pub struct RemovedMsg {
    /// Row the command was started from.
    pub index: usize,
    /// Outcome reported by the client.
    pub result: Result<(), AddonError>,
}

/// Key bindings of the addon screen.
#[derive(Debug, Clone)]
pub struct AddonKeyMap {
    /// Select the previous addon.
    pub up: key::Binding,
    /// Select the next addon.
    pub down: key::Binding,
    /// Select the first addon.
    pub top: key::Binding,
    /// Select the last addon.
    pub bottom: key::Binding,
    /// Install the selected addon.
    pub install: key::Binding,
    /// Remove the selected addon.
    pub remove: key::Binding,
    /// Toggle the full help.
    pub help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for AddonKeyMap {
    fn default() -> Self {
        Self {
            up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            top: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first"),
            bottom: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last"),
            install: key::Binding::new(vec![KeyCode::Char('i')]).with_help("i", "install"),
            remove: key::Binding::new(vec![KeyCode::Char('d')]).with_help("d", "remove"),
            help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: key::Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl KeyMap for AddonKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.up,
            &self.down,
            &self.install,
            &self.remove,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.top, &self.bottom],
            vec![&self.install, &self.remove],
            vec![&self.help, &self.quit],
        ]
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Install,
    Remove,
}

/// The addon manager screen.
pub struct Model {
    table: table::Model,
    styles: Styles,
    client: Arc<dyn AddonClient>,
    help: help::Model,
    keys: AddonKeyMap,
    last_error: Option<String>,
    window: Dimensions,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.table)
            .field("keys", &self.keys)
            .field("last_error", &self.last_error)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// The table columns: title, status, version and description.
pub fn columns() -> Vec<Column> {
    vec![
        Column::new("Title", 8, 3),
        Column::new("Status", 8, 1),
        Column::new("Version", 8, 1),
        Column::new("Description", 10, 5),
    ]
}

impl Model {
    /// Builds the screen for `catalog`, asking `client` for the status of
    /// every addon.
    ///
    /// # Errors
    ///
    /// Returns the first error the client reports while querying statuses.
    pub fn new(client: Arc<dyn AddonClient>, catalog: &[AddonInfo]) -> Result<Self, AddonError> {
        Self::with_styles(client, catalog, Styles::default())
    }

    /// Like [`Model::new`] with custom styles.
    ///
    /// # Errors
    ///
    /// Returns the first error the client reports while querying statuses.
    pub fn with_styles(
        client: Arc<dyn AddonClient>,
        catalog: &[AddonInfo],
        styles: Styles,
    ) -> Result<Self, AddonError> {
        let rows = catalog
            .iter()
            .map(|info| {
                let status = if client.is_enabled(&info.name)? {
                    INSTALLED
                } else {
                    NOT_INSTALLED
                };
                Ok(Row::from(Addon {
                    title: info.name.clone(),
                    status: status.to_string(),
                    version: info.version.clone(),
                    description: info.description.clone(),
                }))
            })
            .collect::<Result<Vec<_>, AddonError>>()?;
        debug!(addons = rows.len(), "addon catalog loaded");

        let table = table::Model::new(
            styles.clone(),
            Dimensions::new(MIN_WIDTH, MIN_HEIGHT),
            columns(),
            rows,
            "Addon",
            Some(EMPTY_STATE.to_string()),
        );

        let mut model = Self {
            table,
            styles,
            client,
            help: help::Model::new(),
            keys: AddonKeyMap::default(),
            last_error: None,
            window: Dimensions::new(MIN_WIDTH, MIN_HEIGHT),
        };
        model.layout();
        Ok(model)
    }

    /// Replaces the key bindings.
    pub fn with_keys(mut self, keys: AddonKeyMap) -> Self {
        self.keys = keys;
        self.layout();
        self
    }

    /// The addon table.
    pub fn table(&self) -> &table::Model {
        &self.table
    }

    /// The message of the last failed operation, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Handles window resizes, key presses and operation completions.
    ///
    /// Install and remove return a command that calls the client; its
    /// completion message has to be fed back into `update`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.window = Dimensions::new(size.width as usize, size.height as usize);
            self.layout();
            return None;
        }

        if let Some(done) = msg.downcast_ref::<InstalledMsg>() {
            self.finish(done.index, &done.result, INSTALLED);
            return None;
        }

        if let Some(done) = msg.downcast_ref::<RemovedMsg>() {
            self.finish(done.index, &done.result, NOT_INSTALLED);
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    /// Renders the table, the last error (if any) and the help footer.
    pub fn view(&self) -> String {
        let mut parts = vec![self.table.view()];
        if let Some(err) = &self.last_error {
            parts.push(self.styles.common.error.render(err));
        }
        parts.push(self.styles.common.footer.render(&self.help.view(&self.keys)));

        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        lipgloss::join_vertical(lipgloss::LEFT, &parts)
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keys.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        } else if self.keys.up.matches(key_msg) {
            self.table.prev_item();
        } else if self.keys.down.matches(key_msg) {
            self.table.next_item();
        } else if self.keys.top.matches(key_msg) {
            self.table.first_item();
        } else if self.keys.bottom.matches(key_msg) {
            self.table.last_item();
        } else if self.keys.install.matches(key_msg) {
            return self.dispatch(Operation::Install);
        } else if self.keys.remove.matches(key_msg) {
            return self.dispatch(Operation::Remove);
        } else if self.keys.help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
            self.layout();
        }
        None
    }

    // Gives the table whatever the footer and error line leave of the window.
    fn layout(&mut self) {
        self.help.width = self.window.width;
        let height = self.window.height.saturating_sub(self.chrome_height());
        let dimensions = Dimensions::new(self.window.width, height);
        if dimensions != self.table.dimensions() {
            self.table.set_dimensions(dimensions);
        }
    }

    fn chrome_height(&self) -> usize {
        let footer = line_count(&self.help.view(&self.keys)).max(FOOTER_HEIGHT);
        let error = self.last_error.as_deref().map_or(0, line_count);
        footer + error
    }

    fn dispatch(&self, operation: Operation) -> Option<Cmd> {
        let index = self.table.curr_item();
        let name = self.table.selected_row()?.cells.get(TITLE_COLUMN)?.clone();
        let client = Arc::clone(&self.client);
        debug!(addon = %name, ?operation, "dispatching addon operation");

        let cmd: Cmd = Box::pin(async move {
            let addon = name.clone();
            let result = tokio::task::spawn_blocking(move || match operation {
                Operation::Install => client.install(&addon),
                Operation::Remove => client.remove(&addon),
            })
            .await
            .unwrap_or_else(|err| {
                Err(AddonError::Command {
                    addon: name,
                    reason: format!("{operation:?} did not finish: {err}"),
                })
            });

            let msg: Msg = match operation {
                Operation::Install => Box::new(InstalledMsg { index, result }),
                Operation::Remove => Box::new(RemovedMsg { index, result }),
            };
            Some(msg)
        });
        Some(cmd)
    }

    fn finish(&mut self, index: usize, result: &Result<(), AddonError>, status: &str) {
        match result {
            Ok(()) => {
                self.table.set_cell(index, STATUS_COLUMN, status);
                self.last_error = None;
            }
            Err(err) => {
                warn!(index, error = %err, "addon operation failed");
                self.last_error = Some(err.to_string());
            }
        }
        self.layout();
    }
}

fn line_count(s: &str) -> usize {
    s.split('\n').count()
}
