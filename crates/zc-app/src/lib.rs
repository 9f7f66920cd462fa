//! Editor layer for zonecharge.
//!
//! Ties the form crates to an operator session: the selected-zone storage,
//! the catalog and its search, click dispatch by element role, debounced
//! search handlers, the save report and the zone-list source. Frontends
//! drive an [`Editor`] and render from its accessors.

pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod report;
pub mod roles;
pub mod script;
pub mod search;
pub mod storage;
pub mod zone_source;

// Re-export key types for convenience
pub use config::{DEFAULT_ZONE_LIST_URL, DebounceConfig, EditorConfig};
pub use debounce::Debouncer;
pub use editor::{Editor, SaveOutcome};
pub use error::{AppError, AppResult};
pub use report::{REPORT_TITLE, Report, date_format, render_report};
pub use roles::{ElementRole, InputRef};
pub use script::{Action, Script, run_script};
pub use search::SearchList;
pub use storage::{ChangeKind, ChangeNotice, Storage};
pub use zone_source::{ZoneSource, load_zone_list};
