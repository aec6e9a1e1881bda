//! Convenience re-exports for common `toolbox` types.
//!
//! ```ignore
//! use toolbox::prelude::*;
//! ```
//!
//! Backends and helpers used only by frontends (the tracing layer, the
//! route-table constructors) are left out; import those from their modules.

pub use crate::catalog::{Catalog, CategoryGroup, MenuCategory, MenuItem};
pub use crate::config::{PrefsLocation, ShellConfig};
pub use crate::context::AppContext;
pub use crate::nav::{MenuMode, NavSnapshot, NavState};
pub use crate::prefs::{FileStore, KvStore, MemoryStore, Preference, StoredValue};
pub use crate::routes::{Navigation, NavigationObserver, RouteEntry, RouteMeta, ToolPage};
pub use crate::search::{SearchState, search};
pub use crate::theme::{Theme, ThemeState};
