//! Developer toolbox shell: menu catalog, search, navigation state and
//! persisted preferences.
//!
//! `toolbox` is the frontend-agnostic core of the toolbox application. It
//! knows which tools exist, how the sidebar filters them, which page each
//! path shows, and which UI preferences survive a restart. Rendering lives
//! in the frontends (`toolbox-tui`, `toolbox-web`); the tool pages
//! themselves are opaque [`ToolPage`](routes::ToolPage) handles.
//!
//! # Getting started
//!
//! ```
//! use std::sync::Arc;
//! use toolbox::prelude::*;
//!
//! let ctx = AppContext::new(Arc::new(MemoryStore::new()));
//!
//! // Filter the sidebar.
//! let hits = ctx.search("format");
//! assert_eq!(hits[0].id, "json-tool");
//!
//! // Enter search mode from a keyboard shortcut.
//! ctx.nav().focus_search();
//! assert_eq!(ctx.nav().mode(), MenuMode::Search);
//!
//! // Open a tool; the title follows and the sidebar returns to list mode.
//! ctx.navigate("/tool/markdown-tool").unwrap();
//! assert_eq!(ctx.title(), "Markdown 編輯 - 開發者工具箱");
//! assert_eq!(ctx.nav().mode(), MenuMode::List);
//! ```
//!
//! # Where to find things
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | [`Catalog`](catalog::Catalog), categories, items, lookups, validation |
//! | [`search`] | Substring filter and [`SearchState`](search::SearchState) |
//! | [`prefs`] | [`KvStore`](prefs::KvStore) backends and typed [`Preference`](prefs::Preference) |
//! | [`nav`] | Sidebar collapse / menu mode / search focus state |
//! | [`theme`] | Light / dark / terminal theme cycle |
//! | [`routes`] | Route table, [`Navigator`](routes::Navigator), title observer |
//! | [`context`] | [`AppContext`](context::AppContext) singleton tying it together |
//! | [`config`] | [`ShellConfig`](config::ShellConfig) defaults |
//! | [`logging`] | Tracing layer feeding an in-UI log pane |

pub mod catalog;
pub mod config;
pub mod context;
pub mod logging;
pub mod names;
pub mod nav;
pub mod prefs;
pub mod prelude;
pub mod routes;
pub mod search;
pub mod theme;
