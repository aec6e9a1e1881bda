//! Process-wide application context.
//!
//! [`AppContext`] bundles everything the UI surfaces share: the preference
//! store, the navigation/mode state, the theme, the navigator and the
//! document title. It is cheap to clone (every field is an `Arc`), so
//! frontends hand clones to their render loop or request handlers.
//!
//! # Architecture
//!
//! ```text
//! sidebar ─┐                         ┌─▶ Arc<Mutex<NavState>>   ─▶ KvStore
//! search  ─┼──▶ AppContext (clone) ──┼─▶ Arc<Mutex<ThemeState>> ─▶ KvStore
//! tool    ─┘                         └─▶ Arc<Mutex<Navigator>>  ─▶ observers
//! ```
//!
//! [`AppContext::global`] is the lazily created singleton; it is built on
//! first access and never replaced. Tests and embedders that need their own
//! instance call [`AppContext::new`] instead.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::{debug, error};

use crate::catalog::{Catalog, MenuItem};
use crate::config::ShellConfig;
use crate::nav::{MenuMode, NavState};
use crate::prefs::KvStore;
use crate::routes::{DocumentTitle, FnObserver, Navigation, Navigator, RouteEntry, RouteTable, TitleObserver};
use crate::search;
use crate::theme::{Theme, ThemeState};

static GLOBAL: OnceLock<AppContext> = OnceLock::new();

/// Shared state for one running toolbox.
#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    store: Arc<dyn KvStore>,
    nav: Arc<Mutex<NavState>>,
    theme: Arc<Mutex<ThemeState>>,
    navigator: Arc<Mutex<Navigator>>,
    title: DocumentTitle,
}

impl AppContext {
    /// Build a context over `store` with the built-in catalog and routes.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_parts(
            store,
            Catalog::builtin().clone(),
            RouteTable::builtin(),
            &ShellConfig::default().title_suffix,
        )
    }

    /// Build a context from a [`ShellConfig`].
    pub fn from_config(config: &ShellConfig) -> Self {
        Self::with_parts(
            config.open_store(),
            Catalog::builtin().clone(),
            RouteTable::builtin(),
            &config.title_suffix,
        )
    }

    /// Build a context from explicit parts.
    ///
    /// Every navigation updates the document title and returns the sidebar
    /// to list mode.
    pub fn with_parts(
        store: Arc<dyn KvStore>,
        catalog: Catalog,
        routes: RouteTable,
        title_suffix: &str,
    ) -> Self {
        let nav = Arc::new(Mutex::new(NavState::load(store.clone())));
        let theme = Arc::new(Mutex::new(ThemeState::load(store.clone())));
        let title = DocumentTitle::new(title_suffix);

        let list_reset = nav.clone();
        let navigator = Navigator::new(routes)
            .with_observer(TitleObserver::new(title.clone(), title_suffix))
            .with_observer(FnObserver(move |_: &RouteEntry| {
                list_reset
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .set_mode(MenuMode::List);
            }));

        Self {
            catalog: Arc::new(catalog),
            store,
            nav,
            theme,
            navigator: Arc::new(Mutex::new(navigator)),
            title,
        }
    }

    /// The process-wide instance, created on first access from
    /// [`ShellConfig::default`].
    pub fn global() -> &'static AppContext {
        GLOBAL.get_or_init(|| {
            debug!("Initializing global app context");
            let ctx = AppContext::from_config(&ShellConfig::default());
            ctx.log_validation();
            ctx
        })
    }

    /// Install `ctx` as the process-wide instance.
    ///
    /// Must run before the first [`global`](Self::global) call; fails if the
    /// singleton already exists.
    pub fn init_global(ctx: AppContext) -> Result<&'static AppContext, String> {
        GLOBAL
            .set(ctx)
            .map_err(|_| "Global app context is already initialized".to_string())?;
        let ctx = Self::global();
        ctx.log_validation();
        Ok(ctx)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Lock the navigation state. Each method call on the guard is one
    /// atomic step as far as other surfaces are concerned.
    pub fn nav(&self) -> MutexGuard<'_, NavState> {
        self.nav.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn theme(&self) -> MutexGuard<'_, ThemeState> {
        self.theme.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Shared handle to the document title, for observers that must not
    /// hold the whole context.
    pub fn document_title(&self) -> DocumentTitle {
        self.title.clone()
    }

    /// Filter the catalog by `query`.
    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        search::search(query, self.catalog.items())
    }

    /// Navigate to `path`, update the title and drop back to list mode.
    pub fn navigate(&self, path: &str) -> Result<Navigation, String> {
        self.navigator().navigate(path)
    }

    /// Navigate to the route of the menu item with `id`.
    pub fn open_item(&self, id: &str) -> Result<Navigation, String> {
        let route = self
            .catalog
            .get_menu_item_by_id(id)
            .map(|item| item.route.clone())
            .ok_or_else(|| format!("Unknown menu item '{id}'"))?;
        self.navigate(&route)
    }

    /// Path of the page currently shown, if any navigation happened yet.
    pub fn current_path(&self) -> Option<String> {
        self.navigator().current().map(|e| e.path.clone())
    }

    pub fn cycle_theme(&self) -> Theme {
        self.theme().cycle()
    }

    /// Cross-check catalog and routes.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let navigator = self.navigator();
        let mut problems = Vec::new();
        if let Err(p) = navigator.table().validate() {
            problems.extend(p);
        }
        if let Err(p) = self.catalog.validate(navigator.table()) {
            problems.extend(p);
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    /// Run [`validate`](Self::validate) and log each problem.
    pub fn log_validation(&self) {
        if let Err(problems) = self.validate() {
            for problem in problems {
                error!("Menu/route mismatch: {problem}");
            }
        }
    }
}
