//! REST API endpoint handlers.
//!
//! These complement the WebSocket channel for request/response use: the
//! initial page load, search-as-you-type and the sidebar/theme controls.
//! Mutations reach WebSocket clients through the context observers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use toolbox::catalog::{CategoryGroup, MenuCategory, MenuItem};
use toolbox::context::AppContext;
use toolbox::nav::{MenuMode, NavSnapshot, NavState};
use toolbox::routes::Navigation;
use toolbox::theme::Theme;

use crate::snapshot::ShellSnapshot;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
}

type ApiError = (StatusCode, String);

/// Response body for GET /api/menu.
#[derive(Serialize)]
pub struct MenuResponse<'a> {
    pub categories: &'a [MenuCategory],
    pub groups: Vec<CategoryGroup<'a>>,
}

/// GET /api/menu: Categories and their items in display order.
pub async fn get_menu(State(app): State<AppState>) -> Json<serde_json::Value> {
    let catalog = app.ctx.catalog();
    let body = MenuResponse {
        categories: catalog.categories(),
        groups: catalog.grouped(),
    };
    Json(serde_json::to_value(body).unwrap_or_default())
}

/// Query string for GET /api/search.
#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub items: Vec<&'a MenuItem>,
}

/// GET /api/search?q=: Filter the catalog.
///
/// An empty or whitespace-only query returns every item.
pub async fn get_search(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let body = SearchResponse {
        query: &params.q,
        items: app.ctx.search(&params.q),
    };
    Json(serde_json::to_value(body).unwrap_or_default())
}

/// GET /api/state: Full state snapshot.
///
/// Used for initial page load (before the WebSocket connects) and as a
/// fallback.
pub async fn get_state(State(app): State<AppState>) -> Json<ShellSnapshot> {
    Json(ShellSnapshot::from_context(&app.ctx))
}

/// Request body for POST /api/nav.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavAction {
    ToggleCollapsed,
    FocusSearch,
    SetMode { mode: MenuMode },
    SetSearchFocused { focused: bool },
}

impl NavAction {
    pub fn apply(self, nav: &mut NavState) {
        match self {
            NavAction::ToggleCollapsed => nav.toggle_collapsed(),
            NavAction::FocusSearch => nav.focus_search(),
            NavAction::SetMode { mode } => nav.set_mode(mode),
            NavAction::SetSearchFocused { focused } => nav.set_search_focused(focused),
        }
    }
}

/// POST /api/nav: Sidebar controls. Returns the resulting flags.
pub async fn post_nav(
    State(app): State<AppState>,
    Json(action): Json<NavAction>,
) -> Json<NavSnapshot> {
    let mut nav = app.ctx.nav();
    action.apply(&mut nav);
    Json(nav.snapshot())
}

/// Request body for POST /api/navigate.
#[derive(Deserialize)]
pub struct NavigateRequest {
    pub path: String,
}

/// Request body for POST /api/open.
#[derive(Deserialize)]
pub struct OpenRequest {
    pub id: String,
}

#[derive(Serialize)]
pub struct NavigateResponse {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub title: String,
}

/// POST /api/navigate: Show the route at `path`.
///
/// Unknown paths fall back to the root redirect. Returns 404 only when the
/// route table cannot resolve anything at all.
pub async fn post_navigate(
    State(app): State<AppState>,
    Json(body): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, ApiError> {
    let navigation = app
        .ctx
        .navigate(&body.path)
        .map_err(|e| (StatusCode::NOT_FOUND, e))?;
    Ok(Json(NavigateResponse {
        navigation,
        title: app.ctx.title(),
    }))
}

/// POST /api/open: Show the route of the menu item with `id`.
///
/// Returns 404 for unknown ids.
pub async fn post_open(
    State(app): State<AppState>,
    Json(body): Json<OpenRequest>,
) -> Result<Json<NavigateResponse>, ApiError> {
    let navigation = app
        .ctx
        .open_item(&body.id)
        .map_err(|e| (StatusCode::NOT_FOUND, e))?;
    Ok(Json(NavigateResponse {
        navigation,
        title: app.ctx.title(),
    }))
}

#[derive(Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub icon: &'static str,
}

/// POST /api/theme/cycle: Advance light → dark → terminal → light.
pub async fn post_theme_cycle(State(app): State<AppState>) -> Json<ThemeResponse> {
    let theme = app.ctx.cycle_theme();
    Json(ThemeResponse {
        theme,
        icon: theme.icon(),
    })
}
