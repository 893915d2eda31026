//! Keeps overlay state consistent with the browser location.
//!
//! Back/forward navigation changes the path without going through the nav
//! click handlers, so every location change is reconciled here against the
//! store. Route sync uses the pre-empting `open`/`close` entry points: a
//! history pop must win over whatever transition is already running.

use crate::camera::CameraPose;
use crate::overlay::Overlay;
use crate::store::SceneStore;
use crate::transition::{TransitionController, TransitionId, TransitionOrigin};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Shop,
    Product(String),
    /// Anything else. Renders nothing extra.
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        // drop query/fragment, then tolerate trailing slashes
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let mut parts = trimmed.split('/').skip(1);
        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Route::Home,
            (Some("shop"), None, _) => Route::Shop,
            (Some("shop"), Some(id), None) if !id.is_empty() => Route::Product(id.to_string()),
            _ if trimmed.is_empty() => Route::Home,
            _ => Route::Unknown(path.to_string()),
        }
    }

    /// `/shop` and `/shop/:id` both keep the shop overlay open.
    #[inline]
    pub fn is_shop_family(&self) -> bool {
        matches!(self, Route::Shop | Route::Product(_))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Shop => "/shop".to_string(),
            Route::Product(id) => format!("/shop/{id}"),
            Route::Unknown(p) => p.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What a location change caused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAction {
    None,
    OpenedShop(TransitionId),
    ClosedShop(TransitionId),
}

#[derive(Clone, Debug)]
pub struct RouteSync {
    current: Route,
}

impl Default for RouteSync {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl RouteSync {
    pub fn new(initial: Route) -> Self {
        Self { current: initial }
    }

    #[inline]
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Record an in-app `pushState` without reconciling. The click handler
    /// that pushed already started the matching transition.
    pub fn observe(&mut self, path: &str) {
        self.current = Route::parse(path);
    }

    /// Reconcile after the location changed behind the app's back
    /// (popstate, initial load).
    pub fn on_location_change(
        &mut self,
        path: &str,
        store: &mut SceneStore,
        transitions: &mut TransitionController,
        camera: &CameraPose,
    ) -> RouteAction {
        let route = Route::parse(path);
        log::info!("[route] {} -> {}", self.current, route);
        self.current = route;

        let state = store.state();
        let shop_visible = state.is_visible(Overlay::Shop);
        let shop_opening = state.is_transitioning_to(Overlay::Shop);

        if self.current.is_shop_family() {
            if shop_visible || shop_opening {
                return RouteAction::None;
            }
            return match transitions.open(
                Overlay::Shop,
                store,
                camera,
                TransitionOrigin::Navigation,
            ) {
                Some(id) => {
                    store.set_current_section(Overlay::Shop.section());
                    RouteAction::OpenedShop(id)
                }
                None => RouteAction::None,
            };
        }

        // an opening that has not revealed yet is closed the same way
        if !(shop_visible || shop_opening) {
            return RouteAction::None;
        }
        match transitions.close(Overlay::Shop, store, camera, TransitionOrigin::Navigation) {
            Some(id) => {
                // leaving via history behaves exactly like the Home click
                transitions.mark_user_requested();
                RouteAction::ClosedShop(id)
            }
            None => RouteAction::None,
        }
    }
}
