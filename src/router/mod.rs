//! Client-side router
//!
//! Maps path strings to page renderers and drives the history backend, so
//! navigation never reloads the page. When the app is hosted under a sub-path
//! the prefix is added on the way out and stripped on the way in.

mod query;

pub use query::{Location, QueryParams};

use log::debug;
use rustc_hash::FxHashMap;

use crate::config::AppConfig;
use crate::error::Result;
use crate::platform::HistoryBackend;
use crate::view::{Page, Renderer, ViewState};

/// Path of the list/compose page
pub const ROUTE_HOME: &str = "/";
/// Path of the full-screen display page
pub const ROUTE_SHOW: &str = "/show";
/// Query parameter carrying the text to display
pub const PARAM_BIG_TEXT: &str = "bigText";
/// Query parameter written by `404.html` on static hosts
pub const PARAM_REDIRECT: &str = "redirect";

pub struct Router<H> {
    routes: FxHashMap<&'static str, Renderer>,
    history: H,
    base_path: String,
    redirect_handled: bool,
}

impl<H: HistoryBackend> Router<H> {
    pub fn new(history: H, config: &AppConfig) -> Self {
        let base_path = config.base_path_for(&history.origin()).to_string();
        Self {
            routes: FxHashMap::default(),
            history,
            base_path,
            redirect_handled: false,
        }
    }

    /// Register `renderer` for `path`
    pub fn route(mut self, path: &'static str, renderer: Renderer) -> Self {
        self.routes.insert(path, renderer);
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Public URL path for an app path (`show` or `/show`)
    pub fn build_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_path, path.trim_start_matches('/'))
    }

    /// Current location with the base path stripped
    pub fn location(&self) -> Location {
        let mut location = Location::parse(&self.history.current_url());
        if !self.base_path.is_empty() {
            if let Some(rest) = location.path.strip_prefix(self.base_path.as_str()) {
                location.path = if rest.starts_with('/') {
                    rest.to_string()
                } else {
                    format!("/{}", rest)
                };
            }
        }
        location
    }

    /// Push a new history entry and render the page it points to
    pub fn navigate(&mut self, path: &str, params: &QueryParams, state: &ViewState<'_>) -> Result<Page> {
        let target = Location {
            path: self.build_path(path),
            query: params.clone(),
        };
        let url = target.to_url();
        debug!("navigate -> {}", url);
        self.history.push(&url)?;
        Ok(self.render_route(state))
    }

    /// Render the page for the current location, or the not-found page
    pub fn render_route(&self, state: &ViewState<'_>) -> Page {
        let location = self.location();
        match self.routes.get(location.path.as_str()) {
            Some(render) => render(state, &location.query),
            None => {
                debug!("no route for {}", location.path);
                Page::NotFound
            }
        }
    }

    /// Rewrite an initial `?redirect=<path>` into the real URL, once
    pub fn handle_redirect(&mut self) -> Result<bool> {
        if self.redirect_handled {
            return Ok(false);
        }
        self.redirect_handled = true;

        let location = Location::parse(&self.history.current_url());
        match location.query.get(PARAM_REDIRECT) {
            Some(target) if !target.is_empty() => {
                debug!("redirect -> {}", target);
                self.history.replace(target)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}
