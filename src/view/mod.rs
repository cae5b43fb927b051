//! Page view models and the route renderers that build them

mod action;
mod markup;

pub use action::Action;
pub use markup::{escape_html, render_markup, BIG_TEXT_DISPLAY_ID, BIG_TEXT_ID, COMPOSE_INPUT_ID, DIALOG_INPUT_ID};

use crate::list::TextList;
use crate::router::{QueryParams, PARAM_BIG_TEXT};

/// App state handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub texts: &'a TextList,
    /// Unsubmitted text in the compose form
    pub draft: &'a str,
}

/// Builds the page for a route
pub type Renderer = fn(&ViewState<'_>, &QueryParams) -> Page;

/// A rendered page
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    List(ListView),
    Show(ShowView),
    NotFound,
}

/// One row of the history list
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub index: usize,
    pub content: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub entries: Vec<EntryRow>,
    pub draft: String,
}

impl ListView {
    /// "Clear History" is only offered when there is something to clear
    pub fn show_clear(&self) -> bool {
        !self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowView {
    pub text: String,
}

/// Renderer for `/`
pub fn list_page(state: &ViewState<'_>, _params: &QueryParams) -> Page {
    let entries = state
        .texts
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryRow {
            index,
            content: entry.content.clone(),
            is_favorite: entry.is_favorite,
        })
        .collect();
    Page::List(ListView {
        entries,
        draft: state.draft.to_string(),
    })
}

/// Renderer for `/show`
pub fn show_page(_state: &ViewState<'_>, params: &QueryParams) -> Page {
    Page::Show(ShowView {
        text: params.get(PARAM_BIG_TEXT).unwrap_or_default().to_string(),
    })
}
