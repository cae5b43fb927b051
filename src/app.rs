//! Application shell: owns all state and applies user actions
//!
//! Every list mutation is written through to storage before the page is
//! re-rendered. The browser host only forwards events here and paints
//! whatever [`App::page`] holds afterwards.

use log::{error, info};

use crate::config::AppConfig;
use crate::list::{TextEntry, TextList};
use crate::modal::{DialogOutcome, DialogTarget, EditDialog, KeyPress};
use crate::platform::{Device, HistoryBackend, KeyValueStore};
use crate::router::{QueryParams, Router, PARAM_BIG_TEXT, ROUTE_HOME, ROUTE_SHOW};
use crate::store::ListStore;
use crate::view::{list_page, show_page, Page, ViewState};

pub struct App<S, H> {
    config: AppConfig,
    store: ListStore<S>,
    texts: TextList,
    draft: String,
    dialog: EditDialog,
    router: Router<H>,
    device: Device,
    page: Page,
}

impl<S: KeyValueStore, H: HistoryBackend> App<S, H> {
    /// Load the stored list, apply any static-host redirect, render the first page
    pub fn new(config: AppConfig, storage: S, history: H, device: Device) -> Self {
        let store = ListStore::new(storage, config.storage_key.clone());
        let texts = store.load();
        let mut router = Router::new(history, &config)
            .route(ROUTE_HOME, list_page)
            .route(ROUTE_SHOW, show_page);
        if let Err(e) = router.handle_redirect() {
            error!("redirect failed: {}", e);
        }
        info!("loaded {} saved texts", texts.len());

        let mut app = Self {
            config,
            store,
            texts,
            draft: String::new(),
            dialog: EditDialog::new(),
            router,
            device,
            page: Page::NotFound,
        };
        app.render();
        app
    }

    /// Re-render the current route
    pub fn render(&mut self) -> &Page {
        let state = ViewState {
            texts: &self.texts,
            draft: &self.draft,
        };
        self.page = self.router.render_route(&state);
        &self.page
    }

    /// Push `path` with `params` and render it
    pub fn navigate(&mut self, path: &str, params: QueryParams) {
        let state = ViewState {
            texts: &self.texts,
            draft: &self.draft,
        };
        match self.router.navigate(path, &params, &state) {
            Ok(page) => self.page = page,
            Err(e) => error!("navigation to {} failed: {}", path, e),
        }
    }

    /// Back/forward moved the history cursor
    pub fn on_popstate(&mut self) {
        self.render();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.texts) {
            error!("failed to save texts: {}", e);
        }
    }

    fn show_text(&mut self, text: &str) {
        let params = QueryParams::new().with(PARAM_BIG_TEXT, text);
        self.navigate(ROUTE_SHOW, params);
    }

    /// Track the compose field without re-rendering
    pub fn compose_input(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn reset_compose(&mut self) {
        self.draft.clear();
        self.render();
    }

    /// Save the draft as the newest entry and display it
    pub fn submit_compose(&mut self) -> bool {
        let content = self.draft.trim().to_string();
        if content.is_empty() {
            return false;
        }
        self.texts.push_front(TextEntry::new(content.clone()));
        self.persist();
        self.draft.clear();
        self.show_text(&content);
        true
    }

    pub fn show_entry(&mut self, index: usize) -> bool {
        let Some(content) = self.texts.get(index).map(|e| e.content.clone()) else {
            return false;
        };
        self.show_text(&content);
        true
    }

    /// Leave the display page for the list
    pub fn close_display(&mut self) {
        self.navigate(ROUTE_HOME, QueryParams::new());
    }

    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let flag = self.texts.toggle_favorite(index)?;
        self.persist();
        self.render();
        Some(flag)
    }

    pub fn delete_entry(&mut self, index: usize) -> Option<TextEntry> {
        let removed = self.texts.remove(index)?;
        self.persist();
        self.render();
        Some(removed)
    }

    pub fn clear_history(&mut self) {
        self.texts.clear();
        if let Err(e) = self.store.clear() {
            error!("failed to clear texts: {}", e);
        }
        self.render();
    }

    pub fn open_new(&mut self) {
        self.dialog.open_new();
    }

    pub fn open_edit(&mut self, index: usize) -> bool {
        match self.texts.get(index) {
            Some(entry) => {
                self.dialog.open_existing(index, &entry.content);
                true
            }
            None => false,
        }
    }

    pub fn dialog_input(&mut self, text: impl Into<String>) {
        self.dialog.set_content(text);
    }

    pub fn dialog_reset(&mut self) {
        self.dialog.reset();
    }

    pub fn dialog_submit(&mut self) {
        let outcome = self.dialog.submit();
        self.apply_outcome(outcome);
    }

    pub fn dialog_cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Feed a key press to the open dialog; true when the default action should be suppressed
    pub fn dialog_key(&mut self, key: &KeyPress) -> bool {
        let response = self.dialog.handle_key(key, self.device);
        if let Some(outcome) = response.outcome {
            self.apply_outcome(outcome);
        }
        response.prevent_default
    }

    fn apply_outcome(&mut self, outcome: DialogOutcome) {
        match outcome {
            DialogOutcome::Submitted {
                target: DialogTarget::New,
                content,
            } => {
                self.texts.push_front(TextEntry::new(content.clone()));
                self.persist();
                self.show_text(&content);
            }
            DialogOutcome::Submitted {
                target: DialogTarget::Existing(index),
                content,
            } => {
                if self.texts.edit(index, content) {
                    self.persist();
                }
                self.render();
            }
            DialogOutcome::Cancelled => {}
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn texts(&self) -> &TextList {
        &self.texts
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn dialog(&self) -> &EditDialog {
        &self.dialog
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &ListStore<S> {
        &self.store
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router<H> {
        &mut self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryHistory, MemoryStore};

    type TestApp = App<MemoryStore, MemoryHistory>;

    fn app_with(store: MemoryStore, url: &str) -> TestApp {
        App::new(
            AppConfig::default(),
            store,
            MemoryHistory::new("http://localhost", url),
            Device::Desktop,
        )
    }

    fn app() -> TestApp {
        app_with(MemoryStore::new(), "/")
    }

    fn shown_text(app: &TestApp) -> Option<&str> {
        match app.page() {
            Page::Show(view) => Some(view.text.as_str()),
            _ => None,
        }
    }

    fn stored(app: &TestApp) -> TextList {
        let raw = app.store().backend().raw("texts").unwrap_or("[]");
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_starts_on_list_page() {
        let app = app();
        assert!(matches!(app.page(), Page::List(_)));
        assert!(app.texts().is_empty());
    }

    #[test]
    fn test_loads_existing_texts() {
        let store = MemoryStore::new().with_item("texts", r#"[{"content":"saved","isFavorite":true}]"#);
        let app = app_with(store, "/");
        assert_eq!(app.texts().len(), 1);
        let Page::List(view) = app.page() else {
            panic!("expected list page");
        };
        assert!(view.entries[0].is_favorite);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let app = app_with(MemoryStore::new().with_item("texts", "{{{"), "/");
        assert!(app.texts().is_empty());
        assert!(matches!(app.page(), Page::List(_)));
    }

    #[test]
    fn test_submit_compose_saves_and_shows() {
        let mut app = app();
        app.compose_input("Hello there");
        assert!(app.submit_compose());

        assert_eq!(shown_text(&app), Some("Hello there"));
        assert_eq!(app.draft(), "");
        assert_eq!(stored(&app), *app.texts());
        assert_eq!(app.texts().get(0).map(|e| e.content.as_str()), Some("Hello there"));

        app.close_display();
        assert!(matches!(app.page(), Page::List(_)));
    }

    #[test]
    fn test_blank_compose_ignored() {
        let mut app = app();
        app.compose_input("   ");
        assert!(!app.submit_compose());
        assert!(app.texts().is_empty());
        assert!(matches!(app.page(), Page::List(_)));
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let mut app = app();
        for text in ["one", "two", "three"] {
            app.compose_input(text);
            app.submit_compose();
        }
        app.close_display();

        assert_eq!(app.toggle_favorite(1), Some(true));
        let flags: Vec<bool> = stored(&app).iter().map(|e| e.is_favorite).collect();
        assert_eq!(flags, vec![false, true, false]);
        let order: Vec<String> = stored(&app).iter().map(|e| e.content.clone()).collect();
        assert_eq!(order, vec!["three", "two", "one"]);

        assert_eq!(app.toggle_favorite(9), None);
    }

    #[test]
    fn test_delete_and_clear_history() {
        let mut app = app();
        for text in ["one", "two"] {
            app.compose_input(text);
            app.submit_compose();
        }
        app.close_display();

        assert_eq!(app.delete_entry(0).map(|e| e.content), Some("two".to_string()));
        assert_eq!(stored(&app).len(), 1);

        app.clear_history();
        assert!(app.texts().is_empty());
        assert_eq!(app.store().backend().raw("texts"), None);
        let Page::List(view) = app.page() else {
            panic!("expected list page");
        };
        assert!(!view.show_clear());
    }

    #[test]
    fn test_show_entry_and_back() {
        let mut app = app();
        app.compose_input("first");
        app.submit_compose();
        app.close_display();

        assert!(app.show_entry(0));
        assert_eq!(shown_text(&app), Some("first"));
        assert!(!app.show_entry(5));

        assert!(app.router_mut().history_mut().back());
        app.on_popstate();
        assert!(matches!(app.page(), Page::List(_)));
    }

    #[test]
    fn test_dialog_edit_existing() {
        let mut app = app();
        app.compose_input("old");
        app.submit_compose();
        app.close_display();
        app.toggle_favorite(0);

        assert!(app.open_edit(0));
        assert_eq!(app.dialog().content(), Some("old"));
        app.dialog_input("new");
        app.dialog_submit();

        assert!(!app.dialog().is_open());
        assert_eq!(
            app.texts().get(0),
            Some(&TextEntry { content: "new".into(), is_favorite: true })
        );
        assert_eq!(stored(&app), *app.texts());
        assert!(matches!(app.page(), Page::List(_)));
    }

    #[test]
    fn test_dialog_blank_submit_changes_nothing() {
        let mut app = app();
        app.compose_input("keep");
        app.submit_compose();
        app.close_display();
        let before = app.texts().clone();

        app.open_edit(0);
        app.dialog_input("  ");
        app.dialog_submit();
        assert_eq!(*app.texts(), before);

        app.open_new();
        app.dialog_submit();
        assert_eq!(*app.texts(), before);
        assert!(!app.dialog().is_open());
    }

    #[test]
    fn test_dialog_new_via_enter() {
        let mut app = app();
        app.open_new();
        app.dialog_input("from dialog");
        assert!(app.dialog_key(&KeyPress::new("Enter")));
        assert_eq!(shown_text(&app), Some("from dialog"));
        assert_eq!(app.texts().len(), 1);
    }

    #[test]
    fn test_dialog_escape_cancels() {
        let mut app = app();
        app.open_new();
        app.dialog_input("discard");
        assert!(app.dialog_key(&KeyPress::new("Escape")));
        assert!(!app.dialog().is_open());
        assert!(app.texts().is_empty());
    }

    #[test]
    fn test_unknown_start_path_not_found() {
        let app = app_with(MemoryStore::new(), "/missing");
        assert_eq!(*app.page(), Page::NotFound);
    }

    #[test]
    fn test_redirect_applied_before_first_render() {
        let app = App::new(
            AppConfig::default(),
            MemoryStore::new(),
            MemoryHistory::new("https://me.github.io", "/big-text-now/?redirect=/big-text-now/show%3FbigText%3DHi"),
            Device::Desktop,
        );
        assert_eq!(shown_text(&app), Some("Hi"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut app = app_with(MemoryStore::read_only(), "/");
        app.compose_input("unsaved");
        assert!(app.submit_compose());
        assert_eq!(app.texts().len(), 1);
        assert_eq!(shown_text(&app), Some("unsaved"));
    }
}
