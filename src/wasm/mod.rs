//! Browser host: wires DOM events to the [`App`] and paints its pages

pub mod dom;

use std::cell::RefCell;

use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::error::{Error, Result};
use crate::fit::{self, AutoFit, FitBounds, Size};
use crate::modal::KeyPress;
use crate::platform::Device;
use crate::view::{render_markup, Action, Page, BIG_TEXT_DISPLAY_ID, COMPOSE_INPUT_ID, DIALOG_INPUT_ID};
use crate::App;
use dom::{dom_err, BrowserHistory, BrowserStorage, ElementSurface, WindowListener};

type BrowserApp = App<BrowserStorage, BrowserHistory>;

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted shell; `None` before start or on re-entry
fn with_shell<R>(f: impl FnOnce(&mut Shell) -> R) -> Option<R> {
    SHELL.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// Initialize panic hook, logging and the app, then paint the first page
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    boot().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Font size for text measured at the 100px baseline
#[wasm_bindgen(js_name = fitFontSize)]
pub fn fit_font_size(container_width: f32, container_height: f32, text_width: f32, text_height: f32) -> f32 {
    fit::fit_font_size(
        Size::new(container_width, container_height),
        Size::new(text_width, text_height),
        &FitBounds::default(),
    )
}

fn boot() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = dom::read_config(&document);
    let device = Device::from_user_agent(&window.navigator().user_agent().unwrap_or_default());
    let fit = AutoFit::new(FitBounds::from(&config));

    let app = App::new(config, BrowserStorage::open(), BrowserHistory::new(window.clone()), device);
    SHELL.with(|cell| {
        *cell.borrow_mut() = Some(Shell {
            app,
            fit,
            markup: String::new(),
            key_listener: None,
            resize_listener: None,
        })
    });

    listen(document.as_ref(), "click", on_click)?;
    listen(document.as_ref(), "input", on_input)?;
    listen(window.as_ref(), "popstate", on_popstate)?;

    with_shell(Shell::paint);
    info!("Big Text Now started ({:?})", device);
    Ok(())
}

/// Attach a listener for the lifetime of the page
fn listen(target: &web_sys::EventTarget, kind: &str, handler: fn(Event)) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    closure.forget();
    Ok(())
}

fn on_click(event: Event) {
    let Some(action) = action_for(&event) else {
        return;
    };
    event.prevent_default();
    with_shell(|shell| shell.dispatch(action));
}

fn action_for(event: &Event) -> Option<Action> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let element = target.closest("[data-action]").ok()??;
    let name = element.get_attribute("data-action")?;
    Action::parse(&name, element.get_attribute("data-index").as_deref())
}

fn on_input(event: Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let text = target.text_content().unwrap_or_default();
    with_shell(|shell| {
        match target.id().as_str() {
            COMPOSE_INPUT_ID => shell.app.compose_input(text),
            DIALOG_INPUT_ID => shell.app.dialog_input(text),
            _ => return,
        }
        // Typing diverged the DOM from the painted markup
        shell.markup.clear();
    });
}

fn on_popstate(_event: Event) {
    with_shell(|shell| {
        shell.app.on_popstate();
        shell.paint();
    });
}

fn on_dialog_key(event: Event) {
    let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
        return;
    };
    with_shell(|shell| {
        shell.sync_inputs();
        let key = KeyPress {
            key: event.key(),
            shift: event.shift_key(),
        };
        if shell.app.dialog_key(&key) {
            event.prevent_default();
            shell.paint();
        }
    });
}

fn on_resize(_event: Event) {
    with_shell(Shell::refit);
}

struct Shell {
    app: BrowserApp,
    fit: AutoFit,
    /// Markup currently in the body
    markup: String,
    /// Present only while the dialog is open
    key_listener: Option<WindowListener>,
    /// Present only while the display page is shown
    resize_listener: Option<WindowListener>,
}

impl Shell {
    fn dispatch(&mut self, action: Action) {
        match action {
            Action::ClearHistory => self.app.clear_history(),
            Action::ComposeReset => self.app.reset_compose(),
            Action::ComposeSubmit => {
                self.sync_inputs();
                self.app.submit_compose();
            }
            Action::OpenNew => self.app.open_new(),
            Action::ShowEntry(index) => {
                self.app.show_entry(index);
            }
            Action::EditEntry(index) => {
                self.app.open_edit(index);
            }
            Action::ToggleFavorite(index) => {
                self.app.toggle_favorite(index);
            }
            Action::DeleteEntry(index) => {
                self.app.delete_entry(index);
            }
            Action::CloseDisplay => self.app.close_display(),
            Action::ToggleFullscreen => {
                if let Err(e) = self.toggle_fullscreen() {
                    error!("fullscreen toggle failed: {}", e);
                }
                return;
            }
            Action::DialogCancel => self.app.dialog_cancel(),
            Action::DialogReset => self.app.dialog_reset(),
            Action::DialogSubmit => {
                self.sync_inputs();
                self.app.dialog_submit();
            }
        }
        self.paint();
    }

    /// Copy editable field contents into app state
    fn sync_inputs(&mut self) {
        let Ok(document) = dom::document() else {
            return;
        };
        if let Some(text) = document
            .get_element_by_id(COMPOSE_INPUT_ID)
            .and_then(|el| el.text_content())
        {
            self.app.compose_input(text);
        }
        if let Some(text) = document
            .get_element_by_id(DIALOG_INPUT_ID)
            .and_then(|el| el.text_content())
        {
            self.app.dialog_input(text);
        }
    }

    fn paint(&mut self) {
        if let Err(e) = self.try_paint() {
            error!("paint failed: {}", e);
        }
    }

    fn try_paint(&mut self) -> Result<()> {
        let document = dom::document()?;
        let markup = render_markup(self.app.page(), self.app.dialog());
        if markup != self.markup {
            let body = document
                .body()
                .ok_or_else(|| Error::Dom("no body".into()))?;
            body.set_inner_html(&markup);
            self.markup = markup;
            // Fresh nodes carry no font size yet
            self.fit.reset();
        }

        self.sync_key_listener()?;

        let shown = match self.app.page() {
            Page::Show(view) => Some(view.text.clone()),
            _ => None,
        };
        self.sync_resize_listener(shown.is_some())?;
        match shown {
            Some(text) => {
                if let Some(mut surface) = ElementSurface::find(&document) {
                    self.fit.on_text_change(&text, &mut surface);
                }
            }
            None => self.fit.reset(),
        }

        if self.app.dialog().is_open() {
            if let Some(input) = dom::html_element_by_id(&document, DIALOG_INPUT_ID) {
                input.focus().map_err(dom_err)?;
            }
        }
        Ok(())
    }

    fn sync_key_listener(&mut self) -> Result<()> {
        let wanted = self.app.dialog().listens_for_keys();
        dom::sync_listener(&mut self.key_listener, wanted, "keydown", on_dialog_key)
    }

    fn sync_resize_listener(&mut self, wanted: bool) -> Result<()> {
        dom::sync_listener(&mut self.resize_listener, wanted, "resize", on_resize)
    }

    fn refit(&mut self) {
        let Ok(document) = dom::document() else {
            return;
        };
        if let Some(mut surface) = ElementSurface::find(&document) {
            self.fit.on_resize(&mut surface);
        }
    }

    fn toggle_fullscreen(&self) -> Result<()> {
        let document = dom::document()?;
        let target = document
            .get_element_by_id(BIG_TEXT_DISPLAY_ID)
            .ok_or_else(|| Error::Dom("display container missing".into()))?;
        dom::toggle_fullscreen(&document, &target)
    }
}
