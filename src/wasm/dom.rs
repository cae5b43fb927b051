//! `web-sys` implementations of the platform traits

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::fit::{FitSurface, Size};
use crate::platform::{FullscreenApi, HistoryBackend, KeyValueStore};
use crate::view::{BIG_TEXT_DISPLAY_ID, BIG_TEXT_ID};

/// Id of the optional `<script type="application/json">` config block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

pub fn dom_err(e: JsValue) -> Error {
    Error::Dom(format!("{:?}", e))
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Dom("no window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::Dom("no document".into()))
}

pub fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// A `window` listener that is removed again when dropped
pub struct WindowListener {
    window: Window,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    pub fn attach(kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self> {
        let window = window()?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self { window, kind, closure })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            warn!("could not remove {} listener: {:?}", self.kind, e);
        }
    }
}

/// Attach `handler` into `slot` while `wanted`, and drop it otherwise
pub fn sync_listener(
    slot: &mut Option<WindowListener>,
    wanted: bool,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    if !wanted {
        slot.take();
    } else if slot.is_none() {
        *slot = Some(WindowListener::attach(kind, handler)?);
    }
    Ok(())
}

/// Config from the page, or defaults when absent or malformed
pub fn read_config(document: &Document) -> AppConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return AppConfig::default();
    };
    AppConfig::from_json(&raw).unwrap_or_else(|e| {
        warn!("ignoring page config: {}", e);
        AppConfig::default()
    })
}

/// `window.localStorage`; behaves as an empty, read-only store when disabled
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = window()
            .ok()
            .and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; texts will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::Storage("localStorage unavailable".into()))
    }
}

fn storage_err(e: JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(storage_err),
            None => Ok(None),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(storage_err)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(storage_err)
    }
}

/// `window.history` plus `window.location`
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl HistoryBackend for BrowserHistory {
    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn current_url(&self) -> String {
        let location = self.window.location();
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        format!("{}{}", path, search)
    }

    fn push(&mut self, url: &str) -> Result<()> {
        self.window
            .history()
            .map_err(dom_err)?
            .push_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(dom_err)
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.window
            .history()
            .map_err(dom_err)?
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(dom_err)
    }
}

/// The display container and its text paragraph
pub struct ElementSurface {
    container: HtmlElement,
    text: HtmlElement,
}

impl ElementSurface {
    pub fn find(document: &Document) -> Option<Self> {
        Some(Self {
            container: html_element_by_id(document, BIG_TEXT_DISPLAY_ID)?,
            text: html_element_by_id(document, BIG_TEXT_ID)?,
        })
    }
}

impl FitSurface for ElementSurface {
    fn container_size(&self) -> Size {
        Size::new(
            self.container.client_width() as f32,
            self.container.client_height() as f32,
        )
    }

    fn text_size(&self) -> Size {
        Size::new(
            self.text.scroll_width() as f32,
            self.text.scroll_height() as f32,
        )
    }

    fn set_font_size(&mut self, px: f32) {
        if let Err(e) = self
            .text
            .style()
            .set_property("font-size", &format!("{}px", px))
        {
            warn!("could not set font size: {:?}", e);
        }
    }
}

fn js_method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

/// Enter fullscreen on `target`, or leave it if something is already fullscreen
pub fn toggle_fullscreen(document: &Document, target: &Element) -> Result<()> {
    let api = FullscreenApi::probe(|name| js_method(target.as_ref(), name).is_some());
    let (Some(request), Some(exit), Some(property)) =
        (api.request_method(), api.exit_method(), api.element_property())
    else {
        warn!("fullscreen is not supported");
        return Ok(());
    };

    let active = js_sys::Reflect::get(document.as_ref(), &JsValue::from_str(property))
        .map(|el| !el.is_null() && !el.is_undefined())
        .unwrap_or(false);

    let (receiver, method): (&JsValue, &str) = if active {
        (document.as_ref(), exit)
    } else {
        (target.as_ref(), request)
    };
    let function = js_method(receiver, method)
        .ok_or_else(|| Error::Dom(format!("{} is missing", method)))?;
    function.call0(receiver).map_err(dom_err)?;
    Ok(())
}
