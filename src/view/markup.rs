//! HTML for a page plus the dialog overlay
//!
//! Interactive elements carry `data-action` (and `data-index` for list rows)
//! so the host can handle every click with one delegated listener.

use std::fmt::Write;

use super::{EntryRow, ListView, Page, ShowView};
use crate::modal::{DialogTarget, EditDialog};

pub const COMPOSE_INPUT_ID: &str = "compose-input";
pub const DIALOG_INPUT_ID: &str = "dialog-input";
pub const BIG_TEXT_DISPLAY_ID: &str = "big-text-display";
pub const BIG_TEXT_ID: &str = "big-text";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full body markup for `page`, with the dialog on top when open
pub fn render_markup(page: &Page, dialog: &EditDialog) -> String {
    let mut html = match page {
        Page::List(view) => list_markup(view),
        Page::Show(view) => show_markup(view),
        Page::NotFound => "<h1>404 - Page not found</h1>".to_string(),
    };
    if dialog.is_open() {
        html.push_str(&dialog_markup(dialog));
    }
    html
}

fn list_markup(view: &ListView) -> String {
    let mut html = String::new();
    html.push_str(r#"<main class="list-page"><div class="column">"#);
    html.push_str(r#"<header class="list-header"><h3>My BIG texts</h3>"#);
    if view.show_clear() {
        html.push_str(r#"<button class="link" data-action="clear-history">Clear History</button>"#);
    }
    html.push_str("</header>");

    if view.entries.is_empty() {
        html.push_str(
            r#"<div class="empty"><h3>You have no Big Texts yet</h3><p>Add new now</p></div>"#,
        );
    } else {
        html.push_str(r#"<ul class="entries">"#);
        for row in &view.entries {
            entry_markup(&mut html, row);
        }
        html.push_str("</ul>");
    }

    let _ = write!(
        html,
        concat!(
            r#"<div class="pill compose">"#,
            r#"<button class="icon" data-action="compose-reset" title="Clear">×</button>"#,
            r#"<div id="{id}" class="grow" contenteditable="true">{draft}</div>"#,
            r#"<button class="icon" data-action="compose-submit" title="Show">➤</button>"#,
            r#"<button class="icon" data-action="open-new" title="New in dialog">＋</button>"#,
            r#"</div>"#,
        ),
        id = COMPOSE_INPUT_ID,
        draft = escape_html(&view.draft),
    );
    html.push_str("</div></main>");
    html
}

fn entry_markup(html: &mut String, row: &EntryRow) {
    let star = if row.is_favorite { "⭐️" } else { "☆" };
    let _ = write!(
        html,
        concat!(
            r#"<li class="pill entry">"#,
            r#"<span class="entry-text" data-action="show-entry" data-index="{i}">{content}</span>"#,
            r#"<span class="entry-actions">"#,
            r#"<button class="icon" data-action="edit-entry" data-index="{i}" title="Edit">✏️</button>"#,
            r#"<button class="icon" data-action="toggle-favorite" data-index="{i}" title="Favorite">{star}</button>"#,
            r#"<button class="icon" data-action="delete-entry" data-index="{i}" title="Delete">🗑</button>"#,
            r#"</span></li>"#,
        ),
        i = row.index,
        content = escape_html(&row.content),
        star = star,
    );
}

fn show_markup(view: &ShowView) -> String {
    format!(
        concat!(
            r#"<div id="{display}" class="display">"#,
            r#"<button class="icon corner-top-left" data-action="close-display" title="Close">×</button>"#,
            r#"<button class="icon corner-bottom-right" data-action="toggle-fullscreen" title="Fullscreen">⛶</button>"#,
            r#"<p id="{text_id}" class="big-text">{text}</p>"#,
            r#"</div>"#,
        ),
        display = BIG_TEXT_DISPLAY_ID,
        text_id = BIG_TEXT_ID,
        text = escape_html(&view.text),
    )
}

fn dialog_markup(dialog: &EditDialog) -> String {
    let label = match dialog.target() {
        Some(DialogTarget::Existing(_)) => "Edit text",
        _ => "New text",
    };
    format!(
        concat!(
            r#"<div class="dialog-overlay" role="dialog" aria-label="{label}">"#,
            r#"<div class="column"><div class="pill dialog">"#,
            r#"<button class="icon corner-top-left" data-action="dialog-cancel" title="Close">×</button>"#,
            r#"<button class="icon" data-action="dialog-reset" title="Clear">×</button>"#,
            r#"<div id="{id}" class="grow" contenteditable="true">{content}</div>"#,
            r#"<button class="icon" data-action="dialog-submit" title="Save">➤</button>"#,
            r#"</div></div></div>"#,
        ),
        label = label,
        id = DIALOG_INPUT_ID,
        content = escape_html(dialog.content().unwrap_or_default()),
    )
}
