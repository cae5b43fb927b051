//! User actions named by `data-action` attributes in the markup

/// A click on an interactive element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClearHistory,
    ComposeReset,
    ComposeSubmit,
    OpenNew,
    ShowEntry(usize),
    EditEntry(usize),
    ToggleFavorite(usize),
    DeleteEntry(usize),
    CloseDisplay,
    ToggleFullscreen,
    DialogCancel,
    DialogReset,
    DialogSubmit,
}

impl Action {
    /// Decode `data-action` plus the optional `data-index` of a clicked element
    pub fn parse(name: &str, index: Option<&str>) -> Option<Self> {
        let index = || index.and_then(|raw| raw.parse::<usize>().ok());
        let action = match name {
            "clear-history" => Action::ClearHistory,
            "compose-reset" => Action::ComposeReset,
            "compose-submit" => Action::ComposeSubmit,
            "open-new" => Action::OpenNew,
            "show-entry" => Action::ShowEntry(index()?),
            "edit-entry" => Action::EditEntry(index()?),
            "toggle-favorite" => Action::ToggleFavorite(index()?),
            "delete-entry" => Action::DeleteEntry(index()?),
            "close-display" => Action::CloseDisplay,
            "toggle-fullscreen" => Action::ToggleFullscreen,
            "dialog-cancel" => Action::DialogCancel,
            "dialog-reset" => Action::DialogReset,
            "dialog-submit" => Action::DialogSubmit,
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::EditDialog;
    use crate::view::{render_markup, EntryRow, ListView, Page, ShowView};

    #[test]
    fn test_parse_indexed_actions() {
        assert_eq!(Action::parse("toggle-favorite", Some("3")), Some(Action::ToggleFavorite(3)));
        assert_eq!(Action::parse("toggle-favorite", None), None);
        assert_eq!(Action::parse("delete-entry", Some("-1")), None);
        assert_eq!(Action::parse("clear-history", Some("junk")), Some(Action::ClearHistory));
        assert_eq!(Action::parse("self-destruct", None), None);
    }

    /// Pull every (data-action, data-index) pair out of rendered markup
    fn actions_in(html: &str) -> Vec<Option<Action>> {
        html.split(r#"data-action=""#)
            .skip(1)
            .map(|rest| {
                let (name, tail) = rest.split_once('"').unwrap();
                let index = tail
                    .strip_prefix(r#" data-index=""#)
                    .and_then(|t| t.split_once('"'))
                    .map(|(i, _)| i);
                Action::parse(name, index)
            })
            .collect()
    }

    #[test]
    fn test_markup_actions_all_parse() {
        let list = Page::List(ListView {
            entries: vec![EntryRow { index: 0, content: "x".into(), is_favorite: false }],
            draft: String::new(),
        });
        let mut dialog = EditDialog::new();
        dialog.open_new();

        let mut found = actions_in(&render_markup(&list, &dialog));
        found.extend(actions_in(&render_markup(&Page::Show(ShowView { text: "y".into() }), &dialog)));

        assert!(found.len() >= 13);
        assert!(found.iter().all(Option::is_some), "unparsed action in {:?}", found);
        assert!(found.contains(&Some(Action::DeleteEntry(0))));
        assert!(found.contains(&Some(Action::ToggleFullscreen)));
        assert!(found.contains(&Some(Action::DialogSubmit)));
    }
}
