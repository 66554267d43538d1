use crate::storage::{KeyValueStore, LocalStorage, THEME_KEY};
use crate::util::listen;
use leptos::logging::warn;
use std::str::FromStr;
use wasm_bindgen::JsCast;

pub(crate) const THEME_ATTR: &str = "data-bs-theme";
pub(crate) const THEME_TOGGLE_ID: &str = "theme-toggle";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_checked(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Persisted theme choice. Anything unreadable falls back to light.
pub(crate) fn load_theme<S: KeyValueStore>(store: &S) -> Theme {
    match store.get_item(THEME_KEY) {
        Ok(Some(v)) => Theme::from_str(v.trim()).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("theme: read failed: {e}");
            Theme::default()
        }
    }
}

pub(crate) fn save_theme<S: KeyValueStore>(store: &S, theme: Theme) {
    if let Err(e) = store.set_item(THEME_KEY, theme.as_ref()) {
        warn!("theme: write failed: {e}");
    }
}

fn apply_theme(document: &web_sys::Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute(THEME_ATTR, theme.as_ref());
    }
}

/// Sets `data-bs-theme` from storage. Safe to call while the document is still loading.
pub(crate) fn apply_stored_theme(document: &web_sys::Document) -> Theme {
    let theme = load_theme(&LocalStorage);
    apply_theme(document, theme);
    theme
}

/// Applies the stored theme to `<html>` and wires the `#theme-toggle` checkbox.
pub(crate) fn attach_theme(document: &web_sys::Document) -> Theme {
    let theme = apply_stored_theme(document);

    let Some(toggle) = document
        .get_element_by_id(THEME_TOGGLE_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return theme;
    };

    toggle.set_checked(theme == Theme::Dark);
    let document = document.clone();
    let source = toggle.clone();
    listen(&toggle, "change", move |_| {
        let theme = Theme::from_checked(source.checked());
        apply_theme(&document, theme);
        save_theme(&LocalStorage, theme);
    });

    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_theme_defaults_to_light() {
        assert_eq!(load_theme(&MemoryStore::new()), Theme::Light);
    }

    #[test]
    fn test_theme_roundtrip_uses_lowercase_names() {
        let store = MemoryStore::new();
        save_theme(&store, Theme::Dark);
        assert_eq!(store.raw(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back_to_light() {
        let store = MemoryStore::new();
        store.insert_raw(THEME_KEY, "solarized");
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn test_unavailable_storage_falls_back_to_light() {
        let store = MemoryStore::new();
        store.insert_raw(THEME_KEY, "dark");
        store.set_failing(true);
        assert_eq!(load_theme(&store), Theme::Light);
        save_theme(&store, Theme::Dark);
    }

    #[test]
    fn test_toggle_state_maps_to_theme() {
        assert_eq!(Theme::from_checked(true), Theme::Dark);
        assert_eq!(Theme::from_checked(false).to_string(), "light");
    }
}
