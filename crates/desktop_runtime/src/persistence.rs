//! Desktop runtime persistence for boot hydration and the three durable preference documents.
//!
//! | key                      | document                                  |
//! |--------------------------|-------------------------------------------|
//! | `homeos_settings`        | flat [`DesktopSettings`] object           |
//! | `desktop-icon-positions` | map of icon key to `{ "x", "y" }`          |
//! | `desktop-files`          | array of `{ "name", "content", ... }`      |
//!
//! Each document is written whole. A missing or unreadable document falls back to defaults.

use std::collections::BTreeMap;

use desktop_app_contract::DesktopFile;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::{desktop_icons::DesktopIconLayer, model::WindowPosition, settings::DesktopSettings};

pub const SETTINGS_KEY: &str = "homeos_settings";
pub const ICON_POSITIONS_KEY: &str = "desktop-icon-positions";
pub const DESKTOP_FILES_KEY: &str = "desktop-files";

/// Persisted state read once at boot. `None` fields keep the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootData {
    pub settings: Option<DesktopSettings>,
    pub icon_positions: Option<BTreeMap<String, WindowPosition>>,
    pub desktop_files: Option<Vec<DesktopFile>>,
}

async fn load_or_warn<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PrefsStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    match load_pref_with::<S, T>(store, key).await {
        Ok(value) => value,
        Err(err) => {
            leptos::logging::warn!("desktop preference load failed, using defaults: {err}");
            None
        }
    }
}

/// Loads every persisted document. Never fails; unreadable documents are logged and skipped.
pub async fn load_boot_data<S: PrefsStore + ?Sized>(store: &S) -> BootData {
    BootData {
        settings: load_or_warn(store, SETTINGS_KEY).await,
        icon_positions: load_or_warn(store, ICON_POSITIONS_KEY).await,
        desktop_files: load_or_warn(store, DESKTOP_FILES_KEY).await,
    }
}

pub async fn persist_settings<S: PrefsStore + ?Sized>(
    store: &S,
    settings: &DesktopSettings,
) -> Result<(), String> {
    save_pref_with(store, SETTINGS_KEY, settings).await
}

pub async fn persist_icon_positions<S: PrefsStore + ?Sized>(
    store: &S,
    icons: &DesktopIconLayer,
) -> Result<(), String> {
    save_pref_with(store, ICON_POSITIONS_KEY, icons.positions()).await
}

pub async fn persist_desktop_files<S: PrefsStore + ?Sized>(
    store: &S,
    icons: &DesktopIconLayer,
) -> Result<(), String> {
    save_pref_with(store, DESKTOP_FILES_KEY, &icons.files()).await
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{DesktopFileAction, DesktopFileEvent};
    use futures::executor::block_on;
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        apps::AppRegistry,
        desktop_icons::IconKey,
        settings::{SettingUpdate, Theme},
    };

    fn raw_json(store: &MemoryPrefsStore, key: &str) -> Value {
        let raw = store.raw(key).expect("stored value");
        serde_json::from_str(&raw).expect("valid json")
    }

    #[test]
    fn empty_store_boots_with_defaults() {
        let store = MemoryPrefsStore::default();
        assert_eq!(block_on(load_boot_data(&store)), BootData::default());
    }

    #[test]
    fn corrupt_documents_are_skipped_individually() {
        let store = MemoryPrefsStore::with_entries([
            (SETTINGS_KEY, "{\"theme\":\"light\"}"),
            (ICON_POSITIONS_KEY, "not json"),
            (DESKTOP_FILES_KEY, "{\"wrong\":\"shape\"}"),
        ]);
        let boot = block_on(load_boot_data(&store));
        assert_eq!(boot.settings.map(|s| s.theme), Some(Theme::Light));
        assert_eq!(boot.icon_positions, None);
        assert_eq!(boot.desktop_files, None);
    }

    #[test]
    fn settings_are_written_as_flat_object() {
        let store = MemoryPrefsStore::default();
        let mut settings = DesktopSettings::default();
        settings.apply(SettingUpdate::Wallpaper("gradient-purple".to_string()));

        block_on(persist_settings(&store, &settings)).expect("persist");
        assert_eq!(raw_json(&store, SETTINGS_KEY)["wallpaper"], json!("gradient-purple"));
        assert_eq!(
            block_on(load_boot_data(&store)).settings,
            Some(settings)
        );
    }

    #[test]
    fn icon_layout_and_files_round_trip() {
        let store = MemoryPrefsStore::default();
        let mut icons = DesktopIconLayer::with_defaults(AppRegistry::builtin());
        icons.set_position(&IconKey::App("trash".to_string()), WindowPosition::new(900, 600));
        icons.apply_file_event(DesktopFileEvent {
            file: DesktopFile::new("todo.txt", Some("milk".to_string())),
            action: DesktopFileAction::Create,
        });

        block_on(persist_icon_positions(&store, &icons)).expect("positions");
        block_on(persist_desktop_files(&store, &icons)).expect("files");

        assert_eq!(raw_json(&store, ICON_POSITIONS_KEY)["trash"], json!({ "x": 900, "y": 600 }));
        assert_eq!(
            raw_json(&store, DESKTOP_FILES_KEY),
            json!([{ "name": "todo.txt", "content": "milk" }])
        );

        let boot = block_on(load_boot_data(&store));
        let mut restored = DesktopIconLayer::with_defaults(AppRegistry::builtin());
        restored.hydrate(boot.icon_positions, boot.desktop_files);
        assert_eq!(restored, icons);
    }
}
