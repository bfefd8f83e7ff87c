//! Static application catalogue.
//!
//! Adding an application means adding one [`ApplicationDescriptor`] entry with a mount function;
//! the window manager never matches on specific app ids.

mod placeholders;

use desktop_app_contract::{AppModule, PayloadPolicy};

use crate::model::WindowSize;

/// App id of the text editor that opens desktop files.
pub const NOTEPAD_APP_ID: &str = "notepad";

/// Immutable registry entry describing one application.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon_glyph: &'static str,
    pub default_size: WindowSize,
    pub module: AppModule,
    pub payload_policy: PayloadPolicy,
    pub show_in_launcher: bool,
    pub show_on_desktop: bool,
}

static BUILTIN_APPS: [ApplicationDescriptor; 7] = [
    ApplicationDescriptor {
        id: NOTEPAD_APP_ID,
        display_name: "Notepad",
        icon_glyph: "📝",
        default_size: WindowSize::new(600, 400),
        module: AppModule::new(placeholders::mount_notepad),
        payload_policy: PayloadPolicy::ReplaceOnRefocus,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "calculator",
        display_name: "Calculator",
        icon_glyph: "🧮",
        default_size: WindowSize::new(300, 400),
        module: AppModule::new(placeholders::mount_calculator),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "terminal",
        display_name: "Terminal",
        icon_glyph: "💻",
        default_size: WindowSize::new(700, 500),
        module: AppModule::new(placeholders::mount_terminal),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "browser",
        display_name: "Browser",
        icon_glyph: "🌐",
        default_size: WindowSize::new(800, 600),
        module: AppModule::new(placeholders::mount_browser),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "settings",
        display_name: "Settings",
        icon_glyph: "⚙️",
        default_size: WindowSize::new(500, 400),
        module: AppModule::new(placeholders::mount_settings),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "help",
        display_name: "Help & About",
        icon_glyph: "❓",
        default_size: WindowSize::new(700, 600),
        module: AppModule::new(placeholders::mount_help),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
    ApplicationDescriptor {
        id: "trash",
        display_name: "Trash",
        icon_glyph: "🗑️",
        default_size: WindowSize::new(600, 500),
        module: AppModule::new(placeholders::mount_trash),
        payload_policy: PayloadPolicy::KeepExisting,
        show_in_launcher: true,
        show_on_desktop: true,
    },
];

/// Lookup handle over a static descriptor table.
#[derive(Debug, Clone, Copy)]
pub struct AppRegistry {
    entries: &'static [ApplicationDescriptor],
}

impl AppRegistry {
    /// Returns the registry of built-in applications.
    pub fn builtin() -> Self {
        Self {
            entries: &BUILTIN_APPS,
        }
    }

    pub fn get(&self, app_id: &str) -> Option<&'static ApplicationDescriptor> {
        self.entries.iter().find(|entry| entry.id == app_id)
    }

    pub fn entries(&self) -> &'static [ApplicationDescriptor] {
        self.entries
    }

    pub fn launcher_apps(&self) -> impl Iterator<Item = &'static ApplicationDescriptor> {
        self.entries.iter().filter(|entry| entry.show_in_launcher)
    }

    pub fn desktop_icon_apps(&self) -> impl Iterator<Item = &'static ApplicationDescriptor> {
        self.entries.iter().filter(|entry| entry.show_on_desktop)
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Looks up a built-in application descriptor.
pub fn app_descriptor(app_id: &str) -> Option<&'static ApplicationDescriptor> {
    AppRegistry::builtin().get(app_id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use desktop_app_contract::ApplicationId;

    use super::*;

    #[test]
    fn builtin_ids_are_unique_and_valid() {
        let registry = AppRegistry::builtin();
        let mut seen = HashSet::new();
        for entry in registry.entries() {
            assert!(seen.insert(entry.id), "duplicate app id {}", entry.id);
            assert!(
                ApplicationId::new(entry.id).is_ok(),
                "invalid app id {}",
                entry.id
            );
        }
    }

    #[test]
    fn builtin_default_sizes_meet_window_minimum() {
        for entry in AppRegistry::builtin().entries() {
            assert!(entry.default_size.width >= 300, "{}", entry.id);
            assert!(entry.default_size.height >= 200, "{}", entry.id);
        }
    }

    #[test]
    fn only_notepad_replaces_payload_on_refocus() {
        let registry = AppRegistry::builtin();
        let replacing: Vec<_> = registry
            .entries()
            .iter()
            .filter(|entry| entry.payload_policy == PayloadPolicy::ReplaceOnRefocus)
            .map(|entry| entry.id)
            .collect();
        assert_eq!(replacing, vec![NOTEPAD_APP_ID]);
    }

    #[test]
    fn lookup_misses_unknown_ids() {
        let registry = AppRegistry::builtin();
        assert_eq!(
            registry.get("calculator").map(|d| d.display_name),
            Some("Calculator")
        );
        assert!(registry.get("file-manager").is_none());
        assert_eq!(app_descriptor("trash").map(|d| d.id), Some("trash"));
        assert_eq!(registry.launcher_apps().count(), 7);
        assert_eq!(registry.desktop_icon_apps().count(), 7);
    }
}
