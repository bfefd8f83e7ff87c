//! Desktop icon layer: icon positions, desktop files, and icon activation.

use std::collections::BTreeMap;

use desktop_app_contract::{DesktopFile, DesktopFileAction, DesktopFileEvent, DESKTOP_FILE_KEY_PREFIX};
use serde_json::{json, Value};

use crate::{
    apps::{AppRegistry, NOTEPAD_APP_ID},
    model::{WindowPosition, WindowSize},
};

/// Rendered icon footprint used for viewport clamping.
pub const DESKTOP_ICON_SIZE: WindowSize = WindowSize::new(80, 80);

const APP_ICON_COLUMN_X: i32 = 20;
const FILE_ICON_COLUMN_X: i32 = 120;
const ICON_TOP: i32 = 20;
const ICON_ROW_HEIGHT: i32 = 100;

/// Identifies one desktop icon; serialized as `<app-id>` or `file-<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconKey {
    App(String),
    File(String),
}

impl IconKey {
    pub fn storage_key(&self) -> String {
        match self {
            Self::App(app_id) => app_id.clone(),
            Self::File(name) => format!("{DESKTOP_FILE_KEY_PREFIX}{name}"),
        }
    }

    fn fallback_position(&self) -> WindowPosition {
        match self {
            Self::App(_) => WindowPosition::new(APP_ICON_COLUMN_X, ICON_TOP),
            Self::File(_) => WindowPosition::new(FILE_ICON_COLUMN_X, ICON_TOP),
        }
    }
}

/// What activating an icon should open.
#[derive(Debug, Clone, PartialEq)]
pub struct IconActivation {
    pub app_id: String,
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopIconLayer {
    positions: BTreeMap<String, WindowPosition>,
    files: Vec<DesktopFile>,
}

impl DesktopIconLayer {
    /// Stacks the registry's desktop apps in the left column.
    pub fn with_defaults(registry: AppRegistry) -> Self {
        let positions = registry
            .desktop_icon_apps()
            .enumerate()
            .map(|(index, app)| {
                (
                    app.id.to_string(),
                    WindowPosition::new(APP_ICON_COLUMN_X, row_y(index)),
                )
            })
            .collect();
        Self {
            positions,
            files: Vec::new(),
        }
    }

    /// Applies persisted state. A persisted position map replaces the defaults entirely.
    pub fn hydrate(
        &mut self,
        positions: Option<BTreeMap<String, WindowPosition>>,
        files: Option<Vec<DesktopFile>>,
    ) {
        if let Some(positions) = positions {
            self.positions = positions;
        }
        if let Some(files) = files {
            self.files = files;
        }
    }

    pub fn positions(&self) -> &BTreeMap<String, WindowPosition> {
        &self.positions
    }

    pub fn position_of(&self, key: &IconKey) -> WindowPosition {
        self.positions
            .get(&key.storage_key())
            .copied()
            .unwrap_or_else(|| key.fallback_position())
    }

    pub fn set_position(&mut self, key: &IconKey, position: WindowPosition) {
        self.positions.insert(key.storage_key(), position);
    }

    pub fn files(&self) -> &[DesktopFile] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&DesktopFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Applies a change notification from a file-producing app.
    ///
    /// Returns `true` when the icon layout gained a position that should be persisted.
    pub fn apply_file_event(&mut self, event: DesktopFileEvent) -> bool {
        match event.action {
            DesktopFileAction::Create => {
                let key = IconKey::File(event.file.name.clone());
                match self.files.iter_mut().find(|f| f.name == event.file.name) {
                    Some(existing) => *existing = event.file,
                    None => self.files.push(event.file),
                }
                let storage_key = key.storage_key();
                if self.positions.contains_key(&storage_key) {
                    return false;
                }
                let position = WindowPosition::new(FILE_ICON_COLUMN_X, row_y(self.positions.len()));
                self.positions.insert(storage_key, position);
                true
            }
            DesktopFileAction::Delete => {
                self.remove_file(&event.file.name);
                false
            }
        }
    }

    pub fn remove_file(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        self.files.len() != before
    }

    /// Resolves an icon click. File icons open the text editor with the file as payload; a
    /// file that no longer exists resolves to nothing.
    pub fn activation(&self, key: &IconKey) -> Option<IconActivation> {
        match key {
            IconKey::App(app_id) => Some(IconActivation {
                app_id: app_id.clone(),
                payload: None,
            }),
            IconKey::File(name) => {
                let file = self.file(name)?;
                Some(IconActivation {
                    app_id: NOTEPAD_APP_ID.to_string(),
                    payload: Some(json!({ "file": file })),
                })
            }
        }
    }
}

fn row_y(index: usize) -> i32 {
    ICON_TOP + ICON_ROW_HEIGHT * index as i32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn created(name: &str, content: &str) -> DesktopFileEvent {
        DesktopFileEvent {
            file: DesktopFile::new(name, Some(content.to_string())),
            action: DesktopFileAction::Create,
        }
    }

    #[test]
    fn icon_storage_keys_prefix_files() {
        assert_eq!(IconKey::App("notepad".to_string()).storage_key(), "notepad");
        assert_eq!(IconKey::File("a b".to_string()).storage_key(), "file-a b");
    }

    #[test]
    fn defaults_stack_desktop_apps_in_a_column() {
        let layer = DesktopIconLayer::with_defaults(AppRegistry::builtin());
        assert_eq!(
            layer.position_of(&IconKey::App("notepad".to_string())),
            WindowPosition::new(20, 20)
        );
        assert_eq!(
            layer.position_of(&IconKey::App("calculator".to_string())),
            WindowPosition::new(20, 120)
        );
        assert_eq!(layer.positions().len(), 7);
    }

    #[test]
    fn hydrated_positions_replace_defaults() {
        let mut layer = DesktopIconLayer::with_defaults(AppRegistry::builtin());
        let mut saved = BTreeMap::new();
        saved.insert("terminal".to_string(), WindowPosition::new(400, 300));
        layer.hydrate(Some(saved), None);

        assert_eq!(
            layer.position_of(&IconKey::App("terminal".to_string())),
            WindowPosition::new(400, 300)
        );
        assert_eq!(
            layer.position_of(&IconKey::App("notepad".to_string())),
            WindowPosition::new(20, 20)
        );
        assert_eq!(
            layer.position_of(&IconKey::File("x".to_string())),
            WindowPosition::new(120, 20)
        );
    }

    #[test]
    fn created_files_get_a_slot_in_the_file_column() {
        let mut layer = DesktopIconLayer::with_defaults(AppRegistry::builtin());
        assert!(layer.apply_file_event(created("todo.txt", "milk")));

        assert_eq!(layer.files().len(), 1);
        assert_eq!(
            layer.position_of(&IconKey::File("todo.txt".to_string())),
            WindowPosition::new(120, 720)
        );
    }

    #[test]
    fn recreating_a_file_replaces_it_and_keeps_its_slot() {
        let mut layer = DesktopIconLayer::default();
        layer.apply_file_event(created("todo.txt", "milk"));
        layer.set_position(
            &IconKey::File("todo.txt".to_string()),
            WindowPosition::new(500, 500),
        );

        assert!(!layer.apply_file_event(created("todo.txt", "eggs")));
        assert_eq!(layer.files().len(), 1);
        assert_eq!(
            layer.file("todo.txt").and_then(|f| f.content.clone()),
            Some("eggs".to_string())
        );
        assert_eq!(
            layer.position_of(&IconKey::File("todo.txt".to_string())),
            WindowPosition::new(500, 500)
        );
    }

    #[test]
    fn delete_event_removes_file() {
        let mut layer = DesktopIconLayer::default();
        layer.apply_file_event(created("todo.txt", "milk"));
        layer.apply_file_event(DesktopFileEvent {
            file: DesktopFile::new("todo.txt", None),
            action: DesktopFileAction::Delete,
        });
        assert!(layer.files().is_empty());
        assert!(!layer.remove_file("todo.txt"));
    }

    #[test]
    fn activation_opens_apps_and_files_in_notepad() {
        let mut layer = DesktopIconLayer::default();
        layer.apply_file_event(created("todo.txt", "milk"));

        assert_eq!(
            layer.activation(&IconKey::App("terminal".to_string())),
            Some(IconActivation {
                app_id: "terminal".to_string(),
                payload: None,
            })
        );
        assert_eq!(
            layer.activation(&IconKey::File("todo.txt".to_string())),
            Some(IconActivation {
                app_id: "notepad".to_string(),
                payload: Some(json!({ "file": { "name": "todo.txt", "content": "milk" } })),
            })
        );
        assert_eq!(layer.activation(&IconKey::File("gone.txt".to_string())), None);
    }
}
