use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    apps::AppRegistry,
    desktop_icons::DesktopIconLayer,
    settings::DesktopSettings,
    window_manager::{WindowManager, WindowManagerConfig},
};

/// Session-unique window instance id (`<app-id>-<serial>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    pub(crate) fn new(app_id: &str, serial: u64) -> Self {
        Self(format!("{app_id}-{serial}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Visible desktop area that dragged elements are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamps `position` so an element of `size` stays inside the viewport.
    ///
    /// When the element is larger than the viewport the origin edge wins (`0`).
    pub fn clamp(self, position: WindowPosition, size: WindowSize) -> WindowPosition {
        WindowPosition {
            x: position.x.min(self.width - size.width).max(0),
            y: position.y.min(self.height - size.height).max(0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

/// One open occurrence of a registered application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInstance {
    pub instance_id: InstanceId,
    pub app_id: String,
    pub title: String,
    pub icon_glyph: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub z_index: u32,
    pub is_focused: bool,
    pub is_minimized: bool,
    pub payload: Option<Value>,
}

/// Read-only copy of the window manager's session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSessionSnapshot {
    pub next_serial: u64,
    pub instances: Vec<WindowInstance>,
}

/// Whole reducer state for one desktop session.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub windows: WindowManager,
    pub icons: DesktopIconLayer,
    pub settings: DesktopSettings,
    pub start_menu_open: bool,
    pub boot_hydrated: bool,
}

impl DesktopState {
    pub fn new(registry: AppRegistry, config: WindowManagerConfig) -> Self {
        Self {
            windows: WindowManager::new(registry, config),
            icons: DesktopIconLayer::with_defaults(registry),
            settings: DesktopSettings::default(),
            start_menu_open: false,
            boot_hydrated: false,
        }
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(AppRegistry::builtin(), WindowManagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_element_inside_viewport() {
        let viewport = Viewport::new(1024, 768);
        let size = WindowSize::new(600, 400);
        assert_eq!(
            viewport.clamp(WindowPosition::new(-100, -100), size),
            WindowPosition::new(0, 0)
        );
        assert_eq!(
            viewport.clamp(WindowPosition::new(900, 700), size),
            WindowPosition::new(424, 368)
        );
        assert_eq!(
            viewport.clamp(WindowPosition::new(10, 20), size),
            WindowPosition::new(10, 20)
        );
    }

    #[test]
    fn clamp_prefers_origin_for_oversized_elements() {
        let viewport = Viewport::new(500, 300);
        assert_eq!(
            viewport.clamp(WindowPosition::new(40, 40), WindowSize::new(800, 600)),
            WindowPosition::new(0, 0)
        );
    }

    #[test]
    fn instance_ids_embed_app_and_serial() {
        assert_eq!(InstanceId::new("notepad", 3).to_string(), "notepad-3");
    }
}
