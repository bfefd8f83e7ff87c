//! Window/session manager: the single owner of open application instances.
//!
//! Every mutation goes through the operations on [`WindowManager`], which keep the focus
//! invariants (at most one focused instance, never a focused minimized one). Operations that
//! reference an unknown instance id are no-ops and report `false`. Geometry is stored as given;
//! clamping and minimum-size floors are applied by [`crate::interaction`].

use desktop_app_contract::PayloadPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    apps::AppRegistry,
    model::{InstanceId, WindowInstance, WindowPosition, WindowSessionSnapshot, WindowSize},
};

/// Minimum window width kept by interactive resizing.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum window height kept by interactive resizing.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

/// Placement and sizing rules for managed windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Origin of the cascade on both axes.
    pub cascade_origin: i32,
    /// Offset added per already-open window.
    pub cascade_step: i32,
    /// Coordinate past which the cascade wraps back toward the origin.
    pub cascade_bound: i32,
    /// Floor applied to interactive resizes.
    pub min_size: WindowSize,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            cascade_origin: 50,
            cascade_step: 30,
            cascade_bound: 300,
            min_size: WindowSize::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
        }
    }
}

impl WindowManagerConfig {
    /// Initial position for a window opened while `open_count` windows are already open.
    ///
    /// The offset grows by `cascade_step` per open window; once the coordinate passes
    /// `cascade_bound` it wraps to `origin + offset % bound`.
    pub fn cascade_position(&self, open_count: usize) -> WindowPosition {
        let offset = self.cascade_step.saturating_mul(open_count as i32);
        let base = self.cascade_origin + offset;
        let coordinate = if base > self.cascade_bound && self.cascade_bound > 0 {
            self.cascade_origin + offset % self.cascade_bound
        } else {
            base
        };
        WindowPosition::new(coordinate, coordinate)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowManagerError {
    #[error("app `{0}` not found in registry")]
    UnknownApp(String),
}

#[derive(Debug, Clone)]
pub struct WindowManager {
    registry: AppRegistry,
    config: WindowManagerConfig,
    instances: Vec<WindowInstance>,
    next_serial: u64,
    next_z: u32,
}

impl WindowManager {
    pub fn new(registry: AppRegistry, config: WindowManagerConfig) -> Self {
        Self {
            registry,
            config,
            instances: Vec::new(),
            next_serial: 1,
            next_z: 1,
        }
    }

    pub fn registry(&self) -> AppRegistry {
        self.registry
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Opens `app_id`, or refocuses its existing instance.
    ///
    /// A refocused instance takes the new payload only when its descriptor opts in with
    /// [`PayloadPolicy::ReplaceOnRefocus`] and a payload was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagerError::UnknownApp`] without touching state when `app_id` is not
    /// registered.
    pub fn open_app(
        &mut self,
        app_id: &str,
        payload: Option<Value>,
    ) -> Result<InstanceId, WindowManagerError> {
        let descriptor = self
            .registry
            .get(app_id)
            .ok_or_else(|| WindowManagerError::UnknownApp(app_id.to_string()))?;

        if let Some(existing) = self.instance_for_app(app_id).map(|w| w.instance_id.clone()) {
            self.focus_app(&existing);
            if let (PayloadPolicy::ReplaceOnRefocus, Some(payload)) =
                (descriptor.payload_policy, payload)
            {
                if let Some(window) = self.find_mut(&existing) {
                    window.payload = Some(payload);
                }
            }
            return Ok(existing);
        }

        let instance_id = InstanceId::new(descriptor.id, self.next_serial);
        self.next_serial = self.next_serial.saturating_add(1);
        let position = self.config.cascade_position(self.instances.len());
        let z_index = self.raise();

        for window in &mut self.instances {
            window.is_focused = false;
        }
        self.instances.push(WindowInstance {
            instance_id: instance_id.clone(),
            app_id: descriptor.id.to_string(),
            title: descriptor.display_name.to_string(),
            icon_glyph: descriptor.icon_glyph.to_string(),
            position,
            size: descriptor.default_size,
            z_index,
            is_focused: true,
            is_minimized: false,
            payload,
        });
        Ok(instance_id)
    }

    /// Removes an instance. Focus is not handed to another window.
    pub fn close_app(&mut self, instance_id: &InstanceId) -> bool {
        let before = self.instances.len();
        self.instances.retain(|w| &w.instance_id != instance_id);
        self.instances.len() != before
    }

    /// Focuses, restores, and raises an instance; every other instance loses focus.
    pub fn focus_app(&mut self, instance_id: &InstanceId) -> bool {
        if self.find(instance_id).is_none() {
            return false;
        }
        let z_index = self.raise();
        for window in &mut self.instances {
            if &window.instance_id == instance_id {
                window.is_focused = true;
                window.is_minimized = false;
                window.z_index = z_index;
            } else {
                window.is_focused = false;
            }
        }
        true
    }

    pub fn minimize_app(&mut self, instance_id: &InstanceId) -> bool {
        let Some(window) = self.find_mut(instance_id) else {
            return false;
        };
        window.is_minimized = true;
        window.is_focused = false;
        true
    }

    /// Overwrites the position as given; no clamping.
    pub fn move_app(&mut self, instance_id: &InstanceId, position: WindowPosition) -> bool {
        let Some(window) = self.find_mut(instance_id) else {
            return false;
        };
        window.position = position;
        true
    }

    /// Overwrites the size; negative components are stored as zero.
    pub fn resize_app(&mut self, instance_id: &InstanceId, size: WindowSize) -> bool {
        let Some(window) = self.find_mut(instance_id) else {
            return false;
        };
        window.size = WindowSize::new(size.width.max(0), size.height.max(0));
        true
    }

    /// Taskbar button behavior: minimize the focused visible window, otherwise focus it.
    pub fn toggle_taskbar_app(&mut self, instance_id: &InstanceId) -> bool {
        let Some(window) = self.find(instance_id) else {
            return false;
        };
        if window.is_focused && !window.is_minimized {
            self.minimize_app(instance_id)
        } else {
            self.focus_app(instance_id)
        }
    }

    pub fn instances(&self) -> &[WindowInstance] {
        &self.instances
    }

    pub fn instance(&self, instance_id: &InstanceId) -> Option<&WindowInstance> {
        self.find(instance_id)
    }

    pub fn instance_for_app(&self, app_id: &str) -> Option<&WindowInstance> {
        self.instances.iter().find(|w| w.app_id == app_id)
    }

    pub fn focused_instance_id(&self) -> Option<&InstanceId> {
        self.instances
            .iter()
            .find(|w| w.is_focused)
            .map(|w| &w.instance_id)
    }

    /// Non-minimized instances in paint order (bottom first).
    pub fn visible_instances(&self) -> Vec<&WindowInstance> {
        let mut visible: Vec<_> = self.instances.iter().filter(|w| !w.is_minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    pub fn snapshot(&self) -> WindowSessionSnapshot {
        WindowSessionSnapshot {
            next_serial: self.next_serial,
            instances: self.instances.clone(),
        }
    }

    fn raise(&mut self) -> u32 {
        let z_index = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z_index
    }

    fn find(&self, instance_id: &InstanceId) -> Option<&WindowInstance> {
        self.instances.iter().find(|w| &w.instance_id == instance_id)
    }

    fn find_mut(&mut self, instance_id: &InstanceId) -> Option<&mut WindowInstance> {
        self.instances
            .iter_mut()
            .find(|w| &w.instance_id == instance_id)
    }
}

impl PartialEq for WindowManager {
    /// Compares session state; the registry is a static table and is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.next_serial == other.next_serial
            && self.next_z == other.next_z
            && self.instances == other.instances
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(AppRegistry::builtin(), WindowManagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn focused_count(manager: &WindowManager) -> usize {
        manager.instances().iter().filter(|w| w.is_focused).count()
    }

    #[test]
    fn cascade_steps_then_wraps_toward_origin() {
        let config = WindowManagerConfig::default();
        let coords: Vec<i32> = (0..12).map(|n| config.cascade_position(n).x).collect();
        assert_eq!(
            coords,
            vec![50, 80, 110, 140, 170, 200, 230, 260, 290, 320, 50, 80]
        );
        assert_eq!(config.cascade_position(3), WindowPosition::new(140, 140));
    }

    #[test]
    fn config_deserializes_partial_overrides() {
        let config: WindowManagerConfig =
            serde_json::from_value(json!({ "cascade_step": 40 })).expect("parse config");
        assert_eq!(config.cascade_step, 40);
        assert_eq!(config.cascade_origin, 50);
        assert_eq!(config.min_size, WindowSize::new(300, 200));
    }

    #[test]
    fn open_uses_descriptor_defaults_and_focuses() {
        let mut manager = WindowManager::default();
        let id = manager.open_app("terminal", None).expect("open terminal");

        let window = manager.instance(&id).expect("window");
        assert_eq!(window.title, "Terminal");
        assert_eq!(window.icon_glyph, "💻");
        assert_eq!(window.size, WindowSize::new(700, 500));
        assert_eq!(window.position, WindowPosition::new(50, 50));
        assert!(window.is_focused);
        assert!(!window.is_minimized);
        assert_eq!(manager.focused_instance_id(), Some(&id));
    }

    #[test]
    fn open_unknown_app_leaves_state_untouched() {
        let mut manager = WindowManager::default();
        manager.open_app("notepad", None).expect("open notepad");
        let before = manager.snapshot();

        let err = manager.open_app("file-manager", None).expect_err("unknown app");
        assert_eq!(err, WindowManagerError::UnknownApp("file-manager".to_string()));
        assert_eq!(manager.snapshot(), before);
    }

    #[test]
    fn reopening_refocuses_without_duplicating() {
        let mut manager = WindowManager::default();
        let calc = manager.open_app("calculator", None).expect("open");
        let notes = manager.open_app("notepad", None).expect("open");
        manager.minimize_app(&calc);

        let again = manager.open_app("calculator", None).expect("reopen");
        assert_eq!(again, calc);
        assert_eq!(manager.instances().len(), 2);
        let window = manager.instance(&calc).expect("calc");
        assert!(window.is_focused);
        assert!(!window.is_minimized);
        assert!(!manager.instance(&notes).expect("notes").is_focused);
    }

    #[test]
    fn refocus_payload_follows_descriptor_policy() {
        let mut manager = WindowManager::default();
        let notes = manager
            .open_app("notepad", Some(json!({ "file": { "name": "a.txt" } })))
            .expect("open");
        let calc = manager
            .open_app("calculator", Some(json!({ "seed": 1 })))
            .expect("open");

        manager
            .open_app("notepad", Some(json!({ "file": { "name": "b.txt" } })))
            .expect("reopen notes");
        manager
            .open_app("calculator", Some(json!({ "seed": 2 })))
            .expect("reopen calc");
        manager.open_app("notepad", None).expect("reopen without payload");

        assert_eq!(
            manager.instance(&notes).and_then(|w| w.payload.clone()),
            Some(json!({ "file": { "name": "b.txt" } }))
        );
        assert_eq!(
            manager.instance(&calc).and_then(|w| w.payload.clone()),
            Some(json!({ "seed": 1 }))
        );
    }

    #[test]
    fn focus_demotes_others_and_keeps_their_minimized_flag() {
        let mut manager = WindowManager::default();
        let a = manager.open_app("notepad", None).expect("open");
        let b = manager.open_app("terminal", None).expect("open");
        let c = manager.open_app("browser", None).expect("open");
        manager.minimize_app(&b);

        assert!(manager.focus_app(&a));
        assert_eq!(focused_count(&manager), 1);
        assert_eq!(manager.focused_instance_id(), Some(&a));
        assert!(manager.instance(&b).expect("b").is_minimized);
        assert!(!manager.instance(&c).expect("c").is_focused);

        let top = manager.visible_instances().last().map(|w| w.instance_id.clone());
        assert_eq!(top, Some(a));
    }

    #[test]
    fn minimize_unfocuses_and_hides() {
        let mut manager = WindowManager::default();
        let a = manager.open_app("notepad", None).expect("open");
        assert!(manager.minimize_app(&a));

        let window = manager.instance(&a).expect("a");
        assert!(window.is_minimized);
        assert!(!window.is_focused);
        assert!(manager.visible_instances().is_empty());
        assert_eq!(manager.instances().len(), 1);
    }

    #[test]
    fn close_does_not_promote_another_window() {
        let mut manager = WindowManager::default();
        let a = manager.open_app("notepad", None).expect("open");
        let b = manager.open_app("terminal", None).expect("open");

        assert!(manager.close_app(&b));
        assert_eq!(manager.focused_instance_id(), None);
        assert!(!manager.instance(&a).expect("a").is_focused);
        assert!(!manager.close_app(&b));
    }

    #[test]
    fn ids_are_never_reused_after_close() {
        let mut manager = WindowManager::default();
        let mut issued = HashSet::new();
        for _ in 0..5 {
            let id = manager.open_app("calculator", None).expect("open");
            assert!(issued.insert(id.clone()), "reused id {id}");
            manager.close_app(&id);
        }
    }

    #[test]
    fn unknown_instance_operations_are_noops() {
        let mut manager = WindowManager::default();
        manager.open_app("notepad", None).expect("open");
        let before = manager.snapshot();
        let ghost = InstanceId::new("notepad", 999);

        assert!(!manager.focus_app(&ghost));
        assert!(!manager.minimize_app(&ghost));
        assert!(!manager.move_app(&ghost, WindowPosition::new(1, 1)));
        assert!(!manager.resize_app(&ghost, WindowSize::new(400, 400)));
        assert!(!manager.toggle_taskbar_app(&ghost));
        assert!(!manager.close_app(&ghost));
        assert_eq!(manager.snapshot(), before);
    }

    #[test]
    fn move_stores_position_verbatim_and_resize_rejects_negatives() {
        let mut manager = WindowManager::default();
        let a = manager.open_app("notepad", None).expect("open");

        manager.move_app(&a, WindowPosition::new(-40, 5000));
        manager.resize_app(&a, WindowSize::new(-10, 250));

        let window = manager.instance(&a).expect("a");
        assert_eq!(window.position, WindowPosition::new(-40, 5000));
        assert_eq!(window.size, WindowSize::new(0, 250));
    }

    #[test]
    fn taskbar_toggle_minimizes_focused_and_restores_minimized() {
        let mut manager = WindowManager::default();
        let a = manager.open_app("notepad", None).expect("open");
        let b = manager.open_app("terminal", None).expect("open");

        manager.toggle_taskbar_app(&b);
        assert!(manager.instance(&b).expect("b").is_minimized);

        manager.toggle_taskbar_app(&b);
        assert!(manager.instance(&b).expect("b").is_focused);

        manager.toggle_taskbar_app(&a);
        assert!(manager.instance(&a).expect("a").is_focused);
        assert!(!manager.instance(&a).expect("a").is_minimized);
        assert!(!manager.instance(&b).expect("b").is_focused);
    }
}
