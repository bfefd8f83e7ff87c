//! Pointer gesture state machine for window move/resize and desktop icon drag.
//!
//! A gesture is classified once, at press time, and runs `press -> move* -> release`:
//!
//! | state             | move                                   | release                 |
//! |-------------------|----------------------------------------|-------------------------|
//! | `Idle`            | ignored                                | ignored                 |
//! | `PendingIconDrag` | becomes `Dragging` past the threshold  | icon activation (click) |
//! | `Dragging`        | clamped position write                 | drop                    |
//! | `Resizing`        | floored size write                     | end                     |
//!
//! Every write is a complete position or size pair, so an abandoned gesture leaves the last
//! committed geometry in place.

use serde::{Deserialize, Serialize};

use crate::{
    desktop_icons::{DesktopIconLayer, IconKey, DESKTOP_ICON_SIZE},
    model::{InstanceId, PointerPosition, Viewport, WindowPosition, WindowSize},
    window_manager::WindowManager,
};

/// Movement (px, either axis, exclusive) before an icon press becomes a drag.
pub const ICON_DRAG_THRESHOLD_PX: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    /// Bottom-right corner: both axes.
    BottomRight,
    /// Right edge: width only.
    Right,
    /// Bottom edge: height only.
    Bottom,
}

impl ResizeHandle {
    /// New size for a pointer delta from the gesture origin, floored at `min`.
    pub fn resize(self, start: WindowSize, dx: i32, dy: i32, min: WindowSize) -> WindowSize {
        let width = match self {
            Self::BottomRight | Self::Right => (start.width + dx).max(min.width),
            Self::Bottom => start.width,
        };
        let height = match self {
            Self::BottomRight | Self::Bottom => (start.height + dy).max(min.height),
            Self::Right => start.height,
        };
        WindowSize::new(width, height)
    }
}

/// Part of a window's chrome that received a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowHitRegion {
    TitleBar,
    /// Minimize/close buttons; never starts a gesture.
    Controls,
    Resize(ResizeHandle),
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Window(InstanceId),
    Icon(IconKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    PendingIconDrag {
        icon: IconKey,
        pointer_start: PointerPosition,
        position_start: WindowPosition,
    },
    Dragging {
        target: DragTarget,
        pointer_start: PointerPosition,
        position_start: WindowPosition,
    },
    Resizing {
        instance_id: InstanceId,
        handle: ResizeHandle,
        pointer_start: PointerPosition,
        size_start: WindowSize,
    },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    None,
    /// Press and release without crossing the drag threshold.
    IconActivated(IconKey),
    IconDropped(IconKey),
    WindowMoved(InstanceId),
    WindowResized(InstanceId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionController {
    gesture: GestureState,
}

impl InteractionController {
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, GestureState::Idle)
    }

    /// Handles a press on window chrome. Any press except on the controls focuses the window;
    /// title-bar and resize-handle presses also start a gesture.
    ///
    /// Returns `true` when a gesture started.
    pub fn press_window(
        &mut self,
        windows: &mut WindowManager,
        instance_id: &InstanceId,
        region: WindowHitRegion,
        pointer: PointerPosition,
    ) -> bool {
        if self.is_active() || region == WindowHitRegion::Controls {
            return false;
        }
        let Some(window) = windows.instance(instance_id) else {
            return false;
        };
        let (position_start, size_start) = (window.position, window.size);
        windows.focus_app(instance_id);

        self.gesture = match region {
            WindowHitRegion::TitleBar => GestureState::Dragging {
                target: DragTarget::Window(instance_id.clone()),
                pointer_start: pointer,
                position_start,
            },
            WindowHitRegion::Resize(handle) => GestureState::Resizing {
                instance_id: instance_id.clone(),
                handle,
                pointer_start: pointer,
                size_start,
            },
            WindowHitRegion::Content | WindowHitRegion::Controls => return false,
        };
        true
    }

    /// Arms an icon drag. Nothing moves until the pointer leaves the threshold box.
    pub fn press_icon(
        &mut self,
        icons: &DesktopIconLayer,
        icon: IconKey,
        pointer: PointerPosition,
    ) -> bool {
        if self.is_active() {
            return false;
        }
        let position_start = icons.position_of(&icon);
        self.gesture = GestureState::PendingIconDrag {
            icon,
            pointer_start: pointer,
            position_start,
        };
        true
    }

    /// Advances the active gesture. Returns `true` when geometry was written.
    pub fn pointer_move(
        &mut self,
        windows: &mut WindowManager,
        icons: &mut DesktopIconLayer,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> bool {
        if let GestureState::PendingIconDrag {
            icon,
            pointer_start,
            position_start,
        } = &self.gesture
        {
            let dx = pointer.x - pointer_start.x;
            let dy = pointer.y - pointer_start.y;
            if dx.abs() <= ICON_DRAG_THRESHOLD_PX && dy.abs() <= ICON_DRAG_THRESHOLD_PX {
                return false;
            }
            self.gesture = GestureState::Dragging {
                target: DragTarget::Icon(icon.clone()),
                pointer_start: *pointer_start,
                position_start: *position_start,
            };
        }

        match &self.gesture {
            GestureState::Idle | GestureState::PendingIconDrag { .. } => false,
            GestureState::Dragging {
                target,
                pointer_start,
                position_start,
            } => {
                let candidate = WindowPosition::new(
                    position_start.x + pointer.x - pointer_start.x,
                    position_start.y + pointer.y - pointer_start.y,
                );
                match target {
                    DragTarget::Window(instance_id) => {
                        let Some(size) = windows.instance(instance_id).map(|w| w.size) else {
                            return false;
                        };
                        windows.move_app(instance_id, viewport.clamp(candidate, size))
                    }
                    DragTarget::Icon(icon) => {
                        icons.set_position(icon, viewport.clamp(candidate, DESKTOP_ICON_SIZE));
                        true
                    }
                }
            }
            GestureState::Resizing {
                instance_id,
                handle,
                pointer_start,
                size_start,
            } => {
                let size = handle.resize(
                    *size_start,
                    pointer.x - pointer_start.x,
                    pointer.y - pointer_start.y,
                    windows.config().min_size,
                );
                windows.resize_app(instance_id, size)
            }
        }
    }

    /// Ends the active gesture.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => GestureOutcome::None,
            GestureState::PendingIconDrag { icon, .. } => GestureOutcome::IconActivated(icon),
            GestureState::Dragging {
                target: DragTarget::Icon(icon),
                ..
            } => GestureOutcome::IconDropped(icon),
            GestureState::Dragging {
                target: DragTarget::Window(instance_id),
                ..
            } => GestureOutcome::WindowMoved(instance_id),
            GestureState::Resizing { instance_id, .. } => GestureOutcome::WindowResized(instance_id),
        }
    }
}
