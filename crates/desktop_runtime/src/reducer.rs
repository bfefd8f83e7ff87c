//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{DesktopFileAction, DesktopFileEvent};
use leptos::logging;
use serde_json::Value;
use thiserror::Error;

use crate::{
    desktop_icons::IconKey,
    interaction::{GestureOutcome, InteractionController, WindowHitRegion},
    model::{DesktopState, InstanceId, PointerPosition, Viewport, WindowPosition, WindowSize},
    persistence::BootData,
    settings::{DesktopSettings, SettingUpdate},
    window_manager::WindowManagerError,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app, or refocus its running instance.
    OpenApp {
        /// Registered app id.
        app_id: String,
        /// Opaque payload handed to the app.
        payload: Option<Value>,
    },
    /// Open an app from the start menu; the menu closes.
    LaunchFromStartMenu {
        /// Registered app id.
        app_id: String,
    },
    CloseApp {
        instance_id: InstanceId,
    },
    FocusApp {
        instance_id: InstanceId,
    },
    MinimizeApp {
        instance_id: InstanceId,
    },
    /// Taskbar button press.
    ToggleTaskbarApp {
        instance_id: InstanceId,
    },
    /// Programmatic move; stored as given.
    MoveApp {
        instance_id: InstanceId,
        position: WindowPosition,
    },
    /// Programmatic resize; stored as given apart from negative components.
    ResizeApp {
        instance_id: InstanceId,
        size: WindowSize,
    },
    ToggleStartMenu,
    CloseStartMenu,
    /// Pointer pressed on window chrome.
    WindowPointerDown {
        instance_id: InstanceId,
        region: WindowHitRegion,
        pointer: PointerPosition,
    },
    /// Pointer pressed on a desktop icon.
    IconPointerDown {
        icon: IconKey,
        pointer: PointerPosition,
    },
    /// Global pointer move during a gesture.
    PointerMove {
        pointer: PointerPosition,
        viewport: Viewport,
    },
    /// Global pointer release.
    PointerUp,
    /// Change notification from a file-producing app.
    DesktopFileChanged(DesktopFileEvent),
    /// Open a desktop file in the text editor from the icon context menu.
    OpenDesktopFile {
        name: String,
    },
    /// Delete a desktop file from the icon context menu.
    DeleteDesktopFile {
        name: String,
    },
    UpdateSetting(SettingUpdate),
    /// Start-menu theme switch.
    ToggleTheme,
    ResetSettings,
    /// Apply persisted state loaded at boot.
    HydrateBoot(BootData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    PersistSettings,
    PersistIconPositions,
    PersistDesktopFiles,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot be applied. State is left untouched.
pub enum ReducerError {
    #[error("app `{0}` not found in registry")]
    UnknownApp(String),
}

impl From<WindowManagerError> for ReducerError {
    fn from(err: WindowManagerError) -> Self {
        match err {
            WindowManagerError::UnknownApp(app_id) => Self::UnknownApp(app_id),
        }
    }
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Actions that reference an instance which no longer exists are accepted and change nothing.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownApp`] when an open request names an unregistered app.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionController,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id, payload } => {
            state.windows.open_app(&app_id, payload)?;
        }
        DesktopAction::LaunchFromStartMenu { app_id } => {
            state.windows.open_app(&app_id, None)?;
            state.start_menu_open = false;
        }
        DesktopAction::CloseApp { instance_id } => {
            state.windows.close_app(&instance_id);
        }
        DesktopAction::FocusApp { instance_id } => {
            state.windows.focus_app(&instance_id);
        }
        DesktopAction::MinimizeApp { instance_id } => {
            state.windows.minimize_app(&instance_id);
        }
        DesktopAction::ToggleTaskbarApp { instance_id } => {
            state.windows.toggle_taskbar_app(&instance_id);
        }
        DesktopAction::MoveApp {
            instance_id,
            position,
        } => {
            state.windows.move_app(&instance_id, position);
        }
        DesktopAction::ResizeApp { instance_id, size } => {
            state.windows.resize_app(&instance_id, size);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::WindowPointerDown {
            instance_id,
            region,
            pointer,
        } => {
            state.start_menu_open = false;
            interaction.press_window(&mut state.windows, &instance_id, region, pointer);
        }
        DesktopAction::IconPointerDown { icon, pointer } => {
            state.start_menu_open = false;
            interaction.press_icon(&state.icons, icon, pointer);
        }
        DesktopAction::PointerMove { pointer, viewport } => {
            interaction.pointer_move(&mut state.windows, &mut state.icons, pointer, viewport);
        }
        DesktopAction::PointerUp => match interaction.pointer_up() {
            GestureOutcome::IconActivated(icon) => {
                // Logged rather than returned so the ended gesture is committed.
                if let Some(activation) = state.icons.activation(&icon) {
                    if let Err(err) = state.windows.open_app(&activation.app_id, activation.payload)
                    {
                        logging::warn!("icon `{}` did not open: {err}", icon.storage_key());
                    }
                }
            }
            GestureOutcome::IconDropped(_) => effects.push(RuntimeEffect::PersistIconPositions),
            GestureOutcome::None
            | GestureOutcome::WindowMoved(_)
            | GestureOutcome::WindowResized(_) => {}
        },
        DesktopAction::DesktopFileChanged(event) => {
            let created = event.action == DesktopFileAction::Create;
            if state.icons.apply_file_event(event) && created {
                effects.push(RuntimeEffect::PersistIconPositions);
            }
        }
        DesktopAction::OpenDesktopFile { name } => {
            if let Some(activation) = state.icons.activation(&IconKey::File(name)) {
                state
                    .windows
                    .open_app(&activation.app_id, activation.payload)?;
            }
        }
        DesktopAction::DeleteDesktopFile { name } => {
            if state.icons.remove_file(&name) {
                effects.push(RuntimeEffect::PersistDesktopFiles);
            }
        }
        DesktopAction::UpdateSetting(update) => {
            if state.settings.apply(update) {
                effects.push(RuntimeEffect::PersistSettings);
            }
        }
        DesktopAction::ToggleTheme => {
            let theme = state.settings.theme.toggled();
            state.settings.apply(SettingUpdate::Theme(theme));
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::ResetSettings => {
            state.settings = DesktopSettings::default();
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::HydrateBoot(boot) => {
            if let Some(settings) = boot.settings {
                state.settings = settings;
            }
            state.icons.hydrate(boot.icon_positions, boot.desktop_files);
            state.boot_hydrated = true;
        }
    }
    Ok(effects)
}
