//! Desktop shell runtime: application registry, window/session manager, pointer gesture
//! controller, desktop icon layer, settings, and the Leptos surfaces that render them.
//!
//! State lives in one [`DesktopState`] value mutated only by [`reduce_desktop`]. The reducer
//! returns [`RuntimeEffect`] intents that [`DesktopProvider`] executes against the injected
//! [`platform_host::PrefsStore`].

pub mod apps;
pub mod components;
pub mod desktop_icons;
mod effect_executor;
pub mod host;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod settings;
pub mod window_manager;

pub use apps::{app_descriptor, AppRegistry, ApplicationDescriptor};
pub use components::{
    use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell,
    DESKTOP_FILE_CHANGED_EVENT,
};
pub use desktop_icons::{DesktopIconLayer, IconActivation, IconKey};
pub use host::DesktopHostContext;
pub use interaction::{
    GestureOutcome, GestureState, InteractionController, ResizeHandle, WindowHitRegion,
};
pub use model::*;
pub use persistence::{load_boot_data, BootData};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use settings::{DesktopSettings, SettingUpdate, Theme};
pub use window_manager::{WindowManager, WindowManagerConfig, WindowManagerError};
