//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Effect execution and viewport queries sit behind [`DesktopHostContext`] so the reducer stays
//! pure and tests can inject an in-memory store.

mod boot;
mod persistence_effects;

use std::rc::Rc;

use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::{host_strategy_name, prefs_store};

use crate::{
    model::Viewport,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            prefs: Rc::new(prefs_store()),
            host_strategy_name: host_strategy_name(),
        }
    }
}

impl DesktopHostContext {
    /// Builds a host context around an explicit preference store.
    pub fn with_prefs_store(prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            prefs,
            host_strategy_name: "injected",
        }
    }

    /// Returns the configured preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Loads persisted settings, icon positions and desktop files once and hydrates the runtime.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistSettings => {
                persistence_effects::persist_settings(self.clone(), runtime)
            }
            RuntimeEffect::PersistIconPositions => {
                persistence_effects::persist_icon_positions(self.clone(), runtime)
            }
            RuntimeEffect::PersistDesktopFiles => {
                persistence_effects::persist_desktop_files(self.clone(), runtime)
            }
        }
    }

    /// Returns the browser viewport that dragged windows and icons are clamped into.
    pub fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return Viewport::default();
            };
            let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                value.ok().and_then(|v| v.as_f64()).map(|v| v as i32)
            };
            match (dimension(window.inner_width()), dimension(window.inner_height())) {
                (Some(width), Some(height)) => Viewport::new(width, height),
                _ => Viewport::default(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Viewport::default()
        }
    }
}
