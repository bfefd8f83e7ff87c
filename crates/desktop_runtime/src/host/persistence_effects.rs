use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_settings(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let settings = runtime.state.get_untracked().settings;
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_settings(prefs.as_ref(), &settings).await {
            logging::warn!("persist settings failed: {err}");
        }
    });
}

pub(super) fn persist_icon_positions(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let icons = runtime.state.get_untracked().icons;
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_icon_positions(prefs.as_ref(), &icons).await {
            logging::warn!("persist icon positions failed: {err}");
        }
    });
}

pub(super) fn persist_desktop_files(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let icons = runtime.state.get_untracked().icons;
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_desktop_files(prefs.as_ref(), &icons).await {
            logging::warn!("persist desktop files failed: {err}");
        }
    });
}
