use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let prefs = host.prefs_store();
            let boot = persistence::load_boot_data(prefs.as_ref()).await;
            logging::log!(
                "desktop boot hydration via {} (settings: {}, icon positions: {}, files: {})",
                host.host_strategy_name(),
                boot.settings.is_some(),
                boot.icon_positions.is_some(),
                boot.desktop_files.as_ref().map_or(0, Vec::len),
            );
            dispatch.call(DesktopAction::HydrateBoot(boot));
        });
    });
}
