use super::*;
use crate::settings::{ClockFormat, SettingUpdate, Theme, WALLPAPER_CHOICES};

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let registry = state.with_untracked(|desktop| desktop.windows.registry());

    let theme_label = move || match state.with(|desktop| desktop.settings.theme) {
        Theme::Dark => "Light theme",
        Theme::Light | Theme::Neon => "Dark theme",
    };
    let toggle_clock = move |_| {
        let show = state.with_untracked(|desktop| desktop.settings.show_clock);
        runtime.dispatch_action(DesktopAction::UpdateSetting(SettingUpdate::ShowClock(!show)));
    };
    let toggle_clock_format = move |_| {
        let next = match state.with_untracked(|desktop| desktop.settings.clock_format) {
            ClockFormat::TwelveHour => ClockFormat::TwentyFourHour,
            ClockFormat::TwentyFourHour => ClockFormat::TwelveHour,
        };
        runtime.dispatch_action(DesktopAction::UpdateSetting(SettingUpdate::ClockFormat(next)));
    };

    view! {
        <Show when=move || state.with(|desktop| desktop.start_menu_open) fallback=|| ()>
            <div
                class="start-menu"
                role="menu"
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            >
                <ul class="start-menu-apps">
                    {registry
                        .launcher_apps()
                        .map(|app| {
                            let app_id = app.id;
                            view! {
                                <li>
                                    <button
                                        role="menuitem"
                                        on:click=move |_| {
                                            runtime.dispatch_action(DesktopAction::LaunchFromStartMenu {
                                                app_id: app_id.to_string(),
                                            })
                                        }
                                    >
                                        <span aria-hidden="true">{app.icon_glyph}</span>
                                        <span>{app.display_name}</span>
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="start-menu-wallpapers" role="group" aria-label="Wallpaper">
                    {WALLPAPER_CHOICES
                        .iter()
                        .map(|choice| {
                            let id = choice.id;
                            let class = move || {
                                if state.with(|desktop| desktop.settings.wallpaper == id) {
                                    "wallpaper-choice selected"
                                } else {
                                    "wallpaper-choice"
                                }
                            };
                            view! {
                                <button
                                    class=class
                                    title=choice.name
                                    aria-label=choice.name
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::UpdateSetting(
                                            SettingUpdate::Wallpaper(id.to_string()),
                                        ))
                                    }
                                >
                                    {choice.glyph}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="start-menu-settings">
                    <button role="menuitem" on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleTheme)>
                        {theme_label}
                    </button>
                    <button role="menuitem" on:click=toggle_clock>"Toggle clock"</button>
                    <button role="menuitem" on:click=toggle_clock_format>"12h / 24h"</button>
                    <button role="menuitem" on:click=move |_| runtime.dispatch_action(DesktopAction::ResetSettings)>
                        "Reset settings"
                    </button>
                </div>
            </div>
        </Show>
    }
}
