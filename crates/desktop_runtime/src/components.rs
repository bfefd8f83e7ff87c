//! Desktop shell UI composition and interaction surfaces.
//!
//! Components read runtime signals and dispatch [`DesktopAction`] values; they never mutate
//! window or icon state directly.

mod desktop_icons;
mod start_menu;
mod taskbar;
mod window;

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::DesktopFileEvent;
use leptos::{leptos_dom::helpers::WindowListenerHandle, *};

use self::{
    desktop_icons::DesktopIconLayerView, start_menu::StartMenu, taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    model::PointerPosition,
    reducer::DesktopAction,
    settings::TaskbarPosition,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Window event that file-producing apps fire with a JSON [`DesktopFileEvent`] as `detail`.
pub const DESKTOP_FILE_CHANGED_EVENT: &str = "desktopFileCreated";

fn taskbar_position_class(position: TaskbarPosition) -> &'static str {
    match position {
        TaskbarPosition::Bottom => "taskbar-bottom",
        TaskbarPosition::Top => "taskbar-top",
        TaskbarPosition::Left => "taskbar-left",
    }
}

#[component]
/// Renders the full desktop shell UI.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    install_gesture_listeners(runtime);

    let file_listener = window_event_listener_untyped(DESKTOP_FILE_CHANGED_EVENT, move |ev| {
        match desktop_file_event_from_dom(ev) {
            Ok(event) => runtime.dispatch_action(DesktopAction::DesktopFileChanged(event)),
            Err(err) => logging::warn!("ignoring malformed desktop file event: {err}"),
        }
    });
    on_cleanup(move || file_listener.remove());

    let shell_class = move || {
        state.with(|desktop| {
            let mut class = format!(
                "desktop-shell {}",
                taskbar_position_class(desktop.settings.taskbar_position)
            );
            if !desktop.settings.animations {
                class.push_str(" no-animations");
            }
            class
        })
    };

    view! {
        <div
            id="desktop-shell-root"
            class=shell_class
            data-theme=move || state.with(|desktop| desktop.settings.theme.token())
            style=move || state.with(|desktop| desktop.settings.wallpaper_style())
        >
            <div
                class="desktop-surface"
                on:pointerdown=move |_| runtime.dispatch_action(DesktopAction::CloseStartMenu)
            >
                <DesktopIconLayerView />
                <div class="desktop-window-layer">
                    <For
                        each=move || {
                            state.with(|desktop| {
                                desktop
                                    .windows
                                    .instances()
                                    .iter()
                                    .map(|w| w.instance_id.clone())
                                    .collect::<Vec<_>>()
                            })
                        }
                        key=|instance_id| instance_id.clone()
                        let:instance_id
                    >
                        <DesktopWindow instance_id=instance_id />
                    </For>
                </div>
            </div>
            <StartMenu />
            <Taskbar />
        </div>
    }
}

/// Keeps global pointer move/release listeners installed exactly while a gesture is active.
fn install_gesture_listeners(runtime: DesktopRuntimeContext) {
    let handles: Rc<RefCell<Vec<WindowListenerHandle>>> = Rc::default();

    let remove_all = {
        let handles = Rc::clone(&handles);
        move || {
            for handle in handles.borrow_mut().drain(..) {
                handle.remove();
            }
        }
    };

    create_effect({
        let handles = Rc::clone(&handles);
        let remove_all = remove_all.clone();
        move |_| {
            let active = runtime.interaction.with(|gesture| gesture.is_active());
            if !active {
                remove_all();
                return;
            }
            if !handles.borrow().is_empty() {
                return;
            }
            let mut installed = handles.borrow_mut();
            installed.push(window_event_listener(ev::pointermove, move |ev| {
                runtime.dispatch_action(DesktopAction::PointerMove {
                    pointer: pointer_from_pointer_event(&ev),
                    viewport: runtime.host.get_value().viewport(),
                });
            }));
            installed.push(window_event_listener(ev::pointerup, move |_| {
                runtime.dispatch_action(DesktopAction::PointerUp);
            }));
            installed.push(window_event_listener(ev::pointercancel, move |_| {
                runtime.dispatch_action(DesktopAction::PointerUp);
            }));
        }
    });

    on_cleanup(remove_all);
}

fn desktop_file_event_from_dom(ev: web_sys::Event) -> Result<DesktopFileEvent, String> {
    use wasm_bindgen::JsCast;

    let custom = ev
        .dyn_into::<web_sys::CustomEvent>()
        .map_err(|_| "not a CustomEvent".to_string())?;
    let detail = custom.detail();
    let raw = match detail.as_string() {
        Some(raw) => raw,
        None => js_sys::JSON::stringify(&detail)
            .map_err(|e| format!("detail is not JSON: {e:?}"))?
            .into(),
    };
    parse_desktop_file_event(&raw)
}

fn parse_desktop_file_event(raw: &str) -> Result<DesktopFileEvent, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Primary-button presses only; secondary buttons never start gestures.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn stop_pointer_event(ev: &web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition::new(ev.client_x(), ev.client_y())
}
