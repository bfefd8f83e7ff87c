use desktop_app_contract::{AppMountContext, ApplicationId};
use serde_json::Value;

use super::*;
use crate::{
    interaction::{ResizeHandle, WindowHitRegion},
    model::InstanceId,
};

fn resize_handle_class(handle: ResizeHandle) -> &'static str {
    match handle {
        ResizeHandle::BottomRight => "window-resize-handle edge-se",
        ResizeHandle::Right => "window-resize-handle edge-e",
        ResizeHandle::Bottom => "window-resize-handle edge-s",
    }
}

#[component]
pub(super) fn DesktopWindow(instance_id: InstanceId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(instance_id);

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| id.with_value(|id| desktop.windows.instance(id).cloned()))
    });

    let press = move |region: WindowHitRegion, ev: &web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::WindowPointerDown {
            instance_id: id.get_value(),
            region,
            pointer: pointer_from_pointer_event(ev),
        });
    };
    let on_window_pointerdown = move |ev: web_sys::PointerEvent| {
        ev.stop_propagation();
        press(WindowHitRegion::Content, &ev);
    };
    let on_titlebar_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        stop_pointer_event(&ev);
        press(WindowHitRegion::TitleBar, &ev);
    };
    let on_controls_pointerdown = move |ev: web_sys::PointerEvent| {
        ev.stop_propagation();
        press(WindowHitRegion::Controls, &ev);
    };
    let minimize = move |_| {
        runtime.dispatch_action(DesktopAction::MinimizeApp {
            instance_id: id.get_value(),
        })
    };
    let close = move |_| {
        runtime.dispatch_action(DesktopAction::CloseApp {
            instance_id: id.get_value(),
        })
    };

    let style = move || {
        window.with(|win| match win {
            Some(win) => format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                win.position.x, win.position.y, win.size.width, win.size.height, win.z_index
            ),
            None => String::new(),
        })
    };
    let class = move || {
        window.with(|win| {
            let mut class = String::from("desktop-window");
            if let Some(win) = win {
                if win.is_focused {
                    class.push_str(" focused");
                }
                if win.is_minimized {
                    class.push_str(" minimized");
                }
            }
            class
        })
    };
    let title = move || window.with(|win| win.as_ref().map(|w| w.title.clone()).unwrap_or_default());
    let glyph =
        move || window.with(|win| win.as_ref().map(|w| w.icon_glyph.clone()).unwrap_or_default());

    view! {
        <section
            class=class
            style=style
            role="dialog"
            aria-label=title
            hidden=move || window.with(|win| win.as_ref().map_or(true, |w| w.is_minimized))
            on:pointerdown=on_window_pointerdown
        >
            <header class="titlebar" on:pointerdown=on_titlebar_pointerdown>
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">{glyph}</span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls" on:pointerdown=on_controls_pointerdown>
                    <button aria-label="Minimize window" on:click=minimize>"_"</button>
                    <button aria-label="Close window" on:click=close>"×"</button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody instance_id=id.get_value() />
            </div>
            <WindowResizeHandle instance_id=id.get_value() handle=ResizeHandle::Right />
            <WindowResizeHandle instance_id=id.get_value() handle=ResizeHandle::Bottom />
            <WindowResizeHandle instance_id=id.get_value() handle=ResizeHandle::BottomRight />
        </section>
    }
}

#[component]
fn WindowResizeHandle(instance_id: InstanceId, handle: ResizeHandle) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(instance_id);

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        stop_pointer_event(&ev);
        runtime.dispatch_action(DesktopAction::WindowPointerDown {
            instance_id: id.get_value(),
            region: WindowHitRegion::Resize(handle),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div class=resize_handle_class(handle) aria-hidden="true" on:pointerdown=on_pointerdown />
    }
}

/// Mounts the app view. The app is remounted only when the instance payload changes.
#[component]
fn WindowBody(instance_id: InstanceId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(instance_id);

    let mount_target = create_memo(move |_| {
        runtime.state.with(|desktop| {
            id.with_value(|id| {
                desktop
                    .windows
                    .instance(id)
                    .map(|w| (w.app_id.clone(), w.payload.clone()))
            })
        })
    });

    let contents = move || {
        let closed = || view! { <p>"Closed"</p> }.into_view();
        let Some((app_id, payload)) = mount_target.get() else {
            return closed();
        };
        let module = runtime
            .state
            .with_untracked(|desktop| desktop.windows.registry().get(&app_id).map(|d| d.module));
        match module {
            Some(module) => module.mount(mount_context(app_id, &id.get_value(), payload)),
            None => closed(),
        }
    };

    view! { <div class="window-body-content">{contents}</div> }
}

fn mount_context(app_id: String, instance_id: &InstanceId, payload: Option<Value>) -> AppMountContext {
    AppMountContext {
        app_id: ApplicationId::trusted(app_id),
        instance_id: instance_id.to_string(),
        payload,
    }
}
