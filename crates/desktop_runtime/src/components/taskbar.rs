use std::time::Duration;

use super::*;
use crate::model::InstanceId;

/// Current local wall-clock `(hours, minutes)`.
fn local_time() -> (u32, u32) {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new_0();
        (date.get_hours(), date.get_minutes())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        (0, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskbarContextMenu {
    instance_id: InstanceId,
    title: String,
    x: i32,
    y: i32,
}

fn close_label(title: &str) -> String {
    format!("Close {title}")
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let now = create_rw_signal(local_time());
    let context_menu = create_rw_signal(None::<TaskbarContextMenu>);

    let dismiss_listener = window_event_listener(ev::pointerdown, move |_| {
        if context_menu.get_untracked().is_some() {
            context_menu.set(None);
        }
    });
    on_cleanup(move || dismiss_listener.remove());

    if let Ok(interval) =
        set_interval_with_handle(move || now.set(local_time()), Duration::from_secs(1))
    {
        on_cleanup(move || interval.clear());
    }

    let buttons = move || {
        state.with(|desktop| {
            desktop
                .windows
                .instances()
                .iter()
                .map(|w| {
                    (
                        w.instance_id.clone(),
                        w.icon_glyph.clone(),
                        w.title.clone(),
                        w.is_focused && !w.is_minimized,
                    )
                })
                .collect::<Vec<_>>()
        })
    };
    let clock_format = move || state.with(|desktop| desktop.settings.clock_format);
    let show_clock = move || state.with(|desktop| desktop.settings.show_clock);

    view! {
        <nav class="taskbar" aria-label="Taskbar">
            <button
                class=move || {
                    if state.with(|desktop| desktop.start_menu_open) {
                        "taskbar-start active"
                    } else {
                        "taskbar-start"
                    }
                }
                aria-label="Start"
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                "⊞"
            </button>
            <div class="taskbar-windows">
                <For
                    each=buttons
                    key=|(instance_id, _, title, active)| {
                        (instance_id.clone(), title.clone(), *active)
                    }
                    let:button
                >
                    {
                        let (instance_id, glyph, title, active) = button;
                        let menu_target = (instance_id.clone(), title.clone());
                        let on_contextmenu = move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            let (instance_id, title) = menu_target.clone();
                            context_menu.set(Some(TaskbarContextMenu {
                                instance_id,
                                title,
                                x: ev.client_x(),
                                y: ev.client_y(),
                            }));
                        };
                        view! {
                            <button
                                class=if active { "taskbar-window active" } else { "taskbar-window" }
                                aria-pressed=active.to_string()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::ToggleTaskbarApp {
                                        instance_id: instance_id.clone(),
                                    })
                                }
                                on:contextmenu=on_contextmenu
                            >
                                <span aria-hidden="true">{glyph}</span>
                                <span>{title}</span>
                            </button>
                        }
                    }
                </For>
            </div>
            <Show when=show_clock fallback=|| ()>
                <time class="taskbar-clock">
                    {move || {
                        let (hours, minutes) = now.get();
                        clock_format().format(hours, minutes)
                    }}
                </time>
            </Show>
            {move || {
                context_menu
                    .get()
                    .map(|menu| {
                        let TaskbarContextMenu { instance_id, title, x, y } = menu;
                        view! {
                            <div
                                class="taskbar-context-menu"
                                role="menu"
                                style=format!("left:{x}px;top:{y}px;")
                                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            >
                                <button
                                    role="menuitem"
                                    on:click=move |_| {
                                        context_menu.set(None);
                                        runtime.dispatch_action(DesktopAction::CloseApp {
                                            instance_id: instance_id.clone(),
                                        });
                                    }
                                >
                                    {close_label(&title)}
                                </button>
                            </div>
                        }
                    })
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn close_item_names_the_window() {
        assert_eq!(close_label("Terminal"), "Close Terminal");
    }
}
