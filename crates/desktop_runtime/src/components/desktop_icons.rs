use super::*;
use crate::desktop_icons::IconKey;

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileContextMenu {
    name: String,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IconView {
    key: IconKey,
    glyph: String,
    label: String,
}

fn icon_views(desktop: &crate::model::DesktopState) -> Vec<IconView> {
    let apps = desktop
        .windows
        .registry()
        .desktop_icon_apps()
        .map(|app| IconView {
            key: IconKey::App(app.id.to_string()),
            glyph: app.icon_glyph.to_string(),
            label: app.display_name.to_string(),
        });
    let files = desktop.icons.files().iter().map(|file| IconView {
        key: IconKey::File(file.name.clone()),
        glyph: "📄".to_string(),
        label: file.name.clone(),
    });
    apps.chain(files).collect()
}

#[component]
pub(super) fn DesktopIconLayerView() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let context_menu = create_rw_signal(None::<FileContextMenu>);

    let dismiss_listener = window_event_listener(ev::pointerdown, move |_| {
        if context_menu.get_untracked().is_some() {
            context_menu.set(None);
        }
    });
    on_cleanup(move || dismiss_listener.remove());

    view! {
        <div class="desktop-icons">
            <For
                each=move || state.with(icon_views)
                key=|icon| icon.key.storage_key()
                let:icon
            >
                <DesktopIcon icon=icon context_menu=context_menu />
            </For>
            {move || {
                context_menu
                    .get()
                    .map(|menu| {
                        let name = store_value(menu.name.clone());
                        view! {
                            <div
                                class="desktop-context-menu"
                                role="menu"
                                style=format!("left:{}px;top:{}px;", menu.x, menu.y)
                                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            >
                                <button
                                    role="menuitem"
                                    on:click=move |_| {
                                        context_menu.set(None);
                                        runtime.dispatch_action(DesktopAction::OpenDesktopFile {
                                            name: name.get_value(),
                                        });
                                    }
                                >
                                    "Open"
                                </button>
                                <button
                                    role="menuitem"
                                    on:click=move |_| {
                                        context_menu.set(None);
                                        runtime.dispatch_action(DesktopAction::DeleteDesktopFile {
                                            name: name.get_value(),
                                        });
                                    }
                                >
                                    "Delete"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn DesktopIcon(icon: IconView, context_menu: RwSignal<Option<FileContextMenu>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let IconView { key, glyph, label } = icon;
    let key = store_value(key);

    let style = move || {
        let position = runtime
            .state
            .with(|desktop| key.with_value(|key| desktop.icons.position_of(key)));
        format!("left:{}px;top:{}px;", position.x, position.y)
    };
    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        stop_pointer_event(&ev);
        runtime.dispatch_action(DesktopAction::IconPointerDown {
            icon: key.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let on_contextmenu = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if let IconKey::File(name) = key.get_value() {
            context_menu.set(Some(FileContextMenu {
                name,
                x: ev.client_x(),
                y: ev.client_y(),
            }));
        }
    };

    view! {
        <div
            class="desktop-icon"
            style=style
            role="button"
            aria-label=label.clone()
            on:pointerdown=on_pointerdown
            on:contextmenu=on_contextmenu
        >
            <span class="desktop-icon-glyph" aria-hidden="true">{glyph}</span>
            <span class="desktop-icon-label">{label}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{DesktopFile, DesktopFileAction, DesktopFileEvent};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DesktopState;

    #[test]
    fn icon_views_list_apps_then_files() {
        let mut desktop = DesktopState::default();
        desktop.icons.apply_file_event(DesktopFileEvent {
            file: DesktopFile::new("todo.txt", None),
            action: DesktopFileAction::Create,
        });

        let keys: Vec<String> = icon_views(&desktop)
            .iter()
            .map(|icon| icon.key.storage_key())
            .collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys.first().map(String::as_str), Some("notepad"));
        assert_eq!(keys.last().map(String::as_str), Some("file-todo.txt"));
    }
}
