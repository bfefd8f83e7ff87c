//! Built-in placeholder app views. Real apps plug in through the same mount contract.

use desktop_app_contract::AppMountContext;
use leptos::*;
use serde_json::Value;

fn payload_file_field(payload: Option<&Value>, field: &str) -> Option<String> {
    payload?
        .get("file")?
        .get(field)?
        .as_str()
        .map(str::to_string)
}

pub(super) fn mount_notepad(context: AppMountContext) -> View {
    let file_name = payload_file_field(context.payload.as_ref(), "name")
        .unwrap_or_else(|| "Untitled".to_string());
    let content = payload_file_field(context.payload.as_ref(), "content").unwrap_or_default();

    view! {
        <div class="app app-notepad">
            <div class="app-statusbar">{file_name}</div>
            <textarea class="app-notepad-text" prop:value=content></textarea>
        </div>
    }
    .into_view()
}

pub(super) fn mount_calculator(_: AppMountContext) -> View {
    view! {
        <div class="app app-calculator">
            <p>"Calculator"</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_terminal(context: AppMountContext) -> View {
    view! {
        <div class="app app-terminal">
            <pre>{format!("homeos:{} $", context.instance_id)}</pre>
        </div>
    }
    .into_view()
}

pub(super) fn mount_browser(_: AppMountContext) -> View {
    view! {
        <div class="app app-browser">
            <p>"Browsing is not available in this desktop."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_settings(_: AppMountContext) -> View {
    view! {
        <div class="app app-settings">
            <p>"Theme and wallpaper controls live in the start menu."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_help(_: AppMountContext) -> View {
    view! {
        <div class="app app-help">
            <p><strong>"HomeOS"</strong></p>
            <p>"Drag icons and title bars to arrange the desktop. Drag the bottom-right corner to resize."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_trash(_: AppMountContext) -> View {
    view! {
        <div class="app app-trash">
            <p>"Trash is empty."</p>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_file_fields_are_read_from_file_object() {
        let payload = json!({ "file": { "name": "todo.txt", "content": "milk" } });
        assert_eq!(
            payload_file_field(Some(&payload), "name").as_deref(),
            Some("todo.txt")
        );
        assert_eq!(
            payload_file_field(Some(&payload), "content").as_deref(),
            Some("milk")
        );
        assert_eq!(payload_file_field(None, "name"), None);
        assert_eq!(payload_file_field(Some(&json!({})), "name"), None);
    }
}
