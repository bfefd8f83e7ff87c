use std::rc::Rc;

use desktop_runtime::{DesktopHostContext, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::MemoryPrefsStore;

/// Query flag that runs the desktop against an in-memory store; nothing survives a reload.
const EPHEMERAL_QUERY_KEY: &str = "ephemeral";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="HomeOS" />
        <Meta name="description" content="A desktop environment that runs in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let query = use_query_map();
    let ephemeral = query.with_untracked(|map| map.get(EPHEMERAL_QUERY_KEY).is_some());
    let host = if ephemeral {
        DesktopHostContext::with_prefs_store(Rc::new(MemoryPrefsStore::default()))
    } else {
        DesktopHostContext::default()
    };

    view! {
        <DesktopProvider host=host>
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Nothing here"</h1>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}
