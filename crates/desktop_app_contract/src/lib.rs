//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! Apps are opaque to the runtime: each one is registered with a mount function that receives
//! an optional open-payload and renders inside the window content area. Apps that produce
//! desktop files announce them through [`DesktopFileEvent`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Icon-key prefix reserved for desktop file icons.
pub const DESKTOP_FILE_KEY_PREFIX: &str = "file-";

/// Stable identifier for a registered application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase kebab-case token.
    ///
    /// Ids starting with [`DESKTOP_FILE_KEY_PREFIX`] are rejected so app icons and file icons
    /// never share an icon key.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lowercase kebab-case token"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 32 || raw.starts_with(DESKTOP_FILE_KEY_PREFIX) {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How an app treats a new open-payload when it is already open.
pub enum PayloadPolicy {
    /// Refocusing with a payload replaces the instance payload (live document handoff).
    ReplaceOnRefocus,
    /// The existing payload is kept; refocus only.
    #[default]
    KeepExisting,
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App id from the runtime registry.
    pub app_id: ApplicationId,
    /// Session-unique instance id of the hosting window.
    pub instance_id: String,
    /// Open-payload passed through unchanged by the window manager.
    pub payload: Option<Value>,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A user file shown on the desktop.
pub struct DesktopFile {
    /// File name; unique among desktop files.
    pub name: String,
    /// Text content when the producer supplied it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Producer-specific fields preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DesktopFile {
    /// Creates a file record with optional text content.
    pub fn new(name: impl Into<String>, content: Option<String>) -> Self {
        Self {
            name: name.into(),
            content,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of desktop-file change.
pub enum DesktopFileAction {
    /// A file was saved to the desktop.
    Create,
    /// A file was removed from the desktop.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Broadcast notification emitted by file-producing apps.
pub struct DesktopFileEvent {
    /// The affected file.
    pub file: DesktopFile,
    /// What happened to it.
    pub action: DesktopFileAction,
}
