//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! The desktop shell persists everything it keeps across reloads (settings, icon positions,
//! desktop files) as whole JSON values in a flat key-value store. This crate defines that store
//! contract and host-neutral adapters; the browser adapter lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
