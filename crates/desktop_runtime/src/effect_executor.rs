//! Drains reducer-emitted [`RuntimeEffect`] values.
//!
//! Persistence effects write whole documents from the current state, so one batch runs each
//! distinct effect once, in first-queued order.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the executor on the runtime's effect queue.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        // Effects dispatched while draining land in a fresh queue.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in coalesce(queued) {
            host.run_runtime_effect(runtime, effect);
        }
    });
}

fn coalesce(queued: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let mut batch = Vec::with_capacity(queued.len());
    for effect in queued {
        if !batch.contains(&effect) {
            batch.push(effect);
        }
    }
    batch
}
