#![forbid(unsafe_code)]

//! Deterministic render identifiers.
//!
//! Every rendered draggable or droppable region asks the [`IdContext`] for an
//! identifier once per render pass. Identifiers come from a single counter
//! that only moves forward, so they follow render (discovery) order.
//!
//! # Determinism contract
//!
//! For two render passes over identical logical input, calling
//! [`IdContext::reset`] immediately before each makes them byte-identical.
//! Without a reset the second pass continues counting where the first one
//! stopped and its output differs.
//!
//! The context is an ordinary value: clones share one counter, separate
//! [`IdContext::new`] instances never interfere. A server owns one context
//! per render pipeline and resets it at the start of every request
//! ([`IdContext::begin_pass`] does both steps).
//!
//! ```
//! use fdnd_core::id_context::IdContext;
//!
//! let ids = IdContext::new();
//! assert_eq!(ids.next_id("droppable"), "droppable-0");
//! assert_eq!(ids.next_id("draggable"), "draggable-1");
//! ids.reset();
//! assert_eq!(ids.next_id("droppable"), "droppable-0");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::IdConfig;

#[derive(Debug)]
struct Counters {
    next: AtomicU64,
    generation: AtomicU64,
}

/// Shared identifier counter for render passes.
#[derive(Clone)]
pub struct IdContext {
    counters: Arc<Counters>,
    separator: Arc<str>,
}

impl fmt::Debug for IdContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdContext")
            .field("generation", &self.generation())
            .field("issued", &self.issued())
            .field("separator", &&*self.separator)
            .finish()
    }
}

impl Default for IdContext {
    fn default() -> Self {
        Self::new()
    }
}

impl IdContext {
    /// Create a context using `-` between scope and counter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&IdConfig::default())
    }

    /// Create a context from configuration.
    #[must_use]
    pub fn with_config(config: &IdConfig) -> Self {
        Self {
            counters: Arc::new(Counters {
                next: AtomicU64::new(0),
                generation: AtomicU64::new(0),
            }),
            separator: Arc::from(config.separator.as_str()),
        }
    }

    /// Issue the next identifier for a region discovered under `scope_key`.
    pub fn next_id(&self, scope_key: &str) -> String {
        let n = self.counters.next.fetch_add(1, Ordering::Relaxed);
        format!("{scope_key}{}{n}", self.separator)
    }

    /// Start a new generation: the counter returns to zero.
    pub fn reset(&self) {
        self.counters.next.store(0, Ordering::Relaxed);
        let generation = self.counters.generation.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(generation, "id context reset");
    }

    /// Number of resets performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.counters.generation.load(Ordering::Relaxed)
    }

    /// Identifiers issued in the current generation.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.counters.next.load(Ordering::Relaxed)
    }

    /// True when both handles share one counter.
    #[must_use]
    pub fn same_context(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.counters, &other.counters)
    }

    /// Reset and open an isolated render pass.
    ///
    /// The returned guard derefs to the context and logs how many
    /// identifiers the pass consumed when it is dropped.
    pub fn begin_pass(&self) -> RenderPass<'_> {
        self.reset();
        RenderPass {
            ids: self,
            generation: self.generation(),
        }
    }
}

// ---------------------------------------------------------------------------
// RenderPass
// ---------------------------------------------------------------------------

/// Scope guard for one independent render pass.
#[derive(Debug)]
pub struct RenderPass<'a> {
    ids: &'a IdContext,
    generation: u64,
}

impl RenderPass<'_> {
    /// Generation this pass started in.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::ops::Deref for RenderPass<'_> {
    type Target = IdContext;

    fn deref(&self) -> &IdContext {
        self.ids
    }
}

impl Drop for RenderPass<'_> {
    fn drop(&mut self) {
        let current = self.ids.generation();
        if current != self.generation {
            tracing::warn!(
                started = self.generation,
                current,
                "id context was reset during a render pass"
            );
            return;
        }
        tracing::trace!(
            generation = self.generation,
            issued = self.ids.issued(),
            "render pass finished"
        );
    }
}
