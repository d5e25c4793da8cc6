//! The process-wide engine gate
//!
//! The engine keeps global mutable state, so thread safety cannot be scoped
//! to a document: every engine call from every session must hold this one
//! lock, including multi-step derived operations (the whole bookmark walk
//! runs under a single acquisition). The mutex is reentrant so a gated
//! operation can call another gated operation without deadlocking.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENGINE_GATE: ReentrantMutex<()> = ReentrantMutex::new(());

/// Acquires the global engine gate, blocking until it is free.
pub(crate) fn lock_engine() -> ReentrantMutexGuard<'static, ()> {
    ENGINE_GATE.lock()
}
