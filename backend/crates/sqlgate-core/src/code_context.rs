//! Thread-local code context
//!
//! Engines resolve generated and user classes through whichever code context
//! is active on the calling thread. A submission switches to the packaged
//! program's context only for the duration of job graph compilation.
//!
//! The switch is scoped: [`CodeContextGuard`] restores the previous context
//! when dropped, including during unwinding, and it is `!Send` so it cannot
//! leave the thread it was created on.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static ACTIVE_CONTEXT: RefCell<Option<CodeContext>> = const { RefCell::new(None) };
}

/// Named class-resolution scope, usually one per packaged program
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CodeContext {
    name: Arc<str>,
}

impl CodeContext {
    pub fn new(name: &str) -> Self {
        Self { name: Arc::from(name) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeContext({})", self.name)
    }
}

/// Context active on the current thread, if any
pub fn current() -> Option<CodeContext> {
    ACTIVE_CONTEXT.with(|active| active.borrow().clone())
}

/// Restores the previously active context on drop
#[must_use = "the context is restored as soon as the guard is dropped"]
pub struct CodeContextGuard {
    previous: Option<CodeContext>,
    _not_send: PhantomData<*const ()>,
}

impl CodeContextGuard {
    /// Make `context` active on this thread until the guard is dropped.
    pub fn enter(context: CodeContext) -> Self {
        let previous = ACTIVE_CONTEXT.with(|active| active.replace(Some(context)));
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for CodeContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // try_with: the thread-local may already be gone during thread teardown
        let _ = ACTIVE_CONTEXT.try_with(|active| *active.borrow_mut() = previous);
    }
}

/// Run `f` with `context` active, restoring the previous context afterwards.
pub fn with_code_context<T>(context: CodeContext, f: impl FnOnce() -> T) -> T {
    let _guard = CodeContextGuard::enter(context);
    f()
}
