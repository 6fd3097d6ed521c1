//! Thread affinity checks for UI-bound state.
//!
//! A window's lifecycle callbacks, rebuild primitive and resource accessors
//! all belong to that window's UI thread. [`ThreadAffinity`] records the
//! thread a piece of state was created on so that code touching it can verify
//! it is running there, and so that callers on other threads know they must
//! post to the owning [`UiDispatcher`](crate::dispatcher::UiDispatcher)
//! instead.
//!
//! ```
//! use horizon_recast_core::thread_check::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//!
//! let other = std::thread::spawn(move || affinity.is_same_thread()).join().unwrap();
//! assert!(!other);
//! ```

use std::thread::ThreadId;

/// Records the thread a value is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The bound thread.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread is the bound thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics if called from a thread other than the bound one.
    ///
    /// Active in both debug and release builds.
    pub fn assert_same_thread(&self, operation: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(operation);
        }
    }

    /// Debug-only variant of [`assert_same_thread`](Self::assert_same_thread).
    #[inline]
    pub fn debug_assert_same_thread(&self, operation: &str) {
        #[cfg(debug_assertions)]
        self.assert_same_thread(operation);
        #[cfg(not(debug_assertions))]
        let _ = operation;
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, operation: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            UI THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {operation}\n\
            \n\
            Bound thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {:?})\n\
            \n\
            Window state must only be touched from the window's UI thread.\n\
            Post the work with UiDispatcher::post() instead.\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id,
            current.id(),
        )
    }
}
