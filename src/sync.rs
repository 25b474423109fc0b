//! Exclusive-access session wrappers using critical sections.
//!
//! The core assumes a single session per device with no concurrent access.
//! Callers that must share one session between contexts (main loop and
//! ISR, or cooperating tasks) get that mutual exclusion here instead of
//! inside the core: [`SharedSession`] serializes all access through
//! `critical_section::with()`.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::hal::DmaDriver;
use crate::session::TransferSession;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable
/// access from both normal code and interrupt handlers.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

/// Critical-section-guarded slot for one [`TransferSession`].
///
/// The slot starts empty (const-initializable as a static) and holds at
/// most one installed session.
///
/// # Example
///
/// ```ignore
/// static SESSION: SharedSession<SomeDriver> = SharedSession::empty();
///
/// SESSION.install(TransferSession::open(probe)?);
/// SESSION.with(|session| session.execute(&desc, &payload, &mut reply));
/// ```
pub struct SharedSession<D: DmaDriver> {
    inner: CriticalSectionCell<Option<TransferSession<D>>>,
}

impl<D: DmaDriver> SharedSession<D> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn empty() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Install a session, returning the previously installed one, if any.
    pub fn install(&self, session: TransferSession<D>) -> Option<TransferSession<D>> {
        self.inner.with(|slot| slot.replace(session))
    }

    /// Execute a closure with exclusive access to the installed session.
    ///
    /// Returns `None` when the slot is empty.
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut TransferSession<D>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Like [`with`](Self::with), but also returns `None` if the slot is
    /// already borrowed instead of blocking on it.
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut TransferSession<D>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    /// Remove and return the installed session, leaving the slot empty.
    ///
    /// Dropping the returned session tears the device down.
    pub fn take(&self) -> Option<TransferSession<D>> {
        self.inner.with(|slot| slot.take())
    }

    /// Whether a session is currently installed.
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }
}

impl<D: DmaDriver> Default for SharedSession<D> {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
