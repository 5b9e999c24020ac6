//! Store-scope environment emulation port.
//!
//! The host platform resolves store-scoped configuration against an ambient
//! environment; the observer runs outside any storefront request, so it has
//! to emulate the order's store scope for the duration of one invocation.

use thiserror::Error;

use storepulse_core::StoreId;

/// Area the emulated scope resolves configuration in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Backend area: the observer reacts to an admin-side capture signal.
    Admin,
    Storefront,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmulationError {
    #[error("failed to enter store scope {store}: {reason}")]
    Enter { store: StoreId, reason: String },
}

/// Environment emulation as exposed by the host platform.
///
/// `enter`/`exit` must pair up; use [`EmulationGuard`] rather than calling
/// `exit` by hand.
pub trait ScopeEmulation: Send + Sync {
    fn enter(&self, store: StoreId, area: Area) -> Result<(), EmulationError>;

    fn exit(&self);
}

impl<E> ScopeEmulation for std::sync::Arc<E>
where
    E: ScopeEmulation + ?Sized,
{
    fn enter(&self, store: StoreId, area: Area) -> Result<(), EmulationError> {
        (**self).enter(store, area)
    }

    fn exit(&self) {
        (**self).exit()
    }
}

/// Lexically-scoped emulation handle: `exit` runs exactly once when the
/// guard drops, on every exit path (early return, error propagation, panic
/// unwind).
#[derive(Debug)]
pub struct EmulationGuard<'a, E: ScopeEmulation + ?Sized> {
    emulation: &'a E,
}

impl<'a, E: ScopeEmulation + ?Sized> EmulationGuard<'a, E> {
    /// Enter `store`'s scope; the returned guard releases it on drop.
    pub fn enter(emulation: &'a E, store: StoreId, area: Area) -> Result<Self, EmulationError> {
        emulation.enter(store, area)?;
        Ok(Self { emulation })
    }
}

impl<E: ScopeEmulation + ?Sized> Drop for EmulationGuard<'_, E> {
    fn drop(&mut self) {
        self.emulation.exit();
    }
}
