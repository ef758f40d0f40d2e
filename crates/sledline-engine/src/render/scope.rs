use core::ops::{Deref, DerefMut};

use super::{Capability, RenderBackend};

/// Enables a backend capability for the lifetime of the guard.
///
/// The capability is disabled again on drop, including early returns through
/// `?` and unwinding. The guard derefs to the backend, so scopes nest:
///
/// ```ignore
/// let mut blend = StateScope::enable(backend, Capability::Blend);
/// let mut tex = StateScope::enable(&mut *blend, Capability::Texture2D);
/// tex.draw(&batch, Primitive::Triangles);
/// // tex released, then blend
/// ```
pub struct StateScope<'a, B: RenderBackend + ?Sized> {
    backend: &'a mut B,
    cap: Capability,
}

impl<'a, B: RenderBackend + ?Sized> StateScope<'a, B> {
    pub fn enable(backend: &'a mut B, cap: Capability) -> Self {
        backend.enable(cap);
        Self { backend, cap }
    }

    #[inline]
    pub fn capability(&self) -> Capability {
        self.cap
    }
}

impl<B: RenderBackend + ?Sized> Deref for StateScope<'_, B> {
    type Target = B;

    #[inline]
    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> DerefMut for StateScope<'_, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: RenderBackend + ?Sized> Drop for StateScope<'_, B> {
    fn drop(&mut self) {
        self.backend.disable(self.cap);
    }
}

/// Runs `f` with `cap` enabled; the capability is released whether `f` succeeds or not.
pub fn with_capability<B, T, E>(
    backend: &mut B,
    cap: Capability,
    f: impl FnOnce(&mut B) -> Result<T, E>,
) -> Result<T, E>
where
    B: RenderBackend + ?Sized,
{
    let mut scope = StateScope::enable(backend, cap);
    f(&mut *scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BackendCall, RecordingBackend};

    #[test]
    fn guard_releases_on_drop() {
        let mut backend = RecordingBackend::new();
        {
            let scope = StateScope::enable(&mut backend, Capability::Blend);
            assert_eq!(scope.capability(), Capability::Blend);
            assert!(scope.is_enabled(Capability::Blend));
        }
        assert!(!backend.is_enabled(Capability::Blend));
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::Enable(Capability::Blend),
                BackendCall::Disable(Capability::Blend),
            ]
        );
    }

    #[test]
    fn nested_scopes_release_in_reverse_order() {
        let mut backend = RecordingBackend::new();
        {
            let mut blend = StateScope::enable(&mut backend, Capability::Blend);
            let _tex = StateScope::enable(&mut *blend, Capability::Texture2D);
        }
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::Enable(Capability::Blend),
                BackendCall::Enable(Capability::Texture2D),
                BackendCall::Disable(Capability::Texture2D),
                BackendCall::Disable(Capability::Blend),
            ]
        );
    }

    #[test]
    fn failing_closure_still_releases() {
        let mut backend = RecordingBackend::new();
        let result: Result<(), &str> = with_capability(&mut backend, Capability::Texture2D, |b| {
            assert!(b.is_enabled(Capability::Texture2D));
            Err("geometry failed")
        });

        assert_eq!(result, Err("geometry failed"));
        assert!(!backend.is_enabled(Capability::Texture2D));
        assert_eq!(backend.calls().last(), Some(&BackendCall::Disable(Capability::Texture2D)));
    }

    #[test]
    fn panic_inside_scope_still_releases() {
        let mut backend = RecordingBackend::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = StateScope::enable(&mut backend, Capability::Blend);
            panic!("boom");
        }));
        assert!(outcome.is_err());
        assert!(!backend.is_enabled(Capability::Blend));
    }
}
