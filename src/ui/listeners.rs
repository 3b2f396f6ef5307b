//! Global event listener registration
//!
//! The builder needs one keyboard listener (Delete key) and one click listener
//! (closing context menus) while it is mounted. Each must be registered once per
//! mount and removed on unmount, otherwise a remount would handle every event twice.

/// Kind of global listener the builder installs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    Click,
}

/// Handle returned by the host for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Whatever owns the real event loop (browser window, native shell, test double)
#[cfg_attr(test, mockall::automock)]
pub trait EventHost {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId);
}

/// Listeners currently registered on behalf of one mounted builder
#[derive(Debug, Default)]
pub struct ListenerRegistration {
    active: Vec<(ListenerKind, ListenerId)>,
}

impl ListenerRegistration {
    pub const KINDS: [ListenerKind; 2] = [ListenerKind::KeyDown, ListenerKind::Click];

    pub fn is_mounted(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active(&self) -> &[(ListenerKind, ListenerId)] {
        &self.active
    }

    /// Register every listener. Returns `false` if already mounted.
    pub fn mount(&mut self, host: &mut dyn EventHost) -> bool {
        if self.is_mounted() {
            tracing::debug!("Listeners already registered");
            return false;
        }
        for kind in Self::KINDS {
            let id = host.add_listener(kind);
            self.active.push((kind, id));
        }
        true
    }

    /// Remove every listener registered by [`ListenerRegistration::mount`]
    pub fn unmount(&mut self, host: &mut dyn EventHost) -> bool {
        if !self.is_mounted() {
            return false;
        }
        for (_, id) in self.active.drain(..) {
            host.remove_listener(id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_mount_registers_each_kind_once() {
        let mut host = MockEventHost::new();
        host.expect_add_listener()
            .with(eq(ListenerKind::KeyDown))
            .times(1)
            .returning(|_| ListenerId(1));
        host.expect_add_listener()
            .with(eq(ListenerKind::Click))
            .times(1)
            .returning(|_| ListenerId(2));

        let mut registration = ListenerRegistration::default();
        assert!(registration.mount(&mut host));
        assert!(!registration.mount(&mut host));
        assert_eq!(registration.active().len(), 2);
    }

    #[test]
    fn test_unmount_removes_what_was_registered() {
        let mut host = MockEventHost::new();
        let mut next = 10;
        host.expect_add_listener().times(2).returning(move |_| {
            next += 1;
            ListenerId(next)
        });
        host.expect_remove_listener()
            .with(eq(ListenerId(11)))
            .times(1)
            .return_const(());
        host.expect_remove_listener()
            .with(eq(ListenerId(12)))
            .times(1)
            .return_const(());

        let mut registration = ListenerRegistration::default();
        registration.mount(&mut host);
        assert!(registration.unmount(&mut host));
        assert!(!registration.is_mounted());
    }

    #[test]
    fn test_unmount_without_mount_is_noop() {
        let mut host = MockEventHost::new();
        host.expect_remove_listener().never();

        let mut registration = ListenerRegistration::default();
        assert!(!registration.unmount(&mut host));
    }

    #[test]
    fn test_remount_after_unmount() {
        let mut host = MockEventHost::new();
        host.expect_add_listener().times(4).returning(|_| ListenerId(7));
        host.expect_remove_listener().times(4).return_const(());

        let mut registration = ListenerRegistration::default();
        registration.mount(&mut host);
        registration.unmount(&mut host);
        assert!(registration.mount(&mut host));
        assert!(registration.unmount(&mut host));
    }
}
