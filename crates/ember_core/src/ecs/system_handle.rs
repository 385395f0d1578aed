//! Stable names for registered systems

use std::fmt;

/// A system's slot in dispatch order. Slots are never reused, since systems
/// cannot be unregistered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemHandle {
    slot: u32,
}

impl SystemHandle {
    pub(crate) fn new(slot: usize) -> Self {
        debug_assert!(slot <= u32::MAX as usize, "system slot {slot} overflows a handle");
        Self { slot: slot as u32 }
    }

    /// Zero-based dispatch position.
    #[inline]
    pub fn index(self) -> usize {
        self.slot as usize
    }
}

impl From<SystemHandle> for usize {
    fn from(handle: SystemHandle) -> usize {
        handle.index()
    }
}

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system#{}", self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_follow_registration_slots() {
        let first = SystemHandle::new(0);
        let second = SystemHandle::new(1);

        assert!(first < second);
        assert_eq!(first.index(), 0);
        assert_eq!(usize::from(second), 1);
        assert_eq!(second.to_string(), "system#1");
    }
}
