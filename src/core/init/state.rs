/// Which native phases have come up. Only ever moves forward.
///
/// `FrameworkOnly` is reachable: the shell does not stop framework init
/// from running before platform init, the engine decides what that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    Unloaded,
    PlatformOnly,
    FrameworkOnly,
    Ready,
}

impl InitState {
    pub fn platform_initialized(self) -> bool {
        matches!(self, InitState::PlatformOnly | InitState::Ready)
    }

    pub fn framework_initialized(self) -> bool {
        matches!(self, InitState::FrameworkOnly | InitState::Ready)
    }

    pub fn is_ready(self) -> bool {
        self == InitState::Ready
    }

    pub fn with_platform(self) -> Self {
        if self.framework_initialized() {
            InitState::Ready
        } else {
            InitState::PlatformOnly
        }
    }

    pub fn with_framework(self) -> Self {
        if self.platform_initialized() {
            InitState::Ready
        } else {
            InitState::FrameworkOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_needs_both_phases_in_either_order() {
        let s = InitState::default();
        assert!(!s.is_ready());
        assert!(s.with_platform().with_framework().is_ready());
        assert!(s.with_framework().with_platform().is_ready());
        assert_eq!(s.with_framework(), InitState::FrameworkOnly);
    }

    #[test]
    fn flags_never_go_back() {
        let ready = InitState::Ready;
        assert_eq!(ready.with_platform(), InitState::Ready);
        assert_eq!(ready.with_framework(), InitState::Ready);
        assert_eq!(InitState::PlatformOnly.with_platform(), InitState::PlatformOnly);
    }
}
