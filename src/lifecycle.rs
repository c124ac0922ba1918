//! # Lifecycle
//!
//! The viewer moves through four phases:
//!
//! ```text
//! Init ──(scene built)──▶ Running ──(quit)──▶ ShuttingDown ──(resources released)──▶ Terminated
//!   └──────────────────────(setup failed)──────────────────────────────────────────────▲
//! ```
//!
//! Any failure while building the scene ends the program; there is no partially
//! initialized scene. Transitions that do not apply to the current phase are ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Init,
    Running,
    ShuttingDown,
    Terminated,
}

#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Window, device, shaders, textures and meshes are all ready.
    pub fn initialized(&mut self) -> bool {
        self.transition(Phase::Init, Phase::Running)
    }

    /// Setup failed; skip straight to the end.
    pub fn initialization_failed(&mut self) -> bool {
        self.transition(Phase::Init, Phase::Terminated)
    }

    /// The window was closed or the quit key was pressed.
    pub fn quit_requested(&mut self) -> bool {
        self.transition(Phase::Running, Phase::ShuttingDown)
    }

    /// All GPU-side resources have been released.
    pub fn resources_released(&mut self) -> bool {
        self.transition(Phase::ShuttingDown, Phase::Terminated)
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from {
            log::warn!(
                "Ignoring lifecycle transition {from:?} -> {to:?} while {:?}",
                self.phase
            );
            return false;
        }
        log::debug!("Lifecycle: {from:?} -> {to:?}");
        self.phase = to;
        true
    }
}
