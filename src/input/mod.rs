//! Pointer and scroll input handling for the moodboard canvas.
//!
//! All interaction logic for the canvas lives here: item selection,
//! dragging, resizing, panning and marquee selection.
//!
//! ## Architecture
//!
//! A single explicit state machine (`GestureState`) tracks the current
//! interaction mode. Every pointer press funnels through one router that
//! disambiguates the gesture from the pressed target and mouse button;
//! while a gesture is active, only its own move/release events are
//! processed, so gestures can never interleave.
//!
//! ## Modules
//!
//! - `state` - gesture state machine enum and helper methods
//! - `mouse_down` - press handling (selection, gesture start)
//! - `drag` - move handling (drag, resize, pan, marquee growth)
//! - `mouse_up` - release handling (finalize, marquee selection, persistence)
//! - `transform` - wheel zoom and coordinate conversion entry points

mod drag;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use state::GestureState;

use glam::Vec2;

/// Mouse buttons the canvas distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers at the time of a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub control: bool,
    pub platform: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// A pointer press or release, in window coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub position: Vec2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(position: Vec2, button: PointerButton) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::default(),
        }
    }

    pub fn primary(position: Vec2) -> Self {
        Self::new(position, PointerButton::Primary)
    }

    pub fn middle(position: Vec2) -> Self {
        Self::new(position, PointerButton::Middle)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
