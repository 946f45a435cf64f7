//! Render capability re-export.
//!
//! The list core performs no I/O, so Crux's built-in Render capability is the
//! only effect it needs: every state change asks the shell to call `view()` again.
pub use crux_core::render::Render;

use crate::event::Event;
use crate::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
}
