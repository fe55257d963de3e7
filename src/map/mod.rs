//! Map layer: marker synchronization and the terminal map surface.
//!
//! # Modules
//!
//! - [`surface`]: The [`MapSurface`] capability trait and its value types
//! - [`sync`]: [`MapSync`], which mirrors listings onto a surface and routes
//!   marker clicks back to the view state machine
//! - [`terminal`]: [`TerminalMap`], the character-grid surface used by the
//!   plugin

pub mod surface;
pub mod sync;
pub mod terminal;

pub use surface::{Bounds, MapSurface, MarkerHandle, MarkerIcon, Popup};
pub use sync::MapSync;
pub use terminal::{TerminalMap, DEFAULT_CENTER};
