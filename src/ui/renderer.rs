//! Top-level rendering coordinator.
//!
//! The dispatcher has already turned application state into a [`Frame`];
//! this module only decides between the loading screen and the catalogue
//! layout and hands the frame, card deck and map surface to the components.
//!
//! [`Frame`]: crate::ui::viewmodel::Frame

use crate::app::Session;
use crate::map::TerminalMap;
use crate::ui::components::{self, Scene};
use crate::ui::theme::Theme;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `session` - Current plugin session
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout. Does not clear the screen; Zellij
/// hands the plugin a fresh pane for every render.
pub fn render(session: &Session<TerminalMap>, theme: &Theme, rows: usize, cols: usize) {
    let dispatcher = session.dispatcher();
    let frame = dispatcher.frame();

    if !dispatcher.is_current() {
        tracing::warn!(
            frame_version = frame.version,
            state_version = dispatcher.state().version(),
            "painting a stale frame"
        );
    }

    if frame.loading {
        components::render_loading(session.data_file(), theme, rows, cols);
        return;
    }

    let scene = Scene {
        frame,
        deck: dispatcher.deck(),
        map: session.map().surface(),
        view: dispatcher.state().view(),
        input_mode: session.input_mode(),
    };
    components::render_catalogue(&scene, theme, rows, cols);
}
