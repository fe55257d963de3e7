//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host directory under `/host`; everything that turns
//! configured paths into sandbox paths (and back) lives here.

pub mod paths;

pub use paths::{display_path, expand_tilde, get_data_dir};
