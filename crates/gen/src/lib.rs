//! Renders the bundled dashboards and alert provisioning files to disk.
//!
//! The binary reads a [`config::GenConfig`] from the environment and calls
//! [`render::render_all`]; everything here is also usable as a library.

pub mod catalog;
pub mod config;
pub mod render;
