//! Shared crate for Chromalab: the color engine, the experiment session and
//! its export pipeline, plus the Dioxus views the platform shells mount.

pub mod color;
pub mod core;
pub mod experiment;
pub mod export;
pub mod study;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
