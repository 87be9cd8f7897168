//! Shared UI crate for Vitalgraph: the recovery/biomarker dashboard logic and
//! the Dioxus components the web and desktop shells mount.

pub mod charts;
pub mod core;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
