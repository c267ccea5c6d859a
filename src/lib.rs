pub mod api;
pub mod clipboard;
pub mod config;
pub mod diff;
pub mod markdown;
pub mod session;
pub mod storage;
pub mod transcript;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
