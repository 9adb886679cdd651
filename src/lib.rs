//! # shell-web
//!
//! Browser entry point for the page shell. Compiled to WASM with the
//! `hydrate` feature, it implements the [`shell`] crate's host and storage
//! traits over `web-sys`, registers the shell's trigger table as DOM
//! listeners, and wires the login and sign-up forms.
//!
//! Without `hydrate` only [`page_config`] is built, which keeps the crate
//! testable on the host target.

pub mod page_config;

#[cfg(feature = "hydrate")]
mod boot;
#[cfg(feature = "hydrate")]
mod dom;
#[cfg(feature = "hydrate")]
mod listeners;
#[cfg(feature = "hydrate")]
mod login_form;
#[cfg(feature = "hydrate")]
mod storage;

/// WASM entry point. Installs logging, then boots once the DOM is parsed.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // A second init (hot reload) keeps the first logger.
    let _ = console_log::init_with_level(level);

    boot::when_ready();
}
