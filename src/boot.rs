//! Page boot: build the shell once the DOM is parsed.

use std::cell::RefCell;
use std::rc::Rc;

use shell::shell::Shell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::WebHost;
use crate::storage::LocalStore;
use crate::{listeners, login_form, page_config};

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("no window object")]
    NoWindow,
    #[error("window has no document or root element")]
    NoDocument,
}

/// Run [`boot`] now if the document is parsed, else on `DOMContentLoaded`.
pub fn when_ready() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("boot: {}", BootError::NoWindow);
        return;
    };
    if document.ready_state() != "loading" {
        report(boot());
        return;
    }

    let cb = Closure::once(move || report(boot()));
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref()) {
        log::warn!("boot: could not wait for DOMContentLoaded: {err:?}");
        return;
    }
    cb.forget();
}

fn report(result: Result<(), BootError>) {
    if let Err(err) = result {
        log::warn!("boot: shell inactive: {err}");
    }
}

/// Build the shell and login forms for this page.
pub fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let host = WebHost::new(window.clone()).ok_or(BootError::NoDocument)?;
    let config = page_config::from_document(host.document());
    let store = LocalStore::open(&window);

    login_form::wire_forms(host.document(), &window, &config.login);

    let shell = Rc::new(RefCell::new(Shell::boot(host, store, config)));
    listeners::register(&shell);
    Ok(())
}
