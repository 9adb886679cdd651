//! Registers the shell's trigger table as DOM listeners.
//!
//! One listener per table row, attached once at boot and kept for the life
//! of the page. Each listener extracts a payload from the DOM event, lets
//! the row's route build the `ShellEvent`, and hands it to the shell.

use std::cell::RefCell;
use std::rc::Rc;

use shell::bindings::{Binding, EventPayload, ListenerTarget};
use shell::shell::Shell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, StorageEvent};

use crate::dom::WebHost;
use crate::storage::{self, LocalStore};

pub type SharedShell = Rc<RefCell<Shell<WebHost, LocalStore>>>;

pub fn register(shell: &SharedShell) {
    let (host, table) = {
        let s = shell.borrow();
        (s.host().clone(), s.bindings())
    };
    let count = table.len();
    for binding in table {
        attach(shell, &host, binding);
    }
    log::debug!("listeners: registered {count} bindings");
}

fn attach(shell: &SharedShell, host: &WebHost, binding: Binding<Element>) {
    let target: EventTarget = match binding.target {
        ListenerTarget::Element(el) => el.into(),
        ListenerTarget::Document => host.document().clone().into(),
        ListenerTarget::Window => host.window().clone().into(),
        ListenerTarget::ColorScheme => match host.color_scheme() {
            Some(query) => query.clone().into(),
            None => {
                log::debug!("listeners: no color-scheme query; OS changes not tracked");
                return;
            }
        },
    };

    let route = binding.route;
    let shell = Rc::clone(shell);
    let cb = Closure::wrap(Box::new(move |ev: Event| {
        let Some(event) = route.into_event(payload(&ev)) else {
            return;
        };
        match shell.try_borrow_mut() {
            Ok(mut s) => s.handle(event),
            Err(_) => log::warn!("listeners: dropped re-entrant {route:?} event"),
        }
    }) as Box<dyn FnMut(Event)>);

    if let Err(err) = target.add_event_listener_with_callback(binding.kind.dom_name(), cb.as_ref().unchecked_ref()) {
        log::warn!("listeners: could not bind {:?}: {err:?}", binding.route);
        return;
    }
    cb.forget();
}

fn payload(ev: &Event) -> EventPayload<Element> {
    EventPayload {
        target: ev.target().and_then(|t| t.dyn_into::<Element>().ok()),
        key: ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
        storage: ev.dyn_ref::<StorageEvent>().map(storage::change_from_event),
    }
}
