//! Login and sign-up form wiring.
//!
//! Every `<form>` with a `password` input gets: email normalization and a
//! required-field check on submit, a double-submit guard on its submit
//! button, and a show/hide toggle for its password fields. A form without a
//! toggle button gets one inserted after the password input.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use shell::config::LoginConfig;
use shell::consts::{ARIA_LABEL, ARIA_PRESSED, KEY_ESCAPE};
use shell::login::{self, LoginError, LoginLabels, PasswordVisibility, SubmitGuard};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlButtonElement, HtmlInputElement, KeyboardEvent, Window};

const TOGGLE_CLASS: &str = "toggle-password";
const TOGGLE_TEXT_SELECTOR: &str = ".toggle-password__text";
const DATA_TARGET: &str = "data-target";

pub fn wire_forms(document: &Document, window: &Window, config: &LoginConfig) {
    let forms = match document.query_selector_all("form") {
        Ok(list) => list,
        Err(err) => {
            log::debug!("login: form query failed: {err:?}");
            return;
        }
    };
    for i in 0..forms.length() {
        let Some(form) = forms.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(password) = select::<HtmlInputElement>(&form, "input[name=\"password\"], input[type=\"password\"]") else {
            continue;
        };
        wire_form(document, window, config, &form, &password);
    }
}

fn wire_form(document: &Document, window: &Window, config: &LoginConfig, form: &Element, password: &HtmlInputElement) {
    let labels = Rc::new(config.labels.clone());

    let mut toggles = toggle_buttons(form);
    if toggles.is_empty() {
        if let Some(created) = create_toggle(document, password, &labels) {
            toggles.push(created);
        }
    }
    for button in toggles {
        let target = button
            .get_attribute(DATA_TARGET)
            .and_then(|id| document.get_element_by_id(&id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .unwrap_or_else(|| password.clone());
        wire_toggle(&button, &target, &labels);
    }

    let email = select::<HtmlInputElement>(form, "input[name=\"email\"], input[type=\"email\"]");
    let submit = select::<HtmlButtonElement>(form, "button[type=\"submit\"]");
    let guard = Rc::new(RefCell::new(SubmitGuard::default()));
    let reenable_ms = config.submit_reenable_ms;
    let password = password.clone();
    let window = window.clone();

    listen(form, "submit", move |ev: Event| {
        let email_raw = email.as_ref().map(HtmlInputElement::value).unwrap_or_default();
        let credentials = match login::validate(&email_raw, &password.value()) {
            Ok(credentials) => credentials,
            Err(err) => {
                ev.prevent_default();
                if err == LoginError::MissingFields {
                    if let Err(alert_err) = window.alert_with_message(&labels.missing_fields) {
                        log::debug!("login: alert failed: {alert_err:?}");
                    }
                }
                return;
            }
        };
        if let Some(email) = &email {
            email.set_value(&credentials.email);
        }

        let Some(button) = &submit else {
            return;
        };
        let current = button.text_content().unwrap_or_default();
        if let Err(err) = guard.borrow_mut().begin(&current) {
            log::debug!("login: {err}");
            ev.prevent_default();
            return;
        }
        button.set_disabled(true);
        button.set_text_content(Some(&labels.submitting));

        if reenable_ms == 0 {
            return;
        }
        let button = button.clone();
        let guard = Rc::clone(&guard);
        let fallback = labels.submit.clone();
        Timeout::new(reenable_ms, move || {
            if let Some(label) = guard.borrow_mut().release(&fallback) {
                button.set_disabled(false);
                button.set_text_content(Some(&label));
            }
        })
        .forget();
    });
}

fn wire_toggle(button: &Element, input: &HtmlInputElement, labels: &Rc<LoginLabels>) {
    render_toggle(button, PasswordVisibility::from_input_type(&input.type_()), labels);

    {
        let button = button.clone();
        let input = input.clone();
        let labels = Rc::clone(labels);
        listen(&button.clone(), "click", move |_ev: Event| {
            let next = PasswordVisibility::from_input_type(&input.type_()).toggled();
            input.set_type(next.input_type());
            render_toggle(&button, next, &labels);
            if let Err(err) = input.focus() {
                log::debug!("login: refocus failed: {err:?}");
            }
        });
    }

    let button = button.clone();
    let labels = Rc::clone(labels);
    let field = input.clone();
    listen(input, "keydown", move |ev: Event| {
        let is_escape = ev.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == KEY_ESCAPE);
        let current = PasswordVisibility::from_input_type(&field.type_());
        if is_escape && current == PasswordVisibility::Visible {
            let next = current.on_escape();
            field.set_type(next.input_type());
            render_toggle(&button, next, &labels);
        }
    });
}

fn render_toggle(button: &Element, state: PasswordVisibility, labels: &LoginLabels) {
    set_attr(button, ARIA_PRESSED, state.aria_pressed());
    set_attr(button, ARIA_LABEL, state.aria_label(labels));
    let text = state.button_text(labels);
    match select::<Element>(button, TOGGLE_TEXT_SELECTOR) {
        Some(span) => span.set_text_content(Some(text)),
        None => button.set_text_content(Some(text)),
    }
}

fn create_toggle(document: &Document, password: &HtmlInputElement, labels: &LoginLabels) -> Option<Element> {
    let button = document.create_element("button").ok()?;
    set_attr(&button, "type", "button");
    set_attr(&button, "class", TOGGLE_CLASS);
    if !password.id().is_empty() {
        set_attr(&button, DATA_TARGET, &password.id());
    }
    let span = document.create_element("span").ok()?;
    set_attr(&span, "class", &TOGGLE_TEXT_SELECTOR[1..]);
    button.append_child(&span).ok()?;
    render_toggle(&button, PasswordVisibility::Hidden, labels);
    password.insert_adjacent_element("afterend", &button).ok()?;
    Some(button)
}

fn toggle_buttons(form: &Element) -> Vec<Element> {
    let Ok(list) = form.query_selector_all(&format!(".{TOGGLE_CLASS}, button[{DATA_TARGET}]")) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn select<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    match root.query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<T>().ok()),
        Err(err) => {
            log::debug!("login: query {selector} failed: {err:?}");
            None
        }
    }
}

fn set_attr(el: &Element, name: &str, value: &str) {
    if let Err(err) = el.set_attribute(name, value) {
        log::debug!("login: set {name} failed: {err:?}");
    }
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref()) {
        log::warn!("login: could not bind {kind}: {err:?}");
        return;
    }
    cb.forget();
}
