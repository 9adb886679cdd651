//! Login and sign-up form behavior.
//!
//! DESIGN
//! ======
//! The page glue owns the form elements; this module owns the decisions:
//! what gets submitted, when a submit is refused, and what the password
//! toggle shows. The optional re-enable delay covers a submit that never
//! navigates away; it is configuration, not a latency guarantee.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use serde::{Deserialize, Serialize};

/// Default delay before a stalled submit button is re-enabled.
pub const DEFAULT_SUBMIT_REENABLE_MS: u32 = 6_000;

/// User-facing strings for the login forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginLabels {
    pub submit: String,
    pub submitting: String,
    pub missing_fields: String,
    pub show: String,
    pub hide: String,
    pub show_password: String,
    pub hide_password: String,
}

impl Default for LoginLabels {
    fn default() -> Self {
        Self {
            submit: "Entrar".to_owned(),
            submitting: "Entrando...".to_owned(),
            missing_fields: "Preencha e-mail e senha.".to_owned(),
            show: "Mostrar".to_owned(),
            hide: "Ocultar".to_owned(),
            show_password: "Mostrar senha".to_owned(),
            hide_password: "Ocultar senha".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("email and password are required")]
    MissingFields,
    #[error("a submit is already in progress")]
    AlreadySubmitting,
}

/// Values ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Trim and lowercase an email address.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize the email and require both fields. The password is not trimmed.
pub fn validate(email: &str, password: &str) -> Result<Credentials, LoginError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }
    Ok(Credentials { email, password: password.to_owned() })
}

/// Double-submit guard for a form's submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitGuard {
    #[default]
    Idle,
    /// Carries the button text to restore on release.
    Submitting { restore_label: String },
}

impl SubmitGuard {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Enter the submitting state, remembering the current button text.
    pub fn begin(&mut self, current_label: &str) -> Result<(), LoginError> {
        if self.is_submitting() {
            return Err(LoginError::AlreadySubmitting);
        }
        *self = Self::Submitting { restore_label: current_label.to_owned() };
        Ok(())
    }

    /// Leave the submitting state. Returns the label to restore, falling back
    /// to `fallback` when the remembered one was empty.
    pub fn release(&mut self, fallback: &str) -> Option<String> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Submitting { restore_label } if restore_label.trim().is_empty() => Some(fallback.to_owned()),
            Self::Submitting { restore_label } => Some(restore_label),
        }
    }
}

/// Visibility state of a password field and its toggle button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PasswordVisibility {
    /// From the input's `type` attribute.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type == "text" { Self::Visible } else { Self::Hidden }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }

    /// `Escape` in the field hides a visible password.
    #[must_use]
    pub fn on_escape(self) -> Self {
        Self::Hidden
    }

    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Hidden => "password",
            Self::Visible => "text",
        }
    }

    #[must_use]
    pub fn aria_pressed(self) -> &'static str {
        match self {
            Self::Hidden => "false",
            Self::Visible => "true",
        }
    }

    /// Accessible label describing the action the toggle performs next.
    #[must_use]
    pub fn aria_label(self, labels: &LoginLabels) -> &str {
        match self {
            Self::Hidden => &labels.show_password,
            Self::Visible => &labels.hide_password,
        }
    }

    /// Visible button text.
    #[must_use]
    pub fn button_text(self, labels: &LoginLabels) -> &str {
        match self {
            Self::Hidden => &labels.show,
            Self::Visible => &labels.hide,
        }
    }
}
