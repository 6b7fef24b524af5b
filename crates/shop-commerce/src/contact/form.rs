//! Contact form data and validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::notify::{NotificationChannel, NotificationHandle};

/// Shown after a contact form is accepted.
pub const CONTACT_SENT_MESSAGE: &str = "Thank you! Your message has been sent.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FullName,
    Subject,
    Email,
    Message,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [ContactField; 4] = [
        ContactField::FullName,
        ContactField::Subject,
        ContactField::Email,
        ContactField::Message,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::FullName => "Full Name",
            ContactField::Subject => "Subject",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid {
        field_errors: BTreeMap<ContactField, String>,
    },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Error message for one field, if it failed.
    pub fn error_for(&self, field: ContactField) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid { field_errors } => field_errors.get(&field).map(String::as_str),
        }
    }
}

/// What the shopper typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub full_name: String,
    pub subject: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Check every field.
    pub fn validate(&self) -> Validation {
        let mut field_errors = BTreeMap::new();

        if self.full_name.trim().chars().count() < 3 {
            field_errors.insert(
                ContactField::FullName,
                "Full name must be at least 3 characters".to_string(),
            );
        }
        if self.subject.trim().chars().count() < 3 {
            field_errors.insert(
                ContactField::Subject,
                "Subject must be at least 3 characters".to_string(),
            );
        }
        if !EMAIL_RE.is_match(&self.email) {
            field_errors.insert(
                ContactField::Email,
                "Please enter a valid email address".to_string(),
            );
        }
        if self.message.trim().chars().count() < 10 {
            field_errors.insert(
                ContactField::Message,
                "Message must be at least 10 characters".to_string(),
            );
        }

        if field_errors.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid { field_errors }
        }
    }

    /// Current value of a field.
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::Subject => &self.subject,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::FullName => self.full_name = value,
            ContactField::Subject => self.subject = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Validate and, when valid, announce the submission and reset the form.
    ///
    /// On failure the form keeps its values and the field errors are
    /// returned for display.
    pub fn submit(
        &mut self,
        notifications: &NotificationChannel,
    ) -> Result<NotificationHandle, Validation> {
        match self.validate() {
            Validation::Valid => {
                tracing::info!(subject = %self.subject.trim(), "contact form submitted");
                *self = ContactForm::default();
                Ok(notifications.success(CONTACT_SENT_MESSAGE))
            }
            invalid => Err(invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            full_name: "Ash Ketchum".into(),
            subject: "Order question".into(),
            email: "ash@pallet.town".into(),
            message: "Where is my Eevee plush?".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(valid_form().validate(), Validation::Valid);
    }

    #[test]
    fn test_each_rule() {
        let mut form = valid_form();
        form.full_name = "  Al ".into();
        form.email = "ash@pallet".into();
        form.message = "short".into();

        let result = form.validate();
        assert!(!result.is_valid());
        assert_eq!(
            result.error_for(ContactField::FullName),
            Some("Full name must be at least 3 characters")
        );
        assert_eq!(
            result.error_for(ContactField::Email),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            result.error_for(ContactField::Message),
            Some("Message must be at least 10 characters")
        );
        assert_eq!(result.error_for(ContactField::Subject), None);
    }

    #[test]
    fn test_email_rejects_whitespace_and_missing_at() {
        for email in ["ash pallet@town.com", "ash.town.com", "@town.com", "ash@town."] {
            let mut form = valid_form();
            form.email = email.into();
            assert!(
                form.validate().error_for(ContactField::Email).is_some(),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_set_and_value() {
        let mut form = ContactForm::default();
        for field in ContactField::ALL {
            form.set(field, field.label());
        }
        assert_eq!(form.value(ContactField::Subject), "Subject");
        assert_eq!(form.full_name, "Full Name");
    }

    #[test]
    fn test_submit_resets_form_only_when_valid() {
        let channel = NotificationChannel::default();

        let mut bad = ContactForm::default();
        assert!(bad.submit(&channel).is_err());
        assert!(channel.current().is_none());

        let mut good = valid_form();
        let handle = good.submit(&channel).unwrap();
        assert_eq!(good, ContactForm::default());
        let shown = channel.current().unwrap();
        assert_eq!(shown.message, CONTACT_SENT_MESSAGE);
        assert_eq!(shown.handle(), handle);
    }
}
