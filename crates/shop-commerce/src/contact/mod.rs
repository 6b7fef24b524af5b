//! Contact form.

mod form;

pub use form::{ContactField, ContactForm, Validation, CONTACT_SENT_MESSAGE};
