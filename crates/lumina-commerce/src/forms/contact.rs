//! Contact page form.

use crate::error::CommerceError;
use crate::forms::{require, require_email, FieldErrors};
use serde::{Deserialize, Serialize};

/// Minimum message length, in characters.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Subjects offered by the contact form.
pub const CONTACT_SUBJECTS: [&str; 5] = [
    "Product Inquiry",
    "Support Request",
    "Partnership Opportunity",
    "Feedback",
    "Other",
];

/// A message sent through the contact page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require_email(&mut errors, &self.email);
        require(&mut errors, "subject", &self.subject, "Subject is required");
        if require(&mut errors, "message", &self.message, "Message is required")
            && self.message.chars().count() < MIN_MESSAGE_LEN
        {
            errors.add(
                "message",
                format!("Message must be at least {} characters", MIN_MESSAGE_LEN),
            );
        }
        errors
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        self.errors().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let errors = ContactForm::default().errors();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("message"), Some("Message is required"));
    }

    #[test]
    fn test_short_message() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: CONTACT_SUBJECTS[1].to_string(),
            message: "Help!".to_string(),
        };
        let errors = form.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("message"),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn test_valid_form() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Feedback".to_string(),
            message: "Love the presets, thanks!".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
