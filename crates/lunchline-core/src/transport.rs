//! Outbound message transport.
//!
//! The finished message leaves through a prefilled chat link addressed to the
//! configured contact number. Opening the link is optional so the CLI can
//! just print it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError, ValidationError};

const CHAT_BASE_URL: &str = "https://wa.me";

/// What the transport did with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub link: String,
    pub opened: bool,
}

pub trait Transport {
    fn send(&self, message: &str) -> Result<Delivery>;
}

/// Builds `https://wa.me/<number>?text=<message>` and optionally opens it.
#[derive(Debug, Clone)]
pub struct ChatLinkTransport {
    contact: String,
    open_browser: bool,
}

impl ChatLinkTransport {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidContact` if the number contains anything
    /// other than digits, `+`, spaces and dashes, or has no digits at all.
    pub fn new(contact: &str, open_browser: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            contact: normalize_contact(contact)?,
            open_browser,
        })
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn link(&self, message: &str) -> String {
        format!(
            "{CHAT_BASE_URL}/{}?text={}",
            self.contact,
            urlencoding::encode(message)
        )
    }
}

impl Transport for ChatLinkTransport {
    fn send(&self, message: &str) -> Result<Delivery> {
        let link = self.link(message);
        if self.open_browser {
            open::that(&link).map_err(TransportError::OpenFailed)?;
            tracing::info!(contact = %self.contact, "chat link opened");
        }
        Ok(Delivery {
            link,
            opened: self.open_browser,
        })
    }
}

/// Strip `+`, spaces and dashes; reject anything else that is not a digit.
pub fn normalize_contact(contact: &str) -> Result<String, ValidationError> {
    let mut digits = String::with_capacity(contact.len());
    for c in contact.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            '+' | ' ' | '-' => {}
            _ => return Err(ValidationError::InvalidContact(contact.to_string())),
        }
    }
    if digits.is_empty() {
        return Err(ValidationError::InvalidContact(contact.to_string()));
    }
    Ok(digits)
}
