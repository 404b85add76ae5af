//! Contact record and partial updates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    validation::{validate_email, validate_phone},
    Result,
};

/// A single contact book entry
///
/// Serialized with exactly the keys `name`, `phone`, `email`, `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    /// Create a contact, validating phone and email.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPhone` or `Error::InvalidEmail`.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self> {
        NewContact {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
        .into_contact()
    }

    /// Case-insensitive substring match on name or phone.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.phone.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Phone: {}, Email: {}, Address: {}",
            self.name, self.phone, self.email, self.address
        )
    }
}

/// Raw field values for a contact that has not been validated yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl NewContact {
    /// Validate phone then email and produce a `Contact`.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation.
    pub fn into_contact(self) -> Result<Contact> {
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;
        Ok(Contact {
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        })
    }
}

/// Field replacements for an existing contact; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactUpdate {
    /// Build an update from raw prompt answers. Empty answers keep the field.
    pub fn from_inputs(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: non_empty(name.into()),
            phone: non_empty(phone.into()),
            email: non_empty(email.into()),
            address: non_empty(address.into()),
        }
    }

    /// True when no field would change.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }

    /// Validate every supplied phone/email before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPhone` or `Error::InvalidEmail`.
    pub fn validate(&self) -> Result<()> {
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Return `contact` with the supplied fields replaced.
    pub fn apply_to(self, contact: &Contact) -> Contact {
        Contact {
            name: self.name.unwrap_or_else(|| contact.name.clone()),
            phone: self.phone.unwrap_or_else(|| contact.phone.clone()),
            email: self.email.unwrap_or_else(|| contact.email.clone()),
            address: self.address.unwrap_or_else(|| contact.address.clone()),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
