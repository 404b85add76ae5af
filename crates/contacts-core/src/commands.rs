//! Command handlers
//!
//! Each handler takes the store explicitly and returns an [`Outcome`]
//! describing what happened. Nothing here prints; the shell renders the
//! outcome through its `Display` impl.
//!
//! Handlers never partially commit. On any `Err` the store is unchanged.

use std::{fmt, path::PathBuf};

use crate::{Contact, ContactStore, ContactUpdate, NewContact, Result};

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A contact was appended
    Added { name: String },
    /// Full store contents with 1-based positions
    Listing(Vec<(usize, Contact)>),
    /// A contact was rewritten in place
    Updated { position: usize, contact: Contact },
    /// A contact was removed
    Deleted { contact: Contact },
    /// Search results in store order
    Matches(Vec<Contact>),
    /// The store was written to disk
    Saved { count: usize, path: PathBuf },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name } => write!(f, "Contact '{name}' added successfully!"),
            Self::Listing(entries) if entries.is_empty() => write!(f, "No contacts found!"),
            Self::Listing(entries) => {
                let lines: Vec<String> = entries
                    .iter()
                    .map(|(position, contact)| format!("{position}. {contact}"))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Self::Updated { .. } => write!(f, "Contact updated successfully!"),
            Self::Deleted { contact } => {
                write!(f, "Contact '{}' deleted successfully!", contact.name)
            }
            Self::Matches(found) if found.is_empty() => write!(f, "No matching contacts found."),
            Self::Matches(found) => {
                let lines: Vec<String> = found.iter().map(ToString::to_string).collect();
                write!(f, "{}", lines.join("\n"))
            }
            Self::Saved { .. } => write!(f, "Exiting... All changes have been saved."),
        }
    }
}

/// Validate and append a new contact.
///
/// # Errors
///
/// Returns `Error::InvalidPhone` or `Error::InvalidEmail`; nothing is appended.
pub fn add(store: &mut ContactStore, new: NewContact) -> Result<Outcome> {
    let contact = new.into_contact()?;
    let name = contact.name.clone();
    store.push(contact);
    tracing::info!(count = store.len(), "Added contact");
    Ok(Outcome::Added { name })
}

/// List every contact with its position.
pub fn view(store: &ContactStore) -> Outcome {
    Outcome::Listing(
        store
            .numbered()
            .map(|(position, contact)| (position, contact.clone()))
            .collect(),
    )
}

/// Apply `update` to the contact chosen by `selection`.
///
/// The selection is resolved and every supplied field validated before the
/// contact is rewritten.
///
/// # Errors
///
/// - `Error::InvalidNumber` / `Error::InvalidChoice` for a bad selection
/// - `Error::InvalidPhone` / `Error::InvalidEmail` for bad field values
pub fn update(store: &mut ContactStore, selection: &str, update: ContactUpdate) -> Result<Outcome> {
    let selection = store.select(selection)?;
    update.validate()?;
    if update.is_empty() {
        tracing::debug!(position = selection.position(), "Update leaves contact unchanged");
    }

    let contact = store
        .get(selection)
        .map(|current| update.apply_to(current))
        .ok_or_else(|| selection.out_of_range(store.len()))?;
    store.replace(selection, contact.clone())?;

    tracing::info!(position = selection.position(), "Updated contact");
    Ok(Outcome::Updated {
        position: selection.position(),
        contact,
    })
}

/// Remove the contact chosen by `selection`.
///
/// # Errors
///
/// Returns `Error::InvalidNumber` / `Error::InvalidChoice` for a bad selection.
pub fn delete(store: &mut ContactStore, selection: &str) -> Result<Outcome> {
    let selection = store.select(selection)?;
    let contact = store.remove(selection)?;
    tracing::info!(position = selection.position(), "Deleted contact");
    Ok(Outcome::Deleted { contact })
}

/// Case-insensitive substring search on name or phone.
///
/// An empty term matches every contact.
pub fn search(store: &ContactStore, term: &str) -> Outcome {
    let needle = term.to_lowercase();
    Outcome::Matches(
        store
            .contacts()
            .iter()
            .filter(|contact| contact.matches_lowercase(&needle))
            .cloned()
            .collect(),
    )
}

/// Write the store to its document.
///
/// # Errors
///
/// Returns `Error::Io` if the document cannot be written.
pub fn exit(store: &ContactStore) -> Result<Outcome> {
    store.save()?;
    tracing::info!(count = store.len(), path = %store.path().display(), "Saved contacts");
    Ok(Outcome::Saved {
        count: store.len(),
        path: store.path().to_path_buf(),
    })
}
