//! Contact store and its JSON document lifecycle
//!
//! The store is an ordered list of contacts. Insertion order is the display
//! order, and users refer to contacts by 1-based [`Selection`].
//!
//! The document is a pretty-printed JSON array (4-space indent). It is read
//! once by [`ContactStore::load`] and rewritten in full by
//! [`ContactStore::save`].

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::{Contact, Error, Result};

const INDENT: &[u8] = b"    ";

// ═══════════════════════════════════════════════════════════════════════════
// SELECTION
// ═══════════════════════════════════════════════════════════════════════════

/// A validated 1-based position into a store of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection(usize);

impl Selection {
    /// Parse user input into a selection for a store of `len` contacts.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidNumber` if the text is not an integer
    /// - `Error::InvalidChoice` if the integer is outside `1..=len`
    pub fn parse(input: &str, len: usize) -> Result<Self> {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(position) => Self::new(position, len),
            Err(_) if is_integer_literal(trimmed) => Err(Error::InvalidChoice {
                position: if trimmed.starts_with('-') {
                    i64::MIN
                } else {
                    i64::MAX
                },
                len,
            }),
            Err(_) => Err(Error::InvalidNumber(input.to_string())),
        }
    }

    /// Check an already-numeric position against the store length.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidChoice` if `position` is outside `1..=len`.
    pub fn new(position: i64, len: usize) -> Result<Self> {
        usize::try_from(position)
            .ok()
            .filter(|p| (1..=len).contains(p))
            .map(Self)
            .ok_or(Error::InvalidChoice { position, len })
    }

    /// 1-based position as shown to the user
    pub const fn position(self) -> usize {
        self.0
    }

    /// 0-based index into the underlying sequence
    pub const fn index(self) -> usize {
        self.0 - 1
    }

    /// Error for a selection that no longer fits a store of `len`.
    pub(crate) fn out_of_range(self, len: usize) -> Error {
        Error::InvalidChoice {
            position: i64::try_from(self.0).unwrap_or(i64::MAX),
            len,
        }
    }
}

/// Integer too large for `i64`: still a number, just out of range.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ═══════════════════════════════════════════════════════════════════════════
// STORE
// ═══════════════════════════════════════════════════════════════════════════

/// Ordered, in-memory contact collection bound to its document path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStore {
    path: PathBuf,
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Create an empty store that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contacts: Vec::new(),
        }
    }

    /// Create a store holding `contacts`, without touching the filesystem.
    pub fn with_contacts(path: impl Into<PathBuf>, contacts: Vec<Contact>) -> Self {
        Self {
            path: path.into(),
            contacts,
        }
    }

    /// Load the store from `path`.
    ///
    /// A missing document yields an empty store.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if the document exists but cannot be read
    /// - `Error::MalformedData` if it is not a JSON array of contacts
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No contacts file at {}, starting empty", path.display());
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, &e))?;
        let contacts: Vec<Contact> =
            serde_json::from_str(&content).map_err(|e| Error::malformed(&path, e.to_string()))?;

        tracing::debug!(
            "Loaded {} contacts from {}",
            contacts.len(),
            path.display()
        );
        Ok(Self { path, contacts })
    }

    /// Overwrite the document with the full current sequence.
    ///
    /// The JSON is written to a sibling temporary file and renamed into
    /// place, so the previous document is replaced in one step. An existing
    /// document keeps its permissions, and a symlinked document is written
    /// through the link.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the document cannot be written.
    pub fn save(&self) -> Result<()> {
        let json = self.to_json()?;
        let target = resolve_target(&self.path)?;
        let dir = parent_dir(&target);
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, &e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, &e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| Error::io(tmp.path(), &e))?;

        // Keep the mode of an existing document
        if let Ok(existing) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| Error::io(tmp.path(), &e))?;
        }

        tmp.persist(&target)
            .map_err(|e| Error::io(&target, &e.error))?;

        tracing::debug!(
            "Saved {} contacts to {}",
            self.contacts.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Render the document as pretty JSON with a 4-space indent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.contacts
            .serialize(&mut ser)
            .map_err(|e| Error::io(&self.path, &std::io::Error::other(e)))?;
        String::from_utf8(buf)
            .map_err(|e| Error::io(&self.path, &std::io::Error::other(e)))
    }

    /// Document path this store is bound to
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// All contacts in display order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts paired with their 1-based positions
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Contact)> {
        self.contacts.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    /// Resolve user input into a selection for this store.
    ///
    /// # Errors
    ///
    /// See [`Selection::parse`].
    pub fn select(&self, input: &str) -> Result<Selection> {
        Selection::parse(input, self.len())
    }

    /// Contact at `selection`, if the store has not shrunk since it was made.
    pub fn get(&self, selection: Selection) -> Option<&Contact> {
        self.contacts.get(selection.index())
    }

    /// Append a contact at the end.
    pub fn push(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Replace the contact at `selection`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidChoice` if the selection no longer fits.
    pub fn replace(&mut self, selection: Selection, contact: Contact) -> Result<Contact> {
        let len = self.len();
        self.contacts
            .get_mut(selection.index())
            .map(|slot| std::mem::replace(slot, contact))
            .ok_or_else(|| selection.out_of_range(len))
    }

    /// Remove the contact at `selection`; later positions shift down by one.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidChoice` if the selection no longer fits.
    pub fn remove(&mut self, selection: Selection) -> Result<Contact> {
        if selection.index() < self.len() {
            Ok(self.contacts.remove(selection.index()))
        } else {
            Err(selection.out_of_range(self.len()))
        }
    }
}

/// Follow a symlinked document so the link itself survives the rename.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let link = fs::read_link(path).map_err(|e| Error::io(path, &e))?;
            Ok(if link.is_absolute() {
                link
            } else {
                parent_dir(path).join(link)
            })
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            name: name.to_string(),
            phone: "+911234567890".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: String::new(),
        }
    }

    fn three() -> ContactStore {
        ContactStore::with_contacts(
            "contacts.json",
            vec![contact("Asha"), contact("Bala"), contact("Chitra")],
        )
    }

    #[test]
    fn test_selection_accepts_in_range() -> Result<()> {
        let selection = Selection::parse("2", 3)?;
        assert_eq!(selection.position(), 2);
        assert_eq!(selection.index(), 1);
        Ok(())
    }

    #[test]
    fn test_selection_trims_whitespace() -> Result<()> {
        assert_eq!(Selection::parse(" 3 \n", 3)?.position(), 3);
        Ok(())
    }

    #[test]
    fn test_selection_rejects_zero_and_past_end() {
        assert_eq!(
            Selection::parse("0", 3),
            Err(Error::InvalidChoice {
                position: 0,
                len: 3
            })
        );
        assert_eq!(
            Selection::parse("4", 3),
            Err(Error::InvalidChoice {
                position: 4,
                len: 3
            })
        );
        assert!(matches!(
            Selection::parse("-1", 3),
            Err(Error::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_selection_rejects_non_numbers() {
        assert_eq!(
            Selection::parse("two", 3),
            Err(Error::InvalidNumber("two".into()))
        );
        assert!(matches!(
            Selection::parse("", 3),
            Err(Error::InvalidNumber(_))
        ));
        assert!(matches!(
            Selection::parse("1.5", 3),
            Err(Error::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_selection_huge_number_is_out_of_range() {
        assert!(matches!(
            Selection::parse("99999999999999999999999", 3),
            Err(Error::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_selection_on_empty_store() {
        assert!(matches!(
            Selection::parse("1", 0),
            Err(Error::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_remove_shifts_positions() -> Result<()> {
        let mut store = three();
        let removed = store.remove(store.select("2")?)?;
        assert_eq!(removed.name, "Bala");
        let names: Vec<_> = store.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Asha", "Chitra"]);
        Ok(())
    }

    #[test]
    fn test_replace_keeps_position() -> Result<()> {
        let mut store = three();
        let previous = store.replace(store.select("1")?, contact("Deepa"))?;
        assert_eq!(previous.name, "Asha");
        assert_eq!(store.contacts()[0].name, "Deepa");
        assert_eq!(store.len(), 3);
        Ok(())
    }

    #[test]
    fn test_stale_selection_rejected() -> Result<()> {
        let mut store = three();
        let last = store.select("3")?;
        store.remove(store.select("1")?)?;
        assert!(store.get(last).is_none());
        assert!(store.remove(last).is_err());
        assert!(store.replace(last, contact("X")).is_err());
        Ok(())
    }

    #[test]
    fn test_numbered_is_one_based() {
        let store = three();
        let positions: Vec<_> = store.numbered().map(|(n, _)| n).collect();
        assert_eq!(positions, [1, 2, 3]);
    }

    #[test]
    fn test_to_json_uses_four_space_indent() -> Result<()> {
        let store = ContactStore::with_contacts("c.json", vec![contact("Asha")]);
        let expected = "[\n    {\n        \"name\": \"Asha\",\n        \"phone\": \"+911234567890\",\n        \"email\": \"asha@example.com\",\n        \"address\": \"\"\n    }\n]";
        assert_eq!(store.to_json()?, expected);
        Ok(())
    }

    #[test]
    fn test_empty_store_json() -> Result<()> {
        assert_eq!(ContactStore::new("c.json").to_json()?, "[]");
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_empty() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let store = ContactStore::load(dir.path().join("contacts.json"))?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let path = dir.path().join("nested").join("contacts.json");
        let store = ContactStore::with_contacts(&path, three().contacts().to_vec());
        store.save()?;
        let loaded = ContactStore::load(&path)?;
        assert_eq!(loaded, store);
        Ok(())
    }

    #[test]
    fn test_save_overwrites_previous_document() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let path = dir.path().join("contacts.json");
        ContactStore::with_contacts(&path, three().contacts().to_vec()).save()?;
        ContactStore::new(&path).save()?;
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, &e))?;
        assert_eq!(content, "[]");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_document_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let path = dir.path().join("contacts.json");
        fs::write(&path, "[]").map_err(|e| Error::io(&path, &e))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::io(&path, &e))?;

        ContactStore::with_contacts(&path, three().contacts().to_vec()).save()?;

        let mode = fs::metadata(&path)
            .map_err(|e| Error::io(&path, &e))?
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_keeps_link() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let real = dir.path().join("real.json");
        let link = dir.path().join("contacts.json");
        fs::write(&real, "[]").map_err(|e| Error::io(&real, &e))?;
        std::os::unix::fs::symlink("real.json", &link).map_err(|e| Error::io(&link, &e))?;

        ContactStore::with_contacts(&link, three().contacts().to_vec()).save()?;

        let meta = fs::symlink_metadata(&link).map_err(|e| Error::io(&link, &e))?;
        assert!(meta.file_type().is_symlink());
        assert_eq!(ContactStore::load(&real)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_load_malformed_is_error() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        let path = dir.path().join("contacts.json");
        for bad in ["", "{", "{\"name\": \"a\"}", "[{\"name\": 1}]"] {
            fs::write(&path, bad).map_err(|e| Error::io(&path, &e))?;
            assert!(
                matches!(ContactStore::load(&path), Err(Error::MalformedData { .. })),
                "expected malformed for {bad:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_load_directory_is_io_error() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(Path::new("tmp"), &e))?;
        assert!(matches!(
            ContactStore::load(dir.path()),
            Err(Error::Io { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("contacts.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/b.json")), Path::new("a"));
    }
}
