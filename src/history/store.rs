//! Encrypted, bounded history file
//!
//! Every mutating call decrypts the whole file, changes the list, and
//! re-encrypts it under a fresh salt and nonce. The file is replaced
//! atomically through a temporary file in the same directory.
//!
//! The store assumes one process writing at a time. There is no
//! inter-process locking; two processes adding entries concurrently can
//! lose one of the writes.

use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

use super::entry::HistoryEntry;
use super::search::{filter_by_kind, filter_entries};
use crate::crypto::{self, EncryptedBlob};
use crate::error::{ForgeError, Result};
use crate::generator::GeneratorKind;
use crate::random::{OsRandom, RandomSource};
use crate::utils::{generate_entry_id, now};
use crate::{DEFAULT_HISTORY_MAX_ENTRIES, HISTORY_FILENAME, PBKDF2_ITERATIONS};

/// Encrypted history of generated credentials, newest first
pub struct HistoryStore {
    path: PathBuf,
    enabled: bool,
    passphrase: Option<Zeroizing<String>>,
    max_entries: usize,
    kdf_iterations: u32,
    source: Arc<dyn RandomSource>,
}

impl HistoryStore {
    /// Store backed by the file at `path`.
    ///
    /// History starts enabled with no passphrase; writes fail with
    /// [`ForgeError::PassphraseNotSet`] until one is set. A `max_entries`
    /// of zero selects the default cap.
    pub fn new(path: &Path, max_entries: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            enabled: true,
            passphrase: None,
            max_entries: if max_entries == 0 { DEFAULT_HISTORY_MAX_ENTRIES } else { max_entries },
            kdf_iterations: PBKDF2_ITERATIONS,
            source: Arc::new(OsRandom),
        }
    }

    /// Store using the default file name inside `folder`
    pub fn in_folder(folder: &Path, max_entries: usize) -> Self {
        Self::new(&folder.join(HISTORY_FILENAME), max_entries)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.set_passphrase(passphrase);
        self
    }

    /// Override the PBKDF2 iteration count.
    ///
    /// A file written with one count can only be read back with the same
    /// count.
    pub fn with_kdf_iterations(mut self, iterations: u32) -> Self {
        self.kdf_iterations = iterations;
        self
    }

    /// Source for salts and nonces
    pub fn with_random_source(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.source = source;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the cap; the list is truncated on the next write
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = if max_entries == 0 { DEFAULT_HISTORY_MAX_ENTRIES } else { max_entries };
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set the passphrase; an empty string clears it
    pub fn set_passphrase(&mut self, passphrase: &str) {
        self.passphrase = if passphrase.is_empty() {
            None
        } else {
            Some(Zeroizing::new(passphrase.to_string()))
        };
    }

    pub fn has_passphrase(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Prepend `entry`, evicting the oldest entries beyond the cap.
    ///
    /// The existing file is decrypted, the list updated, and the whole list
    /// re-encrypted under a fresh salt and nonce.
    ///
    /// # Arguments
    ///
    /// * `entry` - The record to add; an empty id and an unset timestamp are filled in
    ///
    /// # Returns
    ///
    /// `HistoryDisabled` or `PassphraseNotSet` before touching the file,
    /// `DecryptionError` when the existing file does not authenticate, and
    /// `PersistenceError` when it cannot be read or replaced. The file is
    /// left unchanged on every error.
    pub fn add_entry(&self, mut entry: HistoryEntry) -> Result<()> {
        let passphrase = self.unlocked()?;
        let mut entries = self.read_entries(passphrase)?;

        if entry.id.is_empty() {
            entry.id = generate_entry_id();
        }
        if entry.is_unstamped() {
            entry.created_at = now();
        }

        entries.insert(0, entry);
        if entries.len() > self.max_entries {
            debug!("History over cap, evicting {} entries", entries.len() - self.max_entries);
            entries.truncate(self.max_entries);
        }

        self.write_entries(&entries, passphrase)
    }

    /// All entries, newest first. An absent file is an empty history.
    pub fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        let passphrase = self.unlocked()?;
        self.read_entries(passphrase)
    }

    /// At most `limit` newest entries; zero means all
    pub fn recent_entries(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load_history()?;
        if limit > 0 {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    /// Entries whose type, description or settings contain `query`
    pub fn search_entries(&self, query: &str) -> Result<Vec<HistoryEntry>> {
        Ok(filter_entries(self.load_history()?, query))
    }

    /// Entries produced by one generator kind
    pub fn entries_by_kind(&self, kind: GeneratorKind) -> Result<Vec<HistoryEntry>> {
        Ok(filter_by_kind(self.load_history()?, kind))
    }

    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.load_history()?.len())
    }

    /// Remove all entries.
    ///
    /// The existing file must decrypt under the current passphrase; it is
    /// then replaced by an encrypted empty list.
    pub fn clear_history(&self) -> Result<()> {
        let passphrase = self.unlocked()?;
        let entries = self.read_entries(passphrase)?;
        if entries.is_empty() && !self.path.exists() {
            return Ok(());
        }
        debug!("Clearing {} history entries", entries.len());
        self.write_entries(&[], passphrase)
    }

    /// Delete the history file without decrypting it.
    ///
    /// For a forgotten passphrase. Works whether or not history is enabled.
    pub fn purge(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Purged history file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence("remove history file", e)),
        }
    }

    fn unlocked(&self) -> Result<&str> {
        if !self.enabled {
            return Err(ForgeError::HistoryDisabled);
        }
        match &self.passphrase {
            Some(passphrase) => Ok(passphrase.as_str()),
            None => Err(ForgeError::PassphraseNotSet),
        }
    }

    fn read_entries(&self, passphrase: &str) -> Result<Vec<HistoryEntry>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence("read history file", e)),
        };

        let blob = EncryptedBlob::from_bytes(&data)?;
        let plaintext = crypto::decrypt_with(&blob, passphrase, self.kdf_iterations).inspect_err(|_| {
            warn!("Could not decrypt history file {}", self.path.display());
        })?;

        let entries: Vec<HistoryEntry> = serde_json::from_slice(&plaintext)?;
        debug!("Loaded {} history entries", entries.len());
        Ok(entries)
    }

    fn write_entries(&self, entries: &[HistoryEntry], passphrase: &str) -> Result<()> {
        let plaintext = Zeroizing::new(serde_json::to_vec(entries)?);
        let blob = crypto::encrypt_with(&plaintext, passphrase, self.kdf_iterations, self.source.as_ref())?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_private_dir(&dir)?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| persistence("create temporary file", e))?;
        restrict_permissions(file.as_file())?;
        file.write_all(&blob.to_bytes())
            .map_err(|e| persistence("write history file", e))?;
        file.as_file()
            .sync_all()
            .map_err(|e| persistence("sync history file", e))?;
        file.persist(&self.path)?;

        debug!("Saved {} history entries", entries.len());
        Ok(())
    }
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("path", &self.path)
            .field("enabled", &self.enabled)
            .field("has_passphrase", &self.passphrase.is_some())
            .field("max_entries", &self.max_entries)
            .field("kdf_iterations", &self.kdf_iterations)
            .finish()
    }
}

fn persistence(action: &str, err: std::io::Error) -> ForgeError {
    ForgeError::PersistenceError(format!("Failed to {}: {}", action, err))
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|e| persistence("create history directory", e))
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| persistence("create history directory", e))
}

#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| persistence("set history file permissions", e))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> Result<()> {
    Ok(())
}
