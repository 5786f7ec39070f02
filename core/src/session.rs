//! Bearer-token session store.
//!
//! # Design
//! `SessionStore` is the single source of truth for the current token:
//! present means "the client considers itself authenticated" (the server may
//! still reject it), absent means unauthenticated. The in-memory value is
//! hydrated lazily from a `TokenStorage` on first read, so a token survives a
//! process restart the way a browser token survives a page reload.
//!
//! All writes come from the login, register and logout/session-invalidation
//! paths; the UI model assumes a single logical thread of event handling. The
//! mutex is there so the store stays sound if the host embeds it in a
//! multi-threaded runtime, not because the core expects concurrent writers.
//!
//! Storage I/O failures are logged and swallowed: durable persistence is
//! best-effort, losing it degrades to "log in again after restart".

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Durable storage seam for the bearer token.
///
/// Implementations persist at most one token. Failures must be handled
/// internally; none of the methods can report an error.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn persist(&self, token: &str);
    fn clear(&self);
}

/// In-process storage. Tokens do not survive a restart; used in tests and in
/// hosts that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn persist(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Stores the raw token in a single file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read token file");
                None
            }
        }
    }

    fn persist(&self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write token file");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token file");
            }
        }
    }
}

struct TokenCell {
    value: Option<String>,
    /// Once a token has been read from or written through the store, the
    /// durable copy is no longer consulted. Keeps `set_token(None)` sticky.
    hydrated: bool,
}

/// Holds the current bearer token and persists it across restarts.
pub struct SessionStore {
    cell: Mutex<TokenCell>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            cell: Mutex::new(TokenCell {
                value: None,
                hydrated: false,
            }),
            storage,
        }
    }

    /// Store without durable persistence.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// Store backed by a token file at `path`.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStorage::new(path)))
    }

    /// Store or clear the token, mirroring the change to durable storage.
    pub fn set_token(&self, token: Option<&str>) {
        let mut cell = self.cell.lock().unwrap_or_else(|e| e.into_inner());
        cell.hydrated = true;
        match token {
            Some(token) => {
                cell.value = Some(token.to_string());
                self.storage.persist(token);
            }
            None => {
                cell.value = None;
                self.storage.clear();
            }
        }
    }

    /// Current token, hydrating from durable storage on the first read.
    /// Never touches the network.
    pub fn token(&self) -> Option<String> {
        let mut cell = self.cell.lock().unwrap_or_else(|e| e.into_inner());
        if !cell.hydrated {
            cell.value = self.storage.load();
            cell.hydrated = true;
        }
        cell.value.clone()
    }

    /// Whether a token is currently held. Presence is not proof of validity;
    /// the server may still reject it.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself.
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
