//! Persisted login session.
//!
//! The logged-in [`Actor`] is stored as a JSON string under one key of a [`KeyValueStore`].
//! A value that no longer parses is discarded on restore; it never surfaces as an error.

use crate::directory::ActorDirectory;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::time::Duration;
use zerosight_settings::SessionSettings;
use zerosight_types::Actor;

/// String key/value persistence, shaped like browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk; every write rewrites the whole file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e).with_context(|| format!("read {}", self.path)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&text) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "discarding unreadable session file");
                let entries = BTreeMap::new();
                self.save(&entries)?;
                Ok(entries)
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        let json = serde_json::to_string_pretty(entries).context("serialize session store")?;
        std::fs::write(&self.path, json).with_context(|| format!("write {}", self.path))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

pub struct SessionManager<S> {
    store: S,
    key: String,
    login_delay: Duration,
    current: Option<Actor>,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S, settings: &SessionSettings) -> Self {
        Self {
            store,
            key: settings.key.clone(),
            login_delay: Duration::from_millis(settings.login_delay_ms),
            current: None,
        }
    }

    /// Load the persisted actor, clearing the entry if it does not parse.
    pub fn restore(&mut self) -> anyhow::Result<Option<&Actor>> {
        self.current = None;
        if let Some(raw) = self.store.get(&self.key)? {
            match serde_json::from_str::<Actor>(&raw) {
                Ok(actor) => self.current = Some(actor),
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "clearing corrupt session entry");
                    self.store.remove(&self.key)?;
                }
            }
        }
        Ok(self.current.as_ref())
    }

    /// Authenticate and persist the actor. A failed attempt leaves any existing session alone.
    ///
    /// Invalid credentials surface as [`crate::AuthError`] inside the returned error.
    pub fn login(
        &mut self,
        directory: &ActorDirectory,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Actor> {
        if !self.login_delay.is_zero() {
            std::thread::sleep(self.login_delay);
        }
        let actor = directory.authenticate(email, password)?;
        let json = serde_json::to_string(&actor).context("serialize session actor")?;
        self.store.set(&self.key, json)?;
        tracing::info!(actor_id = %actor.id, role = %actor.role, "logged in");
        self.current = Some(actor.clone());
        Ok(actor)
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.store.remove(&self.key)?;
        if let Some(actor) = self.current.take() {
            tracing::info!(actor_id = %actor.id, "logged out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&Actor> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
