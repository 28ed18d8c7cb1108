//! Breakpoint label to frame settings table.

use crate::settings::FrameSettings;

/// Number of breakpoint labels whose settings are stored and saved.
pub const MAX_FRAME_SETTINGS: usize = 1024;

/// Stable handle to an entry of a [`FrameRegistry`].
///
/// Entries are never removed or reordered, so a handle stays valid for the
/// lifetime of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameId {
    /// Entry in the saved table.
    Stored(usize),
    /// Entry created after the table was full; lives for the session only.
    Transient(usize),
}

/// Append-only table of per-label settings with a fixed capacity.
///
/// Labels seen after the table is full still get settings, but those live in
/// a separate transient list that is never written to the settings file.
#[derive(Debug, Clone)]
pub struct FrameRegistry {
    capacity: usize,
    stored: Vec<FrameSettings>,
    transient: Vec<FrameSettings>,
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_FRAME_SETTINGS)
    }
}

impl FrameRegistry {
    /// Creates an empty registry holding up to [`MAX_FRAME_SETTINGS`] stored entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry holding up to `capacity` stored entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            stored: Vec::new(),
            transient: Vec::new(),
        }
    }

    /// Finds the stored entry for `label`.
    pub fn lookup(&self, label: &str) -> Option<FrameId> {
        self.stored
            .iter()
            .position(|f| f.label() == label)
            .map(FrameId::Stored)
    }

    /// Returns the entry for `label`, creating one with default settings if needed.
    ///
    /// Once the stored table is full, new labels get a transient entry instead.
    pub fn get_or_create(&mut self, label: &str) -> FrameId {
        if let Some(id) = self.lookup(label) {
            return id;
        }
        if let Some(index) = self.transient.iter().position(|f| f.label() == label) {
            return FrameId::Transient(index);
        }
        if self.stored.len() < self.capacity {
            self.stored.push(FrameSettings::new(label));
            return FrameId::Stored(self.stored.len() - 1);
        }
        log::warn!(
            "reached max number of stored breakpoint settings ({}); settings for '{label}' will not be saved",
            self.capacity
        );
        self.transient.push(FrameSettings::new(label));
        FrameId::Transient(self.transient.len() - 1)
    }

    /// Returns the stored entry for `label`, creating it if there is room.
    ///
    /// Unlike [`FrameRegistry::get_or_create`] this never creates a transient
    /// entry; it returns `None` when the table is full.
    pub fn get_or_insert_stored(&mut self, label: &str) -> Option<FrameId> {
        if let Some(id) = self.lookup(label) {
            return Some(id);
        }
        if self.stored.len() >= self.capacity {
            return None;
        }
        self.stored.push(FrameSettings::new(label));
        Some(FrameId::Stored(self.stored.len() - 1))
    }

    /// Gets the entry behind `id`.
    pub fn get(&self, id: FrameId) -> Option<&FrameSettings> {
        match id {
            FrameId::Stored(i) => self.stored.get(i),
            FrameId::Transient(i) => self.transient.get(i),
        }
    }

    /// Gets the entry behind `id` for modification.
    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut FrameSettings> {
        match id {
            FrameId::Stored(i) => self.stored.get_mut(i),
            FrameId::Transient(i) => self.transient.get_mut(i),
        }
    }

    /// The stored entries, in creation order.
    pub fn stored(&self) -> &[FrameSettings] {
        &self.stored
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.stored.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    /// Number of transient entries.
    pub fn transient_len(&self) -> usize {
        self.transient.len()
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if new labels can no longer be stored.
    pub fn is_full(&self) -> bool {
        self.stored.len() >= self.capacity
    }
}
