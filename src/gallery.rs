use std::fmt::Display;

use crate::model::GalleryEntry;

/// Identity of an appended entry. Never reused, so duplicates stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Removal {
    Removed(GalleryEntry),
    Declined,
    NotFound,
}

/// Ordered cards. Insertion order is display order and export order.
///
/// The same manifest added twice yields two entries; nothing is de-duplicated.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<(EntryId, GalleryEntry)>,
    next_id: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: GalleryEntry) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        self.entries.push((id, entry));

        id
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = GalleryEntry>) -> Vec<EntryId> {
        entries.into_iter().map(|entry| self.append(entry)).collect()
    }

    /// `confirm` sees the entry before anything changes; answering `false` leaves the
    /// gallery untouched.
    pub fn remove(
        &mut self,
        id: EntryId,
        confirm: impl FnOnce(&GalleryEntry) -> bool,
    ) -> Removal {
        let Some(pos) = self.entries.iter().position(|(x, _)| *x == id) else {
            return Removal::NotFound;
        };

        if !confirm(&self.entries[pos].1) {
            return Removal::Declined;
        }

        let (_, entry) = self.entries.remove(pos);

        Removal::Removed(entry)
    }

    pub fn get(&self, id: EntryId) -> Option<&GalleryEntry> {
        self.entries
            .iter()
            .find(|(x, _)| *x == id)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &GalleryEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn entries(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Ids in display order; `nth(n)` is the n-th card.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn info_urls(&self) -> Vec<&str> {
        self.entries().map(|e| e.info_url.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
