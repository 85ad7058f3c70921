use std::path::Path;

use mtquest_arc::{ext, Archive, ArchiveConfig, ArchiveEntry, ArchiveError, Container, EntryData};

use crate::{link::QuestLink, paths, Language, QuestError};

/// Extension of the quest payload entry.
pub const QUEST_DATA_EXTENSION: &str = ".ext";

/// Extension of the quest link table entry.
pub const QUEST_LINK_EXTENSION: &str = ".qdl";

/// The order in which the game's loader expects entry groups.
///
/// A complete quest holds 5 boss spawn points, 2 spawn lists, 5
/// reward tables, one supply list, one set of plus parameters, the
/// link table, 7 text blocks and the quest payload.
pub const LOADER_ORDER: [&str; 8] = [
    ".sem",
    ".esl",
    ".rem",
    ".sup",
    ".qdp",
    QUEST_LINK_EXTENSION,
    ".gmd",
    QUEST_DATA_EXTENSION,
];

/// Quest archives with fewer entries than this are suspicious.
///
/// This sits one below a complete quest, so a quest lacking a
/// single optional resource saves without a warning.
pub const MIN_EXPECTED_ENTRIES: usize = 22;

/// How a [`QuestArc`] arranges its entries on save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryOrdering {
    /// Sort entries into the group order of [`LOADER_ORDER`].
    ///
    /// Required for archives holding a single quest.
    #[default]
    Loader,
    /// Keep the entry order as it is.
    ///
    /// Meant for archives which only serve as lookup tables.
    Preserve,
}

fn loader_rank(extension: &str) -> usize {
    LOADER_ORDER
        .iter()
        .position(|&ext| ext == extension)
        .unwrap_or(LOADER_ORDER.len())
}

/// An archive holding a quest and its linked resources.
///
/// The positions of the quest payload and the link table are
/// looked up once when the archive is opened and refreshed after
/// any operation of this type that changes the entry list.
#[derive(Clone, Debug)]
pub struct QuestArc {
    archive: Archive,
    ordering: EntryOrdering,
    quest_data_index: Option<usize>,
    quest_link_index: Option<usize>,
}

impl QuestArc {
    /// Opens the quest archive at `path` with loader ordering.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        Self::open_with(path, ArchiveConfig::default(), EntryOrdering::Loader)
    }

    /// Opens the quest archive at `path` with custom settings.
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        config: ArchiveConfig,
        ordering: EntryOrdering,
    ) -> Result<Self, ArchiveError> {
        Archive::open_with(path, config).map(|a| Self::from_archive(a, ordering))
    }

    /// Wraps an already loaded archive.
    ///
    /// Missing quest payload or link table entries are logged, but
    /// do not fail; see [`QuestArc::is_valid`].
    pub fn from_archive(archive: Archive, ordering: EntryOrdering) -> Self {
        let mut this = Self {
            archive,
            ordering,
            quest_data_index: None,
            quest_link_index: None,
        };
        this.reindex();

        if this.quest_data_index.is_none() {
            log::error!("Quest data not found in {}", this.archive.path().display());
        }
        if this.quest_link_index.is_none() {
            log::error!("Quest link not found in {}", this.archive.path().display());
        }

        this
    }

    /// The underlying archive.
    #[inline]
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Consumes the quest archive and returns the underlying archive.
    #[inline]
    pub fn into_archive(self) -> Archive {
        self.archive
    }

    /// The ordering policy applied on save.
    #[inline]
    pub fn ordering(&self) -> EntryOrdering {
        self.ordering
    }

    /// Whether both the quest payload and the link table exist.
    pub fn is_valid(&self) -> bool {
        self.quest_data_index().is_some() && self.quest_link_index().is_some()
    }

    fn reindex(&mut self) {
        self.quest_data_index = self.scan(QUEST_DATA_EXTENSION);
        self.quest_link_index = self.scan(QUEST_LINK_EXTENSION);
    }

    fn scan(&self, extension: &str) -> Option<usize> {
        let mut matches = self
            .archive
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.extension() == extension)
            .map(|(i, _)| i);

        let first = matches.next();
        if matches.next().is_some() {
            log::warn!(
                "Multiple {extension} entries in {}, using the first",
                self.archive.path().display()
            );
        }

        first
    }

    // The entry list is reachable mutably through `Container`, so
    // cached positions are checked before they are trusted.
    fn locate(&self, cached: Option<usize>, extension: &str) -> Option<usize> {
        let entries = self.archive.entries();
        match cached {
            Some(i) if entries.get(i).is_some_and(|e| e.extension() == extension) => Some(i),
            _ => entries.iter().position(|e| e.extension() == extension),
        }
    }

    /// Position of the quest payload entry.
    pub fn quest_data_index(&self) -> Option<usize> {
        self.locate(self.quest_data_index, QUEST_DATA_EXTENSION)
    }

    /// Position of the link table entry.
    pub fn quest_link_index(&self) -> Option<usize> {
        self.locate(self.quest_link_index, QUEST_LINK_EXTENSION)
    }

    /// The quest payload entry.
    pub fn quest_data(&self) -> Option<&ArchiveEntry> {
        self.quest_data_index().map(|i| self.archive.entry(i))
    }

    /// The quest payload entry for modification.
    pub fn quest_data_mut(&mut self) -> Option<&mut ArchiveEntry> {
        self.quest_data_index().map(|i| self.archive.entry_mut(i))
    }

    /// The link table entry.
    pub fn quest_link(&self) -> Option<&ArchiveEntry> {
        self.quest_link_index().map(|i| self.archive.entry(i))
    }

    /// The link table entry for modification.
    pub fn quest_link_mut(&mut self) -> Option<&mut ArchiveEntry> {
        self.quest_link_index().map(|i| self.archive.entry_mut(i))
    }

    /// Finds the payload of quest `quest_id` by its path.
    pub fn quest_data_by_id(&self, quest_id: u32) -> Option<&ArchiveEntry> {
        self.find_entry(&paths::quest_data_path(quest_id))
    }

    /// Finds the payload of quest `quest_id` for modification.
    pub fn quest_data_by_id_mut(&mut self, quest_id: u32) -> Option<&mut ArchiveEntry> {
        self.find_entry_mut(&paths::quest_data_path(quest_id))
    }

    /// Finds the text block `name` in `language`.
    pub fn gmd(&self, language: Language, name: &str) -> Option<&ArchiveEntry> {
        self.find_entry(&paths::gmd_path(language, name))
    }

    /// Finds the text block `name` in `language` for modification.
    pub fn gmd_mut(&mut self, language: Language, name: &str) -> Option<&mut ArchiveEntry> {
        self.find_entry_mut(&paths::gmd_path(language, name))
    }

    /// Decompresses and parses the link table.
    pub fn load_link(&self) -> Result<QuestLink, QuestError> {
        let entry = self.quest_link().ok_or(QuestError::Missing("quest link"))?;
        QuestLink::deserialize(&entry.data(true)?)
    }

    /// Serializes `link` and stores it compressed in the link table
    /// entry.
    pub fn store_link(&mut self, link: &QuestLink) -> Result<(), QuestError> {
        let entry = self
            .quest_link_mut()
            .ok_or(QuestError::Missing("quest link"))?;
        entry.set_data(&link.serialize(), true)?;

        Ok(())
    }

    fn add_resource(
        &mut self,
        path: String,
        type_hash: u32,
        data: EntryData<'_>,
    ) -> Result<usize, QuestError> {
        if self.find_entry_index(&path).is_some() {
            log::warn!("Entry {path} already exists");
            return Err(QuestError::Duplicate(path));
        }

        let mut entry = ArchiveEntry::new(path, type_hash, self.archive.config().resolver);
        entry.store(data)?;

        let entries = self.archive.entries_mut();
        entries.push(entry);
        let index = entries.len() - 1;
        self.reindex();

        Ok(index)
    }

    /// Adds the payload of quest `quest_id`.
    ///
    /// Returns the index of the new entry. Fails without touching
    /// the archive when the path is already taken.
    pub fn add_quest_data(
        &mut self,
        quest_id: u32,
        data: EntryData<'_>,
    ) -> Result<usize, QuestError> {
        self.add_resource(paths::quest_data_path(quest_id), ext::QUEST_DATA, data)
    }

    /// Adds the text block `name` in `language`.
    pub fn add_gmd(
        &mut self,
        language: Language,
        name: &str,
        data: EntryData<'_>,
    ) -> Result<usize, QuestError> {
        self.add_resource(paths::gmd_path(language, name), ext::GUI_MESSAGE, data)
    }

    /// Adds the boss spawn point `name`.
    pub fn add_sem(&mut self, name: &str, data: EntryData<'_>) -> Result<usize, QuestError> {
        self.add_resource(paths::boss_set_path(name), ext::SET_EM_MAIN, data)
    }

    /// Adds reward table `rem_id`.
    pub fn add_rem(&mut self, rem_id: u32, data: EntryData<'_>) -> Result<usize, QuestError> {
        self.add_resource(paths::rem_path(rem_id), ext::REM, data)
    }

    /// Adds spawn list `esl_id` of map `map_id`.
    pub fn add_esl(
        &mut self,
        map_id: u32,
        esl_id: u32,
        data: EntryData<'_>,
    ) -> Result<usize, QuestError> {
        self.add_resource(paths::esl_path(map_id, esl_id), ext::EM_SET_LIST, data)
    }

    /// Sorts entries into the loader's group order.
    ///
    /// Entries keep their relative order within a group. Entries of
    /// other types end up behind the last group.
    pub fn sort_for_loader(&mut self) {
        self.archive
            .entries_mut()
            .sort_by_key(|e| loader_rank(e.extension()));
        self.reindex();
    }
}

impl Container for QuestArc {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        QuestArc::open(path)
    }

    #[inline]
    fn config(&self) -> &ArchiveConfig {
        self.archive.config()
    }

    #[inline]
    fn entries(&self) -> &[ArchiveEntry] {
        self.archive.entries()
    }

    #[inline]
    fn entries_mut(&mut self) -> &mut Vec<ArchiveEntry> {
        self.archive.entries_mut()
    }

    /// Writes the archive to disk, sorting entries first when the
    /// ordering policy asks for it.
    fn save(&mut self, path: Option<&Path>) -> Result<(), ArchiveError> {
        if self.ordering == EntryOrdering::Loader {
            if self.archive.len() < MIN_EXPECTED_ENTRIES {
                log::warn!(
                    "Quest archive has only {} entries, expected at least {MIN_EXPECTED_ENTRIES}",
                    self.archive.len()
                );
            }

            self.sort_for_loader();
        }

        self.archive.save(path)
    }
}
