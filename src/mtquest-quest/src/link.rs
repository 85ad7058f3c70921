//! The quest link table.
//!
//! A quest does not reference its spawn and reward resources by
//! path. Instead, a fixed table of slots names a type hash and a
//! short file name for each role, and the conventional path of the
//! role turns that into an archive entry. Slots may be unused (type
//! hash zero) or name an "empty" sentinel file which exists in the
//! archive but never carries content.

use std::{fmt, io};

use mtquest_arc::{ext, Container};
use mtquest_utils::binary;

use crate::{paths, QuestError, VersionedHeader, LINK_VERSION};

/// The number of boss spawn point slots.
pub const BOSS_SET_SLOTS: usize = 5;
/// The number of spawn list slots.
pub const EM_SET_LIST_SLOTS: usize = 3;
/// The number of main reward slots.
pub const REM_MAIN_SLOTS: usize = 2;
/// The number of additional reward slots.
pub const REM_ADD_SLOTS: usize = 2;

/// The byte size of the file name field of a slot.
pub const FILE_NAME_LEN: usize = 16;

/// The categories of resources a link slot may point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Boss spawn point, `rSetEmMain`.
    BossSet,
    /// Small monster spawn list, `rEmSetList`.
    EmSetList,
    /// Reward table, `rRem`.
    Rem,
    /// Supply box contents, `rSupplyList`.
    Supply,
    /// Additional quest parameters, `rQuestPlus`.
    Plus,
}

impl ResourceKind {
    /// Gets the kind of resource with the given type hash.
    pub fn from_type_hash(type_hash: u32) -> Option<Self> {
        match type_hash {
            ext::SET_EM_MAIN => Some(Self::BossSet),
            ext::EM_SET_LIST => Some(Self::EmSetList),
            ext::REM => Some(Self::Rem),
            ext::SUPPLY_LIST => Some(Self::Supply),
            ext::QUEST_PLUS => Some(Self::Plus),
            _ => None,
        }
    }

    /// The type hash of the resource class.
    pub fn type_hash(self) -> u32 {
        match self {
            Self::BossSet => ext::SET_EM_MAIN,
            Self::EmSetList => ext::EM_SET_LIST,
            Self::Rem => ext::REM,
            Self::Supply => ext::SUPPLY_LIST,
            Self::Plus => ext::QUEST_PLUS,
        }
    }

    /// The name of the resource class.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::BossSet => "rSetEmMain",
            Self::EmSetList => "rEmSetList",
            Self::Rem => "rRem",
            Self::Supply => "rSupplyList",
            Self::Plus => "rQuestPlus",
        }
    }

    /// The file name of the permanently empty placeholder entry
    /// for this kind, if it has one.
    pub fn sentinel(self) -> Option<&'static str> {
        match self {
            Self::BossSet => Some("b_m00em000_00"),
            Self::EmSetList => Some("z_m00d_000"),
            Self::Rem => Some("rem_000000"),
            Self::Supply | Self::Plus => None,
        }
    }

    /// The archive path of the resource with file name `name`.
    pub fn entry_path(self, name: &str) -> String {
        match self {
            Self::BossSet => paths::boss_set_path(name),
            Self::EmSetList => paths::esl_path_named(name),
            Self::Rem => paths::rem_path_named(name),
            Self::Supply => paths::supply_path(name),
            Self::Plus => paths::plus_path(name),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BossSet => "BossSet",
            Self::EmSetList => "EmSetList",
            Self::Rem => "Rem",
            Self::Supply => "Supply",
            Self::Plus => "Plus",
        })
    }
}

/// One slot of the link table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkResource {
    /// The type hash of the linked resource, zero when unused.
    pub type_hash: u32,
    /// The NUL-padded file name of the linked resource.
    pub file: [u8; FILE_NAME_LEN],
}

impl LinkResource {
    /// The byte size of a slot.
    pub const SIZE: usize = 4 + FILE_NAME_LEN;

    fn parse<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let type_hash = binary::uint32(reader)?;
        let mut file = [0; FILE_NAME_LEN];
        reader.read_exact(&mut file)?;

        Ok(Self { type_hash, file })
    }

    fn write<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        binary::write_uint32(writer, self.type_hash)?;
        writer.write_all(&self.file)
    }

    /// The file name stored in the slot.
    pub fn file_name(&self) -> String {
        binary::fixed_str_from_bytes(&self.file)
    }

    /// Replaces the file name stored in the slot.
    ///
    /// Names longer than 15 bytes do not fit and are truncated.
    pub fn set_file_name(&mut self, name: &str) {
        if name.len() >= FILE_NAME_LEN {
            log::warn!("Link file name '{name}' is too long and will be truncated");
        }
        self.file = binary::fixed_str_to_bytes(name);
    }

    /// The kind of resource the slot's type hash refers to.
    pub fn kind(&self) -> Option<ResourceKind> {
        ResourceKind::from_type_hash(self.type_hash)
    }

    /// Whether no resource is configured for this slot.
    pub fn is_unset(&self) -> bool {
        self.type_hash == 0
    }

    /// Whether the slot carries no meaningful resource.
    ///
    /// This holds for unused slots and slots naming their kind's
    /// empty sentinel. Slots with an unknown type hash are reported
    /// as not empty.
    pub fn is_empty_resource(&self) -> bool {
        if self.is_unset() {
            return true;
        }

        match self.kind() {
            Some(kind) => kind
                .sentinel()
                .is_some_and(|sentinel| self.file_name() == sentinel),
            None => {
                log::warn!("Unknown quest link type hash: 0x{:08X}", self.type_hash);
                false
            }
        }
    }

    /// Points the slot at the empty sentinel of its kind.
    ///
    /// Slots with an unknown type hash, or of a kind without a
    /// sentinel, are left untouched.
    pub fn clear(&mut self) {
        match self.kind().and_then(|kind| kind.sentinel()) {
            Some(sentinel) => self.set_file_name(sentinel),
            None => log::warn!("Invalid type hash: 0x{:08X}", self.type_hash),
        }
    }

    fn set(&mut self, kind: ResourceKind, name: &str) {
        self.type_hash = kind.type_hash();
        self.set_file_name(name);
    }

    /// Points the slot at the boss spawn point `name`.
    pub fn set_boss_set(&mut self, name: &str) {
        self.set(ResourceKind::BossSet, name);
    }

    /// Points the slot at the spawn list `name`.
    pub fn set_esl(&mut self, name: &str) {
        self.set(ResourceKind::EmSetList, name);
    }

    /// Points the slot at spawn list `esl_id` of map `map_id`.
    pub fn set_esl_id(&mut self, map_id: u32, esl_id: u32) {
        self.set_esl(&paths::esl_name(map_id, esl_id));
    }

    /// Points the slot at the reward table `name`.
    pub fn set_rem(&mut self, name: &str) {
        self.set(ResourceKind::Rem, name);
    }

    /// Points the slot at reward table `rem_id`.
    pub fn set_rem_id(&mut self, rem_id: u32) {
        self.set_rem(&paths::rem_name(rem_id));
    }
}

/// Identifies one slot of a [`QuestLink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkSlot {
    BossSet(usize),
    EmSetList(usize),
    RemMain(usize),
    RemAdd(usize),
    RemSub,
    Supply,
    Plus,
}

impl LinkSlot {
    /// All slots in table order.
    pub const ALL: [LinkSlot; 15] = [
        Self::BossSet(0),
        Self::BossSet(1),
        Self::BossSet(2),
        Self::BossSet(3),
        Self::BossSet(4),
        Self::EmSetList(0),
        Self::EmSetList(1),
        Self::EmSetList(2),
        Self::RemMain(0),
        Self::RemMain(1),
        Self::RemAdd(0),
        Self::RemAdd(1),
        Self::RemSub,
        Self::Supply,
        Self::Plus,
    ];

    /// The kind of resource the slot's role expects.
    pub fn kind(self) -> ResourceKind {
        match self {
            Self::BossSet(_) => ResourceKind::BossSet,
            Self::EmSetList(_) => ResourceKind::EmSetList,
            Self::RemMain(_) | Self::RemAdd(_) | Self::RemSub => ResourceKind::Rem,
            Self::Supply => ResourceKind::Supply,
            Self::Plus => ResourceKind::Plus,
        }
    }
}

impl fmt::Display for LinkSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BossSet(i) => write!(f, "BossSet[{i}]"),
            Self::EmSetList(i) => write!(f, "EmSetList[{i}]"),
            Self::RemMain(i) => write!(f, "RemMain[{i}]"),
            Self::RemAdd(i) => write!(f, "RemAdd[{i}]"),
            Self::RemSub => f.write_str("RemSub"),
            Self::Supply => f.write_str("Supply"),
            Self::Plus => f.write_str("Plus"),
        }
    }
}

/// Entry indices produced by [`QuestLink::resolve`].
///
/// Indices refer to the entry list of the container that was
/// resolved against. They are a snapshot: inserting, removing or
/// reordering entries afterwards invalidates all of them, and no
/// attempt is made to detect that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLinks {
    pub boss_sets: [Option<usize>; BOSS_SET_SLOTS],
    pub em_set_lists: [Option<usize>; EM_SET_LIST_SLOTS],
    pub rem_main: [Option<usize>; REM_MAIN_SLOTS],
    pub rem_add: [Option<usize>; REM_ADD_SLOTS],
    pub rem_sub: Option<usize>,
    pub supply: Option<usize>,
    pub plus: Option<usize>,
}

impl ResolvedLinks {
    /// Gets the resolved entry index for `slot`.
    ///
    /// # Panics
    ///
    /// Panics when the slot's array index is out of range.
    pub fn get(&self, slot: LinkSlot) -> Option<usize> {
        match slot {
            LinkSlot::BossSet(i) => self.boss_sets[i],
            LinkSlot::EmSetList(i) => self.em_set_lists[i],
            LinkSlot::RemMain(i) => self.rem_main[i],
            LinkSlot::RemAdd(i) => self.rem_add[i],
            LinkSlot::RemSub => self.rem_sub,
            LinkSlot::Supply => self.supply,
            LinkSlot::Plus => self.plus,
        }
    }
}

/// The quest link table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuestLink {
    pub boss_sets: [LinkResource; BOSS_SET_SLOTS],
    pub em_set_lists: [LinkResource; EM_SET_LIST_SLOTS],
    pub rem_main: [LinkResource; REM_MAIN_SLOTS],
    pub rem_add: [LinkResource; REM_ADD_SLOTS],
    pub rem_sub: LinkResource,
    pub supply: LinkResource,
    pub plus: LinkResource,
}

impl QuestLink {
    /// The byte size of the table, without its header.
    pub const SIZE: usize = LinkSlot::ALL.len() * LinkResource::SIZE;

    /// Parses a link table payload from decompressed entry bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self, QuestError> {
        Self::parse(&mut io::Cursor::new(data))
    }

    /// Parses a link table payload off the given [`Read`](io::Read)er.
    pub fn parse<R: io::Read>(reader: &mut R) -> Result<Self, QuestError> {
        VersionedHeader::parse(reader)?.validate("quest link", LINK_VERSION)?;

        let mut link = Self::default();
        for slot in LinkSlot::ALL {
            *link.slot_mut(slot) = LinkResource::parse(reader)?;
        }

        Ok(link)
    }

    /// Serializes the table, including its header.
    pub fn serialize(&self) -> Vec<u8> {
        let header = VersionedHeader::single(LINK_VERSION);

        let mut out = Vec::with_capacity(VersionedHeader::SIZE + Self::SIZE);
        out.extend_from_slice(&header.version.to_le_bytes());
        out.extend_from_slice(&header.count.to_le_bytes());
        for (_, res) in self.slots() {
            out.extend_from_slice(&res.type_hash.to_le_bytes());
            out.extend_from_slice(&res.file);
        }

        out
    }

    /// Writes the table, including its header, to the given
    /// [`Write`](io::Write)r.
    pub fn write<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        VersionedHeader::single(LINK_VERSION).write(writer)?;
        self.slots().try_for_each(|(_, res)| res.write(writer))
    }

    /// Gets the resource in `slot`.
    ///
    /// # Panics
    ///
    /// Panics when the slot's array index is out of range.
    pub fn slot(&self, slot: LinkSlot) -> &LinkResource {
        match slot {
            LinkSlot::BossSet(i) => &self.boss_sets[i],
            LinkSlot::EmSetList(i) => &self.em_set_lists[i],
            LinkSlot::RemMain(i) => &self.rem_main[i],
            LinkSlot::RemAdd(i) => &self.rem_add[i],
            LinkSlot::RemSub => &self.rem_sub,
            LinkSlot::Supply => &self.supply,
            LinkSlot::Plus => &self.plus,
        }
    }

    /// Gets the resource in `slot` for modification.
    ///
    /// # Panics
    ///
    /// Panics when the slot's array index is out of range.
    pub fn slot_mut(&mut self, slot: LinkSlot) -> &mut LinkResource {
        match slot {
            LinkSlot::BossSet(i) => &mut self.boss_sets[i],
            LinkSlot::EmSetList(i) => &mut self.em_set_lists[i],
            LinkSlot::RemMain(i) => &mut self.rem_main[i],
            LinkSlot::RemAdd(i) => &mut self.rem_add[i],
            LinkSlot::RemSub => &mut self.rem_sub,
            LinkSlot::Supply => &mut self.supply,
            LinkSlot::Plus => &mut self.plus,
        }
    }

    /// Iterates over all slots in table order.
    pub fn slots(&self) -> impl Iterator<Item = (LinkSlot, &LinkResource)> + '_ {
        LinkSlot::ALL.into_iter().map(move |slot| (slot, self.slot(slot)))
    }

    /// Resolves every slot to an entry of `arc`.
    ///
    /// Slots resolve to [`None`] when they are unused, when their
    /// entry is missing, or when they name their kind's sentinel,
    /// even though the sentinel entry exists. Each slot is resolved
    /// on its own; a missing entry does not affect the others.
    pub fn resolve<C: Container>(&self, arc: &C) -> ResolvedLinks {
        let mut resolved = ResolvedLinks::default();

        for (slot, res) in self.slots() {
            let index = resolve_slot(arc, slot.kind(), res);
            match slot {
                LinkSlot::BossSet(i) => resolved.boss_sets[i] = index,
                LinkSlot::EmSetList(i) => resolved.em_set_lists[i] = index,
                LinkSlot::RemMain(i) => resolved.rem_main[i] = index,
                LinkSlot::RemAdd(i) => resolved.rem_add[i] = index,
                LinkSlot::RemSub => resolved.rem_sub = index,
                LinkSlot::Supply => resolved.supply = index,
                LinkSlot::Plus => resolved.plus = index,
            }
        }

        resolved
    }
}

fn resolve_slot<C: Container>(arc: &C, kind: ResourceKind, res: &LinkResource) -> Option<usize> {
    if res.is_unset() {
        return None;
    }

    let name = res.file_name();
    let Some(index) = arc.find_entry_index(&kind.entry_path(&name)) else {
        log::error!("Failed to resolve {kind} {:08X} {name}", res.type_hash);
        return None;
    };

    // Sentinels are real entries, but always empty.
    if kind.sentinel() == Some(name.as_str()) {
        None
    } else {
        Some(index)
    }
}
