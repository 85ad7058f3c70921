//! Classification of archive entries by their type hash.
//!
//! Entries in an ARC container carry no file extension on disk.
//! The conventional extension is derived from the type hash, which
//! is [`type_hash`] applied to the name of the resource class.
//!
//! [`type_hash`]: mtquest_utils::hash::type_hash

use phf::phf_map;

/// Type hash of `rQuestData`, the quest payload.
pub const QUEST_DATA: u32 = 0x1BBF_D18E;
/// Type hash of `rQuestDataLink`, the quest link table.
pub const QUEST_DATA_LINK: u32 = 0x5F2F_0C47;
/// Type hash of `rGUIMessage`, a localized text block.
pub const GUI_MESSAGE: u32 = 0x242B_B29A;
/// Type hash of `rRem`, a reward table.
pub const REM: u32 = 0x5B3C_302D;
/// Type hash of `rEmSetList`, a small monster spawn list.
pub const EM_SET_LIST: u32 = 0x32CA_92F8;
/// Type hash of `rSetEmMain`, a boss spawn point.
pub const SET_EM_MAIN: u32 = 0x2553_701D;
/// Type hash of `rSupplyList`, the supply box contents.
pub const SUPPLY_LIST: u32 = 0x5453_9AEE;
/// Type hash of `rQuestPlus`, additional quest parameters.
pub const QUEST_PLUS: u32 = 0x26BE_C21C;
/// Type hash of `rTexture`.
pub const TEXTURE: u32 = 0x241F_5DEB;

/// The extension table shipped with the library.
pub static KNOWN_EXTENSIONS: phf::Map<u32, &'static str> = phf_map! {
    0x1BBFD18Eu32 => ".ext",
    0x5F2F0C47u32 => ".qdl",
    0x242BB29Au32 => ".gmd",
    0x5B3C302Du32 => ".rem",
    0x32CA92F8u32 => ".esl",
    0x2553701Du32 => ".sem",
    0x54539AEEu32 => ".sup",
    0x26BEC21Cu32 => ".qdp",
    0x241F5DEBu32 => ".tex",
};

/// Maps type hashes to file extensions.
///
/// The resolver borrows an immutable table for the lifetime of the
/// process, so copies of it are free to pass around.
#[derive(Clone, Copy)]
pub struct ExtensionResolver {
    table: &'static phf::Map<u32, &'static str>,
}

impl ExtensionResolver {
    /// Creates a resolver over the given table.
    pub const fn new(table: &'static phf::Map<u32, &'static str>) -> Self {
        Self { table }
    }

    /// Gets the extension for `type_hash`, including the leading dot.
    ///
    /// Unknown hashes resolve to an empty string. Plenty of entries
    /// are of types this library has no interest in.
    pub fn resolve(&self, type_hash: u32) -> &'static str {
        self.table.get(&type_hash).copied().unwrap_or("")
    }
}

impl Default for ExtensionResolver {
    fn default() -> Self {
        Self::new(&KNOWN_EXTENSIONS)
    }
}

impl std::fmt::Debug for ExtensionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionResolver")
            .field("known", &self.table.len())
            .finish()
    }
}

/// Resolves `type_hash` through the built-in table.
#[inline]
pub fn resolve(type_hash: u32) -> &'static str {
    ExtensionResolver::default().resolve(type_hash)
}
