use std::io;

use mtquest_utils::binary;

use crate::{link::ResourceKind, QuestError};

/// Version of the quest link table payload.
pub const LINK_VERSION: u32 = 0x434B_0000;

/// Version of reward table payloads.
pub const REM_VERSION: u32 = 0x3F80_0000;

/// Version of boss spawn point payloads.
pub const BOSS_SET_VERSION: u32 = 0x3F80_0000;

/// Magic of spawn list payloads, `"esl\0"`.
pub const ESL_MAGIC: u32 = 0x006C_7365;

/// Version of spawn list payloads.
pub const ESL_VERSION: u32 = 2;

/// The header in front of link, reward and spawn payloads.
///
/// It is followed by `count` fixed-size records. Every payload in
/// circulation holds exactly one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionedHeader {
    /// The format version of the records.
    pub version: u32,
    /// The number of records that follow.
    pub count: i32,
}

impl VersionedHeader {
    /// The byte size of the header.
    pub const SIZE: usize = 8;

    /// Creates a header for a single record of `version`.
    pub const fn single(version: u32) -> Self {
        Self { version, count: 1 }
    }

    /// Parses the header off the given [`Read`](io::Read)er.
    pub fn parse<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            version: binary::uint32(reader)?,
            count: binary::int32(reader)?,
        })
    }

    /// Writes the header to the given [`Write`](io::Write)r.
    pub fn write<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        binary::write_uint32(writer, self.version)?;
        binary::write_int32(writer, self.count)
    }

    /// Checks that the header describes at most one record of
    /// the `expected` version.
    ///
    /// `what` names the payload in errors and log messages.
    pub fn validate(&self, what: &'static str, expected: u32) -> Result<(), QuestError> {
        if self.version != expected {
            log::error!("Invalid {what} version {:08X}", self.version);
            return Err(QuestError::Version {
                what,
                found: self.version,
            });
        }

        if self.count > 1 {
            log::error!("Multiple records per {what} resource are not supported");
            return Err(QuestError::Count {
                what,
                count: self.count,
            });
        }

        Ok(())
    }
}

/// Checks the header of a `kind` payload before it is stored.
///
/// Reward tables and boss spawn points start with a
/// [`VersionedHeader`], spawn lists with their own magic and version.
/// Other kinds are not checked.
pub fn validate_payload(kind: ResourceKind, data: &[u8]) -> Result<(), QuestError> {
    let mut reader = io::Cursor::new(data);

    match kind {
        ResourceKind::Rem => {
            VersionedHeader::parse(&mut reader)?.validate("reward table", REM_VERSION)
        }
        ResourceKind::BossSet => {
            VersionedHeader::parse(&mut reader)?.validate("boss spawn point", BOSS_SET_VERSION)
        }
        ResourceKind::EmSetList => {
            if let Err(found) = binary::magic(&mut reader, ESL_MAGIC)? {
                log::error!("Invalid magic for spawn list {found:08X}");
                return Err(QuestError::Magic {
                    what: "spawn list",
                    found,
                });
            }

            let version = binary::uint32(&mut reader)?;
            if version != ESL_VERSION {
                log::error!("Invalid spawn list version {version:08X}");
                return Err(QuestError::Version {
                    what: "spawn list",
                    found: version,
                });
            }

            Ok(())
        }
        ResourceKind::Supply | ResourceKind::Plus => Ok(()),
    }
}
