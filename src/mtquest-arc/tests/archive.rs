use mtquest_arc::{
    ext, types, Archive, ArchiveConfig, ArchiveEntry, ArchiveError, Container, EntryData,
};

fn sample_archive(config: ArchiveConfig) -> Result<Archive, ArchiveError> {
    let mut archive = Archive::with_config("sample.arc", config);

    archive.add_entry(
        r"loc\quest\questData\questData_0001234",
        "rQuestData",
        EntryData::Raw(&[7; 200]),
    )?;
    archive.add_entry(
        r"quest\rem\rem_000000",
        "rRem",
        EntryData::Compressed {
            data: b"stored verbatim",
            real_size: 0,
        },
    )?;
    archive.add_entry(r"misc\unknown", "rSomethingElse", EntryData::Raw(b""))?;

    Ok(archive)
}

#[test]
fn round_trip() -> Result<(), ArchiveError> {
    let archive = sample_archive(ArchiveConfig::default())?;
    let buf = archive.to_vec()?;

    let parsed = Archive::from_slice(&buf, ArchiveConfig::default())?;
    assert_eq!(parsed.entries(), archive.entries());

    Ok(())
}

#[test]
fn round_trip_legacy_alignment() -> Result<(), ArchiveError> {
    let archive = sample_archive(ArchiveConfig::legacy())?;
    let buf = archive.to_vec()?;

    let offsets = archive.data_offsets()?;
    assert_eq!(offsets[0], 0x8000);

    let parsed = Archive::from_slice(&buf, ArchiveConfig::legacy())?;
    assert_eq!(parsed.entries(), archive.entries());

    Ok(())
}

#[test]
fn packed_size_boundaries() -> Result<(), ArchiveError> {
    let mut archive = Archive::new("bounds.arc");

    let cases = [
        (0, 0),
        (7, types::MAX_REAL_SIZE),
        (7, 0),
        (0, types::MAX_REAL_SIZE),
    ];
    for (quality, real_size) in cases {
        let entry = archive.add_entry(
            &format!(r"bounds\q{quality}_{real_size}"),
            "rTexture",
            EntryData::Compressed {
                data: &[1, 2, 3],
                real_size: 0,
            },
        )?;
        entry.set_real_size(real_size)?;
        entry.set_quality(quality)?;
    }

    let parsed = Archive::from_slice(&archive.to_vec()?, ArchiveConfig::default())?;
    assert_eq!(parsed.entries(), archive.entries());

    let last = parsed.entry(1);
    assert_eq!(last.quality(), 7);
    assert_eq!(last.real_size(), types::MAX_REAL_SIZE);

    Ok(())
}

#[test]
fn offsets_match_data() -> Result<(), ArchiveError> {
    let archive = sample_archive(ArchiveConfig::default())?;
    let buf = archive.to_vec()?;
    let offsets = archive.data_offsets()?;

    assert_eq!(
        u64::from(offsets[0]),
        mtquest_utils::align::align_up(
            types::HEADER_SIZE + 3 * types::DESCRIPTOR_SIZE,
            types::DATA_ALIGNMENT
        )
    );

    for (entry, offset) in archive.entries().iter().zip(offsets) {
        let start = offset as usize;
        let end = start + entry.compressed_size() as usize;
        assert_eq!(&buf[start..end], entry.raw_data());
    }

    Ok(())
}

#[test]
fn stored_data_survives() -> Result<(), ArchiveError> {
    let archive = sample_archive(ArchiveConfig::default())?;
    let parsed = Archive::from_slice(&archive.to_vec()?, ArchiveConfig::default())?;

    let payload = parsed
        .find_entry(r"loc\quest\questData\questData_0001234")
        .unwrap();
    assert_eq!(payload.extension(), ".ext");
    assert_eq!(payload.data(true)?.as_ref(), &[7; 200][..]);

    let rem = parsed.find_entry(r"quest\rem\rem_000000").unwrap();
    assert_eq!(rem.compressed_size(), rem.real_size());
    assert_eq!(rem.data(false)?.as_ref(), b"stored verbatim");

    let unknown = parsed.find_entry(r"misc\unknown").unwrap();
    assert_eq!(unknown.extension(), "");
    assert!(unknown.data(true)?.is_empty());

    Ok(())
}

#[test]
fn find_is_literal() -> Result<(), ArchiveError> {
    let archive = sample_archive(ArchiveConfig::default())?;

    assert!(archive.find_entry(r"QUEST\REM\REM_000000").is_none());
    assert!(archive.find_entry("quest/rem/rem_000000").is_none());
    assert_eq!(archive.find_entry_index(r"quest\rem\rem_000000"), Some(1));

    Ok(())
}

#[test]
#[should_panic]
fn entry_out_of_range() {
    let archive = Archive::new("empty.arc");
    archive.entry(0);
}

#[test]
fn long_paths_are_truncated() -> Result<(), ArchiveError> {
    let mut archive = Archive::new("long.arc");
    archive.add_entry(&"a".repeat(70), "rTexture", EntryData::Raw(b"x"))?;
    archive.add_entry(&"é".repeat(40), "rTexture", EntryData::Raw(b"y"))?;

    let parsed = Archive::from_slice(&archive.to_vec()?, ArchiveConfig::default())?;
    assert_eq!(parsed.entry(0).path, "a".repeat(63));
    assert_eq!(parsed.entry(1).path, "é".repeat(31));

    Ok(())
}

#[test]
fn bad_magic() {
    let mut buf = sample_archive(ArchiveConfig::default())
        .unwrap()
        .to_vec()
        .unwrap();
    buf[0] = b'X';

    assert!(matches!(
        Archive::from_slice(&buf, ArchiveConfig::default()),
        Err(ArchiveError::Magic(_))
    ));
}

#[test]
fn bad_version() {
    let mut buf = sample_archive(ArchiveConfig::default())
        .unwrap()
        .to_vec()
        .unwrap();
    buf[4] = 0x10;

    assert!(matches!(
        Archive::from_slice(&buf, ArchiveConfig::default()),
        Err(ArchiveError::Version(0x10))
    ));
}

#[test]
fn truncated_stream() {
    let buf = sample_archive(ArchiveConfig::default())
        .unwrap()
        .to_vec()
        .unwrap();

    assert!(matches!(
        Archive::from_slice(&buf[..buf.len() - 1], ArchiveConfig::default()),
        Err(ArchiveError::Io(_))
    ));
    assert!(matches!(
        Archive::from_slice(&buf[..40], ArchiveConfig::default()),
        Err(ArchiveError::Io(_))
    ));
}

#[test]
fn invalid_alignment() {
    let config = ArchiveConfig {
        alignment: 24,
        ..Default::default()
    };
    let archive = Archive::with_config("odd.arc", config);

    assert!(matches!(archive.to_vec(), Err(ArchiveError::Alignment(24))));
}

#[test]
fn save_and_open() -> Result<(), ArchiveError> {
    let dir = tempfile::tempdir()?;
    let mut archive = sample_archive(ArchiveConfig::default())?;

    let path = dir.path().join("quest.arc");
    archive.save(Some(&path))?;
    assert_eq!(archive.path(), path);

    let mut opened = Archive::open(&path)?;
    assert_eq!(opened.entries(), archive.entries());

    // Saving again in place must be idempotent.
    opened.save(None)?;
    let reopened = Archive::open(&path)?;
    assert_eq!(reopened.entries(), archive.entries());

    Ok(())
}

#[test]
fn open_requires_extension() {
    assert!(matches!(
        Archive::open("quest.pak"),
        Err(ArchiveError::Extension(_))
    ));
}

#[test]
fn entry_limits() {
    let mut entry = ArchiveEntry::new("limits", ext::TEXTURE, Default::default());

    assert!(matches!(
        entry.set_quality(8),
        Err(ArchiveError::InvalidQuality(8))
    ));
    assert!(matches!(
        entry.set_real_size(types::MAX_REAL_SIZE + 1),
        Err(ArchiveError::EntryTooLarge(_))
    ));
    assert!(entry.set_real_size(types::MAX_REAL_SIZE).is_ok());
}

#[test]
fn set_data_bookkeeping() -> Result<(), ArchiveError> {
    let mut entry = ArchiveEntry::new("bookkeeping", ext::REM, Default::default());
    assert_eq!(entry.extension(), ".rem");

    entry.set_data(&[0; 512], true)?;
    assert_eq!(entry.real_size(), 512);
    assert_eq!(entry.compressed_size() as usize, entry.raw_data().len());
    assert!(entry.compressed_size() < 512);

    entry.set_data(b"plain", false)?;
    assert_eq!(entry.real_size(), 5);
    assert_eq!(entry.compressed_size(), 5);
    assert_eq!(entry.raw_data(), b"plain");

    Ok(())
}

#[test]
fn corrupt_data_fails_to_decompress() -> Result<(), ArchiveError> {
    let mut entry = ArchiveEntry::new("corrupt", ext::REM, Default::default());
    entry.set_data(&[1; 64], true)?;

    // Claim a different size than what the stream inflates to.
    entry.set_real_size(63)?;
    assert!(matches!(entry.data(true), Err(ArchiveError::Zlib(_))));

    entry.set_real_size(65)?;
    assert!(matches!(entry.data(true), Err(ArchiveError::Zlib(_))));

    Ok(())
}

#[test]
fn entry_count_must_fit_header() -> Result<(), ArchiveError> {
    let mut archive = Archive::new("crowded.arc");
    let empty = EntryData::Compressed {
        data: &[],
        real_size: 0,
    };

    for i in 0..=i16::MAX as usize {
        archive.add_entry(&format!(r"crowded\{i:05}"), "rTexture", empty)?;
    }

    assert_eq!(archive.len(), i16::MAX as usize + 1);
    assert!(matches!(
        archive.to_vec(),
        Err(ArchiveError::TooManyEntries(32768))
    ));

    // Dropping back to the limit makes the archive writable again.
    archive.entries_mut().pop();
    let buf = archive.to_vec()?;
    assert_eq!(&buf[6..8], &i16::MAX.to_le_bytes());

    Ok(())
}

#[test]
fn offsets_must_fit_32_bits() -> Result<(), ArchiveError> {
    let config = ArchiveConfig {
        alignment: 1 << 32,
        ..Default::default()
    };
    let mut archive = Archive::with_config("huge.arc", config);
    archive.add_entry(r"huge\entry", "rTexture", EntryData::Raw(b"data"))?;

    assert!(matches!(
        archive.data_offsets(),
        Err(ArchiveError::ArchiveTooLarge(0x1_0000_0000))
    ));
    assert!(matches!(
        archive.to_vec(),
        Err(ArchiveError::ArchiveTooLarge(_))
    ));

    Ok(())
}
