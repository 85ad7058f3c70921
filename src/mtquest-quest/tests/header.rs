use mtquest_quest::{
    link::ResourceKind, validate_payload, QuestError, VersionedHeader, BOSS_SET_VERSION,
    ESL_MAGIC, ESL_VERSION, REM_VERSION,
};

fn versioned(version: u32, count: i32) -> Vec<u8> {
    let mut out = Vec::new();
    VersionedHeader { version, count }.write(&mut out).unwrap();
    out
}

#[test]
fn accepts_known_headers() -> Result<(), QuestError> {
    validate_payload(ResourceKind::Rem, &versioned(REM_VERSION, 1))?;
    validate_payload(ResourceKind::BossSet, &versioned(BOSS_SET_VERSION, 1))?;
    validate_payload(ResourceKind::BossSet, &versioned(BOSS_SET_VERSION, 0))?;

    let mut esl = ESL_MAGIC.to_le_bytes().to_vec();
    esl.extend_from_slice(&ESL_VERSION.to_le_bytes());
    validate_payload(ResourceKind::EmSetList, &esl)?;

    // Supply lists and quest plus parameters carry no checked header.
    validate_payload(ResourceKind::Supply, b"")?;
    validate_payload(ResourceKind::Plus, b"")?;

    Ok(())
}

#[test]
fn rejects_boss_set_mismatches() {
    assert!(matches!(
        validate_payload(ResourceKind::BossSet, &versioned(0x4000_0000, 1)),
        Err(QuestError::Version {
            found: 0x4000_0000,
            ..
        })
    ));
    assert!(matches!(
        validate_payload(ResourceKind::BossSet, &versioned(BOSS_SET_VERSION, 3)),
        Err(QuestError::Count { count: 3, .. })
    ));
    assert!(matches!(
        validate_payload(ResourceKind::Rem, &[0; 4]),
        Err(QuestError::Io(_))
    ));
}
