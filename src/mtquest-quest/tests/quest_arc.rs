use mtquest_arc::{Archive, ArchiveConfig, Container, EntryData};
use mtquest_quest::{
    link::QuestLink, paths, EntryOrdering, Language, QuestArc, QuestError, LOADER_ORDER,
};

const LINK_PATH: &str = r"loc\quest\questLink\questLink_0001234";

fn scrambled_archive(path: &std::path::Path) -> Result<Archive, QuestError> {
    let mut archive = Archive::new(path);
    let payload = EntryData::Raw(b"payload");

    archive.add_entry(&paths::quest_data_path(1234), "rQuestData", payload)?;
    archive.add_entry(&paths::gmd_path(Language::English, "1234"), "rGUIMessage", payload)?;
    archive.add_entry(&paths::rem_path(900001), "rRem", payload)?;
    archive.add_entry(r"misc\icon", "rTexture", payload)?;
    let link = QuestLink::default().serialize();
    archive.add_entry(LINK_PATH, "rQuestDataLink", EntryData::Raw(&link))?;
    archive.add_entry(&paths::boss_set_path("b_m01em001_00"), "rSetEmMain", payload)?;
    archive.add_entry(&paths::rem_path(900002), "rRem", payload)?;
    archive.add_entry(&paths::supply_path("m01234"), "rSupplyList", payload)?;
    archive.add_entry(&paths::esl_path(1, 500), "rEmSetList", payload)?;
    archive.add_entry(&paths::plus_path("m01234"), "rQuestPlus", payload)?;

    Ok(archive)
}

fn scrambled_quest() -> Result<QuestArc, QuestError> {
    let archive = scrambled_archive("m01234.arc".as_ref())?;
    Ok(QuestArc::from_archive(archive, EntryOrdering::Loader))
}

fn extensions(arc: &impl Container) -> Vec<&'static str> {
    arc.entries().iter().map(|e| e.extension()).collect()
}

#[test]
fn finds_well_known_entries() -> Result<(), QuestError> {
    let arc = scrambled_quest()?;

    assert!(arc.is_valid());
    assert_eq!(arc.quest_data_index(), Some(0));
    assert_eq!(arc.quest_link_index(), Some(4));
    assert_eq!(
        arc.quest_data().map(|e| e.path.as_str()),
        Some(r"loc\quest\questData\questData_0001234")
    );
    assert!(arc.quest_data_by_id(1234).is_some());
    assert!(arc.quest_data_by_id(4321).is_none());
    assert!(arc.gmd(Language::English, "1234").is_some());
    assert!(arc.gmd(Language::French, "1234").is_none());

    Ok(())
}

#[test]
fn missing_entries_are_reported() {
    let arc = QuestArc::from_archive(Archive::new("empty.arc"), EntryOrdering::Loader);

    assert!(!arc.is_valid());
    assert!(arc.quest_data().is_none());
    assert!(matches!(arc.load_link(), Err(QuestError::Missing(_))));
}

#[test]
fn duplicate_adds_are_rejected() -> Result<(), QuestError> {
    let mut arc = QuestArc::from_archive(Archive::new("dup.arc"), EntryOrdering::Preserve);

    arc.add_rem(900123, EntryData::Raw(b"first"))?;
    let err = arc.add_rem(900123, EntryData::Raw(b"second")).unwrap_err();
    assert!(matches!(err, QuestError::Duplicate(ref path) if path == r"quest\rem\rem_900123"));

    let matching = arc
        .entries()
        .iter()
        .filter(|e| e.path == paths::rem_path(900123))
        .count();
    assert_eq!(matching, 1);
    assert_eq!(arc.entries()[0].data(true)?.as_ref(), b"first");

    assert!(arc.add_quest_data(1, EntryData::Raw(b"")).is_ok());
    assert!(arc.add_quest_data(1, EntryData::Raw(b"")).is_err());
    assert!(arc.add_gmd(Language::Spanish, "1", EntryData::Raw(b"")).is_ok());
    assert!(arc.add_gmd(Language::Spanish, "1", EntryData::Raw(b"")).is_err());
    assert!(arc.add_sem("b_m01em001_00", EntryData::Raw(b"")).is_ok());
    assert!(arc.add_sem("b_m01em001_00", EntryData::Raw(b"")).is_err());
    assert!(arc.add_esl(1, 500, EntryData::Raw(b"")).is_ok());
    assert!(arc.add_esl(1, 500, EntryData::Raw(b"")).is_err());
    assert_eq!(arc.entries().len(), 5);

    Ok(())
}

#[test]
fn added_entries_use_quality_two() -> Result<(), QuestError> {
    let mut arc = QuestArc::from_archive(Archive::new("quality.arc"), EntryOrdering::Preserve);
    let index = arc.add_esl(12, 7, EntryData::Raw(&[1; 64]))?;

    let entry = arc.entry(index);
    assert_eq!(entry.path, r"quest\zako\emSetList\z_m12d_007");
    assert_eq!(entry.extension(), ".esl");
    assert_eq!(entry.quality(), 2);
    assert_eq!(entry.real_size(), 64);
    assert_eq!(entry.data(true)?.as_ref(), &[1; 64][..]);

    Ok(())
}

#[test]
fn loader_order_groups_entries() -> Result<(), QuestError> {
    let mut arc = scrambled_quest()?;
    arc.sort_for_loader();

    assert_eq!(
        extensions(&arc),
        [".sem", ".esl", ".rem", ".rem", ".sup", ".qdp", ".qdl", ".gmd", ".ext", ".tex"]
    );

    // Relative order within a group is kept.
    assert_eq!(arc.entries()[2].path, paths::rem_path(900001));
    assert_eq!(arc.entries()[3].path, paths::rem_path(900002));

    // Cached positions follow the new order.
    assert_eq!(arc.quest_link_index(), Some(6));
    assert_eq!(arc.quest_data_index(), Some(8));

    assert_eq!(
        LOADER_ORDER,
        [".sem", ".esl", ".rem", ".sup", ".qdp", ".qdl", ".gmd", ".ext"]
    );

    Ok(())
}

#[test]
fn save_reorders_for_loader() -> Result<(), QuestError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("m01234.arc");

    let mut arc = QuestArc::from_archive(scrambled_archive(&path)?, EntryOrdering::Loader);
    arc.save(None)?;

    let reopened = QuestArc::open(&path)?;
    assert!(reopened.is_valid());
    assert_eq!(extensions(&reopened)[0], ".sem");
    assert_eq!(reopened.quest_data_index(), Some(8));

    Ok(())
}

#[test]
fn save_preserves_order_for_lookup_tables() -> Result<(), QuestError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("table.arc");

    let archive = scrambled_archive(&path)?;
    let before = extensions(&archive);

    let mut arc = QuestArc::from_archive(archive, EntryOrdering::Preserve);
    arc.save(None)?;

    let reopened = QuestArc::open_with(&path, ArchiveConfig::default(), EntryOrdering::Preserve)?;
    assert_eq!(extensions(&reopened), before);
    assert_eq!(reopened.ordering(), EntryOrdering::Preserve);

    Ok(())
}

#[test]
fn link_round_trip_through_archive() -> Result<(), QuestError> {
    let mut arc = scrambled_quest()?;

    let mut link = arc.load_link()?;
    assert_eq!(link, QuestLink::default());

    link.rem_main[0].set_rem_id(900001);
    link.em_set_lists[0].set_esl_id(1, 500);
    arc.store_link(&link)?;

    let stored = arc.load_link()?;
    assert_eq!(stored, link);

    let resolved = stored.resolve(&arc);
    assert_eq!(resolved.rem_main[0], arc.find_entry_index(&paths::rem_path(900001)));
    assert_eq!(resolved.em_set_lists[0], arc.find_entry_index(&paths::esl_path(1, 500)));
    assert!(resolved.rem_main[0].is_some());

    Ok(())
}

#[test]
fn stale_cached_index_is_not_trusted() -> Result<(), QuestError> {
    let mut arc = scrambled_quest()?;

    // Reordering through the container interface bypasses the cache.
    arc.entries_mut().reverse();

    assert_eq!(arc.quest_data().map(|e| e.extension()), Some(".ext"));
    assert_eq!(arc.quest_link().map(|e| e.extension()), Some(".qdl"));

    Ok(())
}
