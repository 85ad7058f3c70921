use mtquest_arc::{
    ext::{self, ExtensionResolver},
    glob::Matcher,
    Archive, Container, EntryData,
};
use mtquest_utils::hash::type_hash;

#[test]
fn constants_match_type_names() {
    for (name, hash) in [
        ("rQuestData", ext::QUEST_DATA),
        ("rQuestDataLink", ext::QUEST_DATA_LINK),
        ("rGUIMessage", ext::GUI_MESSAGE),
        ("rRem", ext::REM),
        ("rEmSetList", ext::EM_SET_LIST),
        ("rSetEmMain", ext::SET_EM_MAIN),
        ("rSupplyList", ext::SUPPLY_LIST),
        ("rQuestPlus", ext::QUEST_PLUS),
        ("rTexture", ext::TEXTURE),
    ] {
        assert_eq!(type_hash(name), hash, "{name}");
        assert!(!ext::resolve(hash).is_empty(), "{name}");
    }
}

#[test]
fn known_extensions() {
    let resolver = ExtensionResolver::default();

    assert_eq!(resolver.resolve(ext::QUEST_DATA), ".ext");
    assert_eq!(resolver.resolve(ext::QUEST_DATA_LINK), ".qdl");
    assert_eq!(resolver.resolve(ext::REM), ".rem");
    assert_eq!(resolver.resolve(0xDEAD_BEEF), "");
    assert_eq!(resolver.resolve(0), "");
}

#[test]
fn glob_with_backslashes() {
    let matcher = Matcher::new(r"quest\rem\*").unwrap();
    assert!(matcher.is_match(r"quest\rem\rem_000000"));
    assert!(!matcher.is_match(r"quest\zako\emSetList\z_m00d_000"));

    let mut archive = Archive::new("glob.arc");
    for path in [r"quest\rem\rem_000001", r"quest\supp\s_000", r"quest\rem\rem_000002"] {
        archive
            .add_entry(path, "rRem", EntryData::Raw(b""))
            .unwrap();
    }

    let found: Vec<_> = archive
        .iter_glob(r"quest\rem\*")
        .unwrap()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(found, [r"quest\rem\rem_000001", r"quest\rem\rem_000002"]);
}
