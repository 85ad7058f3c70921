//! Naming conventions of quest archive entries.
//!
//! All paths use backslash separators and fixed zero-padding
//! widths; the game looks them up verbatim.

use crate::Language;

/// Path of the quest payload for `quest_id`.
pub fn quest_data_path(quest_id: u32) -> String {
    format!(r"loc\quest\questData\questData_{quest_id:07}")
}

/// Path of the localized text block `name` in `language`.
pub fn gmd_path(language: Language, name: &str) -> String {
    format!(r"{language}\quest\questData\questData_{name}")
}

/// File name of the reward table `rem_id`.
pub fn rem_name(rem_id: u32) -> String {
    format!("rem_{rem_id:06}")
}

/// Path of the reward table `rem_id`.
pub fn rem_path(rem_id: u32) -> String {
    rem_path_named(&rem_name(rem_id))
}

/// Path of the reward table with file name `name`.
pub fn rem_path_named(name: &str) -> String {
    format!(r"quest\rem\{name}")
}

/// File name of the spawn list `esl_id` on map `map_id`.
pub fn esl_name(map_id: u32, esl_id: u32) -> String {
    format!("z_m{map_id:02}d_{esl_id:03}")
}

/// Path of the spawn list `esl_id` on map `map_id`.
pub fn esl_path(map_id: u32, esl_id: u32) -> String {
    esl_path_named(&esl_name(map_id, esl_id))
}

/// Path of the spawn list with file name `name`.
pub fn esl_path_named(name: &str) -> String {
    format!(r"quest\zako\emSetList\{name}")
}

/// Path of the boss spawn point with file name `name`.
pub fn boss_set_path(name: &str) -> String {
    format!(r"quest\boss\setEmMain\{name}")
}

/// Path of the supply list with file name `name`.
pub fn supply_path(name: &str) -> String {
    format!(r"quest\supp\{name}")
}

/// Path of the quest plus parameters with file name `name`.
pub fn plus_path(name: &str) -> String {
    format!(r"quest\plus\questPlus_{name}")
}
