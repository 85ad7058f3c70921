use std::fmt;

/// Languages with their own localized text entries.
///
/// The numeric ids match the order in which quest payloads list
/// their text blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    German,
    Italian,
    Spanish,
    TraditionalChinese,
    SimplifiedChinese,
}

impl Language {
    /// All languages in id order.
    pub const ALL: [Language; 7] = [
        Self::English,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Spanish,
        Self::TraditionalChinese,
        Self::SimplifiedChinese,
    ];

    /// Gets the language for a numeric id.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// The numeric id of the language.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// The path prefix of the language's text entries.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::English => "eng",
            Self::French => "fre",
            Self::German => "ger",
            Self::Italian => "ita",
            Self::Spanish => "spa",
            Self::TraditionalChinese => "chT",
            Self::SimplifiedChinese => "chS",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
