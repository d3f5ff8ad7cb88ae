//! Game language ids.

use strum::{Display, FromRepr};

/// Interface language reported for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[repr(u8)]
pub enum Language {
    English = 0,
    Deutsch = 1,
    Portuguese = 2,
    French = 3,
    Suomi = 4,
    Norsk = 5,
    Nederlands = 6,
    Catalan = 7,
    Turkish = 8,
    Castellano = 9,
    Italiano = 10,
    Dansk = 11,
    Czech = 12,
    Russian = 13,
    Estonian = 14,
    Serbian = 15,
    Greek = 16,
    Polski = 17,
    Croatian = 18,
    Hungarian = 19,
    Brazilian = 20,
    Swedish = 21,
    Slovak = 22,
    Galego = 23,
    Slovenski = 24,
    Belarussian = 25,
    Latvian = 26,
    Lithuanian = 27,
    TraditionalChinese = 28,
    SimplifiedChinese = 29,
    Japanese = 30,
    Korean = 31,
    Bulgarian = 32,
    Latino = 33,
    Ukrainian = 34,
    Indonesian = 35,
    Romanian = 36,
}

impl Language {
    /// Short language code as used by the game's translation files.
    ///
    /// Catalan and Castellano share `ca`; Slovak and Slovenski share `sl`.
    pub fn code(self) -> &'static str {
        use Language::*;
        match self {
            English => "en",
            Deutsch => "de",
            Portuguese => "pt",
            French => "fr",
            Suomi => "fi",
            Norsk => "no",
            Nederlands => "nl",
            Catalan | Castellano => "ca",
            Turkish => "tr",
            Italiano => "it",
            Dansk => "da",
            Czech => "cz",
            Russian => "ru",
            Estonian => "et",
            Serbian => "sr",
            Greek => "el",
            Polski => "pl",
            Croatian => "hr",
            Hungarian => "hu",
            Brazilian => "br",
            Swedish => "sv",
            Slovak | Slovenski => "sl",
            Galego => "ga",
            Belarussian => "be",
            Latvian => "lv",
            Lithuanian => "lt",
            TraditionalChinese => "zh-Hant",
            SimplifiedChinese => "zh-Hans",
            Japanese => "jp",
            Korean => "ko",
            Bulgarian => "bg",
            Latino => "la",
            Ukrainian => "ua",
            Indonesian => "in",
            Romanian => "ro",
        }
    }
}

/// Language code for a raw id; empty for ids the game does not define.
pub fn language_code(id: u8) -> &'static str {
    Language::from_repr(id).map(Language::code).unwrap_or("")
}
