/// Target languages the bot can translate into.
///
/// The set is closed: unknown codes never make it past [`Language::parse`],
/// so everything downstream works with a valid language. Lookups that need
/// a default assume [`Language::En`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Vi,
    Kr,
    Br,
    Jp,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Vi,
        Language::Kr,
        Language::Br,
        Language::Jp,
    ];

    /// Parse a user-supplied code, case-insensitively. Unknown tokens do
    /// not parse; callers decide whether to reject or fall back.
    pub fn parse(token: &str) -> Option<Language> {
        match token.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "vi" => Some(Language::Vi),
            "kr" => Some(Language::Kr),
            "br" => Some(Language::Br),
            "jp" => Some(Language::Jp),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
            Language::Kr => "kr",
            Language::Br => "br",
            Language::Jp => "jp",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Vi => "Vietnamese",
            Language::Kr => "Korean",
            Language::Br => "Brazilian Portuguese",
            Language::Jp => "Japanese",
        }
    }

    /// All valid codes joined by `/`, for the `setlang` usage message.
    pub fn usage_codes() -> String {
        Language::ALL
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips() {
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.code()), Some(lang));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Language::parse("VI"), Some(Language::Vi));
        assert_eq!(Language::parse("Kr"), Some(Language::Kr));
        assert_eq!(Language::parse("eN"), Some(Language::En));
    }

    #[test]
    fn unknown_tokens_do_not_parse() {
        for token in ["xx", "english", "", "e n", "jp "] {
            assert_eq!(Language::parse(token), None, "token {token:?}");
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Language::En.display_name(), "English");
        assert_eq!(Language::Vi.display_name(), "Vietnamese");
        assert_eq!(Language::Kr.display_name(), "Korean");
        assert_eq!(Language::Br.display_name(), "Brazilian Portuguese");
        assert_eq!(Language::Jp.display_name(), "Japanese");
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn usage_codes_lists_all_five() {
        assert_eq!(Language::usage_codes(), "en/vi/kr/br/jp");
    }
}
