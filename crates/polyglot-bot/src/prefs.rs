use std::collections::HashMap;
use std::sync::Mutex;

use crate::languages::Language;

/// Per-user target-language preferences.
///
/// The sole piece of shared mutable state in the service. A whole-store
/// mutex is enough at the request volumes a workspace bot sees.
///
/// The map is unbounded by default; entries are never evicted, matching
/// the lifetime of a workspace's user base. An optional `max_entries` cap
/// bounds memory for long-running public deployments; when the cap is hit,
/// a new user displaces one arbitrary existing entry (the displaced user
/// silently reverts to the default language on next contact).
pub struct LanguageStore {
    entries: Mutex<HashMap<String, Language>>,
    /// `0` = unbounded.
    max_entries: usize,
}

impl LanguageStore {
    /// `max_entries == 0` disables the capacity bound.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    /// The user's current language. A user never seen before is assigned
    /// the default, and the first read also writes it: absence of an entry
    /// is never an error, it means "not yet set".
    pub fn get(&self, user_id: &str) -> Language {
        let mut entries = self.entries.lock().unwrap();
        if let Some(lang) = entries.get(user_id) {
            return *lang;
        }
        Self::make_room(&mut entries, self.max_entries);
        entries.insert(user_id.to_string(), Language::default());
        Language::default()
    }

    pub fn set(&self, user_id: &str, lang: Language) {
        let mut entries = self.entries.lock().unwrap();
        if !entries.contains_key(user_id) {
            Self::make_room(&mut entries, self.max_entries);
        }
        entries.insert(user_id.to_string(), lang);
    }

    /// Validate-and-commit for the `setlang` command: parses `token`, and
    /// only on success stores it. An invalid token leaves the store
    /// untouched and returns `None`.
    pub fn set_token(&self, user_id: &str, token: &str) -> Option<Language> {
        let lang = Language::parse(token)?;
        self.set(user_id, lang);
        Some(lang)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_room(entries: &mut HashMap<String, Language>, max_entries: usize) {
        if max_entries > 0 && entries.len() >= max_entries {
            if let Some(victim) = entries.keys().next().cloned() {
                tracing::warn!(
                    user = %victim,
                    max_entries,
                    "Preference store full — evicting an entry"
                );
                entries.remove(&victim);
            }
        }
    }
}
