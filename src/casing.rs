//! Field-name casing between local attributes and remote fields
//!
//! Local attribute names are lower snake case (`trial_component_name`),
//! remote field names are PascalCase (`TrialComponentName`).
//!
//! ## Acronyms
//!
//! Some remote names carry all-caps abbreviations (`HTTPStatusCode`). The
//! inverse conversion splits such a run from the following word, and the
//! forward conversion renders any word found in the acronym set fully
//! upper-case, so those names survive a round trip:
//!
//! ```rust
//! use smexperiments::casing::CaseConverter;
//!
//! let casing = CaseConverter::default();
//! assert_eq!(casing.to_local("HTTPStatusCode"), "http_status_code");
//! assert_eq!(casing.to_remote("http_status_code"), "HTTPStatusCode");
//! assert_eq!(casing.to_remote("trial_component_arn"), "TrialComponentArn");
//! ```

use std::collections::BTreeSet;

/// Acronyms known to every converter.
pub const DEFAULT_ACRONYMS: &[&str] = &["HTTP", "HTTPS"];

/// Converts attribute names between local and remote casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseConverter {
    acronyms: BTreeSet<String>,
}

impl Default for CaseConverter {
    fn default() -> Self {
        Self::new(DEFAULT_ACRONYMS.iter().copied())
    }
}

impl CaseConverter {
    /// Create a converter that knows exactly the given acronyms.
    ///
    /// Acronyms are matched case-insensitively.
    #[must_use]
    pub fn new<I, S>(acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            acronyms: acronyms
                .into_iter()
                .map(|a| a.as_ref().to_ascii_uppercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Add an acronym to the converter.
    #[must_use]
    pub fn with_acronym(mut self, acronym: &str) -> Self {
        if !acronym.is_empty() {
            self.acronyms.insert(acronym.to_ascii_uppercase());
        }
        self
    }

    /// Iterate over the known acronyms (upper-case, sorted).
    pub fn acronyms(&self) -> impl Iterator<Item = &str> {
        self.acronyms.iter().map(String::as_str)
    }

    /// Convert a local snake case name to the remote PascalCase form.
    ///
    /// Empty segments (leading, trailing or doubled underscores) are skipped.
    #[must_use]
    pub fn to_remote(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        for word in name.split('_').filter(|w| !w.is_empty()) {
            let upper = word.to_ascii_uppercase();
            if self.acronyms.contains(&upper) {
                out.push_str(&upper);
                continue;
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }

    /// Convert a remote PascalCase name to the local snake case form.
    ///
    /// An upper-case run made of several known acronyms is split between
    /// them (`HTTPHTTPSCode` becomes `http_https_code`).
    #[must_use]
    pub fn to_local(&self, name: &str) -> String {
        let mut words = Vec::new();
        for word in split_words(name) {
            match self.split_acronyms(&word).filter(|parts| parts.len() > 1) {
                Some(parts) => words.extend(parts.iter().map(|p| p.to_ascii_lowercase())),
                None => words.push(word.to_lowercase()),
            }
        }
        words.join("_")
    }

    /// Segment an all-caps run into known acronyms, longest match first.
    fn split_acronyms<'w>(&self, word: &'w str) -> Option<Vec<&'w str>> {
        if word.is_empty() {
            return Some(Vec::new());
        }
        if !word.chars().all(|c| c.is_ascii_uppercase()) {
            return None;
        }
        (1..=word.len()).rev().find_map(|len| {
            let (head, tail) = word.split_at(len);
            if !self.acronyms.contains(head) {
                return None;
            }
            self.split_acronyms(tail).map(|mut rest| {
                rest.insert(0, head);
                rest
            })
        })
    }
}

/// Split a PascalCase name into words.
///
/// A word starts at an upper-case letter that follows a lower-case letter or
/// digit, or at the last capital of an upper-case run that is followed by a
/// lower-case letter (`HTTPStatus` splits as `HTTP` + `Status`). Digits stay
/// with the preceding word.
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().filter(|c| *c != '_').collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert with the default acronym set.
#[must_use]
pub fn to_remote_case(name: &str) -> String {
    CaseConverter::default().to_remote(name)
}

/// Convert with the default acronym set.
#[must_use]
pub fn to_local_case(name: &str) -> String {
    CaseConverter::default().to_local(name)
}

/// Returns true if `name` is a well-formed local attribute name: non-empty
/// lower-case ASCII words joined by single underscores.
#[must_use]
pub fn is_local_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('_').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
        && name.starts_with(|c: char| c.is_ascii_lowercase())
}
