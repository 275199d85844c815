//! Placeholder discovery and text rewriting.
//!
//! A placeholder is `{{` followed by one or more characters other than `}`
//! and closed by the nearest `}}`. Whitespace around the key is ignored for
//! lookup, but the token that gets replaced is rebuilt from the trimmed key.
use memchr::memmem;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::BuildHasher;

/// Contents of every placeholder in `text`, left to right.
///
/// Duplicates are kept and contents are not trimmed. An opening `{{` that
/// is never properly closed contributes nothing.
///
/// ```rust
/// use deckfill::template::find_placeholders;
///
/// assert_eq!(find_placeholders("{{a}} and {{ b }} and {{a}}"), ["a", " b ", "a"]);
/// assert!(find_placeholders("{{}} {{open").is_empty());
/// ```
pub fn find_placeholders(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memmem::find(&bytes[pos..], b"{{") {
        let start = pos + offset;
        let content = start + 2;
        match memchr::memchr(b'}', &bytes[content..]) {
            Some(len) if len > 0 && bytes.get(content + len + 1) == Some(&b'}') => {
                found.push(&text[content..content + len]);
                pos = content + len + 2;
            },
            _ => pos = start + 1,
        }
    }
    found
}

/// Placeholder values, keyed by placeholder name.
///
/// Values are stored in their display form, so anything implementing
/// [`Display`] can be supplied.
///
/// ```rust
/// use deckfill::template::Replacements;
///
/// let mut values = Replacements::new();
/// values.insert("year", 2024);
/// values.insert("title", "Annual report");
/// assert_eq!(values.get("year"), Some("2024"));
///
/// let values: Replacements = [("a", 1), ("b", 2)].into_iter().collect();
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    values: HashMap<String, String>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `key`, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> Option<String> {
        self.values.insert(key.into(), value.to_string())
    }

    /// Builder form of [`Replacements::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (key, value) in iter {
            replacements.insert(key, value);
        }
        replacements
    }
}

impl<K: Into<String>, V: Display, H: BuildHasher> From<HashMap<K, V, H>> for Replacements {
    fn from(map: HashMap<K, V, H>) -> Self {
        map.into_iter().collect()
    }
}

/// Replace the placeholders of `text` with their values.
///
/// Placeholders are taken in discovery order. For each, every occurrence of
/// `{{key}}` (key trimmed) is replaced by its value, or removed when the key
/// has no value. A spaced placeholder such as `{{ name }}` is therefore only
/// replaced when `{{name}}` also appears in the text.
///
/// ```rust
/// use deckfill::template::{Replacements, rewrite};
///
/// let values = Replacements::new().with("name", "Ada");
/// assert_eq!(rewrite("Hi {{name}}, {{missing}}!", &values), "Hi Ada, !");
/// ```
pub fn rewrite(text: &str, replacements: &Replacements) -> String {
    let mut output = text.to_string();
    for placeholder in find_placeholders(text) {
        let key = placeholder.trim();
        let token = format!("{{{{{}}}}}", key);
        output = output.replace(&token, replacements.get(key).unwrap_or_default());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_find_in_order_with_duplicates() {
        assert_eq!(find_placeholders("{{b}} {{a}} {{b}}"), ["b", "a", "b"]);
    }

    #[test]
    fn test_find_stops_at_nearest_close() {
        assert_eq!(find_placeholders("{{a}}}}"), ["a"]);
        assert_eq!(find_placeholders("{{{a}}"), ["{a"]);
        assert_eq!(find_placeholders("{{a}b}}"), Vec::<&str>::new());
        assert_eq!(find_placeholders("{{a}b}} {{c}}"), ["c"]);
    }

    #[test]
    fn test_find_non_ascii() {
        assert_eq!(find_placeholders("Grüße {{naïve}} ✓"), ["naïve"]);
    }

    #[test]
    fn test_find_keeps_line_breaks() {
        assert_eq!(find_placeholders("{{a\nb}}"), ["a\nb"]);
    }

    #[test]
    fn test_rewrite_adjacent() {
        let values = Replacements::new().with("a", "X").with("b", "Y");
        assert_eq!(rewrite("{{a}}{{b}}", &values), "XY");
    }

    #[test]
    fn test_rewrite_absent_key() {
        assert_eq!(rewrite("Hi {{name}}!", &Replacements::new()), "Hi !");
    }

    #[test]
    fn test_rewrite_spaced_placeholder() {
        let values = Replacements::new().with("name", "Ada");
        assert_eq!(rewrite("Hi {{ name }}", &values), "Hi {{ name }}");
        assert_eq!(rewrite("{{ name }} {{name}}", &values), "{{ name }} Ada");
    }

    #[test]
    fn test_rewrite_display_values() {
        let values: Replacements = [("n", 3.5)].into_iter().collect();
        assert_eq!(rewrite("{{n}} kg", &values), "3.5 kg");
    }

    #[test]
    fn test_from_hash_map() {
        let map: HashMap<&str, bool> = HashMap::from([("flag", true)]);
        let values = Replacements::from(map);
        assert_eq!(values.get("flag"), Some("true"));
    }

    fn template_text() -> impl Strategy<Value = (String, Vec<String>)> {
        prop::collection::vec(
            prop_oneof![
                "[a-z ]{0,6}".prop_map(|s| (s, None::<String>)),
                "[a-c]{1,3}".prop_map(|k| (String::new(), Some(k))),
            ],
            0..12,
        )
        .prop_map(|pieces| {
            let mut text = String::new();
            let mut keys = Vec::new();
            for (literal, key) in pieces {
                text.push_str(&literal);
                if let Some(key) = key {
                    text.push_str(&format!("{{{{{}}}}}", key));
                    keys.push(key);
                }
            }
            (text, keys)
        })
    }

    proptest! {
        #[test]
        fn prop_text_without_braces_is_unchanged(text in "[^{}]*") {
            let values = Replacements::new().with("a", "X");
            prop_assert!(find_placeholders(&text).is_empty());
            prop_assert_eq!(rewrite(&text, &values), text);
        }

        #[test]
        fn prop_finds_every_inserted_key((text, keys) in template_text()) {
            prop_assert_eq!(find_placeholders(&text), keys);
        }

        #[test]
        fn prop_second_pass_is_noop((text, _keys) in template_text(), value in "[A-Z ]{0,5}") {
            let values = Replacements::new().with("a", &value).with("bb", "two");
            let once = rewrite(&text, &values);
            prop_assert!(find_placeholders(&once).is_empty());
            prop_assert_eq!(rewrite(&once, &values), once);
        }
    }
}
