//! Keys: validated, component-decomposed object names.
//!
//! A key is written like an absolute or relative filesystem path
//! (`/users/alice`, `users/alice`); both spellings name the same object.
//! Every component must be portable to every mainstream filesystem, so the
//! Win32 naming rules are enforced everywhere:
//!
//! - no control characters and none of `< > : " / \ | ? *`
//! - no reserved device names (`CON`, `PRN`, `AUX`, `NUL`, `COM0`-`COM9`,
//!   `LPT0`-`LPT9` and the superscript variants), compared case-insensitively
//! - no components made only of dots (`.`, `..`, `...`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characters that may never appear in a key component.
///
/// `/` is the component separator and can't reach validation, but it is
/// listed so the set matches what other filesystems reject.
pub const DISALLOWED_CHARACTERS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Win32 reserved device names.
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "COM¹", "COM²", "COM³", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6",
    "LPT7", "LPT8", "LPT9", "LPT¹", "LPT²", "LPT³",
];

/// Why a key was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyError {
    #[error("key is empty")]
    Empty,

    #[error("component {component:?} contains disallowed character {character:?}")]
    DisallowedCharacter { component: String, character: char },

    #[error("component {component:?} is a reserved device name")]
    ReservedName { component: String },

    #[error("component {component:?} is a relative path specifier")]
    DotsOnly { component: String },
}

/// A validated key.
///
/// Holding a `Key` means every component already passed validation, so it
/// can be grafted onto a store root without further checks.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    components: Vec<String>,
}

impl Key {
    /// Parse and validate a raw key.
    ///
    /// Empty components are dropped, so `/a//b/` and `a/b` are the same key.
    ///
    /// ```rust
    /// use bailey_core_store::Key;
    ///
    /// let key = Key::parse("/food/eggs").unwrap();
    /// assert_eq!(key.len(), 2);
    /// assert_eq!(key, Key::parse("food/eggs/").unwrap());
    /// assert!(Key::parse("/food/..").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let components: Vec<String> = raw
            .split('/')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if components.is_empty() {
            return Err(KeyError::Empty);
        }

        for component in &components {
            validate_component(component)?;
        }

        Ok(Key { components })
    }

    /// Build a key from already-split components, validating each one.
    pub fn from_components<I, S>(components: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        if components.is_empty() {
            return Err(KeyError::Empty);
        }
        for component in &components {
            if component.is_empty() {
                return Err(KeyError::Empty);
            }
            validate_component(component)?;
        }
        Ok(Key { components })
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false; a key has at least one component.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The last component.
    pub fn name(&self) -> &str {
        // Non-empty by construction.
        self.components.last().map(String::as_str).unwrap_or_default()
    }

    /// The key one level up, or `None` for a top-level key.
    pub fn parent(&self) -> Option<Key> {
        if self.components.len() < 2 {
            return None;
        }
        Some(Key {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }

    /// Append one component.
    pub fn child(&self, name: &str) -> Result<Key, KeyError> {
        if name.is_empty() {
            return Err(KeyError::Empty);
        }
        validate_component(name)?;
        let mut components = self.components.clone();
        components.push(name.to_string());
        Ok(Key { components })
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &Key) -> bool {
        self.components.len() < other.components.len()
            && self.components == other.components[..self.components.len()]
    }

    /// True if `other` sits exactly one level below `self`.
    pub fn is_parent_of(&self, other: &Key) -> bool {
        other.components.len() == self.components.len() + 1 && self.is_ancestor_of(other)
    }
}

fn validate_component(component: &str) -> Result<(), KeyError> {
    if let Some(character) = component
        .chars()
        .find(|c| c.is_control() || DISALLOWED_CHARACTERS.contains(c))
    {
        return Err(KeyError::DisallowedCharacter {
            component: component.to_string(),
            character,
        });
    }

    let upper = component.to_uppercase();
    if RESERVED_NAMES.iter().any(|name| *name == upper) {
        return Err(KeyError::ReservedName {
            component: component.to_string(),
        });
    }

    if component.chars().all(|c| c == '.') {
        return Err(KeyError::DotsOnly {
            component: component.to_string(),
        });
    }

    Ok(())
}

/// Renders the canonical, root-anchored spelling: `/a/b/c`.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}

impl TryFrom<&str> for Key {
    type Error = KeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Key::parse(s)
    }
}

/// Parse a key literal, panicking if it is invalid.
///
/// ```rust
/// use bailey_core_store::key;
///
/// let k = key!("/spam/eggs");
/// assert_eq!(k.name(), "eggs");
/// ```
#[macro_export]
macro_rules! key {
    ($s:expr) => {
        $crate::Key::parse($s).expect("invalid key literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_keys() {
        assert_eq!(Key::parse("/easy").unwrap().len(), 1);
        assert_eq!(Key::parse("/eggs/bacon/spam/eggs").unwrap().len(), 4);
        assert_eq!(Key::parse("forgot a slash").unwrap().len(), 1);
    }

    #[test]
    fn absolute_and_relative_spellings_agree() {
        assert_eq!(Key::parse("/spam/eggs").unwrap(), Key::parse("spam/eggs").unwrap());
        assert_eq!(Key::parse("//spam///eggs/").unwrap(), Key::parse("spam/eggs").unwrap());
    }

    #[test]
    fn display_is_root_anchored() {
        assert_eq!(Key::parse("spam/eggs").unwrap().to_string(), "/spam/eggs");
        assert_eq!(Key::parse("/zh/汉语").unwrap().to_string(), "/zh/汉语");
    }

    #[test]
    fn empty_keys_rejected() {
        assert_eq!(Key::parse(""), Err(KeyError::Empty));
        assert_eq!(Key::parse("/"), Err(KeyError::Empty));
        assert_eq!(Key::parse("///"), Err(KeyError::Empty));
    }

    #[test]
    fn disallowed_characters_rejected() {
        for c in ['<', '>', ':', '"', '\\', '|', '?', '*', '\0', '\n', '\x1f'] {
            let raw = format!("/spam{}eggs", c);
            assert!(
                matches!(
                    Key::parse(&raw),
                    Err(KeyError::DisallowedCharacter { character, .. }) if character == c
                ),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn lone_disallowed_characters_rejected() {
        // A bare "/" splits into nothing and is reported as empty instead.
        for c in DISALLOWED_CHARACTERS.iter().filter(|c| **c != '/') {
            assert!(Key::parse(&c.to_string()).is_err());
        }
    }

    #[test]
    fn reserved_names_rejected_case_insensitively() {
        for name in RESERVED_NAMES {
            assert!(
                matches!(Key::parse(name), Err(KeyError::ReservedName { .. })),
                "{} should be rejected",
                name
            );
            let lower = name.to_lowercase();
            assert!(Key::parse(&format!("/ok/{}", lower)).is_err());
        }
        assert!(Key::parse("/console").is_ok());
        assert!(Key::parse("/COM10").is_ok());
    }

    #[test]
    fn dot_components_rejected() {
        for raw in [".", "..", "...", "/a/./b", "/a/../b", "/a/...."] {
            assert!(
                matches!(Key::parse(raw), Err(KeyError::DotsOnly { .. })),
                "{} should be rejected",
                raw
            );
        }
        assert!(Key::parse("/.hidden").is_ok());
        assert!(Key::parse("/a.b").is_ok());
    }

    #[test]
    fn parent_and_child() {
        let k = key!("/a/b/c");
        assert_eq!(k.parent(), Some(key!("/a/b")));
        assert_eq!(key!("/a").parent(), None);
        assert_eq!(key!("/a/b").child("c").unwrap(), k);
        assert!(key!("/a").child("..").is_err());
        assert_eq!(k.name(), "c");
    }

    #[test]
    fn ancestry() {
        let a = key!("/a");
        let ab = key!("/a/b");
        let abc = key!("/a/b/c");
        assert!(a.is_ancestor_of(&abc));
        assert!(a.is_parent_of(&ab));
        assert!(!a.is_parent_of(&abc));
        assert!(!abc.is_ancestor_of(&abc));
        assert!(!key!("/ab").is_ancestor_of(&abc));
    }

    #[test]
    fn from_components_validates() {
        assert_eq!(Key::from_components(["a", "b"]).unwrap(), key!("/a/b"));
        assert!(Key::from_components(["a", ""]).is_err());
        assert!(Key::from_components(["a", "b/c"]).is_err());
        assert!(Key::from_components(Vec::<String>::new()).is_err());
    }

    #[test]
    fn key_error_serializes_with_kind_tag() {
        let err = KeyError::ReservedName {
            component: "NUL".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "reserved_name");
        let back: KeyError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
