//! Target triple identifiers and ordered target lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque platform identifier, e.g. `x86_64-unknown-linux-musl`.
///
/// The string is passed verbatim to the build command. No parsing or
/// validation is applied; an unknown triple is the build command's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetTriple(String);

impl TargetTriple {
    /// Wrap a string as a target identifier.
    pub fn new(triple: impl Into<String>) -> Self {
        Self(triple.into())
    }

    /// The identifier exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hyphen-separated segments (arch, vendor, os, abi), for display only.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('-').collect()
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetTriple {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TargetTriple {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An ordered sequence of targets, fixed once constructed.
///
/// Order is significant: targets are built in exactly this order. The list
/// is never sorted or deduplicated. It may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetList(Vec<TargetTriple>);

impl TargetList {
    /// Build a list from targets in the given order.
    pub fn new(targets: Vec<TargetTriple>) -> Self {
        Self(targets)
    }

    /// The default pair: a static musl binary for x86-64 and a glibc binary
    /// for 64-bit ARM.
    pub fn builtin() -> Self {
        Self(vec![
            TargetTriple::new("x86_64-unknown-linux-musl"),
            TargetTriple::new("aarch64-unknown-linux-gnu"),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetTriple> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TargetTriple] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&TargetTriple> {
        self.0.get(index)
    }
}

impl<T: Into<TargetTriple>> FromIterator<T> for TargetList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a TargetTriple;
    type IntoIter = std::slice::Iter<'a, TargetTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_is_verbatim() {
        let t = TargetTriple::new("not a real triple!");
        assert_eq!(t.as_str(), "not a real triple!");
        assert_eq!(t.to_string(), "not a real triple!");
    }

    #[test]
    fn segments_split_on_hyphen() {
        let t = TargetTriple::new("x86_64-unknown-linux-musl");
        assert_eq!(t.segments(), vec!["x86_64", "unknown", "linux", "musl"]);
    }

    #[test]
    fn builtin_order() {
        let list = TargetList::builtin();
        let names: Vec<&str> = list.iter().map(TargetTriple::as_str).collect();
        assert_eq!(
            names,
            vec!["x86_64-unknown-linux-musl", "aarch64-unknown-linux-gnu"]
        );
    }

    #[test]
    fn from_iter_keeps_order_and_duplicates() {
        let list: TargetList = ["b", "a", "b"].into_iter().collect();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap().as_str(), "b");
        assert_eq!(list.get(1).unwrap().as_str(), "a");
        assert_eq!(list.get(2).unwrap().as_str(), "b");
    }

    #[test]
    fn empty_list() {
        let list = TargetList::default();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn serializes_as_plain_strings() {
        let list = TargetList::builtin();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(
            json,
            r#"["x86_64-unknown-linux-musl","aarch64-unknown-linux-gnu"]"#
        );
    }
}
