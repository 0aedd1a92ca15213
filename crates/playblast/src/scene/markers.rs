//! Substring markers matched against raw scene lines

/// A set of substrings; a line matches when it contains any of them.
///
/// Matching works on raw bytes so scene files with non-UTF-8 content are
/// still filtered correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<Vec<u8>>,
}

impl MarkerSet {
    /// Build a marker set, ignoring empty markers
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().as_bytes().to_vec())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Whether `line` contains any marker
    pub fn matches(&self, line: &[u8]) -> bool {
        self.markers.iter().any(|marker| contains(line, marker))
    }
}

/// Byte substring search; an empty needle never matches
pub(super) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_marker() {
        let set = MarkerSet::new(["OpenColorIO", "colorManagementPrefs"]);
        assert!(set.matches(b"uses OpenColorIO config"));
        assert!(set.matches(b"colorManagementPrefs -e -cfp \"/x.ocio\";"));
        assert!(!set.matches(b"createNode transform -n \"cam\";"));
    }

    #[test]
    fn test_empty_markers_are_dropped() {
        let set = MarkerSet::new([""]);
        assert_eq!(set, MarkerSet::new(Vec::<String>::new()));
        assert!(!set.matches(b"anything"));
    }

    #[test]
    fn test_non_utf8_line() {
        let set = MarkerSet::new(["ocio"]);
        assert!(set.matches(&[0xff, b'o', b'c', b'i', b'o', 0xfe]));
        assert!(!set.matches(&[0xff, 0xfe]));
    }
}
