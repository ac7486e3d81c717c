//! Common-path folding across accepted frames.
//!
//! File paths in one capture usually share long workspace-root prefixes that
//! repeat on every line of a logged trace. Folding runs in two passes over
//! the accepted frames: a tally pass counts which folder segments appear in
//! multiple frames' paths, then a rewrite pass elides the recurring ones. A
//! segment seen in only one frame is left alone since a unique folder usually
//! carries diagnostic value, and the filename plus its immediate parent are
//! always preserved so the leaf location stays readable.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Trailing path segments never tallied and never elided (the filename and
/// the folder right above it).
const PRESERVED_TAIL_SEGMENTS: usize = 2;

/// Tally entry for one folder segment.
#[derive(Debug)]
struct FolderOccurrence {
    /// Number of distinct frames whose path contained the segment.
    frames: u32,
    /// Directory separator observed where the segment was first seen.
    separator: char,
}

/// First pass: collects folder-segment statistics from accepted frames.
///
/// Created fresh per parse call and consumed by [`FoldTally::into_fold_set`];
/// nothing here outlives the call.
#[derive(Debug, Default)]
pub(crate) struct FoldTally {
    occurrences: HashMap<String, FolderOccurrence>,
}

impl FoldTally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the foldable segments of one frame's file path.
    ///
    /// Paths shorter than 2 characters, bare filenames without a separator,
    /// and paths with fewer than 3 segments carry nothing foldable and are
    /// ignored. A segment repeating within a single path still counts as one
    /// frame.
    pub(crate) fn observe(&mut self, path: &str) {
        if path.len() < 2 {
            return;
        }
        // Experience shows both \ and / turn up within a single capture, so
        // the separator is detected per path, backslash first.
        let separator = if path.contains('\\') {
            '\\'
        } else if path.contains('/') {
            '/'
        } else {
            return;
        };

        let segments: Vec<&str> = path.split(separator).collect();
        if segments.len() <= PRESERVED_TAIL_SEGMENTS {
            return;
        }

        let foldable = &segments[..segments.len() - PRESERVED_TAIL_SEGMENTS];
        let mut seen_in_frame = HashSet::new();
        for &segment in foldable {
            if segment.trim().is_empty() {
                continue;
            }
            if !seen_in_frame.insert(segment) {
                continue;
            }
            match self.occurrences.entry(segment.to_owned()) {
                Entry::Occupied(mut entry) => entry.get_mut().frames += 1,
                Entry::Vacant(entry) => {
                    entry.insert(FolderOccurrence {
                        frames: 1,
                        separator,
                    });
                }
            }
        }
    }

    /// Keep only segments shared by at least two frames, in a fixed rewrite
    /// order.
    pub(crate) fn into_fold_set(self) -> FoldSet {
        let mut segments: Vec<(String, char)> = self
            .occurrences
            .into_iter()
            .filter(|(_, occurrence)| occurrence.frames >= 2)
            .map(|(segment, occurrence)| (segment, occurrence.separator))
            .collect();
        // Fixed order keeps repeated parses of one snapshot identical.
        segments.sort();
        if !segments.is_empty() {
            debug!("folding {} shared path segments", segments.len());
        }
        FoldSet { segments }
    }
}

/// Second pass: the segments selected for elision.
#[derive(Debug)]
pub(crate) struct FoldSet {
    segments: Vec<(String, char)>,
}

impl FoldSet {
    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Remove every occurrence of each fold segment (with its separator)
    /// from the path. Unmatched segments leave the path untouched.
    pub(crate) fn rewrite(&self, path: &str) -> String {
        let mut folded = path.to_owned();
        for (segment, separator) in &self.segments {
            let pattern = format!("{segment}{separator}");
            if folded.contains(&pattern) {
                folded = folded.replace(&pattern, "");
            }
        }
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_set(paths: &[&str]) -> FoldSet {
        let mut tally = FoldTally::new();
        for path in paths {
            tally.observe(path);
        }
        tally.into_fold_set()
    }

    #[test]
    fn test_single_frame_folds_nothing() {
        let set = fold_set(&[r"C:\Work\Solution\Project\File.cs"]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_shared_segments_are_folded() {
        let set = fold_set(&[
            r"C:\Work\Solution\Project\File.cs",
            r"C:\Work\Solution\Other\Helper.cs",
        ]);
        assert_eq!(
            set.rewrite(r"C:\Work\Solution\Project\File.cs"),
            r"Project\File.cs"
        );
        assert_eq!(
            set.rewrite(r"C:\Work\Solution\Other\Helper.cs"),
            r"Other\Helper.cs"
        );
    }

    #[test]
    fn test_preserves_filename_and_parent_folder() {
        // "app" sits in the preserved tail of the first path; it only folds
        // if some other frame contributes it from a foldable position.
        let set = fold_set(&["/repo/src/app/main.rs", "/repo/src/lib/util.rs"]);
        assert_eq!(set.rewrite("/repo/src/app/main.rs"), "/app/main.rs");
        assert_eq!(set.rewrite("/repo/src/lib/util.rs"), "/lib/util.rs");
    }

    #[test]
    fn test_repeated_segment_in_one_path_counts_once() {
        let set = fold_set(&["/vendor/lib/vendor/deep/module/file.rs"]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_rewrite_removes_every_occurrence() {
        let set = fold_set(&[
            "/vendor/a/vendor/deep/module/file.rs",
            "/vendor/b/other/file2.rs",
        ]);
        assert_eq!(
            set.rewrite("/vendor/a/vendor/deep/module/file.rs"),
            "/a/deep/module/file.rs"
        );
    }

    #[test]
    fn test_bare_filename_is_skipped() {
        let mut tally = FoldTally::new();
        tally.observe("File.cs");
        tally.observe("File.cs");
        assert!(tally.into_fold_set().is_empty());
    }

    #[test]
    fn test_short_paths_are_skipped() {
        let mut tally = FoldTally::new();
        tally.observe("/");
        tally.observe("a");
        tally.observe(r"a\b");
        tally.observe(r"a\b");
        // two segments only, nothing outside the preserved tail
        assert!(tally.into_fold_set().is_empty());
    }

    #[test]
    fn test_mixed_separators_are_tracked_per_path() {
        let set = fold_set(&[
            r"C:\Work\Generated\Project\File.cs",
            "/home/work/Generated/project/file.rs",
            r"C:\Work\Generated\Other\Helper.cs",
        ]);
        assert_eq!(
            set.rewrite(r"C:\Work\Generated\Project\File.cs"),
            r"Project\File.cs"
        );
        // "Generated" was recorded with the backslash separator it was first
        // seen with, so the slash path never matches the rewrite pattern.
        assert_eq!(
            set.rewrite("/home/work/Generated/project/file.rs"),
            "/home/work/Generated/project/file.rs"
        );
    }

    #[test]
    fn test_whitespace_segments_are_ignored() {
        let set = fold_set(&["/ /repo/src/a/file.rs", "/ /repo/src/b/other.rs"]);
        assert_eq!(set.rewrite("/ /repo/src/a/file.rs"), "/ /a/file.rs");
    }
}
