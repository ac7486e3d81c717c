//! Raw snapshot input consumed by the parse pipeline.

use crate::frame::Frame;
use crate::metadata::{MetadataTable, MethodId};
use crate::options::ScrubOptions;
use crate::parser;
use std::sync::Arc;

/// One unresolved frame descriptor, exactly as the host runtime captured it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Source file the frame points at, when debug information was available.
    pub file_path: Option<String>,
    /// 1-based line number; 0 when unknown.
    pub line_number: u32,
    /// 1-based column number; 0 when unknown.
    pub column_number: u32,
    /// Handle to the frame's method metadata. `None` is a valid terminal
    /// state for entries without metadata (native transitions and the like);
    /// such frames resolve to the `"?"` sentinel.
    pub method: Option<MethodId>,
}

/// An ordered raw stack capture bound to the metadata its frames reference.
///
/// Frames are ordered innermost first. The metadata table travels with the
/// snapshot in an `Arc`, so clones are cheap and a snapshot stashed inside an
/// error stays parseable long after the capture site returned.
#[derive(Debug, Clone)]
pub struct StackSnapshot {
    metadata: Arc<MetadataTable>,
    frames: Vec<RawFrame>,
}

impl StackSnapshot {
    #[must_use]
    pub fn new(metadata: Arc<MetadataTable>, frames: Vec<RawFrame>) -> Self {
        Self { metadata, frames }
    }

    #[must_use]
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    #[must_use]
    pub fn frames(&self) -> &[RawFrame] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolve, filter, and fold this snapshot into cleaned frames.
    ///
    /// Shorthand for [`parse`](crate::parse); see there for the pipeline
    /// guarantees.
    #[must_use]
    pub fn parse(&self, options: &ScrubOptions) -> Vec<Frame> {
        parser::parse(self, options)
    }

    /// The accepted raw frames with folded paths patched in; see
    /// [`filtered_raw_frames`](crate::filtered_raw_frames).
    #[must_use]
    pub fn filtered_raw_frames(&self, options: &ScrubOptions) -> Vec<RawFrame> {
        parser::filtered_raw_frames(self, options)
    }
}

/// Implemented by error types that carry the stack snapshot captured where
/// they were raised.
///
/// The provided methods give every such error a ready-made cleaned-trace
/// view, mirroring how the snapshot itself parses:
///
/// ```
/// use std::sync::Arc;
/// use stackscrub::{MetadataTable, ScrubOptions, StackSnapshot, Traced};
///
/// struct LedgerError {
///     snapshot: StackSnapshot,
/// }
///
/// impl Traced for LedgerError {
///     fn stack_snapshot(&self) -> &StackSnapshot {
///         &self.snapshot
///     }
/// }
///
/// let error = LedgerError {
///     snapshot: StackSnapshot::new(Arc::new(MetadataTable::new()), Vec::new()),
/// };
/// assert!(error.parse_stack_trace(&ScrubOptions::default()).is_empty());
/// ```
pub trait Traced {
    /// The snapshot captured when this value was created.
    fn stack_snapshot(&self) -> &StackSnapshot;

    /// Parse the carried snapshot into cleaned frames.
    fn parse_stack_trace(&self, options: &ScrubOptions) -> Vec<Frame> {
        parser::parse(self.stack_snapshot(), options)
    }

    /// The carried snapshot's accepted raw frames with folded paths.
    fn filtered_raw_frames(&self, options: &ScrubOptions) -> Vec<RawFrame> {
        parser::filtered_raw_frames(self.stack_snapshot(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MethodRecord, TypeRecord};

    #[test]
    fn test_empty_snapshot() {
        let snapshot = StackSnapshot::new(Arc::new(MetadataTable::new()), Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.parse(&ScrubOptions::default()).is_empty());
    }

    #[test]
    fn test_snapshot_clone_shares_metadata() {
        let mut table = MetadataTable::new();
        let ty = table.add_type(TypeRecord::new("CheckoutService"));
        let method = table.add_method(MethodRecord::new("Submit").declared_on(ty));
        let snapshot = StackSnapshot::new(
            Arc::new(table),
            vec![RawFrame {
                method: Some(method),
                ..RawFrame::default()
            }],
        );

        let clone = snapshot.clone();
        assert_eq!(clone.len(), snapshot.len());
        assert_eq!(
            clone.parse(&ScrubOptions::default())[0].method_name,
            "Submit"
        );
    }
}
