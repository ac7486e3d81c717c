//! The parse pipeline: resolve, filter, fold.

use crate::fold::FoldTally;
use crate::frame::Frame;
use crate::options::ScrubOptions;
use crate::resolve::resolve_frame;
use crate::snapshot::{RawFrame, StackSnapshot};
use log::{debug, trace};

/// Parse a snapshot into cleaned frames.
///
/// Each raw frame is resolved against the snapshot's metadata, run through
/// the early-skip filters (line-number check, deny-list, allow-list, in that
/// order), and accepted frames then have their shared path segments folded
/// away. Never fails: an empty snapshot yields an empty list, metadata-less
/// frames resolve to the `"?"` sentinel, and folding no-ops when paths carry
/// nothing foldable. Output preserves call order, innermost frame first, and
/// never exceeds the input frame count.
#[must_use]
pub fn parse(snapshot: &StackSnapshot, options: &ScrubOptions) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut tally = FoldTally::new();

    for (index, raw) in snapshot.frames().iter().enumerate() {
        if options.skip_frames_without_line_number && raw.line_number == 0 {
            trace!("frame {index}: skipped, no line number");
            continue;
        }

        let frame = resolve_frame(snapshot.metadata(), raw, index);

        if options.is_denied(&frame) {
            trace!("frame {index}: {} matches deny-list", frame.method_name);
            continue;
        }
        if options.has_allow_list() && !options.is_allowed(&frame) {
            trace!("frame {index}: {} outside allow-list", frame.method_name);
            continue;
        }

        if let Some(path) = &frame.file_path {
            tally.observe(path);
        }
        frames.push(frame);
    }

    let fold_set = tally.into_fold_set();
    if !fold_set.is_empty() {
        for frame in &mut frames {
            if let Some(path) = frame.file_path.as_mut() {
                *path = fold_set.rewrite(path);
            }
        }
    }

    debug!("parsed {} of {} raw frames", frames.len(), snapshot.len());
    frames
}

/// The accepted raw frames, with each file path overwritten by its folded
/// form.
///
/// For callers that need the runtime's own frame representation but with the
/// shortened paths. Returns fresh values in the same order [`parse`] keeps
/// them; the snapshot itself is never mutated.
#[must_use]
pub fn filtered_raw_frames(snapshot: &StackSnapshot, options: &ScrubOptions) -> Vec<RawFrame> {
    parse(snapshot, options)
        .into_iter()
        .filter_map(|frame| {
            let index = frame.raw_index?;
            let mut raw = snapshot.frames()[index].clone();
            raw.file_path = frame.file_path;
            Some(raw)
        })
        .collect()
}
