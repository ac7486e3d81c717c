//! Backtrace capture adapter for [`stackscrub`].
//!
//! Translates native Rust backtraces (via the `backtrace` crate) into
//! [`StackSnapshot`]s the core pipeline can parse. Native symbols carry no
//! parameter or generic metadata, so every frame resolves to a name-only
//! method record holding the demangled symbol; file, line, and column come
//! straight from debug info when present.
//!
//! ```no_run
//! use stackscrub::ScrubOptions;
//!
//! let snapshot = stackscrub_backtrace::capture();
//! for frame in snapshot.parse(&ScrubOptions::default()) {
//!     println!("{frame}");
//! }
//! ```

use std::sync::Arc;

use backtrace::Backtrace;
use log::debug;
use rustc_demangle::demangle;
use stackscrub::{MetadataTable, MethodRecord, RawFrame, StackSnapshot};

/// Capture the current thread's stack as a parseable snapshot.
///
/// Symbols are resolved eagerly at capture time, so the returned snapshot is
/// self-contained and can be stashed inside an error value.
#[must_use]
pub fn capture() -> StackSnapshot {
    snapshot_of(&Backtrace::new())
}

/// Translate an already-captured, resolved backtrace into a snapshot.
#[must_use]
pub fn snapshot_of(backtrace: &Backtrace) -> StackSnapshot {
    let mut table = MetadataTable::new();
    let mut frames = Vec::new();

    for frame in backtrace.frames() {
        let symbols = frame.symbols();
        if symbols.is_empty() {
            // No debug info at all; keep the slot so call order stays intact
            // and the frame renders under the "?" sentinel.
            frames.push(RawFrame::default());
            continue;
        }
        // Inlined functions share one stack frame; each symbol becomes its
        // own entry, innermost first, matching how the frames unwound.
        for symbol in symbols {
            let method = symbol
                .name()
                .and_then(|name| name.as_str())
                .map(demangled_name)
                .map(|name| table.add_method(MethodRecord::new(name)));
            frames.push(RawFrame {
                file_path: symbol
                    .filename()
                    .map(|path| path.to_string_lossy().into_owned()),
                line_number: symbol.lineno().unwrap_or(0),
                column_number: symbol.colno().unwrap_or(0),
                method,
            });
        }
    }

    debug!("captured {} raw frames", frames.len());
    StackSnapshot::new(Arc::new(table), frames)
}

/// Demangle a symbol name, dropping the trailing hash suffix.
fn demangled_name(mangled: &str) -> String {
    format!("{:#}", demangle(mangled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demangles_legacy_symbols_without_hash() {
        assert_eq!(
            demangled_name("_ZN4core3ptr8drop_in_place17h1f6df3f1028a7d5eE"),
            "core::ptr::drop_in_place"
        );
    }

    #[test]
    fn test_unmangled_names_pass_through() {
        assert_eq!(demangled_name("main"), "main");
    }

    #[test]
    fn test_empty_backtrace_yields_empty_snapshot() {
        let snapshot = snapshot_of(&Backtrace::from(Vec::new()));
        assert!(snapshot.is_empty());
    }
}
