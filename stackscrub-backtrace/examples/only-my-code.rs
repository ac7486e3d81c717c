//! Reduces a capture to the caller's own code: frames without debug info are
//! dropped, and toolchain/registry frames are denied by substring.

use stackscrub::ScrubOptions;

fn main() {
    env_logger::init();

    let mut options = ScrubOptions::default();
    options.skip_frames_without_line_number = true;
    for noisy in ["/rustc/", ".cargo/registry", "backtrace"] {
        options.skip_frames_containing.insert(noisy.to_owned());
    }

    for frame in stackscrub_backtrace::capture().parse(&options) {
        println!("{frame}");
    }
}
