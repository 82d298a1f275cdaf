//! Kernel tag classification
//!
//! Kernel image tags follow `<label>-<suffix>` where the suffix is either a
//! numeric build counter (`12.345`, or a bare `12`) or the literal `main`.
//! Anything else published in the repository is noise and is dropped without
//! error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Pre-compiled kernel tag pattern; the label capture is greedy
static KERNEL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)-([0-9]+(?:\.[0-9]+)?|main)$").expect("kernel tag regex is valid")
});

/// Marker for obsolete tags that must never surface
const DEPRECATED_MARKER: &str = "-latest";

/// A tag that matched the kernel naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelTag {
    /// Logical version label, e.g. "6.6" or "bpf-next"
    pub label: String,
    /// The full tag string as published
    pub tag: String,
}

/// Classify a raw registry tag.
///
/// Returns `None` for tags that do not match the naming convention and for
/// tags whose label contains `-latest`.
pub fn classify(tag: &str) -> Option<KernelTag> {
    let Some(captures) = KERNEL_TAG_RE.captures(tag) else {
        trace!("Skipping non-kernel tag: {}", tag);
        return None;
    };

    let label = &captures[1];
    if label.contains(DEPRECATED_MARKER) {
        trace!("Skipping deprecated tag: {}", tag);
        return None;
    }

    Some(KernelTag {
        label: label.to_string(),
        tag: captures[0].to_string(),
    })
}
