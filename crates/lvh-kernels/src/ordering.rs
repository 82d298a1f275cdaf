//! Orderings used by the catalog views
//!
//! Version labels and build tags are sorted by two different total orders.
//! Labels use semantic-version precedence so that "6.12" follows "6.6".
//! Tags use plain byte order, since build suffixes mix counters with branch
//! names and the last element of a lexical listing is the stable "latest".

use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease};

/// Compare two logical version labels by semantic-version precedence.
///
/// Labels that do not parse as versions sort before every valid version and
/// lexically among themselves. Equal precedence falls back to lexical order,
/// so the result is a total order.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_label(a), parse_label(b)) {
        (Some(va), Some(vb)) => va.cmp_precedence(&vb).then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Compare two tags by plain lexical (byte) order.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// A label parsed as a semantic version.
///
/// Numeric components are kept as digit strings, so components of any length
/// compare correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVersion<'a> {
    core: [&'a str; 3],
    pre: Prerelease,
}

impl<'a> LabelVersion<'a> {
    /// `MAJOR`, `MINOR` and `PATCH` as digit strings
    pub fn core(&self) -> [&'a str; 3] {
        self.core
    }

    /// Precedence order: core numerically, then pre-release. Build metadata
    /// plays no part.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.core
            .iter()
            .zip(other.core.iter())
            .map(|(a, b)| compare_numeric(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

/// Parse a label as a semantic version.
///
/// Accepts the `MAJOR` and `MAJOR.MINOR` shorthands (missing components are
/// zero) in addition to full `MAJOR.MINOR.PATCH[-pre][+build]`.
pub fn parse_label(label: &str) -> Option<LabelVersion<'_>> {
    let (rest, build) = match label.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (label, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 || !parts.iter().all(|p| is_numeric_component(p)) {
        return None;
    }
    // Shorthands carry neither pre-release nor build metadata
    if parts.len() < 3 && (pre.is_some() || build.is_some()) {
        return None;
    }

    if let Some(build) = build {
        if build.is_empty() {
            return None;
        }
        BuildMetadata::new(build).ok()?;
    }
    let pre = match pre {
        Some("") => return None,
        Some(pre) => Prerelease::new(pre).ok()?,
        None => Prerelease::EMPTY,
    };

    let mut padded = ["0"; 3];
    for (slot, part) in padded.iter_mut().zip(parts) {
        *slot = part;
    }
    Some(LabelVersion { core: padded, pre })
}

/// Decimal digits without a leading zero (a lone "0" is fine)
fn is_numeric_component(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'))
}

/// Numeric order of two digit strings without leading zeros
fn compare_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
