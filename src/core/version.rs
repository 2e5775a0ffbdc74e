//! core::version
//!
//! Dotted application versions.
//!
//! # Comparison
//!
//! Versions compare component-wise as unsigned integers. Missing trailing
//! components count as zero, so `1.0` and `1.0.0` are equal. Anything after
//! the first `-` is a pre-release tag: a tagged version sorts before the same
//! untagged release (`1.0.0-beta < 1.0.0`), and two tags compare as strings.
//!
//! # Example
//!
//! ```
//! use switchyard::core::version::Version;
//!
//! let running = Version::parse("1.10.0").unwrap();
//! let tagged = Version::parse("1.9").unwrap();
//! assert!(tagged <= running);
//! assert!(Version::parse("1.10.0-rc1").unwrap() < running);
//! assert_eq!(running.slug(), "v1_10_0");
//! ```

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// Errors from version parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version component '{component}' in '{version}'")]
    InvalidComponent { version: String, component: String },
}

/// A parsed dotted version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    parts: Vec<u64>,
    pre: Option<String>,
}

impl Version {
    /// Parse a dotted version string.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let (release, pre) = match trimmed.split_once('-') {
            Some((release, pre)) => (release, Some(pre.to_string())),
            None => (trimmed, None),
        };

        let parts = release
            .split('.')
            .map(|component| {
                component
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidComponent {
                        version: trimmed.to_string(),
                        component: component.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: trimmed.to_string(),
            parts,
            pre,
        })
    }

    /// The version as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Cookie-safe slug: `v` followed by the version with dots replaced by
    /// underscores (`1.0.0` -> `v1_0_0`).
    pub fn slug(&self) -> String {
        format!("v{}", self.raw.replace('.', "_"))
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        let release = (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal);

        release.then_with(|| match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).expect("valid version")
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("0.2") < v("0.10"));
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert!(v("1") < v("1.0.1"));
    }

    #[test]
    fn pre_release_sorts_before_release() {
        assert!(v("1.0.0-beta") < v("1.0.0"));
        assert!(v("1.0.0-beta") > v("0.9.9"));
        assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
        assert_eq!(v("1.0-rc1"), v("1.0.0-rc1"));
        assert_eq!(v("2.0.1-beta").as_str(), "2.0.1-beta");
    }

    #[test]
    fn slug_replaces_dots() {
        assert_eq!(v("1.0.0").slug(), "v1_0_0");
        assert_eq!(v("12.3").slug(), "v12_3");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(Version::parse("  "), Err(VersionError::Empty));
        assert!(matches!(
            Version::parse("1.x.0"),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(Version::parse("1.0rc1").is_err());
    }
}
