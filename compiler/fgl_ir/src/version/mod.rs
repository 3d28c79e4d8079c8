//! Language versions.
//!
//! Every built-in symbol and some syntax forms exist only within a window of
//! language versions. The AST carries the configured version; lookups filter
//! on it.

use std::fmt;
use std::str::FromStr;

/// A released language version, ordered oldest to newest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LanguageVersion {
    V2_30,
    V2_40,
    V2_50,
    V3_00,
    V3_10,
    V3_20,
    V4_00,
    #[default]
    V4_01,
}

impl LanguageVersion {
    pub const ALL: &'static [LanguageVersion] = &[
        LanguageVersion::V2_30,
        LanguageVersion::V2_40,
        LanguageVersion::V2_50,
        LanguageVersion::V3_00,
        LanguageVersion::V3_10,
        LanguageVersion::V3_20,
        LanguageVersion::V4_00,
        LanguageVersion::V4_01,
    ];

    pub const OLDEST: LanguageVersion = LanguageVersion::V2_30;
    pub const LATEST: LanguageVersion = LanguageVersion::V4_01;

    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::V2_30 => "2.30",
            LanguageVersion::V2_40 => "2.40",
            LanguageVersion::V2_50 => "2.50",
            LanguageVersion::V3_00 => "3.00",
            LanguageVersion::V3_10 => "3.10",
            LanguageVersion::V3_20 => "3.20",
            LanguageVersion::V4_00 => "4.00",
            LanguageVersion::V4_01 => "4.01",
        }
    }

    /// Position in [`LanguageVersion::ALL`].
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Parse `"3.20"`, `"3.2"` or `"320"`.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.trim().chars().filter(char::is_ascii_digit).collect();
        let normalized = match digits.len() {
            2 => format!("{digits}0"),
            3 => digits,
            _ => return None,
        };
        LanguageVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().replace('.', "") == normalized)
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageVersion::parse(s).ok_or_else(|| format!("unknown language version `{s}`"))
    }
}

/// Inclusive range of versions in which a symbol or syntax form exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionWindow {
    pub min: LanguageVersion,
    pub max: LanguageVersion,
}

impl VersionWindow {
    /// Available in every version.
    pub const ALL: VersionWindow = VersionWindow {
        min: LanguageVersion::OLDEST,
        max: LanguageVersion::LATEST,
    };

    #[inline]
    pub const fn new(min: LanguageVersion, max: LanguageVersion) -> Self {
        VersionWindow { min, max }
    }

    /// Introduced in `min`, still present.
    #[inline]
    pub const fn since(min: LanguageVersion) -> Self {
        VersionWindow {
            min,
            max: LanguageVersion::LATEST,
        }
    }

    /// Present from the start, removed after `max`.
    #[inline]
    pub const fn until(max: LanguageVersion) -> Self {
        VersionWindow {
            min: LanguageVersion::OLDEST,
            max,
        }
    }

    #[inline]
    pub fn contains(self, version: LanguageVersion) -> bool {
        self.min <= version && version <= self.max
    }
}

impl Default for VersionWindow {
    fn default() -> Self {
        VersionWindow::ALL
    }
}

impl fmt::Display for VersionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
