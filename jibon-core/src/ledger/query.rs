//! Recent-history query parameters

/// Number of records returned when no usable limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 100;

/// Upper bound on records returned by one query
pub const MAX_RECENT_LIMIT: usize = 10_000;

/// How many of the newest records to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentLimit(usize);

impl RecentLimit {
    /// Zero falls back to the default
    pub fn new(limit: usize) -> Self {
        match limit {
            0 => Self::default(),
            n => Self(n.min(MAX_RECENT_LIMIT)),
        }
    }

    /// Parse a raw query-string value
    ///
    /// Only the leading digits count, so `5abc` and `2.5` give 5 and 2.
    /// Missing, non-numeric, zero or negative values all mean the default.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(s) = raw.map(str::trim_start) else {
            return Self::default();
        };
        if s.starts_with('-') {
            return Self::default();
        }

        let s = s.strip_prefix('+').unwrap_or(s);
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let digits = &s[..end];
        if digits.is_empty() {
            return Self::default();
        }

        // Too many digits for usize still means "as many as allowed"
        Self::new(digits.parse::<usize>().unwrap_or(MAX_RECENT_LIMIT))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for RecentLimit {
    fn default() -> Self {
        Self(DEFAULT_RECENT_LIMIT)
    }
}
