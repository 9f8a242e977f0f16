use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Offset/limit window over a listing.
///
/// Built from raw query-string values the way the listing endpoints read
/// them: only the leading integer counts, and anything out of bounds falls
/// back to the default instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit },
            offset,
        }
    }

    /// Parse `limit` / `offset` query values.
    ///
    /// - limit: absent, unparsable, zero or negative → 10
    /// - offset: absent, unparsable or negative → 0
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(parse_leading_int)
            .filter(|l| *l > 0)
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = offset
            .and_then(parse_leading_int)
            .filter(|o| *o >= 0)
            .and_then(|o| usize::try_from(o).ok())
            .unwrap_or(0);
        Self { limit, offset }
    }

    /// Slice an in-memory listing; out-of-range offsets yield an empty page.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}

/// Leading optional sign and digits, ignoring leading whitespace and any
/// trailing garbage ("12abc" → 12).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
