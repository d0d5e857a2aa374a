//! Identifier helpers shared by every collection.

/// A record carrying a numeric identifier
pub trait Identified {
    fn id(&self) -> u64;
}

/// Next identifier for `records`: one past the current maximum, or 1 when
/// empty. Ids freed by deletions are never handed out again as long as a
/// higher id remains.
///
/// `None` once the maximum is `u64::MAX`.
pub fn next_id<T: Identified>(records: &[T]) -> Option<u64> {
    match records.iter().map(Identified::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Interpret an external id (route value) as a record id.
///
/// Anything that is not a plain non-negative integer yields `None`, which
/// callers report as not found.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Position of the record with `id`, if any
pub fn position_of<T: Identified>(records: &[T], id: u64) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}
