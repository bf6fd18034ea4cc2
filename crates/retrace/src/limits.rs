//! Engine limits and tuning constants.
//!
//! Every magic number that shapes compilation or matching lives here so the
//! compiler and the matcher agree on them.

// ===== Repetition =====

/// Upper bound used for unbounded quantifiers (`*`, `+`, `{n,}`).
pub const MAX_REPS: usize = usize::MAX;

// ===== Capture slots =====

/// Marker for an unset capture or local slot.
pub const UNSET: usize = usize::MAX;

/// Minimum number of groups (including group 0) a matcher allocates slots
/// for. Back references `\1`..`\9` to groups that do not exist then simply
/// fail instead of reading past the slot array.
pub const MIN_GROUP_SLOTS: usize = 10;

// ===== Literal search =====

/// Shortest leading literal that is worth a Boyer-Moore table.
/// Shorter literals cannot shift further than the generic scan.
pub const BNM_MIN_LENGTH: usize = 4;

/// Size of the bad-character table (indexed by the low 7 bits).
pub const BNM_TABLE_SIZE: usize = 128;

// ===== Code points =====

/// Largest valid Unicode scalar value accepted by `\x{...}`.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

// ===== Matching =====

/// Stack left below which the matcher switches to a fresh stack segment
/// before recursing again. Each repetition of a variable-length group costs
/// a few levels, so long inputs recurse deeply.
pub const STACK_RED_ZONE: usize = 256 * 1024;

/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;
