//! Clients number categories from zero while storage keys start at one.
//! The offset is part of the client contract, so it lives here instead of
//! being folded into queries.

/// External (zero-based) category id to internal storage key.
///
/// No range check: an unknown key comes back as "not found" from the store.
pub const fn to_internal(external: i64) -> i64 {
    external.wrapping_add(1)
}

/// Internal storage key to external (zero-based) category id.
pub const fn to_external(internal: i64) -> i64 {
    internal.wrapping_sub(1)
}
