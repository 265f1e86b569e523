//! Cache-control policies shared by handlers.

/// Per-principal responses: caches must revalidate before reuse.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Probe responses: never stored.
pub const NO_STORE: &str = "no-store";

/// Header tuple for per-principal responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE)
}

/// Header tuple for probe responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
