//! Cached UTC offset with notification-driven invalidation.
//!
//! The offset is read on every local-time conversion, so it is cached once
//! the host promises to report zone changes. Invalidation can arrive from any
//! thread; readers may briefly observe the old offset.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Weak};

use crate::constants::MS_PER_SECOND;
use crate::platform::{MAX_UTC_OFFSET_SECONDS, TimePlatform};

/// Offset from UTC in milliseconds, not including DST, as the host reports it now.
///
/// Offsets beyond a day are clamped to [`MAX_UTC_OFFSET_SECONDS`].
pub fn calculate_utc_offset(platform: &dyn TimePlatform) -> i32 {
    let seconds = platform.raw_utc_offset_seconds();
    let clamped = seconds.clamp(-MAX_UTC_OFFSET_SECONDS, MAX_UTC_OFFSET_SECONDS);
    if clamped != seconds {
        tracing::warn!(offset_seconds = seconds, "host UTC offset out of range, clamping");
    }
    clamped * MS_PER_SECOND as i32
}

/// Best-effort cache of the standard UTC offset.
#[derive(Debug, Default)]
pub struct TimeZoneCache {
    /// In milliseconds
    cached_offset: AtomicI32,
    valid: AtomicBool,
    enabled: AtomicBool,
}

impl TimeZoneCache {
    /// Create a cache that does not cache until [`enable`](Self::enable) is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Start caching and prime the cache from `platform`.
    pub fn enable(&self, platform: &dyn TimePlatform) {
        self.enabled.store(true, Ordering::Relaxed);
        self.refresh(platform);
    }

    /// Whether offsets are being cached
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Whether the cached value may be used
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    /// Recompute the offset from the host and store it.
    pub fn refresh(&self, platform: &dyn TimePlatform) -> i32 {
        let offset = calculate_utc_offset(platform);
        tracing::debug!(offset_ms = offset, "recomputed UTC offset");
        self.cached_offset.store(offset, Ordering::Relaxed);
        self.valid.store(true, Ordering::Relaxed);
        offset
    }

    /// Mark the cached offset stale. The next read recomputes it.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Relaxed);
    }

    /// The UTC offset in milliseconds.
    pub fn utc_offset(&self, platform: &dyn TimePlatform) -> i32 {
        if !self.is_enabled() {
            return calculate_utc_offset(platform);
        }
        if self.is_valid() {
            return self.cached_offset.load(Ordering::Relaxed);
        }
        self.refresh(platform)
    }

    /// A handle that invalidates this cache, for host notification callbacks.
    pub fn invalidator(self: &Arc<Self>) -> TimeZoneInvalidator {
        TimeZoneInvalidator {
            cache: Arc::downgrade(self),
        }
    }
}

/// Invalidates a [`TimeZoneCache`] from a host notification.
///
/// Holds the cache weakly, so a callback outliving its engine is harmless.
#[derive(Debug, Clone)]
pub struct TimeZoneInvalidator {
    cache: Weak<TimeZoneCache>,
}

impl TimeZoneInvalidator {
    /// Mark the cache stale if it still exists.
    pub fn invalidate(&self) {
        if let Some(cache) = self.cache.upgrade() {
            tracing::debug!("time zone changed; invalidating cached UTC offset");
            cache.invalidate();
        }
    }
}
