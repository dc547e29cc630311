//! In-memory caching using moka
//!
//! Caches booked ranges and rates per property plus the property list.
//! Booked ranges change whenever a reservation is made, so their TTL is short.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::availability::DateRange;
use crate::db::queries;
use crate::models::Property;
use crate::pricing::models::PropertyRate;
use crate::pricing::queries as pricing_queries;

const PROPERTY_LIST_KEY: &str = "properties:all";

/// Application cache
#[derive(Clone)]
pub struct AppCache {
    /// Blocking booked ranges (property_id -> ranges)
    pub bookings: Cache<i64, Arc<Vec<DateRange>>>,
    /// Property rates (property_id -> rate)
    pub rates: Cache<i64, Arc<PropertyRate>>,
    /// Property list (singleton)
    pub properties: Cache<String, Arc<Vec<Property>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Bookings: 1000 properties, 1 min TTL
            bookings: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(60))
                .build(),

            // Rates: 1000 entries, 15 min TTL, 5 min idle
            rates: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Property list: 1 entry, 5 min TTL
            properties: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            bookings_size: self.bookings.entry_count(),
            rates_size: self.rates.entry_count(),
            properties_cached: self.properties.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.bookings.invalidate_all();
        self.rates.invalidate_all();
        self.properties.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate everything cached for one property
    pub async fn invalidate_property(&self, property_id: i64) {
        self.bookings.invalidate(&property_id).await;
        self.rates.invalidate(&property_id).await;
        // the list embeds the property too
        self.properties.invalidate_all();
        info!("Cache invalidated for property: {}", property_id);
    }

    pub async fn property_list(&self) -> Option<Arc<Vec<Property>>> {
        self.properties.get(PROPERTY_LIST_KEY).await
    }

    pub async fn store_property_list(&self, properties: Vec<Property>) -> Arc<Vec<Property>> {
        let properties = Arc::new(properties);
        self.properties
            .insert(PROPERTY_LIST_KEY.to_string(), Arc::clone(&properties))
            .await;
        properties
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub bookings_size: u64,
    pub rates_size: u64,
    pub properties_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        // first tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match pricing_queries::list_property_rates(db).await {
        Ok(rates) => {
            for rate in rates {
                cache.rates.insert(rate.property_id, Arc::new(rate)).await;
            }
        }
        Err(e) => warn!("Failed to warm rate cache: {}", e),
    }

    match queries::list_properties(db).await {
        Ok(properties) => {
            cache.store_property_list(properties).await;
        }
        Err(e) => warn!("Failed to warm property list cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
