//! Local data caching
//!
//! Time-bounded JSON cache for fetched market data, keyed by ticker and
//! endpoint. Keeps repeated pricing sessions from hammering the quote API.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{BsmError, BsmResult, QuoteChain};
use crate::data::yahoo::{SpotQuote, YahooClient};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 1,
            enabled: true,
        }
    }
}

/// Data cache manager
pub struct DataCache {
    config: CacheConfig,
}

impl DataCache {
    pub fn new(config: CacheConfig) -> BsmResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir).map_err(BsmError::IO)?;
        }

        Ok(Self { config })
    }

    /// Cache file for a ticker and endpoint
    fn cache_key(&self, ticker: &str, endpoint: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_{}.json", ticker, endpoint))
    }

    /// Check if a cache entry exists and is within its TTL
    pub fn is_valid(&self, ticker: &str, endpoint: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(ticker, endpoint);
        if !path.exists() {
            return false;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save a value under (ticker, endpoint)
    pub fn save<T: Serialize>(&self, ticker: &str, endpoint: &str, value: &T) -> BsmResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(ticker, endpoint);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| BsmError::serialization(e.to_string()))?;

        fs::write(&path, json).map_err(BsmError::IO)?;

        tracing::info!(ticker, endpoint, ?path, "cached");
        Ok(())
    }

    /// Load a value under (ticker, endpoint), `None` when missing or expired
    pub fn load<T: DeserializeOwned>(&self, ticker: &str, endpoint: &str) -> BsmResult<Option<T>> {
        if !self.config.enabled || !self.is_valid(ticker, endpoint) {
            return Ok(None);
        }

        let path = self.cache_key(ticker, endpoint);
        let json = fs::read_to_string(&path).map_err(BsmError::IO)?;

        let value: T =
            serde_json::from_str(&json).map_err(|e| BsmError::serialization(e.to_string()))?;

        tracing::info!(ticker, endpoint, "loaded from cache");
        Ok(Some(value))
    }

    /// Clear cache entries for a ticker
    pub fn clear(&self, ticker: &str) -> BsmResult<()> {
        if !self.config.cache_dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.config.cache_dir).map_err(BsmError::IO)? {
            let entry = entry.map_err(BsmError::IO)?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with(&format!("{}_", ticker)) {
                fs::remove_file(entry.path()).map_err(BsmError::IO)?;
            }
        }

        Ok(())
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> BsmResult<()> {
        if self.config.cache_dir.exists() {
            fs::remove_dir_all(&self.config.cache_dir).map_err(BsmError::IO)?;
            fs::create_dir_all(&self.config.cache_dir).map_err(BsmError::IO)?;
        }
        Ok(())
    }
}

/// Cached market-data fetcher: cache first, live API on miss
pub struct CachedFetcher {
    cache: DataCache,
    client: YahooClient,
}

impl CachedFetcher {
    pub fn new(config: CacheConfig) -> BsmResult<Self> {
        Ok(Self {
            cache: DataCache::new(config)?,
            client: YahooClient::new(),
        })
    }

    /// Latest spot quote
    pub fn get_spot(&self, ticker: &str) -> BsmResult<SpotQuote> {
        if let Some(quote) = self.cache.load(ticker, "spot")? {
            return Ok(quote);
        }

        tracing::info!(ticker, "fetching fresh spot quote");
        let quote = self.client.get_quote(ticker)?;
        self.cache.save(ticker, "spot", &quote)?;

        Ok(quote)
    }

    /// Available option expiration dates
    pub fn get_expirations(&self, ticker: &str) -> BsmResult<Vec<NaiveDate>> {
        if let Some(expirations) = self.cache.load(ticker, "expirations")? {
            return Ok(expirations);
        }

        tracing::info!(ticker, "fetching fresh expiration dates");
        let expirations = self.client.get_expirations(ticker)?;
        self.cache.save(ticker, "expirations", &expirations)?;

        Ok(expirations)
    }

    /// Option chain for a specific expiry
    pub fn get_chain(&self, ticker: &str, expiry: NaiveDate) -> BsmResult<QuoteChain> {
        let endpoint = format!("chain_{}", expiry);

        if let Some(chain) = self.cache.load(ticker, &endpoint)? {
            return Ok(chain);
        }

        tracing::info!(ticker, %expiry, "fetching fresh option chain");
        let chain = self.client.get_option_chain(ticker, expiry)?;
        self.cache.save(ticker, &endpoint, &chain)?;

        Ok(chain)
    }

    /// Force refresh for a ticker (bypass cache)
    pub fn refresh(&self, ticker: &str) -> BsmResult<()> {
        self.cache.clear(ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_cache_round_trip() {
        let temp_dir = tempdir().unwrap();
        let config = CacheConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            max_age_hours: 1,
            enabled: true,
        };

        let cache = DataCache::new(config).unwrap();

        let expiry = Utc::now().date_naive() + Duration::days(30);
        let chain = QuoteChain::new("TEST", 100.0, expiry);

        cache.save("TEST", "chain", &chain).unwrap();
        assert!(cache.is_valid("TEST", "chain"));

        let loaded: Option<QuoteChain> = cache.load("TEST", "chain").unwrap();
        assert_eq!(loaded.unwrap().underlying, "TEST");

        cache.clear("TEST").unwrap();
        assert!(!cache.is_valid("TEST", "chain"));
    }

    #[test]
    fn test_cache_disabled() {
        let temp_dir = tempdir().unwrap();
        let config = CacheConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            max_age_hours: 1,
            enabled: false,
        };

        let cache = DataCache::new(config).unwrap();
        cache.save("TEST", "spot", &42.0_f64).unwrap();

        let loaded: Option<f64> = cache.load("TEST", "spot").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_cache_keys_are_per_endpoint() {
        let temp_dir = tempdir().unwrap();
        let config = CacheConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            max_age_hours: 1,
            enabled: true,
        };

        let cache = DataCache::new(config).unwrap();
        cache.save("TEST", "spot", &100.5_f64).unwrap();

        assert!(cache.is_valid("TEST", "spot"));
        assert!(!cache.is_valid("TEST", "expirations"));
        assert!(!cache.is_valid("OTHER", "spot"));
    }
}
