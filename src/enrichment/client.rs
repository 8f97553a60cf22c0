//! Client for the endoflife.date API with file-based caching.

use crate::error::{EnrichmentErrorKind, FleetEolError, Result};
use crate::model::{BuildData, OsFamily, ReleaseCycle};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Configuration for the build-data client.
#[derive(Debug, Clone)]
pub struct BuildDataConfig {
    /// Cache directory for fetched cycle lists
    pub cache_dir: PathBuf,
    /// Cache TTL for per-family cycle data
    pub cache_ttl: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Bypass cache and fetch fresh data
    pub bypass_cache: bool,
    /// Base URL for the API
    pub base_url: String,
}

impl Default for BuildDataConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_ttl: Duration::from_secs(24 * 3600), // 24 hours
            timeout: Duration::from_secs(15),
            bypass_cache: false,
            base_url: "https://endoflife.date".to_string(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("fleet-eol")
        .join("build-data")
}

/// Statistics from build-data acquisition.
#[derive(Debug, Default, Clone)]
pub struct FetchStats {
    /// API calls made
    pub api_calls: usize,
    /// Cache hits
    pub cache_hits: usize,
    /// Families loaded from local files
    pub local_loads: usize,
}

impl FetchStats {
    pub fn merge(&mut self, other: &Self) {
        self.api_calls += other.api_calls;
        self.cache_hits += other.cache_hits;
        self.local_loads += other.local_loads;
    }
}

/// Fetches per-family release-cycle lists, with a TTL'd file cache.
///
/// A fetch failure for any family aborts the whole acquisition; partial
/// build data would silently misclassify every row of the missing family.
pub struct BuildDataClient {
    config: BuildDataConfig,
}

impl BuildDataClient {
    #[must_use]
    pub fn new(config: BuildDataConfig) -> Self {
        Self { config }
    }

    /// Fetch the datasets for all four families, concurrently.
    pub fn fetch_all(&self) -> Result<(BuildData, FetchStats)> {
        let results: Vec<Result<(OsFamily, Vec<ReleaseCycle>, FetchStats)>> = OsFamily::ALL
            .par_iter()
            .map(|&family| {
                let mut stats = FetchStats::default();
                let cycles = self.fetch_cycles(family, &mut stats)?;
                Ok((family, cycles, stats))
            })
            .collect();

        let mut families = IndexMap::new();
        let mut stats = FetchStats::default();
        for result in results {
            let (family, cycles, family_stats) = result?;
            tracing::debug!(
                family = family.slug(),
                cycles = cycles.len(),
                "build data loaded"
            );
            stats.merge(&family_stats);
            families.insert(family, cycles);
        }

        Ok((BuildData::new(families), stats))
    }

    /// Load build data from a directory of `{slug}.json` files instead of
    /// the API. Every family's file must be present.
    pub fn load_dir(dir: &Path) -> Result<(BuildData, FetchStats)> {
        let mut families = IndexMap::new();
        let mut stats = FetchStats::default();

        for family in OsFamily::ALL {
            let path = dir.join(format!("{}.json", family.slug()));
            if !path.exists() {
                return Err(FleetEolError::enrichment(
                    format!("loading build data from {}", dir.display()),
                    EnrichmentErrorKind::MissingFamily(family.slug().to_string()),
                ));
            }
            let content =
                fs::read_to_string(&path).map_err(|e| FleetEolError::io(path.clone(), e))?;
            let cycles: Vec<ReleaseCycle> = serde_json::from_str(&content).map_err(|e| {
                FleetEolError::enrichment(
                    format!("parsing {}", path.display()),
                    EnrichmentErrorKind::InvalidResponse(e.to_string()),
                )
            })?;
            stats.local_loads += 1;
            families.insert(family, cycles);
        }

        Ok((BuildData::new(families), stats))
    }

    /// Fetch release cycles for one family.
    #[cfg(feature = "enrichment")]
    fn fetch_cycles(&self, family: OsFamily, stats: &mut FetchStats) -> Result<Vec<ReleaseCycle>> {
        let slug = family.slug();
        if self.is_cache_valid(slug) {
            if let Some(cycles) = self.load_from_cache(slug) {
                stats.cache_hits += 1;
                return Ok(cycles);
            }
        }

        let url = format!("{}/api/{}.json", self.config.base_url, slug);
        tracing::debug!(%url, "fetching build data");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| api_error(slug, e.to_string()))?;

        stats.api_calls += 1;
        let response = client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| api_error(slug, e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(
                slug,
                format!("endoflife.date API returned {}", response.status()),
            ));
        }

        let cycles: Vec<ReleaseCycle> = response.json().map_err(|e| {
            FleetEolError::enrichment(
                format!("fetching cycles for '{slug}'"),
                EnrichmentErrorKind::InvalidResponse(e.to_string()),
            )
        })?;

        self.save_to_cache(slug, &cycles)?;
        Ok(cycles)
    }

    #[cfg(not(feature = "enrichment"))]
    fn fetch_cycles(
        &self,
        family: OsFamily,
        _stats: &mut FetchStats,
    ) -> Result<Vec<ReleaseCycle>> {
        Err(api_error(
            family.slug(),
            "built without the 'enrichment' feature; use --build-data DIR".to_string(),
        ))
    }

    // ---- Cache helpers ----

    fn cache_file(&self, slug: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{slug}.json"))
    }

    fn is_cache_valid(&self, slug: &str) -> bool {
        if self.config.bypass_cache {
            return false;
        }
        let cache_path = self.cache_file(slug);
        if !cache_path.exists() {
            return false;
        }
        if let Ok(metadata) = fs::metadata(&cache_path) {
            if let Ok(modified) = metadata.modified() {
                if let Ok(elapsed) = SystemTime::now().duration_since(modified) {
                    return elapsed < self.config.cache_ttl;
                }
            }
        }
        false
    }

    fn load_from_cache(&self, slug: &str) -> Option<Vec<ReleaseCycle>> {
        let content = fs::read_to_string(self.cache_file(slug)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save_to_cache(&self, slug: &str, cycles: &[ReleaseCycle]) -> Result<()> {
        let cache_path = self.cache_file(slug);
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).map_err(|e| cache_error(e.to_string()))?;
        }
        let content = serde_json::to_string(cycles).map_err(|e| cache_error(e.to_string()))?;
        fs::write(&cache_path, content).map_err(|e| cache_error(e.to_string()))?;
        Ok(())
    }
}

fn api_error(slug: &str, message: String) -> FleetEolError {
    FleetEolError::enrichment(
        format!("fetching cycles for '{slug}'"),
        EnrichmentErrorKind::ApiError(message),
    )
}

fn cache_error(message: String) -> FleetEolError {
    FleetEolError::enrichment("build-data cache", EnrichmentErrorKind::CacheError(message))
}
