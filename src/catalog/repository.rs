//! Catalog repository: load/persist the vector collection and derive
//! listings from it.
//!
//! The entire collection is one JSON document in the catalog store. Every
//! mutation is a read-modify-write cycle over the whole document; there is
//! no locking, so two concurrent mutations can lose an update (last writer
//! wins). That is an accepted limitation at this scale.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{CategoryCount, Vector, RECENT_UPLOAD_DAYS, UNCATEGORIZED};
use crate::store::{DocumentStore, VECTORS_KEY};

/// Listing filter. All present criteria compose by logical AND.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Whitespace-separated search terms; every term must be a substring
    /// of the entry's combined text, case-insensitively
    pub search: Option<String>,
    /// Keep entries uploaded within the last N days
    pub days: Option<i64>,
}

/// Dashboard statistics derived from the collection.
#[derive(Debug, Serialize)]
pub struct CatalogStats {
    #[serde(rename = "totalVectors")]
    pub total_vectors: u64,
    #[serde(rename = "totalDownloads")]
    pub total_downloads: u64,
    #[serde(rename = "totalCategories")]
    pub total_categories: u64,
    #[serde(rename = "recentUploads")]
    pub recent_uploads: u64,
    pub categories: Vec<CategoryCount>,
}

/// Repository over the single vector-collection document.
#[derive(Clone)]
pub struct CatalogRepository {
    store: Arc<dyn DocumentStore>,
}

impl CatalogRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load the full collection. An absent document is the expected
    /// first-run state and yields an empty collection; a malformed
    /// document is surfaced as a store error, never silently reset.
    pub async fn load(&self) -> Result<Vec<Vector>> {
        match self.store.get(VECTORS_KEY).await? {
            Some(raw) => serde_json::from_slice(&raw)
                .map_err(|e| AppError::Store(format!("Malformed vector collection: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full collection as one document.
    pub async fn save(&self, vectors: &[Vector]) -> Result<()> {
        let raw = serde_json::to_vec(vectors)?;
        self.store.put(VECTORS_KEY, Bytes::from(raw)).await
    }

    /// Insert or replace by id. Replacing preserves the existing download
    /// counter; every other field takes the new value. The collection is
    /// kept sorted newest-first so default listings need no extra sort.
    pub async fn upsert(&self, mut entry: Vector) -> Result<Vector> {
        let mut vectors = self.load().await?;

        if let Some(pos) = vectors.iter().position(|v| v.id == entry.id) {
            entry.downloads = vectors[pos].downloads;
            vectors[pos] = entry.clone();
        } else {
            vectors.push(entry.clone());
        }

        vectors.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        self.save(&vectors).await?;
        Ok(entry)
    }

    /// Remove the entry with the given id. Returns whether a removal
    /// occurred; when nothing matched the stored collection is untouched.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut vectors = self.load().await?;
        let before = vectors.len();
        vectors.retain(|v| v.id != id);

        if vectors.len() == before {
            return Ok(false);
        }
        self.save(&vectors).await?;
        Ok(true)
    }

    /// Fetch a single entry by id.
    pub async fn get(&self, id: &str) -> Result<Option<Vector>> {
        Ok(self.load().await?.into_iter().find(|v| v.id == id))
    }

    /// Increment one entry's download counter by 1. Returns whether the
    /// entry was found.
    pub async fn increment_downloads(&self, id: &str) -> Result<bool> {
        let mut vectors = self.load().await?;
        let Some(entry) = vectors.iter_mut().find(|v| v.id == id) else {
            return Ok(false);
        };
        entry.downloads += 1;
        self.save(&vectors).await?;
        Ok(true)
    }

    /// Load the collection and apply a filter.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Vector>> {
        let vectors = self.load().await?;
        Ok(apply_filter(vectors, filter, Utc::now()))
    }

    /// Per-category `{name, count, downloads}` triples, sorted by name.
    pub async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        Ok(category_counts_of(&self.load().await?))
    }

    /// Dashboard statistics.
    pub async fn stats(&self) -> Result<CatalogStats> {
        let vectors = self.load().await?;
        let categories = category_counts_of(&vectors);
        let cutoff = Utc::now() - Duration::days(RECENT_UPLOAD_DAYS);

        Ok(CatalogStats {
            total_vectors: vectors.len() as u64,
            total_downloads: vectors.iter().map(|v| v.downloads).sum(),
            total_categories: categories.len() as u64,
            recent_uploads: vectors.iter().filter(|v| v.upload_date > cutoff).count() as u64,
            categories,
        })
    }
}

/// Apply a listing filter to a collection.
pub fn apply_filter(vectors: Vec<Vector>, filter: &ListFilter, now: DateTime<Utc>) -> Vec<Vector> {
    let cutoff = filter.days.map(|d| now - Duration::days(d));

    vectors
        .into_iter()
        .filter(|v| {
            if let Some(cat) = &filter.category {
                if v.category != *cat {
                    return false;
                }
            }
            if let Some(query) = &filter.search {
                if !matches_search(v, query) {
                    return false;
                }
            }
            if let Some(cutoff) = cutoff {
                if v.upload_date < cutoff {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Every whitespace-separated term of `query` must appear, case-
/// insensitively, somewhere in the entry's title, description or keywords.
fn matches_search(vector: &Vector, query: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        vector.title,
        vector.description,
        vector.keywords.join(" ")
    )
    .to_lowercase();

    query
        .split_whitespace()
        .all(|term| haystack.contains(&term.to_lowercase()))
}

/// Slice out one page of a sequence. Pages are 1-based; a page beyond the
/// end yields an empty slice.
pub fn paginate<T>(seq: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= seq.len() {
        return &[];
    }
    let end = (start + page_size).min(seq.len());
    &seq[start..end]
}

/// Group a collection by category, producing sorted aggregate triples.
/// Entries with an empty category bucket under [`UNCATEGORIZED`].
pub fn category_counts_of(vectors: &[Vector]) -> Vec<CategoryCount> {
    let mut buckets: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for v in vectors {
        let name = if v.category.is_empty() {
            UNCATEGORIZED
        } else {
            v.category.as_str()
        };
        let bucket = buckets.entry(name).or_default();
        bucket.0 += 1;
        bucket.1 += v.downloads;
    }

    buckets
        .into_iter()
        .map(|(name, (count, downloads))| CategoryCount {
            name: name.to_string(),
            count,
            downloads,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FilesystemDocumentStore;
    use tempfile::TempDir;

    fn create_test_repo() -> (CatalogRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FilesystemDocumentStore::new(temp_dir.path().to_path_buf()));
        (CatalogRepository::new(store), temp_dir)
    }

    fn vector(id: &str, category: &str, title: &str, days_ago: i64) -> Vector {
        Vector {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            keywords: Vec::new(),
            file_size: None,
            thumbnail: None,
            upload_date: Utc::now() - Duration::days(days_ago),
            downloads: 0,
        }
    }

    #[tokio::test]
    async fn load_on_empty_store_returns_empty_collection() {
        let (repo, _temp) = create_test_repo();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_surfaces_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FilesystemDocumentStore::new(temp_dir.path().to_path_buf()));
        store
            .put(VECTORS_KEY, Bytes::from_static(b"not json"))
            .await
            .unwrap();
        let repo = CatalogRepository::new(store);

        assert!(matches!(repo.load().await, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn upsert_never_duplicates_ids() {
        let (repo, _temp) = create_test_repo();

        repo.upsert(vector("food-42", "Food", "Pizza", 1)).await.unwrap();
        repo.upsert(vector("food-42", "Food", "Pizza Slice", 0)).await.unwrap();
        repo.upsert(vector("icon-1", "Icon", "Gear", 2)).await.unwrap();

        let vectors = repo.load().await.unwrap();
        assert_eq!(vectors.len(), 2);
        let matching: Vec<_> = vectors.iter().filter(|v| v.id == "food-42").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "Pizza Slice");
    }

    #[tokio::test]
    async fn upsert_preserves_download_counter() {
        let (repo, _temp) = create_test_repo();

        repo.upsert(vector("food-42", "Food", "Pizza", 1)).await.unwrap();
        repo.increment_downloads("food-42").await.unwrap();
        repo.increment_downloads("food-42").await.unwrap();

        let mut replacement = vector("food-42", "Food", "Pizza v2", 0);
        replacement.downloads = 999; // caller-supplied value must not win
        repo.upsert(replacement).await.unwrap();

        let v = repo.get("food-42").await.unwrap().unwrap();
        assert_eq!(v.downloads, 2);
        assert_eq!(v.title, "Pizza v2");
    }

    #[tokio::test]
    async fn collection_is_sorted_newest_first_after_upsert() {
        let (repo, _temp) = create_test_repo();

        repo.upsert(vector("old", "Icon", "Old", 10)).await.unwrap();
        repo.upsert(vector("new", "Icon", "New", 0)).await.unwrap();
        repo.upsert(vector("mid", "Icon", "Mid", 5)).await.unwrap();

        let ids: Vec<_> = repo.load().await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn increment_twice_adds_exactly_two() {
        let (repo, _temp) = create_test_repo();
        repo.upsert(vector("food-42", "Food", "Pizza", 1)).await.unwrap();

        assert!(repo.increment_downloads("food-42").await.unwrap());
        assert!(repo.increment_downloads("food-42").await.unwrap());

        assert_eq!(repo.get("food-42").await.unwrap().unwrap().downloads, 2);
    }

    #[tokio::test]
    async fn increment_unknown_id_reports_missing() {
        let (repo, _temp) = create_test_repo();
        assert!(!repo.increment_downloads("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn remove_unknown_id_leaves_collection_untouched() {
        let (repo, _temp) = create_test_repo();
        repo.upsert(vector("food-42", "Food", "Pizza", 1)).await.unwrap();

        assert!(!repo.remove("ghost").await.unwrap());
        assert_eq!(repo.load().await.unwrap().len(), 1);

        assert!(repo.remove("food-42").await.unwrap());
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[test]
    fn category_filter_partitions_the_collection() {
        let vectors = vec![
            vector("a", "Food", "Pizza", 1),
            vector("b", "Icon", "Gear", 1),
            vector("c", "Food", "Burger", 1),
            vector("d", "", "Stray", 1),
        ];

        let food = apply_filter(
            vectors.clone(),
            &ListFilter { category: Some("Food".into()), ..Default::default() },
            Utc::now(),
        );
        assert!(food.iter().all(|v| v.category == "Food"));
        assert_eq!(food.len(), 2);

        // Union over all appearing categories plus uncategorized covers everything
        let mut seen = 0;
        for cat in ["Food", "Icon", ""] {
            seen += apply_filter(
                vectors.clone(),
                &ListFilter { category: Some(cat.into()), ..Default::default() },
                Utc::now(),
            )
            .len();
        }
        assert_eq!(seen, vectors.len());
    }

    #[test]
    fn search_requires_every_term() {
        let mut red_car = vector("a", "Icon", "Red Car Icon", 1);
        red_car.keywords = vec!["vehicle".into()];
        let red_only = vector("b", "Icon", "Red", 1);

        let filter = ListFilter { search: Some("red car".into()), ..Default::default() };

        assert_eq!(apply_filter(vec![red_car], &filter, Utc::now()).len(), 1);
        assert_eq!(apply_filter(vec![red_only], &filter, Utc::now()).len(), 0);
    }

    #[test]
    fn search_matches_across_fields_case_insensitively() {
        let mut v = vector("a", "Food", "Pizza", 1);
        v.description = "Fresh Italian food".into();
        v.keywords = vec!["Restaurant".into()];

        let hit = ListFilter { search: Some("pizza RESTAURANT italian".into()), ..Default::default() };
        assert_eq!(apply_filter(vec![v.clone()], &hit, Utc::now()).len(), 1);

        let miss = ListFilter { search: Some("pizza sushi".into()), ..Default::default() };
        assert_eq!(apply_filter(vec![v], &miss, Utc::now()).len(), 0);
    }

    #[test]
    fn date_filter_keeps_recent_entries() {
        let vectors = vec![vector("new", "Icon", "New", 2), vector("old", "Icon", "Old", 30)];
        let filter = ListFilter { days: Some(7), ..Default::default() };

        let kept = apply_filter(vectors, &filter, Utc::now());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "new");
    }

    #[test]
    fn paginate_slices_one_based_pages() {
        let seq: Vec<u32> = (0..45).collect();

        assert_eq!(paginate(&seq, 1, 20), &seq[0..20]);
        assert_eq!(paginate(&seq, 3, 20), &seq[40..45]);
        assert_eq!(paginate(&seq, 3, 20).len(), 5);
        assert!(paginate(&seq, 10, 20).is_empty());
        assert!(paginate::<u32>(&[], 1, 20).is_empty());
    }

    #[test]
    fn category_counts_are_sorted_and_aggregate_downloads() {
        let mut a = vector("a", "Food", "Pizza", 1);
        a.downloads = 3;
        let mut b = vector("b", "Food", "Burger", 1);
        b.downloads = 2;
        let c = vector("c", "Abstract", "Swirl", 1);
        let stray = vector("d", "", "Stray", 1);

        let counts = category_counts_of(&[a, b, c, stray]);
        let names: Vec<_> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Abstract", "Food", "Miscellaneous"]);

        let food = counts.iter().find(|c| c.name == "Food").unwrap();
        assert_eq!(food.count, 2);
        assert_eq!(food.downloads, 5);
    }

    #[tokio::test]
    async fn stats_counts_recent_uploads() {
        let (repo, _temp) = create_test_repo();
        repo.upsert(vector("new", "Food", "New", 1)).await.unwrap();
        repo.upsert(vector("old", "Food", "Old", 30)).await.unwrap();
        repo.increment_downloads("new").await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total_vectors, 2);
        assert_eq!(stats.total_downloads, 1);
        assert_eq!(stats.total_categories, 1);
        assert_eq!(stats.recent_uploads, 1);
    }
}
