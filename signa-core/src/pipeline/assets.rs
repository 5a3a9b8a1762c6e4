//! Animation asset existence lookups.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::error::LookupError;

/// Default bound on the number of names a [`CachedLookup`] holds.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;
/// Default lifetime of a cached answer.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Answers whether an animation asset exists.
pub trait AssetLookup {
    /// Returns `true` if an asset named `asset_name` (e.g. `home.mp4`) exists.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` when the backing store cannot be queried. A missing
    /// asset is `Ok(false)`, never an error.
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError>;
}

impl<T: AssetLookup + ?Sized> AssetLookup for &T {
    #[inline]
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
        (**self).exists(asset_name)
    }
}

impl<T: AssetLookup + ?Sized> AssetLookup for Box<T> {
    #[inline]
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
        (**self).exists(asset_name)
    }
}

/// Asset name is a single plain file name.
fn is_plain_name(asset_name: &str) -> bool {
    if asset_name.is_empty() || asset_name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(asset_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Looks assets up as files under an ordered list of root directories.
///
/// The first root containing the file wins. Names that are not a single plain
/// file name (path separators, `.`, `..`, NUL) are reported as missing without
/// touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct DirectoryAssets {
    roots: Vec<PathBuf>,
}

impl DirectoryAssets {
    /// Lookup over a single root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Lookup over several roots, searched in order.
    pub fn with_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Root directories in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Stems of the `*.<extension>` files directly under the roots, sorted
    /// and deduplicated. A root that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// `LookupError` naming the root if a directory cannot be listed.
    pub fn clip_stems(&self, extension: &str) -> Result<Vec<String>, LookupError> {
        let mut stems = FxHashSet::default();
        for root in &self.roots {
            let listing_error = |e: io::Error| LookupError::new(root.display().to_string(), e);
            let entries = match fs::read_dir(root) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(listing_error(e)),
            };
            for entry in entries {
                let path = entry.map_err(listing_error)?.path();
                if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                    continue;
                }
                if !fs::metadata(&path).is_ok_and(|m| m.is_file()) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.insert(stem.to_string());
                }
            }
        }

        let mut stems: Vec<String> = stems.into_iter().collect();
        stems.sort_unstable();
        trace!(count = stems.len(), "clip stems listed");
        Ok(stems)
    }
}

impl AssetLookup for DirectoryAssets {
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
        if !is_plain_name(asset_name) {
            trace!(asset = asset_name, "rejected asset name");
            return Ok(false);
        }

        for root in &self.roots {
            match fs::metadata(root.join(asset_name)) {
                Ok(meta) if meta.is_file() => return Ok(true),
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(LookupError::new(asset_name, e)),
            }
        }
        Ok(false)
    }
}

/// In-memory asset set.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    names: FxHashSet<String>,
}

impl MemoryAssets {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset name.
    pub fn insert(&mut self, asset_name: impl Into<String>) {
        self.names.insert(asset_name.into());
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if there are no assets.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Stems of the names ending in `.<extension>`, sorted.
    pub fn clip_stems(&self, extension: &str) -> Vec<String> {
        let mut stems: Vec<String> = self
            .names
            .iter()
            .filter_map(|name| name.strip_suffix(extension)?.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .collect();
        stems.sort_unstable();
        stems
    }
}

impl<S: Into<String>> FromIterator<S> for MemoryAssets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetLookup for MemoryAssets {
    #[inline]
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
        Ok(self.names.contains(asset_name))
    }
}

/// Hit and miss counts of a [`CachedLookup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Answers served from the cache.
    pub hits: u64,
    /// Answers fetched from the inner lookup.
    pub misses: u64,
    /// Names currently cached.
    pub entries: usize,
}

impl core::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} hits, {} misses, {} entries",
            self.hits, self.misses, self.entries
        )
    }
}

/// Read-through cache over another lookup.
///
/// Only positive answers are cached, so a clip added while the pipeline runs
/// is found on the next request. Entries expire after the TTL, which bounds
/// how long a deleted clip is still reported. At capacity, expired entries
/// are purged first and then the oldest entry is evicted. Errors are never
/// cached.
///
/// Not `Sync`; one cache belongs to one pipeline.
#[derive(Debug)]
pub struct CachedLookup<L> {
    inner: L,
    capacity: usize,
    ttl: Duration,
    cache: RefCell<FxHashMap<String, CacheEntry>>,
    next_seq: Cell<u64>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    stored: Instant,
    seq: u64,
}

impl<L: AssetLookup> CachedLookup<L> {
    /// Wraps `inner` with [`DEFAULT_CACHE_CAPACITY`] and [`DEFAULT_CACHE_TTL`].
    pub fn new(inner: L) -> Self {
        Self::with_policy(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }

    /// Wraps `inner`, holding at most `capacity` names for `ttl` each.
    ///
    /// A zero capacity or zero TTL turns every request into a miss.
    pub fn with_policy(inner: L, capacity: usize, ttl: Duration) -> Self {
        Self {
            inner,
            capacity,
            ttl,
            cache: RefCell::new(FxHashMap::default()),
            next_seq: Cell::new(0),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            entries: self.cache.borrow().len(),
        }
    }

    /// Drops cached answers and resets the counters.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }

    /// The wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored) < self.ttl
    }

    fn store(&self, asset_name: &str, now: Instant) {
        if self.capacity == 0 || self.ttl.is_zero() {
            return;
        }
        let mut cache = self.cache.borrow_mut();
        if !cache.contains_key(asset_name) && cache.len() >= self.capacity {
            cache.retain(|_, entry| self.is_fresh(entry, now));
            if cache.len() >= self.capacity {
                let oldest = cache
                    .iter()
                    .min_by_key(|(_, entry)| entry.seq)
                    .map(|(name, _)| name.clone());
                if let Some(name) = oldest {
                    trace!(asset = %name, "evicting cached asset");
                    cache.remove(&name);
                }
            }
        }

        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        cache.insert(asset_name.to_string(), CacheEntry { stored: now, seq });
    }
}

impl<L: AssetLookup> AssetLookup for CachedLookup<L> {
    fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
        let now = Instant::now();
        let fresh = self
            .cache
            .borrow()
            .get(asset_name)
            .is_some_and(|entry| self.is_fresh(entry, now));
        if fresh {
            self.hits.set(self.hits.get() + 1);
            return Ok(true);
        }

        self.misses.set(self.misses.get() + 1);
        let found = self.inner.exists(asset_name)?;
        if found {
            self.store(asset_name, now);
        } else {
            self.cache.borrow_mut().remove(asset_name);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        assert!(is_plain_name("home.mp4"));
        assert!(is_plain_name("..mp4"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name("."));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("a/b.mp4"));
        assert!(!is_plain_name("a\\b.mp4"));
        assert!(!is_plain_name("/etc/passwd"));
        assert!(!is_plain_name("a\0.mp4"));
    }

    #[test]
    fn directory_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.mp4"), b"").unwrap();

        let assets = DirectoryAssets::new(dir.path());
        assert!(assets.exists("home.mp4").unwrap());
        assert!(!assets.exists("go.mp4").unwrap());
    }

    #[test]
    fn directory_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("go.mp4")).unwrap();
        assert!(!DirectoryAssets::new(dir.path()).exists("go.mp4").unwrap());
    }

    #[test]
    fn roots_searched_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("go.mp4"), b"").unwrap();

        let assets = DirectoryAssets::with_roots([first.path(), second.path()]);
        assert_eq!(assets.roots().len(), 2);
        assert!(assets.exists("go.mp4").unwrap());
    }

    #[test]
    fn missing_root_is_not_found() {
        let assets = DirectoryAssets::new("/nonexistent/signa/assets");
        assert!(!assets.exists("home.mp4").unwrap());
    }

    #[test]
    fn traversal_never_escapes_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("assets");
        fs::create_dir(&root).unwrap();
        fs::write(dir.path().join("secret.mp4"), b"").unwrap();

        let assets = DirectoryAssets::new(&root);
        assert!(!assets.exists("../secret.mp4").unwrap());
        assert!(!assets.exists("..").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn io_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file_root = dir.path().join("not-a-dir");
        fs::write(&file_root, b"").unwrap();

        // joining under a regular file fails with ENOTDIR, not NotFound
        let err = DirectoryAssets::new(&file_root)
            .exists("home.mp4")
            .unwrap_err();
        assert_eq!(err.asset, "home.mp4");
    }

    #[test]
    fn directory_clip_stems() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        for name in ["apple.mp4", "Before.mp4", "notes.txt"] {
            fs::write(first.path().join(name), b"").unwrap();
        }
        fs::write(second.path().join("apple.mp4"), b"").unwrap();
        fs::write(second.path().join("tree.mp4"), b"").unwrap();
        fs::create_dir(second.path().join("dir.mp4")).unwrap();

        let assets = DirectoryAssets::with_roots([
            first.path(),
            second.path(),
            Path::new("/nonexistent/signa/assets"),
        ]);
        assert_eq!(assets.clip_stems("mp4").unwrap(), ["Before", "apple", "tree"]);
        assert!(assets.clip_stems("webm").unwrap().is_empty());
    }

    #[test]
    fn memory_assets() {
        let assets: MemoryAssets = ["home.mp4", "go.mp4"].into_iter().collect();
        assert_eq!(assets.len(), 2);
        assert!(assets.exists("home.mp4").unwrap());
        assert!(!assets.exists("Home.mp4").unwrap());
        assert_eq!(assets.clip_stems("mp4"), ["go", "home"]);
        assert!(assets.clip_stems("webm").is_empty());
    }

    struct FlakyLookup {
        calls: Cell<u32>,
    }

    impl AssetLookup for FlakyLookup {
        fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
            self.calls.set(self.calls.get() + 1);
            if asset_name == "bad.mp4" {
                return Err(LookupError::new(asset_name, io::Error::other("disk on fire")));
            }
            Ok(asset_name == "home.mp4")
        }
    }

    #[test]
    fn cache_serves_repeated_hits() {
        let cached = CachedLookup::new(FlakyLookup { calls: Cell::new(0) });
        assert!(cached.exists("home.mp4").unwrap());
        assert!(cached.exists("home.mp4").unwrap());
        assert!(!cached.exists("go.mp4").unwrap());
        assert!(!cached.exists("go.mp4").unwrap());

        // misses always reach the inner lookup
        assert_eq!(cached.inner().calls.get(), 3);
        assert_eq!(
            cached.stats(),
            CacheStats {
                hits: 1,
                misses: 3,
                entries: 1
            }
        );
    }

    #[test]
    fn cache_respects_capacity() {
        let inner = MemoryAssets::from_iter(["a.mp4", "b.mp4", "c.mp4"]);
        let cached = CachedLookup::with_policy(inner, 2, DEFAULT_CACHE_TTL);
        for name in ["a.mp4", "b.mp4", "c.mp4"] {
            assert!(cached.exists(name).unwrap());
        }
        assert_eq!(cached.stats().entries, 2);

        // "a" was the oldest and got evicted
        assert!(cached.exists("b.mp4").unwrap());
        assert!(cached.exists("c.mp4").unwrap());
        assert_eq!(cached.stats().hits, 2);
        assert!(cached.exists("a.mp4").unwrap());
        assert_eq!(cached.stats().misses, 4);
        assert_eq!(cached.stats().entries, 2);
    }

    #[test]
    fn clip_added_later_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedLookup::new(DirectoryAssets::new(dir.path()));
        assert!(!cached.exists("apple.mp4").unwrap());

        fs::write(dir.path().join("apple.mp4"), b"").unwrap();
        assert!(cached.exists("apple.mp4").unwrap());
        assert!(cached.exists("apple.mp4").unwrap());
        assert_eq!((cached.stats().hits, cached.stats().misses), (1, 2));
    }

    #[test]
    fn expired_entries_are_refetched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.mp4"), b"").unwrap();
        let cached = CachedLookup::with_policy(DirectoryAssets::new(dir.path()), 8, Duration::ZERO);
        assert!(cached.exists("home.mp4").unwrap());
        assert_eq!(cached.stats().entries, 0);

        fs::remove_file(dir.path().join("home.mp4")).unwrap();
        assert!(!cached.exists("home.mp4").unwrap());
        assert_eq!(cached.stats().hits, 0);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cached = CachedLookup::with_policy(
            FlakyLookup { calls: Cell::new(0) },
            0,
            DEFAULT_CACHE_TTL,
        );
        cached.exists("home.mp4").unwrap();
        cached.exists("home.mp4").unwrap();
        assert_eq!(cached.inner().calls.get(), 2);
        assert_eq!(cached.stats().entries, 0);
    }

    #[test]
    fn cache_does_not_store_errors() {
        let cached = CachedLookup::new(FlakyLookup { calls: Cell::new(0) });
        assert!(cached.exists("bad.mp4").is_err());
        assert!(cached.exists("bad.mp4").is_err());
        assert_eq!(cached.inner().calls.get(), 2);
        assert_eq!(cached.stats().entries, 0);
    }

    #[test]
    fn cache_clear_resets() {
        let cached = CachedLookup::new(MemoryAssets::from_iter(["home.mp4"]));
        cached.exists("home.mp4").unwrap();
        cached.exists("home.mp4").unwrap();
        cached.clear();
        assert_eq!(cached.stats(), CacheStats::default());
    }

    #[test]
    fn boxed_lookup() {
        let boxed: Box<dyn AssetLookup> = Box::new(MemoryAssets::from_iter(["a.mp4"]));
        assert!(boxed.exists("a.mp4").unwrap());
    }
}
