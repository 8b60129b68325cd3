use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crate::error::ContentError;

/// A loadable asset type.
pub trait Asset: Sized + Send + Sync + 'static {
    /// Per-load options, e.g. texture filtering. Part of the cache key, so the
    /// same file loaded with two configs yields two assets.
    type Config: Default + Clone + Eq + Hash + Send + Sync + 'static;

    fn load(path: &Path, config: &Self::Config) -> Result<Self, ContentError>;
}

type CacheKey = (TypeId, PathBuf, u64);

/// Cache slot; the config is kept to rule out hash collisions.
struct Cached<T: Asset> {
    config: T::Config,
    asset: Arc<T>,
}

/// Loads assets relative to a content root and caches them per type and path.
///
/// Loads are synchronous and only allowed on the context thread, which is the
/// thread that created the manager.
pub struct ContentManager {
    root: PathBuf,
    cache: HashMap<CacheKey, Arc<dyn Any + Send + Sync>>,
    owner: ThreadId,
}

impl ContentManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
            owner: thread::current().id(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_context_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Resolves an asset name against the root. Both `/` and `\` are accepted
    /// as separators.
    pub fn resolve(&self, name: &str) -> PathBuf {
        name.split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn load<T: Asset>(&mut self, name: &str) -> Result<Arc<T>, ContentError> {
        self.load_with::<T>(name, &T::Config::default())
    }

    pub fn load_with<T: Asset>(&mut self, name: &str, config: &T::Config) -> Result<Arc<T>, ContentError> {
        let path = self.resolve(name);
        if !self.is_context_thread() {
            return Err(ContentError::OffContextThread { path });
        }

        if let Some(asset) = self.cached::<T>(&path, config) {
            return Ok(asset);
        }

        if !path.is_file() {
            return Err(ContentError::NotFound(path));
        }

        let asset = Arc::new(T::load(&path, config)?);
        log::debug!("loaded {} as {}", path.display(), std::any::type_name::<T>());
        self.store(path, config, Arc::clone(&asset));
        Ok(asset)
    }

    /// Seeds the cache so later `load::<T>(name)` calls return `asset`
    /// without touching the filesystem.
    pub fn insert<T: Asset>(&mut self, name: &str, asset: T) -> Arc<T> {
        self.insert_with(name, &T::Config::default(), asset)
    }

    /// Like `insert`, for `load_with::<T>(name, config)`.
    pub fn insert_with<T: Asset>(&mut self, name: &str, config: &T::Config, asset: T) -> Arc<T> {
        let asset = Arc::new(asset);
        self.store(self.resolve(name), config, Arc::clone(&asset));
        asset
    }

    pub fn is_loaded<T: Asset>(&self, name: &str) -> bool {
        self.cached::<T>(&self.resolve(name), &T::Config::default()).is_some()
    }

    fn cached<T: Asset>(&self, path: &Path, config: &T::Config) -> Option<Arc<T>> {
        let key = (TypeId::of::<T>(), path.to_path_buf(), config_hash(config));
        let slot = Arc::clone(self.cache.get(&key)?).downcast::<Cached<T>>().ok()?;
        (slot.config == *config).then(|| Arc::clone(&slot.asset))
    }

    fn store<T: Asset>(&mut self, path: PathBuf, config: &T::Config, asset: Arc<T>) {
        let key = (TypeId::of::<T>(), path, config_hash(config));
        self.cache.insert(key, Arc::new(Cached { config: config.clone(), asset }));
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

fn config_hash<C: Hash>(config: &C) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}
