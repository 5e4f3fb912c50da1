//! Main CatalogStore struct tying the collection and subscriptions together.

use crate::error::{CatalogError, Result};
use crate::seed::CatalogSeed;
use crate::subscriptions::{SubscriptionConfig, SubscriptionHandle, SubscriptionManager};
use crate::types::{CatalogStats, Keyboard, KeyboardId, Manufacturer, ManufacturerId, Revision};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Where the initial dataset comes from.
#[derive(Clone, Debug, Default)]
pub enum SeedSource {
    /// The built-in Apple / IBM / Dell dataset.
    #[default]
    Defaults,
    /// No manufacturers, no keyboards.
    Empty,
    /// A seed constructed by the caller.
    Inline(CatalogSeed),
    /// A JSON seed file.
    Path(PathBuf),
}

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// Initial dataset.
    pub seed: SeedSource,
}

/// Keyboards in iteration order with an id index.
#[derive(Default)]
struct KeyboardTable {
    revision: Revision,
    rows: Vec<Keyboard>,
    positions: HashMap<KeyboardId, usize>,
}

impl KeyboardTable {
    fn from_rows(rows: Vec<Keyboard>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(rows.len());
        for (position, keyboard) in rows.iter().enumerate() {
            if positions.insert(keyboard.id(), position).is_some() {
                return Err(CatalogError::DuplicateKeyboard(keyboard.id()));
            }
        }

        Ok(Self {
            revision: Revision::default(),
            rows,
            positions,
        })
    }

    fn get(&self, id: KeyboardId) -> Option<&Keyboard> {
        self.positions.get(&id).map(|&position| &self.rows[position])
    }

    /// Replace in place, keeping the row's position.
    fn replace(&mut self, keyboard: Keyboard) -> Result<Revision> {
        let position = *self
            .positions
            .get(&keyboard.id())
            .ok_or(CatalogError::KeyboardNotFound(keyboard.id()))?;

        let current = &self.rows[position];
        if current.manufacturer_id() != keyboard.manufacturer_id() {
            return Err(CatalogError::ManufacturerMismatch {
                keyboard: keyboard.id(),
                expected: current.manufacturer_id(),
                got: keyboard.manufacturer_id(),
            });
        }

        self.rows[position] = keyboard;
        self.revision = self.revision.next();
        Ok(self.revision)
    }
}

/// The authoritative keyboard catalog.
///
/// Provides a unified interface for:
/// - Live, manufacturer-filtered subscriptions
/// - Single-record updates
/// - Consistent point-in-time reads
///
/// One writer at a time: updates and subscription registration share
/// `write_lock`, and subscribers are notified before it is released.
pub struct CatalogStore {
    /// Manufacturers in seed order. Never mutated after open.
    manufacturers: Vec<Manufacturer>,

    /// The keyboard collection.
    keyboards: RwLock<KeyboardTable>,

    /// Subscription fan-out.
    subscriptions: Arc<SubscriptionManager>,

    /// Lock for write operations to ensure atomicity.
    write_lock: Mutex<()>,
}

impl CatalogStore {
    /// Open a store from the configured seed.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let seed = match config.seed {
            SeedSource::Defaults => CatalogSeed::defaults(),
            SeedSource::Empty => CatalogSeed::empty(),
            SeedSource::Inline(seed) => seed,
            SeedSource::Path(path) => CatalogSeed::load(&path)?,
        };

        Self::from_seed(seed)
    }

    /// Store seeded with the built-in dataset.
    pub fn with_defaults() -> Self {
        Self::from_seed(CatalogSeed::defaults()).expect("built-in seed is valid")
    }

    /// Build a store from a seed. Only id uniqueness is checked here; the
    /// seed is otherwise trusted.
    pub fn from_seed(seed: CatalogSeed) -> Result<Self> {
        let mut seen = HashSet::with_capacity(seed.manufacturers.len());
        for manufacturer in &seed.manufacturers {
            if !seen.insert(manufacturer.id()) {
                return Err(CatalogError::DuplicateManufacturer(manufacturer.id()));
            }
        }

        let table = KeyboardTable::from_rows(seed.keyboards)?;

        info!(
            manufacturers = seed.manufacturers.len(),
            keyboards = table.rows.len(),
            "catalog store opened"
        );

        Ok(Self {
            manufacturers: seed.manufacturers,
            keyboards: RwLock::new(table),
            subscriptions: Arc::new(SubscriptionManager::new()),
            write_lock: Mutex::new(()),
        })
    }

    // --- Subscriptions ---

    /// Live view of one manufacturer's keyboards.
    ///
    /// The current snapshot is queued before this returns; every later
    /// update queues a fresh one. An unknown manufacturer id yields empty
    /// snapshots forever.
    pub fn subscribe(&self, manufacturer_id: ManufacturerId) -> SubscriptionHandle {
        self.subscribe_with(SubscriptionConfig::manufacturer(manufacturer_id))
    }

    /// Subscribe with an explicit configuration.
    pub fn subscribe_with(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let _lock = self.write_lock.lock();

        let table = self.keyboards.read();
        self.subscriptions
            .subscribe(config, &table.rows, table.revision)
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }

    // --- Updates ---

    /// Replace the stored record with the same id.
    ///
    /// Fails with [`CatalogError::KeyboardNotFound`] if no such record
    /// exists, or [`CatalogError::ManufacturerMismatch`] if the update
    /// would move the keyboard to another manufacturer. Nothing is written
    /// on failure.
    pub fn update(&self, keyboard: Keyboard) -> Result<Revision> {
        let _lock = self.write_lock.lock();

        let id = keyboard.id();
        let revision = self.keyboards.write().replace(keyboard)?;

        // Readers may proceed while subscribers are notified; writers wait.
        let table = self.keyboards.read();
        self.subscriptions.broadcast(&table.rows, revision);

        debug!(keyboard = %id, ?revision, "keyboard updated");
        Ok(revision)
    }

    /// Set the favorite flag on a stored keyboard.
    pub fn set_favorite(&self, id: KeyboardId, favorite: bool) -> Result<Keyboard> {
        let keyboard = self
            .keyboard(id)
            .ok_or(CatalogError::KeyboardNotFound(id))?
            .with_favorite(favorite);
        self.update(keyboard.clone())?;
        Ok(keyboard)
    }

    /// Flip the favorite flag on a stored keyboard.
    pub fn toggle_favorite(&self, id: KeyboardId) -> Result<Keyboard> {
        let _lock = self.write_lock.lock();

        let toggled = {
            let mut table = self.keyboards.write();
            let toggled = table
                .get(id)
                .ok_or(CatalogError::KeyboardNotFound(id))?
                .toggled_favorite();
            table.replace(toggled.clone())?;
            toggled
        };

        let table = self.keyboards.read();
        self.subscriptions.broadcast(&table.rows, table.revision);

        debug!(keyboard = %id, favorite = toggled.is_favorite(), "favorite toggled");
        Ok(toggled)
    }

    // --- Reads ---

    /// Manufacturers in seed order.
    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.manufacturers
    }

    /// Look up a manufacturer.
    pub fn manufacturer(&self, id: ManufacturerId) -> Option<&Manufacturer> {
        self.manufacturers.iter().find(|m| m.id() == id)
    }

    /// Look up a keyboard.
    pub fn keyboard(&self, id: KeyboardId) -> Option<Keyboard> {
        self.keyboards.read().get(id).cloned()
    }

    /// Current keyboards of one manufacturer, in store order.
    pub fn keyboards(&self, manufacturer_id: ManufacturerId) -> Vec<Keyboard> {
        self.keyboards
            .read()
            .rows
            .iter()
            .filter(|k| k.manufacturer_id() == manufacturer_id)
            .cloned()
            .collect()
    }

    /// Every keyboard, in store order.
    pub fn all_keyboards(&self) -> Vec<Keyboard> {
        self.keyboards.read().rows.clone()
    }

    /// Current store revision.
    pub fn revision(&self) -> Revision {
        self.keyboards.read().revision
    }

    /// Get store statistics.
    pub fn stats(&self) -> CatalogStats {
        let table = self.keyboards.read();
        CatalogStats {
            manufacturer_count: self.manufacturers.len(),
            keyboard_count: table.rows.len(),
            favorite_count: table.rows.iter().filter(|k| k.is_favorite()).count(),
            subscription_count: self.subscriptions.subscription_count(),
            revision: table.revision,
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn two_keyboard_seed() -> (CatalogSeed, Keyboard, Keyboard) {
        let apple = Manufacturer::new("Apple").unwrap();
        let ibm = Manufacturer::new("IBM").unwrap();
        let a = Keyboard::new(apple.id(), "A", "", "https://example.com/a.png").unwrap();
        let b = Keyboard::new(ibm.id(), "B", "", "https://example.com/b.png").unwrap();
        let seed = CatalogSeed {
            manufacturers: vec![apple, ibm],
            keyboards: vec![a.clone(), b.clone()],
        };
        (seed, a, b)
    }

    #[test]
    fn test_open_defaults() {
        let store = CatalogStore::open(StoreConfig::default()).unwrap();
        let stats = store.stats();
        assert_eq!(stats.manufacturer_count, 3);
        assert_eq!(stats.keyboard_count, 6);
        assert_eq!(stats.favorite_count, 0);
        assert_eq!(stats.revision, Revision(0));
    }

    #[test]
    fn test_open_empty() {
        let store = CatalogStore::open(StoreConfig {
            seed: SeedSource::Empty,
        })
        .unwrap();
        assert!(store.manufacturers().is_empty());
        assert!(store.all_keyboards().is_empty());
    }

    #[test]
    fn test_duplicate_keyboard_rejected() {
        let (mut seed, a, _) = two_keyboard_seed();
        seed.keyboards.push(a.clone());

        let result = CatalogStore::from_seed(seed);
        assert!(matches!(result, Err(CatalogError::DuplicateKeyboard(id)) if id == a.id()));
    }

    #[test]
    fn test_update_preserves_position() {
        let (seed, a, b) = two_keyboard_seed();
        let store = CatalogStore::from_seed(seed).unwrap();

        let revision = store.update(a.clone().with_favorite(true)).unwrap();
        assert_eq!(revision, Revision(1));

        let all = store.all_keyboards();
        assert_eq!(all[0].id(), a.id());
        assert!(all[0].is_favorite());
        assert_eq!(all[1], b);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let (seed, a, _) = two_keyboard_seed();
        let store = CatalogStore::from_seed(seed).unwrap();
        let stranger =
            Keyboard::new(a.manufacturer_id(), "C", "", "https://example.com/c.png").unwrap();

        let before = store.all_keyboards();
        let result = store.update(stranger.clone());

        assert!(matches!(result, Err(CatalogError::KeyboardNotFound(id)) if id == stranger.id()));
        assert_eq!(store.all_keyboards(), before);
        assert_eq!(store.revision(), Revision(0));
    }

    #[test]
    fn test_update_cannot_reassign_manufacturer() {
        let (seed, a, b) = two_keyboard_seed();
        let store = CatalogStore::from_seed(seed).unwrap();

        let moved = Keyboard::with_id(
            a.id(),
            b.manufacturer_id(),
            "A",
            "",
            "https://example.com/a.png",
        )
        .unwrap();
        let result = store.update(moved);

        assert!(matches!(result, Err(CatalogError::ManufacturerMismatch { .. })));
        assert_eq!(store.keyboard(a.id()), Some(a));
    }

    #[test]
    fn test_toggle_favorite_twice_restores_record() {
        let (seed, a, _) = two_keyboard_seed();
        let store = CatalogStore::from_seed(seed).unwrap();

        assert!(store.toggle_favorite(a.id()).unwrap().is_favorite());
        assert!(!store.toggle_favorite(a.id()).unwrap().is_favorite());

        assert_eq!(store.keyboard(a.id()), Some(a));
        assert_eq!(store.revision(), Revision(2));
    }

    #[test]
    fn test_update_notifies_subscribers() {
        let (seed, a, _) = two_keyboard_seed();
        let store = CatalogStore::from_seed(seed).unwrap();

        let handle = store.subscribe(a.manufacturer_id());
        let first = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(first.keyboards, vec![a.clone()]);

        store.set_favorite(a.id(), true).unwrap();

        let next = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(next.revision, Revision(1));
        assert!(next.keyboards[0].is_favorite());
    }

    #[test]
    fn test_stats_counts_subscriptions() {
        let store = CatalogStore::with_defaults();
        let apple = store.manufacturers()[0].id();

        let first = store.subscribe(apple);
        let _second = store.subscribe(apple);
        assert_eq!(store.stats().subscription_count, 2);

        first.cancel();
        assert_eq!(store.subscription_count(), 1);
    }
}
