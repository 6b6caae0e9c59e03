use crate::{Error, Result, SerializedPublicKey};

use ark_bls12_377::G2Projective;
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, SerializationError};
use bls_crypto::PublicKey;
use log::{debug, trace};
use lru::LruCache;
use once_cell::sync::OnceCell;
use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Number of deserialized keys kept by `PublicKeyCache::new`
pub const DEFAULT_CAPACITY: usize = 512;

/// Per-key slot. It is inserted empty under the map lock and filled outside of it, so that a
/// key is deserialized once even when many threads miss on it at the same time.
type Slot = Arc<OnceCell<Arc<PublicKey>>>;

/// Allows deserializing and aggregation of public keys while holding a cache to improve
/// performance. Aggregation assumes that the aggregated public key changes slowly.
///
/// The cache is shared by reference between workers. Handles are reference counted, so an
/// evicted key stays valid for as long as someone holds it.
pub struct PublicKeyCache {
    /// Serialized public keys to their deserialized group element
    entries: Mutex<LruCache<SerializedPublicKey, Slot>>,
    /// The last aggregated validator set
    aggregate: Mutex<AggregateState>,
}

/// Multiset of the keys in the last aggregated set, and their sum
struct AggregateState {
    keys: HashMap<SerializedPublicKey, (usize, Arc<PublicKey>)>,
    combined: G2Projective,
}

impl Default for AggregateState {
    fn default() -> Self {
        Self {
            keys: HashMap::new(),
            combined: G2Projective::zero(),
        }
    }
}

impl Default for PublicKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicKeyCache {
    /// Initializes an empty cache holding up to `DEFAULT_CAPACITY` keys
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY)
    }

    /// Initializes an empty cache holding up to `capacity` keys
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::build(capacity.get())
    }

    fn build(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            aggregate: Mutex::new(AggregateState::default()),
        }
    }

    /// Returns the PublicKey corresponding to the serialized data from the cache, or deserializes
    /// the element, saves it to the cache for later use and returns it. Failed deserializations
    /// are not cached.
    pub fn get_or_deserialize(&self, key: &SerializedPublicKey) -> Result<Arc<PublicKey>> {
        let slot = {
            let mut entries = self.entries();
            match entries.get(key) {
                Some(slot) => {
                    trace!("public key cache hit for {}", key);
                    slot.clone()
                }
                None => {
                    if entries.len() == entries.cap() {
                        trace!("public key cache full, evicting the least recently used key");
                    }
                    let slot = Slot::default();
                    entries.put(*key, slot.clone());
                    slot
                }
            }
        };

        let result = slot.get_or_try_init(|| -> Result<Arc<PublicKey>> {
            trace!("deserializing public key {}", key);
            let public_key = PublicKey::deserialize(&key.as_bytes()[..])
                .map_err(Error::deserialize("public key"))?;
            // the identity verifies every message
            if public_key.as_ref().is_zero() {
                return Err(Error::deserialize("public key")(
                    SerializationError::InvalidData,
                ));
            }
            Ok(Arc::new(public_key))
        });

        match result {
            Ok(public_key) => Ok(public_key.clone()),
            Err(err) => {
                debug!("could not deserialize public key {}: {}", key, err);
                let mut entries = self.entries();
                let stale = entries
                    .peek(key)
                    .map_or(false, |current| Arc::ptr_eq(current, &slot) && current.get().is_none());
                if stale {
                    entries.pop(key);
                }
                Err(err)
            }
        }
    }

    /// Returns the sum of the provided public keys. Keys which appear more than once are
    /// counted with multiplicity.
    ///
    /// The set of public keys changes slowly, so for speed this method computes the
    /// difference from the last call and does an incremental update of the combined key
    pub fn aggregate(&self, public_keys: &[SerializedPublicKey]) -> Result<PublicKey> {
        if public_keys.is_empty() {
            return Err(Error::EmptyAggregate);
        }

        let mut next: HashMap<SerializedPublicKey, (usize, Arc<PublicKey>)> =
            HashMap::with_capacity(public_keys.len());
        for (index, key) in public_keys.iter().enumerate() {
            match next.get_mut(key) {
                Some((count, _)) => *count += 1,
                None => {
                    let public_key = self
                        .get_or_deserialize(key)
                        .map_err(|err| err.at_index(index))?;
                    next.insert(*key, (1, public_key));
                }
            }
        }

        let mut state = self.aggregate.lock().unwrap_or_else(PoisonError::into_inner);
        let mut combined = state.combined;

        // Subtract any keys which are no longer present, or present fewer times
        for (key, (old_count, public_key)) in state.keys.iter() {
            let new_count = next.get(key).map_or(0, |(count, _)| *count);
            for _ in new_count..*old_count {
                combined -= (**public_key).as_ref();
            }
        }

        // Add the new keys
        for (key, (new_count, public_key)) in next.iter() {
            let old_count = state.keys.get(key).map_or(0, |(count, _)| *count);
            for _ in old_count..*new_count {
                combined += (**public_key).as_ref();
            }
        }

        trace!(
            "aggregated {} public keys ({} distinct)",
            public_keys.len(),
            next.len()
        );
        state.keys = next;
        state.combined = combined;

        Ok(PublicKey::from(combined))
    }

    /// Number of deserialized keys currently held
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached key and the aggregation state. Handles held by callers stay valid.
    pub fn clear(&self) {
        self.entries().clear();
        *self.aggregate.lock().unwrap_or_else(PoisonError::into_inner) = AggregateState::default();
    }

    // No user code runs while the lock is held, so a poisoned map is still consistent
    fn entries(&self) -> MutexGuard<'_, LruCache<SerializedPublicKey, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
