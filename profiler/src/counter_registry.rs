//! Counter registry
//!
//! Maps every mnemonic seen during translation to one execution counter.  Counters are created
//! by [`CounterRegistry::resolve`] under the registry lock, once per static instruction site, and
//! incremented by [`CounterRegistry::record`] without any lock, once per dynamic execution.
//!
//! ```text
//!   translation (cold)            execution (hot, any thread)
//!   resolve("ADD") --> handle --> record(&handle) --> counter.count += 1, total += 1
//! ```

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use tracing::debug;

/// Execution counter of one mnemonic
#[derive(Debug)]
pub struct Counter {
    mnemonic: Arc<str>,
    id: u32,
    count: AtomicU64,
}

impl Counter {
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Creation index of the counter inside its registry
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Reference to a counter, obtained once per instruction site and reused on every execution.
///
/// A handle must only be recorded on the registry that issued it.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    counter: Arc<Counter>,
}

impl CounterHandle {
    pub fn id(&self) -> u32 {
        self.counter.id
    }

    pub fn mnemonic(&self) -> &str {
        &self.counter.mnemonic
    }

    pub fn count(&self) -> u64 {
        self.counter.count()
    }
}

/// Counter values read from a registry, in counter creation order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrySnapshot {
    pub total: u64,
    pub counts: Vec<(Arc<str>, u64)>,
}

/// Lookup map and ordered list of counters, always updated together
#[derive(Debug, Default)]
struct RegistryState {
    by_mnemonic: HashMap<Arc<str>, Arc<Counter>>,
    counters: Vec<Arc<Counter>>,
}

#[derive(Debug, Default)]
pub struct CounterRegistry {
    state: Mutex<RegistryState>,
    total: AtomicU64,
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // The state is consistent after every completed insert, so a poisoned lock is still usable
    fn lock_state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the handle of the counter of `mnemonic`, creating the counter if needed
    pub fn resolve(&self, mnemonic: &str) -> CounterHandle {
        let mut state = self.lock_state();
        if let Some(counter) = state.by_mnemonic.get(mnemonic) {
            return CounterHandle { counter: Arc::clone(counter) };
        }

        let id = state.counters.len() as u32;
        let counter = Arc::new(Counter {
            mnemonic: Arc::from(mnemonic),
            id,
            count: AtomicU64::new(0),
        });
        state.by_mnemonic.insert(Arc::clone(&counter.mnemonic), Arc::clone(&counter));
        state.counters.push(Arc::clone(&counter));
        debug!("CounterRegistry::resolve() new counter id={id} mnemonic={mnemonic}");

        CounterHandle { counter }
    }

    /// Counts one execution of the instruction site behind `handle`
    #[inline(always)]
    pub fn record(&self, handle: &CounterHandle) {
        handle.counter.count.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of recorded executions, of any mnemonic
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Number of distinct mnemonics
    pub fn len(&self) -> usize {
        self.lock_state().counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_of(&self, mnemonic: &str) -> Option<u64> {
        self.lock_state().by_mnemonic.get(mnemonic).map(|counter| counter.count())
    }

    /// Reads every counter.  Counters are read one at a time, so the values are only mutually
    /// consistent once writers have stopped.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let counters: Vec<Arc<Counter>> = self.lock_state().counters.clone();
        RegistrySnapshot {
            total: self.total(),
            counts: counters
                .iter()
                .map(|counter| (Arc::clone(&counter.mnemonic), counter.count()))
                .collect(),
        }
    }
}
