//! Store - holds the state and runs the dispatch loop
//!
//! The store is constructed explicitly and passed by reference to everything
//! that reads or writes block data. It owns:
//! - the state, published through a `watch` channel so views can subscribe
//! - the middleware chain every action passes before the reducer
//! - the effect interpreter used by workflows and resolvers
//! - the resolver registry, which runs each resolver at most once per key
//! - the in-flight table that lets concurrent identical workflows share
//!   one request

use crate::actions::Action;
use crate::effects::Effects;
use crate::middleware::Middleware;
use crate::reducer::reduce;
use crate::resolvers;
use crate::selectors;
use crate::source::EpisodeSource;
use crate::state::{SourceKey, StoreState};
use podloom_client::{AjaxTransport, Episode, Source, SubscribePodcast};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{watch, OnceCell};

/// Page size requested from RSS feeds unless configured otherwise
pub const DEFAULT_RSS_PER_PAGE: u32 = 10;

/// Arguments a resolver runs for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverKey {
    InitialData,
    Episodes(SourceKey),
    SubscribePodcasts,
}

pub struct Store {
    state: watch::Sender<Arc<StoreState>>,
    middleware: Mutex<Vec<Box<dyn Middleware>>>,
    effects: Effects,
    resolutions: Mutex<HashMap<ResolverKey, Arc<OnceCell<()>>>>,
    in_flight: Mutex<HashMap<String, Arc<OnceCell<()>>>>,
    rss_per_page: u32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Store {
    pub fn new(transport: Arc<dyn AjaxTransport>) -> Self {
        Self::with_state(transport, StoreState::default())
    }

    pub fn with_state(transport: Arc<dyn AjaxTransport>, initial_state: StoreState) -> Self {
        let (state, receiver) = watch::channel(Arc::new(initial_state));
        Self {
            state,
            middleware: Mutex::new(Vec::new()),
            effects: Effects::new(transport, receiver),
            resolutions: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            rss_per_page: DEFAULT_RSS_PER_PAGE,
        }
    }

    pub fn with_rss_per_page(mut self, per_page: u32) -> Self {
        self.rss_per_page = per_page.max(1);
        self
    }

    /// Add middleware to the store. Middleware runs in insertion order.
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push(middleware);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> Arc<StoreState> {
        self.state.borrow().clone()
    }

    /// Run a selector against the current state
    pub fn select<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified after every reduced action
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreState>> {
        self.state.subscribe()
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn episode_source(&self, key: &SourceKey) -> EpisodeSource {
        EpisodeSource::for_key(key, self.rss_per_page)
    }

    /// Process an action through the middleware chain and the reducer
    ///
    /// The reducer runs under the channel's write lock, so a dispatch is
    /// never observed half-applied.
    pub fn dispatch(&self, action: Action) {
        let snapshot = self.state();

        for middleware in lock(&self.middleware).iter_mut() {
            if !middleware.handle(&action, &snapshot) {
                log::debug!("Action {} consumed by middleware", action.name());
                return;
            }
        }

        self.state.send_modify(|state| {
            *state = Arc::new(reduce(StoreState::clone(state), &action));
        });
    }

    // Resolution

    /// Run the resolver for `key` unless it already ran
    ///
    /// Concurrent callers for the same key wait on the one running
    /// invocation instead of starting another.
    pub async fn resolve(&self, key: ResolverKey) {
        let cell = Arc::clone(lock(&self.resolutions).entry(key.clone()).or_default());
        cell.get_or_init(|| self.run_resolver(&key)).await;
    }

    async fn run_resolver(&self, key: &ResolverKey) {
        log::debug!("Resolving {:?}", key);
        match key {
            ResolverKey::InitialData => resolvers::resolve_initial_data(self).await,
            ResolverKey::Episodes(source) => resolvers::resolve_episodes(self, source).await,
            ResolverKey::SubscribePodcasts => resolvers::resolve_subscribe_podcasts(self).await,
        }
    }

    pub fn has_started_resolution(&self, key: &ResolverKey) -> bool {
        lock(&self.resolutions).contains_key(key)
    }

    pub fn has_finished_resolution(&self, key: &ResolverKey) -> bool {
        lock(&self.resolutions)
            .get(key)
            .is_some_and(|cell| cell.initialized())
    }

    pub fn is_resolving(&self, key: &ResolverKey) -> bool {
        self.has_started_resolution(key) && !self.has_finished_resolution(key)
    }

    /// Forget that `key` was resolved; the next `resolve` runs it again
    ///
    /// For episodes this also resets the source's list, so the next first
    /// page replaces it instead of being taken for a late response.
    pub fn invalidate_resolution(&self, key: &ResolverKey) {
        let removed = lock(&self.resolutions).remove(key).is_some();
        if let (true, ResolverKey::Episodes(source)) = (removed, key) {
            self.dispatch(Action::reset_episodes(source.clone()));
        }
    }

    /// Run `f` unless a call with the same `key` is already running, in
    /// which case wait for that one instead
    ///
    /// Unlike resolutions nothing is remembered once `f` completes; callers
    /// check the state for a cached result first.
    pub(crate) async fn join_in_flight<F, Fut>(&self, key: &str, f: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let cell = Arc::clone(lock(&self.in_flight).entry(key.to_string()).or_default());
        cell.get_or_init(f).await;

        let mut in_flight = lock(&self.in_flight);
        if in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            in_flight.remove(key);
        }
    }

    // Resolving selectors

    /// Transistor shows and RSS feeds, bootstrapping on first use
    pub async fn sources(&self) -> (Vec<Source>, Vec<Source>) {
        self.resolve(ResolverKey::InitialData).await;
        self.select(|s| {
            (
                selectors::get_transistor_sources(s).to_vec(),
                selectors::get_rss_feeds(s).to_vec(),
            )
        })
    }

    /// Episodes of a source, fetching the first page on first use
    pub async fn episodes(&self, key: &SourceKey) -> Vec<Episode> {
        self.resolve(ResolverKey::Episodes(key.clone())).await;
        self.select(|s| selectors::get_episodes(s, key).to_vec())
    }

    pub async fn subscribe_podcasts(&self) -> Vec<SubscribePodcast> {
        self.resolve(ResolverKey::SubscribePodcasts).await;
        self.select(|s| selectors::get_subscribe_podcasts(s).to_vec())
    }
}
