//! Live queries: change notification and subscription handles.
//!
//! Every mutation made through a [`crate::Garden`] bumps a version counter
//! for each table it wrote, after the write has committed. A live query is a
//! background task that emits an initial snapshot, then re-runs its query
//! whenever one of the tables it reads changes version, pushing each result
//! that differs from the previous one to a [`Subscription`].
//!
//! ```text
//! mutation ──commit──▶ ChangeNotifier ──watch──▶ producer task ──mpsc──▶ Subscription
//!                      (table versions)          (re-runs query)          (next / cancel)
//!                                                      ▲
//! other process ──commit──▶ SQLite file ──poll─────────┘
//! ```
//!
//! Writes from other connections, such as another `sunflower` process, never
//! reach the notifier. A producer given an [`ExternalChanges`] source polls it
//! and re-runs its query when the database changed underneath it.
//!
//! A producer only ever has one result waiting in its channel; further
//! changes coalesce until the subscriber catches up, so a slow subscriber
//! sees the latest state rather than every intermediate one.

use std::{future::Future, sync::Arc, time::Duration};

use log::{debug, warn};
use tokio::{
    sync::{mpsc, watch},
    task::{self, JoinHandle},
    time::{self, Interval, MissedTickBehavior},
};

use crate::error::Result;

/// Results a producer may buffer ahead of its subscriber.
const CHANNEL_CAPACITY: usize = 1;

/// How often a producer checks for commits made by other connections.
pub(crate) const EXTERNAL_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Tables a live query can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Plants,
    GardenPlantings,
}

/// Monotonic per-table change counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableVersions {
    pub plants: u64,
    pub garden_plantings: u64,
}

impl TableVersions {
    /// Current version of `table`.
    pub fn get(&self, table: Table) -> u64 {
        match table {
            Table::Plants => self.plants,
            Table::GardenPlantings => self.garden_plantings,
        }
    }

    fn bump(&mut self, table: Table) {
        match table {
            Table::Plants => self.plants += 1,
            Table::GardenPlantings => self.garden_plantings += 1,
        }
    }

    fn differs_in(&self, other: &Self, tables: &[Table]) -> bool {
        tables.iter().any(|&table| self.get(table) != other.get(table))
    }
}

/// Broadcasts committed table changes to live queries.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: Arc<watch::Sender<TableVersions>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(TableVersions::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Records that `tables` changed. Call only after the write committed.
    pub fn notify(&self, tables: &[Table]) {
        self.sender.send_modify(|versions| {
            for &table in tables {
                versions.bump(table);
            }
        });
    }

    /// Current table versions.
    pub fn versions(&self) -> TableVersions {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TableVersions> {
        self.sender.subscribe()
    }

    /// Number of live queries currently listening.
    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of changes committed outside this process's notifier.
///
/// Implementations may block; producers call them on the blocking pool.
pub(crate) trait ExternalChanges: Send + 'static {
    /// Returns true if the data changed since the previous call. The first
    /// call records a baseline and returns false.
    fn changed(&mut self) -> Result<bool>;
}

type Freshness = Box<dyn Fn() -> bool + Send + Sync>;

/// One result on its way to a subscriber.
struct Emission<T> {
    result: Result<T>,
    // Set for switched queries: false once the parameter moved on
    is_current: Option<Freshness>,
}

impl<T> Emission<T> {
    fn plain(result: Result<T>) -> Self {
        Self {
            result,
            is_current: None,
        }
    }

    fn is_current(&self) -> bool {
        match &self.is_current {
            Some(is_current) => is_current(),
            None => true,
        }
    }
}

/// Handle to a running live query.
///
/// Yields the initial result followed by one result per observed change, in
/// commit order. A failed query is delivered as `Some(Err(_))` and ends the
/// stream. Dropping the handle (or calling [`Subscription::cancel`]) stops
/// the producer; nothing is delivered afterwards.
pub struct Subscription<T> {
    receiver: mpsc::Receiver<Emission<T>>,
    handle: JoinHandle<()>,
}

impl<T> Subscription<T> {
    fn new(receiver: mpsc::Receiver<Emission<T>>, handle: JoinHandle<()>) -> Self {
        Self { receiver, handle }
    }

    /// Waits for the next result. Returns `None` once the stream has ended.
    pub async fn next(&mut self) -> Option<Result<T>> {
        while let Some(emission) = self.receiver.recv().await {
            if emission.is_current() {
                return Some(emission.result);
            }
            debug!("Discarding result computed for a superseded parameter");
        }
        None
    }

    /// Stops the producer and discards anything not yet received.
    pub fn cancel(self) {}

    /// Returns true once the producer has stopped.
    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a producer that runs `query` now and again after every change to
/// one of `tables`, or to the data behind `external`.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_live_query<T, F, Fut>(
    notifier: &ChangeNotifier,
    tables: &'static [Table],
    mut external: Option<Box<dyn ExternalChanges>>,
    query: F,
) -> Subscription<T>
where
    T: Clone + PartialEq + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send,
{
    let mut changes = notifier.subscribe();
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        // Versions and the external baseline are captured before querying so
        // no commit can slip between a result and the wait for the next change
        let mut seen = *changes.borrow_and_update();
        poll_external(&mut external).await;
        let mut ticker = external.as_ref().map(|_| {
            let mut ticker = time::interval(EXTERNAL_POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        let mut last: Option<T> = None;

        loop {
            match query().await {
                Ok(value) => {
                    // Our own commits are also seen as external changes
                    if last.as_ref() != Some(&value) {
                        if sender.send(Emission::plain(Ok(value.clone()))).await.is_err() {
                            return;
                        }
                        last = Some(value);
                    }
                }
                Err(e) => {
                    warn!("Live query failed: {e}");
                    let _ = sender.send(Emission::plain(Err(e))).await;
                    return;
                }
            }

            loop {
                tokio::select! {
                    changed = changes.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        let current = *changes.borrow_and_update();
                        if current.differs_in(&seen, tables) {
                            seen = current;
                            break;
                        }
                    }
                    () = next_tick(&mut ticker) => {
                        if poll_external(&mut external).await {
                            break;
                        }
                    }
                }
            }
        }
    });

    Subscription::new(receiver, handle)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Asks `external` whether the data changed, on the blocking pool. A source
/// whose task panics is dropped and never polled again.
async fn poll_external(external: &mut Option<Box<dyn ExternalChanges>>) -> bool {
    let Some(mut source) = external.take() else {
        return false;
    };
    match task::spawn_blocking(move || {
        let changed = source.changed();
        (source, changed)
    })
    .await
    {
        Ok((source, changed)) => {
            *external = Some(source);
            changed.unwrap_or_else(|e| {
                warn!("Failed to check for external changes: {e}");
                false
            })
        }
        Err(e) => {
            warn!("External change check stopped: {e}");
            false
        }
    }
}

/// Follows `params`, keeping exactly one inner subscription open for its
/// latest value and forwarding that subscription's results.
///
/// Every forwarded result is tagged with the parameter value it was computed
/// for, and [`Subscription::next`] discards results whose value is no longer
/// current. A result for a superseded value is therefore never returned once
/// the parameter has changed, even if it was already buffered.
pub(crate) fn switch_latest<P, T, F>(mut params: watch::Receiver<P>, subscribe: F) -> Subscription<T>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Send + 'static,
    F: Fn(P) -> Subscription<T> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let guard = params.clone();
    let tag = move |value: P, result: Result<T>| {
        let guard = guard.clone();
        Emission {
            result,
            is_current: Some(Box::new(move || *guard.borrow() == value) as Freshness),
        }
    };

    let handle = tokio::spawn(async move {
        let mut current = params.borrow_and_update().clone();
        let mut inner = subscribe(current.clone());
        loop {
            tokio::select! {
                biased;
                changed = params.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    current = params.borrow_and_update().clone();
                    inner = subscribe(current.clone());
                }
                item = inner.next() => match item {
                    Some(item) => {
                        // A change arriving while the subscriber is busy wins
                        // over the result waiting to be delivered
                        tokio::select! {
                            biased;
                            changed = params.changed() => {
                                if changed.is_err() {
                                    return;
                                }
                                current = params.borrow_and_update().clone();
                                inner = subscribe(current.clone());
                            }
                            sent = sender.send(tag(current.clone(), item)) => {
                                if sent.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    None => {
                        // Inner stream ended after an error; wait for a new value
                        if params.changed().await.is_err() {
                            return;
                        }
                        current = params.borrow_and_update().clone();
                        inner = subscribe(current.clone());
                    }
                },
            }
        }
    });

    Subscription::new(receiver, handle)
}
