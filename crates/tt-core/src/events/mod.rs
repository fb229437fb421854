//! Topic-keyed change notifications for board state
//!
//! Dependents subscribe to exactly the slice of state they render: one
//! table, the set of table ids, or the active drag. A mutation publishes only
//! the topics it actually changed.

use std::sync::{Arc, Weak};
use parking_lot::Mutex;
use ahash::AHashMap;

use crate::model::TableId;

/// Slice of board state a subscriber listens to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The entry list of one table
    Table(TableId),
    /// Which tables exist (creation, duplication, removal)
    TableIds,
    /// Which table, if any, a drag currently originates from
    ActiveDrag,
}

/// Notification delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A table's entry list was replaced
    TableChanged(TableId),
    /// A table was created, either fresh or as a copy
    TableAdded { id: TableId, source: Option<TableId> },
    /// A table was deleted
    TableRemoved(TableId),
    /// The active drag moved to another table or ended
    ActiveDragChanged(Option<TableId>),
}

impl BoardEvent {
    /// Topic this event is published under
    pub fn topic(&self) -> Topic {
        match self {
            BoardEvent::TableChanged(id) => Topic::Table(id.clone()),
            BoardEvent::TableAdded { .. } | BoardEvent::TableRemoved(_) => Topic::TableIds,
            BoardEvent::ActiveDragChanged(_) => Topic::ActiveDrag,
        }
    }
}

/// Trait for components that react to board changes
pub trait BoardSubscriber: Send + Sync {
    fn on_board_event(&self, event: &BoardEvent);
}

/// Topic-keyed subscriber registry.
///
/// Subscribers are held weakly; dropping the last strong reference is
/// enough to unsubscribe.
pub struct BoardEventBus {
    handlers: Mutex<AHashMap<Topic, Vec<Weak<dyn BoardSubscriber>>>>,
}

impl BoardEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(AHashMap::new()),
        }
    }

    /// Subscribe to one topic
    pub fn subscribe(&self, topic: Topic, subscriber: &Arc<dyn BoardSubscriber>) {
        self.handlers
            .lock()
            .entry(topic)
            .or_default()
            .push(Arc::downgrade(subscriber));
    }

    /// Number of live subscribers on `topic`
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.handlers
            .lock()
            .get(topic)
            .map(|subs| subs.iter().filter(|weak| weak.strong_count() > 0).count())
            .unwrap_or(0)
    }

    /// Publish events to the subscribers of their topics
    pub fn publish(&self, events: &[BoardEvent]) {
        for event in events {
            let topic = event.topic();

            // Collect live subscribers first so callbacks run without the lock held
            let live: Vec<Arc<dyn BoardSubscriber>> = {
                let mut handlers = self.handlers.lock();
                match handlers.get_mut(&topic) {
                    Some(subs) => {
                        subs.retain(|weak| weak.strong_count() > 0);
                        subs.iter().filter_map(Weak::upgrade).collect()
                    }
                    None => continue,
                }
            };

            for subscriber in live {
                subscriber.on_board_event(event);
            }
        }
    }

    /// Drop every topic that belongs to a removed table
    pub fn forget_table(&self, id: &TableId) {
        self.handlers.lock().remove(&Topic::Table(id.clone()));
    }
}

impl Default for BoardEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter that lets a closure act as a subscriber
pub struct FnSubscriber<F> {
    handler: F,
}

impl<F> BoardSubscriber for FnSubscriber<F>
where
    F: Fn(&BoardEvent) + Send + Sync,
{
    fn on_board_event(&self, event: &BoardEvent) {
        (self.handler)(event);
    }
}

/// Create a subscriber from a closure
pub fn subscriber_from_fn<F>(f: F) -> Arc<dyn BoardSubscriber>
where
    F: Fn(&BoardEvent) + Send + Sync + 'static,
{
    Arc::new(FnSubscriber { handler: f })
}
