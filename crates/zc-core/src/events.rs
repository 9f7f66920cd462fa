//! Named-event emitter.
//!
//! Storage and field validators each own an [`Emitter`] rather than being one.
//! Fan-out is synchronous: every handler subscribed to an event has run by
//! the time [`Emitter::publish`] returns.

use core::fmt;

/// The closed set of events the editor publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A structural change to the selected list.
    Changed,
    ValidatorError,
    ValidatorSuccess,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Changed => "changed",
            EventKind::ValidatorError => "validator_error",
            EventKind::ValidatorSuccess => "validator_success",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<P> = Box<dyn FnMut(&P)>;

struct Subscription<P> {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler<P>,
}

/// Synchronous pub/sub register for payloads of type `P`.
pub struct Emitter<P> {
    subscriptions: Vec<Subscription<P>>,
    next_id: u64,
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Emitter<P> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `handler` for `kind`. Handlers run in subscription order.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&P) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `payload` to every handler of `kind`; returns how many ran.
    pub fn publish(&mut self, kind: EventKind, payload: &P) -> usize {
        let mut delivered = 0;
        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (subscription.handler)(payload);
            delivered += 1;
        }
        tracing::trace!(event = kind.name(), delivered, "published");
        delivered
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fans_out_only_to_matching_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::<u32>::new();

        let sink = Rc::clone(&seen);
        emitter.subscribe(EventKind::Changed, move |v| sink.borrow_mut().push(("a", *v)));
        let sink = Rc::clone(&seen);
        emitter.subscribe(EventKind::ValidatorError, move |v| {
            sink.borrow_mut().push(("b", *v))
        });
        let sink = Rc::clone(&seen);
        emitter.subscribe(EventKind::Changed, move |v| sink.borrow_mut().push(("c", *v)));

        assert_eq!(emitter.publish(EventKind::Changed, &7), 2);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("c", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = Emitter::<()>::new();
        let sink = Rc::clone(&count);
        let id = emitter.subscribe(EventKind::ValidatorSuccess, move |_| {
            *sink.borrow_mut() += 1
        });

        emitter.publish(EventKind::ValidatorSuccess, &());
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.publish(EventKind::ValidatorSuccess, &());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(emitter.listener_count(EventKind::ValidatorSuccess), 0);
    }

    #[test]
    fn event_names_match_wire_names() {
        assert_eq!(EventKind::Changed.to_string(), "changed");
        assert_eq!(EventKind::ValidatorError.name(), "validator_error");
        assert_eq!(EventKind::ValidatorSuccess.name(), "validator_success");
    }
}
