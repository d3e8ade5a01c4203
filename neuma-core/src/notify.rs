//! Change-notification plumbing.
//!
//! Components that own mutable state hold a [`Subscribers`] per notification
//! they emit. Subscribing hands back the channel's `Receiver`, which is the
//! subscription handle: dropping it releases the subscription, and the dead
//! sender is pruned on the next `notify`. Receivers are drained with
//! `try_recv` from the host event loop, so delivery order follows mutation
//! order on the one thread that runs the session.

use std::sync::mpsc::{channel, Receiver, Sender};

/// Fan-out of change events to any number of subscribers.
#[derive(Debug)]
pub struct Subscribers<E> {
    senders: Vec<Sender<E>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Subscribers<E> {
        Subscribers {
            senders: Vec::new(),
        }
    }

    /// Register a new subscriber. The returned receiver is the subscription
    /// handle; drop it to unsubscribe.
    pub fn subscribe(&mut self) -> Receiver<E> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }
}

impl<E: Clone> Subscribers<E> {
    /// Deliver `event` to every live subscriber, pruning dropped ones.
    pub fn notify(&mut self, event: E) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Subscribers<E> {
        Subscribers::new()
    }
}
