use super::{DispatchHandler, Message, topic_filter};
use crate::Result;
use crate::catalog::Catalog;
use crate::store::Observer;
use ohno::app_err;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

const LOG_TARGET: &str = "  dispatch";

/// Routes inbound messages to every handler whose topic filter matches.
#[derive(Debug, Default)]
pub struct Dispatcher {
    handlers: Vec<DispatchHandler>,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(handlers: Vec<DispatchHandler>) -> Self {
        Self { handlers }
    }

    /// Build one handler per catalog definition, all writing to `observer`.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, observer: &Arc<dyn Observer>) -> Self {
        Self::new(
            catalog
                .definitions()
                .iter()
                .map(|def| DispatchHandler::new(Arc::clone(def), Arc::clone(observer)))
                .collect(),
        )
    }

    #[must_use]
    pub fn handlers(&self) -> &[DispatchHandler] {
        &self.handlers
    }

    /// Hand a message to every matching handler, returning the number of observations made.
    #[must_use]
    pub fn dispatch(&self, topic: &str, payload: &[u8]) -> usize {
        let mut matched = false;
        let mut observed = 0;
        for handler in self.handlers.iter().filter(|h| topic_filter::matches(h.definition().topic_pattern(), topic)) {
            matched = true;
            observed += handler.handle(topic, payload);
        }

        if !matched {
            log::debug!(target: LOG_TARGET, "No metric is listening on topic '{topic}'");
        }

        observed
    }

    /// Create a channel whose messages [`run`](Self::run) will dispatch.
    #[must_use]
    pub fn channel() -> (MessageSender, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (MessageSender { tx }, rx)
    }

    /// Dispatch messages from `rx` until every sender is dropped.
    ///
    /// Returns the total number of observations made.
    pub async fn run(&self, mut rx: UnboundedReceiver<Message>) -> usize {
        let mut messages = 0_usize;
        let mut observed = 0_usize;
        while let Some(message) = rx.recv().await {
            messages += 1;
            observed += self.dispatch(&message.topic, &message.payload);
        }

        log::debug!(target: LOG_TARGET, "Dispatched {messages} message(s) into {observed} observation(s)");
        observed
    }
}

/// Sending half of a dispatcher channel.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: UnboundedSender<Message>,
}

impl MessageSender {
    /// Queue `message` for dispatch. Fails once the dispatcher has stopped receiving.
    pub fn send(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|e| app_err!("dispatcher is no longer receiving, dropped message for topic '{}'", e.0.topic))
    }
}
