//! Routing of inbound messages to per-metric handlers
//!
//! A [`DispatchHandler`] binds one metric definition to an [`Observer`](crate::store::Observer).
//! The [`Dispatcher`] owns one handler per configured metric and hands every inbound message to
//! each handler whose topic filter matches, either by direct call or through a channel fed by a
//! [`MessageSender`].

mod dispatcher;
mod handler;
mod message;
pub mod topic_filter;

pub use dispatcher::{Dispatcher, MessageSender};
pub use handler::DispatchHandler;
pub use message::Message;
