//! Effect interpreter
//!
//! Workflows and resolvers never touch the network or the state directly.
//! They go through the three effects offered here, which keeps them testable
//! by swapping the transport for one that returns canned bodies.

use crate::state::StoreState;
use podloom_client::{AjaxRequest, AjaxTransport, Envelope, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

pub struct Effects {
    transport: Arc<dyn AjaxTransport>,
    state: watch::Receiver<Arc<StoreState>>,
}

impl Effects {
    pub(crate) fn new(
        transport: Arc<dyn AjaxTransport>,
        state: watch::Receiver<Arc<StoreState>>,
    ) -> Self {
        Self { transport, state }
    }

    /// Issue a backend request and return the raw body
    pub async fn request(&self, request: &AjaxRequest) -> Result<String> {
        self.transport.send(request).await
    }

    /// Parse a response body and unwrap its `{success, data}` envelope
    pub fn parse_json(&self, body: &str) -> Result<Envelope> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Envelope::classify(value))
    }

    /// Read the current store state
    ///
    /// `f` runs while the state is borrowed; it must not dispatch.
    pub fn select<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Request, parse and decode the payload in one go
    pub async fn fetch<T: serde::de::DeserializeOwned>(&self, request: &AjaxRequest) -> Result<T> {
        let body = self.request(request).await?;
        self.parse_json(&body)?.decode()
    }
}
