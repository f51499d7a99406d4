//! Refresh request dispatch.
//!
//! Anything that wants the view refreshed (a file watcher, a user action, a
//! finished fetch) sends a [`RefreshRequest`] through a [`RefreshSender`].
//! One [`RefreshController`] owns the handler and dispatches requests one at a
//! time. Whatever queues up while a refresh runs is collapsed into a single
//! request for the next cycle, so a burst of notifications costs at most one
//! extra refresh.

use crate::config::RefreshConfig;
use crate::sha::Sha;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

/// What the view should show after a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshRequest {
    /// Commit to select, if the request changes the selection.
    pub sha: Option<Sha>,
    /// Reload the whole history instead of just the working directory.
    pub full_reload: bool,
    /// Refresh even if nothing seems to have changed.
    pub force: bool,
}

impl RefreshRequest {
    /// Select `sha`.
    pub fn select(sha: Sha) -> Self {
        Self {
            sha: Some(sha),
            ..Default::default()
        }
    }

    /// Reload everything.
    pub fn reload() -> Self {
        Self {
            full_reload: true,
            ..Default::default()
        }
    }

    /// Fold a newer request into this one: the newer selection wins, flags
    /// accumulate.
    pub fn absorb(&mut self, newer: RefreshRequest) {
        if newer.sha.is_some() {
            self.sha = newer.sha;
        }
        self.full_reload |= newer.full_reload;
        self.force |= newer.force;
    }
}

/// Performs a refresh.
pub trait RefreshHandler {
    /// Apply `request`. Returning `false` rolls the controller's current
    /// state back to the last successful request.
    fn refresh(&mut self, request: &RefreshRequest) -> bool;
}

/// Cloneable handle for enqueueing requests.
#[derive(Debug, Clone)]
pub struct RefreshSender {
    tx: Sender<RefreshRequest>,
}

impl RefreshSender {
    /// Enqueue a request. Returns `false` once the controller is gone.
    pub fn request(&self, request: RefreshRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Single-threaded dispatch loop over queued refresh requests.
pub struct RefreshController<H> {
    tx: Sender<RefreshRequest>,
    dispatcher: Dispatcher<H>,
}

struct Dispatcher<H> {
    handler: H,
    rx: Receiver<RefreshRequest>,
    current: Option<RefreshRequest>,
    coalesce: bool,
    dispatched: usize,
}

impl<H: RefreshHandler> RefreshController<H> {
    pub fn new(handler: H, config: &RefreshConfig) -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            dispatcher: Dispatcher {
                handler,
                rx,
                current: None,
                coalesce: config.coalesce,
                dispatched: 0,
            },
        }
    }

    pub fn sender(&self) -> RefreshSender {
        RefreshSender {
            tx: self.tx.clone(),
        }
    }

    /// Enqueue a request from the owning thread.
    pub fn request(&self, request: RefreshRequest) {
        // the receiver lives in self, so this cannot fail
        let _ = self.tx.send(request);
    }

    /// Last request the handler accepted.
    pub fn current(&self) -> Option<&RefreshRequest> {
        self.dispatcher.current.as_ref()
    }

    /// Total number of handler invocations.
    pub fn dispatched(&self) -> usize {
        self.dispatcher.dispatched
    }

    pub fn handler(&self) -> &H {
        &self.dispatcher.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.dispatcher.handler
    }

    /// Dispatch everything queued so far without blocking. Returns the number
    /// of handler invocations.
    pub fn process_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(first) = self.dispatcher.rx.try_recv() {
            self.dispatcher.dispatch(first);
            count += 1;
        }
        count
    }

    /// Block and dispatch until every [`RefreshSender`] has been dropped,
    /// then hand the handler back.
    pub fn run(self) -> H {
        let Self { tx, mut dispatcher } = self;
        drop(tx);

        while let Ok(first) = dispatcher.rx.recv() {
            dispatcher.dispatch(first);
        }
        dispatcher.handler
    }
}

impl<H: RefreshHandler> Dispatcher<H> {
    fn dispatch(&mut self, first: RefreshRequest) {
        let mut request = first;
        if self.coalesce {
            let mut collapsed = 0;
            for newer in self.rx.try_iter() {
                request.absorb(newer);
                collapsed += 1;
            }
            if collapsed > 0 {
                debug!(collapsed, "coalesced queued refresh requests");
            }
        }

        self.dispatched += 1;
        if self.handler.refresh(&request) {
            self.current = Some(request);
        } else {
            debug!(?request, "refresh failed, keeping previous state");
        }
    }
}
