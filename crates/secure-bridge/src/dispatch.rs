//! Single-consumer dispatch loop
//!
//! Routes all bridge work through one queue drained by one thread, so a
//! multi-threaded host keeps the single-actor serialization the bridge
//! state relies on: concurrent `hideContent`/`showContent` calls can never
//! interleave into an inconsistent intermediate visibility.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use thiserror::Error;
use tracing::{debug, warn};

use bridge_protocol::{OperationCall, OperationReply};
use platform_host::LifecycleEvent;

use crate::bridge::SecurityBridge;

/// Dispatch error
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Bridge dispatch loop is not running")]
    Stopped,
}

pub type DispatchResult<T> = Result<T, DispatchError>;

enum Directive {
    Invoke {
        call: OperationCall,
        reply_tx: Sender<OperationReply>,
    },
    Lifecycle(LifecycleEvent),
    Shutdown,
}

/// Cloneable sender side of the dispatch queue. Directives from all clones
/// are applied strictly in queue order.
#[derive(Clone)]
pub struct BridgeClient {
    tx: Sender<Directive>,
}

impl BridgeClient {
    /// Queue one operation call and block for its reply
    pub fn invoke(&self, call: OperationCall) -> DispatchResult<OperationReply> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(Directive::Invoke { call, reply_tx })
            .map_err(|_| DispatchError::Stopped)?;
        reply_rx.recv().map_err(|_| DispatchError::Stopped)
    }

    /// Queue a lifecycle transition, ordered with invokes
    pub fn lifecycle(&self, event: LifecycleEvent) -> DispatchResult<()> {
        self.tx
            .send(Directive::Lifecycle(event))
            .map_err(|_| DispatchError::Stopped)
    }
}

/// Owns a bridge running on its own dispatch thread
pub struct BridgeHandle {
    client: BridgeClient,
    join: Option<JoinHandle<()>>,
}

impl BridgeHandle {
    /// Move `bridge` onto a dedicated dispatch thread
    pub fn spawn(bridge: SecurityBridge) -> Self {
        let (tx, rx) = unbounded();
        let join = std::thread::Builder::new()
            .name("bridge-dispatch".into())
            .spawn(move || dispatch_loop(bridge, rx))
            .expect("failed to spawn bridge dispatch thread");

        Self {
            client: BridgeClient { tx },
            join: Some(join),
        }
    }

    /// Cloneable sender for use from other threads
    pub fn client(&self) -> BridgeClient {
        self.client.clone()
    }

    /// Queue one operation call and block for its reply
    pub fn invoke(&self, call: OperationCall) -> DispatchResult<OperationReply> {
        self.client.invoke(call)
    }

    /// Queue a lifecycle transition, ordered with invokes
    pub fn lifecycle(&self, event: LifecycleEvent) -> DispatchResult<()> {
        self.client.lifecycle(event)
    }

    /// Stop the loop after draining already-queued directives
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.client.tx.send(Directive::Shutdown);
            let _ = join.join();
        }
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

fn dispatch_loop(mut bridge: SecurityBridge, rx: Receiver<Directive>) {
    debug!("bridge dispatch loop started");

    while let Ok(directive) = rx.recv() {
        match directive {
            Directive::Invoke { call, reply_tx } => {
                let reply = bridge.handle(&call);
                // The caller may have given up; the operation still ran.
                let _ = reply_tx.send(reply);
            }
            Directive::Lifecycle(event) => {
                if let Err(err) = bridge.lifecycle(event) {
                    warn!(%err, "lifecycle reassert failed");
                }
            }
            Directive::Shutdown => break,
        }
    }

    debug!("bridge dispatch loop ended");
}
