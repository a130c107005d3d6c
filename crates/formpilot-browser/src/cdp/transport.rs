//! The single DevTools WebSocket shared by the browser connection and every
//! page session on it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{Command, Inbound};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Events buffered per session. A lagging subscriber skips, it never blocks the reader.
pub(crate) const EVENT_CAPACITY: usize = 256;

/// Matches replies to waiting commands and events to session subscribers.
#[derive(Default)]
pub(crate) struct Router {
    waiters: Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>,
    sessions: RwLock<HashMap<String, broadcast::Sender<Inbound>>>,
}

impl Router {
    fn wait_for(&self, id: u64) -> oneshot::Receiver<Result<Value, CdpError>> {
        let (tx, rx) = oneshot::channel();
        self.waiters.lock().insert(id, tx);
        rx
    }

    fn forget(&self, id: u64) {
        self.waiters.lock().remove(&id);
    }

    pub(crate) fn open_session(&self, session_id: &str) {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        self.sessions.write().insert(session_id.to_string(), tx);
    }

    pub(crate) fn close_session(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }

    /// Events for one session from now on. Closed immediately if the session is gone.
    pub(crate) fn subscribe(&self, session_id: &str) -> broadcast::Receiver<Inbound> {
        match self.sessions.read().get(session_id) {
            Some(tx) => tx.subscribe(),
            None => broadcast::channel(1).1,
        }
    }

    pub(crate) fn dispatch(&self, inbound: Inbound) {
        if let Some(id) = inbound.id {
            let waiter = self.waiters.lock().remove(&id);
            match waiter {
                Some(waiter) => {
                    let _ = waiter.send(inbound.into_reply());
                }
                None => trace!(id, "Reply for a command nobody waits on"),
            }
            return;
        }

        let Some(session_id) = inbound.session_id.as_deref() else {
            return;
        };
        let route = self.sessions.read().get(session_id).cloned();
        if let Some(route) = route {
            // No receivers is normal outside a scenario.
            let _ = route.send(inbound);
        }
    }

    /// Fail every waiting command and end every event stream.
    pub(crate) fn shut(&self) {
        for (_, waiter) in self.waiters.lock().drain() {
            let _ = waiter.send(Err(CdpError::Closed));
        }
        self.sessions.write().clear();
    }
}

pub(crate) struct Transport {
    sink: tokio::sync::Mutex<SplitSink<Socket, Message>>,
    next_id: AtomicU64,
    pub(crate) router: Router,
}

impl Transport {
    /// Connect to a DevTools WebSocket and start reading from it.
    pub(crate) async fn open(ws_url: &str) -> Result<(Arc<Self>, JoinHandle<()>), CdpError> {
        let (socket, _) = tokio_tungstenite::connect_async(ws_url).await?;
        let (sink, source) = socket.split();

        let transport = Arc::new(Self {
            sink: tokio::sync::Mutex::new(sink),
            next_id: AtomicU64::new(1),
            router: Router::default(),
        });
        let reader = tokio::spawn(Arc::clone(&transport).read(source));
        Ok((transport, reader))
    }

    /// Send one command and wait for its reply.
    pub(crate) async fn send(&self, method: &str, params: Value, session_id: Option<&str>) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let text = serde_json::to_string(&Command {
            id,
            method,
            params,
            session_id,
        })?;
        trace!(id, method, "CDP send");

        let reply = self.router.wait_for(id);
        if let Err(e) = self.sink.lock().await.send(Message::Text(text.into())).await {
            self.router.forget(id);
            return Err(e.into());
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, reply).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::Closed),
            Err(_) => {
                self.router.forget(id);
                Err(CdpError::Timeout(method.to_string()))
            }
        }
    }

    async fn read(self: Arc<Self>, mut source: SplitStream<Socket>) {
        while let Some(frame) = source.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    warn!("DevTools socket error: {}", e);
                    break;
                }
            };
            match serde_json::from_str::<Inbound>(&text) {
                Ok(inbound) => self.router.dispatch(inbound),
                Err(e) => warn!("Unreadable DevTools message: {}", e),
            }
        }
        debug!("DevTools socket closed");
        self.router.shut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(json: &str) -> Inbound {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_reply_reaches_its_waiter() {
        let router = Router::default();
        let first = router.wait_for(1);
        let second = router.wait_for(2);

        router.dispatch(inbound(r#"{"id": 2, "result": {"executionContextId": 7}}"#));
        router.dispatch(inbound(r#"{"id": 1, "error": {"code": -32000, "message": "No frame with given id found"}}"#));

        assert_eq!(second.await.unwrap().unwrap()["executionContextId"], 7);
        assert!(matches!(first.await.unwrap(), Err(CdpError::Remote { code: -32000, .. })));
    }

    #[test]
    fn test_events_are_routed_by_session() {
        let router = Router::default();
        router.open_session("S1");
        router.open_session("S2");
        let mut s1 = router.subscribe("S1");
        let mut s2 = router.subscribe("S2");

        router.dispatch(inbound(
            r#"{"method": "Page.javascriptDialogOpening", "params": {"message": "ok?", "type": "confirm"}, "sessionId": "S1"}"#,
        ));
        router.dispatch(inbound(r#"{"method": "Target.targetCreated", "params": {}}"#));

        assert!(s1.try_recv().unwrap().is_event("Page.javascriptDialogOpening"));
        assert!(s2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_shut_fails_waiters_and_ends_streams() {
        let router = Router::default();
        router.open_session("S1");
        let mut events = router.subscribe("S1");
        let pending = router.wait_for(9);

        router.shut();

        assert!(matches!(pending.await.unwrap(), Err(CdpError::Closed)));
        assert!(matches!(events.recv().await, Err(broadcast::error::RecvError::Closed)));
    }

    #[tokio::test]
    async fn test_subscribe_after_close_is_already_closed() {
        let router = Router::default();
        router.open_session("S1");
        router.close_session("S1");
        let mut events = router.subscribe("S1");
        assert!(matches!(events.recv().await, Err(broadcast::error::RecvError::Closed)));
    }

    #[test]
    fn test_forgotten_waiter_ignores_late_reply() {
        let router = Router::default();
        let _rx = router.wait_for(3);
        router.forget(3);
        router.dispatch(inbound(r#"{"id": 3, "result": {}}"#));
        assert!(router.waiters.lock().is_empty());
    }
}
