use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{
    TransferError, api,
    types::{PendingAuthorization, ReceiverState},
    warning,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub fn router(pending: Arc<PendingAuthorization>) -> Router {
    Router::new()
        .route(api::CALLBACK_PATH, get(api::callback))
        .fallback(api::not_found)
        .layer(Extension(pending))
}

/// Single-shot listener for the OAuth redirect.
///
/// The server stops accepting connections as soon as an outcome has been
/// stored in the shared [`PendingAuthorization`], when `timeout` elapses, or
/// when [`CallbackServer::shutdown`] is called. In-flight responses are still
/// delivered to the browser.
pub struct CallbackServer {
    local_addr: SocketAddr,
    pending: Arc<PendingAuthorization>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl CallbackServer {
    /// Binds `addr` and starts serving in the background. The socket is
    /// listening once this returns.
    pub async fn start(
        addr: SocketAddr,
        pending: Arc<PendingAuthorization>,
        timeout: Duration,
    ) -> Result<Self, TransferError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TransferError::CallbackBind(addr, e))?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(Arc::clone(&pending));
        let signal_pending = Arc::clone(&pending);

        let task = tokio::spawn(async move {
            let signal = async move {
                tokio::select! {
                    _ = signal_pending.wait() => {}
                    _ = tokio::time::sleep(timeout) => {}
                    _ = shutdown_rx => {}
                }
            };

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                warning!("Callback server stopped unexpectedly: {}", e);
            }
        });

        Ok(Self {
            local_addr,
            pending,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits until the server reached a terminal state on its own.
    pub async fn finished(mut self) -> ReceiverState {
        let _ = (&mut self.task).await;
        self.state()
    }

    /// Stops the listener, frees the port and reports the terminal state.
    pub async fn shutdown(mut self) -> ReceiverState {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if tokio::time::timeout(SHUTDOWN_GRACE, &mut self.task)
            .await
            .is_err()
        {
            // a client kept its connection open past the grace period
            self.task.abort();
        }

        self.state()
    }

    fn state(&self) -> ReceiverState {
        match self.pending.outcome() {
            Some(outcome) => ReceiverState::Completed(outcome.clone()),
            None => ReceiverState::TimedOut,
        }
    }
}
