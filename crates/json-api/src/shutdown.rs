//! Shutdown signal handling.
//!
//! Once SIGTERM or Ctrl+C arrives the server stops accepting connections and
//! drains the requests already in flight.

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("ctrl-c handler failed to install: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("sigterm handler failed to install: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("terminate handler failed to install: {0}")]
    Terminate(#[source] io::Error),
}

/// Block until a termination signal arrives, then stop the server gracefully.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_c()
            .map_err(ShutdownSignalError::Terminate)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    tokio::select! {
        result = ctrl_c => {
            result?;
            tracing::info!("ctrl-c received, shutting down");
        }
        result = terminate => {
            result?;
            tracing::info!("terminate signal received, shutting down");
        }
    };

    // No deadline: in-flight requests run to completion.
    handle.stop_graceful(None);

    Ok(())
}
