//! # Stop requests from the operating system.
//!
//! [`wait_for_shutdown_signal`] resolves the first time the process is asked to
//! stop. The catalogue races it against the running showcases and cancels the
//! runtime token when it wins.
//!
//! | Platform | Signals watched                 |
//! |----------|---------------------------------|
//! | unix     | `SIGINT`, `SIGTERM`, `SIGQUIT`  |
//! | other    | Ctrl-C                          |

/// Resolves on the first stop request.
///
/// Fails only if a signal handler cannot be installed.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let kinds = [
        SignalKind::interrupt(),
        SignalKind::terminate(),
        SignalKind::quit(),
    ];
    let mut streams = kinds
        .into_iter()
        .map(signal)
        .collect::<std::io::Result<Vec<_>>>()?;

    let pending = streams.iter_mut().map(|s| Box::pin(s.recv()));
    futures::future::select_all(pending).await;
    Ok(())
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
