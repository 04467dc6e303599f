//! Running sink calls off the UI thread.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Outcome of polling a [`Pending`] task.
pub enum Poll<T> {
    Waiting,
    Ready(T),
    /// The task ended without sending a result (it panicked or was dropped).
    Lost,
}

/// A future spawned on the runtime whose result the UI picks up later.
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// Spawn `future`, repainting `ctx` once it completes.
    pub fn spawn<F>(runtime: &tokio::runtime::Handle, ctx: &egui::Context, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let output = future.await;
            // The screen may be gone by now; nothing to do then
            let _ = tx.send(output);
            ctx.request_repaint();
        });
        Self { rx }
    }

    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Lost,
        }
    }
}
