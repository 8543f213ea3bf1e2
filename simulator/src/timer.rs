use std::time::Duration;
use tokio::sync::mpsc;
use tracing::trace;
use xiaomali_execution::{Scheduler, Step};

/// Runs each scheduled step on a tokio timer and delivers it on a channel.
///
/// The shell owns the receiving end and feeds steps back into the engine, so
/// the engine is only ever touched from one task.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<Step>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Step>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, step: Step) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the shell is shutting down
            if sender.send(step).is_err() {
                trace!(?step, "dropped step after shutdown");
            }
        });
    }
}
