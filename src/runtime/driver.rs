//! Async driver: runs an indicator against tokio's clock.

use super::Indicator;
use crate::core::Phase;
use crate::target::AnimationTarget;
use std::fmt;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Type alias for a shell-side mutation of the render target.
pub type TargetUpdate<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Message from the shell to a running indicator.
pub enum Command<T> {
    /// The target's level changed
    LevelChanged,
    /// Mutate the target, then notify the level change
    Update(TargetUpdate<T>),
    /// Request a phase directly
    Request(Phase),
    /// Stop the driver
    Shutdown,
}

impl<T> Command<T> {
    /// Build an [`Command::Update`] from a closure.
    pub fn update<F>(f: F) -> Self
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        Self::Update(Box::new(f))
    }
}

impl<T> fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelChanged => f.write_str("LevelChanged"),
            Self::Update(_) => f.write_str("Update"),
            Self::Request(phase) => f.debug_tuple("Request").field(phase).finish(),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl<T: AnimationTarget> Indicator<T> {
    /// Drive the indicator until the command channel closes or a
    /// [`Command::Shutdown`] arrives, then hand it back.
    ///
    /// Pending continuations fire when tokio's clock reaches their due time.
    /// Everything runs on the calling task, so neither the target nor the
    /// continuations need to be `Send`.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command<T>>) -> Self {
        let origin = Instant::now();
        let base = self.now();
        let clock = move || base.saturating_add(origin.elapsed());

        loop {
            self.advance_to(clock());

            // A deadline past what the runtime clock can represent never fires
            let wake = self
                .next_deadline()
                .and_then(|due| origin.checked_add(due.saturating_sub(base)));
            let timer = async move {
                match wake {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => {
                        self.advance_to(clock());
                        self.apply(command);
                    }
                },
                _ = timer => trace!(now = ?clock(), "Timer elapsed"),
            }
        }

        debug!(phase = %self.phase(), pending = self.pending(), "Indicator driver stopped");
        self
    }

    fn apply(&mut self, command: Command<T>) {
        trace!(?command, "Applying command");
        match command {
            Command::LevelChanged => {
                self.level_changed();
            }
            Command::Update(f) => {
                self.update(f);
            }
            Command::Request(phase) => {
                self.request(phase);
            }
            Command::Shutdown => {}
        }
    }
}
