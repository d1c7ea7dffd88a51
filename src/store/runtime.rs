use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::AbortHandle;
use tracing::{debug, trace, warn};

use super::action::{Action, ActionError, RawAction};
use super::reducer::reduce;
use super::state::AppState;
use super::toast::{DEFAULT_TOAST_DURATION, Toast, ToastId, ToastKind};

/// Owns the application state. Everything changes through [`Store::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &AppState {
        debug!(action = action.kind(), "Dispatching action");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        &self.state
    }

    pub fn dispatch_raw(&mut self, raw: RawAction) -> Result<&AppState, ActionError> {
        let action = Action::try_from(raw)?;
        Ok(self.dispatch(action))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Auto-dismiss delay for toasts that carry no duration of their own.
    pub toast_duration: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("store task has stopped")]
pub struct StoreClosed;

enum Command {
    Dispatch {
        action: Action,
        reply: Option<oneshot::Sender<AppState>>,
    },
}

/// Cloneable handle to a [`Store`] running on its own tokio task.
///
/// Dispatches from every handle are applied one at a time, in the order the
/// task receives them. Each added toast gets a timer that removes it by id.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<AppState>,
}

impl StoreHandle {
    /// Moves `store` onto a new task. Must be called inside a tokio runtime.
    pub fn spawn(store: Store, options: StoreOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(store.state().clone());
        let timer_tx = tx.downgrade();

        tokio::spawn(run_store(store, options, rx, timer_tx, state_tx));

        Self { tx, state_rx }
    }

    /// Applies `action` and returns the resulting state.
    pub async fn dispatch(&self, action: Action) -> Result<AppState, StoreClosed> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Dispatch {
                action,
                reply: Some(reply_tx),
            })
            .map_err(|_| StoreClosed)?;
        reply_rx.await.map_err(|_| StoreClosed)
    }

    /// Queues `action` without waiting for it to be applied.
    pub fn send(&self, action: Action) -> Result<(), StoreClosed> {
        self.tx
            .send(Command::Dispatch {
                action,
                reply: None,
            })
            .map_err(|_| StoreClosed)
    }

    pub async fn toast(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
    ) -> Result<ToastId, StoreClosed> {
        let toast = Toast::new(message, kind);
        let id = toast.id;
        self.dispatch(Action::AddToast(toast)).await?;
        Ok(id)
    }

    /// Passes `Ok` values through; turns an error into a toast.
    pub async fn report<T, E>(&self, result: Result<T, E>) -> Option<T>
    where
        E: Into<Toast>,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let toast: Toast = e.into();
                warn!(kind = %toast.kind, message = %toast.message, "Reporting failure");
                let _ = self.dispatch(Action::AddToast(toast)).await;
                None
            }
        }
    }

    /// Latest published state.
    pub fn state(&self) -> AppState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state_rx.clone()
    }
}

async fn run_store(
    mut store: Store,
    options: StoreOptions,
    mut rx: mpsc::UnboundedReceiver<Command>,
    timer_tx: mpsc::WeakUnboundedSender<Command>,
    state_tx: watch::Sender<AppState>,
) {
    let mut timers: HashMap<ToastId, AbortHandle> = HashMap::new();

    while let Some(Command::Dispatch { action, reply }) = rx.recv().await {
        // Timers are keyed by id, so a reused id must not reach the queue.
        let action = match action {
            Action::AddToast(mut toast) if store.state().toasts.position(toast.id).is_some() => {
                warn!(toast = %toast.id, "Toast id already queued, assigning a new one");
                toast.id = ToastId::new();
                Action::AddToast(toast)
            }
            other => other,
        };

        match &action {
            Action::AddToast(toast) => {
                let id = toast.id;
                let lifetime = toast.lifetime(options.toast_duration);
                let timer = spawn_toast_timer(id, lifetime, timer_tx.clone());
                if let Some(previous) = timers.insert(id, timer) {
                    previous.abort();
                }
            }
            Action::RemoveToast(id) => {
                if let Some(timer) = timers.remove(id) {
                    timer.abort();
                }
            }
            Action::RemoveToastAt(index) => {
                if let Some(id) = store.state().toasts.id_at(*index)
                    && let Some(timer) = timers.remove(&id)
                {
                    timer.abort();
                }
            }
            _ => {}
        }

        let state = store.dispatch(action).clone();
        state_tx.send_replace(state.clone());
        if let Some(reply) = reply {
            let _ = reply.send(state);
        }
    }

    trace!(pending_timers = timers.len(), "Store task shutting down");
    for timer in timers.values() {
        timer.abort();
    }
}

fn spawn_toast_timer(
    id: ToastId,
    lifetime: Duration,
    tx: mpsc::WeakUnboundedSender<Command>,
) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(lifetime).await;
        if let Some(tx) = tx.upgrade() {
            trace!(toast = %id, "Toast expired");
            let _ = tx.send(Command::Dispatch {
                action: Action::RemoveToast(id),
                reply: None,
            });
        }
    })
    .abort_handle()
}
