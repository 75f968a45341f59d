//! The form store: owns the current snapshot and applies actions in dispatch order.
//!
//! A `FormStore` is built once per form session and handed by reference to whichever
//! components need it. Every mutation goes through [`FormStore::dispatch`]; readers get
//! either a borrow of the current state or a shared, immutable [`Arc`] snapshot.

use crate::action::FormAction;
use crate::config::IntakeConfig;
use crate::form::FormState;
use crate::reducer::FormReducer;
use std::sync::Arc;
use uuid::Uuid;

/// Identifies a listener registered with [`FormStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormState)>;

pub struct FormStore {
    session_id: Uuid,
    config: IntakeConfig,
    reducer: FormReducer,
    state: Arc<FormState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FormStore {
    /// Start a form session.
    ///
    /// The initial snapshot, including the default consultation date, is captured here
    /// from the configured clock and reused verbatim by every `ResetForm`.
    pub fn new(config: IntakeConfig) -> Self {
        let session_id = Uuid::new_v4();
        let initial = Arc::new(FormState::initial(config.today()));
        tracing::info!(
            session = %session_id,
            consultation_date = %initial.referral.consultation_date,
            "intake session started"
        );

        Self {
            session_id,
            config,
            reducer: FormReducer::new(initial.clone()),
            state: initial,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Shared handle to the current snapshot. Later dispatches never mutate it.
    pub fn snapshot(&self) -> Arc<FormState> {
        self.state.clone()
    }

    /// The snapshot captured at construction time.
    pub fn initial_snapshot(&self) -> Arc<FormState> {
        self.reducer.initial().clone()
    }

    /// Apply `action` and notify listeners if the state changed.
    ///
    /// Returns `true` when the state changed.
    pub fn dispatch(&mut self, action: FormAction) -> bool {
        let next = self.reducer.reduce(&self.state, &action);
        if next == *self.state {
            tracing::debug!(session = %self.session_id, action = action.kind(), "no change");
            return false;
        }

        tracing::debug!(
            session = %self.session_id,
            action = action.kind(),
            step = %next.current_step,
            "dispatch"
        );
        self.state = Arc::new(next);

        let state = self.state.clone();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
        true
    }

    /// Dispatch each action in order. Returns how many changed the state.
    pub fn replay<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = FormAction>,
    {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(|changed| *changed)
            .count()
    }

    /// Register a listener called with every new snapshot, in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FormState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("session_id", &self.session_id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
