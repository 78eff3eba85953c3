//! The state container.
//!
//! A [`Store`] owns the current [`StoreState`], runs every dispatched action
//! through the persistence-decorated reducer and notifies listeners. It is
//! created once at process entry and passed around explicitly; dispatch is
//! synchronous and never suspends.

use crate::app::action::Action;
use crate::app::error::StoreError;
use crate::app::middleware::SerializableCheck;
use crate::app::reducer::Reducer;
use crate::app::state::RootState;
use crate::persist::{PersistConfig, PersistStatus, PersistedReducer, StoreState};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&StoreState)>;

pub struct Store {
    reducer: PersistedReducer,
    middleware: SerializableCheck,
    state: StoreState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

pub fn create_store(reducer: PersistedReducer, middleware: SerializableCheck) -> Store {
    let state = reducer.initial_state();
    Store {
        reducer,
        middleware,
        state,
        listeners: Vec::new(),
        next_subscription: 0,
    }
}

impl Store {
    pub fn get_state(&self) -> &RootState {
        &self.state.root
    }

    pub fn persist_status(&self) -> &PersistStatus {
        &self.state.persist
    }

    pub fn persist_config(&self) -> &PersistConfig {
        self.reducer.config()
    }

    /// Run `selector` against the current state.
    pub fn select<'a, T>(&'a self, selector: impl FnOnce(&'a RootState) -> T) -> T {
        selector(&self.state.root)
    }

    /// Run `action` through the reducer chain and notify listeners.
    ///
    /// On a reducer error the previous state is kept and no listener runs.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<Action, StoreError> {
        let action = action.into();

        if let Err(violation) = self.middleware.check(&action) {
            warn!(error = %violation, "non-serializable action dispatched");
        }

        debug!(action = action.kind(), "dispatch");
        let next = self.reducer.reduce(self.state.clone(), &action)?;
        self.state = next;
        self.notify();
        Ok(action)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::compose_root_reducer;
    use crate::persist::{apply_persistence, MemoryStorage, PersistAction};
    use crate::slices::auth::{AuthAction, AuthReducer};
    use crate::slices::campaigns::{Campaign, CampaignStatus, CampaignsAction};
    use crate::slices::collaboration::{CollabSession, CollaborationAction};
    use crate::slices::dashboard::DashboardAction;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn store() -> Store {
        let config = PersistConfig::new("root", Arc::new(MemoryStorage::new()));
        create_store(
            apply_persistence(compose_root_reducer(AuthReducer::Native), config),
            SerializableCheck::default(),
        )
    }

    fn script() -> Vec<Action> {
        vec![
            AuthAction::login("u1").into(),
            DashboardAction::RefreshStarted.into(),
            CampaignsAction::Upserted {
                campaign: Campaign {
                    id: "c1".into(),
                    name: "Launch".into(),
                    status: CampaignStatus::Active,
                    budget: 1200.0,
                },
            }
            .into(),
            CollaborationAction::SessionOpened {
                session: CollabSession {
                    id: "s1".into(),
                    title: "Launch brief".into(),
                    participants: vec!["u1".into()],
                    unread: 0,
                },
            }
            .into(),
            DashboardAction::Refreshed {
                widgets: vec!["spend".into()],
                at: Utc::now(),
            }
            .into(),
        ]
    }

    #[test]
    fn test_login_scenario() {
        let mut store = store();
        store.dispatch(AuthAction::login("u1")).unwrap();
        assert_eq!(store.get_state().auth.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_dispatch_returns_the_action() {
        let mut store = store();
        let action = store.dispatch(AuthAction::Logout).unwrap();
        assert_eq!(action.kind(), "auth/logout");
    }

    #[test]
    fn test_unrecognized_action_leaves_state_unchanged() {
        let mut store = store();
        for action in script() {
            store.dispatch(action).unwrap();
        }
        let before = store.get_state().clone();
        store.dispatch(PersistAction::Flush).unwrap();
        assert_eq!(store.get_state(), &before);
    }

    #[test]
    fn test_reducer_error_keeps_previous_state() {
        let mut store = store();
        store.dispatch(AuthAction::login("u1")).unwrap();
        let before = store.get_state().clone();

        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let err = store.dispatch(AuthAction::login("")).unwrap_err();
        assert!(matches!(err, StoreError::Reducer(_)));
        assert_eq!(store.get_state(), &before);
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn test_sequential_and_batched_dispatch_agree() {
        let actions = script();

        let mut one_at_a_time = store();
        for action in actions.clone() {
            one_at_a_time.dispatch(action).unwrap();
        }

        // Batched: fold the whole script through the reducer before committing.
        let batched = store();
        let reducer = compose_root_reducer(AuthReducer::Native);
        let folded = actions
            .iter()
            .try_fold(batched.get_state().clone(), |state, action| reducer.reduce(state, action))
            .unwrap();

        assert_eq!(one_at_a_time.get_state(), &folded);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |state| {
            sink.borrow_mut().push(state.root.auth.user_id.clone());
        });

        store.dispatch(AuthAction::login("u1")).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(AuthAction::Logout).unwrap();

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string())]);
    }

    #[test]
    fn test_select_reads_root_state() {
        let mut store = store();
        store.dispatch(AuthAction::login("u1")).unwrap();
        let authenticated = store.select(|s| s.auth.is_authenticated());
        assert!(authenticated);
    }
}
