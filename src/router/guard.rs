//! Navigation guard: decides whether a route transition may proceed

use crate::auth::SessionStore;
use crate::router::routes::{ResolvedRoute, HOME_PATH, LOGIN_PATH};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

pub const PERMISSION_DENIED: &str = "Permission denied";

/// Receives user-visible notices raised during navigation
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
}

/// Sends notices to the log only
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Keeps every notice; handy for assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    NotAuthenticated,
    MissingUserInfo,
    Forbidden,
    AlreadyAuthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

impl GuardDecision {
    fn redirect(to: &'static str, reason: RedirectReason) -> Self {
        GuardDecision::Redirect { to, reason }
    }
}

#[derive(Clone)]
pub struct NavigationGuard {
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
}

impl NavigationGuard {
    pub fn new(session: SessionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Evaluate one navigation attempt.
    ///
    /// Order: authentication, then role, then the already-logged-in check
    /// for the login page.
    pub fn check(&self, to: &ResolvedRoute) -> GuardDecision {
        let decision = self.decide(to);
        tracing::debug!("Guard {} -> {:?}", to.path, decision);
        decision
    }

    fn decide(&self, to: &ResolvedRoute) -> GuardDecision {
        if to.meta.auth_required() {
            if !self.session.is_logged_in() {
                return GuardDecision::redirect(LOGIN_PATH, RedirectReason::NotAuthenticated);
            }

            if !to.meta.requires_role.is_empty() {
                let user = match self.session.user_info() {
                    Some(user) => user,
                    None => {
                        return GuardDecision::redirect(
                            LOGIN_PATH,
                            RedirectReason::MissingUserInfo,
                        )
                    }
                };

                let permitted = to
                    .meta
                    .requires_role
                    .iter()
                    .any(|required| user.role.satisfies(*required));

                if !permitted {
                    self.notifier.warn(PERMISSION_DENIED);
                    return GuardDecision::redirect(HOME_PATH, RedirectReason::Forbidden);
                }
            }
        }

        if to.path == LOGIN_PATH && self.session.is_logged_in() {
            return GuardDecision::redirect(HOME_PATH, RedirectReason::AlreadyAuthenticated);
        }

        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{FixedClock, MemoryStorage, Role, Storage, UserInfo, USER_INFO_KEY};
    use crate::router::routes::RouteMeta;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const NOW: i64 = 1_700_000_000;

    fn live_token() -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, NOW + 60));
        format!("h.{}.s", payload)
    }

    fn guard() -> (
        NavigationGuard,
        SessionStore,
        Arc<MemoryStorage>,
        Arc<RecordingNotifier>,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone(), Arc::new(FixedClock::at_secs(NOW)));
        let notifier = Arc::new(RecordingNotifier::new());
        let guard = NavigationGuard::new(session.clone(), notifier.clone());
        (guard, session, storage, notifier)
    }

    fn route(path: &str, meta: RouteMeta) -> ResolvedRoute {
        ResolvedRoute {
            path: path.to_string(),
            name: None,
            meta,
            matched: true,
        }
    }

    #[test]
    fn test_undeclared_auth_is_required() {
        let (guard, _, _, _) = guard();
        assert_eq!(
            guard.check(&route("/x", RouteMeta::default())),
            GuardDecision::redirect(LOGIN_PATH, RedirectReason::NotAuthenticated)
        );
    }

    #[test]
    fn test_public_route_skips_auth() {
        let (guard, _, _, _) = guard();
        assert_eq!(
            guard.check(&route("/register", RouteMeta::public())),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_role_check_without_user_info() {
        let (guard, session, storage, _) = guard();
        session
            .set_session(&live_token(), &UserInfo::with_role(Role::Admin))
            .unwrap();
        storage.remove_many(&[USER_INFO_KEY]).unwrap();

        let meta = RouteMeta::default().with_roles(&[Role::Admin]);
        assert_eq!(
            guard.check(&route("/system", meta)),
            GuardDecision::redirect(LOGIN_PATH, RedirectReason::MissingUserInfo)
        );
    }

    #[test]
    fn test_forbidden_emits_single_notice() {
        let (guard, session, _, notifier) = guard();
        session.set_session(&live_token(), &UserInfo::with_role(Role::Reader)).unwrap();

        let meta = RouteMeta::default().with_roles(&[Role::Admin, Role::Librarian]);
        assert_eq!(
            guard.check(&route("/readers", meta)),
            GuardDecision::redirect(HOME_PATH, RedirectReason::Forbidden)
        );
        assert_eq!(notifier.messages(), vec![PERMISSION_DENIED.to_string()]);
    }
}
