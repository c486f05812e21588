use std::{cell::RefCell, rc::Rc};

use log::{debug, error, info, warn};
use web_portal_common::{AuthenticatedUser, Credentials};

use crate::{i18n::Notice, transport::AuthTransport};

/// Whether a login request is currently in flight
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Local state of the login form. Transitions consume or borrow the record and return a new one
/// so the owner can swap states in a single assignment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormState {
    username: String,
    password: String,
    submission: SubmissionState,
}

/// Result of asking a [FormState] to begin a submission
#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    /// Input is valid and no request is in flight
    Started {
        next: FormState,
        credentials: Credentials,
    },
    /// Username or password is blank
    Invalid,
    /// A request is already in flight
    Busy,
}

impl FormState {
    #[must_use]
    pub fn with_username<S: Into<String>>(self, username: S) -> Self {
        Self {
            username: username.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_password<S: Into<String>>(self, password: S) -> Self {
        Self {
            password: password.into(),
            ..self
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub const fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn begin(&self) -> Transition {
        if self.submission == SubmissionState::Submitting {
            return Transition::Busy;
        }
        let username = self.username.trim();
        if username.is_empty() || self.password.trim().is_empty() {
            return Transition::Invalid;
        }
        Transition::Started {
            credentials: Credentials::new(username, self.password.as_str()),
            next: Self {
                submission: SubmissionState::Submitting,
                ..self.clone()
            },
        }
    }

    #[must_use]
    pub fn settle(self) -> Self {
        Self {
            submission: SubmissionState::Idle,
            ..self
        }
    }
}

/// Receiver of the user facing side effects of a [LoginForm]
pub trait FormObserver {
    /// Surface a transient notification to the user
    fn notify(&self, notice: Notice);
    /// Called when the form enters or leaves the [Submitting][SubmissionState::Submitting] state.
    /// Renderers use it to disable the submit control.
    fn submitting_changed(&self, _submitting: bool) {}
}

impl<O: FormObserver + ?Sized> FormObserver for Rc<O> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }

    fn submitting_changed(&self, submitting: bool) {
        (**self).submitting_changed(submitting);
    }
}

/// Outcome of a single [LoginForm::submit] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the credentials and the callback was invoked
    Authenticated,
    /// Input failed presence validation. No request was made
    Invalid,
    /// The request failed or was rejected
    Failed,
    /// Another submission was in flight. Nothing happened
    Busy,
}

/// Username/password login form. Validates input, delegates authentication to an [AuthTransport]
/// and reports the outcome to the `on_authenticated` callback or the [FormObserver].
///
/// The form is single threaded. State is never borrowed across the transport call so a second
/// [submit][LoginForm::submit] while one is pending observes the
/// [Submitting][SubmissionState::Submitting] state and returns [SubmitOutcome::Busy].
pub struct LoginForm<T, O, F>
where
    T: AuthTransport,
    O: FormObserver,
    F: Fn(AuthenticatedUser),
{
    transport: T,
    observer: O,
    on_authenticated: F,
    state: RefCell<FormState>,
}

impl<T, O, F> LoginForm<T, O, F>
where
    T: AuthTransport,
    O: FormObserver,
    F: Fn(AuthenticatedUser),
{
    pub fn new(transport: T, observer: O, on_authenticated: F) -> Self {
        Self {
            transport,
            observer,
            on_authenticated,
            state: RefCell::new(FormState::default()),
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().submission == SubmissionState::Submitting
    }

    /// Attempt a login with the entered `username` and `password`
    pub async fn submit(&self, username: &str, password: &str) -> SubmitOutcome {
        let transition = {
            let mut state = self.state.borrow_mut();
            let entered = state
                .clone()
                .with_username(username)
                .with_password(password);
            let transition = entered.begin();
            *state = match &transition {
                Transition::Started { next, .. } => next.clone(),
                Transition::Invalid | Transition::Busy => entered,
            };
            transition
        };
        let credentials = match transition {
            Transition::Started { credentials, .. } => credentials,
            Transition::Busy => {
                debug!("Ignoring login submission while another is in flight");
                return SubmitOutcome::Busy;
            }
            Transition::Invalid => {
                warn!("Login submitted without a username or password");
                self.observer.notify(Notice::MissingCredentials);
                return SubmitOutcome::Invalid;
            }
        };

        debug!("Submitting login for {}", credentials.username);
        self.observer.submitting_changed(true);
        let result = self.transport.login(&credentials).await;
        let outcome = match result {
            Ok(user) => {
                info!("Login succeeded for {}", credentials.username);
                (self.on_authenticated)(user);
                SubmitOutcome::Authenticated
            }
            Err(err) => {
                error!("Unable to login with {}: {err}", credentials.username);
                self.observer.notify(Notice::from(&err));
                SubmitOutcome::Failed
            }
        };
        self.state.replace_with(|state| state.clone().settle());
        self.observer.submitting_changed(false);
        outcome
    }
}

#[cfg(test)]
mod test {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use web_portal_common::{AuthenticatedUser, Credentials};

    use super::{FormObserver, FormState, LoginForm, SubmissionState, SubmitOutcome, Transition};
    use crate::{
        error::{AuthError, AuthResult},
        i18n::Notice,
        transport::{AuthTransport, MockAuthTransport},
    };

    /// Observer that keeps every notification and submitting flag change
    #[derive(Default)]
    struct RecordingObserver {
        notices: RefCell<Vec<Notice>>,
        submitting: RefCell<Vec<bool>>,
    }

    impl FormObserver for RecordingObserver {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }

        fn submitting_changed(&self, submitting: bool) {
            self.submitting.borrow_mut().push(submitting);
        }
    }

    /// Transport that stays pending until the test releases it through the paired sender
    struct GatedTransport {
        gate: RefCell<Option<oneshot::Receiver<AuthResult<AuthenticatedUser>>>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl AuthTransport for GatedTransport {
        async fn login(&self, _credentials: &Credentials) -> AuthResult<AuthenticatedUser> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            let Some(gate) = gate else {
                return Err("Gate already consumed".into());
            };
            gate.await.map_err(|_| AuthError::from("Gate dropped"))?
        }
    }

    type Authenticated = Rc<RefCell<Vec<AuthenticatedUser>>>;

    #[fixture]
    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(json!({"id": 1, "name": "admin"}))
    }

    fn form<T: AuthTransport>(
        transport: T,
    ) -> (
        LoginForm<T, Rc<RecordingObserver>, impl Fn(AuthenticatedUser)>,
        Rc<RecordingObserver>,
        Authenticated,
    ) {
        let observer = Rc::new(RecordingObserver::default());
        let authenticated: Authenticated = Rc::default();
        let sink = authenticated.clone();
        let form = LoginForm::new(transport, observer.clone(), move |user| {
            sink.borrow_mut().push(user);
        });
        (form, observer, authenticated)
    }

    #[rstest]
    #[case::empty_username("", "secret")]
    #[case::blank_username("   ", "secret")]
    #[case::tab_username("\t\n", "secret")]
    #[case::empty_password("admin", "")]
    #[case::blank_password("admin", "   ")]
    #[case::both_empty("", "")]
    #[tokio::test]
    async fn submit_should_not_call_backend_when_input_missing(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let mut transport = MockAuthTransport::new();
        transport.expect_login().never();
        let (form, observer, authenticated) = form(transport);

        let outcome = form.submit(username, password).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(*observer.notices.borrow(), vec![Notice::MissingCredentials]);
        assert!(observer.submitting.borrow().is_empty(), "form entered submitting");
        assert!(authenticated.borrow().is_empty(), "callback was invoked");
        assert!(!form.is_submitting(), "form left in submitting state");
    }

    #[tokio::test]
    async fn repeated_invalid_submissions_should_yield_same_outcome() {
        let mut transport = MockAuthTransport::new();
        transport.expect_login().never();
        let (form, observer, _) = form(transport);

        for _ in 0..3 {
            let outcome = form.submit(" ", "secret").await;
            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(form.state().submission(), SubmissionState::Idle);
        }

        assert_eq!(*observer.notices.borrow(), vec![Notice::MissingCredentials; 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn submit_should_post_trimmed_username_once(user: AuthenticatedUser) {
        let mut transport = MockAuthTransport::new();
        let returned = user.clone();
        transport
            .expect_login()
            .with(eq(Credentials::new("admin", "secret")))
            .times(1)
            .returning(move |_| Ok(returned.clone()));
        let (form, observer, authenticated) = form(transport);

        let outcome = form.submit("  admin ", "secret").await;

        assert_eq!(outcome, SubmitOutcome::Authenticated);
        assert_eq!(*authenticated.borrow(), vec![user]);
        assert!(observer.notices.borrow().is_empty(), "unexpected notice");
        assert_eq!(*observer.submitting.borrow(), vec![true, false]);
        assert!(!form.is_submitting(), "form left in submitting state");
    }

    #[tokio::test]
    async fn submit_should_keep_password_whitespace() {
        let mut transport = MockAuthTransport::new();
        transport
            .expect_login()
            .with(eq(Credentials::new("admin", " pass word ")))
            .times(1)
            .returning(|_| Ok(AuthenticatedUser::new(json!({"id": 2}))));
        let (form, _, authenticated) = form(transport);

        let outcome = form.submit("admin", " pass word ").await;

        assert_eq!(outcome, SubmitOutcome::Authenticated);
        assert_eq!(authenticated.borrow().len(), 1);
    }

    #[tokio::test]
    async fn submit_should_notify_and_reenable_when_rejected() {
        let mut transport = MockAuthTransport::new();
        transport
            .expect_login()
            .times(1)
            .returning(|_| Err(AuthError::rejected(401, "Invalid credentials", "Unauthorized")));
        let (form, observer, authenticated) = form(transport);

        let outcome = form.submit("admin", "wrong").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(authenticated.borrow().is_empty(), "callback was invoked");
        assert_eq!(
            *observer.notices.borrow(),
            vec![Notice::LoginFailed {
                detail: "401: Invalid credentials".to_owned()
            }]
        );
        assert_eq!(*observer.submitting.borrow(), vec![true, false]);
        assert!(!form.is_submitting(), "form left in submitting state");
    }

    #[tokio::test]
    async fn failed_submission_can_be_retried_manually() {
        let mut transport = MockAuthTransport::new();
        let mut attempts = 0;
        transport.expect_login().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(AuthError::Transport("network unreachable".to_owned()))
            } else {
                Ok(AuthenticatedUser::new(json!({"id": 1})))
            }
        });
        let (form, observer, authenticated) = form(transport);

        assert_eq!(form.submit("admin", "secret").await, SubmitOutcome::Failed);
        assert_eq!(form.submit("admin", "secret").await, SubmitOutcome::Authenticated);

        assert_eq!(observer.notices.borrow().len(), 1);
        assert_eq!(authenticated.borrow().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn submit_should_be_ignored_while_in_flight(
        user: AuthenticatedUser,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (sender, receiver) = oneshot::channel();
        let transport = GatedTransport {
            gate: RefCell::new(Some(receiver)),
            calls: Cell::new(0),
        };
        let (form, observer, authenticated) = form(transport);

        let first = form.submit("admin", "secret");
        futures::pin_mut!(first);
        assert!(futures::poll!(first.as_mut()).is_pending(), "first submit settled early");
        assert!(form.is_submitting(), "form is not submitting");

        let second = form.submit("admin", "secret").await;
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(form.transport.calls.get(), 1);

        sender
            .send(Ok(user.clone()))
            .map_err(|_| "Pending submission was dropped")?;
        assert_eq!(first.await, SubmitOutcome::Authenticated);

        assert_eq!(form.transport.calls.get(), 1);
        assert_eq!(*authenticated.borrow(), vec![user]);
        assert_eq!(*observer.submitting.borrow(), vec![true, false]);
        assert!(!form.is_submitting(), "form left in submitting state");
        Ok(())
    }

    #[test]
    fn begin_should_move_to_submitting_with_trimmed_credentials() {
        let state = FormState::default()
            .with_username(" admin ")
            .with_password("secret");

        let transition = state.begin();

        let Transition::Started { next, credentials } = transition else {
            panic!("Expected started transition, got {transition:?}");
        };
        assert_eq!(credentials, Credentials::new("admin", "secret"));
        assert_eq!(next.submission(), SubmissionState::Submitting);
        assert_eq!(next.username(), " admin ");
        assert_eq!(next.clone().settle().submission(), SubmissionState::Idle);
        assert_eq!(next.begin(), Transition::Busy);
    }
}
