// signup-client/src/controller.rs
use chrono::{Duration, Utc};
use common::models::{AuthState, Session};

use crate::activity_repository::ActivityRepository;
use crate::auth_gateway::AuthGateway;
use crate::commands::Command;
use crate::error::{ActionError, ADMIN_LOGIN_REQUIRED};
use crate::session_store::SessionStore;
use crate::view::{render, LoginDialog, Notice, RenderState, View};

const LOGIN_SUCCESS: &str = "Login successful!";
const LOGOUT_SUCCESS: &str = "Logged out successfully";
const DEFAULT_NOTICE_TTL_SECS: i64 = 5;

/// Keeps session, catalog and the rendered view in step.
///
/// Owns the [`Session`]; reads catalog snapshots from the repository. Every
/// command ends with a full re-render.
pub struct ViewController {
    store: SessionStore,
    auth: AuthGateway,
    repository: ActivityRepository,
    session: Session,
    catalog_unavailable: bool,
    notice: Option<Notice>,
    notice_ttl: Duration,
    login_dialog: LoginDialog,
    view: View,
}

impl ViewController {
    pub fn new(
        store: SessionStore,
        auth: AuthGateway,
        repository: ActivityRepository,
        notice_ttl: std::time::Duration,
    ) -> Self {
        let session = Session::new();
        let login_dialog = LoginDialog::default();
        let view = render(&RenderState {
            session: &session,
            catalog: repository.snapshot(),
            catalog_unavailable: false,
            notice: None,
            login_dialog: &login_dialog,
        });

        Self {
            store,
            auth,
            repository,
            session,
            catalog_unavailable: false,
            notice: None,
            notice_ttl: notice_ttl_from(notice_ttl),
            login_dialog,
            view,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn repository(&self) -> &ActivityRepository {
        &self.repository
    }

    /// Last rendered view
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Restore the session from storage, then load the catalog.
    ///
    /// The catalog is public, so it is fetched whatever the auth outcome.
    pub async fn startup(&mut self) -> &View {
        if let Some(token) = self.store.load().filter(|token| !token.is_empty()) {
            match self.auth.verify(&token).await {
                Ok(user) => {
                    tracing::info!("Restored session for {}", user.email);
                    self.session.authenticate(token, user);
                }
                Err(e) => {
                    tracing::info!("Discarding stored token: {}", e);
                    self.end_session();
                }
            }
        }
        self.rerender();

        self.refresh().await;
        &self.view
    }

    /// Handle one user action and re-render
    pub async fn dispatch(&mut self, command: Command) -> &View {
        self.expire_notice();

        if command.is_mutation() && self.session.state() == AuthState::LoggedOut {
            tracing::warn!("Rejected {:?} without an admin session", command);
            self.notice = Some(Notice::error(ADMIN_LOGIN_REQUIRED));
            self.rerender();
            return &self.view;
        }

        match command {
            Command::OpenLogin => {
                self.login_dialog.open = true;
            }
            Command::CloseLogin => {
                self.login_dialog = LoginDialog::default();
            }
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => {
                self.end_session();
                self.notice = Some(Notice::success(LOGOUT_SUCCESS));
            }
            Command::Signup { activity, email } => {
                let token = self.session.token().unwrap_or_default().to_string();
                let result = self.repository.signup(&activity, &email, &token).await;
                self.after_mutation(result).await;
            }
            Command::Unregister { activity, email } => {
                let token = self.session.token().unwrap_or_default().to_string();
                let result = self.repository.unregister(&activity, &email, &token).await;
                self.after_mutation(result).await;
            }
            Command::Refresh => {
                self.refresh().await;
            }
        }

        self.rerender();
        &self.view
    }

    /// Build the view from current state; does not store it
    pub fn render(&self) -> View {
        render(&RenderState {
            session: &self.session,
            catalog: self.repository.snapshot(),
            catalog_unavailable: self.catalog_unavailable,
            notice: self.notice.as_ref(),
            login_dialog: &self.login_dialog,
        })
    }

    async fn login(&mut self, email: &str, password: &str) {
        match self.auth.login(email, password).await {
            Ok(success) => {
                if self.store.save(&success.token).is_err() {
                    tracing::warn!("Session will not survive a restart");
                }
                self.session.authenticate(success.token, success.user);
                self.login_dialog = LoginDialog::default();
                self.notice = Some(Notice::success(LOGIN_SUCCESS));
            }
            Err(e) => {
                self.login_dialog = LoginDialog {
                    open: true,
                    error: Some(e.message),
                };
            }
        }
    }

    async fn after_mutation(&mut self, result: Result<String, ActionError>) {
        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.refresh().await;
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    async fn refresh(&mut self) {
        match self.repository.fetch_all().await {
            Ok(_) => self.catalog_unavailable = false,
            Err(e) => {
                tracing::warn!("Keeping previous catalog: {}", e);
                self.catalog_unavailable = true;
            }
        }
        self.rerender();
    }

    fn end_session(&mut self) {
        self.auth.logout(&self.store);
        self.session.clear();
    }

    fn expire_notice(&mut self) {
        let now = Utc::now();
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.is_expired(now, self.notice_ttl))
        {
            self.notice = None;
        }
    }

    fn rerender(&mut self) {
        self.view = self.render();
    }
}

fn notice_ttl_from(ttl: std::time::Duration) -> Duration {
    Duration::from_std(ttl).unwrap_or_else(|_| {
        tracing::warn!(
            "Notice TTL of {}s is out of range, using {}s",
            ttl.as_secs(),
            DEFAULT_NOTICE_TTL_SECS
        );
        Duration::seconds(DEFAULT_NOTICE_TTL_SECS)
    })
}
