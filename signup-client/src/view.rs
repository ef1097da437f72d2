// signup-client/src/view.rs
//! Render model built from session and catalog state.
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use common::models::{Activity, Catalog, Session};

use crate::error::FETCH_FAILED_MESSAGE;

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS: &str = "No participants yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above the activity list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.shown_at) >= ttl
    }
}

/// Login dialog state; login errors are shown inside the dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDialog {
    pub open: bool,
    pub error: Option<String>,
}

/// Everything a render depends on, borrowed from the controller
pub struct RenderState<'a> {
    pub session: &'a Session,
    pub catalog: &'a Catalog,
    pub catalog_unavailable: bool,
    pub notice: Option<&'a Notice>,
    pub login_dialog: &'a LoginDialog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPanel {
    LoggedOut,
    LoggedIn { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    /// Rows carry an unregister action only for admins
    pub can_unregister: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: u64,
    pub participants: Vec<ParticipantRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityList {
    Cards(Vec<ActivityCard>),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The complete visible state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub auth: AuthPanel,
    pub admin_section_visible: bool,
    pub login_required_visible: bool,
    pub login_dialog: LoginDialog,
    pub notice: Option<NoticeView>,
    pub activities: ActivityList,
    pub activity_options: Vec<SelectOption>,
}

impl View {
    /// Cards currently listed; empty when the catalog is unavailable
    pub fn cards(&self) -> &[ActivityCard] {
        match &self.activities {
            ActivityList::Cards(cards) => cards,
            ActivityList::Unavailable(_) => &[],
        }
    }

    pub fn card(&self, name: &str) -> Option<&ActivityCard> {
        self.cards().iter().find(|card| card.name == name)
    }
}

/// Build a fresh view. Nothing from a previous render is reused.
pub fn render(state: &RenderState<'_>) -> View {
    let user = state.session.user();
    let is_admin = state.session.is_admin();

    let auth = match user {
        Some(user) => AuthPanel::LoggedIn {
            name: user.name.clone(),
        },
        None => AuthPanel::LoggedOut,
    };

    let activities = if state.catalog_unavailable {
        ActivityList::Unavailable(FETCH_FAILED_MESSAGE.to_string())
    } else {
        ActivityList::Cards(
            state
                .catalog
                .iter()
                .map(|activity| card(activity, is_admin))
                .collect(),
        )
    };

    let mut activity_options = vec![SelectOption {
        value: String::new(),
        label: SELECT_PLACEHOLDER.to_string(),
    }];
    activity_options.extend(state.catalog.names().map(|name| SelectOption {
        value: name.to_string(),
        label: name.to_string(),
    }));

    View {
        auth,
        admin_section_visible: is_admin,
        login_required_visible: !is_admin,
        login_dialog: state.login_dialog.clone(),
        notice: state.notice.map(|notice| NoticeView {
            kind: notice.kind,
            text: notice.text.clone(),
        }),
        activities,
        activity_options,
    }
}

fn card(activity: &Activity, is_admin: bool) -> ActivityCard {
    ActivityCard {
        name: activity.name.clone(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        spots_left: activity.display_spots_left(),
        participants: activity
            .participants
            .iter()
            .map(|email| ParticipantRow {
                email: email.clone(),
                can_unregister: is_admin,
            })
            .collect(),
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.auth {
            AuthPanel::LoggedIn { name } => writeln!(f, "Logged in as {}", name)?,
            AuthPanel::LoggedOut => writeln!(f, "Not logged in")?,
        }

        if let Some(notice) = &self.notice {
            let tag = match notice.kind {
                NoticeKind::Success => "ok",
                NoticeKind::Error => "error",
            };
            writeln!(f, "[{}] {}", tag, notice.text)?;
        }

        if self.login_dialog.open {
            writeln!(f, "-- Login --")?;
            if let Some(error) = &self.login_dialog.error {
                writeln!(f, "  {}", error)?;
            }
        }

        writeln!(f)?;
        match &self.activities {
            ActivityList::Unavailable(message) => writeln!(f, "{}", message)?,
            ActivityList::Cards(cards) => {
                for card in cards {
                    writeln!(f, "{}", card.name)?;
                    writeln!(f, "  {}", card.description)?;
                    writeln!(f, "  Schedule: {}", card.schedule)?;
                    writeln!(f, "  Availability: {} spots left", card.spots_left)?;
                    if card.participants.is_empty() {
                        writeln!(f, "  {}", NO_PARTICIPANTS)?;
                    } else {
                        writeln!(f, "  Participants:")?;
                        for row in &card.participants {
                            if row.can_unregister {
                                writeln!(f, "    - {} [x]", row.email)?;
                            } else {
                                writeln!(f, "    - {}", row.email)?;
                            }
                        }
                    }
                }
            }
        }

        writeln!(f)?;
        if self.admin_section_visible {
            let names: Vec<&str> = self
                .activity_options
                .iter()
                .skip(1)
                .map(|option| option.label.as_str())
                .collect();
            writeln!(f, "Sign up a student for: {}", names.join(", "))?;
        }
        if self.login_required_visible {
            writeln!(f, "Teachers must log in to register or unregister students.")?;
        }
        Ok(())
    }
}
