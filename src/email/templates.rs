//! Rendered email bodies and subject lines.
//!
//! Bodies are askama templates under `templates/email/`; every user-supplied
//! field is HTML-escaped by the template engine. Configuration values that are
//! trusted (site URL) are marked `safe` in the templates.

use askama::Template;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::London;
use url::Url;

const PLACEHOLDER: &str = "—";

pub struct Honour {
    pub title: &'static str,
    pub detail: &'static str,
}

pub struct Highlight {
    pub lead: &'static str,
    pub rest: &'static str,
}

pub const CAREER_HONOURS: &[Honour] = &[
    Honour {
        title: "European Champion",
        detail: "First ever from Nottinghamshire",
    },
    Honour {
        title: "ABA National Champion",
        detail: "First from Nottingham since Carl Froch",
    },
    Honour {
        title: "British Silver Medalist",
        detail: "National Championships",
    },
    Honour {
        title: "Romanian National Champion",
        detail: "Representing his roots",
    },
    Honour {
        title: "Haringey Box Cup Winner",
        detail: "Prestigious invitational tournament",
    },
    Honour {
        title: "Elite Boxer of the Tournament",
        detail: "Sweden — 757 competitors",
    },
    Honour {
        title: "Beat an Olympian",
        detail: "In just his 30th career fight",
    },
];

pub const COMING_NEXT: &[Highlight] = &[
    Highlight {
        lead: "Fight announcements",
        rest: "and ticket pre-sale access before the general public",
    },
    Highlight {
        lead: "Training camp updates",
        rest: "— behind-the-scenes footage, sparring reports, and preparation insights",
    },
    Highlight {
        lead: "Personal messages",
        rest: "directly from the fighter — his thoughts, his mindset, his goals",
    },
    Highlight {
        lead: "Career milestones",
        rest: "as they happen — pro debut, rankings, title shots, and everything in between",
    },
];

/// Team notification for a contact form submission.
#[derive(Template)]
#[template(path = "email/contact_notification.html")]
pub struct ContactNotification<'a> {
    pub name: &'a str,
    pub organization: &'a str,
    pub role: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub message: &'a str,
    pub site_host: &'a str,
}

impl<'a> ContactNotification<'a> {
    #[must_use]
    pub fn new(
        name: &'a str,
        email: &'a str,
        message: &'a str,
        organization: Option<&'a str>,
        role: Option<&'a str>,
        phone: Option<&'a str>,
        site_host: &'a str,
    ) -> Self {
        Self {
            name,
            organization: organization.unwrap_or(PLACEHOLDER),
            role: role.unwrap_or(PLACEHOLDER),
            email,
            phone: phone.unwrap_or(PLACEHOLDER),
            message,
            site_host,
        }
    }
}

/// Team notification for a newsletter signup.
#[derive(Template)]
#[template(path = "email/signup_notification.html")]
pub struct SignupNotification<'a> {
    pub headline_name: &'a str,
    pub first_name: &'a str,
    pub email: &'a str,
    pub signed_up_at: String,
    pub site_host: &'a str,
}

impl<'a> SignupNotification<'a> {
    #[must_use]
    pub fn new(
        email: &'a str,
        first_name: Option<&'a str>,
        at: DateTime<Utc>,
        site_host: &'a str,
    ) -> Self {
        Self {
            headline_name: first_name.unwrap_or("Someone"),
            first_name: first_name.unwrap_or(PLACEHOLDER),
            email,
            signed_up_at: london_timestamp(at),
            site_host,
        }
    }
}

/// Welcome email sent to a new subscriber.
#[derive(Template)]
#[template(path = "email/welcome.html")]
pub struct WelcomeEmail<'a> {
    pub name: &'a str,
    pub site_url: &'a str,
    pub site_name: &'a str,
    pub honours: &'a [Honour],
    pub coming_next: &'a [Highlight],
}

impl<'a> WelcomeEmail<'a> {
    #[must_use]
    pub fn new(first_name: Option<&'a str>, site_url: &'a str, site_name: &'a str) -> Self {
        Self {
            name: first_name.unwrap_or("Champion"),
            site_url: site_url.trim_end_matches('/'),
            site_name,
            honours: CAREER_HONOURS,
            coming_next: COMING_NEXT,
        }
    }
}

#[must_use]
pub fn contact_subject(role: Option<&str>, name: &str) -> String {
    format!("New Inquiry — {} — {name}", role.unwrap_or("General"))
}

#[must_use]
pub fn signup_subject(first_name: Option<&str>, email: &str) -> String {
    format!(
        "New Newsletter Signup — {} ({email})",
        first_name.unwrap_or("Anonymous")
    )
}

#[must_use]
pub fn welcome_subject(site_name: &str) -> String {
    format!("Welcome to the Inner Circle — {site_name}")
}

/// en-GB style timestamp in UK local time, e.g. `05/03/2026, 14:07:09`.
#[must_use]
pub fn london_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&London)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Host part of the public site URL, used in email footers.
#[must_use]
pub fn site_host(site_url: &str) -> String {
    Url::parse(site_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| site_url.to_string())
}
