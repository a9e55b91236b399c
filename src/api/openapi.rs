use super::handlers::{contact, health, newsletter, vault};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// JSON API routes, served and documented from the same registration.
///
/// Pages, static files and `OPTIONS /api/health` are added in [`super::app`]
/// and stay out of the document.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(vault::unlock))
        .routes(routes!(contact::contact))
        .routes(routes!(newsletter::subscribe));

    router.get_openapi_mut().tags = Some(vec![
        tag("vault", "Passphrase unlock for the gated site"),
        tag("contact", "Inquiries forwarded to the team inbox"),
        tag("newsletter", "Inner Circle mailing list signup"),
        tag("health", "Service status"),
    ]);

    router
}

fn tag(name: &str, description: &str) -> Tag {
    let mut tag = Tag::new(name);
    tag.description = Some(description.to_string());
    tag
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact(env!("CARGO_PKG_AUTHORS"));
    info.license = optional_str(env!("CARGO_PKG_LICENSE")).map(|identifier| {
        let mut license = License::new(identifier);
        license.identifier = Some(identifier.to_string());
        license
    });

    OpenApiBuilder::new().info(info).build()
}

/// First Cargo author, `Name <email>` or a bare name.
fn cargo_contact(authors: &str) -> Option<Contact> {
    let primary = optional_str(authors.split(';').next()?)?;
    let (name, email) = match primary.split_once('<') {
        Some((name, email)) => (optional_str(name), optional_str(email.trim_end_matches('>'))),
        None => (Some(primary), None),
    };
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn optional_str(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
