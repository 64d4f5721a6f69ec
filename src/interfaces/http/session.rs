use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "testgen_session";

/// Identifies the browser session a request belongs to. Unknown or malformed
/// cookies get a brand-new id, so one client can never address another's data.
pub struct SessionHandle {
    pub id: String,
    is_new: bool,
}

impl SessionHandle {
    pub fn from_request(req: &HttpRequest) -> Self {
        let existing = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        match existing {
            Some(id) => Self {
                id: id.to_string(),
                is_new: false,
            },
            None => Self {
                id: Uuid::new_v4().to_string(),
                is_new: true,
            },
        }
    }

    /// Sets the session cookie on the response when it was just issued.
    pub fn attach(&self, builder: &mut HttpResponseBuilder) {
        if self.is_new {
            builder.cookie(
                Cookie::build(SESSION_COOKIE, self.id.clone())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish(),
            );
        }
    }
}
