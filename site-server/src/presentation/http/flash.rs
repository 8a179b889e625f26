use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "flash";

/// One-shot notice carried across a redirect in a cookie and shown on the
/// next rendered page only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flash {
    MessagePosted,
    Saved,
    Deleted,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::MessagePosted => "posted",
            Flash::Saved => "saved",
            Flash::Deleted => "deleted",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "posted" => Some(Flash::MessagePosted),
            "saved" => Some(Flash::Saved),
            "deleted" => Some(Flash::Deleted),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Flash::MessagePosted => "Success! Your message has been posted.",
            Flash::Saved => "Record saved.",
            Flash::Deleted => "Record deleted.",
        }
    }
}

pub(crate) fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending notice and clears it in the same response.
pub(crate) fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(flash) = jar
        .get(FLASH_COOKIE)
        .map(|cookie| Flash::from_code(cookie.value()))
    else {
        return (jar, None);
    };
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
