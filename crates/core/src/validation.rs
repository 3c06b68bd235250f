//! Request validation for users, blogs and the logout body.
//!
//! Each `validate_*` function returns `CoreError::Validation` with a message
//! suitable for showing to the client.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Inclusive password length bounds, counted in characters.
pub const PASSWORD_MIN_LEN: usize = 12;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Display names and blog titles are capped at this many characters.
pub const MAX_TEXT_LEN: usize = 200;

/// No blog can predate this year.
pub const EARLIEST_BLOG_YEAR: i32 = 1991;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Usernames are email addresses.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if !username.validate_email() {
        return Err(CoreError::Validation(
            "Username must be a valid email address".into(),
        ));
    }
    Ok(())
}

/// Validate a display name (non-empty, at most [`MAX_TEXT_LEN`] characters).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Passwords are 12 to 64 ASCII letters, digits or symbols. Whitespace and
/// non-ASCII characters are refused.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Password should be of length between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN}"
        )));
    }
    if !password.chars().all(|c| c.is_ascii_graphic()) {
        return Err(CoreError::Validation(
            "Password should only contain ASCII letters, numbers, and symbols".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Blog URLs may omit the scheme (`example.com/post`); `http://` is assumed
/// for the shape check only. The stored value is left as given.
pub fn validate_blog_url(url: &str) -> Result<(), CoreError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(CoreError::Validation("Url must not be empty".into()));
    }
    let candidate = if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{url}")
    };
    if !candidate.as_str().validate_url() {
        return Err(CoreError::Validation(format!("'{url}' is not a valid url")));
    }
    Ok(())
}

/// Validate a blog's publication year against `current_year`.
pub fn validate_year(year: i32, current_year: i32) -> Result<(), CoreError> {
    if !(EARLIEST_BLOG_YEAR..=current_year).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year must be between {EARLIEST_BLOG_YEAR} and {current_year}"
        )));
    }
    Ok(())
}

pub fn validate_likes(likes: i64) -> Result<(), CoreError> {
    if likes < 0 {
        return Err(CoreError::Validation("Likes must not be negative".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

const LOGOUT_BODY_HINT: &str = "body should be either { \"all\": false } or { \"all\": true }";

/// Parse the `DELETE /logout` body.
///
/// The body must be a JSON object whose `all` field is a boolean. Missing,
/// `null`, numeric or otherwise shaped values are rejected, never defaulted.
pub fn parse_logout_body(body: &[u8]) -> Result<bool, CoreError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| CoreError::Validation(LOGOUT_BODY_HINT.into()))?;

    value
        .as_object()
        .and_then(|obj| obj.get("all"))
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| CoreError::Validation(LOGOUT_BODY_HINT.into()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn username_must_be_email() {
        assert!(validate_username("dave@example.com").is_ok());
        assert_matches!(validate_username("dave"), Err(CoreError::Validation(_)));
        assert_matches!(validate_username(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("Dave Example").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"n".repeat(MAX_TEXT_LEN + 1)).is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password(&"a".repeat(PASSWORD_MIN_LEN)).is_ok());
        assert!(validate_password(&"a".repeat(PASSWORD_MAX_LEN)).is_ok());
        let err = validate_password(&"a".repeat(PASSWORD_MIN_LEN - 1)).unwrap_err();
        assert!(err.to_string().contains("between 12 and 64"));
        assert!(validate_password(&"a".repeat(PASSWORD_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn password_character_set() {
        assert!(validate_password("AperfectlyV4l!dpassword").is_ok());
        assert!(validate_password("has a space in it").is_err());
        assert!(validate_password("unicodeé-password").is_err());
        assert!(validate_password("tab\tseparated-pw").is_err());
    }

    #[test]
    fn blog_url_accepts_schemeless() {
        assert!(validate_blog_url("example.com").is_ok());
        assert!(validate_blog_url("https://example.com/post/1").is_ok());
        assert!(validate_blog_url("").is_err());
        assert!(validate_blog_url("not a url").is_err());
    }

    #[test]
    fn year_range() {
        assert!(validate_year(1991, 2026).is_ok());
        assert!(validate_year(2026, 2026).is_ok());
        assert!(validate_year(1990, 2026).is_err());
        assert!(validate_year(2027, 2026).is_err());
    }

    #[test]
    fn title_and_likes() {
        assert!(validate_title("A title").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_likes(0).is_ok());
        assert!(validate_likes(-1).is_err());
    }

    #[test]
    fn logout_body_accepts_only_booleans() {
        assert_eq!(parse_logout_body(br#"{"all": true}"#).unwrap(), true);
        assert_eq!(parse_logout_body(br#"{"all": false}"#).unwrap(), false);

        let invalid: [&[u8]; 8] = [
            b"",
            b"null",
            br#"{"all": 1}"#,
            br#"{"all": 0}"#,
            br#"{"all": null}"#,
            br#"{"all": "true"}"#,
            b"{}",
            b"[false]",
        ];
        for body in invalid {
            assert_matches!(
                parse_logout_body(body),
                Err(CoreError::Validation(_)),
                "{:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }
}
