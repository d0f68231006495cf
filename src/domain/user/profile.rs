//! User profile entity.
//!
//! A user record is created the first time a validated token reaches
//! `POST /api/auth/session` and is keyed by the identity provider's subject.
//! Email is kept in sync with the token on every login; the remaining
//! fields are editable by the user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, AuthenticatedUser, Timestamp, UserId, ValidationError,
};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;

/// Validates an email address enough to catch obvious garbage.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_lowercase())
        }
        _ => Err(ValidationError::invalid_format("email", "must contain '@'")),
    }
}

/// Editable profile fields, already validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl ProfileUpdate {
    pub fn new(
        name: Option<&str>,
        bio: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let image_url = optional_text("image_url", image_url, MAX_IMAGE_URL_LENGTH)?;
        if let Some(url) = &image_url {
            if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/'))
            {
                return Err(ValidationError::invalid_format(
                    "image_url",
                    "must be an http(s) URL or an uploaded file path",
                ));
            }
        }
        Ok(Self {
            name: optional_text("name", name, MAX_NAME_LENGTH)?,
            bio: optional_text("bio", bio, MAX_BIO_LENGTH)?,
            image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    name: Option<String>,
    bio: Option<String>,
    image_url: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// First-login record built from token claims.
    pub fn from_claims(claims: &AuthenticatedUser) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: claims.id.clone(),
            email: validate_email(&claims.email)?,
            name: optional_text("name", claims.display_name.as_deref(), MAX_NAME_LENGTH)
                .unwrap_or(None),
            bio: None,
            image_url: claims.picture.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: String,
        name: Option<String>,
        bio: Option<String>,
        image_url: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            name,
            bio,
            image_url,
            created_at,
            updated_at,
        }
    }

    /// Refreshes login-sourced fields. Profile fields the user set stay.
    ///
    /// Returns true if anything changed.
    pub fn sync_claims(&mut self, claims: &AuthenticatedUser) -> Result<bool, ValidationError> {
        let email = validate_email(&claims.email)?;
        let mut changed = false;
        if email != self.email {
            self.email = email;
            changed = true;
        }
        if self.name.is_none() {
            if let Ok(Some(name)) =
                optional_text("name", claims.display_name.as_deref(), MAX_NAME_LENGTH)
            {
                self.name = Some(name);
                changed = true;
            }
        }
        if self.image_url.is_none() && claims.picture.is_some() {
            self.image_url = claims.picture.clone();
            changed = true;
        }
        if changed {
            self.updated_at = Timestamp::now();
        }
        Ok(changed)
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) {
        self.name = update.name;
        self.bio = update.bio;
        self.image_url = update.image_url;
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: &str, name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("sub-1").unwrap(),
            email,
            name.map(str::to_string),
        )
    }

    #[test]
    fn email_requires_at_sign() {
        assert!(validate_email("nobody").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("  ").is_err());
        assert_eq!(validate_email(" Ann@Example.com ").unwrap(), "ann@example.com");
    }

    #[test]
    fn from_claims_copies_name_and_picture() {
        let user =
            User::from_claims(&claims("ann@example.com", Some("Ann")).with_picture("https://p/a.png"))
                .unwrap();
        assert_eq!(user.name(), Some("Ann"));
        assert_eq!(user.image_url(), Some("https://p/a.png"));
        assert_eq!(user.bio(), None);
    }

    #[test]
    fn sync_keeps_user_chosen_name() {
        let mut user = User::from_claims(&claims("ann@example.com", Some("Ann"))).unwrap();
        user.apply_update(ProfileUpdate::new(Some("Annie"), None, None).unwrap());

        let changed = user
            .sync_claims(&claims("ann@new.example.com", Some("Ann")))
            .unwrap();

        assert!(changed);
        assert_eq!(user.name(), Some("Annie"));
        assert_eq!(user.email(), "ann@new.example.com");
    }

    #[test]
    fn sync_reports_no_change() {
        let mut user = User::from_claims(&claims("ann@example.com", Some("Ann"))).unwrap();
        assert!(!user.sync_claims(&claims("ann@example.com", Some("Other"))).unwrap());
    }

    #[test]
    fn profile_update_validates_lengths() {
        let long_bio = "b".repeat(MAX_BIO_LENGTH + 1);
        assert!(ProfileUpdate::new(None, Some(&long_bio), None).is_err());
        let long_name = "n".repeat(MAX_NAME_LENGTH + 1);
        assert!(ProfileUpdate::new(Some(&long_name), None, None).is_err());
    }

    #[test]
    fn profile_update_checks_image_url() {
        assert!(ProfileUpdate::new(None, None, Some("javascript:alert(1)")).is_err());
        assert!(ProfileUpdate::new(None, None, Some("/uploads/abc.png")).is_ok());
        assert!(ProfileUpdate::new(None, None, Some("https://cdn/x.png")).is_ok());
    }
}
