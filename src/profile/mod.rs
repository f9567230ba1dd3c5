//! # Profile Editing
//!
//! The profile screen shows the saved [`UserProfile`] and edits a separate draft. Saving
//! validates the draft; a rejected save leaves both the saved profile and the draft as they
//! were so the user can correct the offending field.

pub mod validation;

pub use validation::*;

use crate::model::{IdentityUser, UserProfile};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    saved: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditor {
    pub fn new(saved: UserProfile) -> Self {
        Self { saved, draft: None }
    }

    pub fn from_identity(user: &IdentityUser) -> Self {
        Self::new(UserProfile::from_identity(user))
    }

    pub fn profile(&self) -> &UserProfile {
        &self.saved
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Opens the edit form pre-filled with the saved profile.
    pub fn begin_edit(&mut self) -> &mut UserProfile {
        self.draft.get_or_insert_with(|| self.saved.clone())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.begin_edit().name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.begin_edit().email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.begin_edit().phone = phone.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.begin_edit().address = address.into();
    }

    /// Validates and commits the draft.
    ///
    /// Email is checked before phone; the first failure is returned.
    pub fn save(&mut self) -> Result<&UserProfile, ValidationError> {
        let Some(draft) = self.draft.as_ref() else {
            debug!("Save without pending edits");
            return Ok(&self.saved);
        };
        validate_email(&draft.email)?;
        validate_phone(&draft.phone)?;

        if let Some(draft) = self.draft.take() {
            self.saved = draft;
        }
        info!("Profile updated");
        Ok(&self.saved)
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ProfileEditor {
        ProfileEditor::from_identity(&IdentityUser {
            full_name: None,
            primary_email: Some("garvita@mail.com".to_string()),
            phone_numbers: vec!["08123456789".to_string()],
        })
    }

    #[test]
    fn test_profile_from_identity_falls_back_to_email_name() {
        let editor = editor();
        assert_eq!(editor.profile().name, "garvita");
        assert_eq!(editor.profile().phone, "08123456789");
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_valid_save_commits_draft() {
        let mut editor = editor();
        editor.set_name("Garvita S");
        editor.set_address("22 Janpath, Delhi");
        let saved = editor.save().unwrap().clone();
        assert_eq!(saved.name, "Garvita S");
        assert_eq!(saved.address, "22 Janpath, Delhi");
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_invalid_email_blocks_save_without_side_effects() {
        let mut editor = editor();
        editor.set_name("New Name");
        editor.set_email("not-an-email");
        assert_eq!(editor.save(), Err(ValidationError::InvalidEmail));
        assert_eq!(editor.profile().name, "garvita");
        assert_eq!(editor.draft().map(|d| d.name.as_str()), Some("New Name"));
    }

    #[test]
    fn test_invalid_phone_blocks_save() {
        let mut editor = editor();
        editor.set_phone("12345");
        assert_eq!(editor.save(), Err(ValidationError::InvalidPhone));
        assert_eq!(editor.profile().phone, "08123456789");
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = editor();
        editor.set_email("other@mail.com");
        editor.cancel();
        assert!(editor.draft().is_none());
        assert_eq!(editor.profile().email, "garvita@mail.com");
    }
}
