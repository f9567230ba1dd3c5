/// The signed-in user's editable profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// What the identity provider knows about the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityUser {
    pub full_name: Option<String>,
    pub primary_email: Option<String>,
    pub phone_numbers: Vec<String>,
}

impl UserProfile {
    /// Builds a profile from identity data.
    ///
    /// # Notes
    /// The display name falls back to the local part of the email address when the
    /// provider has no full name. The address is never provided upstream.
    pub fn from_identity(user: &IdentityUser) -> Self {
        let email = user.primary_email.clone().unwrap_or_default();
        let name = user
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| email.split('@').next().map(str::to_string))
            .unwrap_or_default();
        Self {
            name,
            phone: user.phone_numbers.first().cloned().unwrap_or_default(),
            email,
            address: String::new(),
        }
    }
}
