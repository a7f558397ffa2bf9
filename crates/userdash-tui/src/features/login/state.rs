use userdash_core::api::Credentials;

pub const USERNAME_REQUIRED: &str = "Please input your username!";
pub const PASSWORD_REQUIRED: &str = "Please input your password!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub username_error: Option<&'static str>,
    pub password_error: Option<&'static str>,
    /// Informational line above the form (e.g. why a stored session was dropped).
    pub notice: Option<String>,
}

impl LoginState {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Clears the required-field message once the focused field has content.
    pub fn revalidate_focused(&mut self) {
        match self.focus {
            LoginField::Username if !self.username.is_empty() => self.username_error = None,
            LoginField::Password if !self.password.is_empty() => self.password_error = None,
            _ => {}
        }
    }

    /// Checks required fields. Returns the credentials when both are present.
    pub fn validate(&mut self) -> Option<Credentials> {
        self.username_error = self.username.is_empty().then_some(USERNAME_REQUIRED);
        self.password_error = self.password.is_empty().then_some(PASSWORD_REQUIRED);

        if let Some(field) = [
            (LoginField::Username, self.username_error),
            (LoginField::Password, self.password_error),
        ]
        .into_iter()
        .find_map(|(field, error)| error.map(|_| field))
        {
            self.focus = field;
            return None;
        }

        Some(Credentials::new(self.username.clone(), self.password.clone()))
    }

    /// Forgets the password once it is no longer needed.
    pub fn clear_secret(&mut self) {
        self.password.clear();
        self.password_error = None;
    }

    /// Resets the form after logout, keeping the username for convenience.
    pub fn on_logout(&mut self) {
        self.clear_secret();
        self.username_error = None;
        self.notice = None;
        self.focus = if self.username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
    }
}
