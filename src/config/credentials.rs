use crate::config::settings::read_env;
use crate::errors::SmartPingError;

const APP_CODE_VAR: &str = "SMARTPING_APP_CODE";
const PASSWORD_VAR: &str = "SMARTPING_PASSWORD";
const EMAIL_VAR: &str = "SMARTPING_EMAIL";

/// Account credentials issued by the federation
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub app_code: String,
    pub password: String,
    pub email: String,
}

impl Credentials {
    /// Build credentials, rejecting blank values
    pub fn new(
        app_code: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, SmartPingError> {
        let credentials = Self {
            app_code: app_code.into(),
            password: password.into(),
            email: email.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Read credentials from `SMARTPING_APP_CODE`, `SMARTPING_PASSWORD` and `SMARTPING_EMAIL`
    pub fn from_env() -> Result<Self, SmartPingError> {
        let app_code = read_env(APP_CODE_VAR);
        let password = read_env(PASSWORD_VAR);
        let email = read_env(EMAIL_VAR);

        match (app_code, password, email) {
            (Some(app_code), Some(password), Some(email)) => Self::new(app_code, password, email),
            _ => Err(Self::missing()),
        }
    }

    fn validate(&self) -> Result<(), SmartPingError> {
        let blank = [&self.app_code, &self.password, &self.email]
            .iter()
            .any(|value| value.trim().is_empty());
        if blank {
            return Err(Self::missing());
        }
        Ok(())
    }

    fn missing() -> SmartPingError {
        SmartPingError::Configuration("Missing SmartPing API credentials".to_string())
    }
}

// Password stays out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_code", &self.app_code)
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}
