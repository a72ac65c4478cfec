//! Request authentication
//!
//! NetBox accepts either HTTP Basic credentials or an API token sent as
//! `Authorization: Token <token>`. A client carries exactly one
//! [`Authentication`] mode for its whole lifetime.

use crate::error::NetBoxError;
use reqwest::RequestBuilder;
use std::fmt;

/// NetBox API token
///
/// Two tokens are equal iff their token strings are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenAuth {
    token: String,
}

impl TokenAuth {
    /// Wrap a NetBox API token
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Value of the `Authorization` header for this token
    pub fn header_value(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuth").field("token", &"<redacted>").finish()
    }
}

/// Authentication attached to every request issued by a client
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Authentication {
    /// Requests are sent unauthenticated
    #[default]
    None,
    /// HTTP Basic authentication
    Basic {
        /// NetBox username
        login: String,
        /// NetBox password
        password: String,
    },
    /// NetBox token authentication
    Token(TokenAuth),
}

impl Authentication {
    /// HTTP Basic credentials
    pub fn basic(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(TokenAuth::new(token))
    }

    /// Resolve loosely specified credentials into a single mode.
    ///
    /// Login and password must be given together, and never alongside a token.
    /// Nothing at all yields [`Authentication::None`].
    pub fn from_parts(
        login: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self, NetBoxError> {
        match (login, password, token) {
            (None, None, None) => Ok(Self::None),
            (None, None, Some(token)) => Ok(Self::token(token)),
            (Some(login), Some(password), None) => Ok(Self::basic(login, password)),
            (Some(_), None, _) => Err(NetBoxError::InvalidConfig(
                "login given without a password".to_string(),
            )),
            (None, Some(_), _) => Err(NetBoxError::InvalidConfig(
                "password given without a login".to_string(),
            )),
            (Some(_), Some(_), Some(_)) => Err(NetBoxError::InvalidConfig(
                "login/password and token are mutually exclusive".to_string(),
            )),
        }
    }

    /// Attach these credentials to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => request,
            Self::Basic { login, password } => request.basic_auth(login, Some(password)),
            Self::Token(token) => request.header(reqwest::header::AUTHORIZATION, token.header_value()),
        }
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_auth_eq() {
        assert_eq!(TokenAuth::new("test"), TokenAuth::new("test"));
    }

    #[test]
    fn test_token_auth_not_eq() {
        assert_ne!(TokenAuth::new("test"), TokenAuth::new("test1"));
    }

    #[test]
    fn test_token_header_value() {
        assert_eq!(TokenAuth::new("abc123").header_value(), "Token abc123");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = format!("{:?}", Authentication::token("s3cret"));
        assert!(!token.contains("s3cret"));

        let basic = format!("{:?}", Authentication::basic("admin", "hunter2"));
        assert!(basic.contains("admin"));
        assert!(!basic.contains("hunter2"));
    }

    #[test]
    fn test_from_parts_modes() {
        assert_eq!(Authentication::from_parts(None, None, None).unwrap(), Authentication::None);
        assert_eq!(
            Authentication::from_parts(None, None, Some("t".to_string())).unwrap(),
            Authentication::token("t")
        );
        assert_eq!(
            Authentication::from_parts(Some("l".to_string()), Some("p".to_string()), None).unwrap(),
            Authentication::basic("l", "p")
        );
    }

    #[test]
    fn test_from_parts_rejects_mixed_credentials() {
        let err = Authentication::from_parts(
            Some("l".to_string()),
            Some("p".to_string()),
            Some("t".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, NetBoxError::InvalidConfig(_)));

        assert!(matches!(
            Authentication::from_parts(Some("l".to_string()), None, None),
            Err(NetBoxError::InvalidConfig(_))
        ));
        assert!(matches!(
            Authentication::from_parts(None, Some("p".to_string()), None),
            Err(NetBoxError::InvalidConfig(_))
        ));
    }
}
