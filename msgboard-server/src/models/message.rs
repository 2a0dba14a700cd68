//! Message field validation

use super::ValidationError;

/// Maximum length for a message body, in characters
const MAX_BODY_CHARS: usize = 65536;

/// Shared rules for required text fields: something other than whitespace,
/// and no NUL characters (PostgreSQL TEXT can't store them).
fn check_required(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.contains('\0') {
        return Err(ValidationError::NulCharacter { field });
    }

    Ok(())
}

/// Validated message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a new message body.
    ///
    /// # Rules
    /// - Must contain at least one non-whitespace character
    /// - No NUL characters
    /// - Max 65536 characters
    ///
    /// # Example
    /// ```
    /// use msgboard_server::models::MessageBody;
    ///
    /// assert!(MessageBody::new("Hello").is_ok());
    /// assert!(MessageBody::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_required("body", s)?;

        if s.chars().count() > MAX_BODY_CHARS {
            return Err(ValidationError::TooLong {
                field: "body",
                max: MAX_BODY_CHARS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the body as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated username. Any non-blank text is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_required("username", s)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A message that has passed validation and is ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub body: MessageBody,
    pub username: Username,
}

impl NewMessage {
    /// Validate raw strings into a new message.
    pub fn parse(body: &str, username: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            body: MessageBody::new(body)?,
            username: Username::new(username)?,
        })
    }

    /// The demonstration message inserted into an empty board.
    pub fn demo() -> Self {
        Self {
            body: MessageBody("Hello".to_owned()),
            username: Username("Liza".to_owned()),
        }
    }
}
