// Registered account record stored in the directory

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 31;
pub const MAX_MAIL_LEN: usize = 31;
pub const MAX_PASSWORD_LEN: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account name must not be empty")]
    EmptyName,

    #[error("Field {field} longer than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
}

// Fixed-width record shape shared with the menu layer:
// name <= 31, mail <= 31, password <= 5, card number as an integer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub mail: String,
    pub password: String,
    pub card_number: u64,
}

impl Account {
    pub fn new(
        name: &str,
        mail: &str,
        password: &str,
        card_number: u64,
    ) -> Result<Self, AccountError> {
        let account = Self {
            name: name.to_string(),
            mail: mail.to_string(),
            password: password.to_string(),
            card_number,
        };
        account.validate()?;
        Ok(account)
    }

    pub fn validate(&self) -> Result<(), AccountError> {
        if self.name.is_empty() {
            return Err(AccountError::EmptyName);
        }

        for (field, value, max) in [
            ("name", &self.name, MAX_NAME_LEN),
            ("mail", &self.mail, MAX_MAIL_LEN),
            ("password", &self.password, MAX_PASSWORD_LEN),
        ] {
            if value.chars().count() > max {
                return Err(AccountError::FieldTooLong { field, max });
            }
        }

        Ok(())
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    // `c***`
    pub fn masked_password(&self) -> String {
        match self.password.chars().next() {
            Some(first) => format!("{first}***"),
            None => "***".to_string(),
        }
    }

    // `************1234`
    pub fn masked_card(&self) -> String {
        format!("************{:04}", self.card_number % 10_000)
    }
}

// Secrets stay masked in logs and debug output.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("mail", &self.mail)
            .field("password", &self.masked_password())
            .field("card_number", &self.masked_card())
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}  Mail: {}  Password: {}  Credit Card: {}",
            self.name,
            self.mail,
            self.masked_password(),
            self.masked_card()
        )
    }
}
