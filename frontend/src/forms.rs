//! Client-side checks run before anything is sent.

use thiserror::Error;

use crate::models::{AccountSummary, Credentials, NewTransaction, NewUser, TransactionType};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the {0} field")]
    Missing(&'static str),

    #[error("Select an account first")]
    NoAccount,

    #[error("Enter the recipient account")]
    NoRecipient,

    #[error("Enter a valid amount")]
    InvalidAmount,

    #[error("The amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Enter the birth date as YYYY-MM-DD")]
    InvalidBirthdate,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(value)
    }
}

/// Parse a user-typed amount; a comma is accepted as the decimal separator.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim().replace(',', ".");
    if raw.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    let amount: f64 = raw.parse().map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount);
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// The fields of the transfer, payment and deposit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub recipient: String,
    pub comment: String,
}

impl TransactionForm {
    /// Build the request for `kind` against the selected account.
    ///
    /// Transfers and payments debit the selected account, deposits credit it.
    /// Only transfers name a recipient.
    pub fn validate(
        &self,
        kind: TransactionType,
        account: Option<&AccountSummary>,
    ) -> Result<NewTransaction, ValidationError> {
        let account = account.ok_or(ValidationError::NoAccount)?;

        let recipient = if kind == TransactionType::Transfer {
            let recipient = self.recipient.trim();
            if recipient.is_empty() {
                return Err(ValidationError::NoRecipient);
            }
            Some(recipient.to_string())
        } else {
            None
        };

        let amount = parse_amount(&self.amount)?;
        let comment = Some(self.comment.trim())
            .filter(|comment| !comment.is_empty())
            .map(str::to_string);

        let (sender_id, receiver_id) = match kind {
            TransactionType::Deposit => (None, Some(account.account_id.clone())),
            TransactionType::Transfer => (Some(account.account_id.clone()), recipient),
            TransactionType::Payment => (Some(account.account_id.clone()), None),
        };

        Ok(NewTransaction {
            transaction_type: kind,
            amount,
            currency: account.currency,
            sender_id,
            receiver_id,
            comment,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = required(&self.email, "email")?;
        if self.password.is_empty() {
            return Err(ValidationError::Missing("password"));
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// As typed in a date input, `YYYY-MM-DD`.
    pub birthdate: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        let first_name = required(&self.first_name, "first name")?;
        let last_name = required(&self.last_name, "last name")?;
        let email = required(&self.email, "email")?;
        let birthdate = birthdate_to_iso(required(&self.birthdate, "birth date")?)?;

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            birthdate,
            password: self.password.clone(),
        })
    }
}

/// `1990-04-12` becomes `1990-04-12T00:00:00.000Z`.
fn birthdate_to_iso(date: &str) -> Result<String, ValidationError> {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ValidationError::InvalidBirthdate);
    };

    let number = |part: &str, len: usize| -> Option<u32> {
        (part.len() == len && part.bytes().all(|b| b.is_ascii_digit()))
            .then(|| part.parse().ok())
            .flatten()
    };

    match (number(*year, 4), number(*month, 2), number(*day, 2)) {
        (Some(year), Some(month @ 1..=12), Some(day))
            if (1..=days_in_month(year, month)).contains(&day) =>
        {
            Ok(format!("{date}T00:00:00.000Z"))
        }
        _ => Err(ValidationError::InvalidBirthdate),
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::models::{AccountType, Currency};

    fn account() -> AccountSummary {
        AccountSummary {
            account_id: "a-1".to_string(),
            balance: 100.0,
            currency: Currency::Usd,
            account_type: AccountType::Debit,
        }
    }

    fn form(amount: &str, recipient: &str) -> TransactionForm {
        TransactionForm {
            amount: amount.to_string(),
            recipient: recipient.to_string(),
            comment: String::new(),
        }
    }

    #[test_case("0" => Err(ValidationError::NonPositiveAmount))]
    #[test_case("-5" => Err(ValidationError::NonPositiveAmount))]
    #[test_case("" => Err(ValidationError::InvalidAmount))]
    #[test_case("abc" => Err(ValidationError::InvalidAmount))]
    #[test_case("inf" => Err(ValidationError::InvalidAmount))]
    #[test_case("12,50" => Ok(12.5))]
    #[test_case(" 7 " => Ok(7.0))]
    fn amounts(raw: &str) -> Result<f64, ValidationError> {
        parse_amount(raw)
    }

    #[test_case(TransactionType::Transfer, "0", "a-2" => Some(ValidationError::NonPositiveAmount))]
    #[test_case(TransactionType::Transfer, "10", "  " => Some(ValidationError::NoRecipient))]
    #[test_case(TransactionType::Payment, "-1", "" => Some(ValidationError::NonPositiveAmount))]
    #[test_case(TransactionType::Deposit, "", "" => Some(ValidationError::InvalidAmount))]
    #[test_case(TransactionType::Payment, "10", "" => None)]
    #[test_case(TransactionType::Deposit, "10", "" => None)]
    fn transaction_rejections(
        kind: TransactionType,
        amount: &str,
        recipient: &str,
    ) -> Option<ValidationError> {
        form(amount, recipient).validate(kind, Some(&account())).err()
    }

    #[test]
    fn no_account_selected() {
        assert_eq!(
            form("10", "a-2").validate(TransactionType::Transfer, None),
            Err(ValidationError::NoAccount)
        );
    }

    #[test]
    fn transfer_debits_selected_account() {
        let mut transfer = form("250.75", " a-2 ");
        transfer.comment = " rent ".to_string();

        let request = transfer
            .validate(TransactionType::Transfer, Some(&account()))
            .unwrap();
        assert_eq!(request.sender_id.as_deref(), Some("a-1"));
        assert_eq!(request.receiver_id.as_deref(), Some("a-2"));
        assert_eq!(request.comment.as_deref(), Some("rent"));
        assert_eq!(request.currency, Currency::Usd);
        assert!((request.amount - 250.75).abs() < f64::EPSILON);
    }

    #[test]
    fn deposit_credits_selected_account() {
        let request = form("5", "ignored")
            .validate(TransactionType::Deposit, Some(&account()))
            .unwrap();
        assert_eq!(request.sender_id, None);
        assert_eq!(request.receiver_id.as_deref(), Some("a-1"));
        assert_eq!(request.comment, None);
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            email: "ivan@example.com".to_string(),
            birthdate: "1990-04-12".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn registration_sends_iso_birthdate() {
        let user = register_form().validate().unwrap();
        assert_eq!(user.birthdate, "1990-04-12T00:00:00.000Z");
        assert_eq!(user.credentials().email, "ivan@example.com");
    }

    #[test]
    fn registration_rejections() {
        let mut mismatch = register_form();
        mismatch.confirm_password = "secret2".to_string();
        assert_eq!(mismatch.validate(), Err(ValidationError::PasswordMismatch));

        let mut short = register_form();
        short.password = "12345".to_string();
        short.confirm_password = "12345".to_string();
        assert_eq!(short.validate(), Err(ValidationError::PasswordTooShort));

        let mut nameless = register_form();
        nameless.last_name = " ".to_string();
        assert_eq!(nameless.validate(), Err(ValidationError::Missing("last name")));
    }

    #[test_case("1990-13-01" => false)]
    #[test_case("90-01-01" => false)]
    #[test_case("1990/01/01" => false)]
    #[test_case("2001-02-28" => true)]
    #[test_case("1990-02-31" => false)]
    #[test_case("1990-04-31" => false)]
    #[test_case("2001-02-29" => false)]
    #[test_case("2000-02-29" => true)]
    #[test_case("1900-02-29" => false)]
    #[test_case("1990-12-31" => true)]
    #[test_case("1990-01-00" => false)]
    fn birthdates(date: &str) -> bool {
        birthdate_to_iso(date).is_ok()
    }

    #[test]
    fn login_needs_both_fields() {
        let form = LoginForm {
            email: "  ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Missing("email")));

        let form = LoginForm {
            email: "demo@bank.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Missing("password")));
    }
}
