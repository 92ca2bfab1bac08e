//! Display helpers. Nothing in here feeds back into a request.

use crate::models::{AccountSummary, Currency};

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `-1234.5 USD` becomes `-$1,234.50`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_money(amount: f64, currency: Currency) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        currency.symbol(),
        format_with_commas(cents / 100),
        cents % 100
    )
}

/// Only the last four characters of an account id are shown.
pub fn mask_account_id(account_id: &str) -> String {
    let chars: Vec<char> = account_id.chars().collect();
    if chars.len() < 8 {
        return account_id.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail.to_uppercase())
}

/// `2024-05-01T12:34:56.789Z` becomes `2024-05-01 12:34`.
///
/// Anything that does not look like an ISO timestamp is shown as is.
pub fn short_date(timestamp: &str) -> String {
    match (timestamp.get(..10), timestamp.get(11..16)) {
        (Some(date), Some(time)) if timestamp.as_bytes().get(10) == Some(&b'T') => {
            format!("{date} {time}")
        }
        _ => timestamp.to_string(),
    }
}

/// Fixed rates used for the dashboard headline only.
fn indicative_rub_rate(currency: Currency) -> f64 {
    match currency {
        Currency::Rub => 1.0,
        Currency::Usd => 90.0,
        Currency::Eur => 100.0,
        Currency::Cny => 13.0,
    }
}

/// A rough total of every account in rubles, for display.
pub fn indicative_total_rub(accounts: &[AccountSummary]) -> f64 {
    accounts
        .iter()
        .map(|account| account.balance * indicative_rub_rate(account.currency))
        .sum()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::models::AccountType;

    #[test_case(0.0, Currency::Rub => "₽0.00")]
    #[test_case(1234.5, Currency::Usd => "$1,234.50")]
    #[test_case(-1_000_000.0, Currency::Eur => "-€1,000,000.00")]
    #[test_case(0.005, Currency::Cny => "¥0.01")]
    fn money(amount: f64, currency: Currency) -> String {
        format_money(amount, currency)
    }

    #[test_case("3f2c9a1e-0000-4b7d-9c1a-77aa12bcde9f" => "****DE9F")]
    #[test_case("short" => "short")]
    fn masking(id: &str) -> String {
        mask_account_id(id)
    }

    #[test_case("2024-05-01T12:34:56.789Z" => "2024-05-01 12:34")]
    #[test_case("yesterday" => "yesterday")]
    #[test_case("2024-05-01" => "2024-05-01")]
    fn dates(raw: &str) -> String {
        short_date(raw)
    }

    #[test]
    fn indicative_total() {
        let account = |balance, currency| AccountSummary {
            account_id: String::new(),
            balance,
            currency,
            account_type: AccountType::Debit,
        };
        let total = indicative_total_rub(&[
            account(100.0, Currency::Rub),
            account(2.0, Currency::Usd),
            account(1.0, Currency::Eur),
        ]);
        assert!((total - 380.0).abs() < f64::EPSILON);
    }
}
