use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before it reaches the store. Rendered as a 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid CPF")]
    InvalidCpf,
    #[error("payment_due_day must be between 1 and 28")]
    PaymentDueDay,
    #[error("end_date must be after start_date")]
    DateRange,
    #[error("{0} must be greater than zero")]
    NonPositiveAmount(&'static str),
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("password must be at least 6 characters")]
    ShortPassword,
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a Brazilian individual tax id (CPF).
///
/// Punctuation is ignored, so `529.982.247-25` and `52998224725` are both
/// accepted. Sequences of a single repeated digit pass the checksum but are
/// not issued, so they are rejected.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Mod-11 check digit over `prefix`, weights counting down to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let weight_start = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Digits-only form a CPF is stored in.
pub fn normalize_cpf(cpf: &str) -> String {
    cpf.chars().filter(char::is_ascii_digit).collect()
}

pub fn ensure_cpf(cpf: &str) -> Result<(), ValidationError> {
    if validate_cpf(cpf) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCpf)
    }
}

pub fn ensure_payment_due_day(day: i32) -> Result<(), ValidationError> {
    if (1..=28).contains(&day) {
        Ok(())
    } else {
        Err(ValidationError::PaymentDueDay)
    }
}

pub fn ensure_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::DateRange)
    }
}

pub fn ensure_positive(field: &'static str, amount: Decimal) -> Result<(), ValidationError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount(field))
    }
}

pub fn ensure_not_negative(field: &'static str, amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        Err(ValidationError::NegativeAmount(field))
    } else {
        Ok(())
    }
}

pub fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(())
    }
}

pub fn ensure_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::ShortPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_valid_cpfs() {
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("111.444.777-35"));
    }

    #[test]
    fn normalizes_punctuation_away() {
        assert_eq!(normalize_cpf("529.982.247-25"), "52998224725");
    }

    #[test]
    fn rejects_wrong_check_digits() {
        assert!(!validate_cpf("52998224724"));
        assert!(!validate_cpf("11144477734"));
    }

    #[test]
    fn rejects_repeated_digits() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!validate_cpf(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("5299822472"));
        assert!(!validate_cpf("529982247255"));
        assert!(!validate_cpf("abc"));
    }

    #[test]
    fn due_day_bounds() {
        assert!(ensure_payment_due_day(1).is_ok());
        assert!(ensure_payment_due_day(28).is_ok());
        assert_eq!(ensure_payment_due_day(0), Err(ValidationError::PaymentDueDay));
        assert_eq!(ensure_payment_due_day(29), Err(ValidationError::PaymentDueDay));
    }

    #[test]
    fn date_range_must_move_forward() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(ensure_date_range(start, end).is_ok());
        assert_eq!(ensure_date_range(end, start), Err(ValidationError::DateRange));
        assert_eq!(ensure_date_range(start, start), Err(ValidationError::DateRange));
    }

    #[test]
    fn amounts() {
        assert!(ensure_positive("amount", dec!(0.01)).is_ok());
        assert!(ensure_positive("amount", Decimal::ZERO).is_err());
        assert!(ensure_not_negative("rent_amount", Decimal::ZERO).is_ok());
        assert!(ensure_not_negative("rent_amount", dec!(-1)).is_err());
    }

    #[test]
    fn password_length() {
        assert!(ensure_password("secret").is_ok());
        assert_eq!(ensure_password("short"), Err(ValidationError::ShortPassword));
    }
}
