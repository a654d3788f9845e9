use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::DEPOT_COUNT;

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("blank", "must not be blank"));
    }
    Ok(())
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(rejected("negative", "must be zero or greater"));
    }
    Ok(())
}

pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(rejected("not_positive", "must be greater than zero"));
    }
    Ok(())
}

pub fn all_names_present(names: &[String; DEPOT_COUNT]) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(rejected("blank", "all three depot names must be filled in"));
    }
    Ok(())
}
