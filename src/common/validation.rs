use rust_decimal::Decimal;
use validator::ValidationError;

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Monta um ValidationErrors com um único campo, para regras fora do derive.
pub fn single_field_error(field: &'static str, err: ValidationError) -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, err);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_and_positive_pass() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::from_str("-0.00").unwrap()).is_ok());
        assert!(validate_not_negative(&Decimal::from_str("12.50").unwrap()).is_ok());
    }

    #[test]
    fn negative_fails_with_message() {
        let err = validate_not_negative(&Decimal::from_str("-1").unwrap()).unwrap_err();
        assert_eq!(err.code, "range");
        assert!(err.message.is_some());
    }
}
