use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic wraps at 64 bits. Only division can fail.
pub struct Operation {}

impl Operation {
    pub fn sum(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }

    pub fn subtract(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_sub(rhs)
    }

    pub fn multiply(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_mul(rhs)
    }

    pub fn divide(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(lhs.wrapping_div(rhs))
        }
    }

    pub fn remainder(lhs: i64, rhs: i64) -> Result<i64> {
        if rhs == 0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(lhs.wrapping_rem(rhs))
        }
    }

    pub fn truth(b: bool) -> i64 {
        if b {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_wrapping() {
        assert_eq!(Operation::sum(i64::max_value(), 1), i64::min_value());
        assert_eq!(Operation::subtract(i64::min_value(), 1), i64::max_value());
        assert_eq!(Operation::multiply(i64::max_value(), 2), -2);
        assert_eq!(Operation::divide(i64::min_value(), -1).unwrap(), i64::min_value());
        assert_eq!(Operation::remainder(i64::min_value(), -1).unwrap(), 0);
    }

    #[test]
    fn test_truncating_division() {
        assert_eq!(Operation::divide(-7, 2).unwrap(), -3);
        assert_eq!(Operation::remainder(-7, 2).unwrap(), -1);
    }

    #[test]
    fn test_division_by_zero() {
        let e = Operation::divide(1, 0).unwrap_err();
        assert!(e.is(ErrorCode::DivisionByZero));
        assert_eq!(e.to_string(), "Div by zero");
        assert!(Operation::remainder(1, 0).is_err());
    }
}
