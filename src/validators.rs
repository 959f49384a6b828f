// Rule evaluation
//
// Every check is a pure function of (parameter, value). Lengths are byte
// lengths and numbers are signed 64-bit.

use crate::{Cause, Clause, FieldValue, RuleKind};

const STRING: &str = "string";
const STRING_OR_INT: &str = "string or int";

/// Evaluate one parsed clause against a field value.
pub fn evaluate(clause: &Clause<'_>, value: &FieldValue<'_>) -> Result<(), Cause> {
    match clause {
        Clause::Rule(rule) => match rule.kind {
            RuleKind::Len => check_len(rule.param, value),
            RuleKind::In => check_in(rule.param, value),
            RuleKind::Min => check_min(rule.param, value),
            RuleKind::Max => check_max(rule.param, value),
        },
        Clause::Unknown { .. } => Err(Cause::InvalidSyntax),
    }
}

fn mismatch(rule: RuleKind, expected: &'static str, value: &FieldValue<'_>) -> Cause {
    Cause::TypeMismatch {
        rule,
        expected,
        found: value.shape(),
    }
}

fn parse_int(param: &str) -> Result<i64, Cause> {
    param.parse::<i64>().map_err(|_| Cause::InvalidSyntax)
}

fn byte_len(s: &str) -> i64 {
    i64::try_from(s.len()).unwrap_or(i64::MAX)
}

/// `len:N` - string byte length must equal `N` (N >= 0).
pub fn check_len(param: &str, value: &FieldValue<'_>) -> Result<(), Cause> {
    let FieldValue::Str(s) = value else {
        return Err(mismatch(RuleKind::Len, STRING, value));
    };

    let expected = parse_int(param)?;
    if expected < 0 {
        return Err(Cause::InvalidSyntax);
    }

    if byte_len(s) == expected {
        Ok(())
    } else {
        Err(Cause::LenFailed)
    }
}

/// `in:a,b,c` - value must equal one of the trimmed options.
///
/// For integer values, options that do not parse as integers are skipped.
pub fn check_in(param: &str, value: &FieldValue<'_>) -> Result<(), Cause> {
    if param.is_empty() {
        return Err(Cause::InvalidSyntax);
    }

    let mut options = param.split(',').map(str::trim);

    let found = match value {
        FieldValue::Str(s) => options.any(|option| option == *s),
        FieldValue::Int(n) => options
            .filter_map(|option| option.parse::<i64>().ok())
            .any(|option| option == *n),
        FieldValue::Unsupported(_) => {
            return Err(mismatch(RuleKind::In, STRING_OR_INT, value));
        }
    };

    if found { Ok(()) } else { Err(Cause::InFailed) }
}

/// `min:M` - integer value, or string byte length, must be at least `M`.
pub fn check_min(param: &str, value: &FieldValue<'_>) -> Result<(), Cause> {
    let bound = parse_int(param)?;

    let actual = match value {
        FieldValue::Str(s) => byte_len(s),
        FieldValue::Int(n) => *n,
        FieldValue::Unsupported(_) => {
            return Err(mismatch(RuleKind::Min, STRING_OR_INT, value));
        }
    };

    if actual < bound { Err(Cause::MinFailed) } else { Ok(()) }
}

/// `max:M` - integer value, or string byte length, must be at most `M`.
pub fn check_max(param: &str, value: &FieldValue<'_>) -> Result<(), Cause> {
    let bound = parse_int(param)?;

    let actual = match value {
        FieldValue::Str(s) => byte_len(s),
        FieldValue::Int(n) => *n,
        FieldValue::Unsupported(_) => {
            return Err(mismatch(RuleKind::Max, STRING_OR_INT, value));
        }
    };

    if actual > bound { Err(Cause::MaxFailed) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleDescriptor;

    const FLOAT: FieldValue<'static> = FieldValue::Unsupported("f64");

    #[test]
    fn test_len() {
        assert_eq!(check_len("3", &FieldValue::Str("abc")), Ok(()));
        assert_eq!(check_len("0", &FieldValue::Str("")), Ok(()));
        assert_eq!(check_len("5", &FieldValue::Str("ab")), Err(Cause::LenFailed));
    }

    #[test]
    fn test_len_counts_bytes() {
        assert_eq!(check_len("2", &FieldValue::Str("é")), Ok(()));
    }

    #[test]
    fn test_len_bad_param() {
        assert_eq!(check_len("abc", &FieldValue::Str("ab")), Err(Cause::InvalidSyntax));
        assert_eq!(check_len("-1", &FieldValue::Str("ab")), Err(Cause::InvalidSyntax));
        assert_eq!(check_len("", &FieldValue::Str("ab")), Err(Cause::InvalidSyntax));
    }

    #[test]
    fn test_len_shape_checked_before_param() {
        let err = check_len("abc", &FieldValue::Int(3)).unwrap_err();
        assert_eq!(
            err,
            Cause::TypeMismatch {
                rule: RuleKind::Len,
                expected: "string",
                found: "int"
            }
        );
    }

    #[test]
    fn test_in_strings() {
        assert_eq!(check_in("red,green,blue", &FieldValue::Str("red")), Ok(()));
        assert_eq!(check_in("red, green , blue", &FieldValue::Str("green")), Ok(()));
        assert_eq!(check_in("red,green", &FieldValue::Str("Red")), Err(Cause::InFailed));
    }

    #[test]
    fn test_in_integers() {
        assert_eq!(check_in("1,2,3", &FieldValue::Int(2)), Ok(()));
        assert_eq!(check_in("1,2,3", &FieldValue::Int(7)), Err(Cause::InFailed));
        assert_eq!(check_in(" -4 ,+5", &FieldValue::Int(5)), Ok(()));
    }

    #[test]
    fn test_in_skips_unparseable_options_for_integers() {
        assert_eq!(check_in("x,7,y", &FieldValue::Int(7)), Ok(()));
        assert_eq!(check_in("x,y", &FieldValue::Int(7)), Err(Cause::InFailed));
    }

    #[test]
    fn test_in_empty_param() {
        assert_eq!(check_in("", &FieldValue::Str("a")), Err(Cause::InvalidSyntax));
        assert_eq!(check_in("", &FLOAT), Err(Cause::InvalidSyntax));
    }

    #[test]
    fn test_in_unsupported_shape() {
        let err = check_in("1,2", &FLOAT).unwrap_err();
        assert_eq!(err.to_string(), "in requires string or int, got f64");
    }

    #[test]
    fn test_min() {
        assert_eq!(check_min("18", &FieldValue::Int(18)), Ok(()));
        assert_eq!(check_min("18", &FieldValue::Int(17)), Err(Cause::MinFailed));
        assert_eq!(check_min("-5", &FieldValue::Int(-5)), Ok(()));
        assert_eq!(check_min("5", &FieldValue::Str("hi")), Err(Cause::MinFailed));
        assert_eq!(check_min("-1", &FieldValue::Str("")), Ok(()));
    }

    #[test]
    fn test_max() {
        assert_eq!(check_max("10", &FieldValue::Int(10)), Ok(()));
        assert_eq!(check_max("10", &FieldValue::Int(11)), Err(Cause::MaxFailed));
        assert_eq!(check_max("1", &FieldValue::Str("hi")), Err(Cause::MaxFailed));
        let top = i64::MAX.to_string();
        assert_eq!(check_max(&top, &FieldValue::Int(i64::MAX)), Ok(()));
    }

    #[test]
    fn test_bounds_param_checked_before_shape() {
        assert_eq!(check_min("x", &FLOAT), Err(Cause::InvalidSyntax));
        assert_eq!(check_max("1.5", &FieldValue::Int(1)), Err(Cause::InvalidSyntax));
        assert!(check_max("3", &FLOAT).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_out_of_range_param() {
        let past_max = "9223372036854775808";
        let past_min = "-9223372036854775809";
        assert_eq!(check_min(past_max, &FieldValue::Int(0)), Err(Cause::InvalidSyntax));
        assert_eq!(check_max(past_min, &FieldValue::Int(0)), Err(Cause::InvalidSyntax));
        assert_eq!(check_len(past_max, &FieldValue::Str("")), Err(Cause::InvalidSyntax));
        assert_eq!(check_min(&i64::MIN.to_string(), &FieldValue::Int(i64::MIN)), Ok(()));
    }

    #[test]
    fn test_evaluate_dispatch() {
        let clause = Clause::Rule(RuleDescriptor {
            kind: RuleKind::Len,
            param: "5",
        });
        assert_eq!(evaluate(&clause, &FieldValue::Str("ab")), Err(Cause::LenFailed));

        let unknown = Clause::Unknown {
            kind: "regexp",
            param: ".*",
        };
        assert_eq!(evaluate(&unknown, &FieldValue::Str("ab")), Err(Cause::InvalidSyntax));
    }
}
