//! Property-based tests for tagcheck.

use proptest::prelude::*;
use tagcheck::*;

#[derive(Inspect)]
pub struct Profile {
    #[validate("min:2;max:12")]
    pub login: String,
    #[validate("in:1,2,3;min:0")]
    pub tier: i64,
    #[validate("len:4")]
    pub pin: String,
}

fn table<'a>(rules: &'a str, value: FieldValue<'a>, exported: bool) -> Vec<FieldDescriptor<'a>> {
    vec![
        FieldDescriptor::new("f", value)
            .with_rules(rules)
            .with_exported(exported),
    ]
}

fn any_value() -> impl Strategy<Value = (String, i64, bool)> {
    (".{0,20}", any::<i64>(), any::<bool>())
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validate_is_idempotent(login in ".{0,20}", tier in -5i64..10, pin in "[0-9]{0,6}") {
        let profile = Profile { login, tier, pin };
        prop_assert_eq!(validate(&profile), validate(&profile));
    }
}

// ============================================================================
// DRIVER INVARIANTS
// ============================================================================

proptest! {
    #[test]
    fn fields_without_rules_never_fail((s, n, use_int) in any_value(), exported in any::<bool>()) {
        let value = if use_int { FieldValue::Int(n) } else { FieldValue::Str(&s) };
        prop_assert!(validate_fields(table("", value, exported)).is_ok());
    }

    #[test]
    fn unexported_rules_give_exactly_one_error(
        rules in "[a-z:;,0-9 ]{1,24}",
        (s, n, use_int) in any_value(),
    ) {
        let value = if use_int { FieldValue::Int(n) } else { FieldValue::Str(&s) };
        let errors = validate_fields(table(&rules, value, false)).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors.contains(&Cause::UnexportedField));
    }

    #[test]
    fn one_error_at_most_per_clause(
        rules in "((len|in|min|max|xx):[0-9a-c,-]{0,4};){1,5}",
        s in ".{0,10}",
    ) {
        let clauses = rules.matches(';').count();
        match validate_fields(table(&rules, FieldValue::Str(&s), true)) {
            Ok(()) => {}
            Err(errors) => prop_assert!(errors.len() <= clauses),
        }
    }
}

// ============================================================================
// RULE SEMANTICS
// ============================================================================

proptest! {
    #[test]
    fn min_max_match_integer_order(n in any::<i64>(), bound in any::<i64>()) {
        let min = format!("min:{}", bound);
        let max = format!("max:{}", bound);
        prop_assert_eq!(validate_fields(table(&min, FieldValue::Int(n), true)).is_ok(), n >= bound);
        prop_assert_eq!(validate_fields(table(&max, FieldValue::Int(n), true)).is_ok(), n <= bound);
    }

    #[test]
    fn len_matches_byte_length(s in ".{0,16}", n in 0usize..40) {
        let rules = format!("len:{}", n);
        let result = validate_fields(table(&rules, FieldValue::Str(&s), true));
        prop_assert_eq!(result.is_ok(), s.len() == n);
    }

    #[test]
    fn in_accepts_listed_integers(
        options in prop::collection::vec(any::<i64>(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let chosen = options[pick.index(options.len())];
        let rules = format!(
            "in:{}",
            options.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
        );
        prop_assert!(validate_fields(table(&rules, FieldValue::Int(chosen), true)).is_ok());
    }
}
