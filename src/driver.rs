// Validation driver: walks a record's fields, parses and evaluates their rules

use crate::{
    Cause, Error, FieldDescriptor, Inspect, Shape, ValidationError, ValidationErrors, evaluate,
    parse_rules,
};
use tagcheck_log::{debug, trace};

/// Validate every field of `record` and collect all violations.
///
/// Returns [`Error::NotStruct`] when `record` does not introspect as a
/// struct, [`Error::Invalid`] with every violation found, or `Ok(())`.
///
/// ```
/// use tagcheck::{Cause, FieldDescriptor, Inspect, Shape, validate};
///
/// struct Color<'a>(&'a str);
///
/// impl Inspect for Color<'_> {
///     fn inspect(&self) -> Shape<'_> {
///         Shape::Struct(vec![
///             FieldDescriptor::new("0", self.0).with_rules("in:red,green,blue"),
///         ])
///     }
/// }
///
/// assert!(validate(&Color("red")).is_ok());
///
/// let err = validate(&Color("pink")).unwrap_err();
/// assert!(err.contains(&Cause::InFailed));
/// assert_eq!(err.to_string(), "0: in validation failed");
/// ```
pub fn validate<T: Inspect + ?Sized>(record: &T) -> Result<(), Error> {
    let type_name = std::any::type_name::<T>();

    let fields = match record.inspect() {
        Shape::Struct(fields) => fields,
        Shape::Other(kind) => {
            debug!(target: "tagcheck::driver", "{} is not a struct ({})", type_name, kind);
            return Err(Error::NotStruct);
        }
    };

    debug!(target: "tagcheck::driver", "validating {} ({} fields)", type_name, fields.len());

    validate_fields(fields).map_err(Error::from)
}

/// Validate a table of field descriptors, in order.
///
/// Fields without rules are skipped. Evaluation never stops early: every
/// failing clause of every field is reported.
pub fn validate_fields<'a, I>(fields: I) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = FieldDescriptor<'a>>,
{
    let mut errors = ValidationErrors::default();

    for field in fields {
        check_field(&field, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(target: "tagcheck::driver", "{} violation(s)", errors.len());
        Err(errors)
    }
}

fn check_field(field: &FieldDescriptor<'_>, errors: &mut ValidationErrors) {
    if !field.has_rules() {
        return;
    }

    if !field.exported {
        trace!(target: "tagcheck::driver", "{}: rules on unexported field", field.name);
        errors.add(ValidationError::new(field.name, Cause::UnexportedField));
        return;
    }

    let clauses = match parse_rules(field.name, field.rules) {
        Ok(clauses) => clauses,
        Err(error) => {
            trace!(
                target: "tagcheck::driver",
                "{}: unparseable rules {:?}",
                field.name,
                field.rules
            );
            errors.add(error);
            return;
        }
    };

    for clause in &clauses {
        match evaluate(clause, &field.value) {
            Ok(()) => trace!(target: "tagcheck::driver", "{}: {} ok", field.name, clause),
            Err(cause) => {
                trace!(target: "tagcheck::driver", "{}: {} failed: {}", field.name, clause, cause);
                errors.add(ValidationError::new(field.name, cause));
            }
        }
    }
}
