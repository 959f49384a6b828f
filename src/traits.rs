// Introspection and validation traits

use crate::{Error, Shape};

/// Record introspection: describe a value's fields and their rules.
///
/// Usually derived with `#[derive(Inspect)]`; implement by hand to register
/// fields from a table:
///
/// ```
/// use tagcheck::{FieldDescriptor, FieldValue, Inspect, Shape};
///
/// struct Login {
///     user: String,
///     attempts: u8,
/// }
///
/// impl Inspect for Login {
///     fn inspect(&self) -> Shape<'_> {
///         Shape::Struct(vec![
///             FieldDescriptor::new("user", &self.user).with_rules("min:3"),
///             FieldDescriptor::new("attempts", FieldValue::from_any(&self.attempts))
///                 .with_rules("max:5"),
///         ])
///     }
/// }
/// ```
///
/// `Option` and iterators have an inherent or `Iterator::inspect` method that
/// wins method resolution; call `Inspect::inspect(&value)` on those.
pub trait Inspect {
    fn inspect(&self) -> Shape<'_>;
}

/// Validate a value against the rules its fields carry.
///
/// Implemented for every [`Inspect`] type.
pub trait Validate {
    fn validate(&self) -> Result<(), Error>;
}

impl<T: Inspect + ?Sized> Validate for T {
    fn validate(&self) -> Result<(), Error> {
        crate::validate(self)
    }
}

macro_rules! scalar_shape {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Shape<'_> {
                    Shape::Other(std::any::type_name::<$ty>())
                }
            }
        )+
    };
}

scalar_shape!(
    bool, char, str, String, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, ()
);

impl<T> Inspect for Vec<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(std::any::type_name::<Self>())
    }
}

impl<T> Inspect for [T] {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(std::any::type_name::<Self>())
    }
}

impl<T> Inspect for Option<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(std::any::type_name::<Self>())
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDescriptor;

    struct Pair {
        left: i64,
    }

    impl Inspect for Pair {
        fn inspect(&self) -> Shape<'_> {
            Shape::Struct(vec![FieldDescriptor::new("left", self.left).with_rules("min:0")])
        }
    }

    #[test]
    fn test_scalars_are_not_structs() {
        assert_eq!(42i32.inspect(), Shape::Other("i32"));
        assert_eq!("text".inspect(), Shape::Other("str"));
        assert!(matches!(vec![1u8].inspect(), Shape::Other(_)));
        assert!(matches!(Inspect::inspect(&Some(1)), Shape::Other(_)));
    }

    #[test]
    fn test_references_forward() {
        let pair = Pair { left: 1 };
        let by_ref = &pair;
        assert!(matches!(by_ref.inspect(), Shape::Struct(fields) if fields.len() == 1));

        let boxed: Box<Pair> = Box::new(Pair { left: 2 });
        assert!(matches!(boxed.inspect(), Shape::Struct(_)));
    }

    #[test]
    fn test_validate_method() {
        assert!(Pair { left: 3 }.validate().is_ok());
        assert!(Pair { left: -3 }.validate().is_err());
        assert_eq!(7u8.validate(), Err(Error::NotStruct));
    }
}
