// Field values and descriptors produced by record introspection

use std::any::Any;
use std::borrow::Cow;

/// Runtime value of a field, reduced to the shapes rules understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    /// Anything else; carries the Rust type name for error messages
    Unsupported(&'static str),
}

macro_rules! downcast_int {
    ($any:expr, $($ty:ty),+) => {
        $(
            if let Some(n) = $any.downcast_ref::<$ty>() {
                return match i64::try_from(*n) {
                    Ok(n) => FieldValue::Int(n),
                    Err(_) => FieldValue::Unsupported(std::any::type_name::<$ty>()),
                };
            }
        )+
    };
}

impl<'a> FieldValue<'a> {
    /// Classify any `'static` value by its concrete type.
    ///
    /// Strings (`String`, `&'static str`, `Box<str>`, `Cow<'static, str>`)
    /// become [`FieldValue::Str`]; primitive integers that fit in `i64` become
    /// [`FieldValue::Int`]; everything else is [`FieldValue::Unsupported`].
    #[allow(clippy::unnecessary_fallible_conversions)]
    pub fn from_any<T: Any>(value: &'a T) -> Self {
        let any = value as &'a dyn Any;

        if let Some(s) = any.downcast_ref::<String>() {
            return FieldValue::Str(s.as_str());
        }
        if let Some(s) = any.downcast_ref::<&'static str>() {
            return FieldValue::Str(s);
        }
        if let Some(s) = any.downcast_ref::<Box<str>>() {
            return FieldValue::Str(s);
        }
        if let Some(s) = any.downcast_ref::<Cow<'static, str>>() {
            return FieldValue::Str(s.as_ref());
        }

        downcast_int!(any, i64, i32, i16, i8, isize, u64, u32, u16, u8, usize, i128, u128);

        FieldValue::Unsupported(std::any::type_name::<T>())
    }

    /// Name of the shape, as shown in type-mismatch messages.
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Unsupported(name) => *name,
        }
    }
}

/// Types that classify themselves without `Any`, so borrowed strings of any
/// lifetime work as ruled fields.
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self.as_str())
    }
}

impl AsFieldValue for Box<str> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for Cow<'_, str> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self.as_ref())
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

macro_rules! int_field_value {
    ($($ty:ty),+) => {
        $(
            impl AsFieldValue for $ty {
                #[allow(clippy::unnecessary_fallible_conversions)]
                fn as_field_value(&self) -> FieldValue<'_> {
                    match i64::try_from(*self) {
                        Ok(n) => FieldValue::Int(n),
                        Err(_) => FieldValue::Unsupported(std::any::type_name::<$ty>()),
                    }
                }
            }
        )+
    };
}

int_field_value!(i64, i32, i16, i8, isize, u64, u32, u16, u8, usize, i128, u128);

/// Classification used by `#[derive(Inspect)]`.
///
/// `(&FieldRef(&value)).classify()` picks [`AsFieldValue`] when the field type
/// implements it and falls back to [`FieldValue::from_any`] otherwise.
#[doc(hidden)]
pub mod __private {
    use super::{AsFieldValue, FieldValue};
    use std::any::Any;

    pub struct FieldRef<'a, T: ?Sized>(pub &'a T);

    pub trait ClassifyTyped<'a> {
        fn classify(&self) -> FieldValue<'a>;
    }

    impl<'a, T: AsFieldValue + ?Sized> ClassifyTyped<'a> for FieldRef<'a, T> {
        fn classify(&self) -> FieldValue<'a> {
            self.0.as_field_value()
        }
    }

    pub trait ClassifyAny<'a> {
        fn classify(&self) -> FieldValue<'a>;
    }

    impl<'a, T: Any> ClassifyAny<'a> for &FieldRef<'a, T> {
        fn classify(&self) -> FieldValue<'a> {
            FieldValue::from_any(self.0)
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value.as_str())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

/// One field of a record: name, visibility, raw rules and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub exported: bool,
    pub rules: &'a str,
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// An exported field with no rules.
    pub fn new(name: &'a str, value: impl Into<FieldValue<'a>>) -> Self {
        Self {
            name,
            exported: true,
            rules: "",
            value: value.into(),
        }
    }

    /// Set the raw rule string, e.g. `"min:1;max:10"`.
    pub fn with_rules(mut self, rules: &'a str) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// What introspection found: a struct's fields, or some other kind of value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    Struct(Vec<FieldDescriptor<'a>>),
    Other(&'static str),
}
