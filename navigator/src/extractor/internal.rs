//! Serde plumbing behind `extractor::extract`. `ValuesDeserializer` presents the whole
//! `Values` mapping as a map, and `ValueDeserializer` presents a single `Value`.

use std::fmt::Display;

use serde::de::value::MapDeserializer;
use serde::de::{self, Deserializer, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use thiserror::Error;

use crate::router::values::{Value, Values};

/// Describes the error cases which can result from deserializing `Values` into a type provided
/// by the application.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// The target type is not one which can be deserialized from `Values`. A structured type
    /// (usually a custom struct, or a map) is required, since the values are key / value pairs.
    #[error("values cannot be extracted into {0}; a struct or map is required")]
    UnexpectedTargetType(&'static str),

    /// A string value could not be parsed into the type of the field. For example, with a
    /// `page: u32` field, a query of `?page=two` results in a parse error.
    #[error("{0}")]
    ParseError(String),

    /// A `Deserialize` impl provided a custom error message, e.g. a required field is missing.
    #[error("{0}")]
    Custom(String),
}

impl de::Error for ExtractorError {
    fn custom<T>(t: T) -> ExtractorError
    where
        T: Display,
    {
        ExtractorError::Custom(t.to_string())
    }
}

/// Implements one `Deserializer` function (`$trait_fn`) to return
/// `ExtractorError::UnexpectedTargetType`. For `Deserializer` functions with different
/// signatures, the types that follow `self` can be provided as a trailing parameter list.
macro_rules! reject_target_type {
    ($trait_fn:ident, $name:expr) => {
        reject_target_type!($trait_fn, $name, (_visitor: V));
    };

    {$trait_fn:ident, $name:expr, ($($arg_i:ident : $arg_t:ty),+)} => {
        fn $trait_fn<V>(self, $($arg_i: $arg_t),+) -> Result<V::Value, Self::Error>
        where V: Visitor<'de>
        {
            Err(ExtractorError::UnexpectedTargetType($name))
        }
    };
}

/// Deserializes the full `Values` mapping, as a map.
pub(crate) struct ValuesDeserializer<'a> {
    values: &'a Values,
}

impl<'a> ValuesDeserializer<'a> {
    pub(crate) fn new(values: &'a Values) -> Self {
        ValuesDeserializer { values }
    }
}

impl<'de, 'a> Deserializer<'de> for ValuesDeserializer<'a> {
    type Error = ExtractorError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let mut map = MapDeserializer::<_, ExtractorError>::new(
            self.values
                .iter()
                .map(|(k, v)| (k.as_str(), ValueDeserializer { value: v })),
        );
        let out = visitor.visit_map(&mut map)?;
        map.end()?;
        Ok(out)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    reject_target_type!(deserialize_bool, "bool");
    reject_target_type!(deserialize_i8, "i8");
    reject_target_type!(deserialize_i16, "i16");
    reject_target_type!(deserialize_i32, "i32");
    reject_target_type!(deserialize_i64, "i64");
    reject_target_type!(deserialize_u8, "u8");
    reject_target_type!(deserialize_u16, "u16");
    reject_target_type!(deserialize_u32, "u32");
    reject_target_type!(deserialize_u64, "u64");
    reject_target_type!(deserialize_f32, "f32");
    reject_target_type!(deserialize_f64, "f64");
    reject_target_type!(deserialize_char, "char");
    reject_target_type!(deserialize_str, "str");
    reject_target_type!(deserialize_string, "String");
    reject_target_type!(deserialize_bytes, "bytes");
    reject_target_type!(deserialize_byte_buf, "bytes");
    reject_target_type!(deserialize_seq, "sequence");
    reject_target_type!(deserialize_identifier, "identifier");
    reject_target_type!(deserialize_tuple, "tuple", (_len: usize, _visitor: V));
    reject_target_type!(
        deserialize_tuple_struct,
        "tuple struct",
        (_name: &'static str, _len: usize, _visitor: V)
    );
    reject_target_type!(
        deserialize_enum,
        "enum",
        (
            _name: &'static str,
            _variants: &'static [&'static str],
            _visitor: V
        )
    );
}

/// Implements one `Deserializer` function (`$trait_fn`) that accepts an `Int` as is and parses a
/// `Str` into `$ty` before visiting it with `$visitor_fn`.
macro_rules! parse_value_type {
    ($trait_fn:ident, $visitor_fn:ident, $ty:ty) => {
        fn $trait_fn<V>(self, visitor: V) -> Result<V::Value, Self::Error>
        where
            V: Visitor<'de>,
        {
            match *self.value {
                Value::Int(i) => visitor.visit_i64(i),
                Value::Str(ref s) => match s.parse::<$ty>() {
                    Ok(v) => visitor.$visitor_fn(v),
                    Err(_) => Err(ExtractorError::ParseError(format!(
                        "`{}` is not a valid {}",
                        s,
                        stringify!($ty)
                    ))),
                },
            }
        }
    };
}

/// Deserializes a single `Value`.
pub(crate) struct ValueDeserializer<'a> {
    value: &'a Value,
}

impl<'de, 'a> IntoDeserializer<'de, ExtractorError> for ValueDeserializer<'a> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de, 'a> Deserializer<'de> for ValueDeserializer<'a> {
    type Error = ExtractorError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match *self.value {
            Value::Int(i) => visitor.visit_i64(i),
            Value::Str(ref s) => visitor.visit_str(s),
        }
    }

    parse_value_type!(deserialize_bool, visit_bool, bool);
    parse_value_type!(deserialize_i8, visit_i8, i8);
    parse_value_type!(deserialize_i16, visit_i16, i16);
    parse_value_type!(deserialize_i32, visit_i32, i32);
    parse_value_type!(deserialize_i64, visit_i64, i64);
    parse_value_type!(deserialize_u8, visit_u8, u8);
    parse_value_type!(deserialize_u16, visit_u16, u16);
    parse_value_type!(deserialize_u32, visit_u32, u32);
    parse_value_type!(deserialize_u64, visit_u64, u64);
    parse_value_type!(deserialize_f32, visit_f32, f32);
    parse_value_type!(deserialize_f64, visit_f64, f64);

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match *self.value {
            Value::Int(i) => visitor.visit_string(i.to_string()),
            Value::Str(ref s) => visitor.visit_str(s),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let variant = self.value.to_string();
        visitor.visit_enum(<String as IntoDeserializer<'de, ExtractorError>>::into_deserializer(
            variant,
        ))
    }

    forward_to_deserialize_any! {
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct ignored_any
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use crate::extractor::extract;
    use crate::router::values::{Value, Values};

    use super::*;

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs.iter().cloned().collect()
    }

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Tab {
        Posts,
        Likes,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Params {
        id: i32,
        title: String,
        page: Option<u8>,
        tab: Option<Tab>,
        draft: Option<bool>,
    }

    #[test]
    fn extracts_struct() {
        let v = values(&[
            ("id", Value::Int(12)),
            ("title", Value::from("123")),
            ("page", Value::from("4")),
            ("tab", Value::from("likes")),
            ("draft", Value::from("true")),
            ("unrelated", Value::from("ignored")),
        ]);

        assert_eq!(
            extract::<Params>(&v).unwrap(),
            Params {
                id: 12,
                title: "123".to_owned(),
                page: Some(4),
                tab: Some(Tab::Likes),
                draft: Some(true),
            }
        );
    }

    #[test]
    fn int_capture_into_string_field() {
        #[derive(Deserialize)]
        struct P {
            id: String,
        }

        let p: P = extract(&values(&[("id", Value::Int(5))])).unwrap();
        assert_eq!(p.id, "5");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let v = values(&[("id", Value::Int(1)), ("title", Value::from("t"))]);
        let p: Params = extract(&v).unwrap();
        assert_eq!(p.page, None);
        assert_eq!(p.tab, None);
    }

    #[test]
    fn reports_parse_errors() {
        let v = values(&[
            ("id", Value::Int(1)),
            ("title", Value::from("t")),
            ("page", Value::from("two")),
        ]);

        match extract::<Params>(&v) {
            Err(ExtractorError::ParseError(msg)) => assert!(msg.contains("two")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn reports_missing_fields() {
        let v = values(&[("title", Value::from("t"))]);
        match extract::<Params>(&v) {
            Err(ExtractorError::Custom(msg)) => assert!(msg.contains("id")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn out_of_range_ints_fail() {
        #[derive(Deserialize, Debug)]
        struct P {
            #[allow(dead_code)]
            id: u8,
        }

        assert!(extract::<P>(&values(&[("id", Value::Int(300))])).is_err());
    }

    #[test]
    fn extracts_into_map() {
        let v = values(&[("a", Value::from("x")), ("b", Value::Int(2))]);
        let m: HashMap<String, String> = extract(&v).unwrap();
        assert_eq!(m["a"], "x");
        assert_eq!(m["b"], "2");
    }

    #[test]
    fn rejects_scalar_targets() {
        let v = values(&[("a", Value::Int(1))]);
        assert_eq!(
            extract::<i32>(&v),
            Err(ExtractorError::UnexpectedTargetType("i32"))
        );
        assert_eq!(
            extract::<Vec<String>>(&v),
            Err(ExtractorError::UnexpectedTargetType("sequence"))
        );
    }
}
