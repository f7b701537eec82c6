//! Positional request arguments.
//!
//! An endpoint template such as `api/weather?City={0}&Date={1}` is filled from
//! the fields of a request value. Each request type declares which of its
//! fields feed which placeholder by implementing [`RequestArguments`],
//! normally through the [`request_arguments!`](crate::request_arguments) macro:
//!
//! ```
//! use declaro_core::{request_arguments, RequestArguments};
//!
//! struct WeatherRequest {
//!     city: Option<String>,
//!     date: Option<String>,
//! }
//!
//! request_arguments!(WeatherRequest {
//!     0 => city,
//!     1 => date,
//! });
//!
//! let request = WeatherRequest {
//!     city: Some("Budapest".into()),
//!     date: Some("2023-09-22".into()),
//! };
//! assert_eq!(
//!     request.request_arguments(),
//!     vec![Some("Budapest".to_string()), Some("2023-09-22".to_string())]
//! );
//! assert_eq!(WeatherRequest::argument_bindings().len(), 2);
//! ```

use crate::EndpointConfig;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Associates a request field with a placeholder index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentBinding {
    pub property: Cow<'static, str>,
    pub index: usize,
}

impl ArgumentBinding {
    pub fn new(property: impl Into<Cow<'static, str>>, index: usize) -> Self {
        Self {
            property: property.into(),
            index,
        }
    }
}

/// Types whose fields fill endpoint placeholders.
pub trait RequestArguments {
    /// The declared bindings of this type.
    fn argument_bindings() -> Vec<ArgumentBinding>
    where
        Self: Sized;

    /// Bound field values in ascending index order. `None` marks an unset
    /// field.
    fn request_arguments(&self) -> Vec<Option<String>>;

    /// Value of the field named `property`. `None` when the field is unset
    /// or not declared.
    fn argument(&self, property: &str) -> Option<String>;
}

impl RequestArguments for () {
    fn argument_bindings() -> Vec<ArgumentBinding> {
        Vec::new()
    }

    fn request_arguments(&self) -> Vec<Option<String>> {
        Vec::new()
    }

    fn argument(&self, _property: &str) -> Option<String> {
        None
    }
}

/// Extract the positional arguments a request supplies for `config`.
///
/// Values are looked up by the property names of the configuration's
/// bindings, in binding index order; fields the configuration does not bind
/// are ignored. Unset or undeclared properties are skipped, so a request
/// missing a bound value yields fewer arguments than the configuration
/// declares and fails when the URI is built. Returns `None` when the
/// configuration has no bindings.
pub fn extract_arguments<R>(request: &R, config: &EndpointConfig) -> Option<Vec<String>>
where
    R: RequestArguments + ?Sized,
{
    if config.bindings.is_empty() {
        return None;
    }
    Some(
        config
            .bindings
            .iter()
            .filter_map(|binding| request.argument(&binding.property))
            .collect(),
    )
}

/// Conversion of a field value into an endpoint argument.
pub trait ArgumentValue {
    fn to_argument(&self) -> Option<String>;
}

impl ArgumentValue for String {
    fn to_argument(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ArgumentValue for str {
    fn to_argument(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ArgumentValue for Cow<'_, str> {
    fn to_argument(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: ArgumentValue + ?Sized> ArgumentValue for &T {
    fn to_argument(&self) -> Option<String> {
        (**self).to_argument()
    }
}

impl<T: ArgumentValue> ArgumentValue for Option<T> {
    fn to_argument(&self) -> Option<String> {
        self.as_ref().and_then(ArgumentValue::to_argument)
    }
}

macro_rules! impl_argument_value_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgumentValue for $ty {
                fn to_argument(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_argument_value_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Implement [`RequestArguments`] for a struct by listing `index => field`
/// pairs. An empty list declares a type with no positional arguments.
#[macro_export]
macro_rules! request_arguments {
    ($ty:ty { $($index:literal => $field:ident),* $(,)? }) => {
        impl $crate::RequestArguments for $ty {
            fn argument_bindings() -> ::std::vec::Vec<$crate::ArgumentBinding> {
                let mut bindings: ::std::vec::Vec<$crate::ArgumentBinding> = ::std::vec![
                    $($crate::ArgumentBinding::new(stringify!($field), $index)),*
                ];
                bindings.sort_by_key(|binding| binding.index);
                bindings
            }

            fn request_arguments(&self) -> ::std::vec::Vec<::std::option::Option<::std::string::String>> {
                #[allow(unused_mut)]
                let mut values: ::std::vec::Vec<(usize, ::std::option::Option<::std::string::String>)> = ::std::vec![
                    $(($index, $crate::ArgumentValue::to_argument(&self.$field))),*
                ];
                values.sort_by_key(|(index, _)| *index);
                values.into_iter().map(|(_, value)| value).collect()
            }

            fn argument(&self, property: &str) -> ::std::option::Option<::std::string::String> {
                $(
                    if property == stringify!($field) {
                        return $crate::ArgumentValue::to_argument(&self.$field);
                    }
                )*
                let _ = property;
                ::std::option::Option::None
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Forecast {
        date: Option<String>,
        city: String,
        days: u32,
    }

    // Declared out of order on purpose.
    crate::request_arguments!(Forecast {
        2 => days,
        0 => city,
        1 => date,
    });

    struct Empty;

    crate::request_arguments!(Empty {});

    #[test]
    fn test_bindings_sorted_by_index() {
        let bindings = Forecast::argument_bindings();
        let names: Vec<_> = bindings.iter().map(|b| b.property.as_ref()).collect();
        assert_eq!(names, vec!["city", "date", "days"]);
        assert_eq!(bindings[2].index, 2);
    }

    #[test]
    fn test_values_in_index_order() {
        let forecast = Forecast {
            date: Some("2023-09-22".to_string()),
            city: "Budapest".to_string(),
            days: 3,
        };
        assert_eq!(
            forecast.request_arguments(),
            vec![
                Some("Budapest".to_string()),
                Some("2023-09-22".to_string()),
                Some("3".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_values_are_skipped_on_extraction() {
        let forecast = Forecast {
            date: None,
            city: "Budapest".to_string(),
            days: 3,
        };
        let config = EndpointConfig::get("api/forecast/{0}/{1}/{2}")
            .with_bindings(Forecast::argument_bindings());

        let arguments = extract_arguments(&forecast, &config).unwrap();
        assert_eq!(arguments, vec!["Budapest".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_extraction_follows_binding_names() {
        let forecast = Forecast {
            date: Some("2023-09-22".to_string()),
            city: "Budapest".to_string(),
            days: 3,
        };
        let config = EndpointConfig::get("api/forecast/{0}/{1}")
            .with_argument("date", 0)
            .with_argument("city", 1);

        let arguments = extract_arguments(&forecast, &config).unwrap();
        assert_eq!(
            arguments,
            vec!["2023-09-22".to_string(), "Budapest".to_string()]
        );
    }

    #[test]
    fn test_extraction_of_bound_subset() {
        let forecast = Forecast {
            date: None,
            city: "Budapest".to_string(),
            days: 3,
        };
        let config = EndpointConfig::get("api/city/{0}").with_argument("city", 0);

        let arguments = extract_arguments(&forecast, &config).unwrap();
        assert_eq!(arguments, vec!["Budapest".to_string()]);
        assert_eq!(
            crate::build_uri(&config, Some(arguments.as_slice()), &[("days", "3")]).unwrap(),
            "api/city/Budapest?days=3"
        );
    }

    #[test]
    fn test_undeclared_property_is_skipped() {
        let forecast = Forecast {
            date: None,
            city: "Budapest".to_string(),
            days: 3,
        };
        assert_eq!(forecast.argument("days").as_deref(), Some("3"));
        assert_eq!(forecast.argument("date"), None);
        assert_eq!(forecast.argument("country"), None);

        let config = EndpointConfig::get("api/{0}/{1}")
            .with_argument("city", 0)
            .with_argument("country", 1);
        let arguments = extract_arguments(&forecast, &config).unwrap();
        assert!(matches!(
            crate::build_uri(&config, Some(arguments.as_slice()), &[] as &[(&str, &str)]),
            Err(crate::Error::FormatMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_no_bindings_extracts_nothing() {
        let config = EndpointConfig::get("api/forecast");
        assert!(extract_arguments(&Empty, &config).is_none());
        assert!(Empty::argument_bindings().is_empty());
        assert!(Empty.request_arguments().is_empty());
        assert!(Empty.argument("city").is_none());
    }
}
