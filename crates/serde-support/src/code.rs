use std::fmt;

/// A value is not part of a closed code list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeError {
    pub list: &'static str,
    pub value: String,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {} code", self.value, self.list)
    }
}

impl std::error::Error for CodeError {}

/// Declares a closed eCH code list.
///
/// The generated enum accepts either the wire code (`"1"`) or the variant
/// name (`"Male"`) through `FromStr`, and always collapses to the enum.
/// Serialization, both XML and JSON, uses the wire code.
///
/// ```
/// openmun_serde_support::coded_enum! {
///     /// Sex according to eCH-0044.
///     pub enum Sex {
///         Male = "1",
///         Female = "2",
///         Unknown = "3",
///     }
/// }
///
/// assert_eq!(Sex::from_code("2").unwrap(), Sex::Female);
/// assert_eq!("Male".parse::<Sex>().unwrap().code(), "1");
/// ```
#[macro_export]
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// All wire codes in declaration order.
            pub const CODES: &'static [&'static str] = &[$($code),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn from_code(code: &str) -> ::std::result::Result<Self, $crate::CodeError> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err($crate::CodeError {
                        list: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::CodeError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok(Self::$variant);
                    }
                )+
                Self::from_code(s)
            }
        }

        impl $crate::ScalarValue for $name {
            fn from_scalar(
                scalar: $crate::Scalar,
            ) -> ::std::result::Result<Self, $crate::ScalarError> {
                match scalar {
                    $crate::Scalar::Text(ref code) => Self::from_code(code)
                        .map_err(|_| $crate::ScalarError::new(stringify!($name), &scalar)),
                    other => Err($crate::ScalarError::new(stringify!($name), &other)),
                }
            }

            fn to_scalar(&self) -> $crate::Scalar {
                $crate::Scalar::Text(self.code().to_string())
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as $crate::__serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                raw.parse()
                    .map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Scalar, ScalarValue};

    coded_enum! {
        enum Action {
            First = "1",
            Correction = "3",
            Deletion = "4",
        }
    }

    #[test]
    fn test_code_and_name_inputs_collapse() {
        assert_eq!(Action::from_code("3").unwrap(), Action::Correction);
        assert_eq!("deletion".parse::<Action>().unwrap(), Action::Deletion);
        assert_eq!(" 1 ".parse::<Action>().unwrap(), Action::First);
        assert_eq!(Action::CODES, &["1", "3", "4"]);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = Action::from_code("2").unwrap_err();
        assert_eq!(err.list, "Action");
        assert_eq!(err.value, "2");
        assert!(Action::from_scalar(Scalar::Text("9".into())).is_err());
        assert!(Action::from_scalar(Scalar::Integer(1)).is_err());
    }

    #[test]
    fn test_serde_uses_wire_code() {
        let json = serde_json::to_string(&Action::Correction).unwrap();
        assert_eq!(json, "\"3\"");
        let back: Action = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(back, Action::Deletion);
        assert_eq!(Action::First.to_scalar(), Scalar::Text("1".into()));
    }
}
