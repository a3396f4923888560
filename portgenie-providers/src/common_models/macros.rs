/// Declares a `Uuid`-backed record identifier with `Display` and conversions both ways.
macro_rules! uuid_newtype {
    ($(#[$attr:meta])* $newtype: ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $newtype(uuid::Uuid);

        impl $newtype {
            pub fn new_v4() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<uuid::Uuid> for $newtype {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$newtype> for uuid::Uuid {
            fn from(value: $newtype) -> Self {
                value.0
            }
        }
    };
}
pub(crate) use uuid_newtype;

/// Declares a transparent `String` newtype with `Display`, `as_str` and conversions.
macro_rules! string_newtype {
    ($(#[$attr:meta])* $newtype: ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $newtype(String);

        impl $newtype {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $newtype {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $newtype {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$newtype> for String {
            fn from(value: $newtype) -> Self {
                value.0
            }
        }
    };
}
pub(crate) use string_newtype;
