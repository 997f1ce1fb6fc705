//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses a `BIGSERIAL` primary key. Wrapping those keys keeps a
//! `FacultyId` from being passed where a `StudentId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_models::ids::{FacultyId, StudentId};
//!
//! fn get_student(id: StudentId) { /* ... */ }
//!
//! let student_id = StudentId::new(7);
//! let faculty_id = FacultyId::new(7);
//!
//! get_student(student_id);    // OK
//! // get_student(faculty_id); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Macro to define a strongly-typed ID newtype.
///
/// Generates a newtype wrapper around `i64` with the trait implementations
/// needed for database operations, serialization, and API documentation.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        #[schema(value_type = i64, format = Int64)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap an existing key.
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner key value.
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        // SQLx Type implementation for Postgres
        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i64 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i64 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        // SQLx Encode implementation
        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i64 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        // SQLx Decode implementation
        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i64 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        // SQLx array type support for Postgres
        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i64 as PgHasArrayType>::array_type_info()
            }
        }

        // Serde Deserialize - manual impl so path segments and JSON numbers both work
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i64::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for Faculty entities.
    FacultyId
);

define_id!(
    /// Strongly-typed ID for Student entities.
    StudentId
);

define_id!(
    /// Strongly-typed ID for Avatar entities.
    AvatarId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_i64() {
        let id: FacultyId = 42.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_id_debug() {
        let id = StudentId::new(7);
        assert_eq!(format!("{:?}", id), "StudentId(7)");
    }

    #[test]
    fn test_id_display() {
        let id = AvatarId::new(15);
        assert_eq!(format!("{}", id), "15");
    }

    #[test]
    fn test_id_from_str() {
        let id: StudentId = " 12 ".parse().unwrap();
        assert_eq!(id, StudentId::new(12));
    }

    #[test]
    fn test_id_from_str_invalid() {
        assert!("twelve".parse::<StudentId>().is_err());
        assert!("".parse::<FacultyId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&FacultyId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: FacultyId = serde_json::from_str("3").unwrap();
        assert_eq!(id, FacultyId::new(3));
    }

    #[test]
    fn test_id_rejects_string_payload() {
        assert!(serde_json::from_str::<StudentId>(r#""3""#).is_err());
    }

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![StudentId::new(3), StudentId::new(1), StudentId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![StudentId::new(1), StudentId::new(2), StudentId::new(3)]);
    }
}
