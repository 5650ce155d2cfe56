// src/domain/enums.rs

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a fieldless enum stored as an integer column.
///
/// Discriminants are part of the on-disk format: append new variants,
/// never reorder.
macro_rules! sql_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_i64(self) -> i64 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn from_i64(value: i64) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_i64()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let raw = value.as_i64()?;
                $name::from_i64(raw).ok_or(FromSqlError::OutOfRange(raw))
            }
        }
    };
}

sql_enum!(
    /// Lifecycle of a public listing.
    AdvertisementStatus {
        Draft = 0,
        Pending = 1,
        Active = 2,
        Sold = 3,
        Expired = 4,
        Rejected = 5,
        Archived = 6,
    }
);

sql_enum!(FuelType {
    Petrol = 0,
    Diesel = 1,
    Electric = 2,
    Hybrid = 3,
    PlugInHybrid = 4,
    Lpg = 5,
    Cng = 6,
});

sql_enum!(TransmissionType {
    Manual = 0,
    Automatic = 1,
    SemiAutomatic = 2,
    Cvt = 3,
});

sql_enum!(BodyStyle {
    Sedan = 0,
    Hatchback = 1,
    Suv = 2,
    Coupe = 3,
    Convertible = 4,
    Wagon = 5,
    Van = 6,
    Pickup = 7,
    Minivan = 8,
    Crossover = 9,
});

sql_enum!(VehicleCondition {
    New = 0,
    Used = 1,
    Damaged = 2,
});

sql_enum!(UserType {
    Private = 0,
    Dealer = 1,
    Admin = 2,
});
