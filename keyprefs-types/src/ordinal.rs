//! Explicit integer encoding for persisted enumerations.
//!
//! Stored enums are written as integers. The integer for each variant is spelled
//! out next to the variant so that reordering or inserting variants never changes
//! what an existing preferences file means.

/// An enumeration with a fixed, persisted integer per variant.
pub trait Ordinal: Sized + Copy + 'static {
    /// Integer written to storage for this variant.
    fn ordinal(self) -> i64;

    /// Inverse of [`Ordinal::ordinal`]. `None` for integers no variant owns.
    fn from_ordinal(ordinal: i64) -> Option<Self>;
}

/// Generates a closed enum together with its ordinal table and stable names.
///
/// Each variant is written as `Variant => ordinal, "name",`.
macro_rules! define_ordinal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $ordinal:literal, $str:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $str, )*
                }
            }

            pub fn from_name(s: &str) -> Option<Self> {
                match s {
                    $( $str => Some($name::$variant), )*
                    _ => None,
                }
            }
        }

        impl $crate::ordinal::Ordinal for $name {
            fn ordinal(self) -> i64 {
                match self {
                    $( $name::$variant => $ordinal, )*
                }
            }

            fn from_ordinal(ordinal: i64) -> Option<Self> {
                match ordinal {
                    $( $ordinal => Some($name::$variant), )*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Ordinal;

    define_ordinal_enum! {
        pub enum Sample {
            Second => 7, "second",
            First => 3, "first",
        }
    }

    #[test]
    fn ordinals_come_from_the_table_not_declaration_order() {
        assert_eq!(Sample::Second.ordinal(), 7);
        assert_eq!(Sample::First.ordinal(), 3);
        assert_eq!(Sample::from_ordinal(3), Some(Sample::First));
        assert_eq!(Sample::from_ordinal(0), None);
        assert_eq!(Sample::from_ordinal(1), None);
    }

    #[test]
    fn names_round_trip() {
        for &variant in Sample::ALL {
            assert_eq!(Sample::from_name(variant.name()), Some(variant));
        }
        assert_eq!(Sample::from_name("third"), None);
        assert_eq!(Sample::First.to_string(), "first");
    }
}
