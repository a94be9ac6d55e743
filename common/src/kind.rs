//! [`define_kind!`] macro.

/// Defines a closed vocabulary enum.
///
/// Every variant is named by its `kebab-case` form in URLs and JSON, and is
/// stored as its explicit `INT2` discriminant in Postgres. Discriminants are
/// persisted, so never reuse or renumber them.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!("sphere".parse::<Kind>().unwrap(), Kind::Sphere);
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!(Kind::from_u8(2), Some(Kind::Sphere));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::strum::IntoStaticStr,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the stored discriminant of this variant.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Looks up the variant by its stored discriminant.
            #[must_use]
            pub const fn from_u8(v: u8) -> Option<Self> {
                $(
                    if v == Self::$variant as u8 {
                        return Some(Self::$variant);
                    }
                )*
                None
            }

            /// Returns the `kebab-case` name of this variant.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                let v = <i16 as $crate::private::postgres_types::FromSql<'a>>
                    ::from_sql(ty, raw)?;
                u8::try_from(v)
                    .ok()
                    .and_then(Self::from_u8)
                    .ok_or_else(|| ::std::format!(
                        "unknown `{}` discriminant: {v}",
                        ::core::stringify!($name),
                    ).into())
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT2);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(
                    &i16::from(self.u8()),
                    ty,
                    w,
                )
            }
        }
    };
}

#[cfg(test)]
mod spec {
    define_kind! {
        #[doc = "Test vocabulary."]
        enum Amenity {
            #[doc = "Swimming pool."]
            SwimmingPool = 1,

            #[doc = "Gym."]
            Gym = 3,
        }
    }

    #[test]
    fn names_variants_in_kebab_case() {
        assert_eq!(Amenity::SwimmingPool.as_str(), "swimming-pool");
        assert_eq!(Amenity::Gym.to_string(), "gym");
        assert_eq!(
            "swimming-pool".parse::<Amenity>().ok(),
            Some(Amenity::SwimmingPool),
        );
        assert!("SwimmingPool".parse::<Amenity>().is_err());
    }

    #[test]
    fn looks_up_discriminants() {
        assert_eq!(Amenity::ALL, &[Amenity::SwimmingPool, Amenity::Gym]);
        assert_eq!(Amenity::from_u8(3), Some(Amenity::Gym));
        assert_eq!(Amenity::from_u8(2), None);
        assert_eq!(Amenity::Gym.u8(), 3);
    }
}
