//! `define_port_error!` generates a `thiserror` enum plus snake_case
//! constructors whose fields accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreError {
            Unreachable { message: String } => "store unreachable: {message}",
            Conflict { key: String, attempts: u32 } => "conflict on {key} after {attempts} attempts",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::unreachable("timeout");
        assert_eq!(err.to_string(), "store unreachable: timeout");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = StoreError::conflict("alice", 3_u32);
        assert_eq!(err, StoreError::Conflict { key: "alice".into(), attempts: 3 });
        assert_eq!(err.to_string(), "conflict on alice after 3 attempts");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::closed(), StoreError::Closed);
    }
}
