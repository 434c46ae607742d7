/// Declare an enum of named integer constants implementing
/// [`Enumerated`](crate::Enumerated).
///
/// ```
/// griddle_core::enumerate! {
///     pub enum Status {
///         Draft = 0,
///         Active = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! enumerate {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant = $value, )+
        }

        impl $crate::Enumerated for $name {
            fn value(self) -> i64 {
                self as i64
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            fn from_value(value: i64) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( stringify!($variant) => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}
