/// Declares a command template struct and implements [`Command`](crate::Command) for it.
///
/// Each field is written `name: Type = "annotation"`, optionally followed by
/// `as "option-name"` to replace the derived option name. The field named
/// `command` (of type [`Header`](crate::Header)) holds `name|usage` for the
/// command. Fields of type `Option<T>` become options annotated
/// `default|usage` or `usage`; all other fields are positional arguments
/// annotated with their usage.
///
/// The struct must implement `Default`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cmdflag_core::{command, Command, Header};
///
/// command! {
///     /// Serve a directory over HTTP.
///     #[derive(Debug, Default)]
///     pub struct Serve {
///         command: Header = "serve|Serve a directory over HTTP",
///         pub port: Option<u16> = "8080|Port to listen on",
///         pub idle: Option<Duration> = "Close idle connections after this long" as "idle-timeout",
///         pub root: String = "Directory to serve",
///     }
/// }
///
/// let fields = Serve::fields();
/// assert_eq!(fields.len(), 4);
/// assert_eq!(fields[2].rename, Some("idle-timeout"));
///
/// let mut serve = Serve::default();
/// serve.assign("port", "9000").unwrap();
/// assert_eq!(serve.port, Some(9000));
/// ```
#[macro_export]
macro_rules! command {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty = $tag:literal $(as $rename:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Command for $name {
            fn fields() -> ::std::vec::Vec<$crate::FieldSpec> {
                ::std::vec![
                    $(
                        $crate::FieldSpec::of::<$ty>(stringify!($field), stringify!($ty), $tag)
                            $(.renamed($rename))?,
                    )*
                ]
            }

            fn assign(
                &mut self,
                field: &str,
                token: &str,
            ) -> ::std::result::Result<(), $crate::ConvertError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::FieldValue>::from_token(token)?;
                        }
                    )*
                    other => {
                        return ::std::result::Result::Err(
                            $crate::ConvertError::UnknownField(other.to_string()),
                        );
                    }
                }
                ::std::result::Result::Ok(())
            }
        }
    };
}
