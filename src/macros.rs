/// Declares a struct and implements [`Reflect`](crate::Reflect) for it.
///
/// Each field may end with `=> "annotation"`, where the annotation has the
/// form `segment[,directive]*`. Only fields declared plain `pub` are exported;
/// private, `pub(crate)` and other restricted fields never reach the output.
/// Generic structs are not supported.
///
/// ```rust
/// use serde_dotted::{flatten, record, Value};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Account {
///         pub id: u64 => "accountId",
///         pub nickname: Option<String> => "nick,omitempty",
///         pub internal_note: String => "-",
///         password_hash: String,
///     }
/// }
///
/// let account = Account { id: 7, ..Default::default() };
/// let map = flatten(&account).unwrap();
///
/// assert_eq!(map.get("accountId").and_then(Value::as_i64), Some(7));
/// assert_eq!(map.len(), 1);
/// ```
#[macro_export]
macro_rules! record {
    (@tag) => {
        ::core::option::Option::None
    };

    (@tag $tag:literal) => {
        ::core::option::Option::Some($tag)
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $tag:literal)?
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

        impl $crate::Reflect for $name {
            fn reflect(&self) -> $crate::Value {
                let mut record = $crate::Record::new(::core::stringify!($name));
                $(
                    record.push($crate::Field {
                        name: ::core::stringify!($field),
                        exported: $crate::macros::is_exported(::core::stringify!($field_vis)),
                        tag: $crate::record!(@tag $($tag)?),
                        value: $crate::Reflect::reflect(&self.$field),
                    });
                )*
                $crate::Value::Record(record)
            }
        }
    };
}

#[doc(hidden)]
pub fn is_exported(visibility: &str) -> bool {
    visibility == "pub"
}
