/// Declares a record struct and registers its annotated fields.
///
/// Each field may carry a tag after `=>`; untagged fields are ignored by the
/// codec. An optional `capabilities = [...]` clause lists the hooks from
/// [`jsonapi_document::capability`] the record implements: `linkable`,
/// `relationship_linkable`, `meta`, `relationship_meta`.
///
/// The struct must implement `Default`.
///
/// ```
/// use jsonapi::resource;
///
/// resource! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Comment {
///         pub id: i64 => "primary,comments",
///         pub body: String => "attr,body",
///         pub cached: bool,
///     }
/// }
///
/// let comment = Comment { id: 5, body: "first!".into(), cached: true };
/// let json = jsonapi::to_value(&comment).unwrap();
/// assert_eq!(json["data"]["attributes"]["body"], "first!");
/// assert!(json["data"]["attributes"].get("cached").is_none());
/// ```
#[macro_export]
macro_rules! resource {
    (@field $fields:ident, $name:ident, $field:ident, $ty:ty) => {};
    (@field $fields:ident, $name:ident, $field:ident, $ty:ty, $tag:literal) => {
        $fields.push($crate::Field::new(
            ::std::stringify!($field),
            $tag,
            {
                fn get(record: &$name) -> &$ty {
                    &record.$field
                }
                get
            },
            {
                fn get_mut(record: &mut $name) -> &mut $ty {
                    &mut record.$field
                }
                get_mut
            },
        ));
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
        $(capabilities = [$($cap:ident),* $(,)?];)?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Resource for $name {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$name>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    #[allow(unused_mut)]
                    let mut fields = ::std::vec::Vec::new();
                    $(
                        $crate::resource!(@field fields, $name, $field, $ty $(, $tag)?);
                    )*
                    $crate::Schema::new(::std::stringify!($name), fields)
                })
            }

            $(
                fn capabilities(&self) -> $crate::Capabilities<'_> {
                    $crate::Capabilities::none()$(.$cap(self))*
                }
            )?
        }

        impl $crate::FieldValue for $name {
            const EXPECTED: &'static str = ::std::stringify!($name);

            fn decode_attr(
                value: &$crate::__private::Value,
                c: &$crate::Coercion<'_>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                $crate::record::decode_nested(value, c)
            }

            fn encode_attr(
                &self,
                _iso8601: bool,
            ) -> ::std::result::Result<$crate::__private::Value, $crate::Error> {
                $crate::record::encode_nested(self)
            }

            fn is_zero(&self) -> bool {
                $crate::record::is_zero(self)
            }

            fn is_record() -> bool {
                true
            }

            fn decode_related(
                target: &$crate::ResourceIdentifier,
                ctx: &$crate::DecodeCtx<'_>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                $crate::record::decode_related(target, ctx)
            }

            fn decode_relation(
                linkage: &$crate::Linkage,
                ctx: &$crate::DecodeCtx<'_>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                $crate::record::decode_to_one(linkage, ctx)
            }

            fn encode_related(
                &self,
                ctx: &mut $crate::EncodeCtx<'_>,
            ) -> ::std::result::Result<$crate::ResourceIdentifier, $crate::Error> {
                $crate::record::encode_related(self, ctx)
            }
        }
    };
}

/// Lets single-field tuple structs stand in for their inner type.
///
/// ```
/// use jsonapi::{resource, scalar};
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// pub struct Cents(pub i64);
///
/// scalar!(Cents(i64));
///
/// resource! {
///     #[derive(Debug, Default)]
///     pub struct Invoice {
///         pub id: String => "primary,invoices",
///         pub total: Cents => "attr,total",
///     }
/// }
///
/// let invoice: Invoice = jsonapi::from_str(
///     r#"{"data": {"type": "invoices", "id": "a1", "attributes": {"total": 1250}}}"#,
/// ).unwrap();
/// assert_eq!(invoice.total, Cents(1250));
/// ```
#[macro_export]
macro_rules! scalar {
    ($($name:ident($inner:ty)),* $(,)?) => {$(
        impl $crate::FieldValue for $name {
            const EXPECTED: &'static str = <$inner as $crate::FieldValue>::EXPECTED;

            fn decode_attr(
                value: &$crate::__private::Value,
                c: &$crate::Coercion<'_>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                <$inner as $crate::FieldValue>::decode_attr(value, c).map($name)
            }

            fn encode_attr(
                &self,
                iso8601: bool,
            ) -> ::std::result::Result<$crate::__private::Value, $crate::Error> {
                <$inner as $crate::FieldValue>::encode_attr(&self.0, iso8601)
            }

            fn is_zero(&self) -> bool {
                <$inner as $crate::FieldValue>::is_zero(&self.0)
            }

            fn decode_id(
                id: &str,
                c: &$crate::Coercion<'_>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                <$inner as $crate::FieldValue>::decode_id(id, c).map($name)
            }

            fn encode_id(&self) -> ::std::result::Result<::std::string::String, $crate::Error> {
                <$inner as $crate::FieldValue>::encode_id(&self.0)
            }
        }
    )*};
}
