/// Configuration macros for config definitions with embedded defaults
///
/// `config_struct!` declares a configuration structure and its defaults in a
/// single place.
///
/// # Example
/// ```
/// stylelog::config_struct! {
///     pub struct SinkConfig {
///         target: String = "stdout".to_string(),
///         colors: bool = true,
///     }
/// }
///
/// let config = SinkConfig::default();
/// assert_eq!(config.target, "stdout");
/// assert_eq!(SinkConfig::FIELDS, &["target", "colors"]);
/// ```
///
/// This generates:
/// - A struct with public fields
/// - A Default implementation with the specified values
/// - Serde support with `#[serde(default)]`, so partial files fill in defaults
/// - `FIELDS`, the recognised keys, used to report unknown keys
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl $name {
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field_name)),*];
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
