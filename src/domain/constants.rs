/// Structural schema compiled into the binary. A configured override replaces it.
pub const EMBEDDED_SCHEMA: &str = include_str!("../../schemas/workunit.schema.json");

/// Label used for the embedded schema in logs and `ahs schema --json`.
pub const EMBEDDED_SCHEMA_SOURCE: &str = "embedded:workunit.schema.json";

/// Path marker for structural errors located at the document root.
pub const ROOT_PATH_MARKER: &str = "<root>";

/// Evidence references containing this marker are URIs and never probed.
pub const URI_SCHEME_MARKER: &str = "://";

/// Default config file, relative to `$HOME`.
pub const DEFAULT_CONFIG_RELATIVE: &str = ".config/ahs/config.toml";

pub const VERDICT_VALID: &str = "VALID";
pub const VERDICT_INVALID: &str = "INVALID";
