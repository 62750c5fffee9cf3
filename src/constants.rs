// Text decoding
pub const DEFAULT_ENCODING: &str = "utf-8";

// Environment coercion
pub const DEFAULT_LIST_DELIMITER: &str = ",";

// FTP session defaults
pub const FTP_DEFAULT_USER: &str = "anonymous";
pub const FTP_DEFAULT_PASSWORD: &str = "anonymous@";
pub const FTP_DEFAULT_PORT: u16 = 21;

// Environment overlay for FetcherConfig
pub const ENV_DEFAULT_ENCODING: &str = "BRFIED_DEFAULT_ENCODING";
pub const ENV_USER_AGENT: &str = "BRFIED_USER_AGENT";
pub const ENV_FTP_USER: &str = "BRFIED_FTP_USER";
pub const ENV_FTP_PASSWORD: &str = "BRFIED_FTP_PASSWORD";

// Logging
pub const DEFAULT_LOG_FILTER: &str = "brfied=info";
