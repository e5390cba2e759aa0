/// Error code registry for the planner
///
/// Error codes are organized by category:
/// - 1000-1999: Bake configuration errors
/// - 2000-2999: Application configuration errors
/// - 3000-3999: Storage errors
/// - 4000-4999: Advisory errors
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Bake configuration errors (1000-1999)
    pub const BAKE_GENERIC: u16 = 1000;
    pub const BAKE_MISSING_FIELD: u16 = 1001;
    pub const BAKE_OUT_OF_RANGE: u16 = 1002;
    pub const BAKE_UNKNOWN_OPTION: u16 = 1003;
    pub const BAKE_INCONSISTENT: u16 = 1004;
    pub const BAKE_TIME_OVERFLOW: u16 = 1005;

    // Application configuration errors (2000-2999)
    pub const CONFIG_GENERIC: u16 = 2000;
    pub const CONFIG_NOT_FOUND: u16 = 2001;
    pub const CONFIG_INVALID_YAML: u16 = 2002;
    pub const CONFIG_INVALID_JSON: u16 = 2003;
    pub const CONFIG_INVALID_VALUE: u16 = 2004;
    pub const CONFIG_VALIDATION_FAILED: u16 = 2005;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_CORRUPTED: u16 = 3006;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;

    // Advisory errors (4000-4999)
    pub const ADVISORY_GENERIC: u16 = 4000;
    pub const ADVISORY_MISSING_API_KEY: u16 = 4001;
    pub const ADVISORY_UNAUTHORIZED: u16 = 4002;
    pub const ADVISORY_RATE_LIMITED: u16 = 4003;
    pub const ADVISORY_REQUEST_FAILED: u16 = 4004;
    pub const ADVISORY_BAD_RESPONSE: u16 = 4005;
    pub const ADVISORY_TIMEOUT: u16 = 4006;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_INVALID_INPUT: u16 = 7001;
    pub const VALIDATION_UNKNOWN_STAGE: u16 = 7002;
    pub const VALIDATION_UNKNOWN_ISSUE: u16 = 7003;
    pub const VALIDATION_UNSUPPORTED_IMAGE: u16 = 7004;
    pub const VALIDATION_INVALID_TIME: u16 = 7005;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::BAKE_GENERIC => "Invalid bake configuration",
        ErrorCode::BAKE_MISSING_FIELD => "A required bake setting is missing",
        ErrorCode::BAKE_OUT_OF_RANGE => "A bake setting is outside its allowed range",
        ErrorCode::BAKE_UNKNOWN_OPTION => "Unrecognised bake option",
        ErrorCode::BAKE_INCONSISTENT => "Bake settings contradict each other",
        ErrorCode::BAKE_TIME_OVERFLOW => "Timeline falls outside the supported calendar",

        ErrorCode::CONFIG_GENERIC => "Configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_YAML => "Configuration file is not valid YAML",
        ErrorCode::CONFIG_INVALID_JSON => "Invalid JSON",
        ErrorCode::CONFIG_INVALID_VALUE => "Invalid configuration value",
        ErrorCode::CONFIG_VALIDATION_FAILED => "Configuration validation failed",

        ErrorCode::STORAGE_GENERIC => "Storage error",
        ErrorCode::STORAGE_IO_ERROR => "Storage I/O failed",
        ErrorCode::STORAGE_PERMISSION_DENIED => "Permission denied",
        ErrorCode::STORAGE_NOT_FOUND => "Stored item not found",
        ErrorCode::STORAGE_CORRUPTED => "Stored data is corrupted",
        ErrorCode::STORAGE_SERIALIZATION_ERROR => "Failed to serialize stored data",

        ErrorCode::ADVISORY_GENERIC => "Troubleshooting request failed",
        ErrorCode::ADVISORY_MISSING_API_KEY => "No API key configured",
        ErrorCode::ADVISORY_UNAUTHORIZED => "API key was rejected",
        ErrorCode::ADVISORY_RATE_LIMITED => "Rate limit exceeded",
        ErrorCode::ADVISORY_REQUEST_FAILED => "Request to the model failed",
        ErrorCode::ADVISORY_BAD_RESPONSE => "Unexpected response from the model",
        ErrorCode::ADVISORY_TIMEOUT => "Request to the model timed out",

        ErrorCode::VALIDATION_GENERIC => "Validation error",
        ErrorCode::VALIDATION_INVALID_INPUT => "Invalid input",
        ErrorCode::VALIDATION_UNKNOWN_STAGE => "Unknown baking stage",
        ErrorCode::VALIDATION_UNKNOWN_ISSUE => "Unknown issue for this stage",
        ErrorCode::VALIDATION_UNSUPPORTED_IMAGE => "Unsupported image type",
        ErrorCode::VALIDATION_INVALID_TIME => "Invalid time value",

        _ => "Unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_described() {
        assert_eq!(
            describe_error_code(ErrorCode::BAKE_MISSING_FIELD),
            "A required bake setting is missing"
        );
        assert_eq!(describe_error_code(ErrorCode::ADVISORY_RATE_LIMITED), "Rate limit exceeded");
        assert_eq!(describe_error_code(1234), "Unknown error");
    }
}
