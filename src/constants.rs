// Constants module - centralized default values
//
// Defaults shared by the image pipelines, the HTTP wrappers and the
// configuration layer.

// =============================================================================
// Image defaults
// =============================================================================

/// Default JPEG quality for thumbnails and watermarked output
pub const DEFAULT_IMAGE_QUALITY: u8 = 80;

/// Default watermark transparency level (1-10, 5 = half opaque)
pub const DEFAULT_TRANSPARENCY_LEVEL: u8 = 5;

/// Largest intermediate canvas (in pixels) a thumbnail may render
pub const MAX_CANVAS_PIXELS: i64 = 100_000_000;

// =============================================================================
// HTTP defaults
// =============================================================================

/// Default request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("bizkit/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Identifier defaults
// =============================================================================

/// Snowflake worker id used when none is configured
pub const DEFAULT_WORKER_ID: u32 = 0;

// =============================================================================
// Input throttle defaults
// =============================================================================

/// Minimum gap between two accepted inputs, in milliseconds
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 200;

// =============================================================================
// Table defaults
// =============================================================================

/// Worksheet name used when writing spreadsheets
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

// =============================================================================
// Response messages
// =============================================================================

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation succeeded";

pub const DEFAULT_FAILURE_MESSAGE: &str = "Operation failed";
