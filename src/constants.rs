//! Defaults used when the config file and CLI leave a value unset.

// Matrix geometry, one 64x64 HUB75 panel
/// Panel width in pixels.
pub const MATRIX_WIDTH: u32 = 64;
/// Panel height in pixels.
pub const MATRIX_HEIGHT: u32 = 64;
/// Largest width or height the layout accepts (chained panels included).
pub const MATRIX_MAX_DIMENSION: u32 = 4096;

/// Pixels between text baselines.
pub const LINE_SPACING: i32 = 13;
/// Advance per character of the built-in 5x7 font (plus one column gap).
pub const GLYPH_WIDTH: i32 = 6;
/// Left edge for lines too wide to center.
pub const TEXT_X_OFFSET: i32 = 1;
/// Added to the vertically centered first row.
pub const TEXT_Y_OFFSET: i32 = 8;
/// Black text, reads well on the monthly backgrounds.
pub const TEXT_COLOR: u32 = 0x000000;

// Brightness (0-255)
pub const BRIGHTNESS_DAY: u8 = 80;
pub const BRIGHTNESS_NIGHT: u8 = 40;
/// Night mode starts at 16:00 ...
pub const NIGHT_START_HOUR: u32 = 16;
/// ... and ends at 08:00.
pub const NIGHT_END_HOUR: u32 = 8;

// Network time
pub const NTP_SERVER: &str = "pool.ntp.org";
pub const NTP_PORT: u16 = 123;
/// CET
pub const NTP_TIMEZONE_OFFSET: i32 = 1;
pub const NTP_DST_OFFSET: i32 = 0;
/// Seconds between resyncs.
pub const NTP_SYNC_INTERVAL_SECS: u64 = 3600;
/// Seconds to wait for a server reply.
pub const NTP_TIMEOUT_SECS: u64 = 10;

// Backgrounds
pub const BG_IMAGE_PATH: &str = "/backgrounds/";
pub const BG_IMAGE_EXTENSION: &str = ".bmp";

// Loop cadence
/// Phrase evaluation tick, milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;
/// How often the loop asks whether a resync is due, milliseconds.
pub const SYNC_CHECK_INTERVAL_MS: u64 = 60_000;
/// Loop sleep between pacer checks.
pub const POLL_INTERVAL_MS: u64 = 100;
