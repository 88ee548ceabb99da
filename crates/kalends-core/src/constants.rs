/// Product identifier components shared across crates
pub const PRODUCT_VENDOR: &str = "kalends";
pub const PRODUCT_NAME: &str = "Calendar Engine";
pub const DEFAULT_PRODID: &str =
    const_str::concat!("-//", PRODUCT_VENDOR, "//", PRODUCT_NAME, "//EN");

/// iCalendar version written into every new calendar
pub const ICALENDAR_VERSION: &str = "2.0";

/// Recurrence expansion bound when neither an override nor UNTIL is present
pub const DEFAULT_HORIZON_DAYS: i64 = 14;
