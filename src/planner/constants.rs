/// Recommended orders are rounded to a multiple of this many pounds.
pub const ROUNDING_STEP_POUNDS: f64 = 5.0;

/// Divisor used for loose pieces when none (or zero) is given.
pub const DEFAULT_PIECES_PER_BOX: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Calculator defaults (what the order form opens with)
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_DAILY_USAGE: f64 = 42.0;
pub const DEFAULT_DAYS_UNTIL_DELIVERY: f64 = 2.0;
pub const DEFAULT_BACKUP_MULTIPLIER: f64 = 0.2;
pub const DEFAULT_STOCK_POUNDS: f64 = 10.0;
pub const DEFAULT_TRAYS: f64 = 3.0;
pub const DEFAULT_TRAY_WEIGHT: f64 = 14.0;

// ─────────────────────────────────────────────────────────────────────────────
// Preset pick lists for the interactive calculator
// ─────────────────────────────────────────────────────────────────────────────

pub const PRESET_DAILY_USAGE: [f64; 10] =
    [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];

pub const PRESET_DAYS_UNTIL_DELIVERY: [f64; 10] =
    [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 14.0, 21.0, 30.0];

pub const PRESET_BACKUP_MULTIPLIER: [f64; 9] =
    [0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5];

pub const PRESET_STOCK_POUNDS: [f64; 10] =
    [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0];

pub const PRESET_TRAYS: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

pub const PRESET_TRAY_WEIGHT: [f64; 10] =
    [5.0, 10.0, 14.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0];
