// --- Game Constants ---
pub const TICKS_PER_SECOND: u64 = 60;

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 4;
pub const HUD_HEIGHT: u16 = 2; // Lines reserved above the play field
pub const FIELD_MARGIN: u16 = 2; // Cells around the play field

pub const INIT_PLAYER_LIFE: u32 = 3;
pub const MAX_PLAYER_LIFE: u32 = 6;
pub const MAX_RECOVERY_TIME: u32 = 30; // Ticks of green glow after a recovery
pub const MAX_DAMAGE_TIME: u32 = 5; // Ticks of red flash after an expiry

pub const MIN_LIFETIME: f64 = 100.0;
pub const MAX_LIFETIME: f64 = 400.0;
pub const RECOVERY_LIFETIME: u32 = 400;
pub const MIN_COOL_TIME: f64 = 5.0;
pub const MAX_COOL_TIME: f64 = 60.0;
pub const MIN_BASE_SCORE: u32 = 10;
pub const RECOVERY_SCORE_THRESHOLD: u32 = 100; // Stars needed before recovery items appear

pub const LOG_FILE: &str = "engine-dev-sim.log";
pub const DEBUG_WIDTH: u16 = 80;
pub const DEBUG_HEIGHT: u16 = 24;
pub const DEBUG_FRAMES: u64 = 600;
