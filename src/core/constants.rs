// Grid layout
pub const MANOR_ROWS: usize = 9;
pub const MANOR_COLS: usize = 5;
pub const START_CELL: (usize, usize) = (MANOR_ROWS - 1, MANOR_COLS / 2);
pub const GOAL_CELL: (usize, usize) = (0, MANOR_COLS / 2);
pub const START_ROOM_KEY: &str = "ENTRANCE_HALL";
pub const GOAL_ROOM_KEY: &str = "ANTECHAMBER";

// Starting resources
pub const STARTING_STEPS: u32 = 70;
pub const STARTING_GEMS: u32 = 2;
pub const STARTING_COINS: u32 = 0;
pub const STARTING_KEYS: u32 = 0;
pub const STARTING_DICE: u32 = 0;

// Draft
pub const DRAFT_OPTION_COUNT: usize = 3;

// Rarity weights: w0 = max(0, 1 - FALLOFF * x), w1 = BASE + BASE * bell(x), w2 = FLOOR + SLOPE * x
pub const COMMON_WEIGHT_FALLOFF: f64 = 1.5;
pub const RARE_WEIGHT_BASE: f64 = 0.5;
pub const EPIC_WEIGHT_FLOOR: f64 = 0.2;
pub const EPIC_WEIGHT_SLOPE: f64 = 1.3;

// Passive room payouts
pub const REST_STEP_BONUS: u32 = 3;
pub const GARDEN_GEM_YIELD_MAX: u32 = 2;
pub const PENALTY_STEP_LOSS: u32 = 3;

// Shop prices (coins)
pub const SHOP_KEY_PRICE: u32 = 5;
pub const SHOP_DIE_PRICE: u32 = 8;
pub const SHOP_MEAL_PRICE: u32 = 3;
pub const SHOP_MEAL_STEPS: u32 = 5;

// Interactive object rewards
pub const DIG_SPOT_COINS: u32 = 2;
pub const DIG_SPOT_GEMS: u32 = 1;
pub const CHEST_COINS: u32 = 4;
pub const CHEST_GEMS: u32 = 1;
pub const LOCKER_COINS: u32 = 3;
pub const LOCKER_DICE: u32 = 1;
