use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);    // Time between block changes
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);    // Pending sources are abandoned after this
pub const DEFAULT_RENDERER: &str = "fade";

pub const FRAME_INTERVAL: Duration = Duration::from_millis(30);        // Transition tick period
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);       // Floor for repeating timers
pub const MAX_PENDING_EVENTS: usize = 256;                             // Undrained events beyond this drop the oldest

pub const FADE_GAIN: f64 = 0.1;
pub const SLIDE_GAIN: f64 = 0.2;
pub const PROGRESS_FLOOR: f64 = 0.01;                                  // Linear term guaranteeing convergence

pub const RENDER_WIDTH: i32 = 1920;                                    // Width of the window host's render texture
pub const RENDER_HEIGHT: i32 = 1080;                                   // Height of the window host's render texture
pub const FPS: u32 = 60;
