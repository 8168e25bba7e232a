//! Constants used throughout the application

/// Number of frames in one observation window
pub const FRAMES_TO_ANALYZE: usize = 8;

/// Largest window size accepted from configuration
pub const MAX_FRAMES_TO_ANALYZE: usize = 1024;

/// Base z-axis sensitivity for nod (chin) tracking
pub const NODDING_SENSITIVITY: f64 = 0.010;

/// Base z-axis sensitivity for shake (side of head) tracking
pub const SHAKING_SENSITIVITY: f64 = 0.018;

/// Maximum vertical spread of the chin for a nod to count as YES
pub const VERTICAL_ADJUSTMENT: f64 = 0.18;

/// Maximum horizontal spread of the side of head for a shake to count as NO
pub const HORIZONTAL_ADJUSTMENT: f64 = 0.1;

/// Per-frame vertical chin speed that counts as a fast frame
pub const EMERGENCY_SPEED_THRESHOLD: f64 = 0.06;

/// Fast frames needed in one window to raise EMERGENCY
pub const EMERGENCY_MIN_SPEED_FRAMES: usize = 3;

/// Face height (top to bottom of head, normalized) at which thresholds are unscaled
pub const REFERENCE_FACE_HEIGHT: f64 = 0.5;

/// Minimum time between two notification attempts
pub const API_COOLDOWN_MS: u64 = 1000;

/// Timeout for a single notification delivery
pub const DISPATCH_TIMEOUT_MS: u64 = 500;

/// Pending deliveries the dispatcher queue holds before dropping
pub const DISPATCH_QUEUE_CAPACITY: usize = 16;

/// Default notification sink
pub const DEFAULT_SINK_URL: &str = "http://127.0.0.1:3000/api";

/// Face-mesh landmark indices
pub const FACE_MESH_CHIN: usize = 199;
pub const FACE_MESH_SIDE_HEAD: usize = 447;
pub const FACE_MESH_TOP_HEAD: usize = 10;
pub const FACE_MESH_BOTTOM_HEAD: usize = 152;
