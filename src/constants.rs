//! DOM ids and asset defaults for the web front-end.

// Streamed when the page declares no `[data-part]` tracks.
pub const DEFAULT_TRACK_NAME: &str = "main";
pub const DEFAULT_TRACK_URL: &str = "https://ia800505.us.archive.org/14/items/lebanon-real-estate-tokenization-bypasses-banks/Lebanon_Real_Estate_Tokenization_Bypasses_Banks.mp3";

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const PLAY_BUTTON_ID: &str = "playBtn";
pub const RESTART_BUTTON_ID: &str = "restartBtn";
pub const PROGRESS_BAR_ID: &str = "progressBar";
pub const VOLUME_SLIDER_ID: &str = "volSlider";
pub const CURRENT_TIME_ID: &str = "currentTime";
pub const TOTAL_TIME_ID: &str = "totalTime";

// Track buttons carry `data-part="<name>"` and optionally `data-src="<url>"`.
pub const PART_SELECTOR: &str = "[data-part]";
pub const PART_ATTR: &str = "data-part";
pub const SRC_ATTR: &str = "data-src";

// CSS classes
pub const PLAY_ACTIVE_CLASS: &str = "main-play-active";
pub const PART_ACTIVE_CLASS: &str = "active-part";
