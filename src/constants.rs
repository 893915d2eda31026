/// DOM hooks shared by the presentation and event wiring.
///
/// Element ids and class names the page markup provides. Missing elements
/// are tolerated: the matching feature is simply not wired.

// Canvas
pub const CANVAS_ID: &str = "scene-canvas";

// Navigation
pub const NAV_HOME_ID: &str = "nav-home";
pub const NAV_SHOP_ID: &str = "nav-shop";
pub const NAV_SCHEDULE_ID: &str = "nav-schedule";
pub const NAV_WORDS_ID: &str = "nav-words";
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";
pub const JUMBOTRON_HOTSPOT_ID: &str = "jumbotron-hotspot";

// Overlays (container id = "<name>-overlay", close button = "<name>-close")
pub const OVERLAY_SUFFIX: &str = "-overlay";
pub const CLOSE_SUFFIX: &str = "-close";
pub const EVENTS_LIST_ID: &str = "schedule-list";
pub const POSTS_LIST_ID: &str = "words-list";

// Hidden content revealed by over-stretching the ball
pub const REVEAL_LAYER_ID: &str = "hidden-layer";
pub const REVEAL_DISMISS_ID: &str = "hidden-layer-close";

// Classes and attributes
pub const VISIBLE_CLASS: &str = "visible";
pub const HOVER_CLASS: &str = "ball-hover";
pub const SECTION_ATTR: &str = "data-section";
pub const SOUND_ATTR: &str = "data-sound";

// Feeds (relative to the page base)
pub const EVENTS_FEED_URL: &str = "events.json";
pub const POSTS_FEED_URL: &str = "posts.json";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Frame dt clamp so a backgrounded tab does not jump animations on return
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
