/// DOM contract between the page and the engine.
///
/// The host markup provides these ids and classes; keeping them here keeps
/// string literals out of the wiring code.
// Canvases
pub const INTRO_CANVAS_ID: &str = "intro-canvas";
pub const TRAIL_CANVAS_ID: &str = "trail-canvas";

// Data attributes on the intro canvas
pub const LOGO_ATTR: &str = "data-logo";
pub const CAPTION_ATTR: &str = "data-caption";

// Host elements toggled by the intro
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const APP_ROOT_ID: &str = "app-root";
pub const SCROLL_HANDLE_ID: &str = "scroll-handle";

// Classes the host styles
pub const FADE_OUT_CLASS: &str = "fade-out";
pub const HIDDEN_CLASS: &str = "hidden";

// Fired on `window` once the main view is showing
pub const READY_EVENT: &str = "sparkfall-ready";

// Caption styling on the intro canvas
pub const CAPTION_FONT: &str = "700 12px system-ui, sans-serif";
pub const CAPTION_COLOR: &str = "#a1a1aa";
