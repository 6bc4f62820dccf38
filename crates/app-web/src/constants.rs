// DOM ids and remote asset locations used by the web frontend.

pub const CANVAS_ID: &str = "app-canvas";
pub const MUSIC_TOGGLE_ID: &str = "music-toggle";
pub const MUSIC_ON_ID: &str = "music-on";
pub const MUSIC_OFF_ID: &str = "music-off";
pub const MIC_BUTTON_ID: &str = "mic-button";
pub const FINAL_MESSAGE_CONTAINER_ID: &str = "final-message-container";
pub const FINAL_MESSAGE_ID: &str = "final-message";
pub const FINAL_SUBLINE_ID: &str = "final-subline";

pub const FINAL_MESSAGE_TEXT: &str = "Happy 18th Birthday My Love \u{2764}\u{fe0f}";
pub const FINAL_SUBLINE_TEXT: &str = "Make a wish";

pub const BACKGROUND_MUSIC_URL: &str = "assets/audio/background_music.mp3";
pub const BLOW_SOUND_URL: &str = "assets/audio/blow.mp3";
pub const CONFETTI_SOUND_URL: &str = "assets/audio/confetti.mp3";
pub const SPARKLE_SOUND_URL: &str = "assets/audio/sparkle.mp3";
pub const AGE_FONT_URL: &str =
    "https://unpkg.com/three@0.160.0/examples/fonts/helvetiker_bold.typeface.json";

pub const BACKGROUND_MUSIC_VOLUME: f32 = 0.3;

// Analyser configuration for blow detection
pub const MIC_FFT_SIZE: u32 = 32;
