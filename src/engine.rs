//=========================================================================
// Starfield Engine
//
// Main entry point: configures the animator and window, then hands both to
// the platform event loop.
//
// Architecture:
// ```text
//     StarfieldBuilder  ──build()──>  Starfield  ──run()──>  [Event Loop]
//         │                              │
//         ├─ with_star_count()           ├─ stop_handle()  (any thread)
//         ├─ with_speed()                └─ blocks until window closes
//         ├─ with_seed() / with_palette()   or a stop is requested
//         └─ from_config()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::config::{Config, WindowConfig};
use crate::core::control::{control_channel, ControlReceiver};
use crate::core::{StarfieldAnimator, StarfieldSettings, StopHandle};
use crate::platform::Platform;
use crate::render::Palette;
use crate::StarfieldError;

//=== StarfieldBuilder ====================================================

/// Builder for configuring and constructing a [`Starfield`].
///
/// # Default Values
///
/// - **Stars**: 800
/// - **Speed**: 0.05 (one depth unit per frame)
/// - **Window**: 1280x720, titled "Starfield"
/// - **Control channel capacity**: 8 messages
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use starfield::StarfieldBuilder;
///
/// StarfieldBuilder::new().build().run().unwrap();
/// ```
///
/// Advanced configuration:
/// ```no_run
/// use starfield::StarfieldBuilder;
///
/// StarfieldBuilder::new()
///     .with_star_count(1500)      // Denser field
///     .with_speed(0.1)            // Twice as fast
///     .with_seed(42)              // Same field every run
///     .with_window_size(1920, 1080)
///     .build()
///     .run()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct StarfieldBuilder {
    settings: StarfieldSettings,
    window: WindowConfig,
    channel_capacity: usize,
}

impl StarfieldBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: StarfieldSettings::default(),
            window: WindowConfig::default(),
            channel_capacity: 8,
        }
    }

    /// Creates a builder from a loaded configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`Config::validate`]; call it first to
    /// report the problem as an error instead.
    pub fn from_config(config: &Config) -> Self {
        if let Err(invalid) = config.validate() {
            panic!("Invalid config: {}", invalid);
        }

        Self {
            settings: config.starfield.clone(),
            window: config.window.clone(),
            ..Self::new()
        }
    }

    /// Sets the number of stars in the field.
    ///
    /// Default: 800
    ///
    /// # Panics
    ///
    /// Panics if `count == 0`.
    pub fn with_star_count(mut self, count: usize) -> Self {
        assert!(count > 0, "Star count must be positive");
        self.settings.star_count = count;
        self
    }

    /// Sets the base speed. Stars travel `speed * speed_scale` depth units
    /// per frame.
    ///
    /// Default: 0.05
    ///
    /// # Panics
    ///
    /// Panics if `speed` is not a finite positive number.
    pub fn with_speed(mut self, speed: f32) -> Self {
        assert!(
            speed.is_finite() && speed > 0.0,
            "Speed must be positive, got {}",
            speed
        );
        self.settings.speed = speed;
        self
    }

    /// Fixes the RNG seed so every run produces the same field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    /// Sets the colors stars are tinted from.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.settings.palette = palette;
        self
    }

    /// Replaces all starfield settings at once.
    ///
    /// # Panics
    ///
    /// Panics if `settings` fail [`StarfieldSettings::validate`].
    pub fn with_settings(mut self, settings: StarfieldSettings) -> Self {
        if let Err(invalid) = settings.validate() {
            panic!("Invalid starfield settings: {}", invalid);
        }
        self.settings = settings;
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// Default: 1280x720
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the control channel capacity (pending stop requests).
    ///
    /// Default: 8
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the starfield.
    ///
    /// The window is not opened until [`Starfield::run`].
    pub fn build(self) -> Starfield {
        info!(
            "Building starfield ({} stars, speed {}, {}x{} window)",
            self.settings.star_count, self.settings.speed, self.window.width, self.window.height
        );

        let (stop_handle, control) = control_channel(self.channel_capacity);

        Starfield {
            animator: StarfieldAnimator::new(self.settings),
            window: self.window,
            stop_handle,
            control,
        }
    }
}

impl Default for StarfieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Starfield ===========================================================

/// A configured starfield, ready to open its window.
///
/// Create via [`StarfieldBuilder`].
pub struct Starfield {
    animator: StarfieldAnimator,
    window: WindowConfig,
    stop_handle: StopHandle,
    control: ControlReceiver,
}

impl Starfield {
    /// Returns a handle that stops the running loop from any thread.
    ///
    /// Handles obtained before [`run`](Self::run) stay valid while it runs.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Read access to the animator before it is handed to the event loop.
    pub fn animator(&self) -> &StarfieldAnimator {
        &self.animator
    }

    /// Opens the window and animates until it closes or a stop is requested.
    ///
    /// Must be called on the main thread.
    ///
    /// # Errors
    ///
    /// Returns [`StarfieldError::Platform`] if the window, event loop or
    /// presentation surface fails.
    pub fn run(self) -> Result<(), StarfieldError> {
        info!("Starting starfield runtime");

        let platform = Platform::new(self.animator, self.control, self.window);
        platform.run()?;

        info!("Starfield shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TickControl;
    use crate::render::Rgb;

    //=====================================================================
    // StarfieldBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = StarfieldBuilder::new();
        assert_eq!(builder.settings, StarfieldSettings::default());
        assert_eq!(builder.window, WindowConfig::default());
        assert_eq!(builder.channel_capacity, 8);
    }

    #[test]
    fn builder_with_star_count() {
        let builder = StarfieldBuilder::new().with_star_count(120);
        assert_eq!(builder.settings.star_count, 120);
    }

    #[test]
    #[should_panic(expected = "Star count must be positive")]
    fn builder_with_star_count_panics_on_zero() {
        StarfieldBuilder::new().with_star_count(0);
    }

    #[test]
    #[should_panic(expected = "Speed must be positive")]
    fn builder_with_speed_panics_on_negative() {
        StarfieldBuilder::new().with_speed(-0.05);
    }

    #[test]
    #[should_panic(expected = "Speed must be positive")]
    fn builder_with_speed_panics_on_nan() {
        StarfieldBuilder::new().with_speed(f32::NAN);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero() {
        StarfieldBuilder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        StarfieldBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let palette = Palette::new(vec![Rgb::WHITE]).unwrap();
        let builder = StarfieldBuilder::new()
            .with_star_count(10)
            .with_speed(0.1)
            .with_seed(3)
            .with_palette(palette.clone())
            .with_window_size(640, 480)
            .with_title("Backdrop");

        assert_eq!(builder.settings.star_count, 10);
        assert_eq!(builder.settings.speed, 0.1);
        assert_eq!(builder.settings.seed, Some(3));
        assert_eq!(builder.settings.palette, palette);
        assert_eq!((builder.window.width, builder.window.height), (640, 480));
        assert_eq!(builder.window.title, "Backdrop");
    }

    #[test]
    fn builder_from_config() {
        let mut config = Config::default();
        config.starfield.star_count = 64;
        config.window.title = "From config".to_string();

        let builder = StarfieldBuilder::from_config(&config);

        assert_eq!(builder.settings, config.starfield);
        assert_eq!(builder.window, config.window);
        assert_eq!(builder.channel_capacity, 8);
    }

    #[test]
    #[should_panic(expected = "Invalid starfield settings: `speed`")]
    fn builder_with_settings_panics_on_nan_speed() {
        let settings = StarfieldSettings { speed: f32::NAN, ..Default::default() };
        StarfieldBuilder::new().with_settings(settings);
    }

    #[test]
    #[should_panic(expected = "Invalid config: invalid config value `starfield.speed_scale`")]
    fn builder_from_config_panics_on_negative_speed_scale() {
        let mut config = Config::default();
        config.starfield.speed_scale = -20.0;
        StarfieldBuilder::from_config(&config);
    }

    #[test]
    #[should_panic(expected = "Invalid config: invalid config value `window`")]
    fn builder_from_config_panics_on_empty_window() {
        let mut config = Config::default();
        config.window.width = 0;
        StarfieldBuilder::from_config(&config);
    }

    #[test]
    fn build_carries_settings_into_animator() {
        let starfield = StarfieldBuilder::new().with_star_count(33).with_seed(1).build();

        assert_eq!(starfield.animator().settings().star_count, 33);
        assert!(starfield.animator().stars().is_empty(), "field is populated on window creation");
    }

    //=====================================================================
    // Starfield Tests
    //=====================================================================

    #[test]
    fn stop_handle_reaches_control_queue() {
        let starfield = StarfieldBuilder::new().build();

        assert!(starfield.stop_handle().stop());
        assert_eq!(starfield.control.poll(), TickControl::Exit);
    }

    #[test]
    fn stop_handle_fails_after_starfield_dropped() {
        let starfield = StarfieldBuilder::new().build();
        let handle = starfield.stop_handle();
        drop(starfield);

        assert!(!handle.stop());
    }
}
