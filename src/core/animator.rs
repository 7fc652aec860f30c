//=========================================================================
// Starfield Animator
//
// Owns the star collection and renders one frame per display refresh.
//
// Frame pipeline:
// ```text
//   frame_tick(canvas)
//     ├─ 1. translucent overlay over the previous frame (trail)
//     └─ for each star
//          ├─ 2. advance depth, recycle in place when exhausted
//          ├─ 3. perspective projection + apparent size
//          ├─ 4. cull if outside the viewport (still updated)
//          └─ 5. draw; glow only above the size threshold
// ```
//
// Scheduling the next frame is the caller's job (see `platform`).
//
//=========================================================================

//=== External Crates =====================================================
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Imports ====================================================
use super::{StarfieldSettings, Star, Viewport};
use crate::render::{Canvas, Rgba};

//=== FrameStats ==========================================================

/// Per-frame counters returned by [`StarfieldAnimator::frame_tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Stars drawn this frame.
    pub drawn: usize,
    /// Stars updated but projected outside the viewport.
    pub culled: usize,
    /// Stars whose depth ran out and were recycled.
    pub recycled: usize,
    /// Drawn stars that received a glow.
    pub glowing: usize,
}

//=== StarfieldAnimator ===================================================

/// Parallax starfield with fading trails.
///
/// # Examples
///
/// ```
/// use starfield::core::{StarfieldAnimator, StarfieldSettings, Viewport};
/// use starfield::render::PixelCanvas;
///
/// let settings = StarfieldSettings { seed: Some(7), ..Default::default() };
/// let mut animator = StarfieldAnimator::new(settings);
/// let mut canvas = PixelCanvas::new(320, 200);
///
/// animator.initialize(Viewport::new(320.0, 200.0));
/// let stats = animator.frame_tick(&mut canvas);
///
/// assert_eq!(stats.drawn + stats.culled, animator.stars().len());
/// ```
pub struct StarfieldAnimator<R: Rng = StdRng> {
    settings: StarfieldSettings,
    viewport: Viewport,
    stars: Vec<Star>,
    rng: R,
    frames: u64,
}

impl StarfieldAnimator<StdRng> {
    /// Creates an animator seeded from `settings.seed`, or from the OS
    /// when no seed is set.
    ///
    /// The field stays empty until [`initialize`](Self::initialize).
    ///
    /// # Panics
    ///
    /// Panics if `settings` fail [`StarfieldSettings::validate`].
    pub fn new(settings: StarfieldSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(settings, rng)
    }
}

impl<R: Rng> StarfieldAnimator<R> {
    //--- Construction -----------------------------------------------------

    /// Creates an animator drawing randomness from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `settings` fail [`StarfieldSettings::validate`].
    pub fn with_rng(settings: StarfieldSettings, rng: R) -> Self {
        if let Err(invalid) = settings.validate() {
            panic!("Invalid starfield settings: {}", invalid);
        }

        Self {
            stars: Vec::with_capacity(settings.star_count),
            settings,
            viewport: Viewport::new(0.0, 0.0),
            rng,
            frames: 0,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Records the viewport and populates a fresh field of stars.
    ///
    /// A degenerate viewport leaves the field empty until a valid
    /// [`on_resize`](Self::on_resize).
    pub fn initialize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();

        info!(
            target: "starfield::animator",
            "Starfield initialized: {} stars in {}x{}",
            self.stars.len(),
            viewport.width,
            viewport.height
        );
    }

    /// Adopts a new viewport and replaces every star.
    ///
    /// Degenerate viewports (minimized windows) are ignored and the current
    /// field is kept. Returns whether the resize was applied.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_degenerate() {
            debug!(
                target: "starfield::animator",
                "Ignoring resize to degenerate viewport {}x{}",
                viewport.width,
                viewport.height
            );
            return false;
        }

        self.viewport = viewport;
        self.populate();

        debug!(
            target: "starfield::animator",
            "Viewport resized to {}x{}, field regenerated",
            viewport.width,
            viewport.height
        );
        true
    }

    //--- Frame ------------------------------------------------------------

    /// Updates every star and draws the frame onto `canvas`.
    ///
    /// The canvas is never cleared: the overlay only dims what was drawn
    /// before, which is what leaves the trails.
    pub fn frame_tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> FrameStats {
        let mut stats = FrameStats::default();
        let viewport = self.viewport;
        let settings = &self.settings;
        let step = settings.depth_step();

        //--- 1. Trail overlay ----------------------------------------------
        canvas.clear_shadow();
        canvas.set_fill_style(settings.trail());
        canvas.fill_rect(0.0, 0.0, viewport.width, viewport.height);

        for star in &mut self.stars {
            //--- 2. Advance / recycle --------------------------------------
            if star.update(step, &mut self.rng, viewport, &settings.palette) {
                stats.recycled += 1;
            }

            //--- 3. Project ------------------------------------------------
            let projection = star.project(viewport);

            //--- 4. Cull ---------------------------------------------------
            if !projection.is_visible(viewport) {
                stats.culled += 1;
                continue;
            }

            //--- 5. Draw ---------------------------------------------------
            if projection.glows(settings.glow_threshold) {
                canvas.set_shadow(settings.glow_blur, star.color);
                stats.glowing += 1;
            } else {
                canvas.clear_shadow();
            }

            canvas.set_fill_style(Rgba::opaque(star.color));
            canvas.fill_circle(projection.x, projection.y, projection.size);
            stats.drawn += 1;
        }

        self.frames += 1;
        trace!(
            target: "starfield::animator",
            "Frame {}: drawn={} culled={} recycled={} glowing={}",
            self.frames,
            stats.drawn,
            stats.culled,
            stats.recycled,
            stats.glowing
        );

        stats
    }

    //--- Accessors --------------------------------------------------------

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &StarfieldSettings {
        &self.settings
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    //--- Internal Helpers -------------------------------------------------

    /// Drops the current field and spawns `star_count` new stars.
    fn populate(&mut self) {
        self.stars.clear();

        if self.viewport.is_degenerate() {
            return;
        }

        let viewport = self.viewport;
        let palette = &self.settings.palette;
        let rng = &mut self.rng;
        self.stars
            .extend((0..self.settings.star_count).map(|_| Star::spawn(&mut *rng, viewport, palette)));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PixelCanvas, Rgb};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    //--- Recording Canvas ------------------------------------------------
    //
    // Captures draw calls together with the shadow state in effect, so
    // tests can assert on what was drawn without rasterizing.
    //
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Rect { style: Rgba, width: f32, height: f32 },
        Circle { x: f32, y: f32, radius: f32, color: Rgb, glow: Option<(f32, Rgb)> },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        fill: Option<Rgba>,
        shadow: Option<(f32, Rgb)>,
        calls: Vec<Call>,
    }

    impl RecordingCanvas {
        fn circles(&self) -> impl Iterator<Item = &Call> {
            self.calls.iter().filter(|c| matches!(c, Call::Circle { .. }))
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn set_fill_style(&mut self, style: Rgba) {
            self.fill = Some(style);
        }

        fn set_shadow(&mut self, blur: f32, color: Rgb) {
            self.shadow = (blur > 0.0).then_some((blur, color));
        }

        fn fill_rect(&mut self, _x: f32, _y: f32, width: f32, height: f32) {
            let style = self.fill.expect("fill style set before rect");
            self.calls.push(Call::Rect { style, width, height });
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
            let color = self.fill.expect("fill style set before circle").rgb;
            self.calls.push(Call::Circle { x, y, radius, color, glow: self.shadow });
        }
    }

    fn seeded(star_count: usize, seed: u64) -> StarfieldAnimator {
        StarfieldAnimator::new(StarfieldSettings {
            star_count,
            seed: Some(seed),
            ..Default::default()
        })
    }

    fn single_star(star: Star) -> StarfieldAnimator {
        let mut animator = seeded(1, 0);
        animator.initialize(VIEWPORT);
        animator.stars[0] = star;
        animator
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn new_animator_is_empty() {
        let animator = seeded(10, 1);
        assert!(animator.stars().is_empty());
        assert_eq!(animator.frame_count(), 0);
    }

    #[test]
    fn initialize_populates_star_count() {
        let mut animator = seeded(800, 1);
        animator.initialize(VIEWPORT);

        assert_eq!(animator.stars().len(), 800);
        assert_eq!(animator.viewport(), VIEWPORT);
        for star in animator.stars() {
            assert!(star.z > 0.0 && star.z <= VIEWPORT.far_bound());
        }
    }

    #[test]
    fn initialize_with_degenerate_viewport_draws_nothing() {
        let mut animator = seeded(50, 1);
        let mut canvas = RecordingCanvas::default();

        animator.initialize(Viewport::new(0.0, 0.0));
        let stats = animator.frame_tick(&mut canvas);

        assert!(animator.stars().is_empty());
        assert_eq!(stats, FrameStats::default());
        assert_eq!(canvas.circles().count(), 0);
    }

    #[test]
    fn resize_regenerates_full_field() {
        let mut animator = seeded(300, 2);
        animator.initialize(VIEWPORT);
        let before = animator.stars().to_vec();

        let small = Viewport::new(100.0, 50.0);
        assert!(animator.on_resize(small));

        assert_eq!(animator.stars().len(), 300);
        assert_eq!(animator.viewport(), small);
        for star in animator.stars() {
            assert!(star.x >= -small.width && star.x < small.width);
            assert!(star.y >= -small.height && star.y < small.height);
            assert!(star.z > 0.0 && star.z <= small.far_bound());
            assert!(!before.contains(star), "star survived the resize: {star:?}");
        }
    }

    #[test]
    fn degenerate_resize_keeps_field() {
        let mut animator = seeded(20, 3);
        animator.initialize(VIEWPORT);
        let before = animator.stars().to_vec();

        assert!(!animator.on_resize(Viewport::new(0.0, 600.0)));

        assert_eq!(animator.stars(), &before[..]);
        assert_eq!(animator.viewport(), VIEWPORT);
    }

    #[test]
    fn resize_recovers_from_degenerate_initialize() {
        let mut animator = seeded(20, 3);
        animator.initialize(Viewport::new(0.0, 0.0));

        assert!(animator.on_resize(VIEWPORT));
        assert_eq!(animator.stars().len(), 20);
    }

    //=====================================================================
    // Frame
    //=====================================================================

    #[test]
    fn frame_starts_with_translucent_overlay() {
        let mut animator = seeded(5, 4);
        let mut canvas = RecordingCanvas::default();
        animator.initialize(VIEWPORT);

        animator.frame_tick(&mut canvas);

        assert_eq!(
            canvas.calls.first(),
            Some(&Call::Rect {
                style: Rgb::new(5, 5, 5).with_alpha(0.2),
                width: 800.0,
                height: 600.0,
            })
        );
    }

    #[test]
    fn reference_star_is_drawn_without_glow() {
        // Projects to (600, 450) with apparent size 1.0 after one tick at z=401.
        let mut animator = single_star(Star {
            x: 100.0,
            y: 100.0,
            z: 401.0,
            size: 1.0,
            color: Rgb::WHITE,
        });
        let mut canvas = RecordingCanvas::default();

        let stats = animator.frame_tick(&mut canvas);

        assert_eq!(animator.stars()[0].z, 400.0);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.glowing, 0);
        assert_eq!(
            canvas.circles().next(),
            Some(&Call::Circle { x: 600.0, y: 450.0, radius: 1.0, color: Rgb::WHITE, glow: None })
        );
    }

    #[test]
    fn large_star_glows_in_its_own_color() {
        let violet = Rgb::new(0x8b, 0x5c, 0xf6);
        let mut animator = single_star(Star { x: 1.0, y: 1.0, z: 101.0, size: 1.9, color: violet });
        let mut canvas = RecordingCanvas::default();

        let stats = animator.frame_tick(&mut canvas);

        // (1 - 100/800) * 1.9 * 2 = 3.325
        assert_eq!(stats.glowing, 1);
        let first = canvas.circles().next().cloned();
        match first {
            Some(Call::Circle { glow, color, .. }) => {
                assert_eq!(color, violet);
                assert_eq!(glow, Some((10.0, violet)));
            }
            other => panic!("expected a glowing circle, got {other:?}"),
        }
    }

    #[test]
    fn glow_applied_iff_above_threshold() {
        let mut animator = seeded(800, 5);
        let mut canvas = RecordingCanvas::default();
        animator.initialize(VIEWPORT);

        let mut glowing = 0;
        for _ in 0..200 {
            canvas.calls.clear();
            let stats = animator.frame_tick(&mut canvas);
            glowing += stats.glowing;

            for call in canvas.circles() {
                if let Call::Circle { radius, glow, .. } = call {
                    assert_eq!(glow.is_some(), *radius > 1.5, "radius {radius}, glow {glow:?}");
                }
            }
        }
        assert!(glowing > 0, "some star should have glowed in 200 frames");
    }

    #[test]
    fn offscreen_stars_are_updated_but_not_drawn() {
        let mut animator = single_star(Star {
            x: -700.0,
            y: 0.0,
            z: 101.0,
            size: 1.0,
            color: Rgb::WHITE,
        });
        let mut canvas = RecordingCanvas::default();

        let stats = animator.frame_tick(&mut canvas);

        assert_eq!(stats.culled, 1);
        assert_eq!(stats.drawn, 0);
        assert_eq!(canvas.circles().count(), 0);
        assert_eq!(animator.stars()[0].z, 100.0);
    }

    #[test]
    fn depth_invariant_holds_across_many_frames() {
        let mut animator = seeded(200, 6);
        let mut canvas = RecordingCanvas::default();
        animator.initialize(VIEWPORT);

        let mut recycled = 0;
        for _ in 0..1000 {
            canvas.calls.clear();
            let stats = animator.frame_tick(&mut canvas);
            recycled += stats.recycled;

            assert_eq!(stats.drawn + stats.culled, 200);
            for star in animator.stars() {
                assert!(star.z > 0.0 && star.z <= VIEWPORT.far_bound(), "z = {}", star.z);
            }
        }

        // Every star crosses the near bound at least once in 1000 unit steps.
        assert!(recycled >= 200);
        assert_eq!(animator.frame_count(), 1000);
    }

    #[test]
    #[should_panic(expected = "Invalid starfield settings: `speed`")]
    fn negative_speed_is_rejected() {
        StarfieldAnimator::new(StarfieldSettings { speed: -0.05, ..Default::default() });
    }

    #[test]
    #[should_panic(expected = "Invalid starfield settings: `speed`")]
    fn nan_speed_is_rejected() {
        StarfieldAnimator::new(StarfieldSettings { speed: f32::NAN, ..Default::default() });
    }

    #[test]
    #[should_panic(expected = "Invalid starfield settings: `speed_scale`")]
    fn negative_speed_scale_is_rejected_with_custom_rng() {
        let settings = StarfieldSettings { speed_scale: -20.0, ..Default::default() };
        StarfieldAnimator::with_rng(settings, StdRng::seed_from_u64(1));
    }

    #[test]
    fn recycled_star_restarts_at_far_bound() {
        let mut animator = single_star(Star { x: 1.0, y: 1.0, z: 1.0, size: 1.0, color: Rgb::WHITE });
        let mut canvas = RecordingCanvas::default();

        let stats = animator.frame_tick(&mut canvas);

        assert_eq!(stats.recycled, 1);
        assert_eq!(animator.stars()[0].z, VIEWPORT.far_bound());
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = seeded(50, 42);
        let mut b = seeded(50, 42);
        a.initialize(VIEWPORT);
        b.initialize(VIEWPORT);

        assert_eq!(a.stars(), b.stars());
    }

    //=====================================================================
    // Trails
    //=====================================================================

    #[test]
    fn trails_fade_instead_of_clearing() {
        let mut animator = seeded(0, 7);
        let mut canvas = PixelCanvas::new(800, 600);
        animator.initialize(VIEWPORT);

        canvas.set_fill_style(Rgba::opaque(Rgb::WHITE));
        canvas.fill_circle(400.0, 300.0, 3.0);

        let mut previous = canvas.pixel(400, 300).unwrap().r;
        assert_eq!(previous, 255);

        for frame in 0..5 {
            animator.frame_tick(&mut canvas);
            let current = canvas.pixel(400, 300).unwrap().r;
            assert!(current < previous, "frame {frame}: {current} !< {previous}");
            assert!(current > 5, "frame {frame}: trail cleared too early");
            previous = current;
        }
    }
}
