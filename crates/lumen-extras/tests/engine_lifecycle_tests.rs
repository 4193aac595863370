//! End-to-end engine lifecycles: mount, input, ticks, teardown.

use std::collections::HashMap;
use std::time::Duration;

use lumen_core::{FxError, InputEvent, Ndc, Viewport};
use lumen_extras::visual_fx::{
    HighlightState, PlasmaConfig, PlasmaEngine, PlasmaGeometry, TerrainConfig, TerrainEngine,
};
use lumen_runtime::{FrameScheduler, InputHub};
use tracing::Level;

const FRAME: Duration = Duration::from_millis(16);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn small_plasma() -> PlasmaEngine {
    let config = PlasmaConfig::new("plasma-body", false)
        .unwrap()
        .with_geometry(PlasmaGeometry {
            map_size: 128,
            img_size: 64,
            governor: 0.3,
        });
    PlasmaEngine::new(&config).unwrap()
}

fn small_terrain(seed: u64) -> TerrainEngine {
    let config = TerrainConfig {
        width_segments: 10,
        height_segments: 10,
        ..TerrainConfig::default()
    };
    TerrainEngine::with_seed(config, seed).unwrap()
}

// =============================================================================
// Mounting
// =============================================================================

#[test]
fn absent_surface_is_resource_unavailable() {
    let hub = InputHub::new();
    let err = FrameScheduler::mount_with_env(small_plasma(), None, &hub, no_env).err();
    assert!(matches!(err, Some(FxError::ResourceUnavailable(_))));
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn disable_flag_blocks_mount() {
    let env: HashMap<&str, &str> = [("LUMEN_FX_DISABLE", "yes")].into_iter().collect();
    let hub = InputHub::new();
    let result = FrameScheduler::mount_with_env(
        small_terrain(1),
        Viewport::new(800, 600),
        &hub,
        |k| env.get(k).map(|v| (*v).to_string()),
    );
    assert!(matches!(result, Err(FxError::ResourceUnavailable(_))));
}

#[test]
fn mount_applies_initial_viewport() {
    let hub = InputHub::new();
    let sched =
        FrameScheduler::mount_with_env(small_terrain(1), Viewport::new(1200, 600), &hub, no_env)
            .unwrap();
    assert_eq!(sched.engine().camera().aspect, 2.0);
    assert_eq!(hub.subscriber_count(), 1);
}

// =============================================================================
// Plasma
// =============================================================================

#[test]
fn plasma_fades_in_over_scheduled_frames() {
    init_tracing();
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_plasma(), Viewport::new(640, 480), &hub, no_env)
            .unwrap();

    let mut now = Duration::ZERO;
    let first = sched.step(now);
    assert!(first.ticked && first.reschedule);
    assert!(sched.engine().compositor().is_initialized());
    assert_eq!(sched.engine().compositor().frames_composited(), 0);

    for _ in 0..300 {
        now += FRAME;
        assert!(sched.step(now).ticked);
    }
    assert_eq!(sched.engine().compositor().alpha(), 255);
    assert_eq!(sched.engine().pixels().get_pixel(10, 10).a(), 255);
    assert_eq!(sched.degraded_frames(), 0);
}

#[test]
fn plasma_resize_only_records_viewport() {
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_plasma(), Viewport::new(640, 480), &hub, no_env)
            .unwrap();
    hub.dispatch(InputEvent::Resize(Viewport::new(1920, 1080).unwrap()));
    let r = sched.step(Duration::ZERO);
    assert_eq!(r.inputs_applied, 1);
    assert_eq!(sched.engine().viewport(), Viewport::new(1920, 1080));
    assert_eq!(sched.engine().pixels().width(), 64);
}

// =============================================================================
// Terrain
// =============================================================================

#[test]
fn pointer_hit_lights_face_then_fades() {
    init_tracing();
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_terrain(5), Viewport::new(800, 800), &hub, no_env)
            .unwrap();
    let base = sched.engine().config().bg_color;
    let lit = sched.engine().config().raycast_color;

    hub.dispatch(InputEvent::PointerMove(
        Ndc::from_client(400.0, 400.0, 800.0, 800.0).unwrap(),
    ));
    sched.step(Duration::ZERO);
    let face = match sched.engine().highlighter().state() {
        HighlightState::Fading { face, .. } => *face,
        HighlightState::Idle => panic!("center ray should hit the mesh"),
    };
    let corners = sched.engine().mesh().faces()[face];
    for v in corners {
        assert_eq!(sched.engine().mesh().vertex_color(v as usize), lit);
    }

    hub.dispatch(InputEvent::PointerLeave);
    let mut now = Duration::ZERO;
    let mut prev = lit;
    for _ in 0..40 {
        now += FRAME;
        sched.step(now);
        let c = sched.engine().mesh().vertex_color(corners[0] as usize);
        // Base is above the highlight in r and below in g/b.
        assert!(c.r >= prev.r && c.g <= prev.g && c.b <= prev.b);
        prev = c;
    }
    assert_eq!(sched.engine().highlighter().state(), &HighlightState::Idle);
    for v in corners {
        assert_eq!(sched.engine().mesh().vertex_color(v as usize), base);
    }
    assert_eq!(sched.engine().highlighter().hits(), 1);
}

#[test]
fn latest_pointer_wins_between_frames() {
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_terrain(2), Viewport::new(800, 800), &hub, no_env)
            .unwrap();
    hub.dispatch(InputEvent::PointerMove(Ndc::new(0.9, 0.9).unwrap()));
    hub.dispatch(InputEvent::PointerMove(Ndc::new(0.0, 0.1).unwrap()));
    let r = sched.step(Duration::ZERO);
    assert_eq!(r.inputs_applied, 1);
    assert_eq!(
        sched.engine().highlighter().pointer(),
        Ndc::new(0.0, 0.1)
    );
}

#[test]
fn animator_runs_without_pointer() {
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_terrain(3), Viewport::new(800, 800), &hub, no_env)
            .unwrap();
    let original = sched.engine().mesh().original_positions().to_vec();
    sched.step(Duration::ZERO);
    assert_ne!(sched.engine().mesh().positions(), &original[..]);
    assert_eq!(sched.engine().highlighter().hits(), 0);
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn cancel_stops_ticks_and_releases_subscription() {
    init_tracing();
    let hub = InputHub::new();
    let mut sched =
        FrameScheduler::mount_with_env(small_terrain(4), Viewport::new(800, 800), &hub, no_env)
            .unwrap();
    sched.step(Duration::ZERO);
    let counter = sched.engine().animator().counter();

    sched.cancel();
    assert_eq!(hub.subscriber_count(), 0);
    let r = sched.step(FRAME);
    assert!(!r.ticked && !r.reschedule);
    assert_eq!(sched.engine().animator().counter(), counter);
    assert_eq!(hub.dispatch(InputEvent::PointerLeave), 0);
}

#[test]
fn remounting_does_not_duplicate_subscriptions() {
    let hub = InputHub::new();
    for seed in 0..5 {
        let sched = FrameScheduler::mount_with_env(
            small_terrain(seed),
            Viewport::new(800, 800),
            &hub,
            no_env,
        )
        .unwrap();
        assert_eq!(hub.subscriber_count(), 1);
        drop(sched);
    }
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn engines_on_one_hub_are_independent() {
    let hub = InputHub::new();
    let mut plasma =
        FrameScheduler::mount_with_env(small_plasma(), Viewport::new(640, 480), &hub, no_env)
            .unwrap();
    let mut terrain =
        FrameScheduler::mount_with_env(small_terrain(6), Viewport::new(800, 800), &hub, no_env)
            .unwrap();
    assert_eq!(hub.subscriber_count(), 2);

    let token = terrain.cancel_token();
    token.cancel();
    assert!(!terrain.step(Duration::ZERO).ticked);
    assert!(plasma.step(Duration::ZERO).ticked);
    assert_eq!(hub.subscriber_count(), 1);
}
