//! Two six-sample trajectories, delay 50, driven frame by frame.

use pitchview_core::{
    AnimationConfig, AnimationPhase, Sample, TickOutcome, TrajectoryAnimator, TrajectoryRecord,
};
use pitchview_env::SceneRenderer;

fn pitch(name: &str, drift: f64) -> TrajectoryRecord {
    TrajectoryRecord::new(
        name,
        vec![
            Sample::new(0.0, 50.0, 6.0, 0.0),
            Sample::new(10.0 + drift, 40.0, 5.5, 0.1),
            Sample::new(20.0 + drift, 30.0, 5.0, 0.2),
            Sample::new(30.0 + drift, 20.0, 4.5, 0.3),
            Sample::new(40.0 + drift, 10.0, 4.0, 0.4),
            Sample::new(50.0 + drift, 0.0, 3.5, 0.5),
        ],
    )
}

fn scenario() -> TrajectoryAnimator<SceneRenderer> {
    TrajectoryAnimator::from_records(
        &[pitch("main", 0.0), pitch("shadow", 2.0)],
        AnimationConfig::default().with_delay(50),
        SceneRenderer::new(),
    )
}

#[test]
fn test_end_to_end_scenario() {
    let mut anim = scenario();
    assert_eq!(anim.tracked().len(), 2);
    assert!(anim.tracked().iter().all(|t| t.len() == 5));
    assert_eq!(anim.max_usable_index(), Some(4));

    // Frames 1..=50: delay buffer
    for _ in 0..50 {
        assert!(matches!(anim.tick().unwrap(), TickOutcome::Idle { .. }));
    }
    assert_eq!(anim.frame(), 50);
    assert_eq!(anim.phase(), AnimationPhase::Idle);
    assert_eq!(anim.renderer().resident(), 0);

    // Frame 51: index 0
    assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 51, index: 0 });
    let main = anim.tracked()[0].points().to_vec();
    let shadow = anim.tracked()[1].points().to_vec();
    {
        let scene = anim.renderer();
        let path_of = |h| scene.get(h).unwrap().mesh.path.clone();

        assert_eq!(path_of(anim.slots()[0].handle().unwrap()), vec![main[0], main[0]]);
        assert_eq!(path_of(anim.slots()[1].handle().unwrap()), vec![shadow[0], shadow[0]]);
        assert_eq!(
            path_of(anim.connector().unwrap().handle().unwrap()),
            vec![main[0], shadow[0]]
        );
    }

    // Frames 52..=54: indices 1..=3, path length i + 2
    for expected in 1..=3usize {
        let outcome = anim.tick().unwrap();
        assert_eq!(outcome.frame(), 51 + expected as u64);
        assert_eq!(anim.phase(), AnimationPhase::Animating { index: expected });
        assert!(anim.slots().iter().all(|s| s.path_len() == expected + 2));

        let scene = anim.renderer();
        let connector = &scene.get(anim.connector().unwrap().handle().unwrap()).unwrap().mesh;
        assert_eq!(connector.path, vec![main[expected], shadow[expected]]);
    }

    // Frame 55: index 4 = min(lengths) - 1
    let frozen = anim.handles();
    let stats = anim.renderer().stats();
    assert_eq!(anim.tick().unwrap(), TickOutcome::Complete { frame: 55 });

    for frame in 56..=120 {
        assert_eq!(anim.tick().unwrap(), TickOutcome::Complete { frame });
    }
    assert_eq!(anim.handles(), frozen);
    assert_eq!(anim.renderer().stats(), stats);
    assert_eq!(anim.renderer().resident(), 3);
}

#[test]
fn test_unusable_second_record_disables_connector() {
    let mut short = pitch("short", 0.0);
    short.samples.truncate(2);

    let mut anim = TrajectoryAnimator::from_records(
        &[pitch("main", 0.0), short],
        AnimationConfig::default().with_delay(0),
        SceneRenderer::new(),
    );

    assert!(!anim.connector_enabled());
    assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 1, index: 0 });
    assert_eq!(anim.renderer().resident(), 1);
}
