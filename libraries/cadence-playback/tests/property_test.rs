//! Property-based tests for the playback controller
//!
//! Uses proptest to verify state invariants across random operation
//! sequences and arbitrary inputs.

use cadence_core::TrackId;
use cadence_playback::{
    FakeMediaResource, MediaEvent, PlaybackConfig, PlaybackController,
};
use proptest::prelude::*;

// ===== Helpers =====

fn setup() -> (PlaybackController<FakeMediaResource>, FakeMediaResource) {
    let audio = FakeMediaResource::new();
    let controller = PlaybackController::new(audio.clone(), PlaybackConfig::default());
    (controller, audio)
}

#[derive(Debug, Clone)]
enum Op {
    Load(u8),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    ToggleMute,
    Duration(f64),
    Position(f64),
    Ready,
    Ended,
    ResolvePlay,
    RejectPlay,
    Pump,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4).prop_map(Op::Load),
        Just(Op::Play),
        Just(Op::Pause),
        (-100.0f64..1000.0).prop_map(Op::Seek),
        (-1.0f64..2.0).prop_map(Op::SetVolume),
        Just(Op::ToggleMute),
        (0.0f64..600.0).prop_map(Op::Duration),
        (0.0f64..900.0).prop_map(Op::Position),
        Just(Op::Ready),
        Just(Op::Ended),
        Just(Op::ResolvePlay),
        Just(Op::RejectPlay),
        Just(Op::Pump),
    ]
}

fn run(controller: &mut PlaybackController<FakeMediaResource>, audio: &FakeMediaResource, op: Op) {
    match op {
        Op::Load(n) => {
            let id = format!("t{}", n);
            controller
                .load_track(TrackId::new(id.clone()), &format!("http://host/{}.mp3", id))
                .unwrap();
        }
        Op::Play => {
            let _ = controller.play();
        }
        Op::Pause => controller.pause(),
        Op::Seek(s) => {
            let _ = controller.seek(s);
        }
        Op::SetVolume(v) => controller.set_volume(v),
        Op::ToggleMute => controller.toggle_mute(),
        Op::Duration(d) => audio.fire(MediaEvent::DurationKnown(d)),
        Op::Position(p) => audio.fire(MediaEvent::PositionAdvanced(p)),
        Op::Ready => audio.fire(MediaEvent::ReadyToPlay),
        Op::Ended => audio.fire(MediaEvent::Ended),
        Op::ResolvePlay => {
            audio.resolve_next_play();
        }
        Op::RejectPlay => {
            audio.reject_next_play("NotAllowedError");
        }
        Op::Pump => {
            controller.process_events();
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: Stored volume always stays within [0, 1]
    #[test]
    fn volume_always_in_range(levels in prop::collection::vec(-10.0f64..10.0, 1..30)) {
        let (mut controller, audio) = setup();

        for level in levels {
            controller.set_volume(level);
            let volume = controller.state().volume;
            prop_assert!((0.0..=1.0).contains(&volume));
            prop_assert!((0.0..=1.0).contains(&audio.volume()));
        }
    }

    /// Property: Toggling mute twice restores the applied level exactly
    #[test]
    fn mute_round_trip_restores_volume(level in 0.0f64..=1.0, muted_first in any::<bool>()) {
        let (mut controller, audio) = setup();
        controller.set_volume(level);
        if muted_first {
            controller.toggle_mute();
            controller.toggle_mute();
        }
        let before = controller.snapshot();

        controller.toggle_mute();
        prop_assert_eq!(audio.volume(), 0.0);
        controller.toggle_mute();

        prop_assert_eq!(controller.snapshot(), before);
        prop_assert_eq!(audio.volume(), level);
    }

    /// Property: Seek always lands inside [0, duration]
    #[test]
    fn seek_clamped_to_duration(duration in 0.0f64..600.0, target in -1000.0f64..2000.0) {
        let (mut controller, audio) = setup();
        controller.load_track(TrackId::new("t"), "http://host/t.mp3").unwrap();
        audio.finish_loading(duration);
        controller.process_events();

        controller.seek(target).unwrap();

        let position = controller.state().position_seconds;
        prop_assert!(position >= 0.0);
        prop_assert!(position <= duration);
        prop_assert_eq!(audio.position(), position);
    }

    /// Property: Invariants hold after any sequence of operations and events
    #[test]
    fn state_invariants_hold(ops in prop::collection::vec(arbitrary_op(), 1..80)) {
        let (mut controller, audio) = setup();

        for op in ops {
            run(&mut controller, &audio, op);

            let state = controller.state();
            prop_assert!(state.position_seconds >= 0.0);
            prop_assert!(state.duration_seconds >= 0.0);
            if state.duration_seconds > 0.0 {
                prop_assert!(state.position_seconds <= state.duration_seconds);
            }
            prop_assert!((0.0..=1.0).contains(&state.volume));
            if state.is_loading {
                prop_assert!(state.current_track_id.is_some());
            }
            if state.current_track_id.is_none() {
                prop_assert!(!state.is_playing);
            }
            prop_assert!((0.0..=100.0).contains(&state.progress_percent()));
        }
    }

    /// Property: After any number of switches only the last track is reflected
    #[test]
    fn last_load_wins(tracks in prop::collection::vec(0u8..10, 2..10), resolve_all in any::<bool>()) {
        let (mut controller, audio) = setup();

        for n in &tracks {
            let id = format!("t{}", n);
            controller
                .load_track(TrackId::new(id.clone()), &format!("http://host/{}.mp3", id))
                .unwrap();
        }

        // Settle every outstanding request except the newest one
        for _ in 1..tracks.len() {
            if resolve_all {
                audio.resolve_next_play();
            } else {
                audio.reject_next_play("AbortError");
            }
        }
        controller.process_events();

        let last = format!("t{}", tracks[tracks.len() - 1]);
        let state = controller.state();
        prop_assert_eq!(state.current_track_id.as_ref().map(TrackId::as_str), Some(last.as_str()));
        prop_assert!(!state.is_playing);
        prop_assert!(state.is_loading);
        prop_assert_eq!(audio.pending_play_count(), 1);
    }
}
