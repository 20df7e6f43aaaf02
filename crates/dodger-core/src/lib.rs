pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod simulation;
pub mod snapshot;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::GameEvent;
    use crate::input::FrameInput;
    use crate::simulation::FrameSimulation;

    /// Build a frame input from held buttons.
    pub fn held(left: bool, right: bool, jump: bool) -> FrameInput {
        FrameInput {
            left_held: left,
            right_held: right,
            jump_held: jump,
        }
    }

    /// Run N frames with the same input, returning all accumulated events.
    pub fn run_frames(
        sim: &mut dyn FrameSimulation,
        n: usize,
        input: &FrameInput,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.update(input));
        }
        all_events
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Generic checks every FrameSimulation implementation must pass. Game
    // crates call them from their own tests with a concrete instance.

    /// update() on a live simulation must advance the frame counter.
    pub fn contract_update_advances_frame(sim: &mut dyn FrameSimulation) {
        assert!(!sim.is_game_over(), "contract needs a live simulation");
        let before = sim.frame();
        sim.update(&FrameInput::default());
        assert_eq!(sim.frame(), before + 1, "update must advance the frame");
    }

    /// snapshot() must not change the simulation and must agree with itself.
    pub fn contract_snapshot_is_read_only(sim: &mut dyn FrameSimulation) {
        let a = sim.snapshot();
        let b = sim.snapshot();
        assert_eq!(a, b, "snapshot must be a pure read");
        assert_eq!(a.frame, sim.frame());
        assert_eq!(a.game_over, sim.is_game_over());
    }

    /// Snapshot geometry must stay finite and non-degenerate.
    pub fn contract_snapshot_geometry_valid(sim: &dyn FrameSimulation) {
        let snap = sim.snapshot();
        let boxes = std::iter::once(&snap.player)
            .chain(std::iter::once(&snap.player_hitbox))
            .chain(snap.platforms.iter())
            .chain(snap.bombs.iter())
            .chain(snap.enemies.iter());
        for b in boxes {
            assert!(
                b.x.is_finite() && b.y.is_finite(),
                "position must be finite: {b:?}"
            );
            assert!(
                b.width > 0.0 && b.height > 0.0,
                "size must be positive: {b:?}"
            );
        }
        assert!(snap.camera_x.is_finite());
    }

    /// Once game over is reached, further updates must be no-ops that emit
    /// nothing, and GameOver must have been emitted exactly once.
    pub fn contract_game_over_is_terminal(sim: &mut dyn FrameSimulation, max_frames: usize) {
        let input = held(false, true, true);
        let mut game_over_events = 0;
        for _ in 0..max_frames {
            let events = sim.update(&input);
            game_over_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver))
                .count();
            if sim.is_game_over() {
                break;
            }
        }
        assert!(
            sim.is_game_over(),
            "simulation must reach game over within {max_frames} frames"
        );
        assert_eq!(game_over_events, 1, "GameOver must be emitted exactly once");

        let frozen = sim.snapshot();
        let events = run_frames(sim, 10, &input);
        assert!(events.is_empty(), "no events after game over");
        assert_eq!(sim.snapshot(), frozen, "state must not change after game over");
    }
}
