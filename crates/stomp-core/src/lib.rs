pub mod events;
pub mod game_trait;
pub mod input;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::GameEvent;
    use crate::game_trait::{GameConfig, SimGame};
    use crate::input::InputState;

    /// One frame at 60 Hz.
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Input with only the given presses/holds set.
    pub fn held(left: bool, right: bool) -> InputState {
        InputState {
            left,
            right,
            ..Default::default()
        }
    }

    /// Run N frames with the same input, returning all accumulated events.
    pub fn run_game_ticks(
        game: &mut dyn SimGame,
        n: usize,
        dt: f32,
        input: &InputState,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, input));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn SimGame, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // SimGame Contract Tests
    // ================================================================
    // Every SimGame implementation should pass these. Game crates call them
    // from their own #[cfg(test)] modules with a concrete game instance.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn SimGame) {
        game.init(&GameConfig::with_seed(7));
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// apply_input() with valid data followed by update() must change state.
    pub fn contract_apply_input_changes_state(game: &mut dyn SimGame, valid_input: &[u8]) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        game.update(FRAME_DT, &InputState::default());
        assert_game_state_changed(game, &before);
    }

    /// update() with dt>0 must advance state (the clock at minimum).
    pub fn contract_update_advances_time(game: &mut dyn SimGame) {
        let before = game.serialize_state();
        game.update(FRAME_DT, &InputState::default());
        assert_game_state_changed(game, &before);
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn SimGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn SimGame) {
        game.pause();
        let before = game.serialize_state();
        game.update(FRAME_DT, &InputState::default());
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(FRAME_DT, &InputState::default());
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// reset() after some play must leave a session that is not over.
    pub fn contract_reset_restarts_session(game: &mut dyn SimGame, ticks: usize) {
        run_game_ticks(game, ticks, FRAME_DT, &held(false, true));
        game.reset();
        assert!(
            !game.is_session_over(),
            "A freshly reset session must be in progress"
        );
    }
}
