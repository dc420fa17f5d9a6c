//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FocusArea, LOADING_ANIM_CYCLE_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Pokemon actions =====
        Action::PokemonFetch => {
            begin_request(state);
            DispatchResult::changed_with(Effect::FetchPokemon)
        }

        Action::PokemonDidLoad(pokemon) => {
            finish_request(state);
            state.replace_pokemon(pokemon);
            DispatchResult::changed()
        }

        // Failures never surface in the UI; the list stays as it was.
        Action::PokemonDidError(_) => {
            finish_request(state);
            DispatchResult::changed()
        }

        Action::PokemonLevelUp(id) => {
            let Some(pokemon) = state.find(&id) else {
                return DispatchResult::unchanged();
            };
            let payload = pokemon.level_up_payload();
            begin_request(state);
            DispatchResult::changed_with(Effect::UpdatePokemon { id, payload })
        }

        Action::PokemonRelease(id) => {
            if state.find(&id).is_none() {
                return DispatchResult::unchanged();
            }
            begin_request(state);
            DispatchResult::changed_with(Effect::ReleasePokemon { id })
        }

        Action::PokemonDidLevelUp(_)
        | Action::PokemonLevelUpDidError { .. }
        | Action::PokemonDidRelease(_)
        | Action::PokemonReleaseDidError { .. } => {
            finish_request(state);
            refetch(state)
        }

        Action::PokemonDidCreate(_) => {
            finish_request(state);
            state.reset_draft();
            refetch(state)
        }

        Action::PokemonCreateDidError(_) => {
            finish_request(state);
            refetch(state)
        }

        // ===== Draft actions =====
        Action::DraftInput(value) => {
            *state.draft.field_mut(state.draft_field) = value;
            state.draft_hint = None;
            DispatchResult::changed()
        }

        Action::DraftFieldNext => {
            state.draft_field = state.draft_field.next();
            DispatchResult::changed()
        }

        Action::DraftFieldPrev => {
            state.draft_field = state.draft_field.prev();
            DispatchResult::changed()
        }

        Action::DraftSubmit => match state.draft.to_payload() {
            Ok(payload) => {
                state.draft_hint = None;
                begin_request(state);
                DispatchResult::changed_with(Effect::CreatePokemon { payload })
            }
            Err(error) => {
                state.draft_hint = Some(error.to_string());
                state.draft_field = Default::default();
                state.focus = FocusArea::Form;
                DispatchResult::changed()
            }
        },

        // ===== List actions =====
        Action::ListSelect(index) => {
            if index < state.pokemon.len() && index != state.selected {
                state.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiFocusForm => set_focus(state, FocusArea::Form),

        Action::UiFocusList => set_focus(state, FocusArea::List),

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn refetch(state: &mut AppState) -> DispatchResult<Effect> {
    begin_request(state);
    DispatchResult::changed_with(Effect::FetchPokemon)
}

fn set_focus(state: &mut AppState, focus: FocusArea) -> DispatchResult<Effect> {
    if state.focus == focus {
        DispatchResult::unchanged()
    } else {
        state.focus = focus;
        DispatchResult::changed()
    }
}

fn begin_request(state: &mut AppState) {
    if !state.loading_anim_active() {
        state.tick_count = 0;
    }
    state.loading_anim_ticks_remaining = 0;
    state.pending_requests = state.pending_requests.saturating_add(1);
}

fn finish_request(state: &mut AppState) {
    state.pending_requests = state.pending_requests.saturating_sub(1);
    if state.pending_requests == 0 {
        state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
    }
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DraftField, Pokemon, PokemonId};

    fn charmander() -> Pokemon {
        Pokemon {
            id: PokemonId::Number(4),
            name: "Charmander".into(),
            nickname: None,
            pokemon_type: "Fire".into(),
            level: 9,
            evolution_line: None,
        }
    }

    #[test]
    fn test_fetch_counts_pending_request() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::PokemonFetch);

        assert!(result.changed);
        assert_eq!(state.pending_requests, 1);
        assert_eq!(result.effects, vec![Effect::FetchPokemon]);
    }

    #[test]
    fn test_did_load_replaces_list() {
        let mut state = AppState {
            pending_requests: 1,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::PokemonDidLoad(vec![charmander()]));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.pokemon, vec![charmander()]);
        assert_eq!(state.pending_requests, 0);
        assert_eq!(state.loading_anim_ticks_remaining, LOADING_ANIM_CYCLE_TICKS);
    }

    #[test]
    fn test_did_error_keeps_list() {
        let mut state = AppState {
            pending_requests: 1,
            ..AppState::with_pokemon(vec![charmander()])
        };

        let result = reducer(&mut state, Action::PokemonDidError("timeout".into()));

        assert!(result.effects.is_empty());
        assert_eq!(state.pokemon, vec![charmander()]);
        assert_eq!(state.pending_requests, 0);
    }

    #[test]
    fn test_level_up_sends_next_level() {
        let mut state = AppState::with_pokemon(vec![charmander()]);

        let result = reducer(&mut state, Action::PokemonLevelUp(PokemonId::Number(4)));

        assert!(result.changed);
        let Effect::UpdatePokemon { id, payload } = &result.effects[0] else {
            panic!("expected update effect, got {:?}", result.effects);
        };
        assert_eq!(id, &PokemonId::Number(4));
        assert_eq!(payload.level, 10);
        assert_eq!(payload.name, "Charmander");
        // No optimistic update
        assert_eq!(state.pokemon[0].level, 9);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut state = AppState::with_pokemon(vec![charmander()]);

        let result = reducer(&mut state, Action::PokemonLevelUp(PokemonId::Number(99)));
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::PokemonRelease(PokemonId::Number(99)));
        assert!(!result.changed);
        assert_eq!(state.pending_requests, 0);
    }

    #[test]
    fn test_mutation_results_refetch() {
        let id = PokemonId::Number(4);
        let outcomes = [
            Action::PokemonDidLevelUp(id.clone()),
            Action::PokemonLevelUpDidError {
                id: id.clone(),
                error: "500".into(),
            },
            Action::PokemonDidRelease(id.clone()),
            Action::PokemonReleaseDidError {
                id,
                error: "404".into(),
            },
            Action::PokemonDidCreate(None),
            Action::PokemonCreateDidError("refused".into()),
        ];

        for action in outcomes {
            let mut state = AppState {
                pending_requests: 1,
                ..Default::default()
            };
            let result = reducer(&mut state, action.clone());
            assert_eq!(result.effects, vec![Effect::FetchPokemon], "{action:?}");
            assert_eq!(state.pending_requests, 1, "{action:?}");
        }
    }

    #[test]
    fn test_submit_normalizes_draft() {
        let mut state = AppState::default();
        state.draft.name = "Vulpix".into();
        state.draft.pokemon_type = "fire".into();
        state.draft.level = "abc".into();

        let result = reducer(&mut state, Action::DraftSubmit);

        let Effect::CreatePokemon { payload } = &result.effects[0] else {
            panic!("expected create effect, got {:?}", result.effects);
        };
        assert_eq!(payload.pokemon_type, "Fire");
        assert_eq!(payload.level, 1);
        // Draft only clears once the server answers
        assert_eq!(state.draft.name, "Vulpix");
    }

    #[test]
    fn test_submit_without_name_sets_hint() {
        let mut state = AppState {
            draft_field: DraftField::Level,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::DraftSubmit);

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.draft_hint.as_deref(), Some("Name is required"));
        assert_eq!(state.draft_field, DraftField::Name);
        assert_eq!(state.pending_requests, 0);
    }

    #[test]
    fn test_create_success_resets_draft_failure_keeps_it() {
        let mut state = AppState::default();
        state.draft.name = "Psyduck".into();
        reducer(&mut state, Action::PokemonCreateDidError("offline".into()));
        assert_eq!(state.draft.name, "Psyduck");

        reducer(&mut state, Action::PokemonDidCreate(None));
        assert!(state.draft.name.is_empty());
        assert_eq!(state.draft_revision, 1);
    }

    #[test]
    fn test_draft_input_targets_focused_field() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DraftFieldNext);
        reducer(&mut state, Action::DraftFieldNext);
        reducer(&mut state, Action::DraftInput("grass".into()));

        assert_eq!(state.draft_field, DraftField::Type);
        assert_eq!(state.draft.pokemon_type, "grass");
        assert!(state.draft.name.is_empty());
    }

    #[test]
    fn test_list_select_bounds() {
        let mut other = charmander();
        other.id = PokemonId::Number(5);
        let mut state = AppState::with_pokemon(vec![charmander(), other]);

        assert!(reducer(&mut state, Action::ListSelect(1)).changed);
        assert!(!reducer(&mut state, Action::ListSelect(1)).changed);
        assert!(!reducer(&mut state, Action::ListSelect(2)).changed);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_tick_only_rerenders_while_animating() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.pending_requests = 1;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);

        state.pending_requests = 0;
        state.loading_anim_ticks_remaining = 1;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.loading_anim_ticks_remaining, 0);
    }

    #[test]
    fn test_focus_actions() {
        let mut state = AppState::default();
        assert_eq!(state.focus, FocusArea::List);

        assert!(reducer(&mut state, Action::UiFocusForm).changed);
        assert_eq!(state.focus, FocusArea::Form);
        assert!(!reducer(&mut state, Action::UiFocusForm).changed);
        assert!(reducer(&mut state, Action::UiFocusList).changed);
        assert_eq!(state.focus, FocusArea::List);
    }
}
