//! Render tests using RenderHarness

use pokedex::{
    components::{
        Banner, BannerProps, Component, EMPTY_MESSAGE, PokedexView, PokedexViewProps,
    },
    state::{AppState, FocusArea, Pokemon, PokemonId},
};
use tui_dispatch::testing::*;

fn pokemon(id: u64, name: &str, pokemon_type: &str, level: u32) -> Pokemon {
    Pokemon {
        id: PokemonId::Number(id),
        name: name.into(),
        nickname: None,
        pokemon_type: pokemon_type.into(),
        level,
        evolution_line: None,
    }
}

fn render_view(state: &AppState) -> String {
    let mut render = RenderHarness::new(100, 30);
    let mut view = PokedexView::new();

    render.render_to_string_plain(|frame| {
        let props = PokedexViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_empty_collection() {
    let output = render_view(&AppState::default());

    assert!(output.contains(EMPTY_MESSAGE), "Empty message:\n{output}");
    assert!(output.contains("0 Pokémon caught"), "Summary line:\n{output}");
    assert!(output.contains("Add Pokémon"), "Form title:\n{output}");
    assert!(output.contains("My Pokémon"), "List title:\n{output}");
}

#[test]
fn test_render_fire_entry() {
    let state = AppState::with_pokemon(vec![pokemon(4, "Charmander", "Fire", 9)]);

    let output = render_view(&state);

    assert!(output.contains("Charmander (Level 9)"), "List row:\n{output}");
    assert!(output.contains("Strong against: Grass, Ice, Bug, Steel"), "{output}");
    assert!(output.contains("Weak against: Water, Rock, Ground"), "{output}");
}

#[test]
fn test_render_unlisted_type_has_no_matchups() {
    let state = AppState::with_pokemon(vec![pokemon(150, "Mewtwo", "Psychic", 70)]);

    let output = render_view(&state);

    assert!(output.contains("Mewtwo (Level 70)  Psychic"), "{output}");
    assert!(!output.contains("Strong against"), "{output}");
    assert!(!output.contains("Weak against"), "{output}");
}

#[test]
fn test_render_every_entry_shows_matchups() {
    let mut squirtle = pokemon(7, "Squirtle", "Water", 6);
    squirtle.evolution_line = Some("Squirtle -> Wartortle".into());
    let state = AppState::with_pokemon(vec![pokemon(1, "Bulbasaur", "Grass", 5), squirtle]);

    let output = render_view(&state);

    // Grass entry, not selected-only
    assert!(output.contains("Strong against: Water, Rock, Ground"), "{output}");
    assert!(output.contains("Weak against: Fire, Ice, Bug, Flying"), "{output}");
    // Water entry
    assert!(output.contains("Evolution: Squirtle -> Wartortle"), "{output}");
    assert!(output.contains("Strong against: Fire, Rock, Ground"), "{output}");
    assert!(output.contains("Weak against: Electric, Grass"), "{output}");
    assert!(output.contains("2 Pokémon caught"), "{output}");
}

#[test]
fn test_render_submit_hint() {
    let state = AppState {
        focus: FocusArea::Form,
        draft_hint: Some("Name is required".into()),
        ..Default::default()
    };

    let output = render_view(&state);

    assert!(output.contains("Name is required"), "{output}");
}

#[test]
fn test_status_hints_follow_focus() {
    let list_output = render_view(&AppState::default());
    assert!(list_output.contains("level up"), "{list_output}");

    let form_output = render_view(&AppState {
        focus: FocusArea::Form,
        ..Default::default()
    });
    assert!(!form_output.contains("level up"), "{form_output}");
    assert_ne!(list_output, form_output);
}

#[test]
fn test_banner_shows_syncing_while_busy() {
    let mut render = RenderHarness::new(80, 6);
    let mut banner = Banner;

    let output = render.render_to_string_plain(|frame| {
        banner.render(
            frame,
            frame.area(),
            BannerProps {
                count: 3,
                is_busy: true,
                is_animating: true,
                tick_count: 5,
            },
        );
    });

    assert!(output.contains("3 Pokémon caught"), "{output}");
    assert!(output.contains("syncing"), "{output}");
}
