pub mod banner;
pub mod draft_form;
pub mod pokedex_view;
pub mod pokemon_list;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use banner::{Banner, BannerProps};
pub use draft_form::{DraftForm, DraftFormProps};
pub use pokedex_view::{PokedexView, PokedexViewProps, ViewLayout};
pub use pokemon_list::{EMPTY_MESSAGE, PokemonList, PokemonListProps};

use ratatui::style::Color;

pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 232, 232);
pub(crate) const TEXT_DIM: Color = Color::Rgb(140, 140, 150);
pub(crate) const ACCENT: Color = Color::Rgb(238, 82, 83);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(255, 203, 5);
pub(crate) const PANEL_BG: Color = Color::Rgb(30, 30, 38);

/// Terminal color for a type label in list entries
pub fn type_color(pokemon_type: &str) -> Color {
    match pokemon_type {
        "Fire" => Color::Rgb(240, 128, 48),
        "Water" => Color::Rgb(104, 144, 240),
        "Grass" => Color::Rgb(120, 200, 80),
        "Electric" => Color::Rgb(248, 208, 48),
        "" => TEXT_DIM,
        _ => Color::Rgb(168, 168, 120),
    }
}
