//! Effects - side effects declared by the reducer

use crate::state::{PokemonId, PokemonPayload};

/// Network requests the runtime performs on the reducer's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `GET /api/pokemon`
    FetchPokemon,
    /// `POST /api/pokemon`
    CreatePokemon { payload: PokemonPayload },
    /// `PUT /api/pokemon/{id}`
    UpdatePokemon { id: PokemonId, payload: PokemonPayload },
    /// `DELETE /api/pokemon/{id}`
    ReleasePokemon { id: PokemonId },
}
