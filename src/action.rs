//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Pokemon, PokemonId};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Pokemon category =====
    /// Intent: refetch the whole collection
    PokemonFetch,

    /// Result: collection loaded
    PokemonDidLoad(Vec<Pokemon>),

    /// Result: list request failed (logged, list kept)
    PokemonDidError(String),

    /// Intent: bump the level of a record by one
    PokemonLevelUp(PokemonId),

    /// Result: update finished
    PokemonDidLevelUp(PokemonId),

    /// Result: update failed
    PokemonLevelUpDidError { id: PokemonId, error: String },

    /// Intent: delete a record
    PokemonRelease(PokemonId),

    /// Result: delete finished
    PokemonDidRelease(PokemonId),

    /// Result: delete failed
    PokemonReleaseDidError { id: PokemonId, error: String },

    /// Result: create finished (record present when the server echoed it)
    PokemonDidCreate(Option<Pokemon>),

    /// Result: create failed
    PokemonCreateDidError(String),

    // ===== Draft category =====
    /// Text of the focused form field changed
    DraftInput(String),

    /// Move input focus to the next form field
    DraftFieldNext,

    /// Move input focus to the previous form field
    DraftFieldPrev,

    /// Submit the form (create request)
    DraftSubmit,

    // ===== List category =====
    /// Select a row by index
    ListSelect(usize),

    // ===== UI category =====
    /// Put keyboard focus on the form
    UiFocusForm,

    /// Put keyboard focus on the list
    UiFocusList,

    /// Force a re-render (cursor movement etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the banner animation
    Tick,

    /// Exit the application
    Quit,
}
