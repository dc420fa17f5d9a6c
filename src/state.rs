//! Application state - single source of truth

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
///
/// Collection backends hand out either integer keys or opaque string keys,
/// so both shapes are accepted on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PokemonId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokemonId::Number(id) => write!(f, "{id}"),
            PokemonId::Text(id) => f.write_str(id),
        }
    }
}

/// A catalog entry as returned by the collection API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub pokemon_type: String,
    #[serde(default = "default_level", deserialize_with = "lenient_level")]
    pub level: u32,
    #[serde(default)]
    pub evolution_line: Option<String>,
}

impl Pokemon {
    /// Body for a full-record replace with the level bumped by one.
    pub fn level_up_payload(&self) -> PokemonPayload {
        PokemonPayload {
            name: self.name.clone(),
            nickname: self.nickname.clone(),
            pokemon_type: self.pokemon_type.clone(),
            level: self.level.saturating_add(1),
            evolution_line: self.evolution_line.clone(),
        }
    }

    pub fn evolution(&self) -> Option<&str> {
        self.evolution_line
            .as_deref()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// JSON body for create and update requests (the id travels in the path)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonPayload {
    pub name: String,
    pub nickname: Option<String>,
    #[serde(rename = "type")]
    pub pokemon_type: String,
    pub level: u32,
    pub evolution_line: Option<String>,
}

fn default_level() -> u32 {
    1
}

/// Other clients may store `null`, `3.5`, `"7"` or `0`; none of them should
/// fail the whole list. Fractions truncate, anything not positive is 1.
fn lenient_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(level_from_json(&serde_json::Value::deserialize(deserializer)?))
}

fn level_from_json(value: &serde_json::Value) -> u32 {
    let level = match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match level.filter(|level| level.is_finite()).map(f64::trunc) {
        Some(level) if level >= 1.0 => level.min(f64::from(u32::MAX)) as u32,
        _ => default_level(),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Form fields, in tab order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DraftField {
    #[default]
    Name,
    Nickname,
    Type,
    Level,
    EvolutionLine,
}

impl DraftField {
    pub const COUNT: usize = 5;

    pub const ALL: [DraftField; Self::COUNT] = [
        DraftField::Name,
        DraftField::Nickname,
        DraftField::Type,
        DraftField::Level,
        DraftField::EvolutionLine,
    ];

    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_first(self) -> bool {
        self == Self::ALL[0]
    }

    pub fn is_last(self) -> bool {
        self == Self::ALL[Self::ALL.len() - 1]
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Nickname => "Nickname",
            DraftField::Type => "Type",
            DraftField::Level => "Level",
            DraftField::EvolutionLine => "Evolution",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Why a draft could not be submitted
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Name is required")]
    MissingName,
}

/// The "Add Pokémon" form, kept as raw strings until submit
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Draft {
    pub name: String,
    pub nickname: String,
    pub pokemon_type: String,
    pub level: String,
    pub evolution_line: String,
}

impl Draft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Nickname => &self.nickname,
            DraftField::Type => &self.pokemon_type,
            DraftField::Level => &self.level,
            DraftField::EvolutionLine => &self.evolution_line,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Nickname => &mut self.nickname,
            DraftField::Type => &mut self.pokemon_type,
            DraftField::Level => &mut self.level,
            DraftField::EvolutionLine => &mut self.evolution_line,
        }
    }

    /// Build the create body. Normalization happens here and only here.
    pub fn to_payload(&self) -> Result<PokemonPayload, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        Ok(PokemonPayload {
            name: name.to_string(),
            nickname: optional(&self.nickname),
            pokemon_type: normalize_type(&self.pokemon_type),
            level: coerce_level(&self.level),
            evolution_line: optional(&self.evolution_line),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// "fIRE" -> "Fire"
pub fn normalize_type(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Positive integer level; anything else falls back to 1.
pub fn coerce_level(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|level| *level > 0)
        .unwrap_or(1)
}

/// Which pane owns the keyboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FocusArea {
    Form,
    #[default]
    List,
}

/// Animation timing for the banner gradient.
pub const LOADING_ANIM_TICK_MS: u64 = 30;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 40;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Full result of the last successful list request
    #[debug(section = "Collection", label = "Records", debug_fmt)]
    pub pokemon: Vec<Pokemon>,

    /// Index into `pokemon`
    #[debug(section = "Collection", label = "Selected")]
    pub selected: usize,

    /// Requests sent but not yet answered
    #[debug(section = "Collection", label = "In flight")]
    pub pending_requests: u32,

    #[debug(section = "Form", label = "Draft", debug_fmt)]
    pub draft: Draft,

    #[debug(section = "Form", label = "Field", debug_fmt)]
    pub draft_field: DraftField,

    /// Bumped whenever the draft is cleared so inputs drop their cursor state
    #[debug(skip)]
    pub draft_revision: u64,

    /// Local validation hint (never a network error)
    #[debug(section = "Form", label = "Hint", debug_fmt)]
    pub draft_hint: Option<String>,

    #[debug(section = "UI", label = "Focus", debug_fmt)]
    pub focus: FocusArea,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            pokemon: Vec::new(),
            selected: 0,
            pending_requests: 0,
            draft: Draft::default(),
            draft_field: DraftField::default(),
            draft_revision: 0,
            draft_hint: None,
            focus: FocusArea::default(),
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
        }
    }

    pub fn with_pokemon(pokemon: Vec<Pokemon>) -> Self {
        Self {
            pokemon,
            ..Self::new()
        }
    }

    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.pokemon.get(self.selected)
    }

    pub fn find(&self, id: &PokemonId) -> Option<&Pokemon> {
        self.pokemon.iter().find(|p| &p.id == id)
    }

    pub fn is_busy(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn loading_anim_active(&self) -> bool {
        self.is_busy() || self.loading_anim_ticks_remaining > 0
    }

    /// Replace the list, keeping the selection on the same record when it survives.
    pub fn replace_pokemon(&mut self, pokemon: Vec<Pokemon>) {
        let selected_id = self.selected_pokemon().map(|p| p.id.clone());
        self.pokemon = pokemon;
        self.selected = selected_id
            .and_then(|id| self.pokemon.iter().position(|p| p.id == id))
            .unwrap_or_else(|| self.selected.min(self.pokemon.len().saturating_sub(1)));
    }

    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.draft_field = DraftField::default();
        self.draft_hint = None;
        self.draft_revision = self.draft_revision.wrapping_add(1);
    }
}
