//! Pokédex TUI - create, list, level up and release Pokémon on a remote API

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pokedex::action::Action;
use pokedex::api::PokedexClient;
use pokedex::components::{Component, PokedexView, PokedexViewProps, ViewLayout};
use pokedex::config::ApiConfig;
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, FocusArea, LOADING_ANIM_TICK_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokédex TUI backed by a remote collection API
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Create, list, level up and release Pokémon on a remote API")]
struct Args {
    /// Base URL of the API (falls back to the build-time POKEDEX_API_URL)
    #[arg(long, env = "POKEDEX_API_URL")]
    api_url: Option<String>,

    /// Refetch the list every N seconds (off by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: Option<u64>,

    /// Diagnostics log file (the terminal belongs to the UI)
    #[arg(long, default_value = "pokedex.log")]
    log_file: PathBuf,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Form,
    List,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Form,
    List,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        match self.focus {
            FocusArea::Form => Some(PokedexComponentId::Form),
            FocusArea::List => Some(PokedexComponentId::List),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Form => PokedexContext::Form,
            PokedexComponentId::List => PokedexContext::List,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_url,
        refresh_interval,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Err(error) = init_tracing(&log_file) {
        eprintln!("Warning: logging disabled ({error})");
    }

    let config = ApiConfig::resolve(api_url.as_deref()).map_err(io::Error::other)?;
    let client = PokedexClient::new(config);
    info!(base_url = client.config().base_url(), "starting pokedex");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        refresh_interval,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_tracing(log_file: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter =
        EnvFilter::try_from_env("POKEDEX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| io::Error::other(format!("failed to initialize tracing: {error}")))
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct PokedexUi {
    view: PokedexView,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            view: PokedexView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let layout = ViewLayout::new(area);
        event_ctx.set_component_area(PokedexComponentId::Form, layout.form);
        event_ctx.set_component_area(PokedexComponentId::List, layout.list);

        let props = PokedexViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_form_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        respond(self.view.handle_form_event(event, state))
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        respond(self.view.handle_list_event(event, state))
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: PokedexClient,
    refresh_interval: Option<u64>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> =
        EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_form = Rc::clone(&ui);
    bus.register(PokedexComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_list = Rc::clone(&ui);
    bus.register(PokedexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::PokemonFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );

                if let Some(secs) = refresh_interval {
                    runtime.subscriptions().interval(
                        "refresh",
                        Duration::from_secs(secs),
                        || Action::PokemonFetch,
                    );
                }
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Every request gets its own key so none replaces another in flight.
fn request_key(kind: &str) -> TaskKey {
    let seq = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
    TaskKey::new(format!("{kind}_{seq}"))
}

/// Handle effects by spawning tasks. Failures are logged and folded into
/// result actions; nothing is retried.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &PokedexClient) {
    let client = client.clone();
    match effect {
        Effect::FetchPokemon => {
            ctx.tasks().spawn(request_key("list"), async move {
                match client.list().await {
                    Ok(pokemon) => {
                        info!(count = pokemon.len(), "pokemon listed");
                        Action::PokemonDidLoad(pokemon)
                    }
                    Err(error) => {
                        warn!(%error, "list failed");
                        Action::PokemonDidError(error.to_string())
                    }
                }
            });
        }
        Effect::CreatePokemon { payload } => {
            ctx.tasks().spawn(request_key("create"), async move {
                match client.create(&payload).await {
                    Ok(created) => {
                        info!(name = %payload.name, "pokemon created");
                        Action::PokemonDidCreate(created)
                    }
                    Err(error) => {
                        warn!(name = %payload.name, %error, "create failed");
                        Action::PokemonCreateDidError(error.to_string())
                    }
                }
            });
        }
        Effect::UpdatePokemon { id, payload } => {
            ctx.tasks().spawn(request_key("level_up"), async move {
                match client.update(&id, &payload).await {
                    Ok(()) => {
                        info!(%id, level = payload.level, "pokemon leveled up");
                        Action::PokemonDidLevelUp(id)
                    }
                    Err(error) => {
                        warn!(%id, %error, "level up failed");
                        Action::PokemonLevelUpDidError {
                            id,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::ReleasePokemon { id } => {
            ctx.tasks().spawn(request_key("release"), async move {
                match client.delete(&id).await {
                    Ok(()) => {
                        info!(%id, "pokemon released");
                        Action::PokemonDidRelease(id)
                    }
                    Err(error) => {
                        warn!(%id, %error, "release failed");
                        Action::PokemonReleaseDidError {
                            id,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
    }
}
