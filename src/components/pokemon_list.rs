use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, LinesScroller, Padding, ScrollView, ScrollViewBehavior, ScrollViewProps,
    ScrollViewStyle,
};

use super::{ACCENT, ACCENT_GOLD, Component, TEXT_DIM, TEXT_MAIN, type_color};
use crate::action::Action;
use crate::effectiveness;
use crate::state::Pokemon;

pub const EMPTY_MESSAGE: &str = "No Pokémon found";

const PAGE_STEP: usize = 5;
const INDENT: &str = "    ";

/// "My Pokémon": every record with its evolution line and type matchups
pub struct PokemonList {
    view: ScrollView,
}

pub struct PokemonListProps<'a> {
    pub pokemon: &'a [Pokemon],
    pub selected: usize,
    pub is_focused: bool,
}

impl Default for PokemonList {
    fn default() -> Self {
        Self {
            view: ScrollView::new(),
        }
    }
}

impl PokemonList {
    pub fn new() -> Self {
        Self::default()
    }
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD))
}

fn detail(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(INDENT),
        label(name),
        Span::styled(value, Style::default().fg(TEXT_MAIN)),
    ])
}

fn entry_lines(pokemon: &Pokemon, is_selected: bool) -> Vec<Line<'static>> {
    let (marker, name_style) = if is_selected {
        ("› ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD))
    };

    let mut header = vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(pokemon.name.clone(), name_style),
        Span::styled(
            format!(" (Level {})", pokemon.level),
            Style::default().fg(TEXT_DIM),
        ),
    ];
    if let Some(nickname) = pokemon.nickname.as_deref().filter(|n| !n.trim().is_empty()) {
        header.push(Span::styled(
            format!("  “{}”", nickname.trim()),
            Style::default().fg(ACCENT_GOLD),
        ));
    }
    if !pokemon.pokemon_type.is_empty() {
        header.push(Span::styled(
            format!("  {}", pokemon.pokemon_type),
            Style::default().fg(type_color(&pokemon.pokemon_type)),
        ));
    }

    let mut lines = vec![Line::from(header)];
    if let Some(evolution) = pokemon.evolution() {
        lines.push(detail("Evolution: ", evolution.to_string()));
    }
    if let Some(matchup) = effectiveness::lookup(&pokemon.pokemon_type) {
        lines.push(detail("Strong against: ", matchup.strong.join(", ")));
        lines.push(detail("Weak against: ", matchup.weak.join(", ")));
    }
    lines
}

/// All entries, blank-separated, plus the line span of the selected one.
fn list_lines(pokemon: &[Pokemon], selected: usize) -> (Vec<Line<'static>>, (usize, usize)) {
    let mut lines = Vec::new();
    let mut span = (0, 0);
    for (index, record) in pokemon.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        let start = lines.len();
        lines.extend(entry_lines(record, index == selected));
        if index == selected {
            span = (start, lines.len());
        }
    }
    (lines, span)
}

/// Smallest offset that keeps the selected entry on screen, top first.
fn scroll_offset(span: (usize, usize), view_height: usize) -> usize {
    let (start, end) = span;
    end.saturating_sub(view_height).min(start)
}

fn list_style() -> ScrollViewStyle {
    ScrollViewStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        scrollbar: Default::default(),
    }
}

fn scroll_to(_: usize) -> Action {
    Action::Render
}

impl Component<Action> for PokemonList {
    type Props<'a> = PokemonListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.pokemon.is_empty() {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let last = props.pokemon.len() - 1;
        let selected = props.selected.min(last);
        let current = &props.pokemon[selected];
        let target = match key.code {
            KeyCode::Char('l') | KeyCode::Char('+') => {
                return vec![Action::PokemonLevelUp(current.id.clone())];
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                return vec![Action::PokemonRelease(current.id.clone())];
            }
            KeyCode::Char('j') | KeyCode::Down => (selected + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => selected.saturating_sub(1),
            KeyCode::PageDown => (selected + PAGE_STEP).min(last),
            KeyCode::PageUp => selected.saturating_sub(PAGE_STEP),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return Vec::new(),
        };

        if target == selected {
            Vec::new()
        } else {
            vec![Action::ListSelect(target)]
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_color = if props.is_focused { ACCENT } else { TEXT_DIM };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" My Pokémon ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.pokemon.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    EMPTY_MESSAGE,
                    Style::default().fg(TEXT_DIM),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let selected = props.selected.min(props.pokemon.len() - 1);
        let (lines, span) = list_lines(props.pokemon, selected);
        let scroller = LinesScroller::new(&lines);
        let mut render_content = scroller.renderer();
        self.view.render(
            frame,
            inner,
            ScrollViewProps {
                content_height: scroller.content_height(),
                scroll_offset: scroll_offset(span, inner.height as usize),
                is_focused: props.is_focused,
                style: list_style(),
                behavior: ScrollViewBehavior {
                    show_scrollbar: true,
                    scroll_step: 1,
                    page_step: 0,
                },
                on_scroll: scroll_to,
                render_content: &mut render_content,
            },
        );
    }
}
