use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Banner, BannerProps, Component, DraftForm, DraftFormProps, PokemonList, PokemonListProps,
};
use crate::action::Action;
use crate::state::{AppState, FocusArea};

const BANNER_HEIGHT: u16 = 6;
const FORM_HEIGHT: u16 = 10;

/// Screen regions, exposed so the runtime can register hit areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLayout {
    pub banner: Rect,
    pub form: Rect,
    pub list: Rect,
    pub status: Rect,
}

impl ViewLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Min(FORM_HEIGHT),
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let body = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);
        let left = Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
            .split(body[0]);

        Self {
            banner: rows[0],
            form: left[0],
            list: body[1],
            status: rows[2],
        }
    }
}

/// Props for PokedexView - read-only view of state
pub struct PokedexViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: banner, "Add Pokémon" form and "My Pokémon" list
pub struct PokedexView {
    form: DraftForm,
    list: PokemonList,
    status_bar: StatusBar,
}

impl Default for PokedexView {
    fn default() -> Self {
        Self {
            form: DraftForm::new(),
            list: PokemonList::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl PokedexView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_form_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = DraftFormProps {
            draft: &state.draft,
            field: state.draft_field,
            hint: state.draft_hint.as_deref(),
            revision: state.draft_revision,
            is_focused: true,
        };
        self.form.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::PokemonFetch],
                KeyCode::Char('a') | KeyCode::Tab | KeyCode::BackTab => {
                    return vec![Action::UiFocusForm];
                }
                _ => {}
            }
        }

        let props = PokemonListProps {
            pokemon: &state.pokemon,
            selected: state.selected,
            is_focused: true,
        };
        self.list.handle_event(event, props).into_iter().collect()
    }

    fn render_status_bar(&mut self, frame: &mut Frame, area: Rect, focus: FocusArea) {
        let form_hints = [
            StatusBarHint::new("enter", "add"),
            StatusBarHint::new("↑/↓", "field"),
            StatusBarHint::new("esc", "list"),
        ];
        let list_hints = [
            StatusBarHint::new("l", "level up"),
            StatusBarHint::new("x", "release"),
            StatusBarHint::new("a", "add"),
            StatusBarHint::new("r", "refresh"),
            StatusBarHint::new("q", "quit"),
        ];
        let hints: &[StatusBarHint] = match focus {
            FocusArea::Form => &form_hints,
            FocusArea::List => &list_hints,
        };

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

impl Component<Action> for PokedexView {
    type Props<'a> = PokedexViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match props.state.focus {
            FocusArea::Form => self.handle_form_event(event, props.state),
            FocusArea::List => self.handle_list_event(event, props.state),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let layout = ViewLayout::new(area);

        let mut banner = Banner;
        banner.render(
            frame,
            layout.banner,
            BannerProps {
                count: state.pokemon.len(),
                is_busy: state.is_busy(),
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        self.form.render(
            frame,
            layout.form,
            DraftFormProps {
                draft: &state.draft,
                field: state.draft_field,
                hint: state.draft_hint.as_deref(),
                revision: state.draft_revision,
                is_focused: props.is_focused && state.focus == FocusArea::Form,
            },
        );

        self.list.render(
            frame,
            layout.list,
            PokemonListProps {
                pokemon: &state.pokemon,
                selected: state.selected,
                is_focused: props.is_focused && state.focus == FocusArea::List,
            },
        );

        self.render_status_bar(frame, layout.status, state.focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Pokemon, PokemonId};
    use tui_dispatch::testing::*;

    fn state_with_one() -> AppState {
        AppState::with_pokemon(vec![Pokemon {
            id: PokemonId::Number(7),
            name: "Squirtle".into(),
            nickname: None,
            pokemon_type: "Water".into(),
            level: 4,
            evolution_line: None,
        }])
    }

    #[test]
    fn test_list_keys() {
        let mut view = PokedexView::new();
        let state = state_with_one();

        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(key("r")),
                PokedexViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::PokemonFetch);

        let actions = view.handle_list_event(&EventKind::Key(key("q")), &state);
        actions.assert_first(Action::Quit);

        let actions = view.handle_list_event(&EventKind::Key(key("a")), &state);
        actions.assert_first(Action::UiFocusForm);

        let actions = view.handle_list_event(&EventKind::Key(key("l")), &state);
        actions.assert_first(Action::PokemonLevelUp(PokemonId::Number(7)));
    }

    #[test]
    fn test_form_focus_keeps_letters_out_of_list() {
        let mut view = PokedexView::new();
        let state = AppState {
            focus: FocusArea::Form,
            ..state_with_one()
        };

        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(key("q")),
                PokedexViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        assert!(!actions.contains(&Action::Quit));
    }

    #[test]
    fn test_layout_regions() {
        let layout = ViewLayout::new(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.banner.height, BANNER_HEIGHT);
        assert_eq!(layout.form.height, FORM_HEIGHT);
        assert_eq!(layout.list.height, 30 - BANNER_HEIGHT - 1);
        assert_eq!(layout.status.y, 29);
    }
}
