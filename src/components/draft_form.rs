use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{ACCENT, ACCENT_GOLD, Component, PANEL_BG, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::effectiveness;
use crate::state::{Draft, DraftField};

const LABEL_WIDTH: u16 = 11;

/// "Add Pokémon" form: one text input per draft field
pub struct DraftForm {
    inputs: [TextInput; DraftField::COUNT],
    revision: u64,
}

pub struct DraftFormProps<'a> {
    pub draft: &'a Draft,
    pub field: DraftField,
    pub hint: Option<&'a str>,
    pub revision: u64,
    pub is_focused: bool,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            inputs: std::array::from_fn(|_| TextInput::new()),
            revision: 0,
        }
    }
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cursor state once the draft has been cleared behind our back.
    fn sync(&mut self, revision: u64) {
        if revision != self.revision {
            self.inputs = std::array::from_fn(|_| TextInput::new());
            self.revision = revision;
        }
    }
}

fn placeholder(field: DraftField) -> String {
    match field {
        DraftField::Name => "Name".to_string(),
        DraftField::Nickname => "Nickname".to_string(),
        DraftField::Type => {
            let known: Vec<_> = effectiveness::known_types().collect();
            format!("Type ({})", known.join(", "))
        }
        DraftField::Level => "Level".to_string(),
        DraftField::EvolutionLine => {
            "Evolution line (e.g. Charmander -> Charmeleon -> Charizard)".to_string()
        }
    }
}

fn input_style(is_active: bool) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(if is_active { PANEL_BG } else { ratatui::style::Color::Reset }),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: Some(Style::default().bg(ACCENT_GOLD).fg(PANEL_BG)),
    }
}

fn submit_draft(_: String) -> Action {
    Action::DraftSubmit
}

fn ui_render(_: usize) -> Action {
    Action::Render
}

impl Component<Action> for DraftForm {
    type Props<'a> = DraftFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::UiFocusList],
            KeyCode::Enter => return vec![Action::DraftSubmit],
            KeyCode::Down => return vec![Action::DraftFieldNext],
            KeyCode::Up => return vec![Action::DraftFieldPrev],
            KeyCode::Tab if props.field.is_last() => return vec![Action::UiFocusList],
            KeyCode::Tab => return vec![Action::DraftFieldNext],
            KeyCode::BackTab if props.field.is_first() => return vec![Action::UiFocusList],
            KeyCode::BackTab => return vec![Action::DraftFieldPrev],
            _ => {}
        }

        // Everything else is text editing for the active field
        self.sync(props.revision);
        let placeholder_text = placeholder(props.field);
        let input_props = TextInputProps {
            value: props.draft.field(props.field),
            placeholder: &placeholder_text,
            is_focused: true,
            style: input_style(true),
            on_change: Action::DraftInput,
            on_submit: submit_draft,
            on_cursor_move: Some(ui_render),
        };
        self.inputs[props.field.index()]
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.revision);

        let border_color = if props.is_focused { ACCENT } else { TEXT_DIM };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(" Add Pokémon ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(1); DraftField::COUNT];
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // hint
        constraints.push(Constraint::Length(1)); // help
        let rows = Layout::vertical(constraints).split(inner);

        for (index, field) in DraftField::ALL.into_iter().enumerate() {
            let is_active = props.is_focused && field == props.field;
            let cols = Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                .split(rows[index]);

            let label_style = if is_active {
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_DIM)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {}", field.label()),
                    label_style,
                ))),
                cols[0],
            );

            let placeholder_text = placeholder(field);
            let input_props = TextInputProps {
                value: props.draft.field(field),
                placeholder: &placeholder_text,
                is_focused: is_active,
                style: input_style(is_active),
                on_change: Action::DraftInput,
                on_submit: submit_draft,
                on_cursor_move: Some(ui_render),
            };
            self.inputs[index].render(frame, cols[1], input_props);
        }

        let base = DraftField::COUNT;
        if let Some(hint) = props.hint {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {hint}"),
                    Style::default().fg(ACCENT),
                ))),
                rows[base + 1],
            );
        }

        let help = if props.is_focused {
            " Enter add · ↑/↓ field · Esc back"
        } else {
            " a to add a Pokémon"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(help, Style::default().fg(TEXT_DIM)))),
            rows[base + 2],
        );
    }
}
