use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::cmp::Ordering;

use super::{ACCENT_GOLD, Component, TEXT_DIM};
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const TITLE: &str = "Pokedex";

pub struct Banner;

pub struct BannerProps {
    pub count: usize,
    pub is_busy: bool,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Red into white, like the top and bottom of a Poké Ball.
const BALL_RED: (u8, u8, u8) = (238, 82, 83);
const BALL_WHITE: (u8, u8, u8) = (245, 240, 235);

fn gradient(phase: f32) -> Fill {
    let red = ArtColor::rgb(BALL_RED.0, BALL_RED.1, BALL_RED.2);
    let white = ArtColor::rgb(BALL_WHITE.0, BALL_WHITE.1, BALL_WHITE.2);
    let base_stops = [
        (0.0, red),
        (0.45, red.interpolate(white, 0.3)),
        (0.55, white.interpolate(red, 0.3)),
        (1.0, white),
    ];

    let phase = phase.rem_euclid(1.0);
    let edge = sample_color(&base_stops, (1.0 - phase).rem_euclid(1.0));
    let mut shifted = Vec::with_capacity(base_stops.len() + 2);
    shifted.push((0.0, edge));
    shifted.push((1.0, edge));
    for (pos, color) in base_stops {
        shifted.push(((pos + phase) % 1.0, color));
    }
    shifted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let stops = shifted
        .into_iter()
        .map(|(pos, color)| artbox::ColorStop::new(pos, color))
        .collect();
    Fill::Linear(LinearGradient::new(0.0, stops))
}

fn sample_color(stops: &[(f32, ArtColor)], position: f32) -> ArtColor {
    let pos = position.clamp(0.0, 1.0);
    let mut prev = stops[0];
    for stop in stops {
        if stop.0 >= pos {
            if (stop.0 - prev.0).abs() < f32::EPSILON {
                return stop.1;
            }
            let t = (pos - prev.0) / (stop.0 - prev.0);
            return prev.1.interpolate(stop.1, t);
        }
        prev = *stop;
    }
    prev.1
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for Banner {
    type Props<'a> = BannerProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title
            Constraint::Length(1), // Summary
        ])
        .split(area);

        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(gradient(phase));
        frame.render_widget(ArtBox::new(&renderer, TITLE), chunks[0]);

        let mut spans = vec![Span::styled(
            format!("{} Pokémon caught", props.count),
            Style::default().fg(TEXT_DIM),
        )];
        if props.is_busy {
            spans.push(Span::styled("  syncing…", Style::default().fg(ACCENT_GOLD)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans).centered()).style(Style::default().fg(Color::Reset)),
            chunks[1],
        );
    }
}
