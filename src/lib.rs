//! Pokédex TUI - a tui-dispatch client for a remote Pokémon collection API
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod effectiveness;
pub mod reducer;
pub mod state;
