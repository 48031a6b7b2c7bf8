use std::borrow::Cow;

use client::client::Client;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::{Color, Span, Style};

use crate::dashboard::DashboardScreenData;
use crate::home::HomeScreenData;

pub enum ScreenChange {
    Quit,
    Switch(Screen),
    Alert(String),
    /// Switch, then alert over the new screen.
    SwitchAndAlert(Screen, String),
    None,
}

#[derive(Debug)]
pub enum Screen {
    Home(HomeScreenData),
    Dashboard(DashboardScreenData),
}

#[async_trait::async_trait]
pub trait OnKeyEvent {
    async fn on_key_event(&mut self, key: KeyEvent, client: &mut Client) -> Result<ScreenChange>;
}

pub fn highlight<'a>(text: impl Into<Cow<'a, str>>, needed: bool) -> Span<'a> {
    if needed {
        Span::styled(text, Style::default().bg(Color::White).fg(Color::Black))
    } else {
        Span::styled(text, Style::default())
    }
}
