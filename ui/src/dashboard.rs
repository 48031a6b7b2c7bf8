use client::client::Client;
use color_eyre::{Report, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Line, StatefulWidget, Widget};
use ratatui::style::Stylize;
use ratatui::widgets::{Block, Cell, Row, Table};
use types::domain::Profile;
use types::error::Error;

use crate::data::{OnKeyEvent, Screen, ScreenChange};
use crate::home::HomeScreenData;
use crate::storage::TokenStore;
use crate::TOKEN_MANAGER;

#[derive(Debug)]
pub struct DashboardScreenData {
    pub profile: Profile,
    token: String,
}

impl From<DashboardScreenData> for ScreenChange {
    fn from(data: DashboardScreenData) -> Self {
        ScreenChange::Switch(Screen::Dashboard(data))
    }
}

impl DashboardScreenData {
    pub async fn refresh(&mut self, client: &Client) -> Result<()> {
        self.profile = client.get_profile(&self.token).await?;
        Ok(())
    }

    /// Ends the session on the server when it can and always forgets the token.
    async fn logout(&self, client: &Client, tokens: &dyn TokenStore) -> Result<()> {
        match client.logout(&self.token).await {
            Ok(ack) => info!("{}", ack.message),
            Err(e) => warn!("Logout request failed: {:?}", e),
        }
        tokens.clear()
    }

    pub(crate) async fn handle_key(
        &mut self,
        key: KeyEvent,
        client: &Client,
        tokens: &dyn TokenStore,
    ) -> Result<ScreenChange> {
        let change = match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => ScreenChange::Quit,
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc) => {
                self.logout(client, tokens).await?;
                HomeScreenData::new().into()
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Char('r')) => {
                match self.refresh(client).await {
                    Ok(()) => ScreenChange::None,
                    Err(e) => return signed_out(e, tokens),
                }
            }
            _ => ScreenChange::None,
        };
        Ok(change)
    }
}

#[async_trait::async_trait]
impl OnKeyEvent for DashboardScreenData {
    async fn on_key_event(&mut self, key: KeyEvent, client: &mut Client) -> Result<ScreenChange> {
        self.handle_key(key, client, &*TOKEN_MANAGER).await
    }
}

/// Loads the profile behind the stored token.
pub async fn dashboard_screen_data(
    client: &Client,
    tokens: &dyn TokenStore,
) -> Result<DashboardScreenData> {
    let token = tokens.load()?.ok_or(Error::Unauthorized)?;
    let profile = client.get_profile(&token).await?;
    Ok(DashboardScreenData { profile, token })
}

fn is_rejected(e: &Report) -> bool {
    matches!(e.downcast_ref::<Error>(), Some(Error::Unauthorized))
}

/// A rejected session forgets its token and lands on the home screen with
/// the reason shown. Any other failure is passed through.
pub(crate) fn signed_out(e: Report, tokens: &dyn TokenStore) -> Result<ScreenChange> {
    if !is_rejected(&e) {
        return Err(e);
    }
    warn!("Session rejected: {}", e);
    tokens.clear()?;
    Ok(ScreenChange::SwitchAndAlert(
        Screen::Home(HomeScreenData::new()),
        e.to_string(),
    ))
}

/// Startup screen: the dashboard when the stored token still works, home
/// otherwise. The token is only forgotten when the server rejects it.
pub async fn restore_session(client: &Client, tokens: &dyn TokenStore) -> Screen {
    match tokens.load() {
        Ok(Some(_)) => match dashboard_screen_data(client, tokens).await {
            Ok(data) => return Screen::Dashboard(data),
            Err(e) if is_rejected(&e) => {
                warn!("Stored token rejected: {}", e);
                if let Err(e) = tokens.clear() {
                    warn!("Failed to clear stored token: {:?}", e);
                }
            }
            Err(e) => warn!("Could not resume session: {}", e),
        },
        Ok(None) => {}
        Err(e) => warn!("Token storage unavailable: {:?}", e),
    }
    Screen::Home(HomeScreenData::new())
}

pub struct DashboardWidget;

impl StatefulWidget for DashboardWidget {
    type State = DashboardScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let profile = &state.profile;
        let last_login = profile
            .last_login
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        let rows = [
            ("Business", profile.business_name.clone()),
            ("Email", profile.email.clone()),
            ("Industry", profile.industry.clone()),
            ("Target audience", profile.target_audience.clone()),
            ("Brand voice", profile.brand_voice.clone()),
            ("Last login", last_login),
        ]
        .into_iter()
        .map(|(name, value)| Row::new([Cell::from(name.bold()), Cell::from(value)]))
        .collect::<Vec<_>>();

        let table = Table::new(rows, Constraint::from_percentages([30, 70])).block(
            Block::bordered()
                .title(Line::from("Dashboard").centered())
                .title_bottom(Line::from("r to refresh, Esc to log out").centered()),
        );
        Widget::render(table, area, buf);
    }
}
