use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use ratatui::{DefaultTerminal, Frame};

use client::client::Client;

use crate::dashboard::{self, DashboardWidget};
use crate::data::{OnKeyEvent, Screen, ScreenChange};
use crate::extension::CenteredBox;
use crate::home::HomeScreenWidget;
use crate::TOKEN_MANAGER;

pub struct App {
    /// Is the application running?
    running: bool,
    client: Client,
    screen: Screen,
    /// Blocks every other key until dismissed.
    alert: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`], resuming a stored session when there is one.
    pub async fn new() -> Result<Self> {
        let client = Client::new();
        info!("backend at {}", client.base_url());
        let screen = dashboard::restore_session(&client, &*TOKEN_MANAGER).await;
        Ok(Self {
            running: true,
            client,
            screen,
            alert: None,
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_crossterm_events().await?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match &mut self.screen {
            Screen::Home(data) => {
                frame.render_stateful_widget(HomeScreenWidget, area, data);
                if let (Some(position), None) = (data.cursor_position(), &self.alert) {
                    frame.set_cursor_position(position);
                }
            }
            Screen::Dashboard(data) => frame.render_stateful_widget(DashboardWidget, area, data),
        }

        if let Some(message) = &self.alert {
            frame.render_widget(
                AlertPopup {
                    message: message.clone(),
                },
                area,
            );
        }
    }

    async fn handle_crossterm_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key_event) = event::read()? {
                self.on_key_event(key_event).await;
            }
        }
        Ok(())
    }

    async fn on_key_event(&mut self, key: KeyEvent) {
        if self.alert.is_some() {
            if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Enter | KeyCode::Esc)
            {
                self.alert = None;
            }
            return;
        }

        let change = match &mut self.screen {
            Screen::Home(data) => data.on_key_event(key, &mut self.client).await,
            Screen::Dashboard(data) => data.on_key_event(key, &mut self.client).await,
        };
        match change {
            Ok(ScreenChange::Quit) => self.quit(),
            Ok(ScreenChange::Switch(screen)) => self.screen = screen,
            Ok(ScreenChange::Alert(message)) => self.alert = Some(message),
            Ok(ScreenChange::SwitchAndAlert(screen, message)) => {
                self.screen = screen;
                self.alert = Some(message);
            }
            Ok(ScreenChange::None) => {}
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

pub struct AlertPopup {
    message: String,
}

impl Widget for AlertPopup {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let popup = area.centered_box(50, 7);
        Clear.render(popup, buf);
        Paragraph::new(self.message)
            .centered()
            .block(
                Block::bordered()
                    .title("Notice")
                    .title_bottom(Line::from("Enter to dismiss").centered())
                    .style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
