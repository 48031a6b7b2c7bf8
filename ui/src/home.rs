use client::client::Client;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::prelude::{Line, Modifier, StatefulWidget, Style, Widget};
use ratatui::style::Stylize;
use ratatui::widgets::{Block, Paragraph};

use crate::dashboard;
use crate::data::{self, OnKeyEvent, Screen, ScreenChange};
use crate::forms::{LoginForm, LoginModalWidget, RegisterForm, RegisterModalWidget};
use crate::page::{
    submit_login, submit_register, ButtonId, ButtonLogger, ModalId, Page, DASHBOARD_PATH,
};
use crate::storage::TokenStore;
use crate::TOKEN_MANAGER;

#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub enum HomeFocus {
    #[default]
    Login,
    Register,
    Quit,
}

impl HomeFocus {
    fn button(&self) -> ButtonId {
        match self {
            HomeFocus::Login => ButtonId::Login,
            HomeFocus::Register => ButtonId::Register,
            HomeFocus::Quit => ButtonId::Quit,
        }
    }
}

#[derive(Debug)]
pub struct HomeScreenData {
    buttons: ButtonLogger,
    focus: HomeFocus,
    modal: Option<ModalId>,
    login_form: LoginForm,
    register_form: RegisterForm,
}

impl Default for HomeScreenData {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HomeScreenData> for ScreenChange {
    fn from(data: HomeScreenData) -> Self {
        ScreenChange::Switch(Screen::Home(data))
    }
}

impl HomeScreenData {
    /// Binds every button of the page to the click logger.
    pub fn new() -> Self {
        info!("binding {} buttons", ButtonId::ALL.len());
        Self {
            buttons: ButtonLogger::bind(ButtonId::ALL),
            focus: HomeFocus::default(),
            modal: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
        }
    }

    pub fn cursor_position(&self) -> Option<Position> {
        match self.modal {
            Some(ModalId::Login) => self.login_form.cursor_position,
            Some(ModalId::Register) => self.register_form.cursor_position,
            None => None,
        }
    }

    fn switch_focus(&mut self) {
        match self.modal {
            Some(ModalId::Login) => self.login_form.switch_focus(),
            Some(ModalId::Register) => self.register_form.switch_focus(),
            None => {
                self.focus = match self.focus {
                    HomeFocus::Login => HomeFocus::Register,
                    HomeFocus::Register => HomeFocus::Quit,
                    HomeFocus::Quit => HomeFocus::Login,
                }
            }
        }
    }

    async fn handle_enter(&mut self, client: &Client, tokens: &dyn TokenStore) -> Result<ScreenChange> {
        let open = self.modal;
        let mut page = TerminalPage::new(&mut self.modal, tokens);
        match open {
            None => {
                let button = self.focus.button();
                self.buttons.click(button, &mut page);
                match button {
                    ButtonId::Login => page.show_modal(ModalId::Login),
                    ButtonId::Register => page.show_modal(ModalId::Register),
                    _ => return Ok(ScreenChange::Quit),
                }
            }
            Some(ModalId::Login) => match self.login_form.focused_button() {
                Some(ButtonId::ToRegister) => {
                    self.buttons.click(ButtonId::ToRegister, &mut page);
                    page.hide_modal(ModalId::Login);
                    page.show_modal(ModalId::Register);
                }
                Some(button) => {
                    self.buttons.click(button, &mut page);
                    submit_login(&self.login_form, client, &mut page).await;
                }
                // Enter inside an input submits the form
                None => submit_login(&self.login_form, client, &mut page).await,
            },
            Some(ModalId::Register) => match self.register_form.focused_button() {
                Some(ButtonId::BackToLogin) => {
                    self.buttons.click(ButtonId::BackToLogin, &mut page);
                    page.hide_modal(ModalId::Register);
                    page.show_modal(ModalId::Login);
                }
                Some(button) => {
                    self.buttons.click(button, &mut page);
                    submit_register(&self.register_form, client, &mut page).await;
                }
                None => submit_register(&self.register_form, client, &mut page).await,
            },
        }
        page.settle(client).await
    }

    pub(crate) async fn handle_key(
        &mut self,
        key: KeyEvent,
        client: &Client,
        tokens: &dyn TokenStore,
    ) -> Result<ScreenChange> {
        let change = match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => ScreenChange::Quit,
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc) => match self.modal.take() {
                Some(_) => ScreenChange::None,
                None => ScreenChange::Quit,
            },
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Tab) => {
                self.switch_focus();
                ScreenChange::None
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter) => {
                return self.handle_enter(client, tokens).await;
            }
            _ => {
                match self.modal {
                    Some(ModalId::Login) => self.login_form.handle_input_event(key),
                    Some(ModalId::Register) => self.register_form.handle_input_event(key),
                    None => {}
                }
                ScreenChange::None
            }
        };
        Ok(change)
    }
}

#[async_trait::async_trait]
impl OnKeyEvent for HomeScreenData {
    async fn on_key_event(&mut self, key: KeyEvent, client: &mut Client) -> Result<ScreenChange> {
        self.handle_key(key, client, &*TOKEN_MANAGER).await
    }
}

/// The home screen seen through the handlers' eyes. Effects are collected
/// and turned into a screen change once the handler returns.
struct TerminalPage<'a> {
    modal: &'a mut Option<ModalId>,
    tokens: &'a dyn TokenStore,
    alert: Option<String>,
    destination: Option<String>,
}

impl<'a> TerminalPage<'a> {
    fn new(modal: &'a mut Option<ModalId>, tokens: &'a dyn TokenStore) -> Self {
        Self {
            modal,
            tokens,
            alert: None,
            destination: None,
        }
    }

    async fn settle(self, client: &Client) -> Result<ScreenChange> {
        if let Some(message) = self.alert {
            return Ok(ScreenChange::Alert(message));
        }
        match self.destination.as_deref() {
            Some(DASHBOARD_PATH) => {
                match dashboard::dashboard_screen_data(client, self.tokens).await {
                    Ok(data) => Ok(data.into()),
                    Err(e) => dashboard::signed_out(e, self.tokens),
                }
            }
            Some(path) => {
                warn!("No screen for {}", path);
                Ok(ScreenChange::None)
            }
            None => Ok(ScreenChange::None),
        }
    }
}

impl Page for TerminalPage<'_> {
    fn console_log(&mut self, line: &str) {
        info!("{}", line);
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }

    fn store_token(&mut self, token: &str) -> Result<()> {
        self.tokens.save(token)
    }

    fn navigate(&mut self, path: &str) {
        self.destination = Some(path.to_string());
    }

    fn hide_modal(&mut self, modal: ModalId) {
        if *self.modal == Some(modal) {
            info!("hide {}", modal.element_id());
            self.modal.take();
        }
    }

    fn show_modal(&mut self, modal: ModalId) {
        info!("show {}", modal.element_id());
        self.modal.replace(modal);
    }
}

pub struct HomeScreenWidget;

impl StatefulWidget for HomeScreenWidget {
    type State = HomeScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .title(Line::from("Instamark").centered())
            .title_bottom(Line::from("Press Esc to quit").centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let [title, login, register, quit] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .flex(Flex::Center)
        .areas(inner);
        Paragraph::new("Marketing content for small businesses".bold())
            .centered()
            .render(title, buf);
        for (area, focus) in [
            (login, HomeFocus::Login),
            (register, HomeFocus::Register),
            (quit, HomeFocus::Quit),
        ] {
            let [button] = Layout::horizontal([Constraint::Max(30)])
                .flex(Flex::Center)
                .areas(area);
            Paragraph::new(data::highlight(
                focus.button().label(),
                state.modal.is_none() && state.focus == focus,
            ))
            .centered()
            .block(Block::bordered())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(button, buf);
        }

        match state.modal {
            Some(ModalId::Login) => LoginModalWidget.render(area, buf, &mut state.login_form),
            Some(ModalId::Register) => {
                RegisterModalWidget.render(area, buf, &mut state.register_form)
            }
            None => {}
        }
    }
}
