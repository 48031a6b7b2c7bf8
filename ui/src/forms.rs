use crossterm::event::{Event, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::{Color, Line, Masked, Span, StatefulWidget, Widget};
use ratatui::widgets::{Block, Clear, Paragraph};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use types::domain::{LoginRequest, RegisterRequest, INDUSTRIES};

use crate::data::highlight;
use crate::extension::{CenteredBox, Splittable};
use crate::page::{ButtonId, DEFAULT_BRAND_VOICE, DEFAULT_TARGET_AUDIENCE};

#[derive(Debug, PartialEq, Default)]
pub enum LoginFocus {
    #[default]
    Email,
    Password,
    SignIn,
    ToRegister,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub(crate) email: Input,
    pub(crate) password: Input,
    pub(crate) focus: LoginFocus,
    pub(crate) cursor_position: Option<Position>,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    pub fn switch_focus(&mut self) {
        match self.focus {
            LoginFocus::Email => {
                self.focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                self.focus = LoginFocus::SignIn;
            }
            LoginFocus::SignIn => {
                self.focus = LoginFocus::ToRegister;
            }
            LoginFocus::ToRegister => {
                self.focus = LoginFocus::Email;
            }
        }
    }

    pub fn focused_button(&self) -> Option<ButtonId> {
        match self.focus {
            LoginFocus::SignIn => Some(ButtonId::SignIn),
            LoginFocus::ToRegister => Some(ButtonId::ToRegister),
            _ => None,
        }
    }

    pub(crate) fn handle_input_event(&mut self, key: KeyEvent) {
        match self.focus {
            LoginFocus::Email => {
                self.email.handle_event(&Event::Key(key));
            }
            LoginFocus::Password => {
                self.password.handle_event(&Event::Key(key));
            }
            _ => {}
        }
    }

    fn update_cursor_position(&mut self, email: Rect, password: Rect) {
        self.cursor_position = match self.focus {
            LoginFocus::Email => Some(input_cursor(email, &self.email)),
            LoginFocus::Password => Some(input_cursor(password, &self.password)),
            _ => None,
        };
    }
}

#[derive(Debug, PartialEq, Default)]
pub enum RegisterFocus {
    #[default]
    Business,
    Email,
    Password,
    Industry,
    CreateAccount,
    BackToLogin,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub(crate) business: Input,
    pub(crate) email: Input,
    pub(crate) password: Input,
    pub(crate) industry: Input,
    pub(crate) focus: RegisterFocus,
    pub(crate) cursor_position: Option<Position>,
}

impl RegisterForm {
    /// Audience and voice have no inputs yet and are sent as defaults.
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            business_name: self.business.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            industry: self.industry.value().to_string(),
            target_audience: DEFAULT_TARGET_AUDIENCE.to_string(),
            brand_voice: DEFAULT_BRAND_VOICE.to_string(),
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            RegisterFocus::Business => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Password,
            RegisterFocus::Password => RegisterFocus::Industry,
            RegisterFocus::Industry => RegisterFocus::CreateAccount,
            RegisterFocus::CreateAccount => RegisterFocus::BackToLogin,
            RegisterFocus::BackToLogin => RegisterFocus::Business,
        };
    }

    pub fn focused_button(&self) -> Option<ButtonId> {
        match self.focus {
            RegisterFocus::CreateAccount => Some(ButtonId::CreateAccount),
            RegisterFocus::BackToLogin => Some(ButtonId::BackToLogin),
            _ => None,
        }
    }

    pub(crate) fn handle_input_event(&mut self, key: KeyEvent) {
        let input = match self.focus {
            RegisterFocus::Business => &mut self.business,
            RegisterFocus::Email => &mut self.email,
            RegisterFocus::Password => &mut self.password,
            RegisterFocus::Industry => &mut self.industry,
            _ => return,
        };
        input.handle_event(&Event::Key(key));
    }

    fn update_cursor_position(&mut self, fields: [Rect; 4]) {
        let [business, email, password, industry] = fields;
        self.cursor_position = match self.focus {
            RegisterFocus::Business => Some(input_cursor(business, &self.business)),
            RegisterFocus::Email => Some(input_cursor(email, &self.email)),
            RegisterFocus::Password => Some(input_cursor(password, &self.password)),
            RegisterFocus::Industry => Some(input_cursor(industry, &self.industry)),
            _ => None,
        };
    }
}

fn input_cursor(area: Rect, input: &Input) -> Position {
    (area.x + input.visual_cursor() as u16 + 1, area.y + 1).into()
}

fn modal_block(title: &str) -> Block<'_> {
    Block::bordered()
        .title(Line::from(title).centered())
        .title_bottom(Line::from("Tab to move, Enter to select, Esc to close").centered())
}

fn button(area: Rect, buf: &mut Buffer, id: ButtonId, focused: bool) {
    Paragraph::new(highlight(id.label(), focused))
        .centered()
        .block(Block::bordered())
        .render(area, buf);
}

pub struct LoginModalWidget;

impl StatefulWidget for LoginModalWidget {
    type State = LoginForm;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let popup = area.centered_box(60, 11);
        Clear.render(popup, buf);
        let block = modal_block("Login");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [email, password, actions] = Layout::vertical([Constraint::Length(3); 3]).areas(inner);
        Paragraph::new(state.email.value())
            .block(Block::bordered().title("Email"))
            .render(email, buf);
        let password_text = Span::styled(Masked::new(state.password.value(), '*'), Color::White);
        Paragraph::new(password_text)
            .block(Block::bordered().title("Password"))
            .render(password, buf);

        let [sign_in, to_register] = Layout::split_equal(actions, Direction::Horizontal);
        button(sign_in, buf, ButtonId::SignIn, state.focus == LoginFocus::SignIn);
        button(
            to_register,
            buf,
            ButtonId::ToRegister,
            state.focus == LoginFocus::ToRegister,
        );
        state.update_cursor_position(email, password);
    }
}

pub struct RegisterModalWidget;

impl StatefulWidget for RegisterModalWidget {
    type State = RegisterForm;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let popup = area.centered_box(60, 17);
        Clear.render(popup, buf);
        let block = modal_block("Register");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [business, email, password, industry, actions] =
            Layout::vertical([Constraint::Length(3); 5]).areas(inner);
        Paragraph::new(state.business.value())
            .block(Block::bordered().title("Business name"))
            .render(business, buf);
        Paragraph::new(state.email.value())
            .block(Block::bordered().title("Email"))
            .render(email, buf);
        let password_text = Span::styled(Masked::new(state.password.value(), '*'), Color::White);
        Paragraph::new(password_text)
            .block(Block::bordered().title("Password"))
            .render(password, buf);
        Paragraph::new(state.industry.value())
            .block(
                Block::bordered()
                    .title("Industry")
                    .title_bottom(Line::from(INDUSTRIES.join(" / ")).right_aligned()),
            )
            .render(industry, buf);

        let [create, back] = Layout::split_equal(actions, Direction::Horizontal);
        button(
            create,
            buf,
            ButtonId::CreateAccount,
            state.focus == RegisterFocus::CreateAccount,
        );
        button(
            back,
            buf,
            ButtonId::BackToLogin,
            state.focus == RegisterFocus::BackToLogin,
        );
        state.update_cursor_position([business, email, password, industry]);
    }
}
