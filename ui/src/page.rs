//! Page behaviour behind the home screen: the button click logger and the
//! login / registration submit handlers.
//!
//! Handlers never touch the terminal directly. They drive a [`Page`], which the
//! home screen implements over its own state and the keyring, and which tests
//! implement by recording every call.

use std::collections::BTreeSet;

use client::api::{AuthApi, TransportError};
use log::{debug, warn};
use thiserror::Error;
use types::domain::{FailureText, LoginRequest, RegisterRequest};

use crate::forms::{LoginForm, RegisterForm};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_FORM: &str = "login-form";
pub const REGISTER_FORM: &str = "register-form";

pub const DEFAULT_TARGET_AUDIENCE: &str = "general customers";
pub const DEFAULT_BRAND_VOICE: &str = "friendly and professional";

pub const LOGIN_FAILED: &str = "Login failed.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const REGISTRATION_COMPLETE: &str = "Registration complete. Please log in.";
pub const CONNECTIVITY_FAILURE: &str = "Could not reach the server. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    Login,
    Register,
}

impl ModalId {
    pub fn element_id(&self) -> &'static str {
        match self {
            ModalId::Login => "loginModal",
            ModalId::Register => "registerModal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ButtonId {
    Login,
    Register,
    Quit,
    SignIn,
    ToRegister,
    CreateAccount,
    BackToLogin,
}

impl ButtonId {
    pub const ALL: [ButtonId; 7] = [
        ButtonId::Login,
        ButtonId::Register,
        ButtonId::Quit,
        ButtonId::SignIn,
        ButtonId::ToRegister,
        ButtonId::CreateAccount,
        ButtonId::BackToLogin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ButtonId::Login => "Login",
            ButtonId::Register => "Register",
            ButtonId::Quit => "Quit",
            ButtonId::SignIn => "Sign in",
            ButtonId::ToRegister => "New account",
            ButtonId::CreateAccount => "Create account",
            ButtonId::BackToLogin => "Back to login",
        }
    }
}

/// What the handlers may do to the page.
pub trait Page {
    /// Diagnostic channel.
    fn console_log(&mut self, line: &str);
    /// Blocking notification the user has to dismiss.
    fn alert(&mut self, message: &str);
    fn store_token(&mut self, token: &str) -> color_eyre::Result<()>;
    fn navigate(&mut self, path: &str);
    fn hide_modal(&mut self, modal: ModalId);
    fn show_modal(&mut self, modal: ModalId);
}

/// Click logging for the buttons bound at startup.
#[derive(Debug, Clone, Default)]
pub struct ButtonLogger {
    bound: BTreeSet<ButtonId>,
}

impl ButtonLogger {
    pub fn bind(buttons: impl IntoIterator<Item = ButtonId>) -> Self {
        Self {
            bound: buttons.into_iter().collect(),
        }
    }

    /// Returns whether the click was logged.
    pub fn click<P: Page + ?Sized>(&self, button: ButtonId, page: &mut P) -> bool {
        if !self.bound.contains(&button) {
            return false;
        }
        page.console_log(&format!("Button clicked: {}", button.label()));
        true
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server answered, and the answer says no.
    #[error("{0}")]
    Application(String),
    #[error("{}", CONNECTIVITY_FAILURE)]
    Transport(#[from] TransportError),
}

pub async fn submit_login<A, P>(form: &LoginForm, api: &A, page: &mut P)
where
    A: AuthApi + ?Sized,
    P: Page + Send + ?Sized,
{
    debug!("submit {}", LOGIN_FORM);
    match login(form.to_request(), api).await {
        Ok(token) => {
            if let Err(e) = page.store_token(&token) {
                warn!("Failed to store access token: {:?}", e);
                page.alert(&e.to_string());
                return;
            }
            page.navigate(DASHBOARD_PATH);
        }
        Err(e) => page.alert(&e.to_string()),
    }
}

pub async fn submit_register<A, P>(form: &RegisterForm, api: &A, page: &mut P)
where
    A: AuthApi + ?Sized,
    P: Page + Send + ?Sized,
{
    debug!("submit {}", REGISTER_FORM);
    match register(form.to_request(), api).await {
        Ok(()) => {
            page.alert(REGISTRATION_COMPLETE);
            page.hide_modal(ModalId::Register);
            page.show_modal(ModalId::Login);
        }
        Err(e) => page.alert(&e.to_string()),
    }
}

async fn login<A: AuthApi + ?Sized>(request: LoginRequest, api: &A) -> Result<String, SubmitError> {
    let reply = api.login(request).await.map_err(transport_failure)?;
    let token = reply
        .body
        .access_token
        .as_deref()
        .filter(|token| !token.is_empty());
    match token {
        Some(token) if reply.is_success() => Ok(token.to_string()),
        _ => Err(SubmitError::Application(
            reply.body.failure_text().unwrap_or(LOGIN_FAILED).to_string(),
        )),
    }
}

async fn register<A: AuthApi + ?Sized>(request: RegisterRequest, api: &A) -> Result<(), SubmitError> {
    let reply = api.register(request).await.map_err(transport_failure)?;
    if reply.is_success() && reply.body.success == Some(true) {
        return Ok(());
    }
    Err(SubmitError::Application(
        reply
            .body
            .failure_text()
            .unwrap_or(REGISTRATION_FAILED)
            .to_string(),
    ))
}

fn transport_failure(e: TransportError) -> SubmitError {
    warn!("Request did not complete: {:?}", e);
    e.into()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use client::api::{Reply, StatusCode};
    use tui_input::Input;
    use types::domain::{LoginResponse, RegisterResponse};

    use super::*;

    type Answer<T> = Box<dyn Fn() -> Result<Reply<T>, TransportError> + Send + Sync>;

    struct FakeApi {
        login: Answer<LoginResponse>,
        register: Answer<RegisterResponse>,
        login_requests: Mutex<Vec<LoginRequest>>,
        register_requests: Mutex<Vec<RegisterRequest>>,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                login: Box::new(|| -> Result<Reply<LoginResponse>, TransportError> {
                    panic!("login not expected")
                }),
                register: Box::new(|| -> Result<Reply<RegisterResponse>, TransportError> {
                    panic!("register not expected")
                }),
                login_requests: Mutex::new(Vec::new()),
                register_requests: Mutex::new(Vec::new()),
            }
        }

        fn login_answers(
            mut self,
            answer: impl Fn() -> Result<Reply<LoginResponse>, TransportError> + Send + Sync + 'static,
        ) -> Self {
            self.login = Box::new(answer);
            self
        }

        fn register_answers(
            mut self,
            answer: impl Fn() -> Result<Reply<RegisterResponse>, TransportError>
                + Send
                + Sync
                + 'static,
        ) -> Self {
            self.register = Box::new(answer);
            self
        }
    }

    #[async_trait::async_trait]
    impl AuthApi for FakeApi {
        async fn login(
            &self,
            request: LoginRequest,
        ) -> Result<Reply<LoginResponse>, TransportError> {
            self.login_requests.lock().unwrap().push(request);
            (self.login)()
        }

        async fn register(
            &self,
            request: RegisterRequest,
        ) -> Result<Reply<RegisterResponse>, TransportError> {
            self.register_requests.lock().unwrap().push(request);
            (self.register)()
        }
    }

    #[derive(Debug, Default)]
    struct RecordingPage {
        logs: Vec<String>,
        alerts: Vec<String>,
        tokens: Vec<String>,
        navigations: Vec<String>,
        hidden: Vec<ModalId>,
        shown: Vec<ModalId>,
        storage_broken: bool,
    }

    impl Page for RecordingPage {
        fn console_log(&mut self, line: &str) {
            self.logs.push(line.to_string());
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn store_token(&mut self, token: &str) -> color_eyre::Result<()> {
            if self.storage_broken {
                color_eyre::eyre::bail!("keyring unavailable");
            }
            self.tokens.push(token.to_string());
            Ok(())
        }

        fn navigate(&mut self, path: &str) {
            self.navigations.push(path.to_string());
        }

        fn hide_modal(&mut self, modal: ModalId) {
            self.hidden.push(modal);
        }

        fn show_modal(&mut self, modal: ModalId) {
            self.shown.push(modal);
        }
    }

    fn login_form() -> LoginForm {
        LoginForm {
            email: Input::new("owner@mori.cafe".to_string()),
            password: Input::new("password123".to_string()),
            ..Default::default()
        }
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            business: Input::new("Cafe Mori".to_string()),
            email: Input::new("owner@mori.cafe".to_string()),
            password: Input::new("password123".to_string()),
            industry: Input::new("restaurant".to_string()),
            ..Default::default()
        }
    }

    fn login_reply(status: StatusCode, body: LoginResponse) -> Result<Reply<LoginResponse>, TransportError> {
        Ok(Reply::new(status, body))
    }

    fn register_reply(
        status: StatusCode,
        body: RegisterResponse,
    ) -> Result<Reply<RegisterResponse>, TransportError> {
        Ok(Reply::new(status, body))
    }

    fn server_unreachable<T>() -> Result<Reply<T>, TransportError> {
        let error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        Err(error.into())
    }

    #[test]
    fn test_every_bound_button_logs_its_label_once() {
        let logger = ButtonLogger::bind(ButtonId::ALL);
        let mut page = RecordingPage::default();

        for button in ButtonId::ALL {
            assert!(logger.click(button, &mut page));
        }

        assert_eq!(page.logs.len(), ButtonId::ALL.len());
        for (line, button) in page.logs.iter().zip(ButtonId::ALL) {
            assert!(line.contains(button.label()));
        }
        assert!(page.alerts.is_empty());
        assert!(page.navigations.is_empty());
    }

    #[test]
    fn test_unbound_button_is_not_logged() {
        let logger = ButtonLogger::bind([ButtonId::Login]);
        let mut page = RecordingPage::default();

        assert!(!logger.click(ButtonId::Quit, &mut page));
        assert!(page.logs.is_empty());
    }

    #[tokio::test]
    async fn test_login_success_stores_token_and_navigates_once() {
        let api = FakeApi::new().login_answers(|| {
            login_reply(
                StatusCode::OK,
                LoginResponse {
                    access_token: Some("T".to_string()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.tokens, vec!["T".to_string()]);
        assert_eq!(page.navigations, vec![DASHBOARD_PATH.to_string()]);
        assert!(page.alerts.is_empty());
        let requests = api.login_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].email, "owner@mori.cafe");
        assert_eq!(requests[0].password, "password123");
    }

    #[tokio::test]
    async fn test_login_rejected_alerts_detail() {
        let api = FakeApi::new().login_answers(|| {
            login_reply(
                StatusCode::UNAUTHORIZED,
                LoginResponse {
                    detail: Some("bad credentials".to_string()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec!["bad credentials".to_string()]);
        assert!(page.tokens.is_empty());
        assert!(page.navigations.is_empty());
    }

    #[tokio::test]
    async fn test_login_without_token_is_a_failure() {
        let api = FakeApi::new().login_answers(|| {
            login_reply(
                StatusCode::OK,
                LoginResponse {
                    access_token: Some(String::new()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec![LOGIN_FAILED.to_string()]);
        assert!(page.tokens.is_empty());
        assert!(page.navigations.is_empty());
    }

    #[tokio::test]
    async fn test_login_token_on_error_status_is_ignored() {
        let api = FakeApi::new().login_answers(|| {
            login_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginResponse {
                    access_token: Some("T".to_string()),
                    message: Some("try later".to_string()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec!["try later".to_string()]);
        assert!(page.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_login_transport_failure_alerts_connectivity() {
        let api = FakeApi::new().login_answers(server_unreachable::<LoginResponse>);
        let mut page = RecordingPage::default();

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec![CONNECTIVITY_FAILURE.to_string()]);
        assert!(page.tokens.is_empty());
        assert!(page.navigations.is_empty());
    }

    #[tokio::test]
    async fn test_login_storage_failure_does_not_navigate() {
        let api = FakeApi::new().login_answers(|| {
            login_reply(
                StatusCode::OK,
                LoginResponse {
                    access_token: Some("T".to_string()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage {
            storage_broken: true,
            ..Default::default()
        };

        submit_login(&login_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec!["keyring unavailable".to_string()]);
        assert!(page.navigations.is_empty());
    }

    #[tokio::test]
    async fn test_register_success_swaps_modals_once() {
        let api = FakeApi::new().register_answers(|| {
            register_reply(
                StatusCode::CREATED,
                RegisterResponse {
                    success: Some(true),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_register(&register_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec![REGISTRATION_COMPLETE.to_string()]);
        assert_eq!(page.hidden, vec![ModalId::Register]);
        assert_eq!(page.shown, vec![ModalId::Login]);
        assert!(page.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_form_fields_and_defaults() {
        let api = FakeApi::new().register_answers(|| {
            register_reply(
                StatusCode::CREATED,
                RegisterResponse {
                    success: Some(true),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_register(&register_form(), &api, &mut page).await;

        let requests = api.register_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.business_name, "Cafe Mori");
        assert_eq!(request.email, "owner@mori.cafe");
        assert_eq!(request.password, "password123");
        assert_eq!(request.industry, "restaurant");
        assert_eq!(request.target_audience, DEFAULT_TARGET_AUDIENCE);
        assert_eq!(request.brand_voice, DEFAULT_BRAND_VOICE);
    }

    #[tokio::test]
    async fn test_register_failure_alerts_message_and_keeps_modals() {
        let api = FakeApi::new().register_answers(|| {
            register_reply(
                StatusCode::OK,
                RegisterResponse {
                    success: Some(false),
                    message: Some("email exists".to_string()),
                    ..Default::default()
                },
            )
        });
        let mut page = RecordingPage::default();

        submit_register(&register_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec!["email exists".to_string()]);
        assert!(page.hidden.is_empty());
        assert!(page.shown.is_empty());
    }

    #[tokio::test]
    async fn test_register_failure_without_text_uses_generic_message() {
        let api = FakeApi::new().register_answers(|| {
            register_reply(StatusCode::CONFLICT, RegisterResponse::default())
        });
        let mut page = RecordingPage::default();

        submit_register(&register_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec![REGISTRATION_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_register_transport_failure_alerts_connectivity() {
        let api = FakeApi::new().register_answers(server_unreachable::<RegisterResponse>);
        let mut page = RecordingPage::default();

        submit_register(&register_form(), &api, &mut page).await;

        assert_eq!(page.alerts, vec![CONNECTIVITY_FAILURE.to_string()]);
        assert!(page.hidden.is_empty());
        assert!(page.shown.is_empty());
    }
}
