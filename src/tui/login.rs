//! Credential form
//!
//! Email goes through an iocraft `TextInput`. The password is collected from
//! key events directly so it can be drawn masked.

use std::sync::{Arc, Mutex};

use iocraft::prelude::*;

use crate::auth::{AuthProvider, Session};
use crate::tui::components::{Footer, login_shortcuts};
use crate::tui::theme::theme;

/// Where the form leaves the session after a successful sign-in
pub type LoginSlot = Arc<Mutex<Option<Session>>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    NextField,
    Submit,
    Cancel,
    TypePassword(char),
    ErasePassword,
}

/// Map a key to a form action. Characters typed into the email field are
/// left to the text input and map to nothing here.
pub fn login_key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    focus: LoginField,
) -> Option<LoginAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c')).then_some(LoginAction::Cancel);
    }
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            Some(LoginAction::NextField)
        }
        KeyCode::Enter => Some(LoginAction::Submit),
        KeyCode::Esc => Some(LoginAction::Cancel),
        KeyCode::Char(c) if focus == LoginField::Password => Some(LoginAction::TypePassword(c)),
        KeyCode::Backspace if focus == LoginField::Password => Some(LoginAction::ErasePassword),
        _ => None,
    }
}

/// Local check before anything is sent to the identity provider.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

/// One bullet per password character
pub fn mask(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[derive(Default, Props)]
pub struct LoginFormProps {
    pub auth: Option<Arc<dyn AuthProvider>>,
    pub result: Option<LoginSlot>,
}

#[component]
pub fn LoginForm<'a>(props: &LoginFormProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let mut email = hooks.use_state(String::new);
    let password = hooks.use_state(String::new);
    let focus = hooks.use_state(LoginField::default);
    let error: State<Option<String>> = hooks.use_state(|| None);
    let submitting = hooks.use_state(|| false);
    let should_exit = hooks.use_state(|| false);

    let submit_handler: Handler<(String, String)> = hooks.use_async_handler({
        let auth = props.auth.clone();
        let slot = props.result.clone();
        move |(address, secret): (String, String)| {
            let auth = auth.clone();
            let slot = slot.clone();
            let mut password = password;
            let mut error = error;
            let mut submitting = submitting;
            let mut should_exit = should_exit;
            async move {
                let Some(auth) = auth else {
                    should_exit.set(true);
                    return;
                };
                submitting.set(true);
                match auth.sign_in_with_password(address.trim(), &secret).await {
                    Ok(session) => {
                        tracing::info!(email = %session.email, "signed in");
                        if let Some(slot) = slot {
                            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
                        }
                        should_exit.set(true);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "sign-in failed");
                        password.set(String::new());
                        error.set(Some(e.user_message()));
                    }
                }
                submitting.set(false);
            }
        }
    });

    hooks.use_terminal_events({
        let mut password = password;
        let mut focus = focus;
        let mut error = error;
        let mut should_exit = should_exit;
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let Some(action) = login_key_to_action(code, modifiers, focus.get()) else {
                    return;
                };
                match action {
                    LoginAction::NextField => focus.set(focus.get().next()),
                    LoginAction::Cancel => should_exit.set(true),
                    LoginAction::TypePassword(c) => password.write().push(c),
                    LoginAction::ErasePassword => {
                        password.write().pop();
                    }
                    LoginAction::Submit => {
                        if submitting.get() {
                            return;
                        }
                        let address = email.read().clone();
                        let secret = password.read().clone();
                        match validate_credentials(&address, &secret) {
                            Ok(()) => {
                                error.set(None);
                                submit_handler((address, secret));
                            }
                            Err(message) => {
                                error.set(Some(message.to_string()));
                                if address.trim().is_empty() || !address.contains('@') {
                                    focus.set(LoginField::Email);
                                } else {
                                    focus.set(LoginField::Password);
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let theme = theme();
    let email_focused = focus.get() == LoginField::Email;
    let password_focused = focus.get() == LoginField::Password;
    let masked = mask(&password.read());
    let status_line = if submitting.get() {
        Some(("Signing in...".to_string(), theme.text_dimmed))
    } else {
        error.read().clone().map(|message| (message, theme.error))
    };

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            View(
                flex_grow: 1.0,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            ) {
                View(
                    width: 50,
                    flex_direction: FlexDirection::Column,
                    border_style: BorderStyle::Round,
                    border_color: theme.border_focused,
                    padding_left: 2,
                    padding_right: 2,
                    padding_top: 1,
                    padding_bottom: 1,
                ) {
                    Text(content: "Helpdesk Sign In", color: theme.text, weight: Weight::Bold)
                    View(margin_top: 1) {
                        Text(content: "Email", color: theme.text_dimmed)
                    }
                    View(
                        border_style: BorderStyle::Round,
                        border_color: if email_focused { theme.border_focused } else { theme.border },
                        padding_left: 1,
                        padding_right: 1,
                        height: 3,
                    ) {
                        TextInput(
                            value: email.to_string(),
                            has_focus: email_focused,
                            on_change: move |new_value| email.set(new_value),
                            color: theme.text,
                        )
                    }
                    Text(content: "Password", color: theme.text_dimmed)
                    View(
                        border_style: BorderStyle::Round,
                        border_color: if password_focused { theme.border_focused } else { theme.border },
                        padding_left: 1,
                        padding_right: 1,
                        height: 3,
                    ) {
                        Text(content: masked, color: theme.text)
                    }
                    #(status_line.map(|(message, color)| element! {
                        View(margin_top: 1) {
                            Text(content: message, color: color)
                        }
                    }))
                }
            }
            Footer(shortcuts: login_shortcuts())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_in_email_is_left_to_input() {
        assert_eq!(
            login_key_to_action(KeyCode::Char('a'), KeyModifiers::NONE, LoginField::Email),
            None
        );
        assert_eq!(
            login_key_to_action(KeyCode::Backspace, KeyModifiers::NONE, LoginField::Email),
            None
        );
    }

    #[test]
    fn test_typing_in_password_is_captured() {
        assert_eq!(
            login_key_to_action(KeyCode::Char('x'), KeyModifiers::NONE, LoginField::Password),
            Some(LoginAction::TypePassword('x'))
        );
        assert_eq!(
            login_key_to_action(KeyCode::Backspace, KeyModifiers::NONE, LoginField::Password),
            Some(LoginAction::ErasePassword)
        );
    }

    #[test]
    fn test_form_keys() {
        for focus in [LoginField::Email, LoginField::Password] {
            assert_eq!(
                login_key_to_action(KeyCode::Tab, KeyModifiers::NONE, focus),
                Some(LoginAction::NextField)
            );
            assert_eq!(
                login_key_to_action(KeyCode::Enter, KeyModifiers::NONE, focus),
                Some(LoginAction::Submit)
            );
            assert_eq!(
                login_key_to_action(KeyCode::Esc, KeyModifiers::NONE, focus),
                Some(LoginAction::Cancel)
            );
        }
        assert_eq!(
            login_key_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL, LoginField::Email),
            Some(LoginAction::Cancel)
        );
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(LoginField::Email.next(), LoginField::Password);
        assert_eq!(LoginField::Password.next(), LoginField::Email);
    }

    #[test]
    fn test_validate_credentials() {
        assert_eq!(validate_credentials("", "pw"), Err("Email is required"));
        assert_eq!(
            validate_credentials("staff", "pw"),
            Err("Enter a valid email address")
        );
        assert_eq!(
            validate_credentials("staff@example.com", ""),
            Err("Password is required")
        );
        assert_eq!(validate_credentials(" staff@example.com ", "pw"), Ok(()));
    }

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("pässwd"), "••••••");
    }
}
