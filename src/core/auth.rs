//! Interactive authentication.
//!
//! [`Authenticator`] walks a small state machine: check the current status
//! (unless forced), optionally confirm reauthentication, collect the
//! credentials, then log in. Terminal interaction goes through [`Prompt`] so
//! the flow can run against a real terminal or scripted input.

use std::io::{BufRead, Write};

use console::{Key, Term};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::MASK_CHAR;
use crate::core::remote::AuthService;
use crate::error::{AuthError, PromptError, Result};

/// Line oriented terminal interaction.
pub trait Prompt {
    /// Print a line.
    fn say(&mut self, message: &str) -> std::result::Result<(), PromptError>;

    /// Ask a question and return the answer without its line ending.
    fn ask(&mut self, question: &str) -> std::result::Result<String, PromptError>;

    /// Ask a question, echoing one mask character per input character.
    fn ask_masked(&mut self, question: &str) -> std::result::Result<String, PromptError>;
}

/// Prompt over arbitrary reader and writer. Used for piped input.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> std::result::Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn say(&mut self, message: &str) -> std::result::Result<(), PromptError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> std::result::Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_answer()
    }

    fn ask_masked(&mut self, question: &str) -> std::result::Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let answer = self.read_answer()?;
        let mask: String = std::iter::repeat(MASK_CHAR)
            .take(answer.chars().count())
            .collect();
        writeln!(self.output, "{}", mask)?;
        Ok(answer)
    }
}

/// Prompt on an interactive terminal, masking passwords key by key.
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Prompt for TermPrompt {
    fn say(&mut self, message: &str) -> std::result::Result<(), PromptError> {
        self.term.write_line(message)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> std::result::Result<String, PromptError> {
        self.term.write_str(question)?;
        Ok(self.term.read_line()?)
    }

    fn ask_masked(&mut self, question: &str) -> std::result::Result<String, PromptError> {
        self.term.write_str(question)?;

        let mut answer = String::new();
        loop {
            match self.term.read_key()? {
                Key::Enter => break,
                Key::Backspace => {
                    if answer.pop().is_some() {
                        self.term.clear_chars(1)?;
                    }
                }
                Key::Char(c) if !c.is_control() => {
                    answer.push(c);
                    self.term.write_str(&MASK_CHAR.to_string())?;
                }
                Key::CtrlC | Key::Escape => {
                    self.term.write_line("")?;
                    return Err(PromptError::Closed);
                }
                _ => {}
            }
        }

        self.term.write_line("")?;
        Ok(answer)
    }
}

/// How an authentication run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Logged in and the credential was accepted.
    Authenticated { username: String },
    /// Already authenticated and reauthentication was declined.
    Kept { user: Option<String> },
    /// The server rejected the credentials.
    Rejected { username: String },
}

enum Step {
    Start,
    AskCredentials,
    Login {
        username: String,
        password: Zeroizing<String>,
    },
    Done(Outcome),
}

/// Interactive login flow against an [`AuthService`].
pub struct Authenticator<'a, A: ?Sized, P> {
    service: &'a A,
    prompt: P,
    username: Option<String>,
    password: Option<Zeroizing<String>>,
    force: bool,
}

impl<'a, A, P> Authenticator<'a, A, P>
where
    A: AuthService + ?Sized,
    P: Prompt,
{
    pub fn new(service: &'a A, prompt: P) -> Self {
        Self {
            service,
            prompt,
            username: None,
            password: None,
            force: false,
        }
    }

    /// Use this username instead of asking for one.
    pub fn username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|u| !u.is_empty());
        self
    }

    /// Use this password instead of asking for one.
    pub fn password(mut self, password: Option<String>) -> Self {
        self.password = password.filter(|p| !p.is_empty()).map(Zeroizing::new);
        self
    }

    /// Skip the status check and always ask for credentials.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Run the flow to completion.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StatusCheck` if the status check fails,
    /// `AuthError::LoginFailed` if the login call fails, or a `PromptError`
    /// if the terminal goes away.
    pub async fn run(mut self) -> Result<Outcome> {
        let mut step = Step::Start;
        loop {
            step = match step {
                Step::Start => self.start().await?,
                Step::AskCredentials => self.ask_credentials()?,
                Step::Login { username, password } => self.login(username, password).await?,
                Step::Done(outcome) => return Ok(outcome),
            };
        }
    }

    async fn start(&mut self) -> Result<Step> {
        if self.force {
            debug!("forced reauthentication");
            return Ok(Step::AskCredentials);
        }

        let authenticated = self
            .service
            .is_authenticated()
            .await
            .map_err(|e| AuthError::StatusCheck(e.to_string()))?;
        if !authenticated {
            return Ok(Step::AskCredentials);
        }

        let user = match self.service.current_user().await {
            Ok(user) => user,
            Err(e) => {
                debug!(error = %e, "current user unavailable");
                None
            }
        };
        let question = match &user {
            Some(name) => format!(
                "You are currently authenticated as {}, do you want to reauthenticate? (Y/N) ",
                name
            ),
            None => "You are currently authenticated, do you want to reauthenticate? (Y/N) "
                .to_string(),
        };

        let answer = self.prompt.ask(&question)?;
        if answer.trim().eq_ignore_ascii_case("y") {
            Ok(Step::AskCredentials)
        } else {
            Ok(Step::Done(Outcome::Kept { user }))
        }
    }

    fn ask_credentials(&mut self) -> Result<Step> {
        let username = match self.username.take() {
            Some(username) => username,
            None => self.prompt.ask("Username: ")?,
        };
        let password = match self.password.take() {
            Some(password) => password,
            None => Zeroizing::new(self.prompt.ask_masked("Password: ")?),
        };
        Ok(Step::Login { username, password })
    }

    async fn login(&mut self, username: String, password: Zeroizing<String>) -> Result<Step> {
        self.prompt.say(&format!(
            "Attempting to login {}, using provided password:",
            username
        ))?;

        let accepted = self
            .service
            .login(&username, password.as_str())
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        Ok(Step::Done(if accepted {
            Outcome::Authenticated { username }
        } else {
            Outcome::Rejected { username }
        }))
    }
}
