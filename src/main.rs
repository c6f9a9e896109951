mod setup;

use std::io;
use std::sync::Arc;

use screens::input_validators::{EMAIL, PASSWORD, PASSWORD_CONFIRMATION, SUBSCRIBE_TO_UPDATES};
use screens::{ForgotPasswordScreen, LoginScreen, SignupScreen, SubmitOutcome};
use services::{AuthSession, FormValidation, MemoryTokenStore, SandboxAuthApi};
use setup::set_up;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

const USAGE: &str = "usage: authforms <login|signup|forgot-password>";

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Prompt {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> io::Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(format!("{label}: ").as_bytes()).await?;
        stdout.flush().await?;
        Ok(self.lines.next_line().await?.unwrap_or_default())
    }
}

/// Prints the field's error, if any, after it loses focus.
fn blur(form: &FormValidation, field: &str) {
    form.handle_field_blur(field);
    if let Some(error) = form.error(field) {
        println!("  {error}");
    }
}

fn print_errors(form: &FormValidation) {
    let mut errors: Vec<_> = form
        .errors()
        .into_iter()
        .filter_map(|(field, error)| error.map(|e| (field, e)))
        .collect();
    errors.sort();
    for (field, error) in errors {
        println!("{field}: {error}");
    }
}

fn report(outcome: SubmitOutcome, form: &FormValidation) {
    match outcome {
        SubmitOutcome::Invalid => print_errors(form),
        SubmitOutcome::Navigate(route) => println!("-> {route}"),
        SubmitOutcome::Stay => println!("ok"),
        SubmitOutcome::Done(message) => println!("{message}"),
        SubmitOutcome::Failed(message) => println!("error: {message}"),
    }
}

async fn login(session: Arc<AuthSession>, config: &setup::AppConfig, prompt: &mut Prompt) -> io::Result<()> {
    let screen = LoginScreen::new(session, config.validation_options());
    for field in [EMAIL, PASSWORD] {
        let value = prompt.ask(field).await?;
        screen.form().set_value(field, value);
        blur(screen.form(), field);
    }
    report(screen.submit().await, screen.form());
    Ok(())
}

async fn signup(session: Arc<AuthSession>, config: &setup::AppConfig, prompt: &mut Prompt) -> io::Result<()> {
    let screen = SignupScreen::new(session, config.validation_options());
    for field in [EMAIL, PASSWORD, PASSWORD_CONFIRMATION] {
        let value = prompt.ask(field).await?;
        screen.set_field(field, value);
        blur(screen.form(), field);
        if field == PASSWORD {
            let (score, label) = screen.password_strength();
            println!("  strength: {label} ({score}/4)");
        }
    }
    let subscribe = prompt.ask("subscribe to updates [y/N]").await?;
    screen.set_field(SUBSCRIBE_TO_UPDATES, subscribe.trim().eq_ignore_ascii_case("y"));

    report(screen.submit().await, screen.form());
    Ok(())
}

async fn forgot_password(session: Arc<AuthSession>, config: &setup::AppConfig, prompt: &mut Prompt) -> io::Result<()> {
    let screen = ForgotPasswordScreen::new(session, config.validation_options());
    let value = prompt.ask(EMAIL).await?;
    screen.form().set_value(EMAIL, value);
    blur(screen.form(), EMAIL);
    report(screen.submit().await, screen.form());
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = set_up();

    let api = Arc::new(SandboxAuthApi::new(config.failure_rate));
    let session = Arc::new(AuthSession::new(api, Arc::new(MemoryTokenStore::new())));
    let mut prompt = Prompt::new();

    let command = std::env::args().nth(1).unwrap_or_default();
    tracing::info!(command = command.as_str(), "starting");
    match command.as_str() {
        "login" => login(session, &config, &mut prompt).await,
        "signup" => signup(session, &config, &mut prompt).await,
        "forgot-password" => forgot_password(session, &config, &mut prompt).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}
