//! Send a single email through the transactional email API
//!
//! Demonstrates wiring the client from the environment and sending either a
//! template email or a direct email.
//!
//! ## Usage
//!
//! Configure the client:
//! ```bash
//! export TRANSACTIONAL_EMAIL_BASE_URL="http://127.0.0.1:8000/api"
//! export TRANSACTIONAL_EMAIL_LOGIN_EMAIL="ops@example.com"
//! export TRANSACTIONAL_EMAIL_LOGIN_PASSWORD="secret"
//! export APP_ID="5d1c8a34-9f0e-4a5b-8a7e-0c2f1e3d4b6a"
//! ```
//!
//! Direct send:
//! ```bash
//! cargo run -p send-email -- noreply@example.com ann@example.com "Hello" "Plain body"
//! ```
//!
//! Template send (variables as JSON):
//! ```bash
//! DEMO_TEMPLATE_KEY=welcome cargo run -p send-email -- noreply@example.com ann@example.com '{"name":"Ann"}'
//! ```

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use transactional_email_client::{provider, DirectEmail, TemplateEmail, TemplateVariables};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [from, to, rest @ ..] = args.as_slice() else {
        eprintln!("usage: send-email <from> <to> <subject|variables> [body]");
        return Ok(ExitCode::from(2));
    };

    let client = provider::global_or_init_from_env()?;

    let response = if let Ok(template_key) = std::env::var("DEMO_TEMPLATE_KEY") {
        let variables = match rest.first() {
            Some(raw) => match serde_json::from_str(raw) {
                Ok(serde_json::Value::Object(map)) => TemplateVariables::Structured(map),
                _ => TemplateVariables::Raw(raw.clone()),
            },
            None => TemplateVariables::Raw("{}".to_string()),
        };
        let email = TemplateEmail::new(from.as_str(), to.as_str(), template_key, variables);
        client.send_template_email(&email, None).await?
    } else {
        let subject = rest.first().cloned().unwrap_or_default();
        let mut email = DirectEmail::new(from.as_str(), to.as_str(), subject);
        if let Some(body) = rest.get(1) {
            email = email.with_body(body.as_str());
        }
        client.send_direct_email(&email, None).await?
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(ExitCode::SUCCESS)
}
