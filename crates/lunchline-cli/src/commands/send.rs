use std::io::{self, BufRead, Write};

use clap::Args;
use lunchline_core::{
    AlwaysConfirm, ChatLinkTransport, ConfirmationGate, Config, NoopHook, ReasonCode,
    SendOutcome,
};

use super::{build_session, OrderArgs};

#[derive(Args, Debug, Clone, Default)]
pub struct SendOptions {
    /// Send blocked orders without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Open the chat link in the default browser
    #[arg(long)]
    pub open: bool,
}

/// Asks on stderr and reads the answer from stdin.
struct StdinGate;

impl ConfirmationGate for StdinGate {
    fn confirm(&mut self, _reason: Option<ReasonCode>, advisory: &str) -> bool {
        eprint!("{advisory} Send anyway? [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn run(args: OrderArgs, options: SendOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let transport = ChatLinkTransport::new(&config.contact.number, options.open)?;
    let mut session = build_session(&config, &args, NoopHook)?;

    let outcome = if options.yes {
        session.send(&transport, &mut AlwaysConfirm)?
    } else {
        session.send(&transport, &mut StdinGate)?
    };

    match outcome {
        SendOutcome::EmptyOrder => Err("Please select your order.".into()),
        SendOutcome::Declined(_) => {
            eprintln!("not sent");
            Ok(())
        }
        SendOutcome::Sent(delivery) => {
            println!("{}", delivery.link);
            Ok(())
        }
    }
}
