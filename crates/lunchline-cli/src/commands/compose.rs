use lunchline_core::{Config, NoopHook};

use super::{build_session, OrderArgs};

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = build_session(&config, &args, NoopHook)?;

    match session.message() {
        Some(message) => println!("{message}"),
        None => eprintln!("Please select your order."),
    }
    Ok(())
}
