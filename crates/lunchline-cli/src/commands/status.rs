use lunchline_core::{Config, NoopHook};

use super::{build_session, OrderArgs};

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let session = build_session(&config, &args, NoopHook)?;

    let status = serde_json::json!({
        "context": session.context(),
        "snapshot": session.snapshot(),
        "evaluation": session.evaluation(),
        "order": session.order(),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
