use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime};
use clap::Args;
use lunchline_core::{
    Clock, ClockReader, Config, FixedClock, SessionContext, SessionController, SystemClock,
    UiHook,
};

pub mod compose;
pub mod config;
pub mod menu;
pub mod send;
pub mod status;
pub mod watch;

/// Order and session flags shared by the evaluating commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OrderArgs {
    /// Session mode: "normal", or "inhouse"/"onsite" for walk-in customers
    #[arg(long)]
    pub mode: Option<String>,
    /// Session link (e.g. from a table QR code); its `modo` parameter sets the mode
    #[arg(long, conflicts_with = "mode")]
    pub link: Option<String>,
    /// Evaluate at this local time instead of now ("YYYY-MM-DD HH:MM" or "HH:MM")
    #[arg(long, value_parser = parse_at)]
    pub at: Option<NaiveDateTime>,
    /// Menu item, as ID or ID=QTY (repeatable)
    #[arg(long = "item", value_parser = parse_item)]
    pub items: Vec<(String, u32)>,
    /// Extra id (repeatable)
    #[arg(long = "extra")]
    pub extras: Vec<String>,
}

impl OrderArgs {
    /// Link beats mode flag beats configured default.
    pub fn context(&self, config: &Config) -> SessionContext {
        match (&self.link, &self.mode) {
            (Some(link), _) => SessionContext::from_url(link),
            (None, Some(mode)) => SessionContext::from_signal(Some(mode.as_str())),
            (None, None) => config.default_context(),
        }
    }

    pub fn clock(&self) -> CliClock {
        match self.at {
            Some(at) => CliClock::Fixed(FixedClock::from_naive(at)),
            None => CliClock::System(SystemClock),
        }
    }
}

/// Wall clock, or a fixed instant from `--at`.
#[derive(Debug, Clone, Copy)]
pub enum CliClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for CliClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self {
            CliClock::System(c) => c.now(),
            CliClock::Fixed(c) => c.now(),
        }
    }
}

/// Start a session from config and flags and apply the requested order.
pub fn build_session<H: UiHook>(
    config: &Config,
    args: &OrderArgs,
    hook: H,
) -> Result<SessionController<CliClock, H>, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let reader = ClockReader::new(args.clock(), config.schedule.clone());
    let mut session = SessionController::start(args.context(config), catalog, reader, hook);
    for (id, qty) in &args.items {
        session.add_item(id, *qty)?;
    }
    for id in &args.extras {
        session.toggle_extra(id)?;
    }
    Ok(session)
}

fn parse_item(s: &str) -> Result<(String, u32), String> {
    match s.split_once('=') {
        Some((id, qty)) => {
            let qty = qty
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid quantity in '{s}'"))?;
            Ok((id.trim().to_string(), qty))
        }
        None => Ok((s.trim().to_string(), 1)),
    }
}

fn parse_at(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(at);
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map(|t| Local::now().date_naive().and_time(t))
        .map_err(|_| format!("expected \"YYYY-MM-DD HH:MM\" or \"HH:MM\", got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunchline_core::{CoreError, NoopHook, SessionMode, ValidationError};

    fn order_args(items: &[(&str, u32)]) -> OrderArgs {
        OrderArgs {
            at: parse_at("2026-01-15 08:00").ok(),
            items: items.iter().map(|(id, q)| (id.to_string(), *q)).collect(),
            ..OrderArgs::default()
        }
    }

    #[test]
    fn parse_item_defaults_to_one() {
        assert_eq!(parse_item("A"), Ok(("A".to_string(), 1)));
        assert_eq!(parse_item("MAIN_B=3"), Ok(("MAIN_B".to_string(), 3)));
        assert!(parse_item("A=lots").is_err());
    }

    #[test]
    fn parse_at_accepts_date_time_and_time() {
        let at = parse_at("2026-01-15 08:00").unwrap();
        assert_eq!(at.format("%d/%m/%Y %H:%M").to_string(), "15/01/2026 08:00");
        let today = parse_at("13:30").unwrap();
        assert_eq!(today.format("%H:%M").to_string(), "13:30");
        assert!(parse_at("noon").is_err());
    }

    #[test]
    fn repeated_items_are_summed() {
        let args = order_args(&[("A", 2), ("B", 1), ("A", 3)]);
        let session = build_session(&Config::default(), &args, NoopHook).unwrap();
        assert_eq!(session.order().quantity_of("A"), 5);
        assert_eq!(session.order().total_items(), 6);
    }

    #[test]
    fn repeated_items_overflowing_u32_are_rejected() {
        let args = order_args(&[("A", u32::MAX), ("A", 1)]);
        let err = build_session(&Config::default(), &args, NoopHook)
            .err()
            .unwrap();
        let err = err.downcast::<CoreError>().unwrap();
        assert!(matches!(
            *err,
            CoreError::Validation(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn huge_quantities_of_different_items_are_fine() {
        let args = order_args(&[("A", u32::MAX), ("B", 1)]);
        let session = build_session(&Config::default(), &args, NoopHook).unwrap();
        assert_eq!(session.order().total_items(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn context_precedence() {
        let mut config = Config::default();
        config.session.default_mode = "inhouse".into();

        let args = OrderArgs::default();
        assert_eq!(args.context(&config).mode, SessionMode::Onsite);

        let args = OrderArgs {
            mode: Some("normal".into()),
            ..OrderArgs::default()
        };
        assert_eq!(args.context(&config).mode, SessionMode::Normal);

        let args = OrderArgs {
            link: Some("https://lunch.example/?modo=inhouse".into()),
            ..OrderArgs::default()
        };
        assert_eq!(args.context(&Config::default()).mode, SessionMode::Onsite);
    }
}
