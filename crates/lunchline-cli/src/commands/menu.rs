use lunchline_core::Config;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Items:");
    for item in &catalog.items {
        match &item.todays_detail {
            Some(detail) => println!("  {:<10} {} {} ({detail})", item.id, item.icon, item.name),
            None => println!("  {:<10} {} {}", item.id, item.icon, item.name),
        }
    }
    if !catalog.extras.is_empty() {
        println!("Extras:");
        for extra in &catalog.extras {
            println!("  {:<10} {} {}", extra.id, extra.icon, extra.name);
        }
    }
    Ok(())
}
