use crate::core::AppConfig;

pub fn run() {
    let config = AppConfig::default();

    if config.providers.is_empty() {
        println!("No providers configured. Replies will come from the offline tables.");
        return;
    }

    for (i, provider) in config.providers.iter().enumerate() {
        println!(
            "{}. {} {} model={}",
            i + 1,
            provider.name,
            provider.endpoint,
            provider.model.as_deref().unwrap_or("-")
        );
    }
}
