use dale_client::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    setup_logger();

    info!("Starting countdown example");
    let client = DaleClient::from_env()?;

    if let Some(user) = client.auth().restore_session().await {
        info!("✓ Restored session for {}", user.username);
    } else {
        let identity = env::var("DALE_IDENTITY")?;
        let password = env::var("DALE_PASSWORD")?;
        let result = client.auth().login(&identity, &password).await?;
        info!("✓ Logged in as {}", result.record.username);
    }

    let events = client
        .events()
        .list(&ListParams::new().with_order("-created"))
        .await?;
    let now = Utc::now();
    for event in &events.items {
        match event.progress(now) {
            Some(p) => info!(
                "{}: {} days left ({}% of {} days)",
                event.title, p.days_left, p.percent, p.total_days
            ),
            None => warn!("{}: unreadable dates", event.title),
        }
    }
    info!("{} of {} events shown", events.items.len(), events.total);

    Ok(())
}
