use dale_client::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let client = DaleClient::from_env()?;
    if client.auth().restore_session().await.is_none() {
        warn!("No stored session, log in with countdown_example first");
        return Ok(());
    }

    let draft = NewNote::new("Groceries", "milk, eggs", "groceries");
    match client.notes().create(&draft).await {
        Ok(note) => info!("✓ Created note {}", note.id),
        Err(e) if e.is_validation() => warn!("Rejected: {}", e),
        Err(e) => return Err(e.into()),
    }

    let page = client
        .notes()
        .list(&ListParams::new().with_limit(20).with_where("archived = false"))
        .await?;
    for note in page.items {
        info!("{} ({})", note.title, note.slug);
    }

    Ok(())
}
