use anyhow::{Context, Result};
use atelier_core::cart::CartCandidate;
use atelier_core::status::{OrderStatus, StatusObservation};
use atelier_core::{Identity, Role};
use atelier_session::{SessionEngine, StatusFeed};
use std::time::Duration;

pub fn cmd_sign_in(engine: &SessionEngine, id: String, role: Role) -> Result<()> {
    if id.trim().is_empty() {
        anyhow::bail!("Identity ID cannot be empty");
    }
    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("Identity ID must use only a-z, 0-9, - and _");
    }

    engine.identity().sign_in(Identity {
        id: id.clone(),
        role,
    });
    println!("Signed in as '{}' ({}).", id, role.as_str());
    println!("   Cart items: {}", engine.cart().item_count());
    Ok(())
}

pub fn cmd_sign_out(engine: &SessionEngine) -> Result<()> {
    if engine.identity().current().is_guest() {
        println!("Nobody is signed in.");
        return Ok(());
    }
    engine.identity().sign_out();
    println!("Signed out. Browsing as guest.");
    Ok(())
}

pub fn cmd_whoami(engine: &SessionEngine) -> Result<()> {
    match engine.identity().current().user() {
        Some(user) => println!("{} ({})", user.id, user.role.as_str()),
        None => println!("guest"),
    }
    Ok(())
}

pub fn cmd_cart_add(engine: &SessionEngine, candidate: CartCandidate) -> Result<()> {
    let name = candidate.name.clone();
    let line_id = engine.cart().add_item(candidate)?;
    println!(":: Added '{}' to the cart (line {})", name, line_id);
    println!("   Items: {}", engine.cart().item_count());
    println!("   Total: {}", engine.cart().total());
    Ok(())
}

pub fn cmd_cart_list(engine: &SessionEngine) -> Result<()> {
    let items = engine.cart().items();
    if items.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    println!("{:<36} {:<28} {:<12} {:<4}", "ID", "NAME", "PRICE", "QTY");
    println!("{:-<36} {:-<28} {:-<12} {:-<4}", "", "", "", "");
    for item in &items {
        println!(
            "{:<36} {:<28} {:<12} {:<4}",
            item.id,
            item.name,
            item.price.to_string(),
            item.quantity
        );
    }
    println!();
    println!("   Items: {}", engine.cart().item_count());
    println!("   Total: {}", engine.cart().total());
    Ok(())
}

pub fn cmd_cart_remove(engine: &SessionEngine, item_id: &str) -> Result<()> {
    if !engine.cart().items().iter().any(|line| line.id == item_id) {
        anyhow::bail!("No cart line with ID '{}'", item_id);
    }
    engine.cart().remove_item(item_id);
    println!("Removed '{}' from the cart.", item_id);
    println!("   Items: {}", engine.cart().item_count());
    println!("   Total: {}", engine.cart().total());
    Ok(())
}

pub fn cmd_cart_qty(engine: &SessionEngine, item_id: &str, qty: i64) -> Result<()> {
    if !engine.cart().items().iter().any(|line| line.id == item_id) {
        anyhow::bail!("No cart line with ID '{}'", item_id);
    }
    engine.cart().update_quantity(item_id, qty);
    if qty <= 0 {
        println!("Removed '{}' from the cart.", item_id);
    } else {
        println!("Set '{}' to quantity {}.", item_id, qty);
    }
    println!("   Items: {}", engine.cart().item_count());
    println!("   Total: {}", engine.cart().total());
    Ok(())
}

pub fn cmd_cart_clear(engine: &SessionEngine) -> Result<()> {
    engine.cart().clear();
    println!("Cart cleared.");
    Ok(())
}

pub fn cmd_notifications_list(engine: &SessionEngine, unread_only: bool) -> Result<()> {
    let shown: Vec<_> = engine
        .notifications()
        .list()
        .into_iter()
        .filter(|n| !unread_only || !n.is_read)
        .collect();

    if shown.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    println!("{:<36} {:<7} {:<26} {}", "ID", "STATE", "TITLE", "MESSAGE");
    println!("{:-<36} {:-<7} {:-<26} {:-<40}", "", "", "", "");
    for n in &shown {
        let state = if n.is_read { "read" } else { "unread" };
        println!("{:<36} {:<7} {:<26} {}", n.id, state, n.title, n.message);
    }
    println!();
    println!("   Unread: {}", engine.notifications().unread_count());
    Ok(())
}

pub fn cmd_notifications_read(engine: &SessionEngine, id: &str) -> Result<()> {
    if !engine.notifications().list().iter().any(|n| n.id == id) {
        anyhow::bail!("Notification '{}' not found", id);
    }
    engine.notifications().mark_read(id);
    println!("Notification '{}' marked as read.", id);
    println!("   Unread: {}", engine.notifications().unread_count());
    Ok(())
}

pub fn cmd_notifications_read_all(engine: &SessionEngine) -> Result<()> {
    engine.notifications().mark_all_read();
    println!("All notifications marked as read.");
    Ok(())
}

pub fn cmd_notifications_remove(engine: &SessionEngine, id: &str) -> Result<()> {
    if !engine.notifications().list().iter().any(|n| n.id == id) {
        anyhow::bail!("Notification '{}' not found", id);
    }
    engine.notifications().remove(id);
    println!("Notification '{}' removed.", id);
    Ok(())
}

pub fn cmd_notifications_clear(engine: &SessionEngine) -> Result<()> {
    engine.notifications().clear_all();
    println!("All notifications cleared.");
    Ok(())
}

pub fn cmd_order_observe(
    engine: &SessionEngine,
    observation: &StatusObservation,
) -> Result<Option<String>> {
    if observation.order_id.trim().is_empty() {
        anyhow::bail!("Order ID cannot be empty");
    }

    println!(
        ":: Observing order {} at status '{}'",
        observation.order_id, observation.status
    );
    let emitted = engine.watcher().observe(observation);
    report_emission(engine, &emitted);
    Ok(emitted)
}

pub async fn cmd_order_poll(
    engine: &SessionEngine,
    feed: &dyn StatusFeed,
    order_id: &str,
) -> Result<Option<String>> {
    println!(":: Polling status of order {}...", order_id);
    let emitted = engine
        .watcher()
        .poll(feed, order_id)
        .await
        .context("Failed to fetch order status")?;
    report_emission(engine, &emitted);
    Ok(emitted)
}

pub async fn cmd_order_watch(
    engine: &SessionEngine,
    feed: &dyn StatusFeed,
    order_id: &str,
    interval_secs: u64,
) -> Result<()> {
    let interval = atelier_config::clamp_poll_interval(interval_secs);
    println!(
        ":: Watching order {} (every {}s, stops when delivered)...",
        order_id, interval
    );

    loop {
        match feed.fetch_status(order_id).await {
            Ok(observation) => {
                let emitted = engine.watcher().observe(&observation);
                if emitted.is_some() {
                    report_emission(engine, &emitted);
                }
                if OrderStatus::parse(&observation.status).is_some_and(|s| s.is_terminal()) {
                    println!(":: Order {} delivered.", order_id);
                    return Ok(());
                }
            }
            Err(e) => tracing::warn!("status fetch failed, will retry: {}", e),
        }
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}

fn report_emission(engine: &SessionEngine, emitted: &Option<String>) {
    match emitted {
        Some(id) => {
            let title = engine
                .notifications()
                .list()
                .into_iter()
                .find(|n| n.id == *id)
                .map(|n| n.title)
                .unwrap_or_default();
            println!("   Raised: {}", title);
            println!("   Unread: {}", engine.notifications().unread_count());
        }
        None => println!("   Nothing new to surface."),
    }
}
