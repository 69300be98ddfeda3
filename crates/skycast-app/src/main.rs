use anyhow::Result;

use skycast_app::App;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init();

    let mut app = App::new()?;
    app.start_refresh();

    tracing::info!("Skycast application started");
    println!("Skycast - current weather, 48h forecast and favorite cities");
    println!("Refreshing favorites in the background; press Ctrl+C to exit.");

    tokio::signal::ctrl_c().await?;

    app.shutdown();
    Ok(())
}
