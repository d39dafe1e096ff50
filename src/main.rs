use actix_web::{middleware, web, App, HttpServer};

use mechease::{config::Config, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config).map_err(|err| format!("admin password hash failed: {err}"))?;

    let address = config.address();
    log::info!("Starting {} on http://{address}", config.shop_name);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(mechease::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
