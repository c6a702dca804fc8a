use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use lunch_pick::config::Config;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let state = web::Data::new(api::ApiState::new(&config).await?);

    tracing::info!("serving restaurants on http://{}", config.api_addr);
    let origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&origin)
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(config.api_addr)?
    .run()
    .await?;
    Ok(())
}
