use lunch_pick::{config::Config, ListController, Snapshot, SqliteStorage};

mod actions;

const DEFAULT_DATABASE_URL: &str = "sqlite:lunch.db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is for command output
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let arguments = args.iter().map(String::as_str).collect::<Vec<_>>();
    let action = match actions::Action::new(&arguments) {
        Ok(action) => action,
        Err(hint) => {
            eprintln!("{hint}\n\n{}", actions::USAGE);
            std::process::exit(2);
        }
    };

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .unwrap_or(DEFAULT_DATABASE_URL);
    let storage = SqliteStorage::connect(database_url).await?;
    let mut controller =
        ListController::init(storage, Snapshot::default(), config.default_sort).await?;

    let output = action.run(&mut controller).await?;
    println!("{output}");
    Ok(())
}
