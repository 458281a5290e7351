use exam_ivr::app::{App, Route};
use exam_ivr::config::ExamConfig;
use exam_ivr::{error, Result};
use std::fs::{self, File};

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("{}", error::user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Route is resolved before the terminal is taken over
    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let route = Route::resolve(&path)?;

    let config = ExamConfig::load()?;

    let mut app = App::new(&config, route)?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;
    result
}

/// Logs go to a file while the terminal UI owns the screen.
/// Nothing is logged unless `RUST_LOG` is set.
fn init_logging() {
    let Ok(filters) = std::env::var("RUST_LOG") else {
        return;
    };

    let file = ExamConfig::log_file_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok((File::create(&path)?, path))
    });

    match file {
        Ok((file, path)) => {
            let initialised = pretty_env_logger::formatted_builder()
                .parse_filters(&filters)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never)
                .try_init();
            if initialised.is_ok() {
                log::info!("logging to {}", path.display());
            }
        }
        Err(e) => eprintln!("logging disabled: {}", error::user_friendly_message(&e)),
    }
}
