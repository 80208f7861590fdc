use std::sync::Arc;

use mazeline::{
    app::{App, MazeSession},
    config::Config,
    logging::{self, PanelLogger},
};

fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    let _log_guard = logging::init(&config)?;
    // Read again now that warnings about bad values have somewhere to go
    let config = Config::from_env();
    tracing::info!("[main] starting with {:?}", config);

    let (logger, solve_log) = PanelLogger::new();
    let mut session = MazeSession::new(&config, Arc::new(logger));
    let mut app = App::new(&config, solve_log);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, &mut session);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("[main] exiting with error: {}", e);
    }
    result
}
