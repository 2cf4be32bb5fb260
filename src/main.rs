use hangman::cli::{CliInterface, parse_cli};
use hangman::config::{default_log_path, default_scores_path};
use hangman::logging::{LogSink, init_logging};
use hangman::tui::TuiInterface;
use hangman::{ScoreStore, game_loop};
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = parse_cli();
    let log_path = default_log_path();
    let sink = if cli.plain {
        LogSink::Stderr
    } else {
        LogSink::File(&log_path)
    };
    init_logging(cli.verbose, &sink)?;

    let store = ScoreStore::new(cli.scores_path.unwrap_or_else(default_scores_path));
    log::info!(
        "starting {} game, scores in {}",
        cli.difficulty,
        store.path().display()
    );

    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut interface, &store, cli.difficulty)?;
    } else {
        let mut interface = TuiInterface::new()?;
        let result = game_loop(&mut interface, &store, cli.difficulty);
        // Restore the terminal before any error is printed
        drop(interface);
        result?;
    }
    Ok(())
}
