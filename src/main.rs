use std::process::ExitCode;

use termo_solver::cli::{Cli, CliInterface, parse_cli};
use termo_solver::corpus::Corpus;
use termo_solver::error::Result;
use termo_solver::info_log;
use termo_solver::logging::{LogTarget, init_logging};
use termo_solver::session::play_games;
use termo_solver::stats::BatchSummary;
use termo_solver::tui::TuiInterface;

fn run(cli: &Cli) -> Result<()> {
    let corpus = match &cli.wordlist_path {
        Some(path) => Corpus::load_from_file(path)?,
        None => Corpus::embedded()?,
    };
    info_log!("Loaded {} words", corpus.len());

    let config = cli.solver_config()?;
    let presentation = cli.presentation();
    let secret = cli.secret_word()?;
    let games = cli.games as usize;

    if cli.tui {
        let mut interface = TuiInterface::new(presentation)?;
        play_games(&corpus, &config, secret, games, &mut interface)?;
        interface.cleanup()?;
    } else if games > 1 {
        let mut summary = BatchSummary::new();
        play_games(&corpus, &config, secret, games, &mut summary)?;
        print!("{summary}");
    } else {
        let mut interface = CliInterface::stdout(presentation);
        play_games(&corpus, &config, secret, games, &mut interface)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(if cli.tui {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
