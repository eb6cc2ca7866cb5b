// vim: set ai et ts=4 sts=4 sw=4:
use std::io;
use std::path::Path;
use std::process;
use clap::{crate_version, App, Arg, ArgMatches};
use log::LevelFilter;

use japanese_crossword::{Board, Error, Format, RunStatus, SolverConfig};
use japanese_crossword::run::{self, solve_puzzle};
use japanese_crossword::util::is_a_tty;

const EXIT_ERROR: i32 = 5;

fn app() -> App<'static, 'static> {
    App::new("jcross")
        .version(crate_version!())
        .about("Solves Japanese crosswords (nonograms) by line-wise deduction")
        .arg(Arg::with_name("INPUT")
                 .help("Puzzle definition (text format, or YAML with a .yaml/.yml extension)")
                 .required(true)
                 .index(1))
        .arg(Arg::with_name("OUTPUT")
                 .help("Where to write the solved grid; stdout when omitted")
                 .index(2))
        .arg(Arg::with_name("format")
                 .long("format")
                 .value_name("FORMAT")
                 .help("Input format")
                 .takes_value(true)
                 .possible_values(&["auto", "text", "yaml"])
                 .default_value("auto"))
        .arg(Arg::with_name("threads")
                 .long("threads")
                 .short("j")
                 .value_name("N")
                 .help("Worker threads for line evaluation (default: one per core)")
                 .takes_value(true)
                 .validator(|v| v.parse::<usize>().map(|_| ()).map_err(|e| e.to_string())))
        .arg(Arg::with_name("pretty")
                 .long("pretty")
                 .short("p")
                 .help("Print a boxed board with the clues instead of the plain grid")
                 .conflicts_with("OUTPUT"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("More log output (repeat for more)"))
        .arg(Arg::with_name("quiet")
                 .short("q")
                 .long("quiet")
                 .help("No log output")
                 .conflicts_with("verbose"))
}

fn log_level(matches: &ArgMatches<'_>) -> LevelFilter {
    if matches.is_present("quiet") {
        return LevelFilter::Off;
    }
    match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn setup_logging(level: LevelFilter) -> Result<(), Error> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn execute(matches: &ArgMatches<'_>) -> Result<RunStatus, Error> {
    let input = Path::new(matches.value_of("INPUT").unwrap_or(""));
    let format = match matches.value_of("format") {
        Some("text") => Some(Format::Text),
        Some("yaml") => Some(Format::Yaml),
        _            => None,
    };
    let config = SolverConfig {
        threads: matches.value_of("threads").and_then(|v| v.parse().ok()),
    };

    if let Some(output) = matches.value_of("OUTPUT") {
        return run::solve_files(input, Path::new(output), format, config);
    }

    let puzzle = match run::read_puzzle(input, format)? {
        Some(puzzle) => puzzle,
        None         => return Ok(RunStatus::BadInputFilePath),
    };
    let report = solve_puzzle(&puzzle, config)?;
    if matches.is_present("pretty") {
        let mut board = Board::new(&puzzle, &report.grid);
        board.emit_color = is_a_tty(io::stdout());
        print!("{}", board);
    } else {
        let stdout = io::stdout();
        report.write_to(stdout.lock())?;
    }
    Ok(RunStatus::from(report.status))
}

fn main() {
    let matches = app().get_matches();
    if let Err(err) = setup_logging(log_level(&matches)) {
        eprintln!("{}", err);
        process::exit(EXIT_ERROR);
    }

    match execute(&matches) {
        Ok(status) => {
            eprintln!("{}", status);
            process::exit(status.exit_code());
        }
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(EXIT_ERROR);
        }
    }
}
