use std::fmt;
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use quiz_core::Clock;
use quiz_core::model::{Question, QuizConfig, QuizConfigError};
use services::load_bank;
use services::sessions::{
    OptionTag, QuestionViewMode, QuizSession, SessionLoopService, SessionView,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    Config(QuizConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_flag_number(flag: &'static str, raw: &str) -> Result<u32, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_owned(),
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--file <questions.json>] [--sets <n>] [--minutes <n>] [--threshold <percent>] [--seed <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --file questions.json");
    eprintln!("  --sets 3");
    eprintln!("  --minutes 20");
    eprintln!("  --threshold 70");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_SEED");
}

struct Args {
    file: String,
    config: QuizConfig,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut file = std::env::var("QUIZ_FILE")
            .ok()
            .unwrap_or_else(|| "questions.json".into());
        let mut seed = std::env::var("QUIZ_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let defaults = QuizConfig::default_exam();
        let mut sets = defaults.requested_sets();
        let mut minutes = defaults.time_limit_minutes();
        let mut threshold = defaults.pass_threshold_percent();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    file = require_value(args, "--file")?;
                }
                "--sets" => {
                    let value = require_value(args, "--sets")?;
                    sets = parse_flag_number("--sets", &value)?;
                }
                "--minutes" => {
                    let value = require_value(args, "--minutes")?;
                    minutes = parse_flag_number("--minutes", &value)?;
                }
                "--threshold" => {
                    let value = require_value(args, "--threshold")?;
                    threshold = parse_flag_number("--threshold", &value)?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(value.parse::<u64>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--seed",
                        raw: value.clone(),
                    })?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let config = QuizConfig::new(sets, minutes, threshold).map_err(ArgsError::Config)?;
        Ok(Self { file, config, seed })
    }
}

enum LoopControl {
    Continue,
    Quit,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let bank = load_bank(&args.file)?;
    log::info!("loaded {} questions from {}", bank.len(), args.file);

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let service = SessionLoopService::new(Clock::default_clock());
    let mut session = service.start_session(bank.clone(), args.config.clone(), rng.as_mut())?;
    log::info!("attempt started with {} sets", session.set_count());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if service.tick(&mut session) {
            log::info!("time limit reached, attempt submitted automatically");
            println!("Time is up. Your answers were submitted.");
        }

        render(&SessionView::project(&session, service.now()));

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let control = apply_command(
            line.trim(),
            &service,
            &mut session,
            &bank,
            &args.config,
            rng.as_mut(),
        )?;
        if matches!(control, LoopControl::Quit) {
            break;
        }
    }

    Ok(())
}

fn apply_command(
    line: &str,
    service: &SessionLoopService,
    session: &mut QuizSession,
    bank: &[Question],
    config: &QuizConfig,
    rng: &mut dyn RngCore,
) -> Result<LoopControl, Box<dyn std::error::Error>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        // An empty line just re-renders, which also re-checks the timer.
        [] => {}
        ["help"] => print_commands(),
        ["a", question, option] => answer(session, question, option),
        ["set", raw] => {
            let Some(number) = parse_index(raw) else {
                println!("set number must be 1 or higher");
                return Ok(LoopControl::Continue);
            };
            if let Err(err) = session.select_set(number - 1) {
                println!("cannot switch set: {err}");
            }
        }
        ["submit"] => match session.submit() {
            Ok(()) => log::info!("attempt submitted manually"),
            Err(err) => println!("cannot submit: {err}"),
        },
        ["review"] => match session.toggle_review() {
            Ok(enabled) => println!("review mode {}", if enabled { "on" } else { "off" }),
            Err(err) => println!("cannot toggle review: {err}"),
        },
        ["reset"] => {
            service.restart(session);
            log::info!("attempt restarted");
        }
        ["new"] => {
            *session = service.start_session(bank.to_vec(), config.clone(), rng)?;
            log::info!("new attempt over a fresh partition");
        }
        ["quit" | "q" | "exit"] => return Ok(LoopControl::Quit),
        _ => println!("unrecognized command; type 'help'"),
    }

    Ok(LoopControl::Continue)
}

fn answer(session: &mut QuizSession, question_raw: &str, option_raw: &str) {
    let Some(question_number) = parse_index(question_raw) else {
        println!("question number must be 1 or higher");
        return;
    };
    let Some(option_number) = parse_index(option_raw) else {
        println!("option number must be 1 or higher");
        return;
    };

    let question_index = question_number - 1;
    let Some(question) = session.active_set().get(question_index) else {
        println!("this set has no question {question_number}");
        return;
    };
    let Some(option) = question.options().get(option_number - 1).cloned() else {
        println!("question {question_number} has no option {option_number}");
        return;
    };

    if let Err(err) = session.record_answer(question_index, &option) {
        // Reachable only when the attempt is already frozen; the picks above
        // were validated against the active set.
        log::warn!("answer rejected: {err}");
        println!("could not record that answer: {err}");
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|number| *number >= 1)
}

fn print_commands() {
    println!("Commands:");
    println!("  a <question> <option>  record an answer (numbers as displayed)");
    println!("  set <n>                switch to question set n");
    println!("  submit                 hand the attempt in");
    println!("  review                 toggle correctness display after submission");
    println!("  reset                  restart the attempt over the same sets");
    println!("  new                    reshuffle into fresh sets and restart");
    println!("  quit                   leave");
}

fn render(view: &SessionView) {
    println!();
    println!(
        "Question set {} of {}{}",
        view.set_picker.selected + 1,
        view.set_picker.set_count,
        if view.set_picker.enabled {
            ""
        } else {
            " (locked)"
        }
    );
    if let Some(seconds) = view.countdown_seconds {
        println!(
            "Time left {} | answered {}/{} | pass mark {}%",
            format_mmss(seconds),
            view.progress.answered,
            view.progress.total,
            view.pass_threshold_percent
        );
    }

    for question in &view.questions {
        println!();
        println!("{}. {}", question.number, question.text);
        match &question.mode {
            QuestionViewMode::Solicit { options } => {
                for (position, option) in options.iter().enumerate() {
                    println!("   [{}] {}", position + 1, option);
                }
            }
            QuestionViewMode::Review { options } => {
                for tagged in options {
                    let marker = match tagged.tag {
                        OptionTag::Correct => "+",
                        OptionTag::WrongChosen => "x",
                        OptionTag::Neutral => " ",
                    };
                    println!("   {} {}", marker, tagged.option);
                }
            }
            QuestionViewMode::Recorded { user_answer } => match user_answer {
                Some(answer) => println!("   your answer: {answer}"),
                None => println!("   left blank"),
            },
        }
    }

    if let Some(score) = &view.score {
        println!();
        println!(
            "Result: {}/{} correct ({}%)",
            score.correct(),
            score.total(),
            score.percent()
        );
        if score.passed() {
            println!("PASSED (pass mark {}%)", view.pass_threshold_percent);
        } else {
            println!("FAILED (pass mark {}%)", view.pass_threshold_percent);
        }
    }
}

fn format_mmss(total_seconds: i64) -> String {
    let clamped = total_seconds.max(0);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

fn main() {
    pretty_env_logger::init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
