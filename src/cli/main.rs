#![allow(clippy::collapsible_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::{io::BufReader, time::Instant};

use clap::Parser;
use otter_pdr::{
    ntk::aiger::read_aag,
    reports::{Outcome, Report},
    verify::verify_with,
};

mod args;
mod window;

use args::{config_from_args, Args, Detail};
use window::ProgressWindow;

fn main() {
    let args = Args::parse();

    if args.markdown_help {
        clap_markdown::print_help_markdown::<Args>();
        return;
    }

    #[cfg(feature = "log")]
    {
        if let Err(e) = init_log(args.verbose) {
            println!("c Failed to initialise logs: {e}");
        }
    }

    let Some(path) = &args.file else {
        println!("c Path to an AIGER file required");
        std::process::exit(1);
    };

    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    if args.detail != Detail::Quiet {
        println!("c Reading AIGER file from {path:?}");
    }

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(_) => {
            println!("c Failed to open AIGER file");
            std::process::exit(1);
        }
    };

    let network = match read_aag(BufReader::new(file)) {
        Ok(network) => network,
        Err(e) => {
            println!("c Parse error: {e:?}");
            std::process::exit(1);
        }
    };

    let window = match args.detail {
        Detail::Progress => Some(ProgressWindow::new(&config, &network)),
        _ => None,
    };

    let start = Instant::now();
    let outcome = verify_with(&network, config, |pdr| {
        if let Some(mut window) = window {
            pdr.set_callback_progress(Box::new(move |sizes: &[usize]| window.refresh(sizes)));
        }
    });

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("c Verification error: {e}");
            std::process::exit(2);
        }
    };

    println!("s {}", outcome.report());

    match &outcome {
        Outcome::Proved(invariant) if args.invariant => print!("{invariant}"),

        Outcome::Disproved(trace) if args.witness => {
            println!("{}", trace.to_aiger_witness(args.property))
        }

        Outcome::Undecided(counters) if args.detail != Detail::Quiet => println!("{counters}"),

        _ => {}
    }

    if args.detail != Detail::Quiet {
        println!("c TIME {:.2?}", start.elapsed());
    }

    match outcome.report() {
        Report::Disproved => std::process::exit(10),
        Report::Proved => std::process::exit(20),
        Report::Undecided => std::process::exit(30),
    }
}

#[cfg(feature = "log")]
fn init_log(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::{
        append::console::{ConsoleAppender, Target},
        config::{Appender, Root},
        encode::pattern::PatternEncoder,
    };

    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("c {l:<5} {t} {m}{n}")))
        .build();

    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(Root::builder().appender("console").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
