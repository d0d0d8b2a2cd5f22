use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};
use vip8::{disassemble, Emulator, PROGRAM_START};

mod app;
#[cfg(feature = "window")]
mod keymap;

// one instruction per microsecond is the finest the window loop can pace
const MAX_SPEED: u32 = 1_000_000;
pub(crate) const MAX_SCALE: u32 = 64;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// ROM file to load
    #[clap(value_parser)]
    filename: String,

    /// Instructions executed per second
    #[clap(
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SPEED as i64),
        default_value_t = 540
    )]
    speed: u32,

    /// Window zoom factor
    #[clap(
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64),
        default_value_t = 10
    )]
    scale: u32,

    /// Run without a window and print the screen when done
    #[clap(long, action)]
    headless: bool,

    /// Maximum number of instructions in headless mode
    #[clap(long, value_parser, default_value_t = 10_000)]
    max_steps: usize,

    /// Print a listing of the rom and exit
    #[clap(long, action)]
    disassemble: bool,
}

fn main() -> Result<(), anyhow::Error> {
    // parse command-line arguments
    let cli = Cli::parse();

    // logging goes to stderr, filtered by RUST_LOG
    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        );
    tracing::subscriber::set_global_default(subscriber)
        .context("error installing the log subscriber")?;

    // read the rom
    let rom = std::fs::read(&cli.filename)
        .with_context(|| format!("error opening rom file: {}", &cli.filename))?;

    if cli.disassemble {
        for (addr, word, op) in disassemble(&rom, PROGRAM_START) {
            match op {
                Some(op) => println!("{:03X}: {:04X}  {}", addr, word, op),
                None => println!("{:03X}: {:04X}  ???", addr, word),
            }
        }
        return Ok(());
    }

    // load the rom
    let emu = Emulator::load_rom(&rom[..]).context("error loading rom")?;
    tracing::info!("loaded {} ({} bytes)", &cli.filename, rom.len());

    // run
    if cli.headless {
        app::run_headless(emu, cli.max_steps)
    } else {
        app::run(emu, cli.speed, cli.scale)
    }
}
