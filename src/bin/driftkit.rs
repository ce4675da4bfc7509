use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use driftkit::bitrev::{BitReversal, Bitrev32, MAX_BITS};
use driftkit::dsp::{self, axis_swap, comp_stats, flip_band, flip_x};
use driftkit::{FileMode, GeneralWriter, Header, RefFrame, chan_freq};

#[derive(Parser, Debug)]
#[command(author, version, about = "Numeric helpers for Doppler drift searches", long_about = None)]
struct Args {
    /// Verbosity level (-v=info, -vv=debug, -vvv=trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bit-reverse an integer
    Bitrev {
        value: u64,

        /// Number of low bits to reverse
        #[arg(short, long, required_unless_present = "full32")]
        nbits: Option<u32>,

        /// Register width holding the value
        #[arg(short, long)]
        width: Option<u32>,

        /// Reverse all 32 bits of the low word
        #[arg(long, default_value_t = false, conflicts_with_all = ["nbits", "width"])]
        full32: bool,

        /// Run the full 32-bit reversal even though it is guarded
        #[arg(long, default_value_t = false, requires = "full32")]
        allow_untested: bool,
    },

    /// Frequency of a fine channel
    ChanFreq {
        /// JSON header with NAXIS1, FCNTR, DELTAF (and baryv)
        #[arg(long)]
        header: PathBuf,

        #[arg(short, long)]
        fine_channel: usize,

        /// Width of the de-drifted spectrum
        #[arg(short, long)]
        tdwidth: usize,

        /// Apply the barycentric correction
        #[arg(short, long, default_value_t = false)]
        barycentric: bool,
    },

    /// Trimmed median and standard deviation of a sample file
    Stats { file: PathBuf },

    /// Reverse each segment of xdim samples
    FlipX {
        file: PathBuf,
        #[arg(long)]
        xdim: usize,
        #[arg(long)]
        ydim: usize,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reverse the order of nchans bands of ntsamp samples
    FlipBand {
        file: PathBuf,
        #[arg(long)]
        nchans: usize,
        #[arg(long)]
        ntsamp: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Transpose ntsamp rows of nchans channels
    AxisSwap {
        file: PathBuf,
        #[arg(long)]
        nchans: usize,
        #[arg(long)]
        ntsamp: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn read_samples(path: &Path) -> driftkit::Result<Vec<f64>> {
    let mut reader = GeneralWriter::new(path, FileMode::Read);
    reader.open(None)?;
    let samples = dsp::parse_samples(&reader.read_to_string()?)?;
    info!(path = %path.display(), count = samples.len(), "read samples");
    Ok(samples)
}

fn emit_samples(samples: &[f64], output: Option<PathBuf>) -> driftkit::Result<()> {
    let text = samples
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    match output {
        Some(path) => {
            let mut writer = GeneralWriter::new(path, FileMode::Write);
            writer.open(None)?;
            writer.write(&text)?;
            writer.write("\n")?;
            writer.close();
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn main() -> driftkit::Result<()> {
    let args = Args::parse();

    // 0 = WARN (quiet), 1 = INFO, 2 = DEBUG, 3+ = TRACE
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .try_init();

    match args.command {
        Command::Bitrev {
            value,
            nbits,
            width,
            full32,
            allow_untested,
        } => {
            let op = if full32 {
                BitReversal::Full32(if allow_untested {
                    Bitrev32::Enabled
                } else {
                    Bitrev32::Guarded
                })
            } else {
                let nbits = nbits.unwrap_or(MAX_BITS);
                match width {
                    Some(width) => BitReversal::Padded { nbits, width },
                    None => BitReversal::Partial { nbits },
                }
            };
            info!(?op, value, "bit reversal");
            println!("{}", op.apply(value)?);
        }
        Command::ChanFreq {
            header,
            fine_channel,
            tdwidth,
            barycentric,
        } => {
            let header = Header::from_json_file(&header)?;
            let frame = if barycentric {
                RefFrame::Barycentric
            } else {
                RefFrame::Topocentric
            };
            println!("{}", chan_freq(&header, fine_channel, tdwidth, frame)?);
        }
        Command::Stats { file } => {
            let stats = comp_stats(read_samples(&file)?)?;
            println!("median {}\nstddev {}", stats.median, stats.stddev);
        }
        Command::FlipX {
            file,
            xdim,
            ydim,
            output,
        } => {
            let mut samples = read_samples(&file)?;
            flip_x(&mut samples, xdim, ydim)?;
            emit_samples(&samples, output)?;
        }
        Command::FlipBand {
            file,
            nchans,
            ntsamp,
            output,
        } => {
            let mut samples = read_samples(&file)?;
            flip_band(&mut samples, nchans, ntsamp)?;
            emit_samples(&samples, output)?;
        }
        Command::AxisSwap {
            file,
            nchans,
            ntsamp,
            output,
        } => {
            let samples = read_samples(&file)?;
            let mut swapped = samples.clone();
            axis_swap(&samples, &mut swapped, nchans, ntsamp)?;
            emit_samples(&swapped, output)?;
        }
    }

    Ok(())
}
