//! The binary netmet.

use netmet_api::{Credentials, NmResult};
use netmet_core::*;

#[derive(clap::Parser, Debug)]
#[command(version)]
struct Args {
    /// Base URL of the RIPE Atlas API.
    #[arg(long, default_value = ATLAS_BASE_URL)]
    base_url: url::Url,

    /// Directory holding datasets and result files.
    #[arg(long, default_value = "datasets")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand, Debug)]
enum Cmd {
    /// Fetch the connected vantage-point inventory for a country and
    /// persist it as the vantage-point correction dataset.
    FetchVps {
        /// Country to list probes from.
        #[arg(long, default_value = "UA")]
        country: String,
    },

    /// Fetch the connected target inventory for a country and persist
    /// it as the target correction dataset.
    FetchTargets {
        /// Country to list probes from.
        #[arg(long, default_value = "RU")]
        country: String,
    },

    /// Select a random vantage-point/target pair and submit a one-off
    /// measurement between them.
    Measure {
        /// Destination port.
        #[arg(long, default_value_t = 34543)]
        port: u16,

        /// Transport protocol.
        #[arg(long, default_value = "ICMP")]
        protocol: String,

        /// Measurement kind.
        #[arg(long, default_value = "traceroute")]
        kind: String,
    },

    /// Fetch and persist a measurement description.
    Describe {
        /// The measurement identifier.
        id: u64,
    },

    /// Fetch a measurement result and print its traceroute.
    Read {
        /// The measurement identifier.
        id: u64,
    },
}

fn run(config: &Config, cmd: Cmd) -> NmResult<()> {
    match cmd {
        Cmd::FetchVps { country } => {
            fetch_connected_probes(config, Role::VantagePoint, &country)?;
        }
        Cmd::FetchTargets { country } => {
            fetch_connected_probes(config, Role::Target, &country)?;
        }
        Cmd::Measure {
            port,
            protocol,
            kind,
        } => {
            // Credentials are required before any network io.
            let credentials = Credentials::from_env()?;
            let (vp, target) = select_random_pair(config)?;
            let record = submit_measurement(
                config,
                &credentials,
                &target,
                &vp,
                &SubmitParams {
                    port,
                    protocol,
                    kind,
                },
            )?;
            println!("{}", record.measurement_id);
        }
        Cmd::Describe { id } => {
            describe_measurement(config, id)?;
        }
        Cmd::Read { id } => {
            read_measurement(config, id)?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = <Args as clap::Parser>::parse();

    let config = Config::new(args.base_url, args.data_dir);

    if let Err(err) = run(&config, args.cmd) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
