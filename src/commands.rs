use tracing::debug;

use crate::output;
use crate::serializer::{BuildTree, Serializer};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not produce the output")]
    Output(#[source] output::Error),
}

fn emit(
    record: &impl BuildTree,
    serializer: Serializer,
    output: output::Args,
) -> Result<(), Error> {
    let mut output = output.to_output().map_err(Error::Output)?;
    let tree = record.build_tree();
    debug!(keys = tree.len(), max_size = serializer.config().max_size, "emitting record");
    output.record(&serializer, &tree).map_err(Error::Output)?;
    output.commit().map_err(Error::Output)
}

pub mod settings {
    use super::Error;
    use crate::record::Settings;
    use crate::{output, serializer};

    /// Serialize heat pump settings.
    #[derive(clap::Parser)]
    pub struct Args {
        #[clap(flatten)]
        serializer: serializer::Args,
        #[clap(flatten)]
        output: output::Args,

        /// Power state, e.g. `ON` or `OFF`.
        #[arg(long)]
        power: String,
        /// Operating mode, e.g. `HEAT`, `COOL` or `AUTO`.
        #[arg(long)]
        mode: String,
        /// Target temperature in degrees Celsius.
        #[arg(long, allow_negative_numbers = true)]
        temperature: f32,
        /// Fan speed.
        #[arg(long)]
        fan: String,
        /// Vertical airflow direction.
        #[arg(long)]
        vane: String,
        /// Horizontal airflow direction.
        #[arg(long)]
        wide_vane: String,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        let settings = Settings {
            power: args.power,
            mode: args.mode,
            temperature: args.temperature,
            fan: args.fan,
            vane: args.vane,
            wide_vane: args.wide_vane,
        };
        super::emit(&settings, args.serializer.to_serializer(), args.output)
    }
}

pub mod status {
    use super::Error;
    use crate::record::Status;
    use crate::{output, serializer};

    /// Serialize heat pump status.
    #[derive(clap::Parser)]
    pub struct Args {
        #[clap(flatten)]
        serializer: serializer::Args,
        #[clap(flatten)]
        output: output::Args,

        /// Room temperature in degrees Celsius.
        #[arg(long, allow_negative_numbers = true)]
        room_temperature: f32,
        /// Whether the compressor is running.
        #[arg(long, action = clap::ArgAction::Set)]
        operating: bool,
        /// Compressor operating frequency.
        #[arg(long, allow_negative_numbers = true)]
        compressor_frequency: i32,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        let status = Status {
            room_temperature: args.room_temperature,
            operating: args.operating,
            compressor_frequency: args.compressor_frequency,
        };
        super::emit(&status, args.serializer.to_serializer(), args.output)
    }
}
