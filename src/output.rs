use std::io::Write as _;
use std::path::PathBuf;

use csv_core::WriteResult;

use crate::serializer::{self, Serializer};
use crate::tree::Tree;

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Format {
    Json,
    Table,
    Csv,
}

#[derive(clap::Parser, Clone, Debug)]
#[group(id = "output::Args")]
pub struct Args {
    /// Write to this file instead of the standard output.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    #[arg(long, short='f', value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not open the specified output file at {1:?}")]
    OpenOutputFile(#[source] std::io::Error, PathBuf),
    #[error("could not write data to the output file at {1:?}")]
    WriteFile(#[source] std::io::Error, PathBuf),
    #[error("could not write data to the terminal")]
    WriteStdout(#[source] std::io::Error),
    #[error("could not serialize the record to JSON")]
    Encode(#[source] serializer::Error),
}

impl Args {
    pub fn new(output: Option<PathBuf>, format: Format) -> Self {
        Self { output, format }
    }

    pub fn to_output(self) -> Result<Output, Error> {
        let io = match &self.output {
            None => Box::new(std::io::stdout().lock()) as Box<_>,
            Some(path) => Box::new(
                std::fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .map_err(|e| Error::OpenOutputFile(e, path.clone()))?,
            ) as Box<_>,
        };
        let formatter = match &self.format {
            Format::Table => {
                let mut comfy = comfy_table::Table::new();
                comfy
                    .set_header(vec!["Key", "Value"])
                    .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
                Formatter::Table { comfy }
            }
            Format::Json => Formatter::Json,
            Format::Csv => Formatter::Csv {
                written_header: false,
            },
        };
        Ok(Output {
            args: self,
            io,
            formatter,
        })
    }
}

pub struct Output {
    args: Args,
    io: Box<dyn std::io::Write>,
    formatter: Formatter,
}

enum Formatter {
    Json,
    Table { comfy: comfy_table::Table },
    Csv { written_header: bool },
}

impl Output {
    /// Emit one record laid out as `tree`.
    ///
    /// The record is encoded with `serializer` regardless of format, so its size limit applies to
    /// every format. Table output is buffered until [`Output::commit`].
    pub fn record(&mut self, serializer: &Serializer, tree: &Tree) -> Result<(), Error> {
        let mut text = String::new();
        serializer.tree_to_text(tree, &mut text).map_err(Error::Encode)?;
        match &mut self.formatter {
            Formatter::Json => {
                writeln!(self.io, "{text}").map_err(|e| self.write_error(e))?;
            }
            Formatter::Table { comfy } => {
                for (key, value) in tree.iter() {
                    comfy.add_row(vec![key.to_string(), value.to_string()]);
                }
            }
            Formatter::Csv { written_header } => {
                if !*written_header {
                    *written_header = true;
                    let keys = tree.keys().collect::<Vec<_>>();
                    self.write_csv_row(&keys)?;
                }
                let values = tree.iter().map(|(_, v)| v.to_string()).collect::<Vec<_>>();
                self.write_csv_row(&values)?;
            }
        }
        Ok(())
    }

    fn write_csv_row<V: std::ops::Deref<Target = str>>(
        &mut self,
        values: &[V],
    ) -> Result<(), Error> {
        let max_len = 2 + 2 * values.iter().map(|v| v.len()).max().unwrap_or(0);
        let mut output = vec![0; max_len];
        let mut writer = csv_core::Writer::new();
        for (idx, value) in values.iter().enumerate() {
            if idx != 0 {
                let (WriteResult::InputEmpty, ob) = writer.delimiter(&mut output) else {
                    panic!("csv delimiter does not fit the output buffer");
                };
                self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))?;
            }
            let inp = value.as_bytes();
            let (WriteResult::InputEmpty, ib, ob) = writer.field(inp, &mut output) else {
                panic!("csv field does not fit the output buffer");
            };
            assert_eq!(value.len(), ib);
            self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))?;
        }
        let (WriteResult::InputEmpty, ob) = writer.terminator(&mut output) else {
            panic!("csv terminator does not fit the output buffer");
        };
        self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: std::io::Error) -> Error {
        match &self.args.output {
            None => Error::WriteStdout(e),
            Some(p) => Error::WriteFile(e, p.into()),
        }
    }

    pub fn commit(mut self) -> Result<(), Error> {
        match &self.formatter {
            Formatter::Json | Formatter::Csv { .. } => {}
            Formatter::Table { comfy } => {
                writeln!(self.io, "{comfy}").map_err(|e| self.write_error(e))?;
            }
        }
        self.io.flush().map_err(|e| self.write_error(e))
    }
}
