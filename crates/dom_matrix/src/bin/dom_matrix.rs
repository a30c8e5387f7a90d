use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::Context;
    use clap::{Parser, Subcommand, ValueEnum};
    use dom_matrix::{Cell, DomMatrix, Input, ReadableMatrix, Scalar, WritableMatrix};
    use serde_json::Value;

    #[derive(Debug, Parser)]
    #[command(about = "Inspect and combine 4x4 transform matrices", long_about = None)]
    struct Cli {
        /// How to print resulting matrices
        #[arg(short, long, value_enum, global = true, default_value_t = Format::Css)]
        format: Format,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
    enum Format {
        /// CSS transform function, `matrix(...)` or `matrix3d(...)`
        Css,
        /// JSON array of the sixteen cells in column-major order
        Json,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print a matrix together with its 2D and identity flags
        Show {
            /// Matrix initializer given as JSON, e.g. `[1, 0, 0, 1, 10, 20]`
            matrix: String,
        },
        /// Multiply two or more matrices from left to right
        Multiply {
            /// Matrix initializers given as JSON
            #[arg(required = true, num_args = 2..)]
            matrices: Vec<String>,
        },
        /// Negate the first column of a matrix
        FlipX {
            /// Matrix initializer given as JSON
            matrix: String,
        },
        /// Negate the second column of a matrix
        FlipY {
            /// Matrix initializer given as JSON
            matrix: String,
        },
        /// Write cells of a matrix, coercing the values to numbers
        Set {
            /// Matrix initializer given as JSON
            matrix: String,

            /// Cell writes such as `m43=5`, `e=-2` or `d="0x10"`
            #[arg(required = true, value_parser = parse_assignment)]
            assignments: Vec<(Cell, Scalar)>,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Show { matrix } => {
                let matrix = parse_matrix(&matrix)?;
                print_matrix(&matrix, cli.format)?;
                println!("is2D: {}", matrix.is_2d());
                println!("isIdentity: {}", matrix.is_identity());
            }
            Command::Multiply { matrices } => {
                let mut matrices = matrices.iter();
                let Some(first) = matrices.next() else {
                    anyhow::bail!("Nothing to multiply");
                };
                let mut product = parse_matrix(first)?;
                for matrix in matrices {
                    product.multiply_self(&parse_matrix(matrix)?);
                }
                print_matrix(&product, cli.format)?;
            }
            Command::FlipX { matrix } => {
                print_matrix(&parse_matrix(&matrix)?.flip_x(), cli.format)?;
            }
            Command::FlipY { matrix } => {
                print_matrix(&parse_matrix(&matrix)?.flip_y(), cli.format)?;
            }
            Command::Set {
                matrix,
                assignments,
            } => {
                let mut matrix = parse_matrix(&matrix)?;
                for (cell, value) in &assignments {
                    log::debug!("Writing {value:?} to {cell}");
                    matrix.assign(*cell, value);
                }
                print_matrix(&matrix, cli.format)?;
            }
        }

        Ok(())
    }

    fn parse_matrix(json: &str) -> Result<DomMatrix> {
        let value: Value = serde_json::from_str(json)
            .with_context(|| format!("Matrix initializer is not valid JSON: {json}"))?;
        DomMatrix::from_input(Input::from_json(&value))
            .with_context(|| format!("Invalid matrix initializer: {json}"))
    }

    fn parse_assignment(assignment: &str) -> std::result::Result<(Cell, Scalar), String> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("Expected FIELD=VALUE, got `{assignment}`"))?;

        let cell = name.parse::<Cell>().map_err(|err| err.to_string())?;

        let value = match serde_json::from_str(value) {
            Ok(Value::Null) => Scalar::Null,
            Ok(Value::Bool(value)) => Scalar::Bool(value),
            Ok(Value::Number(number)) => Scalar::Number(number.as_f64().unwrap_or(f64::NAN)),
            Ok(Value::String(text)) => Scalar::Text(text),
            Ok(Value::Array(_) | Value::Object(_)) => Scalar::Number(f64::NAN),
            Err(_) => Scalar::from(value),
        };

        Ok((cell, value))
    }

    fn print_matrix(matrix: &dyn ReadableMatrix, format: Format) -> Result<()> {
        match format {
            Format::Css => println!("{matrix}"),
            Format::Json => println!("{}", serde_json::to_string(&matrix.to_float64_array())?),
        }
        Ok(())
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
