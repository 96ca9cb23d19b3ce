use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use enc80::{InstructionSet, PlanePrefix};

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Plane to dump: unprefixed, ed, cb, dd, fd, ddcb or fdcb [default: all seven]
    #[clap(short, long, value_name = "PLANE")]
    plane: Option<String>,

    /// Emit JSON instead of a listing
    #[clap(long)]
    json: bool,

    /// Path to output file [default: stdout]
    #[clap(parse(from_os_str), short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(microserde::Serialize)]
struct PlaneDump {
    prefix: String,
    entries: Vec<String>,
}

fn main() -> ExitCode {
    let args = <Args as Parser>::parse();

    let planes: Vec<PlanePrefix> = match args.plane {
        Some(ref name) => match PlanePrefix::parse(name) {
            Some(prefix) => vec![prefix],
            None => {
                eprintln!("[ERROR]: Unknown plane \"{name}\"");
                return ExitCode::FAILURE;
            }
        },
        None => PlanePrefix::ALL.to_vec(),
    };

    let set = match InstructionSet::new() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("[ERROR]: Broken instruction table:\n{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut output: Box<dyn Write> = if let Some(path) = args.output {
        let result = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_path());
        match result {
            Err(e) => {
                eprintln!(
                    "[ERROR]: Cannot open output file \"{}\" for writing: {e}",
                    path.display()
                );
                return ExitCode::FAILURE;
            }
            Ok(file) => Box::new(file),
        }
    } else {
        Box::new(io::stdout())
    };

    let result = if args.json {
        dump_json(&set, &planes, &mut output)
    } else {
        dump_listing(&set, &planes, &mut output)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR]: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dump_json(
    set: &InstructionSet,
    planes: &[PlanePrefix],
    output: &mut dyn Write,
) -> io::Result<()> {
    let mut dumps = Vec::new();
    for prefix in planes {
        let entries = set
            .decode_plane(*prefix)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        dumps.push(PlaneDump {
            prefix: prefix.to_string(),
            entries,
        });
    }
    writeln!(output, "{}", microserde::json::to_string(&dumps))
}

fn dump_listing(
    set: &InstructionSet,
    planes: &[PlanePrefix],
    output: &mut dyn Write,
) -> io::Result<()> {
    for prefix in planes {
        let entries = set
            .decode_plane(*prefix)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        writeln!(output, "; {prefix} plane")?;
        for (opcode, text) in entries.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            for byte in prefix.bytes() {
                write!(output, "{byte:02x} ")?;
            }
            writeln!(output, "{opcode:02x}  {text}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}
