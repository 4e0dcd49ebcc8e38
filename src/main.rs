use log::error;
use tabline::records::{DelimitedRecordStream, Mode, RecordError};

use crate::messages::{highlight_argument, system_message};

mod messages;

fn write_dataset(path: &std::path::Path, dataset: &[[&str; 3]]) -> Result<usize, RecordError> {
    let mut stream = DelimitedRecordStream::new();
    stream.open(path, Mode::Write)?;

    for columns in dataset {
        stream.write(columns.as_slice())?;
    }

    stream.flush()?;
    Ok(dataset.len())
}

fn read_dataset(path: &std::path::Path) -> Result<usize, RecordError> {
    let mut stream = DelimitedRecordStream::new();
    stream.open(path, Mode::Read)?;

    let mut column1 = String::new();
    let mut column2 = String::new();
    let mut n_rows = 0;

    while stream.read(&mut column1, &mut column2)? {
        println!("{:12} {}", column1, highlight_argument(&column2));
        n_rows += 1;
    }

    Ok(n_rows)
}

fn main() {
    let path = std::env::temp_dir().join("tabline_demo.tsv");

    let dataset = [
        ["1", "Jansen", "Amsterdam"],
        ["2", "Bonega", "Lagos"],
        ["3", "Maharashtra", "Mumbai"],
        ["4", "Lorem", "Rome"],
        ["5", "Malaika", "Nairobi"],
        ["6", "Jimmy", "Glasgow"],
    ];

    match write_dataset(&path, &dataset) {
        Ok(n_rows) => println!(
            "{}",
            system_message(
                "writer",
                format!(
                    "{} row(s) written to '{}'.",
                    n_rows,
                    highlight_argument(&path.display().to_string())
                )
            )
        ),
        Err(err) => {
            error!("err: {}", err);
            println!("{}", system_message(&err.kind().to_string(), err.to_string()));
            return;
        }
    }

    match read_dataset(&path) {
        Ok(n_rows) => println!(
            "{}",
            system_message(
                "reader",
                format!("{} row(s) read back, third column dropped.", n_rows)
            )
        ),
        Err(err) => {
            error!("err: {}", err);
            println!("{}", system_message(&err.kind().to_string(), err.to_string()));
        }
    }
}
