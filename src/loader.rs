use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use log::{error, info, warn};

use crate::{
    PhonebookError, Result,
    storage::{Directory, Record},
};

/// Splits a `<phone> <name>` line at the first whitespace.
///
/// Returns `None` for lines without a name.
pub fn parse_record(line: &str) -> Option<Record> {
    let (phone, name) = line.trim().split_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Record::new(phone, name))
}

pub fn parse_directory<R: BufRead>(reader: R) -> Result<Directory> {
    let mut entries = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_record(&line) {
            Some(record) => entries.push(record),
            None => {
                let e = PhonebookError::MalformedRecord {
                    line: i + 1,
                    content: line,
                };
                warn!(target: "parse_directory", "skipping: {e}");
            }
        }
    }

    Ok(Directory::new(entries))
}

/// One trimmed name per line.
///
/// Blank lines between names count as empty queries, trailing blank lines are dropped.
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    for line in reader.lines() {
        queries.push(line?.trim().to_string());
    }

    while queries.last().is_some_and(|q| q.is_empty()) {
        queries.pop();
    }
    Ok(queries)
}

pub fn read_directory(path: &Path) -> Result<Directory> {
    parse_directory(BufReader::new(open(path)?))
}

pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    parse_queries(BufReader::new(open(path)?))
}

/// Like [`read_directory`], but logs failures and falls back to an empty directory
pub fn load_directory(path: &Path) -> Directory {
    match read_directory(path) {
        Ok(directory) => {
            info!(
                target: "load_directory",
                "loaded {} records from {}",
                directory.len(),
                path.display()
            );
            directory
        }
        Err(e) => {
            error!(target: "load_directory", "{e}");
            Directory::default()
        }
    }
}

/// Like [`read_queries`], but logs failures and falls back to no queries
pub fn load_queries(path: &Path) -> Vec<String> {
    match read_queries(path) {
        Ok(queries) => {
            info!(
                target: "load_queries",
                "loaded {} queries from {}",
                queries.len(),
                path.display()
            );
            queries
        }
        Err(e) => {
            error!(target: "load_queries", "{e}");
            Vec::new()
        }
    }
}

/// Writes one `<phone> <name>` line per record, replacing `path`
pub fn write_snapshot(path: &Path, directory: &Directory) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        for record in directory {
            writeln!(w, "{} {}", record.phone(), record.name())?;
        }
        w.flush()
    };

    write().map_err(|source| PhonebookError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PhonebookError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => e.into(),
    })
}
