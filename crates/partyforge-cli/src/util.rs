use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;

/// Destination of a JSON document: stdout unless a path was given.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => Self::create(path)?,
            None => Self::Stdout(io::stdout().lock()),
        };
        output.write_json(value)?;
        info!("wrote {}", output.describe());
        Ok(())
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn describe(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.describe()))?;
        writeln!(self).with_context(|| format!("Failed to write to {}", self.describe()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.describe()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads a JSON document; `file_kind` names it in error messages.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_save_and_read_json() {
        let path = env::temp_dir().join(format!("partyforge-util-{}.json", process::id()));
        let value = vec![("starmie".to_owned(), 121_u32), ("snorlax".to_owned(), 143)];
        Output::save_json(&value, Some(path.clone())).unwrap();

        let read: Vec<(String, u32)> = read_json_file("test", &path).unwrap();
        assert_eq!(read, value);

        let err = read_json_file::<Vec<u32>, _>("test", &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse test JSON file"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_json_file::<u32, _>("catalog", "/nonexistent/partyforge.json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to open catalog file"));
    }
}
