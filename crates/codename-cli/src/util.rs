use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, StdinLock, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        Ok(())
    }

    pub fn finish(mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

#[derive(Debug)]
pub enum Input {
    Stdin {
        reader: StdinLock<'static>,
    },
    File {
        reader: BufReader<File>,
        path: PathBuf,
    },
}

impl Input {
    pub fn from_input_path(input_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match input_path {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                Ok(Input::File {
                    reader: BufReader::new(file),
                    path,
                })
            }
            None => Ok(Input::Stdin {
                reader: io::stdin().lock(),
            }),
        }
    }

    pub fn display_path(&self) -> String {
        match self {
            Input::Stdin { .. } => "stdin".to_string(),
            Input::File { path, .. } => path.display().to_string(),
        }
    }

    /// Reads every whitespace-separated token.
    pub fn read_tokens(mut self) -> anyhow::Result<Vec<String>> {
        let mut tokens = vec![];
        let mut line = String::new();
        loop {
            line.clear();
            let result = match &mut self {
                Input::Stdin { reader } => reader.read_line(&mut line),
                Input::File { reader, .. } => reader.read_line(&mut line),
            };
            let read = result
                .with_context(|| format!("Failed to read corpus from {}", self.display_path()))?;
            if read == 0 {
                break;
            }
            tokens.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(tokens)
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}
