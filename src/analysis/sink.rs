use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Destination des points d'amplitude
pub trait AmplitudeSink {
    fn push(&mut self, value: i32) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Écrit un entier décimal par ligne
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl LineSink<File> {
    /// Chaque valeur part directement dans le fichier
    pub fn streaming(file: File) -> Self {
        Self::new(file)
    }
}

impl LineSink<BufWriter<File>> {
    pub fn buffered(file: File) -> Self {
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> AmplitudeSink for LineSink<W> {
    fn push(&mut self, value: i32) -> io::Result<()> {
        writeln!(self.writer, "{}", value)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl AmplitudeSink for Vec<i32> {
    fn push(&mut self, value: i32) -> io::Result<()> {
        Vec::push(self, value);
        Ok(())
    }
}

/// Duplique chaque valeur vers deux destinations
impl<A: AmplitudeSink, B: AmplitudeSink> AmplitudeSink for (A, B) {
    fn push(&mut self, value: i32) -> io::Result<()> {
        self.0.push(value)?;
        self.1.push(value)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}
