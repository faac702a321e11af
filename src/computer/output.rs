use std::io::{self, Write};

/// Where PRN sends register values.
pub trait Output {
    fn emit(&mut self, value: u8) -> io::Result<()>;
}

/// Prints each value in decimal on its own line.
pub struct Console<W: Write> {
    writer: W,
}

impl<W: Write> Console<W> {
    pub fn new(writer: W) -> Console<W> {
        Console { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Console<io::Stdout> {
    pub fn stdout() -> Console<io::Stdout> {
        Console::new(io::stdout())
    }
}

impl<W: Write> Output for Console<W> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.writer, "{value}")?;
        self.writer.flush()
    }
}

/// Collects values, mostly for tests.
impl Output for Vec<u8> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}
