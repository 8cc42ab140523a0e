//! Output stream wrapper for CLI results.

use std::io::Write;

/// Dual-channel writer: text goes to the primary sink, raw bytes to an
/// optional secondary sink. Optionally flushes after every write.
pub struct StreamWriter {
    stream: Box<dyn Write + Send>,
    stream_bytes: Option<Box<dyn Write + Send>>,
    auto_flush: bool,
}

impl StreamWriter {
    pub fn new(
        stream: Box<dyn Write + Send>,
        stream_bytes: Option<Box<dyn Write + Send>>,
        auto_flush: bool,
    ) -> Self {
        Self {
            stream,
            stream_bytes,
            auto_flush,
        }
    }

    /// Writer over stdout with no byte channel.
    pub fn stdout(auto_flush: bool) -> Self {
        Self::new(Box::new(std::io::stdout()), None, auto_flush)
    }

    /// Write text to the primary sink.
    pub fn write_str(&mut self, output: &str) -> std::io::Result<()> {
        self.stream.write_all(output.as_bytes())?;
        if self.auto_flush {
            self.stream.flush()?;
        }
        Ok(())
    }

    /// Write raw bytes to the byte channel, if one is attached.
    pub fn write_bytes(&mut self, output: &[u8]) -> std::io::Result<()> {
        if let Some(stream_bytes) = self.stream_bytes.as_mut() {
            stream_bytes.write_all(output)?;
            if self.auto_flush {
                stream_bytes.flush()?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stream.flush()?;
        if let Some(stream_bytes) = self.stream_bytes.as_mut() {
            stream_bytes.flush()?;
        }
        Ok(())
    }
}
