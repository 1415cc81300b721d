// src/integrations/console.rs
//
// Console transport: one query per input line, replies written as lines.
// Every line is addressed to the bot; there is no mention syntax.
// A line that is not valid UTF-8 is logged and skipped.

use async_trait::async_trait;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::integrations::transport::{InboundMessage, MessageSink, MessageSource};

/// Channel name attached to console messages
pub const CONSOLE_CHANNEL: &str = "console";

pub struct ConsoleSource<R> {
    reader: R,
    line: Vec<u8>,
}

impl ConsoleSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> ConsoleSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }
}

#[async_trait]
impl<R> MessageSource for ConsoleSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_message(&mut self) -> AppResult<Option<InboundMessage>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line).await? == 0 {
                return Ok(None);
            }

            let text = match std::str::from_utf8(&self.line) {
                Ok(text) => text.trim(),
                Err(e) => {
                    log::warn!("Skipping console line that is not UTF-8: {}", e);
                    continue;
                }
            };

            if !text.is_empty() {
                return Ok(Some(InboundMessage::new(CONSOLE_CHANNEL, text)));
            }
        }
    }
}

pub struct ConsoleSink<W> {
    writer: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> MessageSink for ConsoleSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, _channel: &str, text: &str) -> AppResult<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(text.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_source_skips_blank_lines() {
        let input: &[u8] = b"  pug  \n\n   \nclasses\n";
        let mut source = ConsoleSource::new(input);

        let first = source.next_message().await.unwrap().unwrap();
        assert_eq!(first, InboundMessage::new(CONSOLE_CHANNEL, "pug"));

        let second = source.next_message().await.unwrap().unwrap();
        assert_eq!(second.text, "classes");

        assert_eq!(source.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_source_skips_undecodable_line() {
        let input: &[u8] = b"pug\n\xff\xfe bad\nbeagle";
        let mut source = ConsoleSource::new(input);

        assert_eq!(source.next_message().await.unwrap().unwrap().text, "pug");
        assert_eq!(source.next_message().await.unwrap().unwrap().text, "beagle");
        assert_eq!(source.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sink_writes_lines() {
        let sink = ConsoleSink::new(Vec::<u8>::new());

        sink.send(CONSOLE_CHANNEL, "My interpretation: pug").await.unwrap();
        sink.send(CONSOLE_CHANNEL, "second").await.unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "My interpretation: pug\nsecond\n");
    }
}
