//! Line-oriented terminal console
//!
//! Commands and prompt replies are read from the same input stream, so a
//! script piped on stdin drives the whole walkthrough.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::errors::Result;
use crate::prompt::Prompter;

use super::input::parse_yes_no;

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
    closed: bool,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, out: W) -> Self {
        Console {
            lines: reader.lines(),
            out,
            closed: false,
        }
    }

    /// Whether the input stream has ended
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Next input line, or `None` once the input is exhausted
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        let line = self.lines.next_line().await?;
        if line.is_none() {
            self.closed = true;
        }
        Ok(line)
    }

    pub async fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    pub async fn writeln(&mut self, text: &str) -> Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    async fn ask(&mut self, message: &str) -> Result<bool> {
        self.write(&format!("{} [y/n] ", message)).await?;
        loop {
            let Some(reply) = self.read_line().await? else {
                return Ok(false);
            };
            match parse_yes_no(&reply) {
                Some(answer) => return Ok(answer),
                None => self.write("Please answer y or n: ").await?,
            }
        }
    }
}

impl<R, W> Prompter for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn confirm(&mut self, message: &str) -> impl Future<Output = bool> + Send {
        async move {
            match self.ask(message).await {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!(error = %e, "prompt failed, treating as declined");
                    false
                }
            }
        }
    }

    fn alert(&mut self, message: &str) -> impl Future<Output = ()> + Send {
        async move {
            if let Err(e) = self.writeln(&format!("\n*** {} ***", message)).await {
                tracing::warn!(error = %e, "could not show alert");
            }
        }
    }
}
