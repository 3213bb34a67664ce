use crate::domain::ports::{Notice, NoticeKind, Prompter};
use crate::error::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

/// Line-oriented console shared by the interactive session and its dialogs.
///
/// Commands and confirmation answers are read from the same input, one line
/// each, so a session can be scripted by piping lines in.
pub struct TerminalConsole<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
    assume_yes: bool,
}

impl TerminalConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), assume_yes)
    }
}

impl<R, W> TerminalConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
            assume_yes,
        }
    }

    /// Next input line without its line ending, or `None` at end of input.
    pub async fn read_line(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub async fn write(&self, text: &str) -> Result<()> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }

    pub async fn write_line(&self, text: &str) -> Result<()> {
        self.write(&format!("{text}\n")).await
    }

    /// Gives the writer back, e.g. to inspect what a test session printed.
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

fn render(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "[ok]",
        NoticeKind::Warning => "[aviso]",
        NoticeKind::Error => "[error]",
    };
    match &notice.text {
        Some(text) => format!("{tag} {}: {text}", notice.title),
        None => format!("{tag} {}", notice.title),
    }
}

#[async_trait]
impl<R, W> Prompter for TerminalConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&self, title: &str, body: &str) -> Result<bool> {
        self.write_line(title).await?;
        if self.assume_yes {
            self.write_line(&format!("{body} [s/N]: s")).await?;
            return Ok(true);
        }
        self.write(&format!("{body} [s/N]: ")).await?;
        // End of input counts as "no".
        Ok(self.read_line().await?.is_some_and(|answer| is_yes(&answer)))
    }

    async fn notify(&self, notice: Notice) -> Result<()> {
        self.write_line(&render(&notice)).await
    }
}
