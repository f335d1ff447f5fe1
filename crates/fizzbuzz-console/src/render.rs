//! Snapshot rendering for the console.
//!
//! The renderer is fed every published snapshot in order. In text mode it
//! prints only the rows that are new since the previous snapshot, and a
//! marker line when the list shrinks (a reset). In JSON mode each snapshot
//! is written whole as one line.

use std::io::Write;

use fizzbuzz_core::config::RenderFormat;
use fizzbuzz_types::SequenceItem;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::ConsoleError;

/// Marker printed when the list is cleared.
const CLEARED: &str = "-- list cleared --";

/// Writes snapshots to an output stream.
#[derive(Debug)]
pub struct Renderer<W> {
    out: W,
    format: RenderFormat,
    shown: usize,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer writing to `out`.
    pub const fn new(out: W, format: RenderFormat) -> Self {
        Self {
            out,
            format,
            shown: 0,
        }
    }

    /// Render one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if writing fails, or
    /// [`ConsoleError::Json`] if a snapshot cannot be serialized.
    pub fn render(&mut self, items: &[SequenceItem]) -> Result<(), ConsoleError> {
        match self.format {
            RenderFormat::Text => self.render_text(items)?,
            RenderFormat::Json => {
                serde_json::to_writer(&mut self.out, items)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_text(&mut self, items: &[SequenceItem]) -> Result<(), ConsoleError> {
        if items.len() < self.shown {
            writeln!(self.out, "{CLEARED}")?;
            self.shown = 0;
        }
        for (position, item) in items.iter().enumerate().skip(self.shown) {
            writeln!(self.out, "{:>3}  {}", position.saturating_add(1), item.value)?;
        }
        self.shown = items.len();
        Ok(())
    }

    /// Consume the renderer and return the output stream.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render every snapshot received on `rx` until the channel closes.
///
/// # Errors
///
/// Returns the first rendering error.
pub async fn render_loop<W: Write>(
    mut rx: mpsc::UnboundedReceiver<Vec<SequenceItem>>,
    mut renderer: Renderer<W>,
) -> Result<(), ConsoleError> {
    while let Some(snapshot) = rx.recv().await {
        renderer.render(&snapshot)?;
    }
    debug!("Snapshot channel closed, renderer exiting");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fizzbuzz_core::sequence::label;

    use super::*;

    fn list(n: u32) -> Vec<SequenceItem> {
        (1..=n).map(|i| SequenceItem::new(label(i))).collect()
    }

    fn text_of(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn text_prints_only_new_rows() {
        let mut renderer = Renderer::new(Vec::new(), RenderFormat::Text);
        renderer.render(&[]).unwrap();
        renderer.render(&list(1)).unwrap();
        renderer.render(&list(3)).unwrap();

        assert_eq!(text_of(renderer), "  1  1\n  2  2\n  3  Fizz\n");
    }

    #[test]
    fn text_marks_reset() {
        let mut renderer = Renderer::new(Vec::new(), RenderFormat::Text);
        renderer.render(&list(2)).unwrap();
        renderer.render(&[]).unwrap();
        renderer.render(&list(1)).unwrap();

        assert_eq!(
            text_of(renderer),
            "  1  1\n  2  2\n-- list cleared --\n  1  1\n"
        );
    }

    #[test]
    fn text_reset_of_empty_list_prints_nothing() {
        let mut renderer = Renderer::new(Vec::new(), RenderFormat::Text);
        renderer.render(&[]).unwrap();
        renderer.render(&[]).unwrap();
        renderer.render(&list(1)).unwrap();

        assert_eq!(text_of(renderer), "  1  1\n");
    }

    #[test]
    fn json_writes_whole_snapshot_per_line() {
        let mut renderer = Renderer::new(Vec::new(), RenderFormat::Json);
        renderer.render(&list(2)).unwrap();
        renderer.render(&[]).unwrap();

        let output = text_of(renderer);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Vec<SequenceItem> = serde_json::from_str(lines.first().unwrap()).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.last().map(|i| i.value.as_str()), Some("2"));
        assert_eq!(lines.get(1).copied(), Some("[]"));
    }

    #[tokio::test]
    async fn loop_drains_until_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(list(1)).unwrap();
        tx.send(list(2)).unwrap();
        drop(tx);

        let mut out = Vec::new();
        render_loop(rx, Renderer::new(&mut out, RenderFormat::Text))
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  1  1\n  2  2\n");
    }
}
