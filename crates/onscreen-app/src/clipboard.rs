use arboard::Clipboard;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;

    fn clear(&mut self) -> anyhow::Result<()>;
}

/// The OS clipboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            clipboard: Clipboard::new()?,
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard.set_text(text)?;
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.clipboard.clear()?;
        Ok(())
    }
}
