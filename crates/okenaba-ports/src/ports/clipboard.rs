use anyhow::Result;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}
