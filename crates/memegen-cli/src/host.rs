use async_trait::async_trait;
use memegen_client::{CommandHost, HostError, MemeCommand, Reply, RenderedImage, Session};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::clap_builder::build_command;

/// Commands registered for this process, addressable by name or alias.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<MemeCommand>,
}

impl CommandTable {
    pub fn find(&self, name: &str) -> Option<&MemeCommand> {
        self.commands
            .iter()
            .find(|command| command.spec().answers_to(name))
    }

    pub fn commands(&self) -> &[MemeCommand] {
        &self.commands
    }

    pub fn help(&self, name: &str) -> Result<String, HostError> {
        let command = self
            .find(name)
            .ok_or_else(|| HostError::UnknownCommand(name.to_string()))?;
        Ok(build_command(command.spec()).render_long_help().to_string())
    }
}

impl CommandHost for CommandTable {
    fn register(&mut self, command: MemeCommand) -> Result<(), HostError> {
        let spec = command.spec();
        let names = std::iter::once(spec.name.as_str()).chain(spec.alias.as_deref());
        for name in names {
            if self.find(name).is_some() {
                return Err(HostError::Duplicate(name.to_string()));
            }
        }
        self.commands.push(command);
        Ok(())
    }
}

/// A session on the terminal: text goes to stdout, images are written to
/// `out_dir` and their path printed.
pub struct TerminalSession {
    table: Arc<CommandTable>,
    out_dir: PathBuf,
    prefix: String,
    written: AtomicUsize,
}

impl TerminalSession {
    pub fn new(table: Arc<CommandTable>, out_dir: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            table,
            out_dir,
            prefix: prefix.into(),
            written: AtomicUsize::new(0),
        }
    }

    fn write_image(&self, image: &RenderedImage) -> Result<PathBuf, HostError> {
        fs::create_dir_all(&self.out_dir)?;
        let n = self.written.fetch_add(1, Ordering::SeqCst) + 1;
        let path = image_path(&self.out_dir, &self.prefix, n, &image.content_type);
        fs::write(&path, &image.bytes)?;
        Ok(path)
    }
}

#[async_trait]
impl Session for TerminalSession {
    async fn send(&self, reply: Reply) -> Result<(), HostError> {
        match reply {
            Reply::Text(text) => println!("{text}"),
            Reply::Image(image) => {
                let path = self.write_image(&image)?;
                println!("{}", path.display());
            }
        }
        Ok(())
    }

    async fn execute(&self, command_line: &str) -> Result<(), HostError> {
        match command_line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["help", name] => {
                println!("{}", self.table.help(name)?);
                Ok(())
            }
            _ => Err(HostError::UnknownCommand(command_line.to_string())),
        }
    }
}

pub fn image_extension(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    match essence {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin"),
    }
}

fn image_path(dir: &Path, prefix: &str, n: usize, content_type: &str) -> PathBuf {
    dir.join(format!("{prefix}-{n}.{}", image_extension(content_type)))
}
