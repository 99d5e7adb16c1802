//! Strip Editor - Edit 44x11 animations frame by frame from the terminal.

use std::io::{self, BufRead, Write};

use pixel_strip::{
    FrameSequence,
    animation::AnimationStore,
    editor::{Change, EditCommand, EditorError, EditorSession, EditorView},
    frame::{FRAME_HEIGHT, FRAME_WIDTH},
    schema::{StorageConfig, normalize_base_name},
};

const HELP: &str = "\
Commands:
  t <x> <y>       toggle pixel (0-based)
  clone           duplicate frame to end
  new             create blank frame after current
  clear           clear frame
  d               delete last frame
  n | ++          next frame
  p | --          previous frame
  h / j / k / l   shift left / down / up / right
  import <path>   overwrite current frame with an image
  s               save JSON and BMP
  q               quit";

/// Prints the current frame as text after every change.
struct TerminalView;

impl TerminalView {
    fn draw(sequence: &FrameSequence) {
        let frame = sequence.current_frame();
        let mut out = String::with_capacity((FRAME_WIDTH + 1) * FRAME_HEIGHT);
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                out.push(if frame.get(x, y) == Ok(true) { '#' } else { '.' });
            }
            out.push('\n');
        }
        print!("{}", out);
        println!("[{}]", sequence.counter_label());
    }
}

impl EditorView for TerminalView {
    fn changed(&mut self, sequence: &FrameSequence, change: &Change) {
        match change {
            Change::Saved(paths) => {
                for path in paths {
                    println!("Saved {}", path.display());
                }
            }
            _ => Self::draw(sequence),
        }
    }
}

/// Print `label` and read the next input line. `None` at end of input.
fn prompt<I>(label: &str, lines: &mut I) -> io::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", label);
    io::stdout().flush()?;
    lines.next().transpose()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Skip the prompt when a name is passed as argument
    let name = match args.get(1) {
        Some(name) => name.clone(),
        None => {
            match prompt("Filename: ", &mut lines) {
                Ok(Some(line)) => line,
                Ok(None) => std::process::exit(1),
                Err(e) => {
                    eprintln!("Error reading filename: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    let name = normalize_base_name(&name).to_string();
    if name.is_empty() {
        eprintln!("Error: filename must not be empty");
        std::process::exit(1);
    }

    let store = AnimationStore::new(StorageConfig::editor());
    let mut session = EditorSession::open(store, &name).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", name, e);
        std::process::exit(1);
    });
    println!("{}", HELP);
    session.subscribe(Box::new(TerminalView));

    for line in lines {
        let line = line.unwrap_or_else(|e| {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        });
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            "q" | "quit" | "close" => break,
            "?" | "help" => {
                println!("{}", HELP);
                continue;
            }
            _ => {}
        }

        let result = trimmed
            .parse::<EditCommand>()
            .and_then(|command| session.apply(command));
        match result {
            Ok(true) => {}
            Ok(false) => println!("(no change)"),
            Err(EditorError::Strip(e)) if trimmed == "s" || trimmed == "save" => {
                eprintln!("Error saving {}: {}", name, e);
                std::process::exit(1);
            }
            Err(e) => eprintln!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_next_line() {
        let mut lines = vec![Ok("anim".to_string()), Ok("n".to_string())].into_iter();
        assert_eq!(prompt("Filename: ", &mut lines).unwrap(), Some("anim".to_string()));
        assert_eq!(lines.next().unwrap().unwrap(), "n");
    }

    #[test]
    fn test_prompt_reports_read_errors() {
        let mut empty = std::iter::empty::<io::Result<String>>();
        assert_eq!(prompt("Filename: ", &mut empty).unwrap(), None);

        let mut failing = std::iter::once(Err(io::Error::other("closed")));
        assert!(prompt("Filename: ", &mut failing).is_err());
    }
}
