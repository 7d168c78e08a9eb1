//! Interactive rotation editing session.
//!
//! Each input line is one event; it is handled completely before the next
//! line is read. The timeline lives only for the length of the session.

use clap::Args;
use rotation_core::{
    BlockKind, Catalog, ClipboardProvider, Config, CoreError, DragSource, DropTarget, Notice,
    PaletteItem, RotationEditor, START_TICK,
};
use std::io::{BufRead, IsTerminal, Write};

use crate::clipboard::{PromptReader, SystemClipboard};

#[derive(Args)]
pub struct EditArgs {
    /// Print exports to stdout instead of the system clipboard
    #[arg(long)]
    pub no_clipboard: bool,
}

const HELP: &str = "\
commands:
  palette [SECTION]       list tick blocks and abilities
  search QUERY            fuzzy-search ability names
  show                    print the timeline
  add ITEM [INDEX]        place a palette item (p_Kick, Kick, 3 for 3 ticks)
  drag ITEM [TARGET]      raw drag-end (ITEM: palette or block id, TARGET: timeline-N or trash-bin)
  move FROM TO            move the block at FROM to TO
  rm INDEX                delete the block at INDEX
  clear                   empty the timeline
  export                  copy the rotation JSON
  import [JSON]           replace the timeline (paste JSON; it ends once the text parses,
                          or at two blank lines in a row)
  help                    show this text
  quit                    leave the session";

pub fn run(args: EditArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let editor = RotationEditor::new(&catalog, config.search);

    let mut system_clipboard = SystemClipboard::new();
    let clipboard: Option<&mut dyn ClipboardProvider> = if args.no_clipboard {
        None
    } else {
        Some(&mut system_clipboard)
    };

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();

    Session {
        editor,
        clipboard,
        interactive,
    }
    .run(&mut input, &mut output)?;
    Ok(())
}

/// One editing session over a line-oriented input.
pub struct Session<'c, 'p> {
    pub editor: RotationEditor<'c>,
    pub clipboard: Option<&'p mut dyn ClipboardProvider>,
    pub interactive: bool,
}

enum Flow {
    Continue,
    Quit,
}

impl Session<'_, '_> {
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> std::io::Result<()> {
        if self.interactive {
            writeln!(out, "rotation editor, type 'help' for commands")?;
        }
        loop {
            if self.interactive {
                write!(out, "> ")?;
                out.flush()?;
            }
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.handle(line, input, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        out.flush()
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, Box<dyn std::error::Error>> {
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        match command {
            "help" | "?" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "palette" => self.palette(if rest.is_empty() { None } else { Some(rest) }, out)?,
            "search" => {
                let results = self.editor.search(rest);
                if results.is_empty() {
                    writeln!(out, "no matches")?;
                }
                for entry in results {
                    writeln!(out, "{:<32} p_{}", entry.name, entry.name)?;
                }
            }
            "show" => self.show(out)?,
            "add" => {
                // "add Text: 1" names an ability, "add 2 0" places 2 ticks at 0
                let (item, index) = match self.palette_item(rest) {
                    Ok(item) => (item, None),
                    Err(whole) => match rest.rsplit_once(char::is_whitespace) {
                        Some((item, index)) if index.parse::<usize>().is_ok() => {
                            (self.palette_item(item.trim())?, Some(index.parse::<usize>()?))
                        }
                        _ => return Err(whole.into()),
                    },
                };
                let index = index.unwrap_or_else(|| self.editor.timeline().len());
                let outcome = self
                    .editor
                    .drop_item(&DragSource::Palette(item), Some(DropTarget::Slot(index)))?;
                writeln!(out, "{outcome:?}")?;
            }
            "drag" => {
                let item = args.next().ok_or("usage: drag ITEM [TARGET]")?;
                let target = args.next();
                self.editor.drag_start(item)?;
                let outcome = self.editor.drag_end(item, target)?;
                writeln!(out, "{outcome:?}")?;
            }
            "move" => {
                let from = parse_index(args.next())?;
                let to = parse_index(args.next())?;
                self.editor
                    .timeline_mut()
                    .move_by_index(from, to)
                    .map_err(CoreError::from)?;
                writeln!(out, "moved {from} -> {to}")?;
            }
            "rm" => {
                let index = parse_index(args.next())?;
                let id = self
                    .editor
                    .timeline()
                    .get(index)
                    .map(|b| b.id())
                    .ok_or_else(|| format!("no block at index {index}"))?;
                self.editor.timeline_mut().remove_by_id(id);
                writeln!(out, "removed {index}")?;
            }
            "clear" => {
                self.editor.clear();
                writeln!(out, "timeline cleared")?;
            }
            "export" => match self.clipboard.as_deref_mut() {
                Some(clipboard) => {
                    let notice = self.editor.export_to(clipboard)?;
                    writeln!(out, "{notice}")?;
                }
                None => writeln!(out, "{}", self.editor.export_text()?)?,
            },
            "import" => {
                let notice = if rest.is_empty() {
                    if self.interactive {
                        writeln!(out, "Paste your ability-only JSON here (tick + ability):")?;
                        out.flush()?;
                    }
                    self.editor.import_from(&mut PromptReader::new(input))
                } else {
                    match self.editor.import_text(rest) {
                        Ok(events) => Notice::Imported {
                            events,
                            blocks: self.editor.timeline().len(),
                        },
                        Err(e) => Notice::ImportRejected {
                            reason: e.to_string(),
                        },
                    }
                };
                writeln!(out, "{notice}")?;
            }
            other => writeln!(out, "unknown command '{other}', type 'help'")?,
        }
        Ok(Flow::Continue)
    }

    /// Accepts a palette id, an exact ability name, or a tick count.
    fn palette_item(&self, raw: &str) -> Result<PaletteItem, String> {
        let catalog = self.editor.catalog();
        if let Some(item) = catalog.palette_item(raw) {
            return Ok(item);
        }
        if let Ok(len) = raw.parse::<u32>() {
            return catalog
                .palette_item(&format!("p_ticks_{len}"))
                .ok_or_else(|| format!("tick blocks come in lengths 1-6, not {len}"));
        }
        catalog
            .find(raw)
            .cloned()
            .map(PaletteItem::Ability)
            .ok_or_else(|| format!("'{raw}' is not in the catalog"))
    }

    fn palette<W: Write>(&self, section: Option<&str>, out: &mut W) -> std::io::Result<()> {
        let catalog: &Catalog = self.editor.catalog();
        if section.is_none() {
            let ticks: Vec<String> = catalog.tick_palette().iter().map(|p| p.palette_id()).collect();
            writeln!(out, "Ticks: {}", ticks.join(" "))?;
        }
        for s in catalog.sections() {
            if section.is_some_and(|want| !want.eq_ignore_ascii_case(&s.name)) {
                continue;
            }
            let names: Vec<&str> = s.entries.iter().map(|e| e.name.as_str()).collect();
            writeln!(out, "{}: {}", s.name, names.join(", "))?;
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let timeline = self.editor.timeline();
        if timeline.is_empty() {
            return writeln!(out, "(empty timeline)");
        }
        let mut tick = START_TICK;
        for (index, block) in timeline.iter().enumerate() {
            let at = match block.kind() {
                BlockKind::Ticks { length } => {
                    tick = tick.saturating_add(i64::from(length.get()));
                    String::new()
                }
                BlockKind::Ability { .. } => format!("@{tick}"),
            };
            writeln!(out, "{index:>3}  {:<28} {at:<6} {}", block.label(), block.id())?;
        }
        Ok(())
    }
}

fn parse_index(raw: Option<&str>) -> Result<usize, String> {
    let raw = raw.ok_or("missing index")?;
    raw.parse()
        .map_err(|_| format!("'{raw}' is not an index"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_core::{MemoryClipboard, SearchOptions};
    use std::io::Cursor;

    fn run_script(catalog: &Catalog, clipboard: Option<&mut dyn ClipboardProvider>, script: &str) -> String {
        let mut session = Session {
            editor: RotationEditor::new(catalog, SearchOptions::default()),
            clipboard,
            interactive: false,
        };
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_and_export_to_stdout() {
        let catalog = Catalog::builtin();
        let out = run_script(&catalog, None, "add 3\nadd Kick\nadd p_ticks_2\nadd p_Slice\nexport\n");
        assert!(out.contains("\"tick\": 7"));
        assert!(out.contains("\"ability\": \"Kick\""));
        assert!(out.contains("\"tick\": 9"));
    }

    #[test]
    fn test_export_to_clipboard() {
        let catalog = Catalog::builtin();
        let mut clipboard = MemoryClipboard::new();
        let out = run_script(&catalog, Some(&mut clipboard), "add Kick\nexport\n");
        assert!(out.contains("Timeline JSON copied to clipboard!"));
        assert!(clipboard.contents().unwrap().contains("\"tick\": 4"));
    }

    #[test]
    fn test_add_at_index_and_show() {
        let catalog = Catalog::builtin();
        let out = run_script(&catalog, None, "add Kick\nadd 2 0\nshow\n");
        let lines: Vec<&str> = out.lines().filter(|l| l.starts_with("  ")).collect();
        assert!(lines[0].contains("2 ticks"));
        assert!(lines[1].contains("Kick"));
        assert!(lines[1].contains("@6"));
    }

    #[test]
    fn test_import_prompt_then_continue() {
        let catalog = Catalog::builtin();
        let script = "import\n[{\"tick\":5,\"ability\":\"A\"},\n{\"tick\":5,\"ability\":\"B\"}]\n\nshow\n";
        let out = run_script(&catalog, None, script);
        assert!(out.contains("Imported 2 abilities (3 blocks)."));
        assert!(out.contains("5 ticks"));
    }

    #[test]
    fn test_import_prompt_accepts_blank_lines_in_payload() {
        let catalog = Catalog::builtin();
        let script = "import\n[\n  {\"tick\": 7, \"ability\": \"Kick\"},\n\n  {\"tick\": 9, \"ability\": \"Slice\"}\n]\nshow\n";
        let out = run_script(&catalog, None, script);
        assert!(out.contains("Imported 2 abilities (4 blocks)."));
        assert!(out.contains("Slice"));
    }

    #[test]
    fn test_inline_import_rejects_bad_payload() {
        let catalog = Catalog::builtin();
        let out = run_script(&catalog, None, "add Kick\nimport [{\"tick\":\"x\",\"ability\":\"Slice\"}]\nshow\n");
        assert!(out.contains("Invalid timeline JSON format"));
        assert!(out.contains("Kick"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let catalog = Catalog::builtin();
        let out = run_script(&catalog, None, "add Nothing\nmove 0 1\nrm 4\nfrobnicate\nadd 9\nquit\nadd Kick\n");
        assert!(out.contains("error: 'Nothing' is not in the catalog"));
        assert!(out.contains("error: Timeline error: Index 0 out of range"));
        assert!(out.contains("error: no block at index 4"));
        assert!(out.contains("unknown command 'frobnicate'"));
        assert!(out.contains("lengths 1-6"));
        assert!(!out.contains("Inserted"));
    }

    #[test]
    fn test_drag_and_trash_by_id() {
        let catalog = Catalog::builtin();
        let mut session = Session {
            editor: RotationEditor::new(&catalog, SearchOptions::default()),
            clipboard: None,
            interactive: false,
        };
        let mut out = Vec::new();
        session
            .run(&mut Cursor::new("drag p_Kick timeline-0\ndrag p_Slice timeline-1\n"), &mut out)
            .unwrap();
        let id = session.editor.snapshot()[0].id();
        session
            .run(&mut Cursor::new(format!("drag {id} trash-bin\n")), &mut out)
            .unwrap();
        let names: Vec<String> = session.editor.snapshot().iter().map(|b| b.label()).collect();
        assert_eq!(names, vec!["Slice"]);
    }

    #[test]
    fn test_search_and_palette() {
        let catalog = Catalog::builtin();
        let out = run_script(&catalog, None, "search kick\npalette misc\n");
        assert!(out.lines().next().unwrap().starts_with("Kick"));
        assert!(out.contains("Misc: "));
        assert!(!out.contains("Melee: "));
    }
}
