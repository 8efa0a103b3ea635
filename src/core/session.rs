//! Interactive editing session.
//!
//! One thread owns the engine. Stdin lines and finished image loads reach
//! it through a single channel; between events the loop wakes up for the
//! save deadline or the remote polling interval, whichever comes first.

use crate::config::Config;
use crate::core::actions;
use crate::core::report::{ReportEngine, ReportLogic};
use crate::core::upload::load_image;
use crate::core::view::render_text;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::models::HeaderField;
use crate::ui::messages::{header, info, success};
use crate::utils::path::expand_tilde;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

pub const SAVE_WORD_GUIDANCE: &str = "Saving as Word is not available. Use `print` to create a PDF, \
     or print the report with your system's \"Save as PDF\" printer.";

const HELP: &str = r#"Commands (indices start at 0):
  header <field> <value>        owner-name | po-no | project-name | supervisor |
                                entry-time | exit-time | date
  title <page> <value>          set the page title
  caption <page> <photo> <text> set a photo caption
  copy-caption <page> <photo>   copy the caption of the previous cell
  copy-title <page>             copy the title of the previous page
  upload <page> <photo> <file>  attach an image (kept in this session only)
  add-page                      append a page with 6 photo slots
  remove-page <page>            delete a page
  show                          print the report
  print <file.pdf>              render the printable report
  save-word                     (not available)
  whoami                        show your anonymous id
  help | quit"#;

#[derive(Debug)]
enum SessionEvent {
    Line(String),
    ImageLoaded {
        page: usize,
        photo: usize,
        result: AppResult<String>,
    },
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Header(HeaderField, String),
    Title(usize, String),
    Caption(usize, usize, String),
    CopyCaption(usize, usize),
    CopyTitle(usize),
    Upload(usize, usize, PathBuf),
    AddPage,
    RemovePage(usize),
    Show,
    Print(PathBuf),
    SaveWord,
    WhoAmI,
    Help,
    Quit,
}

/// Split a command line into words; double quotes group words and may
/// contain `\"`.
pub fn split_args(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut has_token = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    out.push(std::mem::take(&mut cur));
                    has_token = false;
                }
            }
            c => {
                cur.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        out.push(cur);
    }
    out
}

fn index(arg: Option<&String>, what: &str) -> AppResult<usize> {
    let raw = arg.ok_or_else(|| AppError::InvalidIndex(format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| AppError::InvalidIndex(format!("{what} '{raw}'")))
}

fn rest(args: &[String], from: usize) -> String {
    args.get(from..).map(|r| r.join(" ")).unwrap_or_default()
}

impl SessionCommand {
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let args = split_args(line);
        let Some(verb) = args.first() else {
            return Ok(None);
        };

        let cmd = match verb.as_str() {
            "header" => {
                let name = args
                    .get(1)
                    .ok_or_else(|| AppError::Other("missing header field".into()))?;
                let field = HeaderField::from_name(name)
                    .ok_or_else(|| AppError::Other(format!("unknown header field '{name}'")))?;
                SessionCommand::Header(field, rest(&args, 2))
            }
            "title" => SessionCommand::Title(index(args.get(1), "page")?, rest(&args, 2)),
            "caption" => SessionCommand::Caption(
                index(args.get(1), "page")?,
                index(args.get(2), "photo")?,
                rest(&args, 3),
            ),
            "copy-caption" => {
                SessionCommand::CopyCaption(index(args.get(1), "page")?, index(args.get(2), "photo")?)
            }
            "copy-title" => SessionCommand::CopyTitle(index(args.get(1), "page")?),
            "upload" => {
                let file = rest(&args, 3);
                if file.is_empty() {
                    return Err(AppError::Other("missing file to upload".into()));
                }
                SessionCommand::Upload(
                    index(args.get(1), "page")?,
                    index(args.get(2), "photo")?,
                    expand_tilde(&file),
                )
            }
            "add-page" => SessionCommand::AddPage,
            "remove-page" => SessionCommand::RemovePage(index(args.get(1), "page")?),
            "show" => SessionCommand::Show,
            "print" => {
                let file = rest(&args, 1);
                if file.is_empty() {
                    return Err(AppError::Other("missing output file".into()));
                }
                SessionCommand::Print(expand_tilde(&file))
            }
            "save-word" => SessionCommand::SaveWord,
            "whoami" => SessionCommand::WhoAmI,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(AppError::Other(format!("unknown command '{other}'"))),
        };
        Ok(Some(cmd))
    }
}

pub struct SessionLogic;

impl SessionLogic {
    pub fn run(cfg: &Config) -> AppResult<()> {
        let mut engine = ReportLogic::connect(cfg)?;

        header("Photo delivery report - session");
        info(format!(
            "Signed in as {}",
            engine.user_id().unwrap_or("(not signed in)")
        ));
        ReportLogic::show_notices(&mut engine);

        let (tx, rx) = mpsc::channel();
        spawn_stdin_reader(tx.clone());

        let poll_every = cfg.poll_interval();
        loop {
            let now = Instant::now();
            let wait = engine
                .next_deadline()
                .map(|d| d.saturating_duration_since(now))
                .unwrap_or(poll_every)
                .min(poll_every);

            match rx.recv_timeout(wait) {
                Ok(SessionEvent::Line(line)) => match SessionCommand::parse(&line) {
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(cmd)) => {
                        if let Err(e) = Self::execute(&mut engine, cmd, &tx) {
                            ReportLogic::show_error(&e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => ReportLogic::show_error(&e),
                },
                Ok(SessionEvent::ImageLoaded {
                    page,
                    photo,
                    result,
                }) => match result {
                    Ok(url) => {
                        engine.edit(Instant::now(), |d| {
                            actions::set_photo_image(d, page, photo, url)
                        });
                        success(format!("Image attached to page {page}, photo {photo}."));
                    }
                    Err(e) => ReportLogic::show_error(&e),
                },
                Ok(SessionEvent::Closed) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            engine.poll(Instant::now());
            ReportLogic::show_notices(&mut engine);
        }

        // leaving the session saves what is still waiting for the timer
        engine.flush();
        ReportLogic::show_notices(&mut engine);
        engine.teardown();
        info("Session closed.");
        Ok(())
    }

    fn execute(
        engine: &mut ReportEngine,
        cmd: SessionCommand,
        tx: &Sender<SessionEvent>,
    ) -> AppResult<()> {
        let now = Instant::now();
        match cmd {
            SessionCommand::Header(field, value) => {
                let value = ReportLogic::check_header_value(field, &value)?;
                engine.edit(now, |d| actions::edit_header(d, field, &value));
            }
            SessionCommand::Title(page, value) => {
                engine.edit(now, |d| actions::edit_page_title(d, page, &value));
            }
            SessionCommand::Caption(page, photo, value) => {
                engine.edit(now, |d| actions::edit_caption(d, page, photo, &value));
            }
            SessionCommand::CopyCaption(page, photo) => {
                engine.update(now, |d| actions::copy_caption_from_previous(d, page, photo))?;
            }
            SessionCommand::CopyTitle(page) => {
                engine.update(now, |d| actions::copy_title_from_previous(d, page))?;
            }
            SessionCommand::Upload(page, photo, path) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    let result = load_image(&path);
                    let _ = tx.send(SessionEvent::ImageLoaded {
                        page,
                        photo,
                        result,
                    });
                });
                info(format!("Loading image for page {page}, photo {photo}..."));
            }
            SessionCommand::AddPage => engine.edit(now, actions::add_page),
            SessionCommand::RemovePage(page) => {
                engine.edit(now, |d| actions::remove_page(d, page));
            }
            SessionCommand::Show => print!("{}", render_text(engine.document())),
            SessionCommand::Print(path) => {
                ExportLogic::export(engine.document(), ExportFormat::Pdf, &path, true)?;
            }
            SessionCommand::SaveWord => info(SAVE_WORD_GUIDANCE),
            SessionCommand::WhoAmI => println!("{}", engine.user_id().unwrap_or("-")),
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => {}
        }
        Ok(())
    }
}

fn spawn_stdin_reader(tx: Sender<SessionEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(SessionEvent::Line(l)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = tx.send(SessionEvent::Closed);
    });
}
