pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod ledger;
pub mod models;
pub mod shell;
pub mod storage;
pub mod store;
pub mod view;

use std::io::{BufRead, Write};

use clock::Clock;
use controller::Tracker;
use error::Result;
use shell::{Command, HELP, TODAY};
use storage::KeyValueStorage;
use store::TransactionStore;
use view::{Renderer, TextRenderer, ViewSettings};

/// Run line commands from a reader against the store, rendering to a writer
///
/// The snapshot stored under `key` is loaded first; every command is handled
/// to completion before the next line is read. Stops at `quit` or end of input.
pub fn run_shell<R, W, S, C>(
    reader: R,
    writer: W,
    storage: S,
    clock: C,
    key: &str,
    settings: ViewSettings,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: KeyValueStorage,
    C: Clock,
{
    let store = TransactionStore::load(storage, clock, key);
    let mut tracker = Tracker::new(store, TextRenderer::new(writer), settings);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Add(mut form)) => {
                if form.date.eq_ignore_ascii_case(TODAY) {
                    form.date = tracker.form_date().to_string();
                }
                tracker.submit(&form);
            }
            Ok(Command::Filter(filter)) => tracker.change_filter(filter),
            Ok(Command::Delete(id)) => tracker.delete(id),
            Ok(Command::Category(category)) => tracker.select_category(&category),
            Ok(Command::List) => tracker.refresh(),
            Ok(Command::Help) => tracker.renderer_mut().notify(HELP),
            Ok(Command::Quit) => break,
            Err(message) => tracker.renderer_mut().notify(&message),
        }
    }

    let (_, renderer) = tracker.into_parts();
    renderer.into_inner().flush()?;
    Ok(())
}
