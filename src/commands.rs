//! Command handlers. Each one loads a page, runs engine operations, and saves
//! the page back only when something changed.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use canvas::catalog::Catalog;
use canvas::codec;
use canvas::doc::{Background, BgMode, ComponentId, EditError, LayoutMode, PageDocument};
use canvas::engine::CanvasEngine;
use canvas::geom::{CanvasSize, Offset, Size};
use canvas::preview::{PreviewChannel, snapshot_for_preview};
use canvas::props::{ComponentKind, PropertyBag};
use canvas::wheel::LuckyWheel;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::cli::{CanvasArgs, Command, PreviewSubcommand, SpinArgs};
use crate::config::StudioConfig;
use crate::error::CliError;
use crate::handoff::FileHandoff;
use crate::spin::{await_dismissal, run_spin};
use crate::store::DocumentStore;

/// Subdirectory of the page directory used as the preview handoff store.
const PREVIEW_DIR: &str = ".preview";

/// Everything a command needs besides its arguments.
pub struct Studio<S> {
    pub config: StudioConfig,
    pub store: S,
}

impl<S: DocumentStore> Studio<S> {
    pub fn new(config: StudioConfig, store: S) -> Self {
        Self { config, store }
    }

    fn handoff(&self) -> FileHandoff {
        FileHandoff::new(self.config.pages_dir.join(PREVIEW_DIR))
    }

    /// Load `page`, run `f` on an engine over it, and save if it changed.
    fn edit<T>(
        &self,
        page: &str,
        f: impl FnOnce(&mut CanvasEngine<'static>) -> Result<T, CliError>,
    ) -> Result<T, CliError> {
        let mut engine = CanvasEngine::new(self.store.load(page)?);
        let value = f(&mut engine)?;
        if engine.is_dirty() {
            self.store.save(page, engine.document())?;
            engine.mark_saved();
        }
        Ok(value)
    }
}

/// Run one command, writing its output to `out`.
///
/// # Errors
///
/// Returns the first failure; a failed command never saves a partial edit.
pub async fn run<S: DocumentStore, W: Write>(studio: &Studio<S>, command: Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::New { page, title, layout, force } => {
            if !force && studio.store.exists(&page)? {
                return Err(CliError::AlreadyExists(page));
            }
            let title = title.unwrap_or_else(|| page.clone());
            let doc = PageDocument::new(title, studio.config.canvas_size, layout.into())?;
            studio.store.save(&page, &doc)?;
            info!(page, "page created");
            writeln!(out, "created {page}")?;
        }
        Command::List => {
            for name in studio.store.list()? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Show { page, json } => {
            let doc = studio.store.load(&page)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&codec::to_record(&doc)?)?)?;
            } else {
                write!(out, "{}", snapshot_for_preview(&doc).render_outline(false))?;
            }
        }
        Command::Catalog { category } => {
            let catalog = Catalog::builtin();
            let defs = match category {
                Some(c) => catalog.list_by_category(c.into()),
                None => catalog.list_all(),
            };
            for def in defs {
                let category = format!("{:?}", def.category).to_lowercase();
                let size = def.default_size;
                writeln!(out, "{:<12} {:<14} {category:<10} {}x{}", def.type_name(), def.display_name, size.width, size.height)?;
            }
        }
        Command::Add { page, type_name, at } => {
            let id = studio.edit(&page, |engine| {
                let id = engine.add_component(&type_name, at)?;
                if engine.component(&id).is_some_and(|c| c.kind() == ComponentKind::LuckyWheel) {
                    engine.apply_patch(&id, wheel_defaults(&studio.config))?;
                }
                Ok(id)
            })?;
            writeln!(out, "{id}")?;
        }
        Command::Remove { page, id } => {
            let id = ComponentId::from(id);
            studio.edit(&page, |engine| Ok(engine.remove_component(&id)?))?;
            writeln!(out, "removed {id}")?;
        }
        Command::Duplicate { page, id } => {
            let copy = studio.edit(&page, |engine| Ok(engine.duplicate_component(&id.into())?))?;
            writeln!(out, "{copy}")?;
        }
        Command::Move { page, id, top, left } => {
            let id = ComponentId::from(id);
            let p = studio.edit(&page, |engine| Ok(engine.update_position(&id, Offset::new(top, left))?))?;
            writeln!(out, "{id} @{},{} {}x{}", p.left, p.top, p.width, p.height)?;
        }
        Command::Resize { page, id, width, height } => {
            let id = ComponentId::from(id);
            let p = studio.edit(&page, |engine| Ok(engine.resize(&id, Size::new(width, height))?))?;
            writeln!(out, "{id} @{},{} {}x{}", p.left, p.top, p.width, p.height)?;
        }
        Command::Reorder { page, from, to } => {
            let order = studio.edit(&page, |engine| {
                engine.reorder(from, to)?;
                Ok(engine.document().components().iter().map(|c| c.id().clone()).collect::<Vec<_>>())
            })?;
            for (n, id) in order.iter().enumerate() {
                writeln!(out, "{n:>2}. {id}")?;
            }
        }
        Command::Patch { page, id, data } => {
            let Value::Object(patch) = serde_json::from_str::<Value>(&data)? else {
                return Err(CliError::PatchNotObject);
            };
            let id = ComponentId::from(id);
            let warnings = studio.edit(&page, |engine| {
                engine.apply_patch(&id, patch)?;
                Ok(engine.prize_warnings(&id)?)
            })?;
            writeln!(out, "patched {id}")?;
            for warning in warnings {
                writeln!(out, "warning: {warning}")?;
            }
        }
        Command::Fields { page, id } => {
            let engine = CanvasEngine::new(studio.store.load(&page)?);
            for field in engine.panel_fields(&id.into())? {
                let kind = format!("{:?}", field.kind).to_lowercase();
                writeln!(out, "{:<14} {:<20} {kind}", field.name, field.label)?;
            }
        }
        Command::Pick { page, top, left } => {
            let mut engine = CanvasEngine::new(studio.store.load(&page)?);
            match engine.select_at(Offset::new(top, left)) {
                Some(id) => writeln!(out, "{id}")?,
                None => writeln!(out, "nothing at {left},{top}")?,
            }
        }
        Command::Layout { page, mode } => {
            let mode: LayoutMode = mode.into();
            studio.edit(&page, |engine| Ok(engine.set_layout_mode(mode)?))?;
            writeln!(out, "layout {mode:?}")?;
        }
        Command::Canvas(args) => {
            let page = args.page.clone();
            let summary = studio.edit(&page, |engine| apply_canvas_args(engine, args))?;
            writeln!(out, "{summary}")?;
        }
        Command::Export { page, out: path } => {
            let doc = studio.store.load(&page)?;
            let blob = serde_json::to_string_pretty(&codec::to_record(&doc)?)?;
            match path {
                Some(path) => {
                    fs::write(&path, blob)?;
                    writeln!(out, "exported {page} to {}", path.display())?;
                }
                None => writeln!(out, "{blob}")?,
            }
        }
        Command::Import { file, name, force } => {
            let blob = read_file(file)?;
            let doc = codec::deserialize(&blob, Catalog::builtin())?;
            if !force && studio.store.exists(&name)? {
                return Err(CliError::AlreadyExists(name));
            }
            studio.store.save(&name, &doc)?;
            writeln!(out, "imported {name} ({} components)", doc.len())?;
        }
        Command::Preview(preview) => match preview.command {
            PreviewSubcommand::Publish { page } => {
                let doc = studio.store.load(&page)?;
                let mut channel = PreviewChannel::new(studio.handoff());
                channel.publish(&doc)?;
                writeln!(out, "published {page}")?;
            }
            PreviewSubcommand::Show { z_order } => {
                let payload = PreviewChannel::new(studio.handoff()).receive(Catalog::builtin());
                write!(out, "{}", payload.render_outline(z_order))?;
            }
        },
        Command::Spin(args) => spin(studio, args, out).await?,
    }
    Ok(())
}

/// Studio spin defaults for a freshly placed wheel.
fn wheel_defaults(config: &StudioConfig) -> PropertyBag {
    let duration_ms = u64::try_from(config.spin.duration.as_millis()).unwrap_or(u64::MAX);
    let mut patch = PropertyBag::new();
    patch.insert("extraTurns".into(), json!(config.spin.extra_turns));
    patch.insert("durationMs".into(), json!(duration_ms));
    patch
}

fn apply_canvas_args(engine: &mut CanvasEngine<'_>, args: CanvasArgs) -> Result<String, CliError> {
    let current = engine.document().meta().clone();
    if args.width.is_some() || args.height.is_some() {
        let size = CanvasSize::new(
            args.width.unwrap_or(current.canvas_size.width),
            args.height.unwrap_or(current.canvas_size.height),
        );
        engine.set_canvas_size(size)?;
    }
    if let Some(title) = args.title {
        engine.set_title(title)?;
    }
    if let Some(description) = args.description {
        engine.set_description((!description.is_empty()).then_some(description))?;
    }
    if args.bg_color.is_some() || args.bg_image.is_some() {
        let mut background: Background = current.background;
        if let Some(color) = args.bg_color {
            background.color = color;
        }
        if let Some(image) = args.bg_image {
            background.mode = BgMode::Image;
            background.image = Some(image);
        }
        engine.set_background(background)?;
    }

    let meta = engine.document().meta();
    Ok(format!(
        "{} {}x{} {:?} {}",
        meta.title,
        meta.canvas_size.width,
        meta.canvas_size.height,
        meta.background.mode,
        meta.background.color
    ))
}

async fn spin<S: DocumentStore, W: Write>(studio: &Studio<S>, args: SpinArgs, out: &mut W) -> Result<(), CliError> {
    let engine = CanvasEngine::new(studio.store.load(&args.page)?);
    let id = ComponentId::from(args.id);
    let component = engine.component(&id).ok_or_else(|| EditError::NotFound(id.clone()))?;
    let props = component.props().as_lucky_wheel().ok_or_else(|| CliError::NotAWheel(id.to_string()))?;
    for warning in engine.prize_warnings(&id)? {
        warn!(%id, %warning, "prize table");
        writeln!(out, "warning: {warning}")?;
    }

    let mut wheel = LuckyWheel::from_props(props).with_settle_delay(studio.config.spin.settle_delay);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    if args.instant || args.count > 1 {
        let mut tally = vec![0_usize; wheel.prizes().len()];
        for _ in 0..args.count {
            let plan = wheel.draw(&mut rng)?;
            wheel.advance(plan.animation.duration);
            wheel.acknowledge();
            tally[plan.prize_index] += 1;
        }
        for (prize, hits) in wheel.prizes().iter().zip(tally) {
            #[allow(clippy::cast_precision_loss)]
            let share = hits as f64 * 100.0 / args.count.max(1) as f64;
            writeln!(out, "{:<10} {:<24} {hits:>8} {share:>6.2}%", prize.id, prize.name)?;
        }
        return Ok(());
    }

    let frame = studio.config.spin.frame;
    let report = run_spin(&mut wheel, &mut rng, frame, |angle| eprint!("\r{angle:>9.1}°")).await?;
    eprintln!();
    writeln!(out, "{} ({}) after {} frames at {:.1}°", report.prize.name, report.prize.id, report.frames, report.final_angle)?;
    await_dismissal(&mut wheel, frame).await;
    Ok(())
}

fn read_file(path: PathBuf) -> Result<String, CliError> {
    fs::read_to_string(&path).map_err(|source| CliError::Read { path, source })
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
