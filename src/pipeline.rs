//! Renders every technology card of a set of races.

use crate::catalog::{DisplayNames, Race, TechCatalog, TechId, TechnologyRecord};
use crate::compose::CardComposer;
use crate::error::{Error, Result};
use crate::layer::{Bitmap, Canvas};
use crate::store::{card_filename, AssetStore};
use crate::text::FontMetrics;

use itertools::Itertools;
use std::cell::Cell;

/// Whether technology `id` belongs on a template in the given upgrade state.
pub fn should_render(id: TechId, upgraded: bool) -> bool {
    upgraded == id.is_upgraded()
}

/// Technologies of `catalog` drawn on the template for `upgraded`, by id.
pub fn select<'c>(
    catalog: impl IntoIterator<Item = &'c TechnologyRecord>,
    upgraded: bool,
) -> Vec<&'c TechnologyRecord> {
    catalog
        .into_iter()
        .filter(|tech| should_render(tech.id, upgraded))
        .sorted_by_key(|tech| tech.id)
        .collect()
}

/// Observes a pipeline run. Every method defaults to doing nothing.
pub trait Visitor {
    fn on_start(&self, _races: &[Race]) {}
    fn on_race_skip(&self, _race: Race) {}
    fn on_race_start(&self, _race: Race, _count: usize) {}
    fn on_race_err(&self, _race: Race, _e: &Error) {}
    fn on_iter_start(&self, _race: Race, _id: TechId, _title: Option<&str>) {}
    fn on_iter_ok(&self, _race: Race, _id: TechId, _filename: &str) {}
    fn on_iter_err(&self, _race: Race, _id: TechId, _e: &Error) {}
    fn on_finish(&self, _result: &Result<Summary>) {}
}

impl Visitor for () {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub failed: usize,
    pub failed_races: usize,
    pub skipped_races: usize,
}

pub struct Pipeline<'a, S, K, M: ?Sized, V> {
    pub store: &'a S,
    pub catalog: &'a K,
    pub names: &'a DisplayNames,
    pub metrics: &'a M,
    pub glyph: &'a str,
    pub visitor: V,
}

impl<'a, S, K, M, V> Pipeline<'a, S, K, M, V>
where
    S: AssetStore,
    S::Image: Bitmap,
    K: TechCatalog,
    M: FontMetrics + ?Sized,
    V: Visitor,
{
    /// Renders all cards of `races`. Only a missing glyph stops the whole
    /// run; asset failures stop one race and card failures one card.
    pub fn run<C: Canvas<Image = S::Image>>(&self, canvas: &C, races: &[Race]) -> Result<Summary> {
        self.visitor.on_start(races);
        let result = self.run_internal(canvas, races);
        self.visitor.on_finish(&result);
        result
    }

    fn run_internal<C: Canvas<Image = S::Image>>(
        &self,
        canvas: &C,
        races: &[Race],
    ) -> Result<Summary> {
        let glyph = self.store.glyph(self.glyph)?;
        let composer = CardComposer::new(self.metrics, &glyph);
        let mut summary = Summary::default();
        for &race in races {
            if !race.has_technology_track() {
                self.visitor.on_race_skip(race);
                summary.skipped_races += 1;
                continue;
            }
            if let Err(e) = self.render_race(canvas, &composer, race, &mut summary) {
                self.visitor.on_race_err(race, &e);
                summary.failed_races += 1;
            }
        }
        Ok(summary)
    }

    fn render_race<C: Canvas<Image = S::Image>>(
        &self,
        canvas: &C,
        composer: &CardComposer<'_, M, S::Image>,
        race: Race,
        summary: &mut Summary,
    ) -> Result<()> {
        let catalog = self.catalog.load(race)?;
        let templates = [
            (false, self.store.template(race, false)?),
            (true, self.store.template(race, true)?),
        ];
        let count = templates
            .iter()
            .map(|(upgraded, _)| select(catalog.values(), *upgraded).len())
            .sum();
        self.visitor.on_race_start(race, count);

        for (upgraded, template) in templates.iter() {
            for tech in select(catalog.values(), *upgraded) {
                let title = self.names.get(tech.id);
                self.visitor.on_iter_start(race, tech.id, title);
                let result = title
                    .ok_or(Error::MissingDisplayName(tech.id))
                    .and_then(|title| {
                        let card = composer.compose(canvas, template, title, *upgraded, tech)?;
                        let filename = card_filename(race, title);
                        self.store.save(&card, &filename)?;
                        Ok(filename)
                    });
                match result {
                    Ok(filename) => {
                        summary.rendered += 1;
                        self.visitor.on_iter_ok(race, tech.id, &filename);
                    }
                    Err(e) => {
                        summary.failed += 1;
                        self.visitor.on_iter_err(race, tech.id, &e);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogVisitor {
    done: Cell<usize>,
    total: Cell<usize>,
}

impl Visitor for LogVisitor {
    fn on_start(&self, races: &[Race]) {
        log::info!("rendering cards for {}", races.iter().join(", "));
    }

    fn on_race_skip(&self, race: Race) {
        log::info!("{race} has no technology cards, skipping");
    }

    fn on_race_start(&self, race: Race, count: usize) {
        self.total.set(self.total.get() + count);
        log::info!("{race}: {count} cards");
    }

    fn on_race_err(&self, race: Race, e: &Error) {
        log::error!("{race}: {e}");
    }

    fn on_iter_start(&self, race: Race, id: TechId, title: Option<&str>) {
        log::debug!("creating {race} {} ({id})...", title.unwrap_or("?"));
    }

    fn on_iter_ok(&self, _race: Race, _id: TechId, filename: &str) {
        self.done.set(self.done.get() + 1);
        log::info!("[{:3}/{:3}] {filename}", self.done.get(), self.total.get());
    }

    fn on_iter_err(&self, race: Race, id: TechId, e: &Error) {
        log::warn!("{race} {id}: {e}");
    }

    fn on_finish(&self, result: &Result<Summary>) {
        match result {
            Ok(s) => log::info!(
                "done! {} rendered, {} failed, {} races failed, {} skipped",
                s.rendered,
                s.failed,
                s.failed_races,
                s.skipped_races
            ),
            Err(e) => log::error!("{e}"),
        }
    }
}
