//! Per-session state: the drawn selection and the recorded answers.
//!
//! A [`Session`] is a plain value owned by whoever serves one user. It holds
//! its own random source, so two sessions never share or observe each
//! other's draws or answers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::model::{Catalog, ScenarioQuestion};

/// One scenario per trait, in catalog trait order.
#[derive(Debug, Clone)]
pub struct SessionSelection {
    catalog: Arc<Catalog>,
    picks: Vec<usize>,
}

/// A borrowed view of one entry of a [`SessionSelection`].
#[derive(Debug, Clone, Copy)]
pub struct SelectedScenario<'a> {
    /// Position in the selection (0-based).
    pub index: usize,
    /// Name of the trait this scenario assesses.
    pub trait_name: &'a str,
    /// Index of the scenario within the trait's pool.
    pub pool_index: usize,
    /// The scenario itself.
    pub question: &'a ScenarioQuestion,
}

impl SessionSelection {
    /// Draw one scenario per trait, independently and uniformly.
    pub fn draw<R: Rng>(catalog: &Arc<Catalog>, rng: &mut R) -> Self {
        // Pools are non-empty by construction of `Catalog`.
        let picks = catalog
            .traits()
            .iter()
            .map(|t| rng.gen_range(0..t.scenarios().len()))
            .collect();

        Self {
            catalog: Arc::clone(catalog),
            picks,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Pool index drawn for each trait.
    pub fn picks(&self) -> &[usize] {
        &self.picks
    }

    pub fn get(&self, index: usize) -> Option<SelectedScenario<'_>> {
        let pool_index = *self.picks.get(index)?;
        let t = &self.catalog.traits()[index];
        Some(SelectedScenario {
            index,
            trait_name: t.name(),
            pool_index,
            question: &t.scenarios()[pool_index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SelectedScenario<'_>> + '_ {
        (0..self.picks.len()).filter_map(move |i| self.get(i))
    }
}

/// Answers recorded so far, keyed by selection index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<usize, String>,
}

impl AnswerSet {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Indices in `0..total` that have no answer, ascending.
    pub fn missing(&self, total: usize) -> Vec<usize> {
        (0..total)
            .filter(|i| !self.answers.contains_key(i))
            .collect()
    }

    pub(crate) fn insert(&mut self, index: usize, option: String) {
        self.answers.insert(index, option);
    }

    pub(crate) fn clear(&mut self) {
        self.answers.clear();
    }
}

/// A single user's transient quiz session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    seed: Option<u64>,
    rng: StdRng,
    selection: Option<SessionSelection>,
    answers: AnswerSet,
}

impl Session {
    /// A session drawing from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), None)
    }

    /// A session whose draws are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), Some(seed))
    }

    fn with_rng(rng: StdRng, seed: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed,
            rng,
            selection: None,
            answers: AnswerSet::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The current selection, if one has been drawn.
    pub fn current_selection(&self) -> Option<&SessionSelection> {
        self.selection.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Fraction of the selection answered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match &self.selection {
            Some(sel) if !sel.is_empty() => self.answers.len() as f64 / sel.len() as f64,
            _ => 0.0,
        }
    }

    /// Replace the selection with a fresh draw and forget all answers.
    pub(crate) fn redraw(&mut self, catalog: &Arc<Catalog>) -> &SessionSelection {
        self.answers.clear();
        self.selection
            .insert(SessionSelection::draw(catalog, &mut self.rng))
    }

    /// The current selection, drawing one on first access.
    ///
    /// A selection drawn from a different catalog is discarded along with
    /// its answers and replaced by a fresh draw from `catalog`.
    pub(crate) fn ensure_selection(&mut self, catalog: &Arc<Catalog>) -> &SessionSelection {
        let stale = self
            .selection
            .as_ref()
            .is_some_and(|sel| !Arc::ptr_eq(sel.catalog(), catalog));
        if stale {
            tracing::debug!(session = %self.id, "selection belongs to another catalog, redrawing");
            self.selection = None;
            self.answers.clear();
        }

        let rng = &mut self.rng;
        self.selection
            .get_or_insert_with(|| SessionSelection::draw(catalog, rng))
    }

    pub(crate) fn answers_mut(&mut self) -> &mut AnswerSet {
        &mut self.answers
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogInfo, ScenarioDefinition, TraitDefinition};

    fn pool_catalog(sizes: &[usize]) -> Arc<Catalog> {
        let traits = sizes
            .iter()
            .enumerate()
            .map(|(t, &n)| TraitDefinition {
                name: format!("T{t}"),
                scenarios: (0..n)
                    .map(|q| {
                        ScenarioDefinition::new(
                            format!("T{t} Q{q}"),
                            ["a", "b"],
                            [(1, "fa".to_string()), (2, "fb".to_string())],
                        )
                    })
                    .collect(),
            })
            .collect();
        let info = CatalogInfo {
            id: "pools".into(),
            name: "Pools".into(),
            description: String::new(),
        };
        Arc::new(Catalog::new(info, traits).unwrap())
    }

    #[test]
    fn draw_picks_one_in_range_per_trait_in_order() {
        let catalog = pool_catalog(&[4, 1, 3]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sel = SessionSelection::draw(&catalog, &mut rng);
            assert_eq!(sel.len(), 3);
            let names: Vec<&str> = sel.iter().map(|s| s.trait_name).collect();
            assert_eq!(names, vec!["T0", "T1", "T2"]);
            assert_eq!(sel.picks()[1], 0);
            for s in sel.iter() {
                assert!(s.question.prompt().starts_with(s.trait_name));
            }
        }
    }

    #[test]
    fn draw_reaches_every_pool_member() {
        let catalog = pool_catalog(&[4]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let sel = SessionSelection::draw(&catalog, &mut rng);
            seen[sel.picks()[0]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn seeded_sessions_repeat_their_draws() {
        let catalog = pool_catalog(&[4, 4, 4, 4]);
        let mut a = Session::with_seed(99);
        let mut b = Session::with_seed(99);
        let pa = a.ensure_selection(&catalog).picks().to_vec();
        let pb = b.ensure_selection(&catalog).picks().to_vec();
        assert_eq!(pa, pb);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.seed(), Some(99));
    }

    #[test]
    fn selection_from_another_catalog_is_redrawn() {
        let small = pool_catalog(&[2, 2]);
        let large = pool_catalog(&[3, 3, 3]);
        let mut session = Session::with_seed(4);

        session.ensure_selection(&small);
        session.answers.insert(0, "a".into());

        let sel = session.ensure_selection(&large);
        assert_eq!(sel.len(), 3);
        assert!(Arc::ptr_eq(sel.catalog(), &large));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn missing_lists_unanswered_indices() {
        let mut answers = AnswerSet::default();
        answers.insert(1, "a".into());
        assert_eq!(answers.missing(3), vec![0, 2]);
        answers.clear();
        assert!(answers.is_empty());
    }

    #[test]
    fn progress_tracks_answered_fraction() {
        let catalog = pool_catalog(&[1, 1, 1, 1]);
        let mut session = Session::with_seed(1);
        assert_eq!(session.progress(), 0.0);
        session.ensure_selection(&catalog);
        session.answers.insert(0, "a".into());
        assert_eq!(session.progress(), 0.25);
        assert_eq!(session.answered_count(), 1);
    }
}
