use crate::domain::model::{
    Athlete, AthleteId, Gender, IngestOutcome, NewPerformance, Performance, PerformanceFilter,
};
use crate::domain::ports::{PerformanceSink, PerformanceStore, RosterStore};
use crate::utils::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// On-disk shape of the club database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub athletes: Vec<Athlete>,
    #[serde(default)]
    pub performances: Vec<Performance>,
}

/// Shared, lock-protected dataset. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Dataset>>,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dataset)),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        tracing::debug!(
            athletes = dataset.athletes.len(),
            performances = dataset.performances.len(),
            "dataset parsed"
        );
        Ok(Self::new(dataset))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        let dataset = self.read()?;
        Ok(serde_json::to_string_pretty(&*dataset)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Dataset> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Dataset>> {
        self.inner.read().map_err(|_| EngineError::StoreError {
            message: "dataset lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Dataset>> {
        self.inner.write().map_err(|_| EngineError::StoreError {
            message: "dataset lock poisoned".to_string(),
        })
    }

    /// Adds an athlete under the next free id; names are unique on the roster.
    pub fn add_athlete(&self, name: &str, year_of_birth: i32, gender: Gender) -> Result<Athlete> {
        let mut dataset = self.write()?;
        if dataset.athletes.iter().any(|a| a.name == name) {
            return Err(EngineError::DuplicateAthlete {
                name: name.to_string(),
            });
        }
        let id = dataset.athletes.iter().map(|a| a.id).max().map_or(1, |max| max + 1);
        let athlete = Athlete {
            id,
            name: name.to_string(),
            year_of_birth,
            gender,
        };
        dataset.athletes.push(athlete.clone());
        tracing::info!(id, name, "athlete added");
        Ok(athlete)
    }

    /// Inserts a performance unless the same result is already stored.
    ///
    /// Check and insert happen under one write lock, so concurrent ingestion
    /// of the same meeting cannot create duplicates. An existing entry gets
    /// its missing placement filled in and its championship tag replaced.
    pub fn ingest(&self, new: NewPerformance) -> Result<IngestOutcome> {
        let candidate = new.into_performance();
        let mut dataset = self.write()?;

        if let Some(existing) = dataset
            .performances
            .iter_mut()
            .find(|p| p.is_same_result(&candidate))
        {
            if existing.placement.is_none() {
                existing.placement = candidate.placement;
            }
            existing.championship = candidate.championship;
            tracing::debug!(
                athlete = existing.athlete_id,
                value = %existing.raw_value,
                "performance already stored"
            );
            return Ok(IngestOutcome::Existing(existing.clone()));
        }

        dataset.performances.push(candidate.clone());
        tracing::debug!(
            athlete = candidate.athlete_id,
            discipline = %candidate.discipline,
            value = %candidate.raw_value,
            "performance stored"
        );
        Ok(IngestOutcome::Inserted(candidate))
    }
}

impl PerformanceStore for InMemoryStore {
    fn performances_by_athlete_and_discipline(
        &self,
        athlete_id: AthleteId,
        discipline_code: &str,
    ) -> Result<Vec<Performance>> {
        let dataset = self.read()?;
        Ok(dataset
            .performances
            .iter()
            .filter(|p| p.athlete_id == athlete_id && p.discipline == discipline_code)
            .cloned()
            .collect())
    }

    fn performances_by_discipline(
        &self,
        discipline_code: &str,
        filter: &PerformanceFilter,
    ) -> Result<Vec<Performance>> {
        let dataset = self.read()?;
        Ok(dataset
            .performances
            .iter()
            .filter(|p| p.discipline == discipline_code && filter.matches(p))
            .cloned()
            .collect())
    }

    fn performances_by_athlete(&self, athlete_id: AthleteId) -> Result<Vec<Performance>> {
        let dataset = self.read()?;
        Ok(dataset
            .performances
            .iter()
            .filter(|p| p.athlete_id == athlete_id)
            .cloned()
            .collect())
    }
}

impl PerformanceSink for InMemoryStore {
    fn ingest(&self, performance: NewPerformance) -> Result<IngestOutcome> {
        InMemoryStore::ingest(self, performance)
    }
}

impl RosterStore for InMemoryStore {
    fn all_athletes(&self) -> Result<Vec<Athlete>> {
        Ok(self.read()?.athletes.clone())
    }

    fn athlete_by_id(&self, id: AthleteId) -> Result<Option<Athlete>> {
        Ok(self.read()?.athletes.iter().find(|a| a.id == id).cloned())
    }

    fn athlete_by_name(&self, name: &str) -> Result<Option<Athlete>> {
        Ok(self.read()?.athletes.iter().find(|a| a.name == name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{VenueFilter, YearFilter};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_performance(value: &str, placement: Option<u32>) -> NewPerformance {
        NewPerformance {
            athlete_id: 1,
            discipline: "DRE".to_string(),
            date: date(2023, 6, 18),
            city: "Essen".to_string(),
            raw_value: value.to_string(),
            wind: Some(0.8),
            placement,
            indoor: None,
            championship: None,
        }
    }

    #[test]
    fn test_ingest_deduplicates_same_result() {
        let store = InMemoryStore::default();
        let first = store.ingest(new_performance("14,53", None)).unwrap();
        assert!(matches!(first, IngestOutcome::Inserted(_)));

        let mut again = new_performance("14,53", Some(2));
        again.championship = Some("DM".to_string());
        let second = store.ingest(again).unwrap();
        match second {
            IngestOutcome::Existing(p) => {
                assert_eq!(p.placement, Some(2));
                assert_eq!(p.championship.as_deref(), Some("DM"));
            }
            other => panic!("expected existing entry, got {:?}", other),
        }
        assert_eq!(store.snapshot().unwrap().performances.len(), 1);
    }

    #[test]
    fn test_ingest_keeps_known_placement() {
        let store = InMemoryStore::default();
        store.ingest(new_performance("14,53", Some(1))).unwrap();
        let outcome = store.ingest(new_performance("14,53", Some(4))).unwrap();
        assert_eq!(outcome.performance().placement, Some(1));
    }

    #[test]
    fn test_ingest_derives_indoor_from_month() {
        let store = InMemoryStore::default();
        let mut winter = new_performance("14,10", None);
        winter.date = date(2023, 2, 12);
        let outcome = store.ingest(winter).unwrap();
        assert!(outcome.performance().indoor);
    }

    #[test]
    fn test_concurrent_ingest_stores_one_copy() {
        let store = InMemoryStore::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.ingest(new_performance("14,53", None)).unwrap())
            })
            .collect();
        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|o| matches!(o, IngestOutcome::Inserted(_)))
            .count();
        assert_eq!(inserted, 1);
        assert_eq!(store.snapshot().unwrap().performances.len(), 1);
    }

    #[test]
    fn test_add_athlete_rejects_duplicate_names() {
        let store = InMemoryStore::default();
        let keno = store.add_athlete("Keno Krieger", 2000, Gender::Male).unwrap();
        assert_eq!(keno.id, 1);
        let next = store.add_athlete("Anna Berg", 2004, Gender::Female).unwrap();
        assert_eq!(next.id, 2);
        assert!(matches!(
            store.add_athlete("Keno Krieger", 2000, Gender::Male),
            Err(EngineError::DuplicateAthlete { .. })
        ));
    }

    #[test]
    fn test_queries_filter_by_discipline_and_year() {
        let store = InMemoryStore::default();
        store.ingest(new_performance("14,53", None)).unwrap();
        let mut older = new_performance("14,01", None);
        older.date = date(2022, 7, 1);
        store.ingest(older).unwrap();

        let filter = PerformanceFilter::new(YearFilter::Year(2023), VenueFilter::All);
        let found = store.performances_by_discipline("DRE", &filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_value, "14,53");

        let all = store.performances_by_athlete_and_discipline(1, "DRE").unwrap();
        assert_eq!(all.len(), 2);
        assert!(store.performances_by_athlete_and_discipline(1, "WEI").unwrap().is_empty());
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("athletics.json");
        let store = InMemoryStore::default();
        store.add_athlete("Keno Krieger", 2000, Gender::Male).unwrap();
        store.ingest(new_performance("14,53", None)).unwrap();
        store.save(&path).unwrap();

        let loaded = InMemoryStore::load(&path).unwrap();
        assert_eq!(loaded.snapshot().unwrap(), store.snapshot().unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("18.06.2023"));
    }
}
