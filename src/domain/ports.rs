use crate::domain::model::{
    Athlete, AthleteId, IngestOutcome, NewPerformance, Performance, PerformanceFilter,
};
use crate::utils::error::Result;

/// Read access to stored performances. Query order is observable: ranking
/// ties are broken by the first performance a store returns.
pub trait PerformanceStore: Send + Sync {
    fn performances_by_athlete_and_discipline(
        &self,
        athlete_id: AthleteId,
        discipline_code: &str,
    ) -> Result<Vec<Performance>>;

    fn performances_by_discipline(
        &self,
        discipline_code: &str,
        filter: &PerformanceFilter,
    ) -> Result<Vec<Performance>>;

    fn performances_by_athlete(&self, athlete_id: AthleteId) -> Result<Vec<Performance>>;
}

pub trait RosterStore: Send + Sync {
    fn all_athletes(&self) -> Result<Vec<Athlete>>;

    fn athlete_by_id(&self, id: AthleteId) -> Result<Option<Athlete>>;

    fn athlete_by_name(&self, name: &str) -> Result<Option<Athlete>>;
}

/// Write path used by result ingestion. Implementations must make the
/// duplicate check and the insert atomic.
pub trait PerformanceSink: Send + Sync {
    fn ingest(&self, performance: NewPerformance) -> Result<IngestOutcome>;
}
