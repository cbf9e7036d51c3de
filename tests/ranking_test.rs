use anyhow::Result;
use athletics_records::adapters::{Dataset, InMemoryStore};
use athletics_records::core::ranking::{self, AgeGroupFilter, RankingRequest};
use athletics_records::domain::model::{Athlete, Gender, Performance, VenueFilter, YearFilter};
use athletics_records::RecordEngine;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn athlete(id: u32, name: &str, year_of_birth: i32, gender: Gender) -> Athlete {
    Athlete {
        id,
        name: name.to_string(),
        year_of_birth,
        gender,
    }
}

fn sprint(athlete_id: u32, value: &str, on: NaiveDate, city: &str, indoor: bool) -> Performance {
    Performance {
        athlete_id,
        discipline: "100".to_string(),
        date: on,
        city: city.to_string(),
        raw_value: value.to_string(),
        wind: None,
        placement: None,
        indoor,
        championship: None,
    }
}

fn club() -> Dataset {
    Dataset {
        athletes: vec![
            athlete(1, "Anna Berg", 2006, Gender::Female),
            athlete(2, "Berta Voss", 2000, Gender::Female),
            athlete(3, "Carl Imhof", 2007, Gender::Male),
        ],
        performances: vec![
            sprint(1, "12,40", date(2024, 6, 1), "Essen", false),
            sprint(1, "12,10", date(2024, 7, 1), "Essen", false),
            sprint(1, "aufg.", date(2024, 7, 2), "Essen", false),
            sprint(1, "11,90", date(2023, 6, 1), "Hagen", false),
            sprint(2, "12,10", date(2024, 5, 5), "Unna", false),
            sprint(3, "11,20", date(2024, 6, 1), "Soest", false),
        ],
    }
}

fn engine() -> RecordEngine<InMemoryStore, InMemoryStore> {
    let store = InMemoryStore::new(club());
    RecordEngine::new(store.clone(), store)
}

#[test]
fn test_season_ranking_orders_best_first_and_keeps_roster_order_on_ties() -> Result<()> {
    let rows = engine().rank("100 m", YearFilter::Year(2024), "Alle", VenueFilter::All)?;

    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.rank, r.name.as_str(), r.class.as_str(), r.result.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "Carl Imhof", "MU18", "11,20"),
            (2, "Anna Berg", "WU20", "12,10"),
            (3, "Berta Voss", "W", "12,10"),
        ]
    );
    assert_eq!(rows[1].venue, "Essen, den 01.07.2024");
    Ok(())
}

#[test]
fn test_all_time_ranking_uses_every_year() -> Result<()> {
    let rows = engine().rank("100", YearFilter::AllTime, "Alle", VenueFilter::All)?;
    assert_eq!(rows[1].name, "Anna Berg");
    assert_eq!(rows[1].result, "11,90");
    assert_eq!(rows[1].class, "WU18");
    Ok(())
}

#[test]
fn test_age_group_filter_accepts_both_spellings() -> Result<()> {
    let e = engine();
    for label in ["WU20", "WJU20"] {
        let rows = e.rank("100 m", YearFilter::Year(2024), label, VenueFilter::All)?;
        assert_eq!(rows.len(), 1, "label {}", label);
        assert_eq!(rows[0].name, "Anna Berg");
    }

    let men = e.rank("100 m", YearFilter::Year(2024), "M", VenueFilter::All)?;
    assert_eq!(men.len(), 1);
    assert_eq!(men[0].name, "Carl Imhof");
    Ok(())
}

#[test]
fn test_venue_filter() -> Result<()> {
    let mut dataset = club();
    dataset
        .performances
        .push(sprint(2, "12,00", date(2024, 2, 10), "Dortmund", true));
    let store = InMemoryStore::new(dataset);
    let e = RecordEngine::new(store.clone(), store);

    let indoor = e.rank("100 m", YearFilter::Year(2024), "Alle", VenueFilter::Indoor)?;
    assert_eq!(indoor.len(), 1);
    assert_eq!(indoor[0].result, "12,00");

    let outdoor = e.rank("100 m", YearFilter::Year(2024), "Alle", VenueFilter::Outdoor)?;
    assert_eq!(outdoor.iter().find(|r| r.name == "Berta Voss").map(|r| r.result.as_str()), Some("12,10"));

    let both = e.rank("100 m", YearFilter::Year(2024), "Alle", VenueFilter::All)?;
    assert_eq!(both[1].name, "Berta Voss");
    assert_eq!(both[1].result, "12,00");
    Ok(())
}

#[test]
fn test_tie_representative_follows_scan_order() {
    let roster = vec![athlete(1, "Anna Berg", 2006, Gender::Female)];
    let performances = vec![
        sprint(1, "12,10", date(2024, 7, 1), "Essen", false),
        sprint(1, "12,10", date(2024, 8, 1), "Bremen", false),
    ];
    let request = RankingRequest {
        discipline_code: "100".to_string(),
        year: YearFilter::Year(2024),
        age_group: AgeGroupFilter::all(),
        venue: VenueFilter::All,
    };

    let forward = ranking::rank(&request, &roster, &performances);
    assert_eq!(forward[0].venue, "Essen, den 01.07.2024");

    let reversed: Vec<_> = performances.iter().rev().cloned().collect();
    let backward = ranking::rank(&request, &roster, &reversed);
    assert_eq!(backward[0].venue, "Bremen, den 01.08.2024");
}

#[test]
fn test_rows_without_comparable_values_are_skipped() -> Result<()> {
    let rows = engine().rank("Weitsprung", YearFilter::Year(2024), "Alle", VenueFilter::All)?;
    assert!(rows.is_empty());
    Ok(())
}

#[test]
fn test_roster_order_only_breaks_ties() {
    let dataset = club();
    let reversed_roster: Vec<Athlete> = dataset.athletes.iter().rev().cloned().collect();

    for year in [YearFilter::Year(2024), YearFilter::AllTime] {
        let request = RankingRequest {
            discipline_code: "100".to_string(),
            year,
            age_group: AgeGroupFilter::all(),
            venue: VenueFilter::All,
        };
        let forward = ranking::rank(&request, &dataset.athletes, &dataset.performances);
        let backward = ranking::rank(&request, &reversed_roster, &dataset.performances);

        let mut forward_values: Vec<_> = forward.iter().map(|r| (r.name.clone(), r.result.clone())).collect();
        let mut backward_values: Vec<_> = backward.iter().map(|r| (r.name.clone(), r.result.clone())).collect();
        forward_values.sort();
        backward_values.sort();
        assert_eq!(forward_values, backward_values, "{:?}", year);

        // the fastest athlete leads whatever the roster order
        assert_eq!(forward[0].name, "Carl Imhof");
        assert_eq!(backward[0].name, "Carl Imhof");
    }

    // with all-time values every athlete differs, so the order is fixed by value alone
    let all_time = RankingRequest {
        discipline_code: "100".to_string(),
        year: YearFilter::AllTime,
        age_group: AgeGroupFilter::all(),
        venue: VenueFilter::All,
    };
    let names = |roster: &[Athlete]| -> Vec<String> {
        ranking::rank(&all_time, roster, &dataset.performances)
            .into_iter()
            .map(|r| r.name)
            .collect()
    };
    assert_eq!(names(&dataset.athletes), vec!["Carl Imhof", "Anna Berg", "Berta Voss"]);
    assert_eq!(names(&reversed_roster), names(&dataset.athletes));

    // equal values follow the roster: Anna and Berta both ran 12,10 in 2024
    let season = RankingRequest {
        year: YearFilter::Year(2024),
        ..all_time.clone()
    };
    let tied = ranking::rank(&season, &reversed_roster, &dataset.performances);
    assert_eq!(tied[1].name, "Berta Voss");
    assert_eq!(tied[2].name, "Anna Berg");
}
