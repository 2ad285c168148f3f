use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;

use disaster_sentiment::loader::ColumnRole;
use disaster_sentiment::{
    ColumnMapping, FixedScorer, InMemorySource, LexiconScorer, LoadProblem, PipelineConfig,
    PipelineError, PreparedSource, RecordDate, Sentiment, SourceSpec, SourceTable, ThresholdMode,
    UnreadableSource, run_pipeline, run_sources,
};

fn write_export(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

fn flood_source() -> PreparedSource {
    PreparedSource::new(
        "Flood",
        ColumnMapping::new("tweet").with_date_column("date"),
        InMemorySource::new(
            "banjir",
            SourceTable::new(
                ["tweet", "date"],
                vec![
                    vec!["A", "2024-01-05"],
                    vec!["B", "2024-01-05"],
                    vec!["C", "2024-01-06"],
                ],
            ),
        ),
    )
}

#[test]
fn strict_mode_labels_one_of_each() {
    let scorer = FixedScorer::new(0.0)
        .with_score("A", 0.5)
        .with_score("B", -0.2)
        .with_score("C", 0.0);
    let report = run_sources(&[flood_source()], ThresholdMode::Strict, &scorer).unwrap();

    let labels: Vec<_> = report.dataset.iter().map(|record| record.sentiment).collect();
    assert_eq!(
        labels,
        vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    );
    for sentiment in Sentiment::ALL {
        assert_eq!(report.by_category.count("Flood", sentiment), 1);
    }

    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let key = (day, "Flood".to_string());
    assert_eq!(report.by_date_category.count(&key, Sentiment::Positive), 1);
    assert_eq!(report.by_date_category.count(&key, Sentiment::Negative), 1);
    assert_eq!(report.by_date_category.count(&key, Sentiment::Neutral), 0);
    assert_eq!(report.trend().count(day.succ_opt().unwrap(), "Flood"), 1);
}

#[test]
fn dead_zone_keeps_small_polarities_neutral() {
    let scorer = FixedScorer::new(0.0)
        .with_score("A", 0.05)
        .with_score("B", -0.0501)
        .with_score("C", 0.03);
    let report = run_sources(&[flood_source()], ThresholdMode::DeadZone, &scorer).unwrap();
    let labels: Vec<_> = report.dataset.iter().map(|record| record.sentiment).collect();
    assert_eq!(
        labels,
        vec![Sentiment::Neutral, Sentiment::Negative, Sentiment::Neutral]
    );
}

#[test]
fn missing_text_column_contributes_nothing_but_run_continues() {
    let earthquake = PreparedSource::new(
        "Earthquake",
        ColumnMapping::new("tweet"),
        InMemorySource::new(
            "gempa",
            SourceTable::new(["content", "date"], vec![vec!["shaking", "2024-01-05"]]),
        ),
    );
    let scorer = FixedScorer::new(0.0);
    let report = run_sources(&[flood_source(), earthquake], ThresholdMode::Strict, &scorer).unwrap();

    assert_eq!(report.dataset.len(), 3);
    assert_eq!(report.dataset.categories(), vec!["Flood"]);
    assert_eq!(
        report.problems,
        vec![LoadProblem::MissingColumn {
            source_id: "gempa".to_string(),
            column: "tweet".to_string(),
            role: ColumnRole::Text,
            available: vec!["content".to_string(), "date".to_string()],
        }]
    );
    assert_eq!(report.by_category.row_total("Earthquake"), 0);
}

#[test]
fn every_source_unusable_is_empty_dataset() {
    let sources = vec![
        PreparedSource::new(
            "Flood",
            ColumnMapping::new("tweet"),
            UnreadableSource::new("banjir", "permission denied"),
        ),
        PreparedSource::new(
            "Landslide",
            ColumnMapping::new("tweet"),
            InMemorySource::new("longsor", SourceTable::new(["tweet"], Vec::<Vec<&str>>::new())),
        ),
    ];
    let err = run_sources(&sources, ThresholdMode::Strict, &FixedScorer::new(0.0)).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyDataset { sources: 2 }));
}

#[test]
fn merged_order_follows_declared_sources_and_filters_round_trip() {
    let landslide = PreparedSource::new(
        "Landslide",
        ColumnMapping::new("tweet"),
        InMemorySource::new(
            "longsor",
            SourceTable::new(["tweet"], vec![vec!["L1"], vec!["L2"]]),
        ),
    );
    let scorer = FixedScorer::new(0.1);
    let report = run_sources(&[landslide, flood_source()], ThresholdMode::Strict, &scorer).unwrap();

    let texts: Vec<_> = report
        .dataset
        .iter()
        .map(|record| record.text.clone().unwrap_or_default())
        .collect();
    assert_eq!(texts, vec!["L1", "L2", "A", "B", "C"]);

    let day = |d| RecordDate::Parsed(NaiveDate::from_ymd_opt(2024, 1, d).unwrap());
    let expected_flood = vec![
        (vec![("tweet", "A"), ("date", "2024-01-05")], day(5)),
        (vec![("tweet", "B"), ("date", "2024-01-05")], day(5)),
        (vec![("tweet", "C"), ("date", "2024-01-06")], day(6)),
    ];
    let expected_landslide = vec![
        (vec![("tweet", "L1")], RecordDate::Unparseable),
        (vec![("tweet", "L2")], RecordDate::Unparseable),
    ];
    for (category, expected) in [("Flood", expected_flood), ("Landslide", expected_landslide)] {
        let filtered = report.dataset.filter_category(category);
        assert_eq!(filtered.len(), expected.len());
        for (record, (fields, date)) in filtered.into_iter().zip(expected) {
            let fields: IndexMap<String, String> = fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            assert_eq!(record.fields, fields);
            assert_eq!(record.date, date);
            assert_eq!(record.sentiment, Sentiment::Positive);
            assert_eq!(record.category, category);
        }
    }
    assert_eq!(
        report.by_category.keys().cloned().collect::<Vec<_>>(),
        vec!["Landslide", "Flood"]
    );
}

#[test]
fn csv_exports_run_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let flood = write_export(
        temp.path(),
        "banjir.csv",
        "Tweet,Date,user\n\
         great rescue,2024-01-05 08:00:00,a\n\
         awful flooding,05/01/2024,b\n\
         water level report,not a date,c\n",
    );
    let quake = write_export(
        temp.path(),
        "gempa.csv",
        " TWEET,date\n\
         \"terrible, everything collapsed\",2024-01-06\n",
    );
    let config = PipelineConfig::default()
        .with_sources(vec![
            SourceSpec::new("Flood", flood, "tweet").with_date_column("date"),
            SourceSpec::new("Earthquake", quake, "tweet").with_date_column("date"),
            SourceSpec::new(
                "Landslide",
                temp.path().join("longsor.csv").display().to_string(),
                "tweet",
            ),
        ])
        .with_merged_output(temp.path().join("merged.csv").display().to_string());

    let report = run_pipeline(&config, &LexiconScorer::default()).unwrap();

    assert_eq!(report.dataset.len(), 4);
    assert_eq!(report.by_category.count("Flood", Sentiment::Positive), 1);
    assert_eq!(report.by_category.count("Flood", Sentiment::Negative), 1);
    assert_eq!(report.by_category.count("Flood", Sentiment::Neutral), 1);
    assert_eq!(report.by_category.count("Earthquake", Sentiment::Negative), 1);
    assert_eq!(report.by_category.total(), report.dataset.len());
    assert_eq!(report.by_date_category.total(), 3);

    assert_eq!(report.problems.len(), 2);
    assert!(matches!(
        &report.problems[0],
        LoadProblem::DateParseFailure { source_id, rows: 1, .. } if source_id == "Flood"
    ));
    assert!(matches!(
        &report.problems[1],
        LoadProblem::SourceUnreadable { source_id, .. } if source_id == "Landslide"
    ));

    report.dataset.write_csv(&config.merged_output).unwrap();
    let written = fs::read_to_string(&config.merged_output).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines[0], "tweet,date,user,category,sentiment,polarity,parsed_date");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "water level report,not a date,c,Flood,Neutral,0,");
    assert!(lines[4].starts_with("\"terrible, everything collapsed\",2024-01-06,,Earthquake,Negative,"));
    assert!(lines[4].ends_with(",2024-01-06"));
}
