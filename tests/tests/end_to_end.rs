use attrition_ai::{DecisionError, DecisionThreshold, Predictor, RiskLabel, StartupError};
use attrition_features::{Department, DomainPolicy, RawInputRecord, SalaryLevel};
use attrition_model::ArtifactError;
use pretty_assertions::assert_eq;
use tests::{sigmoid, training_columns, write_artifacts};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn predictor(threshold: f64) -> (tempfile::TempDir, Predictor) {
    init();
    let dir = tempfile::tempdir().unwrap();
    let cols = training_columns();
    let paths = write_artifacts(dir.path(), &cols, &cols);
    let p = Predictor::initialize(
        &paths,
        DecisionThreshold::new(threshold).unwrap(),
        DomainPolicy::Strict,
    )
    .unwrap();
    (dir, p)
}

#[test]
fn reference_submission_is_high_risk() {
    let (_dir, p) = predictor(0.30);
    let a = p.assess(&RawInputRecord::default()).unwrap();
    // -4 * 0.2 + 0.01 * 160 - 1
    let expected = sigmoid(-0.2);
    assert!((a.decision.probability - expected).abs() < 1e-12);
    assert_eq!(a.decision.label, RiskLabel::High);
    assert_eq!(a.guidance.headline, "High Attrition Risk!");
    assert_eq!(p.classifier().name(), "attrition-logit");
}

#[test]
fn satisfied_low_paid_employee_is_low_risk() {
    let (_dir, p) = predictor(0.30);
    let raw = RawInputRecord {
        satisfaction_level_pct: 90,
        salary: SalaryLevel::Low,
        department: Department::Sales,
        ..RawInputRecord::default()
    };
    let a = p.assess(&raw).unwrap();
    assert!((a.decision.probability - sigmoid(-1.0)).abs() < 1e-12);
    assert_eq!(a.decision.label, RiskLabel::Low);
    assert_eq!(a.guidance.headline, "Low Attrition Risk");
}

#[test]
fn threshold_moves_the_label_not_the_probability() {
    let (_d1, strict) = predictor(0.30);
    let (_d2, relaxed) = predictor(0.50);
    let raw = RawInputRecord::default();
    let a = strict.assess(&raw).unwrap();
    let b = relaxed.assess(&raw).unwrap();
    assert_eq!(a.decision.probability, b.decision.probability);
    assert_eq!(a.decision.label, RiskLabel::High);
    assert_eq!(b.decision.label, RiskLabel::Low);
}

#[test]
fn repeated_assessments_are_identical() {
    let (_dir, p) = predictor(0.30);
    let raw = RawInputRecord {
        work_accident: true,
        promotion_last_5years: true,
        ..RawInputRecord::default()
    };
    let first = p.assess(&raw).unwrap();
    for _ in 0..10 {
        assert_eq!(p.assess(&raw).unwrap(), first);
    }
}

#[test]
fn schema_in_a_different_order_than_the_model_is_refused() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let model_cols = training_columns();
    let mut schema_cols = model_cols.clone();
    schema_cols.swap(17, 18);
    let paths = write_artifacts(dir.path(), &model_cols, &schema_cols);
    let err = Predictor::initialize(&paths, DecisionThreshold::default(), DomainPolicy::Strict)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        StartupError::Artifact(ArtifactError::SchemaDisagreement(_))
    ));
}

#[test]
fn schema_without_a_department_column_needs_lenient_policy() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let cols: Vec<String> = training_columns()
        .into_iter()
        .filter(|c| c != "Support")
        .collect();
    let paths = write_artifacts(dir.path(), &cols, &cols);

    let err = Predictor::initialize(&paths, DecisionThreshold::default(), DomainPolicy::Strict)
        .err()
        .unwrap();
    assert!(matches!(err, StartupError::Domain(_)));

    let p = Predictor::initialize(&paths, DecisionThreshold::default(), DomainPolicy::Lenient)
        .unwrap();
    assert_eq!(p.domain_report().missing_categories, vec!["Support".to_string()]);
    let raw = RawInputRecord {
        department: Department::Support,
        ..RawInputRecord::default()
    };
    // Support contributes nothing, same score as any other department here
    let a = p.assess(&raw).unwrap();
    assert!((a.decision.probability - sigmoid(-0.2)).abs() < 1e-12);
}

#[test]
fn extra_schema_columns_are_zero_filled() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let mut cols = training_columns();
    cols.push("tenure_band".to_string());
    let paths = write_artifacts(dir.path(), &cols, &cols);
    let p = Predictor::initialize(&paths, DecisionThreshold::default(), DomainPolicy::Strict)
        .unwrap();
    assert_eq!(p.domain_report().unproduced, vec!["tenure_band".to_string()]);
    assert_eq!(p.schema().len(), 21);
    let a = p.assess(&RawInputRecord::default()).unwrap();
    assert!((a.decision.probability - sigmoid(-0.2)).abs() < 1e-12);
}

#[test]
fn request_level_schema_mismatch_surfaces() {
    use attrition_ai::assess;
    use attrition_model::{FeatureSchema, FixedProbability};

    let schema = FeatureSchema::new(training_columns()).unwrap();
    let stale = FixedProbability::new(0.9).expecting(training_columns()[..19].to_vec());
    let err = assess(
        &RawInputRecord::default(),
        &schema,
        &stale,
        DecisionThreshold::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DecisionError::SchemaMismatch(_)));
}

#[test]
fn summary_reports_raw_values() {
    let (_dir, p) = predictor(0.30);
    let raw = RawInputRecord {
        average_monthly_hours: 310,
        time_spend_company: 7,
        ..RawInputRecord::default()
    };
    let a = p.assess(&raw).unwrap();
    let values: Vec<f64> = a.summary.bars().iter().map(|b| b.value).collect();
    assert_eq!(values, vec![20.0, 70.0, 4.0, 310.0, 7.0]);
}
