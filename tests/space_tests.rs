use configspace::prelude::*;

fn svm_space() -> ConfigurationSpace {
    let mut space = ConfigurationSpace::new();
    space
        .add_hyperparameter(CategoricalHyperparameter::new("classifier", vec!["svm", "nn"]).unwrap())
        .unwrap()
        .add_hyperparameter(
            CategoricalHyperparameter::new("kernel", vec!["rbf", "poly", "sigmoid"]).unwrap(),
        )
        .unwrap()
        .add_hyperparameter(
            FloatHyperparameter::builder("C", 0.03125, 32768.0)
                .log_scale()
                .build()
                .unwrap(),
        )
        .unwrap()
        .add_hyperparameter(IntegerHyperparameter::builder("degree", 1, 5).build().unwrap())
        .unwrap()
        .add_hyperparameter(
            OrdinalHyperparameter::builder("effort", vec!["low", "medium", "high"])
                .build()
                .unwrap(),
        )
        .unwrap();
    space
        .add_condition(Condition::new(
            "kernel",
            Expression::equals("classifier", "svm"),
        ))
        .unwrap()
        .add_condition(Condition::new(
            "degree",
            Expression::is_in("kernel", vec!["poly", "sigmoid"]),
        ))
        .unwrap()
        .add_condition(Condition::new(
            "C",
            Expression::and(vec![
                Expression::equals("classifier", "svm"),
                Expression::greater_than("effort", "low"),
            ]),
        ))
        .unwrap();
    space
}

#[test]
fn lookup_and_canonical_order() {
    let space = svm_space();
    assert_eq!(space.len(), 5);
    assert!(space.contains("degree"));
    assert!(!space.contains("gamma"));
    assert!(space.get("gamma").is_none());

    let names: Vec<&str> = space.hyperparameters().iter().map(|hp| hp.name()).collect();
    assert_eq!(names, vec!["classifier", "effort", "kernel", "C", "degree"]);

    let children: Vec<&str> = space
        .conditions()
        .iter()
        .map(|c| c.child.as_str())
        .collect();
    assert_eq!(children, vec!["kernel", "C", "degree"]);
    assert_eq!(space.parents_of("C"), vec!["classifier", "effort"]);
    assert!(space.parents_of("classifier").is_empty());
}

#[test]
fn samples_stay_legal() {
    let space = svm_space();
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..200 {
        for hp in space.hyperparameters() {
            let value = hp.sample(&mut rng);
            assert!(hp.is_legal(&value), "{} produced {value}", hp.name());
        }
    }
}

#[test]
fn errors_are_grouped_by_kind() {
    let mut space = svm_space();
    let err = space
        .add_hyperparameter(CategoricalHyperparameter::new("kernel", vec!["x"]).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Space);

    let err = space
        .add_forbidden(Forbidden::equals("degree", 9))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Space);

    let err = FloatHyperparameter::builder("lr", 0.0, 1.0)
        .log_scale()
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn new_dialect_round_trip_keeps_the_space() {
    let space = svm_space();
    let text = pcs::write(&space, Dialect::New).unwrap();
    assert!(text.contains("C | classifier == svm && effort > low"));
    assert_eq!(pcs::read_str(&text, Dialect::New).unwrap(), space);
}

#[test]
fn display_summarizes_the_space() {
    let mut space = svm_space();
    space
        .add_forbidden(Forbidden::and(vec![
            Forbidden::equals("kernel", "poly"),
            Forbidden::equals("degree", 5),
        ]))
        .unwrap();
    let text = space.to_string();
    assert!(text.starts_with("Configuration space object:\n  Hyperparameters:\n"));
    assert!(text.contains("    degree | kernel in {poly, sigmoid}\n"));
    assert!(text.contains("  Forbidden Clauses:\n"));
}
