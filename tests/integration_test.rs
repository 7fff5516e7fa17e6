// End-to-end tests over CoNLL-style parses and relation records
use discsim::prelude::*;
use discsim::{extract_batch_values, FeatureLayout, RawTokens};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn parses() -> ParseStore {
    ParseStore::from_value(json!({
        "wsj_2201": {"sentences": [
            {"words": [
                ["Sales", {"PartOfSpeech": "NNS", "CharacterOffsetBegin": 0}],
                ["rose", {"PartOfSpeech": "VBD"}],
                ["sharply", {"PartOfSpeech": "RB"}],
                [".", {"PartOfSpeech": "."}]
            ]},
            {"words": [
                ["However", {"PartOfSpeech": "RB"}],
                ["profits", {"PartOfSpeech": "NNS"}],
                ["could", {"PartOfSpeech": "MD"}],
                ["decline", {"PartOfSpeech": "VB"}],
                ["quickly", {"PartOfSpeech": "RB"}]
            ]}
        ]}
    }))
    .unwrap()
}

fn primary() -> EmbeddingTable {
    EmbeddingTable::from_pairs(
        4,
        [
            ("Sales", Vector::new(vec![0.9, 0.1, 0.0, 0.2])),
            ("rose", Vector::new(vec![0.1, 0.9, 0.1, 0.0])),
            ("sharply", Vector::new(vec![0.0, 0.3, 0.9, 0.1])),
            ("However", Vector::new(vec![0.2, 0.2, 0.2, 0.9])),
            ("profits", Vector::new(vec![0.8, 0.2, 0.1, 0.3])),
            ("could", Vector::new(vec![0.1, 0.1, 0.5, 0.5])),
            ("decline", Vector::new(vec![0.1, -0.8, 0.1, 0.0])),
            ("quickly", Vector::new(vec![0.0, 0.2, 0.8, 0.2])),
        ],
    )
    .unwrap()
}

fn secondary() -> EmbeddingTable {
    EmbeddingTable::from_pairs(
        2,
        [
            ("rose", Vector::new(vec![1.0, 0.0])),
            ("decline", Vector::new(vec![-1.0, 0.0])),
            ("However", Vector::new(vec![0.0, 1.0])),
        ],
    )
    .unwrap()
}

fn explicit_relation() -> Value {
    json!({
        "DocID": "wsj_2201",
        "ID": 3012,
        "Arg1": {"RawText": "Sales rose sharply", "TokenList": [[0, 5, 0, 0, 0], [6, 10, 1, 0, 1], [11, 18, 2, 0, 2]]},
        "Connective": {"RawText": "However", "TokenList": [[21, 28, 4, 1, 0]]},
        "Arg2": {"RawText": "profits could decline quickly", "TokenList": [[29, 36, 5, 1, 1], [37, 42, 6, 1, 2], [43, 50, 7, 1, 3], [51, 58, 8, 1, 4]]},
        "Sense": ["Comparison.Contrast"],
        "Type": "Explicit"
    })
}

fn implicit_relation() -> Value {
    json!({
        "DocID": "wsj_2201",
        "Arg1": {"TokenList": [[0, 5, 0, 0, 0], [6, 10, 1, 0, 1]]},
        "Connective": {"TokenList": []},
        "Arg2": {"TokenList": [[29, 36, 5, 1, 1], [43, 50, 7, 1, 3]]},
        "Type": "Implicit"
    })
}

fn sparse_options() -> AssemblerOptions {
    AssemblerOptions {
        emit_sparse_features: true,
        ..Default::default()
    }
}

#[test]
fn test_explicit_relation_features() {
    init_tracing();
    let space = primary();
    let assembler = FeatureAssembler::builder(&space)
        .options(sparse_options())
        .build()
        .unwrap();

    let features = assembler.extract_value(&explicit_relation(), &parses()).unwrap();
    let sparse = features.sparse.as_ref().unwrap();

    assert_eq!(sparse["has_connective"], 1.0);
    assert_eq!(sparse["W2V_CON_3"], 0.9);

    let arg1 = space.average_vector(&["Sales", "rose", "sharply"]);
    let arg2 = space.average_vector(&["profits", "could", "decline", "quickly"]);
    assert!((sparse["sim_arg1arg2"] - arg1.cosine_distance(&arg2)).abs() < 1e-6);

    assert_eq!(sparse["sim_pos_arg1_MD_arg2_VB"], 0.0, "no modal in Arg1");

    let rb_rb = space.group_similarity(&["sharply"], &["quickly"]);
    assert!((sparse["sim_pos_arg1_RB_arg2_RB"] - rb_rb).abs() < 1e-6);

    assert!(features.dense.iter().all(|v| v.is_finite()));
}

#[test]
fn test_implicit_relation_has_zero_connective_block() {
    let space = primary();
    let assembler = FeatureAssembler::new(&space).unwrap();
    let layout = assembler.layout();

    let features = assembler.extract_value(&implicit_relation(), &parses()).unwrap();
    assert_eq!(features.dense[layout.position("has_connective").unwrap()], 0.0);
    for i in 0..4 {
        let column = layout.position(&format!("W2V_CON_{i}")).unwrap();
        assert_eq!(features.dense[column], 0.0);
    }
}

#[test]
fn test_layout_matches_dense_and_sparse() {
    let space = primary();
    let second = secondary();
    let options = AssemblerOptions {
        use_second_embedding_space: true,
        connective_candidates: Some(vec![
            Vector::new(vec![0.0, 0.0, 0.0, 1.0]),
            Vector::new(vec![1.0, 0.0, 0.0, 0.0]),
        ]),
        ..sparse_options()
    };
    let assembler = FeatureAssembler::builder(&space)
        .secondary(&second)
        .options(options)
        .build()
        .unwrap();

    let layout: FeatureLayout = assembler.layout();
    // 1 + 3 * (4 + 2) + 1 + 5 + 16 + 2
    assert_eq!(layout.len(), 43);

    let features = assembler.extract_value(&explicit_relation(), &parses()).unwrap();
    let sparse = features.sparse.unwrap();
    assert_eq!(features.dense.len(), layout.len());

    let mut keys: Vec<&String> = sparse.keys().collect();
    let mut columns: Vec<&String> = layout.columns.iter().collect();
    keys.sort();
    columns.sort();
    assert_eq!(keys, columns);

    // Second space sees only "rose" in Arg1 and "decline" in Arg2
    assert_eq!(sparse["DEPS_A1_0"], 1.0);
    assert_eq!(sparse["DEPS_A2_0"], -1.0);
    assert_eq!(sparse["DEPS_CON_1"], 1.0);
}

#[test]
fn test_empty_arguments_never_yield_nan() {
    let space = primary();
    let assembler = FeatureAssembler::builder(&space)
        .options(sparse_options())
        .build()
        .unwrap();

    let record = json!({
        "DocID": "wsj_2201",
        "Arg1": {"TokenList": [[0, 5, 0, 0, 0], [6, 10, 1, 0, 1]]},
        "Arg2": {"TokenList": []}
    });
    let features = assembler.extract_value(&record, &parses()).unwrap();
    let sparse = features.sparse.unwrap();

    assert_eq!(sparse["sim_arg1arg2"], 0.0);
    assert_eq!(sparse["max_sim_aligned"], 0.0);
    assert!(features.dense.iter().all(|v| v.is_finite()));
    assert!(sparse.values().all(|v| v.is_finite()));
}

#[test]
fn test_out_of_vocabulary_arguments() {
    let space = EmbeddingTable::from_pairs(4, [("unrelated", Vector::new(vec![1.0, 0.0, 0.0, 0.0]))]).unwrap();
    let assembler = FeatureAssembler::new(&space).unwrap();

    let features = assembler.extract_value(&explicit_relation(), &parses()).unwrap();
    assert_eq!(features.dense[0], 1.0);
    assert!(features.dense[1..].iter().all(|v| *v == 0.0));
}

#[test]
fn test_malformed_records_are_rejected() {
    let space = primary();
    let assembler = FeatureAssembler::new(&space).unwrap();

    let missing_arg2 = json!({"DocID": "wsj_2201", "Arg1": {"TokenList": []}});
    let err = assembler.extract_value(&missing_arg2, &parses()).unwrap_err();
    assert!(err.is_malformed_record());

    let out_of_range = json!({
        "DocID": "wsj_2201",
        "Arg1": {"TokenList": [[0, 5, 0, 0, 0]]},
        "Arg2": {"TokenList": [[0, 5, 0, 5, 0]]}
    });
    assert!(matches!(
        assembler.extract_value(&out_of_range, &parses()),
        Err(Error::TokenOutOfRange { sentence: 5, .. })
    ));

    let unknown = json!({
        "DocID": "wsj_9999",
        "Arg1": {"TokenList": [[0, 5, 0, 0, 0]]},
        "Arg2": {"TokenList": []}
    });
    assert!(matches!(
        assembler.extract_value(&unknown, &parses()),
        Err(Error::UnknownDocument(_))
    ));
}

#[test]
fn test_batch_keeps_input_order() {
    init_tracing();
    let space = primary();
    let assembler = FeatureAssembler::new(&space).unwrap();

    let records = vec![
        explicit_relation(),
        json!({"DocID": "missing", "Arg1": {"TokenList": [[0, 5, 0, 0, 0]]}, "Arg2": {"TokenList": []}}),
        implicit_relation(),
    ];
    let results = extract_batch_values(&assembler, &records, &parses());

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap(),
        &assembler.extract_value(&records[0], &parses()).unwrap()
    );
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap(),
        &assembler.extract_value(&records[2], &parses()).unwrap()
    );
}

#[test]
fn test_raw_tokens() {
    let schema = RecordSchema::default();
    let record = RelationRecord::from_value(&explicit_relation(), &schema).unwrap();
    let raw: RawTokens = extract_raw(&record, &parses()).unwrap();

    assert_eq!(raw.arg1, vec!["Sales", "rose", "sharply"]);
    assert_eq!(raw.connective, vec!["However"]);
    assert_eq!(
        raw.to_value(&schema),
        json!({
            "HasConnective": 1,
            "Arg1": ["Sales", "rose", "sharply"],
            "Connective": ["However"],
            "Arg2": ["profits", "could", "decline", "quickly"]
        })
    );
}

#[test]
fn test_config_from_json() {
    let config = FeatureConfig::from_json_str(
        r#"{
            "schema": {"doc_id_field": "doc"},
            "options": {
                "include_connective_features": false,
                "emit_sparse_features": true,
                "axis_profile": {"profile": "best"}
            }
        }"#,
    )
    .unwrap();

    let space = primary();
    let assembler = FeatureAssembler::builder(&space)
        .schema(config.schema)
        .options(config.options)
        .build()
        .unwrap();

    let mut record = implicit_relation();
    let doc = record.as_object_mut().unwrap().remove("DocID").unwrap();
    record["doc"] = doc;

    let features = assembler.extract_value(&record, &parses()).unwrap();
    // 1 + 2 * 4 + 1 + 5 + 2
    assert_eq!(features.dense.len(), 17);
    assert!(features.sparse.unwrap().contains_key("sim_pos_arg1_RB_arg2_RB"));
}
