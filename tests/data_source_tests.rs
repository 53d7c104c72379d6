#[cfg(test)]
mod tests {
    use mines_engine::registry::TableRegistry;
    use mines_engine::sealed;
    use mines_engine::source::{from_config, EMBEDDED_SAMPLES};
    use mines_engine::{
        AnalysisError, AnalyzerConfig, EmbeddedSource, JsonFileSource, OutcomeAnalyzer, PayoutSource, SourceConfig,
        SourceError,
    };
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mines-engine-it-{}-{}", std::process::id(), name))
    }

    #[test]
    fn json_file_source_feeds_analyzer() {
        let path = temp_path("samples.json");
        std::fs::write(
            &path,
            r#"{"board_size":16,"samples":[{"hazard_count":4,"points":[
                {"revealed_cells":0,"multiplier":1.0},
                {"revealed_cells":2,"multiplier":1.8}]}]}"#,
        )
        .expect("test: write samples");

        let config = AnalyzerConfig::from_json_str(&format!(
            r#"{{"board_size":16,"source":{{"kind":"json_file","path":{:?}}}}}"#,
            path.display().to_string()
        ))
        .expect("test: config parses");
        let source = from_config(&config.source).expect("test: source builds");
        let registry = TableRegistry::new();
        let table = registry.get_or_load(source.as_ref()).expect("test: table loads");
        let analyzer = OutcomeAnalyzer::new(table, &config);

        let r = analyzer.analyze_default(4, 1).expect("test: analysis");
        assert!((r.multiplier - 1.4).abs() < 1e-12);
        assert!((r.success_rate - 75.0).abs() < 1e-12);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn short_group_from_a_file_is_insufficient_sample_data() {
        let path = temp_path("short-group.json");
        std::fs::write(
            &path,
            r#"{"samples":[
                {"hazard_count":3,"points":[{"revealed_cells":0,"multiplier":1.0},{"revealed_cells":1,"multiplier":1.12}]},
                {"hazard_count":24,"points":[{"revealed_cells":1,"multiplier":24.75}]}]}"#,
        )
        .expect("test: write samples");

        let err = TableRegistry::new()
            .get_or_load(&JsonFileSource::new(&path))
            .expect_err("test: one-point group");
        let err = AnalysisError::from(err);
        assert!(matches!(err, AnalysisError::InsufficientSampleData { hazard_count: 24, points: 1 }));
        assert!(err.is_fatal());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_json_is_reported_as_parse_error() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json").expect("test: write file");
        let err = JsonFileSource::new(&path).load_payout_table().expect_err("test: broken json");
        assert!(matches!(err, SourceError::Parse(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn sealed_container_with_wrong_passphrase_fails_closed() {
        let costs = sealed::KdfCosts { m_cost: 64, t_cost: 1, p_cost: 1 };
        let sealed_bytes = sealed::seal_with_costs(
            EMBEDDED_SAMPLES.as_bytes(),
            b"correct horse",
            costs,
            [9u8; sealed::SALT_LEN],
            [1u8; sealed::NONCE_LEN],
        )
        .expect("test: seal samples");
        assert!(sealed::open(&sealed_bytes, b"battery staple").is_err());
        let opened = sealed::open(&sealed_bytes, b"correct horse").expect("test: right passphrase");
        assert_eq!(opened, EMBEDDED_SAMPLES.as_bytes());
    }

    #[test]
    fn default_config_uses_embedded_samples() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.source, SourceConfig::Embedded);
        let source = from_config(&config.source).expect("test: embedded source");
        assert_eq!(source.describe(), EmbeddedSource.describe());
    }
}
