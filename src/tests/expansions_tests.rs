    use super::*;

    fn sample() -> Expansions {
        let mut exp = Expansions::new();
        exp.put("task_name", "compile");
        exp.put("workdir", "/tmp/w");
        exp
    }

    #[test]
    fn known_keys_are_substituted() -> Result<()> {
        let exp = sample();
        assert_eq!(exp.expand("${workdir}/out-${task_name}.json")?, "/tmp/w/out-compile.json");
        assert_eq!(exp.expand("plain")?, "plain");
        Ok(())
    }

    #[test]
    fn unknown_keys_use_default_or_empty() -> Result<()> {
        let exp = sample();
        assert_eq!(exp.expand("a${missing}b")?, "ab");
        assert_eq!(exp.expand("${missing|perf}")?, "perf");
        assert_eq!(exp.expand("${task_name|other}")?, "compile");
        Ok(())
    }

    #[test]
    fn unterminated_reference_is_an_error() {
        assert!(sample().expand("${task_name").is_err());
    }

    #[test]
    fn pairs_need_a_key_and_equals_sign() -> Result<()> {
        let mut exp = Expansions::new();
        exp.put_pair("k=v=w")?;
        assert_eq!(exp.get("k"), Some("v=w"));
        assert!(exp.put_pair("novalue").is_err());
        assert!(exp.put_pair("=v").is_err());
        Ok(())
    }

    #[test]
    fn file_must_be_flat_string_map() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let good = dir.path().join("exp.json");
        std::fs::write(&good, r#"{"revision": "abc"}"#)?;
        assert_eq!(Expansions::from_file(&good)?.get("revision"), Some("abc"));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"nested": {"a": 1}}"#)?;
        assert!(Expansions::from_file(&bad).is_err());
        Ok(())
    }
