    use serde_json::json;

    use super::*;

    #[test]
    fn registered_names_resolve_with_and_without_prefix() -> Result<()> {
        let cmd = PluginCommand::from_params("json.send", json!({"file": "a.json", "name": "perf"}))?;
        assert_eq!(
            cmd,
            PluginCommand::Send(SendCommand {
                file: "a.json".to_string(),
                name: "perf".to_string(),
            })
        );

        let cmd = PluginCommand::from_params("history", json!({"tags": true}))?;
        assert_eq!(cmd.name(), HistoryCommand::NAME);
        assert_eq!(
            PluginCommand::names().collect::<Vec<_>>(),
            vec!["send", "get", "get_history", "history"]
        );
        Ok(())
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = PluginCommand::from_params("upload", Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "unknown command 'upload'");
    }

    #[test]
    fn bad_params_name_the_command() {
        let err = PluginCommand::from_params("get", json!({"file": 3})).unwrap_err();
        assert!(err.to_string().contains("error decoding 'get' params"));
    }

    #[test]
    fn endpoints_follow_params() -> Result<()> {
        let PluginCommand::Get(get) = PluginCommand::from_params(
            "get",
            json!({"file": "f", "name": "perf", "task": "compile", "variant": "windows"}),
        )?
        else {
            panic!("expected get command");
        };
        assert_eq!(get.endpoint(), vec!["data", "compile", "perf", "windows"]);

        let hist = HistoryCommand {
            tags: true,
            file: "f".to_string(),
            name: "perf".to_string(),
            task: "compile".to_string(),
        };
        assert_eq!(hist.endpoint(), vec!["tags", "compile", "perf"]);
        Ok(())
    }

    #[test]
    fn params_are_expanded_before_validation() -> Result<()> {
        let mut expansions = Expansions::new();
        expansions.put("dataset", "perf");
        let cmd = SendCommand {
            file: "${out|result.json}".to_string(),
            name: "${dataset}".to_string(),
        }
        .expand(&expansions)?;
        assert_eq!(cmd.file, "result.json");
        assert_eq!(cmd.name, "perf");

        let blank = SendCommand {
            file: "x".to_string(),
            name: "${unset}".to_string(),
        }
        .expand(&expansions)?;
        assert!(blank.validate().is_err());
        Ok(())
    }
