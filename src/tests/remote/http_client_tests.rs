    use std::cell::Cell;

    use super::*;

    fn quick(attempts: usize) -> RetryPolicy {
        RetryPolicy {
            attempts,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn fatal_error_stops_after_first_attempt() {
        let calls = Cell::new(0);
        let res: Result<()> = with_retries("get json data", quick(5), |_| {
            calls.set(calls.get() + 1);
            Err(AttemptError::Fatal(anyhow!("no JSON data found")))
        });
        let err = res.unwrap_err();
        assert_eq!(calls.get(), 1);
        assert_eq!(format!("{:#}", err), "get json data: no JSON data found");
    }

    #[test]
    fn retriable_error_uses_whole_budget() {
        let calls = Cell::new(0);
        let res: Result<()> = with_retries("post json data", quick(4), |_| {
            calls.set(calls.get() + 1);
            Err(AttemptError::Retriable(anyhow!("unexpected status code 500")))
        });
        assert_eq!(calls.get(), 4);
        assert!(format!("{:#}", res.unwrap_err()).contains("gave up after 4 attempts"));
    }

    #[test]
    fn success_after_retries_returns_value() -> Result<()> {
        let got = with_retries("get", quick(3), |attempt| {
            if attempt < 3 {
                Err(AttemptError::Retriable(anyhow!("flaky")))
            } else {
                Ok(attempt)
            }
        })?;
        assert_eq!(got, 3);
        Ok(())
    }

    fn client_for(base_url: &str) -> Result<TaskClient> {
        TaskClient::new(
            TaskContext {
                base_url: base_url.to_string(),
                task_id: "t1".to_string(),
                secret: None,
            },
            RetryPolicy::default(),
        )
    }

    #[test]
    fn url_joins_api_prefix() -> Result<()> {
        let client = client_for("http://127.0.0.1:9/")?;
        assert_eq!(
            client.url(&["data", "perf"])?.as_str(),
            "http://127.0.0.1:9/api/json/data/perf"
        );
        assert_eq!(client.policy().attempts, 10);

        let prefixed = client_for("http://127.0.0.1:9/ci")?;
        assert_eq!(prefixed.url(&["history", "bench", "perf"])?.path(), "/ci/api/json/history/bench/perf");
        Ok(())
    }

    #[test]
    fn url_segments_are_percent_encoded() -> Result<()> {
        let client = client_for("http://127.0.0.1:9")?;

        let url = client.url(&["data", "perf#1"])?;
        assert_eq!(url.path(), "/api/json/data/perf%231");
        assert_eq!(url.fragment(), None);

        let url = client.url(&["data", "perf?x=1"])?;
        assert_eq!(url.path(), "/api/json/data/perf%3Fx=1");
        assert_eq!(url.query(), None);

        let url = client.url(&["data", "compile", "a/b", "windows"])?;
        assert_eq!(url.path(), "/api/json/data/compile/a%2Fb/windows");
        Ok(())
    }

    #[test]
    fn unusable_base_url_is_an_error() -> Result<()> {
        let client = client_for("not a url")?;
        assert!(client.url(&["data", "perf"]).is_err());
        Ok(())
    }
