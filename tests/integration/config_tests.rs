//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use llmbot::BotError;
    use llmbot::config::{Config, NoticeTarget, ReplyMode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/llmbot.yaml.example");

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = assert_ok!(Config::from_file(EXAMPLE).await);

        assert_eq!(config.bot.prefix, "Bean: ");
        assert_eq!(config.bot.default_mode, ReplyMode::Chat);
        assert_eq!(config.bot.notice_targets.len(), 2);
        assert_eq!(
            config.bot.notice_targets[1],
            NoticeTarget::Private {
                user_id: "10001".to_string()
            }
        );
        assert_eq!(config.retry.ledger.max_attempts, 3);
        assert!(config.retry.ledger.jitter);
        assert_eq!(config.ollama.profiles.code.model, "code");
        // Profiles left out of the file keep their defaults
        assert_eq!(config.ollama.profiles.ctf.model, "ctf");
    }

    #[tokio::test]
    async fn test_empty_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}\n").unwrap();

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.rate_limits.ai.max_calls, 20);
        assert_eq!(config.conversation.ttl, 600);
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"bot: [unclosed\n").unwrap();

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = assert_err!(Config::from_yaml("concurrency:\n  max_concurrent: 0\n"));
        assert!(err.to_string().contains("Concurrency"));
    }
}
