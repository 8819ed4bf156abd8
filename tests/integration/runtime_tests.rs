//! Runtime lifecycle tests

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedBackend, TestBot};
    use llmbot::InboundEvent;
    use llmbot::config::{Config, NoticeTarget};
    use llmbot::messaging::Conversation;

    fn config_with_targets() -> Config {
        let mut config = TestBot::config();
        config.bot.notice_targets = vec![
            NoticeTarget::Group {
                group_id: "g1".to_string(),
            },
            NoticeTarget::Private {
                user_id: "admin".to_string(),
            },
        ];
        config
    }

    #[tokio::test]
    async fn test_start_and_shutdown_notices() {
        let bot =
            TestBot::with_config(config_with_targets(), ScriptedBackend::replying("x"), true).await;

        bot.runtime.start().await;
        let sent = bot.messenger.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, Conversation::group("g1"));
        assert_eq!(sent[1].0, Conversation::private("admin"));
        assert!(sent[0].1.render().contains("Bot started!"));

        bot.runtime.shutdown().await;
        let texts = bot.messenger.texts();
        assert_eq!(texts.len(), 4);
        assert!(texts[3].contains("Going offline"));
    }

    #[tokio::test]
    async fn test_start_while_server_down() {
        let bot =
            TestBot::with_config(config_with_targets(), ScriptedBackend::replying("x"), false)
                .await;

        bot.runtime.start().await;

        assert!(bot.messenger.texts()[0].contains("not reachable"));
        assert!(!bot.services().is_available());
        bot.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_notices_can_be_disabled() {
        let bot =
            TestBot::with_config(config_with_targets(), ScriptedBackend::replying("x"), true).await;

        bot.say("u1", "/notice off").await;
        let before = bot.messenger.count();

        assert_eq!(bot.runtime.broadcast("hello everyone").await, 0);
        assert_eq!(bot.messenger.count(), before);

        bot.services().switches.set_notices_enabled(true);
        assert_eq!(bot.runtime.broadcast("hello everyone").await, 2);
    }

    #[tokio::test]
    async fn test_work_refused_after_shutdown() {
        let bot = TestBot::new(ScriptedBackend::replying("late reply")).await;

        bot.runtime.shutdown().await;
        bot.runtime.handle(InboundEvent::private("u1", "hello")).await;

        assert!(bot.backend.requests().is_empty());
        assert!(!bot.last_text().contains("late reply"));
    }
}
