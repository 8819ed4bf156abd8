//! Event dispatch tests
//!
//! Every test builds a full service container over a scripted backend and an
//! in-memory ledger, then drives it with inbound events.

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedBackend, StreamScript, TestBot};
    use llmbot::InboundEvent;
    use llmbot::config::RateLimitConfig;
    use llmbot::core::ollama::ChatRole;
    use llmbot::messaging::{Conversation, Reply};
    use std::time::Duration;

    fn group_event(user: &str, name: &str, text: &str) -> InboundEvent {
        InboundEvent::group("g1", user, name, text, true)
    }

    fn joined(user: &str, name: &str) -> InboundEvent {
        InboundEvent::MemberJoined {
            group_id: "g1".to_string(),
            group_name: "Rustaceans".to_string(),
            user_id: user.to_string(),
            user_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_private_chat_replies_with_prefix() {
        let bot = TestBot::new(ScriptedBackend::replying("hi there")).await;

        bot.say("u1", "hello").await;

        assert_eq!(bot.last_text(), "Bean: hi there");
        let requests = bot.backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].stream, Some(true));
        assert_eq!(requests[0].messages.len(), 2);
        assert_eq!(requests[0].messages[0].role, ChatRole::System);
        assert_eq!(requests[0].messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_group_message_needs_mention() {
        let bot = TestBot::new(ScriptedBackend::replying("hey")).await;

        bot.send(InboundEvent::group("g1", "u1", "Alice", "just chatting", false))
            .await;
        assert_eq!(bot.messenger.count(), 0);
        assert!(bot.backend.requests().is_empty());

        bot.send(InboundEvent::group("g1", "u1", "Alice", "hello bot", true))
            .await;
        let sent = bot.messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Conversation::group("g1"));
    }

    #[tokio::test]
    async fn test_empty_message_gets_usage_hint() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.say("u1", "   ").await;

        assert!(bot.last_text().contains("What would you like to talk about"));
        assert!(bot.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_standby_refuses_generation() {
        let bot =
            TestBot::with_config(TestBot::config(), ScriptedBackend::replying("x"), false).await;

        bot.say("u1", "hello").await;
        bot.say("u1", "/code a parser").await;

        for text in bot.messenger.texts() {
            assert!(text.contains("standby"), "unexpected reply: {}", text);
        }
        assert!(bot.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generation_resumes_after_server_returns() {
        let bot =
            TestBot::with_config(TestBot::config(), ScriptedBackend::replying("back"), false).await;

        bot.say("u1", "hello").await;
        assert!(bot.last_text().contains("standby"));

        bot.probe.set_up(true);
        bot.services().availability.check_now().await;
        bot.say("u1", "hello").await;
        assert_eq!(bot.last_text(), "Bean: back");
    }

    #[tokio::test]
    async fn test_rate_limit_is_per_user_and_feature() {
        let mut config = TestBot::config();
        config.rate_limits.ai = RateLimitConfig::new(1, 60);
        let bot = TestBot::with_config(config, ScriptedBackend::replying("ok"), true).await;

        bot.say("u1", "one").await;
        assert_eq!(bot.last_text(), "Bean: ok");

        bot.say("u1", "two").await;
        assert!(bot.last_text().contains("too often"));

        bot.say("u2", "three").await;
        assert_eq!(bot.last_text(), "Bean: ok");

        bot.say("u1", "/write a haiku").await;
        assert_eq!(bot.last_text(), "Bean: ok");

        assert_eq!(bot.backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_memory_replays_history() {
        let bot = TestBot::new(ScriptedBackend::replying("noted")).await;

        bot.say("u1", "/memory on").await;
        assert!(bot.last_text().contains("Memory is on"));

        bot.say("u1", "my name is Ferris").await;
        bot.say("u1", "what is my name?").await;

        let requests = bot.backend.requests();
        let second = &requests[1].messages;
        let roles: Vec<ChatRole> = second.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User
            ]
        );
        assert_eq!(second[1].content, "my name is Ferris");
        assert_eq!(second[2].content, "noted");

        bot.say("u1", "/status").await;
        assert!(bot.last_text().contains("memory mode: on, 4 turns stored"));

        bot.say("u1", "/forget").await;
        bot.say("u1", "/status").await;
        assert!(bot.last_text().contains("0 turns stored"));

        bot.say("u1", "/memory off").await;
        bot.say("u1", "/status").await;
        assert_eq!(bot.last_text(), "(memory mode: off, no context memory)");
    }

    #[tokio::test]
    async fn test_memory_is_per_user() {
        let bot = TestBot::new(ScriptedBackend::replying("sure")).await;

        bot.say("u1", "/memory on").await;
        bot.say("u1", "remember this").await;
        bot.say("u2", "hello").await;

        let requests = bot.backend.requests();
        assert_eq!(requests[1].messages.len(), 2);
        assert_eq!(requests[1].messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_stall_falls_back_to_single_request() {
        let mut config = TestBot::config();
        config.ollama.line_timeout = 1;
        let backend = ScriptedBackend::replying("unused");
        backend.push(StreamScript::Stall);
        backend.set_complete_reply(Some("fallback answer"));
        let bot = TestBot::with_config(config, backend, true).await;

        bot.say("u1", "are you there?").await;

        assert_eq!(bot.last_text(), "Bean: fallback answer");
        assert_eq!(bot.backend.complete_calls(), 1);
        assert_eq!(bot.backend.requests()[1].stream, Some(false));
    }

    #[tokio::test]
    async fn test_stream_without_done_keeps_text() {
        let backend = ScriptedBackend::replying("unused");
        backend.push(StreamScript::Lines(vec![
            crate::common::chunk_line("half an "),
            crate::common::chunk_line("answer"),
        ]));
        let bot = TestBot::new(backend).await;

        bot.say("u1", "go").await;

        assert_eq!(bot.last_text(), "Bean: half an answer");
        assert_eq!(bot.backend.complete_calls(), 0);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let backend = ScriptedBackend::replying("second time lucky");
        backend.push(StreamScript::Fail(503));
        let bot = TestBot::new(backend).await;

        bot.say("u1", "hello").await;

        assert_eq!(bot.last_text(), "Bean: second time lucky");
        assert_eq!(bot.backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failures_become_friendly_text() {
        let backend = ScriptedBackend::replying("unused");
        backend.push(StreamScript::Fail(503));
        backend.push(StreamScript::Fail(503));
        backend.push(StreamScript::Fail(400));
        let bot = TestBot::new(backend).await;

        bot.say("u1", "hello").await;
        assert_eq!(
            bot.last_text(),
            "Bean: The model is on standby at the moment, please try again later."
        );

        bot.say("u1", "hello again").await;
        assert_eq!(
            bot.last_text(),
            "Bean: Sorry, something went wrong while handling that."
        );
        assert!(!bot.last_text().contains("scripted failure"));
        assert_eq!(bot.backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_model_output_is_reported() {
        let backend = ScriptedBackend::replying("unused");
        backend.push(StreamScript::reply("   "));
        let bot = TestBot::new(backend).await;

        bot.say("u1", "hello").await;

        assert!(bot.last_text().contains("The model produced nothing"));
    }

    #[tokio::test]
    async fn test_filtered_words_are_masked() {
        let mut config = TestBot::config();
        config.filter.words = vec!["secret".to_string()];
        let bot =
            TestBot::with_config(config, ScriptedBackend::replying("the SECRET plan"), true).await;

        bot.say("u1", "tell me").await;

        assert!(bot.last_text().starts_with("Bean: the "));
        assert!(!bot.last_text().to_lowercase().contains("secret"));
    }

    #[tokio::test]
    async fn test_write_splits_paragraphs() {
        let bot = TestBot::new(ScriptedBackend::replying("First stanza.\n\nSecond stanza.")).await;

        bot.say("u1", "/write a poem").await;

        assert_eq!(
            bot.messenger.last(),
            Some(Reply::Forward(vec![
                "Bean: First stanza.".to_string(),
                "Second stanza.".to_string()
            ]))
        );
    }

    #[tokio::test]
    async fn test_code_includes_quoted_text() {
        let bot = TestBot::new(ScriptedBackend::replying("fixed")).await;

        bot.send(InboundEvent::private("u1", "/code fix the bug").with_quote("fn main() {}"))
            .await;

        let requests = bot.backend.requests();
        let prompt = &requests[0].messages.last().unwrap().content;
        assert_eq!(prompt, "fn main() {}\nfix the bug");
        let profiles = &bot.services().config.ollama.profiles;
        assert_eq!(requests[0].model, profiles.code.model);
    }

    #[tokio::test]
    async fn test_ctf_prompt_template() {
        let bot = TestBot::new(ScriptedBackend::replying("try xor")).await;

        bot.say("u1", "/ctf weird cipher").await;

        let requests = bot.backend.requests();
        assert_eq!(
            requests[0].messages.last().unwrap().content,
            "CTF challenge analysis: weird cipher\nPlease outline an approach:"
        );
    }

    #[tokio::test]
    async fn test_help_is_forwarded() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.say("u1", "/help").await;

        match bot.messenger.last() {
            Some(Reply::Forward(parts)) => {
                assert!(parts[0].starts_with("Bean: "));
                assert!(parts.iter().any(|p| p.contains("/sign")));
            }
            other => panic!("Expected forward reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.say("u1", "/frobnicate now").await;

        assert_eq!(bot.messenger.count(), 0);
        assert!(bot.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_flow() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.send(group_event("u1", "Alice", "/sign")).await;
        match bot.messenger.last() {
            Some(Reply::Mention { user_id, text }) => {
                assert_eq!(user_id, "u1");
                assert!(text.starts_with("Signed in! +10 points"), "{}", text);
                assert!(text.contains("Streak: 1 days"));
            }
            other => panic!("Expected mention, got {:?}", other),
        }

        bot.send(group_event("u1", "Alice", "/sign")).await;
        assert!(bot.last_text().contains("already signed in today"));

        bot.send(group_event("u1", "Alice", "/points")).await;
        assert_eq!(bot.last_text(), "@u1 You have 10 points.");

        bot.send(group_event("u2", "Bob", "/sign")).await;
        bot.send(group_event("u2", "Bob", "/rank")).await;
        assert!(bot.last_text().starts_with("Points leaderboard\n"));
        assert!(bot.last_text().contains("Alice: 10 points"));
        assert!(bot.last_text().contains("Bob: 10 points"));

        bot.send(group_event("u1", "Alice", "/history")).await;
        assert!(bot.last_text().contains("+10 Daily sign-in (1 day streak)"));

        bot.send(group_event("u1", "Alice", "/backfill")).await;
        assert!(bot.last_text().contains("Not enough points"));

        assert_eq!(bot.db.ledger().balance("u1", "g1").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_ledger_commands_need_a_group() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.say("u1", "/sign").await;

        assert_eq!(bot.last_text(), "(This command only works in group chats.)");
        assert_eq!(bot.db.ledger().balance("u1", "u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ledger_rate_limit() {
        let mut config = TestBot::config();
        config.rate_limits.ledger = RateLimitConfig::new(1, 60);
        let bot = TestBot::with_config(config, ScriptedBackend::replying("unused"), true).await;

        bot.send(group_event("u1", "Alice", "/points")).await;
        bot.send(group_event("u1", "Alice", "/points")).await;

        assert!(bot.last_text().contains("too often"));
    }

    #[tokio::test]
    async fn test_bot_switch_pauses_ledger_commands() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;

        bot.send(group_event("u1", "Alice", "/bot off")).await;
        assert!(bot.last_text().contains("Bot disabled"));
        let before = bot.messenger.count();

        bot.send(group_event("u1", "Alice", "/sign")).await;
        assert_eq!(bot.messenger.count(), before);

        bot.send(group_event("u1", "Alice", "/bot on")).await;
        bot.send(group_event("u1", "Alice", "/sign")).await;
        assert!(bot.last_text().contains("Signed in!"));
    }

    #[tokio::test]
    async fn test_notice_switch() {
        let bot = TestBot::new(ScriptedBackend::replying("unused")).await;
        assert!(bot.services().switches.notices_enabled());

        bot.say("u1", "/notice off").await;

        assert!(!bot.services().switches.notices_enabled());
        assert!(bot.last_text().contains("Notices off"));
    }

    #[tokio::test]
    async fn test_welcome_generated() {
        let backend = ScriptedBackend::replying("unused");
        backend.set_complete_reply(Some("  Welcome, Carol!  "));
        let bot = TestBot::new(backend).await;

        bot.send(joined("u9", "Carol")).await;

        let sent = bot.messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Conversation::group("g1"));
        assert_eq!(sent[0].1, Reply::mention("u9", "Bean: Welcome, Carol!"));

        let request = &bot.backend.requests()[0];
        assert_eq!(request.stream, Some(false));
        assert!(request.messages[1].content.contains("Carol"));
        assert!(request.messages[1].content.contains("Rustaceans"));
    }

    #[tokio::test]
    async fn test_welcome_waits_for_group_lock() {
        let backend = ScriptedBackend::replying("unused");
        backend.set_complete_reply(Some("Welcome, Carol!"));
        let bot = TestBot::new(backend).await;

        let guard = bot.services().locks.group_lock("g1").lock().await;
        let send = bot.send(joined("u9", "Carol"));
        tokio::pin!(send);
        tokio::select! {
            _ = &mut send => panic!("welcome sent while the group was locked"),
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}
        }
        assert_eq!(bot.messenger.count(), 0);

        drop(guard);
        send.await;
        assert_eq!(bot.messenger.count(), 1);
    }

    #[tokio::test]
    async fn test_welcome_falls_back_on_failure() {
        let backend = ScriptedBackend::replying("unused");
        backend.set_complete_reply(None);
        let bot = TestBot::new(backend).await;

        bot.send(joined("u9", "Carol")).await;

        assert!(bot.last_text().starts_with("@u9 Bean: Welcome aboard!"));
        assert_eq!(bot.backend.complete_calls(), 2);
    }

    #[tokio::test]
    async fn test_welcome_on_standby_uses_fallback() {
        let bot =
            TestBot::with_config(TestBot::config(), ScriptedBackend::replying("x"), false).await;

        bot.send(joined("u9", "Carol")).await;

        assert!(bot.last_text().contains("Welcome aboard!"));
        assert_eq!(bot.backend.complete_calls(), 0);
    }

    #[tokio::test]
    async fn test_welcome_rate_limited_per_group() {
        let mut config = TestBot::config();
        config.rate_limits.welcome = RateLimitConfig::new(1, 60);
        let bot = TestBot::with_config(config, ScriptedBackend::replying("hi"), true).await;

        bot.send(joined("u8", "Dan")).await;
        bot.send(joined("u9", "Erin")).await;

        assert_eq!(bot.messenger.count(), 1);
    }

    #[tokio::test]
    async fn test_performance_tracks_operations() {
        let bot = TestBot::new(ScriptedBackend::replying("ok")).await;

        bot.say("u1", "hello").await;
        bot.send(group_event("u1", "Alice", "/sign")).await;

        let performance = &bot.services().performance;
        let chat = performance.stats("chat").expect("chat stats");
        assert_eq!(chat.count, 1);
        assert_eq!(chat.successes, 1);
        assert_eq!(performance.success_rate("sign_in"), 1.0);
    }
}
