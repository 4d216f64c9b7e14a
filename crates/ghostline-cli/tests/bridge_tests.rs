//! Integration tests for the stdio editor bridge

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ghostline_cache::SuggestionCache;
use ghostline_cli::bridge::EditorBridge;
use ghostline_common::{StatusBoard, StatusSink, STATUS_OK};
use ghostline_completion::CompletionOrchestrator;
use ghostline_config::{ConfigManager, ConfigManagerTrait};
use ghostline_local_models::GenerationClient;
use ghostline_stats::UsageStatistics;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::io::{AsyncReadExt, BufReader};

/// Generation client answering from a fixed table, reporting OK like a live backend
struct TableClient {
    responses: HashMap<String, String>,
    model: Mutex<String>,
    sink: Arc<dyn StatusSink>,
    delays: HashMap<String, Duration>,
}

#[async_trait]
impl GenerationClient for TableClient {
    async fn is_reachable(&self) -> bool {
        true
    }

    async fn call(&self, prefix: &str, _suffix: &str) -> Option<String> {
        self.sink.update_status(STATUS_OK);
        if let Some(delay) = self.delays.get(prefix) {
            tokio::time::sleep(*delay).await;
        }
        self.responses.get(prefix).cloned()
    }

    fn set_model(&self, model: &str) {
        *self.model.lock() = model.to_string();
    }

    fn model(&self) -> String {
        self.model.lock().clone()
    }
}

struct Setup {
    bridge: EditorBridge,
    client: Arc<TableClient>,
    cache: Arc<SuggestionCache>,
    board: Arc<StatusBoard>,
}

fn setup(responses: &[(&str, &str)], delays: &[(&str, u64)]) -> Setup {
    let board = Arc::new(StatusBoard::new());
    let sink: Arc<dyn StatusSink> = board.clone();
    let client = Arc::new(TableClient {
        responses: responses
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect(),
        model: Mutex::new("codellama:7b-code".to_string()),
        sink: sink.clone(),
        delays: delays
            .iter()
            .map(|(p, ms)| (p.to_string(), Duration::from_millis(*ms)))
            .collect(),
    });
    let cache = Arc::new(SuggestionCache::new());
    let orchestrator = CompletionOrchestrator::new(
        cache.clone(),
        Arc::new(UsageStatistics::new()),
        client.clone(),
        sink,
    );
    Setup {
        bridge: EditorBridge::new(orchestrator, board.clone()),
        client,
        cache,
        board,
    }
}

/// Feed `input` to the bridge and collect every response line
async fn exchange(bridge: &EditorBridge, input: &str) -> Vec<Value> {
    let (mut editor_side, bridge_side) = tokio::io::duplex(1 << 16);
    bridge
        .run(BufReader::new(input.as_bytes()), bridge_side)
        .await
        .unwrap();

    let mut output = String::new();
    editor_side.read_to_string(&mut output).await.unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn suggestion(responses: &[Value], id: u64) -> &Value {
    responses
        .iter()
        .find(|r| r["type"] == "suggestion" && r["id"] == id)
        .unwrap_or_else(|| panic!("no suggestion for request {}", id))
}

#[tokio::test]
async fn test_suggest_request() {
    let s = setup(&[("foo.bar", "baz()")], &[]);

    let responses = exchange(
        &s.bridge,
        "{\"type\":\"suggest\",\"id\":1,\"text\":\"foo.bar\",\"offset\":6}\n",
    )
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["text"], "baz()");
    assert!(responses[0].get("skipped").is_none());
}

#[tokio::test]
async fn test_gated_position_is_skipped() {
    let s = setup(&[], &[]);

    let input = concat!(
        "{\"type\":\"suggest\",\"id\":1,\"text\":\"int x = 123;\",\"offset\":11}\n",
        "{\"type\":\"suggest\",\"id\":2,\"text\":\"int x = 123;\",\"offset\":11,\"event\":\"direct_call\"}\n",
    );
    let responses = exchange(&s.bridge, input).await;

    assert_eq!(suggestion(&responses, 1)["skipped"], true);
    assert!(suggestion(&responses, 2).get("skipped").is_none());
}

#[tokio::test]
async fn test_responses_carry_request_ids_out_of_order() {
    let s = setup(&[("slow.", "a()"), ("fast.", "b()")], &[("slow.", 150)]);

    let input = concat!(
        "{\"type\":\"suggest\",\"id\":1,\"text\":\"slow.\",\"offset\":4}\n",
        "{\"type\":\"suggest\",\"id\":2,\"text\":\"fast.\",\"offset\":4}\n",
    );
    let responses = exchange(&s.bridge, input).await;

    assert_eq!(responses[0]["id"], 2);
    assert_eq!(suggestion(&responses, 1)["text"], "a()");
    assert_eq!(suggestion(&responses, 2)["text"], "b()");
}

#[tokio::test]
async fn test_stats_and_reset() {
    let s = setup(&[("k.", "v")], &[]);

    let first = exchange(
        &s.bridge,
        concat!(
            "{\"type\":\"suggest\",\"id\":1,\"text\":\"k.\",\"offset\":1}\n",
            "{\"type\":\"accepted\"}\n",
        ),
    )
    .await;
    assert_eq!(first.len(), 1);

    // Let the request record its completion time
    tokio::time::sleep(Duration::from_millis(50)).await;

    let stats = exchange(&s.bridge, "{\"type\":\"stats\"}\n").await;
    assert_eq!(stats[0]["type"], "stats");
    assert_eq!(stats[0]["statistics"]["total_completions"], 1);
    assert_eq!(stats[0]["statistics"]["successful_completions"], 1);
    assert_eq!(stats[0]["user_engagement_percent"], 100);

    let reset = exchange(&s.bridge, "{\"type\":\"reset_stats\"}\n{\"type\":\"status\"}\n").await;
    assert_eq!(reset[0]["statistics"]["total_completions"], 0);
    assert_eq!(
        reset[1]["text"],
        "| Ghostline Status: OK | Cache Miss: 0 | Cache Hit: 0 |"
    );
}

#[tokio::test]
async fn test_status_reflects_cache_traffic() {
    let s = setup(&[("k.", "v")], &[]);

    exchange(
        &s.bridge,
        "{\"type\":\"suggest\",\"id\":1,\"text\":\"k.\",\"offset\":1}\n",
    )
    .await;
    exchange(
        &s.bridge,
        "{\"type\":\"suggest\",\"id\":2,\"text\":\"k.\",\"offset\":1}\n",
    )
    .await;
    let status = exchange(&s.bridge, "{\"type\":\"status\"}\n").await;

    assert_eq!(
        status[0]["text"],
        "| Ghostline Status: OK | Cache Miss: 1 | Cache Hit: 1 |"
    );
}

#[tokio::test]
async fn test_initial_status_is_waiting() {
    let s = setup(&[], &[]);
    let status = exchange(&s.bridge, "{\"type\":\"status\"}\n").await;
    assert_eq!(
        status[0]["text"],
        "| Ghostline Status: waiting... | Cache Miss: 0 | Cache Hit: 0 |"
    );
}

#[tokio::test]
async fn test_set_model() {
    let s = setup(&[], &[]);

    let responses = exchange(
        &s.bridge,
        "{\"type\":\"set_model\",\"model\":\"starcoder2:3b\"}\n{\"type\":\"set_model\",\"model\":\" \"}\n",
    )
    .await;

    assert_eq!(s.client.model(), "starcoder2:3b");
    assert_eq!(responses[0]["type"], "status");
    assert_eq!(responses[1]["type"], "error");
}

#[tokio::test]
async fn test_malformed_lines_get_errors_and_do_not_stop_the_bridge() {
    let s = setup(&[("k.", "v")], &[]);

    let input = concat!(
        "not json\n",
        "\n",
        "{\"type\":\"launch\"}\n",
        "{\"type\":\"suggest\",\"id\":9,\"text\":\"k.\",\"offset\":1}\n",
    );
    let responses = exchange(&s.bridge, input).await;

    let errors = responses.iter().filter(|r| r["type"] == "error").count();
    assert_eq!(errors, 2);
    assert_eq!(suggestion(&responses, 9)["text"], "v");
}

#[tokio::test]
async fn test_set_model_is_saved_to_config() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.toml"))
        .with_env_prefix("GHOSTLINE_BRIDGE_IT");
    let Setup {
        bridge,
        client,
        cache,
        ..
    } = setup(&[], &[]);
    let bridge = bridge.with_config_manager(manager.clone());
    cache.put("k.", "v");

    let responses = exchange(
        &bridge,
        "{\"type\":\"set_model\",\"model\":\"starcoder2:3b\"}\n",
    )
    .await;

    assert_eq!(responses[0]["type"], "status");
    assert_eq!(client.model(), "starcoder2:3b");
    assert!(cache.is_empty());
    assert_eq!(manager.load_config().unwrap().model, "starcoder2:3b");
}

#[tokio::test]
async fn test_set_model_not_applied_when_save_fails() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let manager = ConfigManager::with_path(blocker.path().join("config.toml"))
        .with_env_prefix("GHOSTLINE_BRIDGE_IT");
    let Setup {
        bridge,
        client,
        cache,
        ..
    } = setup(&[], &[]);
    let bridge = bridge.with_config_manager(manager);
    cache.put("k.", "v");

    let responses = exchange(
        &bridge,
        "{\"type\":\"set_model\",\"model\":\"starcoder2:3b\"}\n",
    )
    .await;

    assert_eq!(responses[0]["type"], "error");
    assert_eq!(client.model(), "codellama:7b-code");
    assert_eq!(cache.get("k."), "v");
}

#[tokio::test]
async fn test_status_counts_restart_after_reset_despite_late_pushes() {
    let s = setup(&[("k.", "v")], &[]);

    exchange(
        &s.bridge,
        "{\"type\":\"suggest\",\"id\":1,\"text\":\"k.\",\"offset\":1}\n",
    )
    .await;
    exchange(&s.bridge, "{\"type\":\"reset_stats\"}\n").await;

    // A request that counted before the reset reports after it
    s.board.update_cache_hits(50);

    exchange(
        &s.bridge,
        "{\"type\":\"suggest\",\"id\":2,\"text\":\"k.\",\"offset\":1}\n",
    )
    .await;
    let status = exchange(&s.bridge, "{\"type\":\"status\"}\n").await;

    assert_eq!(
        status[0]["text"],
        "| Ghostline Status: OK | Cache Miss: 0 | Cache Hit: 1 |"
    );
}
