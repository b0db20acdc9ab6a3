//! Concurrency smoke test: many clients hitting every service at once.

use std::time::{Duration, Instant};

use param_echo::ServiceKind;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_concurrent_requests() {
    let running = common::start_all().await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let kind = ServiceKind::ALL[task_id % ServiceKind::ALL.len()];
        let base = common::base_url(&running, kind);
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let (url, expected) = match kind {
                    ServiceKind::Root => (
                        format!("{}/items/r{}", base, i),
                        json!({"item_id": format!("r{}", i)}),
                    ),
                    ServiceKind::Typed => (
                        format!("{}/items/{}", base, i),
                        json!({"item_id": i}),
                    ),
                    ServiceKind::Hints => (
                        format!("{}/items/?q={}&q={}", base, i, task_id),
                        json!({"q": [i, task_id]}),
                    ),
                };
                let req_start = Instant::now();
                let res = client.get(&url).send().await.unwrap();
                assert!(res.status().is_success());
                assert_eq!(res.json::<Value>().await.unwrap(), expected);
                latencies.push(req_start.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    assert_eq!(all_latencies.len(), total_requests);

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");

    running.stop().await;
}
