//! Completion pipeline benchmarks
//!
//! Measures the non-network parts of a completion call: option mapping,
//! request encoding, response decoding, and the whole facade over an
//! in-memory transport.
//!
//! Run with: `cargo bench`

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pplx::decode::decode_validated;
use pplx::transport::{ApiRequest, CHAT_COMPLETIONS_PATH, RawResponse, Transport};
use pplx::{
    ChatCompletionOptions, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Client,
    PplxResult,
};
use reqwest::{Method, StatusCode};
use std::hint::black_box;
use std::sync::Arc;

const RESPONSE: &str = r#"{"id":"3fbf9a47","model":"mistral-7b-instruct","created":1702486186,"choices":[{"index":0,"finish_reason":"stop","message":{"role":"assistant","content":"Ownership gives every value a single owner; borrowing lends access without moving it."},"delta":{"role":"assistant","content":""}}],"usage":{"prompt_tokens":24,"completion_tokens":18,"total_tokens":42}}"#;

fn conversation(turns: usize) -> ChatCompletionOptions {
    let mut options = ChatCompletionOptions::new(vec![ChatMessage::system("Be precise.")]);
    for i in 0..turns {
        options = options
            .with_message(ChatMessage::user(format!("Question number {}?", i)))
            .with_message(ChatMessage::assistant(format!("Answer number {}.", i)));
    }
    options
        .with_message(ChatMessage::user("Final question?"))
        .with_max_tokens(256)
        .with_temperature(0.7)
}

/// Validation plus defaulting, for growing conversation sizes
fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    for turns in [0usize, 10, 50] {
        let options = conversation(turns);
        group.bench_with_input(BenchmarkId::from_parameter(turns), &options, |b, opts| {
            b.iter(|| ChatCompletionRequest::try_from(black_box(opts.clone())).unwrap());
        });
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let request = ChatCompletionRequest::try_from(conversation(10)).unwrap();

    c.bench_function("encode_request", |b| {
        b.iter(|| {
            ApiRequest::json(
                Method::POST,
                CHAT_COMPLETIONS_PATH,
                "Bearer bench",
                black_box(&request),
            )
            .unwrap()
        });
    });
}

fn bench_decoding(c: &mut Criterion) {
    c.bench_function("decode_response", |b| {
        b.iter(|| decode_validated::<ChatCompletionResponse>(black_box(RESPONSE.as_bytes())).unwrap());
    });
}

struct InMemory;

#[async_trait]
impl Transport for InMemory {
    async fn execute(&self, _request: ApiRequest) -> PplxResult<RawResponse> {
        Ok(RawResponse::new(StatusCode::OK, RESPONSE))
    }
}

/// Whole facade with the network replaced by an in-memory transport
fn bench_facade(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let client = Client::with_transport(Arc::new(InMemory));
    let options = conversation(10);

    c.bench_function("chat_complete_in_memory", |b| {
        b.to_async(&runtime)
            .iter(|| client.chat_complete(black_box(options.clone())));
    });
}

criterion_group!(
    benches,
    bench_mapping,
    bench_encoding,
    bench_decoding,
    bench_facade,
);
criterion_main!(benches);
