use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log_helper::{
    decorate, logf_to, FormatConfig, Level, LogContext, LogHelper, LogSite, MessageBuffer,
    MSG_BUFFER_LEN,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct TestEvent {
    id: i32,
    active: bool,
    large_number: u64,
    description: &'static str,
}

impl std::fmt::Display for TestEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Event[id={}, active={}, large_number={}, desc={}]",
            self.id, self.active, self.large_number, self.description
        )
    }
}

const EVENT: TestEvent = TestEvent {
    id: 42,
    active: true,
    large_number: u64::MAX,
    description: "CPU: 95%, Memory: 2.5GB, Network: 1.2Gbps",
};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");

    group.bench_function("no_handlers", |b| {
        let ctx = LogContext::new();
        let helper = LogHelper::new_in(&ctx);
        b.iter(|| logf_to!(helper, Level::Info, "iteration={}, event={}", black_box(1), EVENT));
    });

    for handler_count in [1usize, 4] {
        group.bench_function(format!("{}_handlers_default_format", handler_count), |b| {
            let ctx = LogContext::new();
            let helper = LogHelper::new_in(&ctx);
            let calls = Arc::new(AtomicUsize::new(0));
            for _ in 0..handler_count {
                let calls = Arc::clone(&calls);
                helper.register_callback(move |message: &str, _: Level, _: &str, _: &str, _: u32, _: &str| {
                    calls.fetch_add(message.len(), Ordering::Relaxed);
                });
            }
            b.iter(|| logf_to!(helper, Level::Info, "iteration={}, event={}", black_box(1), EVENT));
            black_box(calls.load(Ordering::Relaxed));
        });
    }

    group.finish();
}

fn bench_decorate(c: &mut Criterion) {
    let config = FormatConfig::default();
    let now = chrono::Local::now();
    let site = LogSite {
        level: Level::Warning,
        file_name: "app.rs",
        line: 42,
        function: "do_thing",
    };

    c.bench_function("decorate_default_format", |b| {
        let mut out = MessageBuffer::<MSG_BUFFER_LEN>::new();
        let mut time = MessageBuffer::new();
        b.iter(|| {
            decorate(&mut out, &mut time, &config, &now, &site, black_box("disk almost full"));
            black_box(out.len())
        });
    });
}

criterion_group!(benches, bench_dispatch, bench_decorate);
criterion_main!(benches);
